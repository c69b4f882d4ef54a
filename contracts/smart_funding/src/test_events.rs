extern crate std;

use soroban_sdk::{symbol_short, testutils::Events, vec, IntoVal, TryIntoVal};

use crate::events::{ClaimReward, Finalized, Initialized, Invest, Refund};
use crate::test::{TestContext, DURATION_DAYS, GOAL, REWARD_POOL, UNIT};
use crate::Stage;

#[test]
fn test_initialized_event() {
    let ctx = TestContext::deployed();
    ctx.client.initialize(&GOAL, &DURATION_DAYS);

    let all_events = ctx.env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("init"),)
    assert_eq!(last_event.0, ctx.client.address);
    let expected_topics = vec![&ctx.env, symbol_short!("init").into_val(&ctx.env)];
    assert_eq!(last_event.1, expected_topics);

    let event_data: Initialized = last_event.2.try_into_val(&ctx.env).unwrap();
    assert_eq!(
        event_data,
        Initialized {
            goal: GOAL,
            deadline: ctx.client.deadline(),
            reward_pool: REWARD_POOL,
        }
    );
}

#[test]
fn test_invest_event() {
    let ctx = TestContext::active();
    let investor = ctx.investor();
    let amount = UNIT / 10;

    ctx.client.invest(&investor, &amount);

    let all_events = ctx.env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("invest"), investor)
    assert_eq!(last_event.0, ctx.client.address);
    let expected_topics = vec![
        &ctx.env,
        symbol_short!("invest").into_val(&ctx.env),
        investor.into_val(&ctx.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: Invest = last_event.2.try_into_val(&ctx.env).unwrap();
    assert_eq!(
        event_data,
        Invest {
            investor: investor.clone(),
            amount,
        }
    );
}

#[test]
fn test_claim_reward_event() {
    let ctx = TestContext::active();
    let investor = ctx.investor();
    ctx.client.invest(&investor, &(UNIT / 10));
    ctx.force_stage(Stage::Success);

    ctx.client.claim(&investor);

    let all_events = ctx.env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("claim"), investor)
    assert_eq!(last_event.0, ctx.client.address);
    let expected_topics = vec![
        &ctx.env,
        symbol_short!("claim").into_val(&ctx.env),
        investor.into_val(&ctx.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: ClaimReward = last_event.2.try_into_val(&ctx.env).unwrap();
    assert_eq!(
        event_data,
        ClaimReward {
            investor: investor.clone(),
            amount: 100_000 * UNIT,
        }
    );
}

#[test]
fn test_claim_emits_token_transfer() {
    let ctx = TestContext::active();
    let investor = ctx.investor();
    ctx.client.invest(&investor, &(UNIT / 10));
    ctx.force_stage(Stage::Success);

    ctx.client.claim(&investor);

    // The reward token publishes its own transfer event ahead of ours.
    let transfers = ctx
        .env
        .events()
        .all()
        .iter()
        .filter(|e| e.0 == ctx.reward.address)
        .count();
    assert!(transfers >= 1, "reward token emitted no transfer event");
}

#[test]
fn test_refund_event() {
    let ctx = TestContext::active();
    let investor = ctx.investor();
    let amount = 9 * UNIT / 10;
    ctx.client.invest(&investor, &amount);
    ctx.force_stage(Stage::Failed);

    ctx.client.refund(&investor);

    let all_events = ctx.env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("refund"), investor)
    assert_eq!(last_event.0, ctx.client.address);
    let expected_topics = vec![
        &ctx.env,
        symbol_short!("refund").into_val(&ctx.env),
        investor.into_val(&ctx.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: Refund = last_event.2.try_into_val(&ctx.env).unwrap();
    assert_eq!(
        event_data,
        Refund {
            investor: investor.clone(),
            amount,
        }
    );
}

#[test]
fn test_finalized_event() {
    let ctx = TestContext::active();
    let investor = ctx.investor();
    ctx.client.invest(&investor, &GOAL);

    ctx.client.try_finalize();

    let all_events = ctx.env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("finalized"),)
    assert_eq!(last_event.0, ctx.client.address);
    let expected_topics = vec![&ctx.env, symbol_short!("finalized").into_val(&ctx.env)];
    assert_eq!(last_event.1, expected_topics);

    let event_data: Finalized = last_event.2.try_into_val(&ctx.env).unwrap();
    assert_eq!(
        event_data,
        Finalized {
            stage: Stage::Success,
            pool: GOAL,
        }
    );
}
