extern crate std;

use crate::invariants::{assert_all_ledger_invariants, assert_valid_stage_transition};
use crate::test::{TestContext, DURATION_DAYS, GOAL, UNIT};
use crate::{Error, Stage};

#[test]
fn test_finalize_uninitialized_is_noop() {
    let ctx = TestContext::deployed();
    ctx.advance_days(30);

    assert_eq!(ctx.client.try_finalize(), Stage::Uninitialized);
    assert_eq!(ctx.client.stage(), Stage::Uninitialized);
}

#[test]
fn test_finalize_keeps_active_below_goal_before_deadline() {
    let ctx = TestContext::active();
    let investor = ctx.investor();
    ctx.client.invest(&investor, &(GOAL - 1));
    ctx.advance_days(DURATION_DAYS as u64 - 1);

    assert_eq!(ctx.client.try_finalize(), Stage::Active);
}

#[test]
fn test_finalize_succeeds_once_goal_met() {
    let ctx = TestContext::active();
    let investor = ctx.investor();
    ctx.client.invest(&investor, &GOAL);

    let before = ctx.client.stage();
    let after = ctx.client.try_finalize();

    assert_eq!(after, Stage::Success);
    assert_valid_stage_transition(before, after);
}

#[test]
fn test_finalize_fails_after_deadline_below_goal() {
    let ctx = TestContext::active();
    let investor = ctx.investor();
    ctx.client.invest(&investor, &(UNIT / 2));
    ctx.advance_days(DURATION_DAYS as u64);

    let before = ctx.client.stage();
    let after = ctx.client.try_finalize();

    assert_eq!(after, Stage::Failed);
    assert_valid_stage_transition(before, after);
}

#[test]
fn test_finalize_fails_empty_campaign() {
    let ctx = TestContext::active();
    ctx.advance_days(DURATION_DAYS as u64 + 1);

    assert_eq!(ctx.client.try_finalize(), Stage::Failed);
}

#[test]
fn test_success_is_terminal() {
    let ctx = TestContext::active();
    let investor = ctx.investor();
    let late = ctx.investor();
    ctx.client.invest(&investor, &GOAL);
    assert_eq!(ctx.client.try_finalize(), Stage::Success);

    ctx.advance_days(DURATION_DAYS as u64 * 2);
    assert_eq!(ctx.client.try_finalize(), Stage::Success);
    assert_eq!(
        ctx.client.try_invest(&late, &UNIT),
        Err(Ok(Error::WrongStage))
    );

    // Claiming drains rewards but the pool and stage stay put.
    ctx.client.claim(&investor);
    assert_eq!(ctx.client.try_finalize(), Stage::Success);
    assert_eq!(ctx.client.pool(), GOAL);
    assert_all_ledger_invariants(&ctx.client, &[investor, late]);
}

#[test]
fn test_failed_is_terminal_even_when_refunds_drain_pool() {
    let ctx = TestContext::active();
    let investor = ctx.investor();
    let late = ctx.investor();
    ctx.client.invest(&investor, &(UNIT / 2));
    ctx.advance_days(DURATION_DAYS as u64);
    assert_eq!(ctx.client.try_finalize(), Stage::Failed);

    assert_eq!(
        ctx.client.try_invest(&late, &GOAL),
        Err(Ok(Error::WrongStage))
    );
    ctx.client.refund(&investor);

    assert_eq!(ctx.client.try_finalize(), Stage::Failed);
    assert_eq!(ctx.client.pool(), 0);
    assert_all_ledger_invariants(&ctx.client, &[investor, late]);
}

#[test]
fn test_forced_stage_is_respected_by_gate() {
    let ctx = TestContext::active();
    let investor = ctx.investor();
    ctx.client.invest(&investor, &GOAL);
    ctx.force_stage(Stage::Failed);

    // The pool satisfies the goal, but a terminal stage never moves.
    assert_eq!(ctx.client.try_finalize(), Stage::Failed);
    assert_eq!(
        ctx.client.try_invest(&investor, &UNIT),
        Err(Ok(Error::WrongStage))
    );
    assert_eq!(ctx.client.refund(&investor), GOAL);
}

#[test]
fn test_rejected_settlement_does_not_persist_transition() {
    let ctx = TestContext::active();
    let investor = ctx.investor();
    let outsider = ctx.investor();
    ctx.client.invest(&investor, &GOAL);

    // The gate would move to Success, but the call aborts with NoReward.
    assert_eq!(ctx.client.try_claim(&outsider), Err(Ok(Error::NoReward)));
    assert_eq!(ctx.client.stage(), Stage::Active);

    assert_eq!(ctx.client.try_finalize(), Stage::Success);
}
