#![allow(dead_code)]

extern crate std;

use soroban_sdk::Address;

use crate::{SmartFundingClient, Stage};

/// INV-1: The pool equals the sum of every open contribution.
pub fn assert_pool_conservation(client: &SmartFundingClient, investors: &[Address]) {
    let sum: i128 = investors.iter().map(|i| client.invest_of(i)).sum();
    assert_eq!(
        client.pool(),
        sum,
        "INV-1 violated: pool {} != sum of investments {}",
        client.pool(),
        sum
    );
}

/// INV-2: The pool never goes negative.
pub fn assert_pool_non_negative(client: &SmartFundingClient) {
    assert!(
        client.pool() >= 0,
        "INV-2 violated: negative pool ({})",
        client.pool()
    );
}

/// INV-3: Before any claim, every entitlement is
/// `reward_pool * invested / goal`.
pub fn assert_reward_proportional(client: &SmartFundingClient, investors: &[Address]) {
    let reward_pool = client.reward_pool();
    let goal = client.goal();
    for investor in investors {
        if client.claimed_of(investor) {
            continue;
        }
        let expected = reward_pool * client.invest_of(investor) / goal;
        assert_eq!(
            client.reward_of(investor),
            expected,
            "INV-3 violated: reward_of {:?} is {}, expected {}",
            investor,
            client.reward_of(investor),
            expected
        );
    }
}

/// INV-4: Claimed investors have nothing left to claim.
pub fn assert_claimed_is_settled(client: &SmartFundingClient, investors: &[Address]) {
    for investor in investors {
        if client.claimed_of(investor) {
            assert_eq!(
                client.reward_of(investor),
                0,
                "INV-4 violated: {:?} claimed but still owed {}",
                investor,
                client.reward_of(investor)
            );
        }
    }
}

/// INV-5: Stage transitions only move forward:
///   Uninitialized -> Active
///   Active        -> Success | Failed
///   Success       -> (none)
///   Failed        -> (none)
/// Staying in the same stage is always allowed.
pub fn assert_valid_stage_transition(from: Stage, to: Stage) {
    let valid = from == to
        || matches!(
            (from, to),
            (Stage::Uninitialized, Stage::Active)
                | (Stage::Active, Stage::Success)
                | (Stage::Active, Stage::Failed)
        );

    assert!(
        valid,
        "INV-5 violated: invalid stage transition from {:?} to {:?}",
        from, to
    );
}

/// Run all ledger invariants over a known set of investors.
pub fn assert_all_ledger_invariants(client: &SmartFundingClient, investors: &[Address]) {
    assert_pool_conservation(client, investors);
    assert_pool_non_negative(client);
    assert_claimed_is_settled(client, investors);
}

/// Ledger invariants plus reward proportionality, for a campaign still `Active`.
pub fn assert_all_pre_success_invariants(client: &SmartFundingClient, investors: &[Address]) {
    assert_all_ledger_invariants(client, investors);
    assert_reward_proportional(client, investors);
}
