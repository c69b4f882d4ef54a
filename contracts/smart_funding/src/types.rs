//! # Types
//!
//! Shared data structures used across all modules of the SmartFunding contract.
//!
//! ## Design decisions
//!
//! ### Parties / Config / State split
//!
//! A campaign is internally stored as three separate instance entries:
//!
//! - [`Parties`] — written once at deployment; never mutated.
//! - [`CampaignConfig`] — written once by `initialize`; never mutated.
//! - [`CampaignState`] — written on every investment, refund and stage change.
//!
//! The public API exposes the reconstructed [`Campaign`] struct for convenience.
//!
//! ### Stage as a Finite-State Machine
//!
//! [`Stage`] enforces a strict forward-only lifecycle:
//!
//! ```text
//! Uninitialized ──► Active ──► Success
//!                      └─────► Failed
//! ```
//!
//! `Success` and `Failed` are terminal. The discriminants are stable.

use soroban_sdk::{contracttype, Address};

/// Lifecycle stage of the campaign.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Stage {
    /// Deployed, `initialize` not yet called.
    Uninitialized = 0,
    /// Accepting investments.
    Active = 1,
    /// Goal reached; rewards claimable.
    Success = 2,
    /// Deadline passed below goal; contributions refundable.
    Failed = 3,
}

impl Stage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Success | Stage::Failed)
    }
}

/// Addresses bound at deployment.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Parties {
    /// May call `initialize`.
    pub owner: Address,
    /// Token paid out by `claim`.
    pub reward_token: Address,
    /// Asset contributed by `invest` and returned by `refund`
    /// (the native XLM asset contract on a live network).
    pub value_token: Address,
}

/// Immutable campaign configuration, written once by `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignConfig {
    /// Target contribution total, in value-token units.
    pub goal: i128,
    /// Ledger timestamp after which an unmet campaign may fail.
    pub deadline: u64,
    /// Reward-token balance held by the contract when the campaign opened.
    pub reward_pool: i128,
}

/// Mutable campaign state, updated on investments, refunds and finalization.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CampaignState {
    /// Sum of all contributions not yet refunded.
    pub pool: i128,
    pub stage: Stage,
}

impl Default for CampaignState {
    fn default() -> Self {
        CampaignState {
            pool: 0,
            stage: Stage::Uninitialized,
        }
    }
}

/// Full view of the campaign, returned by `get_campaign`.
///
/// Configuration fields are zero while the campaign is `Uninitialized`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Campaign {
    pub owner: Address,
    pub reward_token: Address,
    pub value_token: Address,
    pub goal: i128,
    pub deadline: u64,
    pub reward_pool: i128,
    pub pool: i128,
    pub stage: Stage,
}

/// Per-participant ledger entry, created lazily on first investment.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Investment {
    /// Cumulative contribution; zeroed by a refund.
    pub amount_invested: i128,
    /// Reward tokens owed; zeroed by a claim.
    pub reward_owed: i128,
    /// Set once the reward has been paid. Never reset.
    pub claimed: bool,
}
