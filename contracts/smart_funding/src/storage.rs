//! # Storage
//!
//! Provides typed helpers over Soroban's two storage tiers used by SmartFunding:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key        | Type             | Description                              |
//! |------------|------------------|------------------------------------------|
//! | `Parties`  | `Parties`        | Owner and token addresses (deployment)   |
//! | `Config`   | `CampaignConfig` | Goal, deadline, reward pool (initialize) |
//! | `State`    | `CampaignState`  | Pool and stage                           |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                   | Type         | Description                    |
//! |-----------------------|--------------|--------------------------------|
//! | `Investment(address)` | `Investment` | One ledger entry per investor  |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//!
//! Investments are written on every `invest`, `claim` and `refund`, so each
//! investor's entry is kept separate from the shared campaign state.

use soroban_sdk::{contracttype, Address, Env};

use crate::types::{CampaignConfig, CampaignState, Investment, Parties};

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

/// All contract storage keys.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Owner and collaborator token addresses (Instance).
    Parties,
    /// Immutable campaign configuration (Instance).
    Config,
    /// Mutable pool and stage (Instance).
    State,
    /// Investment record keyed by investor (Persistent).
    Investment(Address),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

pub fn save_parties(env: &Env, parties: &Parties) {
    env.storage().instance().set(&DataKey::Parties, parties);
    bump_instance(env);
}

/// Retrieve the deployment parties.
/// Panics if the constructor never ran, which the host rules out.
pub fn load_parties(env: &Env) -> Parties {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Parties)
        .expect("parties not set")
}

pub fn save_campaign_config(env: &Env, config: &CampaignConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    bump_instance(env);
}

/// Load the campaign configuration, or `None` before `initialize`.
pub fn load_campaign_config(env: &Env) -> Option<CampaignConfig> {
    bump_instance(env);
    env.storage().instance().get(&DataKey::Config)
}

/// Load the mutable campaign state. A fresh deployment reads as
/// `Uninitialized` with an empty pool.
pub fn load_campaign_state(env: &Env) -> CampaignState {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::State)
        .unwrap_or_default()
}

pub fn save_campaign_state(env: &Env, state: &CampaignState) {
    env.storage().instance().set(&DataKey::State, state);
    bump_instance(env);
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Load an investor's record, or an empty one if they never invested.
pub fn load_investment(env: &Env, investor: &Address) -> Investment {
    let key = DataKey::Investment(investor.clone());
    match env.storage().persistent().get(&key) {
        Some(investment) => {
            bump_persistent(env, &key);
            investment
        }
        None => Investment::default(),
    }
}

pub fn save_investment(env: &Env, investor: &Address, investment: &Investment) {
    let key = DataKey::Investment(investor.clone());
    env.storage().persistent().set(&key, investment);
    bump_persistent(env, &key);
}
