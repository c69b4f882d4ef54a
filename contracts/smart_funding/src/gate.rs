//! Stage transition gate.
//!
//! The only place a campaign leaves `Active`. `Success` needs the pool to
//! have reached the goal; `Failed` needs the deadline to have passed with the
//! pool still short. Terminal stages are returned unchanged.

use soroban_sdk::Env;

use crate::events;
use crate::storage::{load_campaign_config, load_campaign_state, save_campaign_state};
use crate::types::{CampaignConfig, CampaignState, Stage};

/// Stage the campaign should be in at ledger time `now`.
pub fn next_stage(config: &CampaignConfig, state: &CampaignState, now: u64) -> Stage {
    match state.stage {
        Stage::Active if state.pool >= config.goal => Stage::Success,
        Stage::Active if now >= config.deadline => Stage::Failed,
        stage => stage,
    }
}

/// Evaluate the gate against stored state, persisting and announcing any
/// transition. Idempotent; returns the (possibly updated) state.
pub fn finalize(env: &Env) -> CampaignState {
    let mut state = load_campaign_state(env);
    let Some(config) = load_campaign_config(env) else {
        return state;
    };

    let next = next_stage(&config, &state, env.ledger().timestamp());
    if next != state.stage {
        state.stage = next;
        save_campaign_state(env, &state);
        events::emit_finalized(env, state.stage, state.pool);
    }
    state
}
