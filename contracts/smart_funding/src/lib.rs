//! # SmartFunding Contract
//!
//! A crowdfunding escrow. Investors contribute a value asset toward a goal
//! before a deadline. If the goal is met they share a pre-funded reward-token
//! pool in proportion to their contribution; otherwise they get their
//! contribution back.
//!
//! | Phase        | Entry Point(s)                                  |
//! |--------------|-------------------------------------------------|
//! | Deployment   | `__constructor`                                 |
//! | Bootstrap    | [`SmartFunding::initialize`]                    |
//! | Funding      | [`SmartFunding::invest`]                        |
//! | Finalization | [`SmartFunding::try_finalize`]                  |
//! | Settlement   | [`SmartFunding::claim`], [`SmartFunding::refund`] |
//! | Queries      | `goal`, `pool`, `invest_of`, `reward_of`, `claimed_of`, `get_campaign`, ... |
//!
//! ## Architecture
//!
//! Storage access is delegated to [`storage`], entitlement arithmetic to
//! [`ledger`], stage transitions to [`gate`] and payouts to [`settlement`].
//! Every mutating entry point loads the campaign into owned values, hands them
//! to those modules, and writes the results back before any outbound transfer.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, token, Address, Env};

pub mod events;
mod gate;
mod ledger;
mod settlement;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;
#[cfg(test)]
mod test_stage;

use storage::{
    load_campaign_config, load_campaign_state, load_investment, load_parties,
    save_campaign_config, save_campaign_state, save_investment, save_parties,
};
pub use types::{Campaign, CampaignConfig, CampaignState, Investment, Parties, Stage};

const SECONDS_PER_DAY: u64 = 86_400;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized   = 1,
    InvalidGoal          = 2,
    /// Zero or negative investment amount.
    RejectedInvestAmount = 3,
    WrongStage           = 4,
    NoReward             = 5,
    AlreadyClaimed       = 6,
    /// Never invested, or already refunded.
    NoInvest             = 7,
    TransferFailed       = 8,
    ArithmeticOverflow   = 9,
}

#[contract]
pub struct SmartFunding;

#[contractimpl]
impl SmartFunding {
    // ─────────────────────────────────────────────────────────
    // Deployment & configuration
    // ─────────────────────────────────────────────────────────

    /// Bind the owner and the two token collaborators.
    ///
    /// `value_token` is the asset investors contribute (the native XLM asset
    /// contract on a live network); `reward_token` is the asset paid out on
    /// success. The campaign stays `Uninitialized` until [`Self::initialize`].
    pub fn __constructor(env: Env, owner: Address, reward_token: Address, value_token: Address) {
        save_parties(
            &env,
            &Parties {
                owner,
                reward_token,
                value_token,
            },
        );
        save_campaign_state(&env, &CampaignState::default());
    }

    /// Open the campaign.
    ///
    /// - `owner` must authorize the call.
    /// - `goal` is the target in value-token units and must be positive.
    /// - The deadline is `duration_days` days after the current ledger time.
    /// - The reward pool is the reward-token balance the contract holds right
    ///   now, so fund the contract before calling this.
    pub fn initialize(env: Env, goal: i128, duration_days: u32) -> Result<(), Error> {
        let parties = load_parties(&env);
        parties.owner.require_auth();

        let mut state = load_campaign_state(&env);
        if state.stage != Stage::Uninitialized {
            return Err(Error::AlreadyInitialized);
        }
        if goal <= 0 {
            return Err(Error::InvalidGoal);
        }

        let deadline = env
            .ledger()
            .timestamp()
            .saturating_add(duration_days as u64 * SECONDS_PER_DAY);
        let reward_pool = token::Client::new(&env, &parties.reward_token)
            .balance(&env.current_contract_address());

        save_campaign_config(
            &env,
            &CampaignConfig {
                goal,
                deadline,
                reward_pool,
            },
        );
        state.stage = Stage::Active;
        save_campaign_state(&env, &state);

        events::emit_initialized(&env, goal, deadline, reward_pool);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Funding
    // ─────────────────────────────────────────────────────────

    /// Contribute `amount` of the value token.
    ///
    /// Entitlement is recomputed from the investor's running total. The
    /// deadline is not checked here; only the gate closes the campaign.
    pub fn invest(env: Env, investor: Address, amount: i128) -> Result<(), Error> {
        investor.require_auth();

        let mut state = load_campaign_state(&env);
        if state.stage != Stage::Active {
            return Err(Error::WrongStage);
        }
        if amount <= 0 {
            return Err(Error::RejectedInvestAmount);
        }
        let config = load_campaign_config(&env).ok_or(Error::WrongStage)?;
        let parties = load_parties(&env);

        let mut investment = load_investment(&env, &investor);
        ledger::record_investment(&config, &mut state, &mut investment, amount)?;
        save_campaign_state(&env, &state);
        save_investment(&env, &investor, &investment);

        settlement::pull_in(&env, &parties.value_token, &investor, amount)?;

        events::emit_invest(&env, &investor, amount);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Finalization
    // ─────────────────────────────────────────────────────────

    /// Move the campaign to `Success` or `Failed` if the goal or deadline
    /// allows it. Anyone may call this; repeated calls are no-ops.
    pub fn try_finalize(env: Env) -> Stage {
        gate::finalize(&env).stage
    }

    // ─────────────────────────────────────────────────────────
    // Settlement
    // ─────────────────────────────────────────────────────────

    /// Pay the investor's reward. Only reachable once the campaign succeeded.
    ///
    /// Returns the amount of reward token transferred.
    pub fn claim(env: Env, investor: Address) -> Result<i128, Error> {
        investor.require_auth();

        if gate::finalize(&env).stage != Stage::Success {
            return Err(Error::WrongStage);
        }
        let parties = load_parties(&env);

        let mut investment = load_investment(&env, &investor);
        let amount = settlement::take_reward(&mut investment)?;
        save_investment(&env, &investor, &investment);

        settlement::pay_out(&env, &parties.reward_token, &investor, amount)?;

        events::emit_claim_reward(&env, &investor, amount);
        Ok(amount)
    }

    /// Return the investor's contribution. Only reachable once the campaign
    /// failed.
    ///
    /// Returns the amount of value token transferred.
    pub fn refund(env: Env, investor: Address) -> Result<i128, Error> {
        investor.require_auth();

        let mut state = gate::finalize(&env);
        if state.stage != Stage::Failed {
            return Err(Error::WrongStage);
        }
        let parties = load_parties(&env);

        let mut investment = load_investment(&env, &investor);
        let amount = settlement::take_contribution(&mut state, &mut investment)?;
        save_campaign_state(&env, &state);
        save_investment(&env, &investor, &investment);

        settlement::pay_out(&env, &parties.value_token, &investor, amount)?;

        events::emit_refund(&env, &investor, amount);
        Ok(amount)
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    pub fn goal(env: Env) -> i128 {
        load_campaign_config(&env).map_or(0, |c| c.goal)
    }

    pub fn deadline(env: Env) -> u64 {
        load_campaign_config(&env).map_or(0, |c| c.deadline)
    }

    pub fn reward_pool(env: Env) -> i128 {
        load_campaign_config(&env).map_or(0, |c| c.reward_pool)
    }

    pub fn pool(env: Env) -> i128 {
        load_campaign_state(&env).pool
    }

    pub fn stage(env: Env) -> Stage {
        load_campaign_state(&env).stage
    }

    pub fn invest_of(env: Env, investor: Address) -> i128 {
        load_investment(&env, &investor).amount_invested
    }

    pub fn reward_of(env: Env, investor: Address) -> i128 {
        load_investment(&env, &investor).reward_owed
    }

    pub fn claimed_of(env: Env, investor: Address) -> bool {
        load_investment(&env, &investor).claimed
    }

    /// Address of the reward token.
    pub fn token_address(env: Env) -> Address {
        load_parties(&env).reward_token
    }

    /// Address of the contributed value asset.
    pub fn value_token_address(env: Env) -> Address {
        load_parties(&env).value_token
    }

    pub fn owner(env: Env) -> Address {
        load_parties(&env).owner
    }

    /// Full investor record; zeroed if the address never invested.
    pub fn get_investment(env: Env, investor: Address) -> Investment {
        load_investment(&env, &investor)
    }

    /// Reconstruct the full campaign view from parties, config and state.
    pub fn get_campaign(env: Env) -> Campaign {
        let parties = load_parties(&env);
        let state = load_campaign_state(&env);
        let config = load_campaign_config(&env).unwrap_or(CampaignConfig {
            goal: 0,
            deadline: 0,
            reward_pool: 0,
        });
        Campaign {
            owner: parties.owner,
            reward_token: parties.reward_token,
            value_token: parties.value_token,
            goal: config.goal,
            deadline: config.deadline,
            reward_pool: config.reward_pool,
            pool: state.pool,
            stage: state.stage,
        }
    }
}
