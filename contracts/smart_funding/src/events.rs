//! Contract events.
//!
//! | Topic                       | Data          |
//! |-----------------------------|---------------|
//! | `("init",)`                 | [`Initialized`] |
//! | `("invest", investor)`      | [`Invest`]      |
//! | `("claim", investor)`       | [`ClaimReward`] |
//! | `("refund", investor)`      | [`Refund`]      |
//! | `("finalized",)`            | [`Finalized`]   |
//!
//! The investor address is repeated as a topic so indexers can filter on it.

use soroban_sdk::{contracttype, symbol_short, Address, Env};

use crate::types::Stage;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Initialized {
    pub goal: i128,
    pub deadline: u64,
    pub reward_pool: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Invest {
    pub investor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimReward {
    pub investor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Refund {
    pub investor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Finalized {
    pub stage: Stage,
    pub pool: i128,
}

pub fn emit_initialized(env: &Env, goal: i128, deadline: u64, reward_pool: i128) {
    env.events().publish(
        (symbol_short!("init"),),
        Initialized {
            goal,
            deadline,
            reward_pool,
        },
    );
}

pub fn emit_invest(env: &Env, investor: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("invest"), investor.clone()),
        Invest {
            investor: investor.clone(),
            amount,
        },
    );
}

pub fn emit_claim_reward(env: &Env, investor: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("claim"), investor.clone()),
        ClaimReward {
            investor: investor.clone(),
            amount,
        },
    );
}

pub fn emit_refund(env: &Env, investor: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("refund"), investor.clone()),
        Refund {
            investor: investor.clone(),
            amount,
        },
    );
}

pub fn emit_finalized(env: &Env, stage: Stage, pool: i128) {
    env.events()
        .publish((symbol_short!("finalized"),), Finalized { stage, pool });
}
