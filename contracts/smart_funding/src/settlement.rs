//! Reward and refund settlement.
//!
//! Each settlement is split into a pure bookkeeping step, which zeroes the
//! investor's entitlement and returns the amount to pay, and an outbound
//! transfer. Callers persist the bookkeeping before transferring; a failed
//! transfer surfaces as [`Error::TransferFailed`] and the host rolls the whole
//! invocation back.

use soroban_sdk::{token, Address, Env};

use crate::types::{CampaignState, Investment};
use crate::Error;

/// Mark the reward as paid and return the amount owed.
pub fn take_reward(investment: &mut Investment) -> Result<i128, Error> {
    if investment.claimed {
        return Err(Error::AlreadyClaimed);
    }
    if investment.reward_owed <= 0 {
        return Err(Error::NoReward);
    }

    let amount = investment.reward_owed;
    investment.claimed = true;
    investment.reward_owed = 0;
    Ok(amount)
}

/// Remove the investor's contribution from the pool and return it.
///
/// A zero contribution covers both "never invested" and "already refunded".
pub fn take_contribution(
    state: &mut CampaignState,
    investment: &mut Investment,
) -> Result<i128, Error> {
    if investment.amount_invested <= 0 {
        return Err(Error::NoInvest);
    }

    let amount = investment.amount_invested;
    state.pool = state
        .pool
        .checked_sub(amount)
        .ok_or(Error::ArithmeticOverflow)?;
    investment.amount_invested = 0;
    Ok(amount)
}

/// Move `amount` of `token` from `from` into this contract.
pub fn pull_in(env: &Env, token: &Address, from: &Address, amount: i128) -> Result<(), Error> {
    transfer(env, token, from, &env.current_contract_address(), amount)
}

/// Move `amount` of `token` from this contract to `to`.
pub fn pay_out(env: &Env, token: &Address, to: &Address, amount: i128) -> Result<(), Error> {
    transfer(env, token, &env.current_contract_address(), to, amount)
}

fn transfer(
    env: &Env,
    token: &Address,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), Error> {
    match token::Client::new(env, token).try_transfer(from, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::TransferFailed),
    }
}
