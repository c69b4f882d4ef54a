//! Investment ledger arithmetic.
//!
//! Entitlement is always re-derived from the investor's cumulative
//! contribution, so several small investments earn exactly what one lump
//! investment of the same total would.

use crate::types::{CampaignConfig, CampaignState, Investment};
use crate::Error;

/// `reward_pool * amount_invested / goal`, truncated.
///
/// Contributions beyond `goal` are not capped: if the pool is
/// over-subscribed the summed entitlements exceed `reward_pool`.
pub fn entitlement(config: &CampaignConfig, amount_invested: i128) -> Result<i128, Error> {
    config
        .reward_pool
        .checked_mul(amount_invested)
        .map(|product| product / config.goal)
        .ok_or(Error::ArithmeticOverflow)
}

/// Apply a contribution of `amount` to both the shared pool and the
/// investor's record. Nothing is written back on error.
pub fn record_investment(
    config: &CampaignConfig,
    state: &mut CampaignState,
    investment: &mut Investment,
    amount: i128,
) -> Result<(), Error> {
    let pool = state
        .pool
        .checked_add(amount)
        .ok_or(Error::ArithmeticOverflow)?;
    let amount_invested = investment
        .amount_invested
        .checked_add(amount)
        .ok_or(Error::ArithmeticOverflow)?;
    let reward_owed = entitlement(config, amount_invested)?;

    state.pool = pool;
    investment.amount_invested = amount_invested;
    investment.reward_owed = reward_owed;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Stage;

    fn config(goal: i128, reward_pool: i128) -> CampaignConfig {
        CampaignConfig {
            goal,
            deadline: 0,
            reward_pool,
        }
    }

    fn active() -> CampaignState {
        CampaignState {
            pool: 0,
            stage: Stage::Active,
        }
    }

    #[test]
    fn entitlement_is_proportional_to_goal() {
        let config = config(10_000_000, 10_000_000_000_000);
        assert_eq!(entitlement(&config, 1_000_000), Ok(1_000_000_000_000));
        assert_eq!(entitlement(&config, 10_000_000), Ok(10_000_000_000_000));
    }

    #[test]
    fn entitlement_truncates() {
        let config = config(3, 10);
        assert_eq!(entitlement(&config, 1), Ok(3));
        assert_eq!(entitlement(&config, 2), Ok(6));
    }

    #[test]
    fn entitlement_overflow_is_reported() {
        let config = config(1, i128::MAX);
        assert_eq!(entitlement(&config, 2), Err(Error::ArithmeticOverflow));
    }

    #[test]
    fn repeated_investments_match_lump_sum() {
        let config = config(3, 1_000);
        let mut split_state = active();
        let mut split = Investment::default();
        for _ in 0..3 {
            record_investment(&config, &mut split_state, &mut split, 1).unwrap();
        }

        let mut lump_state = active();
        let mut lump = Investment::default();
        record_investment(&config, &mut lump_state, &mut lump, 3).unwrap();

        assert_eq!(split, lump);
        assert_eq!(split.reward_owed, 1_000);
        assert_eq!(split_state.pool, lump_state.pool);
    }

    #[test]
    fn failed_record_leaves_inputs_untouched() {
        let config = config(1, 1);
        let mut state = CampaignState {
            pool: i128::MAX,
            stage: Stage::Active,
        };
        let mut investment = Investment::default();

        assert_eq!(
            record_investment(&config, &mut state, &mut investment, 1),
            Err(Error::ArithmeticOverflow)
        );
        assert_eq!(state.pool, i128::MAX);
        assert_eq!(investment, Investment::default());
    }
}
