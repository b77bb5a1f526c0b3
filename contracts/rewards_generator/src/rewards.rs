//! Fixed-point reward arithmetic.
//!
//! All accumulator values are multiplied by [`SCALE`] before storage so
//! sub-unit precision survives integer division. Every operation is checked
//! and surfaces [`ContractError::ArithmeticOverflow`] instead of wrapping.

use soroban_sdk::contracttype;

use crate::config::{SharePercentages, ShareMode};
use crate::ContractError;

/// Fixed-point scaling factor for `acc_reward_per_share`.
pub const SCALE: i128 = 1_000_000_000_000;

/// Percentages are expressed out of this denominator.
pub const PERCENT_DENOMINATOR: i128 = 100;

/// Emission for one pool over a height range, split per beneficiary.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PoolReward {
    pub for_dev: i128,
    pub for_farmer: i128,
    pub for_lp: i128,
    pub for_com: i128,
    pub for_founders: i128,
}

impl PoolReward {
    /// Everything that has to be minted for this split.
    pub fn total(&self) -> Result<i128, ContractError> {
        self.for_farmer
            .checked_add(self.beneficiary_total()?)
            .ok_or(ContractError::ArithmeticOverflow)
    }

    pub fn beneficiary_total(&self) -> Result<i128, ContractError> {
        self.for_dev
            .checked_add(self.for_lp)
            .and_then(|v| v.checked_add(self.for_com))
            .and_then(|v| v.checked_add(self.for_founders))
            .ok_or(ContractError::ArithmeticOverflow)
    }
}

fn mul_div(a: i128, b: i128, denominator: i128) -> Result<i128, ContractError> {
    a.checked_mul(b)
        .ok_or(ContractError::ArithmeticOverflow)?
        .checked_div(denominator)
        .ok_or(ContractError::ArithmeticOverflow)
}

/// `reward_per_block × weighted_heights × alloc_points / total_alloc_points`
///
/// Zero when no weight has been allocated yet.
pub fn emission(
    reward_per_block: i128,
    weighted_heights: i128,
    alloc_points: u32,
    total_alloc_points: u32,
) -> Result<i128, ContractError> {
    if total_alloc_points == 0 || alloc_points == 0 {
        return Ok(0);
    }
    let gross = reward_per_block
        .checked_mul(weighted_heights)
        .ok_or(ContractError::ArithmeticOverflow)?;
    mul_div(
        gross,
        i128::from(alloc_points),
        i128::from(total_alloc_points),
    )
}

/// Split `amount` between farmers and the four beneficiaries.
///
/// In [`ShareMode::Inclusive`] the beneficiary shares are carved out of
/// `amount` and farmers receive the remainder. In [`ShareMode::Additive`]
/// farmers receive all of `amount` and the shares are minted on top.
pub fn split_emission(
    amount: i128,
    shares: &SharePercentages,
    mode: &ShareMode,
) -> Result<PoolReward, ContractError> {
    let portion = |pct: u32| mul_div(amount, i128::from(pct), PERCENT_DENOMINATOR);

    let mut reward = PoolReward {
        for_dev: portion(shares.dev)?,
        for_farmer: 0,
        for_lp: portion(shares.liquidity)?,
        for_com: portion(shares.community)?,
        for_founders: portion(shares.founder)?,
    };

    reward.for_farmer = match mode {
        ShareMode::Inclusive => amount
            .checked_sub(reward.beneficiary_total()?)
            .ok_or(ContractError::ArithmeticOverflow)?,
        ShareMode::Additive => amount,
    };

    Ok(reward)
}

/// Limit a split to what the reward token can still mint.
///
/// When the full split does not fit, farmers take whatever remains and the
/// beneficiaries receive nothing.
pub fn clamp_to_mintable(reward: PoolReward, mintable: i128) -> Result<PoolReward, ContractError> {
    if reward.total()? <= mintable {
        return Ok(reward);
    }
    Ok(PoolReward {
        for_farmer: reward.for_farmer.min(mintable).max(0),
        ..PoolReward::default()
    })
}

/// Increase in `acc_reward_per_share` for `farmer_reward` spread over
/// `total_staked`.
pub fn accrued_per_share(farmer_reward: i128, total_staked: i128) -> Result<i128, ContractError> {
    if total_staked <= 0 {
        return Ok(0);
    }
    mul_div(farmer_reward, SCALE, total_staked)
}

/// `staked × acc_reward_per_share / SCALE`
pub fn accumulated(staked: i128, acc_reward_per_share: i128) -> Result<i128, ContractError> {
    mul_div(staked, acc_reward_per_share, SCALE)
}

/// Reward accrued since the position was last settled.
///
/// The accumulator never decreases, so this is non-negative for any debt
/// produced by [`accumulated`]; the floor guards against foreign debt values.
pub fn pending(
    staked: i128,
    acc_reward_per_share: i128,
    reward_debt: i128,
) -> Result<i128, ContractError> {
    let gross = accumulated(staked, acc_reward_per_share)?;
    Ok(gross
        .checked_sub(reward_debt)
        .ok_or(ContractError::ArithmeticOverflow)?
        .max(0))
}

/// Split a payout into `(liquid, locked)` using the lock percentage.
pub fn lock_split(payout: i128, lock_percent: u32) -> Result<(i128, i128), ContractError> {
    let locked = mul_div(payout, i128::from(lock_percent), PERCENT_DENOMINATOR)?;
    let liquid = payout
        .checked_sub(locked)
        .ok_or(ContractError::ArithmeticOverflow)?;
    Ok((liquid, locked))
}

// ── Unit tests ──────────────────────────────────────────────────────────────
// Pure-math tests with no Soroban environment dependency.
