//! Holding-duration fee tiers and the flat deposit fee.
//!
//! Every split is expressed as the user-retained share in basis points of
//! [`FEE_DENOMINATOR`]; the dev amount is always the complement of the user
//! amount, never computed from `dev_bps` on its own.

use common::ttl;
use soroban_sdk::{contracttype, symbol_short, vec, Env, Symbol, Vec};

use crate::ContractError;

const FEES: Symbol = symbol_short!("FEES");

pub const FEE_DENOMINATOR: u32 = 10_000;

/// Retained on deposit: 0.75% goes to the dev address.
pub const DEFAULT_DEPOSIT_USER_BPS: u32 = 9_925;
pub const DEFAULT_DEPOSIT_DEV_BPS: u32 = 75;

/// Window of heights elapsed since the last stake action.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeTier {
    pub start_offset: u32,
    pub end_offset: u32,
    pub user_bps: u32,
    pub dev_bps: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeSchedule {
    pub tiers: Vec<FeeTier>,
    pub deposit_user_bps: u32,
    pub deposit_dev_bps: u32,
}

/// Result of applying a fee split to a principal.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FeeSplit {
    pub user_amount: i128,
    pub dev_amount: i128,
}

fn tier(start_offset: u32, end_offset: u32, user_bps: u32, dev_bps: u32) -> FeeTier {
    FeeTier {
        start_offset,
        end_offset,
        user_bps,
        dev_bps,
    }
}

impl FeeSchedule {
    /// Tiers tuned for ~13s heights: same height 25%, under an hour 8%,
    /// then decaying to 0.01% after roughly four weeks.
    pub fn standard(env: &Env) -> Self {
        Self {
            tiers: vec![
                env,
                tier(0, 0, 7_500, 2_500),
                tier(1, 274, 9_200, 800),
                tier(275, 6_600, 9_600, 400),
                tier(6_601, 19_800, 9_800, 200),
                tier(19_801, 33_000, 9_900, 100),
                tier(33_001, 90_720, 9_950, 50),
                tier(90_721, 181_440, 9_975, 25),
                tier(181_441, u32::MAX, 9_999, 1),
            ],
            deposit_user_bps: DEFAULT_DEPOSIT_USER_BPS,
            deposit_dev_bps: DEFAULT_DEPOSIT_DEV_BPS,
        }
    }

    pub fn validate(&self) -> Result<(), ContractError> {
        validate_tiers(&self.tiers)?;
        validate_pair(self.deposit_user_bps, self.deposit_dev_bps)
    }

    /// Tier matching `elapsed`; the final tier has no upper bound.
    pub fn withdrawal_tier(&self, elapsed: u32) -> Result<FeeTier, ContractError> {
        for tier in self.tiers.iter() {
            if tier.start_offset <= elapsed && elapsed <= tier.end_offset {
                return Ok(tier);
            }
        }
        self.tiers.last().ok_or(ContractError::InvalidFeeTiers)
    }

    pub fn split_withdrawal(&self, amount: i128, elapsed: u32) -> Result<FeeSplit, ContractError> {
        let tier = self.withdrawal_tier(elapsed)?;
        split(amount, tier.user_bps)
    }

    pub fn split_deposit(&self, amount: i128) -> Result<FeeSplit, ContractError> {
        split(amount, self.deposit_user_bps)
    }
}

fn validate_pair(user_bps: u32, dev_bps: u32) -> Result<(), ContractError> {
    if user_bps > FEE_DENOMINATOR || dev_bps > FEE_DENOMINATOR {
        return Err(ContractError::InvalidFeeTiers);
    }
    Ok(())
}

/// Tiers must start at 0 and be contiguous, non-overlapping and ordered.
pub fn validate_tiers(tiers: &Vec<FeeTier>) -> Result<(), ContractError> {
    if tiers.is_empty() {
        return Err(ContractError::InvalidFeeTiers);
    }

    let mut expected_start: Option<u32> = Some(0);
    for tier in tiers.iter() {
        let start = expected_start.ok_or(ContractError::InvalidFeeTiers)?;
        if tier.start_offset != start || tier.end_offset < tier.start_offset {
            return Err(ContractError::InvalidFeeTiers);
        }
        validate_pair(tier.user_bps, tier.dev_bps)?;
        expected_start = tier.end_offset.checked_add(1);
    }
    Ok(())
}

/// `user = amount × user_bps / FEE_DENOMINATOR`, `dev = amount − user`.
pub fn split(amount: i128, user_bps: u32) -> Result<FeeSplit, ContractError> {
    let user_amount = amount
        .checked_mul(i128::from(user_bps))
        .ok_or(ContractError::ArithmeticOverflow)?
        / i128::from(FEE_DENOMINATOR);
    let dev_amount = amount
        .checked_sub(user_amount)
        .ok_or(ContractError::ArithmeticOverflow)?;
    Ok(FeeSplit {
        user_amount,
        dev_amount,
    })
}

pub fn load(env: &Env) -> Result<FeeSchedule, ContractError> {
    env.storage()
        .instance()
        .get(&FEES)
        .ok_or(ContractError::NotInitialized)
}

pub fn store(env: &Env, fees: &FeeSchedule) {
    env.storage().instance().set(&FEES, fees);
    ttl::extend_instance(env);
}
