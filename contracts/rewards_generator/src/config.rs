//! Versioned generator configuration.
//!
//! Every privileged setter loads the stored [`GeneratorConfig`], replaces the
//! relevant field, bumps `version` and writes it back in one step.

use common::ttl;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::ContractError;

const CONFIG: Symbol = symbol_short!("CONFIG");

/// Largest value any percentage field may take.
pub const MAX_PERCENT: u32 = 100;

/// Default share of each payout routed to the lock ledger.
pub const DEFAULT_LOCK_PERCENT: u32 = 95;

/// Recipients of the non-farmer emission shares.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Beneficiaries {
    pub dev: Address,
    pub liquidity: Address,
    pub community: Address,
    pub founder: Address,
}

/// Percent of each pool emission routed to a beneficiary.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SharePercentages {
    pub dev: u32,
    pub liquidity: u32,
    pub community: u32,
    pub founder: u32,
}

impl SharePercentages {
    pub fn total(&self) -> u32 {
        self.dev
            .saturating_add(self.liquidity)
            .saturating_add(self.community)
            .saturating_add(self.founder)
    }

    pub fn validate(&self) -> Result<(), ContractError> {
        if self.total() > MAX_PERCENT {
            return Err(ContractError::InvalidPercentage);
        }
        Ok(())
    }
}

/// How beneficiary shares relate to the pool emission.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ShareMode {
    /// Shares are carved out of the emission; farmers get the remainder.
    Inclusive,
    /// Farmers get the whole emission; shares are minted on top of it.
    Additive,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratorConfig {
    pub version: u32,
    pub reward_token: Address,
    pub beneficiaries: Beneficiaries,
    pub reward_per_block: i128,
    pub shares: SharePercentages,
    pub percent_lock: u32,
    pub share_mode: ShareMode,
}

impl GeneratorConfig {
    pub fn new(reward_token: Address, beneficiaries: Beneficiaries, reward_per_block: i128) -> Self {
        Self {
            version: 1,
            reward_token,
            beneficiaries,
            reward_per_block,
            shares: SharePercentages::default(),
            percent_lock: DEFAULT_LOCK_PERCENT,
            share_mode: ShareMode::Inclusive,
        }
    }
}

pub fn load(env: &Env) -> Result<GeneratorConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

pub fn store(env: &Env, config: &GeneratorConfig) {
    env.storage().instance().set(&CONFIG, config);
    ttl::extend_instance(env);
}

/// Apply `change` to the stored config, bump its version and persist it.
pub fn update<F>(env: &Env, change: F) -> Result<GeneratorConfig, ContractError>
where
    F: FnOnce(&mut GeneratorConfig) -> Result<(), ContractError>,
{
    let mut config = load(env)?;
    change(&mut config)?;
    config.version = config.version.saturating_add(1);
    store(env, &config);
    Ok(config)
}
