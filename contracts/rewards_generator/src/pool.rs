//! Pool registry and per-user staking positions.

use common::ttl;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::ContractError;

// Instance keys.
const POOL_COUNT: Symbol = symbol_short!("POOL_CNT");
const TOTAL_ALLOC: Symbol = symbol_short!("TOT_ALLOC");

// Persistent tuple keys.
const POOL: Symbol = symbol_short!("POOL"); // (prefix, pid) -> PoolInfo
const POOL_ASSET: Symbol = symbol_short!("POOL_AST"); // (prefix, asset) -> pid
const POSITION: Symbol = symbol_short!("POS"); // (prefix, pid, owner) -> UserPosition

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolInfo {
    pub id: u32,
    pub staked_asset: Address,
    pub alloc_points: u32,
    pub last_accrual_height: u32,
    /// Reward per staked unit, scaled by `rewards::SCALE`.
    pub acc_reward_per_share: i128,
    pub total_staked: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserPosition {
    pub pool_id: u32,
    pub owner: Address,
    pub staked_amount: i128,
    pub reward_debt: i128,
    pub last_action_height: u32,
    pub first_deposit_height: u32,
    pub last_withdraw_height: u32,
    pub referrer: Option<Address>,
}

impl UserPosition {
    pub fn empty(pool_id: u32, owner: Address) -> Self {
        Self {
            pool_id,
            owner,
            staked_amount: 0,
            reward_debt: 0,
            last_action_height: 0,
            first_deposit_height: 0,
            last_withdraw_height: 0,
            referrer: None,
        }
    }
}

// ── Registry ────────────────────────────────────────────────────────────────

pub fn count(env: &Env) -> u32 {
    env.storage().instance().get(&POOL_COUNT).unwrap_or(0)
}

pub fn total_alloc_points(env: &Env) -> u32 {
    env.storage().instance().get(&TOTAL_ALLOC).unwrap_or(0)
}

pub fn set_total_alloc_points(env: &Env, total: u32) {
    env.storage().instance().set(&TOTAL_ALLOC, &total);
}

pub fn id_for_asset(env: &Env, asset: &Address) -> Option<u32> {
    env.storage()
        .persistent()
        .get(&(POOL_ASSET, asset.clone()))
}

pub fn load(env: &Env, pid: u32) -> Result<PoolInfo, ContractError> {
    let key = (POOL, pid);
    let pool: PoolInfo = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(ContractError::InvalidPool)?;
    ttl::extend_persistent(env, &key);
    Ok(pool)
}

pub fn store(env: &Env, pool: &PoolInfo) {
    let key = (POOL, pool.id);
    env.storage().persistent().set(&key, pool);
    ttl::extend_persistent(env, &key);
}

/// Append a pool for `asset`; ids are dense and start at 0.
pub fn push(
    env: &Env,
    asset: Address,
    alloc_points: u32,
    start_height: u32,
) -> Result<PoolInfo, ContractError> {
    if id_for_asset(env, &asset).is_some() {
        return Err(ContractError::DuplicatePool);
    }

    let id = count(env);
    let total = total_alloc_points(env)
        .checked_add(alloc_points)
        .ok_or(ContractError::ArithmeticOverflow)?;

    let pool = PoolInfo {
        id,
        staked_asset: asset.clone(),
        alloc_points,
        last_accrual_height: env.ledger().sequence().max(start_height),
        acc_reward_per_share: 0,
        total_staked: 0,
    };
    store(env, &pool);

    let asset_key = (POOL_ASSET, asset);
    env.storage().persistent().set(&asset_key, &id);
    ttl::extend_persistent(env, &asset_key);

    env.storage().instance().set(&POOL_COUNT, &(id + 1));
    set_total_alloc_points(env, total);
    Ok(pool)
}

// ── Positions ───────────────────────────────────────────────────────────────

pub fn load_position(env: &Env, pid: u32, owner: &Address) -> UserPosition {
    let key = (POSITION, pid, owner.clone());
    match env.storage().persistent().get(&key) {
        Some(position) => {
            ttl::extend_persistent(env, &key);
            position
        }
        None => UserPosition::empty(pid, owner.clone()),
    }
}

pub fn store_position(env: &Env, position: &UserPosition) {
    let key = (POSITION, position.pool_id, position.owner.clone());
    env.storage().persistent().set(&key, position);
    ttl::extend_persistent(env, &key);
}
