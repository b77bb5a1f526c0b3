#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::rewards::PoolReward;

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the generator is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub reward_token: Address,
    pub reward_per_block: i128,
    pub start_height: u32,
    pub emission_end_height: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolAddedEvent {
    pub pool_id: u32,
    pub staked_asset: Address,
    pub alloc_points: u32,
    pub total_alloc_points: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolUpdatedEvent {
    pub pool_id: u32,
    pub previous_alloc_points: u32,
    pub alloc_points: u32,
    pub total_alloc_points: u32,
}

/// Fired when a pool accrues emission; shares already sent to beneficiaries.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolAccruedEvent {
    pub pool_id: u32,
    pub from_height: u32,
    pub to_height: u32,
    pub reward: PoolReward,
    pub acc_reward_per_share: i128,
}

/// Fired on deposit. `amount` is what left the depositor, `credited` what
/// landed in the position after the deposit fee.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositEvent {
    pub owner: Address,
    pub pool_id: u32,
    pub amount: i128,
    pub credited: i128,
    pub fee: i128,
    pub referrer: Option<Address>,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawEvent {
    pub owner: Address,
    pub pool_id: u32,
    pub amount: i128,
    pub received: i128,
    pub fee: i128,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawEvent {
    pub owner: Address,
    pub pool_id: u32,
    pub amount: i128,
    pub received: i128,
    pub fee: i128,
    pub forfeited_reward: i128,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardSentEvent {
    pub owner: Address,
    pub pool_id: u32,
    pub liquid_amount: i128,
    pub locked_amount: i128,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScheduleResetEvent {
    pub boundaries: u32,
    pub emission_end_height: u32,
}

/// Fired by every configuration setter with the resulting version.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigUpdatedEvent {
    pub field: Symbol,
    pub version: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuthorizationChangedEvent {
    pub owner: Address,
    pub target: Address,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipTransferredEvent {
    pub previous_owner: Address,
    pub new_owner: Address,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenOwnershipReclaimedEvent {
    pub reward_token: Address,
    pub new_owner: Address,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    owner: Address,
    reward_token: Address,
    reward_per_block: i128,
    start_height: u32,
    emission_end_height: u32,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            reward_token,
            reward_per_block,
            start_height,
            emission_end_height,
        },
    );
}

pub fn publish_pool_added(
    env: &Env,
    pool_id: u32,
    staked_asset: Address,
    alloc_points: u32,
    total_alloc_points: u32,
) {
    env.events().publish(
        (symbol_short!("POOL_ADD"), pool_id),
        PoolAddedEvent {
            pool_id,
            staked_asset,
            alloc_points,
            total_alloc_points,
        },
    );
}

pub fn publish_pool_updated(
    env: &Env,
    pool_id: u32,
    previous_alloc_points: u32,
    alloc_points: u32,
    total_alloc_points: u32,
) {
    env.events().publish(
        (symbol_short!("POOL_SET"), pool_id),
        PoolUpdatedEvent {
            pool_id,
            previous_alloc_points,
            alloc_points,
            total_alloc_points,
        },
    );
}

pub fn publish_pool_accrued(
    env: &Env,
    pool_id: u32,
    from_height: u32,
    to_height: u32,
    reward: PoolReward,
    acc_reward_per_share: i128,
) {
    env.events().publish(
        (symbol_short!("ACCRUED"), pool_id),
        PoolAccruedEvent {
            pool_id,
            from_height,
            to_height,
            reward,
            acc_reward_per_share,
        },
    );
}

pub fn publish_deposit(
    env: &Env,
    owner: Address,
    pool_id: u32,
    amount: i128,
    credited: i128,
    referrer: Option<Address>,
) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), owner.clone(), pool_id),
        DepositEvent {
            owner,
            pool_id,
            amount,
            credited,
            fee: amount - credited,
            referrer,
        },
    );
}

pub fn publish_withdraw(env: &Env, owner: Address, pool_id: u32, amount: i128, received: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAW"), owner.clone(), pool_id),
        WithdrawEvent {
            owner,
            pool_id,
            amount,
            received,
            fee: amount - received,
        },
    );
}

pub fn publish_emergency_withdraw(
    env: &Env,
    owner: Address,
    pool_id: u32,
    amount: i128,
    received: i128,
    forfeited_reward: i128,
) {
    env.events().publish(
        (symbol_short!("EMRG_WDR"), owner.clone(), pool_id),
        EmergencyWithdrawEvent {
            owner,
            pool_id,
            amount,
            received,
            fee: amount - received,
            forfeited_reward,
        },
    );
}

pub fn publish_reward_sent(
    env: &Env,
    owner: Address,
    pool_id: u32,
    liquid_amount: i128,
    locked_amount: i128,
) {
    env.events().publish(
        (symbol_short!("RWD_SENT"), owner.clone(), pool_id),
        RewardSentEvent {
            owner,
            pool_id,
            liquid_amount,
            locked_amount,
        },
    );
}

pub fn publish_schedule_reset(env: &Env, boundaries: u32, emission_end_height: u32) {
    env.events().publish(
        (symbol_short!("SCHED_SET"),),
        ScheduleResetEvent {
            boundaries,
            emission_end_height,
        },
    );
}

pub fn publish_config_updated(env: &Env, field: Symbol, version: u32) {
    env.events().publish(
        (symbol_short!("CFG_SET"), field.clone()),
        ConfigUpdatedEvent { field, version },
    );
}

pub fn publish_authorized_added(env: &Env, owner: Address, target: Address) {
    env.events().publish(
        (symbol_short!("AUTH_ADD"), target.clone()),
        AuthorizationChangedEvent { owner, target },
    );
}

pub fn publish_authorized_revoked(env: &Env, owner: Address, target: Address) {
    env.events().publish(
        (symbol_short!("AUTH_REV"), target.clone()),
        AuthorizationChangedEvent { owner, target },
    );
}

pub fn publish_ownership_transferred(env: &Env, previous_owner: Address, new_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_XFER"), new_owner.clone()),
        OwnershipTransferredEvent {
            previous_owner,
            new_owner,
        },
    );
}

pub fn publish_token_ownership_reclaimed(env: &Env, reward_token: Address, new_owner: Address) {
    env.events().publish(
        (symbol_short!("TOK_RECL"), new_owner.clone()),
        TokenOwnershipReclaimedEvent {
            reward_token,
            new_owner,
        },
    );
}
