#![no_std]

//! Multi-pool staking ledger emitting a reward token on a halving schedule.
//!
//! Every stake action first accrues its pool: the pool's share of the
//! weighted emission since the last accrual is minted, beneficiary shares go
//! straight to their addresses and the farmer share is folded into
//! `acc_reward_per_share`. Pending reward is then settled, split into a
//! liquid part and a part parked in the reward token's lock ledger.

pub mod config;
pub mod events;
pub mod fees;
pub mod pool;
pub mod referral;
pub mod rewards;
pub mod schedule;
pub mod token_client;

use common::authorization::{self, AuthorizationSet};
use soroban_sdk::{
    contract, contractimpl, log, symbol_short, token, Address, Env, Symbol, Vec,
};

use config::{Beneficiaries, GeneratorConfig, ShareMode, SharePercentages, MAX_PERCENT};
use fees::{FeeSchedule, FeeTier};
use pool::{PoolInfo, UserPosition};
use rewards::PoolReward;
use schedule::HalvingSchedule;
use token_client::RewardTokenClient;

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    DuplicatePool = 4,
    InvalidPool = 5,
    ZeroAmount = 6,
    InsufficientStakedBalance = 7,
    InvalidSchedule = 8,
    InvalidFeeTiers = 9,
    InvalidPercentage = 10,
    InvalidRewardRate = 11,
    ArithmeticOverflow = 12,
    TransferFailed = 13,
    RewardTokenNotStakeable = 14,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct RewardsGenerator;

#[contractimpl]
impl RewardsGenerator {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the generator.
    ///
    /// * `reward_token`     – token this contract mints; its ownership must be
    ///                        handed to the generator before the first accrual.
    /// * `reward_per_block` – base emission per height before multipliers.
    /// * `start_height`     – first height that earns emission.
    /// * `halving_after`    – heights per schedule interval.
    /// * `multipliers`      – one multiplier per interval; emission stops after
    ///                        the last one.
    ///
    /// Fees start at [`FeeSchedule::standard`]; beneficiary shares start at 0.
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        env: Env,
        owner: Address,
        reward_token: Address,
        beneficiaries: Beneficiaries,
        reward_per_block: i128,
        start_height: u32,
        halving_after: u32,
        multipliers: Vec<u32>,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        if reward_per_block < 0 {
            return Err(ContractError::InvalidRewardRate);
        }

        let schedule = HalvingSchedule::build(&env, start_height, halving_after, multipliers)?;
        let emission_end_height = schedule.emission_end_height();

        env.storage().instance().set(&INITIALIZED, &true);
        config::store(
            &env,
            &GeneratorConfig::new(reward_token.clone(), beneficiaries, reward_per_block),
        );
        schedule::store(&env, &schedule);
        fees::store(&env, &FeeSchedule::standard(&env));
        authorization::store(&env, &AuthorizationSet::new(&env, owner.clone()));

        events::publish_initialized(
            &env,
            owner,
            reward_token,
            reward_per_block,
            start_height,
            emission_end_height,
        );

        Ok(())
    }

    // ── Pool registry ───────────────────────────────────────────────────────

    /// Register a pool for `staked_asset`. Rejects assets that already have
    /// a pool and the reward token itself, whose balance here backs payouts.
    pub fn add_pool(
        env: Env,
        caller: Address,
        staked_asset: Address,
        alloc_points: u32,
        sync_all: bool,
    ) -> Result<u32, ContractError> {
        Self::require_permitted(&env, &caller)?;
        if staked_asset == config::load(&env)?.reward_token {
            return Err(ContractError::RewardTokenNotStakeable);
        }
        if sync_all {
            Self::accrue_all(&env)?;
        }

        let start_height = schedule::load(&env)?.start_height;
        let pool = pool::push(&env, staked_asset.clone(), alloc_points, start_height)?;

        events::publish_pool_added(
            &env,
            pool.id,
            staked_asset,
            alloc_points,
            pool::total_alloc_points(&env),
        );

        Ok(pool.id)
    }

    /// Change a pool's weight. With `sync_all` every pool is accrued under
    /// the old weights first.
    pub fn set_pool(
        env: Env,
        caller: Address,
        pool_id: u32,
        alloc_points: u32,
        sync_all: bool,
    ) -> Result<(), ContractError> {
        Self::require_permitted(&env, &caller)?;
        let mut pool = pool::load(&env, pool_id)?;
        if sync_all {
            Self::accrue_all(&env)?;
            pool = pool::load(&env, pool_id)?;
        }

        let previous = pool.alloc_points;
        let total = pool::total_alloc_points(&env)
            .checked_sub(previous)
            .and_then(|t| t.checked_add(alloc_points))
            .ok_or(ContractError::ArithmeticOverflow)?;

        pool.alloc_points = alloc_points;
        pool::store(&env, &pool);
        pool::set_total_alloc_points(&env, total);

        events::publish_pool_updated(&env, pool_id, previous, alloc_points, total);

        Ok(())
    }

    /// Accrue every pool up to the current height. Callable by anyone.
    pub fn mass_update_pools(env: Env) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        Self::accrue_all(&env)
    }

    /// Accrue a single pool up to the current height. Callable by anyone.
    pub fn update_pool(env: Env, pool_id: u32) -> Result<PoolInfo, ContractError> {
        Self::require_initialized(&env)?;
        let config = config::load(&env)?;
        let schedule = schedule::load(&env)?;
        Self::accrue_pool(&env, &config, &schedule, pool_id)
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Stake `amount` of the pool's asset.
    ///
    /// Pending reward is paid out first. The flat deposit fee goes from the
    /// caller straight to the dev address; only the retained part is
    /// credited. A `referrer` equal to the caller is ignored.
    pub fn deposit(
        env: Env,
        caller: Address,
        pool_id: u32,
        amount: i128,
        referrer: Option<Address>,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        if amount <= 0 {
            return Err(ContractError::ZeroAmount);
        }

        let config = config::load(&env)?;
        let schedule = schedule::load(&env)?;
        let fees = fees::load(&env)?;

        // 1. Accrue and settle.
        let mut pool = Self::accrue_pool(&env, &config, &schedule, pool_id)?;
        let mut position = pool::load_position(&env, pool_id, &caller);
        let pending =
            rewards::pending(position.staked_amount, pool.acc_reward_per_share, position.reward_debt)?;

        // 2. Effects.
        let split = fees.split_deposit(amount)?;
        let now = env.ledger().sequence();

        position.staked_amount = position
            .staked_amount
            .checked_add(split.user_amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        pool.total_staked = pool
            .total_staked
            .checked_add(split.user_amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        if position.first_deposit_height == 0 {
            position.first_deposit_height = now;
        }
        position.last_action_height = now;

        let referrer = referrer.filter(|r| *r != caller);
        if let Some(referrer) = &referrer {
            referral::record(&env, referrer, &caller, split.user_amount)?;
            if position.referrer.is_none() {
                position.referrer = Some(referrer.clone());
            }
        }

        position.reward_debt =
            rewards::accumulated(position.staked_amount, pool.acc_reward_per_share)?;
        pool::store(&env, &pool);
        pool::store_position(&env, &position);

        // 3. Interactions.
        Self::send_reward(&env, &config, &caller, pool_id, pending)?;

        let asset = token::Client::new(&env, &pool.staked_asset);
        Self::pull_asset(&asset, &caller, &env.current_contract_address(), split.user_amount)?;
        Self::pull_asset(&asset, &caller, &config.beneficiaries.dev, split.dev_amount)?;

        events::publish_deposit(&env, caller, pool_id, amount, split.user_amount, referrer);

        Ok(())
    }

    /// Unstake `amount`, paying the withdrawal fee for the tier matching the
    /// heights elapsed since the last stake action.
    pub fn withdraw(
        env: Env,
        caller: Address,
        pool_id: u32,
        amount: i128,
        referrer: Option<Address>,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        if amount <= 0 {
            return Err(ContractError::ZeroAmount);
        }

        let config = config::load(&env)?;
        let schedule = schedule::load(&env)?;
        let fees = fees::load(&env)?;

        let mut pool = Self::accrue_pool(&env, &config, &schedule, pool_id)?;
        let mut position = pool::load_position(&env, pool_id, &caller);
        if amount > position.staked_amount {
            return Err(ContractError::InsufficientStakedBalance);
        }
        let pending =
            rewards::pending(position.staked_amount, pool.acc_reward_per_share, position.reward_debt)?;

        let now = env.ledger().sequence();
        let split = fees.split_withdrawal(amount, now.saturating_sub(position.last_action_height))?;

        position.staked_amount -= amount;
        pool.total_staked = pool
            .total_staked
            .checked_sub(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        position.last_action_height = now;
        position.last_withdraw_height = now;
        position.reward_debt =
            rewards::accumulated(position.staked_amount, pool.acc_reward_per_share)?;

        Self::reduce_referral(&env, &position, &caller, referrer, amount);

        pool::store(&env, &pool);
        pool::store_position(&env, &position);

        Self::send_reward(&env, &config, &caller, pool_id, pending)?;

        let asset = token::Client::new(&env, &pool.staked_asset);
        let this = env.current_contract_address();
        Self::pull_asset(&asset, &this, &caller, split.user_amount)?;
        Self::pull_asset(&asset, &this, &config.beneficiaries.dev, split.dev_amount)?;

        events::publish_withdraw(&env, caller, pool_id, amount, split.user_amount);

        Ok(())
    }

    /// Pay out pending reward for one pool. Returns the amount paid; zero is
    /// a successful no-op.
    pub fn claim_reward(env: Env, caller: Address, pool_id: u32) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let config = config::load(&env)?;
        let schedule = schedule::load(&env)?;
        Self::claim(&env, &config, &schedule, &caller, pool_id)
    }

    /// Pay out pending reward for each pool in `pool_ids`.
    pub fn claim_rewards(
        env: Env,
        caller: Address,
        pool_ids: Vec<u32>,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let config = config::load(&env)?;
        let schedule = schedule::load(&env)?;

        let mut total: i128 = 0;
        for pool_id in pool_ids.iter() {
            let paid = Self::claim(&env, &config, &schedule, &caller, pool_id)?;
            total = total
                .checked_add(paid)
                .ok_or(ContractError::ArithmeticOverflow)?;
        }
        Ok(total)
    }

    /// Leave a pool with the whole stake, forfeiting pending reward.
    ///
    /// Never touches the reward token, so the exit works even when minting
    /// is impossible. The pool is not accrued: emission since the last
    /// accrual goes to the stakers who remain. The withdrawal fee tier
    /// applies.
    pub fn emergency_withdraw(env: Env, caller: Address, pool_id: u32) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let config = config::load(&env)?;
        let fees = fees::load(&env)?;

        let mut pool = pool::load(&env, pool_id)?;
        let mut position = pool::load_position(&env, pool_id, &caller);
        let amount = position.staked_amount;
        if amount <= 0 {
            return Err(ContractError::InsufficientStakedBalance);
        }
        let forfeited =
            rewards::pending(amount, pool.acc_reward_per_share, position.reward_debt)?;

        let now = env.ledger().sequence();
        let split = fees.split_withdrawal(amount, now.saturating_sub(position.last_action_height))?;

        pool.total_staked = pool
            .total_staked
            .checked_sub(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        position.staked_amount = 0;
        position.reward_debt = 0;
        position.last_action_height = now;
        position.last_withdraw_height = now;

        Self::reduce_referral(&env, &position, &caller, None, amount);

        pool::store(&env, &pool);
        pool::store_position(&env, &position);

        let asset = token::Client::new(&env, &pool.staked_asset);
        let this = env.current_contract_address();
        Self::pull_asset(&asset, &this, &caller, split.user_amount)?;
        Self::pull_asset(&asset, &this, &config.beneficiaries.dev, split.dev_amount)?;

        events::publish_emergency_withdraw(
            &env,
            caller,
            pool_id,
            amount,
            split.user_amount,
            forfeited,
        );

        Ok(split.user_amount)
    }

    // ── Configuration ───────────────────────────────────────────────────────

    pub fn set_dev_address(env: Env, caller: Address, dev: Address) -> Result<(), ContractError> {
        Self::require_permitted(&env, &caller)?;
        Self::update_config(&env, symbol_short!("dev"), |c| {
            c.beneficiaries.dev = dev;
            Ok(())
        })
    }

    pub fn set_liquidity_address(
        env: Env,
        caller: Address,
        liquidity: Address,
    ) -> Result<(), ContractError> {
        Self::require_permitted(&env, &caller)?;
        Self::update_config(&env, symbol_short!("liquidity"), |c| {
            c.beneficiaries.liquidity = liquidity;
            Ok(())
        })
    }

    pub fn set_community_address(
        env: Env,
        caller: Address,
        community: Address,
    ) -> Result<(), ContractError> {
        Self::require_permitted(&env, &caller)?;
        Self::update_config(&env, symbol_short!("community"), |c| {
            c.beneficiaries.community = community;
            Ok(())
        })
    }

    pub fn set_founder_address(
        env: Env,
        caller: Address,
        founder: Address,
    ) -> Result<(), ContractError> {
        Self::require_permitted(&env, &caller)?;
        Self::update_config(&env, symbol_short!("founder"), |c| {
            c.beneficiaries.founder = founder;
            Ok(())
        })
    }

    /// Replace the beneficiary percentages. They may sum to at most 100.
    pub fn set_percentages(
        env: Env,
        caller: Address,
        shares: SharePercentages,
    ) -> Result<(), ContractError> {
        Self::require_permitted(&env, &caller)?;
        shares.validate()?;
        Self::accrue_all(&env)?;
        Self::update_config(&env, symbol_short!("shares"), |c| {
            c.shares = shares;
            Ok(())
        })
    }

    /// Percent of every payout routed to the lock ledger.
    pub fn set_lock_percentage(
        env: Env,
        caller: Address,
        percent_lock: u32,
    ) -> Result<(), ContractError> {
        Self::require_permitted(&env, &caller)?;
        if percent_lock > MAX_PERCENT {
            return Err(ContractError::InvalidPercentage);
        }
        Self::update_config(&env, symbol_short!("lock"), |c| {
            c.percent_lock = percent_lock;
            Ok(())
        })
    }

    pub fn set_share_mode(env: Env, caller: Address, mode: ShareMode) -> Result<(), ContractError> {
        Self::require_permitted(&env, &caller)?;
        Self::accrue_all(&env)?;
        Self::update_config(&env, symbol_short!("mode"), |c| {
            c.share_mode = mode;
            Ok(())
        })
    }

    /// Change the base emission. All pools accrue at the old rate first.
    pub fn set_reward_per_block(
        env: Env,
        caller: Address,
        reward_per_block: i128,
    ) -> Result<(), ContractError> {
        Self::require_permitted(&env, &caller)?;
        if reward_per_block < 0 {
            return Err(ContractError::InvalidRewardRate);
        }
        Self::accrue_all(&env)?;
        Self::update_config(&env, symbol_short!("rate"), |c| {
            c.reward_per_block = reward_per_block;
            Ok(())
        })
    }

    pub fn set_fee_tiers(
        env: Env,
        caller: Address,
        tiers: Vec<FeeTier>,
    ) -> Result<(), ContractError> {
        Self::require_permitted(&env, &caller)?;
        let mut fees = fees::load(&env)?;
        fees.tiers = tiers;
        fees.validate()?;
        fees::store(&env, &fees);
        events::publish_config_updated(&env, symbol_short!("fee_tiers"), Self::config_version(&env)?);
        Ok(())
    }

    pub fn set_deposit_fee(
        env: Env,
        caller: Address,
        user_bps: u32,
        dev_bps: u32,
    ) -> Result<(), ContractError> {
        Self::require_permitted(&env, &caller)?;
        let mut fees = fees::load(&env)?;
        fees.deposit_user_bps = user_bps;
        fees.deposit_dev_bps = dev_bps;
        fees.validate()?;
        fees::store(&env, &fees);
        events::publish_config_updated(&env, symbol_short!("dep_fee"), Self::config_version(&env)?);
        Ok(())
    }

    /// Replace the boundary table, keeping the multipliers. All pools are
    /// accrued under the old table first.
    pub fn reset_schedule(
        env: Env,
        caller: Address,
        boundaries: Vec<u32>,
    ) -> Result<(), ContractError> {
        Self::require_permitted(&env, &caller)?;
        Self::accrue_all(&env)?;

        let mut schedule = schedule::load(&env)?;
        schedule.reset(boundaries, env.ledger().sequence())?;
        schedule::store(&env, &schedule);

        events::publish_schedule_reset(
            &env,
            schedule.boundaries.len(),
            schedule.emission_end_height(),
        );
        Ok(())
    }

    // ── Authorization ───────────────────────────────────────────────────────

    pub fn add_authorized(env: Env, caller: Address, target: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let mut set = authorization::load(&env).ok_or(ContractError::NotInitialized)?;
        if !set.add(&caller, &target) {
            return Err(ContractError::Unauthorized);
        }
        authorization::store(&env, &set);

        events::publish_authorized_added(&env, caller, target);
        Ok(())
    }

    pub fn revoke_authorized(
        env: Env,
        caller: Address,
        target: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let mut set = authorization::load(&env).ok_or(ContractError::NotInitialized)?;
        if !set.revoke(&caller, &target) {
            return Err(ContractError::Unauthorized);
        }
        authorization::store(&env, &set);

        events::publish_authorized_revoked(&env, caller, target);
        Ok(())
    }

    /// Hand ownership of the generator to `new_owner`. Owner only.
    pub fn transfer_ownership(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let mut set = authorization::load(&env).ok_or(ContractError::NotInitialized)?;
        if !set.transfer_ownership(&caller, &new_owner) {
            return Err(ContractError::Unauthorized);
        }
        authorization::store(&env, &set);

        events::publish_ownership_transferred(&env, caller, new_owner);
        Ok(())
    }

    /// Hand ownership of the reward token away from the generator, which
    /// stops all further minting by this contract. Owner only.
    pub fn reclaim_token_ownership(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        if !authorization::require_owner(&env, &caller) {
            return Err(ContractError::Unauthorized);
        }

        let config = config::load(&env)?;
        let client = RewardTokenClient::new(&env, &config.reward_token);
        match client.try_transfer_ownership(&new_owner) {
            Ok(Ok(())) => {}
            _ => return Err(ContractError::TransferFailed),
        }

        events::publish_token_ownership_reclaimed(&env, config.reward_token, new_owner);
        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn pool_length(env: Env) -> u32 {
        pool::count(&env)
    }

    pub fn pool_info(env: Env, pool_id: u32) -> Result<PoolInfo, ContractError> {
        pool::load(&env, pool_id)
    }

    pub fn pool_exists(env: Env, staked_asset: Address) -> bool {
        pool::id_for_asset(&env, &staked_asset).is_some()
    }

    pub fn total_alloc_points(env: Env) -> u32 {
        pool::total_alloc_points(&env)
    }

    pub fn user_info(env: Env, pool_id: u32, owner: Address) -> UserPosition {
        pool::load_position(&env, pool_id, &owner)
    }

    /// Heights since the owner's last stake action in the pool; 0 when the
    /// owner never staked there.
    pub fn user_delta(env: Env, pool_id: u32, owner: Address) -> u32 {
        let position = pool::load_position(&env, pool_id, &owner);
        if position.first_deposit_height == 0 && position.staked_amount == 0 {
            return 0;
        }
        env.ledger()
            .sequence()
            .saturating_sub(position.last_action_height)
    }

    /// Reward `owner` could claim from the pool at the current height.
    pub fn pending_reward(env: Env, pool_id: u32, owner: Address) -> Result<i128, ContractError> {
        let config = config::load(&env)?;
        let schedule = schedule::load(&env)?;
        let pool = pool::load(&env, pool_id)?;
        let position = pool::load_position(&env, pool_id, &owner);

        let now = env.ledger().sequence();
        let mut acc = pool.acc_reward_per_share;
        if now > pool.last_accrual_height && pool.total_staked > 0 {
            let reward = Self::pool_reward(
                &env,
                &config,
                &schedule,
                pool.last_accrual_height,
                now,
                pool.alloc_points,
            )?;
            acc = acc
                .checked_add(rewards::accrued_per_share(reward.for_farmer, pool.total_staked)?)
                .ok_or(ContractError::ArithmeticOverflow)?;
        }
        rewards::pending(position.staked_amount, acc, position.reward_debt)
    }

    /// Weighted height count over `[from, to)`.
    pub fn get_multiplier(env: Env, from: u32, to: u32) -> Result<i128, ContractError> {
        Ok(schedule::load(&env)?.get_multiplier(from, to))
    }

    /// Emission over `[from, to)` for a pool weighted `alloc_points`, split
    /// per beneficiary and clamped to the token's remaining supply.
    pub fn get_pool_reward(
        env: Env,
        from: u32,
        to: u32,
        alloc_points: u32,
    ) -> Result<PoolReward, ContractError> {
        let config = config::load(&env)?;
        let schedule = schedule::load(&env)?;
        Self::pool_reward(&env, &config, &schedule, from, to, alloc_points)
    }

    /// Farmer emission the pool receives for the current height.
    pub fn get_new_reward_per_block(env: Env, pool_id: u32) -> Result<i128, ContractError> {
        let config = config::load(&env)?;
        let schedule = schedule::load(&env)?;
        let pool = pool::load(&env, pool_id)?;
        let now = env.ledger().sequence();
        let reward = Self::pool_reward(
            &env,
            &config,
            &schedule,
            now,
            now.saturating_add(1),
            pool.alloc_points,
        )?;
        Ok(reward.for_farmer)
    }

    pub fn get_referral_value(env: Env, referrer: Address, referee: Address) -> i128 {
        referral::value(&env, &referrer, &referee)
    }

    pub fn get_global_referral_amount(env: Env, referrer: Address) -> i128 {
        referral::global_amount(&env, &referrer)
    }

    pub fn get_referral_count(env: Env, referrer: Address) -> u32 {
        referral::count(&env, &referrer)
    }

    pub fn config(env: Env) -> Result<GeneratorConfig, ContractError> {
        config::load(&env)
    }

    pub fn schedule(env: Env) -> Result<HalvingSchedule, ContractError> {
        schedule::load(&env)
    }

    pub fn fee_schedule(env: Env) -> Result<FeeSchedule, ContractError> {
        fees::load(&env)
    }

    pub fn emission_end_height(env: Env) -> Result<u32, ContractError> {
        Ok(schedule::load(&env)?.emission_end_height())
    }

    pub fn owner(env: Env) -> Result<Address, ContractError> {
        authorization::load(&env)
            .map(|set| set.owner)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn is_authorized(env: Env, who: Address) -> bool {
        authorization::require_permitted(&env, &who)
    }

    pub fn authorized_list(env: Env) -> Vec<Address> {
        authorization::load(&env)
            .map(|set| set.authorized)
            .unwrap_or(Vec::new(&env))
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Caller must sign and be the owner or an authorized principal.
    fn require_permitted(env: &Env, caller: &Address) -> Result<(), ContractError> {
        Self::require_initialized(env)?;
        caller.require_auth();
        if !authorization::require_permitted(env, caller) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn config_version(env: &Env) -> Result<u32, ContractError> {
        Ok(config::load(env)?.version)
    }

    fn update_config<F>(env: &Env, field: Symbol, change: F) -> Result<(), ContractError>
    where
        F: FnOnce(&mut GeneratorConfig) -> Result<(), ContractError>,
    {
        let updated = config::update(env, change)?;
        events::publish_config_updated(env, field, updated.version);
        Ok(())
    }

    fn mintable(env: &Env, config: &GeneratorConfig) -> Result<i128, ContractError> {
        let client = RewardTokenClient::new(env, &config.reward_token);
        let cap = match client.try_cap() {
            Ok(Ok(cap)) => cap,
            _ => return Err(ContractError::TransferFailed),
        };
        let supply = match client.try_total_supply() {
            Ok(Ok(supply)) => supply,
            _ => return Err(ContractError::TransferFailed),
        };
        Ok(cap.saturating_sub(supply).max(0))
    }

    fn pool_reward(
        env: &Env,
        config: &GeneratorConfig,
        schedule: &HalvingSchedule,
        from: u32,
        to: u32,
        alloc_points: u32,
    ) -> Result<PoolReward, ContractError> {
        let weighted = schedule.get_multiplier(from, to);
        let amount = rewards::emission(
            config.reward_per_block,
            weighted,
            alloc_points,
            pool::total_alloc_points(env),
        )?;
        if amount == 0 {
            return Ok(PoolReward::default());
        }
        let reward = rewards::split_emission(amount, &config.shares, &config.share_mode)?;
        rewards::clamp_to_mintable(reward, Self::mintable(env, config)?)
    }

    /// Bring `pool_id` up to the current height, minting its emission.
    fn accrue_pool(
        env: &Env,
        config: &GeneratorConfig,
        schedule: &HalvingSchedule,
        pool_id: u32,
    ) -> Result<PoolInfo, ContractError> {
        let mut pool = pool::load(env, pool_id)?;
        let now = env.ledger().sequence();
        if now <= pool.last_accrual_height {
            return Ok(pool);
        }

        let from = pool.last_accrual_height;
        pool.last_accrual_height = now;
        if pool.total_staked == 0 {
            pool::store(env, &pool);
            return Ok(pool);
        }

        let reward = Self::pool_reward(env, config, schedule, from, now, pool.alloc_points)?;
        pool.acc_reward_per_share = pool
            .acc_reward_per_share
            .checked_add(rewards::accrued_per_share(reward.for_farmer, pool.total_staked)?)
            .ok_or(ContractError::ArithmeticOverflow)?;
        pool::store(env, &pool);

        if reward.total()? > 0 {
            let client = RewardTokenClient::new(env, &config.reward_token);
            let recipients = &config.beneficiaries;
            Self::mint(&client, &env.current_contract_address(), reward.for_farmer)?;
            Self::mint(&client, &recipients.dev, reward.for_dev)?;
            Self::mint(&client, &recipients.liquidity, reward.for_lp)?;
            Self::mint(&client, &recipients.community, reward.for_com)?;
            Self::mint(&client, &recipients.founder, reward.for_founders)?;

            log!(env, "pool accrued", pool_id, from, now, reward.for_farmer);
            events::publish_pool_accrued(
                env,
                pool_id,
                from,
                now,
                reward,
                pool.acc_reward_per_share,
            );
        }

        Ok(pool)
    }

    fn accrue_all(env: &Env) -> Result<(), ContractError> {
        let config = config::load(env)?;
        let schedule = schedule::load(env)?;
        for pool_id in 0..pool::count(env) {
            Self::accrue_pool(env, &config, &schedule, pool_id)?;
        }
        Ok(())
    }

    fn claim(
        env: &Env,
        config: &GeneratorConfig,
        schedule: &HalvingSchedule,
        caller: &Address,
        pool_id: u32,
    ) -> Result<i128, ContractError> {
        let pool = Self::accrue_pool(env, config, schedule, pool_id)?;
        let mut position = pool::load_position(env, pool_id, caller);
        let pending =
            rewards::pending(position.staked_amount, pool.acc_reward_per_share, position.reward_debt)?;
        if pending == 0 {
            return Ok(0);
        }

        position.reward_debt =
            rewards::accumulated(position.staked_amount, pool.acc_reward_per_share)?;
        pool::store_position(env, &position);

        Self::send_reward(env, config, caller, pool_id, pending)
    }

    /// Pay `amount` to `owner`, clamped to the generator's balance, split
    /// into liquid and locked parts. Returns what was paid.
    fn send_reward(
        env: &Env,
        config: &GeneratorConfig,
        owner: &Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<i128, ContractError> {
        if amount <= 0 {
            return Ok(0);
        }

        let client = RewardTokenClient::new(env, &config.reward_token);
        let this = env.current_contract_address();
        let balance = match client.try_balance(&this) {
            Ok(Ok(balance)) => balance,
            _ => return Err(ContractError::TransferFailed),
        };
        let payout = amount.min(balance);
        if payout <= 0 {
            return Ok(0);
        }

        let (liquid, locked) = rewards::lock_split(payout, config.percent_lock)?;
        if liquid > 0 {
            match client.try_transfer(&this, owner, &liquid) {
                Ok(Ok(())) => {}
                _ => return Err(ContractError::TransferFailed),
            }
        }
        if locked > 0 {
            match client.try_lock(owner, &locked) {
                Ok(Ok(())) => {}
                _ => return Err(ContractError::TransferFailed),
            }
        }

        events::publish_reward_sent(env, owner.clone(), pool_id, liquid, locked);

        Ok(payout)
    }

    fn mint(client: &RewardTokenClient, to: &Address, amount: i128) -> Result<(), ContractError> {
        if amount <= 0 {
            return Ok(());
        }
        match client.try_mint(to, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => Err(ContractError::TransferFailed),
        }
    }

    fn pull_asset(
        asset: &token::Client,
        from: &Address,
        to: &Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        if amount <= 0 {
            return Ok(());
        }
        match asset.try_transfer(from, to, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => Err(ContractError::TransferFailed),
        }
    }

    /// Withdrawals first reduce the supplied referrer, when it holds a
    /// contribution from `caller`, then put any remainder against the
    /// referrer recorded on the position.
    fn reduce_referral(
        env: &Env,
        position: &UserPosition,
        caller: &Address,
        supplied: Option<Address>,
        amount: i128,
    ) {
        let mut remaining = amount;
        let supplied = supplied
            .filter(|r| r != caller && referral::value(env, r, caller) > 0);
        if let Some(referrer) = &supplied {
            remaining -= referral::reduce(env, referrer, caller, remaining);
        }

        if let Some(recorded) = &position.referrer {
            if remaining > 0 && supplied.as_ref() != Some(recorded) {
                referral::reduce(env, recorded, caller, remaining);
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test_authorization;
#[cfg(test)]
mod test_referrals;
#[cfg(test)]
mod test_withdraw;
