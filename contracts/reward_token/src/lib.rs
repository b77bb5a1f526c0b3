#![no_std]

//! Mintable reward token with a built-in lock ledger.
//!
//! Part of every reward payout is parked in a per-holder locked balance that
//! unlocks linearly between `lock_from_height` and `lock_to_height`. Locked
//! tokens are held by the token contract itself, so
//! `total_balance_of(holder) == balance(holder) + lock_of(holder)`.

pub mod events;
pub mod vesting;

use common::ttl;
use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, String, Symbol};

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const OWNER: Symbol = symbol_short!("OWNER");
const NAME: Symbol = symbol_short!("NAME");
const SYMBOL: Symbol = symbol_short!("SYMBOL");
const CAP: Symbol = symbol_short!("CAP");
const TOTAL_SUPPLY: Symbol = symbol_short!("SUPPLY");
const TOTAL_LOCK: Symbol = symbol_short!("TOT_LOCK");
const LOCK_FROM: Symbol = symbol_short!("LOCK_FROM");
const LOCK_TO: Symbol = symbol_short!("LOCK_TO");

// Per-holder persistent storage uses tuple keys:  (prefix, holder)
const BALANCE: Symbol = symbol_short!("BAL");
const LOCKED: Symbol = symbol_short!("LOCKED");
const LAST_UNLOCK: Symbol = symbol_short!("LAST_UNL");

pub const DECIMALS: u32 = 7;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum TokenError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidAmount = 4,
    InsufficientBalance = 5,
    CapExceeded = 6,
    InvalidLockWindow = 7,
    ArithmeticOverflow = 8,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct RewardToken;

#[contractimpl]
impl RewardToken {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the token.
    ///
    /// * `owner`            – sole minter; usually handed to the rewards
    ///                        generator right after deployment.
    /// * `lock_from_height` – ledger sequence at which locked balances start
    ///                        unlocking.
    /// * `lock_to_height`   – ledger sequence at which locked balances are
    ///                        fully unlockable.
    /// * `cap`              – hard ceiling on `total_supply`.
    pub fn initialize(
        env: Env,
        owner: Address,
        name: String,
        symbol: String,
        lock_from_height: u32,
        lock_to_height: u32,
        cap: i128,
    ) -> Result<(), TokenError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(TokenError::AlreadyInitialized);
        }
        if lock_from_height > lock_to_height {
            return Err(TokenError::InvalidLockWindow);
        }
        if cap <= 0 {
            return Err(TokenError::InvalidAmount);
        }

        let storage = env.storage().instance();
        storage.set(&INITIALIZED, &true);
        storage.set(&OWNER, &owner);
        storage.set(&NAME, &name);
        storage.set(&SYMBOL, &symbol);
        storage.set(&CAP, &cap);
        storage.set(&LOCK_FROM, &lock_from_height);
        storage.set(&LOCK_TO, &lock_to_height);
        // TOTAL_SUPPLY and TOTAL_LOCK start at zero via unwrap_or(0).
        ttl::extend_instance(&env);

        events::publish_initialized(&env, owner, lock_from_height, lock_to_height, cap);

        Ok(())
    }

    // ── Supply ──────────────────────────────────────────────────────────────

    /// Mint `amount` new tokens to `to`. Owner only; bounded by the cap.
    pub fn mint(env: Env, to: Address, amount: i128) -> Result<(), TokenError> {
        let owner = Self::load_owner(&env)?;
        owner.require_auth();

        if amount <= 0 {
            return Err(TokenError::InvalidAmount);
        }

        let cap: i128 = env.storage().instance().get(&CAP).unwrap_or(0);
        let supply = Self::total_supply(env.clone());
        let new_supply = supply
            .checked_add(amount)
            .ok_or(TokenError::ArithmeticOverflow)?;
        if new_supply > cap {
            return Err(TokenError::CapExceeded);
        }

        env.storage().instance().set(&TOTAL_SUPPLY, &new_supply);
        Self::credit(&env, &to, amount)?;

        events::publish_minted(&env, to, amount, new_supply);

        Ok(())
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), TokenError> {
        Self::require_initialized(&env)?;
        from.require_auth();

        if amount <= 0 {
            return Err(TokenError::InvalidAmount);
        }

        Self::debit(&env, &from, amount)?;
        Self::credit(&env, &to, amount)?;

        events::publish_transfer(&env, from, to, amount);

        Ok(())
    }

    // ── Lock ledger ─────────────────────────────────────────────────────────

    /// Move `amount` of the owner's liquid balance into `holder`'s locked
    /// balance. Owner only.
    ///
    /// The first lock recorded for a holder starts its unlock window at
    /// `max(current height, lock_from_height)`.
    pub fn lock(env: Env, holder: Address, amount: i128) -> Result<(), TokenError> {
        let owner = Self::load_owner(&env)?;
        owner.require_auth();

        if amount <= 0 {
            return Err(TokenError::InvalidAmount);
        }

        Self::debit(&env, &owner, amount)?;

        let locked_key = (LOCKED, holder.clone());
        let locked: i128 = env.storage().persistent().get(&locked_key).unwrap_or(0);
        let new_locked = locked
            .checked_add(amount)
            .ok_or(TokenError::ArithmeticOverflow)?;
        env.storage().persistent().set(&locked_key, &new_locked);
        ttl::extend_persistent(&env, &locked_key);

        let last_unlock_key = (LAST_UNLOCK, holder.clone());
        if !env.storage().persistent().has(&last_unlock_key) {
            let lock_from: u32 = env.storage().instance().get(&LOCK_FROM).unwrap_or(0);
            let start = vesting::initial_unlock_height(env.ledger().sequence(), lock_from);
            env.storage().persistent().set(&last_unlock_key, &start);
        }
        ttl::extend_persistent(&env, &last_unlock_key);

        let total_lock = Self::total_lock(env.clone())
            .checked_add(amount)
            .ok_or(TokenError::ArithmeticOverflow)?;
        env.storage().instance().set(&TOTAL_LOCK, &total_lock);

        events::publish_locked(&env, holder, amount, new_locked);

        Ok(())
    }

    /// Release whatever part of `holder`'s locked balance has vested.
    ///
    /// Returns the released amount; zero is a successful no-op.
    pub fn unlock(env: Env, holder: Address) -> Result<i128, TokenError> {
        Self::require_initialized(&env)?;
        holder.require_auth();

        let amount = Self::can_unlock_amount(env.clone(), holder.clone())?;
        if amount == 0 {
            return Ok(0);
        }

        let locked_key = (LOCKED, holder.clone());
        let locked: i128 = env.storage().persistent().get(&locked_key).unwrap_or(0);
        let remaining = locked
            .checked_sub(amount)
            .ok_or(TokenError::ArithmeticOverflow)?;
        env.storage().persistent().set(&locked_key, &remaining);
        ttl::extend_persistent(&env, &locked_key);

        let last_unlock_key = (LAST_UNLOCK, holder.clone());
        env.storage()
            .persistent()
            .set(&last_unlock_key, &env.ledger().sequence());
        ttl::extend_persistent(&env, &last_unlock_key);

        let total_lock = Self::total_lock(env.clone())
            .checked_sub(amount)
            .ok_or(TokenError::ArithmeticOverflow)?;
        env.storage().instance().set(&TOTAL_LOCK, &total_lock);

        Self::credit(&env, &holder, amount)?;

        events::publish_unlocked(&env, holder, amount);

        Ok(amount)
    }

    /// Amount `holder` could release right now.
    pub fn can_unlock_amount(env: Env, holder: Address) -> Result<i128, TokenError> {
        let locked = Self::lock_of(env.clone(), holder.clone());
        let last_unlock = Self::last_unlock_height(env.clone(), holder);
        let lock_from = Self::lock_from_height(env.clone());
        let lock_to = Self::lock_to_height(env.clone());

        vesting::unlockable(
            locked,
            env.ledger().sequence(),
            last_unlock,
            lock_from,
            lock_to,
        )
        .ok_or(TokenError::ArithmeticOverflow)
    }

    // ── Ownership ───────────────────────────────────────────────────────────

    pub fn transfer_ownership(env: Env, new_owner: Address) -> Result<(), TokenError> {
        let owner = Self::load_owner(&env)?;
        owner.require_auth();

        env.storage().instance().set(&OWNER, &new_owner);
        ttl::extend_instance(&env);

        events::publish_ownership_transferred(&env, owner, new_owner);

        Ok(())
    }

    pub fn owner(env: Env) -> Result<Address, TokenError> {
        env.storage()
            .instance()
            .get(&OWNER)
            .ok_or(TokenError::NotInitialized)
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn balance(env: Env, id: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&(BALANCE, id))
            .unwrap_or(0)
    }

    pub fn lock_of(env: Env, holder: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&(LOCKED, holder))
            .unwrap_or(0)
    }

    /// Liquid plus locked balance.
    pub fn total_balance_of(env: Env, holder: Address) -> i128 {
        Self::balance(env.clone(), holder.clone()).saturating_add(Self::lock_of(env, holder))
    }

    pub fn last_unlock_height(env: Env, holder: Address) -> u32 {
        env.storage()
            .persistent()
            .get(&(LAST_UNLOCK, holder))
            .unwrap_or(0)
    }

    pub fn total_lock(env: Env) -> i128 {
        env.storage().instance().get(&TOTAL_LOCK).unwrap_or(0)
    }

    pub fn total_supply(env: Env) -> i128 {
        env.storage().instance().get(&TOTAL_SUPPLY).unwrap_or(0)
    }

    pub fn cap(env: Env) -> i128 {
        env.storage().instance().get(&CAP).unwrap_or(0)
    }

    pub fn lock_from_height(env: Env) -> u32 {
        env.storage().instance().get(&LOCK_FROM).unwrap_or(0)
    }

    pub fn lock_to_height(env: Env) -> u32 {
        env.storage().instance().get(&LOCK_TO).unwrap_or(0)
    }

    pub fn name(env: Env) -> String {
        env.storage()
            .instance()
            .get(&NAME)
            .unwrap_or(String::from_str(&env, ""))
    }

    pub fn symbol(env: Env) -> String {
        env.storage()
            .instance()
            .get(&SYMBOL)
            .unwrap_or(String::from_str(&env, ""))
    }

    pub fn decimals(_env: Env) -> u32 {
        DECIMALS
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), TokenError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(TokenError::NotInitialized);
        }
        Ok(())
    }

    fn load_owner(env: &Env) -> Result<Address, TokenError> {
        env.storage()
            .instance()
            .get(&OWNER)
            .ok_or(TokenError::NotInitialized)
    }

    fn credit(env: &Env, id: &Address, amount: i128) -> Result<(), TokenError> {
        let key = (BALANCE, id.clone());
        let balance: i128 = env.storage().persistent().get(&key).unwrap_or(0);
        let new_balance = balance
            .checked_add(amount)
            .ok_or(TokenError::ArithmeticOverflow)?;
        env.storage().persistent().set(&key, &new_balance);
        ttl::extend_persistent(env, &key);
        Ok(())
    }

    fn debit(env: &Env, id: &Address, amount: i128) -> Result<(), TokenError> {
        let key = (BALANCE, id.clone());
        let balance: i128 = env.storage().persistent().get(&key).unwrap_or(0);
        if balance < amount {
            return Err(TokenError::InsufficientBalance);
        }
        env.storage().persistent().set(&key, &(balance - amount));
        ttl::extend_persistent(env, &key);
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
