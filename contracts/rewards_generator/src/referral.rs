//! Referrer → referee contribution ledger.
//!
//! Purely observational: nothing here moves tokens. The distinct-referee
//! count is sticky (it never decreases) while contribution amounts follow
//! deposits and withdrawals.

use common::ttl;
use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::ContractError;

// Persistent tuple keys.
const REF_VALUE: Symbol = symbol_short!("REF_VAL"); // (prefix, referrer, referee) -> i128
const REF_SEEN: Symbol = symbol_short!("REF_SEEN"); // (prefix, referrer, referee) -> bool
const REF_TOTAL: Symbol = symbol_short!("REF_TOT"); // (prefix, referrer) -> i128
const REF_COUNT: Symbol = symbol_short!("REF_CNT"); // (prefix, referrer) -> u32

pub fn value(env: &Env, referrer: &Address, referee: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&(REF_VALUE, referrer.clone(), referee.clone()))
        .unwrap_or(0)
}

pub fn global_amount(env: &Env, referrer: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&(REF_TOTAL, referrer.clone()))
        .unwrap_or(0)
}

pub fn count(env: &Env, referrer: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&(REF_COUNT, referrer.clone()))
        .unwrap_or(0)
}

fn set_value(env: &Env, referrer: &Address, referee: &Address, amount: i128) {
    let key = (REF_VALUE, referrer.clone(), referee.clone());
    env.storage().persistent().set(&key, &amount);
    ttl::extend_persistent(env, &key);
}

fn set_global_amount(env: &Env, referrer: &Address, amount: i128) {
    let key = (REF_TOTAL, referrer.clone());
    env.storage().persistent().set(&key, &amount);
    ttl::extend_persistent(env, &key);
}

/// Credit `amount` contributed by `referee` under `referrer`.
pub fn record(
    env: &Env,
    referrer: &Address,
    referee: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    if amount <= 0 {
        return Ok(());
    }

    let pair_value = value(env, referrer, referee)
        .checked_add(amount)
        .ok_or(ContractError::ArithmeticOverflow)?;
    let total = global_amount(env, referrer)
        .checked_add(amount)
        .ok_or(ContractError::ArithmeticOverflow)?;
    set_value(env, referrer, referee, pair_value);
    set_global_amount(env, referrer, total);

    let seen_key = (REF_SEEN, referrer.clone(), referee.clone());
    if !env.storage().persistent().has(&seen_key) {
        env.storage().persistent().set(&seen_key, &true);
        ttl::extend_persistent(env, &seen_key);

        let count_key = (REF_COUNT, referrer.clone());
        let next = count(env, referrer).saturating_add(1);
        env.storage().persistent().set(&count_key, &next);
        ttl::extend_persistent(env, &count_key);
    }
    Ok(())
}

/// Remove up to `amount` from the pair and the referrer's aggregate.
///
/// Returns the amount actually removed; both values floor at zero.
pub fn reduce(env: &Env, referrer: &Address, referee: &Address, amount: i128) -> i128 {
    let pair_value = value(env, referrer, referee);
    let removed = amount.min(pair_value).max(0);
    if removed == 0 {
        return 0;
    }

    set_value(env, referrer, referee, pair_value - removed);
    let total = global_amount(env, referrer);
    set_global_amount(env, referrer, total.saturating_sub(removed).max(0));
    removed
}
