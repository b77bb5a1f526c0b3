#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the token is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub lock_from_height: u32,
    pub lock_to_height: u32,
    pub cap: i128,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MintedEvent {
    pub to: Address,
    pub amount: i128,
    pub total_supply: i128,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferEvent {
    pub from: Address,
    pub to: Address,
    pub amount: i128,
}

/// Fired when part of a holder's balance moves into the lock ledger.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockedEvent {
    pub holder: Address,
    pub amount: i128,
    pub locked_total: i128,
    pub height: u32,
}

/// Fired when locked balance is released back to the holder.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnlockedEvent {
    pub holder: Address,
    pub amount: i128,
    pub height: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipTransferredEvent {
    pub previous_owner: Address,
    pub new_owner: Address,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    owner: Address,
    lock_from_height: u32,
    lock_to_height: u32,
    cap: i128,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            lock_from_height,
            lock_to_height,
            cap,
        },
    );
}

pub fn publish_minted(env: &Env, to: Address, amount: i128, total_supply: i128) {
    env.events().publish(
        (symbol_short!("MINT"), to.clone()),
        MintedEvent {
            to,
            amount,
            total_supply,
        },
    );
}

pub fn publish_transfer(env: &Env, from: Address, to: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("TRANSFER"), from.clone(), to.clone()),
        TransferEvent { from, to, amount },
    );
}

pub fn publish_locked(env: &Env, holder: Address, amount: i128, locked_total: i128) {
    env.events().publish(
        (symbol_short!("LOCK"), holder.clone()),
        LockedEvent {
            holder,
            amount,
            locked_total,
            height: env.ledger().sequence(),
        },
    );
}

pub fn publish_unlocked(env: &Env, holder: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("UNLOCKED"), holder.clone()),
        UnlockedEvent {
            holder,
            amount,
            height: env.ledger().sequence(),
        },
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
