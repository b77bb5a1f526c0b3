use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::ttl;

// ── Storage Keys ─────────────────────────────────────────────────────────────

const AUTH_SET: Symbol = symbol_short!("AUTH_SET");

// ── Authorization Set ────────────────────────────────────────────────────────

/// Capability list gating privileged operations.
///
/// - `owner`      – Singular. May add/revoke authorized principals and hand
///                  ownership (of this contract or of downstream contracts it
///                  controls) to another address.
/// - `authorized` – Principals sharing every privileged right except
///                  ownership transfer.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuthorizationSet {
    pub owner: Address,
    pub authorized: Vec<Address>,
}

impl AuthorizationSet {
    pub fn new(env: &Env, owner: Address) -> Self {
        Self {
            owner,
            authorized: Vec::new(env),
        }
    }

    pub fn is_owner(&self, who: &Address) -> bool {
        self.owner == *who
    }

    /// Returns true if `who` is the owner or a member of the authorized set.
    pub fn permits(&self, who: &Address) -> bool {
        self.is_owner(who) || self.authorized.contains(who)
    }

    /// Adds `target` to the authorized set (avoids duplicates).
    ///
    /// Returns `false` if `caller` is not the owner.
    pub fn add(&mut self, caller: &Address, target: &Address) -> bool {
        if !self.is_owner(caller) {
            return false;
        }
        if !self.authorized.contains(target) {
            self.authorized.push_back(target.clone());
        }
        true
    }

    /// Removes `target` from the authorized set.
    ///
    /// Returns `false` if `caller` is not the owner.
    pub fn revoke(&mut self, caller: &Address, target: &Address) -> bool {
        if !self.is_owner(caller) {
            return false;
        }
        if let Some(index) = self.authorized.first_index_of(target) {
            self.authorized.remove(index);
        }
        true
    }

    /// Hands ownership to `new_owner`. The previous owner keeps no rights
    /// unless it is also in the authorized set.
    ///
    /// Returns `false` if `caller` is not the owner.
    pub fn transfer_ownership(&mut self, caller: &Address, new_owner: &Address) -> bool {
        if !self.is_owner(caller) {
            return false;
        }
        self.owner = new_owner.clone();
        true
    }
}

// ── Storage Helpers ──────────────────────────────────────────────────────────

pub fn load(env: &Env) -> Option<AuthorizationSet> {
    env.storage().instance().get(&AUTH_SET)
}

pub fn store(env: &Env, set: &AuthorizationSet) {
    env.storage().instance().set(&AUTH_SET, set);
    ttl::extend_instance(env);
}

/// Guard used at the top of every privileged operation.
///
/// Returns `false` when no set has been stored yet or `caller` is neither the
/// owner nor authorized.
pub fn require_permitted(env: &Env, caller: &Address) -> bool {
    match load(env) {
        Some(set) => set.permits(caller),
        None => false,
    }
}

/// Guard for owner-only operations.
pub fn require_owner(env: &Env, caller: &Address) -> bool {
    match load(env) {
        Some(set) => set.is_owner(caller),
        None => false,
    }
}
