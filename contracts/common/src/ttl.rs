use soroban_sdk::{Env, IntoVal, Val};

/// Remaining-ledger threshold below which an entry's TTL is bumped.
pub const TTL_THRESHOLD: u32 = 518_400;

/// Ledger count an entry is extended to once the threshold is crossed.
pub const TTL_EXTEND_TO: u32 = 3_110_400;

pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
