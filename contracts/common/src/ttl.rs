use soroban_sdk::{Env, IntoVal, Val};

/// 17,280 ledgers ~= 1 day (@ ~5s/ledger)
pub const TTL_THRESHOLD: u32 = 17_280;
/// 518,400 ledgers ~= 30 days (@ ~5s/ledger)
pub const TTL_EXTEND_TO: u32 = 518_400;

/// Extends the time-to-live of the contract instance and its instance storage.
pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Extends the time-to-live of a persistent entry.
///
/// Callers must only pass keys that are known to exist.
pub fn extend_persistent_ttl<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
