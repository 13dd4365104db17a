//! Location registry: ordered list of every location id seen so far, plus a
//! membership set so registration stays idempotent without scanning.

use noise_common::extend_persistent_ttl;
use soroban_sdk::{Env, Vec};

use crate::types::DataKey;

/// Registers `location_id` on first sight. Returns `true` when the id was new.
pub fn ensure_registered(env: &Env, location_id: u64) -> bool {
    if is_registered(env, location_id) {
        return false;
    }

    let known_key = DataKey::LocationKnown(location_id);
    env.storage().persistent().set(&known_key, &true);
    extend_persistent_ttl(env, &known_key);

    let mut ids = all(env);
    ids.push_back(location_id);
    env.storage().persistent().set(&DataKey::LocationIds, &ids);
    extend_persistent_ttl(env, &DataKey::LocationIds);

    true
}

pub fn is_registered(env: &Env, location_id: u64) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::LocationKnown(location_id))
        .unwrap_or(false)
}

pub fn all(env: &Env) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&DataKey::LocationIds)
        .unwrap_or(Vec::new(env))
}

pub fn count(env: &Env) -> u32 {
    all(env).len()
}
