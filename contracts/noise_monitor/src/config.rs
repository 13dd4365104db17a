//! Deployment configuration kept in instance storage: the owner and the FHE
//! executor this deployment computes with.

use noise_common::extend_instance_ttl;
use soroban_sdk::{Address, Env};

use crate::errors::NoiseError;
use crate::types::DataKey;

pub fn initialize(env: &Env, owner: &Address, executor: &Address) -> Result<(), NoiseError> {
    if is_initialized(env) {
        return Err(NoiseError::AlreadyInitialized);
    }
    env.storage().instance().set(&DataKey::Owner, owner);
    env.storage().instance().set(&DataKey::Executor, executor);
    extend_instance_ttl(env);
    Ok(())
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Owner)
}

pub fn owner(env: &Env) -> Result<Address, NoiseError> {
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(NoiseError::NotInitialized)
}

pub fn executor(env: &Env) -> Result<Address, NoiseError> {
    env.storage()
        .instance()
        .get(&DataKey::Executor)
        .ok_or(NoiseError::NotInitialized)
}

pub fn is_owner(env: &Env, account: &Address) -> Result<bool, NoiseError> {
    Ok(owner(env)? == *account)
}

/// Guard: returns `NoiseError::Unauthorized` unless `caller` is the owner.
pub fn require_owner(env: &Env, caller: &Address) -> Result<(), NoiseError> {
    if !is_owner(env, caller)? {
        return Err(NoiseError::Unauthorized);
    }
    Ok(())
}

/// Replaces the owner and returns the previous one.
pub fn set_owner(env: &Env, new_owner: &Address) -> Result<Address, NoiseError> {
    let previous = owner(env)?;
    env.storage().instance().set(&DataKey::Owner, new_owner);
    extend_instance_ttl(env);
    Ok(previous)
}
