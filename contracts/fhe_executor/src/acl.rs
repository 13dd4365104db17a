//! Handle-level access control list.
//!
//! ## Storage Keys
//!
//! - `("ALLOW", handle, account)` → `bool` (persistent, never removed)
//! - `("T_ALLOW", handle, account)` → `u32` ledger sequence (temporary)
//!
//! Persistent grants are monotone: there is no entry point that removes one.

use noise_common::{extend_persistent_ttl, Handle};
use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::FheError;

const ALLOW: Symbol = symbol_short!("ALLOW");
const T_ALLOW: Symbol = symbol_short!("T_ALLOW");

/// Grants `account` a persistent allowance on `handle` and refreshes its
/// TTL. Returns `true` when the allowance is new.
pub fn allow(env: &Env, handle: &Handle, account: &Address) -> bool {
    let key = (ALLOW, handle.clone(), account.clone());
    let granted = !env.storage().persistent().has(&key);
    if granted {
        env.storage().persistent().set(&key, &true);
    }
    extend_persistent_ttl(env, &key);
    granted
}

/// Grants `account` an allowance on `handle` for the current ledger only.
pub fn allow_transient(env: &Env, handle: &Handle, account: &Address) {
    let key = (T_ALLOW, handle.clone(), account.clone());
    env.storage()
        .temporary()
        .set(&key, &env.ledger().sequence());
}

pub fn is_allowed(env: &Env, handle: &Handle, account: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&(ALLOW, handle.clone(), account.clone()))
        .unwrap_or(false)
}

fn is_transiently_allowed(env: &Env, handle: &Handle, account: &Address) -> bool {
    let granted_at: Option<u32> = env
        .storage()
        .temporary()
        .get(&(T_ALLOW, handle.clone(), account.clone()));
    granted_at == Some(env.ledger().sequence())
}

/// Whether `account` may use `handle` as an operand right now.
pub fn can_use(env: &Env, handle: &Handle, account: &Address) -> bool {
    is_allowed(env, handle, account) || is_transiently_allowed(env, handle, account)
}

/// Guard: returns `FheError::NotAllowed` unless `account` may use `handle`.
pub fn require_usable(env: &Env, handle: &Handle, account: &Address) -> Result<(), FheError> {
    if !can_use(env, handle, account) {
        return Err(FheError::NotAllowed);
    }
    Ok(())
}
