//! # Access-Control Ledger
//!
//! Two independent layers decide who can see what:
//!
//! 1. **Ciphertext grants** (held by the FHE executor)
//!    - `{handle, account}` pairs; only holders can obtain plaintext
//!    - additive only, a grant is never retracted
//!    - issued per handle, so a grant on an aggregate covers the handles that
//!      were current at grant time and nothing produced afterwards
//!
//! 2. **Manager role** (held here)
//!    - `Manager(address) → bool`, mutated by the owner only
//!    - gates the authorized aggregate accessor
//!    - revoking the role stops future contract-mediated reads but leaves
//!      every ciphertext grant already issued in place
//!
//! ## Grant sources
//!
//! | Source                         | Grantee       | Handles                         |
//! |--------------------------------|---------------|---------------------------------|
//! | record creation                | reporter      | own decibel and duration        |
//! | aggregate merge                | reporter      | new aggregate handles           |
//! | `grant_manager`                | manager       | current handles of one location |
//! | `grant_manager_all`            | manager       | current handles of every location |
//! | `authorize_self`               | past reporter | current handles of one location |

use noise_common::{extend_persistent_ttl, Handle};
use soroban_sdk::{log, Address, Env};

use crate::aggregation;
use crate::config;
use crate::errors::NoiseError;
use crate::fhe::Fhe;
use crate::locations;
use crate::records;
use crate::types::DataKey;

/// Grants `identity` a persistent allowance on a handle this contract holds.
pub fn grant_self(fhe: &Fhe, handle: &Handle, identity: &Address) {
    fhe.allow(handle, identity);
}

fn grant_location(env: &Env, fhe: &Fhe, location_id: u64, grantee: &Address) -> Result<(), NoiseError> {
    let handles = aggregation::handles(env, location_id)?;
    grant_self(fhe, &handles.exceeded_count, grantee);
    grant_self(fhe, &handles.duration, grantee);
    log!(env, "aggregate grant", location_id, grantee.clone());
    Ok(())
}

/// Flags `manager` and grants it the current aggregate handles of
/// `location_id`. Owner authorization is checked by the caller.
pub fn grant_manager(
    env: &Env,
    fhe: &Fhe,
    location_id: u64,
    manager: &Address,
) -> Result<(), NoiseError> {
    if !locations::is_registered(env, location_id) {
        return Err(NoiseError::LocationNotFound);
    }
    set_manager(env, manager);
    grant_location(env, fhe, location_id, manager)
}

/// Flags `manager` and grants it the current aggregate handles of every
/// registered location. Cost is linear in the number of locations.
pub fn grant_manager_all(env: &Env, fhe: &Fhe, manager: &Address) -> Result<(), NoiseError> {
    set_manager(env, manager);
    for location_id in locations::all(env).iter() {
        grant_location(env, fhe, location_id, manager)?;
    }
    Ok(())
}

/// Clears the manager flag. Ciphertext grants already issued stay valid.
pub fn revoke_manager_role(env: &Env, manager: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Manager(manager.clone()));
}

/// Grants `caller` the current aggregate handles of a location it has
/// reported at before.
pub fn authorize_self(
    env: &Env,
    fhe: &Fhe,
    location_id: u64,
    caller: &Address,
) -> Result<(), NoiseError> {
    if !records::has_reported_at(env, caller, location_id) {
        return Err(NoiseError::Unauthorized);
    }
    grant_location(env, fhe, location_id, caller)
}

fn set_manager(env: &Env, manager: &Address) {
    let key = DataKey::Manager(manager.clone());
    env.storage().persistent().set(&key, &true);
    extend_persistent_ttl(env, &key);
}

pub fn is_manager(env: &Env, account: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Manager(account.clone()))
        .unwrap_or(false)
}

/// Guard for the authorized aggregate accessor.
pub fn require_owner_or_manager(env: &Env, caller: &Address) -> Result<(), NoiseError> {
    if config::is_owner(env, caller)? || is_manager(env, caller) {
        return Ok(());
    }
    Err(NoiseError::Unauthorized)
}
