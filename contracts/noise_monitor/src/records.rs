//! Record store: append-only, per-reporter lists of noise records.
//!
//! ## Storage Keys
//!
//! - `RecordCount(reporter)` → `u32`
//! - `Record(reporter, index)` → [`NoiseRecord`]
//!
//! Indices are zero-based and never reused. Lists of different reporters
//! never share an entry.

use noise_common::{extend_persistent_ttl, Handle};
use soroban_sdk::{Address, Env};

use crate::errors::NoiseError;
use crate::fhe::Fhe;
use crate::types::{DataKey, NoiseRecord};
use crate::validation;

/// Appends a record for `reporter` and returns its index.
///
/// The reporter and this contract both end up with persistent allowances on
/// the two ciphertexts.
pub fn append(
    env: &Env,
    fhe: &Fhe,
    reporter: &Address,
    decibel: Handle,
    duration: Handle,
    timestamp: u64,
    location_id: u64,
) -> Result<u32, NoiseError> {
    validation::validate_report_metadata(timestamp, location_id)?;

    let index = count(env, reporter);
    let next = index.checked_add(1).ok_or(NoiseError::InvalidInput)?;

    fhe.allow_this(&decibel);
    fhe.allow_this(&duration);
    fhe.allow(&decibel, reporter);
    fhe.allow(&duration, reporter);

    let record = NoiseRecord {
        decibel,
        duration,
        timestamp,
        location_id,
        reporter: reporter.clone(),
        is_processed: false,
    };
    let record_key = DataKey::Record(reporter.clone(), index);
    env.storage().persistent().set(&record_key, &record);
    extend_persistent_ttl(env, &record_key);

    let count_key = DataKey::RecordCount(reporter.clone());
    env.storage().persistent().set(&count_key, &next);
    extend_persistent_ttl(env, &count_key);

    Ok(index)
}

pub fn count(env: &Env, user: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::RecordCount(user.clone()))
        .unwrap_or(0)
}

pub fn get(env: &Env, user: &Address, index: u32) -> Result<NoiseRecord, NoiseError> {
    if index >= count(env, user) {
        return Err(NoiseError::IndexOutOfBounds);
    }
    env.storage()
        .persistent()
        .get(&DataKey::Record(user.clone(), index))
        .ok_or(NoiseError::IndexOutOfBounds)
}

/// Whether `user` has at least one record for `location_id`.
///
/// Linear in the number of the user's own records.
pub fn has_reported_at(env: &Env, user: &Address, location_id: u64) -> bool {
    (0..count(env, user)).any(|index| {
        env.storage()
            .persistent()
            .get::<_, NoiseRecord>(&DataKey::Record(user.clone(), index))
            .map(|record| record.location_id == location_id)
            .unwrap_or(false)
    })
}
