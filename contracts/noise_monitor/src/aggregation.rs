//! # Aggregation Engine
//!
//! Maintains one [`AggregatedData`] per location. Every report is folded in
//! under encryption:
//!
//! ```text
//! exceeded  = decibel > NOISE_THRESHOLD            (encrypted bool)
//! increment = select(exceeded, 1, 0)               (both arms always computed)
//! total_exceeded_count += increment
//! total_duration       += duration
//! ```
//!
//! The encrypted comparison result is never decrypted or branched on. The
//! alert track runs beside it in plaintext and is fed only by the reporter's
//! `caller_asserted_exceeded` flag, so an alert firing says nothing
//! verifiable about the encrypted readings.
//!
//! Known limitation: the flag cannot be checked against the encrypted
//! comparison without an on-chain decryption, which this contract never does.
//!
//! Every encrypted mutation yields new handles, so allowances for this
//! contract and the reporter are re-issued at the end of each merge.

use noise_common::{extend_persistent_ttl, Handle};
use soroban_sdk::{Address, Env};

use crate::errors::NoiseError;
use crate::events;
use crate::fhe::Fhe;
use crate::types::{AggregateHandles, AggregatedData, DataKey, LocationSummary};

/// Decibel level above which a reading counts as an exceedance.
pub const NOISE_THRESHOLD: u32 = 70;

/// Asserted exceedances needed to fire one alert.
pub const ALERT_THRESHOLD: u32 = 2;

pub fn load(env: &Env, location_id: u64) -> Option<AggregatedData> {
    env.storage()
        .persistent()
        .get(&DataKey::Aggregate(location_id))
}

fn save(env: &Env, location_id: u64, data: &AggregatedData) {
    let key = DataKey::Aggregate(location_id);
    env.storage().persistent().set(&key, data);
    extend_persistent_ttl(env, &key);
}

fn initial(fhe: &Fhe) -> AggregatedData {
    let exceeded = fhe.as_uint16(0);
    let duration = fhe.as_uint16(0);
    fhe.allow_this(&exceeded);
    fhe.allow_this(&duration);
    AggregatedData {
        total_reports: 0,
        total_exceeded_count: exceeded,
        total_duration: duration,
        last_updated: 0,
        alert_count: 0,
        exceeded_count_for_alert: 0,
    }
}

/// Folds one report into the aggregate of `location_id`, creating it on the
/// location's first report.
pub fn merge(
    env: &Env,
    fhe: &Fhe,
    location_id: u64,
    reporter: &Address,
    decibel: &Handle,
    duration: &Handle,
    timestamp: u64,
    caller_asserted_exceeded: bool,
) -> AggregatedData {
    let mut data = load(env, location_id).unwrap_or_else(|| initial(fhe));

    let exceeded = fhe.gt(decibel, NOISE_THRESHOLD);
    let one = fhe.as_uint16(1);
    let zero = fhe.as_uint16(0);
    let increment = fhe.select(&exceeded, &one, &zero);
    data.total_exceeded_count = fhe.add(&data.total_exceeded_count, &increment);
    data.total_duration = fhe.add(&data.total_duration, duration);

    data.total_reports = data.total_reports.saturating_add(1);
    data.last_updated = timestamp;

    if caller_asserted_exceeded {
        data.exceeded_count_for_alert = data.exceeded_count_for_alert.saturating_add(1);
        if data.exceeded_count_for_alert >= ALERT_THRESHOLD {
            data.alert_count = data.alert_count.saturating_add(1);
            data.exceeded_count_for_alert = 0;
            events::publish_noise_alert(env, location_id, timestamp, data.total_reports);
        }
    }

    fhe.allow_this(&data.total_exceeded_count);
    fhe.allow_this(&data.total_duration);
    fhe.allow(&data.total_exceeded_count, reporter);
    fhe.allow(&data.total_duration, reporter);

    save(env, location_id, &data);
    data
}

/// Plaintext statistics; all zeros for a location nobody reported yet.
pub fn summary(env: &Env, location_id: u64) -> LocationSummary {
    load(env, location_id)
        .map(|data| LocationSummary {
            total_reports: data.total_reports,
            last_updated: data.last_updated,
            alert_count: data.alert_count,
        })
        .unwrap_or_default()
}

/// Current aggregate handles, or `NoData` before the first report.
pub fn handles(env: &Env, location_id: u64) -> Result<AggregateHandles, NoiseError> {
    match load(env, location_id) {
        Some(data) if data.total_reports > 0 => Ok(AggregateHandles {
            exceeded_count: data.total_exceeded_count,
            duration: data.total_duration,
        }),
        _ => Err(NoiseError::NoData),
    }
}

/// Asserted exceedances counted toward the next alert.
pub fn alert_progress(env: &Env, location_id: u64) -> u32 {
    load(env, location_id)
        .map(|data| data.exceeded_count_for_alert)
        .unwrap_or(0)
}
