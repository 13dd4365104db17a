//! # Noise Monitor Contract
//!
//! Residents submit encrypted noise readings (decibel level and duration) for
//! a location. The contract keeps every reading as an encrypted record,
//! folds it into a per-location encrypted aggregate, and decides who may
//! decrypt what:
//!
//! - a reporter can decrypt its own readings and the aggregates it touched
//! - the owner hands managers the current aggregates of one or every location
//! - past reporters at a location can request its current aggregates
//!
//! Plaintext bookkeeping (report counts, alert counts, timestamps) is public.
//! All homomorphic work runs on the FHE executor configured at
//! [`NoiseMonitorContract::initialize`].
#![no_std]
#![allow(clippy::too_many_arguments)]

pub mod acl;
pub mod aggregation;
pub mod config;
pub mod errors;
pub mod events;
pub mod fhe;
pub mod locations;
pub mod records;
pub mod types;
pub mod validation;


pub use aggregation::{ALERT_THRESHOLD, NOISE_THRESHOLD};
pub use errors::NoiseError;
pub use types::{AggregateHandles, AggregatedData, LocationSummary, NoiseRecord, RecordMetadata};

use noise_common::{extend_instance_ttl, Handle};
use soroban_sdk::{contract, contractimpl, log, Address, BytesN, Env, Vec};

use crate::fhe::Fhe;

#[contract]
pub struct NoiseMonitorContract;

#[contractimpl]
impl NoiseMonitorContract {
    // ── Lifecycle ────────────────────────────────────────────────────────────

    /// One-time setup: records the owner and the FHE executor.
    pub fn initialize(env: Env, owner: Address, executor: Address) -> Result<(), NoiseError> {
        owner.require_auth();
        config::initialize(&env, &owner, &executor)?;
        events::publish_initialized(&env, owner, executor);
        Ok(())
    }

    pub fn get_owner(env: Env) -> Result<Address, NoiseError> {
        config::owner(&env)
    }

    pub fn get_executor(env: Env) -> Result<Address, NoiseError> {
        config::executor(&env)
    }

    pub fn version() -> u32 {
        1
    }

    // ── Submission ───────────────────────────────────────────────────────────

    /// Accepts one encrypted reading and returns its index in the reporter's
    /// record list.
    ///
    /// `decibel_input` and `duration_input` are handles produced by the
    /// executor's input endpoint for `reporter` and this contract, both
    /// covered by `proof`. `caller_asserted_exceeded` is the reporter's own
    /// claim that the reading is above [`NOISE_THRESHOLD`]; it only drives
    /// the plaintext alert counter.
    pub fn submit_noise(
        env: Env,
        reporter: Address,
        decibel_input: Handle,
        duration_input: Handle,
        proof: BytesN<32>,
        timestamp: u64,
        location_id: u64,
        caller_asserted_exceeded: bool,
    ) -> Result<u32, NoiseError> {
        reporter.require_auth();
        validation::validate_report_metadata(timestamp, location_id)?;

        let fhe = Fhe::connect(&env)?;
        let decibel = fhe.from_external(&reporter, &decibel_input, &proof);
        let duration = fhe.from_external(&reporter, &duration_input, &proof);

        let index = records::append(
            &env,
            &fhe,
            &reporter,
            decibel.clone(),
            duration.clone(),
            timestamp,
            location_id,
        )?;

        if locations::ensure_registered(&env, location_id) {
            log!(&env, "location registered", location_id);
        }

        let data = aggregation::merge(
            &env,
            &fhe,
            location_id,
            &reporter,
            &decibel,
            &duration,
            timestamp,
            caller_asserted_exceeded,
        );

        events::publish_noise_report_submitted(&env, reporter.clone(), location_id, timestamp, index);
        log!(
            &env,
            "noise report",
            reporter,
            location_id,
            index,
            data.total_reports
        );
        extend_instance_ttl(&env);
        Ok(index)
    }

    // ── Records ──────────────────────────────────────────────────────────────

    pub fn get_user_record_count(env: Env, user: Address) -> u32 {
        records::count(&env, &user)
    }

    pub fn get_user_record(env: Env, user: Address, index: u32) -> Result<RecordMetadata, NoiseError> {
        let record = records::get(&env, &user, index)?;
        Ok(RecordMetadata {
            timestamp: record.timestamp,
            location_id: record.location_id,
            reporter: record.reporter,
        })
    }

    /// Handle of the encrypted decibel level. Anyone may read the handle;
    /// decrypting it needs a grant.
    pub fn get_user_record_decibel(env: Env, user: Address, index: u32) -> Result<Handle, NoiseError> {
        Ok(records::get(&env, &user, index)?.decibel)
    }

    pub fn get_user_record_duration(env: Env, user: Address, index: u32) -> Result<Handle, NoiseError> {
        Ok(records::get(&env, &user, index)?.duration)
    }

    // ── Locations ────────────────────────────────────────────────────────────

    pub fn get_location_summary(env: Env, location_id: u64) -> LocationSummary {
        aggregation::summary(&env, location_id)
    }

    pub fn get_location_aggregate_public(
        env: Env,
        location_id: u64,
    ) -> Result<AggregateHandles, NoiseError> {
        aggregation::handles(&env, location_id)
    }

    /// Same handles as the public accessor, restricted to the owner and
    /// flagged managers.
    pub fn get_location_aggregated_data(
        env: Env,
        caller: Address,
        location_id: u64,
    ) -> Result<AggregateHandles, NoiseError> {
        caller.require_auth();
        acl::require_owner_or_manager(&env, &caller)?;
        aggregation::handles(&env, location_id)
    }

    pub fn get_all_location_ids(env: Env) -> Vec<u64> {
        locations::all(&env)
    }

    pub fn get_location_count(env: Env) -> u32 {
        locations::count(&env)
    }

    /// Asserted exceedances accumulated toward the next alert of a location.
    pub fn get_alert_progress(env: Env, location_id: u64) -> u32 {
        aggregation::alert_progress(&env, location_id)
    }

    // ── Access control ───────────────────────────────────────────────────────

    pub fn allow_manager(
        env: Env,
        caller: Address,
        manager: Address,
        location_id: u64,
    ) -> Result<(), NoiseError> {
        caller.require_auth();
        config::require_owner(&env, &caller)?;
        validation::validate_manager(&env, &manager)?;

        let fhe = Fhe::connect(&env)?;
        acl::grant_manager(&env, &fhe, location_id, &manager)?;
        events::publish_manager_authorization_changed(&env, manager, true);
        Ok(())
    }

    pub fn allow_manager_all_locations(
        env: Env,
        caller: Address,
        manager: Address,
    ) -> Result<(), NoiseError> {
        caller.require_auth();
        config::require_owner(&env, &caller)?;
        validation::validate_manager(&env, &manager)?;

        let fhe = Fhe::connect(&env)?;
        acl::grant_manager_all(&env, &fhe, &manager)?;
        events::publish_manager_authorization_changed(&env, manager, true);
        Ok(())
    }

    /// Clears the manager role. Ciphertext grants issued earlier stay valid.
    pub fn revoke_manager(env: Env, caller: Address, manager: Address) -> Result<(), NoiseError> {
        caller.require_auth();
        config::require_owner(&env, &caller)?;
        validation::validate_manager(&env, &manager)?;

        acl::revoke_manager_role(&env, &manager);
        events::publish_manager_authorization_changed(&env, manager, false);
        Ok(())
    }

    pub fn is_manager(env: Env, account: Address) -> bool {
        acl::is_manager(&env, &account)
    }

    /// Grants a past reporter at `location_id` its current aggregates.
    pub fn authorize_self_for_location(
        env: Env,
        caller: Address,
        location_id: u64,
    ) -> Result<(), NoiseError> {
        caller.require_auth();
        let fhe = Fhe::connect(&env)?;
        acl::authorize_self(&env, &fhe, location_id, &caller)?;
        events::publish_self_authorized(&env, caller, location_id);
        Ok(())
    }

    pub fn transfer_ownership(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), NoiseError> {
        caller.require_auth();
        config::require_owner(&env, &caller)?;
        validation::validate_new_owner(&env, &new_owner)?;

        let previous = config::set_owner(&env, &new_owner)?;
        events::publish_ownership_transferred(&env, previous, new_owner);
        Ok(())
    }
}
