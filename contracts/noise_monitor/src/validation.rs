use soroban_sdk::{Address, Env};

use crate::errors::NoiseError;

/// Validate the plaintext metadata of a noise report.
/// Both the timestamp and the location id must be strictly positive.
pub fn validate_report_metadata(timestamp: u64, location_id: u64) -> Result<(), NoiseError> {
    if timestamp == 0 || location_id == 0 {
        return Err(NoiseError::InvalidInput);
    }
    Ok(())
}

/// The contract itself can never act as a manager.
pub fn validate_manager(env: &Env, manager: &Address) -> Result<(), NoiseError> {
    if *manager == env.current_contract_address() {
        return Err(NoiseError::InvalidManagerAddress);
    }
    Ok(())
}

/// Ownership cannot be handed to the contract itself, which has no key to
/// authorize owner calls with.
pub fn validate_new_owner(env: &Env, new_owner: &Address) -> Result<(), NoiseError> {
    if *new_owner == env.current_contract_address() {
        return Err(NoiseError::InvalidNewOwner);
    }
    Ok(())
}
