#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{contracttype, symbol_short, Address, Env};

/// Event published when the contract is initialized.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub executor: Address,
    pub timestamp: u64,
}

/// Event published for every accepted noise report.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NoiseReportSubmittedEvent {
    pub reporter: Address,
    pub location_id: u64,
    pub timestamp: u64,
    pub record_index: u32,
}

/// Event published when a location reaches the alert threshold of asserted
/// exceedances.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NoiseAlertEvent {
    pub location_id: u64,
    pub timestamp: u64,
    pub total_reports: u64,
}

/// Event published when a manager role is granted or revoked.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ManagerAuthorizationChangedEvent {
    pub manager: Address,
    pub authorized: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipTransferredEvent {
    pub previous_owner: Address,
    pub new_owner: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SelfAuthorizedEvent {
    pub caller: Address,
    pub location_id: u64,
}

pub fn publish_initialized(env: &Env, owner: Address, executor: Address) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        owner,
        executor,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when a noise report is accepted.
/// The topic carries the reporter so indexers can follow a single resident.
pub fn publish_noise_report_submitted(
    env: &Env,
    reporter: Address,
    location_id: u64,
    timestamp: u64,
    record_index: u32,
) {
    let topics = (symbol_short!("NOISE_RPT"), reporter.clone());
    let data = NoiseReportSubmittedEvent {
        reporter,
        location_id,
        timestamp,
        record_index,
    };
    env.events().publish(topics, data);
}

pub fn publish_noise_alert(env: &Env, location_id: u64, timestamp: u64, total_reports: u64) {
    let topics = (symbol_short!("ALERT"), location_id);
    let data = NoiseAlertEvent {
        location_id,
        timestamp,
        total_reports,
    };
    env.events().publish(topics, data);
}

pub fn publish_manager_authorization_changed(env: &Env, manager: Address, authorized: bool) {
    let topics = (symbol_short!("MGR_AUTH"), manager.clone());
    let data = ManagerAuthorizationChangedEvent {
        manager,
        authorized,
    };
    env.events().publish(topics, data);
}

pub fn publish_ownership_transferred(env: &Env, previous_owner: Address, new_owner: Address) {
    let topics = (symbol_short!("OWN_XFER"),);
    let data = OwnershipTransferredEvent {
        previous_owner,
        new_owner,
    };
    env.events().publish(topics, data);
}

pub fn publish_self_authorized(env: &Env, caller: Address, location_id: u64) {
    let topics = (symbol_short!("SELF_AUTH"), caller.clone());
    let data = SelfAuthorizedEvent {
        caller,
        location_id,
    };
    env.events().publish(topics, data);
}
