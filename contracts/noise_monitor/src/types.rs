use noise_common::Handle;
use soroban_sdk::{contracttype, Address};

/// Storage keys.
///
/// `Owner` and `Executor` live in instance storage, everything else in
/// persistent storage.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Owner,
    Executor,
    Manager(Address),
    RecordCount(Address),
    Record(Address, u32),
    LocationIds,
    LocationKnown(u64),
    Aggregate(u64),
}

/// One noise submission. Immutable once written.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NoiseRecord {
    pub decibel: Handle,
    pub duration: Handle,
    pub timestamp: u64,
    pub location_id: u64,
    pub reporter: Address,
    pub is_processed: bool,
}

/// Per-location accumulator.
///
/// `exceeded_count_for_alert` is driven by the reporter's own claim that a
/// reading exceeded the threshold, not by the encrypted comparison behind
/// `total_exceeded_count`. The two can disagree if a client lies.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AggregatedData {
    pub total_reports: u64,
    pub total_exceeded_count: Handle,
    pub total_duration: Handle,
    pub last_updated: u64,
    pub alert_count: u64,
    pub exceeded_count_for_alert: u32,
}

/// Plaintext view of a record.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordMetadata {
    pub timestamp: u64,
    pub location_id: u64,
    pub reporter: Address,
}

/// Plaintext view of a location aggregate.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LocationSummary {
    pub total_reports: u64,
    pub last_updated: u64,
    pub alert_count: u64,
}

/// Current handles of a location's encrypted aggregates.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AggregateHandles {
    pub exceeded_count: Handle,
    pub duration: Handle,
}
