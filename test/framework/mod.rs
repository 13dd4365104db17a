//! # Noise Monitor Testing Framework
//!
//! Reusable harness for property-based tests and invariant checks over the
//! noise monitor and the FHE executor it computes with.
//!
//! ## Architecture
//!
//! ```text
//! test/framework/
//! ├── mod.rs         : TestEnv, NoiseTestHarness, snapshots
//! ├── generators.rs  : proptest strategies for readings and action sequences
//! └── invariants.rs  : state and transition invariants
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use test_framework::{NoiseTestHarness, TestEnv};
//!
//! let mut env = TestEnv::new();
//! let mut harness = NoiseTestHarness::new(&mut env);
//! let alice = harness.env.generate_address();
//! harness.submit(&alice, &Reading::new(75, 30, 1_000, 1, false));
//! ```

extern crate std;

pub mod generators;

use fhe_executor::{FheExecutorContract, FheExecutorContractClient};
use noise_common::Handle;
use noise_monitor::{LocationSummary, NoiseError, NoiseMonitorContract, NoiseMonitorContractClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    vec, Address, Env,
};

use crate::generators::{NoiseAction, Reading};

// ── Core Test Environment ────────────────────────────────────────────────────

/// Wraps the Soroban `Env` with address management and ledger control.
pub struct TestEnv {
    pub env: Env,
    generated_addresses: std::vec::Vec<Address>,
}

impl TestEnv {
    /// Create a new test environment with all auth mocked.
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        Self {
            env,
            generated_addresses: std::vec::Vec::new(),
        }
    }

    pub fn generate_address(&mut self) -> Address {
        let addr = Address::generate(&self.env);
        self.generated_addresses.push(addr.clone());
        addr
    }

    /// Generate `n` distinct addresses.
    pub fn generate_addresses(&mut self, n: usize) -> std::vec::Vec<Address> {
        (0..n).map(|_| self.generate_address()).collect()
    }

    /// Advance the ledger sequence, which expires transient ciphertext
    /// allowances.
    pub fn advance_sequence(&self, delta: u32) {
        let current = self.env.ledger().sequence();
        self.env
            .ledger()
            .set_sequence_number(current.saturating_add(delta));
    }

    /// Every address generated so far, in generation order.
    pub fn addresses(&self) -> &[Address] {
        &self.generated_addresses
    }

    pub fn sequence(&self) -> u32 {
        self.env.ledger().sequence()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

// ── Noise Monitor Harness ────────────────────────────────────────────────────

/// Executor and noise monitor deployed and wired together, with an owner.
pub struct NoiseTestHarness<'a> {
    pub env: &'a mut TestEnv,
    pub client: NoiseMonitorContractClient<'static>,
    pub fhe: FheExecutorContractClient<'static>,
    pub contract_id: Address,
    pub owner: Address,
}

impl<'a> NoiseTestHarness<'a> {
    pub fn new(env: &'a mut TestEnv) -> Self {
        let executor_id = env.env.register(FheExecutorContract, ());
        let fhe = FheExecutorContractClient::new(&env.env, &executor_id);

        let contract_id = env.env.register(NoiseMonitorContract, ());
        let client = NoiseMonitorContractClient::new(&env.env, &contract_id);
        let owner = env.generate_address();
        client.initialize(&owner, &executor_id);

        Self {
            env,
            client,
            fhe,
            contract_id,
            owner,
        }
    }

    /// Encrypts `reading` for `reporter` and submits it, returning the
    /// record index.
    pub fn submit(&self, reporter: &Address, reading: &Reading) -> u32 {
        self.try_submit(reporter, reading)
            .unwrap_or_else(|err| panic!("submit_noise failed: {:?}", err))
    }

    /// Like [`Self::submit`], surfacing contract errors instead of panicking.
    ///
    /// Failures inside the executor surface as `None`.
    pub fn try_submit(&self, reporter: &Address, reading: &Reading) -> Result<u32, Option<NoiseError>> {
        let input = self.fhe.encrypt_input(
            reporter,
            &self.contract_id,
            &vec![&self.env.env, reading.decibel, reading.duration],
        );
        let decibel = input.handles.get(0).unwrap();
        let duration = input.handles.get(1).unwrap();

        match self.client.try_submit_noise(
            reporter,
            &decibel,
            &duration,
            &input.proof,
            &reading.timestamp,
            &reading.location_id,
            &reading.asserted_exceeded,
        ) {
            Ok(Ok(index)) => Ok(index),
            Err(Ok(err)) => Err(Some(err)),
            _ => Err(None),
        }
    }

    pub fn decrypt(&self, requester: &Address, handle: &Handle) -> Option<u32> {
        match self.fhe.try_decrypt(requester, handle) {
            Ok(Ok(value)) => Some(value),
            _ => None,
        }
    }

    pub fn record_count(&self, user: &Address) -> u32 {
        self.client.get_user_record_count(user)
    }

    pub fn location_ids(&self) -> std::vec::Vec<u64> {
        self.client.get_all_location_ids().iter().collect()
    }

    pub fn summary(&self, location_id: u64) -> LocationSummary {
        self.client.get_location_summary(&location_id)
    }

    /// Applies one generated action against the pool of `users`, with the
    /// owner acting for administrative actions.
    pub fn apply(&self, action: &NoiseAction, users: &[Address]) -> ActionOutcome {
        let pick = |i: usize| users[i % users.len()].clone();
        let result = match action {
            NoiseAction::Submit { user_index, reading } => {
                self.try_submit(&pick(*user_index), reading).map(|_| ())
            }
            NoiseAction::AllowManager {
                manager_index,
                location_id,
            } => lift(self.client.try_allow_manager(
                &self.owner,
                &pick(*manager_index),
                location_id,
            )),
            NoiseAction::AllowManagerAll { manager_index } => lift(
                self.client
                    .try_allow_manager_all_locations(&self.owner, &pick(*manager_index)),
            ),
            NoiseAction::RevokeManager { manager_index } => {
                lift(self.client.try_revoke_manager(&self.owner, &pick(*manager_index)))
            }
            NoiseAction::AuthorizeSelf {
                user_index,
                location_id,
            } => lift(
                self.client
                    .try_authorize_self_for_location(&pick(*user_index), location_id),
            ),
            NoiseAction::AdvanceSequence { delta } => {
                self.env.advance_sequence(*delta);
                Ok(())
            }
        };

        match result {
            Ok(()) => ActionOutcome::Ok,
            Err(Some(err)) => ActionOutcome::ExpectedError(err as u32),
            Err(None) => ActionOutcome::UnexpectedError(std::format!("{:?}", action)),
        }
    }

    /// Snapshot of all observable plaintext state for invariant checking.
    pub fn snapshot(&self, reporters: &[Address]) -> NoiseSnapshot {
        let location_ids = self.location_ids();
        let locations = location_ids
            .iter()
            .map(|id| LocationState {
                location_id: *id,
                summary: self.summary(*id),
                alert_progress: self.client.get_alert_progress(id),
            })
            .collect();
        let record_counts = reporters
            .iter()
            .map(|r| (r.clone(), self.record_count(r)))
            .collect();

        NoiseSnapshot {
            location_ids,
            locations,
            record_counts,
        }
    }
}

fn lift<E, C>(result: Result<Result<(), C>, Result<NoiseError, E>>) -> Result<(), Option<NoiseError>> {
    match result {
        Ok(Ok(())) => Ok(()),
        Err(Ok(err)) => Err(Some(err)),
        _ => Err(None),
    }
}

/// Plaintext state of one location.
#[derive(Debug, Clone)]
pub struct LocationState {
    pub location_id: u64,
    pub summary: LocationSummary,
    pub alert_progress: u32,
}

/// Immutable snapshot of noise monitor state at a point in time.
#[derive(Debug, Clone)]
pub struct NoiseSnapshot {
    pub location_ids: std::vec::Vec<u64>,
    pub locations: std::vec::Vec<LocationState>,
    pub record_counts: std::vec::Vec<(Address, u32)>,
}

impl NoiseSnapshot {
    /// Sum of the records of every tracked reporter.
    pub fn total_records(&self) -> u64 {
        self.record_counts.iter().map(|(_, c)| u64::from(*c)).sum()
    }

    /// Sum of `total_reports` over every registered location.
    pub fn total_reports(&self) -> u64 {
        self.locations.iter().map(|l| l.summary.total_reports).sum()
    }

    pub fn location(&self, location_id: u64) -> Option<&LocationState> {
        self.locations.iter().find(|l| l.location_id == location_id)
    }

    pub fn record_count(&self, user: &Address) -> u32 {
        self.record_counts
            .iter()
            .find(|(a, _)| a == user)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }
}

// ── Test Outcome Tracking ────────────────────────────────────────────────────

/// Result of a single test action.
#[derive(Debug, Clone)]
pub enum ActionOutcome {
    /// The action succeeded.
    Ok,
    /// The action failed with a contract error code.
    ExpectedError(u32),
    /// The action failed outside the contract's error space.
    UnexpectedError(std::string::String),
}
