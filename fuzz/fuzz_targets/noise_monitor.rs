#![no_main]

use arbitrary::Arbitrary;
use fhe_executor::{FheExecutorContract, FheExecutorContractClient};
use libfuzzer_sys::fuzz_target;
use noise_monitor::{NoiseMonitorContract, NoiseMonitorContractClient, ALERT_THRESHOLD};
use soroban_sdk::{testutils::Address as _, testutils::Ledger, vec, Address, Env};

/// Actions over every mutating entry point.
///
/// Location ids are folded into a small pool so registrations collide.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Submit {
        decibel: u8,
        duration: u8,
        timestamp: u32,
        location: u8,
        asserted: bool,
    },
    AllowManager { location: u8 },
    AllowManagerAll,
    RevokeManager,
    AuthorizeSelf { location: u8 },
    AdvanceSequence { delta: u8 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();

    let owner = Address::generate(&env);
    let executor_id = env.register(FheExecutorContract, ());
    let fhe = FheExecutorContractClient::new(&env, &executor_id);
    let contract_id = env.register(NoiseMonitorContract, ());
    let client = NoiseMonitorContractClient::new(&env, &contract_id);

    if client.try_initialize(&owner, &executor_id).is_err() {
        return;
    }

    let users: Vec<Address> = (0..4).map(|_| Address::generate(&env)).collect();
    let mut accepted = 0u64;

    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::Submit {
                decibel,
                duration,
                timestamp,
                location,
                asserted,
            } => {
                let input = fhe.encrypt_input(
                    caller,
                    &contract_id,
                    &vec![&env, u32::from(decibel), u32::from(duration)],
                );
                // Zero timestamps and location 0 are kept to hit the rejection path.
                let location_id = u64::from(location % 5);
                let result = client.try_submit_noise(
                    caller,
                    &input.handles.get(0).unwrap(),
                    &input.handles.get(1).unwrap(),
                    &input.proof,
                    &u64::from(timestamp),
                    &location_id,
                    &asserted,
                );
                let valid = timestamp > 0 && location_id > 0;
                assert_eq!(
                    result.is_ok(),
                    valid,
                    "INVARIANT VIOLATION: submission acceptance mismatch"
                );
                if valid {
                    accepted += 1;
                }
            }
            FuzzAction::AllowManager { location } => {
                let _ = client.try_allow_manager(&owner, caller, &u64::from(location % 5));
            }
            FuzzAction::AllowManagerAll => {
                let _ = client.try_allow_manager_all_locations(&owner, caller);
            }
            FuzzAction::RevokeManager => {
                let _ = client.try_revoke_manager(&owner, caller);
            }
            FuzzAction::AuthorizeSelf { location } => {
                let _ = client.try_authorize_self_for_location(caller, &u64::from(location % 5));
            }
            FuzzAction::AdvanceSequence { delta } => {
                let seq = env.ledger().sequence().saturating_add(u32::from(delta % 8));
                env.ledger().set_sequence_number(seq);
            }
        }

        // ── Post-action invariant checks ──
        let ids = client.get_all_location_ids();
        let mut reports = 0u64;
        for (pos, id) in ids.iter().enumerate() {
            assert!(id != 0, "INVARIANT VIOLATION: location 0 registered");
            for earlier in ids.iter().take(pos) {
                assert!(earlier != id, "INVARIANT VIOLATION: duplicate location");
            }
            let summary = client.get_location_summary(&id);
            assert!(summary.total_reports > 0, "INVARIANT VIOLATION: empty location");
            assert!(
                client.get_alert_progress(&id) < ALERT_THRESHOLD,
                "INVARIANT VIOLATION: alert progress not reset"
            );
            reports += summary.total_reports;
        }
        assert_eq!(reports, accepted, "INVARIANT VIOLATION: report accounting");

        let records: u64 = users
            .iter()
            .map(|u| u64::from(client.get_user_record_count(u)))
            .sum();
        assert_eq!(records, accepted, "INVARIANT VIOLATION: record accounting");
    }
});
