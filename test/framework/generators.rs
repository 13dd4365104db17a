//! # Property-Based Test Generators
//!
//! Composable `proptest` strategies for noise readings and action sequences.
//!
//! Decibel levels are biased toward the exceedance threshold (70/71) so the
//! encrypted comparison sees both outcomes often. Plaintext metadata is
//! strictly positive unless a strategy says otherwise.

extern crate std;

use noise_monitor::NOISE_THRESHOLD;
use proptest::prelude::*;
use std::vec::Vec;

/// Upper bound of the decibel range the off-chain client accepts.
pub const MAX_DECIBEL: u32 = 120;

// ── Scalar Generators ────────────────────────────────────────────────────────

/// Decibel levels in `0..=MAX_DECIBEL`, ~30% at the threshold boundary.
pub fn decibel_strategy() -> impl Strategy<Value = u32> {
    prop_oneof![
        1 => Just(NOISE_THRESHOLD),
        1 => Just(NOISE_THRESHOLD + 1),
        1 => prop_oneof![Just(0u32), Just(MAX_DECIBEL)],
        7 => 0u32..=MAX_DECIBEL,
    ]
}

/// Durations in minutes, kept small so sums stay below the 16-bit domain.
pub fn duration_strategy() -> impl Strategy<Value = u32> {
    prop_oneof![
        1 => Just(0u32),
        1 => Just(1u32),
        8 => 1u32..=240u32,
    ]
}

pub fn timestamp_strategy() -> impl Strategy<Value = u64> {
    prop_oneof![
        1 => Just(1u64),
        8 => 1u64..=2_000_000_000u64,
        1 => Just(u64::MAX),
    ]
}

/// Location ids from a small pool so collisions are frequent.
pub fn location_id_strategy(pool: u64) -> impl Strategy<Value = u64> {
    1u64..=pool.max(1)
}

/// `(timestamp, location_id)` pairs with at least one zero.
pub fn invalid_metadata_strategy() -> impl Strategy<Value = (u64, u64)> {
    prop_oneof![
        (Just(0u64), 1u64..=100u64),
        (1u64..=2_000_000_000u64, Just(0u64)),
        Just((0u64, 0u64)),
    ]
}

// ── Readings ─────────────────────────────────────────────────────────────────

/// Plaintext form of one submission before client-side encryption.
#[derive(Debug, Clone)]
pub struct Reading {
    pub decibel: u32,
    pub duration: u32,
    pub timestamp: u64,
    pub location_id: u64,
    pub asserted_exceeded: bool,
}

impl Reading {
    pub fn new(decibel: u32, duration: u32, timestamp: u64, location_id: u64, asserted_exceeded: bool) -> Self {
        Self {
            decibel,
            duration,
            timestamp,
            location_id,
            asserted_exceeded,
        }
    }

    pub fn exceeds(&self) -> bool {
        self.decibel > NOISE_THRESHOLD
    }
}

/// Valid readings. The asserted flag is drawn independently of the decibel
/// level, like an unchecked client would send it.
pub fn reading_strategy(location_pool: u64) -> impl Strategy<Value = Reading> {
    (
        decibel_strategy(),
        duration_strategy(),
        timestamp_strategy(),
        location_id_strategy(location_pool),
        any::<bool>(),
    )
        .prop_map(|(decibel, duration, timestamp, location_id, asserted)| {
            Reading::new(decibel, duration, timestamp, location_id, asserted)
        })
}

/// Readings for a single location.
pub fn readings_at(location_id: u64, max_len: usize) -> impl Strategy<Value = Vec<Reading>> {
    prop::collection::vec(
        (decibel_strategy(), duration_strategy(), any::<bool>()),
        1..=max_len,
    )
    .prop_map(move |items| {
        items
            .into_iter()
            .enumerate()
            .map(|(i, (decibel, duration, asserted))| {
                Reading::new(decibel, duration, 1_000 + i as u64, location_id, asserted)
            })
            .collect()
    })
}

// ── Action Generators ────────────────────────────────────────────────────────

/// Actions over the public surface. `*_index` fields select from a pool of
/// test users (modular indexing); administrative actions run as the owner.
#[derive(Debug, Clone)]
pub enum NoiseAction {
    Submit { user_index: usize, reading: Reading },
    AllowManager { manager_index: usize, location_id: u64 },
    AllowManagerAll { manager_index: usize },
    RevokeManager { manager_index: usize },
    AuthorizeSelf { user_index: usize, location_id: u64 },
    AdvanceSequence { delta: u32 },
}

/// Submissions dominate; grant management is rarer.
pub fn noise_action_strategy(num_users: usize, location_pool: u64) -> impl Strategy<Value = NoiseAction> {
    let user_idx = 0..num_users;

    prop_oneof![
        40 => (user_idx.clone(), reading_strategy(location_pool))
            .prop_map(|(u, r)| NoiseAction::Submit { user_index: u, reading: r }),
        10 => (user_idx.clone(), location_id_strategy(location_pool))
            .prop_map(|(u, l)| NoiseAction::AllowManager { manager_index: u, location_id: l }),
        5 => user_idx.clone().prop_map(|u| NoiseAction::AllowManagerAll { manager_index: u }),
        5 => user_idx.clone().prop_map(|u| NoiseAction::RevokeManager { manager_index: u }),
        10 => (user_idx, location_id_strategy(location_pool))
            .prop_map(|(u, l)| NoiseAction::AuthorizeSelf { user_index: u, location_id: l }),
        5 => (1u32..=3u32).prop_map(|d| NoiseAction::AdvanceSequence { delta: d }),
    ]
}

/// Sequences of 1 to `max_len` actions.
pub fn noise_action_sequence(
    num_users: usize,
    location_pool: u64,
    max_len: usize,
) -> impl Strategy<Value = Vec<NoiseAction>> {
    prop::collection::vec(noise_action_strategy(num_users, location_pool), 1..=max_len)
}
