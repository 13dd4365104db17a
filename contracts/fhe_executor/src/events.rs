#![allow(deprecated)] // events().publish migration tracked separately

use noise_common::Handle;
use soroban_sdk::{contracttype, symbol_short, Address, Env};

/// Fired when a persistent allowance is recorded.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AllowedEvent {
    pub handle: Handle,
    pub account: Address,
    pub granted_by: Address,
}

/// Fired when an authorized holder obtains the plaintext behind a handle.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecryptedEvent {
    pub handle: Handle,
    pub requester: Address,
    pub timestamp: u64,
}

pub fn publish_allowed(env: &Env, handle: Handle, account: Address, granted_by: Address) {
    env.events().publish(
        (symbol_short!("FHE"), symbol_short!("ALLOWED"), account.clone()),
        AllowedEvent {
            handle,
            account,
            granted_by,
        },
    );
}

pub fn publish_decrypted(env: &Env, handle: Handle, requester: Address) {
    env.events().publish(
        (symbol_short!("FHE"), symbol_short!("DECRYPT"), requester.clone()),
        DecryptedEvent {
            handle,
            requester,
            timestamp: env.ledger().timestamp(),
        },
    );
}
