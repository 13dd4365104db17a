//! Ciphertext store and handle minting.
//!
//! This executor is the reference coprocessor used for local networks and
//! tests: the value behind a handle is held in the executor's own storage and
//! is only ever released through [`crate::FheExecutorContract::decrypt`].
//! Consumer contracts see nothing but handles.

use noise_common::{extend_instance_ttl, extend_persistent_ttl, CiphertextKind, Handle};
use soroban_sdk::{contracttype, symbol_short, Bytes, Env, Symbol};

use crate::FheError;

const CT_CTR: Symbol = symbol_short!("CT_CTR");
const CT: Symbol = symbol_short!("CT");

/// Largest plaintext representable in the 16-bit domain.
pub const UINT16_MAX: u32 = 0xFFFF;

/// Operation tags mixed into the handle preimage.
#[derive(Clone, Copy)]
#[repr(u8)]
pub enum OpTag {
    Input = 1,
    Trivial = 2,
    Add = 3,
    Gt = 4,
    Select = 5,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ciphertext {
    pub kind: CiphertextKind,
    pub value: u32,
}

/// Stores `value` under a freshly minted handle and returns the handle.
pub fn store(env: &Env, kind: CiphertextKind, value: u32, op: OpTag) -> Handle {
    let counter: u64 = env.storage().instance().get(&CT_CTR).unwrap_or(0);
    let next = counter.wrapping_add(1);
    env.storage().instance().set(&CT_CTR, &next);
    extend_instance_ttl(env);

    let mut preimage = [0u8; 10];
    preimage[..8].copy_from_slice(&next.to_be_bytes());
    preimage[8] = kind as u8;
    preimage[9] = op as u8;
    let handle: Handle = env
        .crypto()
        .sha256(&Bytes::from_slice(env, &preimage))
        .into();

    let key = (CT, handle.clone());
    env.storage()
        .persistent()
        .set(&key, &Ciphertext { kind, value });
    extend_persistent_ttl(env, &key);
    handle
}

/// Loads the ciphertext behind `handle`.
pub fn load(env: &Env, handle: &Handle) -> Result<Ciphertext, FheError> {
    env.storage()
        .persistent()
        .get(&(CT, handle.clone()))
        .ok_or(FheError::UnknownHandle)
}

/// Loads the ciphertext behind `handle` and checks its plaintext type.
pub fn load_kind(
    env: &Env,
    handle: &Handle,
    kind: CiphertextKind,
) -> Result<Ciphertext, FheError> {
    let ct = load(env, handle)?;
    if ct.kind != kind {
        return Err(FheError::KindMismatch);
    }
    Ok(ct)
}
