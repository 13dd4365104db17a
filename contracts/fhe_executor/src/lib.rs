//! # FHE Executor Contract
//!
//! Reference implementation of the platform's encrypted-compute capability.
//! Consumer contracts reach it through [`noise_common::FheExecutorClient`];
//! the off-chain client SDK uses [`FheExecutorContract::encrypt_input`] and
//! [`FheExecutorContract::decrypt`].
//!
//! ## Operand rules
//! | Check                                 | Error          |
//! |---------------------------------------|----------------|
//! | handle exists                         | `UnknownHandle`|
//! | handle has the expected kind          | `KindMismatch` |
//! | caller holds an allowance on operand  | `NotAllowed`   |
//!
//! Results are transiently allowed to the caller. Decryption requires a
//! persistent allowance.
#![no_std]

pub mod acl;
pub mod ciphertext;
pub mod events;
pub mod input;


use noise_common::{CiphertextKind, EncryptedInput, Handle};
use soroban_sdk::{contract, contracterror, contractimpl, Address, BytesN, Env, Vec};

use crate::ciphertext::{OpTag, UINT16_MAX};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum FheError {
    UnknownHandle = 1,
    KindMismatch = 2,
    NotAllowed = 3,
    InvalidProof = 4,
    PlaintextOutOfRange = 5,
}

#[contract]
pub struct FheExecutorContract;

#[contractimpl]
impl FheExecutorContract {
    // ── Client-facing ────────────────────────────────────────────────────────

    /// Encrypts `values` for use by `user` in calls to `contract`.
    pub fn encrypt_input(
        env: Env,
        user: Address,
        contract: Address,
        values: Vec<u32>,
    ) -> Result<EncryptedInput, FheError> {
        user.require_auth();
        input::encrypt(&env, &user, &contract, &values)
    }

    /// Returns the plaintext behind `handle` to a holder of a persistent
    /// allowance.
    pub fn decrypt(env: Env, requester: Address, handle: Handle) -> Result<u32, FheError> {
        requester.require_auth();
        let ct = ciphertext::load(&env, &handle)?;
        if !acl::is_allowed(&env, &handle, &requester) {
            return Err(FheError::NotAllowed);
        }
        events::publish_decrypted(&env, handle, requester);
        Ok(ct.value)
    }

    // ── Contract-facing ──────────────────────────────────────────────────────

    pub fn from_external(
        env: Env,
        caller: Address,
        user: Address,
        handle: Handle,
        proof: BytesN<32>,
    ) -> Result<Handle, FheError> {
        caller.require_auth();
        input::verify(&env, &caller, &user, &handle, &proof)?;
        ciphertext::load_kind(&env, &handle, CiphertextKind::Uint16)?;
        acl::allow_transient(&env, &handle, &caller);
        Ok(handle)
    }

    pub fn trivial_encrypt(env: Env, caller: Address, value: u32) -> Result<Handle, FheError> {
        caller.require_auth();
        if value > UINT16_MAX {
            return Err(FheError::PlaintextOutOfRange);
        }
        Ok(produce(&env, &caller, CiphertextKind::Uint16, value, OpTag::Trivial))
    }

    pub fn add(env: Env, caller: Address, lhs: Handle, rhs: Handle) -> Result<Handle, FheError> {
        caller.require_auth();
        let a = operand(&env, &caller, &lhs, CiphertextKind::Uint16)?;
        let b = operand(&env, &caller, &rhs, CiphertextKind::Uint16)?;
        let sum = a.wrapping_add(b) & UINT16_MAX;
        Ok(produce(&env, &caller, CiphertextKind::Uint16, sum, OpTag::Add))
    }

    pub fn gt_scalar(
        env: Env,
        caller: Address,
        lhs: Handle,
        scalar: u32,
    ) -> Result<Handle, FheError> {
        caller.require_auth();
        let a = operand(&env, &caller, &lhs, CiphertextKind::Uint16)?;
        let flag = u32::from(a > scalar);
        Ok(produce(&env, &caller, CiphertextKind::Bool, flag, OpTag::Gt))
    }

    pub fn select(
        env: Env,
        caller: Address,
        cond: Handle,
        if_true: Handle,
        if_false: Handle,
    ) -> Result<Handle, FheError> {
        caller.require_auth();
        let flag = operand(&env, &caller, &cond, CiphertextKind::Bool)?;
        // Both branches are loaded and checked regardless of the condition.
        let t = ciphertext::load(&env, &if_true)?;
        let f = ciphertext::load(&env, &if_false)?;
        if t.kind != f.kind {
            return Err(FheError::KindMismatch);
        }
        acl::require_usable(&env, &if_true, &caller)?;
        acl::require_usable(&env, &if_false, &caller)?;

        let picked = if flag == 1 { t.value } else { f.value };
        Ok(produce(&env, &caller, t.kind, picked, OpTag::Select))
    }

    pub fn allow(env: Env, caller: Address, handle: Handle, account: Address) -> Result<(), FheError> {
        caller.require_auth();
        ciphertext::load(&env, &handle)?;
        acl::require_usable(&env, &handle, &caller)?;
        if acl::allow(&env, &handle, &account) {
            events::publish_allowed(&env, handle, account, caller);
        }
        Ok(())
    }

    pub fn is_allowed(env: Env, handle: Handle, account: Address) -> bool {
        acl::is_allowed(&env, &handle, &account)
    }
}

fn operand(
    env: &Env,
    caller: &Address,
    handle: &Handle,
    kind: CiphertextKind,
) -> Result<u32, FheError> {
    let ct = ciphertext::load_kind(env, handle, kind)?;
    acl::require_usable(env, handle, caller)?;
    Ok(ct.value)
}

fn produce(env: &Env, caller: &Address, kind: CiphertextKind, value: u32, op: OpTag) -> Handle {
    let handle = ciphertext::store(env, kind, value, op);
    acl::allow_transient(env, &handle, caller);
    handle
}
