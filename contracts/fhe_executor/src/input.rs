//! External encrypted inputs.
//!
//! The off-chain encryption client uploads a batch of values for a specific
//! `(user, contract)` pair and receives one handle per value plus a single
//! proof. The proof is the SHA-256 of the pair and the handles, and its
//! binding is recorded here so that [`verify`] can later check that a handle
//! presented by `contract` on behalf of `user` really came from that upload.

use noise_common::{extend_persistent_ttl, CiphertextKind, EncryptedInput, Handle};
use soroban_sdk::{contracttype, symbol_short, xdr::ToXdr, Address, Bytes, BytesN, Env, Symbol, Vec};

use crate::ciphertext::{self, OpTag, UINT16_MAX};
use crate::FheError;

const INPUT: Symbol = symbol_short!("INPUT");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InputBinding {
    pub user: Address,
    pub contract: Address,
    pub handles: Vec<Handle>,
}

fn proof_for(env: &Env, user: &Address, contract: &Address, handles: &Vec<Handle>) -> BytesN<32> {
    let mut preimage = user.clone().to_xdr(env);
    preimage.append(&contract.clone().to_xdr(env));
    for handle in handles.iter() {
        preimage.append(&Bytes::from(handle));
    }
    env.crypto().sha256(&preimage).into()
}

/// Encrypts `values` as 16-bit ciphertexts bound to `(user, contract)`.
pub fn encrypt(
    env: &Env,
    user: &Address,
    contract: &Address,
    values: &Vec<u32>,
) -> Result<EncryptedInput, FheError> {
    if values.is_empty() {
        return Err(FheError::PlaintextOutOfRange);
    }
    let mut handles = Vec::new(env);
    for value in values.iter() {
        if value > UINT16_MAX {
            return Err(FheError::PlaintextOutOfRange);
        }
        handles.push_back(ciphertext::store(env, CiphertextKind::Uint16, value, OpTag::Input));
    }

    let proof = proof_for(env, user, contract, &handles);
    let key = (INPUT, proof.clone());
    env.storage().persistent().set(
        &key,
        &InputBinding {
            user: user.clone(),
            contract: contract.clone(),
            handles: handles.clone(),
        },
    );
    extend_persistent_ttl(env, &key);

    Ok(EncryptedInput { handles, proof })
}

/// Checks that `handle` was uploaded by `user` for `contract` under `proof`.
pub fn verify(
    env: &Env,
    contract: &Address,
    user: &Address,
    handle: &Handle,
    proof: &BytesN<32>,
) -> Result<(), FheError> {
    let binding: InputBinding = env
        .storage()
        .persistent()
        .get(&(INPUT, proof.clone()))
        .ok_or(FheError::InvalidProof)?;

    if binding.user != *user || binding.contract != *contract || !binding.handles.contains(handle) {
        return Err(FheError::InvalidProof);
    }
    Ok(())
}
