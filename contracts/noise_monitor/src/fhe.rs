//! Thin wrapper over the executor client that always acts as this contract.
//!
//! Every call here returns a fresh handle. Anything this contract wants to
//! touch again in a later transaction has to go through [`Fhe::allow_this`].
//! Executor failures trap, which reverts the surrounding transaction.

use noise_common::{FheExecutorClient, Handle};
use soroban_sdk::{Address, BytesN, Env};

use crate::config;
use crate::errors::NoiseError;

pub struct Fhe<'a> {
    this: Address,
    executor: FheExecutorClient<'a>,
}

impl<'a> Fhe<'a> {
    /// Binds to the executor recorded at initialization.
    pub fn connect(env: &'a Env) -> Result<Self, NoiseError> {
        let executor = config::executor(env)?;
        Ok(Self {
            this: env.current_contract_address(),
            executor: FheExecutorClient::new(env, &executor),
        })
    }

    /// Accepts an externally encrypted `user` input.
    pub fn from_external(&self, user: &Address, input: &Handle, proof: &BytesN<32>) -> Handle {
        self.executor.from_external(&self.this, user, input, proof)
    }

    pub fn as_uint16(&self, value: u32) -> Handle {
        self.executor.trivial_encrypt(&self.this, &value)
    }

    pub fn add(&self, lhs: &Handle, rhs: &Handle) -> Handle {
        self.executor.add(&self.this, lhs, rhs)
    }

    pub fn gt(&self, lhs: &Handle, scalar: u32) -> Handle {
        self.executor.gt_scalar(&self.this, lhs, &scalar)
    }

    pub fn select(&self, cond: &Handle, if_true: &Handle, if_false: &Handle) -> Handle {
        self.executor.select(&self.this, cond, if_true, if_false)
    }

    /// Persists this contract's own allowance on `handle`.
    pub fn allow_this(&self, handle: &Handle) {
        self.executor.allow(&self.this, handle, &self.this);
    }

    /// Grants `account` a persistent allowance on `handle`.
    pub fn allow(&self, handle: &Handle, account: &Address) {
        self.executor.allow(&self.this, handle, account);
    }
}
