//! Shared types for the noise monitor contract suite.
//!
//! This crate provides:
//! - [`fhe`]: the ciphertext handle type, the encrypted-input envelope and
//!   the typed client every contract uses to reach the FHE executor.
//! - [`ttl`]: storage time-to-live constants and extension helpers.

#![no_std]

pub mod fhe;
pub mod ttl;

pub use fhe::*;
pub use ttl::*;
