//! Core hashing traits for hashx4.
//!
//! This crate defines the contract every hash variant in the workspace
//! implements. It is `no_std` compatible and has zero dependencies.
//!
//! | Item | Purpose |
//! |------|---------|
//! | [`KeyedHash`] | One-shot hash with an optional fixed-size key |
//! | [`HashError`] | Rejection reasons with stable numeric codes |
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code to ensure
//! all error paths are handled explicitly.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod error;
mod keyed_hash;

pub use error::{HashError, SUCCESS, result_code};
pub use keyed_hash::{KeyedHash, MIN_KEY_SIZE, key16};
