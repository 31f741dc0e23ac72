//! DJBX33A (narrow and four-lane) and SipHash-2-4 with interchangeable kernels.
//!
//! This crate is `no_std` compatible and has no library dependencies outside
//! the hashx4 workspace. Dev-only dependencies are used for oracle testing and
//! benchmarking.
//!
//! **NOT CRYPTO.** DJBX33A is a fast table hash; SipHash-2-4 defends hash
//! tables against flooding but is not a MAC.
//!
//! | Type | Digest | Key |
//! |------|--------|-----|
//! | [`Djbx33a32`] | 4 bytes | none |
//! | [`Djbx33a32Keyed`] | 4 bytes | 16 bytes |
//! | [`X4Djbx33a`] | 16 bytes | 16 bytes |
//! | [`X4Djbx33aUnkeyed`] | 16 bytes | none |
//! | [`SipHash24`] | 8 bytes | 16 bytes |
//!
//! Every kernel of a variant produces the same digest for every input length
//! and buffer alignment. Automatic dispatch picks one per process; each kernel
//! is also reachable directly (`hash_with_kernel`, [`raw`]).
//!
//! ```
//! use hashes::{X4Djbx33a, hash_into};
//!
//! let key = [7u8; 16];
//! let mut out = [0u8; 16];
//! let n = hash_into::<X4Djbx33a>(b"hello", &key, &mut out)?;
//! assert_eq!(n, 16);
//! # Ok::<(), hashes::HashError>(())
//! ```
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod config;
pub mod contract;
pub mod djbx33a;
pub mod lanes;
mod mix;
pub mod raw;
pub mod siphash;
pub mod x4djbx33a;

use contract::{Contract, Region};
pub use djbx33a::{Djbx33a32, Djbx33a32Keyed};
pub use siphash::SipHash24;
pub use traits::{HashError, KeyedHash};
pub use x4djbx33a::{X4Djbx33a, X4Djbx33aUnkeyed};

#[doc(hidden)]
#[cfg(feature = "std")]
pub mod __internal {
  pub mod kernel_test {
    pub use crate::{
      djbx33a::kernel_test::{run_all_djbx33a_kernels, verify_djbx33a_kernels},
      x4djbx33a::kernel_test::{run_all_x4djbx33a_kernels, verify_x4djbx33a_kernels},
    };
  }
}

/// Hash `input` into the front of `output` after checking the buffer contract.
///
/// Unkeyed variants ignore `key` (pass `&[]`). On success returns the digest
/// length; bytes of `output` past the digest are not touched. On failure
/// `output` is not touched at all.
///
/// # Errors
///
/// - [`HashError::OutputTooSmall`] if `output` is shorter than the digest
/// - [`HashError::KeyTooSmall`] if a keyed variant gets fewer than 16 key bytes
/// - [`HashError::RangesOverlap`] if `key` aliases `input` or `output`
pub fn hash_into<H: KeyedHash>(input: &[u8], key: &[u8], output: &mut [u8]) -> Result<usize, HashError> {
  Contract::new(H::OUTPUT_SIZE, H::KEY_SIZE).validate(Region::of(input), Region::of(key), Region::of(output))?;

  let key = H::key_from_slice(key)?;
  let digest = H::hash_with_key(&key, input);
  let digest = digest.as_ref();
  output
    .get_mut(..digest.len())
    .ok_or(HashError::OutputTooSmall)?
    .copy_from_slice(digest);
  Ok(digest.len())
}
