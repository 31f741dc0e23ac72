//! X4-DJBX33A: four interleaved DJBX33A lanes, 128-bit digest.
//!
//! The byte at position `p` feeds lane `p mod 4`; each lane runs
//! `state = state * 33 + byte` from 5381. The digest is the four lane words,
//! little-endian, lane 0 first. [`X4Djbx33a`] XORs the first 16 key bytes into
//! that digest; [`X4Djbx33aUnkeyed`] returns the lanes as-is.
//!
//! Every kernel in [`kernels::ALL`] produces identical lanes for every input
//! length and buffer alignment.

use traits::{HashError, KeyedHash, key16};

use crate::{lanes::Lanes, mix::mix};

#[cfg(target_arch = "aarch64")]
mod aarch64;
#[doc(hidden)]
pub mod dispatch;
pub mod kernels;
mod portable;
#[cfg(target_arch = "x86_64")]
mod x86_64;

use kernels::{X4Djbx33aKernelId, lanes_fn};

/// Digest size in bytes.
pub const OUTPUT_SIZE: usize = 16;

/// Keyed X4-DJBX33A.
#[derive(Clone, Copy, Debug, Default)]
pub struct X4Djbx33a;

/// Unkeyed X4-DJBX33A: the raw lane state.
#[derive(Clone, Copy, Debug, Default)]
pub struct X4Djbx33aUnkeyed;

/// Hash `data` into lanes with one specific kernel.
///
/// # Errors
///
/// [`HashError::UnsupportedBackend`] if the kernel is not compiled for this
/// target or the CPU lacks its instruction set.
pub fn lanes_with_kernel(id: X4Djbx33aKernelId, data: &[u8]) -> Result<Lanes, HashError> {
  if !id.is_available(platform::caps()) {
    return Err(HashError::UnsupportedBackend);
  }
  let f = lanes_fn(id).ok_or(HashError::UnsupportedBackend)?;
  Ok(f(data))
}

#[inline]
fn keyed_digest(lanes: Lanes, key: &[u8; 16]) -> [u8; OUTPUT_SIZE] {
  let mut out = lanes.to_le_bytes();
  mix(&mut out, key);
  out
}

impl X4Djbx33a {
  /// Hash with one specific kernel instead of automatic dispatch.
  ///
  /// # Errors
  ///
  /// See [`lanes_with_kernel`].
  pub fn hash_with_kernel(id: X4Djbx33aKernelId, key: &[u8; 16], data: &[u8]) -> Result<[u8; OUTPUT_SIZE], HashError> {
    lanes_with_kernel(id, data).map(|lanes| keyed_digest(lanes, key))
  }
}

impl KeyedHash for X4Djbx33a {
  const OUTPUT_SIZE: usize = OUTPUT_SIZE;
  const KEY_SIZE: usize = traits::MIN_KEY_SIZE;
  type Output = [u8; OUTPUT_SIZE];
  type Key = [u8; 16];

  #[inline]
  fn key_from_slice(bytes: &[u8]) -> Result<Self::Key, HashError> {
    key16(bytes)
  }

  #[inline]
  fn hash_with_key(key: &Self::Key, data: &[u8]) -> Self::Output {
    keyed_digest(dispatch::lanes(data), key)
  }
}

impl X4Djbx33aUnkeyed {
  /// Hash with one specific kernel instead of automatic dispatch.
  ///
  /// # Errors
  ///
  /// See [`lanes_with_kernel`].
  pub fn hash_with_kernel(id: X4Djbx33aKernelId, data: &[u8]) -> Result<[u8; OUTPUT_SIZE], HashError> {
    lanes_with_kernel(id, data).map(Lanes::to_le_bytes)
  }
}

impl KeyedHash for X4Djbx33aUnkeyed {
  const OUTPUT_SIZE: usize = OUTPUT_SIZE;
  const KEY_SIZE: usize = 0;
  type Output = [u8; OUTPUT_SIZE];
  type Key = ();

  #[inline]
  fn key_from_slice(_bytes: &[u8]) -> Result<Self::Key, HashError> {
    Ok(())
  }

  #[inline]
  fn hash_with_key(_key: &Self::Key, data: &[u8]) -> Self::Output {
    dispatch::lanes(data).to_le_bytes()
  }
}
