//! DJBX33A: single-lane multiplicative hash, 32-bit digest.
//!
//! `state = state * 33 + byte` from 5381 over the whole buffer. The digest is
//! the accumulator, little-endian. [`Djbx33a32Keyed`] XORs the first four key
//! bytes into it.

use traits::{HashError, KeyedHash, key16};

use crate::mix::mix;

#[doc(hidden)]
pub mod dispatch;
#[cfg(feature = "std")]
#[doc(hidden)]
pub mod kernel_test;
pub mod kernels;

use kernels::{Djbx33aKernelId, state_fn};

/// Digest size in bytes.
pub const OUTPUT_SIZE: usize = 4;

/// Unkeyed DJBX33A.
#[derive(Clone, Copy, Debug, Default)]
pub struct Djbx33a32;

/// Keyed DJBX33A.
#[derive(Clone, Copy, Debug, Default)]
pub struct Djbx33a32Keyed;

#[inline]
fn keyed_digest(state: u32, key: &[u8; 16]) -> [u8; OUTPUT_SIZE] {
  let mut out = state.to_le_bytes();
  mix(&mut out, key);
  out
}

impl Djbx33a32 {
  /// Hash with one specific kernel instead of automatic dispatch.
  #[must_use]
  pub fn hash_with_kernel(id: Djbx33aKernelId, data: &[u8]) -> [u8; OUTPUT_SIZE] {
    state_fn(id)(data).to_le_bytes()
  }
}

impl KeyedHash for Djbx33a32 {
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
    dispatch::state(data).to_le_bytes()
  }
}

impl Djbx33a32Keyed {
  /// Hash with one specific kernel instead of automatic dispatch.
  #[must_use]
  pub fn hash_with_kernel(id: Djbx33aKernelId, key: &[u8; 16], data: &[u8]) -> [u8; OUTPUT_SIZE] {
    keyed_digest(state_fn(id)(data), key)
  }
}

impl KeyedHash for Djbx33a32Keyed {
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
    keyed_digest(dispatch::state(data), key)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn known_digests() {
    assert_eq!(Djbx33a32::hash(b""), 5381u32.to_le_bytes());
    assert_eq!(Djbx33a32::hash(b"a"), 177_670u32.to_le_bytes());
  }

  #[test]
  fn keyed_uses_first_four_key_bytes() {
    let mut key = [0u8; 16];
    key[4..].fill(0xff);
    assert_eq!(Djbx33a32Keyed::hash_with_key(&key, b"abc"), Djbx33a32::hash(b"abc"));

    key[0] = 1;
    let plain = Djbx33a32::hash(b"abc");
    let keyed = Djbx33a32Keyed::hash_with_key(&key, b"abc");
    assert_eq!(keyed[0], plain[0] ^ 1);
    assert_eq!(keyed[1..], plain[1..]);
  }

  #[test]
  fn key_sensitivity() {
    let data = b"narrow";
    let zero = Djbx33a32Keyed::hash_with_key(&[0; 16], data);
    let ones = Djbx33a32Keyed::hash_with_key(&[0xff; 16], data);
    let other = Djbx33a32Keyed::hash_with_key(b"k3y-k3y-k3y-k3y!", data);
    assert_ne!(zero, ones);
    assert_ne!(zero, other);
    assert_ne!(ones, other);
  }

  #[test]
  fn kernels_agree_with_dispatch() {
    let data = [0xc3u8; 100];
    for &id in kernels::ALL {
      assert_eq!(Djbx33a32::hash_with_kernel(id, &data[3..]), Djbx33a32::hash(&data[3..]));
    }
  }
}
