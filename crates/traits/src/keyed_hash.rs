//! One-shot keyed hash trait.

use core::fmt::Debug;

use crate::HashError;

/// Minimum key length, in bytes, accepted by every keyed variant.
pub const MIN_KEY_SIZE: usize = 16;

/// A one-shot hash over a complete buffer, optionally keyed.
///
/// Unkeyed variants use `Key = ()` and `KEY_SIZE = 0`. Keyed variants take
/// exactly the first [`MIN_KEY_SIZE`] bytes of a caller-supplied key.
///
/// There is no streaming form: each call hashes one whole buffer.
pub trait KeyedHash {
  /// Digest size in bytes.
  const OUTPUT_SIZE: usize;

  /// Key bytes consumed (0 for unkeyed variants).
  const KEY_SIZE: usize;

  /// Digest type, always a little-endian byte array.
  type Output: Copy + Eq + Debug + Default + AsRef<[u8]>;

  /// Parsed key.
  type Key: Copy + Debug + Default;

  /// Parse a key from caller bytes. Extra bytes past `KEY_SIZE` are ignored.
  ///
  /// # Errors
  ///
  /// [`HashError::KeyTooSmall`] if `bytes` is shorter than `KEY_SIZE`.
  fn key_from_slice(bytes: &[u8]) -> Result<Self::Key, HashError>;

  /// Hash `data` under `key`.
  #[must_use]
  fn hash_with_key(key: &Self::Key, data: &[u8]) -> Self::Output;

  /// Hash `data` under the all-zero key.
  #[inline]
  #[must_use]
  fn hash(data: &[u8]) -> Self::Output {
    Self::hash_with_key(&Self::Key::default(), data)
  }
}

/// Copy the first [`MIN_KEY_SIZE`] bytes of `bytes` into a fixed key.
///
/// # Errors
///
/// [`HashError::KeyTooSmall`] if fewer than 16 bytes are supplied.
#[inline]
pub fn key16(bytes: &[u8]) -> Result<[u8; MIN_KEY_SIZE], HashError> {
  match bytes.first_chunk::<MIN_KEY_SIZE>() {
    Some(key) => Ok(*key),
    None => Err(HashError::KeyTooSmall),
  }
}
