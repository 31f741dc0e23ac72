//! SipHash-2-4, 64-bit output.
//!
//! A keyed hash for defending hash tables against collision flooding on
//! untrusted input. The 128-bit key is read as two little-endian `u64` words;
//! the digest is the 64-bit result written little-endian.

use traits::{HashError, KeyedHash, key16};

/// Digest size in bytes.
pub const OUTPUT_SIZE: usize = 8;

const C0: u64 = 0x736f_6d65_7073_6575;
const C1: u64 = 0x646f_7261_6e64_6f6d;
const C2: u64 = 0x6c79_6765_6e65_7261;
const C3: u64 = 0x7465_6462_7974_6573;

#[derive(Clone, Copy, Debug, Default)]
pub struct SipHash24;

#[derive(Clone, Copy)]
struct State {
  v0: u64,
  v1: u64,
  v2: u64,
  v3: u64,
}

impl State {
  #[inline(always)]
  const fn new(k0: u64, k1: u64) -> Self {
    Self {
      v0: C0 ^ k0,
      v1: C1 ^ k1,
      v2: C2 ^ k0,
      v3: C3 ^ k1,
    }
  }

  #[inline(always)]
  fn round(&mut self) {
    self.v0 = self.v0.wrapping_add(self.v1);
    self.v1 = self.v1.rotate_left(13);
    self.v1 ^= self.v0;
    self.v0 = self.v0.rotate_left(32);

    self.v2 = self.v2.wrapping_add(self.v3);
    self.v3 = self.v3.rotate_left(16);
    self.v3 ^= self.v2;

    self.v0 = self.v0.wrapping_add(self.v3);
    self.v3 = self.v3.rotate_left(21);
    self.v3 ^= self.v0;

    self.v2 = self.v2.wrapping_add(self.v1);
    self.v1 = self.v1.rotate_left(17);
    self.v1 ^= self.v2;
    self.v2 = self.v2.rotate_left(32);
  }

  /// Absorb one message word with two compression rounds.
  #[inline(always)]
  fn compress(&mut self, m: u64) {
    self.v3 ^= m;
    self.round();
    self.round();
    self.v0 ^= m;
  }

  #[inline(always)]
  fn finish(mut self) -> u64 {
    self.v2 ^= 0xff;
    self.round();
    self.round();
    self.round();
    self.round();
    self.v0 ^ self.v1 ^ self.v2 ^ self.v3
  }
}

/// Last message word: the 0..=7 trailing bytes little-endian, with the input
/// length (mod 256) in bits 56..64.
#[inline(always)]
fn last_word(tail: &[u8], total_len: usize) -> u64 {
  let mut b = [0u8; 8];
  for (dst, &src) in b.iter_mut().zip(tail) {
    *dst = src;
  }
  u64::from_le_bytes(b) | ((total_len as u64) << 56)
}

/// SipHash-2-4 of `data` under the key words `(k0, k1)`.
#[must_use]
pub fn siphash24(key: [u64; 2], data: &[u8]) -> u64 {
  let [k0, k1] = key;
  let mut s = State::new(k0, k1);

  let (blocks, tail) = data.as_chunks::<8>();
  for block in blocks {
    s.compress(u64::from_le_bytes(*block));
  }
  s.compress(last_word(tail, data.len()));

  s.finish()
}

/// Split a 16-byte key into its two little-endian words.
#[inline]
#[must_use]
pub fn key_words(key: &[u8; 16]) -> [u64; 2] {
  let (lo, hi) = key.split_at(8);
  let mut k0 = [0u8; 8];
  let mut k1 = [0u8; 8];
  k0.copy_from_slice(lo);
  k1.copy_from_slice(hi);
  [u64::from_le_bytes(k0), u64::from_le_bytes(k1)]
}

impl KeyedHash for SipHash24 {
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
    siphash24(key_words(key), data).to_le_bytes()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const KEY: [u8; 16] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];

  #[test]
  fn empty_input_standard_key() {
    assert_eq!(SipHash24::hash_with_key(&KEY, b""), 0x726f_db47_dd0e_0e31u64.to_le_bytes());
  }

  #[test]
  fn fifteen_byte_message() {
    let data: [u8; 15] = core::array::from_fn(|i| i as u8);
    assert_eq!(siphash24(key_words(&KEY), &data), 0xa129_ca61_49be_45e5);
  }

  #[test]
  fn key_sensitivity() {
    let data = b"flood resistant";
    let zero = SipHash24::hash_with_key(&[0; 16], data);
    let ones = SipHash24::hash_with_key(&[0xff; 16], data);
    let other = SipHash24::hash_with_key(b"k3y-k3y-k3y-k3y!", data);
    assert_ne!(zero, ones);
    assert_ne!(zero, other);
    assert_ne!(ones, other);
  }

  #[test]
  fn key_words_little_endian() {
    assert_eq!(key_words(&KEY), [0x0706_0504_0302_0100, 0x0f0e_0d0c_0b0a_0908]);
  }

  #[test]
  fn last_word_packing() {
    assert_eq!(last_word(&[], 0), 0);
    assert_eq!(last_word(&[0xaa], 9), 0x0900_0000_0000_00aa);
    assert_eq!(last_word(&[1, 2, 3, 4, 5, 6, 7], 263), 0x0707_0605_0403_0201);
  }
}
