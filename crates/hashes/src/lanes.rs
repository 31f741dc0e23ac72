//! Lane state and the alignment splicer.
//!
//! Every DJBX33A backend computes the same recurrence, `state = state * 33 + b`,
//! starting from [`SEED`]. The wide variant keeps four accumulators and routes
//! the byte at position `p` into lane `p mod 4`.
//!
//! Backends differ only in how they walk the buffer. Aligned backends go through
//! [`splice`], which:
//!
//! 1. folds the unaligned prefix one byte at a time,
//! 2. left-rotates the lanes so the aligned main loop always starts at lane 0,
//! 3. runs the backend's block function over whole strides,
//! 4. right-rotates the lanes back and folds the tail one byte at a time.
//!
//! The prefix and tail always go through [`Lanes::fold`], so the lane assignment
//! is identical for every backend, length, and buffer alignment.

/// Initial value of every accumulator.
pub const SEED: u32 = 5381;

/// Number of interleaved lanes in the wide variant.
pub const LANES: usize = 4;

/// One step of the recurrence: `state * 33 + byte`, wrapping.
#[inline(always)]
#[must_use]
pub const fn step(state: u32, byte: u8) -> u32 {
  (state << 5).wrapping_add(state).wrapping_add(byte as u32)
}

/// Fold `bytes` into a single accumulator.
#[inline]
#[must_use]
pub fn fold(state: u32, bytes: &[u8]) -> u32 {
  bytes.iter().fold(state, |s, &b| step(s, b))
}

/// Bytes needed to advance `addr` to the next multiple of `align` (0 when
/// already aligned).
#[inline]
#[must_use]
pub const fn bytes_to_boundary(addr: usize, align: usize) -> usize {
  debug_assert!(align > 0);
  match addr % align {
    0 => 0,
    rem => align - rem,
  }
}

/// Length of the byte-wise prefix for `data` under `align`: the distance to the
/// next boundary, capped at the buffer length.
#[inline]
#[must_use]
pub fn prefix_len(data: &[u8], align: usize) -> usize {
  bytes_to_boundary(data.as_ptr().addr(), align).min(data.len())
}

/// Four interleaved accumulators plus the lane that receives the next byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lanes {
  words: [u32; LANES],
  next: usize,
}

impl Default for Lanes {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl Lanes {
  /// All lanes at [`SEED`], next byte to lane 0.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self {
      words: [SEED; LANES],
      next: 0,
    }
  }

  /// Current accumulator words, lane 0 first.
  #[inline]
  #[must_use]
  pub const fn words(&self) -> [u32; LANES] {
    self.words
  }

  /// Lane that will receive the next folded byte.
  #[inline]
  #[must_use]
  pub const fn next_lane(&self) -> usize {
    self.next
  }

  /// Fold `bytes` one at a time, continuing the lane sequence.
  #[inline]
  pub fn fold(&mut self, bytes: &[u8]) {
    for &b in bytes {
      if let Some(w) = self.words.get_mut(self.next) {
        *w = step(*w, b);
      }
      self.next = (self.next + 1) & (LANES - 1);
    }
  }

  /// Lane words serialized little-endian, lane 0 first.
  #[inline]
  #[must_use]
  pub fn to_le_bytes(self) -> [u8; 4 * LANES] {
    let mut out = [0u8; 4 * LANES];
    for (chunk, w) in out.chunks_exact_mut(4).zip(self.words) {
      chunk.copy_from_slice(&w.to_le_bytes());
    }
    out
  }
}

/// Run `blocks` over the aligned body of `data`, with byte-wise prefix and
/// tail handling.
///
/// `align` is the address alignment the block function expects and `stride`
/// the byte count it consumes per iteration. `blocks` only ever sees a slice
/// whose length is a multiple of `stride` and which starts on an `align`
/// boundary, with the lanes rotated so that its first byte lands in lane 0.
#[inline]
pub(crate) fn splice<F>(data: &[u8], align: usize, stride: usize, blocks: F) -> Lanes
where
  F: FnOnce([u32; LANES], &[u8]) -> [u32; LANES],
{
  debug_assert!(stride > 0 && stride % LANES == 0);

  let mut lanes = Lanes::new();
  let (prefix, rest) = data.split_at(prefix_len(data, align));
  lanes.fold(prefix);

  let body_len = rest.len() - rest.len() % stride;
  let (body, tail) = rest.split_at(body_len);

  if !body.is_empty() {
    let shift = lanes.next;
    let mut words = lanes.words;
    words.rotate_left(shift);
    words = blocks(words, body);
    words.rotate_right(shift);
    lanes.words = words;
  }

  lanes.fold(tail);
  lanes
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::vec::Vec;

  use super::*;

  fn reference(data: &[u8]) -> Lanes {
    let mut lanes = Lanes::new();
    lanes.fold(data);
    lanes
  }

  fn bytewise_blocks(words: [u32; LANES], body: &[u8]) -> [u32; LANES] {
    let mut lanes = Lanes { words, next: 0 };
    lanes.fold(body);
    lanes.words
  }

  #[test]
  fn step_matches_multiply_by_33() {
    assert_eq!(step(SEED, 0), SEED.wrapping_mul(33));
    assert_eq!(step(SEED, b'a'), SEED.wrapping_mul(33).wrapping_add(97));
    assert_eq!(step(u32::MAX, 0xff), u32::MAX.wrapping_mul(33).wrapping_add(0xff));
  }

  #[test]
  fn fold_known_value() {
    // "a" -> 5381 * 33 + 97
    assert_eq!(fold(SEED, b"a"), 177_670);
    assert_eq!(fold(SEED, b""), SEED);
  }

  #[test]
  fn bytes_to_boundary_cases() {
    assert_eq!(bytes_to_boundary(0, 16), 0);
    assert_eq!(bytes_to_boundary(1, 16), 15);
    assert_eq!(bytes_to_boundary(15, 16), 1);
    assert_eq!(bytes_to_boundary(16, 16), 0);
    assert_eq!(bytes_to_boundary(13, 8), 3);
    assert_eq!(bytes_to_boundary(12345, 1), 0);
  }

  #[test]
  fn fold_assigns_lane_by_position() {
    let lanes = reference(&[1, 2, 3, 4, 5]);
    assert_eq!(lanes.next_lane(), 1);
    let w = lanes.words();
    assert_eq!(w[0], step(step(SEED, 1), 5));
    assert_eq!(w[1], step(SEED, 2));
    assert_eq!(w[2], step(SEED, 3));
    assert_eq!(w[3], step(SEED, 4));
  }

  #[test]
  fn le_bytes_layout() {
    let lanes = Lanes {
      words: [0x0403_0201, 0x0807_0605, 0x0c0b_0a09, 0x100f_0e0d],
      next: 0,
    };
    let expected: [u8; 16] = core::array::from_fn(|i| i as u8 + 1);
    assert_eq!(lanes.to_le_bytes(), expected);
  }

  #[test]
  fn splice_matches_reference_at_every_offset() {
    let buf: Vec<u8> = (0..200u32).map(|i| (i.wrapping_mul(31) ^ 0x5a) as u8).collect();
    for (align, stride) in [(1, 4), (8, 8), (16, 16), (16, 32)] {
      for offset in 0..16 {
        for len in 0..=(200 - offset).min(90) {
          let data = &buf[offset..offset + len];
          let got = splice(data, align, stride, bytewise_blocks);
          let want = reference(data);
          assert_eq!(got.words(), want.words(), "align={align} stride={stride} off={offset} len={len}");
          assert_eq!(got.next_lane(), want.next_lane());
        }
      }
    }
  }

  #[test]
  fn splice_body_is_aligned_and_whole_strides() {
    let buf = [0u8; 100];
    for offset in 0..16 {
      let data = &buf[offset..];
      let _ = splice(data, 16, 16, |words, body| {
        assert_eq!(body.as_ptr().addr() % 16, 0);
        assert_eq!(body.len() % 16, 0);
        assert!(!body.is_empty());
        words
      });
    }
  }

  #[test]
  fn splice_skips_block_fn_for_short_input() {
    let buf = [7u8; 40];
    let data = &buf[1..9];
    let lanes = splice(data, 16, 16, |_, _| panic!("no whole stride available"));
    assert_eq!(lanes, reference(data));
  }
}
