//! Portable X4-DJBX33A kernels.
//!
//! - `reference`: one byte per iteration, ground truth
//! - `unrolled`: 16-byte aligned blocks, one statement per byte
//! - `swar`: 8-byte aligned blocks, two lanes packed per `u64`

#![allow(clippy::indexing_slicing)] // Fixed-size block arrays, constant indices

use crate::lanes::{LANES, Lanes, splice, step};

// ─────────────────────────────────────────────────────────────────────────────
// Reference
// ─────────────────────────────────────────────────────────────────────────────

#[must_use]
pub fn reference(data: &[u8]) -> Lanes {
  let mut lanes = Lanes::new();
  lanes.fold(data);
  lanes
}

// ─────────────────────────────────────────────────────────────────────────────
// Unrolled scalar
// ─────────────────────────────────────────────────────────────────────────────

const UNROLLED_ALIGN: usize = 16;
const UNROLLED_STRIDE: usize = 16;

#[inline]
fn unrolled_blocks(mut s: [u32; LANES], body: &[u8]) -> [u32; LANES] {
  let (blocks, _) = body.as_chunks::<UNROLLED_STRIDE>();
  for b in blocks {
    s[0] = step(s[0], b[0]);
    s[1] = step(s[1], b[1]);
    s[2] = step(s[2], b[2]);
    s[3] = step(s[3], b[3]);
    s[0] = step(s[0], b[4]);
    s[1] = step(s[1], b[5]);
    s[2] = step(s[2], b[6]);
    s[3] = step(s[3], b[7]);
    s[0] = step(s[0], b[8]);
    s[1] = step(s[1], b[9]);
    s[2] = step(s[2], b[10]);
    s[3] = step(s[3], b[11]);
    s[0] = step(s[0], b[12]);
    s[1] = step(s[1], b[13]);
    s[2] = step(s[2], b[14]);
    s[3] = step(s[3], b[15]);
  }
  s
}

#[must_use]
pub fn unrolled(data: &[u8]) -> Lanes {
  splice(data, UNROLLED_ALIGN, UNROLLED_STRIDE, unrolled_blocks)
}

// ─────────────────────────────────────────────────────────────────────────────
// SWAR: two 32-bit lanes per 64-bit word
// ─────────────────────────────────────────────────────────────────────────────
//
// Register `x0` holds lanes 0 (low half) and 1 (high half); `x1` holds lanes 2
// and 3. Each 8-byte block contributes two bytes per lane.

const SWAR_ALIGN: usize = 8;
const SWAR_STRIDE: usize = 8;

const LO_BYTE: u64 = 0x0000_0000_0000_00ff;
const HI_BYTE: u64 = 0x0000_00ff_0000_0000;
const LANE_MSB: u64 = 0x8000_0000_8000_0000;
const SHL5_MASK: u64 = 0xffff_ffe0_ffff_ffe0;

/// Lane-wise wrapping add of two packed `u32` pairs.
#[inline(always)]
const fn add_pi32(a: u64, b: u64) -> u64 {
  ((a & !LANE_MSB).wrapping_add(b & !LANE_MSB)) ^ ((a ^ b) & LANE_MSB)
}

/// Lane-wise `x << 5`.
#[inline(always)]
const fn shl5_pi32(x: u64) -> u64 {
  (x << 5) & SHL5_MASK
}

/// Lane-wise `x * 33 + b`.
#[inline(always)]
const fn mul33_add(x: u64, b: u64) -> u64 {
  add_pi32(shl5_pi32(x), add_pi32(x, b))
}

#[inline(always)]
const fn pack(lo: u32, hi: u32) -> u64 {
  (lo as u64) | ((hi as u64) << 32)
}

#[inline]
fn swar_blocks(s: [u32; LANES], body: &[u8]) -> [u32; LANES] {
  let mut x0 = pack(s[0], s[1]);
  let mut x1 = pack(s[2], s[3]);

  let (blocks, _) = body.as_chunks::<SWAR_STRIDE>();
  for b in blocks {
    let w = u64::from_le_bytes(*b);

    // bytes 0..4
    x0 = mul33_add(x0, (w & LO_BYTE) | ((w << 24) & HI_BYTE));
    x1 = mul33_add(x1, ((w >> 16) & LO_BYTE) | ((w << 8) & HI_BYTE));
    // bytes 4..8
    x0 = mul33_add(x0, ((w >> 32) & LO_BYTE) | ((w >> 8) & HI_BYTE));
    x1 = mul33_add(x1, ((w >> 48) & LO_BYTE) | ((w >> 24) & HI_BYTE));
  }

  [x0 as u32, (x0 >> 32) as u32, x1 as u32, (x1 >> 32) as u32]
}

#[must_use]
pub fn swar(data: &[u8]) -> Lanes {
  splice(data, SWAR_ALIGN, SWAR_STRIDE, swar_blocks)
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::vec::Vec;

  use super::*;
  use crate::lanes::SEED;

  #[test]
  fn add_pi32_is_lane_wise() {
    let a = pack(u32::MAX, 0x7fff_ffff);
    let b = pack(1, 1);
    assert_eq!(add_pi32(a, b), pack(0, 0x8000_0000));

    let a = pack(0x8000_0000, 0x8000_0000);
    assert_eq!(add_pi32(a, a), 0);
  }

  #[test]
  fn shl5_does_not_leak_across_lanes() {
    let x = pack(0xffff_ffff, 0);
    assert_eq!(shl5_pi32(x), pack(0xffff_ffe0, 0));
  }

  #[test]
  fn mul33_add_matches_scalar_step() {
    for (lo, hi, blo, bhi) in [(SEED, SEED, 1u8, 2u8), (u32::MAX, 0x1234_5678, 0xff, 0x80), (0, 0, 0, 0)] {
      let got = mul33_add(pack(lo, hi), pack(u32::from(blo), u32::from(bhi)));
      assert_eq!(got, pack(step(lo, blo), step(hi, bhi)));
    }
  }

  #[test]
  fn empty_input_is_seed() {
    for f in [reference, unrolled, swar] {
      assert_eq!(f(&[]).words(), [SEED; 4]);
    }
  }

  #[test]
  fn unrolled_and_swar_match_reference() {
    let buf: Vec<u8> = (0..300u32).map(|i| (i * 7 + (i >> 3)) as u8).collect();
    for offset in 0..16 {
      for len in [0, 1, 7, 8, 9, 15, 16, 17, 31, 32, 33, 64, 100, 255] {
        let data = &buf[offset..offset + len];
        let want = reference(data);
        assert_eq!(unrolled(data), want, "unrolled off={offset} len={len}");
        assert_eq!(swar(data), want, "swar off={offset} len={len}");
      }
    }
  }
}
