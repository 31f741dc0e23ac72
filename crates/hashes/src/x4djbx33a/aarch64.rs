//! aarch64 X4-DJBX33A block kernel (NEON `tbl` gather).
//!
//! Same algorithm as the SSSE3 kernel: one table lookup per 16-byte block makes
//! each lane's four bytes contiguous, then four shift/mask/recurrence steps.

#![allow(unsafe_code)]

use core::arch::aarch64::*;

use crate::lanes::{LANES, Lanes, splice};

const STRIDE: usize = 16;

/// Lane `l` collects block bytes `l, l + 4, l + 8, l + 12`, lowest first.
static GROUP: [u8; 16] = [0, 4, 8, 12, 1, 5, 9, 13, 2, 6, 10, 14, 3, 7, 11, 15];

/// `x * 33 + b` in every lane.
#[inline(always)]
unsafe fn mul33_add(x: uint32x4_t, b: uint32x4_t) -> uint32x4_t {
  unsafe { vaddq_u32(vaddq_u32(x, vshlq_n_u32::<5>(x)), b) }
}

/// Fold whole 16-byte blocks using a NEON table-lookup gather.
///
/// Trailing bytes past the last whole block are ignored.
///
/// # Safety
///
/// Caller must ensure NEON is available.
#[target_feature(enable = "neon")]
pub unsafe fn blocks_neon(state: [u32; LANES], body: &[u8]) -> [u32; LANES] {
  unsafe {
    let group = vld1q_u8(GROUP.as_ptr());
    let low = vdupq_n_u32(0xff);

    let mut x = vld1q_u32(state.as_ptr());
    let (blocks, _) = body.as_chunks::<STRIDE>();
    for block in blocks {
      let g = vreinterpretq_u32_u8(vqtbl1q_u8(vld1q_u8(block.as_ptr()), group));
      x = mul33_add(x, vandq_u32(g, low));
      x = mul33_add(x, vandq_u32(vshrq_n_u32::<8>(g), low));
      x = mul33_add(x, vandq_u32(vshrq_n_u32::<16>(g), low));
      x = mul33_add(x, vshrq_n_u32::<24>(g));
    }

    let mut out = [0u32; LANES];
    vst1q_u32(out.as_mut_ptr(), x);
    out
  }
}

/// Whole-buffer NEON kernel.
pub(super) fn neon(data: &[u8]) -> Lanes {
  // SAFETY: NEON availability is checked by every caller of `lanes_fn`.
  splice(data, STRIDE, STRIDE, |s, body| unsafe { blocks_neon(s, body) })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::lanes::SEED;

  #[test]
  fn neon_matches_scalar() {
    if !std::arch::is_aarch64_feature_detected!("neon") {
      return;
    }
    let data: [u8; 64] = core::array::from_fn(|i| (i * 29 + 5) as u8);
    for blocks in 0..=4 {
      let body = &data[..blocks * STRIDE];
      let mut lanes = Lanes::new();
      lanes.fold(body);
      // SAFETY: NEON checked above.
      let got = unsafe { blocks_neon([SEED; LANES], body) };
      assert_eq!(got, lanes.words());
    }
  }

  #[test]
  fn whole_buffer_kernel_matches_reference() {
    if !std::arch::is_aarch64_feature_detected!("neon") {
      return;
    }
    let buf: [u8; 96] = core::array::from_fn(|i| (i * 7 + 3) as u8);
    for offset in 0..16 {
      for len in [0, 1, 15, 16, 17, 33, 64, 80] {
        let data = &buf[offset..offset + len];
        assert_eq!(neon(data), super::super::portable::reference(data), "offset={offset} len={len}");
      }
    }
  }
}
