//! x86_64 X4-DJBX33A block kernels.
//!
//! Both kernels keep the four lanes in one `__m128i` and consume 16-byte
//! blocks, four recurrence steps per block. They differ only in how each step's
//! gathered vector (byte `4r + lane` of the block in every lane `lane`) is built:
//!
//! - SSE2: per step, four byte-shift/mask/OR operations
//! - SSSE3: one `pshufb` per block groups each lane's bytes, then one shift/mask
//!   per step

#![allow(unsafe_code)]

use core::arch::x86_64::*;

use crate::lanes::{LANES, Lanes, splice};

const STRIDE: usize = 16;

#[inline(always)]
unsafe fn load_state(s: &[u32; LANES]) -> __m128i {
  // SAFETY: `s` is 16 readable bytes; unaligned load.
  unsafe { _mm_loadu_si128(s.as_ptr().cast()) }
}

#[inline(always)]
unsafe fn store_state(x: __m128i) -> [u32; LANES] {
  let mut out = [0u32; LANES];
  // SAFETY: `out` is 16 writable bytes; unaligned store.
  unsafe { _mm_storeu_si128(out.as_mut_ptr().cast(), x) };
  out
}

/// `x * 33 + b` in every lane.
#[inline(always)]
unsafe fn mul33_add(x: __m128i, b: __m128i) -> __m128i {
  unsafe { _mm_add_epi32(_mm_add_epi32(x, _mm_slli_epi32::<5>(x)), b) }
}

/// Fold whole 16-byte blocks using SSE2 shift/mask gathers.
///
/// Trailing bytes past the last whole block are ignored.
///
/// # Safety
///
/// Caller must ensure SSE2 is available.
#[target_feature(enable = "sse2")]
pub unsafe fn blocks_sse2(state: [u32; LANES], body: &[u8]) -> [u32; LANES] {
  unsafe {
    let m0 = _mm_setr_epi32(0xff, 0, 0, 0);
    let m1 = _mm_setr_epi32(0, 0xff, 0, 0);
    let m2 = _mm_setr_epi32(0, 0, 0xff, 0);
    let m3 = _mm_setr_epi32(0, 0, 0, 0xff);

    let mut x = load_state(&state);
    let (blocks, _) = body.as_chunks::<STRIDE>();
    for block in blocks {
      let v = _mm_loadu_si128(block.as_ptr().cast());

      // Byte `4d + j` moves to dword `j`: a shift of `3j - 4d` bytes.
      let mut p = _mm_and_si128(v, m0);
      p = _mm_or_si128(p, _mm_and_si128(_mm_slli_si128::<3>(v), m1));
      p = _mm_or_si128(p, _mm_and_si128(_mm_slli_si128::<6>(v), m2));
      p = _mm_or_si128(p, _mm_and_si128(_mm_slli_si128::<9>(v), m3));
      x = mul33_add(x, p);

      let mut p = _mm_and_si128(_mm_srli_si128::<4>(v), m0);
      p = _mm_or_si128(p, _mm_and_si128(_mm_srli_si128::<1>(v), m1));
      p = _mm_or_si128(p, _mm_and_si128(_mm_slli_si128::<2>(v), m2));
      p = _mm_or_si128(p, _mm_and_si128(_mm_slli_si128::<5>(v), m3));
      x = mul33_add(x, p);

      let mut p = _mm_and_si128(_mm_srli_si128::<8>(v), m0);
      p = _mm_or_si128(p, _mm_and_si128(_mm_srli_si128::<5>(v), m1));
      p = _mm_or_si128(p, _mm_and_si128(_mm_srli_si128::<2>(v), m2));
      p = _mm_or_si128(p, _mm_and_si128(_mm_slli_si128::<1>(v), m3));
      x = mul33_add(x, p);

      let mut p = _mm_and_si128(_mm_srli_si128::<12>(v), m0);
      p = _mm_or_si128(p, _mm_and_si128(_mm_srli_si128::<9>(v), m1));
      p = _mm_or_si128(p, _mm_and_si128(_mm_srli_si128::<6>(v), m2));
      p = _mm_or_si128(p, _mm_and_si128(_mm_srli_si128::<3>(v), m3));
      x = mul33_add(x, p);
    }
    store_state(x)
  }
}

/// Fold whole 16-byte blocks using an SSSE3 `pshufb` gather.
///
/// Trailing bytes past the last whole block are ignored.
///
/// # Safety
///
/// Caller must ensure SSSE3 is available.
#[target_feature(enable = "sse2,ssse3")]
pub unsafe fn blocks_ssse3(state: [u32; LANES], body: &[u8]) -> [u32; LANES] {
  unsafe {
    // Lane `l` collects block bytes `l, l + 4, l + 8, l + 12`, lowest first.
    let group = _mm_setr_epi8(0, 4, 8, 12, 1, 5, 9, 13, 2, 6, 10, 14, 3, 7, 11, 15);
    let low = _mm_set1_epi32(0xff);

    let mut x = load_state(&state);
    let (blocks, _) = body.as_chunks::<STRIDE>();
    for block in blocks {
      let g = _mm_shuffle_epi8(_mm_loadu_si128(block.as_ptr().cast()), group);
      x = mul33_add(x, _mm_and_si128(g, low));
      x = mul33_add(x, _mm_and_si128(_mm_srli_epi32::<8>(g), low));
      x = mul33_add(x, _mm_and_si128(_mm_srli_epi32::<16>(g), low));
      x = mul33_add(x, _mm_srli_epi32::<24>(g));
    }
    store_state(x)
  }
}

/// Whole-buffer SSE2 kernel.
///
/// Only reachable through `kernels::lanes_fn`, whose callers check the
/// kernel's required caps first.
pub(super) fn sse2(data: &[u8]) -> Lanes {
  // SAFETY: SSE2 availability is checked by every caller of `lanes_fn`.
  splice(data, STRIDE, STRIDE, |s, body| unsafe { blocks_sse2(s, body) })
}

/// Whole-buffer SSSE3 kernel.
pub(super) fn ssse3(data: &[u8]) -> Lanes {
  // SAFETY: SSSE3 availability is checked by every caller of `lanes_fn`.
  splice(data, STRIDE, STRIDE, |s, body| unsafe { blocks_ssse3(s, body) })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::lanes::SEED;

  fn scalar_blocks(body: &[u8]) -> [u32; LANES] {
    let mut lanes = Lanes::new();
    lanes.fold(body);
    lanes.words()
  }

  fn block_data(n: usize) -> [u8; 64] {
    core::array::from_fn(|i| (i * 13 + n) as u8)
  }

  #[test]
  fn sse2_matches_scalar() {
    if !std::is_x86_feature_detected!("sse2") {
      return;
    }
    for n in 0..8 {
      let data = block_data(n);
      for blocks in 0..=4 {
        let body = &data[..blocks * STRIDE];
        // SAFETY: SSE2 checked above.
        let got = unsafe { blocks_sse2([SEED; LANES], body) };
        assert_eq!(got, scalar_blocks(body));
      }
    }
  }

  #[test]
  fn ssse3_matches_scalar() {
    if !std::is_x86_feature_detected!("ssse3") {
      return;
    }
    for n in 0..8 {
      let data = block_data(n);
      for blocks in 0..=4 {
        let body = &data[..blocks * STRIDE];
        // SAFETY: SSSE3 checked above.
        let got = unsafe { blocks_ssse3([SEED; LANES], body) };
        assert_eq!(got, scalar_blocks(body));
      }
    }
  }

  #[test]
  fn ignores_partial_block() {
    if !std::is_x86_feature_detected!("sse2") {
      return;
    }
    let data = block_data(3);
    // SAFETY: SSE2 checked above.
    let (a, b) = unsafe { (blocks_sse2([SEED; LANES], &data[..20]), blocks_sse2([SEED; LANES], &data[..16])) };
    assert_eq!(a, b);
  }

  #[test]
  fn whole_buffer_kernels_match_reference() {
    if !std::is_x86_feature_detected!("ssse3") {
      return;
    }
    let buf: [u8; 96] = core::array::from_fn(|i| (i * 7 + 3) as u8);
    for offset in 0..16 {
      for len in [0, 1, 15, 16, 17, 33, 64, 80] {
        let data = &buf[offset..offset + len];
        let want = super::super::portable::reference(data);
        assert_eq!(sse2(data), want, "sse2 offset={offset} len={len}");
        assert_eq!(ssse3(data), want, "ssse3 offset={offset} len={len}");
      }
    }
  }
}
