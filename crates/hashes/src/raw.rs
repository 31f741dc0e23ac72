//! Raw `(pointer, length)` entry points with integer status codes.
//!
//! Every function has the signature
//!
//! ```text
//! (input, input_len, key, key_len, output, output_capacity) -> i32
//! ```
//!
//! and returns [`traits::SUCCESS`] (0) or a negative [`HashError`] code. The
//! buffer contract (null pointers, capacity, key size, pairwise overlap) is
//! checked on raw addresses before anything is read; on failure `output` is
//! left untouched. Unkeyed variants ignore `key` and `key_len`, so a null key
//! is accepted.
//!
//! Per-backend entry points return [`HashError::UnsupportedBackend`] when the
//! backend is not compiled for this target or the CPU lacks it. The contract is
//! checked first.

#![allow(unsafe_code)]

use core::{ptr, slice};

use traits::{HashError, SUCCESS};

use crate::{
  contract::{Contract, Region},
  djbx33a::{self, Djbx33a32, Djbx33a32Keyed, kernels::Djbx33aKernelId},
  siphash::{self, SipHash24},
  x4djbx33a::{self, X4Djbx33a, kernels::X4Djbx33aKernelId},
};

/// Validate, hash, copy the digest out.
///
/// # Safety
///
/// Non-null pointers must be valid for their lengths (reads for `input` and
/// `key`, writes for `output`).
#[inline]
#[allow(clippy::too_many_arguments)]
unsafe fn run<const N: usize>(
  contract: Contract,
  input: *const u8,
  input_len: usize,
  key: *const u8,
  key_len: usize,
  output: *mut u8,
  output_capacity: usize,
  hash: impl FnOnce(&[u8], &[u8; 16]) -> Result<[u8; N], HashError>,
) -> i32 {
  debug_assert_eq!(contract.output_size, N);

  let checked = contract.validate(
    Region::from_raw(input, input_len),
    Region::from_raw(key, key_len),
    Region::from_raw(output.cast_const(), output_capacity),
  );
  if let Err(e) = checked {
    return e.code();
  }

  // SAFETY: `input` is non-null (validated) and valid for `input_len` reads
  // (caller contract).
  let data = unsafe { slice::from_raw_parts(input, input_len) };

  let mut key_bytes = [0u8; 16];
  if contract.is_keyed() {
    // SAFETY: keyed contracts validated `key` non-null with at least 16 bytes;
    // validity for reads is the caller contract.
    let k = unsafe { slice::from_raw_parts(key, contract.key_size) };
    key_bytes.copy_from_slice(k);
  }

  match hash(data, &key_bytes) {
    Ok(digest) => {
      // SAFETY: `output` is non-null with at least `N` bytes of capacity
      // (validated), writable (caller contract), and disjoint from `input` and
      // `key` (validated).
      unsafe { ptr::copy_nonoverlapping(digest.as_ptr(), output, N) };
      SUCCESS
    }
    Err(e) => e.code(),
  }
}

macro_rules! entry_point {
  ($(#[$meta:meta])* $name:ident, $contract:expr, $n:expr, |$data:ident, $key:ident| $body:expr) => {
    $(#[$meta])*
    ///
    /// # Safety
    ///
    /// Each non-null pointer must be valid for its length: reads for `input`
    /// and `key`, writes for `output`.
    #[unsafe(no_mangle)]
    pub unsafe extern "C" fn $name(
      input: *const u8,
      input_len: usize,
      key: *const u8,
      key_len: usize,
      output: *mut u8,
      output_capacity: usize,
    ) -> i32 {
      // SAFETY: forwarded caller contract.
      unsafe {
        run::<{ $n }>(
          $contract,
          input,
          input_len,
          key,
          key_len,
          output,
          output_capacity,
          |$data: &[u8], $key: &[u8; 16]| $body,
        )
      }
    }
  };
}

const DJBX33A: Contract = Contract::new(djbx33a::OUTPUT_SIZE, 0);
const DJBX33A_KEYED: Contract = Contract::new(djbx33a::OUTPUT_SIZE, traits::MIN_KEY_SIZE);
const X4DJBX33A: Contract = Contract::new(x4djbx33a::OUTPUT_SIZE, traits::MIN_KEY_SIZE);
const SIPHASH24: Contract = Contract::new(siphash::OUTPUT_SIZE, traits::MIN_KEY_SIZE);

// ─────────────────────────────────────────────────────────────────────────────
// DJBX33A, 32-bit
// ─────────────────────────────────────────────────────────────────────────────

entry_point!(
  /// Unkeyed DJBX33A, reference kernel.
  djbx33a_32_ref, DJBX33A, 4, |data, _key| {
    Ok(Djbx33a32::hash_with_kernel(Djbx33aKernelId::Reference, data))
  }
);

entry_point!(
  /// Unkeyed DJBX33A, unrolled kernel.
  djbx33a_32_copt, DJBX33A, 4, |data, _key| {
    Ok(Djbx33a32::hash_with_kernel(Djbx33aKernelId::Unrolled, data))
  }
);

entry_point!(
  /// Keyed DJBX33A, reference kernel.
  djbx33a_32_keyed_ref, DJBX33A_KEYED, 4, |data, key| {
    Ok(Djbx33a32Keyed::hash_with_kernel(Djbx33aKernelId::Reference, key, data))
  }
);

entry_point!(
  /// Keyed DJBX33A, unrolled kernel.
  djbx33a_32_keyed_copt, DJBX33A_KEYED, 4, |data, key| {
    Ok(Djbx33a32Keyed::hash_with_kernel(Djbx33aKernelId::Unrolled, key, data))
  }
);

// ─────────────────────────────────────────────────────────────────────────────
// X4-DJBX33A, 128-bit keyed
// ─────────────────────────────────────────────────────────────────────────────

entry_point!(
  /// X4-DJBX33A, reference kernel.
  x4djbx33a_128_ref, X4DJBX33A, 16, |data, key| {
    X4Djbx33a::hash_with_kernel(X4Djbx33aKernelId::Reference, key, data)
  }
);

entry_point!(
  /// X4-DJBX33A, unrolled scalar kernel.
  x4djbx33a_128_copt, X4DJBX33A, 16, |data, key| {
    X4Djbx33a::hash_with_kernel(X4Djbx33aKernelId::Unrolled, key, data)
  }
);

entry_point!(
  /// X4-DJBX33A, SWAR kernel (two lanes per 64-bit word).
  x4djbx33a_128_swar, X4DJBX33A, 16, |data, key| {
    X4Djbx33a::hash_with_kernel(X4Djbx33aKernelId::Swar, key, data)
  }
);

entry_point!(
  /// X4-DJBX33A, SSE2 shift/mask kernel.
  x4djbx33a_128_sse2, X4DJBX33A, 16, |data, key| {
    X4Djbx33a::hash_with_kernel(X4Djbx33aKernelId::Sse2, key, data)
  }
);

entry_point!(
  /// X4-DJBX33A, SSSE3 `pshufb` kernel.
  x4djbx33a_128_ssse3, X4DJBX33A, 16, |data, key| {
    X4Djbx33a::hash_with_kernel(X4Djbx33aKernelId::Ssse3, key, data)
  }
);

entry_point!(
  /// X4-DJBX33A, NEON `tbl` kernel.
  x4djbx33a_128_neon, X4DJBX33A, 16, |data, key| {
    X4Djbx33a::hash_with_kernel(X4Djbx33aKernelId::Neon, key, data)
  }
);

entry_point!(
  /// X4-DJBX33A, automatically selected kernel.
  x4djbx33a_128, X4DJBX33A, 16, |data, key| {
    Ok(<X4Djbx33a as traits::KeyedHash>::hash_with_key(key, data))
  }
);

// ─────────────────────────────────────────────────────────────────────────────
// SipHash-2-4
// ─────────────────────────────────────────────────────────────────────────────

entry_point!(
  /// SipHash-2-4, 64-bit digest.
  siphash24_64_ref, SIPHASH24, 8, |data, key| {
    Ok(<SipHash24 as traits::KeyedHash>::hash_with_key(key, data))
  }
);
