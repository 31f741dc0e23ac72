//! Interleaved multiplicative hashing with bit-exact SIMD backends.
//!
//! `hashx4` provides DJBX33A in a narrow (32-bit) and a four-lane (128-bit)
//! form, plus SipHash-2-4. Every backend of a variant, scalar or SIMD,
//! produces the same digest for every input length and buffer alignment; the
//! fastest one available is picked once per process.
//!
//! **NOT CRYPTO.** These are hash-table hashes.
//!
//! # Quick Start
//!
//! ```
//! use hashx4::{KeyedHash, SipHash24, X4Djbx33a};
//!
//! let key = *b"0123456789abcdef";
//! let digest = X4Djbx33a::hash_with_key(&key, b"hello world");
//! assert_eq!(digest.len(), 16);
//!
//! let tag = SipHash24::hash_with_key(&key, b"hello world");
//! assert_eq!(tag.len(), 8);
//! ```
//!
//! Caller-supplied buffers go through the same contract checks as the raw
//! entry points:
//!
//! ```
//! use hashx4::{HashError, X4Djbx33a, hash_into};
//!
//! let mut out = [0u8; 15];
//! assert_eq!(
//!   hash_into::<X4Djbx33a>(b"abc", &[0; 16], &mut out),
//!   Err(HashError::OutputTooSmall)
//! );
//! ```
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std` | Yes | Runtime CPU detection and environment configuration |
//! | `raw` | No | `(ptr, len) -> i32` entry points, one per backend |
//!
//! ## `no_std` Usage
//!
//! ```toml
//! [dependencies]
//! hashx4 = { version = "0.1", default-features = false }
//! ```
//!
//! Without `std`, dispatch uses compile-time target features only.
#![cfg_attr(not(feature = "std"), no_std)]

// =============================================================================
// Hashes
// =============================================================================

pub use hashes::{
  Djbx33a32, Djbx33a32Keyed, SipHash24, X4Djbx33a, X4Djbx33aUnkeyed, djbx33a::kernels::Djbx33aKernelId, hash_into,
  x4djbx33a::kernels::X4Djbx33aKernelId,
};
pub use traits::{HashError, KeyedHash, MIN_KEY_SIZE, SUCCESS};

// =============================================================================
// Configuration & introspection
// =============================================================================

pub use hashes::config::{self, Config, Djbx33aForce, X4Djbx33aForce};
pub use platform::Caps;

/// Detected CPU capabilities (after any test override).
#[inline]
#[must_use]
pub fn caps() -> Caps {
  platform::caps()
}

/// Name of the X4-DJBX33A kernel automatic dispatch runs for `len` bytes.
#[inline]
#[must_use]
pub fn x4djbx33a_kernel_for(len: usize) -> &'static str {
  hashes::x4djbx33a::dispatch::kernel_name_for_len(len)
}

/// Name of the narrow DJBX33A kernel automatic dispatch runs.
#[inline]
#[must_use]
pub fn djbx33a_kernel() -> &'static str {
  hashes::djbx33a::dispatch::kernel_name_for_len(0)
}

// =============================================================================
// Raw entry points
// =============================================================================

#[cfg(feature = "raw")]
pub use hashes::raw;
