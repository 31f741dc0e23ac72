//! CPU capability detection for hashx4.
//!
//! This crate is the single source of truth for "which kernels may run on this
//! machine". Algorithm crates query [`caps()`] and compare against the
//! capability constants their kernels declare.
//!
//! ```
//! use platform::caps::x86;
//!
//! let caps = platform::caps();
//! if caps.has(x86::SHUFFLE_READY) {
//!   // pshufb gather kernel is legal here
//! }
//! ```
//!
//! # Design
//!
//! 1. **One API**: kernels never call `is_x86_feature_detected!` directly.
//! 2. **Zero-cost when possible**: compile-time features are folded in via `cfg!`.
//! 3. **Cached otherwise**: runtime detection is cached in a `OnceLock` (std).
//! 4. **Miri-safe**: under Miri, [`caps()`] returns portable-only caps.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod caps;
mod detect;

pub use caps::Caps;
pub use detect::{caps, detect_uncached, has_override, set_caps_override};
