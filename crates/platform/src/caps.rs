//! CPU capability representation.
//!
//! [`Caps`] answers one question: "which instruction sets may this process
//! legally execute?" Each bit is one ISA extension; kernels declare the bits
//! they need and dispatch checks them with [`Caps::has`].
//!
//! # Bit Layout
//!
//! - Bits 0-63: x86/x86_64 features
//! - Bits 64-127: aarch64 features

use core::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Core Capability Type
// ─────────────────────────────────────────────────────────────────────────────

/// CPU capabilities: a 128-bit feature bitset.
///
/// `Caps` is `Copy`, `Send`, and `Sync`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Caps(pub(crate) [u64; 2]);

impl Caps {
  /// Empty capability set (portable code only).
  pub const NONE: Self = Self([0; 2]);

  /// Create a capability set from raw words.
  ///
  /// Only available in test builds or with the `testing` feature.
  #[cfg(any(test, feature = "testing"))]
  #[inline]
  #[must_use]
  pub const fn from_raw(words: [u64; 2]) -> Self {
    Self(words)
  }

  /// Access the raw underlying words.
  #[cfg(any(test, feature = "testing"))]
  #[inline]
  #[must_use]
  pub const fn as_raw(&self) -> &[u64; 2] {
    &self.0
  }

  /// Check if all features in `required` are present.
  #[inline(always)]
  #[must_use]
  pub const fn has(self, required: Self) -> bool {
    (self.0[0] & required.0[0]) == required.0[0] && (self.0[1] & required.0[1]) == required.0[1]
  }

  /// Union of two capability sets.
  #[inline]
  #[must_use]
  pub const fn union(self, other: Self) -> Self {
    Self([self.0[0] | other.0[0], self.0[1] | other.0[1]])
  }

  /// Intersection of two capability sets.
  #[inline]
  #[must_use]
  pub const fn intersection(self, other: Self) -> Self {
    Self([self.0[0] & other.0[0], self.0[1] & other.0[1]])
  }

  /// Check if the capability set is empty.
  #[inline]
  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.0[0] == 0 && self.0[1] == 0
  }

  /// Number of features present.
  #[inline]
  #[must_use]
  pub const fn count(self) -> u32 {
    self.0[0].count_ones() + self.0[1].count_ones()
  }

  /// Capability set with a single bit set. Bits 64 and above land in the
  /// aarch64 word.
  #[inline]
  #[must_use]
  pub const fn bit(bit: u8) -> Self {
    let in_word = bit % 64;
    if bit < 64 {
      Self([1u64 << in_word, 0])
    } else {
      Self([0, 1u64 << in_word])
    }
  }

  /// Names of every known feature in this set, in bit order.
  pub fn feature_names(self) -> impl Iterator<Item = &'static str> {
    FEATURES
      .iter()
      .filter(move |(_, caps)| self.has(*caps))
      .map(|(name, _)| *name)
  }
}

impl core::ops::BitOr for Caps {
  type Output = Self;

  #[inline]
  fn bitor(self, rhs: Self) -> Self::Output {
    self.union(rhs)
  }
}

impl core::ops::BitAnd for Caps {
  type Output = Self;

  #[inline]
  fn bitand(self, rhs: Self) -> Self::Output {
    self.intersection(rhs)
  }
}

impl core::ops::BitOrAssign for Caps {
  #[inline]
  fn bitor_assign(&mut self, rhs: Self) {
    *self = self.union(rhs);
  }
}

impl fmt::Debug for Caps {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_set().entries(self.feature_names()).finish()
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// x86/x86_64 Features (bits 0-63)
// ─────────────────────────────────────────────────────────────────────────────

/// x86/x86_64 CPU features used by hash kernels.
pub mod x86 {
  use super::Caps;

  pub const SSE2: Caps = Caps::bit(0);
  pub const SSSE3: Caps = Caps::bit(2);

  /// Shift/mask gather kernels.
  pub const SSE2_READY: Caps = SSE2;
  /// Byte-permute gather kernels (`pshufb`).
  pub const SHUFFLE_READY: Caps = Caps([SSE2.0[0] | SSSE3.0[0], 0]);
}

// ─────────────────────────────────────────────────────────────────────────────
// aarch64 Features (bits 64-127)
// ─────────────────────────────────────────────────────────────────────────────

/// aarch64 CPU features used by hash kernels.
pub mod aarch64 {
  use super::Caps;

  /// Advanced SIMD. Baseline on AArch64.
  pub const NEON: Caps = Caps::bit(64);
}

const FEATURES: &[(&str, Caps)] = &[("sse2", x86::SSE2), ("ssse3", x86::SSSE3), ("neon", aarch64::NEON)];
