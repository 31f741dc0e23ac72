//! Kernel acceleration tiers.
//!
//! Tiers classify how a kernel routes bytes into lanes, from the byte-at-a-time
//! ground truth to full-width vector permutes. Higher tiers need more hardware.
//!
//! | Tier | Name | Bytes per step | Description |
//! |------|------|----------------|-------------|
//! | 0 | Reference | 1 | One byte per iteration, no alignment, ground truth |
//! | 1 | Portable | 16 | Aligned, fully unrolled scalar |
//! | 2 | Swar | 8 | Two 32-bit lanes packed per 64-bit register |
//! | 3 | Vector | 16 | 128-bit registers, shift/mask/OR gather |
//! | 4 | Permute | 16 | 128-bit registers, one byte-permute gather |

use core::fmt;

/// Kernel acceleration tier.
///
/// Tiers implement `Ord` with higher tiers being "greater".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum KernelTier {
  /// Byte-at-a-time reference. Always available.
  #[default]
  Reference = 0,

  /// Alignment-spliced, unrolled scalar. Always available.
  Portable = 1,

  /// Packed lanes in general-purpose registers. Always available.
  Swar = 2,

  /// 128-bit SIMD with shift/mask gathers.
  ///
  /// - x86_64: SSE2
  Vector = 3,

  /// 128-bit SIMD with a byte-permute gather.
  ///
  /// - x86_64: SSSE3 `pshufb`
  /// - aarch64: NEON `tbl`
  Permute = 4,
}

impl KernelTier {
  /// All tiers in ascending order.
  pub const ALL: [Self; 5] = [Self::Reference, Self::Portable, Self::Swar, Self::Vector, Self::Permute];

  #[inline]
  #[must_use]
  pub const fn as_u8(self) -> u8 {
    self as u8
  }

  /// Human-readable tier name.
  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Reference => "reference",
      Self::Portable => "portable",
      Self::Swar => "swar",
      Self::Vector => "vector",
      Self::Permute => "permute",
    }
  }

  /// Whether kernels of this tier need a runtime capability check.
  #[inline]
  #[must_use]
  pub const fn requires_runtime_detection(self) -> bool {
    matches!(self, Self::Vector | Self::Permute)
  }

  /// Whether kernels of this tier use vector registers.
  #[inline]
  #[must_use]
  pub const fn is_simd(self) -> bool {
    matches!(self, Self::Vector | Self::Permute)
  }
}

impl fmt::Display for KernelTier {
  #[inline]
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tier_ordering() {
    assert!(KernelTier::Reference < KernelTier::Portable);
    assert!(KernelTier::Portable < KernelTier::Swar);
    assert!(KernelTier::Swar < KernelTier::Vector);
    assert!(KernelTier::Vector < KernelTier::Permute);
  }

  #[test]
  fn all_is_ascending() {
    for (i, tier) in KernelTier::ALL.iter().enumerate() {
      assert_eq!(tier.as_u8() as usize, i);
    }
  }

  #[test]
  fn tier_names() {
    assert_eq!(KernelTier::Reference.name(), "reference");
    assert_eq!(KernelTier::Swar.name(), "swar");
    assert_eq!(KernelTier::Permute.name(), "permute");
  }

  #[test]
  fn runtime_detection() {
    assert!(!KernelTier::Reference.requires_runtime_detection());
    assert!(!KernelTier::Portable.requires_runtime_detection());
    assert!(!KernelTier::Swar.requires_runtime_detection());
    assert!(KernelTier::Vector.requires_runtime_detection());
    assert!(KernelTier::Permute.requires_runtime_detection());
  }

  #[test]
  fn default_is_reference() {
    assert_eq!(KernelTier::default(), KernelTier::Reference);
  }
}
