use backend::KernelTier;
use platform::Caps;

use super::portable;
use crate::lanes::Lanes;

/// Whole-buffer kernel: hashes `data` into four lanes.
pub(crate) type LanesFn = fn(&[u8]) -> Lanes;

/// Every X4-DJBX33A kernel. All variants exist on every target; SIMD kernels
/// are only runnable where [`X4Djbx33aKernelId::is_available`] says so.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum X4Djbx33aKernelId {
  Reference = 0,
  Unrolled = 1,
  Swar = 2,
  Sse2 = 3,
  Ssse3 = 4,
  Neon = 5,
}

/// Kernels compiled for the current target, reference first.
pub const ALL: &[X4Djbx33aKernelId] = &[
  X4Djbx33aKernelId::Reference,
  X4Djbx33aKernelId::Unrolled,
  X4Djbx33aKernelId::Swar,
  #[cfg(target_arch = "x86_64")]
  X4Djbx33aKernelId::Sse2,
  #[cfg(target_arch = "x86_64")]
  X4Djbx33aKernelId::Ssse3,
  #[cfg(target_arch = "aarch64")]
  X4Djbx33aKernelId::Neon,
];

impl X4Djbx33aKernelId {
  #[inline]
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Reference => "reference",
      Self::Unrolled => "unrolled",
      Self::Swar => "swar",
      Self::Sse2 => "x86_64/sse2",
      Self::Ssse3 => "x86_64/ssse3",
      Self::Neon => "aarch64/neon",
    }
  }

  #[inline]
  #[must_use]
  pub const fn tier(self) -> KernelTier {
    match self {
      Self::Reference => KernelTier::Reference,
      Self::Unrolled => KernelTier::Portable,
      Self::Swar => KernelTier::Swar,
      Self::Sse2 => KernelTier::Vector,
      Self::Ssse3 | Self::Neon => KernelTier::Permute,
    }
  }

  /// Whether this kernel is compiled in and `caps` satisfies its requirements.
  #[inline]
  #[must_use]
  pub fn is_available(self, caps: Caps) -> bool {
    lanes_fn(self).is_some() && caps.has(required_caps(self))
  }
}

/// Kernel compiled for this target whose [`X4Djbx33aKernelId::as_str`] name
/// matches `name`, ignoring ASCII case.
#[must_use]
pub fn id_from_name(name: &str) -> Option<X4Djbx33aKernelId> {
  ALL.iter().copied().find(|id| id.as_str().eq_ignore_ascii_case(name))
}

/// Capabilities a kernel needs. Kernels for another architecture report a
/// requirement no CPU of this target can satisfy.
#[inline]
#[must_use]
pub const fn required_caps(id: X4Djbx33aKernelId) -> Caps {
  match id {
    X4Djbx33aKernelId::Reference | X4Djbx33aKernelId::Unrolled | X4Djbx33aKernelId::Swar => Caps::NONE,
    X4Djbx33aKernelId::Sse2 => platform::caps::x86::SSE2_READY,
    X4Djbx33aKernelId::Ssse3 => platform::caps::x86::SHUFFLE_READY,
    X4Djbx33aKernelId::Neon => platform::caps::aarch64::NEON,
  }
}

/// Kernel function for `id`, or `None` if it is not compiled for this target.
///
/// Callers must check [`required_caps`] before invoking a SIMD kernel.
#[must_use]
pub(crate) fn lanes_fn(id: X4Djbx33aKernelId) -> Option<LanesFn> {
  match id {
    X4Djbx33aKernelId::Reference => Some(portable::reference),
    X4Djbx33aKernelId::Unrolled => Some(portable::unrolled),
    X4Djbx33aKernelId::Swar => Some(portable::swar),
    #[cfg(target_arch = "x86_64")]
    X4Djbx33aKernelId::Sse2 => Some(super::x86_64::sse2),
    #[cfg(target_arch = "x86_64")]
    X4Djbx33aKernelId::Ssse3 => Some(super::x86_64::ssse3),
    #[cfg(target_arch = "aarch64")]
    X4Djbx33aKernelId::Neon => Some(super::aarch64::neon),
    #[allow(unreachable_patterns)]
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn names_round_trip() {
    for &id in ALL {
      assert_eq!(id_from_name(id.as_str()), Some(id));
    }
    assert_eq!(id_from_name("avx2"), None);
  }

  #[test]
  fn portable_kernels_always_available() {
    for id in [
      X4Djbx33aKernelId::Reference,
      X4Djbx33aKernelId::Unrolled,
      X4Djbx33aKernelId::Swar,
    ] {
      assert!(id.is_available(Caps::NONE));
      assert!(!id.tier().is_simd());
    }
  }

  #[test]
  fn simd_kernels_need_caps() {
    assert!(!X4Djbx33aKernelId::Sse2.is_available(Caps::NONE));
    assert!(!X4Djbx33aKernelId::Ssse3.is_available(Caps::NONE));
    assert!(!X4Djbx33aKernelId::Neon.is_available(Caps::NONE));
    assert!(X4Djbx33aKernelId::Ssse3.tier().is_simd());
  }

  #[test]
  fn all_is_compiled() {
    for &id in ALL {
      assert!(lanes_fn(id).is_some(), "{}", id.as_str());
    }
  }

  #[test]
  #[cfg(target_arch = "x86_64")]
  fn foreign_kernels_missing_on_x86() {
    assert!(lanes_fn(X4Djbx33aKernelId::Neon).is_none());
    assert!(!X4Djbx33aKernelId::Neon.is_available(platform::caps::aarch64::NEON));
  }
}
