//! Capability detection.
//!
//! - Compile-time detection (via `cfg!(target_feature = "...")`)
//! - Runtime detection (via `is_x86_feature_detected!` and friends, std only)
//! - Caching (via `OnceLock` with `std`; without `std` only compile-time
//!   features are reported, which is a constant)
//! - A programmatic override for tests and bare-metal targets
//! - Miri fallback (always portable)

use core::sync::atomic::{AtomicBool, Ordering};
#[cfg(target_has_atomic = "64")]
use core::sync::atomic::AtomicU64;

use crate::caps::Caps;

// ─────────────────────────────────────────────────────────────────────────────
// Override Support
// ─────────────────────────────────────────────────────────────────────────────

static OVERRIDE_SET: AtomicBool = AtomicBool::new(false);

#[cfg(target_has_atomic = "64")]
static OVERRIDE_BITS: [AtomicU64; 2] = [AtomicU64::new(0), AtomicU64::new(0)];

/// Set or clear the capabilities override.
///
/// While set, [`caps`] returns the override instead of detected features.
/// Dispatch tables are resolved once per process, so the override only
/// affects selections made after it is installed. On targets without 64-bit
/// atomics the override is ignored.
pub fn set_caps_override(value: Option<Caps>) {
  #[cfg(target_has_atomic = "64")]
  {
    match value {
      Some(caps) => {
        OVERRIDE_BITS[0].store(caps.0[0], Ordering::Relaxed);
        OVERRIDE_BITS[1].store(caps.0[1], Ordering::Relaxed);
        OVERRIDE_SET.store(true, Ordering::Release);
      }
      None => OVERRIDE_SET.store(false, Ordering::Release),
    }
  }

  #[cfg(not(target_has_atomic = "64"))]
  {
    let _ = value;
  }
}

/// Check if an override is currently set.
#[inline]
#[must_use]
pub fn has_override() -> bool {
  OVERRIDE_SET.load(Ordering::Acquire)
}

fn get_override() -> Option<Caps> {
  if !OVERRIDE_SET.load(Ordering::Acquire) {
    return None;
  }

  #[cfg(target_has_atomic = "64")]
  {
    Some(Caps([
      OVERRIDE_BITS[0].load(Ordering::Relaxed),
      OVERRIDE_BITS[1].load(Ordering::Relaxed),
    ]))
  }

  #[cfg(not(target_has_atomic = "64"))]
  {
    None
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main API
// ─────────────────────────────────────────────────────────────────────────────

/// Get detected CPU capabilities.
///
/// Under Miri this always returns [`Caps::NONE`] so that no SIMD intrinsic is
/// interpreted.
#[inline]
#[must_use]
pub fn caps() -> Caps {
  #[cfg(miri)]
  {
    Caps::NONE
  }

  #[cfg(not(miri))]
  {
    if let Some(caps) = get_override() {
      return caps;
    }

    #[cfg(feature = "std")]
    {
      use std::sync::OnceLock;
      static CACHED: OnceLock<Caps> = OnceLock::new();
      *CACHED.get_or_init(detect_uncached)
    }

    #[cfg(not(feature = "std"))]
    {
      detect_uncached()
    }
  }
}

/// Detect capabilities without caching or overrides.
#[inline]
#[must_use]
pub fn detect_uncached() -> Caps {
  let caps = compile_time();

  #[cfg(feature = "std")]
  {
    caps.union(runtime())
  }

  #[cfg(not(feature = "std"))]
  {
    caps
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Compile-time detection
// ─────────────────────────────────────────────────────────────────────────────

#[allow(unused_mut)]
const fn compile_time() -> Caps {
  #[allow(unused_imports)]
  use crate::caps::{aarch64, x86};

  let mut caps = Caps::NONE;

  if cfg!(all(any(target_arch = "x86_64", target_arch = "x86"), target_feature = "sse2")) {
    caps = caps.union(x86::SSE2);
  }
  if cfg!(all(any(target_arch = "x86_64", target_arch = "x86"), target_feature = "ssse3")) {
    caps = caps.union(x86::SSSE3);
  }
  if cfg!(all(target_arch = "aarch64", target_feature = "neon")) {
    caps = caps.union(aarch64::NEON);
  }

  caps
}

// ─────────────────────────────────────────────────────────────────────────────
// Runtime detection (std only)
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(all(feature = "std", any(target_arch = "x86_64", target_arch = "x86")))]
fn runtime() -> Caps {
  use crate::caps::x86;

  let mut caps = Caps::NONE;
  if std::arch::is_x86_feature_detected!("sse2") {
    caps = caps.union(x86::SSE2);
  }
  if std::arch::is_x86_feature_detected!("ssse3") {
    caps = caps.union(x86::SSSE3);
  }
  caps
}

#[cfg(all(feature = "std", target_arch = "aarch64"))]
fn runtime() -> Caps {
  use crate::caps::aarch64;

  if std::arch::is_aarch64_feature_detected!("neon") {
    aarch64::NEON
  } else {
    Caps::NONE
  }
}

#[cfg(all(
  feature = "std",
  not(any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64"))
))]
fn runtime() -> Caps {
  Caps::NONE
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::caps::{aarch64, x86};

  #[test]
  fn detect_uncached_is_stable() {
    assert_eq!(detect_uncached(), detect_uncached());
  }

  #[test]
  fn compile_time_is_subset_of_detected() {
    assert!(detect_uncached().has(compile_time()));
  }

  #[test]
  #[cfg(all(target_arch = "x86_64", not(miri)))]
  fn x86_64_always_has_sse2() {
    assert!(detect_uncached().has(x86::SSE2));
    assert!(!detect_uncached().has(aarch64::NEON));
  }

  #[test]
  #[cfg(all(target_arch = "aarch64", not(miri)))]
  fn aarch64_always_has_neon() {
    assert!(detect_uncached().has(aarch64::NEON));
    assert!(!detect_uncached().has(x86::SSE2));
  }

  // The only test that touches the global override; keeping it in one place
  // avoids racing with other tests in this binary.
  #[test]
  #[cfg(all(target_has_atomic = "64", not(miri)))]
  fn override_replaces_and_restores_detection() {
    let detected = caps();

    set_caps_override(Some(Caps::NONE));
    assert!(has_override());
    assert_eq!(caps(), Caps::NONE);

    let fake = x86::SHUFFLE_READY | aarch64::NEON;
    set_caps_override(Some(fake));
    assert_eq!(caps(), fake);

    set_caps_override(None);
    assert!(!has_override());
    assert_eq!(caps(), detected);
  }
}
