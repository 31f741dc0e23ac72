//! Automatic X4-DJBX33A kernel selection.
//!
//! Resolved once per process from [`platform::caps()`] and the environment
//! configuration, then cached. Inputs shorter than the configured threshold
//! run on the unrolled scalar kernel; longer inputs run on the best available
//! kernel. A forced kernel applies to every length.

use backend::{Candidate, OnceCache, select};
use platform::Caps;

use super::kernels::{LanesFn, X4Djbx33aKernelId, lanes_fn, required_caps};
use crate::{config, lanes::Lanes};

/// Auto-selection order for long inputs, best first.
const CANDIDATES: &[Candidate<X4Djbx33aKernelId>] = &[
  candidate(X4Djbx33aKernelId::Ssse3),
  candidate(X4Djbx33aKernelId::Neon),
  candidate(X4Djbx33aKernelId::Sse2),
  candidate(X4Djbx33aKernelId::Unrolled),
];

const fn candidate(id: X4Djbx33aKernelId) -> Candidate<X4Djbx33aKernelId> {
  Candidate::new(id.as_str(), required_caps(id), id)
}

#[derive(Clone, Copy)]
struct ActiveDispatch {
  threshold: usize,
  small: LanesFn,
  large: LanesFn,
  small_id: X4Djbx33aKernelId,
  large_id: X4Djbx33aKernelId,
}

static ACTIVE: OnceCache<ActiveDispatch> = OnceCache::new();

/// `id` if it can run under `caps`, otherwise the unrolled scalar kernel.
#[inline]
#[must_use]
fn resolve(id: X4Djbx33aKernelId, caps: Caps) -> X4Djbx33aKernelId {
  if id.is_available(caps) {
    id
  } else {
    X4Djbx33aKernelId::Unrolled
  }
}

#[inline]
#[must_use]
fn kernel(id: X4Djbx33aKernelId) -> LanesFn {
  lanes_fn(id).unwrap_or(super::portable::unrolled)
}

#[must_use]
fn build(caps: Caps, cfg: config::X4Djbx33aConfig) -> ActiveDispatch {
  let (small_id, large_id) = match cfg.effective_force.kernel() {
    Some(id) => {
      let id = resolve(id, caps);
      (id, id)
    }
    None => {
      let best = select(caps, CANDIDATES).func;
      (X4Djbx33aKernelId::Unrolled, resolve(best, caps))
    }
  };

  ActiveDispatch {
    threshold: cfg.tunables.vector_threshold,
    small: kernel(small_id),
    large: kernel(large_id),
    small_id,
    large_id,
  }
}

#[inline]
#[must_use]
fn active() -> ActiveDispatch {
  ACTIVE.get_or_init(|| build(platform::caps(), config::get().x4djbx33a))
}

#[inline]
#[must_use]
fn select_for(d: &ActiveDispatch, len: usize) -> (LanesFn, X4Djbx33aKernelId) {
  if len < d.threshold {
    (d.small, d.small_id)
  } else {
    (d.large, d.large_id)
  }
}

/// Kernel automatic dispatch runs for an input of `len` bytes.
#[inline]
#[must_use]
pub fn kernel_for_len(len: usize) -> X4Djbx33aKernelId {
  select_for(&active(), len).1
}

/// Name of the kernel automatic dispatch runs for an input of `len` bytes.
#[inline]
#[must_use]
pub fn kernel_name_for_len(len: usize) -> &'static str {
  kernel_for_len(len).as_str()
}

/// Hash `data` into four lanes with the automatically selected kernel.
#[inline]
#[must_use]
pub fn lanes(data: &[u8]) -> Lanes {
  let (f, _) = select_for(&active(), data.len());
  f(data)
}

#[cfg(test)]
mod tests {
  use platform::caps::{aarch64, x86};

  use super::*;
  use crate::config::{X4Djbx33aForce, X4Djbx33aTunables};

  fn cfg(force: X4Djbx33aForce, threshold: usize) -> config::X4Djbx33aConfig {
    config::X4Djbx33aConfig {
      requested_force: force,
      effective_force: force,
      tunables: X4Djbx33aTunables {
        vector_threshold: threshold,
      },
    }
  }

  #[test]
  fn portable_only_caps_stay_scalar() {
    let d = build(Caps::NONE, cfg(X4Djbx33aForce::Auto, 64));
    assert_eq!(select_for(&d, 0).1, X4Djbx33aKernelId::Unrolled);
    assert_eq!(select_for(&d, 1 << 20).1, X4Djbx33aKernelId::Unrolled);
  }

  #[test]
  #[cfg(target_arch = "x86_64")]
  fn x86_prefers_shuffle_above_threshold() {
    let d = build(x86::SHUFFLE_READY, cfg(X4Djbx33aForce::Auto, 64));
    assert_eq!(select_for(&d, 63).1, X4Djbx33aKernelId::Unrolled);
    assert_eq!(select_for(&d, 64).1, X4Djbx33aKernelId::Ssse3);

    let d = build(x86::SSE2, cfg(X4Djbx33aForce::Auto, 64));
    assert_eq!(select_for(&d, 1000).1, X4Djbx33aKernelId::Sse2);
  }

  #[test]
  #[cfg(target_arch = "aarch64")]
  fn aarch64_prefers_neon_above_threshold() {
    let d = build(aarch64::NEON, cfg(X4Djbx33aForce::Auto, 32));
    assert_eq!(select_for(&d, 31).1, X4Djbx33aKernelId::Unrolled);
    assert_eq!(select_for(&d, 32).1, X4Djbx33aKernelId::Neon);
  }

  #[test]
  fn foreign_caps_fall_back() {
    #[cfg(target_arch = "x86_64")]
    let foreign = aarch64::NEON;
    #[cfg(not(target_arch = "x86_64"))]
    let foreign = x86::SHUFFLE_READY;

    let d = build(foreign, cfg(X4Djbx33aForce::Auto, 0));
    assert_eq!(select_for(&d, 100).1, X4Djbx33aKernelId::Unrolled);
  }

  #[test]
  fn forced_kernel_covers_every_length() {
    let d = build(Caps::NONE, cfg(X4Djbx33aForce::Swar, 64));
    assert_eq!(select_for(&d, 0).1, X4Djbx33aKernelId::Swar);
    assert_eq!(select_for(&d, 4096).1, X4Djbx33aKernelId::Swar);

    let d = build(Caps::NONE, cfg(X4Djbx33aForce::Reference, 64));
    assert_eq!(select_for(&d, 4096).1, X4Djbx33aKernelId::Reference);
  }

  #[test]
  fn forced_kernel_unavailable_resolves_to_unrolled() {
    let d = build(Caps::NONE, cfg(X4Djbx33aForce::Ssse3, 64));
    assert_eq!(select_for(&d, 4096).1, X4Djbx33aKernelId::Unrolled);
  }

  #[test]
  fn active_dispatch_matches_reference() {
    let data: [u8; 200] = core::array::from_fn(|i| (i * 3 + 1) as u8);
    for len in [0, 1, 15, 16, 63, 64, 65, 200] {
      assert_eq!(lanes(&data[..len]), super::super::portable::reference(&data[..len]));
    }
    assert!(!kernel_name_for_len(1 << 16).is_empty());
  }
}
