//! Narrow DJBX33A kernel selection.
//!
//! Both kernels are portable, so the choice depends only on configuration:
//! the unrolled kernel unless `HASHX4_DJBX33A_FORCE` pins another.

use backend::OnceCache;

use super::kernels::{Djbx33aKernelId, state_fn};
use crate::config::{self, Djbx33aConfig};

#[derive(Clone, Copy)]
struct ActiveDispatch {
  id: Djbx33aKernelId,
  f: fn(&[u8]) -> u32,
}

static ACTIVE: OnceCache<ActiveDispatch> = OnceCache::new();

#[must_use]
fn build(cfg: Djbx33aConfig) -> ActiveDispatch {
  let id = cfg.effective_force.kernel().unwrap_or(Djbx33aKernelId::Unrolled);
  ActiveDispatch { id, f: state_fn(id) }
}

#[inline]
#[must_use]
fn active() -> ActiveDispatch {
  ACTIVE.get_or_init(|| build(config::get().djbx33a))
}

/// Kernel automatic dispatch runs (the same for every length).
#[inline]
#[must_use]
pub fn kernel_for_len(_len: usize) -> Djbx33aKernelId {
  active().id
}

#[inline]
#[must_use]
pub fn kernel_name_for_len(len: usize) -> &'static str {
  kernel_for_len(len).as_str()
}

/// Accumulator for `data` from the selected kernel.
#[inline]
#[must_use]
pub fn state(data: &[u8]) -> u32 {
  (active().f)(data)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::Djbx33aForce;

  fn cfg(force: Djbx33aForce) -> Djbx33aConfig {
    Djbx33aConfig {
      requested_force: force,
      effective_force: force,
    }
  }

  #[test]
  fn auto_is_unrolled() {
    assert_eq!(build(cfg(Djbx33aForce::Auto)).id, Djbx33aKernelId::Unrolled);
  }

  #[test]
  fn force_reference() {
    assert_eq!(build(cfg(Djbx33aForce::Reference)).id, Djbx33aKernelId::Reference);
  }

  #[test]
  fn state_matches_reference() {
    let data = [9u8; 50];
    assert_eq!(state(&data), super::super::kernels::reference(&data));
  }
}
