//! Kernel selection.
//!
//! - [`Candidate`]: a kernel with capability requirements
//! - [`Selected`]: the result of kernel selection
//! - [`select`]: choose the best kernel from an ordered candidate list
//!
//! Algorithm crates list candidates best-first and end the list with a
//! portable fallback (`Caps::NONE`):
//!
//! ```
//! use backend::dispatch::{Candidate, select};
//! use platform::{Caps, caps::x86};
//!
//! fn fast(data: &[u8]) -> usize { data.len() }
//! fn portable(data: &[u8]) -> usize { data.len() }
//!
//! let candidates: &[Candidate<fn(&[u8]) -> usize>] = &[
//!   Candidate::new("x86_64/ssse3", x86::SHUFFLE_READY, fast),
//!   Candidate::new("portable", Caps::NONE, portable),
//! ];
//! let chosen = select(Caps::NONE, candidates);
//! assert_eq!(chosen.name, "portable");
//! ```

use platform::Caps;

// ─────────────────────────────────────────────────────────────────────────────
// Core Types
// ─────────────────────────────────────────────────────────────────────────────

/// A candidate kernel with capability requirements.
///
/// Candidates are ordered from best to worst. The dispatcher selects the
/// first candidate whose requirements are satisfied by the detected capabilities.
#[derive(Clone, Copy, Debug)]
pub struct Candidate<F> {
  /// Human-readable name for diagnostics (e.g., "x86_64/ssse3").
  pub name: &'static str,
  /// Required CPU capabilities. Must be a subset of detected caps.
  pub requires: Caps,
  /// The kernel.
  pub func: F,
}

impl<F> Candidate<F> {
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, requires: Caps, func: F) -> Self {
    Self { name, requires, func }
  }
}

/// The result of kernel selection.
#[derive(Clone, Copy, Debug)]
pub struct Selected<F> {
  /// Name of the selected kernel.
  pub name: &'static str,
  /// The selected kernel.
  pub func: F,
}

impl<F> Selected<F> {
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, func: F) -> Self {
    Self { name, func }
  }
}

/// Select the best kernel from a candidate list.
///
/// Returns the first candidate whose `requires` is satisfied by `caps`.
///
/// # Panics
///
/// Panics if no candidate matches. A list that ends with a `Caps::NONE`
/// candidate always matches.
#[inline]
#[must_use]
pub fn select<F: Copy>(caps: Caps, candidates: &[Candidate<F>]) -> Selected<F> {
  match try_select(caps, candidates) {
    Some(selected) => selected,
    None => panic!("no matching kernel: candidate list must end with a portable fallback"),
  }
}

/// Like [`select`], but returns `None` instead of panicking.
#[inline]
#[must_use]
pub fn try_select<F: Copy>(caps: Caps, candidates: &[Candidate<F>]) -> Option<Selected<F>> {
  candidates
    .iter()
    .find(|c| caps.has(c.requires))
    .map(|c| Selected::new(c.name, c.func))
}
