//! Narrow DJBX33A kernels: one 32-bit accumulator.

#![allow(clippy::indexing_slicing)] // Fixed-size block arrays, constant indices

use backend::KernelTier;

use crate::lanes::{SEED, fold, prefix_len, step};

const ALIGN: usize = 16;
const STRIDE: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Djbx33aKernelId {
  Reference = 0,
  Unrolled = 1,
}

pub const ALL: &[Djbx33aKernelId] = &[Djbx33aKernelId::Reference, Djbx33aKernelId::Unrolled];

impl Djbx33aKernelId {
  #[inline]
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Reference => "reference",
      Self::Unrolled => "unrolled",
    }
  }

  #[inline]
  #[must_use]
  pub const fn tier(self) -> KernelTier {
    match self {
      Self::Reference => KernelTier::Reference,
      Self::Unrolled => KernelTier::Portable,
    }
  }
}

#[must_use]
pub fn id_from_name(name: &str) -> Option<Djbx33aKernelId> {
  ALL.iter().copied().find(|id| id.as_str().eq_ignore_ascii_case(name))
}

#[must_use]
pub fn state_fn(id: Djbx33aKernelId) -> fn(&[u8]) -> u32 {
  match id {
    Djbx33aKernelId::Reference => reference,
    Djbx33aKernelId::Unrolled => unrolled,
  }
}

#[must_use]
pub(crate) fn reference(data: &[u8]) -> u32 {
  fold(SEED, data)
}

/// Byte-wise up to a 16-byte boundary, then 16 bytes per iteration, then the
/// tail byte-wise.
#[must_use]
pub(crate) fn unrolled(data: &[u8]) -> u32 {
  let (prefix, rest) = data.split_at(prefix_len(data, ALIGN));
  let mut h = fold(SEED, prefix);

  let (blocks, tail) = rest.as_chunks::<STRIDE>();
  for b in blocks {
    h = step(h, b[0]);
    h = step(h, b[1]);
    h = step(h, b[2]);
    h = step(h, b[3]);
    h = step(h, b[4]);
    h = step(h, b[5]);
    h = step(h, b[6]);
    h = step(h, b[7]);
    h = step(h, b[8]);
    h = step(h, b[9]);
    h = step(h, b[10]);
    h = step(h, b[11]);
    h = step(h, b[12]);
    h = step(h, b[13]);
    h = step(h, b[14]);
    h = step(h, b[15]);
  }

  fold(h, tail)
}
