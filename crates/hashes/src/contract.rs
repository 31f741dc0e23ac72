//! Buffer contract shared by every hash entry point.
//!
//! Validation runs on raw addresses so the same checks cover the safe slice API
//! and the raw `(ptr, len)` entry points, where aliasing is actually possible.
//! It is a pure pre-check: nothing is hashed or written until it passes.
//!
//! Checks, in order:
//!
//! 1. input and output non-null, key non-null for keyed variants
//!    ([`HashError::InvalidParameter`])
//! 2. output capacity at least the digest size ([`HashError::OutputTooSmall`])
//! 3. keyed variants: key at least 16 bytes ([`HashError::KeyTooSmall`])
//! 4. input/output, input/key, output/key pairwise disjoint
//!    ([`HashError::RangesOverlap`])

use traits::HashError;

/// A byte range identified by address. A zero start models a null pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
  start: usize,
  len: usize,
}

impl Region {
  #[inline]
  #[must_use]
  pub const fn new(start: usize, len: usize) -> Self {
    Self { start, len }
  }

  /// Region covered by a slice.
  #[inline]
  #[must_use]
  pub fn of(bytes: &[u8]) -> Self {
    Self::new(bytes.as_ptr().addr(), bytes.len())
  }

  /// Region covered by a raw pointer and length.
  #[inline]
  #[must_use]
  pub fn from_raw(ptr: *const u8, len: usize) -> Self {
    Self::new(ptr.addr(), len)
  }

  #[inline]
  #[must_use]
  pub const fn is_null(self) -> bool {
    self.start == 0
  }

  #[inline]
  #[must_use]
  pub const fn len(self) -> usize {
    self.len
  }

  #[inline]
  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.len == 0
  }

  /// Address of the last byte. Only meaningful for non-empty regions.
  #[inline]
  const fn last(self) -> usize {
    self.start.saturating_add(self.len - 1)
  }

  /// Whether `addr` lies inside this region.
  #[inline]
  const fn contains(self, addr: usize) -> bool {
    addr >= self.start && addr - self.start < self.len
  }

  /// Whether either region's first or last byte falls inside the other.
  ///
  /// An empty region has no last byte, but its start address still counts:
  /// a zero-length range pointing into another range overlaps it. Two empty
  /// regions never overlap.
  #[inline]
  #[must_use]
  pub const fn overlaps(self, other: Self) -> bool {
    other.contains(self.start)
      || self.contains(other.start)
      || (!self.is_empty() && other.contains(self.last()))
      || (!other.is_empty() && self.contains(other.last()))
  }
}

/// Size requirements of one hash variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contract {
  /// Digest size in bytes; the output must hold at least this many.
  pub output_size: usize,
  /// Minimum key size in bytes; `0` marks an unkeyed variant whose key is
  /// ignored entirely.
  pub key_size: usize,
}

impl Contract {
  #[inline]
  #[must_use]
  pub const fn new(output_size: usize, key_size: usize) -> Self {
    Self { output_size, key_size }
  }

  #[inline]
  #[must_use]
  pub const fn is_keyed(self) -> bool {
    self.key_size > 0
  }

  /// Check the buffer contract for one call.
  ///
  /// # Errors
  ///
  /// The first failing check, in the order listed in the module docs.
  pub const fn validate(self, input: Region, key: Region, output: Region) -> Result<(), HashError> {
    let keyed = self.is_keyed();

    if input.is_null() || output.is_null() || (keyed && key.is_null()) {
      return Err(HashError::InvalidParameter);
    }
    if output.len < self.output_size {
      return Err(HashError::OutputTooSmall);
    }
    if keyed && key.len < self.key_size {
      return Err(HashError::KeyTooSmall);
    }
    if input.overlaps(output) {
      return Err(HashError::RangesOverlap);
    }
    if keyed && (input.overlaps(key) || output.overlaps(key)) {
      return Err(HashError::RangesOverlap);
    }
    Ok(())
  }
}
