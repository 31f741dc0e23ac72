//! Error taxonomy for hash entry points.
//!
//! Every failure is detected before any hashing work begins, and each kind
//! maps to a stable numeric code so callers of the raw entry points can
//! discriminate without linking against this enum.

use core::fmt;

/// Return code of a successful raw hash call.
pub const SUCCESS: i32 = 0;

/// A hash call was rejected before any output was written.
///
/// # Examples
///
/// ```
/// use traits::HashError;
///
/// let err = HashError::OutputTooSmall;
/// assert_eq!(err.code(), -2);
/// assert_eq!(HashError::from_code(-2), Some(err));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum HashError {
  /// A required pointer (input, output, or key for keyed variants) was null.
  InvalidParameter,
  /// The output capacity is smaller than the digest size.
  OutputTooSmall,
  /// Two of the input, key, and output ranges share at least one byte.
  RangesOverlap,
  /// A keyed variant was given fewer than 16 key bytes.
  KeyTooSmall,
  /// A backend-specific entry point was called on a CPU without the
  /// instruction set that backend needs.
  UnsupportedBackend,
}

impl HashError {
  /// All error kinds, ordered by code.
  pub const ALL: [Self; 5] = [
    Self::InvalidParameter,
    Self::OutputTooSmall,
    Self::RangesOverlap,
    Self::KeyTooSmall,
    Self::UnsupportedBackend,
  ];

  /// Stable numeric code (always negative).
  #[inline]
  #[must_use]
  pub const fn code(self) -> i32 {
    match self {
      Self::InvalidParameter => -1,
      Self::OutputTooSmall => -2,
      Self::RangesOverlap => -3,
      Self::KeyTooSmall => -4,
      Self::UnsupportedBackend => -5,
    }
  }

  /// Inverse of [`code`](Self::code). `SUCCESS` and unknown codes map to `None`.
  #[inline]
  #[must_use]
  pub const fn from_code(code: i32) -> Option<Self> {
    match code {
      -1 => Some(Self::InvalidParameter),
      -2 => Some(Self::OutputTooSmall),
      -3 => Some(Self::RangesOverlap),
      -4 => Some(Self::KeyTooSmall),
      -5 => Some(Self::UnsupportedBackend),
      _ => None,
    }
  }

  /// Short lowercase description.
  #[inline]
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::InvalidParameter => "invalid parameter",
      Self::OutputTooSmall => "output buffer too small",
      Self::RangesOverlap => "input, key, and output ranges overlap",
      Self::KeyTooSmall => "key shorter than 16 bytes",
      Self::UnsupportedBackend => "backend not supported on this CPU",
    }
  }
}

/// Collapse a hash result into its raw return code.
#[inline]
#[must_use]
pub const fn result_code<T>(result: &Result<T, HashError>) -> i32 {
  match result {
    Ok(_) => SUCCESS,
    Err(err) => err.code(),
  }
}

impl fmt::Display for HashError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl core::error::Error for HashError {}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::{format, string::ToString};

  use super::*;

  #[test]
  fn codes_are_stable() {
    assert_eq!(HashError::InvalidParameter.code(), -1);
    assert_eq!(HashError::OutputTooSmall.code(), -2);
    assert_eq!(HashError::RangesOverlap.code(), -3);
    assert_eq!(HashError::KeyTooSmall.code(), -4);
    assert_eq!(HashError::UnsupportedBackend.code(), -5);
  }

  #[test]
  fn from_code_roundtrips_every_kind() {
    for err in HashError::ALL {
      assert_eq!(HashError::from_code(err.code()), Some(err));
    }
  }

  #[test]
  fn from_code_rejects_success_and_unknown() {
    assert_eq!(HashError::from_code(SUCCESS), None);
    assert_eq!(HashError::from_code(-6), None);
    assert_eq!(HashError::from_code(1), None);
    assert_eq!(HashError::from_code(i32::MIN), None);
  }

  #[test]
  fn codes_are_distinct_and_negative() {
    for (i, a) in HashError::ALL.iter().enumerate() {
      assert!(a.code() < SUCCESS);
      for b in &HashError::ALL[i + 1..] {
        assert_ne!(a.code(), b.code());
      }
    }
  }

  #[test]
  fn result_code_maps_ok_to_success() {
    let ok: Result<usize, HashError> = Ok(16);
    assert_eq!(result_code(&ok), SUCCESS);
    let err: Result<usize, HashError> = Err(HashError::RangesOverlap);
    assert_eq!(result_code(&err), -3);
  }

  #[test]
  fn display_message() {
    assert_eq!(HashError::KeyTooSmall.to_string(), "key shorter than 16 bytes");
    assert_eq!(HashError::OutputTooSmall.to_string(), "output buffer too small");
  }

  #[test]
  fn debug_impl() {
    assert_eq!(format!("{:?}", HashError::RangesOverlap), "RangesOverlap");
  }

  #[test]
  fn trait_bounds() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    fn assert_error<T: core::error::Error>() {}

    assert_send::<HashError>();
    assert_sync::<HashError>();
    assert_error::<HashError>();
  }

  #[test]
  fn error_has_no_source() {
    use core::error::Error;
    assert!(HashError::InvalidParameter.source().is_none());
  }
}
