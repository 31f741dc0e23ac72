//! Runtime configuration (forced kernels + thresholds).
//!
//! This module centralizes the selection knobs for both DJBX33A variants:
//! - optional forced kernel selection
//! - the length below which the wide variant stays on unrolled scalar code
//!
//! Knobs come from the environment (std only), read once per process:
//!
//! | Variable | Values |
//! |----------|--------|
//! | `HASHX4_X4DJBX33A_FORCE` | `auto`, `reference`, `unrolled`, `swar`, `sse2`, `ssse3`, `neon` |
//! | `HASHX4_X4DJBX33A_THRESHOLD` | byte length, default 64 |
//! | `HASHX4_DJBX33A_FORCE` | `auto`, `reference`, `unrolled` |
//!
//! Force values also accept the kernel names dispatch reports (`x86_64/ssse3`).
//!
//! Safety note: forced modes are always clamped to detected CPU capabilities.

use platform::Caps;

use crate::{
  djbx33a::kernels::{self as djbx33a_kernels, Djbx33aKernelId},
  x4djbx33a::kernels::{self as x4djbx33a_kernels, X4Djbx33aKernelId},
};

/// Default length below which automatic dispatch keeps the wide variant on
/// the unrolled scalar kernel.
pub const DEFAULT_VECTOR_THRESHOLD: usize = 64;

// ─────────────────────────────────────────────────────────────────────────────
// Force modes
// ─────────────────────────────────────────────────────────────────────────────

/// Forced kernel selection for X4-DJBX33A.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum X4Djbx33aForce {
  /// Use the default auto selector.
  #[default]
  Auto,
  /// Byte-at-a-time reference loop.
  Reference,
  /// Alignment-spliced, unrolled scalar loop.
  Unrolled,
  /// Two lanes per 64-bit word in general-purpose registers.
  Swar,
  /// x86_64 SSE2 shift/mask gather (if available).
  Sse2,
  /// x86_64 SSSE3 `pshufb` gather (if available).
  Ssse3,
  /// aarch64 NEON `tbl` gather (if available).
  Neon,
}

impl X4Djbx33aForce {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Auto => "auto",
      Self::Reference => "reference",
      Self::Unrolled => "unrolled",
      Self::Swar => "swar",
      Self::Sse2 => "sse2",
      Self::Ssse3 => "ssse3",
      Self::Neon => "neon",
    }
  }

  /// The kernel this mode pins, or `None` for [`Self::Auto`].
  #[must_use]
  pub const fn kernel(self) -> Option<X4Djbx33aKernelId> {
    match self {
      Self::Auto => None,
      Self::Reference => Some(X4Djbx33aKernelId::Reference),
      Self::Unrolled => Some(X4Djbx33aKernelId::Unrolled),
      Self::Swar => Some(X4Djbx33aKernelId::Swar),
      Self::Sse2 => Some(X4Djbx33aKernelId::Sse2),
      Self::Ssse3 => Some(X4Djbx33aKernelId::Ssse3),
      Self::Neon => Some(X4Djbx33aKernelId::Neon),
    }
  }

  /// The mode pinning `id`.
  #[must_use]
  pub const fn from_kernel(id: X4Djbx33aKernelId) -> Self {
    match id {
      X4Djbx33aKernelId::Reference => Self::Reference,
      X4Djbx33aKernelId::Unrolled => Self::Unrolled,
      X4Djbx33aKernelId::Swar => Self::Swar,
      X4Djbx33aKernelId::Sse2 => Self::Sse2,
      X4Djbx33aKernelId::Ssse3 => Self::Ssse3,
      X4Djbx33aKernelId::Neon => Self::Neon,
    }
  }

  /// Parse a force value (case-insensitive, surrounding whitespace ignored).
  ///
  /// Kernel names as reported by dispatch (`x86_64/ssse3`) are accepted too.
  #[must_use]
  pub fn parse(value: &str) -> Option<Self> {
    let value = value.trim();
    let is = |names: &[&str]| names.iter().any(|n| value.eq_ignore_ascii_case(n));

    if is(&["auto"]) {
      Some(Self::Auto)
    } else if is(&["reference", "ref", "scalar"]) {
      Some(Self::Reference)
    } else if is(&["unrolled", "copt", "portable"]) {
      Some(Self::Unrolled)
    } else if is(&["swar", "mmx"]) {
      Some(Self::Swar)
    } else if is(&["sse2"]) {
      Some(Self::Sse2)
    } else if is(&["ssse3", "shuffle", "pshufb"]) {
      Some(Self::Ssse3)
    } else if is(&["neon"]) {
      Some(Self::Neon)
    } else {
      x4djbx33a_kernels::id_from_name(value).map(Self::from_kernel)
    }
  }
}

/// Forced kernel selection for narrow DJBX33A.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Djbx33aForce {
  /// Use the default auto selector.
  #[default]
  Auto,
  /// Byte-at-a-time reference loop.
  Reference,
  /// Alignment-spliced, unrolled scalar loop.
  Unrolled,
}

impl Djbx33aForce {
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Auto => "auto",
      Self::Reference => "reference",
      Self::Unrolled => "unrolled",
    }
  }

  #[must_use]
  pub const fn kernel(self) -> Option<Djbx33aKernelId> {
    match self {
      Self::Auto => None,
      Self::Reference => Some(Djbx33aKernelId::Reference),
      Self::Unrolled => Some(Djbx33aKernelId::Unrolled),
    }
  }

  /// The mode pinning `id`.
  #[must_use]
  pub const fn from_kernel(id: Djbx33aKernelId) -> Self {
    match id {
      Djbx33aKernelId::Reference => Self::Reference,
      Djbx33aKernelId::Unrolled => Self::Unrolled,
    }
  }

  /// Parse a force value (case-insensitive, surrounding whitespace ignored).
  #[must_use]
  pub fn parse(value: &str) -> Option<Self> {
    let value = value.trim();
    let is = |names: &[&str]| names.iter().any(|n| value.eq_ignore_ascii_case(n));

    if is(&["auto"]) {
      Some(Self::Auto)
    } else if is(&["ref", "scalar"]) {
      Some(Self::Reference)
    } else if is(&["copt", "portable"]) {
      Some(Self::Unrolled)
    } else {
      djbx33a_kernels::id_from_name(value).map(Self::from_kernel)
    }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Effective configuration
// ─────────────────────────────────────────────────────────────────────────────

/// X4-DJBX33A selection tunables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct X4Djbx33aTunables {
  /// Inputs shorter than this use the unrolled scalar kernel under auto
  /// selection.
  pub vector_threshold: usize,
}

/// Full X4-DJBX33A runtime configuration (after applying overrides).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct X4Djbx33aConfig {
  /// Requested force mode (env).
  pub requested_force: X4Djbx33aForce,
  /// Force mode clamped to detected CPU capabilities.
  pub effective_force: X4Djbx33aForce,
  /// Thresholds used by the selector.
  pub tunables: X4Djbx33aTunables,
}

/// Full narrow DJBX33A runtime configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Djbx33aConfig {
  pub requested_force: Djbx33aForce,
  pub effective_force: Djbx33aForce,
}

/// Both variants' configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
  pub x4djbx33a: X4Djbx33aConfig,
  pub djbx33a: Djbx33aConfig,
}

#[derive(Clone, Copy, Debug, Default)]
struct Overrides {
  x4_force: X4Djbx33aForce,
  x4_threshold: Option<usize>,
  narrow_force: Djbx33aForce,
}

#[cfg(feature = "std")]
fn read_env_overrides() -> Overrides {
  fn var(name: &str) -> Option<std::string::String> {
    let value = std::env::var(name).ok()?;
    if value.trim().is_empty() { None } else { Some(value) }
  }

  Overrides {
    x4_force: var("HASHX4_X4DJBX33A_FORCE")
      .and_then(|v| X4Djbx33aForce::parse(&v))
      .unwrap_or_default(),
    x4_threshold: var("HASHX4_X4DJBX33A_THRESHOLD").and_then(|v| v.trim().parse::<usize>().ok()),
    narrow_force: var("HASHX4_DJBX33A_FORCE")
      .and_then(|v| Djbx33aForce::parse(&v))
      .unwrap_or_default(),
  }
}

#[cfg(feature = "std")]
fn overrides() -> Overrides {
  use std::sync::OnceLock;
  static OVERRIDES: OnceLock<Overrides> = OnceLock::new();
  *OVERRIDES.get_or_init(read_env_overrides)
}

#[cfg(not(feature = "std"))]
fn overrides() -> Overrides {
  Overrides::default()
}

/// Replace a forced kernel the CPU cannot run with [`X4Djbx33aForce::Auto`].
#[inline]
#[must_use]
pub(crate) fn clamp_force_to_caps(requested: X4Djbx33aForce, caps: Caps) -> X4Djbx33aForce {
  match requested.kernel() {
    Some(id) if id.is_available(caps) => requested,
    Some(_) => X4Djbx33aForce::Auto,
    None => requested,
  }
}

#[inline]
#[must_use]
fn resolve(ov: Overrides, caps: Caps) -> Config {
  Config {
    x4djbx33a: X4Djbx33aConfig {
      requested_force: ov.x4_force,
      effective_force: clamp_force_to_caps(ov.x4_force, caps),
      tunables: X4Djbx33aTunables {
        vector_threshold: ov.x4_threshold.unwrap_or(DEFAULT_VECTOR_THRESHOLD),
      },
    },
    // Narrow kernels are portable; nothing to clamp.
    djbx33a: Djbx33aConfig {
      requested_force: ov.narrow_force,
      effective_force: ov.narrow_force,
    },
  }
}

/// Get the effective configuration for the current platform.
#[inline]
#[must_use]
pub fn get() -> Config {
  resolve(overrides(), platform::caps())
}
