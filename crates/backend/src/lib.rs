//! Dispatch primitives for hashx4 kernels.
//!
//! - **Selection**: ordered [`Candidate`](dispatch::Candidate) lists resolved
//!   against detected [`platform::Caps`]
//! - **Caching**: [`OnceCache`] holds a resolved kernel table for the process
//! - **Classification**: [`KernelTier`] ranks kernels by how they gather bytes
//!
//! # Architecture
//!
//! 1. **Compile-time selection**: when target features are known at compile
//!    time, `platform::caps()` already reports them and selection is a
//!    constant.
//! 2. **Runtime selection (cached)**: generic binaries detect CPU features once
//!    and cache the selected kernels; later calls are one indirect call.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod cache;
pub mod dispatch;
pub mod tier;

pub use cache::OnceCache;
pub use dispatch::{Candidate, Selected, select, try_select};
pub use platform;
pub use tier::KernelTier;
