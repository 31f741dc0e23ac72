//! Cross-kernel equivalence fuzzing.
//!
//! Every kernel available on the current CPU must produce the same digest as
//! the reference for any input.

#![no_main]

use hashes::__internal::kernel_test::{verify_djbx33a_kernels, verify_x4djbx33a_kernels};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
  let key = [0x9eu8; 16];
  verify_x4djbx33a_kernels(&key, data).expect("x4djbx33a kernels should agree");
  verify_djbx33a_kernels(&key, data).expect("djbx33a kernels should agree");
});
