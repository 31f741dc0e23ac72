//! X4-DJBX33A kernel parity at arbitrary buffer offsets.
//!
//! The input is copied into an over-allocated buffer at `offset`, so every
//! alignment residue reaches the splicer.

#![no_main]

use arbitrary::Arbitrary;
use hashes::{
  HashError, KeyedHash as _, X4Djbx33a,
  x4djbx33a::kernels::{ALL, X4Djbx33aKernelId},
};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
  key: [u8; 16],
  offset: u8,
  data: Vec<u8>,
}

fuzz_target!(|input: Input| {
  let offset = usize::from(input.offset % 16);
  let mut buf = vec![0u8; offset + input.data.len()];
  buf[offset..].copy_from_slice(&input.data);
  let data = &buf[offset..];

  let want = X4Djbx33a::hash_with_kernel(X4Djbx33aKernelId::Reference, &input.key, data)
    .expect("reference kernel is always available");

  for &id in ALL {
    match X4Djbx33a::hash_with_kernel(id, &input.key, data) {
      Ok(got) => assert_eq!(got, want, "{} diverged", id.as_str()),
      Err(e) => assert_eq!(e, HashError::UnsupportedBackend),
    }
  }

  assert_eq!(X4Djbx33a::hash_with_key(&input.key, data), want, "auto dispatch diverged");
});
