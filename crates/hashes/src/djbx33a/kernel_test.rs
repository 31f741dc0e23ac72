extern crate alloc;

use alloc::vec::Vec;

use super::{
  Djbx33a32Keyed,
  kernels::{ALL, Djbx33aKernelId},
};

#[derive(Clone, Debug)]
pub struct KernelResult {
  pub name: &'static str,
  pub digest: [u8; 4],
}

/// Keyed digest of `data` from every narrow kernel, reference first.
#[must_use]
pub fn run_all_djbx33a_kernels(key: &[u8; 16], data: &[u8]) -> Vec<KernelResult> {
  ALL
    .iter()
    .map(|&id| KernelResult {
      name: id.as_str(),
      digest: Djbx33a32Keyed::hash_with_kernel(id, key, data),
    })
    .collect()
}

/// Check that every narrow kernel agrees with the reference.
///
/// # Errors
///
/// Names the first kernel whose digest differs.
pub fn verify_djbx33a_kernels(key: &[u8; 16], data: &[u8]) -> Result<(), &'static str> {
  let results = run_all_djbx33a_kernels(key, data);
  let Some((first, rest)) = results.split_first() else {
    return Ok(());
  };
  debug_assert_eq!(first.name, Djbx33aKernelId::Reference.as_str());
  match rest.iter().find(|r| r.digest != first.digest) {
    Some(r) => Err(r.name),
    None => Ok(()),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn all_kernels_agree_at_every_offset() {
    let key = [0x11u8; 16];
    let buf: Vec<u8> = (0..160u32).map(|i| (i ^ (i >> 2)) as u8).collect();
    for offset in 0..16 {
      for len in 0..=130 {
        let data = &buf[offset..offset + len];
        if let Err(name) = verify_djbx33a_kernels(&key, data) {
          panic!("{name} mismatch at offset={offset} len={len}");
        }
      }
    }
  }

  #[test]
  fn every_kernel_reported() {
    assert_eq!(run_all_djbx33a_kernels(&[0; 16], b"").len(), ALL.len());
  }
}
