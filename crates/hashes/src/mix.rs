//! Keyed output mixing.

/// XOR the first `N` bytes of `key` into `state`.
///
/// Applied once, after the main loop and before the digest is written. Only the
/// local state copy changes.
#[inline]
pub fn mix<const N: usize>(state: &mut [u8; N], key: &[u8; 16]) {
  for (s, k) in state.iter_mut().zip(key) {
    *s ^= k;
  }
}
