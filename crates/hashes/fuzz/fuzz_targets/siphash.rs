#![no_main]

use hashes::{KeyedHash as _, SipHash24, siphash};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: &[u8]| {
  let key_bytes_len = core::cmp::min(16, input.len());
  let (key_bytes, data) = input.split_at(key_bytes_len);

  let mut key = [0u8; 16];
  key[..key_bytes.len()].copy_from_slice(key_bytes);
  let [k0, k1] = siphash::key_words(&key);

  let ours = SipHash24::hash_with_key(&key, data);

  use core::hash::Hasher as _;
  let mut h = siphasher::sip::SipHasher24::new_with_keys(k0, k1);
  h.write(data);
  let expected = h.finish();

  assert_eq!(ours, expected.to_le_bytes());
});
