//! Buffer contract fuzzing through the raw entry points.
//!
//! Input, key, and output are carved out of one arena at fuzzer-chosen
//! positions. Whatever the layout, the call either succeeds or fails with the
//! code the validator predicts, and a failed call never writes.

#![no_main]

use arbitrary::Arbitrary;
use hashes::{
  HashError,
  contract::{Contract, Region},
  raw::x4djbx33a_128_ref,
};
use libfuzzer_sys::fuzz_target;
use traits::{MIN_KEY_SIZE, SUCCESS};

const ARENA: usize = 256;

#[derive(Arbitrary, Debug)]
struct Input {
  input: (u8, u8),
  key: (u8, u8),
  output: (u8, u8),
}

fn clamp((start, len): (u8, u8)) -> (usize, usize) {
  let start = usize::from(start);
  let len = usize::from(len).min(ARENA - start);
  (start, len)
}

fuzz_target!(|fuzz: Input| {
  let mut arena: [u8; ARENA] = core::array::from_fn(|i| i as u8);
  let before = arena;
  let base = arena.as_mut_ptr();

  let (is, il) = clamp(fuzz.input);
  let (ks, kl) = clamp(fuzz.key);
  let (os, ol) = clamp(fuzz.output);

  let expected = Contract::new(16, MIN_KEY_SIZE).validate(
    Region::new(base.addr() + is, il),
    Region::new(base.addr() + ks, kl),
    Region::new(base.addr() + os, ol),
  );

  // SAFETY: every range lies inside the arena.
  let rc = unsafe { x4djbx33a_128_ref(base.add(is), il, base.add(ks), kl, base.add(os), ol) };

  match expected {
    Ok(()) => assert_eq!(rc, SUCCESS),
    Err(e) => {
      assert_eq!(rc, e.code());
      assert_ne!(e, HashError::InvalidParameter);
      assert_eq!(arena, before, "failed call wrote output");
    }
  }
});
