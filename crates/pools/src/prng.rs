//! Process-global deterministic PRNG.
//!
//! One ChaCha8 stream per fuzzer process, seeded from corpus bytes so a
//! corpus replay is bit-exact. Consumers are pool slot selection and the
//! DH key-pair admission gate; nothing in the hot path draws from it.

use parking_lot::Mutex;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

static PRNG: Mutex<Option<ChaCha8Rng>> = Mutex::new(None);

/// Seed the process PRNG.
///
/// Call once per fuzzer process, before the first run, with a value derived
/// from the corpus — never from the wall clock. Reseeding mid-process
/// changes subsequent draws and breaks replay, so don't.
pub fn seed(seed: u64) {
  *PRNG.lock() = Some(ChaCha8Rng::seed_from_u64(seed));
}

/// Draw 32 bits from the process PRNG.
///
/// An unseeded process behaves as if seeded with zero, keeping replays of
/// unseeded harnesses deterministic too.
#[must_use]
pub fn next_u32() -> u32 {
  let mut guard = PRNG.lock();
  let rng = guard.get_or_insert_with(|| ChaCha8Rng::seed_from_u64(0));
  rng.next_u32()
}
