//! Result-feedback pools.
//!
//! Interesting values discovered at runtime — key pairs, signatures, curve
//! points, bignums — are parked in process-wide pools so future mutations
//! can seed operations with material that is known to exercise deep backend
//! paths. The executor only ever writes; mutation machinery reads.
//!
//! All pools are fixed-capacity multisets with uniform random eviction,
//! safe for concurrent use across executor threads. Slot selection draws
//! from the process-global deterministic PRNG ([`prng`]), so pool contents
//! replay bit-exact for a given corpus.
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code to
//! ensure all error paths are handled explicitly.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]

mod pool;
pub mod prng;

use primitives::{config, CurveType};

pub use pool::Pool;
pub use prng::seed as seed_prng;

/// Capacity of every global pool.
pub const POOL_CAPACITY: usize = 64;

/// A discovered private key on a curve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurvePrivkey {
  pub curve: CurveType,
  pub private_key: String,
}

/// A discovered key pair on a curve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurveKeypair {
  pub curve: CurveType,
  pub private_key: String,
  pub public_x: String,
  pub public_y: String,
}

/// A discovered ECDSA signature and the inputs that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurveEcdsaSignature {
  pub curve: CurveType,
  pub cleartext_hex: String,
  pub public_x: String,
  pub public_y: String,
  pub sig_r: String,
  pub sig_s: String,
}

/// A discovered G1 point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurveBlsG1 {
  pub curve: CurveType,
  pub x: String,
  pub y: String,
}

/// A discovered G2 point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurveBlsG2 {
  pub curve: CurveType,
  pub v: String,
  pub w: String,
  pub x: String,
  pub y: String,
}

/// A discovered BLS signature with everything needed to re-verify it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CurveBlsSignature {
  pub curve: CurveType,
  pub hash_or_point: bool,
  pub point_v: String,
  pub point_w: String,
  pub point_x: String,
  pub point_y: String,
  pub cleartext_hex: String,
  pub dest_hex: String,
  pub aug_hex: String,
  pub public_x: String,
  pub public_y: String,
  pub sig_v: String,
  pub sig_w: String,
  pub sig_x: String,
  pub sig_y: String,
}

/// Private keys on curves.
pub static CURVE_PRIVKEY: Pool<CurvePrivkey, POOL_CAPACITY> = Pool::new();
/// Key pairs on curves.
pub static CURVE_KEYPAIR: Pool<CurveKeypair, POOL_CAPACITY> = Pool::new();
/// ECDSA signatures.
pub static CURVE_ECDSA_SIGNATURE: Pool<CurveEcdsaSignature, POOL_CAPACITY> = Pool::new();
/// BLS G1 points.
pub static CURVE_BLS_G1: Pool<CurveBlsG1, POOL_CAPACITY> = Pool::new();
/// BLS G2 points.
pub static CURVE_BLS_G2: Pool<CurveBlsG2, POOL_CAPACITY> = Pool::new();
/// BLS signatures.
pub static CURVE_BLS_SIGNATURE: Pool<CurveBlsSignature, POOL_CAPACITY> = Pool::new();
/// DH private keys, decimal.
pub static DH_PRIVATE_KEY: Pool<String, POOL_CAPACITY> = Pool::new();
/// DH public keys, decimal.
pub static DH_PUBLIC_KEY: Pool<String, POOL_CAPACITY> = Pool::new();
/// Bare bignums, decimal.
pub static BIGNUM: Pool<String, POOL_CAPACITY> = Pool::new();

/// Admit a bignum string into the [`BIGNUM`] pool, subject to the size cap.
///
/// Oversized strings are dropped silently: the pool feeds future inputs, and
/// a value the executor itself refuses to process is not worth feeding back.
pub fn insert_bignum(value: impl Into<String>) {
  let value = value.into();
  if value.len() <= config::MAX_BIGNUM_SIZE {
    BIGNUM.insert(value);
  }
}

/// Serialize tests that touch the global PRNG or global pools.
#[cfg(test)]
pub(crate) fn test_lock() -> parking_lot::MutexGuard<'static, ()> {
  static LOCK: parking_lot::Mutex<()> = parking_lot::Mutex::new(());
  LOCK.lock()
}
