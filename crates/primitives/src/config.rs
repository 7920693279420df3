//! Process-wide limits.

/// Upper bound, in decimal digits, for bignum strings accepted by size gates
/// and admitted into the bignum pool.
pub const MAX_BIGNUM_SIZE: usize = 4096;

/// Upper bound, in decimal digits, for private-key scalars.
pub const MAX_PRIVKEY_SIZE: usize = 4096;

/// Size of the fill pattern written into an empty modifier when a duplicate
/// consecutive task must be made distinct.
pub const DUPLICATE_MODIFIER_LEN: usize = 512;

/// Default per-run task cap for an operation family.
pub const DEFAULT_MAX_OPERATIONS: usize = 20;

/// Task cap for bignum calculator runs.
pub const BIGNUM_CALC_MAX_OPERATIONS: usize = 5;

/// Task cap for memory-hard key derivation (scrypt, Argon2, bcrypt).
pub const SLOW_KDF_MAX_OPERATIONS: usize = 2;
