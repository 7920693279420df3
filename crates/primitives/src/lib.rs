//! Value types for differential execution of cryptographic operations.
//!
//! This crate defines the vocabulary every other cryptodiff crate speaks:
//!
//! - **Ids**: per-kind newtypes over 64-bit hashes of canonical algorithm
//!   names ([`DigestType`], [`CipherType`], [`CurveType`], [`CalcOp`],
//!   [`ModuleId`], [`MiscOp`]).
//! - **Components**: [`Buffer`], [`Modifier`], [`Bignum`], and the result
//!   values backends return ([`component`]).
//! - **Operations**: one immutable struct per operation family ([`ops`]),
//!   each constructible deterministically from a [`datasource::Datasource`].
//!
//! Operations and results both serialize to JSON for the dump sink and
//! render human-readable forms for discrepancy diagnostics. Result equality
//! is semantic: bignums compare as canonical decimals, never as raw bytes.
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code to
//! ensure all error paths are handled explicitly.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]

mod bignum;
mod buffer;
pub mod component;
pub mod config;
pub mod ids;
mod op;
pub mod ops;

pub use bignum::Bignum;
pub use buffer::{Buffer, Modifier};
pub use component::OpResult;
pub use ids::{CalcOp, CipherType, CurveType, DigestType, MiscOp, ModuleId};
pub use op::Operation;
