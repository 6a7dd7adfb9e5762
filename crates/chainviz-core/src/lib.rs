//! # chainviz-core — Foundational Types for Chainviz
//!
//! The leaf crate of the Chainviz workspace. It defines the two primitives
//! every other crate builds on:
//!
//! 1. **`HashBuffer`** — an immutable ordered byte sequence with the exact
//!    conversion semantics a chainpoint proof replay depends on: hex and
//!    UTF-8 decoding, the hex-or-UTF-8 classification rule for op values,
//!    order-significant concatenation, lowercase hex digest rendering, and
//!    byte-order reversal for the Bitcoin endianness convention.
//!
//! 2. **`ProofError`** — the single error hierarchy for receipt validation
//!    and replay. Every failure is fatal to the current receipt: a proof is
//!    either fully valid or rejected, never partially replayed.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `chainviz-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod buffer;
pub mod error;

pub use buffer::HashBuffer;
pub use error::ProofError;
