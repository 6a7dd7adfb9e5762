//! # chainviz-proof — Chainpoint v3 Proof Interpreter
//!
//! Replays the hash chain a chainpoint receipt declares: starting from the
//! leaf hash, each concatenation and hashing op is applied in order to
//! reconstruct every intermediate value up to the anchored root, and the
//! trace is post-processed to locate the two externally meaningful
//! checkpoints — the Merkle root as stored on the ledger, and the Bitcoin
//! OP_RETURN payload that commits it.
//!
//! Hat-tip to the chainpoint-parse JS project for guidance on how hashes
//! are constructed in accordance with a chainpoint proof.
//!
//! ## Pipeline
//!
//! [`Receipt::from_value`] validates and flattens the externally decoded
//! JSON tree → [`replay`] runs the single-pass hash-chain state machine →
//! [`AnchorInfo::resolve`] derives the anchor checkpoints from the finished
//! trace. Data flows strictly forward; no stage re-enters an earlier one.
//!
//! Replay holds no state beyond one call's locals, so independent receipts
//! can be processed concurrently with no shared resources.

pub mod anchor;
pub mod interpreter;
pub mod receipt;

pub use anchor::{AnchorInfo, OP_RETURN_OFFSET};
pub use interpreter::{replay, ReplayTrace, TraceEntry};
pub use receipt::{AnchorType, Branch, HashAlg, Op, Receipt, BTC_BRANCH_LABEL};
