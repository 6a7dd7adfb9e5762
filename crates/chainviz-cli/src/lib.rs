//! # chainviz-cli — Command-Line Interface for Chainviz
//!
//! Provides the `chainviz` binary: load a chainpoint v3 receipt document,
//! replay its hash chain, and either print the trace and anchor values or
//! hand the proof graph to Graphviz for rendering.
//!
//! ## Subcommands
//!
//! - `chainviz visualize` — Render the proof graph as an image via the
//!   external `dot` program, or print the DOT text with `--dot-only`.
//! - `chainviz inspect` — Print every replay step with its hash, plus the
//!   resolved Merkle root and OP_RETURN values.
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to the domain crates — no hashing here.
//! - Renderer failures (missing `dot` binary, non-zero exit) live in this
//!   crate's `anyhow` error domain, never in `ProofError`.

pub mod inspect;
pub mod visualize;
