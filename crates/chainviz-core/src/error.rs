//! # Error Types — Receipt Validation and Replay Failures
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations, and all are fatal to the receipt being processed:
//! the pipeline never recovers, retries, or substitutes default values.
//!
//! ## Design
//!
//! - Structural errors name the offending receipt field or op index so a
//!   rejected document can be diagnosed without re-parsing it by hand.
//! - Encoding errors carry the value that failed to decode.
//! - Renderer failures (missing `dot` binary, non-zero exit) are NOT part
//!   of this hierarchy — they belong to the CLI's own error domain and are
//!   passed through unmodified.

use thiserror::Error;

/// Errors raised while validating or replaying a chainpoint receipt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProofError {
    /// A required receipt field or branch is missing or malformed.
    /// `field` names the offending receipt path (e.g. `branches[0].ops[4]`).
    #[error("malformed receipt: {field}")]
    MalformedReceipt {
        /// The receipt path that failed validation.
        field: String,
    },

    /// The version marker is present but is not 3.
    #[error("unsupported receipt version {found}: only v3 receipts are supported")]
    UnsupportedVersion {
        /// The version the receipt declared.
        found: u32,
    },

    /// A nested Bitcoin anchor branch was expected but is absent,
    /// unlabeled, or carries no ops.
    #[error("bitcoin anchor sub-branch not found or empty")]
    MissingAnchorBranch,

    /// A value classified as hex could not be decoded as hex.
    #[error("invalid hex encoding in {value:?}: {reason}")]
    InvalidEncoding {
        /// The string that failed to decode.
        value: String,
        /// What made it undecodable.
        reason: String,
    },
}
