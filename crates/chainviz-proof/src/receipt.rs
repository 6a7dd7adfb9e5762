//! # Receipt Model — Validation and Flattening
//!
//! Converts an externally decoded chainpoint v3 receipt (a generic
//! `serde_json::Value` tree) into a typed, validated [`Receipt`]. All
//! structural checks happen here, once, at parse time; the replay loop in
//! [`crate::interpreter`] only ever sees a closed [`Op`] enum.
//!
//! ## Receipt shape
//!
//! ```json
//! {
//!   "@context": "https://w3id.org/chainpoint/v3",
//!   "hash": "<leaf hex>",
//!   "branches": [{
//!     "label": "cal_anchor_branch",
//!     "ops": [{"l": "..."}, {"op": "sha-256"}, {"anchors": [{"type": "cal"}]}],
//!     "branches": [{
//!       "label": "btc_anchor_branch",
//!       "ops": [{"r": "..."}, {"op": "sha-256-x2"}, {"anchors": [{"type": "btc"}]}]
//!     }]
//!   }]
//! }
//! ```
//!
//! Each op record is a single-key object keyed `l`, `r`, `op`, or `anchors`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use chainviz_core::ProofError;

/// The label a recognized nested Bitcoin anchor branch must carry.
pub const BTC_BRANCH_LABEL: &str = "btc_anchor_branch";

/// A hash function a proof op may apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlg {
    /// Single SHA-256.
    Sha256,
    /// SHA-256 applied twice in sequence (`sha-256-x2`), Bitcoin's txid
    /// construction.
    Sha256X2,
}

impl HashAlg {
    /// The wire identifier, as receipts spell it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha-256",
            Self::Sha256X2 => "sha-256-x2",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "sha-256" => Some(Self::Sha256),
            "sha-256-x2" => Some(Self::Sha256X2),
            _ => None,
        }
    }
}

impl std::fmt::Display for HashAlg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The ledger an anchor marker points at.
///
/// Receipts may carry anchor types minted after this code was written;
/// those parse as [`AnchorType::Other`] and replay as non-mutating trace
/// marks rather than being rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnchorType {
    /// Calendar chain anchor.
    Cal,
    /// Bitcoin anchor.
    Btc,
    /// An anchor type this interpreter does not recognize.
    Other(String),
}

impl AnchorType {
    /// The wire identifier.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Cal => "cal",
            Self::Btc => "btc",
            Self::Other(s) => s,
        }
    }

    fn parse(s: &str) -> Self {
        match s {
            "cal" => Self::Cal,
            "btc" => Self::Btc,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for AnchorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One proof step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Op {
    /// Prepend a value to the running buffer (`l`).
    ConcatLeft(String),
    /// Append a value to the running buffer (`r`).
    ConcatRight(String),
    /// Hash the running buffer (`op`).
    Hash(HashAlg),
    /// Mark an anchor point (`anchors`); does not mutate the buffer.
    Anchor(AnchorType),
}

/// A named sub-chain of proof operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    /// Branch label, e.g. `cal_anchor_branch` or `btc_anchor_branch`.
    pub label: Option<String>,
    /// The branch's ops, in source order.
    pub ops: Vec<Op>,
    /// Nested branches. At most one is recognized: the Bitcoin anchor branch.
    pub branches: Vec<Branch>,
}

/// A validated chainpoint v3 receipt.
///
/// Constructed once per request via [`Receipt::from_value`] or
/// [`Receipt::from_json`], read-only thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// The leaf hash the proof starts from, as the receipt's hex string.
    pub leaf_hash: String,
    /// The chainpoint schema version. Always 3 for a constructed receipt.
    pub version: u32,
    /// The top-level branches. Validation guarantees exactly one.
    pub branches: Vec<Branch>,
}

impl Receipt {
    /// Decode a receipt from its JSON document text.
    ///
    /// Thin wrapper over an external `serde_json` decode followed by
    /// [`Receipt::from_value`].
    pub fn from_json(document: &str) -> Result<Self, ProofError> {
        let value: Value =
            serde_json::from_str(document).map_err(|e| ProofError::MalformedReceipt {
                field: format!("document is not valid JSON: {e}"),
            })?;
        Self::from_value(&value)
    }

    /// Validate and flatten a decoded receipt tree.
    ///
    /// # Errors
    ///
    /// - `MalformedReceipt` — `hash`, `@context`, a branch, or an `ops`
    ///   array is missing, or an op record is unrecognizable.
    /// - `UnsupportedVersion` — the context declares a version other than 3.
    /// - `MissingAnchorBranch` — a nested branch exists but is not the
    ///   labeled, non-empty Bitcoin anchor branch.
    pub fn from_value(value: &Value) -> Result<Self, ProofError> {
        let leaf_hash = value
            .get("hash")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ProofError::MalformedReceipt {
                field: "hash".to_string(),
            })?
            .to_string();

        let version = context_version(value)?;
        if version != 3 {
            return Err(ProofError::UnsupportedVersion { found: version });
        }

        let top = value
            .get("branches")
            .and_then(Value::as_array)
            .and_then(|branches| branches.first())
            .ok_or_else(|| ProofError::MalformedReceipt {
                field: "branches".to_string(),
            })?;

        let branch = parse_top_branch(top)?;

        Ok(Self {
            leaf_hash,
            version,
            branches: vec![branch],
        })
    }

    /// The receipt's ops as one ordered sequence: top-level branch ops
    /// first, nested Bitcoin-branch ops appended after, both internally
    /// order-preserving.
    pub fn flattened_ops(&self) -> Vec<&Op> {
        let Some(top) = self.branches.first() else {
            return Vec::new();
        };
        let nested = top
            .branches
            .first()
            .map(|b| b.ops.as_slice())
            .unwrap_or_default();
        top.ops.iter().chain(nested.iter()).collect()
    }
}

/// Extract the integer schema version from the `@context` URI.
///
/// `https://w3id.org/chainpoint/v3` → 5th `/`-segment → digits → 3.
fn context_version(value: &Value) -> Result<u32, ProofError> {
    let context = value
        .get("@context")
        .and_then(Value::as_str)
        .ok_or_else(|| ProofError::MalformedReceipt {
            field: "@context".to_string(),
        })?;

    let digits: String = context
        .split('/')
        .nth(4)
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_digit)
        .collect();

    digits
        .parse::<u32>()
        .map_err(|_| ProofError::MalformedReceipt {
            field: format!("@context: no version in {context:?}"),
        })
}

/// Parse the single top-level branch, including its optional nested
/// Bitcoin anchor branch.
fn parse_top_branch(value: &Value) -> Result<Branch, ProofError> {
    let label = branch_label(value);
    let ops = parse_ops(value, "branches[0]")?;

    let mut branches = Vec::new();
    if let Some(nested) = value
        .get("branches")
        .and_then(Value::as_array)
        .and_then(|b| b.first())
    {
        branches.push(parse_btc_branch(nested)?);
    }

    Ok(Branch {
        label,
        ops,
        branches,
    })
}

/// Parse a nested branch, which must be the labeled, non-empty Bitcoin
/// anchor branch.
fn parse_btc_branch(value: &Value) -> Result<Branch, ProofError> {
    let label = branch_label(value);
    if label.as_deref() != Some(BTC_BRANCH_LABEL) {
        return Err(ProofError::MissingAnchorBranch);
    }

    let ops = parse_ops(value, "branches[0].branches[0]")?;
    if ops.is_empty() {
        return Err(ProofError::MissingAnchorBranch);
    }

    Ok(Branch {
        label,
        ops,
        branches: Vec::new(),
    })
}

fn branch_label(value: &Value) -> Option<String> {
    value
        .get("label")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Parse a branch's `ops` array.
fn parse_ops(branch: &Value, path: &str) -> Result<Vec<Op>, ProofError> {
    let ops = branch
        .get("ops")
        .and_then(Value::as_array)
        .ok_or_else(|| ProofError::MalformedReceipt {
            field: format!("{path}.ops"),
        })?;

    ops.iter()
        .enumerate()
        .map(|(i, op)| parse_op(op).map_err(|_| ProofError::MalformedReceipt {
            field: format!("{path}.ops[{i}]"),
        }))
        .collect()
}

/// Parse one op record: a single-key object keyed `l` / `r` / `op` /
/// `anchors`. Returns `Err(())` on anything unrecognizable; the caller
/// attaches the receipt path.
fn parse_op(value: &Value) -> Result<Op, ()> {
    let record = value.as_object().ok_or(())?;

    if let Some(v) = record.get("l") {
        return Ok(Op::ConcatLeft(v.as_str().ok_or(())?.to_string()));
    }
    if let Some(v) = record.get("r") {
        return Ok(Op::ConcatRight(v.as_str().ok_or(())?.to_string()));
    }
    if let Some(v) = record.get("op") {
        let alg = v.as_str().and_then(HashAlg::parse).ok_or(())?;
        return Ok(Op::Hash(alg));
    }
    if let Some(v) = record.get("anchors") {
        // The anchor list's first entry determines the marker type; a
        // receipt never mixes ledgers inside one anchors record.
        let first = v.as_array().and_then(|a| a.first()).ok_or(())?;
        let anchor_type = first.get("type").and_then(Value::as_str).ok_or(())?;
        return Ok(Op::Anchor(AnchorType::parse(anchor_type)));
    }

    Err(())
}
