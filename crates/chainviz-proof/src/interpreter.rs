//! # Op Interpreter — Hash-Chain Replay
//!
//! A single left-to-right pass over a receipt's flattened ops. Each op
//! either folds a value into the running buffer, hashes it, or marks an
//! anchor point; every op appends exactly one [`TraceEntry`].
//!
//! ## State
//!
//! Replay threads one locally scoped [`ReplayState`] — the running buffer,
//! the trace, and two positional markers — through the loop. Nothing
//! outlives the call and nothing is shared, so independent receipts replay
//! concurrently without coordination.
//!
//! ## Indexing
//!
//! Trace indices are 1-based: index 0 is reserved for the leaf/start value,
//! which the trace carries as [`ReplayTrace::leaf_hex`] rather than as an
//! entry. A receipt with N ops yields exactly N entries.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use chainviz_core::{HashBuffer, ProofError};

use crate::receipt::{AnchorType, HashAlg, Op, Receipt};

/// One replay step's recorded output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEntry {
    /// 1-based position among emitted entries.
    pub index: usize,
    /// Human-readable step label, e.g. `Concat (LHS)` or `OP (sha-256)`.
    pub label: String,
    /// The running buffer after this step.
    pub buffer: HashBuffer,
    /// The step's display hex. Equal to the buffer's digest for every step
    /// except the Bitcoin anchor marker, which displays byte-reversed.
    pub hex: String,
}

/// The complete, ordered result of replaying one receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayTrace {
    /// The leaf hash the replay started from (node 0).
    pub leaf_hex: String,
    /// One entry per processed op, in op order.
    pub entries: Vec<TraceEntry>,
    /// 1-based index of the first `sha-256-x2` step — by construction the
    /// step that produces the Bitcoin transaction id. Absent for
    /// calendar-only proofs.
    pub btc_double_hash_index: Option<usize>,
    /// 1-based index of the Bitcoin anchor marker step, whose display hex
    /// is the ledger-facing Merkle root. Absent for calendar-only proofs.
    pub btc_anchor_index: Option<usize>,
}

impl ReplayTrace {
    /// Look up an entry by its 1-based index.
    pub fn entry(&self, index: usize) -> Option<&TraceEntry> {
        index.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    /// Number of entries (equals the receipt's op count).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the receipt declared no ops.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-replay working state. Local to one [`replay`] call.
struct ReplayState {
    current: HashBuffer,
    entries: Vec<TraceEntry>,
    btc_double_hash_index: Option<usize>,
    btc_anchor_index: Option<usize>,
}

impl ReplayState {
    /// 1-based index the next recorded entry will get.
    fn next_index(&self) -> usize {
        self.entries.len() + 1
    }

    fn record(&mut self, label: String, hex: String) {
        self.entries.push(TraceEntry {
            index: self.next_index(),
            label,
            buffer: self.current.clone(),
            hex,
        });
    }
}

fn sha256(buf: &HashBuffer) -> HashBuffer {
    HashBuffer::from_bytes(Sha256::digest(buf.as_bytes()).to_vec())
}

/// Replay a receipt's flattened op sequence from its leaf hash.
///
/// # Errors
///
/// `ProofError::InvalidEncoding` if the leaf hash is not valid hex, or if
/// an op value classified as hex cannot be decoded. Errors abort the whole
/// replay; no partial trace is returned.
pub fn replay(receipt: &Receipt) -> Result<ReplayTrace, ProofError> {
    let leaf = HashBuffer::from_hex(&receipt.leaf_hash)?;
    let leaf_hex = leaf.to_hex_digest();

    let mut state = ReplayState {
        current: leaf,
        entries: Vec::new(),
        btc_double_hash_index: None,
        btc_anchor_index: None,
    };

    for op in receipt.flattened_ops() {
        match op {
            Op::ConcatLeft(value) => {
                let v = HashBuffer::from_op_value(value)?;
                state.current = v.concat(&state.current);
                let hex = state.current.to_hex_digest();
                state.record("Concat (LHS)".to_string(), hex);
            }
            Op::ConcatRight(value) => {
                let v = HashBuffer::from_op_value(value)?;
                state.current = state.current.concat(&v);
                let hex = state.current.to_hex_digest();
                state.record("Concat (RHS)".to_string(), hex);
            }
            Op::Hash(HashAlg::Sha256) => {
                state.current = sha256(&state.current);
                let hex = state.current.to_hex_digest();
                state.record("OP (sha-256)".to_string(), hex);
            }
            Op::Hash(HashAlg::Sha256X2) => {
                // The first double-hash in the flattened sequence is the
                // step that produces the Bitcoin transaction id.
                if state.btc_double_hash_index.is_none() {
                    state.btc_double_hash_index = Some(state.next_index());
                }
                state.current = sha256(&sha256(&state.current));
                let hex = state.current.to_hex_digest();
                state.record("OP (sha-256-x2)".to_string(), hex);
            }
            Op::Anchor(anchor_type) => {
                // Anchor markers never mutate the buffer. The Bitcoin
                // marker displays byte-reversed: that reversed digest is
                // the Merkle root as the ledger stores it.
                let hex = match anchor_type {
                    AnchorType::Btc => {
                        state.btc_anchor_index = Some(state.next_index());
                        state.current.reverse_bytes().to_hex_digest()
                    }
                    _ => state.current.to_hex_digest(),
                };
                state.record(format!("Anchor ({anchor_type})"), hex);
            }
        }
    }

    Ok(ReplayTrace {
        leaf_hex,
        entries: state.entries,
        btc_double_hash_index: state.btc_double_hash_index,
        btc_anchor_index: state.btc_anchor_index,
    })
}
