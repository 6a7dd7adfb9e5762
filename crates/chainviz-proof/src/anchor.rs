//! # Anchor Resolver — Ledger Checkpoints from the Trace
//!
//! A pure post-pass over a finished [`ReplayTrace`]: locates the
//! ledger-facing Merkle root (recorded, byte-reversed, at the Bitcoin
//! anchor marker) and the OP_RETURN payload (found a fixed number of steps
//! before the Bitcoin txid's double-hash).

use serde::{Deserialize, Serialize};

use crate::interpreter::ReplayTrace;

/// How many replay steps before the first `sha-256-x2` the OP_RETURN
/// payload sits.
///
/// This is a structural fact of how chainpoint v3 Bitcoin anchor branches
/// are laid out — the committed value is concatenated with the raw
/// transaction prefix and suffix before the double-SHA-256 that produces
/// the transaction id — not something rederivable from a receipt.
pub const OP_RETURN_OFFSET: usize = 3;

/// The externally meaningful checkpoints of one replay.
///
/// Derived from the trace, never stored on the receipt. Both fields are
/// absent for calendar-only proofs — a valid, non-error outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorInfo {
    /// The Merkle root as stored on the ledger (byte-reversed display
    /// order), if the proof carried a Bitcoin anchor.
    pub merkle_root_hex: Option<String>,
    /// The value expected in the anchoring transaction's OP_RETURN output,
    /// if the proof carried a Bitcoin txid step far enough into the chain.
    pub op_return_hex: Option<String>,
    /// 1-based trace index of the Bitcoin txid's double-hash step.
    pub btc_double_hash_index: Option<usize>,
}

impl AnchorInfo {
    /// Resolve the anchor checkpoints from a finished trace.
    pub fn resolve(trace: &ReplayTrace) -> Self {
        let merkle_root_hex = trace
            .btc_anchor_index
            .and_then(|i| trace.entry(i))
            .map(|e| e.hex.clone());

        // Guarded to strictly positive indices: a double-hash within the
        // first OP_RETURN_OFFSET steps cannot have an OP_RETURN value
        // behind it.
        let op_return_hex = trace
            .btc_double_hash_index
            .filter(|&i| i > OP_RETURN_OFFSET)
            .and_then(|i| trace.entry(i - OP_RETURN_OFFSET))
            .map(|e| e.hex.clone());

        Self {
            merkle_root_hex,
            op_return_hex,
            btc_double_hash_index: trace.btc_double_hash_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::TraceEntry;
    use chainviz_core::HashBuffer;

    /// A trace of `n` synthetic entries whose hex encodes the entry index.
    fn trace_of(
        n: usize,
        btc_double_hash_index: Option<usize>,
        btc_anchor_index: Option<usize>,
    ) -> ReplayTrace {
        let entries = (1..=n)
            .map(|index| TraceEntry {
                index,
                label: "OP (sha-256)".to_string(),
                buffer: HashBuffer::from_bytes(vec![index as u8]),
                hex: format!("{index:02x}"),
            })
            .collect();
        ReplayTrace {
            leaf_hex: "00".to_string(),
            entries,
            btc_double_hash_index,
            btc_anchor_index,
        }
    }

    #[test]
    fn test_op_return_is_three_steps_back() {
        let info = AnchorInfo::resolve(&trace_of(12, Some(10), None));
        assert_eq!(info.op_return_hex.as_deref(), Some("07"));
        assert_eq!(info.btc_double_hash_index, Some(10));
    }

    #[test]
    fn test_merkle_root_from_btc_anchor_entry() {
        let info = AnchorInfo::resolve(&trace_of(12, None, Some(12)));
        assert_eq!(info.merkle_root_hex.as_deref(), Some("0c"));
    }

    #[test]
    fn test_double_hash_at_or_under_offset_yields_no_op_return() {
        // Indices 1..=3 would point at or before the start node; the
        // resolver must never do a zero or negative lookup.
        for i in 1..=OP_RETURN_OFFSET {
            let info = AnchorInfo::resolve(&trace_of(6, Some(i), None));
            assert_eq!(info.op_return_hex, None, "index {i}");
        }
        let info = AnchorInfo::resolve(&trace_of(6, Some(4), None));
        assert_eq!(info.op_return_hex.as_deref(), Some("01"));
    }

    #[test]
    fn test_calendar_only_trace_resolves_to_absent() {
        let info = AnchorInfo::resolve(&trace_of(5, None, None));
        assert_eq!(info, AnchorInfo::default());
    }
}
