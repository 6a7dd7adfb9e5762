//! # chainviz-graph — Graph Description of a Proof Replay
//!
//! Converts a finished replay trace plus its resolved anchors into an
//! ordered list of abstract node and edge descriptors, and serializes that
//! description to Graphviz DOT text ([`dot`]).
//!
//! The builder knows nothing about layout syntax or image formats; the DOT
//! module knows nothing about hashing. Rendering an actual image is the
//! external `dot` program's job, driven by the CLI crate.

pub mod dot;

use serde::{Deserialize, Serialize};

use chainviz_proof::{AnchorInfo, ReplayTrace, OP_RETURN_OFFSET};

/// One node in the proof graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Node id. 0 is the start node; trace entries keep their 1-based
    /// index; an OP_RETURN node, when present, takes the next free id.
    pub id: usize,
    /// Step label, e.g. `Leaf` or `OP (sha-256)`.
    pub label: String,
    /// The node's display hex.
    pub value: String,
}

/// A directed edge between two proof-graph nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Source node id.
    pub from: usize,
    /// Target node id.
    pub to: usize,
}

/// The complete, ordered graph description of one replay.
///
/// For a trace of N entries: N + 1 nodes (the start node plus one per
/// entry) and N consecutive edges, plus one extra node/edge pair iff the
/// proof resolved an OP_RETURN value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofGraph {
    /// Nodes in display order.
    pub nodes: Vec<GraphNode>,
    /// Edges in display order.
    pub edges: Vec<GraphEdge>,
    /// Id of the OP_RETURN node, if one was emitted.
    pub op_return_node: Option<usize>,
}

impl ProofGraph {
    /// Build the graph description for a finished replay.
    pub fn build(trace: &ReplayTrace, anchors: &AnchorInfo) -> Self {
        let mut nodes = Vec::with_capacity(trace.len() + 2);
        let mut edges = Vec::with_capacity(trace.len() + 1);

        nodes.push(GraphNode {
            id: 0,
            label: "Leaf".to_string(),
            value: trace.leaf_hex.clone(),
        });

        for entry in &trace.entries {
            nodes.push(GraphNode {
                id: entry.index,
                label: entry.label.clone(),
                value: entry.hex.clone(),
            });
            edges.push(GraphEdge {
                from: entry.index - 1,
                to: entry.index,
            });
        }

        // The OP_RETURN value branches off the step that produced it,
        // OP_RETURN_OFFSET steps before the txid double-hash.
        let mut op_return_node = None;
        let op_return_source = anchors
            .btc_double_hash_index
            .filter(|&i| i > OP_RETURN_OFFSET)
            .map(|i| i - OP_RETURN_OFFSET);
        if let (Some(op_return_hex), Some(source)) = (&anchors.op_return_hex, op_return_source) {
            let id = trace.len() + 1;
            nodes.push(GraphNode {
                id,
                label: "OP_RETURN".to_string(),
                value: op_return_hex.clone(),
            });
            edges.push(GraphEdge { from: source, to: id });
            op_return_node = Some(id);
        }

        Self {
            nodes,
            edges,
            op_return_node,
        }
    }
}
