//! # DOT Serialization
//!
//! Renders a [`ProofGraph`] as Graphviz DOT text: record-shaped nodes with
//! the step label in the first field and the hash value in the second, and
//! edges joined on the value field's `:f1` port so arrows line up with the
//! hashes they connect.
//!
//! Pure text generation. Invoking the `dot` program on the output is the
//! CLI's concern.

use crate::{GraphEdge, GraphNode, ProofGraph};

/// Serialize a proof graph to DOT text.
pub fn to_dot(graph: &ProofGraph) -> String {
    let mut out = String::new();
    out.push_str("digraph G {\n");
    out.push_str("node [shape = record]\n");

    for node in &graph.nodes {
        out.push_str(&node_line(node));
        out.push('\n');
    }
    for edge in &graph.edges {
        out.push_str(&edge_line(edge));
        out.push('\n');
    }

    out.push_str("}\n");
    out
}

fn node_line(node: &GraphNode) -> String {
    format!(
        "node{} [ label = \"<f0> {} | <f1> {} | <f2> \"];",
        node.id, node.label, node.value
    )
}

fn edge_line(edge: &GraphEdge) -> String {
    format!("\"node{}\":f1 -> \"node{}\":f1;", edge.from, edge.to)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_graph() -> ProofGraph {
        ProofGraph {
            nodes: vec![
                GraphNode {
                    id: 0,
                    label: "Leaf".to_string(),
                    value: "ab".to_string(),
                },
                GraphNode {
                    id: 1,
                    label: "OP (sha-256)".to_string(),
                    value: "cd".to_string(),
                },
            ],
            edges: vec![GraphEdge { from: 0, to: 1 }],
            op_return_node: None,
        }
    }

    #[test]
    fn test_dot_structure() {
        let dot = to_dot(&small_graph());
        assert!(dot.starts_with("digraph G {\n"));
        assert!(dot.ends_with("}\n"));
        assert!(dot.contains("node [shape = record]"));
    }

    #[test]
    fn test_dot_node_records() {
        let dot = to_dot(&small_graph());
        assert!(dot.contains("node0 [ label = \"<f0> Leaf | <f1> ab | <f2> \"];"));
        assert!(dot.contains("node1 [ label = \"<f0> OP (sha-256) | <f1> cd | <f2> \"];"));
    }

    #[test]
    fn test_dot_edges_use_value_port() {
        let dot = to_dot(&small_graph());
        assert!(dot.contains("\"node0\":f1 -> \"node1\":f1;"));
    }
}
