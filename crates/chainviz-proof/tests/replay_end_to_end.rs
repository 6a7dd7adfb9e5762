//! # End-to-End Replay Tests
//!
//! Replays a complete two-branch chainpoint v3 receipt — a calendar branch
//! followed by a nested Bitcoin anchor branch shaped like the anchoring
//! service emits them (Merkle sibling concats, raw-transaction prefix and
//! suffix around the committed value, the double-SHA-256 txid step, then
//! the path up to the anchored root) — and checks every intermediate hash
//! against hardcoded vectors computed with Python's `hashlib` following the
//! reference implementation's semantics.
//!
//! If these vectors drift, Rust and the reference pipeline disagree on the
//! bytes being hashed and every downstream anchor value is wrong.

use serde_json::json;

use chainviz_proof::{replay, AnchorInfo, Receipt};

const LEAF: &str = "56211bf25d326d333620da7619142687ccc06c3be2c15c79df75f1a584e7e4b0";

/// A receipt whose Bitcoin branch mirrors the real v3 layout: the committed
/// value is produced three steps before the txid double-hash.
fn anchored_receipt() -> Receipt {
    let document = json!({
        "@context": "https://w3id.org/chainpoint/v3",
        "type": "Chainpoint",
        "hash": LEAF,
        "hash_id_node": "a4c7a7f0-92c9-11e8-ae5b-01a6f6bbeb11",
        "branches": [{
            "label": "cal_anchor_branch",
            "ops": [
                {"l": "node_id:a4c7a7f0-92c9-11e8-ae5b-01a6f6bbeb11"},
                {"op": "sha-256"},
                {"r": "1790518bbea3a2b2e00b4dc93d5bbcdef513bd1bec53e488fb1d4041dfe57b3b"},
                {"op": "sha-256"},
                {"anchors": [{"type": "cal", "anchor_id": "985635"}]}
            ],
            "branches": [{
                "label": "btc_anchor_branch",
                "ops": [
                    {"l": "b45c25e180dc08571d1bb2edbaf1c720bd5ff7133e801f15875fe51f3f6dbb46"},
                    {"op": "sha-256"},
                    {"l": "0100000001d94a7f924e49246b136a09a40d973b2e67ac20b6e2b9ac17b379731ba9e86b58010000006a47304402"},
                    {"r": "ffffffff020000000000000000226a20"},
                    {"op": "sha-256-x2"},
                    {"r": "ba0216d9e7534b79f24c116bebd8d63df9f2caee52d74aacb32f113522fadb99"},
                    {"op": "sha-256"},
                    {"l": "fe0d21b29b27b9b07d9b3a34ecd1f52a87ec9acf4b8d0a8c2b7e64c0e4a0de2f"},
                    {"op": "sha-256"},
                    {"anchors": [{"type": "btc", "anchor_id": "503275"}]}
                ]
            }]
        }]
    });
    Receipt::from_value(&document).expect("fixture receipt must validate")
}

#[test]
fn test_full_replay_intermediate_hashes() {
    let trace = replay(&anchored_receipt()).unwrap();

    assert_eq!(trace.leaf_hex, LEAF);
    assert_eq!(trace.len(), 15);

    // Python: sha256(b"node_id:..." + bytes.fromhex(LEAF))
    assert_eq!(
        trace.entries[1].hex,
        "be21f95d9189be3c1181673387c7fb479e74542611917ab4ee64ce0fbbc59d0a"
    );
    // Calendar root, after the second sibling concat + hash.
    assert_eq!(
        trace.entries[3].hex,
        "b016457b0433f28d51f2b62b1bbc9cf2fbe7c7edba6f9169b6845d1ce7dd2a5e"
    );
    // The calendar anchor marks the root without touching it.
    assert_eq!(trace.entries[4].label, "Anchor (cal)");
    assert_eq!(trace.entries[4].hex, trace.entries[3].hex);

    // The step whose output the anchoring transaction commits to.
    assert_eq!(
        trace.entries[6].hex,
        "9796abe845934fe22aaa48b6d293414ca2169052ebe73a711a0db27ad5d100a6"
    );
    // Bitcoin txid: double-SHA-256 over prefix || committed value || suffix.
    assert_eq!(trace.entries[9].label, "OP (sha-256-x2)");
    assert_eq!(
        trace.entries[9].hex,
        "b4a9f6ad0d327d4b1b240401283f2cf0f18b993aac3645545abf557bcd2dd777"
    );
    assert_eq!(trace.btc_double_hash_index, Some(10));

    // The anchored root, internal byte order.
    assert_eq!(
        trace.entries[13].hex,
        "36dc121756f8f4c286534604fe3f750dce7fa20e643352af03bd18e1667b7e70"
    );
    // The Bitcoin anchor displays it byte-reversed, as the ledger stores it.
    assert_eq!(trace.entries[14].label, "Anchor (btc)");
    assert_eq!(
        trace.entries[14].hex,
        "707e7b66e118bd03af5233640ea27fce0d753ffe04465386c2f4f8561712dc36"
    );
    assert_eq!(trace.btc_anchor_index, Some(15));
}

#[test]
fn test_full_replay_anchor_resolution() {
    let trace = replay(&anchored_receipt()).unwrap();
    let info = AnchorInfo::resolve(&trace);

    assert_eq!(
        info.merkle_root_hex.as_deref(),
        Some("707e7b66e118bd03af5233640ea27fce0d753ffe04465386c2f4f8561712dc36")
    );
    // OP_RETURN sits three steps before the txid double-hash: 10 - 3 = 7.
    assert_eq!(
        info.op_return_hex.as_deref(),
        Some("9796abe845934fe22aaa48b6d293414ca2169052ebe73a711a0db27ad5d100a6")
    );
    assert_eq!(info.btc_double_hash_index, Some(10));
}

#[test]
fn test_calendar_only_receipt_has_no_anchor_values() {
    let document = json!({
        "@context": "https://w3id.org/chainpoint/v3",
        "hash": LEAF,
        "branches": [{
            "label": "cal_anchor_branch",
            "ops": [
                {"l": "node_id:a4c7a7f0-92c9-11e8-ae5b-01a6f6bbeb11"},
                {"op": "sha-256"},
                {"anchors": [{"type": "cal", "anchor_id": "985635"}]}
            ]
        }]
    });
    let receipt = Receipt::from_value(&document).unwrap();
    let trace = replay(&receipt).unwrap();
    let info = AnchorInfo::resolve(&trace);

    assert_eq!(trace.len(), 3);
    assert_eq!(trace.btc_double_hash_index, None);
    assert_eq!(trace.btc_anchor_index, None);
    assert_eq!(info, AnchorInfo::default());
}

#[test]
fn test_version_2_receipt_produces_no_trace() {
    let document = json!({
        "@context": "https://w3id.org/chainpoint/v2",
        "hash": LEAF,
        "branches": [{"ops": [{"op": "sha-256"}]}]
    });
    let err = Receipt::from_value(&document).unwrap_err();
    assert_eq!(
        err,
        chainviz_core::ProofError::UnsupportedVersion { found: 2 }
    );
}
