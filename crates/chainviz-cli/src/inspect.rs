//! # Inspect Subcommand
//!
//! Prints a receipt's replay trace step by step, followed by the resolved
//! anchor values. `--json` emits the same data as a JSON report instead.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use chainviz_proof::{replay, AnchorInfo, Receipt};

/// Arguments for the inspect subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the chainpoint receipt JSON document.
    pub receipt: PathBuf,

    /// Emit the trace and anchor values as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute the inspect subcommand.
pub fn run_inspect(args: &InspectArgs) -> Result<()> {
    let document = std::fs::read_to_string(&args.receipt)
        .with_context(|| format!("failed to read receipt: {}", args.receipt.display()))?;

    let receipt = Receipt::from_json(&document)?;
    let trace = replay(&receipt)?;
    let anchors = AnchorInfo::resolve(&trace);

    if args.json {
        let report = serde_json::json!({
            "trace": trace,
            "anchors": anchors,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{:>3}  {:<18}  hash", "idx", "step");
    println!("{:>3}  {:<18}  {}", 0, "Leaf", trace.leaf_hex);
    for entry in &trace.entries {
        println!("{:>3}  {:<18}  {}", entry.index, entry.label, entry.hex);
    }

    println!();
    println!(
        "merkle root (btc): {}",
        anchors.merkle_root_hex.as_deref().unwrap_or("none")
    );
    println!(
        "op_return value:   {}",
        anchors.op_return_hex.as_deref().unwrap_or("none")
    );

    Ok(())
}
