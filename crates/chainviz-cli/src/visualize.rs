//! # Visualize Subcommand
//!
//! Replays a receipt and renders its proof graph: DOT text on request, or
//! an image produced by the external Graphviz `dot` program via a scratch
//! file.

use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

use anyhow::{bail, Context, Result};
use clap::Args;

use chainviz_graph::{dot, ProofGraph};
use chainviz_proof::{replay, AnchorInfo, Receipt};

/// Arguments for the visualize subcommand.
#[derive(Args, Debug)]
pub struct VisualizeArgs {
    /// Path to the chainpoint receipt JSON document.
    pub receipt: PathBuf,

    /// Output image format. Can be any format supported by Graphviz.
    #[arg(long, default_value = "png")]
    pub format: String,

    /// Output filename stem; the format extension is appended.
    #[arg(long, default_value = "chainpoint")]
    pub output: String,

    /// Print the DOT text to stdout instead of rendering an image.
    #[arg(long)]
    pub dot_only: bool,
}

/// Execute the visualize subcommand.
pub fn run_visualize(args: &VisualizeArgs) -> Result<()> {
    let document = std::fs::read_to_string(&args.receipt)
        .with_context(|| format!("failed to read receipt: {}", args.receipt.display()))?;

    let receipt = Receipt::from_json(&document)?;
    let trace = replay(&receipt)?;
    let anchors = AnchorInfo::resolve(&trace);
    let graph = ProofGraph::build(&trace, &anchors);
    let dot_text = dot::to_dot(&graph);

    tracing::debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "built proof graph"
    );

    if args.dot_only {
        print!("{dot_text}");
        return Ok(());
    }

    let filename = output_filename(&args.output, &args.format);
    render(&dot_text, &args.format, &filename)?;
    println!("wrote {filename}");
    Ok(())
}

/// Assemble the output filename: dots stripped from the stem, lowercase
/// format extension appended.
fn output_filename(stem: &str, format: &str) -> String {
    format!("{}.{}", stem.replace('.', ""), format.to_lowercase())
}

/// Hand the DOT text to the external `dot` program through a scratch file.
fn render(dot_text: &str, format: &str, filename: &str) -> Result<()> {
    let mut scratch = tempfile::Builder::new()
        .suffix(".dot")
        .tempfile()
        .context("failed to create scratch dot file")?;
    scratch
        .write_all(dot_text.as_bytes())
        .context("failed to write scratch dot file")?;

    let output = Command::new("dot")
        .arg(scratch.path())
        .arg(format!("-T{format}"))
        .arg("-o")
        .arg(filename)
        .output()
        .context("graphviz dot program not available")?;

    if !output.status.success() {
        bail!(
            "graphviz failed to produce an output image: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(())
}
