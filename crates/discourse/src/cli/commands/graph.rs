//! Implementation of `discourse graph`.

use std::process::ExitCode;

use discourse_analysis::{CooccurrenceEdge, NodeStrength};
use serde::Serialize;

use super::shared::{prepare, report_error};
use crate::cli::{
    args::StageCommand,
    context::CommandContext,
    output::{print_graph, print_json},
};

/// JSON output for `discourse graph`.
#[derive(Serialize)]
struct GraphOutput {
    /// Minimum count an edge had to exceed.
    threshold: u64,
    /// Edges, heaviest first.
    edges: Vec<CooccurrenceEdge>,
    /// Weighted degree of each node.
    nodes: Vec<NodeStrength>,
}

/// Builds the co-occurrence graph and prints its edges.
pub fn run(ctx: &CommandContext, cmd: &StageCommand) -> ExitCode {
    let (pipeline, corpus) = match prepare(ctx, &cmd.analysis, None) {
        Ok(prepared) => prepared,
        Err(code) => return code,
    };

    let graph = match pipeline.cooccurrence(&corpus) {
        Ok(graph) => graph,
        Err(e) => return report_error(&e),
    };

    if cmd.json {
        return print_json(&GraphOutput {
            threshold: graph.threshold(),
            edges: graph.edges(),
            nodes: graph.strengths(),
        });
    }
    print_graph(&graph.edges(), graph.threshold());
    ExitCode::SUCCESS
}
