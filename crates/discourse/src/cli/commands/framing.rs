//! Implementation of `discourse framing`.

use std::process::ExitCode;

use super::shared::{prepare, report_error};
use crate::cli::{
    args::StageCommand,
    context::CommandContext,
    output::{print_framing, print_json},
};

/// Prints framing totals and the per-document breakdown.
pub fn run(ctx: &CommandContext, cmd: &StageCommand) -> ExitCode {
    let (pipeline, corpus) = match prepare(ctx, &cmd.analysis, None) {
        Ok(prepared) => prepared,
        Err(code) => return code,
    };

    let report = match pipeline.framing(&corpus) {
        Ok(report) => report,
        Err(e) => return report_error(&e),
    };

    if cmd.json {
        return print_json(&report);
    }
    print_framing(&report);
    ExitCode::SUCCESS
}
