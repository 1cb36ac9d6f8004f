//! Implementation of `discourse freq`.

use std::process::ExitCode;

use super::shared::{TopN, prepare, report_error};
use crate::cli::{
    args::StageCommand,
    context::CommandContext,
    output::{print_frequencies, print_json},
};

/// Prints the most frequent terms across the corpus.
pub fn run(ctx: &CommandContext, cmd: &StageCommand) -> ExitCode {
    let (pipeline, corpus) = match prepare(ctx, &cmd.analysis, Some(TopN::Frequencies)) {
        Ok(prepared) => prepared,
        Err(code) => return code,
    };

    let frequencies = match pipeline.frequencies(&corpus) {
        Ok(frequencies) => frequencies,
        Err(e) => return report_error(&e),
    };
    let top = frequencies.top(pipeline.options().frequency_top_n);

    if cmd.json {
        return print_json(&top);
    }
    print_frequencies(top);
    ExitCode::SUCCESS
}
