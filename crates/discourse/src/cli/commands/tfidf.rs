//! Implementation of `discourse tfidf`.

use std::process::ExitCode;

use super::shared::{TopN, prepare, report_error};
use crate::cli::{
    args::StageCommand,
    context::CommandContext,
    output::{print_json, print_tfidf},
};

/// Prints the top TF-IDF terms of each document.
pub fn run(ctx: &CommandContext, cmd: &StageCommand) -> ExitCode {
    let (pipeline, corpus) = match prepare(ctx, &cmd.analysis, Some(TopN::TfIdf)) {
        Ok(prepared) => prepared,
        Err(code) => return code,
    };

    let table = match pipeline.tfidf(&corpus) {
        Ok(table) => table,
        Err(e) => return report_error(&e),
    };
    let scores = table.top_n(pipeline.options().top_n_terms);

    if cmd.json {
        return print_json(&scores);
    }
    print_tfidf(&scores);
    ExitCode::SUCCESS
}
