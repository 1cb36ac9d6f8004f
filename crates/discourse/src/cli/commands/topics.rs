//! Implementation of `discourse topics`.

use std::process::ExitCode;

use discourse_analysis::{DocumentTopic, TopicDiagnostics, TopicSummary};
use serde::Serialize;

use super::shared::{TopN, prepare, report_error};
use crate::cli::{
    args::StageCommand,
    context::CommandContext,
    output::{print_json, print_topics},
};

/// JSON output for `discourse topics`.
#[derive(Serialize)]
struct TopicsOutput {
    /// Top terms of each topic.
    topics: Vec<TopicSummary>,
    /// Document-topic mixtures.
    document_topics: Vec<DocumentTopic>,
    /// How the fit ended.
    diagnostics: TopicDiagnostics,
}

/// Fits the topic model and prints the top terms of each topic.
pub fn run(ctx: &CommandContext, cmd: &StageCommand) -> ExitCode {
    let (pipeline, corpus) = match prepare(ctx, &cmd.analysis, Some(TopN::TopicTerms)) {
        Ok(prepared) => prepared,
        Err(code) => return code,
    };

    let model = match pipeline.topics(&corpus) {
        Ok(model) => model,
        Err(e) => return report_error(&e),
    };
    let topics = model.summaries(pipeline.options().topic_top_terms);

    if cmd.json {
        return print_json(&TopicsOutput {
            topics,
            document_topics: model.document_topics(),
            diagnostics: model.diagnostics(),
        });
    }
    print_topics(&topics, &model.diagnostics());
    ExitCode::SUCCESS
}
