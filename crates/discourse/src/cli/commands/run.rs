//! Implementation of `discourse run`.

use std::{error::Error, fs, path::Path, process::ExitCode};

use discourse_analysis::Artifacts;
use serde_json::Value;
use tracing::info;

use super::shared::{TopN, prepare, report_error};
use crate::cli::{
    args::RunCommand,
    context::CommandContext,
    output::{
        dim, print_frequencies, print_framing, print_graph, print_json, print_tfidf, print_topics,
    },
};

/// Runs every stage and prints, or writes, the resulting artifacts.
pub fn run(ctx: &CommandContext, cmd: &RunCommand) -> ExitCode {
    let (pipeline, corpus) = match prepare(ctx, &cmd.analysis, Some(TopN::TfIdf)) {
        Ok(prepared) => prepared,
        Err(code) => return code,
    };

    let artifacts = match pipeline.run(&corpus) {
        Ok(artifacts) => artifacts,
        Err(e) => return report_error(&e),
    };

    if let Some(dir) = &cmd.out {
        let dir = ctx.cwd.join(dir);
        if let Err(e) = write_artifacts(&artifacts, &dir) {
            eprintln!("error: failed to write artifacts to {}: {e}", dir.display());
            return ExitCode::FAILURE;
        }
        if !cmd.json {
            println!("Wrote artifacts to {}", dir.display());
            return ExitCode::SUCCESS;
        }
    }

    if cmd.json {
        return print_json(&artifacts);
    }

    println!(
        "{}",
        dim(&format!("{} documents analyzed", artifacts.documents))
    );
    println!();
    print_tfidf(&artifacts.tfidf);
    println!();
    print_topics(&artifacts.topics, &artifacts.topic_diagnostics);
    println!();
    print_framing(&artifacts.framing);
    println!();
    print_graph(&artifacts.cooccurrence, pipeline.options().bigram_threshold);
    println!();
    print_frequencies(&artifacts.frequencies);

    ExitCode::SUCCESS
}

/// Writes each artifact table as `<name>.json` under `dir`.
fn write_artifacts(artifacts: &Artifacts, dir: &Path) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(dir)?;

    let Value::Object(tables) = serde_json::to_value(artifacts)? else {
        return Err("artifacts did not serialize to an object".into());
    };

    for (name, table) in &tables {
        let path = dir.join(format!("{name}.json"));
        fs::write(&path, serde_json::to_string_pretty(table)?)?;
        info!(path = %path.display(), "artifact written");
    }

    Ok(())
}
