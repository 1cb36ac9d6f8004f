//! Implementation of `discourse check`.

use std::process::ExitCode;

use discourse_analysis::{AnalysisOptions, Pipeline};
use discourse_config::{ConfigWarning, discover_config_files};

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, warning},
};

/// Shows configuration files, the corpus, framing lexicons and any problems.
///
/// Invalid analysis settings fail the check. Warnings are reported but the
/// configuration is still usable.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);
    if config_files.is_empty() {
        println!("{}", dim("No configuration files found."));
        println!();
        println!(
            "Run {} to create a configuration file.",
            subheader("discourse init")
        );
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader("Config files:"));
    for path in &config_files {
        println!("   {}", path.display());
    }
    println!();

    let config = &ctx.config;

    println!("{}", subheader("Corpus:"));
    match &config.corpus.path {
        Some(path) if path.is_dir() => println!("   {}", path.display()),
        Some(path) => println!("   {} {}", path.display(), warning("[missing]")),
        None => println!("   {}", dim("(not set)")),
    }
    for pattern in &config.corpus.include {
        println!("      + {pattern}");
    }
    for pattern in &config.corpus.exclude {
        println!("      - {pattern}");
    }
    println!();

    println!("{}", subheader("Framing:"));
    if config.framing.categories.is_empty() {
        println!("   {}", dim("(none defined)"));
    }
    for category in &config.framing.categories {
        println!(
            "   {} {}",
            category.name,
            dim(&format!("({} entries)", category.terms.len()))
        );
    }
    println!();

    let validated = AnalysisOptions::from_config(config)
        .map_err(Into::into)
        .and_then(Pipeline::new);
    if let Err(e) = validated {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("   {}", warning(&w.to_string()));
    }
    println!();

    print_hints(&warnings);

    ExitCode::SUCCESS
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    for w in warnings {
        match w {
            ConfigWarning::CorpusPathUnset => {
                println!(
                    "{}",
                    dim("Hint: set [corpus] path in .discourse.toml or pass --corpus")
                );
            }
            ConfigWarning::IncludePatternMatchesNothing { .. } => {
                println!("{}", dim("Hint: check include patterns or the corpus path"));
            }
            ConfigWarning::NoFramingCategories => {
                println!(
                    "{}",
                    dim("Hint: add [[framing.category]] sections to .discourse.toml")
                );
            }
            _ => {}
        }
    }
}
