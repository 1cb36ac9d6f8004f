//! Command implementations and dispatch.

pub mod check;
pub mod config;
pub mod framing;
pub mod freq;
pub mod graph;
pub mod init;
pub mod run;
mod shared;
pub mod tfidf;
pub mod topics;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Config => config::run(ctx),
        Commands::Check => check::run(ctx),
        Commands::Run(cmd) => run::run(ctx, &cmd),
        Commands::Tfidf(cmd) => tfidf::run(ctx, &cmd),
        Commands::Topics(cmd) => topics::run(ctx, &cmd),
        Commands::Framing(cmd) => framing::run(ctx, &cmd),
        Commands::Graph(cmd) => graph::run(ctx, &cmd),
        Commands::Freq(cmd) => freq::run(ctx, &cmd),
    }
}
