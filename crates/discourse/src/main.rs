//! Command-line entry point for `discourse`.

use std::process::ExitCode;

use discourse::cli::{self, CommandContext, args::parse_cli};

fn main() -> ExitCode {
    let cli = parse_cli();
    cli::logging::init(cli.verbose);

    let loaded = if cli.command.skips_config() {
        CommandContext::load_cwd_only()
    } else {
        CommandContext::load()
    };
    let ctx = match loaded {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    cli::commands::run(cli.command, &ctx)
}
