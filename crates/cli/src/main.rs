mod cli;
mod logging;
mod run;

use std::{io, process::ExitCode};

use clap::Parser;

use crate::{cli::Cli, run::Status};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = logging::init_tracing(cli.log_level.as_deref(), cli.log_format) {
        eprintln!("Failed to set up tracing: {err:#}");
        return ExitCode::from(Status::Error.code());
    }

    let status = run::execute(cli, &mut io::stdout().lock());

    ExitCode::from(status.code())
}
