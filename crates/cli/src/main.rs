use std::io::{stderr, stdout};
use std::process::ExitCode;

use log::debug;
use urlfmt_cli::cli_args::Args;
use urlfmt_cli::run;

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse_go_style(std::env::args_os());
    debug!("Arguments: {args:?}");

    match run(&args, &mut stdout().lock(), &mut stderr().lock()) {
        Ok(summary) if summary.is_success() => ExitCode::SUCCESS,
        Ok(summary) => {
            debug!("{} of {} URLs failed to parse", summary.failed, summary.processed);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
