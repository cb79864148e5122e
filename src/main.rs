use std::process::ExitCode;

use aero_roi::app;
use aero_roi::cli::Cli;
use aero_roi::roi::RoiError;
use clap::Parser;

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    match app::run(&cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            // A failed anchor is reported distinctly from load/config errors.
            if err.downcast_ref::<RoiError>().is_some() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
