use clap::Parser;
use imgbench_cli::worker::WorkerArgs;
use imgbench_core::logging;
use std::process::ExitCode;

fn main() -> ExitCode {
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }
    WorkerArgs::parse().run()
}
