//! Display Custom Fields - render post information blocks from the command line

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = display_custom_fields::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
