use std::process::ExitCode;

use symgrid::ui::output;

fn main() -> ExitCode {
    match symgrid::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
