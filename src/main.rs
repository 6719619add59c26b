use std::process::ExitCode;

fn main() -> ExitCode {
    match sawyer::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            sawyer::ui::output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
