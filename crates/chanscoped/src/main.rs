use std::process::ExitCode;

fn main() -> ExitCode {
    match chanscoped::run_daemon() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("chanscoped: {error}");
            ExitCode::FAILURE
        }
    }
}
