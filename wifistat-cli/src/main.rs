use std::process::ExitCode;

fn main() -> ExitCode {
    match wifistat_cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
