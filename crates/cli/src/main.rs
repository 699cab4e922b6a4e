use std::process::ExitCode;

fn main() -> ExitCode {
    wingman_cli::run()
}
