use std::process::ExitCode;

fn main() -> ExitCode {
    nestling_cli::run()
}
