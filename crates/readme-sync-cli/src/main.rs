use std::process::ExitCode;

fn main() -> ExitCode {
    readme_sync_cli::run()
}
