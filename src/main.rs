use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    match skydip_tau::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
