use std::process::ExitCode;

use linekit_core::Dispatcher;

fn main() -> ExitCode {
    linekit_io::debug::init_logger();

    let mut dispatcher = Dispatcher::new(linekit_io::create_display());
    linekit::install_default_bindings(&mut dispatcher);

    match linekit_io::run_terminal(&mut dispatcher) {
        Ok(code) => {
            log::debug!("editor exited with code {code}");
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
        Err(e) => {
            eprintln!("linekit: {e}");
            ExitCode::FAILURE
        }
    }
}
