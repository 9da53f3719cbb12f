use std::path::PathBuf;
use std::process::ExitCode;
use studentdb::{app, config, console::Console};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Initialize logging on stderr so it never interleaves with the menu
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting studentdb...");

    // Optional positional argument: the configuration file
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_CONFIG_PATH));

    let mut console = Console::stdio();
    match app::run(&mut console, &config_path, config::DEFAULT_SECTION) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "session ended with an error");
            ExitCode::FAILURE
        }
    }
}
