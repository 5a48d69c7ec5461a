#![allow(clippy::multiple_crate_versions)]

//! Tessel - constraint-based box partitioning for terminal panel layouts.
//!
//! Logs go to stderr. `RUST_LOG` wins over `--verbose`, which only changes the
//! default level from `warn` to `debug`.

use tracing_subscriber::EnvFilter;

fn main() {
    let cli = tessel_lib::cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(err) = tessel_lib::cli::run(&cli) {
        eprintln!("tessel: {err}");
        std::process::exit(1);
    }
}
