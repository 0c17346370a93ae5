use clap::Parser;
use tasklist::cli::commands::Cli;
use tasklist::cli::handlers;
use tracing_subscriber::EnvFilter;

/// Log filter variable; `RUST_LOG` is used when unset
const LOG_ENV: &str = "TSK_LOG";

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
