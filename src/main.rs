//! This is the main entry point for the commander demo.

use colored::Colorize;
use commander::cli;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = match cli::parse(None) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            std::process::exit(2);
        }
    };

    // Logs go to stderr so they never interleave with the dispatcher's output sink.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli::run(&args) {
        eprintln!("{} {e}", "error:".red().bold());
        std::process::exit(1);
    }
}
