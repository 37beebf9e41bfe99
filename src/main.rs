use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "prebox", about = "Convert an APEX pre-box-up log to JSON")]
struct Cli {
    /// Path to the pre-box-up log file.
    log_file: PathBuf,
    /// Number of sensors; the first NUM_SENSORS + 1 sensor slots receive the log date.
    num_sensors: usize,
    /// Output JSON file.
    output_file: PathBuf,
    /// TOML file layered over the built-in configuration.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write debug logs to stderr.
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("prebox debug log started");
    }

    let config = prebox::prebox_core::Config::load(cli.config.as_deref())?;
    prebox::convert(&cli.log_file, cli.num_sensors, &cli.output_file, &config)?;
    Ok(())
}
