//! grin: compress and decompress files with a Huffman code.

mod config;

use std::process::ExitCode;

use config::{print_help, Command, Config, Verbosity, DEFAULT_LOG_FILTER, USAGE};
use grin_core::{container, Metrics};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let config = match Config::from_args(&args) {
        Ok(Some(config)) => config,
        Ok(None) => {
            print_help();
            return ExitCode::SUCCESS;
        }
        Err(msg) => {
            eprintln!("error: {}", msg);
            eprintln!();
            eprint!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    let mut filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    if let Some(level) = config.log_level() {
        filter = filter.add_directive(level.into());
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if config.verbosity == Verbosity::Verbose {
        config.print();
    }

    match run(&config) {
        Ok(metrics) => {
            if config.print_stats {
                metrics.print_summary();
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("grin: {}: {}", config.input_file.display(), e);
            ExitCode::FAILURE
        }
    }
}

/// Read the input, transform it in memory, then write the output.
///
/// The output file is only created after the transform succeeded, so a
/// failed decode leaves no partial file behind.
fn run(config: &Config) -> grin_core::Result<Metrics> {
    let input = std::fs::read(&config.input_file)?;
    tracing::debug!("read {} bytes from {}", input.len(), config.input_file.display());

    let mut metrics = Metrics::new();
    let output = match (config.command, config.raw) {
        (Command::Encode, false) => container::pack_with_metrics(&input, &mut metrics)?,
        (Command::Encode, true) => grin_core::compress_with_metrics(&input, &mut metrics)?,
        (Command::Decode, false) => container::unpack_with_metrics(&input, &mut metrics)?,
        (Command::Decode, true) => grin_core::decompress_with_metrics(&input, &mut metrics)?,
    };

    std::fs::write(&config.output_file, &output)?;
    tracing::info!(
        "{:?} {} -> {} ({} -> {} bytes)",
        config.command,
        config.input_file.display(),
        config.output_file.display(),
        input.len(),
        output.len()
    );
    Ok(metrics)
}
