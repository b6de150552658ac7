//! matbench-plot CLI
//!
//! Renders a CSV of benchmark results as a log-log PNG or SVG chart.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use matbench_plot::{plot_benchmark_results, ChartConfig, DEFAULT_OUTPUT};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Parser)]
#[command(name = "matbench-plot")]
#[command(author, version, about = "Plot matrix benchmark results.")]
struct Cli {
    /// Input CSV file with benchmark results
    csv_file: PathBuf,

    /// Output plot file name; the extension picks the format (png or svg)
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let written = plot_benchmark_results(&cli.csv_file, &cli.output, &ChartConfig::default())?;
    println!("Plot saved as {}", written.display());
    Ok(())
}

/// Logs go to stderr so stdout only carries the confirmation line
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}
