//! snr CLI - SNR and RMSE between a rendered image and its reference

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use snr_eval::{ChannelPolicy, SnrUnit};

mod commands;

/// Compare an image against a reference and print SNR and RMSE.
#[derive(Parser)]
#[command(name = "snr")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Image to evaluate (e.g. a render)
    input: PathBuf,

    /// Ground-truth reference image
    reference: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// SNR unit (linear, db)
    #[arg(long, default_value = "linear")]
    snr_unit: SnrUnit,

    /// Channels averaged per pixel (rgb, all)
    #[arg(long, default_value = "rgb")]
    channels: ChannelPolicy,

    /// Accept images whose channel names differ
    #[arg(long)]
    loose_names: bool,

    /// Pixels excluded on every edge by the bordered SNR/PSNR (needs --psnr)
    #[arg(long, default_value_t = 0, requires = "psnr")]
    border: usize,

    /// Also print the bordered SNR/PSNR block
    #[arg(long)]
    psnr: bool,

    /// Scan pixels on all cores
    #[arg(long)]
    parallel: bool,

    /// Write the per-pixel squared error to this file (.exr)
    #[arg(long)]
    error_map: Option<PathBuf>,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version are not failures
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match commands::compare::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
