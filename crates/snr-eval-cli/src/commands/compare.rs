//! Compare command.

use anyhow::{Context, Result};
use snr_eval::metrics::error_map::{error_map, save_error_map};
use snr_eval::{MetricConfig, evaluate_images, load_image};

use crate::Cli;

pub fn run(cli: &Cli) -> Result<()> {
    println!("{}", render(cli)?);
    Ok(())
}

/// Evaluate the two images and format the report as the CLI prints it.
fn render(cli: &Cli) -> Result<String> {
    let config = MetricConfig::builder()
        .snr_unit(cli.snr_unit)
        .channels(cli.channels)
        .strict_channel_names(!cli.loose_names)
        .border(cli.border)
        .parallel(cli.parallel)
        .build();

    log::debug!("Using {:?}", config);

    let query = load_image(&cli.input)?;
    let reference = load_image(&cli.reference)?;

    let report = evaluate_images(&query, &reference, &config, cli.psnr).with_context(|| {
        format!(
            "Failed to compare {} against {}",
            cli.input.display(),
            cli.reference.display()
        )
    })?;

    if let Some(path) = &cli.error_map {
        let map = error_map(&query, &reference, &config)?;
        save_error_map(&map, path)?;
    }

    if cli.json {
        Ok(report.to_json()?)
    } else {
        Ok(report.to_string())
    }
}
