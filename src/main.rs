use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use raw_tiff_rs::cli::Cli;
use raw_tiff_rs::image_pipeline::{ConversionError, OutputMode, run};
use raw_tiff_rs::logger;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let options = cli.batch_options();
    let config = cli.conversion_config();

    info!("Starting RAW to TIFF conversion of {}", cli.path.display());
    info!("Compression: {:?}", config.compression);
    info!("Header origin: {:?}", config.header_origin);
    info!(
        "Mode: {}",
        match options.mode {
            OutputMode::Save => "save TIFF",
            OutputMode::Preview => "preview",
        }
    );

    match run(&cli.path, &options, config, cli.lang) {
        Ok(report) if report.is_success() => Ok(ExitCode::SUCCESS),
        Ok(report) => {
            error!("{} file(s) failed", report.failed.len());
            Ok(ExitCode::FAILURE)
        }
        Err(ConversionError::InvalidPath(_)) => Ok(ExitCode::FAILURE),
        Err(e) => {
            let context = format!("Failed to process {}", cli.path.display());
            Err(anyhow::Error::new(e).context(context))
        }
    }
}
