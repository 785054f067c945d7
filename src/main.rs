//! tropocorr - apply a tropospheric delay grid to an interferogram
//!
//! This is the main entry point for the tropocorr application.

use tracing::{error, info};

use tropocorr::{apply_correction, init_tracing, log_error, Config, Result};

fn main() -> Result<()> {
    // Load configuration
    let (config, interferogram) = Config::load()?;

    init_tracing(&config.log_level);
    info!("Starting tropocorr v{}", env!("CARGO_PKG_VERSION"));

    // Validate configuration
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    info!("Correcting interferogram: {:?}", interferogram);

    let report = apply_correction(&config, &interferogram).map_err(|e| {
        log_error(&e, "apply_correction");
        e
    })?;

    info!(
        "Wrote {:?} ({} x {} pixels, {} grid samples filled)",
        report.output, report.shape.0, report.shape.1, report.filled_samples
    );
    Ok(())
}
