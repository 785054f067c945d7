//! Applying a tropospheric delay grid to an interferogram on disk.

use ndarray::Array2;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

use crate::config::Config;
use crate::correction::{apply_phase_correction, phase_screen};
use crate::error::{Result, TropoError};
use crate::logging::{log_operation_end, log_operation_start, log_timed_operation};
use crate::raster::{
    read_band, read_complex_image, read_f32_image, replace_non_finite, write_complex_image,
    write_f32_image,
};

/// Summary of one correction run
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectionReport {
    /// Corrected interferogram that was written
    pub output: PathBuf,
    /// Interferogram size as `(rows, columns)`
    pub shape: (usize, usize),
    /// Delay grid samples that were non-finite and replaced
    pub filled_samples: usize,
    /// Smallest and largest phase correction applied, in radians
    pub phase_range: (f64, f64),
}

fn widen(image: Array2<f32>) -> Array2<f64> {
    image.mapv(f64::from)
}

/// Smallest and largest value, `(0.0, 0.0)` for an empty array
fn value_range(values: &Array2<f64>) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

/// Correct `interferogram` with the delay grid described by `config`.
///
/// Expects a validated configuration. Geometry rasters must have the same
/// number of rows as the interferogram.
pub fn apply_correction(config: &Config, interferogram: &Path) -> Result<CorrectionReport> {
    let start = Instant::now();
    log_operation_start(
        "apply_correction",
        Some(&interferogram.display().to_string()),
    );

    let grid = config.correction.grid.ok_or_else(|| TropoError::Config {
        message: "Delay grid geometry is missing".to_string(),
    })?;
    let width = config.geometry.width;

    let mut delays = widen(read_f32_image(&config.correction.grid_file, grid.nx)?);
    let filled_samples = replace_non_finite(&mut delays, config.correction.fill_value);
    if filled_samples > 0 {
        warn!(
            filled_samples,
            fill_value = config.correction.fill_value,
            "Replaced non-finite delay samples"
        );
    }
    let interpolator = grid.interpolator(&delays)?;

    let lat = widen(read_f32_image(&config.geometry.lat_file, width)?);
    let lon = widen(read_f32_image(&config.geometry.lon_file, width)?);
    let incidence = widen(read_band(
        &config.geometry.los_file,
        width,
        config.geometry.los_bands,
        config.geometry.incidence_band,
    )?);

    let phase = log_timed_operation("phase_screen", || {
        phase_screen(
            &interpolator,
            &lon.view(),
            &lat.view(),
            &incidence.view(),
            config.correction.wavelength,
            config.correction.parallel,
        )
    })?;

    let mut ifg = read_complex_image(interferogram, width)?;
    apply_phase_correction(&mut ifg, &phase)?;

    if let Some(path) = &config.correction.phase_output {
        write_f32_image(path, &phase.mapv(|p| p as f32))?;
    }

    let output = config.output_path(interferogram);
    write_complex_image(&output, &ifg.view())?;

    let phase_range = value_range(&phase);
    let report = CorrectionReport {
        output,
        shape: ifg.dim(),
        filled_samples,
        phase_range,
    };

    info!(
        output = %report.output.display(),
        rows = report.shape.0,
        cols = report.shape.1,
        min_phase = phase_range.0,
        max_phase = phase_range.1,
        "Interferogram corrected"
    );
    log_operation_end("apply_correction", start, true);
    Ok(report)
}
