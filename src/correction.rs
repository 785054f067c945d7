//! Tropospheric phase correction.
//!
//! A zenith delay surface (meters) is resampled at every radar pixel,
//! projected onto the line of sight and converted to a two-way phase. The
//! phase is applied to the complex interferogram as `ifg * exp(i * phase)`.

use ndarray::{Array2, ArrayBase, ArrayView2, Data, Ix2, Zip};
use num_complex::Complex32;
use std::f64::consts::PI;
use tracing::{debug, warn};

use crate::error::{Result, TropoError};
use crate::interpolation::GridInterpolator;

/// C-band radar wavelength in meters
pub const DEFAULT_WAVELENGTH: f64 = 0.05546576;

fn check_wavelength(wavelength: f64) -> Result<()> {
    if !(wavelength.is_finite() && wavelength > 0.0) {
        return Err(TropoError::parameter(
            "wavelength",
            format!("must be positive, got {}", wavelength),
        ));
    }
    Ok(())
}

fn check_same_shape(what: &str, a: (usize, usize), b: (usize, usize)) -> Result<()> {
    if a != b {
        return Err(TropoError::shape(format!(
            "{}: {:?} does not match {:?}",
            what, a, b
        )));
    }
    Ok(())
}

/// Convert a zenith delay to the phase correction of one pixel.
///
/// The delay is mapped onto the line of sight with `1 / cos(incidence)` and
/// converted to two-way phase; the sign removes the delay from the signal.
pub fn delay_to_phase(delay: f64, wavelength: f64, incidence_deg: f64) -> f64 {
    -delay * (4.0 * PI / wavelength) / incidence_deg.to_radians().cos()
}

/// Resample a delay grid at every pixel and convert it to phase.
///
/// `lon`, `lat` and `incidence` hold the geographic position and incidence
/// angle (degrees) of each radar pixel and must share one shape.
pub fn phase_screen(
    delays: &GridInterpolator,
    lon: &ArrayView2<f64>,
    lat: &ArrayView2<f64>,
    incidence: &ArrayView2<f64>,
    wavelength: f64,
    parallel: bool,
) -> Result<Array2<f64>> {
    check_wavelength(wavelength)?;
    check_same_shape("longitude and latitude", lon.dim(), lat.dim())?;
    check_same_shape("longitude and incidence", lon.dim(), incidence.dim())?;

    let mut screen = if parallel {
        delays.par_interpolate(lon, lat)?
    } else {
        delays.interpolate(lon, lat)?
    };
    Zip::from(&mut screen)
        .and(incidence)
        .for_each(|value, &inc| *value = delay_to_phase(*value, wavelength, inc));

    debug!(rows = screen.nrows(), cols = screen.ncols(), parallel, "Computed phase screen");
    Ok(screen)
}

/// The unit phasors `exp(i * phase)` of a phase screen
pub fn correction_phasors<S>(phase: &ArrayBase<S, Ix2>) -> Array2<Complex32>
where
    S: Data<Elem = f64>,
{
    phase.mapv(|p| Complex32::cis(p as f32))
}

/// Multiply every interferogram pixel by `exp(i * phase)` in place
pub fn apply_phase_correction<S>(
    interferogram: &mut Array2<Complex32>,
    phase: &ArrayBase<S, Ix2>,
) -> Result<()>
where
    S: Data<Elem = f64>,
{
    check_same_shape("interferogram and phase", interferogram.dim(), phase.dim())?;
    Zip::from(interferogram)
        .and(phase)
        .for_each(|pixel, &p| *pixel *= Complex32::cis(p as f32));
    Ok(())
}

/// Difference of the delay maps of two acquisitions.
///
/// Fails if either map leaves a non-finite value in the difference.
pub fn differential_delay(
    reference: &ArrayView2<f64>,
    secondary: &ArrayView2<f64>,
) -> Result<Array2<f64>> {
    check_same_shape("reference and secondary delay", reference.dim(), secondary.dim())?;
    let difference = reference - secondary;

    let bad = difference.iter().filter(|v| !v.is_finite()).count();
    if bad > 0 {
        warn!(bad, "Differential delay contains non-finite values");
        return Err(TropoError::NonFinite {
            message: format!("{} non-finite values in differential delay", bad),
        });
    }
    Ok(difference)
}
