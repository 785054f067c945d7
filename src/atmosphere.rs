//! Atmospheric quantities and their height scaling.
//!
//! Surface pressure and water vapour fall off exponentially with height;
//! the scale heights are explicit parameters rather than process-wide
//! constants. Heights are in meters, pressure in millibar, temperature in
//! kelvin.

use ndarray::{Array2, ArrayView2, Zip};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TropoError};

/// Temperature lapse rate in K/m
pub const TEMPERATURE_LAPSE_RATE: f64 = 0.0065;

/// Specific gas constant of water vapour, J/(kg K)
const WATER_VAPOR_GAS_CONSTANT: f64 = 461.518;

/// Scale heights used to move delays between heights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeightScaling {
    /// Pressure (hydrostatic delay) scale height in meters
    #[serde(default = "default_pressure_scale_height")]
    pub pressure_scale_height: f64,

    /// Water vapour (wet delay) scale height in meters
    #[serde(default = "default_water_vapor_scale_height")]
    pub water_vapor_scale_height: f64,
}

impl Default for HeightScaling {
    fn default() -> Self {
        Self {
            pressure_scale_height: default_pressure_scale_height(),
            water_vapor_scale_height: default_water_vapor_scale_height(),
        }
    }
}

fn default_pressure_scale_height() -> f64 {
    7400.0
}

fn default_water_vapor_scale_height() -> f64 {
    3000.0
}

impl HeightScaling {
    /// Scaling that leaves values unchanged between heights
    pub fn disabled() -> Self {
        Self {
            pressure_scale_height: f64::INFINITY,
            water_vapor_scale_height: f64::INFINITY,
        }
    }

    /// Move a hydrostatic delay (or pressure) from one height to another
    pub fn hydrostatic(&self, value: f64, from_height: f64, to_height: f64) -> f64 {
        move_pressure(value, from_height, to_height, self.pressure_scale_height)
    }

    /// Move a wet delay (or precipitable water) from one height to another
    pub fn wet(&self, value: f64, from_height: f64, to_height: f64) -> f64 {
        move_water_vapor(value, from_height, to_height, self.water_vapor_scale_height)
    }
}

pub fn move_pressure(pressure: f64, from_height: f64, to_height: f64, scale_height: f64) -> f64 {
    pressure * ((from_height - to_height) / scale_height).exp()
}

pub fn move_temperature(temperature: f64, from_height: f64, to_height: f64) -> f64 {
    temperature - (from_height - to_height) * TEMPERATURE_LAPSE_RATE
}

pub fn move_water_vapor(water: f64, from_height: f64, to_height: f64, scale_height: f64) -> f64 {
    water * ((from_height - to_height) / scale_height).exp()
}

/// Gravity correction of the Saastamoinen model at a latitude and height
fn gravity_factor(lat_deg: f64, height: f64) -> f64 {
    1.0 - 0.00266 * (2.0 * lat_deg.to_radians()).cos() - 0.00000028 * height
}

/// Saastamoinen zenith hydrostatic delay, in centimeters
pub fn zenith_hydrostatic_delay(pressure_mbar: f64, lat_deg: f64, height: f64) -> f64 {
    0.22765 * pressure_mbar / gravity_factor(lat_deg, height)
}

/// Conversion factor between wet delay and precipitable water.
///
/// The temperature measured at `measured_height` is first moved to
/// `target_height`.
pub fn kappa(temperature: f64, measured_height: f64, target_height: f64) -> f64 {
    let t = move_temperature(temperature, measured_height, target_height);
    1.0 / (1e-5 * (3.776e5 / (70.2 + 0.72 * t) + 17.0) * WATER_VAPOR_GAS_CONSTANT)
}

/// Zenith wet delay of a column of precipitable water
pub fn precipitable_water_to_zwd(water: f64, temperature: f64) -> f64 {
    water / kappa(temperature, 0.0, 0.0)
}

/// Surface meteorology at one site
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceMet {
    pub pressure_mbar: f64,
    pub pressure_height: f64,
    pub temperature: f64,
    pub temperature_height: f64,
}

/// Precipitable water from GPS total zenith delay and surface meteorology.
///
/// The hydrostatic part is computed from pressure moved to the antenna
/// height and removed from the total delay; the remainder is scaled by
/// [`kappa`].
pub fn gps_precipitable_water(
    zwd: f64,
    zhd: f64,
    met: &SurfaceMet,
    lat_deg: f64,
    antenna_height: f64,
    scaling: &HeightScaling,
) -> f64 {
    let pressure = scaling.hydrostatic(met.pressure_mbar, met.pressure_height, antenna_height);
    let wet = zwd + zhd - 2.2768e-3 * pressure / gravity_factor(lat_deg, antenna_height);
    1000.0 * wet / kappa(met.temperature, met.temperature_height, antenna_height)
}

/// Move every sample of a surface from its own height to `target_height`
pub fn move_surface_to_height(
    surface: &ArrayView2<f64>,
    heights: &ArrayView2<f64>,
    target_height: f64,
    scale_height: f64,
) -> Result<Array2<f64>> {
    if surface.dim() != heights.dim() {
        return Err(TropoError::shape(format!(
            "surface {:?} and heights {:?} differ",
            surface.dim(),
            heights.dim()
        )));
    }
    if scale_height.is_nan() || scale_height <= 0.0 {
        return Err(TropoError::parameter(
            "scale_height",
            format!("must be positive, got {}", scale_height),
        ));
    }

    Ok(Zip::from(surface)
        .and(heights)
        .map_collect(|&v, &h| move_water_vapor(v, h, target_height, scale_height)))
}
