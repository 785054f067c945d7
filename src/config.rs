//! Configuration management for tropocorr.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::correction::DEFAULT_WAVELENGTH;
use crate::error::{Result, TropoError};
use crate::raster::GridSpec;

/// Command-line arguments for tropocorr
#[derive(Parser, Debug)]
#[command(name = "tropocorr")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the wrapped interferogram (interleaved complex float32)
    pub interferogram: PathBuf,

    /// Path of the corrected interferogram to write
    #[arg(short, long, env = "TROPOCORR_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Interferogram width in pixels
    #[arg(short, long, env = "TROPOCORR_WIDTH")]
    pub width: Option<usize>,

    /// Radar wavelength in meters
    #[arg(long, env = "TROPOCORR_WAVELENGTH")]
    pub wavelength: Option<f64>,

    /// Path to JSON configuration file
    #[arg(short, long, env = "TROPOCORR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "TROPOCORR_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Radar geometry rasters, all `width` pixels wide
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryConfig {
    /// Interferogram width in pixels
    #[serde(default)]
    pub width: usize,

    /// Per-pixel latitude raster
    #[serde(default = "default_lat_file")]
    pub lat_file: PathBuf,

    /// Per-pixel longitude raster
    #[serde(default = "default_lon_file")]
    pub lon_file: PathBuf,

    /// Line-of-sight raster, band-interleaved by line
    #[serde(default = "default_los_file")]
    pub los_file: PathBuf,

    /// Number of bands in the line-of-sight raster
    #[serde(default = "default_los_bands")]
    pub los_bands: usize,

    /// Band holding the incidence angle in degrees
    #[serde(default)]
    pub incidence_band: usize,
}

/// Delay grid and phase conversion settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionConfig {
    /// North-up float32 zenith delay grid in meters
    #[serde(default = "default_grid_file")]
    pub grid_file: PathBuf,

    /// Geometry of the delay grid
    #[serde(default)]
    pub grid: Option<GridSpec>,

    /// Radar wavelength in meters
    #[serde(default = "default_wavelength")]
    pub wavelength: f64,

    /// Replacement for non-finite delay samples
    #[serde(default)]
    pub fill_value: f64,

    /// Resample pixels on the rayon thread pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Where to write the phase screen, if anywhere
    #[serde(default)]
    pub phase_output: Option<PathBuf>,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Geometry configuration
    #[serde(default)]
    pub geometry: GeometryConfig,

    /// Correction configuration
    #[serde(default)]
    pub correction: CorrectionConfig,

    /// Corrected interferogram path (defaults next to the input)
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<(Self, PathBuf)> {
        Self::from_args(Args::parse())
    }

    /// Build the configuration from already parsed arguments
    pub fn from_args(args: Args) -> Result<(Self, PathBuf)> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments
        if let Some(width) = args.width {
            config.geometry.width = width;
        }
        if let Some(wavelength) = args.wavelength {
            config.correction.wavelength = wavelength;
        }
        if args.output.is_some() {
            config.output = args.output;
        }
        if let Some(log_level) = args.log_level {
            config.log_level = log_level;
        }

        Ok((config, args.interferogram))
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        self.geometry = other.geometry;
        self.correction = other.correction;
        if other.output.is_some() {
            self.output = other.output;
        }
        self.log_level = other.log_level;
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.geometry.width == 0 {
            return Err(TropoError::Config {
                message: "Interferogram width must be set and positive".to_string(),
            });
        }

        if self.geometry.incidence_band >= self.geometry.los_bands {
            return Err(TropoError::Config {
                message: format!(
                    "Incidence band {} does not exist in a {}-band LOS file",
                    self.geometry.incidence_band, self.geometry.los_bands
                ),
            });
        }

        let wavelength = self.correction.wavelength;
        if !(wavelength.is_finite() && wavelength > 0.0) {
            return Err(TropoError::Config {
                message: format!("Wavelength must be positive, got {}", wavelength),
            });
        }

        match &self.correction.grid {
            Some(grid) => grid.validate().map_err(|e| TropoError::Config {
                message: format!("Invalid delay grid: {}", e),
            })?,
            None => {
                return Err(TropoError::Config {
                    message: "Delay grid geometry is missing".to_string(),
                });
            }
        }

        // Validate log level
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(TropoError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        Ok(())
    }

    /// Output path for the corrected interferogram of `interferogram`
    pub fn output_path(&self, interferogram: &Path) -> PathBuf {
        if let Some(output) = &self.output {
            return output.clone();
        }
        let name = interferogram
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "interferogram".to_string());
        interferogram.with_file_name(format!("corrected_{}", name))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geometry: GeometryConfig::default(),
            correction: CorrectionConfig::default(),
            output: None,
            log_level: default_log_level(),
        }
    }
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            width: 0,
            lat_file: default_lat_file(),
            lon_file: default_lon_file(),
            los_file: default_los_file(),
            los_bands: default_los_bands(),
            incidence_band: 0,
        }
    }
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        Self {
            grid_file: default_grid_file(),
            grid: None,
            wavelength: default_wavelength(),
            fill_value: 0.0,
            parallel: default_parallel(),
            phase_output: None,
        }
    }
}

// Default value functions for serde
fn default_lat_file() -> PathBuf {
    PathBuf::from("lat.rdr")
}

fn default_lon_file() -> PathBuf {
    PathBuf::from("lon.rdr")
}

fn default_los_file() -> PathBuf {
    PathBuf::from("los.rdr")
}

fn default_los_bands() -> usize {
    2
}

fn default_grid_file() -> PathBuf {
    PathBuf::from("correction.flt")
}

fn default_wavelength() -> f64 {
    DEFAULT_WAVELENGTH
}

fn default_parallel() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
