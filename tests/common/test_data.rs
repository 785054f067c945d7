//! Test data generation utilities.
//!
//! This module writes small raw raster scenes with known contents: a
//! north-up delay grid that is a plane in longitude/latitude, radar
//! geometry rasters that fall inside it, and a complex interferogram.

use ndarray::{Array2, Array3};
use num_complex::Complex32;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use tropocorr::raster::{write_complex_image, write_f32_image};
use tropocorr::{Config, GridSpec, Result};

/// Geometry of the delay grid used by [`create_scene`]
pub fn scene_grid() -> GridSpec {
    GridSpec {
        x_min: -118.0,
        x_inc: 0.1,
        nx: 11,
        y_max: 34.0,
        y_inc: 0.1,
        ny: 11,
    }
}

/// Zenith delay in meters at a longitude/latitude of the scene grid
pub fn scene_delay(lon: f64, lat: f64) -> f64 {
    0.05 + 0.002 * (lon + 118.0) / 0.1 + 0.001 * (lat - 33.0) / 0.1
}

/// Incidence angle written to band 0 of the LOS raster
pub const SCENE_INCIDENCE: f64 = 30.0;

/// A scene on disk along with a configuration pointing at it
pub struct Scene {
    /// Keeps the files alive for the duration of the test
    pub dir: TempDir,
    pub config: Config,
    pub interferogram: PathBuf,
    pub shape: (usize, usize),
}

impl Scene {
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

/// The 3x3 ramp grid `z = x + 3y` over x, y in {0, 1, 2}
pub fn ramp_grid() -> (Vec<f64>, Vec<f64>, Array2<f64>) {
    let x = vec![0.0, 1.0, 2.0];
    let y = vec![0.0, 1.0, 2.0];
    let data = Array2::from_shape_fn((3, 3), |(j, i)| x[i] + 3.0 * y[j]);
    (x, y, data)
}

/// A stack of layers over an irregular grid, layer `k` being `k * 100 + x * y`
pub fn layered_stack(layers: usize) -> (Vec<f64>, Vec<f64>, Array3<f64>) {
    let x = vec![0.0, 0.5, 2.0, 4.5, 5.0];
    let y = vec![-3.0, -1.0, 0.0, 7.0];
    let data = Array3::from_shape_fn((layers, y.len(), x.len()), |(k, j, i)| {
        k as f64 * 100.0 + x[i] * y[j]
    });
    (x, y, data)
}

fn write_geometry(dir: &Path, rows: usize, cols: usize) -> Result<()> {
    let lon = Array2::from_shape_fn((rows, cols), |(_, c)| {
        (-117.95 + 0.9 * c as f64 / (cols - 1) as f64) as f32
    });
    let lat = Array2::from_shape_fn((rows, cols), |(r, _)| {
        (33.1 + 0.7 * r as f64 / (rows - 1) as f64) as f32
    });
    write_f32_image(&dir.join("lon.rdr"), &lon)?;
    write_f32_image(&dir.join("lat.rdr"), &lat)?;

    // Band 0 incidence, band 1 azimuth, interleaved by line
    let los = Array2::from_shape_fn((2 * rows, cols), |(line, _)| {
        if line % 2 == 0 {
            SCENE_INCIDENCE as f32
        } else {
            -100.0
        }
    });
    write_f32_image(&dir.join("los.rdr"), &los)
}

/// Write a `rows` x `cols` scene into a fresh temporary directory.
///
/// The north-west corner of the delay grid holds a NaN that lies outside
/// every cell touched by the radar pixels.
pub fn create_scene(rows: usize, cols: usize) -> Result<Scene> {
    let dir = tempfile::tempdir()?;
    let grid = scene_grid();

    let x = grid.x_axis();
    let north_up = Array2::from_shape_fn((grid.ny, grid.nx), |(r, c)| {
        if r == 0 && c == 0 {
            f32::NAN
        } else {
            scene_delay(x[c], grid.y_max - r as f64 * grid.y_inc) as f32
        }
    });
    write_f32_image(&dir.path().join("correction.flt"), &north_up)?;

    write_geometry(dir.path(), rows, cols)?;

    let ifg = Array2::from_shape_fn((rows, cols), |(r, c)| {
        Complex32::new((r + 1) as f32, c as f32 * 0.5)
    });
    let interferogram = dir.path().join("filt_topophase.flat");
    write_complex_image(&interferogram, &ifg.view())?;

    let mut config = Config::default();
    config.geometry.width = cols;
    config.geometry.lat_file = dir.path().join("lat.rdr");
    config.geometry.lon_file = dir.path().join("lon.rdr");
    config.geometry.los_file = dir.path().join("los.rdr");
    config.correction.grid_file = dir.path().join("correction.flt");
    config.correction.grid = Some(grid);
    config.correction.phase_output = Some(dir.path().join("phase.flt"));

    Ok(Scene {
        dir,
        config,
        interferogram,
        shape: (rows, cols),
    })
}
