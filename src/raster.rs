//! Raw raster I/O.
//!
//! Rasters are headerless little-endian float32 files laid out row by row.
//! Multi-band files are either band-interleaved by line (each image row is
//! followed by the same row of the next band) or pixel-interleaved (the
//! channels of one pixel are adjacent). Complex images are pixel-interleaved
//! real/imaginary pairs.

use byteorder::{LittleEndian as LE, ReadBytesExt, WriteBytesExt};
use ndarray::{s, Array2, ArrayBase, ArrayView2, Data, Ix2};
use num_complex::Complex32;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::mem::size_of;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{Result, TropoError};
use crate::interpolation::GridInterpolator;
use crate::logging::log_raster_stats;

/// Geometry of a north-up grid: the first row lies at `y_max` and rows
/// step southward by `y_inc`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Coordinate of the first column
    pub x_min: f64,
    /// Column spacing
    pub x_inc: f64,
    /// Number of columns
    pub nx: usize,
    /// Coordinate of the first row
    pub y_max: f64,
    /// Row spacing
    pub y_inc: f64,
    /// Number of rows
    pub ny: usize,
}

impl GridSpec {
    pub fn validate(&self) -> Result<()> {
        if self.nx < 2 || self.ny < 2 {
            return Err(TropoError::parameter(
                "grid",
                format!("needs at least 2x2 nodes, got {}x{}", self.nx, self.ny),
            ));
        }
        for (name, inc) in [("x_inc", self.x_inc), ("y_inc", self.y_inc)] {
            if !(inc.is_finite() && inc > 0.0) {
                return Err(TropoError::parameter(
                    name,
                    format!("spacing must be positive, got {}", inc),
                ));
            }
        }
        if !(self.x_min.is_finite() && self.y_max.is_finite()) {
            return Err(TropoError::parameter("grid", "origin must be finite"));
        }
        Ok(())
    }

    /// Column coordinates, ascending
    pub fn x_axis(&self) -> Vec<f64> {
        (0..self.nx)
            .map(|i| self.x_min + i as f64 * self.x_inc)
            .collect()
    }

    /// Row coordinates in ascending order, i.e. southernmost row first
    pub fn y_axis(&self) -> Vec<f64> {
        (0..self.ny)
            .map(|j| self.y_max - (self.ny - 1 - j) as f64 * self.y_inc)
            .collect()
    }

    /// Reorder north-up rows to match [`GridSpec::y_axis`]
    pub fn orient<S>(&self, north_up: &ArrayBase<S, Ix2>) -> Result<Array2<f64>>
    where
        S: Data<Elem = f64>,
    {
        if north_up.dim() != (self.ny, self.nx) {
            return Err(TropoError::shape(format!(
                "grid describes {}x{} nodes but data is {:?}",
                self.ny,
                self.nx,
                north_up.dim()
            )));
        }
        Ok(north_up.slice(s![..;-1, ..]).to_owned())
    }

    /// Build an interpolator over north-up grid data
    pub fn interpolator<S>(&self, north_up: &ArrayBase<S, Ix2>) -> Result<GridInterpolator>
    where
        S: Data<Elem = f64>,
    {
        self.validate()?;
        let data = self.orient(north_up)?;
        GridInterpolator::new(&self.x_axis(), &self.y_axis(), &data)
    }
}

fn rows_in(path: &Path, row_values: usize) -> Result<usize> {
    if row_values == 0 {
        return Err(TropoError::parameter("width", "must be positive"));
    }
    let bytes = std::fs::metadata(path)?.len() as usize;
    let row_bytes = row_values * size_of::<f32>();
    if bytes % row_bytes != 0 {
        return Err(TropoError::shape(format!(
            "{} holds {} bytes, not a whole number of {}-byte rows",
            path.display(),
            bytes,
            row_bytes
        )));
    }
    Ok(bytes / row_bytes)
}

/// Read a single-band float32 raster `width` samples wide
pub fn read_f32_image(path: &Path, width: usize) -> Result<Array2<f32>> {
    let rows = rows_in(path, width)?;
    let mut reader = BufReader::new(File::open(path)?);
    let mut values = vec![0.0f32; rows * width];
    reader.read_f32_into::<LE>(&mut values)?;

    let image = Array2::from_shape_vec((rows, width), values)
        .map_err(|e| TropoError::shape(e.to_string()))?;
    log_raster_stats(&path.display().to_string(), rows, width, 1);
    Ok(image)
}

/// Read one band of a band-interleaved-by-line raster
pub fn read_band(path: &Path, width: usize, bands: usize, band: usize) -> Result<Array2<f32>> {
    if band >= bands {
        return Err(TropoError::parameter(
            "band",
            format!("band {} requested from a {}-band raster", band, bands),
        ));
    }
    let lines = read_f32_image(path, width)?;
    if lines.nrows() % bands != 0 {
        return Err(TropoError::shape(format!(
            "{} has {} lines, not a multiple of {} bands",
            path.display(),
            lines.nrows(),
            bands
        )));
    }
    debug!(band, bands, "Selecting band from line-interleaved raster");
    Ok(lines.slice(s![band..;bands, ..]).to_owned())
}

/// Read one channel of a pixel-interleaved raster
pub fn read_pixel_channel(
    path: &Path,
    width: usize,
    channels: usize,
    channel: usize,
) -> Result<Array2<f32>> {
    if channel >= channels {
        return Err(TropoError::parameter(
            "channel",
            format!("channel {} requested from a {}-channel raster", channel, channels),
        ));
    }
    let pixels = read_f32_image(path, width * channels)?;
    Ok(pixels.slice(s![.., channel..;channels]).to_owned())
}

/// Read a complex raster stored as interleaved real/imaginary float32 pairs
pub fn read_complex_image(path: &Path, width: usize) -> Result<Array2<Complex32>> {
    let pairs = read_f32_image(path, width * 2)?;
    let rows = pairs.nrows();
    Ok(Array2::from_shape_fn((rows, width), |(r, c)| {
        Complex32::new(pairs[[r, 2 * c]], pairs[[r, 2 * c + 1]])
    }))
}

/// Write a single-band float32 raster
pub fn write_f32_image<S>(path: &Path, image: &ArrayBase<S, Ix2>) -> Result<()>
where
    S: Data<Elem = f32>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    for value in image.iter() {
        writer.write_f32::<LE>(*value)?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = image.nrows(), cols = image.ncols(), "Wrote raster");
    Ok(())
}

/// Write a complex raster as interleaved real/imaginary float32 pairs
pub fn write_complex_image(path: &Path, image: &ArrayView2<Complex32>) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for value in image.iter() {
        writer.write_f32::<LE>(value.re)?;
        writer.write_f32::<LE>(value.im)?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = image.nrows(), cols = image.ncols(), "Wrote complex raster");
    Ok(())
}

/// Replace NaN and infinite samples with `fill`, returning how many changed
pub fn replace_non_finite(data: &mut Array2<f64>, fill: f64) -> usize {
    let mut replaced = 0;
    data.iter_mut().filter(|v| !v.is_finite()).for_each(|v| {
        *v = fill;
        replaced += 1;
    });
    replaced
}
