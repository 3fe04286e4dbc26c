use crate::core::data::complex::Complex;
use crate::core::data::plane_rect::PlaneRect;
use crate::core::data::resolution::Resolution;
use crate::core::viewport::ViewportModel;
use std::error::Error;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CoordinateMapperError {
    PixelOutsideGrid {
        row: usize,
        col: usize,
        resolution: Resolution,
    },
}

impl fmt::Display for CoordinateMapperError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PixelOutsideGrid {
                row,
                col,
                resolution,
            } => {
                write!(
                    f,
                    "pixel (row: {}, col: {}) is outside the {}x{} grid",
                    row,
                    col,
                    resolution.width(),
                    resolution.height()
                )
            }
        }
    }
}

impl Error for CoordinateMapperError {}

/// Fractional grid position; `round` snaps it to a pixel when it lies on the grid.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PixelPosition {
    pub row: f64,
    pub col: f64,
}

impl PixelPosition {
    #[must_use]
    pub fn round(&self, resolution: Resolution) -> Option<(usize, usize)> {
        let row = self.row.round();
        let col = self.col.round();

        if !(row >= 0.0 && col >= 0.0) {
            return None;
        }

        let (row, col) = (row as usize, col as usize);
        resolution.contains(row, col).then_some((row, col))
    }
}

// exact at both ends: t == 0 gives lo, t == 1 gives hi
#[inline]
fn lerp(lo: f64, hi: f64, t: f64) -> f64 {
    lo * (1.0 - t) + hi * t
}

#[inline]
pub(crate) fn sample_axis(lo: f64, hi: f64, index: usize, samples: usize) -> f64 {
    lerp(lo, hi, index as f64 / (samples - 1) as f64)
}

/// Plane coordinate of every column, left to right.
#[must_use]
pub fn column_coords(bounds: PlaneRect, resolution: Resolution) -> Vec<f64> {
    (0..resolution.width())
        .map(|col| sample_axis(bounds.xmin(), bounds.xmax(), col, resolution.width()))
        .collect()
}

/// Maps a pixel to the plane. Row 0 is `ymin`, the last column is `xmax`.
pub fn pixel_to_plane(
    row: usize,
    col: usize,
    model: &ViewportModel,
) -> Result<Complex, CoordinateMapperError> {
    let resolution = model.resolution();

    if !resolution.contains(row, col) {
        return Err(CoordinateMapperError::PixelOutsideGrid {
            row,
            col,
            resolution,
        });
    }

    let bounds = model.bounds();

    Ok(Complex::new(
        sample_axis(bounds.xmin(), bounds.xmax(), col, resolution.width()),
        sample_axis(bounds.ymin(), bounds.ymax(), row, resolution.height()),
    ))
}

/// Inverse of [`pixel_to_plane`]. The position is fractional and unrounded;
/// use [`PixelPosition::round`] to get a grid cell. Points outside the bounds
/// map outside `[0, height-1] x [0, width-1]` rather than failing.
#[must_use]
pub fn plane_to_pixel(point: Complex, model: &ViewportModel) -> PixelPosition {
    let bounds = model.bounds();
    let resolution = model.resolution();

    let col = (point.real - bounds.xmin()) / bounds.width() * (resolution.width() - 1) as f64;
    let row = (point.imag - bounds.ymin()) / bounds.height() * (resolution.height() - 1) as f64;

    PixelPosition { row, col }
}
