use ndarray::{Array1, Array2};

/// Position of grid line `index` along an axis of length `extent`
#[inline(always)]
pub fn cell_coordinate(index: u32, extent: f64, resolution: u32) -> f64 {
    index as f64 * extent / resolution as f64
}

/// Normalised distance of cell (i, j) from the top-left corner of the grid.
/// Stays within [0, 1] for i, j in 0..=resolution.
#[inline(always)]
pub fn blend_factor(i: u32, j: u32, resolution: u32) -> f64 {
    (i as f64 + j as f64) / (2.0 * resolution as f64)
}

/// Rotation applied to outer row `i`, in degrees.
///
/// Row 0 would need `base / 0`; it gets no rotation at all instead of an
/// infinite angle.
pub fn rotation_degrees(base_degrees: f64, i: u32) -> Option<f64> {
    if i == 0 {
        return None;
    }
    Some(base_degrees / i as f64)
}

/// Fraction of the outer loop completed at row `i`
pub fn row_fraction(i: u32, resolution: u32) -> f64 {
    if resolution == 0 {
        return 1.0;
    }
    (i as f64 / resolution as f64).clamp(0.0, 1.0)
}

/// Grid line positions `0..=resolution` along one axis
pub fn grid_axis(extent: f64, resolution: u32) -> Array1<f64> {
    (0..=resolution)
        .map(|index| cell_coordinate(index, extent, resolution))
        .collect()
}

/// Blend factors for every cell, indexed `[j, i]` like `meshgrid` output
pub fn blend_grid(resolution: u32) -> Array2<f64> {
    let n = resolution as usize + 1;
    Array2::from_shape_fn((n, n), |(j, i)| blend_factor(i as u32, j as u32, resolution))
}
