// src/pattern.rs
use crate::canvas::Canvas;
use crate::error::Result;
use crate::utils::*;
use image::{ImageBuffer, Rgb};
use ndarray::{Array1, Array2};

/// Point the per-row line strokes rotate around
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pivot {
    Origin,
    /// `(width, height)`, the bottom-right corner of the canvas
    FarCorner,
}

impl Pivot {
    pub fn point(self, width: f64, height: f64) -> (f64, f64) {
        match self {
            Pivot::Origin => (0.0, 0.0),
            Pivot::FarCorner => (width, height),
        }
    }
}

/// Opacity of the line stroked for each outer row
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeAlpha {
    Opaque,
    /// Alpha grows from 0 on the first row to 1 on the last
    RowRamp,
}

impl StrokeAlpha {
    pub fn alpha(self, i: u32, resolution: u32) -> f64 {
        match self {
            StrokeAlpha::Opaque => 1.0,
            StrokeAlpha::RowRamp => row_fraction(i, resolution),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatternParams {
    pub width: u32,
    pub height: u32,
    /// Number of grid subdivisions ("drip")
    pub resolution: u32,
    pub radius_scale: f64,
    pub pivot: Pivot,
    /// Row `i` is rotated by `rotation_base_degrees / i`
    pub rotation_base_degrees: f64,
    pub stroke_alpha: StrokeAlpha,
    pub background: [f32; 3],
    pub line_width: f32,
}

impl PatternParams {
    /// Coarse grid, large circles, opaque strokes turning about the far corner
    pub fn panaginip() -> Self {
        Self {
            width: 1000,
            height: 1000,
            resolution: 10,
            radius_scale: 100.0,
            pivot: Pivot::FarCorner,
            rotation_base_degrees: 180.0,
            stroke_alpha: StrokeAlpha::Opaque,
            background: [0.9, 0.9, 0.9],
            line_width: 2.0,
        }
    }

    /// Fine grid, smaller circles, fading strokes turning about the origin
    pub fn drip() -> Self {
        Self {
            resolution: 25,
            radius_scale: 50.0,
            pivot: Pivot::Origin,
            rotation_base_degrees: 360.0,
            stroke_alpha: StrokeAlpha::RowRamp,
            ..Self::panaginip()
        }
    }
}

/// Create a meshgrid from x and y arrays, similar to numpy's meshgrid
pub fn meshgrid(x: &Array1<f64>, y: &Array1<f64>) -> (Array2<f64>, Array2<f64>) {
    let nx = x.len();
    let ny = y.len();

    let mut x_grid = Array2::zeros((ny, nx));
    for j in 0..ny {
        x_grid.row_mut(j).assign(x);
    }

    let mut y_grid = Array2::zeros((ny, nx));
    for i in 0..nx {
        y_grid.column_mut(i).assign(y);
    }

    (x_grid, y_grid)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// Circle centres and radii for every (i, j) in `0..=resolution`,
/// stored `[j, i]`
pub struct CellGrid {
    xs: Array2<f64>,
    ys: Array2<f64>,
    radii: Array2<f64>,
}

impl CellGrid {
    pub fn new(params: &PatternParams) -> Self {
        let x = grid_axis(params.width as f64, params.resolution);
        let y = grid_axis(params.height as f64, params.resolution);
        let (xs, ys) = meshgrid(&x, &y);
        let radii = blend_grid(params.resolution) * params.radius_scale;

        CellGrid { xs, ys, radii }
    }

    pub fn cell(&self, i: u32, j: u32) -> Cell {
        let idx = [j as usize, i as usize];
        Cell {
            x: self.xs[idx],
            y: self.ys[idx],
            radius: self.radii[idx],
        }
    }
}

/// Renders the pattern into a fresh canvas and returns its pixels.
pub fn generate(params: &PatternParams) -> Result<ImageBuffer<Rgb<u8>, Vec<u8>>> {
    let mut canvas = Canvas::new(params.width, params.height)?;
    paint(&mut canvas, params);
    Ok(canvas.to_rgb_image())
}

pub(crate) fn paint(canvas: &mut Canvas, params: &PatternParams) {
    let [r, g, b] = params.background;
    canvas.set_fill_rgb(r, g, b);
    canvas.fill_rect(0.0, 0.0, params.width as f32, params.height as f32);

    // every row divides by the resolution; nothing but background is drawn
    if params.resolution == 0 {
        return;
    }

    let grid = CellGrid::new(params);
    for i in 0..=params.resolution {
        let mut row = canvas.save();
        paint_row(&mut row, params, &grid, i);
    }
}

fn paint_row(canvas: &mut Canvas, params: &PatternParams, grid: &CellGrid, i: u32) {
    let width = params.width as f64;
    let height = params.height as f64;

    for j in 0..=params.resolution {
        let cell = grid.cell(i, j);
        canvas.set_fill_rgb(1.0, 1.0, 1.0);
        canvas.fill_circle(cell.x as f32, cell.y as f32, cell.radius as f32);
    }

    let alpha = params.stroke_alpha.alpha(i, params.resolution);
    canvas.set_stroke_rgba(1.0, 1.0, 1.0, alpha as f32);

    if let Some(degrees) = rotation_degrees(params.rotation_base_degrees, i) {
        let (px, py) = params.pivot.point(width, height);
        canvas.rotate_about(degrees as f32, px as f32, py as f32);
    }

    canvas.set_line_width(params.line_width);
    let down = cell_coordinate(i, width, params.resolution);
    let across = cell_coordinate(i, height, params.resolution);
    canvas.stroke_line(0.0, down as f32, across as f32, 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn small(resolution: u32) -> PatternParams {
        PatternParams {
            width: 200,
            height: 200,
            resolution,
            radius_scale: 20.0,
            ..PatternParams::panaginip()
        }
    }

    #[test]
    fn test_meshgrid() {
        let x = array![0.0, 1.0, 2.0];
        let y = array![10.0, 20.0];
        let (xs, ys) = meshgrid(&x, &y);

        assert_eq!(xs, array![[0.0, 1.0, 2.0], [0.0, 1.0, 2.0]]);
        assert_eq!(ys, array![[10.0, 10.0, 10.0], [20.0, 20.0, 20.0]]);
    }

    #[test]
    fn test_presets() {
        let a = PatternParams::panaginip();
        assert_eq!((a.width, a.height, a.resolution), (1000, 1000, 10));
        assert_eq!(a.radius_scale, 100.0);
        assert_eq!(a.pivot, Pivot::FarCorner);
        assert_eq!(a.stroke_alpha, StrokeAlpha::Opaque);

        let b = PatternParams::drip();
        assert_eq!((b.width, b.height, b.resolution), (1000, 1000, 25));
        assert_eq!(b.radius_scale, 50.0);
        assert_eq!(b.pivot, Pivot::Origin);
        assert_eq!(b.rotation_base_degrees, 360.0);
        assert_eq!(b.stroke_alpha, StrokeAlpha::RowRamp);
    }

    #[test]
    fn test_pivot_point() {
        assert_eq!(Pivot::Origin.point(1000.0, 800.0), (0.0, 0.0));
        assert_eq!(Pivot::FarCorner.point(1000.0, 800.0), (1000.0, 800.0));
    }

    #[test]
    fn test_stroke_alpha() {
        assert_abs_diff_eq!(StrokeAlpha::Opaque.alpha(0, 25), 1.0);
        assert_abs_diff_eq!(StrokeAlpha::Opaque.alpha(13, 25), 1.0);
        assert_abs_diff_eq!(StrokeAlpha::RowRamp.alpha(0, 25), 0.0);
        assert_abs_diff_eq!(StrokeAlpha::RowRamp.alpha(10, 25), 0.4);
        assert_abs_diff_eq!(StrokeAlpha::RowRamp.alpha(25, 25), 1.0);
    }

    #[test]
    fn test_centre_cell() {
        let grid = CellGrid::new(&PatternParams::panaginip());
        let cell = grid.cell(5, 5);
        assert_abs_diff_eq!(cell.x, 500.0);
        assert_abs_diff_eq!(cell.y, 500.0);
        assert_abs_diff_eq!(cell.radius, 50.0);
    }

    #[test]
    fn test_cell_orientation() {
        let grid = CellGrid::new(&PatternParams::panaginip());
        let cell = grid.cell(2, 7);
        assert_abs_diff_eq!(cell.x, 200.0);
        assert_abs_diff_eq!(cell.y, 700.0);
        assert_abs_diff_eq!(cell.radius, 45.0);
    }

    #[test]
    fn test_cells_within_bounds() {
        for params in [PatternParams::panaginip(), PatternParams::drip()] {
            let grid = CellGrid::new(&params);

            for i in 0..=params.resolution {
                for j in 0..=params.resolution {
                    let cell = grid.cell(i, j);
                    assert!((0.0..=params.width as f64).contains(&cell.x));
                    assert!((0.0..=params.height as f64).contains(&cell.y));
                    assert!((0.0..=params.radius_scale).contains(&cell.radius));
                }
            }

            let last = grid.cell(params.resolution, params.resolution);
            assert_abs_diff_eq!(last.x, params.width as f64);
            assert_abs_diff_eq!(last.y, params.height as f64);
            assert_abs_diff_eq!(last.radius, params.radius_scale);
        }
    }

    #[test]
    fn test_generate_dimensions() {
        for resolution in [0, 1, 3, 10] {
            let img = generate(&PatternParams {
                width: 120,
                height: 80,
                ..small(resolution)
            })
            .unwrap();
            assert_eq!(img.dimensions(), (120, 80));
        }
    }

    #[test]
    fn test_generate_deterministic() {
        let params = PatternParams::drip();
        let first = generate(&params).unwrap();
        let second = generate(&params).unwrap();
        assert!(first.as_raw() == second.as_raw());
    }

    #[test]
    fn test_zero_resolution_is_background_only() {
        let img = generate(&small(0)).unwrap();
        let first = *img.get_pixel(0, 0);
        assert!((229..=230).contains(&first[0]), "got {:?}", first);
        assert_eq!(first[0], first[1]);
        assert_eq!(first[1], first[2]);
        assert!(img.pixels().all(|p| *p == first));
    }

    #[test]
    fn test_centre_circle_is_white() {
        let img = generate(&PatternParams::panaginip()).unwrap();
        assert_eq!(*img.get_pixel(500, 500), Rgb([255, 255, 255]));
        assert_eq!(img.dimensions(), (1000, 1000));

        // drip cells sit every 40 px; (480, 480) is cell (12, 12) with radius 24
        let img = generate(&PatternParams::drip()).unwrap();
        assert!(img.get_pixel(480, 480).0.iter().all(|&c| c >= 250));

        // 28 px from the nearest centre, so still background
        let p = *img.get_pixel(500, 500);
        assert!((229..=230).contains(&p[0]), "got {:?}", p);
    }

    #[test]
    fn test_background_survives_between_circles() {
        // origin cell has zero radius, neighbours stay small
        let img = generate(&PatternParams {
            width: 400,
            height: 400,
            resolution: 4,
            radius_scale: 10.0,
            stroke_alpha: StrokeAlpha::Opaque,
            pivot: Pivot::FarCorner,
            ..PatternParams::panaginip()
        })
        .unwrap();
        let p = *img.get_pixel(50, 150);
        assert!((229..=230).contains(&p[0]), "got {:?}", p);
    }

    #[test]
    fn test_paint_leaves_stack_balanced() {
        for params in [small(0), small(5), PatternParams::drip()] {
            let mut canvas = Canvas::new(params.width, params.height).unwrap();
            paint(&mut canvas, &params);
            assert_eq!(canvas.depth(), 0);
            assert_eq!(canvas.style().transform, tiny_skia::Transform::identity());
        }
    }

    #[test]
    fn test_generate_rejects_empty_canvas() {
        let params = PatternParams {
            width: 0,
            ..PatternParams::panaginip()
        };
        assert!(generate(&params).is_err());
    }
}
