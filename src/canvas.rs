//! Raster canvas on top of tiny-skia.
//!
//! The canvas keeps one current [`DrawStyle`] and a stack of saved ones.
//! [`Canvas::save`] pushes the current style and hands back a [`CanvasScope`]
//! guard; the style is restored when the guard is dropped, so pushes and pops
//! always balance.

use std::ops::{Deref, DerefMut};

use image::{ImageBuffer, Rgb};
use tiny_skia::{
    Color, FillRule, LineCap, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform,
};

use crate::error::{Error, Result};

/// Style and transform applied to subsequent draw calls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawStyle {
    pub fill: Color,
    pub stroke: Color,
    pub line_width: f32,
    pub transform: Transform,
}

impl Default for DrawStyle {
    fn default() -> Self {
        Self {
            fill: Color::BLACK,
            stroke: Color::BLACK,
            line_width: 1.0,
            transform: Transform::identity(),
        }
    }
}

/// Builds a color from components in [0, 1], clamping out-of-range values
fn color(r: f32, g: f32, b: f32, a: f32) -> Color {
    Color::from_rgba(
        r.clamp(0.0, 1.0),
        g.clamp(0.0, 1.0),
        b.clamp(0.0, 1.0),
        a.clamp(0.0, 1.0),
    )
    .unwrap_or(Color::BLACK)
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint.anti_alias = true;
    paint
}

pub struct Canvas {
    pixmap: Pixmap,
    style: DrawStyle,
    saved: Vec<DrawStyle>,
}

impl Canvas {
    /// Allocates a transparent canvas of `width` x `height` pixels.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let pixmap = Pixmap::new(width, height).ok_or(Error::CanvasInit { width, height })?;

        Ok(Self {
            pixmap,
            style: DrawStyle::default(),
            saved: Vec::new(),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn style(&self) -> &DrawStyle {
        &self.style
    }

    /// Number of styles currently saved
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn set_fill_rgb(&mut self, r: f32, g: f32, b: f32) {
        self.style.fill = color(r, g, b, 1.0);
    }

    pub fn set_stroke_rgba(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.style.stroke = color(r, g, b, a);
    }

    pub fn set_line_width(&mut self, width: f32) {
        self.style.line_width = width;
    }

    /// Rotates later draw calls by `degrees` around `(px, py)`.
    ///
    /// Non-finite input leaves the transform untouched.
    pub fn rotate_about(&mut self, degrees: f32, px: f32, py: f32) {
        if !(degrees.is_finite() && px.is_finite() && py.is_finite()) {
            return;
        }
        self.style.transform = self
            .style
            .transform
            .pre_concat(Transform::from_rotate_at(degrees, px, py));
    }

    /// Saves the current style. It is restored when the returned scope drops.
    pub fn save(&mut self) -> CanvasScope<'_> {
        self.saved.push(self.style);
        CanvasScope { canvas: self }
    }

    fn restore(&mut self) {
        if let Some(style) = self.saved.pop() {
            self.style = style;
        }
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        if let Some(rect) = Rect::from_xywh(x, y, width, height) {
            self.pixmap
                .fill_rect(rect, &paint(self.style.fill), self.style.transform, None);
        }
    }

    /// Fills a circle with the current fill color. Degenerate radii draw nothing.
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32) {
        if radius.is_nan() || radius <= 0.0 {
            return;
        }
        if let Some(path) = PathBuilder::from_circle(cx, cy, radius) {
            self.pixmap.fill_path(
                &path,
                &paint(self.style.fill),
                FillRule::Winding,
                self.style.transform,
                None,
            );
        }
    }

    /// Strokes a straight line with the current stroke color and line width.
    /// Ends are round.
    pub fn stroke_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32) {
        let mut pb = PathBuilder::new();
        pb.move_to(x0, y0);
        pb.line_to(x1, y1);

        if let Some(path) = pb.finish() {
            let stroke = Stroke {
                width: self.style.line_width,
                line_cap: LineCap::Round,
                ..Stroke::default()
            };
            self.pixmap.stroke_path(
                &path,
                &paint(self.style.stroke),
                &stroke,
                self.style.transform,
                None,
            );
        }
    }

    /// Copies the pixels out as an opaque RGB image, dropping alpha.
    pub fn to_rgb_image(&self) -> ImageBuffer<Rgb<u8>, Vec<u8>> {
        let width = self.width() as usize;
        let pixels = self.pixmap.pixels();

        ImageBuffer::from_fn(self.width(), self.height(), |x, y| {
            let c = pixels[y as usize * width + x as usize].demultiply();
            Rgb([c.red(), c.green(), c.blue()])
        })
    }
}

/// A saved style that is restored on drop
pub struct CanvasScope<'a> {
    canvas: &'a mut Canvas,
}

impl Deref for CanvasScope<'_> {
    type Target = Canvas;

    fn deref(&self) -> &Canvas {
        self.canvas
    }
}

impl DerefMut for CanvasScope<'_> {
    fn deref_mut(&mut self) -> &mut Canvas {
        self.canvas
    }
}

impl Drop for CanvasScope<'_> {
    fn drop(&mut self) {
        self.canvas.restore();
    }
}
