// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

use clap::ValueEnum;
use image::RgbImage;
use num::complex::{c64, Complex64};

use crate::colorfield::{julia_color_field, mandelbrot_color_field, ColorField};
use crate::colorschemes::{get_escape_color, ColorType};
use crate::error::InvalidRangeError;
use crate::grid::{make_grid, Grid};

// {{{ renderer

/// Smallest step that samples *height* with exactly *nrows* rows.
///
/// The quotient `height / nrows` can round down, so that `ceil(height / step)`
/// gives an extra row. The step is bumped by one ulp at a time until it fits.
fn step_for_rows(height: f64, nrows: usize) -> f64 {
    let mut step = height / (nrows as f64);
    if !(step.is_finite() && step > 0.0) {
        return step;
    }

    while (height / step).ceil() > nrows as f64 {
        step = f64::from_bits(step.to_bits() + 1);
    }

    step
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum RenderType {
    /// Plot Julia set: all points $z$ (for a fixed $c$) that do not escape.
    Julia,
    /// Plot Mandelbrot set: all points $c$ (for $z_0 = 0$) that do not escape.
    Mandelbrot,
}

pub struct Renderer {
    /// Upper left corner of the rendered region.
    pub upper_left: Complex64,
    /// Lower right corner of the rendered region.
    pub lower_right: Complex64,
    /// Distance between two neighboring pixels in coordinate space.
    pub step: f64,
    /// The coloring type used for rendering.
    pub color_type: ColorType,
    /// The type of rendering.
    pub render_type: RenderType,
    /// Constant used for Julia sets (ignored for Mandelbrot sets).
    pub c: Complex64,
}

impl Renderer {
    /// Create a renderer with *resolution* pixels along the imaginary axis.
    pub fn new(
        resolution: usize,
        upper_left: Complex64,
        lower_right: Complex64,
        color_type: ColorType,
        render_type: RenderType,
    ) -> Self {
        Renderer {
            upper_left,
            lower_right,
            step: step_for_rows(upper_left.im - lower_right.im, resolution),
            color_type,
            render_type,
            c: c64(0.0, 0.0),
        }
    }

    pub fn with_constant(mut self, c: Complex64) -> Self {
        self.c = c;
        self
    }

    /// Sample points for each pixel of the image.
    pub fn grid(&self) -> Result<Grid, InvalidRangeError> {
        make_grid(self.upper_left, self.lower_right, self.step)
    }

    /// Compute the grayscale intensity for each point in *grid*.
    pub fn color_field(&self, grid: &Grid, maxit: usize) -> ColorField {
        match self.render_type {
            RenderType::Mandelbrot => mandelbrot_color_field(grid, maxit),
            RenderType::Julia => julia_color_field(grid, self.c, maxit),
        }
    }

    /// Create an `RgbImage` matching the shape of *field*.
    pub fn image(&self, field: &ColorField) -> RgbImage {
        RgbImage::new(field.ncols() as u32, field.nrows() as u32)
    }
}

// }}}

// {{{ render color field

/// Write the pixels of row *row* of *field* into *pixels*.
pub fn render_color_field_row(
    renderer: &Renderer,
    field: &ColorField,
    row: usize,
    pixels: &mut [u8],
) {
    let color_type = renderer.color_type;
    assert!(pixels.len() == 3 * field.ncols());

    for (column, pixel) in pixels.chunks_exact_mut(3).enumerate() {
        let color = get_escape_color(color_type, field[(row, column)]);
        pixel.copy_from_slice(&color.0);
    }
}

// }}}

// {{{ tests


// }}}
