// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

pub mod colorfield;
pub mod colorschemes;
pub mod error;
pub mod grid;
pub mod iterate;
pub mod render;

pub use colorfield::{escape_time_to_color, julia_color_field, mandelbrot_color_field, ColorField};
pub use error::InvalidRangeError;
pub use grid::{make_grid, Grid};
pub use iterate::{
    julia_escape_times, mandelbrot_escape_times, scalar_escape_time, scalar_julia_escape_time,
    EscapeRadius, EscapeTimes,
};
