// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

use num::complex::Complex64;
use thiserror::Error;

/// Errors raised when a sample grid cannot be constructed.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum InvalidRangeError {
    #[error("grid step must be positive and finite, got {0}")]
    InvalidStep(f64),
    #[error("grid corners must be finite, got {top_left} and {bottom_right}")]
    NonFiniteCorner {
        top_left: Complex64,
        bottom_right: Complex64,
    },
    #[error("empty rectangle between {top_left} (top left) and {bottom_right} (bottom right)")]
    EmptyRectangle {
        top_left: Complex64,
        bottom_right: Complex64,
    },
}
