// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

use log::debug;
use nalgebra::DMatrix;
use num::complex::{c64, Complex64};

use crate::error::InvalidRangeError;

// {{{ types

/// Sample points in the complex plane, indexed by `(row, column)`.
pub type Grid = DMatrix<Complex64>;

// }}}

// {{{ make_grid

/// Construct a grid of sample points covering the half-open rectangle
///
/// $$
///     [x_{tl}, x_{br}) \times (y_{br}, y_{tl}],
/// $$
///
/// where the real part increases along the columns and the imaginary part
/// decreases along the rows, both in increments of *step*.
pub fn make_grid(
    top_left: Complex64,
    bottom_right: Complex64,
    step: f64,
) -> Result<Grid, InvalidRangeError> {
    if !(step.is_finite() && step > 0.0) {
        return Err(InvalidRangeError::InvalidStep(step));
    }

    if !(top_left.is_finite() && bottom_right.is_finite()) {
        return Err(InvalidRangeError::NonFiniteCorner {
            top_left,
            bottom_right,
        });
    }

    let width = bottom_right.re - top_left.re;
    let height = top_left.im - bottom_right.im;
    if width <= 0.0 || height <= 0.0 {
        return Err(InvalidRangeError::EmptyRectangle {
            top_left,
            bottom_right,
        });
    }

    let nrows = (height / step).ceil() as usize;
    let ncols = (width / step).ceil() as usize;
    if nrows == 0 || ncols == 0 {
        return Err(InvalidRangeError::EmptyRectangle {
            top_left,
            bottom_right,
        });
    }

    debug!(
        "Grid {}x{} with step {} from {} to {}",
        nrows, ncols, step, top_left, bottom_right
    );

    Ok(Grid::from_fn(nrows, ncols, |i, j| {
        c64(
            top_left.re + (j as f64) * step,
            top_left.im - (i as f64) * step,
        )
    }))
}

// }}}

// {{{ tests

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_shape_and_corners() {
        let grid = make_grid(c64(0.0, 2.0), c64(2.0, -2.0), 1.0).unwrap();

        assert_eq!(grid.shape(), (4, 2));
        assert_eq!(grid[(0, 0)], c64(0.0, 2.0));
        assert_eq!(grid[(0, 1)], c64(1.0, 2.0));
        assert_eq!(grid[(3, 0)], c64(0.0, -1.0));
        assert_eq!(grid[(3, 1)], c64(1.0, -1.0));
    }

    #[test]
    fn test_grid_ordering() {
        let grid = make_grid(c64(-2.0, 1.0), c64(1.0, -1.0), 0.25).unwrap();
        assert_eq!(grid.shape(), (8, 12));

        for i in 0..grid.nrows() {
            for j in 1..grid.ncols() {
                assert!(grid[(i, j)].re > grid[(i, j - 1)].re);
                assert_eq!(grid[(i, j)].im, grid[(i, 0)].im);
            }
        }

        for j in 0..grid.ncols() {
            for i in 1..grid.nrows() {
                assert!(grid[(i, j)].im < grid[(i - 1, j)].im);
                assert_eq!(grid[(i, j)].re, grid[(0, j)].re);
            }
        }

        // half-open: the bottom right corner itself is never sampled
        let last = grid[(grid.nrows() - 1, grid.ncols() - 1)];
        assert!(last.re < 1.0);
        assert!(last.im > -1.0);
    }

    #[test]
    fn test_grid_partial_step() {
        // extents that are not a multiple of the step are rounded up
        let grid = make_grid(c64(0.0, 1.0), c64(1.0, 0.0), 0.4).unwrap();
        assert_eq!(grid.shape(), (3, 3));
        assert!((grid[(2, 2)] - c64(0.8, 0.2)).norm() < 1.0e-15);
    }

    #[test]
    fn test_grid_invalid_step() {
        for step in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = make_grid(c64(0.0, 2.0), c64(2.0, -2.0), step);
            assert!(matches!(result, Err(InvalidRangeError::InvalidStep(_))));
        }
    }

    #[test]
    fn test_grid_empty_rectangle() {
        // corners swapped along the real axis
        let result = make_grid(c64(2.0, 2.0), c64(0.0, -2.0), 1.0);
        assert!(matches!(result, Err(InvalidRangeError::EmptyRectangle { .. })));

        // corners swapped along the imaginary axis
        let result = make_grid(c64(0.0, -2.0), c64(2.0, 2.0), 1.0);
        assert!(matches!(result, Err(InvalidRangeError::EmptyRectangle { .. })));

        // zero height
        let result = make_grid(c64(0.0, 1.0), c64(2.0, 1.0), 1.0);
        assert!(matches!(result, Err(InvalidRangeError::EmptyRectangle { .. })));
    }

    #[test]
    fn test_grid_underflowing_extent() {
        // the width is positive, but width / step rounds to zero columns
        let result = make_grid(c64(0.0, 1.0), c64(5e-324, 0.0), 2.0);
        assert!(matches!(result, Err(InvalidRangeError::EmptyRectangle { .. })));

        let result = make_grid(c64(0.0, 5e-324), c64(1.0, 0.0), 2.0);
        assert!(matches!(result, Err(InvalidRangeError::EmptyRectangle { .. })));
    }

    #[test]
    fn test_grid_non_finite_corner() {
        let result = make_grid(c64(f64::NAN, 2.0), c64(2.0, -2.0), 1.0);
        assert!(matches!(result, Err(InvalidRangeError::NonFiniteCorner { .. })));
    }
}

// }}}
