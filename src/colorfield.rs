// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

use nalgebra::DMatrix;
use num::complex::Complex64;

use crate::grid::Grid;
use crate::iterate::{julia_escape_times, mandelbrot_escape_times, EscapeTimes};

// {{{ types

/// Grayscale intensities in $[0, 1]$, with the same shape as the sample grid.
pub type ColorField = DMatrix<f64>;

// }}}

// {{{ grayscale

/// Map an escape iteration to a grayscale intensity
///
/// $$
///     g(n) = \frac{N - n + 1}{N + 1},
/// $$
///
/// where $N$ is *maxit*. Points that escape immediately are white ($g = 1$)
/// and points that did not escape are black ($g = 0$).
pub fn escape_time_to_color(iteration: Option<usize>, maxit: usize) -> f64 {
    match iteration {
        None => 0.0,
        Some(n) => {
            debug_assert!(n < maxit, "escape iteration {} not below {}", n, maxit);
            ((maxit - n) as f64 + 1.0) / (maxit as f64 + 1.0)
        }
    }
}

impl EscapeTimes {
    pub fn to_color_field(&self) -> ColorField {
        let maxit = self.maxit;
        let sentinel = self.sentinel();

        self.iterations.map(|n| match n {
            // NOTE: the formula gives 1 / (maxit + 1) for the sentinel
            n if n >= sentinel => 0.0,
            n => escape_time_to_color(Some(n), maxit),
        })
    }
}

// }}}

// {{{ color fields

/// Compute the grayscale intensity of the Mandelbrot set on *grid*.
pub fn mandelbrot_color_field(grid: &Grid, maxit: usize) -> ColorField {
    mandelbrot_escape_times(grid, maxit).to_color_field()
}

/// Compute the grayscale intensity of the Julia set with constant *c* on *grid*.
pub fn julia_color_field(grid: &Grid, c: Complex64, maxit: usize) -> ColorField {
    julia_escape_times(grid, c, maxit).to_color_field()
}

// }}}

// {{{ tests

#[cfg(test)]
mod tests {
    use super::*;

    use num::complex::c64;

    use crate::grid::make_grid;
    use crate::iterate::{generate_random_points_in_annulus, scalar_escape_time};

    #[test]
    fn test_escape_time_to_color() {
        let maxit = 9;

        assert_eq!(escape_time_to_color(Some(0), maxit), 1.0);
        assert_eq!(escape_time_to_color(Some(4), maxit), 0.6);
        assert_eq!(escape_time_to_color(None, maxit), 0.0);
        assert!(escape_time_to_color(Some(maxit - 1), maxit) > 0.0);
    }

    #[test]
    fn test_color_field_range() {
        let maxit = 32;
        let grid = make_grid(c64(-2.5, 2.5), c64(2.5, -2.5), 0.05).unwrap();
        let times = mandelbrot_escape_times(&grid, maxit);
        let field = mandelbrot_color_field(&grid, maxit);
        assert_eq!(field.shape(), grid.shape());

        for i in 0..grid.nrows() {
            for j in 0..grid.ncols() {
                let g = field[(i, j)];
                assert!((0.0..=1.0).contains(&g));

                match times.get(i, j) {
                    None => assert_eq!(g, 0.0),
                    Some(0) => assert_eq!(g, 1.0),
                    Some(_) => assert!(g > 0.0 && g < 1.0),
                }
            }
        }

        // the corners are far enough to escape immediately
        assert_eq!(field[(0, 0)], 1.0);
        // the origin is in the set
        assert_eq!(field[(50, 50)], 0.0);
    }

    #[test]
    fn test_julia_color_field_range() {
        let maxit = 48;
        let c = c64(-0.8, 0.156);
        let grid = make_grid(c64(-1.6, 1.0), c64(1.6, -1.0), 0.02).unwrap();
        let field = julia_color_field(&grid, c, maxit);
        assert_eq!(field.shape(), grid.shape());
        assert!(field.iter().all(|g| (0.0..=1.0).contains(g)));

        // z_1 = c lands exactly on the radius |c| and only escapes at z_2
        let c = c64(0.0, 5.0);
        let grid = Grid::from_element(1, 1, c64(0.0, 0.0));
        let field = julia_color_field(&grid, c, maxit);
        assert_eq!(field[(0, 0)], escape_time_to_color(Some(1), maxit));
        assert!(field[(0, 0)] < 1.0);
    }

    #[test]
    fn test_mandelbrot_color_vs_scalar() {
        let mut rng = rand::rng();
        let points = generate_random_points_in_annulus(&mut rng, 128, 0.0, 3.0);

        for c in points {
            let grid = Grid::from_element(1, 1, c);
            for maxit in [1, 5, 50] {
                let field = mandelbrot_color_field(&grid, maxit);
                let expected = escape_time_to_color(scalar_escape_time(c, maxit), maxit);
                assert_eq!(field.shape(), (1, 1));
                assert_eq!(field[(0, 0)], expected);
            }
        }
    }

    #[test]
    fn test_color_field_iteration_cap() {
        assert_eq!(escape_time_to_color(Some(0), usize::MAX), 1.0);

        let grid = Grid::from_element(1, 2, c64(-3.0, 0.5));
        let field = mandelbrot_color_field(&grid, usize::MAX);
        assert!(field.iter().all(|&g| g == 1.0));
    }

    #[test]
    #[should_panic]
    #[cfg(debug_assertions)]
    fn test_escape_time_to_color_out_of_range() {
        escape_time_to_color(Some(10), 10);
    }

    #[test]
    fn test_color_field_zero_iterations() {
        let grid = make_grid(c64(-3.0, 3.0), c64(3.0, -3.0), 0.5).unwrap();

        let field = mandelbrot_color_field(&grid, 0);
        assert!(field.iter().all(|&g| g == 0.0));

        let field = julia_color_field(&grid, c64(0.3, 0.5), 0);
        assert!(field.iter().all(|&g| g == 0.0));
    }
}

// }}}
