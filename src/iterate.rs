// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

use log::trace;
use nalgebra::DMatrix;
use num::complex::Complex64;
use num_traits::Zero;

use crate::grid::Grid;

/// Escape radius for the Mandelbrot family $z^2 + c$.
pub const MANDELBROT_ESCAPE_RADIUS: f64 = 2.0;

// {{{ types

/// Escape iterations are at most `maxit - 1`, so `maxit + 1` (or `maxit`
/// itself when that overflows) never collides with one.
#[inline]
pub fn escape_sentinel(maxit: usize) -> usize {
    maxit.saturating_add(1)
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EscapeRadius {
    /// Escape radius (squared).
    pub radius_squared: f64,
}

impl EscapeRadius {
    pub fn new(radius: f64) -> Self {
        EscapeRadius {
            radius_squared: radius * radius,
        }
    }

    /// Classical radius for the Mandelbrot set.
    pub fn mandelbrot() -> Self {
        EscapeRadius::new(MANDELBROT_ESCAPE_RADIUS)
    }

    /// Radius $\max(|c|, 2)$ for the Julia set of the fixed constant *c*.
    pub fn julia(c: Complex64) -> Self {
        EscapeRadius::new(c.norm().max(MANDELBROT_ESCAPE_RADIUS))
    }

    pub fn radius(&self) -> f64 {
        self.radius_squared.sqrt()
    }

    /// Check if the iterate *z* is strictly outside the escape radius.
    #[inline]
    pub fn is_escaped(&self, z: Complex64) -> bool {
        z.norm_sqr() > self.radius_squared
    }
}

/// Escape iterations for a grid of points.
///
/// Points that did not escape store the sentinel `maxit + 1` (saturated at
/// `usize::MAX`), which is never a valid iteration count. Use
/// [`EscapeTimes::get`] to read them as options.
#[derive(Clone, Debug, PartialEq)]
pub struct EscapeTimes {
    /// Raw escape iterations, with the sentinel for points that did not escape.
    pub iterations: DMatrix<usize>,
    /// Maximum number of iterations used to compute the escape times.
    pub maxit: usize,
}

impl EscapeTimes {
    /// Value stored for points that did not escape.
    pub fn sentinel(&self) -> usize {
        escape_sentinel(self.maxit)
    }

    pub fn shape(&self) -> (usize, usize) {
        self.iterations.shape()
    }

    /// Iteration at which the point at `(row, column)` escaped or None otherwise.
    pub fn get(&self, row: usize, column: usize) -> Option<usize> {
        match self.iterations[(row, column)] {
            n if n >= self.sentinel() => None,
            n => Some(n),
        }
    }

    /// Number of points that did not escape.
    pub fn count_interior(&self) -> usize {
        let sentinel = self.sentinel();
        self.iterations.iter().filter(|&&n| n == sentinel).count()
    }
}

// }}}

// {{{ scalar escape

fn orbit_escape_time(
    z0: Complex64,
    c: Complex64,
    radius: EscapeRadius,
    maxit: usize,
) -> Option<usize> {
    let mut z = z0;

    for n in 0..maxit {
        z = z * z + c;
        if radius.is_escaped(z) {
            return Some(n);
        }
    }

    None
}

/// Compute the escape time of the point *c* under the map
///
/// $$
///     z_{n + 1} = z_n^2 + c, \qquad z_0 = 0.
/// $$
///
/// The returned iteration is the smallest $n$ such that $|z_{n + 1}| > 2$ or
/// None if the point does not escape in *maxit* iterations.
pub fn scalar_escape_time(c: Complex64, maxit: usize) -> Option<usize> {
    orbit_escape_time(Complex64::zero(), c, EscapeRadius::mandelbrot(), maxit)
}

/// Compute the escape time of the starting point *z0* under the map
/// $z_{n + 1} = z_n^2 + c$ for a fixed *c*, using the escape radius
/// $\max(|c|, 2)$.
pub fn scalar_julia_escape_time(z0: Complex64, c: Complex64, maxit: usize) -> Option<usize> {
    orbit_escape_time(z0, c, EscapeRadius::julia(c), maxit)
}

// }}}

// {{{ vectorized escape

/// Working arrays for the vectorized iteration.
///
/// All three matrices have the same shape and are traversed in the same
/// (column-major) storage order, so flat indices line up.
struct EscapeState {
    /// Current iterate.
    z: DMatrix<Complex64>,
    /// Iteration at which each point escaped (`maxit + 1` if it did not).
    iterations: DMatrix<usize>,
    /// Points that have not escaped yet.
    active: DMatrix<bool>,
    /// Number of points that have not escaped yet.
    nactive: usize,

    maxit: usize,
}

impl EscapeState {
    fn new(z0: DMatrix<Complex64>, maxit: usize) -> Self {
        let (nrows, ncols) = z0.shape();

        EscapeState {
            z: z0,
            iterations: DMatrix::from_element(nrows, ncols, escape_sentinel(maxit)),
            active: DMatrix::from_element(nrows, ncols, true),
            nactive: nrows * ncols,
            maxit,
        }
    }

    /// Perform iteration *n*, where `c(k)` gives the constant for the point
    /// at flat index *k*.
    fn step<F>(&mut self, n: usize, c: F, radius: EscapeRadius)
    where
        F: Fn(usize) -> Complex64,
    {
        for (k, (z, &active)) in self.z.iter_mut().zip(self.active.iter()).enumerate() {
            if active {
                *z = *z * *z + c(k);
            }
        }

        for ((z, iteration), active) in self
            .z
            .iter()
            .zip(self.iterations.iter_mut())
            .zip(self.active.iter_mut())
        {
            let escaped = radius.is_escaped(*z);
            if escaped && *active {
                *iteration = n;
                self.nactive -= 1;
            }

            *active = *active && !escaped;
        }
    }

    fn run<F>(mut self, c: F, radius: EscapeRadius) -> EscapeTimes
    where
        F: Fn(usize) -> Complex64,
    {
        for n in 0..self.maxit {
            if self.nactive == 0 {
                trace!("All points escaped after {} iterations", n);
                break;
            }

            self.step(n, &c, radius);
        }

        EscapeTimes {
            iterations: self.iterations,
            maxit: self.maxit,
        }
    }
}

/// Compute the escape times for all the points in *grid*, used as the
/// constant $c$ in the Mandelbrot map with $z_0 = 0$.
pub fn mandelbrot_escape_times(grid: &Grid, maxit: usize) -> EscapeTimes {
    let (nrows, ncols) = grid.shape();
    let state = EscapeState::new(DMatrix::zeros(nrows, ncols), maxit);

    state.run(|k| grid[k], EscapeRadius::mandelbrot())
}

/// Compute the escape times for all the points in *grid*, used as the
/// starting point $z_0$ in the Julia map with the fixed constant *c*.
pub fn julia_escape_times(grid: &Grid, c: Complex64, maxit: usize) -> EscapeTimes {
    let state = EscapeState::new(grid.clone_owned(), maxit);

    state.run(|_| c, EscapeRadius::julia(c))
}

// }}}

// {{{ random points

/// Generate *n* random points in the annulus $r_{min} \le |z| < r_{max}$.
#[cfg(test)]
pub(crate) fn generate_random_points_in_annulus<R: rand::Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    rmin: f64,
    rmax: f64,
) -> Vec<Complex64> {
    use rand_distr::{Distribution, Uniform};

    let radius = Uniform::new(rmin, rmax).unwrap();
    let angle = Uniform::new(0.0, 2.0 * std::f64::consts::PI).unwrap();

    (0..n)
        .map(|_| Complex64::from_polar(radius.sample(rng), angle.sample(rng)))
        .collect()
}

// }}}

// {{{ tests


// }}}
