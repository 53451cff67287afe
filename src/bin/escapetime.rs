// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

#![warn(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]

use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use escapetime::colorschemes::ColorType;
use escapetime::render::{render_color_field_row, RenderType, Renderer};

use num::complex::Complex64;
use serde::{Deserialize, Serialize};

use clap::{Parser, ValueHint};
use log::info;
use rayon::prelude::*;

// {{{ Command-line parser

#[derive(Parser, Debug)]
#[clap(version, about)]
struct Cli {
    /// The type of render to perform (Julia sets require a constant `c` in
    /// the exhibit)
    #[arg(long, value_enum, default_value = "mandelbrot")]
    render: RenderType,

    /// The color palette used to display the grayscale escape times
    #[arg(long, value_enum, default_value = "gray")]
    color: ColorType,

    /// Number of pixels along the imaginary axis (the real axis is sampled
    /// with the same step)
    #[arg(short, long, default_value_t = 1024)]
    resolution: usize,

    /// Maximum number of iterations before a point is considered in the set
    /// (this will also have an effect on the color intensity)
    #[arg(short, long, default_value_t = 256)]
    maxit: usize,

    /// Input file name containing the exhibit to render
    #[arg(value_hint = ValueHint::FilePath)]
    exhibit: String,

    /// Output file name
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    outfile: Option<String>,
}

// {{ exhibits

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct Exhibit {
    /// Bounding box for the points.
    pub upper_left: Complex64,
    pub lower_right: Complex64,
    /// Constant used for Julia sets.
    #[serde(default)]
    pub c: Option<Complex64>,
}

fn read_exhibit(filename: &str) -> Result<Exhibit, Box<dyn Error>> {
    let file = File::open(filename)?;
    let reader = BufReader::new(file);

    let exhibit = serde_json::from_reader(reader)?;

    Ok(exhibit)
}

// }}}

fn display(renderer: &Renderer, nrows: usize, ncols: usize, maxit: usize) {
    info!("Resolution:    {}x{}", ncols, nrows);
    info!(
        "Bounding box:  [{}, {}] x [{}, {}]",
        renderer.upper_left.re,
        renderer.lower_right.re,
        renderer.lower_right.im,
        renderer.upper_left.im
    );
    info!(
        "Rendering:     {:?} with {:?}",
        renderer.render_type, renderer.color_type
    );
    if renderer.render_type == RenderType::Julia {
        info!("Constant:      {}", renderer.c);
    }
    info!("Iterations:    {}", maxit);
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Cli::parse();
    let exhibit = read_exhibit(&args.exhibit)?;

    let mut renderer = Renderer::new(
        args.resolution,
        exhibit.upper_left,
        exhibit.lower_right,
        args.color,
        args.render,
    );
    if args.render == RenderType::Julia {
        let c = exhibit
            .c
            .ok_or("Julia rendering requires a constant 'c' in the exhibit")?;
        renderer = renderer.with_constant(c);
    }

    let grid = renderer.grid()?;
    display(&renderer, grid.nrows(), grid.ncols(), args.maxit);

    info!("Computing escape times...");
    let now = Instant::now();
    let field = renderer.color_field(&grid, args.maxit);
    info!(
        "Escape times done in {}s!",
        now.elapsed().as_millis() as f32 / 1000.0
    );

    let now = Instant::now();
    let mut pixels = renderer.image(&field);

    // Scope of slicing up `pixels` into horizontal bands.
    {
        let bands: Vec<(usize, &mut [u8])> =
            pixels.chunks_mut(3 * field.ncols()).enumerate().collect();

        bands.into_par_iter().for_each(|(i, band)| {
            render_color_field_row(&renderer, &field, i, band);
        });
    }

    info!(
        "Coloring done in {}s!",
        now.elapsed().as_millis() as f32 / 1000.0
    );

    let filename = match args.outfile {
        Some(filename) => PathBuf::from(filename),
        None => Path::new(&args.exhibit).with_extension("png"),
    };
    info!("Writing result to '{}'.", filename.display());
    pixels.save(filename)?;

    Ok(())
}

// {{{ tests


// }}}
