// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

use clap::ValueEnum;
use colors_transform::{Color, Hsl};
use image::Rgb;

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColorType {
    /// Grayscale intensity as computed (fast escape is white, the set is black).
    Gray,
    /// Inverted grayscale (fast escape is black, the set is white).
    InvertedGray,
    /// Hue sweep over the escaping points (blue-green hues).
    Blue,
    /// Hue sweep over the escaping points (red-purple hues).
    Fire,
    /// Black for points in the set and white otherwise.
    Binary,
}

/// Determine the color for a grayscale intensity *g* in [0, 1].
fn color_hsl(g: f64) -> Rgb<u8> {
    let n = g.clamp(0.0, 1.0);

    // NOTE: in HSL, we have that H in [0, 360], S in [0, 100] and L in [0, 100]
    let hue = (n * 360.0).round() as f32;
    let (r, g, b) = Hsl::from(hue, 100.0, 50.0).to_rgb().as_tuple();

    Rgb([r.round() as u8, g.round() as u8, b.round() as u8])
}

fn color_gray(g: f64) -> Rgb<u8> {
    let n = (g.clamp(0.0, 1.0) * 255.0).round() as u8;

    Rgb([n, n, n])
}

/// Determine the pixel color for a grayscale intensity *g* from a color field.
///
/// Intensities outside of [0, 1] are clamped. An intensity of exactly zero
/// marks points that did not escape and is always drawn black (or white for
/// [`ColorType::InvertedGray`]).
pub fn get_escape_color(color: ColorType, g: f64) -> Rgb<u8> {
    match color {
        ColorType::Gray => color_gray(g),
        ColorType::InvertedGray => color_gray(1.0 - g),
        _ if g <= 0.0 => BLACK,
        ColorType::Binary => WHITE,
        ColorType::Blue => color_hsl(g),
        ColorType::Fire => color_hsl(3.0 * g * g - 3.0 * g + 1.0),
    }
}

// {{{ tests


// }}}
