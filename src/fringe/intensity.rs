//! Rendering phase maps to 8-bit fringe images.

use super::phase::{Orientation, PhaseMap, Shape};

/// DC component of the projected sinusoid.
pub const BACKGROUND: f64 = 1.0;
/// Modulation depth of the projected sinusoid.
pub const AMPLITUDE: f64 = 1.0;

const SCALE: f64 = 127.5;

/// Row-major 8-bit grayscale fringe image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FringeImage {
    shape: Shape,
    data: Vec<u8>,
}

impl FringeImage {
    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn width(&self) -> u32 {
        self.shape.width
    }

    pub fn height(&self) -> u32 {
        self.shape.height
    }

    /// Intensity at a pixel, or `None` outside the image.
    pub fn get(&self, row: u32, col: u32) -> Option<u8> {
        if row >= self.shape.height || col >= self.shape.width {
            return None;
        }
        self.data
            .get(row as usize * self.shape.width as usize + col as usize)
            .copied()
    }

    /// Intensity at a pixel.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is outside the image; see [`FringeImage::get`].
    pub fn pixel(&self, row: u32, col: u32) -> u8 {
        match self.get(row, col) {
            Some(value) => value,
            None => panic!("pixel ({}, {}) outside image of {}", row, col, self.shape),
        }
    }

    /// Raw grayscale bytes, one per pixel, rows top to bottom.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn to_gray_image(&self) -> image::GrayImage {
        image::GrayImage::from_fn(self.shape.width, self.shape.height, |x, y| {
            image::Luma([self.pixel(y, x)])
        })
    }
}

/// Intensity of one sample, truncated to `u8`.
pub fn intensity(phase: f64) -> u8 {
    let value = SCALE * (BACKGROUND + AMPLITUDE * phase.cos());
    value.clamp(0.0, 255.0) as u8
}

/// Render a phase map shifted by `phase_shift` radians.
pub fn render_fringe_image(phase_map: &PhaseMap, phase_shift: f64) -> FringeImage {
    let shape = phase_map.shape();
    let width = shape.width as usize;
    let levels: Vec<u8> = phase_map
        .profile()
        .iter()
        .map(|phase| intensity(phase + phase_shift))
        .collect();

    let mut data = Vec::with_capacity(shape.pixel_count());
    match phase_map.orientation() {
        Orientation::Vertical => {
            for _ in 0..shape.height {
                data.extend_from_slice(&levels);
            }
        }
        Orientation::Horizontal => {
            for level in &levels {
                data.extend(std::iter::repeat(*level).take(width));
            }
        }
    }

    FringeImage { shape, data }
}
