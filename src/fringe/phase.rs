//! Phase map generation for vertical and horizontal fringe orientations.

use crate::error::{FringeError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt;
use std::str::FromStr;

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    pub height: u32,
    pub width: u32,
}

impl Shape {
    pub fn new(height: u32, width: u32) -> Result<Self> {
        let shape = Self { height, width };
        shape.validate()?;
        Ok(shape)
    }

    /// Reject shapes with a zero dimension.
    pub fn validate(&self) -> Result<()> {
        if self.height == 0 || self.width == 0 {
            return Err(FringeError::InvalidConfiguration(format!(
                "shape must be positive, got {}x{} (height x width)",
                self.height, self.width
            )));
        }
        Ok(())
    }

    pub fn pixel_count(&self) -> usize {
        self.height as usize * self.width as usize
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Axis along which the sinusoid varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Phase varies along the width, fringes appear as vertical stripes.
    Vertical,
    /// Phase varies along the height, compressed to the display aspect ratio.
    Horizontal,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Vertical => "vertical",
            Orientation::Horizontal => "horizontal",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = FringeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vertical" => Ok(Orientation::Vertical),
            "horizontal" => Ok(Orientation::Horizontal),
            other => Err(FringeError::InvalidConfiguration(format!(
                "orientation must be 'vertical' or 'horizontal', got '{}'",
                other
            ))),
        }
    }
}

/// Per-pixel phase angles (radians) for one orientation.
///
/// Phase is constant along one axis, so only the varying axis is stored:
/// one value per column for [`Orientation::Vertical`], one per row for
/// [`Orientation::Horizontal`].
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseMap {
    shape: Shape,
    orientation: Orientation,
    profile: Vec<f64>,
}

impl PhaseMap {
    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Phase values along the varying axis.
    pub fn profile(&self) -> &[f64] {
        &self.profile
    }

    /// Phase at a pixel, or `None` outside the map.
    pub fn get(&self, row: u32, col: u32) -> Option<f64> {
        if row >= self.shape.height || col >= self.shape.width {
            return None;
        }
        let index = match self.orientation {
            Orientation::Vertical => col,
            Orientation::Horizontal => row,
        };
        self.profile.get(index as usize).copied()
    }

    /// Phase at a pixel.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is outside the map; see [`PhaseMap::get`].
    pub fn at(&self, row: u32, col: u32) -> f64 {
        match self.get(row, col) {
            Some(phase) => phase,
            None => panic!(
                "pixel ({}, {}) outside phase map of {}",
                row, col, self.shape
            ),
        }
    }
}

/// Evenly spaced samples over `[start, stop]`, endpoint included.
fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            let mut values: Vec<f64> = (0..count).map(|i| start + i as f64 * step).collect();
            values[count - 1] = stop;
            values
        }
    }
}

/// Generate the phase map for one orientation.
///
/// Vertical fringes span one full period across the width. Horizontal
/// fringes span `height / width * 2π`, centred in the `[0, 2π]` range and
/// offset by a quarter period, so the physical period matches between the
/// two orientations on a non-square display.
pub fn generate_phase_map(shape: Shape, orientation: Orientation) -> Result<PhaseMap> {
    shape.validate()?;

    let profile = match orientation {
        Orientation::Vertical => linspace(0.0, TAU, shape.width as usize),
        Orientation::Horizontal => {
            let (start, stop) = horizontal_range(shape);
            linspace(start, stop, shape.height as usize)
        }
    };

    Ok(PhaseMap {
        shape,
        orientation,
        profile,
    })
}

/// First and last row phase of a horizontal map.
pub fn horizontal_range(shape: Shape) -> (f64, f64) {
    let scaled = shape.height as f64 / shape.width as f64 * TAU;
    let offset = (TAU - scaled) / 2.0;
    let start = offset - FRAC_PI_2;
    (start, start + scaled)
}
