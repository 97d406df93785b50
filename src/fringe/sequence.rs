//! Four-step, two-orientation fringe sequence.

use super::intensity::{render_fringe_image, FringeImage};
use super::phase::{generate_phase_map, Orientation, Shape};
use crate::error::Result;
use std::f64::consts::{FRAC_PI_2, PI};

/// Phase shifts applied to each orientation, in display order.
pub const PHASE_SHIFTS: [f64; 4] = [0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2];

/// Orientations in display order.
pub const ORIENTATIONS: [Orientation; 2] = [Orientation::Vertical, Orientation::Horizontal];

/// Number of frames in every sequence.
pub const SEQUENCE_LEN: usize = PHASE_SHIFTS.len() * ORIENTATIONS.len();

/// One rendered pattern together with the parameters it was rendered from.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceFrame {
    pub orientation: Orientation,
    pub phase_shift: f64,
    pub image: FringeImage,
}

/// Ordered, immutable set of fringe images for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    shape: Shape,
    frames: Vec<SequenceFrame>,
}

impl Sequence {
    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SequenceFrame> {
        self.frames.get(index)
    }

    pub fn frames(&self) -> &[SequenceFrame] {
        &self.frames
    }

    pub fn iter(&self) -> impl Iterator<Item = &SequenceFrame> {
        self.frames.iter()
    }
}

/// Build the full display sequence for a shape.
///
/// Vertical frames come first, then horizontal, each with the shifts of
/// [`PHASE_SHIFTS`] in order. Any generation error aborts the whole build.
pub fn build_sequence(shape: Shape) -> Result<Sequence> {
    let mut frames = Vec::with_capacity(SEQUENCE_LEN);

    for orientation in ORIENTATIONS {
        let phase_map = generate_phase_map(shape, orientation)?;
        for phase_shift in PHASE_SHIFTS {
            frames.push(SequenceFrame {
                orientation,
                phase_shift,
                image: render_fringe_image(&phase_map, phase_shift),
            });
        }
    }

    log::info!("Generated {} fringe pattern images at {}", frames.len(), shape);
    Ok(Sequence { shape, frames })
}
