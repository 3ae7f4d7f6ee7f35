use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::core::{color_map::RenderStyle, error::GridResult, parameter_grid::GridPoint};

/**
 * Immutable description of a single frame: which Julia set to draw, at what
 * resolution and zoom, and with which style. Built fresh for every grid point.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FrameRequest {
    pub point: GridPoint,
    pub resolution: u32,
    pub iterations: u32,
    pub zoom: f64,
    pub style: RenderStyle,
}

/// Anything that can turn a frame request into pixels.
pub trait FrameGenerator {
    fn generate(&self, request: &FrameRequest) -> GridResult<RgbImage>;
}
