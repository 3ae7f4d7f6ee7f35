use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};

use crate::core::{
    color_map::{ColorMapper, GlowColorMap, RenderStyle},
    error::{GridError, GridResult},
    image_utils::{generate_color_image, ImageSpecification},
};

use super::{
    common::{FrameGenerator, FrameRequest},
    quadratic_map::{ConvergenceParams, QuadraticMapSequence},
};

// Width of the visible region of the complex plane at zoom = 1.
const UNIT_ZOOM_VIEW_WIDTH: f64 = 4.0;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct JuliaParams {
    pub image_specification: ImageSpecification,
    pub constant_term: [f64; 2],
    pub convergence_params: ConvergenceParams,
    pub style: RenderStyle,
    pub background_color_rgb: [u8; 3],
}

impl JuliaParams {
    pub fn from_request(request: &FrameRequest) -> JuliaParams {
        JuliaParams {
            image_specification: ImageSpecification::centered_square(
                request.resolution,
                UNIT_ZOOM_VIEW_WIDTH,
                request.zoom,
            ),
            constant_term: [request.point.ca, request.point.cb],
            convergence_params: ConvergenceParams::with_max_iter_count(request.iterations),
            style: request.style,
            background_color_rgb: [0, 0, 0],
        }
    }

    /**
     * Maps a point in the complex plane to its color: escaping points are shaded by
     * their normalized escape count, points that never escape get the background.
     */
    pub fn pixel_renderer(
        &self,
    ) -> impl Fn(&nalgebra::Vector2<f64>) -> Rgb<u8> + std::marker::Sync + '_ {
        let color_map = GlowColorMap::new(self.style);
        let background_color = Rgb(self.background_color_rgb);
        move |point: &nalgebra::Vector2<f64>| {
            match QuadraticMapSequence::normalized_escape(
                &[point[0], point[1]],
                &self.constant_term,
                &self.convergence_params,
            ) {
                Some(value) => color_map.compute_pixel(value),
                None => background_color,
            }
        }
    }

    pub fn render(&self) -> RgbImage {
        generate_color_image(&self.image_specification, self.pixel_renderer())
    }
}

/// Escape-time renderer for the filled Julia set of `z -> z^2 + c`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JuliaSetGenerator;

impl FrameGenerator for JuliaSetGenerator {
    fn generate(&self, request: &FrameRequest) -> GridResult<RgbImage> {
        if request.resolution == 0 || !(request.zoom > 0.0) {
            return Err(GridError::Generation {
                ca: request.point.ca,
                cb: request.point.cb,
                message: format!(
                    "resolution ({}) and zoom ({}) must be positive",
                    request.resolution, request.zoom
                ),
            });
        }
        Ok(JuliaParams::from_request(request).render())
    }
}
