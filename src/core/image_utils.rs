use image::{Rgb, RgbImage};
use rayon::iter::{IndexedParallelIterator, IntoParallelRefMutIterator, ParallelIterator};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{GridError, GridResult};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ImageSpecification {
    pub resolution: nalgebra::Vector2<u32>,
    pub center: nalgebra::Vector2<f64>,
    pub width: f64,
}

/**
 * Used to fully-specify both an image resolution and how it is anchored into the
 * complex plane. The height in "real" space is derived from the aspect ratio of the
 * image and the specified width.
 */
impl ImageSpecification {
    pub fn height(&self) -> f64 {
        self.width * (self.resolution[1] as f64) / (self.resolution[0] as f64)
    }

    /**
     * Square image centered on the origin. Larger zoom values shrink the visible
     * region: `zoom = 1` shows a span of `unit_width`.
     */
    pub fn centered_square(resolution: u32, unit_width: f64, zoom: f64) -> ImageSpecification {
        assert!(zoom > 0.0);
        ImageSpecification {
            resolution: nalgebra::Vector2::new(resolution, resolution),
            center: nalgebra::Vector2::new(0.0, 0.0),
            width: unit_width / zoom,
        }
    }
}

pub fn create_buffer<T: Clone>(value: T, resolution: &nalgebra::Vector2<u32>) -> Vec<Vec<T>> {
    vec![vec![value; resolution[1] as usize]; resolution[0] as usize]
}

#[derive(Clone, Debug)]
/**
 * Used to map from image space into the complex plane used to generate the fractals.
 */
pub struct LinearPixelMap {
    offset: f64,
    slope: f64,
}

impl LinearPixelMap {
    /**
     * @param n: number of pixels spanned by [x0,x1]
     * @param x0: output of the map at 0
     * @param x1: output of the map at n-1
     */
    pub fn new(n: u32, x0: f64, x1: f64) -> LinearPixelMap {
        assert!(n > 0);
        let offset = x0;
        let slope = if n > 1 {
            (x1 - x0) / ((n - 1) as f64)
        } else {
            0.0
        };
        LinearPixelMap { offset, slope }
    }

    pub fn new_from_center_and_width(n: u32, center: f64, width: f64) -> LinearPixelMap {
        LinearPixelMap::new(n, center - 0.5 * width, center + 0.5 * width)
    }

    // Map from pixel (integer) to point (float)
    pub fn map(&self, index: u32) -> f64 {
        self.offset + self.slope * (index as f64)
    }
}

/**
 * Given image size parameters and a mapping into the complex plane, iterate over
 * each pixel, using a lambda function to compute the color at each pixel location.
 * Columns are evaluated in parallel; the result is identical to a serial evaluation.
 *
 * @param pixel_renderer:  maps from a point in the image (regular space, not pixels)
 * to the color of that pixel.
 */
pub fn generate_color_image<F>(spec: &ImageSpecification, pixel_renderer: F) -> RgbImage
where
    F: Fn(&nalgebra::Vector2<f64>) -> Rgb<u8> + std::marker::Sync,
{
    let mut raw_data: Vec<Vec<Rgb<u8>>> = create_buffer(Rgb([0, 0, 0]), &spec.resolution);

    let pixel_map_width =
        LinearPixelMap::new_from_center_and_width(spec.resolution[0], spec.center[0], spec.width);
    let pixel_map_height = LinearPixelMap::new_from_center_and_width(
        spec.resolution[1],
        spec.center[1],
        -spec.height(), // Image coordinates are upside down.
    );

    raw_data.par_iter_mut().enumerate().for_each(|(x, column)| {
        let re = pixel_map_width.map(x as u32);
        column.iter_mut().enumerate().for_each(|(y, elem)| {
            let im = pixel_map_height.map(y as u32);
            *elem = pixel_renderer(&nalgebra::Vector2::<f64>::new(re, im));
        });
    });

    let mut imgbuf = RgbImage::new(spec.resolution[0], spec.resolution[1]);
    for (x, y, pixel) in imgbuf.enumerate_pixels_mut() {
        *pixel = raw_data[x as usize][y as usize];
    }
    imgbuf
}

pub fn write_image(path: &Path, image: &RgbImage) -> GridResult<()> {
    image
        .save(path)
        .map_err(|err| GridError::image(path, err))?;
    tracing::info!("Wrote image file to: {}", path.display());
    Ok(())
}
