use image::{Rgb, RgbImage};

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;
const GLYPH_ADVANCE: u32 = GLYPH_WIDTH + 1;
// Nominal line height of the bitmap font, in font-size units.
const NOMINAL_FONT_SIZE: u32 = GLYPH_HEIGHT + 1;

/**
 * 5x7 bitmap glyphs, one byte per row, top row first. The low five bits hold the
 * row, with bit 4 as the leftmost column. Covers exactly the characters needed to
 * label a frame with its coordinates.
 */
fn glyph(character: char) -> Option<[u8; 7]> {
    let rows = match character {
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        '[' => [0x0E, 0x08, 0x08, 0x08, 0x08, 0x08, 0x0E],
        ']' => [0x0E, 0x02, 0x02, 0x02, 0x02, 0x02, 0x0E],
        '=' => [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00],
        'a' => [0x00, 0x00, 0x0E, 0x01, 0x0F, 0x11, 0x0F],
        'b' => [0x10, 0x10, 0x16, 0x19, 0x11, 0x11, 0x1E],
        'c' => [0x00, 0x00, 0x0E, 0x10, 0x10, 0x11, 0x0E],
        ' ' => [0x00; 7],
        _ => return None,
    };
    Some(rows)
}

/// Integer pixel scale applied to the bitmap font for a requested font size.
pub fn glyph_scale(font_size: u32) -> u32 {
    (font_size.saturating_add(NOMINAL_FONT_SIZE / 2) / NOMINAL_FONT_SIZE).max(1)
}

/// Width in pixels of `text` when drawn at `font_size`.
pub fn text_width(text: &str, font_size: u32) -> u32 {
    let advance = GLYPH_ADVANCE.saturating_mul(glyph_scale(font_size));
    (text.chars().count() as u32).saturating_mul(advance)
}

/// Label written onto each frame.
pub fn coordinate_label(ca: f64, cb: f64) -> String {
    format!("[ca={:.2}][cb={:.2}]", ca, cb)
}

/**
 * Draw `text` onto the image with its top-left corner at `position`. Pixels that
 * would fall outside the image are clipped. Characters without a glyph advance the
 * cursor without drawing anything.
 */
pub fn draw_text(
    image: &mut RgbImage,
    text: &str,
    position: [u32; 2],
    font_size: u32,
    color: Rgb<u8>,
) {
    let scale = glyph_scale(font_size);
    let advance = GLYPH_ADVANCE.saturating_mul(scale);
    let (width, height) = image.dimensions();

    for (index, character) in text.chars().enumerate() {
        let origin_x = position[0].saturating_add((index as u32).saturating_mul(advance));
        if origin_x >= width {
            break;
        }
        let Some(rows) = glyph(character) else {
            tracing::debug!("No glyph for {:?}; leaving a blank", character);
            continue;
        };
        for (row_index, row) in rows.iter().enumerate() {
            let y0 = position[1].saturating_add((row_index as u32).saturating_mul(scale));
            if y0 >= height {
                break;
            }
            for column in 0..GLYPH_WIDTH {
                if row & (1 << (GLYPH_WIDTH - 1 - column)) == 0 {
                    continue;
                }
                let x0 = origin_x.saturating_add(column.saturating_mul(scale));
                // Clip the scaled block to the image.
                for x in x0..x0.saturating_add(scale).min(width) {
                    for y in y0..y0.saturating_add(scale).min(height) {
                        image.put_pixel(x, y, color);
                    }
                }
            }
        }
    }
}
