use crate::geometry::{Color, ImagePoint};
use crate::raster::PixelBuffer;

use super::tolerance_threshold;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushMode {
    Erase,
    Restore,
}

/// Applies one circular brush stamp at `center` (image space, sub-pixel).
///
/// `Erase` clears alpha inside the circle; `Restore` copies all four channels
/// back from the backing image. Work is limited to the circle's bounding box
/// intersected with the image so per-sample drag updates stay cheap. Returns
/// whether any pixel changed.
pub fn apply_manual_brush(
    buffer: &mut PixelBuffer,
    center_x: f32,
    center_y: f32,
    radius: f32,
    mode: BrushMode,
) -> bool {
    stamp_circle(buffer, center_x, center_y, radius, |buffer, x, y| match mode {
        BrushMode::Erase => {
            let pixel = buffer.current_mut().get_pixel_mut(x, y);
            if pixel[3] == 0 {
                return false;
            }
            pixel[3] = 0;
            true
        }
        BrushMode::Restore => {
            let original = *buffer.backing().get_pixel(x, y);
            let pixel = buffer.current_mut().get_pixel_mut(x, y);
            if *pixel == original {
                return false;
            }
            *pixel = original;
            true
        }
    })
}

/// Reads the color under the initial touch point of a magic-brush drag.
/// `None` when the point misses the image; the session then keeps its
/// previous reference, mirroring pointer drift past the canvas edge.
pub fn sample_color(buffer: &PixelBuffer, point: ImagePoint) -> Option<Color> {
    let pixel = buffer.read(point)?;
    Some(Color::new(pixel[0], pixel[1], pixel[2]))
}

/// Color-keyed erase: clears only those circle pixels whose RGB distance to
/// the captured `reference` color is within `tolerance`, so a stroke can
/// sweep over a subject edge without eating into it.
pub fn apply_magic_brush(
    buffer: &mut PixelBuffer,
    center_x: f32,
    center_y: f32,
    radius: f32,
    tolerance: f32,
    reference: Color,
) -> bool {
    let threshold = tolerance_threshold(tolerance);
    stamp_circle(buffer, center_x, center_y, radius, |buffer, x, y| {
        let pixel = buffer.current_mut().get_pixel_mut(x, y);
        if pixel[3] == 0 {
            return false;
        }
        let candidate = Color::new(pixel[0], pixel[1], pixel[2]);
        if reference.distance_squared(candidate) > threshold {
            return false;
        }
        pixel[3] = 0;
        true
    })
}

fn stamp_circle(
    buffer: &mut PixelBuffer,
    center_x: f32,
    center_y: f32,
    radius: f32,
    mut apply: impl FnMut(&mut PixelBuffer, u32, u32) -> bool,
) -> bool {
    if radius <= 0.0 {
        return false;
    }
    let width = buffer.width() as i64;
    let height = buffer.height() as i64;

    let min_x = ((center_x - radius).floor() as i64).max(0);
    let max_x = ((center_x + radius).ceil() as i64).min(width - 1);
    let min_y = ((center_y - radius).floor() as i64).max(0);
    let max_y = ((center_y + radius).ceil() as i64).min(height - 1);
    if min_x > max_x || min_y > max_y {
        return false;
    }

    let radius_sq = radius * radius;
    let mut changed = false;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f32 - center_x;
            let dy = y as f32 - center_y;
            if dx * dx + dy * dy > radius_sq {
                continue;
            }
            changed |= apply(buffer, x as u32, y as u32);
        }
    }
    changed
}
