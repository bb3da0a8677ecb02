use std::collections::VecDeque;

use image::RgbaImage;

use crate::geometry::{Color, ImagePoint};

use super::tolerance_threshold;

/// Magic-wand region erase: breadth-first growth from `seed` over 4-connected
/// neighbors whose color stays within `tolerance` of the seed color, setting
/// alpha to 0 for every reached pixel. RGB channels are left as-is.
///
/// Returns the edited copy of `source`, or `None` when the seed is out of
/// bounds or the seed pixel is already fully transparent (which also makes a
/// repeated fill at the same seed a no-op).
pub fn flood_fill(source: &RgbaImage, seed: ImagePoint, tolerance: f32) -> Option<RgbaImage> {
    let width = source.width();
    let height = source.height();
    if seed.x < 0 || seed.y < 0 || seed.x as u32 >= width || seed.y as u32 >= height {
        return None;
    }
    let seed_x = seed.x as u32;
    let seed_y = seed.y as u32;

    let seed_pixel = source.get_pixel(seed_x, seed_y);
    if seed_pixel[3] == 0 {
        return None;
    }
    let reference = Color::new(seed_pixel[0], seed_pixel[1], seed_pixel[2]);
    let threshold = tolerance_threshold(tolerance);

    let mut result = source.clone();
    let mut visited = vec![false; (width as usize) * (height as usize)];
    let mut queue = VecDeque::with_capacity(1024);

    visited[(seed_y * width + seed_x) as usize] = true;
    queue.push_back((seed_x, seed_y));

    while let Some((x, y)) = queue.pop_front() {
        result.get_pixel_mut(x, y)[3] = 0;

        // Neighbors computed in 2D; wrapping_sub turns -1 into a value that
        // fails the bounds check below.
        let neighbors = [
            (x.wrapping_sub(1), y),
            (x + 1, y),
            (x, y.wrapping_sub(1)),
            (x, y + 1),
        ];
        for (nx, ny) in neighbors {
            if nx >= width || ny >= height {
                continue;
            }
            let index = (ny * width + nx) as usize;
            if visited[index] {
                continue;
            }
            let pixel = result.get_pixel(nx, ny);
            if pixel[3] == 0 {
                continue;
            }
            let candidate = Color::new(pixel[0], pixel[1], pixel[2]);
            if reference.distance_squared(candidate) <= threshold {
                visited[index] = true;
                queue.push_back((nx, ny));
            }
        }
    }

    Some(result)
}
