use crate::raster::PixelBuffer;

/// Freehand lasso cut: scan-fills the closed polygon (even-odd rule) and
/// clears alpha for every covered pixel.
///
/// The polygon is in image space with sub-pixel vertices; the path is closed
/// implicitly from the last vertex back to the first. Pixels are tested at
/// their centers, so self-intersecting paths fill deterministically without
/// any special casing. Fewer than three vertices cannot enclose area and are
/// a no-op.
pub fn apply_lasso_polygon(buffer: &mut PixelBuffer, polygon: &[(f32, f32)]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let height = buffer.height() as i64;
    let width = buffer.width() as i64;

    let min_y = polygon
        .iter()
        .map(|point| point.1)
        .fold(f32::INFINITY, f32::min);
    let max_y = polygon
        .iter()
        .map(|point| point.1)
        .fold(f32::NEG_INFINITY, f32::max);
    let first_row = (min_y.floor() as i64).max(0);
    let last_row = (max_y.ceil() as i64).min(height - 1);
    if first_row > last_row {
        return false;
    }

    let mut changed = false;
    let mut crossings: Vec<f32> = Vec::new();

    for row in first_row..=last_row {
        let sample_y = row as f32 + 0.5;
        crossings.clear();

        for index in 0..polygon.len() {
            let (ax, ay) = polygon[index];
            let (bx, by) = polygon[(index + 1) % polygon.len()];
            // Edge crosses the scanline when exactly one endpoint is above it.
            if (ay <= sample_y) == (by <= sample_y) {
                continue;
            }
            let t = (sample_y - ay) / (by - ay);
            crossings.push(ax + t * (bx - ax));
        }
        crossings.sort_by(|a, b| a.total_cmp(b));

        for span in crossings.chunks_exact(2) {
            let (span_start, span_end) = (span[0], span[1]);
            // Pixels whose center falls inside [span_start, span_end).
            let start = ((span_start - 0.5).ceil() as i64).max(0);
            let end = (((span_end - 0.5).ceil() as i64) - 1).min(width - 1);
            for x in start..=end {
                let pixel = buffer
                    .current_mut()
                    .get_pixel_mut(x as u32, row as u32);
                if pixel[3] != 0 {
                    pixel[3] = 0;
                    changed = true;
                }
            }
        }
    }

    changed
}
