//! Shared geometric and color primitives used across session and tool modules.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImagePoint {
    pub x: i32,
    pub y: i32,
}

impl ImagePoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
}

impl ViewportSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Caller-owned view state: zoom scale plus pan offset in screen pixels.
///
/// The engine only reads it while mapping gesture points; it never mutates
/// or persists a transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub scale: f32,
    pub pan_x: f32,
    pub pan_y: f32,
}

impl ViewTransform {
    pub const fn new(scale: f32, pan_x: f32, pan_y: f32) -> Self {
        Self {
            scale,
            pan_x,
            pan_y,
        }
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Squared Euclidean distance in RGB space, summed over three channels.
    pub fn distance_squared(self, other: Self) -> f32 {
        let dr = f32::from(self.r) - f32::from(other.r);
        let dg = f32::from(self.g) - f32::from(other.g);
        let db = f32::from(self.b) - f32::from(other.b);
        dr * dr + dg * dg + db * db
    }
}

/// Maps a screen-space point into fractional image coordinates.
///
/// The image is rendered centered in the viewport, then panned and scaled;
/// undoing that places the point relative to the image center, and adding
/// half the image size yields pixel coordinates. No bounds clamping happens
/// here: tools treat out-of-range coordinates as silent no-ops.
pub fn screen_to_image_f(
    point: ScreenPoint,
    viewport: ViewportSize,
    transform: ViewTransform,
    image_width: u32,
    image_height: u32,
) -> (f32, f32) {
    let centered_x = point.x - (viewport.width / 2.0 + transform.pan_x);
    let centered_y = point.y - (viewport.height / 2.0 + transform.pan_y);
    let x = centered_x / transform.scale + image_width as f32 / 2.0;
    let y = centered_y / transform.scale + image_height as f32 / 2.0;
    (x, y)
}

/// Maps a screen-space point to the nearest image pixel, truncating toward
/// zero. The result may lie outside `[0, width) x [0, height)`.
pub fn screen_to_image(
    point: ScreenPoint,
    viewport: ViewportSize,
    transform: ViewTransform,
    image_width: u32,
    image_height: u32,
) -> ImagePoint {
    let (x, y) = screen_to_image_f(point, viewport, transform, image_width, image_height);
    ImagePoint::new(x as i32, y as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_transform_maps_viewport_center_to_image_center() {
        let point = ScreenPoint::new(400.0, 300.0);
        let viewport = ViewportSize::new(800.0, 600.0);
        let mapped = screen_to_image(point, viewport, ViewTransform::default(), 100, 80);
        assert_eq!(mapped, ImagePoint::new(50, 40));
    }

    #[test]
    fn pan_offset_shifts_the_mapping() {
        let viewport = ViewportSize::new(800.0, 600.0);
        let transform = ViewTransform::new(1.0, 30.0, -20.0);
        let mapped = screen_to_image(ScreenPoint::new(430.0, 280.0), viewport, transform, 100, 80);
        assert_eq!(mapped, ImagePoint::new(50, 40));
    }

    #[test]
    fn zoom_scale_divides_screen_distances() {
        let viewport = ViewportSize::new(800.0, 600.0);
        let transform = ViewTransform::new(2.0, 0.0, 0.0);
        // 40 screen pixels right of center is 20 image pixels at 2x zoom.
        let mapped = screen_to_image(ScreenPoint::new(440.0, 300.0), viewport, transform, 100, 80);
        assert_eq!(mapped, ImagePoint::new(70, 40));
    }

    #[test]
    fn points_past_the_canvas_edge_map_out_of_bounds_without_clamping() {
        let viewport = ViewportSize::new(800.0, 600.0);
        let mapped = screen_to_image(
            ScreenPoint::new(0.0, 0.0),
            viewport,
            ViewTransform::default(),
            100,
            80,
        );
        assert_eq!(mapped, ImagePoint::new(-350, -260));
    }

    #[test]
    fn color_distance_is_squared_euclidean_over_rgb() {
        let a = Color::new(100, 100, 100);
        let b = Color::new(110, 90, 100);
        assert_eq!(a.distance_squared(b), 200.0);
        assert_eq!(a.distance_squared(a), 0.0);
    }
}
