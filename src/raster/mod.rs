use image::{Rgba, RgbaImage};

use crate::geometry::ImagePoint;

pub type RasterResult<T> = Result<T, RasterError>;

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("image has zero width or height")]
    EmptyImage,
}

/// Owns the mutable working raster plus an immutable backing copy of the
/// originally loaded image.
///
/// The backing copy is the source for the restore brush; it is a deep copy
/// taken at construction and never aliases the current image, so it can be
/// read while the current image is being edited. Both images are replaced
/// together only by [`PixelBuffer::replace`] (load, external crop, automatic
/// removal); every edit touches the current image alone.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    current: RgbaImage,
    backing: RgbaImage,
}

impl PixelBuffer {
    pub fn new(image: RgbaImage) -> RasterResult<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(RasterError::EmptyImage);
        }
        let backing = image.clone();
        Ok(Self {
            current: image,
            backing,
        })
    }

    pub fn width(&self) -> u32 {
        self.current.width()
    }

    pub fn height(&self) -> u32 {
        self.current.height()
    }

    pub fn current(&self) -> &RgbaImage {
        &self.current
    }

    pub(crate) fn current_mut(&mut self) -> &mut RgbaImage {
        &mut self.current
    }

    pub fn backing(&self) -> &RgbaImage {
        &self.backing
    }

    pub fn in_bounds(&self, point: ImagePoint) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as u32) < self.width()
            && (point.y as u32) < self.height()
    }

    pub fn read(&self, point: ImagePoint) -> Option<Rgba<u8>> {
        if !self.in_bounds(point) {
            return None;
        }
        Some(*self.current.get_pixel(point.x as u32, point.y as u32))
    }

    /// Copies out the in-bounds portion of the requested block. Returns
    /// `None` when the origin lies past the image or the clamped region is
    /// empty.
    pub fn read_region(&self, x: i32, y: i32, width: u32, height: u32) -> Option<RgbaImage> {
        let (left, top, bounded_width, bounded_height) =
            bounded_region(x, y, width, height, self.width(), self.height())?;
        let mut block = RgbaImage::new(bounded_width, bounded_height);
        for row in 0..bounded_height {
            for col in 0..bounded_width {
                let pixel = *self.current.get_pixel(left + col, top + row);
                block.put_pixel(col, row, pixel);
            }
        }
        Some(block)
    }

    /// Writes a block of pixels back into the current image, clipping to the
    /// image bounds. A fully out-of-bounds origin is a no-op.
    pub fn write_region(&mut self, x: i32, y: i32, block: &RgbaImage) {
        let Some((left, top, bounded_width, bounded_height)) = bounded_region(
            x,
            y,
            block.width(),
            block.height(),
            self.width(),
            self.height(),
        ) else {
            return;
        };
        let col_offset = (left as i64 - i64::from(x)) as u32;
        let row_offset = (top as i64 - i64::from(y)) as u32;
        for row in 0..bounded_height {
            for col in 0..bounded_width {
                let pixel = *block.get_pixel(col_offset + col, row_offset + row);
                self.current.put_pixel(left + col, top + row, pixel);
            }
        }
    }

    /// Wholesale replacement of both the current image and the backing copy.
    /// Used on load and when an external collaborator (crop, automatic
    /// removal) hands back a replacement image.
    pub fn replace(&mut self, image: RgbaImage) -> RasterResult<()> {
        if image.width() == 0 || image.height() == 0 {
            return Err(RasterError::EmptyImage);
        }
        self.backing = image.clone();
        self.current = image;
        Ok(())
    }

    /// Replaces only the current image, leaving the backing copy for the
    /// restore brush. Used for flood-fill results.
    pub(crate) fn replace_current(&mut self, image: RgbaImage) {
        if image.width() == 0 || image.height() == 0 {
            return;
        }
        self.current = image;
    }

    /// Deep copy of the current image; history entries are always snapshots,
    /// never aliases.
    pub fn snapshot(&self) -> RgbaImage {
        self.current.clone()
    }
}

fn bounded_region(
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    image_width: u32,
    image_height: u32,
) -> Option<(u32, u32, u32, u32)> {
    if width == 0 || height == 0 {
        return None;
    }
    let right = i64::from(x) + i64::from(width);
    let bottom = i64::from(y) + i64::from(height);
    if right <= 0 || bottom <= 0 {
        return None;
    }
    if x >= image_width as i32 || y >= image_height as i32 {
        return None;
    }

    let left = x.max(0) as u32;
    let top = y.max(0) as u32;
    let bounded_width = (right.min(i64::from(image_width)) - i64::from(left)) as u32;
    let bounded_height = (bottom.min(i64::from(image_height)) - i64::from(top)) as u32;
    if bounded_width == 0 || bounded_height == 0 {
        return None;
    }
    Some((left, top, bounded_width, bounded_height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_image(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
        let mut image = RgbaImage::new(width, height);
        for pixel in image.pixels_mut() {
            *pixel = Rgba(rgba);
        }
        image
    }

    #[test]
    fn new_rejects_zero_dimension_images() {
        assert!(matches!(
            PixelBuffer::new(RgbaImage::new(0, 4)),
            Err(RasterError::EmptyImage)
        ));
    }

    #[test]
    fn backing_copy_is_independent_of_edits() {
        let mut buffer =
            PixelBuffer::new(solid_image(4, 4, [10, 20, 30, 255])).expect("buffer should build");
        buffer
            .current_mut()
            .put_pixel(1, 1, Rgba([0, 0, 0, 0]));

        assert_eq!(buffer.current().get_pixel(1, 1).0, [0, 0, 0, 0]);
        assert_eq!(buffer.backing().get_pixel(1, 1).0, [10, 20, 30, 255]);
    }

    #[test]
    fn read_region_clamps_to_image_bounds() {
        let buffer =
            PixelBuffer::new(solid_image(4, 4, [10, 20, 30, 255])).expect("buffer should build");
        let block = buffer.read_region(2, 2, 10, 10).expect("expected region");
        assert_eq!(block.dimensions(), (2, 2));

        assert!(buffer.read_region(8, 0, 2, 2).is_none());
        assert!(buffer.read_region(-5, -5, 3, 3).is_none());
    }

    #[test]
    fn write_region_clips_a_partially_outside_block() {
        let mut buffer =
            PixelBuffer::new(solid_image(4, 4, [10, 20, 30, 255])).expect("buffer should build");
        let block = solid_image(3, 3, [1, 2, 3, 4]);
        buffer.write_region(-1, -1, &block);

        assert_eq!(buffer.current().get_pixel(0, 0).0, [1, 2, 3, 4]);
        assert_eq!(buffer.current().get_pixel(1, 1).0, [1, 2, 3, 4]);
        assert_eq!(buffer.current().get_pixel(2, 2).0, [10, 20, 30, 255]);
    }

    #[test]
    fn write_region_with_out_of_bounds_origin_is_a_noop() {
        let mut buffer =
            PixelBuffer::new(solid_image(4, 4, [10, 20, 30, 255])).expect("buffer should build");
        let before = buffer.snapshot();
        buffer.write_region(4, 4, &solid_image(2, 2, [9, 9, 9, 9]));
        assert_eq!(buffer.current().as_raw(), before.as_raw());
    }

    #[test]
    fn replace_swaps_both_images_and_recreates_the_backing_copy() {
        let mut buffer =
            PixelBuffer::new(solid_image(4, 4, [10, 20, 30, 255])).expect("buffer should build");
        buffer
            .replace(solid_image(2, 2, [5, 5, 5, 255]))
            .expect("replace should accept a non-empty image");

        assert_eq!(buffer.width(), 2);
        assert_eq!(buffer.backing().get_pixel(0, 0).0, [5, 5, 5, 255]);
    }

    #[test]
    fn replace_current_leaves_the_backing_copy_untouched() {
        let mut buffer =
            PixelBuffer::new(solid_image(4, 4, [10, 20, 30, 255])).expect("buffer should build");
        buffer.replace_current(solid_image(4, 4, [0, 0, 0, 0]));

        assert_eq!(buffer.current().get_pixel(0, 0).0, [0, 0, 0, 0]);
        assert_eq!(buffer.backing().get_pixel(0, 0).0, [10, 20, 30, 255]);
    }
}
