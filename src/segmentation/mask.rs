use image::RgbaImage;

/// Applies a row-major float confidence mask onto an image: alpha becomes
/// `confidence * 255`, RGB is preserved. The mask is stretched over the image
/// with nearest-neighbor sampling, which is what model-based providers need
/// when their fixed inference resolution differs from the photo.
///
/// Returns `None` when the mask length does not match `mask_width * mask_height`
/// or either dimension is zero.
pub fn apply_confidence_mask(
    image: &RgbaImage,
    mask: &[f32],
    mask_width: u32,
    mask_height: u32,
) -> Option<RgbaImage> {
    if mask_width == 0 || mask_height == 0 {
        return None;
    }
    if mask.len() != (mask_width as usize) * (mask_height as usize) {
        return None;
    }

    let width = image.width();
    let height = image.height();
    let mut result = image.clone();

    for y in 0..height {
        let mask_y = (u64::from(y) * u64::from(mask_height) / u64::from(height)) as u32;
        for x in 0..width {
            let mask_x = (u64::from(x) * u64::from(mask_width) / u64::from(width)) as u32;
            let confidence = mask[(mask_y * mask_width + mask_x) as usize];
            let alpha = (confidence * 255.0).round().clamp(0.0, 255.0) as u8;
            result.get_pixel_mut(x, y)[3] = alpha;
        }
    }

    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn mask_confidence_drives_alpha_and_preserves_rgb() {
        let mut image = RgbaImage::new(2, 1);
        *image.get_pixel_mut(0, 0) = Rgba([10, 20, 30, 255]);
        *image.get_pixel_mut(1, 0) = Rgba([40, 50, 60, 255]);

        let result =
            apply_confidence_mask(&image, &[0.0, 1.0], 2, 1).expect("mask should apply");
        assert_eq!(result.get_pixel(0, 0).0, [10, 20, 30, 0]);
        assert_eq!(result.get_pixel(1, 0).0, [40, 50, 60, 255]);
    }

    #[test]
    fn smaller_mask_is_stretched_over_the_image() {
        let mut image = RgbaImage::new(4, 4);
        for pixel in image.pixels_mut() {
            *pixel = Rgba([100, 100, 100, 255]);
        }

        // Left mask column transparent, right column opaque.
        let result =
            apply_confidence_mask(&image, &[0.0, 1.0, 0.0, 1.0], 2, 2).expect("mask should apply");
        assert_eq!(result.get_pixel(0, 0)[3], 0);
        assert_eq!(result.get_pixel(1, 3)[3], 0);
        assert_eq!(result.get_pixel(2, 0)[3], 255);
        assert_eq!(result.get_pixel(3, 3)[3], 255);
    }

    #[test]
    fn mismatched_mask_length_is_rejected() {
        let image = RgbaImage::new(2, 2);
        assert!(apply_confidence_mask(&image, &[0.5; 3], 2, 2).is_none());
        assert!(apply_confidence_mask(&image, &[], 0, 0).is_none());
    }

    #[test]
    fn out_of_range_confidence_is_clamped() {
        let mut image = RgbaImage::new(2, 1);
        for pixel in image.pixels_mut() {
            *pixel = Rgba([1, 2, 3, 128]);
        }

        let result =
            apply_confidence_mask(&image, &[-0.5, 1.5], 2, 1).expect("mask should apply");
        assert_eq!(result.get_pixel(0, 0)[3], 0);
        assert_eq!(result.get_pixel(1, 0)[3], 255);
    }
}
