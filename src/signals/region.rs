use image::RgbImage;

/// Fixed-proportion crops. Region selection is a share of image dimensions,
/// never object-detected, so every extractor stays deterministic.

/// Centered crop retaining `ratio` of each dimension.
pub fn center_crop(image: &RgbImage, ratio: f64) -> RgbImage {
    let (w, h) = image.dimensions();
    let crop_w = (w as f64 * ratio) as u32;
    let crop_h = (h as f64 * ratio) as u32;
    let left = (w - crop_w) / 2;
    let top = (h - crop_h) / 2;
    image::imageops::crop_imm(image, left, top, crop_w, crop_h).to_image()
}

/// Horizontal band starting at `top_frac` of the height and spanning
/// `height_frac` of it. Degenerate bands come back as empty images.
pub fn horizontal_band(image: &RgbImage, top_frac: f64, height_frac: f64) -> RgbImage {
    let (w, h) = image.dimensions();
    let top = (h as f64 * top_frac) as u32;
    let band_h = (h as f64 * height_frac) as u32;
    if w == 0 || band_h == 0 || top >= h {
        return RgbImage::new(0, 0);
    }
    let band_h = band_h.min(h - top);
    image::imageops::crop_imm(image, 0, top, w, band_h).to_image()
}

/// Top `frac` of the image — where eyes sit in a typical animal photo.
pub fn upper_fraction(image: &RgbImage, frac: f64) -> RgbImage {
    horizontal_band(image, 0.0, frac)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn center_crop_retains_ratio() {
        let img = RgbImage::from_pixel(90, 60, Rgb([1, 2, 3]));
        let cropped = center_crop(&img, 0.67);
        assert_eq!(cropped.dimensions(), (60, 40));
    }

    #[test]
    fn horizontal_band_clamps_to_image() {
        let img = RgbImage::from_pixel(10, 10, Rgb([0, 0, 0]));
        let band = horizontal_band(&img, 0.2, 0.4);
        assert_eq!(band.dimensions(), (10, 4));
        let overrun = horizontal_band(&img, 0.9, 0.4);
        assert_eq!(overrun.dimensions(), (10, 1));
    }

    #[test]
    fn degenerate_band_is_empty() {
        let img = RgbImage::new(0, 0);
        assert_eq!(horizontal_band(&img, 0.2, 0.4).dimensions(), (0, 0));
    }
}
