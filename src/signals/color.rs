use image::RgbImage;

use super::mask::BinaryMask;

/// Inclusive HSV bounds, OpenCV ranges: H in [0, 180], S and V in [0, 255].
#[derive(Debug, Clone, Copy)]
pub struct HsvRange {
    pub lo: [u8; 3],
    pub hi: [u8; 3],
}

/// Inclusive RGB bounds.
#[derive(Debug, Clone, Copy)]
pub struct RgbRange {
    pub lo: [u8; 3],
    pub hi: [u8; 3],
}

/// RGB → HSV with hue on [0, 180] so the mask bounds read the same as the
/// conventional computer-vision tables they were tuned against.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let rf = r as f64 / 255.0;
    let gf = g as f64 / 255.0;
    let bf = b as f64 / 255.0;

    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let hue = if delta == 0.0 {
        0.0
    } else if max == rf {
        60.0 * (((gf - bf) / delta) % 6.0)
    } else if max == gf {
        60.0 * ((bf - rf) / delta + 2.0)
    } else {
        60.0 * ((rf - gf) / delta + 4.0)
    };
    let hue = if hue < 0.0 { hue + 360.0 } else { hue };

    let saturation = if max == 0.0 { 0.0 } else { delta / max };

    (
        (hue / 2.0).round().min(180.0) as u8,
        (saturation * 255.0).round() as u8,
        (max * 255.0).round() as u8,
    )
}

/// Mask of pixels inside one HSV box.
pub fn hsv_in_range(image: &RgbImage, range: HsvRange) -> BinaryMask {
    BinaryMask::from_fn(image.width(), image.height(), |x, y| {
        let px = image.get_pixel(x, y);
        let (h, s, v) = rgb_to_hsv(px[0], px[1], px[2]);
        in_bounds(h, range.lo[0], range.hi[0])
            && in_bounds(s, range.lo[1], range.hi[1])
            && in_bounds(v, range.lo[2], range.hi[2])
    })
}

/// Mask of pixels inside one RGB box.
pub fn rgb_in_range(image: &RgbImage, range: RgbRange) -> BinaryMask {
    BinaryMask::from_fn(image.width(), image.height(), |x, y| {
        let px = image.get_pixel(x, y);
        in_bounds(px[0], range.lo[0], range.hi[0])
            && in_bounds(px[1], range.lo[1], range.hi[1])
            && in_bounds(px[2], range.lo[2], range.hi[2])
    })
}

#[inline]
fn in_bounds(v: u8, lo: u8, hi: u8) -> bool {
    v >= lo && v <= hi
}

// Red hue wraps around the hue circle, so inflammation and blood masks are
// unions of a low-hue and a high-hue box.

/// Red/pink patches: inflammation candidates.
pub fn inflammation_mask(image: &RgbImage) -> BinaryMask {
    let low = hsv_in_range(
        image,
        HsvRange { lo: [0, 80, 80], hi: [10, 255, 255] },
    );
    let high = hsv_in_range(
        image,
        HsvRange { lo: [170, 80, 80], hi: [180, 255, 255] },
    );
    low.or(&high)
}

/// Very dark patches: scabs and dried wounds.
pub fn scab_mask(image: &RgbImage) -> BinaryMask {
    hsv_in_range(
        image,
        HsvRange { lo: [0, 0, 0], hi: [180, 255, 60] },
    )
}

/// Saturated dark red: fresh blood.
pub fn blood_mask(image: &RgbImage) -> BinaryMask {
    let low = hsv_in_range(
        image,
        HsvRange { lo: [0, 100, 50], hi: [10, 255, 200] },
    );
    let high = hsv_in_range(
        image,
        HsvRange { lo: [170, 100, 50], hi: [180, 255, 200] },
    );
    low.or(&high)
}

/// Near-black areas: dried blood and open wound shadow.
pub fn dark_wound_mask(image: &RgbImage) -> BinaryMask {
    hsv_in_range(
        image,
        HsvRange { lo: [0, 0, 0], hi: [180, 255, 50] },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn hsv_conversion_matches_reference_points() {
        // Pure red: H 0, full saturation and value.
        assert_eq!(rgb_to_hsv(255, 0, 0), (0, 255, 255));
        // Pure green: H 120° → 60 on the halved scale.
        assert_eq!(rgb_to_hsv(0, 255, 0), (60, 255, 255));
        // Grays carry no hue or saturation.
        assert_eq!(rgb_to_hsv(128, 128, 128), (0, 0, 128));
    }

    #[test]
    fn inflammation_mask_catches_strong_red() {
        let mut img = RgbImage::from_pixel(4, 4, Rgb([20, 140, 40]));
        img.put_pixel(1, 1, Rgb([220, 30, 30]));
        let mask = inflammation_mask(&img);
        assert!(mask.get(1, 1));
        assert!(!mask.get(0, 0));
    }

    #[test]
    fn scab_mask_catches_near_black() {
        let mut img = RgbImage::from_pixel(2, 2, Rgb([200, 200, 200]));
        img.put_pixel(0, 0, Rgb([20, 15, 18]));
        let mask = scab_mask(&img);
        assert!(mask.get(0, 0));
        assert!(!mask.get(1, 1));
    }
}
