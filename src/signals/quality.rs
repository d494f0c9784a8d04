use image::GrayImage;

use super::texture::{brightness_stddev, laplacian_variance, mean_brightness};

/// Photographic quality on [0, 1]: sharpness, exposure, and contrast,
/// weighted 0.4 / 0.3 / 0.3. Used only to discount downstream confidence —
/// a poor photo can still be analyzed, it just counts for less.
pub fn image_quality(gray: &GrayImage) -> f64 {
    let blur_score = (laplacian_variance(gray) / 500.0).min(1.0);

    let brightness = mean_brightness(gray);
    let exposure_score = 1.0 - (brightness - 128.0).abs() / 128.0;

    let contrast_score = (brightness_stddev(gray) / 128.0).min(1.0);

    blur_score * 0.4 + exposure_score * 0.3 + contrast_score * 0.3
}
