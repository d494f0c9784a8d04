use image::RgbImage;

use crate::signals::color::rgb_to_hsv;
use crate::signals::mask::BinaryMask;
use crate::signals::texture::{edge_density, grayscale, mean_brightness, pattern_uniformity};

/// Heuristic emotion score on [-1, 1] from visual statistics alone: bright,
/// warm, well-exposed, defined images lean positive; dark, cool, flat ones
/// lean negative. Complements the classifier rather than replacing it.
pub fn visual_feature_score(image: &RgbImage) -> f64 {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return 0.0;
    }

    let gray = grayscale(image);

    let brightness = mean_brightness(&gray);
    let exposure_score = 1.0 - (brightness - 128.0).abs() / 128.0;

    // Saturation mean and hue distribution in one pass.
    let mut saturation_total = 0.0;
    let mut hue_bins = [0u64; 36];
    for px in image.pixels() {
        let (hue, sat, _) = rgb_to_hsv(px[0], px[1], px[2]);
        saturation_total += sat as f64;
        hue_bins[(hue as usize / 5).min(35)] += 1;
    }
    let saturation = saturation_total / (w as f64 * h as f64);

    // Warm hues: reds and oranges at both ends of the circle. Cool: blues
    // and greens in the middle band.
    let warm: u64 = hue_bins[0..6].iter().sum::<u64>() + hue_bins[30..36].iter().sum::<u64>();
    let cool: u64 = hue_bins[12..24].iter().sum();
    let color_temperature = (warm as f64 - cool as f64) / (warm + cool).max(1) as f64;

    let edges = edge_density(&gray);
    let texture_uniformity = pattern_uniformity(&gray);
    let compactness = subject_compactness(&gray, brightness);

    let score = (brightness - 128.0) * 0.003
        + (saturation - 100.0) * 0.002
        + color_temperature * 0.5
        + exposure_score * 0.3
        + edges * 2.0
        + texture_uniformity * 0.5
        + (1.0 - compactness) * 0.3;

    score.clamp(-1.0, 1.0)
}

/// Compactness of the largest above-mean-brightness region, 1.0 when no
/// region stands out.
fn subject_compactness(gray: &image::GrayImage, mean: f64) -> f64 {
    let mask = BinaryMask::from_fn(gray.width(), gray.height(), |x, y| {
        gray.get_pixel(x, y)[0] as f64 > mean
    });
    mask.regions(1.0)
        .into_iter()
        .max_by(|a, b| a.area.total_cmp(&b.area))
        .map(|r| r.compactness())
        .unwrap_or(1.0)
}
