use image::{GrayImage, RgbImage};

/// Luma conversion shared by every grayscale-based extractor.
pub fn grayscale(image: &RgbImage) -> GrayImage {
    image::imageops::grayscale(image)
}

pub fn mean_brightness(gray: &GrayImage) -> f64 {
    let pixels = gray.as_raw();
    if pixels.is_empty() {
        return 0.0;
    }
    pixels.iter().map(|p| *p as f64).sum::<f64>() / pixels.len() as f64
}

pub fn brightness_stddev(gray: &GrayImage) -> f64 {
    let pixels = gray.as_raw();
    if pixels.is_empty() {
        return 0.0;
    }
    let mean = mean_brightness(gray);
    let var = pixels
        .iter()
        .map(|p| {
            let d = *p as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / pixels.len() as f64;
    var.sqrt()
}

/// Mean Sobel gradient magnitude, normalized to [0, ~1] by the 255 range.
pub fn edge_density(gray: &GrayImage) -> f64 {
    let (w, h) = gray.dimensions();
    if w < 3 || h < 3 {
        return 0.0;
    }
    let mut total = 0.0;
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let (gx, gy) = sobel_at(gray, x, y);
            total += (gx * gx + gy * gy).sqrt();
        }
    }
    let count = ((w - 2) as f64) * ((h - 2) as f64);
    (total / count) / 255.0
}

/// Fraction of pixels whose Sobel magnitude exceeds `magnitude_threshold`.
/// Stands in for a binary edge map when only the edge fraction matters
/// (visible-bone detection compares it against fixed cutoffs).
pub fn strong_edge_fraction(gray: &GrayImage, magnitude_threshold: f64) -> f64 {
    let (w, h) = gray.dimensions();
    if w < 3 || h < 3 {
        return 0.0;
    }
    let mut strong = 0usize;
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let (gx, gy) = sobel_at(gray, x, y);
            if (gx * gx + gy * gy).sqrt() > magnitude_threshold {
                strong += 1;
            }
        }
    }
    strong as f64 / (((w - 2) as f64) * ((h - 2) as f64))
}

#[inline]
fn sobel_at(gray: &GrayImage, x: u32, y: u32) -> (f64, f64) {
    let p = |dx: i64, dy: i64| {
        gray.get_pixel((x as i64 + dx) as u32, (y as i64 + dy) as u32)[0] as f64
    };
    let gx = -p(-1, -1) - 2.0 * p(-1, 0) - p(-1, 1) + p(1, -1) + 2.0 * p(1, 0) + p(1, 1);
    let gy = -p(-1, -1) - 2.0 * p(0, -1) - p(1, -1) + p(-1, 1) + 2.0 * p(0, 1) + p(1, 1);
    (gx, gy)
}

/// Variance of the 4-neighbor Laplacian: sharp, detailed images score high,
/// blurred or flat ones score near zero.
pub fn laplacian_variance(gray: &GrayImage) -> f64 {
    let (w, h) = gray.dimensions();
    if w < 3 || h < 3 {
        return 0.0;
    }
    let mut responses = Vec::with_capacity(((w - 2) * (h - 2)) as usize);
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let c = gray.get_pixel(x, y)[0] as f64;
            let up = gray.get_pixel(x, y - 1)[0] as f64;
            let down = gray.get_pixel(x, y + 1)[0] as f64;
            let left = gray.get_pixel(x - 1, y)[0] as f64;
            let right = gray.get_pixel(x + 1, y)[0] as f64;
            responses.push(up + down + left + right - 4.0 * c);
        }
    }
    variance(&responses)
}

/// Standard deviation of a lightly Gaussian-blurred grayscale view. The blur
/// keeps fine fur grain from dominating, so the statistic tracks patchiness
/// (mange, crusting) rather than coat texture.
pub fn smoothed_stddev(gray: &GrayImage) -> f64 {
    if gray.width() == 0 || gray.height() == 0 {
        return 0.0;
    }
    let blurred = image::imageops::blur(gray, 1.1);
    brightness_stddev(&blurred)
}

/// Mean absolute deviation of each pixel from its k×k box mean. Low values
/// mean locally flat intensity — the cloudiness signature in an eye crop.
pub fn box_deviation(gray: &GrayImage, k: u32) -> f64 {
    let (w, h) = gray.dimensions();
    if w < k || h < k || k == 0 {
        return 0.0;
    }
    let r = (k / 2) as i64;
    let mut total = 0.0;
    let mut count = 0.0;
    for y in 0..h {
        for x in 0..w {
            let mut sum = 0.0;
            let mut n = 0.0;
            for dy in -r..=r {
                for dx in -r..=r {
                    let nx = x as i64 + dx;
                    let ny = y as i64 + dy;
                    if nx >= 0 && ny >= 0 && nx < w as i64 && ny < h as i64 {
                        sum += gray.get_pixel(nx as u32, ny as u32)[0] as f64;
                        n += 1.0;
                    }
                }
            }
            total += (gray.get_pixel(x, y)[0] as f64 - sum / n).abs();
            count += 1.0;
        }
    }
    total / count
}

/// Share of the dominant 8-neighbor binary pattern. Uniform textures
/// concentrate into few patterns and score close to 1.0.
pub fn pattern_uniformity(gray: &GrayImage) -> f64 {
    let (w, h) = gray.dimensions();
    if w < 3 || h < 3 {
        return 1.0;
    }
    let mut histogram = [0u64; 256];
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let center = gray.get_pixel(x, y)[0];
            let mut code = 0u8;
            let neighbors = [
                (-1i64, -1i64),
                (0, -1),
                (1, -1),
                (1, 0),
                (1, 1),
                (0, 1),
                (-1, 1),
                (-1, 0),
            ];
            for (bit, (dx, dy)) in neighbors.iter().enumerate() {
                let v = gray.get_pixel((x as i64 + dx) as u32, (y as i64 + dy) as u32)[0];
                if v >= center {
                    code |= 1 << bit;
                }
            }
            histogram[code as usize] += 1;
        }
    }
    let total: u64 = histogram.iter().sum();
    let max: u64 = histogram.iter().copied().max().unwrap_or(0);
    if total == 0 {
        1.0
    } else {
        max as f64 / total as f64
    }
}

fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values
        .iter()
        .map(|v| {
            let d = v - mean;
            d * d
        })
        .sum::<f64>()
        / values.len() as f64
}
