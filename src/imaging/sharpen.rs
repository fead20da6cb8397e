//! Gaussian sharpen convolution.
//!
//! The 1-D kernel is `2δ − g/Σg`, where `g` is a Gaussian sampled at
//! `-radius..=radius`: the centre tap is boosted and the neighbours are
//! subtracted, so flat regions are unchanged and edges gain contrast. The two
//! passes run through `imageproc::filter::separable_filter_equal` on an `f32`
//! copy of the cell, which pads borders by continuity. Colour channels are
//! written back; alpha is left as is so sprite silhouettes don't grow halos.

use super::params::Sharpening;
use image::{ImageBuffer, Rgba, RgbaImage};
use imageproc::definitions::Image;
use imageproc::filter::separable_filter_equal;

/// Build the 1-D sharpen kernel. The weights always sum to 1.
///
/// Computed in `f64` so that any positive `f32` sigma, subnormals included,
/// gives finite taps.
pub fn sharpen_kernel(sharpening: Sharpening) -> Vec<f32> {
    let radius = i64::from(sharpening.radius);
    let two_sigma_sq = 2.0 * f64::from(sharpening.sigma).powi(2);

    let gaussian: Vec<f64> = (-radius..=radius)
        .map(|x| {
            let x = x as f64;
            (-(x * x) / two_sigma_sq).exp()
        })
        .collect();
    let sum: f64 = gaussian.iter().sum();

    let mid = sharpening.radius as usize;
    gaussian
        .iter()
        .enumerate()
        .map(|(i, g)| {
            let tap = if i == mid { (2.0 * sum - g) / sum } else { -g / sum };
            tap as f32
        })
        .collect()
}

/// Sharpen `image` in place.
pub fn sharpen(image: &mut RgbaImage, sharpening: Sharpening) {
    let kernel = sharpen_kernel(sharpening);
    let (width, height) = image.dimensions();
    if kernel.len() <= 1 || width == 0 || height == 0 {
        return;
    }

    let source: Image<Rgba<f32>> =
        ImageBuffer::from_fn(width, height, |x, y| Rgba(image.get_pixel(x, y).0.map(f32::from)));
    let filtered = separable_filter_equal(&source, &kernel);

    for (dst, src) in image.pixels_mut().zip(filtered.pixels()) {
        for c in 0..3 {
            dst.0[c] = src.0[c].round().clamp(0.0, 255.0) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_has_two_radius_plus_one_taps() {
        let k = sharpen_kernel(Sharpening {
            sigma: 4.5,
            radius: 2,
        });
        assert_eq!(k.len(), 5);
        let sum: f32 = k.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert!(k[2] > 1.0);
        assert!(k[0] < 0.0 && k[4] < 0.0);
    }

    #[test]
    fn radius_zero_is_identity() {
        let k = sharpen_kernel(Sharpening {
            sigma: 1.0,
            radius: 0,
        });
        assert_eq!(k.len(), 1);
        assert!((k[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn flat_image_is_unchanged() {
        let mut img = RgbaImage::from_pixel(8, 8, Rgba([120, 60, 30, 255]));
        let before = img.clone();
        sharpen(&mut img, Sharpening::default());
        assert_eq!(img, before);
    }

    #[test]
    fn edge_gains_contrast() {
        let mut img = RgbaImage::from_fn(10, 4, |x, _| {
            if x < 5 {
                Rgba([100, 100, 100, 255])
            } else {
                Rgba([150, 150, 150, 255])
            }
        });
        sharpen(&mut img, Sharpening::default());
        assert!(img.get_pixel(4, 1).0[0] < 100);
        assert!(img.get_pixel(5, 1).0[0] > 150);
    }

    #[test]
    fn alpha_is_preserved() {
        let mut img = RgbaImage::from_fn(6, 6, |x, y| Rgba([x as u8 * 40, y as u8 * 40, 0, (x * 40) as u8]));
        let alphas: Vec<u8> = img.pixels().map(|p| p.0[3]).collect();
        sharpen(&mut img, Sharpening::default());
        let after: Vec<u8> = img.pixels().map(|p| p.0[3]).collect();
        assert_eq!(alphas, after);
    }

    #[test]
    fn subnormal_sigma_gives_identity_kernel() {
        let k = sharpen_kernel(Sharpening {
            sigma: 1e-40,
            radius: 2,
        });
        assert!(k.iter().all(|w| w.is_finite()));
        assert!((k[2] - 1.0).abs() < 1e-6);
        assert!(k[0].abs() < 1e-6 && k[4].abs() < 1e-6);

        let mut img = RgbaImage::from_pixel(6, 6, Rgba([200, 100, 50, 255]));
        sharpen(
            &mut img,
            Sharpening {
                sigma: f32::MIN_POSITIVE,
                radius: 2,
            },
        );
        assert_eq!(img.get_pixel(3, 3), &Rgba([200, 100, 50, 255]));
    }

    #[test]
    fn huge_sigma_stays_finite() {
        let k = sharpen_kernel(Sharpening {
            sigma: f32::MAX,
            radius: 3,
        });
        assert_eq!(k.len(), 7);
        assert!(k.iter().all(|w| w.is_finite()));
        let sum: f32 = k.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
    }
}
