//! Raster helpers around the renderer: image input, binarization and
//! packing into printer rows.

use std::{fmt, path::Path, str::FromStr};

use image::{GrayImage, Luma};
use log::debug;

use crate::{error::Error, normalize::normalize, Matrix};

const BLACK: Luma<u8> = Luma([0]);
const WHITE: Luma<u8> = Luma([255]);

/// 4x4 Bayer threshold map, values 0..16.
const BAYER_4X4: [[u8; 4]; 4] = [[0, 8, 2, 10], [12, 4, 14, 6], [3, 11, 1, 9], [15, 7, 13, 5]];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binarization {
    MeanThreshold,
    FloydSteinberg,
    Halftone,
    /// Keep the image as is. It must already be exactly the print width.
    None,
}

impl Default for Binarization {
    fn default() -> Self {
        Self::FloydSteinberg
    }
}

impl FromStr for Binarization {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mean-threshold" => Ok(Self::MeanThreshold),
            "floyd-steinberg" => Ok(Self::FloydSteinberg),
            "halftone" => Ok(Self::Halftone),
            "none" => Ok(Self::None),
            _ => Err(Error::InvalidConfig(format!(
                "unknown binarization algorithm '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for Binarization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MeanThreshold => "mean-threshold",
            Self::FloydSteinberg => "floyd-steinberg",
            Self::Halftone => "halftone",
            Self::None => "none",
        };
        f.write_str(name)
    }
}

/// Open an image file as grayscale, resampled to `width` pixels wide.
pub fn read_image(path: &Path, width: u32) -> Result<GrayImage, Error> {
    let image = image::open(path)?.to_luma8();
    debug!("Read {:?}: {}x{}", path, image.width(), image.height());
    normalize(image, width)
}

/// Reduce `image` to pure black and white.
///
/// `print_width` is only checked for [`Binarization::None`], which hands the
/// pixels through unchanged.
pub fn binarize(image: &GrayImage, algo: Binarization, print_width: u32) -> Result<GrayImage, Error> {
    match algo {
        Binarization::MeanThreshold => Ok(mean_threshold(image)),
        Binarization::FloydSteinberg => Ok(floyd_steinberg(image)),
        Binarization::Halftone => Ok(halftone(image)),
        Binarization::None => {
            if image.width() != print_width {
                return Err(Error::InvalidConfig(format!(
                    "image must be {} pixels wide without binarization, got {}",
                    print_width,
                    image.width()
                )));
            }
            Ok(image.clone())
        }
    }
}

fn mean_threshold(image: &GrayImage) -> GrayImage {
    let count = (image.width() as u64 * image.height() as u64).max(1);
    let sum: u64 = image.pixels().map(|p| p.0[0] as u64).sum();
    let mean = (sum / count) as u8;
    debug!("Mean threshold: {}", mean);

    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        if image.get_pixel(x, y).0[0] < mean {
            BLACK
        } else {
            WHITE
        }
    })
}

fn floyd_steinberg(image: &GrayImage) -> GrayImage {
    let (width, height) = (image.width() as usize, image.height() as usize);
    let mut values: Vec<f32> = image.pixels().map(|p| p.0[0] as f32).collect();
    let mut out = GrayImage::new(image.width(), image.height());

    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;
            let old = values[i];
            let new = if old < 128.0 { 0.0 } else { 255.0 };
            out.put_pixel(x as u32, y as u32, Luma([new as u8]));

            let err = old - new;
            if x + 1 < width {
                values[i + 1] += err * 7.0 / 16.0;
            }
            if y + 1 < height {
                if x > 0 {
                    values[i + width - 1] += err * 3.0 / 16.0;
                }
                values[i + width] += err * 5.0 / 16.0;
                if x + 1 < width {
                    values[i + width + 1] += err * 1.0 / 16.0;
                }
            }
        }
    }
    out
}

fn halftone(image: &GrayImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let level = BAYER_4X4[(y % 4) as usize][(x % 4) as usize] as u32;
        let threshold = (level * 255 + 127) / 16 + 8;
        if (image.get_pixel(x, y).0[0] as u32) < threshold {
            BLACK
        } else {
            WHITE
        }
    })
}

/// Pack a black and white image into printer rows.
///
/// Eight pixels per byte, most significant bit leftmost, a set bit for every
/// dark pixel. The last byte of a row is padded with zero bits.
pub fn to_matrix(image: &GrayImage) -> Matrix {
    let bytes_per_row = (image.width() as usize + 7) / 8;
    image
        .rows()
        .map(|row| {
            let mut buf = vec![0u8; bytes_per_row];
            for (x, pixel) in row.enumerate() {
                if pixel.0[0] < 128 {
                    buf[x / 8] |= 0x80 >> (x % 8);
                }
            }
            buf
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> GrayImage {
        GrayImage::from_fn(width, height, |x, _| Luma([(x * 255 / (width - 1)) as u8]))
    }

    fn is_bilevel(image: &GrayImage) -> bool {
        image.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255)
    }

    #[test]
    fn parses_algorithm_names() {
        assert_eq!("mean-threshold".parse::<Binarization>().unwrap(), Binarization::MeanThreshold);
        assert_eq!("Floyd-Steinberg".parse::<Binarization>().unwrap(), Binarization::FloydSteinberg);
        assert_eq!("halftone".parse::<Binarization>().unwrap(), Binarization::Halftone);
        assert_eq!("none".parse::<Binarization>().unwrap(), Binarization::None);
        assert!("atkinson".parse::<Binarization>().is_err());
        assert_eq!(Binarization::default().to_string(), "floyd-steinberg");
    }

    #[test]
    fn every_algorithm_is_bilevel() {
        let image = gradient(64, 8);
        for algo in [Binarization::MeanThreshold, Binarization::FloydSteinberg, Binarization::Halftone] {
            let out = binarize(&image, algo, 64).unwrap();
            assert_eq!(out.dimensions(), image.dimensions());
            assert!(is_bilevel(&out), "{} left gray pixels", algo);
        }
    }

    #[test]
    fn mean_threshold_splits_at_the_mean() {
        let image = GrayImage::from_fn(4, 1, |x, _| Luma([[10, 20, 200, 210][x as usize]]));
        let out = binarize(&image, Binarization::MeanThreshold, 4).unwrap();
        let values: Vec<u8> = out.pixels().map(|p| p.0[0]).collect();
        assert_eq!(values, vec![0, 0, 255, 255]);
    }

    #[test]
    fn floyd_steinberg_preserves_average_tone() {
        let image = GrayImage::from_pixel(32, 32, Luma([128]));
        let out = binarize(&image, Binarization::FloydSteinberg, 32).unwrap();
        let white = out.pixels().filter(|p| p.0[0] == 255).count();
        // roughly half of the 1024 pixels
        assert!((400..=624).contains(&white), "white pixels: {}", white);
    }

    #[test]
    fn halftone_extremes() {
        let black = binarize(&GrayImage::from_pixel(8, 8, Luma([0])), Binarization::Halftone, 8).unwrap();
        assert!(black.pixels().all(|p| p.0[0] == 0));
        let white = binarize(&GrayImage::from_pixel(8, 8, Luma([255])), Binarization::Halftone, 8).unwrap();
        assert!(white.pixels().all(|p| p.0[0] == 255));
    }

    #[test]
    fn none_requires_print_width() {
        let image = GrayImage::from_pixel(100, 4, Luma([80]));
        assert!(binarize(&image, Binarization::None, 384).is_err());
        assert_eq!(binarize(&image, Binarization::None, 100).unwrap(), image);
    }

    #[test]
    fn packs_msb_first() {
        let mut image = GrayImage::from_pixel(10, 2, WHITE);
        image.put_pixel(0, 0, BLACK);
        image.put_pixel(7, 0, BLACK);
        image.put_pixel(9, 1, BLACK);
        let matrix = to_matrix(&image);
        assert_eq!(matrix, vec![vec![0b1000_0001, 0x00], vec![0x00, 0b0100_0000]]);
    }
}
