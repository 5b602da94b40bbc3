//! # Image Rasterization
//!
//! Loads an image file, scales it down to the printable width and dithers
//! it to a packed 1-bit raster ready for [`crate::protocol::graphics`].
//!
//! Transparent pixels print as white. Images narrower than the paper keep
//! their size; the printer's justification positions them.

use std::path::Path;

use image::{DynamicImage, imageops::FilterType};
use rayon::prelude::*;

use super::dither::{pack_row, should_print};
use crate::error::PosError;

/// A packed 1-bit image, rows MSB-first, `ceil(width / 8)` bytes per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub width: u16,
    pub height: u16,
    pub data: Vec<u8>,
}

impl Raster {
    pub fn width_bytes(&self) -> usize {
        (self.width as usize).div_ceil(8)
    }
}

/// Load and rasterize an image file.
pub fn load(path: &Path, max_width: u16) -> Result<Raster, PosError> {
    let img = image::open(path)
        .map_err(|e| PosError::Image(format!("Failed to load {}: {}", path.display(), e)))?;
    rasterize(&img, max_width)
}

/// Scale `img` to at most `max_width` dots wide and dither it.
pub fn rasterize(img: &DynamicImage, max_width: u16) -> Result<Raster, PosError> {
    if img.width() == 0 || img.height() == 0 {
        return Err(PosError::Image("Image has no pixels".to_string()));
    }

    let max_width = u32::from(max_width.max(1));
    let img = if img.width() > max_width {
        let scaled = (u64::from(img.height()) * u64::from(max_width) + u64::from(img.width()) / 2)
            / u64::from(img.width());
        let height = u32::try_from(scaled.max(1)).unwrap_or(u32::MAX);
        img.resize_exact(max_width, height, FilterType::Triangle)
    } else {
        img.clone()
    };

    let width = u16::try_from(img.width())
        .map_err(|_| PosError::Image(format!("Image too wide: {}", img.width())))?;
    let height = u16::try_from(img.height())
        .map_err(|_| PosError::Image(format!("Image too tall: {} rows", img.height())))?;

    let gray = img.to_luma_alpha8();
    let data = (0..height as usize)
        .into_par_iter()
        .map(|y| {
            let row: Vec<bool> = (0..width as usize)
                .map(|x| {
                    let [luma, alpha] = gray.get_pixel(x as u32, y as u32).0;
                    let intensity = (1.0 - luma as f32 / 255.0) * (alpha as f32 / 255.0);
                    should_print(x, y, intensity)
                })
                .collect();
            pack_row(&row)
        })
        .flatten_iter()
        .collect();

    Ok(Raster {
        width,
        height,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, LumaA, ImageBuffer};

    #[test]
    fn test_black_image() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(10, 2, Luma([0])));
        let raster = rasterize(&img, 372).unwrap();
        assert_eq!((raster.width, raster.height), (10, 2));
        assert_eq!(raster.width_bytes(), 2);
        assert_eq!(raster.data, vec![0xFF, 0xC0, 0xFF, 0xC0]);
    }

    #[test]
    fn test_white_image() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(16, 3, Luma([255])));
        let raster = rasterize(&img, 372).unwrap();
        assert!(raster.data.iter().all(|&b| b == 0));
        assert_eq!(raster.data.len(), 2 * 3);
    }

    #[test]
    fn test_transparent_prints_white() {
        let buf: ImageBuffer<LumaA<u8>, Vec<u8>> = ImageBuffer::from_pixel(8, 1, LumaA([0, 0]));
        let raster = rasterize(&DynamicImage::ImageLumaA8(buf), 372).unwrap();
        assert_eq!(raster.data, vec![0x00]);
    }

    #[test]
    fn test_wide_image_scaled_down() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(1000, 10, Luma([255])));
        let raster = rasterize(&img, 372).unwrap();
        assert_eq!(raster.width, 372);
        assert_eq!(raster.height, 4);
        assert_eq!(raster.data.len(), raster.width_bytes() * 4);
    }

    #[test]
    fn test_missing_file() {
        let err = load(Path::new("/nonexistent/logo.png"), 372).unwrap_err();
        assert!(matches!(err, PosError::Image(_)));
    }
}
