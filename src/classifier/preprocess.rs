//! Image input boundary and tensor preparation
//!
//! Uploads are JPEG or PNG. Every image becomes a `(1, 384, 384, 3)` f32
//! tensor with values in `[0, 1]`.

use crate::errors::{Result, SkinError};
use candle_core::{Device, Tensor};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use log::debug;
use std::path::Path;

/// Side of the square model input
pub const IMG_SIZE: u32 = 384;

pub const CHANNELS: usize = 3;

/// File extensions accepted by the upload boundary
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Interpolation used for the resize step
pub const RESIZE_FILTER: FilterType = FilterType::CatmullRom;

/// Reject paths whose extension is not jpg/jpeg/png
pub fn check_extension(path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match ext {
        Some(ext) if ACCEPTED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(SkinError::UnsupportedImage(format!(
            "{} (expected one of: {})",
            path.display(),
            ACCEPTED_EXTENSIONS.join(", ")
        ))),
    }
}

/// Decode JPEG or PNG bytes; other encodings are rejected before decoding
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    let format = image::guess_format(bytes)
        .map_err(|_| SkinError::UnsupportedImage("unrecognized image data".to_string()))?;

    match format {
        ImageFormat::Jpeg | ImageFormat::Png => {
            let img = image::load_from_memory_with_format(bytes, format)?;
            debug!("decoded {:?} image {}x{}", format, img.width(), img.height());
            Ok(img)
        }
        other => Err(SkinError::UnsupportedImage(format!("{:?} encoding", other))),
    }
}

/// Read and decode an upload from disk
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    check_extension(path)?;
    let bytes = std::fs::read(path)?;
    decode_image(&bytes)
}

/// RGB, resize to 384x384, scale by 1/255, add the batch axis
pub fn prepare_tensor(img: &DynamicImage, device: &Device) -> Result<Tensor> {
    let rgb = img.to_rgb8();
    let resized = image::imageops::resize(&rgb, IMG_SIZE, IMG_SIZE, RESIZE_FILTER);

    let data: Vec<f32> = resized
        .into_raw()
        .into_iter()
        .map(|v| v as f32 / 255.0)
        .collect();

    let side = IMG_SIZE as usize;
    let tensor = Tensor::from_vec(data, (1, side, side, CHANNELS), device)?;
    Ok(tensor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::io::Cursor;

    fn encode(img: &DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut bytes = Cursor::new(Vec::new());
        img.write_to(&mut bytes, format).unwrap();
        bytes.into_inner()
    }

    fn gradient(width: u32, height: u32) -> DynamicImage {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 255])
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_tensor_shape_and_range() {
        let tensor = prepare_tensor(&gradient(640, 200), &Device::Cpu).unwrap();
        assert_eq!(tensor.dims(), &[1, 384, 384, 3]);

        let values = tensor.flatten_all().unwrap().to_vec1::<f32>().unwrap();
        assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_small_grayscale_is_expanded_to_rgb() {
        let gray = DynamicImage::ImageLuma8(image::GrayImage::new(10, 17));
        let tensor = prepare_tensor(&gray, &Device::Cpu).unwrap();
        assert_eq!(tensor.dims(), &[1, 384, 384, 3]);
    }

    #[test]
    fn test_white_image_normalizes_to_one() {
        let white = DynamicImage::ImageRgb8(RgbImage::from_pixel(50, 50, Rgb([255, 255, 255])));
        let tensor = prepare_tensor(&white, &Device::Cpu).unwrap();
        let values = tensor.flatten_all().unwrap().to_vec1::<f32>().unwrap();
        assert!(values.iter().all(|v| (*v - 1.0).abs() < 1e-6));
    }

    #[test]
    fn test_preprocessing_is_deterministic() {
        let img = gradient(123, 321);
        let a = prepare_tensor(&img, &Device::Cpu).unwrap().flatten_all().unwrap().to_vec1::<f32>().unwrap();
        let b = prepare_tensor(&img, &Device::Cpu).unwrap().flatten_all().unwrap().to_vec1::<f32>().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_decode_png_and_jpeg() {
        let img = gradient(32, 24);
        let png = decode_image(&encode(&img, ImageFormat::Png)).unwrap();
        assert_eq!((png.width(), png.height()), (32, 24));

        let jpeg = decode_image(&encode(&img, ImageFormat::Jpeg)).unwrap();
        assert_eq!((jpeg.width(), jpeg.height()), (32, 24));
    }

    #[test]
    fn test_decode_rejects_other_formats() {
        let bmp = encode(&gradient(8, 8), ImageFormat::Bmp);
        assert!(matches!(decode_image(&bmp), Err(SkinError::UnsupportedImage(_))));

        assert!(matches!(
            decode_image(b"definitely not an image"),
            Err(SkinError::UnsupportedImage(_))
        ));
    }

    #[test]
    fn test_check_extension() {
        assert!(check_extension(Path::new("face.JPG")).is_ok());
        assert!(check_extension(Path::new("face.jpeg")).is_ok());
        assert!(check_extension(Path::new("face.png")).is_ok());
        assert!(check_extension(Path::new("face.gif")).is_err());
        assert!(check_extension(Path::new("face")).is_err());
    }
}
