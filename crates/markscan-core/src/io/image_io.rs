use std::path::Path;

use image::imageops::FilterType;
use image::{GrayImage, ImageFormat, Luma, Rgb, RgbImage};
use ndarray::Array2;

use crate::error::{OmrError, Result};
use crate::frame::{ColorFrame, Dimensions, Frame};

/// Load an image and resize it to `size`, the way every frame enters the pipeline.
pub fn load_resized(path: &Path, size: Dimensions) -> Result<ColorFrame> {
    if size.width == 0 || size.height == 0 {
        return Err(OmrError::InvalidDimensions {
            width: size.width as u32,
            height: size.height as u32,
        });
    }
    let img = image::open(path)?.to_rgb8();
    let resized = image::imageops::resize(
        &img,
        size.width as u32,
        size.height as u32,
        FilterType::Triangle,
    );
    Ok(color_frame_from_rgb(&resized))
}

/// Save a ColorFrame, choosing the format from the file extension
/// (PNG when the extension is missing or unknown).
pub fn save_color_image(color: &ColorFrame, path: &Path) -> Result<()> {
    let format = path
        .extension()
        .and_then(|e| e.to_str())
        .and_then(ImageFormat::from_extension)
        .unwrap_or(ImageFormat::Png);
    rgb_from_color_frame(color).save_with_format(path, format)?;
    Ok(())
}

pub fn color_frame_from_rgb(img: &RgbImage) -> ColorFrame {
    let (w, h) = img.dimensions();
    let channel = |c: usize| {
        Frame::new(Array2::from_shape_fn((h as usize, w as usize), |(row, col)| {
            img.get_pixel(col as u32, row as u32).0[c] as f32 / 255.0
        }))
    };
    ColorFrame {
        red: channel(0),
        green: channel(1),
        blue: channel(2),
    }
}

pub fn rgb_from_color_frame(color: &ColorFrame) -> RgbImage {
    RgbImage::from_fn(color.width() as u32, color.height() as u32, |x, y| {
        let [r, g, b] = color.pixel(y as usize, x as usize);
        Rgb([to_u8(r), to_u8(g), to_u8(b)])
    })
}

pub fn gray_from_frame(frame: &Frame) -> GrayImage {
    GrayImage::from_fn(frame.width() as u32, frame.height() as u32, |x, y| {
        Luma([to_u8(frame.data[[y as usize, x as usize]])])
    })
}

/// Binary mask as a 0/255 image.
pub fn gray_from_mask(mask: &Array2<bool>) -> GrayImage {
    let (h, w) = mask.dim();
    GrayImage::from_fn(w as u32, h as u32, |x, y| {
        Luma([if mask[[y as usize, x as usize]] { 255 } else { 0 }])
    })
}

/// Nonzero pixels become `true`.
pub fn mask_from_gray(img: &GrayImage) -> Array2<bool> {
    let (w, h) = img.dimensions();
    Array2::from_shape_fn((h as usize, w as usize), |(row, col)| {
        img.get_pixel(col as u32, row as u32).0[0] > 0
    })
}

/// Binary mask as a white-on-black frame.
pub fn frame_from_mask(mask: &Array2<bool>) -> Frame {
    Frame::new(mask.mapv(|v| if v { 1.0 } else { 0.0 }))
}

fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
