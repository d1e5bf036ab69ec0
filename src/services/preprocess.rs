//! Image preprocessing for classifier input.
//!
//! Turns a base64-encoded capture (optionally carrying a
//! `data:image/...;base64,` prefix) into the NHWC float tensor the exported
//! MobileNetV2 model expects: decoded, resized to the configured edge
//! length, RGB, pixel values scaled to [0, 1].

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::imageops::FilterType;
use ndarray::Array4;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("Image payload is empty")]
    EmptyPayload,

    #[error("Invalid base64 image data: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("Failed to decode image: {0}")]
    UndecodableImage(#[from] image::ImageError),
}

/// Decode a base64 payload into raw image bytes, stripping the data-URL
/// prefix when the client sends one (everything through the first comma).
pub fn decode_base64_payload(payload: &str) -> Result<Vec<u8>, PreprocessError> {
    let encoded = match payload.split_once(',') {
        Some((_, data)) => data,
        None => payload,
    };

    if encoded.trim().is_empty() {
        return Err(PreprocessError::EmptyPayload);
    }

    Ok(STANDARD.decode(encoded.trim())?)
}

/// Decode image bytes and produce a `[1, size, size, 3]` tensor with pixel
/// values normalized to [0, 1].
pub fn image_to_tensor(bytes: &[u8], input_size: u32) -> Result<Array4<f32>, PreprocessError> {
    let img = image::load_from_memory(bytes)?;
    let resized = img.resize_exact(input_size, input_size, FilterType::Triangle);
    let rgb = resized.to_rgb8();

    let size = input_size as usize;
    let mut tensor = Array4::<f32>::zeros((1, size, size, 3));
    for (x, y, pixel) in rgb.enumerate_pixels() {
        tensor[[0, y as usize, x as usize, 0]] = pixel[0] as f32 / 255.0;
        tensor[[0, y as usize, x as usize, 1]] = pixel[1] as f32 / 255.0;
        tensor[[0, y as usize, x as usize, 2]] = pixel[2] as f32 / 255.0;
    }

    Ok(tensor)
}

/// Full pipeline: base64 payload to model-ready tensor.
pub fn prepare_input(payload: &str, input_size: u32) -> Result<Array4<f32>, PreprocessError> {
    let bytes = decode_base64_payload(payload)?;
    image_to_tensor(&bytes, input_size)
}
