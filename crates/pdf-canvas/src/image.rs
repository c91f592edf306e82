//! Image embedding for the canvas
//!
//! JPEG data is embedded as-is with a DCTDecode filter; PNG data is decoded,
//! alpha is blended against white, and the raw pixels are re-compressed with
//! FlateDecode. SVG and anything else unrecognized is rejected.

use crate::{CanvasError, Result};
use image::{DynamicImage, ImageDecoder, ImageReader};
use lopdf::content::Operation;
use lopdf::{Dictionary, Object, Stream};
use std::io::Cursor;

impl From<image::ImageError> for CanvasError {
    fn from(err: image::ImageError) -> Self {
        CanvasError::ImageError(err.to_string())
    }
}

/// Supported raster formats, sniffed from magic bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

/// Detect the image format from magic bytes
pub fn detect_format(data: &[u8]) -> Result<ImageFormat> {
    if data.len() >= 3 && data[0] == 0xFF && data[1] == 0xD8 && data[2] == 0xFF {
        return Ok(ImageFormat::Jpeg);
    }
    if data.len() >= 8 && data[0..8] == [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A] {
        return Ok(ImageFormat::Png);
    }
    Err(CanvasError::ImageError("unknown image format".to_string()))
}

/// How an image is fitted into its target box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageScaleMode {
    /// Stretch to the exact target dimensions
    #[default]
    Stretch,
    /// Scale proportionally from the target width
    FitWidth,
    /// Scale proportionally from the target height
    FitHeight,
    /// Largest proportional size that fits inside the box
    FitBox,
}

/// Display dimensions in points for an image under a scale mode
pub fn calculate_scaled_dimensions(
    original_width: u32,
    original_height: u32,
    target_width: f64,
    target_height: f64,
    mode: ImageScaleMode,
) -> (f64, f64) {
    match mode {
        ImageScaleMode::Stretch => (target_width, target_height),
        ImageScaleMode::FitWidth => {
            let aspect = original_height as f64 / original_width as f64;
            (target_width, target_width * aspect)
        }
        ImageScaleMode::FitHeight => {
            let aspect = original_width as f64 / original_height as f64;
            (target_height * aspect, target_height)
        }
        ImageScaleMode::FitBox => {
            let scale = (target_width / original_width as f64)
                .min(target_height / original_height as f64);
            (
                original_width as f64 * scale,
                original_height as f64 * scale,
            )
        }
    }
}

struct JpegInfo {
    width: u32,
    height: u32,
    components: u8,
}

// Scan JPEG markers for a start-of-frame segment. The SOF payload carries
// precision (1 byte), height (2), width (2) and the component count.
fn parse_jpeg_info(data: &[u8]) -> Result<JpegInfo> {
    let mut i = 2;
    while i + 10 < data.len() {
        if data[i] != 0xFF {
            i += 1;
            continue;
        }
        let marker = data[i + 1];
        if (0xC0..=0xCF).contains(&marker) && marker != 0xC4 && marker != 0xC8 && marker != 0xCC {
            return Ok(JpegInfo {
                height: u16::from_be_bytes([data[i + 5], data[i + 6]]) as u32,
                width: u16::from_be_bytes([data[i + 7], data[i + 8]]) as u32,
                components: data[i + 9],
            });
        }
        let length = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
        if length < 2 {
            break;
        }
        i += 2 + length;
    }
    Err(CanvasError::ImageError(
        "could not find JPEG frame header".to_string(),
    ))
}

/// An image prepared for embedding as a PDF XObject
pub struct ImageXObject {
    pub width: u32,
    pub height: u32,
    color_space: &'static str,
    filter: &'static str,
    data: Vec<u8>,
}

impl ImageXObject {
    /// Prepare raw image bytes for embedding, dispatching on format
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        match detect_format(data)? {
            ImageFormat::Jpeg => Self::from_jpeg(data),
            ImageFormat::Png => Self::from_png(data),
        }
    }

    // JPEG is a passthrough: the compressed scan data is the stream payload.
    fn from_jpeg(data: &[u8]) -> Result<Self> {
        let info = parse_jpeg_info(data)?;
        Ok(Self {
            width: info.width,
            height: info.height,
            color_space: if info.components == 1 {
                "DeviceGray"
            } else {
                "DeviceRGB"
            },
            filter: "DCTDecode",
            data: data.to_vec(),
        })
    }

    // PNG is decoded to raw pixels. Alpha has no direct PDF equivalent here,
    // so transparent pixels blend against a white page background.
    fn from_png(data: &[u8]) -> Result<Self> {
        let reader = ImageReader::new(Cursor::new(data)).with_guessed_format()?;
        let decoder = reader.into_decoder()?;
        let (width, height) = decoder.dimensions();
        let color_type = decoder.color_type();
        let decoded = DynamicImage::from_decoder(decoder)?;

        let (raw, color_space) = match color_type {
            image::ColorType::L8 | image::ColorType::L16 => {
                (decoded.to_luma8().into_raw(), "DeviceGray")
            }
            image::ColorType::La8 | image::ColorType::La16 => {
                let la = decoded.to_luma_alpha8();
                let mut gray = Vec::with_capacity((width * height) as usize);
                for pixel in la.pixels() {
                    gray.push(blend_white(pixel[0], pixel[1]));
                }
                (gray, "DeviceGray")
            }
            image::ColorType::Rgba8 | image::ColorType::Rgba16 => {
                let rgba = decoded.to_rgba8();
                let mut rgb = Vec::with_capacity((width * height * 3) as usize);
                for pixel in rgba.pixels() {
                    rgb.push(blend_white(pixel[0], pixel[3]));
                    rgb.push(blend_white(pixel[1], pixel[3]));
                    rgb.push(blend_white(pixel[2], pixel[3]));
                }
                (rgb, "DeviceRGB")
            }
            _ => (decoded.to_rgb8().into_raw(), "DeviceRGB"),
        };

        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        std::io::Write::write_all(&mut encoder, &raw)?;
        let compressed = encoder.finish()?;

        Ok(Self {
            width,
            height,
            color_space,
            filter: "FlateDecode",
            data: compressed,
        })
    }

    /// Stream object for the page's XObject resources
    pub fn to_pdf_stream(&self) -> Stream {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"XObject".to_vec()));
        dict.set("Subtype", Object::Name(b"Image".to_vec()));
        dict.set("Width", self.width as i64);
        dict.set("Height", self.height as i64);
        dict.set(
            "ColorSpace",
            Object::Name(self.color_space.as_bytes().to_vec()),
        );
        dict.set("BitsPerComponent", 8);
        dict.set("Filter", Object::Name(self.filter.as_bytes().to_vec()));
        Stream::new(dict, self.data.clone())
    }
}

fn blend_white(value: u8, alpha: u8) -> u8 {
    let a = alpha as f32 / 255.0;
    (value as f32 * a + 255.0 * (1.0 - a)) as u8
}

/// Operators placing an image XObject at a pdf-space position
pub fn image_operations(resource: &str, x: f32, y: f32, width: f32, height: f32) -> Vec<Operation> {
    vec![
        Operation::new("q", vec![]),
        Operation::new(
            "cm",
            vec![
                Object::Real(width),
                Object::Real(0.0),
                Object::Real(0.0),
                Object::Real(height),
                Object::Real(x),
                Object::Real(y),
            ],
        ),
        Operation::new("Do", vec![Object::Name(resource.as_bytes().to_vec())]),
        Operation::new("Q", vec![]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // SOF0 frame declaring 120x80, 3 components
    fn minimal_jpeg() -> Vec<u8> {
        vec![
            0xFF, 0xD8, // SOI
            0xFF, 0xC0, // SOF0
            0x00, 0x11, // length
            0x08, // precision
            0x00, 0x50, // height 80
            0x00, 0x78, // width 120
            0x03, // components
            0x01, 0x22, 0x00, 0x02, 0x11, 0x01, 0x03, 0x11, 0x01, 0xFF, 0xD9,
        ]
    }

    #[test]
    fn test_detect_jpeg_and_png() {
        assert_eq!(
            detect_format(&[0xFF, 0xD8, 0xFF, 0xE0]).unwrap(),
            ImageFormat::Jpeg
        );
        assert_eq!(
            detect_format(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]).unwrap(),
            ImageFormat::Png
        );
    }

    #[test]
    fn test_detect_rejects_svg_markup() {
        assert!(detect_format(b"<svg xmlns=\"http://www.w3.org/2000/svg\">").is_err());
    }

    #[test]
    fn test_detect_rejects_short_input() {
        assert!(detect_format(&[0xFF]).is_err());
    }

    #[test]
    fn test_jpeg_passthrough() {
        let jpeg = minimal_jpeg();
        let xobject = ImageXObject::from_bytes(&jpeg).unwrap();
        assert_eq!(xobject.width, 120);
        assert_eq!(xobject.height, 80);
        assert_eq!(xobject.color_space, "DeviceRGB");
        assert_eq!(xobject.filter, "DCTDecode");
        assert_eq!(xobject.data, jpeg);
    }

    #[test]
    fn test_jpeg_without_frame_header() {
        let err = parse_jpeg_info(&[0xFF, 0xD8, 0xFF, 0x00, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert!(err.is_err());
    }

    #[test]
    fn test_xobject_stream_dictionary() {
        let xobject = ImageXObject {
            width: 120,
            height: 80,
            color_space: "DeviceRGB",
            filter: "DCTDecode",
            data: vec![1, 2, 3],
        };
        let stream = xobject.to_pdf_stream();
        assert_eq!(
            stream.dict.get(b"Subtype").unwrap().as_name().unwrap(),
            b"Image"
        );
        assert_eq!(stream.dict.get(b"Width").unwrap().as_i64().unwrap(), 120);
        assert_eq!(
            stream.dict.get(b"Filter").unwrap().as_name().unwrap(),
            b"DCTDecode"
        );
        assert_eq!(stream.content, vec![1, 2, 3]);
    }

    #[test]
    fn test_scale_stretch() {
        let (w, h) = calculate_scaled_dimensions(640, 480, 64.0, 64.0, ImageScaleMode::Stretch);
        assert_eq!((w, h), (64.0, 64.0));
    }

    #[test]
    fn test_scale_fit_width() {
        let (w, h) = calculate_scaled_dimensions(640, 480, 100.0, 999.0, ImageScaleMode::FitWidth);
        assert_eq!((w, h), (100.0, 75.0));
    }

    #[test]
    fn test_scale_fit_box_wide_image() {
        // 200x100 into a 64x64 box is width-limited: 64 x 32
        let (w, h) = calculate_scaled_dimensions(200, 100, 64.0, 64.0, ImageScaleMode::FitBox);
        assert_eq!((w, h), (64.0, 32.0));
    }

    #[test]
    fn test_scale_fit_box_tall_image() {
        let (w, h) = calculate_scaled_dimensions(100, 200, 64.0, 64.0, ImageScaleMode::FitBox);
        assert_eq!((w, h), (32.0, 64.0));
    }

    #[test]
    fn test_blend_white() {
        assert_eq!(blend_white(0, 255), 0);
        assert_eq!(blend_white(0, 0), 255);
        assert_eq!(blend_white(100, 255), 100);
    }

    #[test]
    fn test_image_operations() {
        let ops = image_operations("Im1", 491.0, 740.0, 64.0, 48.0);
        let operators: Vec<&str> = ops.iter().map(|op| op.operator.as_str()).collect();
        assert_eq!(operators, vec!["q", "cm", "Do", "Q"]);
        assert_eq!(ops[1].operands[0], Object::Real(64.0));
        assert_eq!(ops[1].operands[4], Object::Real(491.0));
        assert_eq!(ops[2].operands[0], Object::Name(b"Im1".to_vec()));
    }
}
