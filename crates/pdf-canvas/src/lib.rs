//! PDF Canvas - Low-level PDF page drawing
//!
//! This crate provides functionality for:
//! - Building a single-page A4 document fully in memory
//! - Drawing wrapped, aligned text with built-in or embedded TrueType fonts
//! - Filled and stroked rectangles and straight lines
//! - Embedding JPEG and PNG images
//!
//! # Example
//! ```ignore
//! use pdf_canvas::{Align, Canvas, TextOptions};
//!
//! let mut canvas = Canvas::new()?;
//! let options = TextOptions {
//!     size: 14.0,
//!     align: Align::Center,
//!     width: Some(200.0),
//!     ..TextOptions::default()
//! };
//! canvas.draw_text("Bonjour", 40.0, 60.0, &options)?;
//! let bytes = canvas.finish()?;
//! ```

mod canvas;
mod font;
mod image;
mod shape;
mod text;

pub use canvas::{
    Canvas, Color, TextOptions, A4_HEIGHT, A4_WIDTH, FONT_HELVETICA, FONT_HELVETICA_BOLD,
    FONT_HELVETICA_OBLIQUE,
};
pub use font::{encode_win_ansi, BuiltinFont, Font, FontData};
pub use image::{
    calculate_scaled_dimensions, detect_format, image_operations, ImageFormat, ImageScaleMode,
    ImageXObject,
};
pub use shape::{line_operations, rect_operations};
pub use text::{align_offset, text_operations, wrap_text};

use thiserror::Error;

/// Errors that can occur during canvas operations
#[derive(Error, Debug)]
pub enum CanvasError {
    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("Failed to parse font: {0}")]
    FontParseError(String),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type alias for canvas operations
pub type Result<T> = std::result::Result<T, CanvasError>;

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}
