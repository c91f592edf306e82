//! Text wrapping, alignment and content-stream operator generation
//!
//! `wrap_text` is the single wrapping routine in the crate. Measurement and
//! drawing both go through it, so a measured line count always matches what
//! ends up on the page.

use crate::canvas::Color;
use crate::font::Font;
use crate::Align;
use lopdf::content::Operation;
use lopdf::{Object, StringFormat};

/// Greedy width-based word wrap.
///
/// Words are separated on runs of whitespace (which collapse to single
/// spaces). A word wider than `max_width` gets a line of its own and is not
/// broken mid-word. A non-positive `max_width` disables wrapping.
///
/// # Returns
/// The wrapped lines; empty input yields one empty line.
pub fn wrap_text(font: &Font, text: &str, size: f32, max_width: f32) -> Vec<String> {
    if max_width <= 0.0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if current.is_empty() || font.text_width_points(&candidate, size) <= max_width {
            current = candidate;
        } else {
            lines.push(current);
            current = word.to_string();
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Horizontal offset of a line inside a box of `available` width
pub fn align_offset(align: Align, available: f32, line_width: f32) -> f32 {
    match align {
        Align::Left => 0.0,
        Align::Center => (available - line_width) / 2.0,
        Align::Right => available - line_width,
    }
}

/// Operators for one line of text at a baseline position (PDF coordinates).
///
/// `encoded` must already be in the font's `Tj` encoding; it is written as a
/// hexadecimal string so both WinAnsi bytes and glyph IDs round-trip safely.
pub fn text_operations(
    resource: &str,
    size: f32,
    color: Color,
    x: f32,
    baseline_y: f32,
    encoded: Vec<u8>,
) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new(
            "rg",
            vec![
                Object::Real(color.r),
                Object::Real(color.g),
                Object::Real(color.b),
            ],
        ),
        Operation::new(
            "Tf",
            vec![
                Object::Name(resource.as_bytes().to_vec()),
                Object::Real(size),
            ],
        ),
        Operation::new("Td", vec![Object::Real(x), Object::Real(baseline_y)]),
        Operation::new(
            "Tj",
            vec![Object::String(encoded, StringFormat::Hexadecimal)],
        ),
        Operation::new("ET", vec![]),
    ]
}
