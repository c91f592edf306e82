//! Single-page canvas built on lopdf
//!
//! The canvas keeps a top-left origin with y growing downward, which is how
//! the document composers think about layout. Coordinates are flipped to PDF
//! space when operators are emitted.

use crate::font::{BuiltinFont, Font, FontData};
use crate::image::{calculate_scaled_dimensions, image_operations, ImageScaleMode, ImageXObject};
use crate::shape::{line_operations, rect_operations};
use crate::text::{align_offset, text_operations, wrap_text};
use crate::{Align, CanvasError, Result};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::BTreeMap;
use std::path::Path;

/// A4 page width in points
pub const A4_WIDTH: f32 = 595.28;
/// A4 page height in points
pub const A4_HEIGHT: f32 = 841.89;

/// Alias of the built-in regular face, registered on every canvas
pub const FONT_HELVETICA: &str = "helvetica";
/// Alias of the built-in bold face
pub const FONT_HELVETICA_BOLD: &str = "helvetica-bold";
/// Alias of the built-in oblique face
pub const FONT_HELVETICA_OBLIQUE: &str = "helvetica-oblique";

/// RGB Color (values 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a new RGB color (values 0.0 - 1.0)
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create color from RGB values (0-255)
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Black color
    pub const fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// White color
    pub const fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }

    /// Neutral gray at the given level (0.0 black - 1.0 white)
    pub const fn gray(level: f32) -> Self {
        Self::rgb(level, level, level)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// Options controlling how a piece of text is drawn
///
/// With `width` set the text wraps inside a box starting at the anchor and
/// `align` positions each line inside that box. Without `width` the text is a
/// single line and `align` moves it relative to the anchor point itself, so a
/// right-aligned line ends at the anchor.
#[derive(Debug, Clone)]
pub struct TextOptions {
    /// Font alias previously registered on the canvas
    pub font: String,
    /// Font size in points
    pub size: f32,
    /// Text color
    pub color: Color,
    /// Horizontal alignment
    pub align: Align,
    /// Wrapping box width in points, if any
    pub width: Option<f32>,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            font: FONT_HELVETICA.to_string(),
            size: 10.0,
            color: Color::black(),
            align: Align::Left,
            width: None,
        }
    }
}

/// An in-memory single-page PDF under construction
pub struct Canvas {
    /// The underlying lopdf document
    doc: Document,
    /// Registered fonts by alias
    fonts: BTreeMap<String, Font>,
    /// Resource names for fonts that have been drawn with (alias -> "F1")
    font_resources: BTreeMap<String, String>,
    /// Next font resource number
    next_font_resource: u32,
    /// Embedded images in insertion order (resource name, object id)
    images: Vec<(String, ObjectId)>,
    /// Next image resource number
    next_image_resource: u32,
    /// Accumulated content operators for the page
    ops: Vec<Operation>,
    /// Page width in points
    page_width: f32,
    /// Page height in points
    page_height: f32,
}

impl Canvas {
    /// Create a blank A4 canvas with the built-in Helvetica faces registered
    pub fn new() -> Result<Self> {
        let mut canvas = Self {
            doc: Document::with_version("1.5"),
            fonts: BTreeMap::new(),
            font_resources: BTreeMap::new(),
            next_font_resource: 1,
            images: Vec::new(),
            next_image_resource: 1,
            ops: Vec::new(),
            page_width: A4_WIDTH,
            page_height: A4_HEIGHT,
        };
        canvas.register_builtin(FONT_HELVETICA, BuiltinFont::Helvetica);
        canvas.register_builtin(FONT_HELVETICA_BOLD, BuiltinFont::HelveticaBold);
        canvas.register_builtin(FONT_HELVETICA_OBLIQUE, BuiltinFont::HelveticaOblique);
        Ok(canvas)
    }

    /// Page width in points
    pub fn page_width(&self) -> f32 {
        self.page_width
    }

    /// Page height in points
    pub fn page_height(&self) -> f32 {
        self.page_height
    }

    /// Register a built-in Type1 face under an alias
    pub fn register_builtin(&mut self, alias: &str, builtin: BuiltinFont) {
        self.fonts.insert(alias.to_string(), Font::Builtin(builtin));
    }

    /// Load a TrueType font from disk and register it under an alias
    ///
    /// Returns `Ok(None)` without registering anything when the file does not
    /// exist, so callers can degrade to a built-in face. Unreadable or
    /// unparsable font files are reported as errors.
    ///
    /// # Arguments
    /// * `alias` - Font identifier used in `TextOptions`
    /// * `path` - Path to a .ttf file
    pub fn load_font(&mut self, alias: &str, path: &Path) -> Result<Option<String>> {
        if !path.is_file() {
            log::warn!("font file not found: {}", path.display());
            return Ok(None);
        }
        let data = std::fs::read(path)?;
        let font = FontData::from_ttf(alias, data)?;
        self.fonts.insert(alias.to_string(), Font::Embedded(font));
        Ok(Some(alias.to_string()))
    }

    /// Whether a font alias is registered
    pub fn has_font(&self, alias: &str) -> bool {
        self.fonts.contains_key(alias)
    }

    /// Width of a single line of text in points
    ///
    /// Unknown aliases fall back to Helvetica metrics so measurement never
    /// fails; drawing with an unknown alias is still an error.
    pub fn text_width(&self, text: &str, font: &str, size: f32) -> f32 {
        let fallback = Font::Builtin(BuiltinFont::Helvetica);
        let font = self.fonts.get(font).unwrap_or(&fallback);
        font.text_width_points(text, size)
    }

    /// Baseline-to-baseline line height for a font alias
    pub fn line_height(&self, font: &str, size: f32) -> f32 {
        let fallback = Font::Builtin(BuiltinFont::Helvetica);
        let font = self.fonts.get(font).unwrap_or(&fallback);
        font.line_height(size)
    }

    /// Height the given text will occupy when wrapped to `max_width`
    ///
    /// Uses the same wrapping as `draw_text`, so measuring and then drawing
    /// with the same width advances the cursor by exactly the same amount.
    /// Empty text measures zero. A `max_width` of zero or less disables
    /// wrapping.
    pub fn measure_text(&self, text: &str, font: &str, size: f32, max_width: f32) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        let fallback = Font::Builtin(BuiltinFont::Helvetica);
        let font = self.fonts.get(font).unwrap_or(&fallback);
        let lines = wrap_text(font, text, size, max_width);
        lines.len() as f32 * font.line_height(size)
    }

    /// Draw text at `(x, y)` where `y` is the top of the first line
    ///
    /// Returns the height consumed in points. Empty text draws nothing and
    /// returns zero.
    ///
    /// # Arguments
    /// * `text` - The text to draw
    /// * `x` - Anchor x in points from the left edge
    /// * `y` - Top of the first line in points from the top edge
    /// * `options` - Font, size, color, alignment and optional wrap width
    pub fn draw_text(&mut self, text: &str, x: f32, y: f32, options: &TextOptions) -> Result<f32> {
        if text.is_empty() {
            return Ok(0.0);
        }
        let resource = self.font_resource(&options.font)?;
        let font = self
            .fonts
            .get_mut(&options.font)
            .ok_or_else(|| CanvasError::FontNotFound(options.font.clone()))?;

        let lines = match options.width {
            Some(width) => wrap_text(font, text, options.size, width),
            None => vec![text.to_string()],
        };
        let line_height = font.line_height(options.size);
        let mut baseline = y + font.ascent(options.size);

        // Encode up front so the font borrow ends before operators are pushed
        let mut encoded_lines = Vec::with_capacity(lines.len());
        for line in &lines {
            let line_width = font.text_width_points(line, options.size);
            encoded_lines.push((font.encode_text(line), line_width));
        }

        for (encoded, line_width) in encoded_lines {
            let line_x = match options.width {
                Some(width) => x + align_offset(options.align, width, line_width),
                None => match options.align {
                    Align::Left => x,
                    Align::Center => x - line_width / 2.0,
                    Align::Right => x - line_width,
                },
            };
            let pdf_y = self.page_height - baseline;
            self.ops.extend(text_operations(
                &resource,
                options.size,
                options.color,
                line_x,
                pdf_y,
                encoded,
            ));
            baseline += line_height;
        }
        Ok(lines.len() as f32 * line_height)
    }

    /// Draw a rectangle with optional fill and optional stroke
    ///
    /// `(x, y)` is the top-left corner. A rectangle with neither fill nor
    /// stroke draws nothing.
    pub fn draw_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Color>,
        stroke: Option<(Color, f32)>,
    ) {
        self.ops.extend(rect_operations(
            x,
            y,
            width,
            height,
            self.page_height,
            fill,
            stroke,
        ));
    }

    /// Draw a straight line between two points
    pub fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color, width: f32) {
        self.ops.extend(line_operations(
            x1,
            y1,
            x2,
            y2,
            self.page_height,
            color,
            width,
        ));
    }

    /// Embed an image and draw it into the given box
    ///
    /// JPEG and PNG bytes are accepted; anything else (including SVG markup)
    /// is an `ImageError`. `(x, y)` is the top-left corner of the target box
    /// and `mode` decides how the image is fitted into it.
    pub fn draw_image(
        &mut self,
        data: &[u8],
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        mode: ImageScaleMode,
    ) -> Result<()> {
        let xobject = ImageXObject::from_bytes(data)?;
        let (w, h) = calculate_scaled_dimensions(
            xobject.width,
            xobject.height,
            width as f64,
            height as f64,
            mode,
        );
        let (w, h) = (w as f32, h as f32);
        let object_id = self.doc.add_object(xobject.to_pdf_stream());
        let resource = format!("Im{}", self.next_image_resource);
        self.next_image_resource += 1;
        let pdf_y = self.page_height - y - h;
        self.ops.extend(image_operations(&resource, x, pdf_y, w, h));
        self.images.push((resource, object_id));
        Ok(())
    }

    /// The content operators accumulated so far
    pub fn operations(&self) -> &[Operation] {
        &self.ops
    }

    /// Assemble the page and serialize the document to bytes
    ///
    /// Consumes the canvas. The same sequence of drawing calls always
    /// produces identical bytes.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        let content = Content {
            operations: std::mem::take(&mut self.ops),
        };
        let contents_id = self
            .doc
            .add_object(Stream::new(Dictionary::new(), content.encode()?));

        // Fonts are embedded in alias order so object numbering is stable
        let mut font_dict = Dictionary::new();
        for (alias, resource) in &self.font_resources {
            let font = self
                .fonts
                .get(alias)
                .ok_or_else(|| CanvasError::FontNotFound(alias.clone()))?;
            let font_id = match font {
                Font::Builtin(builtin) => self.doc.add_object(builtin.to_pdf_dictionary()),
                Font::Embedded(data) => embed_font(&mut self.doc, data),
            };
            font_dict.set(resource.as_bytes(), Object::Reference(font_id));
        }

        let mut resources = Dictionary::new();
        resources.set(b"Font", Object::Dictionary(font_dict));
        if !self.images.is_empty() {
            let mut xobject_dict = Dictionary::new();
            for (resource, object_id) in &self.images {
                xobject_dict.set(resource.as_bytes(), Object::Reference(*object_id));
            }
            resources.set(b"XObject", Object::Dictionary(xobject_dict));
        }
        let resources_id = self.doc.add_object(resources);

        let pages_id = self.doc.new_object_id();
        let mut page_dict = Dictionary::new();
        page_dict.set(b"Type", Object::Name(b"Page".to_vec()));
        page_dict.set(b"Parent", Object::Reference(pages_id));
        page_dict.set(
            b"MediaBox",
            Object::Array(vec![
                Object::Real(0.0),
                Object::Real(0.0),
                Object::Real(self.page_width),
                Object::Real(self.page_height),
            ]),
        );
        page_dict.set(b"Contents", Object::Reference(contents_id));
        page_dict.set(b"Resources", Object::Reference(resources_id));
        let page_id = self.doc.add_object(Object::Dictionary(page_dict));

        let mut pages_dict = Dictionary::new();
        pages_dict.set(b"Type", Object::Name(b"Pages".to_vec()));
        pages_dict.set(b"Kids", Object::Array(vec![Object::Reference(page_id)]));
        pages_dict.set(b"Count", Object::Integer(1));
        self.doc
            .objects
            .insert(pages_id, Object::Dictionary(pages_dict));

        let mut catalog = Dictionary::new();
        catalog.set(b"Type", Object::Name(b"Catalog".to_vec()));
        catalog.set(b"Pages", Object::Reference(pages_id));
        let catalog_id = self.doc.add_object(Object::Dictionary(catalog));
        self.doc.trailer.set("Root", Object::Reference(catalog_id));

        self.doc.compress();
        let mut buffer = Vec::new();
        self.doc.save_to(&mut buffer)?;
        Ok(buffer)
    }

    /// Resource name for a font alias, allocating one on first use
    fn font_resource(&mut self, alias: &str) -> Result<String> {
        if !self.fonts.contains_key(alias) {
            return Err(CanvasError::FontNotFound(alias.to_string()));
        }
        if let Some(resource) = self.font_resources.get(alias) {
            return Ok(resource.clone());
        }
        let resource = format!("F{}", self.next_font_resource);
        self.next_font_resource += 1;
        self.font_resources
            .insert(alias.to_string(), resource.clone());
        Ok(resource)
    }
}

/// Wire up the object graph for one embedded font and return the Type0 id
fn embed_font(doc: &mut Document, font: &FontData) -> ObjectId {
    let objects = font.to_pdf_objects();

    let font_file_id = doc.add_object(objects.font_file);

    let mut descriptor = objects.font_descriptor;
    descriptor.set("FontFile2", Object::Reference(font_file_id));
    let descriptor_id = doc.add_object(descriptor);

    let mut cid_font = objects.cid_font;
    cid_font.set("FontDescriptor", Object::Reference(descriptor_id));
    let cid_font_id = doc.add_object(cid_font);

    let tounicode_id = doc.add_object(objects.tounicode);

    let mut type0_font = objects.type0_font;
    type0_font.set(
        "DescendantFonts",
        Object::Array(vec![Object::Reference(cid_font_id)]),
    );
    type0_font.set("ToUnicode", Object::Reference(tounicode_id));
    doc.add_object(type0_font)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_registers_builtin_fonts() {
        let canvas = Canvas::new().unwrap();
        assert!(canvas.has_font(FONT_HELVETICA));
        assert!(canvas.has_font(FONT_HELVETICA_BOLD));
        assert!(canvas.has_font(FONT_HELVETICA_OBLIQUE));
        assert!(!canvas.has_font("companion"));
    }

    #[test]
    fn test_draw_text_empty_is_a_no_op() {
        let mut canvas = Canvas::new().unwrap();
        let height = canvas
            .draw_text("", 40.0, 60.0, &TextOptions::default())
            .unwrap();
        assert_eq!(height, 0.0);
        assert!(canvas.operations().is_empty());
    }

    #[test]
    fn test_draw_text_unknown_font_is_an_error() {
        let mut canvas = Canvas::new().unwrap();
        let options = TextOptions {
            font: "garamond".to_string(),
            ..TextOptions::default()
        };
        let err = canvas.draw_text("x", 0.0, 0.0, &options).unwrap_err();
        assert!(matches!(err, CanvasError::FontNotFound(name) if name == "garamond"));
    }

    #[test]
    fn test_measure_matches_draw() {
        let mut canvas = Canvas::new().unwrap();
        let text = "Extrait des registres des actes de naissance du centre principal";
        let measured = canvas.measure_text(text, FONT_HELVETICA, 10.0, 120.0);
        let options = TextOptions {
            width: Some(120.0),
            ..TextOptions::default()
        };
        let drawn = canvas.draw_text(text, 40.0, 60.0, &options).unwrap();
        assert_eq!(measured, drawn);
        assert!(measured > canvas.line_height(FONT_HELVETICA, 10.0));
    }

    #[test]
    fn test_measure_text_empty() {
        let canvas = Canvas::new().unwrap();
        assert_eq!(canvas.measure_text("", FONT_HELVETICA, 10.0, 100.0), 0.0);
    }

    #[test]
    fn test_measure_text_single_line() {
        let canvas = Canvas::new().unwrap();
        let height = canvas.measure_text("Nom", FONT_HELVETICA, 10.0, 500.0);
        assert!((height - 12.0).abs() < 1e-4);
    }

    #[test]
    fn test_font_resource_is_stable() {
        let mut canvas = Canvas::new().unwrap();
        let first = canvas.font_resource(FONT_HELVETICA).unwrap();
        let again = canvas.font_resource(FONT_HELVETICA).unwrap();
        let bold = canvas.font_resource(FONT_HELVETICA_BOLD).unwrap();
        assert_eq!(first, "F1");
        assert_eq!(again, "F1");
        assert_eq!(bold, "F2");
    }

    #[test]
    fn test_right_anchor_shifts_text_left() {
        let mut canvas = Canvas::new().unwrap();
        let options = TextOptions {
            align: Align::Right,
            ..TextOptions::default()
        };
        canvas.draw_text("N° 42", 555.0, 91.0, &options).unwrap();
        let width = canvas.text_width("N° 42", FONT_HELVETICA, 10.0);
        let td = &canvas.operations()[3];
        assert_eq!(td.operator, "Td");
        match td.operands[0] {
            Object::Real(x) => assert!((x - (555.0 - width)).abs() < 0.01),
            ref other => panic!("unexpected Td operand: {other:?}"),
        }
    }

    #[test]
    fn test_load_font_missing_file() {
        let mut canvas = Canvas::new().unwrap();
        let loaded = canvas
            .load_font("companion", Path::new("/no/such/font.ttf"))
            .unwrap();
        assert_eq!(loaded, None);
        assert!(!canvas.has_font("companion"));
    }

    #[test]
    fn test_draw_rect_emits_fill_operators() {
        let mut canvas = Canvas::new().unwrap();
        canvas.draw_rect(
            40.0,
            36.0,
            20.0,
            36.0,
            Some(Color::rgb(0.0, 0.149, 0.392)),
            None,
        );
        let operators: Vec<&str> = canvas
            .operations()
            .iter()
            .map(|op| op.operator.as_str())
            .collect();
        assert_eq!(operators, vec!["rg", "re", "f"]);
    }

    #[test]
    fn test_finish_produces_pdf_bytes() {
        let mut canvas = Canvas::new().unwrap();
        canvas
            .draw_text("Bonjour", 40.0, 60.0, &TextOptions::default())
            .unwrap();
        let bytes = canvas.finish().unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn test_finish_is_deterministic() {
        let render = || {
            let mut canvas = Canvas::new().unwrap();
            canvas.draw_rect(40.0, 36.0, 60.0, 36.0, Some(Color::gray(0.5)), None);
            canvas
                .draw_text("Acte de naissance", 40.0, 120.0, &TextOptions::default())
                .unwrap();
            canvas.finish().unwrap()
        };
        assert_eq!(render(), render());
    }
}
