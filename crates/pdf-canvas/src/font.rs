//! Font handling: built-in Type1 faces and embedded TrueType fonts
//!
//! Built-in fonts (the Helvetica family) ship with compiled-in AFM widths and
//! are always available, so documents render with zero font files on disk.
//! Embedded fonts are TrueType files parsed with `ttf-parser` and written as
//! Type0/CIDFontType2 objects with Identity-H encoding.

use crate::{CanvasError, Result};
use lopdf::{Dictionary, Object, Stream, StringFormat};
use std::collections::HashSet;

/// Glyph widths for Helvetica, code points 0x20..=0x7E, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20-0x2F
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0x30-0x3F
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 0x40-0x4F
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 0x50-0x5F
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 0x60-0x6F
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 0x70-0x7E
];

/// Glyph widths for Helvetica-Bold, code points 0x20..=0x7E, in 1/1000 em.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20-0x2F
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0x30-0x3F
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // 0x40-0x4F
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 0x50-0x5F
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 0x60-0x6F
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 0x70-0x7E
];

/// The PDF standard Type1 faces available without embedding.
///
/// All three share WinAnsiEncoding; Helvetica-Oblique reuses the regular
/// widths, matching the Adobe metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
}

impl BuiltinFont {
    /// PostScript base name written into the font dictionary
    pub fn base_name(self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::HelveticaBold => "Helvetica-Bold",
            BuiltinFont::HelveticaOblique => "Helvetica-Oblique",
        }
    }

    fn widths(self) -> &'static [u16; 95] {
        match self {
            BuiltinFont::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
            _ => &HELVETICA_WIDTHS,
        }
    }

    fn default_width(self) -> u16 {
        match self {
            BuiltinFont::HelveticaBold => 611,
            _ => 556,
        }
    }

    /// Advance width of a single character in 1/1000 em.
    ///
    /// Latin-1 diacritics fold to their base letter, which matches the AFM
    /// metrics for the accented forms.
    pub fn char_width(self, c: char) -> u16 {
        if let Some(width) = self.extended_width(c) {
            return width;
        }
        let code = fold_diacritic(c) as u32;
        if (0x20..=0x7E).contains(&code) {
            self.widths()[(code - 0x20) as usize]
        } else {
            self.default_width()
        }
    }

    // Widths for the WinAnsi code points outside ASCII that certificates
    // actually use (typographic quotes, guillemets, ligatures, dashes).
    fn extended_width(self, c: char) -> Option<u16> {
        let (regular, bold) = match c {
            '\u{2018}' | '\u{2019}' => (222, 278),
            '\u{201C}' | '\u{201D}' => (333, 500),
            '\u{00AB}' | '\u{00BB}' => (556, 556),
            '\u{2039}' | '\u{203A}' => (333, 333),
            '\u{0153}' => (944, 944),
            '\u{0152}' => (1000, 1000),
            '\u{00E6}' => (889, 889),
            '\u{00C6}' => (1000, 1000),
            '\u{00B0}' => (400, 400),
            '\u{20AC}' => (556, 556),
            '\u{2013}' => (556, 556),
            '\u{2014}' => (1000, 1000),
            '\u{2026}' => (1000, 1000),
            '\u{00A0}' => (278, 278),
            _ => return None,
        };
        Some(match self {
            BuiltinFont::HelveticaBold => bold,
            _ => regular,
        })
    }

    /// Total advance width of a string in 1/1000 em
    pub fn text_width(self, text: &str) -> u32 {
        text.chars().map(|c| self.char_width(c) as u32).sum()
    }

    /// Total advance width of a string in points at the given size
    pub fn text_width_points(self, text: &str, size: f32) -> f32 {
        self.text_width(text) as f32 / 1000.0 * size
    }

    /// Encode text for a `Tj` operand (WinAnsi bytes)
    pub fn encode_text(self, text: &str) -> Vec<u8> {
        encode_win_ansi(text)
    }

    /// Font dictionary for the page resources
    pub fn to_pdf_dictionary(self) -> Dictionary {
        Dictionary::from_iter(vec![
            ("Type", "Font".into()),
            ("Subtype", "Type1".into()),
            ("BaseFont", self.base_name().into()),
            ("Encoding", "WinAnsiEncoding".into()),
        ])
    }
}

/// Map Latin-1 accented letters to their unaccented base
fn fold_diacritic(c: char) -> char {
    match c {
        'à' | 'â' | 'ä' | 'á' | 'ã' | 'å' => 'a',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ò' | 'ó' | 'ô' | 'ö' | 'õ' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        'ý' | 'ÿ' => 'y',
        'À' | 'Â' | 'Ä' | 'Á' | 'Ã' | 'Å' => 'A',
        'È' | 'É' | 'Ê' | 'Ë' => 'E',
        'Ì' | 'Í' | 'Î' | 'Ï' => 'I',
        'Ò' | 'Ó' | 'Ô' | 'Ö' | 'Õ' => 'O',
        'Ù' | 'Ú' | 'Û' | 'Ü' => 'U',
        'Ç' => 'C',
        'Ñ' => 'N',
        'Ý' => 'Y',
        _ => c,
    }
}

/// Encode text as Windows-1252 bytes, the byte meaning of WinAnsiEncoding.
///
/// Latin-1 maps through directly; the 0x80..0x9F window carries the
/// typographic extras (euro, oe ligatures, curly quotes, dashes). Anything
/// unrepresentable becomes `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| win_ansi_byte(c).unwrap_or(b'?'))
        .collect()
}

fn win_ansi_byte(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => match c {
            '\u{20AC}' => Some(0x80),
            '\u{201A}' => Some(0x82),
            '\u{0192}' => Some(0x83),
            '\u{201E}' => Some(0x84),
            '\u{2026}' => Some(0x85),
            '\u{2020}' => Some(0x86),
            '\u{2021}' => Some(0x87),
            '\u{02C6}' => Some(0x88),
            '\u{2030}' => Some(0x89),
            '\u{0160}' => Some(0x8A),
            '\u{2039}' => Some(0x8B),
            '\u{0152}' => Some(0x8C),
            '\u{017D}' => Some(0x8E),
            '\u{2018}' => Some(0x91),
            '\u{2019}' => Some(0x92),
            '\u{201C}' => Some(0x93),
            '\u{201D}' => Some(0x94),
            '\u{2022}' => Some(0x95),
            '\u{2013}' => Some(0x96),
            '\u{2014}' => Some(0x97),
            '\u{02DC}' => Some(0x98),
            '\u{2122}' => Some(0x99),
            '\u{0161}' => Some(0x9A),
            '\u{203A}' => Some(0x9B),
            '\u{0153}' => Some(0x9C),
            '\u{017E}' => Some(0x9E),
            '\u{0178}' => Some(0x9F),
            _ => None,
        },
    }
}

/// An embedded TrueType font and the characters drawn with it
pub struct FontData {
    /// Registration name, also used as the PDF BaseFont
    pub name: String,
    ttf_data: Vec<u8>,
    used_chars: HashSet<char>,
    face: Option<ttf_parser::Face<'static>>,
}

impl FontData {
    /// Parse a TrueType font from raw bytes.
    ///
    /// The bytes are leaked to obtain a `'static` face. This is acceptable
    /// since fonts are loaded once and kept for the document lifetime.
    pub fn from_ttf(name: &str, data: Vec<u8>) -> Result<Self> {
        let leaked: &'static [u8] = Box::leak(data.clone().into_boxed_slice());
        let face = ttf_parser::Face::parse(leaked, 0)
            .map_err(|e| CanvasError::FontParseError(format!("{name}: {e}")))?;
        Ok(Self {
            name: name.to_string(),
            ttf_data: data,
            used_chars: HashSet::new(),
            face: Some(face),
        })
    }

    /// Record characters so the widths array and ToUnicode map cover them
    pub fn add_chars(&mut self, text: &str) {
        self.used_chars.extend(text.chars());
    }

    /// Glyph ID for a character, if the font has one
    pub fn glyph_id(&self, c: char) -> Option<u16> {
        self.face
            .as_ref()
            .and_then(|f| f.glyph_index(c))
            .map(|id| id.0)
    }

    /// Horizontal advance for a glyph in font units
    pub fn glyph_advance(&self, glyph_id: u16) -> u16 {
        self.face
            .as_ref()
            .and_then(|f| f.glyph_hor_advance(ttf_parser::GlyphId(glyph_id)))
            .unwrap_or(self.units_per_em() / 2)
    }

    pub fn units_per_em(&self) -> u16 {
        self.face.as_ref().map(|f| f.units_per_em()).unwrap_or(1000)
    }

    pub fn ascender(&self) -> i16 {
        self.face.as_ref().map(|f| f.ascender()).unwrap_or(800)
    }

    pub fn descender(&self) -> i16 {
        self.face.as_ref().map(|f| f.descender()).unwrap_or(-200)
    }

    pub fn line_gap(&self) -> i16 {
        self.face.as_ref().map(|f| f.line_gap()).unwrap_or(0)
    }

    /// Total advance width of a string in font units.
    ///
    /// Characters without a glyph fall back to half an em so layout stays
    /// stable even for unmapped input.
    pub fn text_width(&self, text: &str) -> u32 {
        text.chars()
            .map(|c| match self.glyph_id(c) {
                Some(id) => self.glyph_advance(id) as u32,
                None => (self.units_per_em() / 2) as u32,
            })
            .sum()
    }

    /// Total advance width of a string in points at the given size
    pub fn text_width_points(&self, text: &str, size: f32) -> f32 {
        self.text_width(text) as f32 / self.units_per_em() as f32 * size
    }

    /// Encode text for a `Tj` operand: big-endian glyph IDs (Identity-H).
    ///
    /// Unmapped characters encode as glyph 0 (.notdef).
    pub fn encode_text(&self, text: &str) -> Vec<u8> {
        let mut encoded = Vec::with_capacity(text.len() * 2);
        for c in text.chars() {
            let gid = self.glyph_id(c).unwrap_or(0);
            encoded.extend_from_slice(&gid.to_be_bytes());
        }
        encoded
    }

    /// Build the PDF object graph for embedding this font.
    ///
    /// References between the objects are wired by the caller once IDs are
    /// known; see `Canvas::finish`.
    pub fn to_pdf_objects(&self) -> FontObjects {
        let base_font = Object::Name(self.name.as_bytes().to_vec());

        let type0_font = Dictionary::from_iter(vec![
            ("Type", "Font".into()),
            ("Subtype", "Type0".into()),
            ("BaseFont", base_font.clone()),
            ("Encoding", "Identity-H".into()),
        ]);

        let cid_system_info = Dictionary::from_iter(vec![
            (
                "Registry",
                Object::String(b"Adobe".to_vec(), StringFormat::Literal),
            ),
            (
                "Ordering",
                Object::String(b"Identity".to_vec(), StringFormat::Literal),
            ),
            ("Supplement", 0.into()),
        ]);

        let cid_font = Dictionary::from_iter(vec![
            ("Type", "Font".into()),
            ("Subtype", "CIDFontType2".into()),
            ("BaseFont", base_font.clone()),
            ("CIDSystemInfo", cid_system_info.into()),
            ("DW", 1000.into()),
            ("W", self.widths_array()),
            ("CIDToGIDMap", "Identity".into()),
        ]);

        let scale = 1000.0 / self.units_per_em() as f64;
        let ascent = (self.ascender() as f64 * scale).round() as i64;
        let descent = (self.descender() as f64 * scale).round() as i64;
        let bbox = match self.face.as_ref().map(|f| f.global_bounding_box()) {
            Some(rect) => vec![
                Object::Integer((rect.x_min as f64 * scale).round() as i64),
                Object::Integer((rect.y_min as f64 * scale).round() as i64),
                Object::Integer((rect.x_max as f64 * scale).round() as i64),
                Object::Integer((rect.y_max as f64 * scale).round() as i64),
            ],
            None => vec![
                Object::Integer(-200),
                Object::Integer(-200),
                Object::Integer(1200),
                Object::Integer(1000),
            ],
        };

        let font_descriptor = Dictionary::from_iter(vec![
            ("Type", "FontDescriptor".into()),
            ("FontName", base_font),
            ("Flags", 4.into()),
            ("FontBBox", bbox.into()),
            ("ItalicAngle", 0.into()),
            ("Ascent", ascent.into()),
            ("Descent", descent.into()),
            ("CapHeight", ascent.into()),
            ("StemV", 80.into()),
        ]);

        let font_file = Stream::new(
            Dictionary::from_iter(vec![("Length1", (self.ttf_data.len() as i64).into())]),
            self.ttf_data.clone(),
        );

        let tounicode = Stream::new(Dictionary::new(), self.tounicode_cmap());

        FontObjects {
            type0_font,
            cid_font,
            font_descriptor,
            font_file,
            tounicode,
        }
    }

    // W array entries for every used glyph, scaled to 1/1000 em text space
    fn widths_array(&self) -> Object {
        let mut glyphs: Vec<(u16, u16)> = self
            .used_chars
            .iter()
            .filter_map(|&c| self.glyph_id(c).map(|id| (id, self.glyph_advance(id))))
            .collect();
        glyphs.sort_unstable();
        glyphs.dedup();

        let scale = 1000.0 / self.units_per_em() as f64;
        let mut widths = Vec::with_capacity(glyphs.len() * 2);
        for (gid, advance) in glyphs {
            widths.push(Object::Integer(gid as i64));
            widths.push(Object::Array(vec![Object::Integer(
                (advance as f64 * scale).round() as i64,
            )]));
        }
        Object::Array(widths)
    }

    // ToUnicode CMap so extracted text maps glyphs back to characters
    fn tounicode_cmap(&self) -> Vec<u8> {
        let mut mappings: Vec<(u16, u32)> = self
            .used_chars
            .iter()
            .filter_map(|&c| {
                let code = c as u32;
                if code > 0xFFFF {
                    return None;
                }
                self.glyph_id(c).map(|id| (id, code))
            })
            .collect();
        mappings.sort_unstable();
        mappings.dedup();

        let mut cmap = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );
        for chunk in mappings.chunks(100) {
            cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
            for (gid, code) in chunk {
                cmap.push_str(&format!("<{gid:04X}> <{code:04X}>\n"));
            }
            cmap.push_str("endbfchar\n");
        }
        cmap.push_str(
            "endcmap\n\
             CMapName currentdict /CMap defineresource pop\n\
             end\n\
             end\n",
        );
        cmap.into_bytes()
    }
}

/// The unwired object graph for one embedded font
pub struct FontObjects {
    pub type0_font: Dictionary,
    pub cid_font: Dictionary,
    pub font_descriptor: Dictionary,
    pub font_file: Stream,
    pub tounicode: Stream,
}

/// A registered font: either a built-in Type1 face or an embedded TrueType
pub enum Font {
    Builtin(BuiltinFont),
    Embedded(FontData),
}

impl Font {
    pub fn text_width_points(&self, text: &str, size: f32) -> f32 {
        match self {
            Font::Builtin(builtin) => builtin.text_width_points(text, size),
            Font::Embedded(data) => data.text_width_points(text, size),
        }
    }

    /// Vertical advance between consecutive baselines
    pub fn line_height(&self, size: f32) -> f32 {
        match self {
            Font::Builtin(_) => size * 1.2,
            Font::Embedded(data) => {
                let units = data.ascender() as f32 - data.descender() as f32
                    + data.line_gap() as f32;
                units / data.units_per_em() as f32 * size
            }
        }
    }

    /// Distance from the top of a line to its baseline
    pub fn ascent(&self, size: f32) -> f32 {
        match self {
            Font::Builtin(_) => size * 0.8,
            Font::Embedded(data) => {
                data.ascender() as f32 / data.units_per_em() as f32 * size
            }
        }
    }

    /// Encode text for drawing, recording used characters for embedded fonts
    pub fn encode_text(&mut self, text: &str) -> Vec<u8> {
        match self {
            Font::Builtin(builtin) => builtin.encode_text(text),
            Font::Embedded(data) => {
                data.add_chars(text);
                data.encode_text(text)
            }
        }
    }
}
