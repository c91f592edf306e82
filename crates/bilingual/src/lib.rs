//! Bilingual - French and Arabic text support
//!
//! This crate provides:
//! - Parsing and formatting of the date shapes found in civil registry records
//! - French to Arabic translation tables for field labels, section titles and
//!   document titles
//! - Arabic presentation-form shaping for renderers without a text engine
//!
//! # Example
//!
//! ```
//! use bilingual::{format_short_date, parse_date, translate_label};
//!
//! let date = parse_date("1994-05-14").unwrap();
//! assert_eq!(format_short_date(date), "14/05/1994");
//! assert_eq!(translate_label("Nom"), Some("اللقب"));
//! ```

mod dates;
mod labels;
mod shaper;

pub use dates::{format_date_value, format_long_date, format_short_date, parse_date, FRENCH_MONTHS};
pub use labels::{translate_document_title, translate_label, translate_section_title};
pub use shaper::shape_arabic;
