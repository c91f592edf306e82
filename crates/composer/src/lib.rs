//! Civil registry certificate composition
//!
//! Turns a registry record into a finished single-page A4 certificate,
//! returned as PDF bytes:
//!
//! ```no_run
//! use composer::{generate_document, ActRecord};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let record: ActRecord = serde_json::from_str(
//!     r#"{
//!         "actNumber": "0042/2021",
//!         "registrationDate": "2021-03-05",
//!         "registryOffice": "N'Djamena 1er",
//!         "details": { "nomEnfant": "MAHAMAT", "prenomEnfant": "ACHTA" }
//!     }"#,
//! )?;
//! let bytes = generate_document("birth", &record)?;
//! std::fs::write("acte-naissance.pdf", bytes)?;
//! # Ok(())
//! # }
//! ```
//!
//! Rendering degrades field by field: missing values print blank, a missing
//! logo or companion font drops that feature with a warning, and the same
//! record always produces byte-identical output.

pub mod acts;
pub mod assets;
pub mod config;
pub mod layout;
pub mod record;
pub mod table;

use thiserror::Error;

pub use acts::{
    compose_birth_act, compose_cohabitation_act, compose_death_act, compose_divorce_act,
    compose_marriage_act,
};
pub use config::LayoutConfig;
pub use record::{ActRecord, ActType, FieldRow, SectionContent, SectionItem};
pub use table::render_field_table;

/// Errors surfaced to API callers
#[derive(Debug, Error)]
pub enum PdfGenerationError {
    #[error("Unsupported document type: {0}")]
    UnsupportedDocumentType(String),
    #[error("PDF generation failed: {0}")]
    Canvas(#[from] pdf_canvas::CanvasError),
}

impl PdfGenerationError {
    /// Stable machine-readable code for error envelopes
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedDocumentType(_) => "DOCUMENT_TYPE_UNSUPPORTED",
            Self::Canvas(_) => "PDF_GENERATION_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, PdfGenerationError>;

/// Compose the certificate for `act_type` from a registry record
///
/// The type is matched case-insensitively against both the English and
/// French names. Unknown types are rejected before any drawing starts.
pub fn generate_document(act_type: &str, record: &ActRecord) -> Result<Vec<u8>> {
    let act_type = ActType::parse(act_type)
        .ok_or_else(|| PdfGenerationError::UnsupportedDocumentType(act_type.to_string()))?;
    log::debug!("composing {} certificate", act_type.slug());
    let cfg = LayoutConfig::default();
    match act_type {
        ActType::Birth => compose_birth_act(record, &cfg),
        ActType::Marriage => compose_marriage_act(record, &cfg),
        ActType::Death => compose_death_act(record, &cfg),
        ActType::Divorce => compose_divorce_act(record, &cfg),
        ActType::Cohabitation => compose_cohabitation_act(record, &cfg),
    }
}

/// A download-friendly file name for a generated certificate
///
/// `acte-{type}`, plus the act number reduced to ascii alphanumerics with
/// runs of anything else collapsed to single dashes.
pub fn suggested_filename(act_type: ActType, record: &ActRecord) -> String {
    let mut name = format!("acte-{}", act_type.slug());
    if let Some(number) = record.act_number.as_deref() {
        let mut slug = String::new();
        let mut last_dash = true;
        for c in number.chars() {
            if c.is_ascii_alphanumeric() {
                slug.push(c.to_ascii_lowercase());
                last_dash = false;
            } else if !last_dash {
                slug.push('-');
                last_dash = true;
            }
        }
        let slug = slug.trim_end_matches('-');
        if !slug.is_empty() {
            name.push('-');
            name.push_str(slug);
        }
    }
    name.push_str(".pdf");
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_codes() {
        let err = PdfGenerationError::UnsupportedDocumentType("adoption".to_string());
        assert_eq!(err.code(), "DOCUMENT_TYPE_UNSUPPORTED");
        assert_eq!(err.to_string(), "Unsupported document type: adoption");
    }

    #[test]
    fn test_suggested_filename_sanitizes_the_act_number() {
        let record = ActRecord {
            act_number: Some("N° 0042/2021".to_string()),
            ..ActRecord::default()
        };
        assert_eq!(
            suggested_filename(ActType::Birth, &record),
            "acte-naissance-n-0042-2021.pdf"
        );
        assert_eq!(
            suggested_filename(ActType::Death, &ActRecord::default()),
            "acte-deces.pdf"
        );
        let record = ActRecord {
            act_number: Some("///".to_string()),
            ..ActRecord::default()
        };
        assert_eq!(
            suggested_filename(ActType::Divorce, &record),
            "acte-divorce.pdf"
        );
    }

    #[test]
    fn test_generate_document_rejects_unknown_types() {
        let err = generate_document("adoption", &ActRecord::default()).unwrap_err();
        assert!(matches!(err, PdfGenerationError::UnsupportedDocumentType(_)));
    }
}
