//! Civil registry records and value coercion

use bilingual::format_date_value;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The document families the registry issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActType {
    Birth,
    Marriage,
    Death,
    Divorce,
    Cohabitation,
}

impl ActType {
    /// Parse a requested document type, case-insensitively
    ///
    /// Both the English API names and the French names used by older clients
    /// are accepted. Unknown types are rejected before any drawing starts.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "birth" | "naissance" => Some(Self::Birth),
            "marriage" | "mariage" => Some(Self::Marriage),
            "death" | "deces" | "décès" => Some(Self::Death),
            "divorce" => Some(Self::Divorce),
            "cohabitation" | "concubinage" | "engagement" => Some(Self::Cohabitation),
            _ => None,
        }
    }

    /// French document title, uppercased as printed
    pub fn title(self) -> &'static str {
        match self {
            Self::Birth => "ACTE DE NAISSANCE",
            Self::Marriage => "ACTE DE MARIAGE",
            Self::Death => "ACTE DE DÉCÈS",
            Self::Divorce => "ACTE DE DIVORCE",
            Self::Cohabitation => "CERTIFICAT DE CONCUBINAGE",
        }
    }

    /// Slug used in suggested file names
    pub fn slug(self) -> &'static str {
        match self {
            Self::Birth => "naissance",
            Self::Marriage => "mariage",
            Self::Death => "deces",
            Self::Divorce => "divorce",
            Self::Cohabitation => "concubinage",
        }
    }
}

/// A civil registry record as received from the registry backend
///
/// Everything is optional. Records come from heterogeneous upstream systems,
/// so rendering degrades field by field instead of rejecting whole records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActRecord {
    /// Registry act number, printed in the header
    pub act_number: Option<String>,
    /// Date the act was registered; doubles as the signature date
    pub registration_date: Option<String>,
    /// Issuing civil status office
    pub registry_office: Option<String>,
    /// Loosely-typed payload whose keys vary by upstream system
    pub details: Value,
}

impl ActRecord {
    /// First non-empty coerced value among the candidate detail keys
    pub fn resolve_field(&self, keys: &[&str]) -> String {
        resolve_value(&self.details, keys)
    }

    /// Resolve a date-typed field and format it as a short French date
    ///
    /// Unparsable dates render blank rather than leaking the raw value.
    pub fn resolve_date_field(&self, keys: &[&str]) -> String {
        format_date_value(&self.resolve_field(keys))
    }

    /// First non-empty array among the candidate detail keys
    pub fn resolve_list(&self, keys: &[&str]) -> Vec<Value> {
        for key in keys {
            if let Some(Value::Array(items)) = lookup_path(&self.details, key) {
                if !items.is_empty() {
                    return items.clone();
                }
            }
        }
        Vec::new()
    }

    /// The registry office, or empty
    pub fn office(&self) -> &str {
        self.registry_office.as_deref().unwrap_or("").trim()
    }
}

/// One label/value row of a section table
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRow {
    pub label: String,
    pub value: String,
}

impl FieldRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// One item of a section body
#[derive(Debug, Clone, PartialEq)]
pub enum SectionItem {
    Field(FieldRow),
    Text(String),
}

/// The body of a rendered section
#[derive(Debug, Clone, PartialEq)]
pub enum SectionContent {
    Paragraph(String),
    Items(Vec<SectionItem>),
}

/// Walk a dotted path into a JSON value
fn lookup_path<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = data;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    Some(current)
}

/// First non-empty coerced value among candidate keys of a JSON object
///
/// Keys may use dotted paths (`"parent.nom"`).
pub fn resolve_value(data: &Value, keys: &[&str]) -> String {
    for key in keys {
        if let Some(value) = lookup_path(data, key) {
            let text = value_to_string(value);
            if !text.is_empty() {
                return text;
            }
        }
    }
    String::new()
}

/// Coerce a JSON value to printable text
///
/// Strings are trimmed, numbers printed as-is and booleans become Oui/Non.
/// Null, arrays and objects are blank: the words "null" and "undefined"
/// never reach the page.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "Oui".to_string(),
        Value::Bool(false) => "Non".to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}
