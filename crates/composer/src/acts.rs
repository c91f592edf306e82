//! Per-act-type composition
//!
//! One composer per document family, all sharing the same skeleton: header,
//! title, sections, signature block. The field tables are static so the row
//! set and order of each certificate never depends on the record payload.

use crate::config::LayoutConfig;
use crate::layout::{
    render_header, render_section, render_signature_block, render_title, render_watermark,
};
use crate::record::{
    resolve_value, value_to_string, ActRecord, ActType, FieldRow, SectionContent, SectionItem,
};
use crate::{assets, Result};
use bilingual::{format_date_value, format_long_date, parse_date};
use pdf_canvas::Canvas;
use serde_json::Value;

/// One row of a static section table
///
/// `keys` are tried in order; upstream systems disagree on naming, so every
/// row carries the aliases seen in the wild.
struct FieldDef {
    label: &'static str,
    keys: &'static [&'static str],
    date: bool,
}

const fn field(label: &'static str, keys: &'static [&'static str]) -> FieldDef {
    FieldDef {
        label,
        keys,
        date: false,
    }
}

const fn date_field(label: &'static str, keys: &'static [&'static str]) -> FieldDef {
    FieldDef {
        label,
        keys,
        date: true,
    }
}

/// The six child rows of a birth act, printed in this order even when blank
const BIRTH_CHILD: &[FieldDef] = &[
    field("Nom", &["nomEnfant", "nom"]),
    field("Prénom(s)", &["prenomEnfant", "prenoms", "prenom"]),
    field("Sexe", &["sexe", "genre"]),
    date_field("Date de naissance", &["dateNaissance", "date_naissance"]),
    field("Heure de naissance", &["heureNaissance", "heure_naissance"]),
    field("Lieu de naissance", &["lieuNaissance", "lieu_naissance"]),
];

const BIRTH_PARENTS: &[FieldDef] = &[
    field("Nom du père", &["nomPere", "pere"]),
    field("Profession du père", &["professionPere"]),
    field("Nom de la mère", &["nomMere", "mere"]),
    field("Profession de la mère", &["professionMere"]),
];

const MARRIAGE_HUSBAND: &[FieldDef] = &[
    field("Nom", &["nomEpoux"]),
    field("Prénom(s)", &["prenomEpoux"]),
    date_field("Date de naissance", &["dateNaissanceEpoux"]),
    field("Lieu de naissance", &["lieuNaissanceEpoux"]),
    field("Profession", &["professionEpoux"]),
];

const MARRIAGE_WIFE: &[FieldDef] = &[
    field("Nom", &["nomEpouse"]),
    field("Prénom(s)", &["prenomEpouse"]),
    date_field("Date de naissance", &["dateNaissanceEpouse"]),
    field("Lieu de naissance", &["lieuNaissanceEpouse"]),
    field("Profession", &["professionEpouse"]),
];

const MARRIAGE_EVENT: &[FieldDef] = &[
    date_field("Date du mariage", &["dateMariage", "date_mariage"]),
    field("Lieu du mariage", &["lieuMariage", "lieu_mariage"]),
    field("Régime matrimonial", &["regimeMatrimonial", "regime"]),
];

const DEATH_DECEASED: &[FieldDef] = &[
    field("Nom", &["nomDefunt", "nom"]),
    field("Prénom(s)", &["prenomDefunt", "prenoms"]),
    date_field("Date de naissance", &["dateNaissance"]),
    date_field("Date du décès", &["dateDeces", "date_deces"]),
    field("Lieu du décès", &["lieuDeces", "lieu_deces"]),
];

const DEATH_DECLARANT: &[FieldDef] = &[
    field("Nom du déclarant", &["nomDeclarant", "declarant"]),
    field("Qualité", &["qualiteDeclarant", "qualite"]),
];

const DIVORCE_SPOUSES: &[FieldDef] = &[
    field("Nom de l'époux", &["nomEpoux"]),
    field("Nom de l'épouse", &["nomEpouse"]),
    date_field("Date du mariage", &["dateMariage"]),
    date_field("Date du divorce", &["dateDivorce", "date"]),
    field("Tribunal", &["tribunal", "juridiction"]),
];

const COHABITATION_PARTNER_A: &[FieldDef] = &[
    field("Nom", &["nomConcubin", "nomPartenaire1"]),
    field("Prénom(s)", &["prenomConcubin", "prenomPartenaire1"]),
    date_field(
        "Date de naissance",
        &["dateNaissanceConcubin", "dateNaissancePartenaire1"],
    ),
    field("Profession", &["professionConcubin", "professionPartenaire1"]),
];

const COHABITATION_PARTNER_B: &[FieldDef] = &[
    field("Nom", &["nomConcubine", "nomPartenaire2"]),
    field("Prénom(s)", &["prenomConcubine", "prenomPartenaire2"]),
    date_field(
        "Date de naissance",
        &["dateNaissanceConcubine", "dateNaissancePartenaire2"],
    ),
    field("Profession", &["professionConcubine", "professionPartenaire2"]),
];

const COHABITATION_EVENT: &[FieldDef] = &[
    date_field("Date de l'engagement", &["dateEngagement", "date_engagement"]),
    field("Lieu de l'engagement", &["lieuEngagement", "lieu_engagement"]),
    field("Durée déclarée", &["duree", "dureeDeclaree"]),
];

/// Resolve a static table against a record, one row per definition
fn build_rows(record: &ActRecord, fields: &[FieldDef]) -> Vec<SectionItem> {
    fields
        .iter()
        .map(|def| {
            let value = if def.date {
                record.resolve_date_field(def.keys)
            } else {
                record.resolve_field(def.keys)
            };
            SectionItem::Field(FieldRow::new(def.label, value))
        })
        .collect()
}

fn subtitle_for(record: &ActRecord) -> Option<String> {
    let office = record.office();
    (!office.is_empty()).then(|| format!("Centre d'état civil de {office}"))
}

/// The long-form date printed in the signature line
///
/// Uses the registration date when it parses, today otherwise. Tests always
/// supply a registration date so output stays reproducible.
fn signature_date(record: &ActRecord) -> String {
    let date = record
        .registration_date
        .as_deref()
        .and_then(parse_date)
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    format_long_date(date)
}

/// New canvas with the shared top-of-page blocks already drawn
fn begin_act(record: &ActRecord, cfg: &LayoutConfig, title: &str) -> Result<(Canvas, f32)> {
    let mut canvas = Canvas::new()?;
    assets::load_companion_fonts(&mut canvas);
    render_header(&mut canvas, cfg, record)?;
    render_watermark(&mut canvas, cfg);
    let subtitle = subtitle_for(record);
    let y = render_title(&mut canvas, cfg, title, subtitle.as_deref())?;
    Ok((canvas, y))
}

/// Signature block, then serialize the finished page
fn finish_act(
    mut canvas: Canvas,
    cfg: &LayoutConfig,
    record: &ActRecord,
    y: f32,
) -> Result<Vec<u8>> {
    render_signature_block(&mut canvas, cfg, record.office(), &signature_date(record), y)?;
    Ok(canvas.finish()?)
}

pub fn compose_birth_act(record: &ActRecord, cfg: &LayoutConfig) -> Result<Vec<u8>> {
    let (mut canvas, y) = begin_act(record, cfg, ActType::Birth.title())?;
    let y = render_section(
        &mut canvas,
        cfg,
        "Informations sur l'enfant",
        &SectionContent::Items(build_rows(record, BIRTH_CHILD)),
        y,
    )?;
    let y = render_section(
        &mut canvas,
        cfg,
        "Informations sur les parents",
        &SectionContent::Items(build_rows(record, BIRTH_PARENTS)),
        y,
    )?;
    finish_act(canvas, cfg, record, y)
}

pub fn compose_marriage_act(record: &ActRecord, cfg: &LayoutConfig) -> Result<Vec<u8>> {
    let (mut canvas, y) = begin_act(record, cfg, ActType::Marriage.title())?;
    let y = render_section(
        &mut canvas,
        cfg,
        "Informations sur l'époux",
        &SectionContent::Items(build_rows(record, MARRIAGE_HUSBAND)),
        y,
    )?;
    let y = render_section(
        &mut canvas,
        cfg,
        "Informations sur l'épouse",
        &SectionContent::Items(build_rows(record, MARRIAGE_WIFE)),
        y,
    )?;
    let y = render_section(
        &mut canvas,
        cfg,
        "Informations sur le mariage",
        &SectionContent::Items(build_rows(record, MARRIAGE_EVENT)),
        y,
    )?;
    finish_act(canvas, cfg, record, y)
}

pub fn compose_death_act(record: &ActRecord, cfg: &LayoutConfig) -> Result<Vec<u8>> {
    let (mut canvas, y) = begin_act(record, cfg, ActType::Death.title())?;
    let y = render_section(
        &mut canvas,
        cfg,
        "Informations sur le défunt",
        &SectionContent::Items(build_rows(record, DEATH_DECEASED)),
        y,
    )?;
    let y = render_section(
        &mut canvas,
        cfg,
        "Informations sur le déclarant",
        &SectionContent::Items(build_rows(record, DEATH_DECLARANT)),
        y,
    )?;
    let y = render_section(
        &mut canvas,
        cfg,
        "Déclaration",
        &SectionContent::Paragraph(death_declaration(record)),
        y,
    )?;
    finish_act(canvas, cfg, record, y)
}

pub fn compose_divorce_act(record: &ActRecord, cfg: &LayoutConfig) -> Result<Vec<u8>> {
    let (mut canvas, mut y) = begin_act(record, cfg, ActType::Divorce.title())?;
    y = render_section(
        &mut canvas,
        cfg,
        "Informations sur les époux",
        &SectionContent::Items(build_rows(record, DIVORCE_SPOUSES)),
        y,
    )?;
    let children = record.resolve_list(&["enfants", "children"]);
    if !children.is_empty() {
        let rows: Vec<SectionItem> = children
            .iter()
            .enumerate()
            .map(|(index, child)| {
                SectionItem::Field(FieldRow::new(
                    format!("Enfant {}", index + 1),
                    child_summary(child),
                ))
            })
            .collect();
        y = render_section(
            &mut canvas,
            cfg,
            "Informations sur les enfants",
            &SectionContent::Items(rows),
            y,
        )?;
    }
    y = render_section(
        &mut canvas,
        cfg,
        "Déclaration",
        &SectionContent::Paragraph(divorce_declaration(record)),
        y,
    )?;
    finish_act(canvas, cfg, record, y)
}

pub fn compose_cohabitation_act(record: &ActRecord, cfg: &LayoutConfig) -> Result<Vec<u8>> {
    let (mut canvas, y) = begin_act(record, cfg, ActType::Cohabitation.title())?;
    let y = render_section(
        &mut canvas,
        cfg,
        "Informations sur le concubin",
        &SectionContent::Items(build_rows(record, COHABITATION_PARTNER_A)),
        y,
    )?;
    let y = render_section(
        &mut canvas,
        cfg,
        "Informations sur la concubine",
        &SectionContent::Items(build_rows(record, COHABITATION_PARTNER_B)),
        y,
    )?;
    let y = render_section(
        &mut canvas,
        cfg,
        "Informations sur l'engagement",
        &SectionContent::Items(build_rows(record, COHABITATION_EVENT)),
        y,
    )?;
    finish_act(canvas, cfg, record, y)
}

/// Narrative paragraph of a death act
///
/// Missing pieces fall back to a blank line placeholder; the paragraph never
/// contains nullish words.
fn death_declaration(record: &ActRecord) -> String {
    let deceased = or_placeholder(join_nonempty(&[
        record.resolve_field(&["prenomDefunt", "prenoms"]),
        record.resolve_field(&["nomDefunt", "nom"]),
    ]));
    let date = or_placeholder(record.resolve_date_field(&["dateDeces", "date_deces"]));
    let declarant = or_placeholder(record.resolve_field(&["nomDeclarant", "declarant"]));
    let place = record.resolve_field(&["lieuDeces", "lieu_deces"]);

    let mut text = format!("Nous certifions que {deceased} est décédé(e) le {date}");
    if !place.is_empty() {
        text.push_str(&format!(" à {place}"));
    }
    text.push_str(&format!(
        ", suivant la déclaration de {declarant}, dont l'identité a été vérifiée."
    ));
    text
}

/// Narrative paragraph of a divorce act
fn divorce_declaration(record: &ActRecord) -> String {
    let husband = or_placeholder(record.resolve_field(&["nomEpoux"]));
    let wife = or_placeholder(record.resolve_field(&["nomEpouse"]));
    let date = or_placeholder(record.resolve_date_field(&["dateDivorce", "date"]));
    let court = record.resolve_field(&["tribunal", "juridiction"]);

    let mut text = format!("Le divorce entre {husband} et {wife} a été prononcé le {date}");
    if !court.is_empty() {
        text.push_str(&format!(" par le {court}"));
    }
    text.push_str(". Mention en a été portée en marge des actes de l'état civil concernés.");
    text
}

/// One-line summary of a child entry in a divorce record
///
/// Children arrive either as plain names or as objects with their own alias
/// soup.
fn child_summary(child: &Value) -> String {
    match child {
        Value::String(name) => name.trim().to_string(),
        Value::Object(_) => {
            let name = join_nonempty(&[
                resolve_value(child, &["prenom", "prenoms", "firstName"]),
                resolve_value(child, &["nom", "lastName", "name"]),
            ]);
            let born = format_date_value(&resolve_value(child, &["dateNaissance", "birthDate"]));
            if born.is_empty() {
                name
            } else if name.is_empty() {
                format!("né(e) le {born}")
            } else {
                format!("{name}, né(e) le {born}")
            }
        }
        other => value_to_string(other),
    }
}

fn or_placeholder(value: String) -> String {
    if value.is_empty() {
        "________".to_string()
    } else {
        value
    }
}

fn join_nonempty(parts: &[String]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record_with(details: Value) -> ActRecord {
        ActRecord {
            details,
            ..ActRecord::default()
        }
    }

    #[test]
    fn test_birth_child_rows_are_fixed() {
        let labels: Vec<&str> = BIRTH_CHILD.iter().map(|def| def.label).collect();
        assert_eq!(
            labels,
            vec![
                "Nom",
                "Prénom(s)",
                "Sexe",
                "Date de naissance",
                "Heure de naissance",
                "Lieu de naissance",
            ]
        );
    }

    #[test]
    fn test_build_rows_resolves_aliases_and_dates() {
        let record = record_with(json!({
            "nom": "MAHAMAT",
            "dateNaissance": "1994-05-14"
        }));
        let rows = build_rows(&record, BIRTH_CHILD);
        assert_eq!(rows.len(), 6);
        let expected_first = SectionItem::Field(FieldRow::new("Nom", "MAHAMAT"));
        assert_eq!(rows[0], expected_first);
        let expected_date = SectionItem::Field(FieldRow::new("Date de naissance", "14/05/1994"));
        assert_eq!(rows[3], expected_date);
        // unresolved rows still render, blank
        assert_eq!(rows[2], SectionItem::Field(FieldRow::new("Sexe", "")));
    }

    #[test]
    fn test_signature_date_uses_registration_date() {
        let record = ActRecord {
            registration_date: Some("2021-03-05".to_string()),
            ..ActRecord::default()
        };
        assert_eq!(signature_date(&record), "5 mars 2021");
    }

    #[test]
    fn test_subtitle_only_with_an_office() {
        let record = ActRecord {
            registry_office: Some("N'Djamena 1er".to_string()),
            ..ActRecord::default()
        };
        assert_eq!(
            subtitle_for(&record).as_deref(),
            Some("Centre d'état civil de N'Djamena 1er")
        );
        assert_eq!(subtitle_for(&ActRecord::default()), None);
    }

    #[test]
    fn test_death_declaration_full_record() {
        let record = record_with(json!({
            "prenomDefunt": "IDRISS",
            "nomDefunt": "OUMAR",
            "dateDeces": "2020-11-02",
            "lieuDeces": "Moundou",
            "nomDeclarant": "FATIME OUMAR"
        }));
        assert_eq!(
            death_declaration(&record),
            "Nous certifions que IDRISS OUMAR est décédé(e) le 02/11/2020 à Moundou, \
             suivant la déclaration de FATIME OUMAR, dont l'identité a été vérifiée."
        );
    }

    #[test]
    fn test_death_declaration_degrades_to_placeholders() {
        let text = death_declaration(&record_with(json!({})));
        assert!(text.contains("________"));
        assert!(!text.contains("null"));
        assert!(!text.contains(" à ,"));
    }

    #[test]
    fn test_divorce_declaration_court_is_optional() {
        let with_court = divorce_declaration(&record_with(json!({
            "nomEpoux": "ABDELKERIM",
            "nomEpouse": "AMINA",
            "dateDivorce": "2019-06-30",
            "tribunal": "Tribunal de N'Djamena"
        })));
        assert!(with_court.contains("ABDELKERIM et AMINA"));
        assert!(with_court.contains("le 30/06/2019 par le Tribunal de N'Djamena."));

        let without = divorce_declaration(&record_with(json!({})));
        assert!(without.contains("le ________. Mention"));
    }

    #[test]
    fn test_child_summary_variants() {
        assert_eq!(child_summary(&json!("  HAWA  ")), "HAWA");
        let full = json!({ "prenom": "ALI", "nom": "DJIMET", "dateNaissance": "2010-01-05" });
        assert_eq!(child_summary(&full), "ALI DJIMET, né(e) le 05/01/2010");
        assert_eq!(
            child_summary(&json!({ "dateNaissance": "2010-01-05" })),
            "né(e) le 05/01/2010"
        );
        assert_eq!(child_summary(&json!({ "nom": "DJIMET" })), "DJIMET");
        assert_eq!(child_summary(&json!(null)), "");
    }
}
