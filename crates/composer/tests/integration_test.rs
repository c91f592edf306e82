//! End-to-end composition tests
//!
//! Each test generates a full certificate and reparses the bytes with lopdf.
//! Text assertions search the decompressed content stream for the hex form
//! of the WinAnsi-encoded needle, the way Tj operands are written.

use composer::{generate_document, ActRecord};
use pdf_canvas::encode_win_ansi;
use serde_json::json;

/// Decode the content stream of the generated single page, uppercased
fn page_content(bytes: &[u8]) -> String {
    let doc = lopdf::Document::load_mem(bytes).expect("generated PDF should parse");
    let pages = doc.get_pages();
    assert_eq!(pages.len(), 1, "certificates are single-page");
    let page = doc.get_dictionary(pages[&1]).expect("page dictionary");
    let contents_id = page
        .get(b"Contents")
        .and_then(|obj| obj.as_reference())
        .expect("page Contents reference");
    let stream = doc
        .get_object(contents_id)
        .and_then(|obj| obj.as_stream())
        .expect("content stream object");
    let data = stream
        .decompressed_content()
        .expect("content stream should decompress");
    String::from_utf8_lossy(&data).to_uppercase()
}

/// Hex form of a text needle as it appears inside a Tj hex string
fn hex(text: &str) -> String {
    encode_win_ansi(text)
        .iter()
        .map(|byte| format!("{byte:02X}"))
        .collect()
}

fn birth_record() -> ActRecord {
    serde_json::from_value(json!({
        "actNumber": "0042/2021",
        "registrationDate": "2021-03-05",
        "registryOffice": "N'Djamena 1er",
        "details": {
            "nomEnfant": "MAHAMAT",
            "prenomEnfant": "ACHTA",
            "sexe": "Féminin",
            "dateNaissance": "2021-02-28",
            "heureNaissance": "06:45",
            "lieuNaissance": "N'Djamena",
            "nomPere": "MAHAMAT OUMAR",
            "professionPere": "Commerçant",
            "nomMere": "KALTOUMA DJIMET",
            "professionMere": "Enseignante"
        }
    }))
    .expect("sample record deserializes")
}

#[test]
fn test_birth_act_renders_title_and_fields() {
    let bytes = generate_document("birth", &birth_record()).expect("birth act generates");
    assert!(bytes.starts_with(b"%PDF-1.5"));

    let content = page_content(&bytes);
    assert!(content.contains(&hex("ACTE DE NAISSANCE")));
    assert!(content.contains(&hex("RÉPUBLIQUE DU TCHAD")));
    assert!(content.contains(&hex("N° 0042/2021")));
    assert!(content.contains(&hex("MAHAMAT")));
    assert!(content.contains(&hex("28/02/2021")));
    assert!(content.contains(&hex("Centre d'état civil de N'Djamena 1er")));
}

#[test]
fn test_dispatch_is_case_insensitive() {
    for act_type in ["BIRTH", "Naissance", "MARIAGE", "marriage", "Décès", "death"] {
        generate_document(act_type, &birth_record()).expect("known type should dispatch");
    }
}

#[test]
fn test_unsupported_type_fails_with_code() {
    let err = generate_document("adoption", &ActRecord::default())
        .expect_err("adoption is not a supported act type");
    assert_eq!(err.code(), "DOCUMENT_TYPE_UNSUPPORTED");
    assert_eq!(err.to_string(), "Unsupported document type: adoption");
}

#[test]
fn test_empty_records_generate_for_every_type() {
    for act_type in ["birth", "marriage", "death", "divorce", "cohabitation"] {
        let bytes = generate_document(act_type, &ActRecord::default())
            .expect("an empty record still generates");
        assert!(bytes.starts_with(b"%PDF-1.5"));
        // blank fields print as blanks, the office line falls back to a rule
        let content = page_content(&bytes);
        assert!(content.contains(&hex("N° ________")));
        assert!(content.contains(&hex("Fait à ________, le ")));
    }
}

#[test]
fn test_death_act_carries_the_declaration() {
    let record: ActRecord = serde_json::from_value(json!({
        "registrationDate": "2020-11-10",
        "registryOffice": "Moundou",
        "details": {
            "nomDefunt": "OUMAR",
            "prenomDefunt": "IDRISS",
            "dateDeces": "2020-11-02",
            "lieuDeces": "Moundou",
            "nomDeclarant": "FATIME OUMAR",
            "qualiteDeclarant": "Fille du défunt"
        }
    }))
    .expect("sample record deserializes");

    let content = page_content(&generate_document("death", &record).expect("death act generates"));
    assert!(content.contains(&hex("ACTE DE DÉCÈS")));
    assert!(content.contains(&hex("Nous certifions que IDRISS OUMAR")));
    assert!(content.contains(&hex("Fait à Moundou, le 10 novembre 2020")));
}

#[test]
fn test_divorce_children_section_is_conditional() {
    let with_children: ActRecord = serde_json::from_value(json!({
        "registrationDate": "2019-07-01",
        "details": {
            "nomEpoux": "ABDELKERIM",
            "nomEpouse": "AMINA",
            "dateDivorce": "2019-06-30",
            "enfants": [
                { "prenom": "ALI", "nom": "DJIMET", "dateNaissance": "2010-01-05" },
                "HAWA"
            ]
        }
    }))
    .expect("sample record deserializes");
    let content =
        page_content(&generate_document("divorce", &with_children).expect("divorce act generates"));
    assert!(content.contains(&hex("Informations sur les enfants")));
    assert!(content.contains(&hex("Enfant 1")));
    assert!(content.contains(&hex("Enfant 2")));
    assert!(content.contains(&hex("HAWA")));

    let without: ActRecord = serde_json::from_value(json!({
        "registrationDate": "2019-07-01",
        "details": { "nomEpoux": "ABDELKERIM", "nomEpouse": "AMINA" }
    }))
    .expect("sample record deserializes");
    let content =
        page_content(&generate_document("divorce", &without).expect("divorce act generates"));
    assert!(!content.contains(&hex("Informations sur les enfants")));
}

#[test]
fn test_nullish_values_never_print() {
    let record: ActRecord = serde_json::from_value(json!({
        "registrationDate": "2020-01-01",
        "details": {
            "nomEnfant": null,
            "sexe": null,
            "dateNaissance": "not-a-date",
            "lieuNaissance": { "ville": "N'Djamena" }
        }
    }))
    .expect("sample record deserializes");

    let content = page_content(&generate_document("birth", &record).expect("birth act generates"));
    assert!(!content.contains(&hex("null")));
    assert!(!content.contains(&hex("NULL")));
    assert!(!content.contains(&hex("undefined")));
    assert!(!content.contains(&hex("not-a-date")));
}

#[test]
fn test_same_record_renders_identical_bytes() {
    let record = birth_record();
    let first = generate_document("birth", &record).expect("first render");
    let second = generate_document("birth", &record).expect("second render");
    assert_eq!(first, second);
}
