//! Generate one sample certificate per act type
//! Run with: cargo run --example generate_acts
//!
//! Output lands in target/demo/. Drop a logo under assets/ and an Arabic
//! font under assets/fonts/ to see the optional header and bilingual
//! features kick in.

use composer::{generate_document, suggested_filename, ActRecord, ActType};
use serde_json::json;
use std::fs;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all("target/demo")?;

    let samples = [
        (
            "birth",
            json!({
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
            }),
        ),
        (
            "marriage",
            json!({
                "actNumber": "0117/2020",
                "registrationDate": "2020-08-22",
                "registryOffice": "Sarh",
                "details": {
                    "nomEpoux": "ABDELKERIM",
                    "prenomEpoux": "MOUSSA",
                    "dateNaissanceEpoux": "1990-03-12",
                    "lieuNaissanceEpoux": "Abéché",
                    "professionEpoux": "Mécanicien",
                    "nomEpouse": "DJIMET",
                    "prenomEpouse": "AMINA",
                    "dateNaissanceEpouse": "1994-05-14",
                    "lieuNaissanceEpouse": "Sarh",
                    "professionEpouse": "Couturière",
                    "dateMariage": "2020-08-20",
                    "lieuMariage": "Sarh",
                    "regimeMatrimonial": "Monogamie"
                }
            }),
        ),
        (
            "death",
            json!({
                "actNumber": "0009/2020",
                "registrationDate": "2020-11-10",
                "registryOffice": "Moundou",
                "details": {
                    "nomDefunt": "OUMAR",
                    "prenomDefunt": "IDRISS",
                    "dateNaissance": "1951-07-01",
                    "dateDeces": "2020-11-02",
                    "lieuDeces": "Moundou",
                    "nomDeclarant": "FATIME OUMAR",
                    "qualiteDeclarant": "Fille du défunt"
                }
            }),
        ),
        (
            "divorce",
            json!({
                "actNumber": "0031/2019",
                "registrationDate": "2019-07-01",
                "registryOffice": "N'Djamena 3e",
                "details": {
                    "nomEpoux": "ABDELKERIM MOUSSA",
                    "nomEpouse": "AMINA DJIMET",
                    "dateMariage": "2012-02-18",
                    "dateDivorce": "2019-06-30",
                    "tribunal": "Tribunal de grande instance de N'Djamena",
                    "enfants": [
                        { "prenom": "ALI", "nom": "MOUSSA", "dateNaissance": "2013-01-05" },
                        { "prenom": "HAWA", "nom": "MOUSSA", "dateNaissance": "2016-09-17" }
                    ]
                }
            }),
        ),
        (
            "cohabitation",
            json!({
                "actNumber": "0005/2022",
                "registrationDate": "2022-01-15",
                "registryOffice": "Abéché",
                "details": {
                    "nomConcubin": "SALEH",
                    "prenomConcubin": "BRAHIM",
                    "dateNaissanceConcubin": "1988-11-23",
                    "professionConcubin": "Chauffeur",
                    "nomConcubine": "HASSANE",
                    "prenomConcubine": "ZARA",
                    "dateNaissanceConcubine": "1992-04-02",
                    "professionConcubine": "Commerçante",
                    "dateEngagement": "2022-01-10",
                    "lieuEngagement": "Abéché",
                    "duree": "Trois ans"
                }
            }),
        ),
    ];

    for (act_type, value) in samples {
        let record: ActRecord = serde_json::from_value(value)?;
        let bytes = generate_document(act_type, &record)?;
        let parsed = ActType::parse(act_type).ok_or("sample act type should parse")?;
        let filename = suggested_filename(parsed, &record);
        let path = format!("target/demo/{filename}");
        fs::write(&path, &bytes)?;
        println!("{act_type}: {} bytes -> {path}", bytes.len());
    }

    Ok(())
}
