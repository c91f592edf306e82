//! French to Arabic translation tables
//!
//! The tables cover the fixed vocabulary printed on civil registry documents.
//! Labels that are not listed here simply render in French only, so adding a
//! new document section never breaks rendering.

/// Field labels as printed in the left column of a record table
const FIELD_LABELS: &[(&str, &str)] = &[
    ("Nom", "اللقب"),
    ("Prénom(s)", "الاسم"),
    ("Sexe", "الجنس"),
    ("Date de naissance", "تاريخ الميلاد"),
    ("Heure de naissance", "ساعة الميلاد"),
    ("Lieu de naissance", "مكان الميلاد"),
    ("Nom du père", "اسم الأب"),
    ("Profession du père", "مهنة الأب"),
    ("Nom de la mère", "اسم الأم"),
    ("Profession de la mère", "مهنة الأم"),
    ("Profession", "المهنة"),
    ("Date du mariage", "تاريخ الزواج"),
    ("Lieu du mariage", "مكان الزواج"),
    ("Régime matrimonial", "نظام الزواج"),
    ("Date du décès", "تاريخ الوفاة"),
    ("Lieu du décès", "مكان الوفاة"),
    ("Nom du déclarant", "اسم المصرح"),
    ("Qualité", "الصفة"),
    ("Nom de l'époux", "اسم الزوج"),
    ("Nom de l'épouse", "اسم الزوجة"),
    ("Date du divorce", "تاريخ الطلاق"),
    ("Tribunal", "المحكمة"),
    ("Date de l'engagement", "تاريخ التعهد"),
    ("Lieu de l'engagement", "مكان التعهد"),
    ("Durée déclarée", "المدة المصرح بها"),
];

/// Section headings
const SECTION_TITLES: &[(&str, &str)] = &[
    ("Informations sur l'enfant", "معلومات الطفل"),
    ("Informations sur les parents", "معلومات الوالدين"),
    ("Informations sur l'époux", "معلومات الزوج"),
    ("Informations sur l'épouse", "معلومات الزوجة"),
    ("Informations sur le mariage", "معلومات الزواج"),
    ("Informations sur le défunt", "معلومات المتوفى"),
    ("Informations sur le déclarant", "معلومات المصرح"),
    ("Informations sur les époux", "معلومات الزوجين"),
    ("Informations sur les enfants", "معلومات الأطفال"),
    ("Informations sur le concubin", "معلومات الشريك"),
    ("Informations sur la concubine", "معلومات الشريكة"),
    ("Informations sur l'engagement", "معلومات التعهد"),
    ("Déclaration", "تصريح"),
];

/// Document titles
const DOCUMENT_TITLES: &[(&str, &str)] = &[
    ("ACTE DE NAISSANCE", "عقد ميلاد"),
    ("ACTE DE MARIAGE", "عقد زواج"),
    ("ACTE DE DÉCÈS", "عقد وفاة"),
    ("ACTE DE DIVORCE", "عقد طلاق"),
    ("CERTIFICAT DE CONCUBINAGE", "شهادة معاشرة"),
];

fn lookup(table: &'static [(&str, &str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(french, _)| *french == key)
        .map(|(_, arabic)| *arabic)
}

/// Arabic companion for a field label, if one is registered
pub fn translate_label(label: &str) -> Option<&'static str> {
    lookup(FIELD_LABELS, label)
}

/// Arabic companion for a section heading, if one is registered
pub fn translate_section_title(title: &str) -> Option<&'static str> {
    lookup(SECTION_TITLES, title)
}

/// Arabic companion for a document title, if one is registered
pub fn translate_document_title(title: &str) -> Option<&'static str> {
    lookup(DOCUMENT_TITLES, title)
}
