//! ICD-10 diagnosis reference data
//!
//! A compact set of codes common in South African primary and hospital
//! care, each carrying a reporting category and a chronic/acute
//! classification. Also holds the diagnosis-to-treatment links that
//! drive medication order generation.

/// One ICD-10 catalogue entry
#[derive(Debug, Clone, Copy)]
pub struct DiagnosisEntry {
    pub icd10_code: &'static str,
    pub description: &'static str,
    pub category_code: &'static str,
    pub category_name: &'static str,
    /// "Chronic" or "Acute"
    pub condition_type: &'static str,
}

const fn diag(
    icd10_code: &'static str,
    description: &'static str,
    category_code: &'static str,
    category_name: &'static str,
    condition_type: &'static str,
) -> DiagnosisEntry {
    DiagnosisEntry {
        icd10_code,
        description,
        category_code,
        category_name,
        condition_type,
    }
}

/// ICD-10 codes with category and condition type, unique by code
pub const DIAGNOSES: &[DiagnosisEntry] = &[
    diag("J06.9", "Acute upper respiratory infection", "RESP", "Respiratory", "Acute"),
    diag("I10", "Essential hypertension", "CARD", "Cardiovascular", "Chronic"),
    diag("E11.9", "Type 2 diabetes mellitus", "ENDO", "Endocrine", "Chronic"),
    diag("J45.9", "Asthma", "RESP", "Respiratory", "Chronic"),
    diag("K21.0", "Gastroesophageal reflux disease", "GAST", "Gastrointestinal", "Chronic"),
    diag("M79.3", "Panniculitis", "MUSC", "Musculoskeletal", "Acute"),
    diag("R50.9", "Fever, unspecified", "SYMP", "Symptom", "Acute"),
    diag("A09", "Diarrhea and gastroenteritis", "GAST", "Gastrointestinal", "Acute"),
    diag("L02.9", "Cutaneous abscess", "DERM", "Dermatology", "Acute"),
    diag("N39.0", "Urinary tract infection", "UROL", "Urology", "Acute"),
    diag("B20", "HIV disease", "INFEC", "Infectious Disease", "Chronic"),
    diag("A15.0", "Pulmonary tuberculosis", "INFEC", "Infectious Disease", "Chronic"),
    diag("O80", "Normal delivery", "OBGY", "Obstetrics/Gynecology", "Acute"),
    diag("Z23", "Encounter for immunization", "PREV", "Preventive", "Acute"),
    diag("T78.4", "Allergy, unspecified", "IMMUN", "Immunology", "Acute"),
    diag("F32.9", "Depressive episode", "PSYCH", "Psychiatry", "Chronic"),
    diag("G43.9", "Migraine", "NEURO", "Neurology", "Chronic"),
    diag("M54.5", "Low back pain", "MUSC", "Musculoskeletal", "Chronic"),
    diag("E78.5", "Hyperlipidemia", "ENDO", "Endocrine", "Chronic"),
    diag("R05", "Cough", "RESP", "Respiratory", "Acute"),
    diag("J20.9", "Acute bronchitis", "RESP", "Respiratory", "Acute"),
    diag("K21.9", "Gastroesophageal reflux disease", "GAST", "Gastrointestinal", "Chronic"),
    diag("B34.9", "Viral infection", "INFEC", "Infectious Disease", "Acute"),
];

/// Reporting categories used across the diagnosis catalogue
pub const CATEGORIES: &[(&str, &str)] = &[
    ("RESP", "Respiratory"),
    ("CARD", "Cardiovascular"),
    ("ENDO", "Endocrine"),
    ("GAST", "Gastrointestinal"),
    ("MUSC", "Musculoskeletal"),
    ("SYMP", "Symptom"),
    ("DERM", "Dermatology"),
    ("UROL", "Urology"),
    ("INFEC", "Infectious Disease"),
    ("OBGY", "Obstetrics/Gynecology"),
    ("PREV", "Preventive"),
    ("IMMUN", "Immunology"),
    ("PSYCH", "Psychiatry"),
    ("NEURO", "Neurology"),
];

/// Treatment candidates per diagnosis, as 1-based formulary positions.
/// Positions outside the generated formulary are skipped at order time.
pub const TREATMENT_CANDIDATES: &[(&str, &[u32])] = &[
    ("I10", &[1, 5, 6]),
    ("E11.9", &[4, 5]),
    ("J45.9", &[7]),
    ("J06.9", &[1, 2]),
    ("A09", &[1]),
    ("N39.0", &[2]),
    ("B20", &[29]),
    ("A15.0", &[13, 14, 15, 16]),
    ("M54.5", &[1, 3]),
    ("F32.9", &[27]),
    ("G43.9", &[1]),
    ("K21.0", &[12]),
    ("R50.9", &[1]),
    ("L02.9", &[2]),
    ("O80", &[1]),
    ("Z23", &[1]),
    ("T78.4", &[1]),
    ("E78.5", &[9]),
    ("R05", &[1]),
    ("J20.9", &[1, 2]),
    ("K21.9", &[12]),
    ("B34.9", &[1]),
];

/// High-burden chronic codes that almost always leave with a script
pub const HIGH_ORDER_CODES: &[&str] = &["I10", "E11.9", "J45.9", "B20", "A15.0", "F32.9"];

/// Common acute codes with a moderate prescribing rate
pub const MODERATE_ORDER_CODES: &[&str] = &["J06.9", "A09", "N39.0", "J20.9"];

/// Programme codes (HIV, TB) that generate multi-drug regimens
pub const MULTI_DRUG_CODES: &[&str] = &["B20", "A15.0"];

/// Looks up a diagnosis entry by ICD-10 code
pub fn diagnosis_by_code(code: &str) -> Option<&'static DiagnosisEntry> {
    DIAGNOSES.iter().find(|d| d.icd10_code == code)
}

/// Treatment candidates (1-based formulary positions) for a code
pub fn treatment_candidates(code: &str) -> Option<&'static [u32]> {
    TREATMENT_CANDIDATES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, seqs)| *seqs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_unique() {
        let codes: HashSet<&str> = DIAGNOSES.iter().map(|d| d.icd10_code).collect();
        assert_eq!(codes.len(), DIAGNOSES.len());
        assert_eq!(DIAGNOSES.len(), 23);
    }

    #[test]
    fn test_categories_cover_catalogue() {
        let known: HashSet<&str> = CATEGORIES.iter().map(|(code, _)| *code).collect();
        for entry in DIAGNOSES {
            assert!(known.contains(entry.category_code), "{}", entry.icd10_code);
        }
        assert_eq!(CATEGORIES.len(), 14);
    }

    #[test]
    fn test_condition_type_values() {
        for entry in DIAGNOSES {
            assert!(
                entry.condition_type == "Chronic" || entry.condition_type == "Acute",
                "{}",
                entry.icd10_code
            );
        }
    }

    #[test]
    fn test_treatment_candidates_resolve() {
        for (code, seqs) in TREATMENT_CANDIDATES {
            assert!(diagnosis_by_code(code).is_some(), "{code}");
            assert!(!seqs.is_empty());
            for seq in *seqs {
                assert!(*seq >= 1 && *seq <= 31, "{code} -> {seq}");
            }
        }
    }

    #[test]
    fn test_order_probability_sets_are_known_codes() {
        for code in HIGH_ORDER_CODES.iter().chain(MODERATE_ORDER_CODES) {
            assert!(diagnosis_by_code(code).is_some(), "{code}");
        }
        for code in MULTI_DRUG_CODES {
            assert!(HIGH_ORDER_CODES.contains(code));
        }
    }

    #[test]
    fn test_lookup_by_code() {
        let hiv = diagnosis_by_code("B20").unwrap();
        assert_eq!(hiv.category_code, "INFEC");
        assert_eq!(hiv.condition_type, "Chronic");
        assert!(diagnosis_by_code("X99").is_none());
        assert_eq!(treatment_candidates("A15.0"), Some(&[13, 14, 15, 16][..]));
        assert!(treatment_candidates("M79.3").is_none());
    }
}
