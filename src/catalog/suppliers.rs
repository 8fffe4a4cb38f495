//! Pharmaceutical supplier registry
//!
//! Fifteen suppliers active in the South African market, mixing local
//! manufacturers, multinationals and state supply channels. The list
//! is fixed, so supplier rows are identical across runs and seeds.

/// One registered supplier
#[derive(Debug, Clone, Copy)]
pub struct SupplierEntry {
    pub name: &'static str,
    pub country: &'static str,
    /// "Public" or "Private"
    pub ownership: &'static str,
    /// "Small", "Medium" or "Large"
    pub size: &'static str,
}

const fn supplier(
    name: &'static str,
    country: &'static str,
    ownership: &'static str,
    size: &'static str,
) -> SupplierEntry {
    SupplierEntry {
        name,
        country,
        ownership,
        size,
    }
}

/// The registry, in stable sequence order (position 1 is Aspen Pharmacare)
pub const SUPPLIERS: &[SupplierEntry] = &[
    supplier("Aspen Pharmacare", "South Africa", "Private", "Large"),
    supplier("Adcock Ingram", "South Africa", "Private", "Large"),
    supplier("Sandoz", "International", "Private", "Large"),
    supplier("Pfizer", "International", "Private", "Large"),
    supplier("Novartis", "International", "Private", "Large"),
    supplier("GSK", "International", "Private", "Large"),
    supplier("Sanofi", "International", "Private", "Large"),
    supplier("Roche", "International", "Private", "Large"),
    supplier("Merck", "International", "Private", "Large"),
    supplier("Johnson & Johnson", "International", "Private", "Large"),
    supplier("Government Medical Supply", "South Africa", "Public", "Large"),
    supplier("Medicines Control Council", "South Africa", "Public", "Medium"),
    supplier("Local Distributor A", "South Africa", "Private", "Small"),
    supplier("Local Distributor B", "South Africa", "Private", "Small"),
    supplier("Regional Supplier", "South Africa", "Private", "Medium"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_size_and_uniqueness() {
        assert_eq!(SUPPLIERS.len(), 15);
        let names: HashSet<&str> = SUPPLIERS.iter().map(|s| s.name).collect();
        assert_eq!(names.len(), SUPPLIERS.len());
    }

    #[test]
    fn test_enumerated_values() {
        for entry in SUPPLIERS {
            assert!(entry.ownership == "Public" || entry.ownership == "Private");
            assert!(matches!(entry.size, "Small" | "Medium" | "Large"));
            assert!(entry.country == "South Africa" || entry.country == "International");
        }
    }

    #[test]
    fn test_public_channels_present() {
        let public: Vec<&str> = SUPPLIERS
            .iter()
            .filter(|s| s.ownership == "Public")
            .map(|s| s.name)
            .collect();
        assert_eq!(
            public,
            vec!["Government Medical Supply", "Medicines Control Council"]
        );
    }
}
