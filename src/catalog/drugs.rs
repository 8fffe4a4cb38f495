//! Curated drug formulary
//!
//! A fixed list of products common in South African public healthcare,
//! with ATC codes, pack sizes and unit costs in Rand. Formulary
//! positions are 1-based and stable, so diagnosis-to-drug links in
//! [`super::diagnoses`] can refer to them by sequence number.

/// One formulary product
#[derive(Debug, Clone, Copy)]
pub struct DrugEntry {
    pub name: &'static str,
    pub atc_code: &'static str,
    pub strength: &'static str,
    pub dosage_form: &'static str,
    pub pack_size: i64,
    /// Requires an unbroken cold chain from depot to dispensary
    pub cold_chain: bool,
    /// On the national essential medicines list
    pub essential: bool,
    /// ZAR; zero for state-funded programmes (ARV, TB)
    pub unit_cost_zar: f64,
}

const fn drug(
    name: &'static str,
    atc_code: &'static str,
    strength: &'static str,
    dosage_form: &'static str,
    pack_size: i64,
    cold_chain: bool,
    essential: bool,
    unit_cost_zar: f64,
) -> DrugEntry {
    DrugEntry {
        name,
        atc_code,
        strength,
        dosage_form,
        pack_size,
        cold_chain,
        essential,
        unit_cost_zar,
    }
}

/// The formulary, in stable sequence order (position 1 is Paracetamol)
pub const FORMULARY: &[DrugEntry] = &[
    drug("Paracetamol", "N02BE01", "500 mg", "tablet", 20, false, true, 15.50),
    drug("Amoxicillin", "J01CA04", "250 mg", "capsule", 20, false, true, 45.20),
    drug("Ibuprofen", "M01AE01", "400 mg", "tablet", 20, false, true, 25.80),
    drug("Insulin Glargine", "A10AB01", "100 IU/mL", "vial", 1, true, true, 285.90),
    drug("Metformin", "A10BA02", "500 mg", "tablet", 30, false, true, 18.75),
    drug("Atenolol", "C07AB03", "50 mg", "tablet", 30, false, true, 22.40),
    drug("Salbutamol", "R03AC02", "100 mcg", "inhaler", 1, false, true, 89.50),
    drug("Fluconazole", "J02AC01", "150 mg", "tablet", 1, false, true, 35.60),
    drug("Simvastatin", "C10AA01", "20 mg", "tablet", 30, false, true, 28.90),
    drug("Furosemide", "C03CA01", "40 mg", "tablet", 28, false, true, 12.30),
    drug("Prednisone", "H02AB07", "10 mg", "tablet", 30, false, true, 19.80),
    drug("Omeprazole", "A02BC01", "20 mg", "capsule", 28, false, true, 32.40),
    drug("Rifampicin", "J04AB02", "300 mg", "capsule", 30, false, true, 45.70),
    drug("Ethambutol", "J04AK02", "400 mg", "tablet", 28, false, true, 38.20),
    drug("Pyrazinamide", "J04AK01", "500 mg", "tablet", 28, false, true, 42.10),
    drug("Isoniazid", "J04AC01", "300 mg", "tablet", 28, false, true, 15.90),
    drug("Ceftriaxone", "J01DD04", "1 g", "vial", 1, false, true, 125.80),
    drug("Azithromycin", "J01FA10", "500 mg", "tablet", 3, false, true, 55.40),
    drug("Aspirin", "B01AC06", "81 mg", "tablet", 30, false, true, 8.90),
    drug("Enalapril", "C09AA02", "10 mg", "tablet", 28, false, true, 24.60),
    drug("Losartan", "C09CA01", "50 mg", "tablet", 30, false, true, 35.20),
    drug("Diclofenac", "M01AB05", "50 mg", "tablet", 30, false, true, 18.40),
    drug("Ciprofloxacin", "J01MA02", "500 mg", "tablet", 10, false, true, 42.80),
    drug("Doxycycline", "J01AA02", "100 mg", "capsule", 14, false, true, 28.50),
    drug("Levothyroxine", "H03AA01", "100 mcg", "tablet", 30, false, true, 22.70),
    drug("Haloperidol", "N05AD01", "5 mg", "tablet", 30, false, true, 38.90),
    drug("Fluoxetine", "N06AB03", "20 mg", "capsule", 30, false, true, 45.60),
    drug("Carbamazepine", "N03AF01", "200 mg", "tablet", 30, false, true, 52.30),
    drug("Valproate", "N03AG01", "500 mg", "tablet", 30, false, true, 48.70),
    drug("ARV Combination", "J05AR06", "Various", "tablet", 30, false, true, 0.00),
    drug("TB Treatment Pack", "J04AK99", "Various", "pack", 30, false, true, 0.00),
];
