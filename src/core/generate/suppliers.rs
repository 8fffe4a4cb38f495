//! Supplier dimension generator
//!
//! The registry is a fixed catalogue, so every run emits the same
//! fifteen suppliers in the same order; only the contact phone digits
//! come from the random stream.

use chrono::{DateTime, Utc};
use rand::Rng;

use super::GenerationParams;
use crate::catalog::suppliers::SUPPLIERS;
use crate::core::rng;
use crate::domain::{Result, SupplierId, SupplierRow};

/// Generates the supplier dimension
pub fn generate(params: &GenerationParams, load_ts: DateTime<Utc>) -> Result<Vec<SupplierRow>> {
    let mut stream = rng::stream(params.seed, "suppliers");

    let rows = SUPPLIERS
        .iter()
        .enumerate()
        .map(|(i, entry)| SupplierRow {
            supplier_id: SupplierId::from_seq(i as u32 + 1),
            supplier_name: entry.name,
            country: entry.country,
            supplier_type: entry.ownership,
            size_category: entry.size,
            contact_email: contact_email(entry.name),
            contact_phone: phone_number(&mut stream),
            is_active: true,
            load_ts,
        })
        .collect();

    Ok(rows)
}

/// Lowercased supplier name with non-alphanumerics dropped
fn contact_email(name: &str) -> String {
    let host: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    format!("contact@{host}.com")
}

/// Synthetic number in the national +27 format
fn phone_number(stream: &mut rand::rngs::StdRng) -> String {
    format!(
        "+27 {} {:03} {:04}",
        stream.gen_range(10..=87),
        stream.gen_range(0..1000),
        stream.gen_range(0..10000)
    )
}
