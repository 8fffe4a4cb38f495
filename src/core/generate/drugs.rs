//! Drug dimension generator
//!
//! The first positions come straight from the curated formulary, so
//! small runs share identical drug rows regardless of seed. Requests
//! larger than the catalogue are padded with synthesized generics.

use chrono::{DateTime, Utc};
use rand::Rng;

use super::{pick, round2, GenerationParams};
use crate::catalog::drugs::FORMULARY;
use crate::catalog::suppliers::SUPPLIERS;
use crate::core::rng;
use crate::domain::{DrugId, DrugRow, Result, SupplierId};

const SYNTH_FORMS: &[&str] = &["tablet", "capsule", "syrup", "vial"];
const SYNTH_STRENGTHS_MG: &[u32] = &[50, 100, 200, 500];
const SYNTH_PACK_SIZES: &[i64] = &[10, 14, 20, 28, 30, 100];
const ATC_SUFFIX_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generates the drug dimension
pub fn generate(params: &GenerationParams, load_ts: DateTime<Utc>) -> Result<Vec<DrugRow>> {
    let mut stream = rng::stream(params.seed, "drugs");

    let mut rows = Vec::with_capacity(params.drugs);
    for seq in 1..=params.drugs {
        let row = if let Some(entry) = FORMULARY.get(seq - 1) {
            DrugRow {
                drug_id: DrugId::from_seq(seq as u32),
                atc_code: entry.atc_code.to_string(),
                generic_name: entry.name.to_string(),
                strength: entry.strength.to_string(),
                form: entry.dosage_form,
                pack_size: entry.pack_size,
                cold_chain_required: entry.cold_chain,
                is_essential_list: entry.essential,
                unit_cost_zar: entry.unit_cost_zar,
                supplier_id: random_supplier(&mut stream),
                load_ts,
            }
        } else {
            synthesize(seq, &mut stream, load_ts)?
        };
        rows.push(row);
    }

    Ok(rows)
}

/// Pads the formulary past the curated list with a generic entry
fn synthesize(
    seq: usize,
    stream: &mut rand::rngs::StdRng,
    load_ts: DateTime<Utc>,
) -> Result<DrugRow> {
    let suffix: String = (0..3)
        .map(|_| ATC_SUFFIX_CHARSET[stream.gen_range(0..ATC_SUFFIX_CHARSET.len())] as char)
        .collect();
    let strength_mg = *pick(stream, SYNTH_STRENGTHS_MG, "strength")?;

    Ok(DrugRow {
        drug_id: DrugId::from_seq(seq as u32),
        atc_code: format!("Z99{suffix}"),
        generic_name: format!("Generic Drug {seq}"),
        strength: format!("{strength_mg} mg"),
        form: *pick(stream, SYNTH_FORMS, "form")?,
        pack_size: *pick(stream, SYNTH_PACK_SIZES, "pack size")?,
        cold_chain_required: false,
        is_essential_list: stream.gen_bool(0.7),
        unit_cost_zar: round2(stream.gen_range(10.0..200.0)),
        supplier_id: random_supplier(stream),
        load_ts,
    })
}

fn random_supplier(stream: &mut rand::rngs::StdRng) -> SupplierId {
    SupplierId::from_seq(stream.gen_range(1..=SUPPLIERS.len() as u32))
}
