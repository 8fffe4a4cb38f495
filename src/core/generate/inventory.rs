//! Inventory snapshot generator
//!
//! The one stateful component: days must be processed in chronological
//! order because each (facility, drug) pair's closing stock becomes the
//! next day's opening stock. The rollforward is a fold over the day
//! sequence carrying the stock map; pairs are independent of each other
//! within a day.

use chrono::{DateTime, NaiveDate, Utc};
use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::{Normal, Poisson};
use std::collections::HashMap;

use super::{round2, GenerationParams};
use crate::core::rng;
use crate::domain::errors::KarooError;
use crate::domain::{DispenseRow, DrugId, DrugRow, FacilityId, FacilityRow, InventoryRow, Result};

/// Mean receipts and issues per pair-day
const RECEIPTS_MEAN: f64 = 5.0;
const ISSUES_MEAN: f64 = 3.0;

/// Standard deviation of the stock-take adjustment
const ADJUSTMENT_SD: f64 = 2.0;

/// Closing stock below this triggers a replenishment order
const REORDER_POINT: i64 = 200;

type PairKey = (FacilityId, DrugId);

/// Running stock per (facility, drug) pair, carried day to day
struct StockState {
    levels: HashMap<PairKey, i64>,
}

impl StockState {
    /// Seeds every pair with a uniform opening level in [500, 2000)
    fn initial(
        facilities: &[FacilityRow],
        drugs: &[DrugRow],
        stream: &mut StdRng,
    ) -> Self {
        let mut levels = HashMap::with_capacity(facilities.len() * drugs.len());
        for facility in facilities {
            for drug in drugs {
                levels.insert(
                    (facility.facility_id.clone(), drug.drug_id.clone()),
                    stream.gen_range(500..2000),
                );
            }
        }
        Self { levels }
    }
}

/// Generates daily inventory snapshots for every facility-drug pair
pub fn generate(
    params: &GenerationParams,
    facilities: &[FacilityRow],
    drugs: &[DrugRow],
    dispenses: &[DispenseRow],
    load_ts: DateTime<Utc>,
) -> Result<Vec<InventoryRow>> {
    let mut stream = rng::stream(params.seed, "inventory");

    let receipts = Poisson::new(RECEIPTS_MEAN)
        .map_err(|e| KarooError::Generation(format!("receipts distribution: {e}")))?;
    let issues = Poisson::new(ISSUES_MEAN)
        .map_err(|e| KarooError::Generation(format!("issues distribution: {e}")))?;
    let adjustments = Normal::new(0.0, ADJUSTMENT_SD)
        .map_err(|e| KarooError::Generation(format!("adjustments distribution: {e}")))?;

    let dispensed_by_pair_day = aggregate_dispenses(dispenses);
    let mut state = StockState::initial(facilities, drugs, &mut stream);

    let days = params.days();
    let mut rows = Vec::with_capacity(days.len() * facilities.len() * drugs.len());

    for day in days {
        for facility in facilities {
            for drug in drugs {
                let key = (facility.facility_id.clone(), drug.drug_id.clone());
                let opening = state.levels[&key];

                let received = receipts.sample(&mut stream) as i64;
                let issued = issues.sample(&mut stream) as i64;
                let adjusted = adjustments.sample(&mut stream).round() as i64;
                let dispensed = dispensed_by_pair_day
                    .get(&(key.0.clone(), key.1.clone(), day))
                    .copied()
                    .unwrap_or(0);

                // Physical stock cannot go negative; the clamp loses the shortfall
                let closing = (opening + received - issued - dispensed + adjusted).max(0);
                let stockout = closing == 0;

                let daily_use = dispensed.max(1);
                let days_of_cover = round2(closing as f64 / daily_use as f64);

                let on_order_units = if closing < REORDER_POINT {
                    stream.gen_range(0..500)
                } else {
                    0
                };
                let backorder_units = if stockout { stream.gen_range(0..200) } else { 0 };

                rows.push(InventoryRow {
                    facility_id: facility.facility_id.clone(),
                    drug_id: drug.drug_id.clone(),
                    dt: day,
                    opening_stock_units: opening,
                    receipts_units: received,
                    issues_units: issued,
                    dispensed_units: dispensed,
                    adjustments_units: adjusted,
                    closing_stock_units: closing,
                    stockout_flag: stockout,
                    days_of_cover,
                    on_order_units,
                    backorder_units,
                    created_at: load_ts,
                });

                state.levels.insert(key, closing);
            }
        }
    }

    Ok(rows)
}

/// Sums dispensed units per (facility, drug, day)
fn aggregate_dispenses(
    dispenses: &[DispenseRow],
) -> HashMap<(FacilityId, DrugId, NaiveDate), i64> {
    let mut totals: HashMap<(FacilityId, DrugId, NaiveDate), i64> = HashMap::new();
    for dispense in dispenses {
        let key = (
            dispense.facility_id.clone(),
            dispense.drug_id.clone(),
            dispense.dispense_time.date_naive(),
        );
        *totals.entry(key).or_insert(0) += dispense.quantity_units;
    }
    totals
}
