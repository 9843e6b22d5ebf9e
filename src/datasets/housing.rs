//! Housing price sample
//!
//! Census-style block records: average rooms per household, median income,
//! house age and occupancy, with the median house value (in $100k) as
//! target. Generated from a fixed seed so every load is identical.

use polars::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::Dataset;
use crate::error::Result;

pub const DATASET_NAME: &str = "Housing prices (census block sample)";
pub const N_RECORDS: usize = 500;
pub const TARGET_COLUMN: &str = "med_house_val";

const SEED: u64 = 1990;

/// Display metadata for the feature columns, in frame order.
pub const FEATURE_LABELS: [(&str, &str); 4] = [
    ("Average rooms", "rooms"),
    ("Median income", "$10k"),
    ("House age", "years"),
    ("Average occupancy", "people"),
];

pub const TARGET_LABEL: &str = "House price";

/// Build the housing frame.
pub fn frame() -> Result<DataFrame> {
    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let n = N_RECORDS;

    let ave_rooms: Vec<f64> = (0..n).map(|_| rng.gen_range(3.5..8.5)).collect();

    // Income tracks dwelling size loosely
    let med_inc: Vec<f64> = ave_rooms
        .iter()
        .map(|rooms| 1.0 + 0.55 * rooms + rng.gen_range(-1.0..1.0))
        .collect();

    let house_age: Vec<f64> = (0..n).map(|_| rng.gen_range(5.0..52.0_f64).round()).collect();
    let ave_occup: Vec<f64> = (0..n).map(|_| rng.gen_range(1.8..4.2)).collect();

    let value: Vec<f64> = (0..n)
        .map(|i| {
            let base = 0.22 * med_inc[i] + 0.18 * ave_rooms[i] - 0.4;
            (base + rng.gen_range(-0.35..0.35)).clamp(0.15, 5.0)
        })
        .collect();

    Ok(DataFrame::new(vec![
        Series::new("ave_rooms".into(), ave_rooms).into(),
        Series::new("med_inc".into(), med_inc).into(),
        Series::new("house_age".into(), house_age).into(),
        Series::new("ave_occup".into(), ave_occup).into(),
        Series::new(TARGET_COLUMN.into(), value).into(),
    ])?)
}

/// Load the housing sample as a regression dataset.
pub fn load() -> Result<Dataset> {
    let df = frame()?;
    Dataset::from_frame(DATASET_NAME, &df, TARGET_COLUMN, Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_shape() {
        let df = frame().unwrap();
        assert_eq!(df.height(), N_RECORDS);
        assert_eq!(df.width(), FEATURE_LABELS.len() + 1);
    }

    #[test]
    fn test_load_is_deterministic() {
        let a = load().unwrap();
        let b = load().unwrap();
        assert_eq!(a.features, b.features);
        assert_eq!(a.target, b.target);
    }

    #[test]
    fn test_value_ranges() {
        let ds = load().unwrap();
        assert!(ds.target.iter().all(|v| (0.15..=5.0).contains(v)));
        assert!(ds.features.column(0).iter().all(|v| (3.5..8.5).contains(v)));
    }
}
