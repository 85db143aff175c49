//! Pure fraud aggregations over a loaded [`Dataset`].
//!
//! Every ranking breaks ties by first appearance in file order.

use chrono::NaiveDateTime;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::HashMap;
use std::hash::Hash;

use crate::models::{AgeGroup, AgeGroupCount, CategoryCount, Dataset, MerchantLocation, StateCount};
use crate::types::{Count, Window};

const RATIO_DECIMAL_PLACES: u32 = 2;

/// Number of fraud records stamped inside `window`.
pub fn recent_fraud_count(dataset: &Dataset, now: NaiveDateTime, window: Window) -> Count {
    dataset.fraud_records()
        .filter(|record| window.contains(now, record.local_timestamp))
        .count() as Count
}

/// Percentage of records inside `window` that are fraud, rounded to two decimals.
///
/// An empty window yields `0.0`.
pub fn recent_fraud_ratio(dataset: &Dataset, now: NaiveDateTime, window: Window) -> f64 {
    let (total, frauds) = dataset.records()
        .filter(|record| window.contains(now, record.local_timestamp))
        .fold((0u64, 0u64), |(total, frauds), record| (total + 1, frauds + record.is_fraud() as u64));

    if total == 0 {
        return 0.0;
    }

    (Decimal::from(frauds) * Decimal::ONE_HUNDRED / Decimal::from(total))
        .round_dp_with_strategy(RATIO_DECIMAL_PLACES, RoundingStrategy::MidpointNearestEven)
        .to_f64()
        .unwrap_or(0.0)
}

pub fn top_fraud_categories(dataset: &Dataset, n: usize) -> Vec<CategoryCount> {
    let categories = dataset.fraud_records().filter_map(|record| record.category.clone());

    rank_by_frequency(categories, n).into_iter()
        .map(|(category, count)| CategoryCount { category, count })
        .collect()
}

/// Fraud records per age bucket, always all five buckets in label order.
pub fn age_distribution(dataset: &Dataset) -> Vec<AgeGroupCount> {
    let mut counts = [0 as Count; AgeGroup::ALL.len()];

    for group in dataset.fraud_records().filter_map(|record| record.age.and_then(AgeGroup::classify)) {
        if let Some(index) = AgeGroup::ALL.iter().position(|candidate| *candidate == group) {
            counts[index] += 1;
        }
    }

    AgeGroup::ALL.into_iter()
        .zip(counts)
        .map(|(age_group, count)| AgeGroupCount { age_group, count })
        .collect()
}

/// Fraud hot spots grouped by merchant name and exact coordinates.
pub fn top_merchant_locations(dataset: &Dataset, n: usize) -> Vec<MerchantLocation> {
    let locations = dataset.fraud_records().filter_map(|record| {
        let merchant = record.merchant.clone()?;
        let (latitude, longitude) = record.merchant_coordinates()?;

        Some(LocationKey::new(merchant, latitude, longitude))
    });

    rank_by_frequency(locations, n).into_iter()
        .map(|(location, count)| MerchantLocation {
            merchant: location.merchant,
            count,
            merch_lat: f64::from_bits(location.latitude),
            merch_long: f64::from_bits(location.longitude)
        })
        .collect()
}

pub fn top_fraud_states(dataset: &Dataset, n: usize) -> Vec<StateCount> {
    let states = dataset.fraud_records().filter_map(|record| record.state.clone());

    rank_by_frequency(states, n).into_iter()
        .map(|(state, count)| StateCount { state, count })
        .collect()
}

/// Counts `keys` and returns the `n` most frequent, descending, ties in first-seen order.
fn rank_by_frequency<K: Hash + Eq>(keys: impl Iterator<Item = K>, n: usize) -> Vec<(K, Count)> {
    let mut positions: HashMap<K, usize> = HashMap::new();
    let mut counts: Vec<Count> = Vec::new();

    for key in keys {
        let position = *positions.entry(key).or_insert_with(|| {
            counts.push(0);
            counts.len() - 1
        });

        counts[position] += 1;
    }

    let mut ranked: Vec<(K, Count, usize)> = positions.into_iter()
        .map(|(key, position)| (key, counts[position], position))
        .collect();

    ranked.sort_by(|left, right| right.1.cmp(&left.1).then(left.2.cmp(&right.2)));
    ranked.truncate(n);

    ranked.into_iter().map(|(key, count, _)| (key, count)).collect()
}

/// Coordinates are compared bit-for-bit; `-0.0` is folded into `0.0`.
#[derive(Debug, Eq, PartialEq, Hash)]
struct LocationKey {
    merchant: String,
    latitude: u64,
    longitude: u64
}

impl LocationKey {
    fn new(merchant: String, latitude: f64, longitude: f64) -> Self {
        Self {
            merchant,
            latitude: (latitude + 0.0).to_bits(),
            longitude: (longitude + 0.0).to_bits()
        }
    }
}
