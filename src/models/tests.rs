use super::{AgeGroup, AgeGroupCount, Dataset, MerchantLocation, TransactionRecord};

use anyhow::Result;
use serde_json::json;

fn create_record(fraud_flag: i64) -> TransactionRecord {
    TransactionRecord {
        fraud_flag,
        ..TransactionRecord::default()
    }
}

#[test]
fn test_age_groups_are_left_inclusive_and_right_exclusive() {
    let test_cases = vec![
        (0, Some(AgeGroup::Under25)),
        (24, Some(AgeGroup::Under25)),
        (25, Some(AgeGroup::From25To34)),
        (34, Some(AgeGroup::From25To34)),
        (35, Some(AgeGroup::From35To44)),
        (45, Some(AgeGroup::From45To54)),
        (54, Some(AgeGroup::From45To54)),
        (55, Some(AgeGroup::From55)),
        (119, Some(AgeGroup::From55)),
        (120, None),
        (-1, None)
    ];

    for (age, expected) in test_cases {
        assert_eq!(AgeGroup::classify(age), expected, "age [{age}]");
    }
}

#[test]
fn test_age_group_labels_keep_fixed_order() {
    let labels: Vec<String> = AgeGroup::ALL.iter().map(|group| group.to_string()).collect();

    assert_eq!(labels, vec!["<25", "25-34", "35-44", "45-54", "55+"]);
}

#[test]
fn test_only_flag_value_one_counts_as_fraud() {
    assert!(create_record(1).is_fraud());
    assert!(!create_record(0).is_fraud());
    assert!(!create_record(2).is_fraud());
}

#[test]
fn test_merchant_coordinates_require_both_values() {
    let mut record = create_record(1);
    record.merch_lat = Some(40.7);

    assert_eq!(record.merchant_coordinates(), None);

    record.merch_long = Some(-74.0);

    assert_eq!(record.merchant_coordinates(), Some((40.7, -74.0)));
}

#[test]
fn test_dataset_filters_fraud_records_in_file_order() {
    let dataset: Dataset = vec![create_record(0), create_record(1), create_record(1)].into_iter().collect();

    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.fraud_records().count(), 2);
    assert!(Dataset::default().is_empty());
}

#[test]
fn test_results_serialize_with_dashboard_field_names() -> Result<()> {
    let age_group = AgeGroupCount { age_group: AgeGroup::From55, count: 3 };
    let location = MerchantLocation {
        merchant: "fraud_Kirlin and Sons".to_string(),
        count: 2,
        merch_lat: 40.5,
        merch_long: -73.25
    };

    assert_eq!(serde_json::to_value(&age_group)?, json!({ "age_group": "55+", "count": 3 }));
    assert_eq!(
        serde_json::to_value(&location)?,
        json!({ "merchant": "fraud_Kirlin and Sons", "count": 2, "merch_lat": 40.5, "merch_long": -73.25 })
    );

    Ok(())
}
