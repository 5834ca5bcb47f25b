use super::*;
use serde_json::json;

fn raw(value: serde_json::Value) -> RawClimateRecord {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_quality_order() {
    assert!(Quality::Poor < Quality::Questionable);
    assert!(Quality::Questionable < Quality::Good);
    assert!(Quality::Good < Quality::Excellent);

    let mut sorted = Quality::ALL.to_vec();
    sorted.sort();
    assert_eq!(sorted, Quality::ALL.to_vec());
}

#[test]
fn test_quality_from_str() {
    for q in Quality::ALL {
        assert_eq!(q.as_str().parse::<Quality>().unwrap(), q);
        assert_eq!(q.to_string(), q.as_str());
    }
    assert_eq!(
        "Good".parse::<Quality>(),
        Err(Error::InvalidQualityLabel("Good".to_string()))
    );
    assert!(" good".parse::<Quality>().is_err());
}

#[test]
fn test_quality_parse_normalized() {
    assert_eq!(Quality::parse_normalized("  GOOD ").unwrap(), Quality::Good);
    assert_eq!(
        Quality::parse_normalized("Excellent").unwrap(),
        Quality::Excellent
    );
    assert!(Quality::parse_normalized("great").is_err());
}

#[test]
fn test_quality_weight() {
    assert_eq!(Quality::Excellent.weight(), 1.0);
    assert_eq!(Quality::Good.weight(), 0.8);
    assert_eq!(Quality::Questionable.weight(), 0.5);
    assert_eq!(Quality::Poor.weight(), 0.3);
}

#[test]
fn test_quality_serde() {
    assert_eq!(
        serde_json::to_value(Quality::Questionable).unwrap(),
        json!("questionable")
    );
    let q: Quality = serde_json::from_value(json!("excellent")).unwrap();
    assert_eq!(q, Quality::Excellent);
}

#[test]
fn test_record_from_raw() {
    let record = ClimateRecord::try_from(raw(json!({
        "id": 7,
        "location_id": 1,
        "location_name": "Irvine",
        "date": "2020-01-15",
        "metric": "temperature",
        "unit": "celsius",
        "value": 12.5,
        "quality": "good",
    })))
    .unwrap();

    assert_eq!(record.location_id, Some(1));
    assert_eq!(record.metric, "temperature");
    assert_eq!(record.unit.as_deref(), Some("celsius"));
    assert_eq!(record.date, NaiveDate::from_ymd_opt(2020, 1, 15).unwrap());
    assert_eq!(record.value, 12.5);
    assert_eq!(record.quality, Quality::Good);

    let obs = record.observation();
    assert_eq!(obs.date, record.date);
    assert_eq!(obs.value, 12.5);
    assert_eq!(obs.quality, Quality::Good);
}

#[test]
fn test_record_integer_value_and_missing_unit() {
    let record = ClimateRecord::try_from(raw(json!({
        "date": "2021-06-01",
        "metric_name": "humidity",
        "value": 60,
        "quality": "poor",
    })))
    .unwrap();
    assert_eq!(record.metric, "humidity");
    assert_eq!(record.unit, None);
    assert_eq!(record.location_id, None);
    assert_eq!(record.value, 60.0);
}

fn malformed_field(value: serde_json::Value) -> &'static str {
    match ClimateRecord::try_from(raw(value)) {
        Err(Error::MalformedObservation { field, .. }) => field,
        other => panic!("Expected MalformedObservation, got {:?}", other),
    }
}

#[test]
fn test_record_malformed_fields() {
    let base = json!({
        "date": "2020-01-01",
        "metric": "temperature",
        "unit": "celsius",
        "value": 1.0,
        "quality": "good",
    });

    let mut missing_date = base.clone();
    missing_date.as_object_mut().unwrap().remove("date");
    assert_eq!(malformed_field(missing_date), "date");

    let mut bad_date = base.clone();
    bad_date["date"] = json!("2020-13-01");
    assert_eq!(malformed_field(bad_date), "date");

    let mut no_metric = base.clone();
    no_metric["metric"] = json!("");
    assert_eq!(malformed_field(no_metric), "metric");

    let mut string_value = base.clone();
    string_value["value"] = json!("12.5");
    assert_eq!(malformed_field(string_value), "value");

    let mut null_value = base.clone();
    null_value["value"] = json!(null);
    assert_eq!(malformed_field(null_value), "value");

    let mut bad_quality = base.clone();
    bad_quality["quality"] = json!("superb");
    assert_eq!(malformed_field(bad_quality), "quality");

    let mut no_quality = base.clone();
    no_quality.as_object_mut().unwrap().remove("quality");
    assert_eq!(malformed_field(no_quality), "quality");

    // 型の誤りもフィールド名で報告する
    let mut numeric_date = base.clone();
    numeric_date["date"] = json!(20200101);
    assert_eq!(malformed_field(numeric_date), "date");

    let mut numeric_quality = base.clone();
    numeric_quality["quality"] = json!(3);
    assert_eq!(malformed_field(numeric_quality), "quality");

    let mut numeric_metric = base.clone();
    numeric_metric["metric"] = json!(42);
    assert_eq!(malformed_field(numeric_metric), "metric");

    let mut numeric_unit = base.clone();
    numeric_unit["unit"] = json!(1);
    assert_eq!(malformed_field(numeric_unit), "unit");

    let mut string_location = base;
    string_location["location_id"] = json!("north");
    assert_eq!(malformed_field(string_location), "location_id");
}

#[test]
fn test_malformed_message_names_field() {
    let err = ClimateRecord::try_from(raw(json!({
        "date": "yesterday",
        "metric": "temperature",
        "value": 1.0,
        "quality": "good",
    })))
    .unwrap_err();
    assert!(err.to_string().contains("`date`"));
}
