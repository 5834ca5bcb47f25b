use super::*;
use crate::test_support::*;
use assertables::*;
use proptest::prelude::*;

fn detect(points: &[Observation]) -> SeasonalityResult {
    detect_seasonality(points, &AnalysisParams::default())
}

#[test]
fn test_seasons_partition_months() {
    let mut all: Vec<u32> = Season::CYCLE.iter().flat_map(|s| s.months()).collect();
    all.sort();
    assert_eq!(all, (1..=12).collect::<Vec<_>>());
}

#[test]
fn test_season_previous() {
    assert_eq!(Season::Winter.previous(), None);
    assert_eq!(Season::Spring.previous(), Some(Season::Winter));
    assert_eq!(Season::Summer.previous(), Some(Season::Spring));
    assert_eq!(Season::Fall.previous(), Some(Season::Summer));
}

#[test]
fn test_climatology_combines_years() {
    let points = vec![
        obs(date(2020, 1, 5), 1.0),
        obs(date(2021, 1, 20), 3.0),
        obs(date(2021, 7, 1), 20.0),
    ];
    let c = MonthlyClimatology::from_points(&points);
    assert_eq!(c.month(1), Some(2.0));
    assert_eq!(c.month(7), Some(20.0));
    assert_eq!(c.month(2), None);
    assert_eq!(c.month(0), None);
    assert_eq!(c.month(13), None);

    // 観測のない月は平均に含めない（0 として扱わない）
    assert_eq!(c.season_average(Season::Winter), Some(2.0));
    assert_eq!(c.season_average(Season::Summer), Some(20.0));
    assert_eq!(c.season_average(Season::Spring), None);
}

#[test]
fn test_no_points() {
    let result = detect(&[]);
    assert!(!result.detected);
    assert_eq!(result.period, Period::Yearly);
    assert_eq!(result.confidence, 0.0);
    for season in Season::CYCLE {
        let stats = result.pattern.get(season);
        assert_eq!(stats.avg, None);
        assert_eq!(stats.trend, TrendDirection::Stable);
    }
}

#[test]
fn test_summer_peak_detected() {
    let points = seasonal_series(10.0, 10.0);
    let result = detect(&points);

    assert!(result.detected);
    let winter = result.pattern.winter.avg.unwrap();
    let summer = result.pattern.summer.avg.unwrap();
    assert_in_delta!(summer - winter, 10.0, 0.2);
    assert_eq!(result.pattern.spring.avg, Some(15.0));
    assert_eq!(result.pattern.fall.avg, Some(15.0));

    assert_eq!(result.pattern.winter.trend, TrendDirection::Stable);
    assert_eq!(result.pattern.spring.trend, TrendDirection::Increasing);
    assert_eq!(result.pattern.summer.trend, TrendDirection::Increasing);
    assert_eq!(result.pattern.fall.trend, TrendDirection::Decreasing);

    // 季節間レンジ 10 / (4 × σ≈3.54)
    assert_in_delta!(result.confidence, 0.71, 0.02);
}

#[test]
fn test_winter_is_always_stable() {
    // 秋より冬の方がずっと高くても冬は比較しない
    let points = vec![
        obs(date(2020, 1, 1), 100.0),
        obs(date(2020, 4, 1), 50.0),
        obs(date(2020, 7, 1), 20.0),
        obs(date(2020, 10, 1), 0.0),
    ];
    let result = detect(&points);
    assert_eq!(result.pattern.winter.trend, TrendDirection::Stable);
    assert_eq!(result.pattern.spring.trend, TrendDirection::Decreasing);
    assert_eq!(result.pattern.summer.trend, TrendDirection::Decreasing);
    assert_eq!(result.pattern.fall.trend, TrendDirection::Decreasing);
}

#[test]
fn test_missing_season_yields_stable() {
    let points = vec![
        obs(date(2020, 1, 1), 0.0),
        obs(date(2020, 7, 1), 20.0),
        obs(date(2020, 10, 1), 30.0),
    ];
    let result = detect(&points);
    assert_eq!(result.pattern.spring.avg, None);
    assert_eq!(result.pattern.spring.trend, TrendDirection::Stable);
    // 前の季節（春）が欠けているので夏も安定
    assert_eq!(result.pattern.summer.trend, TrendDirection::Stable);
    assert_eq!(result.pattern.fall.trend, TrendDirection::Increasing);
}

#[test]
fn test_single_season_not_detected() {
    let points = monthly_series(date(2020, 6, 1), &[1.0, 5.0, 9.0]);
    let result = detect(&points);
    assert!(!result.detected);
    assert_eq!(result.confidence, 0.0);
    assert_eq!(result.pattern.summer.avg, Some(5.0));
    assert_eq!(result.pattern.winter.avg, None);
}

#[test]
fn test_constant_series_not_detected() {
    let points = monthly_series(date(2019, 1, 1), &[7.3; 24]);
    let result = detect(&points);
    assert!(!result.detected);
    assert_eq!(result.confidence, 0.0);
    for season in Season::CYCLE {
        assert_eq!(result.pattern.get(season).avg, Some(7.3));
        assert_eq!(result.pattern.get(season).trend, TrendDirection::Stable);
    }
}

#[test]
fn test_confidence_is_capped() {
    // 冬に偏った系列では レンジ / 4σ が 1 を超える
    let mut points: Vec<_> = (2000..2007)
        .flat_map(|y| [date(y, 1, 1), date(y, 2, 1), date(y, 12, 1)])
        .map(|d| obs(d, 0.0))
        .collect();
    points.push(obs(date(2003, 7, 1), 10.0));

    let result = detect(&points);
    assert!(result.detected);
    assert_eq!(result.confidence, 0.99);

    let params = AnalysisParams {
        seasonality_confidence_cap: 0.5,
        ..AnalysisParams::default()
    };
    assert_eq!(detect_seasonality(&points, &params).confidence, 0.5);
}

#[test]
fn test_serialization_shape() {
    let result = detect(&monthly_series(date(2020, 6, 1), &[1.0, 2.0]));
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["period"], "yearly");
    assert_eq!(json["detected"], false);
    let pattern = json["pattern"].as_object().unwrap();
    let mut keys: Vec<_> = pattern.keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, vec!["fall", "spring", "summer", "winter"]);
    assert!(json["pattern"]["winter"]["avg"].is_null());
    assert_eq!(json["pattern"]["summer"]["avg"], 1.5);
    assert_eq!(json["pattern"]["summer"]["trend"], "stable");
}

proptest! {
    #[test]
    fn test_confidence_bounds(values in prop::collection::vec(-100.0..100.0_f64, 0..48)) {
        let points = monthly_series(date(2010, 3, 1), &values);
        let result = detect(&points);
        assert_ge!(result.confidence, 0.0);
        assert_le!(result.confidence, 0.99);
        if values.is_empty() {
            prop_assert!(!result.detected);
        }
    }
}
