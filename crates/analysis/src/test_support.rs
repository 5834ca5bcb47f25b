use chrono::{Datelike, Months, NaiveDate};
use common::types::{ClimateRecord, Observation, Quality};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// `start` から `i` か月後の日付
pub fn month_offset(start: NaiveDate, i: u32) -> NaiveDate {
    start.checked_add_months(Months::new(i)).unwrap()
}

pub fn obs(date: NaiveDate, value: f64) -> Observation {
    Observation {
        date,
        value,
        quality: Quality::Good,
    }
}

pub fn record(metric: &str, unit: Option<&str>, date: NaiveDate, value: f64) -> ClimateRecord {
    ClimateRecord {
        location_id: Some(1),
        metric: metric.to_string(),
        unit: unit.map(str::to_string),
        date,
        value,
        quality: Quality::Good,
    }
}

/// 月次の系列（各月 15 日）
pub fn monthly_series(start: NaiveDate, values: &[f64]) -> Vec<Observation> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| obs(month_offset(start, i as u32), *v))
        .collect()
}

/// 冬を基準に季節ごとのオフセットを加えた 3 年分の月次系列
///
/// 冬 +0、春・秋 +offset/2、夏 +offset。小さな決定的ノイズを含む。
pub fn seasonal_series(base: f64, offset: f64) -> Vec<Observation> {
    (0..36)
        .map(|i| {
            let d = month_offset(date(2019, 1, 15), i);
            let season_offset = match d.month() {
                12 | 1 | 2 => 0.0,
                6..=8 => offset,
                _ => offset / 2.0,
            };
            let noise = [0.05, -0.05, 0.0][(i % 3) as usize];
            obs(d, base + season_offset + noise)
        })
        .collect()
}
