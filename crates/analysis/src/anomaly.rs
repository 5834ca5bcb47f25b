use crate::statistics::{Moments, round_to};
use chrono::NaiveDate;
use common::types::{Observation, Quality};
use serde::{Deserialize, Serialize};

/// 平均から大きく外れた観測点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub date: NaiveDate,
    /// 小数 1 桁
    pub value: f64,
    /// |z|、小数 1 桁
    pub deviation: f64,
    pub quality: Quality,
}

/// z スコアの絶対値が `threshold` を超える点を入力順に返す
///
/// 標準偏差が 0 の系列（定数列）は z スコアが定義できないため、異常値なし。
pub fn detect_anomalies(points: &[Observation], moments: Moments, threshold: f64) -> Vec<Anomaly> {
    if moments.std_dev == 0.0 {
        return Vec::new();
    }

    points
        .iter()
        .filter_map(|p| {
            let z = ((p.value - moments.mean) / moments.std_dev).abs();
            (z > threshold).then(|| Anomaly {
                date: p.date,
                value: round_to(p.value, 1),
                deviation: round_to(z, 1),
                quality: p.quality,
            })
        })
        .collect()
}
