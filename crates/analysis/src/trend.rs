//! 線形トレンドの推定
//!
//! 最初の観測からの経過月数に対して最小二乗法で直線を当てはめ、
//! 傾き（月あたりの変化量）とピアソン相関係数の絶対値（信頼度）を求める。
//! 信頼度は当てはまりの良さの順序付けに使う指標で、確率ではない。

use crate::statistics::round_to;
use chrono::{Datelike, NaiveDate};
use common::types::Observation;
use serde::{Deserialize, Serialize};

/// 変化の方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendDirection {
    /// 変化量を安定帯 `±band` と比べて分類する
    pub fn classify(delta: f64, band: f64) -> Self {
        if delta > band {
            TrendDirection::Increasing
        } else if delta < -band {
            TrendDirection::Decreasing
        } else {
            TrendDirection::Stable
        }
    }
}

/// 丸める前の回帰結果
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LinearFit {
    /// 月あたりの変化量
    pub slope: f64,
    /// |r|、0.0〜1.0
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub direction: TrendDirection,
    /// 月あたりの変化量（小数 1 桁）
    pub rate: f64,
    pub unit: Option<String>,
    /// 小数 2 桁
    pub confidence: f64,
}

/// 暦月の通し番号。日付の日は無視する
fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month())
}

/// 経過月数に対する最小二乗直線
///
/// 2 点未満、または全点が同じ月の場合は傾き 0。
/// x または y の分散が 0 の場合は信頼度 0（NaN にはしない）。
pub fn fit_monthly(points: &[Observation]) -> LinearFit {
    if points.len() < 2 {
        return LinearFit::default();
    }

    // 傾きも相関も平行移動に依存しないので、先頭の点を原点にして桁落ちを抑える
    let x0 = month_index(points[0].date);
    let y0 = points[0].value;

    let n = points.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xx, mut sum_yy, mut sum_xy) = (0.0, 0.0, 0.0, 0.0, 0.0);
    for p in points {
        let x = (month_index(p.date) - x0) as f64;
        let y = p.value - y0;
        sum_x += x;
        sum_y += y;
        sum_xx += x * x;
        sum_yy += y * y;
        sum_xy += x * y;
    }

    let numerator = n * sum_xy - sum_x * sum_y;
    let var_x = n * sum_xx - sum_x * sum_x;
    let var_y = n * sum_yy - sum_y * sum_y;

    let slope = if var_x != 0.0 { numerator / var_x } else { 0.0 };
    let confidence = if var_x > 0.0 && var_y > 0.0 {
        (numerator / (var_x * var_y).sqrt()).abs().min(1.0)
    } else {
        0.0
    };

    LinearFit { slope, confidence }
}

/// 系列のトレンドを推定して表示用に丸める
///
/// `rate_unit` は `"<unit>/month"` の形にした単位。
pub fn estimate_trend(
    points: &[Observation],
    rate_unit: Option<String>,
    stability_band: f64,
) -> TrendResult {
    let fit = fit_monthly(points);
    TrendResult {
        direction: TrendDirection::classify(fit.slope, stability_band),
        rate: round_to(fit.slope, 1),
        unit: rate_unit,
        confidence: round_to(fit.confidence, 2),
    }
}
