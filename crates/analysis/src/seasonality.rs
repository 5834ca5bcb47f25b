//! 季節性の検出
//!
//! 全年度をまとめた月別平均（月別気候値）を 4 つの固定季節に集約し、
//! 季節間のレンジを系列全体の標準偏差と比べて季節性の有無を判定する。
//! これはスペクトル解析や自己相関による検定ではなく単純な比率によるヒューリスティックで、
//! 短い系列では過検出・検出漏れのどちらも起こりうる。

use crate::params::AnalysisParams;
use crate::statistics::{mean, moments, round_to};
use crate::trend::TrendDirection;
use chrono::Datelike;
use common::types::Observation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    /// 季節間の比較に使う順序。冬が起点
    pub const CYCLE: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Fall];

    pub fn months(&self) -> [u32; 3] {
        match self {
            Season::Winter => [12, 1, 2],
            Season::Spring => [3, 4, 5],
            Season::Summer => [6, 7, 8],
            Season::Fall => [9, 10, 11],
        }
    }

    /// 比較対象となる直前の季節
    ///
    /// 冬は起点なので前の季節を持たない（秋→冬の比較はしない）。
    pub fn previous(&self) -> Option<Season> {
        match self {
            Season::Winter => None,
            Season::Spring => Some(Season::Winter),
            Season::Summer => Some(Season::Spring),
            Season::Fall => Some(Season::Summer),
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// 月別気候値。観測のない月は `None`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MonthlyClimatology([Option<f64>; 12]);

impl MonthlyClimatology {
    /// 年をまたいで同じ暦月の値をまとめて平均する
    pub fn from_points(points: &[Observation]) -> Self {
        let mut buckets: [Vec<f64>; 12] = Default::default();
        for p in points {
            buckets[p.date.month0() as usize].push(p.value);
        }
        Self(buckets.map(mean))
    }

    pub fn month(&self, month: u32) -> Option<f64> {
        self.0.get(month.checked_sub(1)? as usize).copied().flatten()
    }

    /// 季節内の観測のある月の平均
    pub fn season_average(&self, season: Season) -> Option<f64> {
        mean(season.months().into_iter().filter_map(|m| self.month(m)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonStats {
    /// 小数 1 桁。観測がなければ `None`
    pub avg: Option<f64>,
    pub trend: TrendDirection,
}

/// 4 季節すべてを常に持つ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalPattern {
    pub winter: SeasonStats,
    pub spring: SeasonStats,
    pub summer: SeasonStats,
    pub fall: SeasonStats,
}

impl SeasonalPattern {
    pub fn get(&self, season: Season) -> &SeasonStats {
        match season {
            Season::Winter => &self.winter,
            Season::Spring => &self.spring,
            Season::Summer => &self.summer,
            Season::Fall => &self.fall,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Yearly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalityResult {
    pub detected: bool,
    pub period: Period,
    /// 小数 2 桁
    pub confidence: f64,
    pub pattern: SeasonalPattern,
}

/// 季節性を検出する
pub fn detect_seasonality(points: &[Observation], params: &AnalysisParams) -> SeasonalityResult {
    let climatology = MonthlyClimatology::from_points(points);
    let averages = Season::CYCLE.map(|s| climatology.season_average(s));

    let present: Vec<f64> = averages.iter().flatten().copied().collect();
    let (detected, confidence) = if present.is_empty() {
        (false, 0.0)
    } else {
        let max = present.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = present.iter().copied().fold(f64::INFINITY, f64::min);
        let range = max - min;

        let std_dev = moments(points.iter().map(|p| p.value)).std_dev;
        if std_dev == 0.0 {
            (range > params.season_detection_ratio, 0.0)
        } else {
            let confidence =
                (range / (params.season_range_multiplier * std_dev)).min(params.seasonality_confidence_cap);
            (range > params.season_detection_ratio * std_dev, confidence)
        }
    };

    let stats = |season: Season| {
        let current = averages[season.index()];
        let previous = season.previous().and_then(|p| averages[p.index()]);
        let trend = match (previous, current) {
            (Some(prev), Some(cur)) => TrendDirection::classify(cur - prev, params.stability_band),
            _ => TrendDirection::Stable,
        };
        SeasonStats {
            avg: current.map(|a| round_to(a, 1)),
            trend,
        }
    };

    SeasonalityResult {
        detected,
        period: Period::Yearly,
        confidence: round_to(confidence, 2),
        pattern: SeasonalPattern {
            winter: stats(Season::Winter),
            spring: stats(Season::Spring),
            summer: stats(Season::Summer),
            fall: stats(Season::Fall),
        },
    }
}

#[cfg(test)]
mod tests;
