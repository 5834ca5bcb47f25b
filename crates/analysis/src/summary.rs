//! 品質加重サマリー
//!
//! メトリックごとの最小・最大・平均に加えて、品質ラベルの重み
//! （excellent 1.0, good 0.8, questionable 0.5, poor 0.3）による加重平均と
//! 品質ラベルの構成比を求める。

use crate::grouper::{MetricSeries, group_by_metric};
use crate::statistics::{mean, round_to};
use common::types::{ClimateRecord, Quality};
use logging::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 品質ラベルごとの点の割合（小数 2 桁）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct QualityDistribution {
    pub excellent: f64,
    pub good: f64,
    pub questionable: f64,
    pub poor: f64,
}

impl QualityDistribution {
    pub fn get(&self, quality: Quality) -> f64 {
        match quality {
            Quality::Excellent => self.excellent,
            Quality::Good => self.good,
            Quality::Questionable => self.questionable,
            Quality::Poor => self.poor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSummary {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub weighted_avg: f64,
    pub unit: Option<String>,
    pub data_quality: QualityDistribution,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SummaryReport(pub BTreeMap<String, MetricSummary>);

impl SummaryReport {
    pub fn get(&self, metric: &str) -> Option<&MetricSummary> {
        self.0.get(metric)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// 系列のサマリー。点がなければ `None`
pub fn summarize_series(series: &MetricSeries) -> Option<MetricSummary> {
    let avg = mean(series.values())?;
    let min = series.values().fold(f64::INFINITY, f64::min);
    let max = series.values().fold(f64::NEG_INFINITY, f64::max);

    let (weighted_sum, weight_total) = series
        .points
        .iter()
        .fold((0.0, 0.0), |(sum, total), p| {
            let w = p.quality.weight();
            (sum + w * p.value, total + w)
        });

    let mut counts = [0_usize; 4];
    for p in &series.points {
        counts[p.quality as usize] += 1;
    }
    let n = series.len() as f64;
    let share = |q: Quality| round_to(counts[q as usize] as f64 / n, 2);

    Some(MetricSummary {
        min: round_to(min, 1),
        max: round_to(max, 1),
        avg: round_to(avg, 1),
        weighted_avg: round_to(weighted_sum / weight_total, 1),
        unit: series.unit.clone(),
        data_quality: QualityDistribution {
            excellent: share(Quality::Excellent),
            good: share(Quality::Good),
            questionable: share(Quality::Questionable),
            poor: share(Quality::Poor),
        },
        count: series.len(),
    })
}

pub fn summarize(records: &[ClimateRecord]) -> SummaryReport {
    let log = DEFAULT.new(o!(
        "function" => "summary::summarize",
        "records_count" => records.len(),
    ));
    trace!(log, "start");

    let report: BTreeMap<_, _> = group_by_metric(records)
        .into_iter()
        .filter_map(|(name, series)| summarize_series(&series).map(|s| (name, s)))
        .collect();

    trace!(log, "success"; "metrics_count" => report.len());
    SummaryReport(report)
}
