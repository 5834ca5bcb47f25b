use crate::anomaly::{Anomaly, detect_anomalies};
use crate::grouper::{MetricSeries, group_by_metric};
use crate::params::AnalysisParams;
use crate::seasonality::{SeasonalityResult, detect_seasonality};
use crate::statistics::moments;
use crate::trend::{TrendResult, estimate_trend};
use common::types::ClimateRecord;
use logging::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 1 メトリック分の解析結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricAnalysis {
    pub trend: TrendResult,
    pub anomalies: Vec<Anomaly>,
    pub seasonality: SeasonalityResult,
}

/// メトリック名ごとの解析結果（キーの昇順）
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisReport(pub BTreeMap<String, MetricAnalysis>);

impl AnalysisReport {
    pub fn get(&self, metric: &str) -> Option<&MetricAnalysis> {
        self.0.get(metric)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// 傾きの単位。単位がない、または空の場合は `None`
fn rate_unit(unit: Option<&str>) -> Option<String> {
    unit.filter(|u| !u.is_empty()).map(|u| format!("{u}/month"))
}

pub fn analyze_series(series: &MetricSeries, params: &AnalysisParams) -> MetricAnalysis {
    let stats = moments(series.values());
    MetricAnalysis {
        trend: estimate_trend(
            &series.points,
            rate_unit(series.unit.as_deref()),
            params.stability_band,
        ),
        anomalies: detect_anomalies(&series.points, stats, params.z_score_threshold),
        seasonality: detect_seasonality(&series.points, params),
    }
}

/// レコード列をメトリックごとに解析する
///
/// 呼び出しごとに独立した計算で、状態は持たない。
pub fn analyze(records: &[ClimateRecord], params: &AnalysisParams) -> AnalysisReport {
    let log = DEFAULT.new(o!(
        "function" => "report::analyze",
        "records_count" => records.len(),
    ));
    trace!(log, "start");

    let report: BTreeMap<_, _> = group_by_metric(records)
        .into_iter()
        .map(|(name, series)| {
            let analysis = analyze_series(&series, params);
            trace!(log, "analyzed";
                "metric" => &name,
                "points" => series.len(),
                "direction" => ?analysis.trend.direction,
                "anomalies" => analysis.anomalies.len(),
                "seasonal" => analysis.seasonality.detected,
            );
            (name, analysis)
        })
        .collect();

    trace!(log, "success"; "metrics_count" => report.len());
    AnalysisReport(report)
}
