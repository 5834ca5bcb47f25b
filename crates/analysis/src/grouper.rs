use common::types::{ClimateRecord, Observation};
use logging::*;
use std::collections::BTreeMap;

/// 単一メトリックの観測系列
///
/// 点の順序は入力順のまま（並べ替えない）。
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSeries {
    pub metric_name: String,
    pub unit: Option<String>,
    pub points: Vec<Observation>,
}

impl MetricSeries {
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// レコード列をメトリック名ごとの系列に分割する
///
/// 単位は各メトリックで最初に現れたレコードのものを採用する。
/// 絞り込みや重複除去は行わない。
pub fn group_by_metric(records: &[ClimateRecord]) -> BTreeMap<String, MetricSeries> {
    let log = DEFAULT.new(o!(
        "function" => "grouper::group_by_metric",
        "records_count" => records.len(),
    ));
    trace!(log, "start");

    let mut groups: BTreeMap<String, MetricSeries> = BTreeMap::new();
    for record in records {
        match groups.get_mut(&record.metric) {
            Some(series) => series.points.push(record.observation()),
            None => {
                groups.insert(
                    record.metric.clone(),
                    MetricSeries {
                        metric_name: record.metric.clone(),
                        unit: record.unit.clone(),
                        points: vec![record.observation()],
                    },
                );
            }
        }
    }

    trace!(log, "success"; "metrics_count" => groups.len());
    groups
}
