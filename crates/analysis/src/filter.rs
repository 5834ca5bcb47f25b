//! 解析前のレコード絞り込み
//!
//! 地点・メトリック・期間・最低品質による絞り込みと日付順への並べ替えを、
//! 解析エンジンに渡す前にメモリ上で行う。

use chrono::NaiveDate;
use common::Result;
use common::errors::Error;
use common::types::{ClimateRecord, Quality};
use logging::*;

/// 条件はすべて任意。未指定の条件は絞り込まない
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObservationFilter {
    pub location_id: Option<i64>,
    /// 正規化済み（前後の空白除去・小文字）のメトリック名
    ///
    /// レコード側も同じ正規化をしてから比べる（大文字小文字を区別しない）。
    pub metric: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub quality_threshold: Option<Quality>,
}

impl ObservationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_location(mut self, location_id: i64) -> Self {
        self.location_id = Some(location_id);
        self
    }

    pub fn with_metric(mut self, metric: &str) -> Self {
        self.metric = Some(metric.trim().to_lowercase());
        self
    }

    /// 両端を含む期間。片側だけの指定も可
    pub fn with_date_range(
        mut self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Self> {
        if let (Some(start), Some(end)) = (start, end)
            && start > end
        {
            return Err(Error::InvalidDateRange { start, end });
        }
        self.start_date = start;
        self.end_date = end;
        Ok(self)
    }

    /// 指定ラベル以上の品質のレコードだけを残す
    pub fn with_quality_threshold(mut self, threshold: &str) -> Result<Self> {
        let quality = Quality::parse_normalized(threshold)
            .map_err(|_| Error::InvalidQualityThreshold(threshold.to_string()))?;
        self.quality_threshold = Some(quality);
        Ok(self)
    }

    pub fn matches(&self, record: &ClimateRecord) -> bool {
        self.location_id
            .is_none_or(|id| record.location_id == Some(id))
            && self
                .metric
                .as_ref()
                .is_none_or(|m| record.metric.trim().to_lowercase() == *m)
            && self.start_date.is_none_or(|d| record.date >= d)
            && self.end_date.is_none_or(|d| record.date <= d)
            && self.quality_threshold.is_none_or(|q| record.quality >= q)
    }

    /// 条件に合うレコードを日付の昇順で返す（同じ日付は入力順）
    pub fn apply(&self, records: &[ClimateRecord]) -> Vec<ClimateRecord> {
        let log = DEFAULT.new(o!(
            "function" => "filter::apply",
            "records_count" => records.len(),
        ));
        trace!(log, "start"; "filter" => ?self);

        let mut selected: Vec<ClimateRecord> =
            records.iter().filter(|r| self.matches(r)).cloned().collect();
        selected.sort_by_key(|r| r.date);

        trace!(log, "success"; "selected_count" => selected.len());
        selected
    }
}
