//! 気候データの傾向・異常値・季節性解析エンジン
//!
//! 入力はクエリ層で絞り込み済みの [`ClimateRecord`] 列で、
//! 呼び出しごとに独立した純粋な計算としてメトリックごとの結果を返す。

pub mod anomaly;
pub mod filter;
pub mod grouper;
pub mod params;
pub mod report;
pub mod seasonality;
pub mod statistics;
pub mod summary;
pub mod trend;

pub use anomaly::Anomaly;
pub use common::types::{ClimateRecord, Observation, Quality};
pub use filter::ObservationFilter;
pub use grouper::MetricSeries;
pub use params::AnalysisParams;
pub use report::{AnalysisReport, MetricAnalysis, analyze};
pub use seasonality::{Season, SeasonalityResult};
pub use summary::{MetricSummary, SummaryReport, summarize};
pub use trend::{TrendDirection, TrendResult};

#[cfg(test)]
mod test_support;
