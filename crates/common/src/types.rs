//! 観測データの型定義
//!
//! 外部（クエリ層）から受け取る気候データのレコードと、
//! 解析エンジンが扱う不変の観測点を定義する。

use crate::Result;
use crate::errors::Error;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 観測値の品質ラベル
///
/// `poor < questionable < good < excellent` の全順序を持つ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Poor,
    Questionable,
    Good,
    Excellent,
}

impl Quality {
    /// 順序の昇順
    pub const ALL: [Quality; 4] = [
        Quality::Poor,
        Quality::Questionable,
        Quality::Good,
        Quality::Excellent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Poor => "poor",
            Quality::Questionable => "questionable",
            Quality::Good => "good",
            Quality::Excellent => "excellent",
        }
    }

    /// 品質による重み（加重平均で使用）
    pub fn weight(&self) -> f64 {
        match self {
            Quality::Excellent => 1.0,
            Quality::Good => 0.8,
            Quality::Questionable => 0.5,
            Quality::Poor => 0.3,
        }
    }

    /// 前後の空白を除き小文字化してからパースする
    ///
    /// リクエストパラメータ由来の文字列向け。レコードの品質ラベルには使わない。
    pub fn parse_normalized(s: &str) -> Result<Self> {
        s.trim().to_lowercase().parse()
    }
}

impl FromStr for Quality {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "poor" => Ok(Quality::Poor),
            "questionable" => Ok(Quality::Questionable),
            "good" => Ok(Quality::Good),
            "excellent" => Ok(Quality::Excellent),
            _ => Err(Error::InvalidQualityLabel(s.to_string())),
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 単一メトリックの観測点
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
    pub quality: Quality,
}

/// メトリック名と単位が付いた検証済みの気候データ
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClimateRecord {
    pub location_id: Option<i64>,
    pub metric: String,
    pub unit: Option<String>,
    pub date: NaiveDate,
    pub value: f64,
    pub quality: Quality,
}

impl ClimateRecord {
    pub fn observation(&self) -> Observation {
        Observation {
            date: self.date,
            value: self.value,
            quality: self.quality,
        }
    }
}

/// 外部から受け取る未検証のレコード
///
/// `/climate` の応答形式に合わせており、未知のフィールドは無視する。
/// 型の誤りもフィールド名付きで報告できるよう、値はすべて JSON のまま受け取る。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawClimateRecord {
    #[serde(default)]
    pub location_id: Option<serde_json::Value>,
    #[serde(default)]
    pub date: Option<serde_json::Value>,
    #[serde(default, alias = "metric_name")]
    pub metric: Option<serde_json::Value>,
    #[serde(default)]
    pub unit: Option<serde_json::Value>,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
    #[serde(default)]
    pub quality: Option<serde_json::Value>,
}

fn optional_string(field: &'static str, value: Option<serde_json::Value>) -> Result<Option<String>> {
    match value {
        None => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(v) => Err(Error::malformed(field, format!("not a string: {v}"))),
    }
}

fn required_string(field: &'static str, value: Option<serde_json::Value>) -> Result<String> {
    optional_string(field, value)?.ok_or_else(|| Error::malformed(field, "missing"))
}

impl TryFrom<RawClimateRecord> for ClimateRecord {
    type Error = Error;

    fn try_from(raw: RawClimateRecord) -> Result<Self> {
        let location_id = match raw.location_id {
            None => None,
            Some(v) => Some(
                v.as_i64()
                    .ok_or_else(|| Error::malformed("location_id", format!("not an integer: {v}")))?,
            ),
        };

        let date = required_string("date", raw.date)?;
        let date = NaiveDate::parse_from_str(&date, DATE_FORMAT)
            .map_err(|e| Error::malformed("date", format!("{date:?}: {e}")))?;

        let metric = required_string("metric", raw.metric)?;
        if metric.is_empty() {
            return Err(Error::malformed("metric", "empty"));
        }

        let unit = optional_string("unit", raw.unit)?;

        let value = match raw.value {
            None => return Err(Error::malformed("value", "missing")),
            Some(v) => v
                .as_f64()
                .filter(|f| f.is_finite())
                .ok_or_else(|| Error::malformed("value", format!("not a number: {v}")))?,
        };

        let quality: Quality = required_string("quality", raw.quality)?
            .parse()
            .map_err(|e: Error| Error::malformed("quality", e.to_string()))?;

        Ok(ClimateRecord {
            location_id,
            metric,
            unit,
            date,
            value,
            quality,
        })
    }
}

#[cfg(test)]
mod tests;
