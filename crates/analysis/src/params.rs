//! 解析ヒューリスティックのパラメータ
//!
//! 既定値は名前付き定数として固定し、設定ファイルや環境変数で上書きできる。
//! いずれも経験的な調整値であり、統計的に導かれた値ではない。

use common::Result;
use common::config;
use common::errors::Error;

/// 異常値とみなす z スコアの絶対値（標準偏差 2 つ分）
pub const Z_SCORE_THRESHOLD: f64 = 2.0;

/// 傾向を「安定」とみなす変化量の幅（メトリック本来の単位 / 月）
pub const STABILITY_BAND: f64 = 0.05;

/// 季節性の信頼度の上限
pub const SEASONALITY_CONFIDENCE_CAP: f64 = 0.99;

/// 季節間レンジを標準偏差と比べる際の倍率
pub const SEASON_RANGE_MULTIPLIER: f64 = 4.0;

/// 季節性ありと判定する季節間レンジの標準偏差比
///
/// 標準偏差が 0 の場合はこの値そのものを絶対閾値として使う。
pub const SEASON_DETECTION_RATIO: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisParams {
    pub z_score_threshold: f64,
    pub stability_band: f64,
    pub seasonality_confidence_cap: f64,
    pub season_range_multiplier: f64,
    pub season_detection_ratio: f64,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            z_score_threshold: Z_SCORE_THRESHOLD,
            stability_band: STABILITY_BAND,
            seasonality_confidence_cap: SEASONALITY_CONFIDENCE_CAP,
            season_range_multiplier: SEASON_RANGE_MULTIPLIER,
            season_detection_ratio: SEASON_DETECTION_RATIO,
        }
    }
}

impl AnalysisParams {
    /// 設定（CONFIG_STORE > 環境変数 > TOML > 既定値）から読み込む
    ///
    /// 範囲外の値は `InvalidConfig` として拒否する。
    pub fn from_config() -> Result<Self> {
        let params = Self {
            z_score_threshold: config::get_parsed("ANALYSIS_Z_SCORE_THRESHOLD")?,
            stability_band: config::get_parsed("ANALYSIS_STABILITY_BAND")?,
            seasonality_confidence_cap: config::get_parsed("ANALYSIS_SEASONALITY_CONFIDENCE_CAP")?,
            season_range_multiplier: config::get_parsed("ANALYSIS_SEASON_RANGE_MULTIPLIER")?,
            season_detection_ratio: config::get_parsed("ANALYSIS_SEASON_DETECTION_RATIO")?,
        };
        params.validate()?;
        Ok(params)
    }

    /// 各値が有限かつ許容範囲にあることを確認する
    ///
    /// 信頼度の上限は (0, 0.99]、倍率は正、その他は 0 以上。
    pub fn validate(&self) -> Result<()> {
        check(
            "ANALYSIS_Z_SCORE_THRESHOLD",
            self.z_score_threshold,
            |v| v >= 0.0,
            "must be >= 0",
        )?;
        check(
            "ANALYSIS_STABILITY_BAND",
            self.stability_band,
            |v| v >= 0.0,
            "must be >= 0",
        )?;
        check(
            "ANALYSIS_SEASONALITY_CONFIDENCE_CAP",
            self.seasonality_confidence_cap,
            |v| v > 0.0 && v <= SEASONALITY_CONFIDENCE_CAP,
            "must be in (0, 0.99]",
        )?;
        check(
            "ANALYSIS_SEASON_RANGE_MULTIPLIER",
            self.season_range_multiplier,
            |v| v > 0.0,
            "must be > 0",
        )?;
        check(
            "ANALYSIS_SEASON_DETECTION_RATIO",
            self.season_detection_ratio,
            |v| v >= 0.0,
            "must be >= 0",
        )
    }
}

fn check(key: &str, value: f64, in_range: impl Fn(f64) -> bool, expected: &str) -> Result<()> {
    if value.is_finite() && in_range(value) {
        Ok(())
    } else {
        Err(Error::InvalidConfig {
            key: key.to_string(),
            reason: format!("{value}: {expected}"),
        })
    }
}
