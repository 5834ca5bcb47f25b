use anyhow::{Context, Result, anyhow};
use common::types::{ClimateRecord, RawClimateRecord};
use serde::Deserialize;
use std::path::Path;

/// 配列そのもの、または `/climate` 応答と同じ `{"data": [...]}` 形式
///
/// 要素は JSON のまま受け取り、1 件ずつ変換して番号付きで報告する。
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Payload {
    Envelope { data: Vec<serde_json::Value> },
    List(Vec<serde_json::Value>),
}

impl Payload {
    fn into_records(self) -> Vec<serde_json::Value> {
        match self {
            Payload::Envelope { data } => data,
            Payload::List(list) => list,
        }
    }
}

/// JSON 文字列からレコードを読み込む。1 件でも不正なら全体を失敗とする
pub fn parse_records(json: &str) -> Result<Vec<ClimateRecord>> {
    let payload: Payload = serde_json::from_str(json)
        .context("input must be a JSON array of records or an object with a `data` array")?;

    payload
        .into_records()
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            let raw: RawClimateRecord = serde_json::from_value(item)
                .map_err(|e| anyhow!("record #{i}: not a climate record object: {e}"))?;
            ClimateRecord::try_from(raw).map_err(|e| anyhow!("record #{i}: {e}"))
        })
        .collect()
}

pub fn read_records(path: &Path) -> Result<Vec<ClimateRecord>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_records(&json)
}
