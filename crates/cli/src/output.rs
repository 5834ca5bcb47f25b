use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// 出力は常に `{"data": ...}` で包む
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub data: T,
}

pub fn to_pretty_json<T: Serialize>(data: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(&Envelope { data })?)
}

/// `path` が `None` なら標準出力へ書く
pub fn write_json<T: Serialize>(data: &T, path: Option<&Path>) -> Result<()> {
    let json = to_pretty_json(data)?;
    match path {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }
    Ok(())
}
