use std::path::Path;
use thiserror::Error;

use crate::spots::{SpotMode, SpotReport};

const WSPR_SNAPSHOT: &str = include_str!("../../data/wspr-snapshot.json");
const FT8_SNAPSHOT: &str = include_str!("../../data/ft8-snapshot.json");

#[derive(Debug, Error)]
pub enum SpotError {
    #[error("spot file read error: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("spot file parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load a JSON array of spot reports from disk.
pub fn load_spot_file(path: &Path) -> Result<Vec<SpotReport>, SpotError> {
    let content = std::fs::read_to_string(path)?;
    let reports: Vec<SpotReport> = serde_json::from_str(&content)?;
    Ok(reports)
}

/// Load a spot batch, substituting the bundled snapshot when no file
/// is given or the file cannot be used. Downstream aggregation is
/// identical either way.
pub fn load_with_fallback(path: Option<&Path>, mode: SpotMode) -> Vec<SpotReport> {
    if let Some(path) = path {
        match load_spot_file(path) {
            Ok(reports) => return reports,
            Err(e) => {
                log::warn!(
                    "{} batch {} unusable, falling back to bundled snapshot: {}",
                    mode,
                    path.display(),
                    e
                );
            }
        }
    }
    bundled_snapshot(mode)
}

fn bundled_snapshot(mode: SpotMode) -> Vec<SpotReport> {
    let raw = match mode {
        SpotMode::Wspr => WSPR_SNAPSHOT,
        SpotMode::Ft8 => FT8_SNAPSHOT,
    };
    serde_json::from_str(raw).unwrap_or_else(|e| {
        log::error!("bundled {} snapshot failed to parse: {}", mode, e);
        Vec::new()
    })
}
