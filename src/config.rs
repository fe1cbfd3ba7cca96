//! JSON configuration for the `dbscan_tool` binary.
//!
//! ```json
//! {
//!   "input": "points.csv",
//!   "params": { "eps": 1.5, "min_samples": 4, "index": "grid" },
//!   "output": { "labels_csv": "out/labels.csv", "report_json": "out/report.json" }
//! }
//! ```
use crate::params::DbscanParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct ToolConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub params: DbscanParams,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct OutputConfig {
    /// Input coordinates plus a label column (0 = noise, clusters from 1).
    pub labels_csv: Option<PathBuf>,
    pub report_json: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<ToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(data: &str) -> Result<ToolConfig, String> {
    serde_json::from_str(data).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexKind;

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg = parse_config(r#"{ "input": "pts.csv" }"#).unwrap();
        assert_eq!(cfg.input, PathBuf::from("pts.csv"));
        assert_eq!(cfg.params, DbscanParams::default());
        assert!(cfg.output.labels_csv.is_none());
    }

    #[test]
    fn full_config_round_trips_params() {
        let cfg = parse_config(
            r#"{
                "input": "pts.csv",
                "params": { "eps": 2.0, "min_samples": 3, "metric": "manhattan", "index": "grid", "parallel": true },
                "output": { "report_json": "r.json" }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.params.eps, 2.0);
        assert_eq!(cfg.params.min_samples, 3);
        assert_eq!(cfg.params.index, IndexKind::Grid);
        assert!(cfg.params.parallel);
        assert_eq!(cfg.output.report_json, Some(PathBuf::from("r.json")));
    }

    #[test]
    fn unknown_index_is_an_error() {
        let err = parse_config(r#"{ "input": "p.csv", "params": { "index": "octree" } }"#)
            .unwrap_err();
        assert!(err.contains("octree"), "{err}");
    }
}
