//! I/O helpers for point files and JSON.
//!
//! - `read_points_csv` / `parse_points_csv`: comma-separated rows of
//!   coordinates into an owned row-major buffer.
//! - `write_labeled_csv`: points plus a trailing label column.
//! - `write_json_file`: pretty-print a serializable value to disk.
use crate::types::PointSet;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Owned row-major point buffer read from disk.
#[derive(Clone, Debug, PartialEq)]
pub struct PointTable {
    dim: usize,
    data: Vec<f32>,
}

impl PointTable {
    pub fn new(dim: usize, data: Vec<f32>) -> Self {
        Self { dim, data }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        if self.dim == 0 {
            0
        } else {
            self.data.len() / self.dim
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn row(&self, i: usize) -> &[f32] {
        &self.data[i * self.dim..(i + 1) * self.dim]
    }

    /// Borrow as a validated `PointSet`.
    pub fn as_points(&self) -> Result<PointSet<'_>, String> {
        PointSet::new(&self.data, self.len(), self.dim).map_err(|e| e.to_string())
    }
}

/// Load a CSV file of points, one per line. Blank lines are skipped.
pub fn read_points_csv(path: &Path) -> Result<PointTable, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    parse_points_csv(&contents).map_err(|e| format!("{}: {e}", path.display()))
}

/// Parse comma-separated point rows; every non-empty row must have the same
/// number of columns.
pub fn parse_points_csv(contents: &str) -> Result<PointTable, String> {
    let mut dim = 0usize;
    let mut data = Vec::new();
    for (line_idx, line) in contents.lines().enumerate() {
        let line_no = line_idx + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut count = 0usize;
        for field in line.split(',') {
            let field = field.trim();
            let value: f32 = field
                .parse()
                .map_err(|e| format!("Invalid value \"{field}\" at line {line_no}: {e}"))?;
            data.push(value);
            count += 1;
        }
        if dim != 0 && count != dim {
            return Err(format!(
                "Inconsistent number of dimensions at line {line_no} (expected {dim}, found {count})"
            ));
        }
        dim = count;
    }
    if data.is_empty() {
        return Err("No points found".to_string());
    }
    Ok(PointTable::new(dim, data))
}

/// Render points with an appended label column as CSV text.
pub fn format_labeled_csv(points: &PointTable, labels: &[usize]) -> String {
    let mut out = String::new();
    for (i, label) in labels.iter().enumerate().take(points.len()) {
        for v in points.row(i) {
            let _ = write!(out, "{v},");
        }
        let _ = writeln!(out, "{label}");
    }
    out
}

pub fn write_labeled_csv(path: &Path, points: &PointTable, labels: &[usize]) -> Result<(), String> {
    ensure_parent_dir(path)?;
    fs::write(path, format_labeled_csv(points, labels))
        .map_err(|e| format!("Failed to write {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
