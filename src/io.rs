//! Plain-text numeric matrices: one point (or table row) per line.
//!
//! Blank lines and lines starting with `#` are ignored, so a result table
//! written by [`write_matrix`] together with its `#` summary lines can be
//! read straight back.

use std::fs;
use std::io::Write;
use std::path::Path;

use ndarray::Array2;

use crate::config::InputConfig;
use crate::error::{AnalysisError, Result};
use crate::geometry::PointCloud;

/// Parse a delimited numeric matrix from text.
pub fn parse_matrix(text: &str, input: &InputConfig) -> Result<Vec<Vec<f64>>> {
    let mut rows = Vec::new();
    let mut header_pending = input.has_header;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if header_pending {
            header_pending = false;
            continue;
        }

        let mut tokens: Vec<&str> = if input.delimiter.is_whitespace() {
            line.split_whitespace().collect()
        } else {
            line.split(input.delimiter).map(str::trim).collect()
        };
        // Tolerate a trailing delimiter
        if tokens.last() == Some(&"") {
            tokens.pop();
        }

        let row = tokens
            .into_iter()
            .map(|tok| {
                tok.parse::<f64>().map_err(|_| AnalysisError::Parse {
                    line: idx + 1,
                    token: tok.to_string(),
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }

    Ok(rows)
}

/// Load a point cloud from a delimited text file.
pub fn read_point_cloud(path: &Path, input: &InputConfig) -> Result<PointCloud> {
    let text = fs::read_to_string(path).map_err(|source| AnalysisError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = parse_matrix(&text, input)?;
    PointCloud::from_rows(&rows)
}

/// Write a matrix, one space-separated row per line.
pub fn write_matrix<W: Write>(out: &mut W, matrix: &Array2<f64>) -> Result<()> {
    for row in matrix.rows() {
        let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        writeln!(out, "{}", line.join(" "))?;
    }
    Ok(())
}
