//! Graph data loading
//!
//! Reads pre-aggregated columns from JSON, YAML or CSV. No aggregation or
//! normalization happens here; percentages are taken as written.

use crate::model::{Fraction, GraphData};
use anyhow::{bail, Context, Result};
use ratatui::style::Color;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Load graph data, picking the format from the file extension
pub fn load_graph_data<P: AsRef<Path>>(path: P) -> Result<GraphData<String>> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let data: GraphData<String> = match extension.as_deref() {
        Some("json") => {
            let contents = read(path)?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        }
        Some("yaml") | Some("yml") => {
            let contents = read(path)?;
            serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        }
        Some("csv") => {
            let file = fs::File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            parse_csv(file).with_context(|| format!("Failed to parse {}", path.display()))?
        }
        _ => bail!(
            "Unsupported data file {} (expected .json, .yaml, .yml or .csv)",
            path.display()
        ),
    };

    tracing::info!(
        path = %path.display(),
        columns = data.column_count(),
        "loaded graph data"
    );
    Ok(data)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// One CSV row: a single fraction of one column
#[derive(Debug, Deserialize)]
struct CsvRow {
    column: usize,
    label: Option<String>,
    percentage: f64,
    color: Option<String>,
    payload: Option<String>,
}

/// Parse `column,label,percentage,color,payload` rows
///
/// Rows are grouped by column index, keeping file order within a column.
/// The first non-empty label of a column names it.
pub fn parse_csv<R: std::io::Read>(reader: R) -> Result<GraphData<String>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut columns: BTreeMap<usize, (Option<String>, Vec<Fraction<String>>)> = BTreeMap::new();

    for (line, record) in csv_reader.deserialize::<CsvRow>().enumerate() {
        let row = record.with_context(|| format!("Invalid row {}", line + 1))?;

        let color = match row.color.as_deref() {
            Some(value) if !value.is_empty() => Some(
                Color::from_str(value)
                    .map_err(|_| anyhow::anyhow!("Invalid color '{}' on row {}", value, line + 1))?,
            ),
            _ => None,
        };

        let entry = columns.entry(row.column).or_default();
        if entry.0.is_none() {
            entry.0 = row.label.filter(|label| !label.is_empty());
        }
        entry.1.push(Fraction {
            payload: row.payload.filter(|payload| !payload.is_empty()),
            color,
            percentage: row.percentage,
        });
    }

    let (labels, columns) = columns
        .into_values()
        .map(|(label, fractions)| (label.unwrap_or_default(), fractions))
        .unzip();

    Ok(GraphData { labels, columns })
}
