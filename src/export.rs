//! Result export: the two-column summary table and the JSON region report.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::roi::{AggregationResult, Ellipse};

// ---------------------------------------------------------------------------
// CSV summary table
// ---------------------------------------------------------------------------

/// One row of the summary table. `None` serializes as an empty cell.
#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    #[serde(rename = "Parameter")]
    parameter: &'a str,
    #[serde(rename = "Mean Value")]
    mean_value: Option<f64>,
}

fn summary_rows(result: &AggregationResult) -> Vec<SummaryRow<'_>> {
    std::iter::once(SummaryRow {
        parameter: &result.anchor_column,
        mean_value: Some(result.anchor.value),
    })
    .chain(result.outcomes.iter().map(|o| SummaryRow {
        parameter: &o.name,
        mean_value: o.value.as_ref().ok().copied(),
    }))
    .collect()
}

/// Write `Parameter,Mean Value`, anchor row first. Unresolved parameters get
/// an empty value cell.
pub fn write_csv_summary(result: &AggregationResult, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in summary_rows(result) {
        writer.serialize(row).context("writing summary row")?;
    }
    writer.flush().context("flushing summary")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON report for renderers
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct AnchorReport<'a> {
    pub column: &'a str,
    pub value: f64,
    pub frequency: usize,
    pub ellipse: Ellipse,
    pub inside_rows: &'a [usize],
}

#[derive(Debug, Serialize)]
pub struct ParameterReport<'a> {
    pub name: &'a str,
    pub status: &'static str,
    pub value: Option<f64>,
    pub ellipse: Option<Ellipse>,
    pub inside_rows: &'a [usize],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Everything a renderer needs to redraw the exact regions used.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub anchor: AnchorReport<'a>,
    pub parameters: Vec<ParameterReport<'a>>,
}

impl<'a> Report<'a> {
    pub fn new(result: &'a AggregationResult) -> Self {
        let anchor = AnchorReport {
            column: &result.anchor_column,
            value: result.anchor.value,
            frequency: result.anchor.frequency,
            ellipse: result.anchor.ellipse,
            inside_rows: &result.anchor.inside_rows,
        };
        let parameters = result
            .outcomes
            .iter()
            .map(|o| ParameterReport {
                name: &o.name,
                status: match &o.value {
                    Ok(_) => "ok",
                    Err(e) => e.status(),
                },
                value: o.value.as_ref().ok().copied(),
                ellipse: o.ellipse,
                inside_rows: &o.inside_rows,
                error: o.value.as_ref().err().map(|e| e.to_string()),
            })
            .collect();
        Report { anchor, parameters }
    }
}

pub fn write_json_report(result: &AggregationResult, path: &Path) -> Result<()> {
    let file =
        std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(file, &Report::new(result)).context("writing JSON report")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Console table
// ---------------------------------------------------------------------------

/// Plain-text summary for stdout.
pub fn format_table(result: &AggregationResult) -> String {
    let rows = summary_rows(result);
    let width = rows
        .iter()
        .map(|r| r.parameter.len())
        .max()
        .unwrap_or(0)
        .max("Parameter".len());

    let mut out = format!("{:<width$}  Mean Value\n", "Parameter");
    for (i, row) in rows.iter().enumerate() {
        let value = match row.mean_value {
            Some(v) => format!("{v:.4}"),
            None => {
                // rows[0] is the anchor, which always has a value.
                let reason = result.outcomes[i - 1]
                    .value
                    .as_ref()
                    .err()
                    .map_or("", |e| e.status());
                format!("- ({reason})")
            }
        };
        out.push_str(&format!("{:<width$}  {value}\n", row.parameter));
    }
    out
}
