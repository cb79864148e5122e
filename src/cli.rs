//! CLI argument parsing for aero-roi

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::config::{Preset, RoiConfig};

#[derive(Parser, Debug)]
#[command(name = "aero-roi")]
#[command(version)]
#[command(
    about = "Derive representative design parameters from the rows inside statistical ellipses",
    long_about = None
)]
pub struct Cli {
    /// Design table to analyse (.csv, .json or .parquet)
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Column naming preset
    #[arg(long, value_enum, default_value = "generic")]
    pub preset: Preset,

    /// JSON config file; its keys override the preset
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Range column name
    #[arg(long = "range-column", value_name = "NAME")]
    pub range_column: Option<String>,

    /// Cruise speed column name
    #[arg(long = "cruise-column", value_name = "NAME")]
    pub cruise_column: Option<String>,

    /// Range value at the center of the anchor ellipse (default: 10000)
    #[arg(short = 'x', long = "range-threshold", value_name = "X0")]
    pub range_threshold: Option<f64>,

    /// Occurrences the anchor cruise speed needs inside the anchor ellipse (default: 1)
    #[arg(long = "min-anchor-frequency", value_name = "N")]
    pub min_anchor_frequency: Option<usize>,

    /// Parameter to aggregate; repeat for several (default: all other columns)
    #[arg(short = 'p', long = "param", value_name = "NAME")]
    pub params: Vec<String>,

    /// Summary table output path
    #[arg(short, long, value_name = "FILE", default_value = "roi_analysis.csv")]
    pub output: PathBuf,

    /// Also write a JSON report with every ellipse and inside row set
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,
}

impl Cli {
    /// Resolve the effective configuration: preset, then config file, then flags.
    pub fn roi_config(&self) -> Result<RoiConfig> {
        let mut config = RoiConfig::from_preset(self.preset);
        if let Some(path) = &self.config {
            config = config.merge_json_file(path)?;
        }
        if let Some(name) = &self.range_column {
            config.range_column = name.clone();
        }
        if let Some(name) = &self.cruise_column {
            config.cruise_speed_column = name.clone();
        }
        if let Some(x0) = self.range_threshold {
            config.range_threshold = x0;
        }
        if let Some(n) = self.min_anchor_frequency {
            config.min_anchor_frequency = n;
        }
        if !self.params.is_empty() {
            config.parameters = Some(self.params.clone());
        }
        config.validate()?;
        Ok(config)
    }
}
