use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Column presets
// ---------------------------------------------------------------------------

/// Parameter columns of the aircraft design sheet, in report order.
pub const AIRCRAFT_PARAMETERS: [&str; 15] = [
    "Wing Span (m)",
    "Wing Area (m^2)",
    "Wing Loading (kg/m^2)",
    "Aspect Ratio",
    "Thrust-to-Weight Ratio",
    "Number of Engines",
    "Single Engine Thrust(KN)",
    "Empty Weight of Flight (kg)",
    "Takeoff Weight (kg)",
    "Total Length (m)",
    "Height (m)",
    "Sweep Angle (deg)",
    "Service Ceiling (km)",
    "Fineness Ratio",
    "Empty to Takeoff Weight Ratio",
];

pub const AIRCRAFT_RANGE_COLUMN: &str = "Range (km)";
pub const AIRCRAFT_CRUISE_SPEED_COLUMN: &str = "Cruise Speed (km/hr)";

/// Named bundle of column names and parameter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Preset {
    /// `Range` / `CruiseSpeed`, every other numeric column is a parameter
    #[default]
    Generic,
    /// Aircraft design sheet headers with the fixed 15-parameter list
    Aircraft,
}

// ---------------------------------------------------------------------------
// RoiConfig
// ---------------------------------------------------------------------------

/// Settings for anchor resolution and parameter aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoiConfig {
    /// Column holding the range values (x axis of the anchor ellipse).
    pub range_column: String,
    /// Column holding the cruise speeds.
    pub cruise_speed_column: String,
    /// X0: center of the anchor ellipse on the range axis.
    pub range_threshold: f64,
    /// Minimum number of inside rows the anchor value must occur in.
    pub min_anchor_frequency: usize,
    /// Parameters to aggregate. `None` means every other dataset column.
    pub parameters: Option<Vec<String>>,
}

impl Default for RoiConfig {
    fn default() -> Self {
        Self {
            range_column: "Range".to_string(),
            cruise_speed_column: "CruiseSpeed".to_string(),
            range_threshold: 10_000.0,
            min_anchor_frequency: 1,
            parameters: None,
        }
    }
}

impl RoiConfig {
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Generic => Self::default(),
            Preset::Aircraft => Self {
                range_column: AIRCRAFT_RANGE_COLUMN.to_string(),
                cruise_speed_column: AIRCRAFT_CRUISE_SPEED_COLUMN.to_string(),
                parameters: Some(AIRCRAFT_PARAMETERS.iter().map(|p| p.to_string()).collect()),
                ..Self::default()
            },
        }
    }

    /// Overlay the keys present in a JSON config file onto `self`.
    pub fn merge_json_file(self, path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let patch: serde_json::Value = serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        let serde_json::Value::Object(patch) = patch else {
            bail!("config file {} must contain a JSON object", path.display());
        };

        let mut merged = serde_json::to_value(&self).context("serializing config")?;
        if let serde_json::Value::Object(base) = &mut merged {
            base.extend(patch);
        }
        serde_json::from_value(merged).with_context(|| format!("invalid config in {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if !self.range_threshold.is_finite() {
            bail!("range threshold must be finite, got {}", self.range_threshold);
        }
        if self.min_anchor_frequency == 0 {
            bail!("minimum anchor frequency must be at least 1");
        }
        if self.range_column == self.cruise_speed_column {
            bail!(
                "range and cruise speed columns must differ (both '{}')",
                self.range_column
            );
        }
        Ok(())
    }
}
