use log::{debug, info};

use super::ellipse::Ellipse;
use super::error::RoiError;
use crate::config::RoiConfig;
use crate::data::filter::{rows_inside, select};
use crate::data::model::{Column, Dataset};
use crate::data::stats::{mean, mode, std_dev, value_counts};

/// A resolved anchor together with the region it was drawn from.
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor {
    /// Representative cruise speed.
    pub value: f64,
    /// How many inside rows carry `value`.
    pub frequency: usize,
    /// Range / cruise-speed ellipse.
    pub ellipse: Ellipse,
    /// Rows inside `ellipse`.
    pub inside_rows: Vec<usize>,
}

fn required_columns<'a>(
    dataset: &'a Dataset,
    config: &RoiConfig,
) -> Result<(&'a Column, &'a Column), RoiError> {
    let range = dataset
        .column(&config.range_column)
        .ok_or_else(|| RoiError::MissingColumn(config.range_column.clone()))?;
    let cruise = dataset
        .column(&config.cruise_speed_column)
        .ok_or_else(|| RoiError::MissingColumn(config.cruise_speed_column.clone()))?;
    Ok((range, cruise))
}

/// Build the anchor ellipse: center `(X0, mean(cruise))`, semi-axes
/// `(stddev(range), stddev(cruise))`.
pub fn anchor_ellipse(dataset: &Dataset, config: &RoiConfig) -> Result<Ellipse, RoiError> {
    let (range, cruise) = required_columns(dataset, config)?;
    let cy = mean(&cruise.values).unwrap_or(f64::NAN);
    let a = std_dev(&range.values).unwrap_or(f64::NAN);
    let b = std_dev(&cruise.values).unwrap_or(f64::NAN);
    Ok(Ellipse::new([config.range_threshold, cy], [a, b]))
}

/// Pick the most frequent cruise speed among rows inside the anchor ellipse.
///
/// Ties go to the smallest cruise speed. Fewer than two distinct values, or a
/// winning frequency below `config.min_anchor_frequency`, leave the anchor
/// unresolved.
pub fn resolve_anchor(dataset: &Dataset, config: &RoiConfig) -> Result<Anchor, RoiError> {
    let ellipse = anchor_ellipse(dataset, config)?;
    ellipse.validate()?;

    let (range, cruise) = required_columns(dataset, config)?;
    let inside_rows = rows_inside(range, cruise, &ellipse)?;
    let counts = value_counts(select(cruise, &inside_rows));
    debug!(
        "anchor ellipse {:?}: {} rows inside, {} distinct cruise speeds",
        ellipse,
        inside_rows.len(),
        counts.len()
    );

    let unresolved = RoiError::UnresolvedAnchor {
        inside: inside_rows.len(),
        distinct: counts.len(),
    };
    if counts.len() < 2 {
        return Err(unresolved);
    }
    let (value, frequency) = mode(&counts).ok_or_else(|| unresolved.clone())?;
    if frequency < config.min_anchor_frequency {
        return Err(unresolved);
    }

    info!("resolved anchor {} = {value} ({frequency} occurrences)", config.cruise_speed_column);
    Ok(Anchor {
        value,
        frequency,
        ellipse,
        inside_rows,
    })
}
