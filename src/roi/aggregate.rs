use log::{debug, warn};

use super::anchor::Anchor;
use super::ellipse::Ellipse;
use super::error::RoiError;
use crate::config::RoiConfig;
use crate::data::filter::{rows_inside, select};
use crate::data::model::{Column, Dataset};
use crate::data::stats::{mean, std_dev};

// ---------------------------------------------------------------------------
// Per-parameter outcome
// ---------------------------------------------------------------------------

/// Result of one parameter pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterOutcome {
    pub name: String,
    /// Cruise-speed / parameter ellipse, `None` when the column is absent.
    pub ellipse: Option<Ellipse>,
    /// Rows inside `ellipse`; empty when the pass failed early.
    pub inside_rows: Vec<usize>,
    /// Filtered mean, or why there is none.
    pub value: Result<f64, RoiError>,
}

impl ParameterOutcome {
    fn failed(name: &str, ellipse: Option<Ellipse>, err: RoiError) -> Self {
        ParameterOutcome {
            name: name.to_string(),
            ellipse,
            inside_rows: Vec::new(),
            value: Err(err),
        }
    }
}

// ---------------------------------------------------------------------------
// AggregationResult
// ---------------------------------------------------------------------------

/// Anchor plus one outcome per parameter, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationResult {
    /// Name of the cruise-speed column the anchor was drawn from.
    pub anchor_column: String,
    pub anchor: Anchor,
    pub outcomes: Vec<ParameterOutcome>,
}

impl AggregationResult {
    /// Look up the outcome for a parameter.
    pub fn get(&self, name: &str) -> Option<&ParameterOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }

    /// `(name, mean)` for every resolved parameter.
    pub fn resolved(&self) -> impl Iterator<Item = (&str, f64)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.value.as_ref().ok().map(|v| (o.name.as_str(), *v)))
    }

    /// Number of parameters without a value.
    pub fn unresolved_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.value.is_err()).count()
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Parameters to aggregate: the configured list, or every column other than
/// the range and cruise-speed columns.
pub fn parameter_names(dataset: &Dataset, config: &RoiConfig) -> Vec<String> {
    match &config.parameters {
        Some(list) => list.clone(),
        None => dataset
            .column_names()
            .filter(|n| *n != config.range_column && *n != config.cruise_speed_column)
            .map(str::to_string)
            .collect(),
    }
}

/// Ellipse for one parameter: center `(anchor, mean(P))`, semi-axes
/// `(stddev(cruise), stddev(P))`.
pub fn parameter_ellipse(
    dataset: &Dataset,
    config: &RoiConfig,
    anchor: f64,
    parameter: &str,
) -> Result<Ellipse, RoiError> {
    let (cruise, column) = lookup(dataset, config, parameter)?;
    Ok(ellipse_for(cruise, column, anchor))
}

fn lookup<'a>(
    dataset: &'a Dataset,
    config: &RoiConfig,
    parameter: &str,
) -> Result<(&'a Column, &'a Column), RoiError> {
    let cruise = dataset
        .column(&config.cruise_speed_column)
        .ok_or_else(|| RoiError::MissingColumn(config.cruise_speed_column.clone()))?;
    let column = dataset
        .column(parameter)
        .ok_or_else(|| RoiError::MissingColumn(parameter.to_string()))?;
    Ok((cruise, column))
}

fn ellipse_for(cruise: &Column, column: &Column, anchor: f64) -> Ellipse {
    let cy = mean(&column.values).unwrap_or(f64::NAN);
    let a = std_dev(&cruise.values).unwrap_or(f64::NAN);
    let b = std_dev(&column.values).unwrap_or(f64::NAN);
    Ellipse::new([anchor, cy], [a, b])
}

/// Run a single parameter pass. Reads only the dataset and the anchor.
pub fn aggregate_parameter(
    dataset: &Dataset,
    config: &RoiConfig,
    anchor: f64,
    parameter: &str,
) -> ParameterOutcome {
    let (cruise, column) = match lookup(dataset, config, parameter) {
        Ok(cols) => cols,
        Err(err) => {
            warn!("Parameter '{parameter}' skipped: {err}");
            return ParameterOutcome::failed(parameter, None, err);
        }
    };

    let ellipse = ellipse_for(cruise, column, anchor);
    let inside_rows = match rows_inside(cruise, column, &ellipse) {
        Ok(rows) => rows,
        Err(err) => {
            warn!("Ellipse dimensions for parameter '{parameter}' are not valid: {err}");
            return ParameterOutcome::failed(parameter, Some(ellipse), err);
        }
    };

    let values = select(column, &inside_rows);
    let value = if values.is_empty() {
        warn!("No rows of '{parameter}' inside its ellipse");
        Err(RoiError::EmptyFilteredSubset(parameter.to_string()))
    } else {
        let m = values.iter().sum::<f64>() / values.len() as f64;
        debug!("{parameter}: mean {m} over {} rows", values.len());
        Ok(m)
    };

    ParameterOutcome {
        name: parameter.to_string(),
        ellipse: Some(ellipse),
        inside_rows,
        value,
    }
}

/// Aggregate every parameter around a resolved anchor.
///
/// Taking an [`Anchor`] rather than a bare number means this cannot run
/// until anchor resolution has succeeded.
pub fn aggregate(dataset: &Dataset, config: &RoiConfig, anchor: Anchor) -> AggregationResult {
    let outcomes = parameter_names(dataset, config)
        .iter()
        .map(|p| aggregate_parameter(dataset, config, anchor.value, p))
        .collect();

    AggregationResult {
        anchor_column: config.cruise_speed_column.clone(),
        anchor,
        outcomes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roi::anchor::resolve_anchor;

    fn scenario() -> Dataset {
        Dataset::new(vec![
            Column::from_values("Range", &[9000.0, 9500.0, 10500.0, 11000.0]),
            Column::from_values("CruiseSpeed", &[800.0, 800.0, 850.0, 900.0]),
            Column::from_values("WingSpan", &[30.0, 32.0, 34.0, 36.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_parameter_names_default_to_other_columns() {
        let ds = scenario();
        assert_eq!(parameter_names(&ds, &RoiConfig::default()), vec!["WingSpan"]);
    }

    #[test]
    fn test_wing_span_end_to_end() {
        let ds = scenario();
        let config = RoiConfig::default();
        let anchor = resolve_anchor(&ds, &config).unwrap();
        assert_eq!(anchor.value, 800.0);

        let result = aggregate(&ds, &config, anchor);
        let wing = result.get("WingSpan").unwrap();
        let ellipse = wing.ellipse.unwrap();
        assert_eq!(ellipse.center, [800.0, 33.0]);
        // Only (800, 32) is inside; (800, 30) misses on the span axis and
        // (850, 34) on the speed axis.
        assert_eq!(wing.inside_rows, vec![1]);
        assert_eq!(wing.value, Ok(32.0));
        assert_eq!(result.resolved().collect::<Vec<_>>(), vec![("WingSpan", 32.0)]);
    }

    #[test]
    fn test_missing_parameter_recorded() {
        let ds = scenario();
        let config = RoiConfig {
            parameters: Some(vec!["Height".into(), "WingSpan".into()]),
            ..RoiConfig::default()
        };
        let outcome = aggregate_parameter(&ds, &config, 800.0, "Height");
        assert_eq!(outcome.value, Err(RoiError::MissingColumn("Height".into())));
        assert!(outcome.ellipse.is_none());

        let anchor = resolve_anchor(&ds, &config).unwrap();
        let result = aggregate(&ds, &config, anchor);
        assert_eq!(result.outcomes.len(), 2);
        assert_eq!(result.outcomes[0].name, "Height");
        assert_eq!(result.unresolved_count(), 1);
    }

    #[test]
    fn test_zero_variance_parameter_is_degenerate() {
        let ds = Dataset::new(vec![
            Column::from_values("Range", &[9000.0, 9500.0, 10500.0, 11000.0]),
            Column::from_values("CruiseSpeed", &[800.0, 800.0, 850.0, 900.0]),
            Column::from_values("Engines", &[2.0, 2.0, 2.0, 2.0]),
            Column::from_values("WingSpan", &[30.0, 32.0, 34.0, 36.0]),
        ])
        .unwrap();
        let config = RoiConfig::default();
        let anchor = resolve_anchor(&ds, &config).unwrap();
        let result = aggregate(&ds, &config, anchor);

        let engines = result.get("Engines").unwrap();
        assert!(matches!(
            engines.value,
            Err(RoiError::DegenerateEllipse { b, .. }) if b == 0.0
        ));
        // The run carries on to the next parameter.
        assert_eq!(result.get("WingSpan").unwrap().value, Ok(32.0));
    }

    #[test]
    fn test_single_value_parameter_is_degenerate() {
        let ds = Dataset::new(vec![
            Column::from_values("CruiseSpeed", &[800.0, 850.0]),
            Column::new("Height", vec![Some(12.0), None]),
        ])
        .unwrap();
        let outcome = aggregate_parameter(&ds, &RoiConfig::default(), 800.0, "Height");
        assert!(matches!(outcome.value, Err(RoiError::DegenerateEllipse { .. })));
    }

    #[test]
    fn test_empty_subset_is_missing_not_zero() {
        // Anchor far outside the cruise-speed spread: nothing can be inside.
        let ds = scenario();
        let outcome = aggregate_parameter(&ds, &RoiConfig::default(), 5000.0, "WingSpan");
        assert_eq!(
            outcome.value,
            Err(RoiError::EmptyFilteredSubset("WingSpan".into()))
        );
        assert!(outcome.inside_rows.is_empty());
    }

    #[test]
    fn test_missing_cells_excluded_from_mean() {
        let ds = Dataset::new(vec![
            Column::from_values("CruiseSpeed", &[800.0, 800.0, 810.0, 900.0]),
            Column::new("Height", vec![Some(10.0), None, Some(12.0), Some(30.0)]),
        ])
        .unwrap();
        let outcome = aggregate_parameter(&ds, &RoiConfig::default(), 800.0, "Height");
        assert!(!outcome.inside_rows.contains(&1));
        assert_eq!(outcome.inside_rows, vec![0, 2]);
        assert_eq!(outcome.value, Ok(11.0));
    }

    #[test]
    fn test_rerun_is_identical() {
        let ds = scenario();
        let config = RoiConfig::default();
        let first = aggregate(&ds, &config, resolve_anchor(&ds, &config).unwrap());
        let second = aggregate(&ds, &config, resolve_anchor(&ds, &config).unwrap());
        assert_eq!(first, second);
    }
}
