// Library-level pipeline tests: load a table from disk, resolve the anchor,
// aggregate, and check that renderer-facing helpers agree with the result.

use std::fs;
use std::sync::Arc;

use aero_roi::config::RoiConfig;
use aero_roi::data::filter::rows_inside;
use aero_roi::data::loader::load_file;
use aero_roi::roi::aggregate::parameter_ellipse;
use aero_roi::roi::{analyse, RoiError};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use tempfile::TempDir;

const SCENARIO_CSV: &str = "\
Model,Range,CruiseSpeed,WingSpan
A,9000,800,30
B,9500,800,32
C,10500,850,34
D,11000,900,36
";

// ============================================================================
// End-to-end scenario
// ============================================================================

#[test]
fn test_scenario_from_csv() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("designs.csv");
    fs::write(&path, SCENARIO_CSV).unwrap();

    let dataset = load_file(&path).unwrap();
    let result = analyse(&dataset, &RoiConfig::default()).unwrap();

    assert_eq!(result.anchor.value, 800.0);
    assert_eq!(result.anchor.ellipse.center, [10000.0, 837.5]);
    assert_eq!(result.outcomes.len(), 1);
    assert_eq!(result.get("WingSpan").unwrap().value, Ok(32.0));
}

#[test]
fn test_rerun_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("designs.csv");
    fs::write(&path, SCENARIO_CSV).unwrap();

    let first = analyse(&load_file(&path).unwrap(), &RoiConfig::default()).unwrap();
    let second = analyse(&load_file(&path).unwrap(), &RoiConfig::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_unresolved_anchor_stops_aggregation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("designs.csv");
    fs::write(&path, SCENARIO_CSV).unwrap();

    let config = RoiConfig {
        min_anchor_frequency: 2,
        ..RoiConfig::default()
    };
    let err = analyse(&load_file(&path).unwrap(), &config).unwrap_err();
    assert!(matches!(err, RoiError::UnresolvedAnchor { .. }));
}

// ============================================================================
// Renderer helpers reproduce the aggregation region
// ============================================================================

#[test]
fn test_renderer_sees_same_rows() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("designs.csv");
    fs::write(&path, SCENARIO_CSV).unwrap();

    let dataset = load_file(&path).unwrap();
    let config = RoiConfig::default();
    let result = analyse(&dataset, &config).unwrap();

    let ellipse = parameter_ellipse(&dataset, &config, result.anchor.value, "WingSpan").unwrap();
    let rows = rows_inside(
        dataset.column("CruiseSpeed").unwrap(),
        dataset.column("WingSpan").unwrap(),
        &ellipse,
    )
    .unwrap();

    let outcome = result.get("WingSpan").unwrap();
    assert_eq!(outcome.ellipse, Some(ellipse));
    assert_eq!(outcome.inside_rows, rows);
}

// ============================================================================
// Parquet input
// ============================================================================

#[test]
fn test_scenario_from_parquet() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("designs.parquet");

    let schema = Arc::new(Schema::new(vec![
        Field::new("Model", DataType::Utf8, false),
        Field::new("Range", DataType::Int64, false),
        Field::new("CruiseSpeed", DataType::Float64, true),
        Field::new("WingSpan", DataType::Float64, true),
        Field::new("Height", DataType::Float64, true),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(vec!["A", "B", "C", "D"])),
        Arc::new(Int64Array::from(vec![9000, 9500, 10500, 11000])),
        Arc::new(Float64Array::from(vec![800.0, 800.0, 850.0, 900.0])),
        Arc::new(Float64Array::from(vec![30.0, 32.0, 34.0, 36.0])),
        Arc::new(Float64Array::from(vec![Some(12.0), None, None, None])),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();
    let file = fs::File::create(&path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let dataset = load_file(&path).unwrap();
    assert!(dataset.column("Model").is_none());
    assert_eq!(
        dataset.column("Range").unwrap().values,
        vec![Some(9000.0), Some(9500.0), Some(10500.0), Some(11000.0)]
    );

    let result = analyse(&dataset, &RoiConfig::default()).unwrap();
    assert_eq!(result.get("WingSpan").unwrap().value, Ok(32.0));
    // One present value: no standard deviation, so no usable ellipse.
    assert!(matches!(
        result.get("Height").unwrap().value,
        Err(RoiError::DegenerateEllipse { .. })
    ));
}
