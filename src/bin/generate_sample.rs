use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use aero_roi::config::{AIRCRAFT_CRUISE_SPEED_COLUMN, AIRCRAFT_PARAMETERS, AIRCRAFT_RANGE_COLUMN};

const ROWS: usize = 120;

/// Typical jet cruise speeds in km/h; drawn from a short list so the
/// anchor stage finds repeated values.
const CRUISE_SPEEDS: [f64; 8] = [780.0, 800.0, 830.0, 850.0, 870.0, 900.0, 903.0, 910.0];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// One synthetic design: range, cruise speed, then the 15 parameters in
/// `AIRCRAFT_PARAMETERS` order. Missing cells are `None`.
fn generate_design(rng: &mut SimpleRng) -> (f64, f64, Vec<Option<f64>>) {
    let range = rng.gauss(9000.0, 3500.0).clamp(1500.0, 17000.0);
    let cruise = rng.pick(&CRUISE_SPEEDS);

    let takeoff = (range * 30.0 + rng.gauss(0.0, 40_000.0)).max(20_000.0);
    let empty_ratio = rng.gauss(0.52, 0.04).clamp(0.4, 0.65);
    let empty = takeoff * empty_ratio;
    let wing_loading = rng.gauss(620.0, 60.0);
    let wing_area = takeoff / wing_loading;
    let aspect = rng.gauss(9.0, 0.8);
    let span = (aspect * wing_area).sqrt();
    let engines = if takeoff > 300_000.0 { rng.pick(&[2.0, 4.0]) } else { 2.0 };
    let tw = rng.gauss(0.29, 0.03);
    let thrust = tw * takeoff * 9.81 / 1000.0 / engines;
    let length = span * rng.gauss(1.05, 0.07);
    let height = length * rng.gauss(0.25, 0.02);
    let sweep = rng.gauss(30.0, 3.0);
    let ceiling = rng.gauss(12.5, 0.6);
    let fineness = length / rng.gauss(5.5, 0.5);

    let params = vec![
        Some(span),
        Some(wing_area),
        Some(wing_loading),
        Some(aspect),
        Some(tw),
        Some(engines),
        Some(thrust),
        Some(empty),
        Some(takeoff),
        Some(length),
        Some(height),
        Some(sweep),
        // Ceiling is often unpublished.
        (rng.next_f64() > 0.1).then_some(ceiling),
        Some(fineness),
        Some(empty_ratio),
    ];
    (range, cruise, params)
}

fn write_parquet(path: &Path, names: &[String], columns: Vec<ArrayRef>) -> Result<()> {
    let mut fields = vec![Field::new("Model", DataType::Utf8, false)];
    fields.extend(names.iter().map(|n| Field::new(n, DataType::Float64, true)));
    let schema = Arc::new(Schema::new(fields));

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;
    let file = std::fs::File::create(path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn write_csv(path: &Path, names: &[String], models: &[String], rows: &[Vec<Option<f64>>]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating output file")?;
    let mut header = vec!["Model".to_string()];
    header.extend(names.iter().cloned());
    writer.write_record(&header)?;
    for (model, row) in models.iter().zip(rows) {
        let mut record = vec![model.clone()];
        record.extend(row.iter().map(|v| v.map(|x| format!("{x:.3}")).unwrap_or_default()));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_aircraft.parquet".to_string());
    let output_path = Path::new(&output);

    let mut rng = SimpleRng::new(42);

    let mut names = vec![
        AIRCRAFT_RANGE_COLUMN.to_string(),
        AIRCRAFT_CRUISE_SPEED_COLUMN.to_string(),
    ];
    names.extend(AIRCRAFT_PARAMETERS.iter().map(|p| p.to_string()));

    // Row-major values, one Vec per design in `names` order.
    let mut models = Vec::with_capacity(ROWS);
    let mut rows = Vec::with_capacity(ROWS);
    for i in 0..ROWS {
        let (range, cruise, params) = generate_design(&mut rng);
        let mut row = vec![Some(range), Some(cruise)];
        row.extend(params);
        models.push(format!("Design-{i:03}"));
        rows.push(row);
    }

    let is_csv = output_path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    if is_csv {
        write_csv(output_path, &names, &models, &rows)?;
    } else {
        let mut columns: Vec<ArrayRef> = vec![Arc::new(StringArray::from(models.clone()))];
        for c in 0..names.len() {
            let values: Float64Array = rows.iter().map(|r| r[c]).collect();
            columns.push(Arc::new(values));
        }
        write_parquet(output_path, &names, columns)?;
    }

    println!(
        "Wrote {ROWS} designs ({} numeric columns each) to {output}",
        names.len()
    );
    Ok(())
}
