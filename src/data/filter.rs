use super::model::Column;
use crate::roi::ellipse::Ellipse;
use crate::roi::error::RoiError;

// ---------------------------------------------------------------------------
// Region filter: which rows fall inside an ellipse
// ---------------------------------------------------------------------------

/// Return indices of rows whose `(x, y)` pair lies inside `ellipse`.
///
/// This is the same predicate the aggregation uses, so a renderer calling it
/// highlights exactly the rows that were averaged.
///
/// * A row with a missing `x` or `y` is never inside.
/// * A degenerate ellipse is an error, never an empty selection.
pub fn rows_inside(x: &Column, y: &Column, ellipse: &Ellipse) -> Result<Vec<usize>, RoiError> {
    ellipse.validate()?;
    let mut rows = Vec::new();
    for (i, (xv, yv)) in x.values.iter().zip(&y.values).enumerate() {
        let (Some(xv), Some(yv)) = (xv, yv) else {
            continue;
        };
        if ellipse.contains(*xv, *yv)? {
            rows.push(i);
        }
    }
    Ok(rows)
}

/// Values of `column` at the given row indices, skipping missing cells.
pub fn select(column: &Column, rows: &[usize]) -> Vec<f64> {
    rows.iter()
        .filter_map(|&i| column.values.get(i).copied().flatten())
        .collect()
}
