use thiserror::Error;

/// Failures of the region-of-interest engine.
///
/// Whether an error ends the run depends on the stage that produced it: any
/// error from anchor resolution is fatal, while errors from a parameter pass
/// are recorded against that parameter and the run continues.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoiError {
    #[error("column '{0}' not found in data")]
    MissingColumn(String),

    #[error("invalid ellipse: semi-axes ({a}, {b}) must both be positive")]
    DegenerateEllipse { a: f64, b: f64 },

    #[error("no anchor value: {inside} rows inside the anchor ellipse, {distinct} distinct cruise speeds")]
    UnresolvedAnchor { inside: usize, distinct: usize },

    #[error("no rows of '{0}' fall inside its ellipse")]
    EmptyFilteredSubset(String),
}

impl RoiError {
    /// Short machine-readable status used by the exporters.
    pub fn status(&self) -> &'static str {
        match self {
            RoiError::MissingColumn(_) => "not_found",
            RoiError::DegenerateEllipse { .. } => "degenerate",
            RoiError::UnresolvedAnchor { .. } => "unresolved_anchor",
            RoiError::EmptyFilteredSubset(_) => "empty",
        }
    }
}
