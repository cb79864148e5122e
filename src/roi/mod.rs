//! Region-of-interest engine: anchor resolution and per-parameter
//! filtered means.
//!
//! ```text
//!   Dataset
//!      │
//!      ▼
//!   ┌────────┐  (Range, CruiseSpeed) inside anchor ellipse
//!   │ anchor  │  → most frequent cruise speed
//!   └────────┘
//!      │ Anchor
//!      ▼
//!   ┌───────────┐  (CruiseSpeed, P) inside parameter ellipse
//!   │ aggregate  │  → mean of P, one outcome per parameter
//!   └───────────┘
//!      │
//!      ▼
//!   AggregationResult
//! ```
//!
//! Both stages share the single predicate in [`ellipse::contains`].

pub mod aggregate;
pub mod anchor;
pub mod ellipse;
pub mod error;

pub use aggregate::{aggregate, AggregationResult, ParameterOutcome};
pub use anchor::{resolve_anchor, Anchor};
pub use ellipse::Ellipse;
pub use error::RoiError;

use crate::config::RoiConfig;
use crate::data::model::Dataset;

/// Resolve the anchor, then aggregate every parameter around it.
///
/// Any anchor failure is returned as-is and no parameter pass runs.
pub fn analyse(dataset: &Dataset, config: &RoiConfig) -> Result<AggregationResult, RoiError> {
    let anchor = resolve_anchor(dataset, config)?;
    Ok(aggregate(dataset, config, anchor))
}
