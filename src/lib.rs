//! Region-of-interest aggregation of aircraft design parameters.
//!
//! A representative cruise speed is picked from the rows inside an ellipse
//! around a range threshold; every other parameter is then averaged over the
//! rows inside its own ellipse centred on that cruise speed.

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod export;
pub mod roi;
