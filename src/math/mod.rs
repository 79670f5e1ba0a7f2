//! Scoring-curve math primitives.

pub mod bezier;
pub mod decay;

pub use bezier::{eval_piecewise, validate_curve_points};
pub use decay::exponential_score;
