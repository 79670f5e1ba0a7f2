//! Synthetic landmark generation for demos and tests.

mod sample;

pub use sample::{sample_front_landmarks, sample_side_landmarks};
