//! Landmark points and the per-run landmark set.
//!
//! Landmarks arrive from an external detection service as normalized
//! image-relative coordinates (`id -> {x, y}`); the engine only reads them.
//! Missing landmarks are expected (partial profiles) and are not errors.

use std::collections::HashMap;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// One detected facial landmark.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandmarkPoint {
    pub x: f64,
    pub y: f64,
}

/// All landmarks available for one analysis run, front and side merged.
///
/// Lookups are by the stable string ids used across the project
/// (`left_zygion`, `menton`, `gonion_bottom`, ...).
#[derive(Debug, Clone, Default)]
pub struct LandmarkSet {
    points: HashMap<String, LandmarkPoint>,
}

impl LandmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, x: f64, y: f64) {
        self.points.insert(id.into(), LandmarkPoint { x, y });
    }

    /// Merge another set into this one; later insertions win on id clashes.
    pub fn merge(&mut self, other: LandmarkSet) {
        self.points.extend(other.points);
    }

    pub fn get(&self, id: &str) -> Option<Point2<f64>> {
        self.points.get(id).map(|p| Point2::new(p.x, p.y))
    }

    pub fn remove(&mut self, id: &str) -> Option<LandmarkPoint> {
        self.points.remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.points.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, LandmarkPoint)> {
        self.points.iter().map(|(id, p)| (id.as_str(), *p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_point2() {
        let mut set = LandmarkSet::new();
        set.insert("menton", 0.5, 0.9);
        let p = set.get("menton").unwrap();
        assert_eq!(p.x, 0.5);
        assert_eq!(p.y, 0.9);
        assert!(set.get("unknown").is_none());
    }

    #[test]
    fn merge_overwrites_on_clash() {
        let mut a = LandmarkSet::new();
        a.insert("menton", 0.5, 0.9);
        let mut b = LandmarkSet::new();
        b.insert("menton", 0.4, 0.8);
        a.merge(b);
        assert_eq!(a.get("menton").unwrap().x, 0.4);
        assert_eq!(a.len(), 1);
    }
}
