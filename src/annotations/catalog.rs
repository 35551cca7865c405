//! Icon types: which texture they draw and how their plane is corrected.
//!
//! Both tables are plain data keyed by type name, so introducing a marker type
//! means adding entries here (or to the JSON tables) and nothing else.

use std::collections::HashMap;

use cgmath::{Deg, Matrix4};
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct IconCatalogEntry {
    pub source: String,
    pub pixel_height: u32,
    pub pixel_width: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct IconCatalog {
    entries: HashMap<String, IconCatalogEntry>,
}

impl IconCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The icon types shipped with the map.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.insert("face", "map/icons/face.png", 194, 183);
        catalog.insert("rock", "map/icons/stone.png", 273, 264);
        catalog.insert("rocket", "map/icons/rocket.png", 576, 478);
        catalog.insert("track", "map/icons/track.png", 579, 1129);
        catalog.insert("runner", "map/icons/runner.png", 300, 450);
        catalog.insert("tree", "map/icons/tree.png", 362, 282);
        // stone and rock are drawn identically
        catalog.insert("stone", "map/icons/rock.png", 273, 264);
        catalog
    }

    pub fn insert(&mut self, type_name: &str, source: &str, pixel_height: u32, pixel_width: u32) {
        self.entries.insert(
            type_name.to_string(),
            IconCatalogEntry {
                source: source.to_string(),
                pixel_height,
                pixel_width,
            },
        );
    }

    pub fn get(&self, type_name: &str) -> Option<&IconCatalogEntry> {
        self.entries.get(type_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries with a zero dimension cannot produce a plane.
    pub fn invalid_entries(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .entries
            .iter()
            .filter(|(_, e)| e.pixel_height == 0 || e.pixel_width == 0)
            .map(|(name, _)| name.as_str())
            .collect();
        names.sort_unstable();
        names
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct AxisRotation {
    pub axis: Axis,
    pub degrees: f32,
}

impl AxisRotation {
    pub fn new(axis: Axis, degrees: f32) -> Self {
        Self { axis, degrees }
    }

    pub fn to_matrix(&self) -> Matrix4<f32> {
        let angle = Deg(self.degrees);
        match self.axis {
            Axis::X => Matrix4::from_angle_x(angle),
            Axis::Y => Matrix4::from_angle_y(angle),
            Axis::Z => Matrix4::from_angle_z(angle),
        }
    }
}

/// Geometry policy for one icon type. Rotations are applied in list order.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CorrectionPolicy {
    pub rotations: Vec<AxisRotation>,
    /// Used when a placement does not say whether it is flipped.
    pub flipped_by_default: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct CorrectionTable {
    policies: HashMap<String, CorrectionPolicy>,
}

impl CorrectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut table = Self::new();
        table.insert(
            "track",
            CorrectionPolicy {
                rotations: vec![
                    AxisRotation::new(Axis::Y, -9.0),
                    AxisRotation::new(Axis::X, -65.0),
                ],
                flipped_by_default: false,
            },
        );
        table.insert(
            "rocket",
            CorrectionPolicy {
                rotations: vec![AxisRotation::new(Axis::Z, -10.0)],
                flipped_by_default: false,
            },
        );
        table
    }

    pub fn insert(&mut self, type_name: &str, policy: CorrectionPolicy) {
        self.policies.insert(type_name.to_string(), policy);
    }

    /// Types without an entry get the empty policy: no rotation, not flipped.
    pub fn policy(&self, type_name: &str) -> CorrectionPolicy {
        self.policies.get(type_name).cloned().unwrap_or_default()
    }
}
