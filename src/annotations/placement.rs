//! Declarative marker placements.

use cgmath::Vector3;
use serde::{Deserialize, Deserializer};

fn vector3<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vector3<f32>, D::Error> {
    let [x, y, z] = <[f32; 3]>::deserialize(deserializer)?;
    Ok(Vector3::new(x, y, z))
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct IconPlacement {
    #[serde(deserialize_with = "vector3")]
    pub position: Vector3<f32>,
    #[serde(rename = "type")]
    pub type_name: String,
    /// `None` defers to the type's correction policy.
    #[serde(default)]
    pub flipped: Option<bool>,
}

impl IconPlacement {
    pub fn new(position: [f32; 3], type_name: &str) -> Self {
        Self {
            position: position.into(),
            type_name: type_name.to_string(),
            flipped: None,
        }
    }

    pub fn flipped(mut self) -> Self {
        self.flipped = Some(true);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SignPlacement {
    #[serde(deserialize_with = "vector3")]
    pub position: Vector3<f32>,
    pub text: String,
    pub url: String,
    /// Declaration order; drives the entrance stagger.
    #[serde(skip)]
    pub sequence_index: usize,
}

impl SignPlacement {
    pub fn new(position: [f32; 3], text: &str, url: &str) -> Self {
        Self {
            position: position.into(),
            text: text.to_string(),
            url: url.to_string(),
            sequence_index: 0,
        }
    }
}

/// Assigns each sign its position in declaration order.
pub fn sequence_signs(mut signs: Vec<SignPlacement>) -> Vec<SignPlacement> {
    signs
        .iter_mut()
        .enumerate()
        .for_each(|(i, sign)| sign.sequence_index = i);
    signs
}

pub fn builtin_icon_placements() -> Vec<IconPlacement> {
    vec![
        IconPlacement::new([-1.808, -0.505, 0.53], "tree"),
        IconPlacement::new([-1.151, -0.43, 0.233], "track"),
        IconPlacement::new([-1.766, -0.263, 0.087], "stone").flipped(),
        IconPlacement::new([-0.1, 0.5, -0.5], "rocket").flipped(),
        IconPlacement::new([-2.109, -0.285, -0.098], "face"),
        IconPlacement::new([1.01, 0.162, 0.2], "face").flipped(),
        IconPlacement::new([1.16, 0.13, 0.3], "face"),
        IconPlacement::new([1.31, 0.282, 0.0], "face"),
        IconPlacement::new([0.88, 0.26, -0.1], "stone"),
        IconPlacement::new([1.884, 0.441, -0.084], "tree"),
        IconPlacement::new([2.206, 0.497, -0.125], "tree"),
        IconPlacement::new([-1.151, -0.3, 0.233], "runner"),
    ]
}

pub fn builtin_sign_placements() -> Vec<SignPlacement> {
    sequence_signs(vec![SignPlacement::new(
        [0.0, 0.2, -0.091],
        "How Sidequest works",
        "/about",
    )])
}
