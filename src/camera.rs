//! Camera boundary.
//!
//! The marker system only ever needs the camera's world-space position. It is
//! read from the world matrix, never from the local transform, so cameras
//! mounted on animated rigs are tracked correctly.

use cgmath::{Matrix4, Vector3};

use crate::data_structures::instance::Instance;

pub trait WorldCamera {
    fn world_matrix(&self) -> Matrix4<f32>;

    fn world_position(&self) -> Vector3<f32> {
        self.world_matrix().w.truncate()
    }
}

impl WorldCamera for Matrix4<f32> {
    fn world_matrix(&self) -> Matrix4<f32> {
        *self
    }
}

/**
 * A camera transform nested inside zero or more parent transforms.
 *
 * `parents` is ordered from the scene root down to the camera's direct parent.
 */
#[derive(Clone, Debug, Default)]
pub struct CameraRig {
    pub parents: Vec<Instance>,
    pub local: Instance,
}

impl CameraRig {
    pub fn new(local: Instance) -> Self {
        Self {
            parents: Vec::new(),
            local,
        }
    }

    /// Wraps the whole rig in a new outermost parent.
    pub fn with_parent(mut self, parent: Instance) -> Self {
        self.parents.insert(0, parent);
        self
    }
}

impl WorldCamera for CameraRig {
    fn world_matrix(&self) -> Matrix4<f32> {
        self.parents
            .iter()
            .rev()
            .fold(self.local.to_matrix(), |world, parent| parent.to_matrix() * world)
    }
}
