//! Placement authoring helper.
//!
//! The map texture lies on a tilted plane in the scene. `MapProjection`
//! rotates a point measured on the flat map into scene coordinates, which is
//! how the placement tables are produced.

use cgmath::{Deg, Matrix3, Vector3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapProjection {
    pub x_degrees: f32,
    pub y_degrees: f32,
    pub z_degrees: f32,
}

impl Default for MapProjection {
    fn default() -> Self {
        Self {
            x_degrees: -65.80,
            y_degrees: -9.20,
            z_degrees: -78.00,
        }
    }
}

impl MapProjection {
    /// Rotation about X first, then Y, then Z.
    pub fn matrix(&self) -> Matrix3<f32> {
        Matrix3::from_angle_z(Deg(self.z_degrees))
            * Matrix3::from_angle_y(Deg(self.y_degrees))
            * Matrix3::from_angle_x(Deg(self.x_degrees))
    }

    pub fn project(&self, point: Vector3<f32>) -> Vector3<f32> {
        self.matrix() * point
    }
}
