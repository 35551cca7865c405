//! Object transformation data.
//!
//! Every marker owns exactly one [`Instance`]: icons keep it fixed after
//! construction, signs share theirs with the entrance tween and the
//! camera-facing pass. [`InstanceRaw`] is the packed form uploaded next to the
//! icon vertices.

use cgmath::{InnerSpace, Matrix3, One, SquareMatrix, Vector3};

use crate::data_structures::plane::Vertex;

/// Position, rotation (as quaternion) and scale of a scene object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Instance {
    pub position: cgmath::Vector3<f32>,
    pub rotation: cgmath::Quaternion<f32>,
    pub scale: cgmath::Vector3<f32>,
}

impl Instance {
    /// Create a new instance with identity transformation (no move, rotate, or scale).
    pub fn new() -> Self {
        Self {
            position: cgmath::Vector3::new(0.0, 0.0, 0.0),
            // `Quaternion::one()` is the identity quaternion (no rotation)
            rotation: cgmath::Quaternion::one(),
            scale: cgmath::Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn with_uniform_scale(mut self, factor: f32) -> Self {
        self.scale = cgmath::Vector3::new(factor, factor, factor);
        self
    }

    pub fn to_matrix(&self) -> cgmath::Matrix4<f32> {
        cgmath::Matrix4::from_translation(self.position)
            * cgmath::Matrix4::from(self.rotation)
            * cgmath::Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    /// The local +Z axis in world space. DOM panels and icon planes both face +Z.
    pub fn forward(&self) -> cgmath::Vector3<f32> {
        self.rotation * Vector3::unit_z()
    }

    /**
     * Rotates the instance so that its +Z axis points at `target`, keeping +Y as up.
     *
     * When the direction is (anti-)parallel to +Y the up hint falls back to +Z.
     * Returns `false` and leaves the rotation untouched if `target` coincides
     * with the instance position.
     */
    pub fn look_at(&mut self, target: cgmath::Vector3<f32>) -> bool {
        let direction = target - self.position;
        if direction.magnitude2() <= f32::EPSILON * f32::EPSILON {
            return false;
        }
        let z = direction.normalize();
        let up = if z.cross(Vector3::unit_y()).magnitude2() <= 1e-12 {
            Vector3::unit_z()
        } else {
            Vector3::unit_y()
        };
        let x = up.cross(z).normalize();
        let y = z.cross(x);
        self.rotation = Matrix3::from_cols(x, y, z).into();
        true
    }

    pub fn to_raw(&self) -> InstanceRaw {
        let world_matrix = self.to_matrix();
        let handedness = world_matrix.determinant().signum();
        InstanceRaw {
            model: world_matrix.into(),
            normal: cgmath::Matrix3::from(self.rotation).into(),
            handedness,
        }
    }
}

impl From<cgmath::Vector3<f32>> for Instance {
    fn from(position: cgmath::Vector3<f32>) -> Self {
        Instance {
            position,
            ..Default::default()
        }
    }
}

impl Default for Instance {
    fn default() -> Self {
        Self::new()
    }
}

/**
 * The raw instance is the actual data stored on the GPU
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    model: [[f32; 4]; 4],
    normal: [[f32; 3]; 3],
    handedness: f32,
}

/**
 * Stride layout here: the model matrix as four vec4s, the rotation as three vec3s
 * and the determinant sign so mirrored icons can correct their normals.
 */
impl InstanceRaw {
    const ATTRIBUTES: [wgpu::VertexAttribute; 8] = wgpu::vertex_attr_array![
        5 => Float32x4,
        6 => Float32x4,
        7 => Float32x4,
        8 => Float32x4,
        9 => Float32x3,
        10 => Float32x3,
        11 => Float32x3,
        12 => Float32,
    ];
}

impl Vertex for InstanceRaw {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceRaw>() as wgpu::BufferAddress,
            // Advance once per instance, not once per vertex
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}
