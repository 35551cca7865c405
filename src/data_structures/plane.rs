//! Flat rectangular geometry for icon billboards.
//!
//! A [`PlaneGeometry`] starts as a `width` x `height` quad centred on the
//! origin in the XY plane, facing +Z. Affine transforms are baked into the
//! vertices directly, so the corrections applied by the icon factory survive
//! independently of the object's world transform.

use cgmath::{InnerSpace, Matrix, Matrix3, Matrix4, Rad, SquareMatrix, Vector3, Vector4};
use wgpu::util::DeviceExt;

/// Describes how a vertex type is laid out in a GPU buffer.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PlaneVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
    pub normal: [f32; 3],
}

impl Vertex for PlaneVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<PlaneVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 5]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Axis-aligned bounds of the transformed vertices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl Bounds {
    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }
}

#[derive(Clone, Debug)]
pub struct PlaneGeometry {
    width: f32,
    height: f32,
    vertices: Vec<PlaneVertex>,
    indices: Vec<u16>,
}

impl PlaneGeometry {
    /// Builds a single-segment quad. Vertex order is top-left, top-right,
    /// bottom-left, bottom-right with counter-clockwise triangles.
    pub fn new(width: f32, height: f32) -> Self {
        let half_w = width / 2.0;
        let half_h = height / 2.0;
        let normal = [0.0, 0.0, 1.0];
        let vertices = vec![
            PlaneVertex {
                position: [-half_w, half_h, 0.0],
                tex_coords: [0.0, 0.0],
                normal,
            },
            PlaneVertex {
                position: [half_w, half_h, 0.0],
                tex_coords: [1.0, 0.0],
                normal,
            },
            PlaneVertex {
                position: [-half_w, -half_h, 0.0],
                tex_coords: [0.0, 1.0],
                normal,
            },
            PlaneVertex {
                position: [half_w, -half_h, 0.0],
                tex_coords: [1.0, 1.0],
                normal,
            },
        ];
        Self {
            width,
            height,
            vertices,
            indices: vec![0, 2, 1, 2, 3, 1],
        }
    }

    /// Width the plane was created with, before any transform.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Height the plane was created with, before any transform.
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn vertices(&self) -> &[PlaneVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /**
     * Bakes `matrix` into every vertex. Normals go through the inverse transpose
     * so non-uniform and mirroring scales keep them perpendicular to the surface.
     */
    pub fn apply_matrix(&mut self, matrix: Matrix4<f32>) -> &mut Self {
        let linear = Matrix3::from_cols(
            matrix.x.truncate(),
            matrix.y.truncate(),
            matrix.z.truncate(),
        );
        let normal_matrix = linear
            .invert()
            .map(|inverse| inverse.transpose())
            .unwrap_or(linear);
        for vertex in self.vertices.iter_mut() {
            let p = Vector3::from(vertex.position);
            let p = matrix * Vector4::new(p.x, p.y, p.z, 1.0);
            vertex.position = p.truncate().into();
            let n = normal_matrix * Vector3::from(vertex.normal);
            if n.magnitude2() > 0.0 {
                vertex.normal = n.normalize().into();
            }
        }
        self
    }

    pub fn scale(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.apply_matrix(Matrix4::from_nonuniform_scale(x, y, z))
    }

    pub fn rotate_x<A: Into<Rad<f32>>>(&mut self, angle: A) -> &mut Self {
        self.apply_matrix(Matrix4::from_angle_x(angle))
    }

    pub fn rotate_y<A: Into<Rad<f32>>>(&mut self, angle: A) -> &mut Self {
        self.apply_matrix(Matrix4::from_angle_y(angle))
    }

    pub fn rotate_z<A: Into<Rad<f32>>>(&mut self, angle: A) -> &mut Self {
        self.apply_matrix(Matrix4::from_angle_z(angle))
    }

    pub fn translate(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.apply_matrix(Matrix4::from_translation(Vector3::new(x, y, z)))
    }

    /// The shared facing direction of the plane. All four vertices carry the same normal.
    pub fn normal(&self) -> Vector3<f32> {
        self.vertices
            .first()
            .map(|v| Vector3::from(v.normal))
            .unwrap_or_else(Vector3::unit_z)
    }

    pub fn bounds(&self) -> Bounds {
        let mut min = Vector3::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max = Vector3::new(f32::MIN, f32::MIN, f32::MIN);
        for vertex in &self.vertices {
            let [x, y, z] = vertex.position;
            min = Vector3::new(min.x.min(x), min.y.min(y), min.z.min(z));
            max = Vector3::new(max.x.max(x), max.y.max(y), max.z.max(z));
        }
        Bounds { min, max }
    }

    pub fn create_buffers(&self, device: &wgpu::Device, label: &str) -> (wgpu::Buffer, wgpu::Buffer) {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", label)),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", label)),
            contents: bytemuck::cast_slice(&self.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        (vertex_buffer, index_buffer)
    }
}
