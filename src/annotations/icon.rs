//! Icon billboards: textured planes standing on a fixed point.

use cgmath::Vector3;
use wgpu::util::DeviceExt;

use crate::{
    annotations::{
        catalog::{CorrectionPolicy, CorrectionTable, IconCatalog},
        placement::IconPlacement,
    },
    config::AnnotationConfig,
    data_structures::{
        instance::Instance,
        material::{IconMaterial, Tint},
        plane::PlaneGeometry,
    },
    resources::texture::TextureProvider,
};

/// A constructed icon, ready to be handed to the renderer.
#[derive(Clone, Debug)]
pub struct RenderedIcon {
    pub type_name: String,
    pub geometry: PlaneGeometry,
    pub material: IconMaterial,
    pub transform: Instance,
    pub render_order: i32,
}

/// GPU buffers for one icon: the plane, its indices and a single instance.
pub struct IconBuffers {
    pub vertex: wgpu::Buffer,
    pub index: wgpu::Buffer,
    pub instance: wgpu::Buffer,
    pub num_indices: u32,
}

impl RenderedIcon {
    pub fn position(&self) -> Vector3<f32> {
        self.transform.position
    }

    pub fn create_buffers(&self, device: &wgpu::Device) -> IconBuffers {
        let (vertex, index) = self.geometry.create_buffers(device, &self.type_name);
        let instance = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Instance Buffer", self.type_name)),
            contents: bytemuck::cast_slice(&[self.transform.to_raw()]),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        IconBuffers {
            vertex,
            index,
            instance,
            num_indices: self.geometry.indices().len() as u32,
        }
    }
}

/**
 * Builds the corrected plane for an icon.
 *
 * Order matters and is fixed: mirror on X when flipped, apply the policy's
 * rotations in list order, then move the pivot to the bottom centre by
 * shifting half the height along +Y.
 */
pub fn corrected_plane(
    width: f32,
    height: f32,
    flipped: bool,
    policy: &CorrectionPolicy,
) -> PlaneGeometry {
    let mut plane = PlaneGeometry::new(width, height);
    if flipped {
        plane.scale(-1.0, 1.0, 1.0);
    }
    for rotation in &policy.rotations {
        plane.apply_matrix(rotation.to_matrix());
    }
    plane.translate(0.0, height / 2.0, 0.0);
    plane
}

pub struct IconFactory<'a> {
    catalog: &'a IconCatalog,
    corrections: &'a CorrectionTable,
    textures: &'a dyn TextureProvider,
    config: &'a AnnotationConfig,
}

impl<'a> IconFactory<'a> {
    pub fn new(
        catalog: &'a IconCatalog,
        corrections: &'a CorrectionTable,
        textures: &'a dyn TextureProvider,
        config: &'a AnnotationConfig,
    ) -> Self {
        Self {
            catalog,
            corrections,
            textures,
            config,
        }
    }

    /// Returns `None` (and logs) when the placement's type is not in the catalog.
    pub fn build(&self, placement: &IconPlacement) -> Option<RenderedIcon> {
        let Some(entry) = self.catalog.get(&placement.type_name) else {
            log::error!("Icon type \"{}\" not found in catalog", placement.type_name);
            return None;
        };
        if entry.pixel_height == 0 || entry.pixel_width == 0 {
            log::error!(
                "Icon type \"{}\" has a zero dimension ({}x{})",
                placement.type_name,
                entry.pixel_width,
                entry.pixel_height
            );
            return None;
        }

        let width = entry.pixel_width as f32 / self.config.icon_normalization;
        let height = entry.pixel_height as f32 / self.config.icon_normalization;
        let policy = self.corrections.policy(&placement.type_name);
        let flipped = placement.flipped.unwrap_or(policy.flipped_by_default);
        let geometry = corrected_plane(width, height, flipped, &policy);

        let texture = self.textures.load(&entry.source);
        let material = IconMaterial::new(texture, Tint::from_hex(self.config.icon_tint));

        log::debug!(
            "built {} icon at {:?} (flipped: {})",
            placement.type_name,
            placement.position,
            flipped
        );
        Some(RenderedIcon {
            type_name: placement.type_name.clone(),
            geometry,
            material,
            transform: Instance::from(placement.position),
            render_order: self.config.icon_render_order,
        })
    }
}
