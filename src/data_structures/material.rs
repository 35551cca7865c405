//! Surface parameters for icon billboards.
//!
//! Icons are tinted, alpha-blended and double sided. They are depth tested
//! against the scene but never write depth, so overlapping icons blend instead
//! of clipping each other.

use crate::resources::texture::TextureHandle;

/// An RGB tint decoded from a `0xRRGGBB` literal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tint {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Tint {
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self {
            r: channel(16),
            g: channel(8),
            b: channel(0),
        }
    }

    pub fn to_raw(&self) -> [f32; 4] {
        [self.r, self.g, self.b, 1.0]
    }
}

#[derive(Clone, Debug)]
pub struct IconMaterial {
    pub texture: TextureHandle,
    pub tint: Tint,
    pub transparent: bool,
    pub depth_test: bool,
    pub depth_write: bool,
    pub double_sided: bool,
}

impl IconMaterial {
    pub fn new(texture: TextureHandle, tint: Tint) -> Self {
        Self {
            texture,
            tint,
            transparent: true,
            depth_test: true,
            depth_write: false,
            double_sided: true,
        }
    }

    pub fn blend_state(&self) -> Option<wgpu::BlendState> {
        if self.transparent {
            Some(wgpu::BlendState::ALPHA_BLENDING)
        } else {
            Some(wgpu::BlendState::REPLACE)
        }
    }

    pub fn primitive_state(&self) -> wgpu::PrimitiveState {
        wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: if self.double_sided {
                None
            } else {
                Some(wgpu::Face::Back)
            },
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        }
    }

    pub fn depth_stencil_state(&self, format: wgpu::TextureFormat) -> wgpu::DepthStencilState {
        wgpu::DepthStencilState {
            format,
            depth_write_enabled: Some(self.depth_write),
            depth_compare: if self.depth_test {
                Some(wgpu::CompareFunction::LessEqual)
            } else {
                Some(wgpu::CompareFunction::Always)
            },
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }
    }
}
