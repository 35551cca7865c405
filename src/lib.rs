//! scene-markers
//!
//! Map markers for wgpu scenes on native and WASM targets. Two kinds of
//! marker are built from declarative placement tables:
//!
//! - icons are flat textured billboards standing at fixed points, with
//!   per-type flip and rotation corrections and a bottom-centre pivot
//! - signs are DOM-backed panels that drop into place on load, keep facing the
//!   camera and navigate when clicked
//!
//! High-level modules
//! - `annotations`: catalogs, placements, the icon/sign factories and the per-frame update
//! - `camera`: the world-space camera boundary
//! - `config`: tunables and logger setup
//! - `data_structures`: transforms, plane geometry, materials and GPU textures
//! - `interactive`: the DOM compositor and navigation boundary for signs
//! - `projection`: flat-map to scene coordinate helper
//! - `resources`: asset loading, deferred textures and tweens
//!

pub mod annotations;
pub mod camera;
pub mod config;
pub mod data_structures;
pub mod interactive;
pub mod projection;
pub mod resources;

// Re-exports commonly used types for convenience in downstream code.
pub use annotations::{AnnotationData, AnnotationSet};
pub use cgmath::*;
