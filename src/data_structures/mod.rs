//! Engine data structures: transforms, geometry, materials and textures.
//!
//! - `instance` holds per-object position, rotation and scale
//! - `plane` is the flat quad geometry icons are cut from
//! - `material` describes how icon surfaces blend and depth-test
//! - `texture` contains the GPU texture wrapper and creation utilities

pub mod instance;
pub mod material;
pub mod plane;
pub mod texture;
