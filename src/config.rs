//! Tunables and logger setup.

use serde::Deserialize;

use crate::resources::animation::Easing;

/// Every constant the marker factories use.
///
/// Defaults match the shipped map. The displacement and timing values are in
/// world units and seconds.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    /// Pixels per world unit for icon planes.
    pub icon_normalization: f32,
    /// `0xRRGGBB` tint multiplied into every icon texture.
    pub icon_tint: u32,
    /// Icons draw after everything with a lower order (scene geometry uses 0).
    pub icon_render_order: i32,
    /// DOM pixels to world units.
    pub sign_scale: f32,
    /// How far above its final position a sign starts.
    pub sign_drop_height: f32,
    /// Length of the drop-in animation, in seconds.
    pub entrance_duration: f32,
    /// Seconds before the first sign starts dropping.
    pub entrance_base_delay: f32,
    /// Extra delay per sign in declaration order.
    pub entrance_stagger: f32,
    pub entrance_easing: Easing,
}

impl AnnotationConfig {
    pub fn entrance_delay(&self, sequence_index: usize) -> f32 {
        self.entrance_base_delay + self.entrance_stagger * sequence_index as f32
    }
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            icon_normalization: 1250.0,
            icon_tint: 0xffc715,
            icon_render_order: 1,
            sign_scale: 0.01,
            sign_drop_height: 2.0,
            entrance_duration: 1.0,
            entrance_base_delay: 0.5,
            entrance_stagger: 0.1,
            entrance_easing: Easing::BounceOut,
        }
    }
}

/// Installs the platform logger. Safe to call more than once.
pub fn init_logging() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        // only fails when a logger is already installed, which then receives this
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            log::warn!("Could not initialize logger: {}", e);
        }
    }
}
