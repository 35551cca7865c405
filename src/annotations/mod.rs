//! Scene annotations: icons and signs built from placement tables.
//!
//! - `catalog` maps icon types to textures and geometry corrections
//! - `placement` holds the declarative icon and sign tables
//! - `icon` builds textured billboard planes
//! - `sign` builds DOM-backed signs and schedules their entrance
//! - `billboard` keeps signs facing the camera

pub mod billboard;
pub mod catalog;
pub mod icon;
pub mod placement;
pub mod sign;

use anyhow::Context as _;
use serde::Deserialize;

use crate::{
    annotations::{
        billboard::CameraFacingUpdater,
        catalog::{CorrectionTable, IconCatalog},
        icon::{IconFactory, RenderedIcon},
        placement::{
            IconPlacement, SignPlacement, builtin_icon_placements, builtin_sign_placements,
            sequence_signs,
        },
        sign::{RenderedSign, SignFactory},
    },
    camera::WorldCamera,
    config::AnnotationConfig,
    interactive::InteractiveContext,
    resources::{animation::Tweener, load_string, texture::TextureProvider},
};

/// Everything needed to build an [`AnnotationSet`]. Missing JSON sections fall back to the built-in tables.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnnotationData {
    pub catalog: IconCatalog,
    pub corrections: CorrectionTable,
    pub icons: Vec<IconPlacement>,
    pub signs: Vec<SignPlacement>,
}

impl Default for AnnotationData {
    fn default() -> Self {
        Self {
            catalog: IconCatalog::builtin(),
            corrections: CorrectionTable::builtin(),
            icons: builtin_icon_placements(),
            signs: builtin_sign_placements(),
        }
    }
}

impl AnnotationData {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let mut data: Self = serde_json::from_str(json)?;
        data.signs = sequence_signs(data.signs);
        let invalid = data.catalog.invalid_entries();
        if !invalid.is_empty() {
            log::warn!("Icon types with zero dimensions will be skipped: {:?}", invalid);
        }
        Ok(data)
    }

    /// Reads the tables from an asset file.
    pub async fn load(file_name: &str) -> anyhow::Result<Self> {
        let json = load_string(file_name)
            .await
            .with_context(|| format!("could not read annotation tables {}", file_name))?;
        Self::from_json(&json).with_context(|| format!("invalid annotation tables in {}", file_name))
    }
}

/// The icons and signs of one scene.
#[derive(Default)]
pub struct AnnotationSet {
    icons: Vec<RenderedIcon>,
    signs: Vec<RenderedSign>,
}

impl AnnotationSet {
    /**
     * Builds every marker once. Entries that cannot be built are skipped, so
     * the result may hold fewer markers than declared, or none at all.
     */
    pub fn build(
        data: &AnnotationData,
        textures: &dyn TextureProvider,
        interactive: &InteractiveContext,
        tweens: &mut dyn Tweener,
        config: &AnnotationConfig,
    ) -> Self {
        let icon_factory = IconFactory::new(&data.catalog, &data.corrections, textures, config);
        let icons: Vec<RenderedIcon> = data
            .icons
            .iter()
            .filter_map(|placement| icon_factory.build(placement))
            .collect();

        let sign_factory = SignFactory::new(interactive, config);
        let signs: Vec<RenderedSign> = data
            .signs
            .iter()
            .enumerate()
            .filter_map(|(index, placement)| sign_factory.build(placement, index, tweens))
            .collect();

        log::info!(
            "built {}/{} icons and {}/{} signs",
            icons.len(),
            data.icons.len(),
            signs.len(),
            data.signs.len()
        );
        Self { icons, signs }
    }

    pub fn icons(&self) -> &[RenderedIcon] {
        &self.icons
    }

    pub fn signs(&self) -> &[RenderedSign] {
        &self.signs
    }

    pub fn signs_mut(&mut self) -> &mut [RenderedSign] {
        &mut self.signs
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty() && self.signs.is_empty()
    }

    /// Removes a sign; a still-running entrance tween is cancelled with it.
    pub fn remove_sign(&mut self, index: usize) -> Option<RenderedSign> {
        (index < self.signs.len()).then(|| self.signs.remove(index))
    }

    /// Per-frame update: faces every sign to the camera and syncs the DOM fragments.
    pub fn update(&mut self, camera: &dyn WorldCamera) {
        CameraFacingUpdater::update(&mut self.signs, camera);
        self.signs
            .iter_mut()
            .for_each(|sign| sign.sync_fragment());
    }
}
