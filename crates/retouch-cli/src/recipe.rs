//! Edit recipes: a JSON description of one editing pass.
//!
//! ```json
//! {
//!   "look": "vintage",
//!   "filters": { "sepia": 60, "blur": 1 },
//!   "geometry": { "rotation": 90, "flip_horizontal": true },
//!   "effects": ["sharpen", "pixelate"]
//! }
//! ```
//!
//! Steps run in a fixed order: the look, then the filters (replacing the
//! look's slider values), then geometry, then each effect in list order.
//! Effects are destructive, so every one of them sees the filters and
//! geometry rendered into its input.

use clap::ValueEnum;
use retouch_core::{
    ConvolutionEngine, EditSession, FilterSettings, Geometry, KernelPreset, Look, SessionError,
};
use serde::{Deserialize, Serialize};
use tracing::info;

/// A destructive effect button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    #[serde(alias = "clarity")]
    #[value(alias = "clarity")]
    Sharpen,
    Emboss,
    Pixelate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Recipe {
    pub look: Option<Look>,
    pub filters: Option<FilterSettings>,
    pub geometry: Geometry,
    pub effects: Vec<Effect>,
}

impl Recipe {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Filter settings to edit in place, seeded from the look if no filters
    /// were given yet.
    pub fn filters_mut(&mut self) -> &mut FilterSettings {
        let look = self.look;
        self.filters
            .get_or_insert_with(|| look.map(Look::filter_settings).unwrap_or_default())
    }

    /// Run the recipe against `session`, sending kernels to `engine`.
    pub async fn apply(
        &self,
        session: &mut EditSession,
        engine: &ConvolutionEngine,
        block_size: u32,
    ) -> Result<(), SessionError> {
        if let Some(look) = self.look {
            session.apply_look(look)?;
        }
        if let Some(filters) = &self.filters {
            session.set_filters(filters.clone());
        }
        *session.geometry_mut() = self.geometry;

        for effect in &self.effects {
            info!(?effect, "applying effect");
            match effect {
                Effect::Sharpen => session.apply_kernel(engine, KernelPreset::Sharpen).await?,
                Effect::Emboss => session.apply_kernel(engine, KernelPreset::Emboss).await?,
                Effect::Pixelate => session.pixelate(block_size)?,
            }
        }
        Ok(())
    }
}
