//! One-click looks and composite effects.
//!
//! - [`Look::Vintage`] only changes filter settings
//! - [`Look::Lomo`] resets the filters and burns a [vignette](apply_vignette)
//!   into the pixels
//! - [`pixelate`] replaces the image with enlarged blocks
//!
//! The destructive effects return new pixels; the session installs them as
//! its base image.

mod pixelate;
mod vignette;

pub use pixelate::{pixelate, DEFAULT_BLOCK_SIZE};
pub use vignette::apply_vignette;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::FilterSettings;

/// Preset looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Look {
    /// Full sepia, slightly darker, slightly more contrast.
    Vintage,
    /// Clean filters plus a dark radial vignette.
    Lomo,
}

impl Look {
    pub const ALL: [Look; 2] = [Look::Vintage, Look::Lomo];

    /// Filter settings the look starts from. Both looks reset every slider
    /// first.
    pub fn filter_settings(self) -> FilterSettings {
        let mut settings = FilterSettings::default();
        if self == Look::Vintage {
            settings.sepia = 100.0;
            settings.brightness = -10.0;
            settings.contrast = 10.0;
        }
        settings
    }

    /// Returns true if the look rewrites pixels rather than just settings.
    pub fn is_destructive(self) -> bool {
        matches!(self, Look::Lomo)
    }

    pub fn name(self) -> &'static str {
        match self {
            Look::Vintage => "vintage",
            Look::Lomo => "lomo",
        }
    }
}

impl fmt::Display for Look {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Look {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vintage" => Ok(Look::Vintage),
            "lomo" => Ok(Look::Lomo),
            other => Err(format!("unknown look: {other}")),
        }
    }
}
