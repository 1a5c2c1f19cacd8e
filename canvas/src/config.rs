//! Editor configuration supplied by the host page.
//!
//! The host passes a JSON object (camelCase keys, every key optional) when it
//! constructs the editor. Unset keys take the defaults of the parametric tool.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{LABEL_FONT, PDF_SCALE};

/// Configuration could not be read.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid editor config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which annotation tool the editor behaves as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Parametric structural shapes with computed labels.
    #[default]
    Parametric,
    /// Freehand rectangles with a legend panel and an eraser.
    Freehand,
}

impl Variant {
    /// Lowercase name, as used in the config JSON.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Parametric => "parametric",
            Self::Freehand => "freehand",
        }
    }
}

/// Editor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    pub variant: Variant,
    /// Abort an in-progress drag when the pointer leaves the canvas.
    /// `None` uses the variant's behavior (freehand aborts, parametric keeps dragging).
    pub abort_on_leave: Option<bool>,
    /// Scale applied to the first PDF page viewport.
    pub pdf_scale: f64,
    /// CSS font for labels and the legend.
    pub label_font: String,
    /// Device pixel ratio used by the freehand calibration.
    pub device_pixel_ratio: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Parametric,
            abort_on_leave: None,
            pdf_scale: PDF_SCALE,
            label_font: LABEL_FONT.to_string(),
            device_pixel_ratio: 1.0,
        }
    }
}

impl EditorConfig {
    /// Default configuration for a variant.
    #[must_use]
    pub fn for_variant(variant: Variant) -> Self {
        Self { variant, ..Self::default() }
    }

    /// Parse from the host's JSON. An empty string yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the text is not a valid config object.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(text)?)
    }

    /// Whether leaving the canvas aborts a drag.
    #[must_use]
    pub fn aborts_on_leave(&self) -> bool {
        self.abort_on_leave
            .unwrap_or(matches!(self.variant, Variant::Freehand))
    }
}
