#![forbid(unsafe_code)]

//! Tunable overlay parameters.
//!
//! Every default equals the constants the overlay was designed around, so
//! `OverlayConfig::default()` reproduces the reference timing and geometry.
//! With the `config` feature the whole struct can be loaded from TOML or
//! JSON; missing fields fall back to their defaults. The loaders are only
//! tested with that feature on (`cargo test -p limelight --features config`).
//!
//! ```toml
//! [timing]
//! title_delay_ms = 80
//! advance_title_delay_ms = 520
//!
//! [visual]
//! dim_opacity = 0.5
//! ```

#[cfg(feature = "config")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// All overlay parameters.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct OverlayConfig {
    pub timing: TimingConfig,
    pub visual: VisualConfig,
    pub popover: PopoverConfig,
}

/// Delays and animation curves.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct TimingConfig {
    /// Delay between a highlight first appearing and its title showing.
    pub title_delay_ms: u64,
    /// Delay between a tap-to-advance and the next title showing. Long
    /// enough for the cutout morph to land.
    pub advance_title_delay_ms: u64,
    /// Duration of the closing fade.
    pub finish_fade_ms: u64,
    /// Spring response of the cutout morph, in milliseconds.
    pub morph_response_ms: u64,
    /// Spring damping fraction of the cutout morph (1.0 = critical).
    pub morph_damping_fraction: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            title_delay_ms: 80,
            advance_title_delay_ms: 520,
            finish_fade_ms: 250,
            morph_response_ms: 300,
            morph_damping_fraction: 0.7,
        }
    }
}

impl TimingConfig {
    #[must_use]
    pub fn title_delay(&self) -> Duration {
        Duration::from_millis(self.title_delay_ms)
    }

    #[must_use]
    pub fn advance_title_delay(&self) -> Duration {
        Duration::from_millis(self.advance_title_delay_ms)
    }

    #[must_use]
    pub fn finish_fade(&self) -> Duration {
        Duration::from_millis(self.finish_fade_ms)
    }

    #[must_use]
    pub fn morph_response(&self) -> Duration {
        Duration::from_millis(self.morph_response_ms)
    }
}

/// Dim layer, cutout, and hit-region geometry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct VisualConfig {
    /// Opacity of the black dim layer.
    pub dim_opacity: f32,
    /// Added to both dimensions of the cutout; half of it on each side.
    pub cutout_border: f32,
    /// Added to both dimensions of the popover hit region.
    pub hit_region_border: f32,
    /// Offset of the hit region up and to the left of the target.
    pub hit_region_margin: f32,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            dim_opacity: 0.5,
            cutout_border: 5.0,
            hit_region_border: 20.0,
            hit_region_margin: 10.0,
        }
    }
}

/// Title popover sizing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct PopoverConfig {
    pub horizontal_padding: f32,
    pub vertical_padding: f32,
    /// Advance of one terminal-width column of text.
    pub glyph_width: f32,
    pub line_height: f32,
    /// Space between the hit region and the popover.
    pub gap: f32,
}

impl Default for PopoverConfig {
    fn default() -> Self {
        Self {
            horizontal_padding: 10.0,
            vertical_padding: 8.0,
            glyph_width: 8.0,
            line_height: 18.0,
            gap: 6.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Builders, loading, validation
// ---------------------------------------------------------------------------

impl OverlayConfig {
    #[must_use]
    pub fn timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    #[must_use]
    pub fn visual(mut self, visual: VisualConfig) -> Self {
        self.visual = visual;
        self
    }

    #[must_use]
    pub fn popover(mut self, popover: PopoverConfig) -> Self {
        self.popover = popover;
        self
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, OverlayConfigError> {
        toml::from_str(s).map_err(OverlayConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, OverlayConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(OverlayConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, OverlayConfigError> {
        serde_json::from_str(s).map_err(OverlayConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, OverlayConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(OverlayConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate and return `self`, or every problem found.
    pub fn validated(self) -> Result<Self, OverlayConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(OverlayConfigError::Validation(errors))
        }
    }

    /// Check all parameters. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.timing.finish_fade_ms == 0 {
            errors.push("timing.finish_fade_ms must be > 0".into());
        }
        if self.timing.morph_response_ms == 0 {
            errors.push("timing.morph_response_ms must be > 0".into());
        }
        let damping = self.timing.morph_damping_fraction;
        if !damping.is_finite() || damping <= 0.0 {
            errors.push(format!(
                "timing.morph_damping_fraction must be > 0, got {damping}"
            ));
        }

        let dim = self.visual.dim_opacity;
        if !(0.0..=1.0).contains(&dim) {
            errors.push(format!("visual.dim_opacity must be in [0, 1], got {dim}"));
        }
        for (name, value) in [
            ("visual.cutout_border", self.visual.cutout_border),
            ("visual.hit_region_border", self.visual.hit_region_border),
            ("visual.hit_region_margin", self.visual.hit_region_margin),
            ("popover.horizontal_padding", self.popover.horizontal_padding),
            ("popover.vertical_padding", self.popover.vertical_padding),
            ("popover.gap", self.popover.gap),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("{name} must be >= 0, got {value}"));
            }
        }
        for (name, value) in [
            ("popover.glyph_width", self.popover.glyph_width),
            ("popover.line_height", self.popover.line_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                errors.push(format!("{name} must be > 0, got {value}"));
            }
        }

        errors
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading an overlay configuration.
#[derive(Debug)]
pub enum OverlayConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for OverlayConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => write!(f, "validation errors: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for OverlayConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
