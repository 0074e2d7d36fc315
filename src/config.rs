//! Renderer-facing configuration.
//!
//! The spiral used to ship as several near-identical pages that only differed
//! in their constants. Those are now [`Variant`] presets of a single
//! [`SpiralConfig`].

use crate::error::{SpiralError, SpiralResult};
use crate::spiral::SpiralParams;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Hard ceiling on the sieve bound of the large presets.
pub const MAX_NUMBER: u64 = 100_000;

/// Above this many visible points the renderer drops glyphs, the guide
/// curve and non-prime dots.
pub const MAX_NUMBER_BEFORE_UI_SUFFERS: u64 = 10_000;

// ─── Variants ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Colored dots with the random control toggle.
    #[default]
    Dots,
    /// Digit glyphs on a small, widely spaced spiral.
    Numbers,
    /// Tightly packed dots over the full range.
    Dense,
}

impl Variant {
    /// Whether the variant exposes the random control sieve.
    pub fn has_random_toggle(self) -> bool {
        matches!(self, Variant::Dots)
    }
}

// ─── Configuration ──────────────────────────────────────────────────────────

/// Everything a redraw needs. Fields missing from a config file fall back to
/// the [`Variant::Dots`] preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiralConfig {
    pub variant: Variant,
    /// Inclusive sieve bound; also caps how many points are placed.
    pub max_number: u64,
    /// Visible-point count from which the cheap rendering path is used.
    pub detail_limit: u64,
    /// Arc-length spacing between consecutive points, in pixels.
    pub step: f64,
    /// Spiral growth: `radius = radius_factor * theta`.
    pub radius_factor: f64,
    pub show_numbers: bool,
    pub only_primes: bool,
    /// Classify with the random control sieve instead of the primes.
    pub random_mode: bool,
    /// Seed for the control sieve; `None` draws from system entropy.
    pub seed: Option<u64>,
}

impl Default for SpiralConfig {
    fn default() -> Self {
        Self::for_variant(Variant::Dots)
    }
}

impl SpiralConfig {
    pub fn for_variant(variant: Variant) -> Self {
        let base = Self {
            variant,
            max_number: MAX_NUMBER,
            detail_limit: MAX_NUMBER_BEFORE_UI_SUFFERS,
            step: 8.0,
            radius_factor: 2.0,
            show_numbers: false,
            only_primes: false,
            random_mode: false,
            seed: None,
        };
        match variant {
            Variant::Dots => base,
            Variant::Numbers => Self {
                max_number: 10_000,
                step: 16.0,
                radius_factor: 4.0,
                show_numbers: true,
                ..base
            },
            Variant::Dense => Self {
                step: 3.0,
                radius_factor: 1.0,
                ..base
            },
        }
    }

    /// Validated spacing parameters.
    pub fn params(&self) -> SpiralResult<SpiralParams> {
        SpiralParams::new(self.step, self.radius_factor)
    }

    pub fn validate(&self) -> SpiralResult<()> {
        if self.max_number < 2 {
            return Err(SpiralError::InvalidBound(self.max_number));
        }
        if self.detail_limit == 0 {
            return Err(SpiralError::Config(
                "detail_limit must be positive".to_string(),
            ));
        }
        if self.random_mode && !self.variant.has_random_toggle() {
            return Err(SpiralError::Config(format!(
                "variant {:?} has no random mode",
                self.variant
            )));
        }
        self.params()?;
        Ok(())
    }

    /// Load and validate a JSON config file.
    pub fn load(path: &Path) -> SpiralResult<Self> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| SpiralError::Config(format!("reading {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&data)
            .map_err(|e| SpiralError::Config(format!("parsing {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Write as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> SpiralResult<()> {
        let data = serde_json::to_string_pretty(self)
            .map_err(|e| SpiralError::Config(format!("serializing config: {}", e)))?;
        std::fs::write(path, data)
            .map_err(|e| SpiralError::Config(format!("writing {}: {}", path.display(), e)))
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for variant in [Variant::Dots, Variant::Numbers, Variant::Dense] {
            let config = SpiralConfig::for_variant(variant);
            assert_eq!(config.variant, variant);
            config.validate().unwrap();
        }
        assert_eq!(SpiralConfig::default().variant, Variant::Dots);
    }

    #[test]
    fn test_numbers_preset_shows_glyphs() {
        let config = SpiralConfig::for_variant(Variant::Numbers);
        assert!(config.show_numbers);
        assert_eq!(config.max_number, 10_000);
        assert!(!config.variant.has_random_toggle());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = SpiralConfig::default();
        config.max_number = 1;
        assert_eq!(config.validate(), Err(SpiralError::InvalidBound(1)));

        let mut config = SpiralConfig::default();
        config.step = 0.0;
        assert_eq!(config.validate(), Err(SpiralError::InvalidStep(0.0)));

        let mut config = SpiralConfig::default();
        config.radius_factor = -3.0;
        assert_eq!(
            config.validate(),
            Err(SpiralError::InvalidRadiusFactor(-3.0))
        );

        let mut config = SpiralConfig::default();
        config.detail_limit = 0;
        assert!(matches!(config.validate(), Err(SpiralError::Config(_))));
    }

    #[test]
    fn test_random_mode_needs_toggle() {
        let mut config = SpiralConfig::for_variant(Variant::Dense);
        config.random_mode = true;
        assert!(matches!(config.validate(), Err(SpiralError::Config(_))));

        let mut config = SpiralConfig::for_variant(Variant::Dots);
        config.random_mode = true;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SpiralConfig =
            serde_json::from_str(r#"{"step": 5.5, "variant": "dense"}"#).unwrap();
        assert_eq!(config.step, 5.5);
        assert_eq!(config.variant, Variant::Dense);
        assert_eq!(config.max_number, MAX_NUMBER);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let mut config = SpiralConfig::for_variant(Variant::Numbers);
        config.seed = Some(99);
        config.only_primes = true;

        let tmp = std::env::temp_dir().join("test_prime_spiral_config.json");
        config.save(&tmp).unwrap();
        let loaded = SpiralConfig::load(&tmp).unwrap();
        assert_eq!(loaded, config);

        // Cleanup
        let _ = std::fs::remove_file(&tmp);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let tmp = std::env::temp_dir().join("test_prime_spiral_bad_config.json");
        std::fs::write(&tmp, r#"{"max_number": 0}"#).unwrap();
        assert_eq!(SpiralConfig::load(&tmp), Err(SpiralError::InvalidBound(0)));

        std::fs::write(&tmp, "not json").unwrap();
        assert!(matches!(SpiralConfig::load(&tmp), Err(SpiralError::Config(_))));

        // Cleanup
        let _ = std::fs::remove_file(&tmp);
    }

    #[test]
    fn test_load_missing_file() {
        let missing = std::env::temp_dir().join("definitely_missing_prime_spiral.json");
        assert!(matches!(
            SpiralConfig::load(&missing),
            Err(SpiralError::Config(_))
        ));
    }
}
