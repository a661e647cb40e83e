//! # Annotator Configuration
//!
//! Every tunable threshold of the engine, grouped per stage, plus the static
//! colour-filter table and team presets.
//!
//! ## Presets
//!
//! | Preset | Hysteresis | Inertia | Use |
//! |--------|-----------|---------|-----|
//! | `default` | 20 frames | 20 frames | broadcast footage at 25-30 fps |
//! | `responsive` | 10 frames | 10 frames | short clips, quick turnovers |
//! | `stable` | 30 frames | 30 frames | noisy detections, heavy occlusion |
//!
//! ## Usage
//!
//! ```rust
//! use sva_core::config::AnnotatorConfig;
//!
//! let config = AnnotatorConfig::default();
//! let quick = AnnotatorConfig::responsive();
//! let from_env = AnnotatorConfig::from_env_or_default();
//! assert!(config.validate().is_ok());
//! # let _ = (quick, from_env);
//! ```
//!
//! ## Environment Variables
//!
//! - `SVA_PROFILE`: select a preset (`responsive`, `stable`, `default`)

mod filters;

pub use filters::{
    default_filters, HsvRange, TeamConfig, TeamFilter, TeamsConfig, DEFAULT_FILTERS_YAML,
};

use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Fractional torso window inside a player box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JerseyCrop {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Default for JerseyCrop {
    fn default() -> Self {
        Self {
            top: 0.15,
            bottom: 0.6,
            left: 0.1,
            right: 0.9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Evaluated in order; earlier filters win ties
    pub filters: Vec<TeamFilter>,
    pub jersey: JerseyCrop,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            filters: default_filters().to_vec(),
            jersey: JerseyCrop::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Majority-vote window per track identity
    pub inertia: usize,
    /// Identities unseen for this many frames lose their history
    pub history_ttl_frames: u64,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            inertia: 20,
            history_ttl_frames: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionFilterConfig {
    pub player_min_confidence: f32,
    pub ball_min_confidence: f32,
}

impl Default for DetectionFilterConfig {
    fn default() -> Self {
        Self {
            player_min_confidence: 0.35,
            ball_min_confidence: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PossessionConfig {
    /// Max foot-to-ball distance (px) for a player to count as on the ball
    pub ball_distance_threshold: f32,
    /// Consecutive qualifying frames before possession changes team
    pub counter_threshold: u32,
    /// Reset the counter on frames without a qualifying closest player
    pub reset_on_interruption: bool,
}

impl Default for PossessionConfig {
    fn default() -> Self {
        Self {
            ball_distance_threshold: 45.0,
            counter_threshold: 20,
            reset_on_interruption: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassConfig {
    /// Frames a teammate must control the ball before a handoff is confirmed
    pub same_team_frames: u32,
    /// Frames an opponent must control the ball before a turnover is confirmed
    pub cross_team_frames: u32,
    /// Minimum ball travel (px, absolute coordinates) for a handoff to be a pass
    pub min_pass_distance: f32,
}

impl Default for PassConfig {
    fn default() -> Self {
        Self {
            same_team_frames: 3,
            cross_team_frames: 4,
            min_pass_distance: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormationConfig {
    /// Nearest teammates each player connects to
    pub max_connections: usize,
    /// Teammates farther than this (px) are never connected
    pub max_connection_distance: f32,
    /// Field extent used to normalise positions into thirds
    pub field_width: f32,
    pub field_height: f32,
    pub line_alpha: u8,
    pub line_width: f32,
    pub polygon_fill_alpha: u8,
    pub polygon_outline_alpha: u8,
    pub polygon_outline_width: f32,
}

impl Default for FormationConfig {
    fn default() -> Self {
        Self {
            max_connections: 2,
            max_connection_distance: 250.0,
            field_width: 1920.0,
            field_height: 1080.0,
            line_alpha: 128,
            line_width: 2.0,
            polygon_fill_alpha: 60,
            polygon_outline_alpha: 128,
            polygon_outline_width: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    pub max_length: usize,
    /// Stroke width of the newest segment
    pub max_width: f32,
    /// Newest points drawn as markers
    pub marker_count: usize,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            max_length: 30,
            max_width: 6.0,
            marker_count: 5,
        }
    }
}

/// Overlay layers; a disabled layer is left out of the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerToggles {
    pub formation_lines: bool,
    pub formation_polygons: bool,
    pub ball_trail: bool,
    pub possession: bool,
    pub passes: bool,
    pub tactical_info: bool,
}

impl Default for LayerToggles {
    fn default() -> Self {
        Self {
            formation_lines: true,
            formation_polygons: true,
            ball_trail: true,
            possession: true,
            passes: true,
            tactical_info: true,
        }
    }
}

impl LayerToggles {
    pub fn toggle_formation_lines(&mut self) {
        self.formation_lines = !self.formation_lines;
    }

    pub fn toggle_formation_polygons(&mut self) {
        self.formation_polygons = !self.formation_polygons;
    }

    pub fn toggle_ball_trail(&mut self) {
        self.ball_trail = !self.ball_trail;
    }

    pub fn toggle_tactical_info(&mut self) {
        self.tactical_info = !self.tactical_info;
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotatorConfig {
    pub teams: TeamsConfig,
    pub classifier: ClassifierConfig,
    pub smoothing: SmoothingConfig,
    pub detection: DetectionFilterConfig,
    pub possession: PossessionConfig,
    pub passes: PassConfig,
    pub formation: FormationConfig,
    pub trail: TrailConfig,
    pub layers: LayerToggles,
    /// Video frame rate, used for possession time strings
    pub fps: f32,
}

impl Default for AnnotatorConfig {
    fn default() -> Self {
        Self {
            teams: TeamsConfig::default(),
            classifier: ClassifierConfig::default(),
            smoothing: SmoothingConfig::default(),
            detection: DetectionFilterConfig::default(),
            possession: PossessionConfig::default(),
            passes: PassConfig::default(),
            formation: FormationConfig::default(),
            trail: TrailConfig::default(),
            layers: LayerToggles::default(),
            fps: 30.0,
        }
    }
}

impl AnnotatorConfig {
    /// Quicker possession flips and label changes.
    pub fn responsive() -> Self {
        let mut cfg = Self::default();
        cfg.possession.counter_threshold = 10;
        cfg.smoothing.inertia = 10;
        cfg.passes.same_team_frames = 2;
        cfg.passes.cross_team_frames = 3;
        cfg
    }

    /// Slower, flicker-resistant settings for noisy detections.
    pub fn stable() -> Self {
        let mut cfg = Self::default();
        cfg.possession.counter_threshold = 30;
        cfg.smoothing.inertia = 30;
        cfg.passes.same_team_frames = 4;
        cfg.passes.cross_team_frames = 6;
        cfg
    }

    /// Load the preset named by `SVA_PROFILE`, or the default.
    pub fn from_env_or_default() -> Self {
        match env::var("SVA_PROFILE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "responsive" => Self::responsive(),
            "stable" => Self::stable(),
            _ => Self::default(),
        }
    }

    /// Parse and validate a YAML document. Missing sections keep defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let cfg = Self::from_yaml_str(&text)?;
        log::info!("Loaded annotator config from {}", path.as_ref().display());
        Ok(cfg)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.smoothing.inertia == 0 {
            return Err(ConfigError::NotPositive {
                field: "smoothing.inertia",
            });
        }
        if self.possession.counter_threshold == 0 {
            return Err(ConfigError::NotPositive {
                field: "possession.counter_threshold",
            });
        }
        if self.possession.ball_distance_threshold <= 0.0 {
            return Err(ConfigError::NotPositive {
                field: "possession.ball_distance_threshold",
            });
        }
        if self.passes.same_team_frames == 0 {
            return Err(ConfigError::NotPositive {
                field: "passes.same_team_frames",
            });
        }
        if self.passes.cross_team_frames == 0 {
            return Err(ConfigError::NotPositive {
                field: "passes.cross_team_frames",
            });
        }
        if self.formation.max_connection_distance <= 0.0 {
            return Err(ConfigError::NotPositive {
                field: "formation.max_connection_distance",
            });
        }
        if self.formation.field_width <= 0.0 || self.formation.field_height <= 0.0 {
            return Err(ConfigError::NotPositive {
                field: "formation.field_width/field_height",
            });
        }
        if self.trail.max_length == 0 {
            return Err(ConfigError::NotPositive {
                field: "trail.max_length",
            });
        }
        if self.fps <= 0.0 {
            return Err(ConfigError::NotPositive { field: "fps" });
        }

        check_unit("detection.player_min_confidence", self.detection.player_min_confidence)?;
        check_unit("detection.ball_min_confidence", self.detection.ball_min_confidence)?;

        let jersey = &self.classifier.jersey;
        for (field, value) in [
            ("classifier.jersey.top", jersey.top),
            ("classifier.jersey.bottom", jersey.bottom),
            ("classifier.jersey.left", jersey.left),
            ("classifier.jersey.right", jersey.right),
        ] {
            check_unit(field, value)?;
        }
        if jersey.top >= jersey.bottom || jersey.left >= jersey.right {
            return Err(ConfigError::Invalid {
                field: "classifier.jersey",
                reason: "crop window is empty".to_string(),
            });
        }

        if self.classifier.filters.is_empty() {
            return Err(ConfigError::NoFilters);
        }
        for filter in &self.classifier.filters {
            if filter.colors.is_empty() {
                return Err(ConfigError::EmptyFilter(filter.name.clone()));
            }
            if let Some(range) = filter.colors.iter().find(|r| r.is_inverted()) {
                return Err(ConfigError::InvertedRange {
                    name: range.name.clone(),
                });
            }
        }

        if self.teams.home.name == self.teams.away.name {
            return Err(ConfigError::DuplicateTeam(self.teams.home.name.clone()));
        }

        Ok(())
    }
}

fn check_unit(field: &'static str, value: f32) -> std::result::Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            min: 0.0,
            max: 1.0,
            found: value,
        })
    }
}

// ========== Tests ==========

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn test_default_config() {
        let cfg = AnnotatorConfig::default();
        assert!((cfg.possession.ball_distance_threshold - 45.0).abs() < 0.01);
        assert_eq!(cfg.possession.counter_threshold, 20);
        assert_eq!(cfg.smoothing.inertia, 20);
        assert_eq!(cfg.formation.max_connections, 2);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_presets_order_hysteresis() {
        let responsive = AnnotatorConfig::responsive();
        let default = AnnotatorConfig::default();
        let stable = AnnotatorConfig::stable();

        assert!(responsive.possession.counter_threshold < default.possession.counter_threshold);
        assert!(stable.possession.counter_threshold > default.possession.counter_threshold);
        assert!(responsive.validate().is_ok());
        assert!(stable.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "possession:\n  counter_threshold: 5\nfps: 25.0\n";
        let cfg = AnnotatorConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(cfg.possession.counter_threshold, 5);
        assert!((cfg.possession.ball_distance_threshold - 45.0).abs() < 0.01);
        assert!((cfg.fps - 25.0).abs() < 0.01);
        assert_eq!(cfg.classifier.filters.len(), 3);
    }

    #[test]
    fn test_yaml_roundtrip_preserves_filters() {
        let cfg = AnnotatorConfig::stable();
        let text = cfg.to_yaml_string().unwrap();
        let back = AnnotatorConfig::from_yaml_str(&text).unwrap();
        assert_eq!(cfg, back);
    }

    #[test]
    fn test_validation_rejects_zero_inertia() {
        let mut cfg = AnnotatorConfig::default();
        cfg.smoothing.inertia = 0;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::NotPositive {
                field: "smoothing.inertia"
            })
        );
    }

    #[test]
    fn test_validation_rejects_empty_jersey_window() {
        let mut cfg = AnnotatorConfig::default();
        cfg.classifier.jersey.top = 0.7;
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_validation_rejects_duplicate_team_names() {
        let mut cfg = AnnotatorConfig::default();
        cfg.teams.away.name = cfg.teams.home.name.clone();
        assert!(matches!(cfg.validate(), Err(ConfigError::DuplicateTeam(_))));
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let err = AnnotatorConfig::from_yaml_str("smoothing:\n  inertia: 0\n").unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("annotator.yaml");
        std::fs::write(&path, "trail:\n  max_length: 12\n").unwrap();

        let cfg = AnnotatorConfig::from_yaml_file(&path).unwrap();
        assert_eq!(cfg.trail.max_length, 12);

        let missing = AnnotatorConfig::from_yaml_file(dir.path().join("missing.yaml"));
        assert!(matches!(missing, Err(CoreError::Io(_))));
    }

    #[test]
    fn test_layer_toggles() {
        let mut layers = LayerToggles::default();
        layers.toggle_ball_trail();
        layers.toggle_formation_lines();
        assert!(!layers.ball_trail);
        assert!(!layers.formation_lines);
        assert!(layers.formation_polygons);
    }
}
