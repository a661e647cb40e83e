//! Colour filter table and team presets.
//!
//! The default table is embedded at compile time and parsed once.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::classify::hsv::Hsv;
use crate::geometry::Rgb;

/// Default filter/team table (compile-time embedding).
pub const DEFAULT_FILTERS_YAML: &str =
    include_str!("../../../../data/filters/default_filters.yaml");

static DEFAULT_TABLE: OnceLock<FilterTable> = OnceLock::new();

/// One named HSV interval, inclusive on every channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HsvRange {
    pub name: String,
    pub lower_hsv: Hsv,
    pub upper_hsv: Hsv,
}

impl HsvRange {
    pub fn new(name: impl Into<String>, lower_hsv: Hsv, upper_hsv: Hsv) -> Self {
        Self {
            name: name.into(),
            lower_hsv,
            upper_hsv,
        }
    }

    pub fn contains(&self, hsv: Hsv) -> bool {
        (self.lower_hsv.h..=self.upper_hsv.h).contains(&hsv.h)
            && (self.lower_hsv.s..=self.upper_hsv.s).contains(&hsv.s)
            && (self.lower_hsv.v..=self.upper_hsv.v).contains(&hsv.v)
    }

    pub fn is_inverted(&self) -> bool {
        self.lower_hsv.h > self.upper_hsv.h
            || self.lower_hsv.s > self.upper_hsv.s
            || self.lower_hsv.v > self.upper_hsv.v
    }
}

/// All colour ranges registered for one label (a team or the referee).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamFilter {
    pub name: String,
    pub colors: Vec<HsvRange>,
}

impl TeamFilter {
    pub fn new(name: impl Into<String>, colors: Vec<HsvRange>) -> Self {
        Self {
            name: name.into(),
            colors,
        }
    }
}

fn default_text_color() -> Rgb {
    Rgb::WHITE
}

/// Display identity of one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamConfig {
    pub name: String,
    pub abbreviation: String,
    /// Colour used for boxes, formation geometry and the ball trail
    pub color: Rgb,
    /// Colour used on score-board style counters
    pub board_color: Rgb,
    #[serde(default = "default_text_color")]
    pub text_color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamsConfig {
    pub home: TeamConfig,
    pub away: TeamConfig,
}

impl Default for TeamsConfig {
    fn default() -> Self {
        default_table().teams.clone()
    }
}

#[derive(Debug, Clone, Deserialize)]
struct FilterTable {
    filters: Vec<TeamFilter>,
    teams: TeamsConfig,
}

fn default_table() -> &'static FilterTable {
    DEFAULT_TABLE.get_or_init(|| {
        serde_yaml::from_str(DEFAULT_FILTERS_YAML).expect("Failed to parse default_filters.yaml")
    })
}

/// Default colour filters in priority order.
///
/// # Panics
///
/// Panics if the embedded table does not parse, which a normal build rules out.
pub fn default_filters() -> &'static [TeamFilter] {
    &default_table().filters
}
