//! # Team Colour Classification
//!
//! Assigns a label to a cropped player image by counting jersey pixels that
//! fall inside each team's HSV ranges.
//!
//! - [`HsvClassifier`]: stateless, one crop at a time
//! - [`InertiaClassifier`]: per-track majority vote over recent frames

pub mod hsv;
mod inertia;

pub use hsv::Hsv;
pub use inertia::InertiaClassifier;

use std::fmt;

use image::{GenericImageView, RgbImage};
use serde::{Deserialize, Serialize};

use crate::config::{ClassifierConfig, JerseyCrop, TeamFilter};
use crate::geometry::Rgb;

/// Classification result: a filter name or the unknown sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamLabel(String);

impl TeamLabel {
    pub const UNKNOWN: &'static str = "unknown";

    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn unknown() -> Self {
        Self(Self::UNKNOWN.to_string())
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == Self::UNKNOWN
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TeamLabel {
    fn default() -> Self {
        Self::unknown()
    }
}

impl fmt::Display for TeamLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Anything that can label a player crop.
///
/// Implementations must be pure: the smoother classifies crops in parallel.
pub trait TeamClassifier: Send + Sync {
    fn classify(&self, crop: &RgbImage) -> TeamLabel;
}

/// Histogram matching against an ordered colour-filter table.
#[derive(Debug, Clone)]
pub struct HsvClassifier {
    filters: Vec<TeamFilter>,
    jersey: JerseyCrop,
}

impl HsvClassifier {
    pub fn new(filters: Vec<TeamFilter>, jersey: JerseyCrop) -> Self {
        Self { filters, jersey }
    }

    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(config.filters.clone(), config.jersey)
    }

    pub fn filters(&self) -> &[TeamFilter] {
        &self.filters
    }

    /// Matching pixel count per filter, in filter order.
    ///
    /// A pixel inside two ranges of the same filter counts twice.
    pub fn pixel_counts(&self, crop: &RgbImage) -> Option<Vec<u32>> {
        let (x, y, width, height) = self.jersey_window(crop.width(), crop.height())?;
        let mut counts = vec![0u32; self.filters.len()];

        for (_, _, pixel) in crop.view(x, y, width, height).pixels() {
            let [r, g, b] = pixel.0;
            let hsv = Hsv::from_rgb(Rgb(r, g, b));
            for (count, filter) in counts.iter_mut().zip(&self.filters) {
                *count += filter.colors.iter().filter(|range| range.contains(hsv)).count() as u32;
            }
        }

        Some(counts)
    }

    /// Torso sub-rectangle `(x, y, width, height)`, `None` when empty.
    fn jersey_window(&self, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        let (w, h) = (width as f32, height as f32);
        let x0 = (w * self.jersey.left) as u32;
        let x1 = ((w * self.jersey.right) as u32).min(width);
        let y0 = (h * self.jersey.top) as u32;
        let y1 = ((h * self.jersey.bottom) as u32).min(height);

        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some((x0, y0, x1 - x0, y1 - y0))
    }
}

impl TeamClassifier for HsvClassifier {
    fn classify(&self, crop: &RgbImage) -> TeamLabel {
        let Some(counts) = self.pixel_counts(crop) else {
            log::trace!("Empty jersey window for {}x{} crop", crop.width(), crop.height());
            return TeamLabel::unknown();
        };

        // Strict comparison keeps the earlier filter on ties
        let mut best: Option<(usize, u32)> = None;
        for (idx, &count) in counts.iter().enumerate() {
            if count > best.map_or(0, |(_, c)| c) {
                best = Some((idx, count));
            }
        }

        match best {
            Some((idx, _)) => TeamLabel::new(self.filters[idx].name.clone()),
            None => TeamLabel::unknown(),
        }
    }
}
