use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classify::TeamLabel;
use crate::entity::TeamSide;
use crate::geometry::{BoundingBox, CoordinateTransform, Rgb};

/// Stable identity assigned by the external tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(pub u64);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Per-frame annotations written by the pipeline stages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectionData {
    /// Smoothed classifier label
    pub label: Option<TeamLabel>,
    pub team: Option<TeamSide>,
    /// Colour the renderer should use for this object
    pub color: Option<Rgb>,
}

/// One tracked object in one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub track_id: TrackId,
    /// Box in current-frame pixels
    pub bbox: BoundingBox,
    pub confidence: f32,
    /// Box in camera-compensated coordinates, when a transform was supplied
    pub absolute_bbox: Option<BoundingBox>,
    pub data: DetectionData,
}

impl Detection {
    pub fn new(track_id: u64, bbox: BoundingBox, confidence: f32) -> Self {
        Self {
            track_id: TrackId(track_id),
            bbox,
            confidence,
            absolute_bbox: None,
            data: DetectionData::default(),
        }
    }

    /// Fill in the absolute box from the tracker's camera transform.
    pub fn apply_transform(&mut self, transform: &dyn CoordinateTransform) {
        self.absolute_bbox = Some(self.bbox.map(|p| transform.rel_to_abs(p)));
    }

    /// Absolute box, falling back to the frame box for a static camera.
    pub fn absolute(&self) -> BoundingBox {
        self.absolute_bbox.unwrap_or(self.bbox)
    }
}
