use serde::{Deserialize, Serialize};

use crate::entity::{BallTrail, Detection};
use crate::geometry::{Point, Rgb};

/// The match ball: this frame's detection (if any) plus the persistent trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub detection: Option<Detection>,
    /// Possessing team's colour, white until a team is confirmed
    pub color: Rgb,
    pub trail: BallTrail,
}

impl Ball {
    pub fn new(max_trail_length: usize) -> Self {
        Self {
            detection: None,
            color: Rgb::WHITE,
            trail: BallTrail::new(max_trail_length),
        }
    }

    /// Highest-confidence detection, the ball for this frame.
    pub fn select_main(detections: Vec<Detection>) -> Option<Detection> {
        detections
            .into_iter()
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
    }

    /// Replace the frame detection and extend the trail with its absolute centre.
    pub fn set_detection(&mut self, detection: Option<Detection>) {
        self.detection = detection;
        if let Some(center) = self.center_abs() {
            self.trail.push(center);
        }
    }

    pub fn center(&self) -> Option<Point> {
        self.detection.as_ref().map(|d| d.bbox.center())
    }

    pub fn center_abs(&self) -> Option<Point> {
        self.detection.as_ref().map(|d| d.absolute().center())
    }

    /// Follow the possessing team's colour; `None` keeps the current one.
    pub fn set_color(&mut self, color: Option<Rgb>) {
        let Some(color) = color else {
            return;
        };
        self.color = color;
        if let Some(det) = self.detection.as_mut() {
            det.data.color = Some(color);
        }
    }
}

impl Default for Ball {
    fn default() -> Self {
        Self::new(30)
    }
}
