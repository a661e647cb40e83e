use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Bounded FIFO of recent ball centres, oldest first.
///
/// Points are stored in absolute coordinates so the trail stays pinned to
/// the pitch while the camera pans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallTrail {
    points: VecDeque<Point>,
    max_length: usize,
}

impl BallTrail {
    pub fn new(max_length: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(max_length),
            max_length,
        }
    }

    /// Append a point, evicting from the front once over capacity.
    pub fn push(&mut self, point: Point) {
        self.points.push_back(point);
        while self.points.len() > self.max_length {
            self.points.pop_front();
        }
    }

    pub fn points(&self) -> impl ExactSizeIterator<Item = &Point> + DoubleEndedIterator {
        self.points.iter()
    }

    pub fn latest(&self) -> Option<Point> {
        self.points.back().copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl Default for BallTrail {
    fn default() -> Self {
        Self::new(30)
    }
}
