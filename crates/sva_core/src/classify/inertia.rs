//! Temporal label smoothing.
//!
//! Each track identity keeps its last `inertia` raw labels; the reported
//! label is the mode of that window. Identities unseen for
//! `history_ttl_frames` frames are dropped.

use std::collections::VecDeque;

use image::{GenericImageView, RgbImage};
use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::classify::{HsvClassifier, TeamClassifier, TeamLabel};
use crate::config::{ClassifierConfig, SmoothingConfig};
use crate::entity::{Detection, TrackId};
use crate::geometry::BoundingBox;

#[derive(Debug, Clone)]
struct LabelHistory {
    labels: VecDeque<TeamLabel>,
    last_seen: u64,
}

impl LabelHistory {
    /// Most frequent label; among equals, the one that appears first.
    fn mode(&self) -> TeamLabel {
        let mut counts: FxHashMap<&TeamLabel, usize> = FxHashMap::default();
        for label in &self.labels {
            *counts.entry(label).or_insert(0) += 1;
        }

        let mut best: Option<(&TeamLabel, usize)> = None;
        for label in &self.labels {
            let count = counts[label];
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((label, count));
            }
        }
        best.map(|(label, _)| label.clone()).unwrap_or_default()
    }
}

/// Majority-vote wrapper around a per-crop classifier.
#[derive(Debug)]
pub struct InertiaClassifier<C = HsvClassifier> {
    classifier: C,
    inertia: usize,
    history_ttl_frames: u64,
    frame: u64,
    histories: FxHashMap<TrackId, LabelHistory>,
}

impl InertiaClassifier<HsvClassifier> {
    pub fn from_config(classifier: &ClassifierConfig, smoothing: &SmoothingConfig) -> Self {
        Self::new(
            HsvClassifier::from_config(classifier),
            smoothing.inertia,
            smoothing.history_ttl_frames,
        )
    }
}

impl<C: TeamClassifier> InertiaClassifier<C> {
    pub fn new(classifier: C, inertia: usize, history_ttl_frames: u64) -> Self {
        Self {
            classifier,
            inertia: inertia.max(1),
            history_ttl_frames,
            frame: 0,
            histories: FxHashMap::default(),
        }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Classify every detection's crop and write the smoothed label into
    /// `detection.data.label`.
    ///
    /// Crops are classified in parallel; histories are updated in input order.
    pub fn predict(&mut self, detections: &mut [Detection], frame: &RgbImage) {
        self.frame += 1;

        let classifier = &self.classifier;
        let raw: Vec<TeamLabel> = detections
            .par_iter()
            .map(|det| match crop(frame, &det.bbox) {
                Some(img) => classifier.classify(&img),
                None => TeamLabel::unknown(),
            })
            .collect();

        for (det, label) in detections.iter_mut().zip(raw) {
            det.data.label = Some(self.observe(det.track_id, label));
        }

        self.prune();
    }

    /// Push one raw label for `id` and return the smoothed label.
    pub fn observe(&mut self, id: TrackId, label: TeamLabel) -> TeamLabel {
        let frame = self.frame;
        let inertia = self.inertia;
        let history = self.histories.entry(id).or_insert_with(|| LabelHistory {
            labels: VecDeque::with_capacity(inertia),
            last_seen: frame,
        });

        history.labels.push_back(label);
        while history.labels.len() > inertia {
            history.labels.pop_front();
        }
        history.last_seen = frame;
        history.mode()
    }

    /// Current smoothed label for an identity, if it has a history.
    pub fn smoothed_label(&self, id: TrackId) -> Option<TeamLabel> {
        self.histories.get(&id).map(LabelHistory::mode)
    }

    pub fn tracked_identities(&self) -> usize {
        self.histories.len()
    }

    fn prune(&mut self) {
        let now = self.frame;
        let ttl = self.history_ttl_frames;
        let before = self.histories.len();
        self.histories
            .retain(|_, h| now.saturating_sub(h.last_seen) <= ttl);

        let evicted = before - self.histories.len();
        if evicted > 0 {
            log::debug!(
                "Evicted {} stale track histories at frame {} ({} remain)",
                evicted,
                now,
                self.histories.len()
            );
        }
    }
}

/// Box contents clamped to the frame, `None` when nothing is left.
fn crop(frame: &RgbImage, bbox: &BoundingBox) -> Option<RgbImage> {
    let clamp = |v: f32, max: u32| (v.max(0.0) as u32).min(max);
    let x0 = clamp(bbox.top_left.x, frame.width());
    let y0 = clamp(bbox.top_left.y, frame.height());
    let x1 = clamp(bbox.bottom_right.x, frame.width());
    let y1 = clamp(bbox.bottom_right.y, frame.height());

    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(frame.view(x0, y0, x1 - x0, y1 - y0).to_image())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb as Px;

    /// Labels by the red channel of the top-left pixel.
    struct FirstPixel;

    impl TeamClassifier for FirstPixel {
        fn classify(&self, crop: &RgbImage) -> TeamLabel {
            if crop.get_pixel(0, 0).0[0] > 127 {
                TeamLabel::new("A")
            } else {
                TeamLabel::new("B")
            }
        }
    }

    fn labels(names: &[&str]) -> Vec<TeamLabel> {
        names.iter().map(|n| TeamLabel::new(*n)).collect()
    }

    #[test]
    fn test_mode_breaks_ties_towards_earliest() {
        let mut clf = InertiaClassifier::new(FirstPixel, 3, 100);
        let id = TrackId(1);
        let mut last = TeamLabel::unknown();
        for label in labels(&["A", "A", "B"]) {
            last = clf.observe(id, label);
        }
        assert_eq!(last, TeamLabel::new("A"));

        let mut clf = InertiaClassifier::new(FirstPixel, 3, 100);
        for label in labels(&["A", "B", "B"]) {
            last = clf.observe(id, label);
        }
        assert_eq!(last, TeamLabel::new("B"));

        let mut clf = InertiaClassifier::new(FirstPixel, 4, 100);
        for label in labels(&["B", "A", "A", "B"]) {
            last = clf.observe(id, label);
        }
        assert_eq!(last, TeamLabel::new("B"));
    }

    #[test]
    fn test_window_drops_oldest() {
        let mut clf = InertiaClassifier::new(FirstPixel, 2, 100);
        let id = TrackId(3);
        for label in labels(&["A", "A", "A", "B", "B"]) {
            clf.observe(id, label);
        }
        assert_eq!(clf.smoothed_label(id), Some(TeamLabel::new("B")));
    }

    #[test]
    fn test_predict_labels_detections() {
        let frame = RgbImage::from_fn(100, 50, |x, _| {
            if x < 50 {
                Px([255, 0, 0])
            } else {
                Px([0, 0, 255])
            }
        });
        let mut dets = vec![
            Detection::new(1, BoundingBox::from_corners(0.0, 0.0, 20.0, 40.0), 0.9),
            Detection::new(2, BoundingBox::from_corners(60.0, 0.0, 80.0, 40.0), 0.9),
            Detection::new(3, BoundingBox::from_corners(120.0, 0.0, 140.0, 40.0), 0.9),
        ];

        let mut clf = InertiaClassifier::new(FirstPixel, 5, 100);
        clf.predict(&mut dets, &frame);

        assert_eq!(dets[0].data.label, Some(TeamLabel::new("A")));
        assert_eq!(dets[1].data.label, Some(TeamLabel::new("B")));
        // Entirely outside the frame
        assert_eq!(dets[2].data.label, Some(TeamLabel::unknown()));
        assert_eq!(clf.tracked_identities(), 3);
    }

    #[test]
    fn test_stale_identities_are_pruned() {
        let frame = RgbImage::from_pixel(40, 40, Px([255, 0, 0]));
        let mut clf = InertiaClassifier::new(FirstPixel, 5, 2);

        let mut first = vec![Detection::new(1, BoundingBox::from_corners(0.0, 0.0, 10.0, 10.0), 0.9)];
        clf.predict(&mut first, &frame);
        assert_eq!(clf.tracked_identities(), 1);

        for _ in 0..3 {
            let mut other = vec![Detection::new(2, BoundingBox::from_corners(0.0, 0.0, 10.0, 10.0), 0.9)];
            clf.predict(&mut other, &frame);
        }
        assert_eq!(clf.tracked_identities(), 1);
        assert!(clf.smoothed_label(TrackId(1)).is_none());
        assert!(clf.smoothed_label(TrackId(2)).is_some());
    }
}
