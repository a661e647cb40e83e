//! # Tactical Pipeline
//!
//! Runs the per-frame stages in their fixed order:
//!
//! 1. Drop low-confidence detections, pick the main ball
//! 2. Apply the camera transform
//! 3. Classify and smooth player labels, resolve teams
//! 4. Update possession, then the pass detector
//! 5. Build formation geometry and the ball trail
//! 6. Freeze everything into a [`FrameSnapshot`]
//!
//! Frames must be fed in order; possession hysteresis and the trail depend on it.

use image::RgbImage;

use crate::classify::{HsvClassifier, InertiaClassifier, TeamClassifier};
use crate::config::{AnnotatorConfig, LayerToggles};
use crate::entity::{Ball, Detection, Player, TeamRoster, TeamSide};
use crate::error::Result;
use crate::formation::{analyze_team, trail_markers, trail_segments};
use crate::geometry::{CoordinateTransform, IdentityTransform};
use crate::passes::{Pass, PassDetector, PassOutcome};
use crate::possession::{PossessionTracker, PossessionUpdate};
use crate::snapshot::{BallView, FrameSnapshot, MatchSummary, PlayerView, TeamStats};

/// Tracker output for one frame.
pub struct FrameInput<'a> {
    pub frame: &'a RgbImage,
    /// Person detections (players and referees)
    pub players: Vec<Detection>,
    /// Ball candidates; the most confident one is used
    pub balls: Vec<Detection>,
    /// Camera-motion compensation, identity when absent
    pub transform: Option<&'a dyn CoordinateTransform>,
}

impl<'a> FrameInput<'a> {
    pub fn new(frame: &'a RgbImage, players: Vec<Detection>, balls: Vec<Detection>) -> Self {
        Self {
            frame,
            players,
            balls,
            transform: None,
        }
    }

    pub fn with_transform(mut self, transform: &'a dyn CoordinateTransform) -> Self {
        self.transform = Some(transform);
        self
    }
}

/// Owns all cross-frame state of one annotated video.
pub struct TacticalPipeline<C = HsvClassifier> {
    config: AnnotatorConfig,
    classifier: InertiaClassifier<C>,
    roster: TeamRoster,
    possession: PossessionTracker,
    passes: PassDetector,
    ball: Ball,
    frame_index: u64,
}

impl TacticalPipeline<HsvClassifier> {
    /// Pipeline with the colour-histogram classifier from `config`.
    pub fn new(config: AnnotatorConfig) -> Result<Self> {
        let classifier = HsvClassifier::from_config(&config.classifier);
        Self::with_classifier(config, classifier)
    }
}

impl<C: TeamClassifier> TacticalPipeline<C> {
    /// Pipeline with a caller-supplied per-crop classifier.
    pub fn with_classifier(config: AnnotatorConfig, classifier: C) -> Result<Self> {
        config.validate()?;

        let smoothing = &config.smoothing;
        let pipeline = Self {
            classifier: InertiaClassifier::new(classifier, smoothing.inertia, smoothing.history_ttl_frames),
            roster: TeamRoster::from_config(&config.teams),
            possession: PossessionTracker::new(config.possession.clone()),
            passes: PassDetector::new(config.passes.clone()),
            ball: Ball::new(config.trail.max_length),
            frame_index: 0,
            config,
        };
        log::info!(
            "Tactical pipeline ready: {} vs {}, {} colour filters",
            pipeline.roster.home.name,
            pipeline.roster.away.name,
            pipeline.config.classifier.filters.len()
        );
        Ok(pipeline)
    }

    /// Process one frame. Never fails: missing or degenerate input yields a
    /// neutral snapshot.
    pub fn process_frame(&mut self, input: FrameInput<'_>) -> FrameSnapshot {
        self.frame_index += 1;
        let transform: &dyn CoordinateTransform = input.transform.unwrap_or(&IdentityTransform);
        let detection_cfg = &self.config.detection;

        let mut people: Vec<Detection> = input
            .players
            .into_iter()
            .filter(|d| d.confidence > detection_cfg.player_min_confidence)
            .collect();
        let balls: Vec<Detection> = input
            .balls
            .into_iter()
            .filter(|d| d.confidence > detection_cfg.ball_min_confidence)
            .collect();

        for det in &mut people {
            det.apply_transform(transform);
        }
        let mut main_ball = Ball::select_main(balls);
        if let Some(ball) = main_ball.as_mut() {
            ball.apply_transform(transform);
        }

        self.classifier.predict(&mut people, input.frame);
        let players = Player::from_detections(people, &self.roster);

        self.ball.set_detection(main_ball);
        if !self.config.layers.ball_trail {
            self.ball.trail.clear();
        }

        let update = self.possession.update(&players, &self.ball, &mut self.roster);
        self.passes.update(update.closest, &self.ball);
        let pass_outcome = self.passes.process_pass(&mut self.roster);

        let possessing_color = update.possessing_team.map(|side| self.roster.get(side).color);
        self.ball.set_color(possessing_color);

        log::trace!(
            "Frame {}: {} players, ball {}, possession {:?}",
            self.frame_index,
            players.len(),
            if self.ball.detection.is_some() { "seen" } else { "missing" },
            update.state
        );

        self.snapshot(&players, transform, update, pass_outcome)
    }

    fn snapshot(
        &self,
        players: &[Player],
        transform: &dyn CoordinateTransform,
        update: PossessionUpdate,
        pass_outcome: PassOutcome,
    ) -> FrameSnapshot {
        let layers = self.config.layers;
        let formation_cfg = &self.config.formation;

        let mut lines = Vec::new();
        let mut polygons = Vec::new();
        let mut team_stats = Vec::with_capacity(2);
        for side in TeamSide::ALL {
            let geometry = analyze_team(side, self.roster.get(side).color, players, formation_cfg);
            if layers.formation_lines {
                lines.extend(geometry.lines);
            }
            if layers.formation_polygons {
                polygons.extend(geometry.polygon);
            }
            team_stats.push(TeamStats {
                team: side,
                stats: geometry.stats,
            });
        }

        let (trail, markers) = if layers.ball_trail {
            (
                trail_segments(&self.ball.trail, self.ball.color, transform, &self.config.trail),
                trail_markers(&self.ball.trail, self.ball.color, transform, &self.config.trail),
            )
        } else {
            (Vec::new(), Vec::new())
        };

        let passes: Vec<Pass> = if layers.passes {
            self.roster
                .iter()
                .flat_map(|team| team.passes.iter())
                .map(|pass| Pass {
                    start: transform.abs_to_rel(pass.start),
                    end: transform.abs_to_rel(pass.end),
                    ..*pass
                })
                .collect()
        } else {
            Vec::new()
        };

        FrameSnapshot {
            frame_index: self.frame_index,
            players: players
                .iter()
                .map(|p| PlayerView::from_player(p, formation_cfg.field_width, formation_cfg.field_height))
                .collect(),
            ball: BallView {
                bbox: self.ball.detection.as_ref().map(|d| d.bbox),
                color: self.ball.color,
            },
            possession: update.state,
            possessing_team: update.possessing_team,
            closest_player: update.closest,
            lines,
            polygons,
            trail,
            trail_markers: markers,
            team_stats,
            passes,
            pass_outcome,
            summary: self.summary(),
            layers,
        }
    }

    /// Totals so far.
    pub fn summary(&self) -> MatchSummary {
        MatchSummary::new(
            &self.roster,
            self.possession.duration(),
            self.config.fps,
            self.possession.possessing_team(),
        )
    }

    pub fn roster(&self) -> &TeamRoster {
        &self.roster
    }

    pub fn config(&self) -> &AnnotatorConfig {
        &self.config
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn classifier(&self) -> &InertiaClassifier<C> {
        &self.classifier
    }

    /// Switch overlay layers; turning the trail off forgets it.
    pub fn set_layers(&mut self, layers: LayerToggles) {
        if !layers.ball_trail {
            self.ball.trail.clear();
        }
        self.config.layers = layers;
    }

    /// Frames processed so far.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }
}
