//! End-to-end behaviour of the tactical pipeline on synthetic frames.

use image::{Rgb as Px, RgbImage};
use sva_core::classify::{InertiaClassifier, TeamClassifier, TeamLabel};
use sva_core::config::AnnotatorConfig;
use sva_core::entity::{Detection, TeamSide, TrackId};
use sva_core::formation::{convex_hull, TeamFormationStats};
use sva_core::geometry::{BoundingBox, Point, Rgb};
use sva_core::passes::PassOutcome;
use sva_core::possession::PossessionState;
use sva_core::{snapshot_to_json, FrameInput, TacticalPipeline};

const PINK: Px<u8> = Px([255, 20, 147]);
const GREEN: Px<u8> = Px([0, 128, 0]);
const GRASS: Px<u8> = Px([90, 90, 90]);

fn paint(frame: &mut RgbImage, bbox: &BoundingBox, colour: Px<u8>) {
    for y in bbox.top_left.y as u32..bbox.bottom_right.y as u32 {
        for x in bbox.top_left.x as u32..bbox.bottom_right.x as u32 {
            frame.put_pixel(x, y, colour);
        }
    }
}

fn player_box(x: f32, y: f32) -> BoundingBox {
    BoundingBox::from_corners(x, y, x + 30.0, y + 60.0)
}

fn ball_near_right_foot(bbox: &BoundingBox) -> Detection {
    let foot = bbox.bottom_right;
    Detection::new(
        100,
        BoundingBox::from_corners(foot.x + 1.0, foot.y - 4.0, foot.x + 7.0, foot.y + 2.0),
        0.9,
    )
}

struct Scene {
    frame: RgbImage,
    boxes: Vec<(u64, BoundingBox)>,
}

impl Scene {
    /// Home players (pink) and away players (green) on a grey pitch.
    fn new(home: &[(u64, f32, f32)], away: &[(u64, f32, f32)]) -> Self {
        let mut frame = RgbImage::from_pixel(800, 600, GRASS);
        let mut boxes = Vec::new();
        for &(id, x, y) in home {
            let b = player_box(x, y);
            paint(&mut frame, &b, PINK);
            boxes.push((id, b));
        }
        for &(id, x, y) in away {
            let b = player_box(x, y);
            paint(&mut frame, &b, GREEN);
            boxes.push((id, b));
        }
        Self { frame, boxes }
    }

    fn detections(&self) -> Vec<Detection> {
        self.boxes
            .iter()
            .map(|(id, b)| Detection::new(*id, *b, 0.8))
            .collect()
    }

    fn bbox(&self, id: u64) -> BoundingBox {
        self.boxes
            .iter()
            .find(|(i, _)| *i == id)
            .map(|(_, b)| *b)
            .unwrap()
    }
}

#[test]
fn possession_confirms_on_twentieth_frame() {
    let scene = Scene::new(&[(1, 100.0, 100.0)], &[(2, 500.0, 100.0)]);
    let ball = ball_near_right_foot(&scene.bbox(1));
    let mut pipeline = TacticalPipeline::new(AnnotatorConfig::default()).unwrap();

    for frame in 1..=25u64 {
        let snap = pipeline.process_frame(FrameInput::new(
            &scene.frame,
            scene.detections(),
            vec![ball.clone()],
        ));
        if frame < 20 {
            assert_eq!(snap.possessing_team, None, "frame {}", frame);
        } else {
            assert_eq!(snap.possessing_team, Some(TeamSide::Home), "frame {}", frame);
            assert_eq!(snap.possession, PossessionState::Confirmed { team: TeamSide::Home });
        }
    }

    let summary = pipeline.summary();
    assert_eq!(summary.duration, 25);
    assert_eq!(summary.home.possession_frames, 6);
    assert_eq!(summary.away.possession_frames, 0);
    assert_eq!(pipeline.ball().color, pipeline.roster().home.color);
}

#[test]
fn players_are_drawn_in_team_colours() {
    let scene = Scene::new(&[(1, 100.0, 100.0), (3, 200.0, 300.0)], &[(2, 500.0, 100.0)]);
    let mut pipeline = TacticalPipeline::new(AnnotatorConfig::default()).unwrap();

    let snap = pipeline.process_frame(FrameInput::new(&scene.frame, scene.detections(), Vec::new()));

    let home = snap.player(TrackId(1)).unwrap();
    assert_eq!(home.team, Some(TeamSide::Home));
    assert_eq!(home.color, Some(Rgb(255, 182, 193)));
    let away = snap.player(TrackId(2)).unwrap();
    assert_eq!(away.team, Some(TeamSide::Away));
    assert_eq!(away.color, Some(Rgb(0, 128, 0)));

    // No ball: nothing to possess, frame still counted
    assert!(snap.closest_player.is_none());
    assert_eq!(snap.possession, PossessionState::NoPossession);
    assert_eq!(snap.summary.duration, 1);
    assert_eq!(snap.stats_for(TeamSide::Home).unwrap().player_count, 2);
    assert_eq!(snap.lines.iter().filter(|l| l.team == TeamSide::Home).count(), 1);
    assert!(snap.polygons.is_empty());
}

#[test]
fn pass_between_teammates_is_recorded() {
    let scene = Scene::new(&[(1, 100.0, 100.0), (3, 400.0, 100.0)], &[(2, 700.0, 400.0)]);
    let first = ball_near_right_foot(&scene.bbox(1));
    let second = ball_near_right_foot(&scene.bbox(3));
    let mut pipeline = TacticalPipeline::new(AnnotatorConfig::default()).unwrap();

    for _ in 0..25 {
        pipeline.process_frame(FrameInput::new(&scene.frame, scene.detections(), vec![first.clone()]));
    }
    let mut outcomes = Vec::new();
    for _ in 0..3 {
        let snap = pipeline.process_frame(FrameInput::new(&scene.frame, scene.detections(), vec![second.clone()]));
        outcomes.push(snap.pass_outcome);
    }

    let PassOutcome::Pass(pass) = outcomes[2] else {
        panic!("expected a pass, got {:?}", outcomes);
    };
    assert_eq!(pass.passer, TrackId(1));
    assert_eq!(pass.receiver, TrackId(3));
    assert_eq!(pass.team, TeamSide::Home);
    assert!((pass.length() - 300.0).abs() < 1e-3);
    assert_eq!(pipeline.roster().home.pass_count(), 1);
    assert_eq!(pipeline.summary().total_passes, 1);
}

#[test]
fn snapshot_serializes_to_json() {
    let scene = Scene::new(&[(1, 100.0, 100.0), (3, 200.0, 300.0), (4, 300.0, 120.0)], &[]);
    let ball = ball_near_right_foot(&scene.bbox(1));
    let mut pipeline = TacticalPipeline::new(AnnotatorConfig::default()).unwrap();

    let snap = pipeline.process_frame(FrameInput::new(&scene.frame, scene.detections(), vec![ball]));
    assert_eq!(snap.polygons.len(), 1);

    let json = snapshot_to_json(&snap).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["frame_index"], 1);
    assert_eq!(value["possession"]["state"], "provisional");
    assert_eq!(value["players"].as_array().unwrap().len(), 3);
}

#[test]
fn smoothing_window_of_three() {
    struct Never;
    impl TeamClassifier for Never {
        fn classify(&self, _: &RgbImage) -> TeamLabel {
            TeamLabel::unknown()
        }
    }

    let (a, b) = (TeamLabel::new("A"), TeamLabel::new("B"));
    let mut smoother = InertiaClassifier::new(Never, 3, 300);
    let id = TrackId(11);
    smoother.observe(id, a.clone());
    smoother.observe(id, a.clone());
    assert_eq!(smoother.observe(id, b.clone()), a);

    let mut smoother = InertiaClassifier::new(Never, 3, 300);
    smoother.observe(id, a.clone());
    smoother.observe(id, b.clone());
    assert_eq!(smoother.observe(id, b.clone()), b);
}

#[test]
fn triangle_formation() {
    let pts = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(5.0, 10.0)];
    let hull = convex_hull(&pts).unwrap();
    assert_eq!(hull.len(), 3);

    let stats = TeamFormationStats::compute(&pts, 250.0, 1920.0, 1080.0);
    let d = (125.0f32).sqrt();
    assert!((stats.compactness - (10.0 + d + d) / 3.0).abs() < 1e-4);
    assert_eq!(stats.connectivity, 1.0);
}
