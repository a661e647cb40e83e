//! # sva_core - Tactical Annotation Engine for Football Video
//!
//! Turns per-frame player and ball detections into tactical information:
//! team assignment, ball possession, passes, formation shape and the ball
//! trail. Detection, tracking, video I/O and pixel rasterization live
//! outside this crate.
//!
//! ## Features
//! - Jersey colour classification with per-track temporal smoothing
//! - Possession with hysteresis, never flipped by a single noisy frame
//! - Pass and turnover detection
//! - Formation hulls, nearest-teammate lines and shape statistics
//! - Immutable per-frame snapshots for any rendering backend
//! - JSON API for host integration

// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]
#![allow(clippy::too_many_arguments)]

pub mod api;
pub mod classify;
pub mod config;
pub mod entity;
pub mod error;
pub mod formation;
pub mod geometry;
pub mod passes;
pub mod pipeline;
pub mod possession;
pub mod render;
pub mod snapshot;

pub use api::{config_from_json, snapshot_to_json, summary_to_json, AnnotationReport};
pub use config::AnnotatorConfig;
pub use error::{ConfigError, CoreError, GeometryError, Result};
pub use pipeline::{FrameInput, TacticalPipeline};
pub use render::RenderAdapter;
pub use snapshot::{FrameSnapshot, MatchSummary};
