//! JSON entry points for hosts that talk to the engine through strings.

use serde::{Deserialize, Serialize};

use crate::config::AnnotatorConfig;
use crate::entity::TeamRoster;
use crate::error::Result;
use crate::passes::Pass;
use crate::snapshot::{FrameSnapshot, MatchSummary};

/// End-of-run report: totals plus every detected pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationReport {
    pub summary: MatchSummary,
    /// Possession line, e.g. `"MIA: 00:12 | PAL: 00:30"`
    pub possession_line: String,
    pub home_passes: Vec<Pass>,
    pub away_passes: Vec<Pass>,
}

impl AnnotationReport {
    pub fn new(summary: MatchSummary, roster: &TeamRoster) -> Self {
        Self {
            possession_line: summary.to_string(),
            summary,
            home_passes: roster.home.passes.clone(),
            away_passes: roster.away.passes.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn snapshot_to_json(snapshot: &FrameSnapshot) -> Result<String> {
    Ok(serde_json::to_string(snapshot)?)
}

pub fn summary_to_json(summary: &MatchSummary) -> Result<String> {
    Ok(serde_json::to_string(summary)?)
}

/// Parse and validate a configuration; omitted sections keep their defaults.
pub fn config_from_json(json: &str) -> Result<AnnotatorConfig> {
    let config: AnnotatorConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

pub fn config_to_json(config: &AnnotatorConfig) -> Result<String> {
    Ok(serde_json::to_string_pretty(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::TeamSide;
    use crate::error::CoreError;

    #[test]
    fn test_config_json_roundtrip() {
        let config = AnnotatorConfig::responsive();
        let json = config_to_json(&config).unwrap();
        assert_eq!(config_from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_partial_config_json() {
        let config = config_from_json(r#"{"possession": {"ball_distance_threshold": 30.0}}"#).unwrap();
        assert!((config.possession.ball_distance_threshold - 30.0).abs() < 1e-6);
        assert_eq!(config.possession.counter_threshold, 20);
    }

    #[test]
    fn test_bad_config_json() {
        assert!(matches!(config_from_json("{not json"), Err(CoreError::Json(_))));
        assert!(matches!(
            config_from_json(r#"{"fps": 0.0}"#),
            Err(CoreError::Config(_))
        ));
    }

    #[test]
    fn test_summary_json_fields() {
        let mut roster = TeamRoster::default();
        roster.away.possession_frames = 30;
        let summary = MatchSummary::new(&roster, 60, 30.0, Some(TeamSide::Away));
        let value: serde_json::Value = serde_json::from_str(&summary_to_json(&summary).unwrap()).unwrap();

        assert_eq!(value["duration"], 60);
        assert_eq!(value["possessing_team"], "away");
        assert_eq!(value["away"]["possession_percentage"], 50);
        assert_eq!(value["away"]["possession_time"], "00:01");

        let report = AnnotationReport::new(summary, &roster);
        assert_eq!(report.possession_line, "MIA: 00:00 | PAL: 00:01");
        assert!(report.to_json().unwrap().contains("home_passes"));
    }
}
