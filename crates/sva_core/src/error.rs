use thiserror::Error;

/// Errors surfaced at configuration/startup time.
///
/// Nothing in the per-frame path returns these; frame processing degrades to
/// a neutral result instead.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Validation failures for [`crate::config::AnnotatorConfig`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },

    #[error("{field} must be within [{min}, {max}], found {found}")]
    OutOfRange {
        field: &'static str,
        min: f32,
        max: f32,
        found: f32,
    },

    #[error("{field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("colour filter table is empty")]
    NoFilters,

    #[error("colour filter '{0}' has no colour ranges")]
    EmptyFilter(String),

    #[error("colour range '{name}' has lower bound above upper bound")]
    InvertedRange { name: String },

    #[error("home and away teams share the name '{0}'")]
    DuplicateTeam(String),
}

/// Degenerate input to the formation geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("convex hull needs at least 3 points, found {found}")]
    InsufficientPoints { found: usize },

    #[error("all points are collinear")]
    Collinear,
}

impl CoreError {
    /// Whether retrying with different input could succeed.
    pub fn is_recoverable(&self) -> bool {
        match self {
            CoreError::Io(_) => true,
            CoreError::Yaml(_) | CoreError::Json(_) => false,
            CoreError::Config(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
