pub mod json_api;

pub use json_api::{
    config_from_json, config_to_json, snapshot_to_json, summary_to_json, AnnotationReport,
};
