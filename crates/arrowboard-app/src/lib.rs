//! Arrowboard Application
//!
//! Command-line shell that replays board scenes (configuration, external
//! arrows and pointer gestures) through the arrow store and renders the
//! resulting overlay.

mod scene;

pub use scene::{load_scene, run_scene, AppError, AppResult, SceneConfig, SceneOutput};
