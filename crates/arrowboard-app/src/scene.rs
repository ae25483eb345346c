//! Board scene files: configuration plus a scripted gesture sequence.

use arrowboard_core::{
    Arrow, ArrowColor, ArrowColorBindings, ArrowGestures, ArrowOptions, ArrowStore,
    BoardDimensions, BoardGeometry, BoardId, Orientation, SquareEvent, ToggleRule, VIEWBOX_WIDTH,
};
use arrowboard_render::{ArrowScene, OverlayRenderer, RendererError, SvgRenderer};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fs;
use std::path::Path;
use std::rc::Rc;
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Invalid scene: {0}")]
    Parse(String),
    #[error(transparent)]
    Render(#[from] RendererError),
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// A board scene loaded from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Board instance id. A random one is generated when omitted.
    pub board_id: BoardId,
    pub orientation: Orientation,
    /// Overlay width in pixels.
    pub width: f64,
    pub dimensions: BoardDimensions,
    pub options: ArrowOptions,
    pub arrows_enabled: bool,
    pub toggle_rule: ToggleRule,
    /// Color for arrows drawn without modifier keys.
    pub custom_arrow_color: ArrowColor,
    pub color_bindings: ArrowColorBindings,
    /// Arrows supplied by the embedding page. `null` leaves them unmanaged.
    pub external_arrows: Option<Vec<Arrow>>,
    /// Pointer events replayed in order.
    pub gestures: Vec<SquareEvent>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            board_id: BoardId::generate(),
            orientation: Orientation::White,
            width: VIEWBOX_WIDTH,
            dimensions: BoardDimensions::default(),
            options: ArrowOptions::default(),
            arrows_enabled: true,
            toggle_rule: ToggleRule::default(),
            custom_arrow_color: ArrowColor::new(arrowboard_core::input::DEFAULT_CUSTOM_ARROW_COLOR),
            color_bindings: ArrowColorBindings::default(),
            external_arrows: None,
            gestures: Vec::new(),
        }
    }
}

impl SceneConfig {
    /// Parse a scene from JSON text.
    pub fn from_json(json: &str) -> AppResult<Self> {
        serde_json::from_str(json).map_err(|e| AppError::Parse(e.to_string()))
    }

    /// Board geometry described by this scene.
    pub fn geometry(&self) -> BoardGeometry {
        BoardGeometry::new(self.orientation, self.width, self.dimensions)
    }
}

/// Load a scene file.
pub fn load_scene(path: &Path) -> AppResult<SceneConfig> {
    let json = fs::read_to_string(path)
        .map_err(|e| AppError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    SceneConfig::from_json(&json)
}

/// Outcome of replaying a scene.
#[derive(Debug, Clone)]
pub struct SceneOutput {
    /// The SVG overlay after the last gesture.
    pub svg: String,
    /// Merged arrows after the last gesture.
    pub arrows: Vec<Arrow>,
    /// Number of change notifications the store emitted.
    pub changes: usize,
}

/// Replay a scene's gestures and render the resulting overlay.
pub fn run_scene(config: &SceneConfig) -> AppResult<SceneOutput> {
    let changes = Rc::new(Cell::new(0usize));

    let mut store = ArrowStore::new();
    store.set_toggle_rule(config.toggle_rule);
    store.set_arrows_enabled(config.arrows_enabled);
    let counter = Rc::clone(&changes);
    store.set_on_change(move |arrows| {
        log::info!("Arrows changed: {}", format_arrows(arrows));
        counter.set(counter.get() + 1);
    });
    store.set_external_arrows(config.external_arrows.clone());

    let mut gestures = ArrowGestures::new(config.custom_arrow_color.clone())
        .with_bindings(config.color_bindings.clone());
    for event in &config.gestures {
        log::debug!("Replaying {:?}", event);
        gestures.handle_event(&mut store, event);
    }

    let draft = store.draft_arrow();
    let scene = ArrowScene::new(&config.board_id, config.geometry(), store.merged_arrows())
        .with_draft(draft.as_ref())
        .with_options(&config.options);
    let svg = SvgRenderer::new().render(&scene)?;

    Ok(SceneOutput {
        svg,
        arrows: store.merged_arrows().to_vec(),
        changes: changes.get(),
    })
}

fn format_arrows(arrows: &[Arrow]) -> String {
    arrows
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SCENE: &str = r##"{
        "board_id": "demo",
        "custom_arrow_color": "darkred",
        "color_bindings": { "shift_right_click": "#882020" },
        "external_arrows": [["a2", "a3", "#48AD7E"], ["b2", "b2"]],
        "gestures": [
            { "type": "down", "square": "g1", "button": "right" },
            { "type": "over", "square": "f3" },
            { "type": "up", "square": "f3", "button": "right" },
            { "type": "down", "square": "e2", "button": "right", "modifiers": { "shift": true } },
            { "type": "over", "square": "e3" },
            { "type": "over", "square": "e4" },
            { "type": "up", "square": "e4", "button": "right" }
        ]
    }"##;

    #[test]
    fn test_defaults_for_empty_scene() {
        let config = SceneConfig::from_json("{}").unwrap();
        assert_eq!(config.orientation, Orientation::White);
        assert!((config.width - VIEWBOX_WIDTH).abs() < f64::EPSILON);
        assert!(config.arrows_enabled);
        assert!(config.external_arrows.is_none());
        assert!(config.gestures.is_empty());
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(SceneConfig::from_json("{ nope"), Err(AppError::Parse(_))));
        assert!(matches!(
            SceneConfig::from_json(r#"{ "external_arrows": [["e2", "z0"]] }"#),
            Err(AppError::Parse(_))
        ));
    }

    #[test]
    fn test_run_scene() {
        let config = SceneConfig::from_json(SCENE).unwrap();
        let output = run_scene(&config).unwrap();

        let arrows: Vec<String> = output.arrows.iter().map(ToString::to_string).collect();
        assert_eq!(
            arrows,
            vec!["a2->a3 (#48AD7E)", "g1->f3 (darkred)", "e2->e4 (#882020)"]
        );
        assert!(output.svg.contains("demo-arrowhead-1-g1-f3"));
        assert!(output.svg.contains("fill=\"#882020\""));
        assert!(!output.svg.contains("-active"));
        assert!(output.changes > 0);
    }

    #[test]
    fn test_run_scene_with_draft_in_progress() {
        let config = SceneConfig::from_json(
            r#"{
                "board_id": "live",
                "gestures": [
                    { "type": "down", "square": "b1", "button": "right" },
                    { "type": "over", "square": "c3" }
                ]
            }"#,
        )
        .unwrap();
        let output = run_scene(&config).unwrap();
        assert_eq!(output.arrows.len(), 1);
        assert!(output.svg.contains("data-key=\"live-arrow-b1-c3-active\""));
    }

    #[test]
    fn test_disabled_scene_draws_only_external() {
        let config = SceneConfig::from_json(
            r#"{
                "arrows_enabled": false,
                "external_arrows": [["d2", "d4"]],
                "gestures": [
                    { "type": "down", "square": "g1", "button": "right" },
                    { "type": "over", "square": "f3" },
                    { "type": "up", "square": "f3", "button": "right" }
                ]
            }"#,
        )
        .unwrap();
        let output = run_scene(&config).unwrap();
        assert_eq!(output.arrows.len(), 1);
        assert!(output.svg.contains("stroke=\"green\""));
    }

    #[test]
    fn test_load_scene_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SCENE.as_bytes()).unwrap();
        let config = load_scene(file.path()).unwrap();
        assert_eq!(config.board_id.as_str(), "demo");
        assert_eq!(config.gestures.len(), 7);
    }

    #[test]
    fn test_load_missing_scene() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_scene(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
