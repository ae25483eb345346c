//! Arrow layout and the renderer trait.

use crate::path::{arrow_shaft, segment_count};
use arrowboard_core::{Arrow, ArrowColor, ArrowOptions, BoardGeometry, BoardId, Square};
use kurbo::BezPath;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Render failed: {0}")]
    RenderFailed(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Everything needed to lay out the arrows of one board.
pub struct ArrowScene<'a> {
    /// Board instance, used to namespace element ids.
    pub board_id: &'a BoardId,
    /// Orientation and size of the board.
    pub geometry: BoardGeometry,
    /// Arrows to draw, including the draft if one is visible.
    pub arrows: &'a [Arrow],
    /// The arrow currently being drawn, if any.
    pub draft: Option<&'a Arrow>,
    /// Style options. Invalid values are replaced at layout time.
    pub options: ArrowOptions,
}

impl<'a> ArrowScene<'a> {
    /// Create a new scene with default options and no draft.
    pub fn new(board_id: &'a BoardId, geometry: BoardGeometry, arrows: &'a [Arrow]) -> Self {
        Self {
            board_id,
            geometry,
            arrows,
            draft: None,
            options: ArrowOptions::default(),
        }
    }

    /// Mark the arrow being drawn.
    pub fn with_draft(mut self, draft: Option<&'a Arrow>) -> Self {
        self.draft = draft;
        self
    }

    /// Set the style options. Invalid values fall back to defaults.
    pub fn with_options(mut self, options: &ArrowOptions) -> Self {
        self.options = options.sanitized();
        self
    }

    /// Whether `arrow` is the arrow being drawn.
    fn is_active(&self, arrow: &Arrow) -> bool {
        self.draft.is_some_and(|draft| draft == arrow)
    }

    /// Whether an arrow from another square also points at `arrow.to`.
    fn has_converging_neighbor(&self, arrow: &Arrow) -> bool {
        self.arrows
            .iter()
            .any(|other| other.from != arrow.from && other.to == arrow.to)
    }
}

/// A laid-out arrow, ready for a drawing backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowPath {
    pub from: Square,
    pub to: Square,
    /// Arrow shaft in board pixels.
    pub path: BezPath,
    pub color: ArrowColor,
    pub stroke_width: f64,
    pub opacity: f64,
    /// Id of this arrow's arrowhead marker.
    pub marker_id: String,
    /// Stable element key for the arrow.
    pub key: String,
    /// Whether this is the arrow being drawn.
    pub active: bool,
}

impl ArrowPath {
    /// SVG path data of the shaft (`M x,y L x,y ...`).
    pub fn path_command(&self) -> String {
        self.path.to_svg()
    }

    /// Number of straight segments in the shaft.
    pub fn segment_count(&self) -> usize {
        segment_count(&self.path)
    }
}

/// Lay out every drawable arrow of a scene, in list order.
///
/// Arrows whose squares are not on the board, or whose endpoints coincide,
/// are skipped.
pub fn render_arrows(scene: &ArrowScene) -> Vec<ArrowPath> {
    let options = scene.options.sanitized();
    let square_width = scene.geometry.square_width();
    let board_id = scene.board_id;

    scene
        .arrows
        .iter()
        .enumerate()
        .filter_map(|(index, arrow)| {
            let (Some(start), Some(end)) = (
                scene.geometry.square_center(arrow.from),
                scene.geometry.square_center(arrow.to),
            ) else {
                log::debug!("Skipping arrow {} with off-board square", arrow);
                return None;
            };

            let active = scene.is_active(arrow);

            // Arrows from different squares converging on one target are
            // shortened more so their heads do not overlap.
            let denominator = if !active && scene.has_converging_neighbor(arrow) {
                options.same_target_arrow_length_reducer_denominator
            } else {
                options.arrow_length_reducer_denominator
            };
            let reducer = square_width / denominator;

            let Some(path) = arrow_shaft(start, end, square_width, reducer) else {
                log::debug!("Skipping degenerate arrow {}", arrow);
                return None;
            };

            let base_width = square_width / options.arrow_width_denominator;
            let (stroke_width, opacity) = if active {
                (
                    base_width * options.active_arrow_width_multiplier,
                    options.active_opacity,
                )
            } else {
                (base_width, options.opacity)
            };

            Some(ArrowPath {
                from: arrow.from,
                to: arrow.to,
                path,
                color: arrow.color_or(&options.default_color).clone(),
                stroke_width,
                opacity,
                marker_id: format!("{}-arrowhead-{}-{}-{}", board_id, index, arrow.from, arrow.to),
                key: format!(
                    "{}-arrow-{}-{}{}",
                    board_id,
                    arrow.from,
                    arrow.to,
                    if active { "-active" } else { "" }
                ),
                active,
            })
        })
        .collect()
}

/// Trait for arrow overlay backends.
pub trait OverlayRenderer {
    /// What the backend produces for one frame.
    type Output;

    /// Draw the arrows of a scene.
    fn render(&mut self, scene: &ArrowScene) -> RenderResult<Self::Output>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrowboard_core::{ArrowStore, Orientation};
    use kurbo::{PathEl, Point};

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn arrow(from: &str, to: &str, color: &str) -> Arrow {
        Arrow::new(sq(from), sq(to), color)
    }

    fn tip(path: &ArrowPath) -> Point {
        match path.path.elements().last() {
            Some(PathEl::LineTo(p)) => *p,
            other => panic!("unexpected path end {:?}", other),
        }
    }

    fn shortening(path: &ArrowPath, geometry: &BoardGeometry) -> f64 {
        let target = geometry.square_center(path.to).unwrap();
        (target - tip(path)).hypot()
    }

    #[test]
    fn test_single_arrow_descriptor() {
        let id = BoardId::new("board");
        let arrows = vec![arrow("e2", "e4", "red")];
        let scene = ArrowScene::new(&id, BoardGeometry::default(), &arrows);
        let paths = render_arrows(&scene);

        assert_eq!(paths.len(), 1);
        let path = &paths[0];
        assert_eq!(path.path_command(), "M1152,1664 L1152,1184");
        assert_eq!(path.color.as_str(), "red");
        assert!((path.stroke_width - 256.0 / 5.0).abs() < 1e-9);
        assert!((path.opacity - 0.65).abs() < 1e-9);
        assert_eq!(path.marker_id, "board-arrowhead-0-e2-e4");
        assert_eq!(path.key, "board-arrow-e2-e4");
        assert!(!path.active);
    }

    #[test]
    fn test_fallback_color() {
        let id = BoardId::new("board");
        let arrows = vec![Arrow::uncolored(sq("e2"), sq("e4"))];
        let scene = ArrowScene::new(&id, BoardGeometry::default(), &arrows);
        assert_eq!(render_arrows(&scene)[0].color.as_str(), "green");
    }

    #[test]
    fn test_black_orientation_mirrors_path() {
        let id = BoardId::new("board");
        let arrows = vec![arrow("e2", "e4", "red")];
        let geometry = BoardGeometry::default().with_orientation(Orientation::Black);
        let scene = ArrowScene::new(&id, geometry, &arrows);
        let paths = render_arrows(&scene);
        assert_eq!(paths[0].path_command(), "M896,384 L896,864");
    }

    #[test]
    fn test_knight_arrow_has_two_segments() {
        let id = BoardId::new("board");
        let arrows = vec![
            arrow("g1", "f3", "green"),
            arrow("b1", "d2", "green"),
            arrow("e2", "e4", "green"),
            arrow("a1", "h8", "green"),
        ];
        let scene = ArrowScene::new(&id, BoardGeometry::default(), &arrows);
        let counts: Vec<usize> = render_arrows(&scene).iter().map(ArrowPath::segment_count).collect();
        assert_eq!(counts, vec![2, 2, 1, 1]);
    }

    #[test]
    fn test_same_target_arrows_shortened_more() {
        let id = BoardId::new("board");
        let geometry = BoardGeometry::default();
        let arrows = vec![
            arrow("c3", "e5", "red"),
            arrow("g3", "e5", "red"),
            arrow("a1", "a4", "red"),
        ];
        let scene = ArrowScene::new(&id, geometry, &arrows);
        let paths = render_arrows(&scene);

        assert!((shortening(&paths[0], &geometry) - 64.0).abs() < 1e-9);
        assert!((shortening(&paths[1], &geometry) - 64.0).abs() < 1e-9);
        assert!((shortening(&paths[2], &geometry) - 32.0).abs() < 1e-9);
    }

    #[test]
    fn test_same_origin_does_not_count_as_converging() {
        let id = BoardId::new("board");
        let geometry = BoardGeometry::default();
        let arrows = vec![arrow("c3", "e5", "red")];
        let scene = ArrowScene::new(&id, geometry, &arrows);
        let paths = render_arrows(&scene);
        assert!((shortening(&paths[0], &geometry) - 32.0).abs() < 1e-9);
    }

    #[test]
    fn test_draft_style_and_no_extra_shortening() {
        let id = BoardId::new("board");
        let geometry = BoardGeometry::default();
        let draft = arrow("g3", "e5", "blue");
        let arrows = vec![arrow("c3", "e5", "red"), draft.clone()];
        let scene = ArrowScene::new(&id, geometry, &arrows).with_draft(Some(&draft));
        let paths = render_arrows(&scene);

        let committed = &paths[0];
        let active = &paths[1];
        assert!(!committed.active);
        assert!(active.active);
        assert_eq!(active.key, "board-arrow-g3-e5-active");
        assert!((active.opacity - 0.5).abs() < 1e-9);
        assert!((active.stroke_width - 0.9 * 256.0 / 5.0).abs() < 1e-9);
        // The committed arrow still sees the draft converging on its target.
        assert!((shortening(committed, &geometry) - 64.0).abs() < 1e-9);
        assert!((shortening(active, &geometry) - 32.0).abs() < 1e-9);
    }

    #[test]
    fn test_custom_options() {
        let id = BoardId::new("board");
        let options = ArrowOptions {
            arrow_width_denominator: 8.0,
            arrow_length_reducer_denominator: 4.0,
            opacity: 1.0,
            ..ArrowOptions::default()
        };
        let geometry = BoardGeometry::default();
        let arrows = vec![arrow("e2", "e4", "red")];
        let scene = ArrowScene::new(&id, geometry, &arrows).with_options(&options);
        let path = &render_arrows(&scene)[0];
        assert!((path.stroke_width - 32.0).abs() < 1e-9);
        assert!((path.opacity - 1.0).abs() < 1e-9);
        assert!((shortening(path, &geometry) - 64.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_denominators_set_directly_fall_back() {
        let id = BoardId::new("board");
        let geometry = BoardGeometry::default();
        let arrows = vec![arrow("e2", "e4", "red"), arrow("c3", "e4", "red")];
        let mut scene = ArrowScene::new(&id, geometry, &arrows);
        scene.options.arrow_length_reducer_denominator = 0.0;
        scene.options.same_target_arrow_length_reducer_denominator = f64::NAN;
        scene.options.arrow_width_denominator = 0.0;

        let paths = render_arrows(&scene);
        assert_eq!(paths.len(), 2);
        for path in &paths {
            assert!(path.stroke_width.is_finite());
            assert!((path.stroke_width - 256.0 / 5.0).abs() < 1e-9);
            assert!((shortening(path, &geometry) - 64.0).abs() < 1e-9);
        }
        assert_eq!(paths[0].path_command(), "M1152,1664 L1152,1216");
    }

    #[test]
    fn test_black_knight_arrow_mirrors_corner() {
        let id = BoardId::new("board");
        let arrows = vec![arrow("g1", "f3", "green")];
        let geometry = BoardGeometry::default().with_orientation(Orientation::Black);
        let scene = ArrowScene::new(&id, geometry, &arrows);
        let paths = render_arrows(&scene);

        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].segment_count(), 2);
        assert_eq!(paths[0].path_command(), "M384,128 L384,640 L608,640");
        match paths[0].path.elements()[1] {
            PathEl::LineTo(corner) => {
                assert_eq!(corner, Point::new(2048.0 - 1664.0, 2048.0 - 1408.0));
            }
            ref other => panic!("unexpected corner element {:?}", other),
        }
    }

    #[test]
    fn test_invalid_arrows_skipped() {
        let id = BoardId::new("board");
        let arrows = vec![
            arrow("e2", "e2", "red"),
            arrow("e2", "i9", "red"),
            arrow("d2", "d4", "red"),
        ];
        let scene = ArrowScene::new(&id, BoardGeometry::default(), &arrows);
        let paths = render_arrows(&scene);
        assert_eq!(paths.len(), 1);
        // Marker ids keep the list index.
        assert_eq!(paths[0].marker_id, "board-arrowhead-2-d2-d4");
    }

    #[test]
    fn test_render_is_deterministic() {
        let id = BoardId::new("board");
        let arrows = vec![
            arrow("g1", "f3", "green"),
            arrow("c3", "e5", "red"),
            arrow("g3", "e5", "red"),
        ];
        let scene = ArrowScene::new(&id, BoardGeometry::default(), &arrows);
        assert_eq!(render_arrows(&scene), render_arrows(&scene));
    }

    #[test]
    fn test_renders_store_output() {
        let mut store = ArrowStore::new();
        store.set_external_arrows(Some(vec![arrow("e2", "e4", "red")]));
        store.begin_draft(sq("g1"));
        store.update_draft(sq("f3"), "green".into());

        let id = BoardId::new("board");
        let draft = store.draft_arrow();
        let scene = ArrowScene::new(&id, BoardGeometry::default(), store.merged_arrows())
            .with_draft(draft.as_ref());
        let paths = render_arrows(&scene);
        assert_eq!(paths.len(), 2);
        assert!(!paths[0].active);
        assert!(paths[1].active);
        assert_eq!(paths[1].segment_count(), 2);
    }
}
