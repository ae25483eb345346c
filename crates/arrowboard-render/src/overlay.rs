//! SVG overlay backend.

use crate::renderer::{render_arrows, ArrowPath, ArrowScene, OverlayRenderer, RenderResult, RendererError};
use svg::node::element::{Group, Marker, Path, Polygon};
use svg::Document;

/// Inline style placing the overlay above the board squares and pieces.
const OVERLAY_STYLE: &str =
    "position:absolute;top:0;right:0;bottom:0;left:0;pointer-events:none;z-index:20";

/// Renders arrows as a standalone `<svg>` element.
///
/// Each arrow gets its own arrowhead `<marker>` so colors never bleed
/// between overlapping arrows.
#[derive(Debug, Clone, Default)]
pub struct SvgRenderer {
    /// Include the overlay positioning style on the root element.
    pub overlay_style: bool,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self {
            overlay_style: true,
        }
    }

    /// Build the document for a scene without serializing it.
    pub fn document(&self, scene: &ArrowScene) -> RenderResult<Document> {
        let width = scene.geometry.width;
        if !width.is_finite() || width <= 0.0 {
            return Err(RendererError::RenderFailed(format!("invalid board width {}", width)));
        }

        let arrows = render_arrows(scene);
        log::trace!("Building SVG overlay with {} arrows", arrows.len());

        let mut document = Document::new().set("viewBox", (0.0, 0.0, width, scene.geometry.height()));
        if self.overlay_style {
            document = document.set("style", OVERLAY_STYLE);
        }
        for arrow in &arrows {
            document = document.add(arrow_group(arrow));
        }
        Ok(document)
    }
}

fn arrow_group(arrow: &ArrowPath) -> Group {
    let head = Polygon::new()
        .set("points", "0.3 0, 2 1.25, 0.3 2.5")
        .set("fill", arrow.color.as_str());
    let marker = Marker::new()
        .set("id", arrow.marker_id.as_str())
        .set("markerWidth", 2)
        .set("markerHeight", 2.5)
        .set("refX", 1.25)
        .set("refY", 1.25)
        .set("orient", "auto")
        .add(head);
    let shaft = Path::new()
        .set("d", arrow.path_command())
        .set("fill", "none")
        .set("opacity", arrow.opacity)
        .set("stroke", arrow.color.as_str())
        .set("stroke-width", arrow.stroke_width)
        .set("marker-end", format!("url(#{})", arrow.marker_id));

    Group::new()
        .set("data-key", arrow.key.as_str())
        .add(marker)
        .add(shaft)
}

impl OverlayRenderer for SvgRenderer {
    type Output = String;

    fn render(&mut self, scene: &ArrowScene) -> RenderResult<String> {
        Ok(self.document(scene)?.to_string())
    }
}
