//! Arrowboard Render Library
//!
//! Lays out board arrows as shortened vector paths and draws them through
//! overlay backends. The default backend writes an SVG overlay.

pub mod path;
mod overlay;
mod renderer;

pub use path::{arrow_shaft, is_knight_distance};
pub use renderer::{
    render_arrows, ArrowPath, ArrowScene, OverlayRenderer, RenderResult, RendererError,
};
pub use overlay::SvgRenderer;
