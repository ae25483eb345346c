//! Board geometry: mapping squares to pixel positions and back.

use crate::square::{BoardDimensions, Orientation, Square};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Width of the overlay view box. Arrows are laid out in this coordinate
/// space and scaled to the real board size by the host.
pub const VIEWBOX_WIDTH: f64 = 2048.0;

/// Geometry of a rendered board.
///
/// Converts between board squares and pixel coordinates for a given
/// orientation and width. The height follows from the aspect ratio of the
/// board dimensions, so squares are always square.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardGeometry {
    /// Side drawn at the bottom of the board.
    pub orientation: Orientation,
    /// Board width in pixels.
    pub width: f64,
    /// Number of columns and rows.
    pub dimensions: BoardDimensions,
}

impl Default for BoardGeometry {
    fn default() -> Self {
        Self {
            orientation: Orientation::White,
            width: VIEWBOX_WIDTH,
            dimensions: BoardDimensions::default(),
        }
    }
}

impl BoardGeometry {
    /// Create a new board geometry.
    pub fn new(orientation: Orientation, width: f64, dimensions: BoardDimensions) -> Self {
        Self {
            orientation,
            width,
            dimensions,
        }
    }

    /// Set the orientation.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Width of a single square in pixels.
    pub fn square_width(&self) -> f64 {
        if self.dimensions.cols == 0 {
            return 0.0;
        }
        self.width / f64::from(self.dimensions.cols)
    }

    /// Board height in pixels.
    pub fn height(&self) -> f64 {
        self.square_width() * f64::from(self.dimensions.rows)
    }

    /// Turn the board around.
    pub fn flip(&mut self) {
        self.orientation = self.orientation.flipped();
    }

    /// Pixel position of the center of a square.
    ///
    /// Returns `None` for squares that are not on the board, or when the
    /// board has no usable width.
    pub fn square_center(&self, square: Square) -> Option<Point> {
        let square_width = self.square_width();
        if !square.is_on(self.dimensions) || !square_width.is_finite() || square_width <= 0.0 {
            return None;
        }

        let (col, row) = self.grid_position(square);
        Some(Point::new(
            f64::from(col) * square_width + square_width / 2.0,
            f64::from(row) * square_width + square_width / 2.0,
        ))
    }

    /// Square under a pixel position, if any.
    pub fn square_at(&self, point: Point) -> Option<Square> {
        let square_width = self.square_width();
        if !square_width.is_finite() || square_width <= 0.0 || point.x < 0.0 || point.y < 0.0 {
            return None;
        }

        let col = (point.x / square_width).floor();
        let row = (point.y / square_width).floor();
        if col >= f64::from(self.dimensions.cols) || row >= f64::from(self.dimensions.rows) {
            return None;
        }
        let (col, row) = (col as u8, row as u8);

        let (file, rank) = match self.orientation {
            Orientation::White => (col, self.dimensions.rows - 1 - row),
            Orientation::Black => (self.dimensions.cols - 1 - col, row),
        };
        Square::new(file, rank)
    }

    /// Column and row (from the top-left corner) of an on-board square.
    fn grid_position(&self, square: Square) -> (u8, u8) {
        match self.orientation {
            Orientation::White => (square.file(), self.dimensions.rows - 1 - square.rank()),
            Orientation::Black => (self.dimensions.cols - 1 - square.file(), square.rank()),
        }
    }
}
