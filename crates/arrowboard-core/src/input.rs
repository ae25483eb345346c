//! Pointer gestures on board squares that draw arrows.

use crate::arrow::ArrowColor;
use crate::square::Square;
use crate::store::ArrowStore;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Right,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        alt: false,
    };
    pub const SHIFT: Self = Self {
        shift: true,
        alt: false,
    };
    pub const ALT: Self = Self {
        shift: false,
        alt: true,
    };
    pub const SHIFT_ALT: Self = Self {
        shift: true,
        alt: true,
    };

    /// Whether any modifier that selects an arrow color is held.
    pub fn any(&self) -> bool {
        self.shift || self.alt
    }
}

/// Pointer event on a board square.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SquareEvent {
    /// A button was pressed over a square.
    Down {
        square: Square,
        button: MouseButton,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// The pointer entered a square.
    Over { square: Square },
    /// A button was released over a square.
    Up { square: Square, button: MouseButton },
    /// A completed click (press and release) on a square.
    Click {
        square: Square,
        #[serde(default)]
        modifiers: Modifiers,
    },
}

/// Arrow colors selected by modifier keys.
///
/// Unset bindings fall back to the custom arrow color. Right click with Alt
/// falls back to the left click Alt binding first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrowColorBindings {
    pub alt_left_click: Option<ArrowColor>,
    pub alt_right_click: Option<ArrowColor>,
    pub shift_left_click: Option<ArrowColor>,
    pub shift_right_click: Option<ArrowColor>,
    pub shift_alt_left_click: Option<ArrowColor>,
    pub shift_alt_right_click: Option<ArrowColor>,
}

impl ArrowColorBindings {
    /// The bound color for a button and modifier combination, if any.
    pub fn color_for(&self, button: MouseButton, modifiers: Modifiers) -> Option<&ArrowColor> {
        match (button, modifiers.shift, modifiers.alt) {
            (MouseButton::Left, true, true) => self.shift_alt_left_click.as_ref(),
            (MouseButton::Right, true, true) => self.shift_alt_right_click.as_ref(),
            (MouseButton::Left, true, false) => self.shift_left_click.as_ref(),
            (MouseButton::Right, true, false) => self.shift_right_click.as_ref(),
            (MouseButton::Left, false, true) => self.alt_left_click.as_ref(),
            (MouseButton::Right, false, true) => self
                .alt_right_click
                .as_ref()
                .or(self.alt_left_click.as_ref()),
            (_, false, false) => None,
        }
    }
}

/// Default color for user-drawn arrows.
pub const DEFAULT_CUSTOM_ARROW_COLOR: &str = "rgb(255,170,0)";

/// Translates square pointer events into arrow store operations.
///
/// Right button drags always draw. Left button drags draw only while a
/// modifier is held; plain left drags belong to piece movement. A plain
/// click clears the user-drawn arrows.
#[derive(Debug, Clone)]
pub struct ArrowGestures {
    /// Color used when no modifier binding applies.
    custom_color: ArrowColor,
    /// Modifier color bindings.
    bindings: ArrowColorBindings,
    /// Color of the gesture in progress.
    current_color: ArrowColor,
    /// Square where the drawing button went down.
    start: Option<(Square, MouseButton)>,
}

impl Default for ArrowGestures {
    fn default() -> Self {
        Self::new(ArrowColor::new(DEFAULT_CUSTOM_ARROW_COLOR))
    }
}

impl ArrowGestures {
    /// Create a gesture handler drawing in `custom_color`.
    pub fn new(custom_color: ArrowColor) -> Self {
        Self {
            current_color: custom_color.clone(),
            custom_color,
            bindings: ArrowColorBindings::default(),
            start: None,
        }
    }

    /// Set the modifier color bindings.
    pub fn with_bindings(mut self, bindings: ArrowColorBindings) -> Self {
        self.bindings = bindings;
        self
    }

    /// Change the custom arrow color. Takes effect from the next gesture.
    pub fn set_custom_color(&mut self, color: ArrowColor) {
        if self.start.is_none() {
            self.current_color = color.clone();
        }
        self.custom_color = color;
    }

    /// Color of the gesture in progress (or the next one).
    pub fn current_color(&self) -> &ArrowColor {
        &self.current_color
    }

    /// Whether a drawing gesture is in progress.
    pub fn is_drawing(&self) -> bool {
        self.start.is_some()
    }

    /// Feed a pointer event into the store.
    pub fn handle_event(&mut self, store: &mut ArrowStore, event: &SquareEvent) {
        match *event {
            SquareEvent::Down {
                square,
                button,
                modifiers,
            } => {
                if button == MouseButton::Left && !modifiers.any() {
                    return;
                }
                if let Some(color) = self.bindings.color_for(button, modifiers) {
                    self.current_color = color.clone();
                }
                self.start = Some((square, button));
                store.begin_draft(square);
            }
            SquareEvent::Over { square } => {
                if self.start.is_some() {
                    store.update_draft(square, self.current_color.clone());
                }
            }
            SquareEvent::Up { square, button } => {
                if let Some((start, start_button)) = self.start {
                    if start_button == button {
                        store.end_draft(start, square, self.current_color.clone());
                        self.start = None;
                    }
                }
                if self.start.is_none() {
                    self.current_color = self.custom_color.clone();
                }
            }
            SquareEvent::Click { modifiers, .. } => {
                if !modifiers.shift {
                    store.clear_arrows();
                }
            }
        }
    }
}
