//! Arrow annotations drawn between two squares.

use crate::square::Square;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Opaque display color of an arrow (any CSS color text).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArrowColor(String);

impl ArrowColor {
    pub fn new(color: impl Into<String>) -> Self {
        Self(color.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArrowColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ArrowColor {
    fn from(color: &str) -> Self {
        Self::new(color)
    }
}

impl From<String> for ArrowColor {
    fn from(color: String) -> Self {
        Self(color)
    }
}

/// The `(from, to)` pair identifying an arrow regardless of its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    pub from: Square,
    pub to: Square,
}

/// An arrow between two squares.
///
/// Serialized in the compact tuple form `["e2", "e4", "red"]`; the color may
/// be omitted, in which case the renderer's fallback color is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ArrowRepr", into = "ArrowRepr")]
pub struct Arrow {
    /// Square the arrow starts from.
    pub from: Square,
    /// Square the arrowhead points at.
    pub to: Square,
    /// Display color, if one was given.
    pub color: Option<ArrowColor>,
}

impl Arrow {
    /// Create a new colored arrow.
    pub fn new(from: Square, to: Square, color: impl Into<ArrowColor>) -> Self {
        Self {
            from,
            to,
            color: Some(color.into()),
        }
    }

    /// Create an arrow without a color.
    pub fn uncolored(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            color: None,
        }
    }

    /// The slot this arrow occupies.
    pub fn slot(&self) -> Slot {
        Slot {
            from: self.from,
            to: self.to,
        }
    }

    /// An arrow that starts and ends on the same square. Never stored.
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    /// The arrow's color, or `fallback` when it has none.
    pub fn color_or<'a>(&'a self, fallback: &'a ArrowColor) -> &'a ArrowColor {
        self.color.as_ref().unwrap_or(fallback)
    }
}

impl fmt::Display for Arrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.color {
            Some(color) => write!(f, "{}->{} ({})", self.from, self.to, color),
            None => write!(f, "{}->{}", self.from, self.to),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ArrowRepr {
    Colored(Square, Square, ArrowColor),
    Plain(Square, Square),
    Named {
        from: Square,
        to: Square,
        #[serde(default)]
        color: Option<ArrowColor>,
    },
}

impl From<ArrowRepr> for Arrow {
    fn from(repr: ArrowRepr) -> Self {
        match repr {
            ArrowRepr::Colored(from, to, color) => Arrow::new(from, to, color),
            ArrowRepr::Plain(from, to) => Arrow::uncolored(from, to),
            ArrowRepr::Named { from, to, color } => Arrow { from, to, color },
        }
    }
}

impl From<Arrow> for ArrowRepr {
    fn from(arrow: Arrow) -> Self {
        match arrow.color {
            Some(color) => ArrowRepr::Colored(arrow.from, arrow.to, color),
            None => ArrowRepr::Plain(arrow.from, arrow.to),
        }
    }
}

/// Drop self-loop arrows.
pub fn without_self_loops(arrows: impl IntoIterator<Item = Arrow>) -> Vec<Arrow> {
    arrows.into_iter().filter(|arrow| !arrow.is_self_loop()).collect()
}

/// Remove earlier arrows that share a slot with a later one.
///
/// Scans from the most recent entry backwards and keeps each slot the first
/// time it is seen, so the latest color for a slot wins. Survivors keep their
/// original relative order.
pub fn dedup_by_slot(arrows: &[Arrow]) -> Vec<Arrow> {
    let mut seen = HashSet::new();
    let mut result: Vec<Arrow> = arrows
        .iter()
        .rev()
        .filter(|arrow| seen.insert(arrow.slot()))
        .cloned()
        .collect();
    result.reverse();
    result
}

/// Merge arrow sources into a single list with one entry per slot.
///
/// Sources are applied in order. A slot that reappears in a later position
/// replaces the earlier entry in place, so every slot keeps the position of
/// its first appearance while showing its most recent value.
pub fn merge_by_slot<'a>(sources: impl IntoIterator<Item = &'a Arrow>) -> Vec<Arrow> {
    let mut positions: HashMap<Slot, usize> = HashMap::new();
    let mut merged: Vec<Arrow> = Vec::new();

    for arrow in sources {
        match positions.get(&arrow.slot()) {
            Some(&index) => merged[index] = arrow.clone(),
            None => {
                positions.insert(arrow.slot(), merged.len());
                merged.push(arrow.clone());
            }
        }
    }

    merged
}
