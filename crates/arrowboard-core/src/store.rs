//! Arrow state: externally supplied arrows, user-drawn arrows and the draft.

use crate::arrow::{dedup_by_slot, merge_by_slot, without_self_loops, Arrow, ArrowColor, Slot};
use crate::square::Square;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Callback invoked with the merged arrow list whenever it changes.
pub type ArrowsChangedCallback = Box<dyn FnMut(&[Arrow])>;

/// Which user-drawn arrows a repeated gesture removes.
///
/// A gesture toggles off when an arrow with the same slot *and* color already
/// exists. The rule decides what is then removed from the user-drawn arrows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleRule {
    /// Remove every user-drawn arrow on the slot, whatever its color.
    #[default]
    SlotOnly,
    /// Remove only user-drawn arrows on the slot with the gesture's color.
    SlotAndColor,
}

impl ToggleRule {
    /// Whether `existing` is removed by a toggle-off of `slot` in `color`.
    fn removes(self, existing: &Arrow, slot: Slot, color: &ArrowColor) -> bool {
        match self {
            ToggleRule::SlotOnly => existing.slot() == slot,
            ToggleRule::SlotAndColor => {
                existing.slot() == slot && existing.color.as_ref() == Some(color)
            }
        }
    }
}

/// An arrow being drawn while a pointer button is held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftArrow {
    /// Square where the gesture started.
    pub from: Square,
    /// Square currently under the pointer, with the drawing color.
    /// `None` until the pointer leaves the start square.
    pub target: Option<(Square, ArrowColor)>,
}

impl DraftArrow {
    /// The visible arrow, if the draft currently points somewhere else.
    pub fn arrow(&self) -> Option<Arrow> {
        self.target
            .as_ref()
            .filter(|(to, _)| *to != self.from)
            .map(|(to, color)| Arrow::new(self.from, *to, color.clone()))
    }
}

/// Owns the three arrow sources and merges them for rendering.
///
/// * External arrows are pushed by the embedding layer and replaced
///   wholesale. `None` means the caller does not manage a list.
/// * User-drawn arrows accumulate from completed gestures.
/// * The draft follows an in-progress gesture.
///
/// Every mutation recomputes the merged list; if it differs from the
/// previous one, the change callback runs once with the new list.
pub struct ArrowStore {
    external: Option<Vec<Arrow>>,
    user: Vec<Arrow>,
    draft: Option<DraftArrow>,
    enabled: bool,
    toggle_rule: ToggleRule,
    merged: Vec<Arrow>,
    on_change: Option<ArrowsChangedCallback>,
}

impl Default for ArrowStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ArrowStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrowStore")
            .field("external", &self.external)
            .field("user", &self.user)
            .field("draft", &self.draft)
            .field("enabled", &self.enabled)
            .field("toggle_rule", &self.toggle_rule)
            .field("merged", &self.merged)
            .finish_non_exhaustive()
    }
}

impl ArrowStore {
    /// Create an empty store with arrows enabled.
    pub fn new() -> Self {
        Self {
            external: None,
            user: Vec::new(),
            draft: None,
            enabled: true,
            toggle_rule: ToggleRule::default(),
            merged: Vec::new(),
            on_change: None,
        }
    }

    /// Register the callback run after each change of the merged list.
    ///
    /// The callback must not drive the store itself.
    pub fn set_on_change(&mut self, callback: impl FnMut(&[Arrow]) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    /// Remove the change callback.
    pub fn clear_on_change(&mut self) {
        self.on_change = None;
    }

    /// Enable or disable drawing arrows. Disabling discards the draft.
    pub fn set_arrows_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.draft = None;
        }
        self.refresh();
    }

    pub fn arrows_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_toggle_rule(&mut self, rule: ToggleRule) {
        self.toggle_rule = rule;
    }

    pub fn toggle_rule(&self) -> ToggleRule {
        self.toggle_rule
    }

    /// Replace the external arrows. Self-loops are dropped.
    ///
    /// `None` takes the external source out of the merge without touching
    /// user-drawn arrows.
    pub fn set_external_arrows(&mut self, arrows: Option<Vec<Arrow>>) {
        self.external = arrows.map(without_self_loops);
        self.refresh();
    }

    /// The external arrows, or `None` if the caller does not manage any.
    pub fn external_arrows(&self) -> Option<&[Arrow]> {
        self.external.as_deref()
    }

    /// Arrows drawn by the user.
    pub fn user_arrows(&self) -> &[Arrow] {
        &self.user
    }

    /// Replace the user-drawn arrows. Self-loops and duplicate slots are dropped.
    pub fn set_user_arrows(&mut self, arrows: Vec<Arrow>) {
        self.user = dedup_by_slot(&without_self_loops(arrows));
        self.refresh();
    }

    /// The current draft, if a gesture is in progress.
    pub fn draft(&self) -> Option<&DraftArrow> {
        self.draft.as_ref()
    }

    /// The visible draft arrow, if any.
    pub fn draft_arrow(&self) -> Option<Arrow> {
        self.draft.as_ref().and_then(DraftArrow::arrow)
    }

    /// Start a draft at `from`, replacing any existing draft.
    pub fn begin_draft(&mut self, from: Square) {
        if !self.enabled {
            return;
        }
        log::trace!("Begin arrow draft at {}", from);
        self.draft = Some(DraftArrow { from, target: None });
        self.refresh();
    }

    /// Point the draft at `over`, drawn in `color`.
    ///
    /// Moving back over the start square hides the draft again.
    pub fn update_draft(&mut self, over: Square, color: ArrowColor) {
        let Some(draft) = self.draft.as_mut() else {
            return;
        };
        draft.target = if over == draft.from {
            None
        } else {
            Some((over, color))
        };
        self.refresh();
    }

    /// Finish a gesture from `from` to `to`.
    ///
    /// A new arrow is added unless one with the same slot and color already
    /// exists among the external and user-drawn arrows; in that case the
    /// user-drawn arrows on the slot are removed per the toggle rule.
    /// Gestures ending on their start square only discard the draft.
    pub fn end_draft(&mut self, from: Square, to: Square, color: ArrowColor) {
        self.draft = None;

        if from == to || !self.enabled {
            self.refresh();
            return;
        }

        let slot = Slot { from, to };
        let exists = self
            .combined()
            .any(|arrow| arrow.slot() == slot && arrow.color.as_ref() == Some(&color));

        if exists {
            log::debug!("Toggling off arrow {}->{}", from, to);
            let rule = self.toggle_rule;
            self.user.retain(|arrow| !rule.removes(arrow, slot, &color));
        } else {
            log::debug!("Adding arrow {}->{} ({})", from, to, color);
            self.user.push(Arrow::new(from, to, color));
        }
        self.user = dedup_by_slot(&self.user);

        self.refresh();
    }

    /// Remove all user-drawn arrows and the draft. External arrows stay.
    pub fn clear_arrows(&mut self) {
        self.user.clear();
        self.draft = None;
        self.refresh();
    }

    /// The render-ready list: external, then user-drawn, then the draft,
    /// with one entry per slot.
    pub fn merged_arrows(&self) -> &[Arrow] {
        &self.merged
    }

    /// External and user-drawn arrows, in that order.
    fn combined(&self) -> impl Iterator<Item = &Arrow> {
        self.external.iter().flatten().chain(self.user.iter())
    }

    fn compute_merged(&self) -> Vec<Arrow> {
        let draft = self.draft_arrow();
        merge_by_slot(self.combined().chain(draft.iter()))
    }

    fn refresh(&mut self) {
        let merged = self.compute_merged();
        if merged == self.merged {
            return;
        }
        log::debug!("Arrows changed: {} on board", merged.len());
        self.merged = merged;
        if let Some(callback) = self.on_change.as_mut() {
            callback(&self.merged);
        }
    }
}
