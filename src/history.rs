//! Bounded snapshot undo/redo
//!
//! Whole-map snapshots on three stacks: past, present, future. Callers
//! decide what "one undo step" means by choosing when to save, typically
//! once per completed operation, not per touched cell.

use serde::{Deserialize, Serialize};

use crate::map::MapData;

pub const DEFAULT_MAX_HISTORY: usize = 50;
pub const MIN_HISTORY_SIZE: usize = 1;
pub const MAX_HISTORY_SIZE: usize = 100;

/// Undo/redo stacks over whole-map snapshots.
///
/// `past` holds older snapshots, most recent last. `future` holds redo
/// candidates, next redo first. Both are bounded; trimming always drops
/// from the oldest end.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MapHistory {
    past: Vec<MapData>,
    present: Option<MapData>,
    future: Vec<MapData>,
    max_history_size: usize,
}

impl Default for MapHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl MapHistory {
    pub fn new() -> Self {
        Self::with_max_size(DEFAULT_MAX_HISTORY)
    }

    pub fn with_max_size(max_history_size: usize) -> Self {
        Self {
            past: Vec::new(),
            present: None,
            future: Vec::new(),
            max_history_size: max_history_size.clamp(MIN_HISTORY_SIZE, MAX_HISTORY_SIZE),
        }
    }

    pub fn present(&self) -> Option<&MapData> {
        self.present.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn max_history_size(&self) -> usize {
        self.max_history_size
    }

    /// Record a new snapshot. Any redo candidates are invalidated: a new
    /// edit forks the timeline.
    pub fn save_to_history(&mut self, snapshot: MapData) {
        if let Some(previous) = self.present.take() {
            self.past.push(previous);
            if self.past.len() > self.max_history_size {
                self.past.remove(0);
            }
        }
        self.present = Some(snapshot);
        self.future.clear();
    }

    /// Step back one snapshot. No-op (returns `None`) when there is no
    /// past to return to.
    pub fn undo(&mut self) -> Option<&MapData> {
        let restored = self.past.pop()?;
        if let Some(displaced) = self.present.take() {
            self.future.insert(0, displaced);
            self.future.truncate(self.max_history_size);
        }
        self.present = Some(restored);
        self.present.as_ref()
    }

    /// Step forward one snapshot. Mirror of [`MapHistory::undo`]; no-op
    /// when there is nothing to redo.
    pub fn redo(&mut self) -> Option<&MapData> {
        if self.future.is_empty() {
            return None;
        }
        let restored = self.future.remove(0);
        if let Some(displaced) = self.present.take() {
            self.past.push(displaced);
            if self.past.len() > self.max_history_size {
                self.past.remove(0);
            }
        }
        self.present = Some(restored);
        self.present.as_ref()
    }

    /// Change the bound, clamped to [1, 100], and immediately trim both
    /// stacks from their oldest ends to fit.
    pub fn set_max_history_size(&mut self, size: usize) {
        self.max_history_size = size.clamp(MIN_HISTORY_SIZE, MAX_HISTORY_SIZE);
        if self.past.len() > self.max_history_size {
            let excess = self.past.len() - self.max_history_size;
            self.past.drain(..excess);
        }
        self.future.truncate(self.max_history_size);
    }
}
