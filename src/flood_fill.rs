//! Connected-region flood fill
//!
//! Breadth-first discovery of the contiguous region around a start hex
//! whose cells match a terrain/landmark target. Discovery is read-only;
//! [`apply_flood_fill`] produces the updated map in a separate step, so a
//! fill can never observe its own partial writes.

use std::collections::{HashSet, VecDeque};

use crate::hex::HexCoord;
use crate::map::{CellContent, MapData};

/// Default result cap for direct fills.
pub const DEFAULT_MAX_HEXES: usize = 1000;

/// Result cap used by [`preview_flood_fill`].
pub const PREVIEW_MAX_HEXES: usize = 100;

/// Previews larger than this are flagged for UI confirmation.
pub const LARGE_OPERATION_THRESHOLD: usize = 20;

/// Targets for a fill. Unset fields default to whatever the start cell
/// itself has.
#[derive(Clone, Debug)]
pub struct FloodFillOptions {
    pub terrain: Option<String>,
    pub landmark: Option<String>,
    pub max_hexes: usize,
}

impl Default for FloodFillOptions {
    fn default() -> Self {
        Self {
            terrain: None,
            landmark: None,
            max_hexes: DEFAULT_MAX_HEXES,
        }
    }
}

/// A capped fill result for UI gating.
#[derive(Clone, Debug, PartialEq)]
pub struct FloodFillPreview {
    pub hexes: Vec<HexCoord>,
    pub count: usize,
    pub is_large_operation: bool,
}

/// Discover the connected region around `start`.
///
/// A coordinate is accepted when its terrain matches the target (or the
/// target is unset and the cell has none), and likewise for landmark.
/// Rejected coordinates act as walls and are not expanded. The result is
/// capped at `max_hexes` in discovery order, which makes identical inputs
/// produce identical output lists.
///
/// When no target is given and the start cell is blank, only coordinates
/// with explicit map entries are visited or enqueued. Without that scoping
/// a blank fill would wander the unbounded empty plane.
pub fn flood_fill_hexes(
    start: HexCoord,
    map: &MapData,
    options: &FloodFillOptions,
) -> Vec<HexCoord> {
    let start_cell = map.cell(start);
    let target_terrain = options
        .terrain
        .clone()
        .or_else(|| start_cell.and_then(|c| c.terrain.clone()));
    let target_landmark = options
        .landmark
        .clone()
        .or_else(|| start_cell.and_then(|c| c.landmark.clone()));
    let blank_target = target_terrain.is_none() && target_landmark.is_none();

    let matches = |coord: HexCoord| -> bool {
        let cell = map.cell(coord);
        if blank_target && cell.is_none() {
            return false;
        }
        let terrain_ok = match &target_terrain {
            Some(t) => cell.and_then(|c| c.terrain.as_deref()) == Some(t.as_str()),
            None => cell.map_or(true, |c| c.terrain.is_none()),
        };
        let landmark_ok = match &target_landmark {
            Some(l) => cell.and_then(|c| c.landmark.as_deref()) == Some(l.as_str()),
            None => cell.map_or(true, |c| c.landmark.is_none()),
        };
        terrain_ok && landmark_ok
    };

    if !matches(start) {
        return Vec::new();
    }

    let mut visited = HashSet::new();
    let mut frontier = VecDeque::new();
    let mut region = Vec::new();
    visited.insert(start);
    frontier.push_back(start);

    while let Some(coord) = frontier.pop_front() {
        if region.len() >= options.max_hexes {
            break;
        }
        if !matches(coord) {
            continue;
        }
        region.push(coord);

        for neighbor in coord.neighbors() {
            if blank_target && map.cell(neighbor).is_none() {
                continue;
            }
            if visited.insert(neighbor) {
                frontier.push_back(neighbor);
            }
        }
    }

    log::debug!(
        "flood fill from {} matched {} hexes (terrain={:?}, landmark={:?})",
        start,
        region.len(),
        target_terrain,
        target_landmark,
    );
    region
}

/// Run a capped fill and report its size for UI gating.
pub fn preview_flood_fill(
    start: HexCoord,
    map: &MapData,
    terrain: Option<String>,
    landmark: Option<String>,
) -> FloodFillPreview {
    let options = FloodFillOptions {
        terrain,
        landmark,
        max_hexes: PREVIEW_MAX_HEXES,
    };
    let hexes = flood_fill_hexes(start, map, &options);
    let count = hexes.len();
    FloodFillPreview {
        hexes,
        count,
        is_large_operation: count > LARGE_OPERATION_THRESHOLD,
    }
}

/// Apply a fill to a list of hexes, returning the updated map.
///
/// With `clear` set, every descriptive field is blanked; otherwise the
/// given terrain/landmark replace the cells' values. Exploration flags are
/// carried over unchanged either way.
pub fn apply_flood_fill(
    map: &MapData,
    hexes: &[HexCoord],
    terrain: Option<&str>,
    landmark: Option<&str>,
    clear: bool,
) -> MapData {
    let mut updated = map.clone();
    if clear {
        for &coord in hexes {
            updated.clear_content(coord);
        }
    } else {
        let content = CellContent {
            terrain: terrain.map(str::to_string),
            landmark: landmark.map(str::to_string),
            ..CellContent::default()
        };
        for &coord in hexes {
            updated.merge_content(coord, &content);
        }
    }
    updated
}
