//! Pattern capture and transform
//!
//! Copy-paste for authored map regions: capture a coordinate set relative
//! to an origin, then replay it elsewhere with optional mirroring and
//! 60-degree rotation. Placement silently drops anything that lands off
//! the visible grid; a partial paste is expected behavior, not an error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::hex::HexCoord;
use crate::map::{CellContent, MapData};

/// Mirror mode for pattern placement. Horizontal negates q, vertical
/// negates r, both negates both.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MirrorMode {
    #[default]
    None,
    Horizontal,
    Vertical,
    Both,
}

/// How a pattern is oriented when placed. Rotation is snapped to whole
/// 60-degree steps: `floor(rotation_degrees / 60) mod 6` applications of
/// the axial rotation identity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternTransform {
    pub rotation_degrees: i32,
    pub mirror: MirrorMode,
}

/// A captured region: authored cell content keyed by offset from the
/// capture origin, plus the inclusive span of those offsets.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub cells: BTreeMap<HexCoord, CellContent>,
    pub width: i32,
    pub height: i32,
}

impl Pattern {
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }
}

/// Capture the given coordinates from `map`, keyed relative to `origin`.
/// Cells with no authored content are dropped.
pub fn capture_pattern(coords: &[HexCoord], origin: HexCoord, map: &MapData) -> Pattern {
    let mut cells = BTreeMap::new();
    for &coord in coords {
        let Some(cell) = map.cell(coord) else { continue };
        let content = CellContent::from_cell(cell);
        if content.is_empty() {
            continue;
        }
        cells.insert(coord - origin, content);
    }

    let (width, height) = if cells.is_empty() {
        (0, 0)
    } else {
        let mut min_q = i32::MAX;
        let mut max_q = i32::MIN;
        let mut min_r = i32::MAX;
        let mut max_r = i32::MIN;
        for rel in cells.keys() {
            min_q = min_q.min(rel.q);
            max_q = max_q.max(rel.q);
            min_r = min_r.min(rel.r);
            max_r = max_r.max(rel.r);
        }
        (max_q - min_q + 1, max_r - min_r + 1)
    };

    Pattern {
        cells,
        width,
        height,
    }
}

/// Mirror then rotate a relative offset.
fn transformed_offset(rel: HexCoord, transform: &PatternTransform) -> HexCoord {
    let mut hex = match transform.mirror {
        MirrorMode::None => rel,
        MirrorMode::Horizontal => HexCoord::new(-rel.q, rel.r),
        MirrorMode::Vertical => HexCoord::new(rel.q, -rel.r),
        MirrorMode::Both => HexCoord::new(-rel.q, -rel.r),
    };
    let steps = transform.rotation_degrees.div_euclid(60).rem_euclid(6);
    for _ in 0..steps {
        hex = hex.rotate60();
    }
    hex
}

/// The placement math shared by preview and paste: mirror, rotate,
/// translate to `target`, and keep only what lands on the grid.
/// Results come back in relative-key order, so placement is deterministic.
pub fn preview_paste(
    pattern: &Pattern,
    target: HexCoord,
    transform: &PatternTransform,
    width: u32,
    height: u32,
) -> Vec<(HexCoord, CellContent)> {
    pattern
        .cells
        .iter()
        .filter_map(|(rel, content)| {
            let placed = transformed_offset(*rel, transform) + target;
            placed
                .in_bounds(width, height)
                .then(|| (placed, content.clone()))
        })
        .collect()
}

/// Paste a pattern onto the map at `target`, returning the updated map.
/// Placed content merges under the standard rules: unspecified fields and
/// exploration flags are preserved.
pub fn paste_pattern(
    map: &MapData,
    pattern: &Pattern,
    target: HexCoord,
    transform: &PatternTransform,
) -> MapData {
    let mut updated = map.clone();
    for (coord, content) in preview_paste(pattern, target, transform, map.width, map.height) {
        updated.merge_content(coord, &content);
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authored_map() -> MapData {
        let mut map = MapData::new("m1", "Test", 10, 5);
        let cells = [
            (0, 0, Some("plains"), Some("village")),
            (1, 0, Some("forest"), None),
            (0, 1, Some("hills"), Some("tower")),
        ];
        for (q, r, terrain, landmark) in cells {
            map.merge_content(
                HexCoord::new(q, r),
                &CellContent {
                    terrain: terrain.map(str::to_string),
                    landmark: landmark.map(str::to_string),
                    ..CellContent::default()
                },
            );
        }
        map
    }

    #[test]
    fn test_capture_drops_blank_cells_and_spans_inclusively() {
        let mut map = authored_map();
        // A written-then-cleared cell must not be captured.
        map.clear_content(HexCoord::new(1, 0));

        let coords = [
            HexCoord::new(0, 0),
            HexCoord::new(1, 0),
            HexCoord::new(0, 1),
            HexCoord::new(5, 5), // never written
        ];
        let pattern = capture_pattern(&coords, HexCoord::new(0, 0), &map);

        assert_eq!(pattern.len(), 2);
        assert!(pattern.cells.contains_key(&HexCoord::new(0, 0)));
        assert!(pattern.cells.contains_key(&HexCoord::new(0, 1)));
        assert_eq!(pattern.width, 1);
        assert_eq!(pattern.height, 2);
    }

    #[test]
    fn test_capture_keys_are_relative_to_origin() {
        let map = authored_map();
        let coords = [HexCoord::new(0, 0), HexCoord::new(1, 0)];
        let pattern = capture_pattern(&coords, HexCoord::new(1, 0), &map);
        assert!(pattern.cells.contains_key(&HexCoord::new(-1, 0)));
        assert!(pattern.cells.contains_key(&HexCoord::new(0, 0)));
    }

    #[test]
    fn test_paste_round_trip_reproduces_authored_fields() {
        let map = authored_map();
        let coords = [
            HexCoord::new(0, 0),
            HexCoord::new(1, 0),
            HexCoord::new(0, 1),
        ];
        let origin = HexCoord::new(0, 0);
        let pattern = capture_pattern(&coords, origin, &map);

        let blank = MapData::new("m2", "Copy", 10, 5);
        let pasted = paste_pattern(&blank, &pattern, origin, &PatternTransform::default());

        for coord in coords {
            assert_eq!(
                CellContent::from_cell(pasted.cell(coord).unwrap()),
                CellContent::from_cell(map.cell(coord).unwrap()),
            );
        }
    }

    #[test]
    fn test_rotation_steps_snap_and_wrap() {
        let rel = HexCoord::new(2, -1);
        let once = PatternTransform {
            rotation_degrees: 60,
            mirror: MirrorMode::None,
        };
        assert_eq!(transformed_offset(rel, &once), HexCoord::new(1, 1));
        // 359 degrees floors to 5 steps, 360 wraps to none.
        let five = PatternTransform {
            rotation_degrees: 359,
            ..PatternTransform::default()
        };
        let full = PatternTransform {
            rotation_degrees: 360,
            ..PatternTransform::default()
        };
        assert_eq!(
            transformed_offset(rel, &five),
            transformed_offset(rel, &PatternTransform { rotation_degrees: 300, ..PatternTransform::default() })
        );
        assert_eq!(transformed_offset(rel, &full), rel);
    }

    #[test]
    fn test_mirror_negates_axes() {
        let rel = HexCoord::new(3, -2);
        let horizontal = PatternTransform {
            mirror: MirrorMode::Horizontal,
            ..PatternTransform::default()
        };
        let vertical = PatternTransform {
            mirror: MirrorMode::Vertical,
            ..PatternTransform::default()
        };
        let both = PatternTransform {
            mirror: MirrorMode::Both,
            ..PatternTransform::default()
        };
        assert_eq!(transformed_offset(rel, &horizontal), HexCoord::new(-3, -2));
        assert_eq!(transformed_offset(rel, &vertical), HexCoord::new(3, 2));
        assert_eq!(transformed_offset(rel, &both), HexCoord::new(-3, 2));
    }

    #[test]
    fn test_out_of_bounds_placements_are_dropped() {
        // 5-wide, 10-tall grid. Relative (5,0) pasted at (0,4) lands at
        // (5,4), offset row 4 / col 7, past the right edge; relative (0,0)
        // lands at the target itself and stays.
        let mut map = MapData::new("m1", "Test", 5, 10);
        for (q, r) in [(0, 0), (5, 0)] {
            map.merge_content(
                HexCoord::new(q, r),
                &CellContent {
                    terrain: Some("plains".to_string()),
                    ..CellContent::default()
                },
            );
        }
        let pattern = capture_pattern(
            &[HexCoord::new(0, 0), HexCoord::new(5, 0)],
            HexCoord::new(0, 0),
            &map,
        );
        assert_eq!(pattern.len(), 2);

        let target = HexCoord::new(0, 4);
        let placed = preview_paste(&pattern, target, &PatternTransform::default(), 5, 10);

        let placed_coords: Vec<HexCoord> = placed.iter().map(|(c, _)| *c).collect();
        assert!(placed_coords.contains(&target));
        assert!(!placed_coords.contains(&HexCoord::new(5, 4)));
        assert_eq!(placed.len(), 1);
    }

    #[test]
    fn test_paste_preserves_existing_fields_and_flags() {
        let map = authored_map();
        let pattern = capture_pattern(&[HexCoord::new(1, 0)], HexCoord::new(1, 0), &map);

        let mut dest = MapData::new("m2", "Dest", 10, 5);
        dest.merge_content(
            HexCoord::new(2, 2),
            &CellContent {
                landmark: Some("cave".to_string()),
                ..CellContent::default()
            },
        );
        dest.cells.get_mut(&HexCoord::new(2, 2)).unwrap().is_explored = true;

        let pasted = paste_pattern(
            &dest,
            &pattern,
            HexCoord::new(2, 2),
            &PatternTransform::default(),
        );

        let cell = pasted.cell(HexCoord::new(2, 2)).unwrap();
        // Pattern only authored terrain; the cave and the flag survive.
        assert_eq!(cell.terrain.as_deref(), Some("forest"));
        assert_eq!(cell.landmark.as_deref(), Some("cave"));
        assert!(cell.is_explored);
    }

    #[test]
    fn test_empty_pattern_has_zero_dimensions() {
        let map = MapData::new("m1", "Test", 10, 5);
        let pattern = capture_pattern(&[HexCoord::new(0, 0)], HexCoord::new(0, 0), &map);
        assert!(pattern.is_empty());
        assert_eq!(pattern.width, 0);
        assert_eq!(pattern.height, 0);
    }
}
