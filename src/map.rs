//! Map data model
//!
//! Sparse coordinate-keyed cell storage plus the `MapData` container the
//! editor shell passes into the engine. The engine never holds a map
//! long-term; algorithms take a `&MapData` snapshot and return a new value.
//!
//! Cell lifecycle: a cell is created the first time anything is written at
//! its coordinate and is never deleted afterwards. Clearing blanks the
//! descriptive fields but keeps the entry and its exploration flags, so a
//! hex the players have seen stays seen.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::hex::HexCoord;

/// A single authored hex. Terrain and landmark are independent; a cell may
/// carry both, either, or neither. Tags are opaque strings here; legality
/// of tag values is the editor shell's concern.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HexCell {
    pub coord: HexCoord,
    pub terrain: Option<String>,
    pub landmark: Option<String>,
    pub road: Option<String>,
    /// Neighbor direction indices (0-5) this cell's road connects toward.
    pub road_connections: BTreeSet<u8>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub gm_notes: Option<String>,
    pub is_explored: bool,
    pub is_visible: bool,
}

impl HexCell {
    /// A blank, unexplored cell at `coord`.
    pub fn new(coord: HexCoord) -> Self {
        Self {
            coord,
            terrain: None,
            landmark: None,
            road: None,
            road_connections: BTreeSet::new(),
            name: None,
            description: None,
            gm_notes: None,
            is_explored: false,
            is_visible: false,
        }
    }

    /// Whether the cell carries any authored content.
    pub fn has_content(&self) -> bool {
        !CellContent::from_cell(self).is_empty()
    }
}

/// The authored portion of a cell: everything except the coordinate and the
/// exploration flags. Patterns store these, and every merge operation in
/// the engine writes through one.
///
/// `None` fields are "unspecified": merging leaves the existing value in
/// place rather than erasing it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CellContent {
    pub terrain: Option<String>,
    pub landmark: Option<String>,
    pub road: Option<String>,
    pub road_connections: BTreeSet<u8>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub gm_notes: Option<String>,
}

impl CellContent {
    pub fn from_cell(cell: &HexCell) -> Self {
        Self {
            terrain: cell.terrain.clone(),
            landmark: cell.landmark.clone(),
            road: cell.road.clone(),
            road_connections: cell.road_connections.clone(),
            name: cell.name.clone(),
            description: cell.description.clone(),
            gm_notes: cell.gm_notes.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.terrain.is_none()
            && self.landmark.is_none()
            && self.road.is_none()
            && self.road_connections.is_empty()
            && self.name.is_none()
            && self.description.is_none()
            && self.gm_notes.is_none()
    }
}

/// Presentation settings carried on the map for the rendering layer. The
/// engine stores these but never consults them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppearanceConfig {
    pub hex_size: f64,
    pub show_grid: bool,
    pub show_coordinates: bool,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            hex_size: 24.0,
            show_grid: true,
            show_coordinates: false,
        }
    }
}

/// A complete crawl map. Owned by the external state container; the engine
/// reads and writes it through pure functions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapData {
    pub id: String,
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Sparse cell storage. Absence of a key means "no authored content",
    /// which is distinct from a present-but-blank cell.
    pub cells: HashMap<HexCoord, HexCell>,
    pub player_positions: Vec<HexCoord>,
    pub sight_distance: u32,
    pub reveal_mode: String,
    pub appearance: AppearanceConfig,
}

impl MapData {
    pub fn new(id: &str, name: &str, width: u32, height: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            width,
            height,
            cells: HashMap::new(),
            player_positions: Vec::new(),
            sight_distance: 1,
            reveal_mode: "manual".to_string(),
            appearance: AppearanceConfig::default(),
        }
    }

    pub fn cell(&self, coord: HexCoord) -> Option<&HexCell> {
        self.cells.get(&coord)
    }

    /// The cell at `coord`, created blank on first write.
    fn cell_entry(&mut self, coord: HexCoord) -> &mut HexCell {
        self.cells.entry(coord).or_insert_with(|| HexCell::new(coord))
    }

    /// Merge authored content onto the cell at `coord`.
    ///
    /// Specified (`Some`) fields replace the cell's values; unspecified
    /// fields are left alone. Road connections travel with the road tag.
    /// `is_explored`/`is_visible` are never touched by a merge.
    pub fn merge_content(&mut self, coord: HexCoord, content: &CellContent) {
        let cell = self.cell_entry(coord);
        if let Some(terrain) = &content.terrain {
            cell.terrain = Some(terrain.clone());
        }
        if let Some(landmark) = &content.landmark {
            cell.landmark = Some(landmark.clone());
        }
        if let Some(road) = &content.road {
            cell.road = Some(road.clone());
            cell.road_connections = content.road_connections.clone();
        }
        if let Some(name) = &content.name {
            cell.name = Some(name.clone());
        }
        if let Some(description) = &content.description {
            cell.description = Some(description.clone());
        }
        if let Some(gm_notes) = &content.gm_notes {
            cell.gm_notes = Some(gm_notes.clone());
        }
    }

    /// Blank every descriptive field at `coord`, keeping the entry and its
    /// exploration flags. No-op if nothing was ever written there.
    pub fn clear_content(&mut self, coord: HexCoord) {
        if let Some(cell) = self.cells.get_mut(&coord) {
            cell.terrain = None;
            cell.landmark = None;
            cell.road = None;
            cell.road_connections.clear();
            cell.name = None;
            cell.description = None;
            cell.gm_notes = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content_with_terrain(terrain: &str) -> CellContent {
        CellContent {
            terrain: Some(terrain.to_string()),
            ..CellContent::default()
        }
    }

    #[test]
    fn test_merge_creates_cell_on_first_write() {
        let mut map = MapData::new("m1", "Test", 10, 10);
        let coord = HexCoord::new(2, 3);
        assert!(map.cell(coord).is_none());

        map.merge_content(coord, &content_with_terrain("plains"));

        let cell = map.cell(coord).unwrap();
        assert_eq!(cell.coord, coord);
        assert_eq!(cell.terrain.as_deref(), Some("plains"));
        assert!(!cell.is_explored);
        assert!(!cell.is_visible);
    }

    #[test]
    fn test_merge_preserves_unspecified_fields_and_flags() {
        let mut map = MapData::new("m1", "Test", 10, 10);
        let coord = HexCoord::new(0, 0);
        map.merge_content(
            coord,
            &CellContent {
                terrain: Some("forest".to_string()),
                landmark: Some("ruins".to_string()),
                name: Some("Old Grove".to_string()),
                ..CellContent::default()
            },
        );
        map.cells.get_mut(&coord).unwrap().is_explored = true;
        map.cells.get_mut(&coord).unwrap().is_visible = true;

        // New terrain only; landmark and name must survive, flags too.
        map.merge_content(coord, &content_with_terrain("hills"));

        let cell = map.cell(coord).unwrap();
        assert_eq!(cell.terrain.as_deref(), Some("hills"));
        assert_eq!(cell.landmark.as_deref(), Some("ruins"));
        assert_eq!(cell.name.as_deref(), Some("Old Grove"));
        assert!(cell.is_explored);
        assert!(cell.is_visible);
    }

    #[test]
    fn test_road_connections_travel_with_road() {
        let mut map = MapData::new("m1", "Test", 10, 10);
        let coord = HexCoord::new(1, 1);
        map.merge_content(
            coord,
            &CellContent {
                road: Some("trail".to_string()),
                road_connections: BTreeSet::from([0, 3]),
                ..CellContent::default()
            },
        );
        // A terrain-only merge must not disturb the road.
        map.merge_content(coord, &content_with_terrain("plains"));

        let cell = map.cell(coord).unwrap();
        assert_eq!(cell.road.as_deref(), Some("trail"));
        assert_eq!(cell.road_connections, BTreeSet::from([0, 3]));
    }

    #[test]
    fn test_clear_keeps_entry_and_flags() {
        let mut map = MapData::new("m1", "Test", 10, 10);
        let coord = HexCoord::new(4, -2);
        map.merge_content(
            coord,
            &CellContent {
                terrain: Some("swamp".to_string()),
                gm_notes: Some("ambush here".to_string()),
                ..CellContent::default()
            },
        );
        map.cells.get_mut(&coord).unwrap().is_explored = true;

        map.clear_content(coord);

        let cell = map.cell(coord).unwrap();
        assert!(!cell.has_content());
        assert!(cell.is_explored);
        // Clearing never removes the entry itself.
        assert!(map.cells.contains_key(&coord));
    }

    #[test]
    fn test_clear_on_missing_coordinate_is_a_noop() {
        let mut map = MapData::new("m1", "Test", 10, 10);
        map.clear_content(HexCoord::new(9, 9));
        assert!(map.cells.is_empty());
    }

    #[test]
    fn test_cells_round_trip_with_canonical_keys() {
        let mut map = MapData::new("m1", "Test", 10, 10);
        map.merge_content(HexCoord::new(-2, 5), &content_with_terrain("desert"));

        let json = serde_json::to_string(&map).unwrap();
        assert!(json.contains("\"-2,5\""));

        let restored: MapData = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, map);
    }
}
