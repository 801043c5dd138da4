//! Seeded procedural biome generation
//!
//! Assigns terrain and landmark tags over a caller-supplied coordinate set
//! using per-biome weight tables and a small linear-congruential generator.
//! Identical seed, config, and coordinate enumeration always produce the
//! identical cell list; the caller merges that list onto a map in a
//! separate apply step.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::hex::HexCoord;
use crate::map::{CellContent, MapData};

/// Terrain assigned when a weight table is exhausted by floating-point
/// rounding before any entry crosses the threshold.
pub const DEFAULT_TERRAIN: &str = "plains";

/// Landmark fallback for the same rounding edge case.
pub const DEFAULT_LANDMARK: &str = "ruins";

/// Deterministic LCG over the classic `(state * 9301 + 49297) mod 233280`
/// recurrence. State is kept as an f64 so fractional seeds advance exactly
/// the way the editor's original float arithmetic did.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    state: f64,
}

impl SeededRandom {
    pub fn new(seed: f64) -> Self {
        Self { state: seed }
    }

    /// Next value in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state * 9301.0 + 49297.0) % 233280.0;
        self.state / 233280.0
    }
}

/// An ordered weight table. Selection iterates in declaration order, so
/// the order is part of the profile's observable behavior.
pub type WeightTable = [(&'static str, f64)];

/// Weight tables for one biome profile.
#[derive(Clone, Copy, Debug)]
pub struct BiomeProfile {
    pub terrain_weights: &'static WeightTable,
    pub landmark_weights: &'static WeightTable,
}

/// Look up a biome profile by name.
///
/// Unrecognized names yield empty tables, which generate nothing. The
/// editor treats that as "no content for this biome" rather than an error.
pub fn biome_profile(biome_type: &str) -> BiomeProfile {
    match biome_type {
        "forest" => BiomeProfile {
            terrain_weights: &[
                ("forest", 55.0),
                ("plains", 20.0),
                ("hills", 15.0),
                ("swamp", 10.0),
            ],
            landmark_weights: &[
                ("ruins", 25.0),
                ("village", 25.0),
                ("cave", 30.0),
                ("tower", 20.0),
            ],
        },
        "mountain" => BiomeProfile {
            terrain_weights: &[
                ("mountains", 55.0),
                ("hills", 25.0),
                ("forest", 10.0),
                ("water", 10.0),
            ],
            landmark_weights: &[
                ("cave", 35.0),
                ("ruins", 25.0),
                ("tower", 25.0),
                ("temple", 15.0),
            ],
        },
        "coastal" => BiomeProfile {
            terrain_weights: &[
                ("water", 40.0),
                ("plains", 30.0),
                ("forest", 15.0),
                ("swamp", 15.0),
            ],
            landmark_weights: &[
                ("village", 40.0),
                ("ruins", 25.0),
                ("tower", 20.0),
                ("camp", 15.0),
            ],
        },
        "desert" => BiomeProfile {
            terrain_weights: &[
                ("desert", 70.0),
                ("mountains", 20.0),
                ("water", 10.0),
            ],
            landmark_weights: &[
                ("ruins", 40.0),
                ("temple", 25.0),
                ("camp", 20.0),
                ("cave", 15.0),
            ],
        },
        "swamp" => BiomeProfile {
            terrain_weights: &[
                ("swamp", 55.0),
                ("water", 20.0),
                ("forest", 15.0),
                ("plains", 10.0),
            ],
            landmark_weights: &[
                ("ruins", 35.0),
                ("cave", 25.0),
                ("camp", 25.0),
                ("temple", 15.0),
            ],
        },
        "mixed" => BiomeProfile {
            terrain_weights: &[
                ("plains", 25.0),
                ("forest", 20.0),
                ("hills", 15.0),
                ("mountains", 10.0),
                ("water", 10.0),
                ("swamp", 10.0),
                ("desert", 10.0),
            ],
            landmark_weights: &[
                ("village", 25.0),
                ("ruins", 25.0),
                ("cave", 20.0),
                ("tower", 15.0),
                ("camp", 15.0),
            ],
        },
        _ => BiomeProfile {
            terrain_weights: &[],
            landmark_weights: &[],
        },
    }
}

/// Generator configuration. Overrides replace individual weight keys;
/// override labels missing from the base table are appended after it in
/// key order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub biome_type: String,
    /// Fraction of coordinates that receive terrain at all.
    pub density: f64,
    /// Chance a generated cell also receives a landmark.
    pub landmark_chance: f64,
    /// Seed in the LCG's state space; randomized once when omitted.
    pub seed: Option<f64>,
    /// Accepted for configuration compatibility; the generation loop does
    /// not consult it.
    pub variation: f64,
    pub terrain_weights: Option<BTreeMap<String, f64>>,
    pub landmark_weights: Option<BTreeMap<String, f64>>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            biome_type: "mixed".to_string(),
            density: 0.6,
            landmark_chance: 0.15,
            seed: None,
            variation: 0.5,
            terrain_weights: None,
            landmark_weights: None,
        }
    }
}

/// One generated cell, not yet merged into any map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratedCell {
    pub coord: HexCoord,
    pub terrain: String,
    pub landmark: Option<String>,
}

/// Resolve a profile table against caller overrides into an owned,
/// still-ordered table.
fn resolve_weights(
    base: &'static WeightTable,
    overrides: Option<&BTreeMap<String, f64>>,
) -> Vec<(String, f64)> {
    let mut table: Vec<(String, f64)> = base
        .iter()
        .map(|&(label, weight)| {
            let weight = overrides
                .and_then(|o| o.get(label).copied())
                .unwrap_or(weight);
            (label.to_string(), weight)
        })
        .collect();
    if let Some(overrides) = overrides {
        for (label, &weight) in overrides {
            if !base.iter().any(|(l, _)| l == label) {
                table.push((label.clone(), weight));
            }
        }
    }
    table
}

/// Subtract-and-check weighted pick. Returns `None` on an all-zero table;
/// falls back to `fallback` only when rounding exhausts the table.
fn weighted_pick(
    table: &[(String, f64)],
    rng: &mut SeededRandom,
    fallback: &str,
) -> Option<String> {
    let total: f64 = table.iter().map(|(_, weight)| weight).sum();
    if total <= 0.0 {
        return None;
    }
    let mut threshold = rng.next_f64() * total;
    for (label, weight) in table {
        if threshold < *weight {
            return Some(label.clone());
        }
        threshold -= weight;
    }
    Some(fallback.to_string())
}

/// Generate cells for every coordinate in `coords`.
///
/// Per coordinate: a density gate draw, a weighted terrain draw, a
/// landmark gate draw, and (when the gate passes) a weighted landmark
/// draw, in that fixed order. Coordinates that fail the density gate are
/// omitted from the output entirely.
pub fn generate_biome(coords: &[HexCoord], config: &GeneratorConfig) -> Vec<GeneratedCell> {
    let profile = biome_profile(&config.biome_type);
    let terrain_table = resolve_weights(profile.terrain_weights, config.terrain_weights.as_ref());
    let landmark_table =
        resolve_weights(profile.landmark_weights, config.landmark_weights.as_ref());

    let seed = config.seed.unwrap_or_else(rand::random);
    let mut rng = SeededRandom::new(seed);
    let mut generated = Vec::new();

    for &coord in coords {
        if rng.next_f64() >= config.density {
            continue;
        }
        let Some(terrain) = weighted_pick(&terrain_table, &mut rng, DEFAULT_TERRAIN) else {
            continue;
        };
        let landmark = if rng.next_f64() < config.landmark_chance {
            weighted_pick(&landmark_table, &mut rng, DEFAULT_LANDMARK)
        } else {
            None
        };
        generated.push(GeneratedCell {
            coord,
            terrain,
            landmark,
        });
    }

    log::debug!(
        "biome generation ({}) produced {} cells over {} coordinates",
        config.biome_type,
        generated.len(),
        coords.len(),
    );
    generated
}

/// Merge generated cells onto a map, returning the updated map. Standard
/// merge rules apply: a cell without a landmark leaves any existing
/// landmark in place, and exploration flags are untouched.
pub fn apply_generated(map: &MapData, cells: &[GeneratedCell]) -> MapData {
    let mut updated = map.clone();
    for cell in cells {
        let content = CellContent {
            terrain: Some(cell.terrain.clone()),
            landmark: cell.landmark.clone(),
            ..CellContent::default()
        };
        updated.merge_content(cell.coord, &content);
    }
    updated
}
