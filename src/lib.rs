//! Hex crawl map engine
//!
//! Computational core for an interactive hex crawl map editor: axial
//! coordinates, sparse cell storage, connected-region flood fill, pattern
//! capture/paste with rotation and mirroring, seeded biome generation, and
//! bounded snapshot undo/redo. Everything here is pure and synchronous;
//! rendering, input, and persistence live in the editor shell.

pub mod biomes;
pub mod flood_fill;
pub mod hex;
pub mod history;
pub mod map;
pub mod pattern;
