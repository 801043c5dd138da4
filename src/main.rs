use std::collections::HashMap;

use clap::Parser;

use hexcrawl_engine::biomes::{self, GeneratorConfig};
use hexcrawl_engine::hex::{grid_coordinates, HexCoord};
use hexcrawl_engine::map::MapData;

#[derive(Parser, Debug)]
#[command(name = "hexcrawl_engine")]
#[command(about = "Generate procedural hex crawl maps with seeded biomes")]
struct Args {
    /// Width of the map in hexes
    #[arg(short = 'W', long, default_value = "16")]
    width: u32,

    /// Height of the map in hexes
    #[arg(short = 'H', long, default_value = "10")]
    height: u32,

    /// Generation seed (uses a random seed if not specified)
    #[arg(short, long)]
    seed: Option<f64>,

    /// Biome profile: forest, mountain, coastal, desert, swamp, mixed
    #[arg(short, long, default_value = "mixed")]
    biome: String,

    /// Fraction of hexes that receive terrain (0.0-1.0)
    #[arg(short, long, default_value = "0.6")]
    density: f64,

    /// Chance a generated hex also receives a landmark (0.0-1.0)
    #[arg(short, long, default_value = "0.15")]
    landmark_chance: f64,
}

fn terrain_char(terrain: &str) -> char {
    match terrain {
        "plains" => '.',
        "forest" => 'f',
        "hills" => 'h',
        "mountains" => '^',
        "water" => '~',
        "desert" => 'd',
        "swamp" => 'w',
        _ => '?',
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    println!("Generating {} crawl map with seed: {}", args.biome, seed);
    println!("Map size: {}x{}", args.width, args.height);

    let config = GeneratorConfig {
        biome_type: args.biome.clone(),
        density: args.density,
        landmark_chance: args.landmark_chance,
        seed: Some(seed),
        ..GeneratorConfig::default()
    };

    let coords = grid_coordinates(args.width, args.height);
    let generated = biomes::generate_biome(&coords, &config);
    println!(
        "Generated {} of {} hexes",
        generated.len(),
        coords.len()
    );

    let map = MapData::new("cli", &format!("{} crawl", args.biome), args.width, args.height);
    let map = biomes::apply_generated(&map, &generated);

    // Staggered sketch of the offset grid; landmarks print as '*'.
    println!();
    println!("LEGEND: . plains  f forest  h hills  ^ mountains  ~ water  d desert  w swamp  * landmark");
    for row in 0..args.height as i32 {
        let mut line = String::new();
        if row.rem_euclid(2) == 1 {
            line.push(' ');
        }
        for col in 0..args.width as i32 {
            let coord = HexCoord::new(col - row.div_euclid(2), row);
            let glyph = match map.cell(coord) {
                Some(cell) if cell.landmark.is_some() => '*',
                Some(cell) => cell
                    .terrain
                    .as_deref()
                    .map(terrain_char)
                    .unwrap_or(' '),
                None => ' ',
            };
            line.push(glyph);
            line.push(' ');
        }
        println!("{}", line);
    }

    let mut terrain_counts: HashMap<&str, usize> = HashMap::new();
    let mut landmark_counts: HashMap<&str, usize> = HashMap::new();
    for cell in &generated {
        *terrain_counts.entry(cell.terrain.as_str()).or_insert(0) += 1;
        if let Some(landmark) = &cell.landmark {
            *landmark_counts.entry(landmark.as_str()).or_insert(0) += 1;
        }
    }

    println!();
    println!("TERRAIN:");
    let mut terrain_sorted: Vec<_> = terrain_counts.into_iter().collect();
    terrain_sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    for (terrain, count) in terrain_sorted {
        println!("  {:<12} {}", terrain, count);
    }

    if !landmark_counts.is_empty() {
        println!("LANDMARKS:");
        let mut landmark_sorted: Vec<_> = landmark_counts.into_iter().collect();
        landmark_sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        for (landmark, count) in landmark_sorted {
            println!("  {:<12} {}", landmark, count);
        }
    }
}
