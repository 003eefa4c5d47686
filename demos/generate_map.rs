//! Example: Generate a Voronoi terrain map
//!
//! Demonstrates the basic usage of the generation pipeline.

use log::LevelFilter;
use rust_voronoi_map::*;
use simple_logger::SimpleLogger;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::new().with_level(LevelFilter::Debug).init()?;

    println!("Voronoi Map Generation Example");
    println!("==============================\n");

    let config = MapConfigBuilder::new()
        .seed(42)
        .grid_size(20)?
        .jitter(20.0)?
        .dimensions(2000, 2000)?
        .build()?;

    println!("Configuration:");
    println!("  Seed: {}", config.seed);
    println!("  Terrain seed: {}", config.terrain_seed);
    println!("  Map size: {}x{}", config.width, config.height);
    println!("  Grid size: {} (jitter {})", config.grid_size, config.jitter);
    println!("  Point count: {}", config.point_count());
    println!();

    let height_map = HeightMap::terrain_preset();
    let map = TerrainMap::generate(config, &height_map)?;
    println!("Generated {} polygons\n", map.polygon_count());

    // Color distribution
    println!("Terrain distribution:");
    for bin in height_map.bins() {
        let count = map.polygons().iter().filter(|p| p.color == bin.color).count();
        let pct = (count as f64 / map.polygon_count() as f64) * 100.0;
        println!("  {} [{:.1}, {:.1}): {} ({:.1}%)", bin.color, bin.min, bin.max, count, pct);
    }
    let unmatched = map.polygons().iter().filter(|p| p.color == DEFAULT_COLOR).count();
    println!("  {} (no bin): {}", DEFAULT_COLOR, unmatched);
    println!();

    // Show details for first few polygons
    println!("Sample polygons:");
    for polygon in map.polygons().iter().take(5) {
        println!(
            "  Polygon {}: site=({:.1}, {:.1}), corners={}, height={:.3} (byte {}), color={}",
            polygon.id,
            polygon.site.x,
            polygon.site.y,
            polygon.vertex_count(),
            polygon.height,
            polygon.height_byte(),
            polygon.color
        );
    }

    let mesh = generate_mesh(&map);
    println!("\nMesh: {} vertices, {} triangles", mesh.vertex_count(), mesh.triangle_count());

    Ok(())
}
