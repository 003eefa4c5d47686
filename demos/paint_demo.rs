//! Map editing demonstration: brush painting, lookups, recoloring and regeneration

use log::LevelFilter;
use rust_voronoi_map::*;
use simple_logger::SimpleLogger;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    println!("=== rust_voronoi_map Paint Demo ===\n");

    // Step 1: Generate
    println!("Step 1: Generating map...");
    let config = MapConfigBuilder::new().seed(7).dimensions(800, 600)?.build()?;
    let height_map = HeightMap::terrain_preset();
    let mut map = TerrainMap::generate(config, &height_map)?;
    println!("  {} polygons", map.polygon_count());

    // Step 2: Paint a lake
    println!("\nStep 2: Painting water...");
    let center = DVec2::new(400.0, 300.0);
    let painted = map.paint_region(center, 120.0, "#0c6687");
    println!("  Painted {} polygons around ({}, {})", painted, center.x, center.y);

    // Step 3: Look up what was clicked
    #[cfg(feature = "spatial-index")]
    {
        println!("\nStep 3: Spatial queries:");
        for click in [DVec2::new(400.0, 300.0), DVec2::new(50.0, 550.0)] {
            if let Some(index) = map.find_polygon_at(click) {
                let polygon = &map.polygons()[index];
                println!("  Click {:?} -> polygon {} ({})", click, index, polygon.color);
            }
        }
    }

    // Step 4: Swap palettes without touching geometry
    println!("\nStep 4: Recoloring with a two-tone palette...");
    let two_tone: HeightMap = vec![
        HeightMap::create_bin(-1.0, 0.0, "#1f3b73"),
        HeightMap::create_bin(0.0, 1.0, "#e0d8b0"),
    ]
    .into_iter()
    .collect();
    map.recolor(&two_tone);
    let water = map.polygons().iter().filter(|p| p.color == "#1f3b73").count();
    println!("  {} of {} polygons below sea level", water, map.polygon_count());

    // Step 5: Start over
    println!("\nStep 5: Regenerating with a new seed...");
    let next = MapConfigBuilder::new().seed(8).dimensions(800, 600)?.build()?;
    map.regenerate(next, &height_map)?;
    println!("  {} polygons, seed {}", map.polygon_count(), map.config().seed);

    println!("\n=== Demo Complete ===");
    Ok(())
}
