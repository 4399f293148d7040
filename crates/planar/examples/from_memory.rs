//! Example: Flattening a document built in memory
//!
//! This example builds a small drawing directly against the in-memory host,
//! without reading a drawing file, flattens it and prints what changed.

use planar::{
    Flattener,
    config::{AppConfig, FlattenConfig},
    drawing::Drawing,
    element::{DimensionGeometry, Element},
    geometry::Point3,
    host::Document,
    identifier::Id,
    memory::MemoryDocument,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building document in memory...\n");

    let walls = Id::new("walls");
    let window = Id::new("window");

    // A locked layer and one block definition
    let mut document = MemoryDocument::default()
        .with_layer(walls, true)
        .with_container(window);
    let root = document.root();

    document.push_element(
        root,
        walls,
        Element::Line {
            start: Point3::new(0.0, 0.0, 3.0),
            end: Point3::new(8.0, 0.0, 3.0),
        },
    )?;
    document.push_element(
        root,
        Id::new("0"),
        Element::BlockReference {
            block: window,
            position: Point3::new(2.0, 0.0, 1.2),
            rotation: 0.0,
            scale: 1.0,
        },
    )?;
    document.push_element(
        window,
        Id::new("0"),
        Element::Dimension {
            elevation: 1.2,
            geometry: DimensionGeometry::Aligned {
                xline1_point: Point3::new(0.0, 0.0, 0.0),
                xline2_point: Point3::new(1.5, 0.0, 0.0),
                dim_line_point: Point3::new(0.75, -0.5, 0.0),
            },
        },
    )?;

    // Fix the recursion choice in configuration instead of asking
    let flattener = Flattener::new(AppConfig::new(FlattenConfig::new(Some(true), None)));
    let recurse = flattener.config().flatten().recurse().unwrap_or(false);
    let summary = flattener.flatten(&mut document, recurse)?;

    println!(
        "Examined {} element(s); flattened {}.\n",
        summary.examined(),
        summary.changed()
    );
    println!("{}", toml::to_string(&Drawing::from_document(&document)?)?);

    Ok(())
}
