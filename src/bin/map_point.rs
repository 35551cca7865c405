//! Rotates a flat map point into scene coordinates.

use clap::Parser;
use scene_markers::{Vector3, config::init_logging, projection::MapProjection};

/// Projects a point measured on the flat map onto the tilted scene plane.
#[derive(Debug, Parser)]
#[command(name = "map-point", version)]
struct Args {
    #[arg(allow_negative_numbers = true)]
    x: f32,
    #[arg(allow_negative_numbers = true)]
    y: f32,
    /// Height above the map plane
    #[arg(allow_negative_numbers = true, default_value_t = 0.0)]
    z: f32,
}

impl Args {
    fn point(&self) -> Vector3<f32> {
        Vector3::new(self.x, self.y, self.z)
    }
}

fn main() {
    init_logging();
    let point = Args::parse().point();
    let rotated = MapProjection::default().project(point);
    log::debug!("projected {:?} -> {:?}", point, rotated);

    println!("Original point: ({}, {}, {})", point.x, point.y, point.z);
    println!(
        "Rotated point: ({:.4}, {:.4}, {:.4})",
        rotated.x, rotated.y, rotated.z
    );
}
