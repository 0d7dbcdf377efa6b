//! Line extrusion debug run: extrudes a named pattern and prints the results.
//!
//! Usage:
//! ```text
//! cargo run --example extrude_debug                      # default (zigzag)
//! cargo run --example extrude_debug -- loop 0.3          # pattern and amount
//! RUST_LOG=line_extrusion=debug cargo run --example extrude_debug -- fold
//! ```

use line_extrusion::math::Point2;
use line_extrusion::{
    ExtrudeLine, ExtrusionConfig, MultipleContourTriangulation, Polyline, UvAlteration,
};

/// Parsed CLI arguments.
struct CliArgs {
    pattern: String,
    amount: f64,
}

impl CliArgs {
    fn parse() -> Self {
        let mut args = std::env::args().skip(1);
        let pattern = args.next().unwrap_or_else(|| "zigzag".to_owned());
        let amount = args.next().and_then(|a| a.parse().ok()).unwrap_or(0.25);
        Self { pattern, amount }
    }
}

fn pattern_points(name: &str) -> Option<Vec<Point2>> {
    let coords: &[(f64, f64)] = match name {
        "straight" => &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)],
        "zigzag" => &[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 1.0), (4.0, 0.0)],
        "fold" => &[(0.0, 0.0), (2.0, 0.0), (0.2, 0.3)],
        "elbow" => &[(0.0, 0.0), (3.0, 0.0), (3.0, 0.2)],
        "loop" => &[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.2)],
        _ => return None,
    };
    Some(coords.iter().map(|&(x, y)| Point2::new(x, y)).collect())
}

fn main() {
    // Default: WARN for everything, INFO for line_extrusion.
    // Override with RUST_LOG env var (e.g. RUST_LOG=line_extrusion=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("line_extrusion=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args = CliArgs::parse();
    let Some(points) = pattern_points(&args.pattern) else {
        eprintln!(
            "unknown pattern '{}' (straight, zigzag, fold, elbow, loop)",
            args.pattern
        );
        std::process::exit(1);
    };

    let config = ExtrusionConfig::new(args.amount)
        .with_multiple_contour_triangulation(
            MultipleContourTriangulation::OriginalAndExtrudedAltered,
        )
        .with_multiple_contour_uv_alteration(UvAlteration::SpringApproximation);
    let out = ExtrudeLine::new(Polyline::new(points), config).execute();

    let results = &out.results;
    println!("pattern {} amount {}", args.pattern, args.amount);
    println!(
        "  traversal {} points, {} intersections",
        results.initial_traversal.len(),
        results.intersection_points.len().saturating_sub(2)
    );
    for (i, contour) in results.contours.iter().enumerate() {
        println!("  contour {i}: {} points", contour.len());
    }
    for (i, contour) in results.removed_contours.iter().enumerate() {
        println!("  removed {i}: {} points", contour.len());
    }
    println!(
        "  mesh: {} vertices, {} triangles, area {:.4} ({})",
        out.mesh.vertices.len(),
        out.mesh.triangle_count(),
        out.mesh.area(),
        if out.is_single_contour() { "single contour" } else { "multiple contours" }
    );
}
