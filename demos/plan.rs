//! Runs the full planning pipeline on a small synthetic drawing.
//!
//! Usage:
//! ```text
//! cargo run --example plan
//! RUST_LOG=cutplan=debug cargo run --example plan
//! ```

use cutplan::config::{EngraveParams, LaserSpeeds, TabParams, UnifyParams};
use cutplan::geometry::{Polygon, Segment};
use cutplan::operations::{insert_tabs_along, optimise};
use cutplan::{Layers, Point2, Result};

/// Two plates with slightly misaligned corners, drawn twice over.
fn sample_layer() -> Vec<Segment> {
    let corners = [
        [(0.0, 0.0), (40.0, 0.003), (40.004, 25.0), (0.0, 25.002)],
        [(60.0, 10.0), (90.001, 10.0), (90.0, 30.0), (60.002, 30.001)],
    ];
    let mut segments = Vec::new();
    for _ in 0..2 {
        for plate in &corners {
            for i in 0..plate.len() {
                let (ax, ay) = plate[i];
                let (bx, by) = plate[(i + 1) % plate.len()];
                segments.push(Segment::new(Point2::new(ax, ay), Point2::new(bx, by)));
            }
        }
    }
    segments
}

fn main() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("plan=info".parse().unwrap_or_default())
        .add_directive("cutplan=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut layers = Layers::new();
    layers.insert("cut", sample_layer());

    let fixed = layers.autofix(&["cut"], &UnifyParams::default())?;
    println!("segments: {}", fixed.segments);

    let optimised = layers.optimise(&["cut"])?;
    println!("travel:   {}", optimised.distance);

    let seconds = layers.estimate(&["cut"], &LaserSpeeds::default())?;
    println!("estimate: ~{seconds:.0} s");

    let engraving = layers.estimate_engraving(&["cut"], &EngraveParams::default())?;
    println!(
        "engrave:  ~{:.0} s, ~{:.0} s idle",
        engraving.total(),
        engraving.idle
    );

    let parts = layers.explode(&["cut"])?;
    println!("parts:    {}", parts.join(", "));

    let tabs = TabParams::new(15.0, 0.5)?;
    for name in &parts {
        let Some(segments) = layers.get(name) else {
            continue;
        };
        let ordered = optimise(segments);
        let tabbed = insert_tabs_along(&ordered, &tabs);
        println!("{name}: {} cut pieces after tabbing", tabbed.len());
    }

    let plate = Polygon::new(
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(40.0, 0.0),
            Point2::new(40.0, 25.0),
            Point2::new(0.0, 25.0),
        ],
        Vec::new(),
    )?;
    println!("(20, 12) inside first plate: {}", plate.contains(&Point2::new(20.0, 12.0)));

    Ok(())
}
