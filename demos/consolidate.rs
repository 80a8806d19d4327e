//! Consolidation walkthrough on a synthetic block of buildings.
//!
//! ```text
//! cargo run --example consolidate
//! RUST_LOG=footprint_merge=debug cargo run --example consolidate
//! ```

use footprint_merge::footprint::FootprintSet;
use footprint_merge::frame::{FrameSink, PassSnapshot};
use footprint_merge::math::Point2;
use footprint_merge::operations::consolidate::{Consolidate, ConsolidationParams, OverlapPolicy};
use footprint_merge::operations::ingest::Ingest;
use footprint_merge::operations::transform::{DeriveEnvelopes, Reproject};
use footprint_merge::projection::{ImageFrame, LambertConformalConic, QueryBounds};
use footprint_merge::provider::StaticProvider;
use geo::{coord, Geometry, LineString, Polygon, Rect};

/// Prints the animation counter for each frame.
struct CaptionPrinter;

impl<G> FrameSink<G> for CaptionPrinter {
    fn deliver(&mut self, snapshot: PassSnapshot<'_, G>) {
        println!("{snapshot}");
    }
}

/// A row of slightly rotated, overlapping outlines around `origin`.
fn synthetic_block(origin: Point2) -> Vec<Geometry<f64>> {
    let mut outlines = Vec::new();
    for i in 0..12_u32 {
        let lon = origin.x + f64::from(i) * 0.000_12;
        let lat = origin.y + f64::from(i % 3) * 0.000_05;
        let ring = LineString::from(vec![
            (lon, lat),
            (lon + 0.000_15, lat + 0.000_01),
            (lon + 0.000_14, lat + 0.000_11),
            (lon - 0.000_01, lat + 0.000_10),
            (lon, lat),
        ]);
        outlines.push(Geometry::Polygon(Polygon::new(ring, vec![])));
    }
    let tiny = Rect::new(
        coord! { x: origin.x, y: origin.y - 0.000_3 },
        coord! { x: origin.x, y: origin.y - 0.000_2 },
    );
    outlines.push(Geometry::Polygon(tiny.to_polygon()));
    outlines
}

fn main() -> footprint_merge::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("footprint_merge=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let center = Point2::new(4.835_169, 45.758_683);
    let projector = LambertConformalConic::lambert_93();
    let bounds = QueryBounds::around(center, &ImageFrame::default(), &projector)?;
    println!(
        "query: west {:.6} south {:.6} east {:.6} north {:.6}",
        bounds.west, bounds.south, bounds.east, bounds.north
    );

    let provider = StaticProvider::new(synthetic_block(Point2::new(4.8345, 45.7585)));
    println!("{} candidate features", provider.len());
    let outlines = Ingest::new(&provider, &projector).execute(&bounds)?;
    let boxes = DeriveEnvelopes::new().execute(&outlines)?;

    let params = ConsolidationParams::new()
        .with_threshold(0.3)
        .with_policy(OverlapPolicy::MergeEnvelope)
        .with_max_passes(10);
    let consolidate = Consolidate::new(params);
    println!(
        "threshold {} with {:?}, up to {} passes",
        consolidate.params().threshold,
        consolidate.params().scoring,
        consolidate.params().max_passes
    );
    let done = consolidate.execute_with_sink(boxes, &mut CaptionPrinter)?;
    println!(
        "{} footprints after {} passes (converged: {})",
        done.footprints.len(),
        done.passes,
        done.converged
    );

    let geographic: FootprintSet = Reproject::inverse(&projector).execute(&done.footprints)?;
    println!("output in {}", geographic.crs());
    for (id, footprint) in geographic.iter() {
        println!("{id:?}: {:?}", footprint.geometry());
    }
    Ok(())
}
