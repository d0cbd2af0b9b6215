//! Contoura demo: two closed outlines sharing an edge.
//!
//! ```text
//! cargo run --example shared_outline
//! RUST_LOG=contoura=trace cargo run --example shared_outline
//! ```

use contoura::math::Point2;
use contoura::operations::creation::{InsertVertexBetween, MakeContour};
use contoura::operations::modification::DetachVertex;
use contoura::topology::{ContourId, ContourTopology};

fn print_contours(topo: &ContourTopology, label: &str) -> contoura::Result<()> {
    println!("-- {label}");
    for i in 0..topo.contour_count() {
        let contour = ContourId::new(i);
        let ids: Vec<String> = topo
            .contour_vertices(contour)?
            .iter()
            .map(ToString::to_string)
            .collect();
        let shape = topo.shape(contour)?;
        println!(
            "{contour}: [{}] looped={} changes={:?}",
            ids.join(", "),
            topo.is_looped(contour)?,
            shape.changes()
        );
        for p in shape.positions() {
            println!("    ({:>5.2}, {:>5.2})", p.x, p.y);
        }
    }
    Ok(())
}

fn main() -> contoura::Result<()> {
    // Default: WARN for everything, INFO for contoura.
    // Override with RUST_LOG env var (e.g. RUST_LOG=contoura=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("contoura=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut topo = ContourTopology::new();
    let left = MakeContour::from_points(
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ],
        true,
    )
    .execute(&mut topo)?;
    let corners = topo.contour_vertices(left)?;

    // The right square reuses the left square's right edge.
    let far_bottom = topo.add_vertex(Point2::new(4.0, 0.0));
    let far_top = topo.add_vertex(Point2::new(4.0, 2.0));
    let right = MakeContour::from_vertices(vec![corners[1], far_bottom, far_top, corners[2]], true)
        .execute(&mut topo)?;
    print_contours(&topo, "built")?;

    InsertVertexBetween::new(vec![left, right], corners[1], corners[2]).execute(&mut topo)?;
    print_contours(&topo, "shared edge split")?;

    topo.move_vertex(corners[1], Point2::new(2.5, -0.5))?;
    topo.sync_positions()?;
    print_contours(&topo, "shared corner moved")?;

    if let Some(copy) = DetachVertex::new(corners[2], vec![right]).execute(&mut topo)? {
        topo.move_vertex(copy, Point2::new(3.0, 3.0))?;
        topo.sync_positions()?;
    }
    print_contours(&topo, "top corner detached from right outline")?;

    // Out-of-range edits are rejected and logged.
    let _ = topo.remove_contour(ContourId::new(9));
    Ok(())
}
