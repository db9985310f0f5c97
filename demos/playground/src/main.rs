use anyhow::Result;
use tracing::info;

use canvas_path::{Circle, DrawMode, PathBuilder, Point, Surface};

/// Surface that logs every operation it receives; stands in for a real
/// canvas context.
#[derive(Default)]
struct ConsoleSurface {
    segments: usize,
}

impl Surface for ConsoleSurface {
    fn begin_path(&mut self) {
        info!("begin path");
    }

    fn move_to(&mut self, to: Point) {
        self.segments += 1;
        info!("move to ({}, {})", to.x, to.y);
    }

    fn line_to(&mut self, to: Point) {
        self.segments += 1;
        info!("line to ({}, {})", to.x, to.y);
    }

    fn curve_to(&mut self, first: Point, second: Point, third: Option<Point>) {
        self.segments += 1;
        match third {
            Some(to) => info!(
                "cubic curve via ({}, {}) and ({}, {}) to ({}, {})",
                first.x, first.y, second.x, second.y, to.x, to.y
            ),
            None => info!(
                "quadratic curve via ({}, {}) to ({}, {})",
                first.x, first.y, second.x, second.y
            ),
        }
    }

    fn arc(&mut self, center: Point, radius: f32, start: f32, end: f32, acw: bool) {
        self.segments += 1;
        info!(
            "arc around ({}, {}) r={} from {} to {} acw={}",
            center.x, center.y, radius, start, end, acw
        );
    }

    fn close_path(&mut self) {
        info!("close path ({} segments)", self.segments);
    }

    fn contains(&mut self, _p: Point) -> bool {
        false
    }

    fn fill(&mut self) {
        info!("fill");
    }

    fn stroke(&mut self) {
        info!("stroke");
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // A rounded blob: three straight edges, a curved cap, and a punch-out
    // circle in the middle.
    let mut builder = PathBuilder::new();
    builder
        .move_to((0.0, 0.0))
        .line_to((40.0, 0.0))
        .line_to((40.0, 30.0));
    builder.curve_to([30.0, 45.0, 0.0, 30.0])?;
    builder.arc(Circle::from((20.0, 15.0, 5.0)))?;

    let path = builder.build();
    println!("encoded: {}", builder);

    for probe in [(20.0, 10.0), (20.0, 15.0), (60.0, 10.0)] {
        println!("has_point{:?} = {}", probe, path.has_point(probe));
    }

    let mut surface = ConsoleSurface::default();
    path.draw(&mut surface, DrawMode::Fill);

    path.translate((100.0, 100.0));
    println!("translated: {}", builder);

    // Round-trip the encoding into a fresh builder.
    let reparsed: PathBuilder = builder.stringify().parse()?;
    println!("reparsed: {}", reparsed);

    Ok(())
}
