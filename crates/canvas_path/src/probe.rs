use std::f32::consts::TAU;

use lyon::algorithms::hit_test::hit_test_path;
use lyon::geom::{Angle, Arc};
use lyon::math::{point, vector};
use lyon::path::builder::WithSvg;
use lyon::path::path::BuilderImpl;
use lyon::path::FillRule;
use tracing::debug;

use geom::Point;

use crate::surface::Surface;

/// Flattening tolerance for containment queries.
const HIT_TOLERANCE: f32 = 0.01;

/// Offscreen hit-test oracle backed by a lyon path.
///
/// Stands in for the 1x1 scratch canvas a browser implementation keeps:
/// segments accumulate in an SVG-style lyon builder (which inserts subpath
/// begins as needed) and the finished path answers containment with the
/// non-zero fill rule, matching canvas `isPointInPath`.
pub(crate) struct HitSurface {
    building: Option<WithSvg<BuilderImpl>>,
    finished: Option<lyon::path::Path>,
}

impl HitSurface {
    pub(crate) fn new() -> Self {
        HitSurface {
            building: None,
            finished: None,
        }
    }

    fn builder(&mut self) -> &mut WithSvg<BuilderImpl> {
        self.building
            .get_or_insert_with(lyon::path::Path::svg_builder)
    }
}

impl Surface for HitSurface {
    fn begin_path(&mut self) {
        self.building = Some(lyon::path::Path::svg_builder());
        self.finished = None;
    }

    fn move_to(&mut self, to: Point) {
        self.builder().move_to(point(to.x, to.y));
    }

    fn line_to(&mut self, to: Point) {
        self.builder().line_to(point(to.x, to.y));
    }

    fn curve_to(&mut self, first: Point, second: Point, third: Option<Point>) {
        let builder = self.builder();
        match third {
            Some(to) => {
                builder.cubic_bezier_to(
                    point(first.x, first.y),
                    point(second.x, second.y),
                    point(to.x, to.y),
                );
            }
            None => {
                builder.quadratic_bezier_to(point(first.x, first.y), point(second.x, second.y));
            }
        }
    }

    fn arc(&mut self, center: Point, radius: f32, start: f32, end: f32, acw: bool) {
        let arc = Arc {
            center: point(center.x, center.y),
            radii: vector(radius, radius),
            start_angle: Angle::radians(start),
            sweep_angle: Angle::radians(sweep_angle(start, end, acw)),
            x_rotation: Angle::radians(0.0),
        };
        let builder = self.builder();
        // A canvas context connects the current point to the arc start with
        // a straight line; lyon's svg builder does not, so feed it one.
        builder.line_to(arc.from());
        builder.arc(arc.center, arc.radii, arc.sweep_angle, arc.x_rotation);
    }

    fn close_path(&mut self) {
        if let Some(builder) = self.building.as_mut() {
            builder.close();
        }
    }

    fn contains(&mut self, p: Point) -> bool {
        if let Some(builder) = self.building.take() {
            debug!("finalizing hit-test path");
            self.finished = Some(builder.build());
        }
        match &self.finished {
            Some(path) => hit_test_path(
                &point(p.x, p.y),
                path.iter(),
                FillRule::NonZero,
                HIT_TOLERANCE,
            ),
            None => false,
        }
    }

    // The oracle only answers containment; paint operations record nothing.
    fn fill(&mut self) {}

    fn stroke(&mut self) {}
}

/// Canvas arc semantics: sweep from `start` towards `end` in the requested
/// direction, clamped to one full turn.
fn sweep_angle(start: f32, end: f32, acw: bool) -> f32 {
    let raw = end - start;
    if acw {
        if raw <= -TAU {
            return -TAU;
        }
        let mut sweep = raw % TAU;
        if sweep > 0.0 {
            sweep -= TAU;
        }
        sweep
    } else {
        if raw >= TAU {
            return TAU;
        }
        let mut sweep = raw % TAU;
        if sweep < 0.0 {
            sweep += TAU;
        }
        sweep
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use std::f32::consts::{PI, TAU};

    use geom::Point;

    use super::{sweep_angle, HitSurface};
    use crate::surface::Surface;

    #[test]
    fn sweep_follows_the_requested_direction() {
        assert_relative_eq!(sweep_angle(0.0, PI, false), PI);
        assert_relative_eq!(sweep_angle(0.0, PI, true), PI - TAU);
        assert_relative_eq!(sweep_angle(0.0, TAU, false), TAU);
        assert_relative_eq!(sweep_angle(0.0, 3.0 * TAU, false), TAU);
        assert_relative_eq!(sweep_angle(PI, 0.0, false), PI);
    }

    #[test]
    fn empty_surface_contains_nothing() {
        let mut surface = HitSurface::new();
        assert!(!surface.contains(Point::new(0.0, 0.0)));

        surface.begin_path();
        surface.close_path();
        assert!(!surface.contains(Point::new(0.0, 0.0)));
    }

    #[test]
    fn square_contains_its_center() {
        let mut surface = HitSurface::new();
        surface.begin_path();
        surface.move_to(Point::new(0.0, 0.0));
        surface.line_to(Point::new(1.0, 0.0));
        surface.line_to(Point::new(1.0, 1.0));
        surface.line_to(Point::new(0.0, 1.0));
        surface.close_path();

        assert!(surface.contains(Point::new(0.5, 0.5)));
        assert!(!surface.contains(Point::new(5.0, 5.0)));
    }

    #[test]
    fn full_circle_contains_its_center() {
        let mut surface = HitSurface::new();
        surface.begin_path();
        surface.arc(Point::new(5.0, 5.0), 3.0, 0.0, TAU, false);
        surface.close_path();

        assert!(surface.contains(Point::new(5.0, 5.0)));
        assert!(surface.contains(Point::new(7.0, 5.0)));
        assert!(!surface.contains(Point::new(9.0, 5.0)));
    }
}
