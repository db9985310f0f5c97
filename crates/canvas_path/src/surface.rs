use strum_macros::Display;

use geom::Point;

/// Terminal paint operation selected by [`crate::Path::draw`].
#[derive(Debug, Copy, Clone, PartialEq, Display)]
pub enum DrawMode {
    Fill,
    Stroke,
}

/// The drawing-surface contract a path is replayed against.
///
/// Mirrors the segment operations of a 2D canvas context; `curve_to` and
/// `arc` receive the stored argument shapes directly. Two curve points are
/// a quadratic segment (control, destination), three are cubic (control,
/// control, destination).
pub trait Surface {
    fn begin_path(&mut self);
    fn move_to(&mut self, to: Point);
    fn line_to(&mut self, to: Point);
    fn curve_to(&mut self, first: Point, second: Point, third: Option<Point>);
    fn arc(&mut self, center: Point, radius: f32, start: f32, end: f32, acw: bool);
    fn close_path(&mut self);
    /// Containment query over the most recently replayed path.
    fn contains(&mut self, p: Point) -> bool;
    fn fill(&mut self);
    fn stroke(&mut self);
}
