use derive_more::{Add, Deref, Display, Div, From, Into, Mul, Neg};

use crate::point::{Point, PointRef};

#[derive(Debug, Copy, Clone, Add, Display, From, Into, PartialEq, Mul, Div, Deref, Neg)]
pub struct Radius(f32);

impl Radius {
    pub fn new(v: f32) -> Self {
        Radius(v)
    }
}

/// A circle: a center point plus a radius. The center is a shared-identity
/// cell so that translating a path moves it without touching the radius.
#[derive(Debug, Clone)]
pub struct Circle {
    pub center: PointRef,
    pub radius: Radius,
}

impl Circle {
    pub fn new(center: impl Into<PointRef>, radius: f32) -> Self {
        Circle {
            center: center.into(),
            radius: Radius::new(radius),
        }
    }
}

impl From<(f32, f32, f32)> for Circle {
    fn from((cx, cy, r): (f32, f32, f32)) -> Self {
        Circle::new((cx, cy), r)
    }
}

impl From<[f32; 3]> for Circle {
    fn from([cx, cy, r]: [f32; 3]) -> Self {
        Circle::new((cx, cy), r)
    }
}

impl From<(Point, f32)> for Circle {
    fn from((center, r): (Point, f32)) -> Self {
        Circle::new(center, r)
    }
}

// Shares the given cell rather than copying it.
impl From<(PointRef, f32)> for Circle {
    fn from((center, r): (PointRef, f32)) -> Self {
        Circle::new(center, r)
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use super::Circle;
    use crate::point::{PointRef, Vector};

    #[test]
    fn flat_and_structured_forms_agree() {
        let a = Circle::from((5.0, 6.0, 3.0));
        let b = Circle::from([5.0, 6.0, 3.0]);
        assert_eq!(a.center.get(), b.center.get());
        assert_relative_eq!(*a.radius, *b.radius);
    }

    #[test]
    fn center_cell_is_shared_when_given_a_handle() {
        let center = PointRef::from((2.0, 2.0));
        let circle = Circle::from((center.clone(), 1.0));
        circle.center.translate(Vector::new(1.0, 0.0));
        assert_relative_eq!(center.get().x, 3.0);
    }
}
