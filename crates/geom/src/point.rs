use std::cell::RefCell;
use std::rc::Rc;

use derive_more::{Add, From, Into, Neg, Sub};

/// An (x, y) pair in surface coordinates.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    pub fn translated(self, d: Vector) -> Self {
        Point::new(self.x + d.dx, self.y + d.dy)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Point::new(x, y)
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Point::new(x, y)
    }
}

/// A translation delta.
#[derive(Debug, Copy, Clone, PartialEq, Default, Add, Sub, Neg, From, Into)]
pub struct Vector {
    pub dx: f32,
    pub dy: f32,
}

impl Vector {
    pub fn new(dx: f32, dy: f32) -> Self {
        Vector { dx, dy }
    }
}

impl From<[f32; 2]> for Vector {
    fn from([dx, dy]: [f32; 2]) -> Self {
        Vector::new(dx, dy)
    }
}

// A point may be used where a distance is wanted.
impl From<Point> for Vector {
    fn from(p: Point) -> Self {
        Vector::new(p.x, p.y)
    }
}

/// Shared-identity handle to a mutable point.
///
/// Cloning a handle shares the underlying cell; converting a plain value
/// allocates a fresh one. Several commands may hold the same cell, in which
/// case a translation pass must visit it exactly once — [`PointRef::ptr_id`]
/// gives the identity key for that bookkeeping.
#[derive(Debug, Clone)]
pub struct PointRef(Rc<RefCell<Point>>);

impl PointRef {
    pub fn new(p: Point) -> Self {
        PointRef(Rc::new(RefCell::new(p)))
    }

    pub fn get(&self) -> Point {
        *self.0.borrow()
    }

    pub fn set(&self, p: Point) {
        *self.0.borrow_mut() = p;
    }

    pub fn translate(&self, d: Vector) {
        let mut p = self.0.borrow_mut();
        p.x += d.dx;
        p.y += d.dy;
    }

    /// Identity of the underlying cell, stable for the cell's lifetime.
    pub fn ptr_id(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }

    pub fn same_cell(&self, other: &PointRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

// Value equality; use `same_cell` for identity.
impl PartialEq for PointRef {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl From<Point> for PointRef {
    fn from(p: Point) -> Self {
        PointRef::new(p)
    }
}

impl From<(f32, f32)> for PointRef {
    fn from(p: (f32, f32)) -> Self {
        PointRef::new(p.into())
    }
}

impl From<[f32; 2]> for PointRef {
    fn from(p: [f32; 2]) -> Self {
        PointRef::new(p.into())
    }
}

impl From<&PointRef> for PointRef {
    fn from(p: &PointRef) -> Self {
        p.clone()
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use super::{Point, PointRef, Vector};

    #[test]
    fn construction_forms_agree() {
        assert_eq!(Point::from((1.0, 2.0)), Point::from([1.0, 2.0]));
        assert_eq!(Point::from((1.0, 2.0)), Point::new(1.0, 2.0));
    }

    #[test]
    fn cloned_handles_share_the_cell() {
        let a = PointRef::from((1.0, 2.0));
        let b = a.clone();
        assert!(a.same_cell(&b));
        assert_eq!(a.ptr_id(), b.ptr_id());

        b.translate(Vector::new(10.0, 0.0));
        assert_relative_eq!(a.get().x, 11.0);
        assert_relative_eq!(a.get().y, 2.0);
    }

    #[test]
    fn converted_values_get_fresh_cells() {
        let p = Point::new(1.0, 2.0);
        let a = PointRef::from(p);
        let b = PointRef::from(p);
        assert!(!a.same_cell(&b));

        a.translate(Vector::new(5.0, 5.0));
        assert_relative_eq!(b.get().x, 1.0);
        assert_relative_eq!(b.get().y, 2.0);
    }

    #[test]
    fn point_as_distance() {
        let d = Vector::from(Point::new(3.0, 4.0));
        let p = Point::new(1.0, 1.0).translated(d);
        assert_relative_eq!(p.x, 4.0);
        assert_relative_eq!(p.y, 5.0);
    }
}
