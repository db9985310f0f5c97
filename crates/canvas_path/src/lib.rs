//! A canvas-style path: an ordered command sequence (move/line/curve/arc)
//! that can be replayed onto a drawing surface, hit-tested for point
//! containment, translated, and round-tripped through a compact text
//! encoding.

mod builder;
mod command;
mod error;
mod path;
mod probe;
mod surface;
mod text;

pub use crate::builder::PathBuilder;
pub use crate::command::{ArcArgs, ArcTo, Command, CurveArgs, CurveTo};
pub use crate::error::PathError;
pub use crate::path::Path;
pub use crate::surface::{DrawMode, Surface};
pub use geom::{AngleRange, Circle, Point, PointRef, Radius, Vector};
