use std::convert::TryFrom;

use geom::{AngleRange, Circle, PointRef};

use crate::error::PathError;

/// One atomic path-drawing instruction.
#[derive(Debug, Clone)]
pub enum Command {
    MoveTo(PointRef),
    LineTo(PointRef),
    Curve(CurveTo),
    Arc(ArcTo),
}

impl Command {
    /// Letter code used by the text encoding.
    pub fn letter(&self) -> char {
        match self {
            Command::MoveTo(_) => 'M',
            Command::LineTo(_) => 'L',
            Command::Curve(_) => 'C',
            Command::Arc(_) => 'A',
        }
    }
}

/// A quadratic or cubic curve segment, points kept in argument order.
/// Two points: control then destination. Three: two controls then
/// destination.
#[derive(Debug, Clone)]
pub struct CurveTo {
    pub first: PointRef,
    pub second: PointRef,
    pub third: Option<PointRef>,
}

impl CurveTo {
    pub fn quadratic(first: impl Into<PointRef>, second: impl Into<PointRef>) -> Self {
        CurveTo {
            first: first.into(),
            second: second.into(),
            third: None,
        }
    }

    pub fn cubic(
        first: impl Into<PointRef>,
        second: impl Into<PointRef>,
        third: impl Into<PointRef>,
    ) -> Self {
        CurveTo {
            first: first.into(),
            second: second.into(),
            third: Some(third.into()),
        }
    }

    pub fn points(&self) -> Vec<&PointRef> {
        let mut points = vec![&self.first, &self.second];
        if let Some(third) = &self.third {
            points.push(third);
        }
        points
    }
}

/// An arc along a circle between two angles.
#[derive(Debug, Clone)]
pub struct ArcTo {
    pub circle: Circle,
    pub angle: AngleRange,
    pub acw: bool,
}

/// Normalized `curve_to` input. Every accepted call shape converts into
/// this one representation before a command is stored, so the builder core
/// never inspects argument arity itself.
#[derive(Debug, Clone)]
pub struct CurveArgs(pub(crate) CurveTo);

impl<A, B> From<(A, B)> for CurveArgs
where
    A: Into<PointRef>,
    B: Into<PointRef>,
{
    fn from((first, second): (A, B)) -> Self {
        CurveArgs(CurveTo::quadratic(first, second))
    }
}

impl<A, B, C> From<(A, B, C)> for CurveArgs
where
    A: Into<PointRef>,
    B: Into<PointRef>,
    C: Into<PointRef>,
{
    fn from((first, second, third): (A, B, C)) -> Self {
        CurveArgs(CurveTo::cubic(first, second, third))
    }
}

impl From<[f32; 4]> for CurveArgs {
    fn from([x1, y1, x2, y2]: [f32; 4]) -> Self {
        CurveArgs(CurveTo::quadratic((x1, y1), (x2, y2)))
    }
}

impl From<[f32; 6]> for CurveArgs {
    fn from([x1, y1, x2, y2, x3, y3]: [f32; 6]) -> Self {
        CurveArgs(CurveTo::cubic((x1, y1), (x2, y2), (x3, y3)))
    }
}

// Flat coordinates regroup into pairs: [0,1] and [2,3], plus [4,5] when six
// values are given. Any other length is rejected before anything is stored.
impl TryFrom<&[f32]> for CurveArgs {
    type Error = PathError;

    fn try_from(flat: &[f32]) -> Result<Self, Self::Error> {
        match *flat {
            [x1, y1, x2, y2] => Ok(CurveArgs::from([x1, y1, x2, y2])),
            [x1, y1, x2, y2, x3, y3] => Ok(CurveArgs::from([x1, y1, x2, y2, x3, y3])),
            _ => Err(PathError::InvalidArity {
                what: "curve",
                got: flat.len(),
            }),
        }
    }
}

impl TryFrom<Vec<f32>> for CurveArgs {
    type Error = PathError;

    fn try_from(flat: Vec<f32>) -> Result<Self, Self::Error> {
        CurveArgs::try_from(flat.as_slice())
    }
}

/// Normalized `arc` input.
#[derive(Debug, Clone)]
pub struct ArcArgs(pub(crate) ArcTo);

impl ArcArgs {
    fn new(circle: Circle, angle: AngleRange, acw: bool) -> Self {
        ArcArgs(ArcTo { circle, angle, acw })
    }
}

// A bare circle is the whole circumference, drawn clockwise.
impl From<Circle> for ArcArgs {
    fn from(circle: Circle) -> Self {
        ArcArgs::new(circle, AngleRange::full_turn(), false)
    }
}

impl From<(f32, f32, f32)> for ArcArgs {
    fn from(circle: (f32, f32, f32)) -> Self {
        ArcArgs::from(Circle::from(circle))
    }
}

impl<C, R> From<(C, R, bool)> for ArcArgs
where
    C: Into<Circle>,
    R: Into<AngleRange>,
{
    fn from((circle, angle, acw): (C, R, bool)) -> Self {
        ArcArgs::new(circle.into(), angle.into(), acw)
    }
}

// Six flat values: circle, then the angle range, then a truthy direction
// flag.
impl From<[f32; 6]> for ArcArgs {
    fn from([cx, cy, r, start, end, acw]: [f32; 6]) -> Self {
        ArcArgs::new(
            Circle::from((cx, cy, r)),
            AngleRange::new(start, end),
            acw != 0.0,
        )
    }
}

// Parse-side shape: at least six values required, surplus ignored.
impl TryFrom<&[f32]> for ArcArgs {
    type Error = PathError;

    fn try_from(flat: &[f32]) -> Result<Self, Self::Error> {
        match *flat {
            [cx, cy, r, start, end, acw, ..] => Ok(ArcArgs::from([cx, cy, r, start, end, acw])),
            _ => Err(PathError::InvalidArity {
                what: "arc",
                got: flat.len(),
            }),
        }
    }
}
