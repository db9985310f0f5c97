use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use tracing::debug;

use geom::{Point, PointRef, Vector};

use crate::builder::PathBuilder;
use crate::command::Command;
use crate::probe::HitSurface;
use crate::surface::{DrawMode, Surface};

/// Replay/hit-test façade bound to one [`PathBuilder`].
///
/// Constructed by [`PathBuilder::build`]; clones are the same instance.
/// Owns the private offscreen surface that answers [`Path::has_point`].
/// Dropping every clone detaches the path without touching the builder's
/// command sequence.
#[derive(Clone)]
pub struct Path {
    core: Rc<PathCore>,
}

pub(crate) struct PathCore {
    builder: PathBuilder,
    probe: RefCell<HitSurface>,
}

impl Path {
    pub(crate) fn attach(builder: PathBuilder) -> Path {
        let core = Rc::new(PathCore {
            builder: builder.clone(),
            probe: RefCell::new(HitSurface::new()),
        });
        builder.state.borrow_mut().path = Some(Rc::downgrade(&core));
        Path { core }
    }

    pub(crate) fn from_core(core: Rc<PathCore>) -> Path {
        Path { core }
    }

    /// The builder this path replays; mutations through it are visible to
    /// the next draw or hit test.
    pub fn builder(&self) -> PathBuilder {
        self.core.builder.clone()
    }

    /// Whether two handles refer to the same attached instance.
    pub fn same_instance(&self, other: &Path) -> bool {
        Rc::ptr_eq(&self.core, &other.core)
    }

    /// Replays the whole command sequence onto `surface` as one
    /// begin/close-wrapped path, then applies the terminal operation.
    pub fn draw(&self, surface: &mut dyn Surface, mode: DrawMode) -> &Self {
        self.replay(surface);
        match mode {
            DrawMode::Fill => surface.fill(),
            DrawMode::Stroke => surface.stroke(),
        }
        self
    }

    /// True when `p` falls inside the path under the non-zero fill rule.
    ///
    /// The one place the builder's dirty flag is cleared: a stale hit
    /// surface is rebuilt exactly once, then queried.
    pub fn has_point(&self, p: impl Into<Point>) -> bool {
        let p = p.into();
        let mut probe = self.core.probe.borrow_mut();
        if self.core.builder.take_changed() {
            debug!("rebuilding hit-test surface");
            self.replay(&mut *probe);
        }
        probe.contains(p)
    }

    /// Translates every distinct point cell referenced by the sequence
    /// exactly once, even when a cell is shared by several commands. Arc
    /// commands move only the circle's center; radius and angles are
    /// unaffected. Leaves the builder dirty, since the cells mutate in
    /// place underneath any previously built hit surface.
    pub fn translate(&self, distance: impl Into<Vector>) -> &Self {
        let distance = distance.into();
        {
            let state = self.core.builder.state.borrow();
            let mut moved: HashSet<usize> = HashSet::new();
            let mut shift = |p: &PointRef| {
                if moved.insert(p.ptr_id()) {
                    p.translate(distance);
                }
            };
            for command in &state.parts {
                match command {
                    Command::MoveTo(p) | Command::LineTo(p) => shift(p),
                    Command::Curve(curve) => {
                        for p in curve.points() {
                            shift(p);
                        }
                    }
                    Command::Arc(arc) => shift(&arc.circle.center),
                }
            }
        }
        self.core.builder.mark_changed();
        self
    }

    fn replay(&self, surface: &mut dyn Surface) {
        let state = self.core.builder.state.borrow();
        surface.begin_path();
        for command in &state.parts {
            match command {
                Command::MoveTo(p) => surface.move_to(p.get()),
                Command::LineTo(p) => surface.line_to(p.get()),
                Command::Curve(curve) => surface.curve_to(
                    curve.first.get(),
                    curve.second.get(),
                    curve.third.as_ref().map(|p| p.get()),
                ),
                Command::Arc(arc) => surface.arc(
                    arc.circle.center.get(),
                    *arc.circle.radius,
                    arc.angle.start,
                    arc.angle.end,
                    arc.acw,
                ),
            }
        }
        surface.close_path();
    }
}
