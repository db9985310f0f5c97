use std::cell::RefCell;
use std::convert::TryInto;
use std::rc::{Rc, Weak};

use anyhow::Result;
use tracing::trace;

use geom::PointRef;

use crate::command::{ArcArgs, Command, CurveArgs};
use crate::error::PathError;
use crate::path::{Path, PathCore};

/// Mutable owner of a command sequence.
///
/// The builder is a cheap handle; clones share the same sequence, as does
/// the [`Path`] attached by [`PathBuilder::build`]. The dirty flag starts
/// set, is set again by every mutation, and is cleared only when the
/// attached path refreshes its hit-test surface.
#[derive(Clone, Debug)]
pub struct PathBuilder {
    pub(crate) state: Rc<RefCell<BuilderState>>,
}

#[derive(Debug)]
pub(crate) struct BuilderState {
    pub(crate) parts: Vec<Command>,
    pub(crate) changed: bool,
    pub(crate) path: Option<Weak<PathCore>>,
}

impl Default for BuilderState {
    fn default() -> Self {
        BuilderState {
            parts: vec![],
            changed: true,
            path: None,
        }
    }
}

impl Default for PathBuilder {
    fn default() -> Self {
        PathBuilder::new()
    }
}

impl PathBuilder {
    pub fn new() -> Self {
        PathBuilder {
            state: Rc::new(RefCell::new(BuilderState::default())),
        }
    }

    pub fn move_to(&mut self, to: impl Into<PointRef>) -> &mut Self {
        self.push(Command::MoveTo(to.into()))
    }

    pub fn line_to(&mut self, to: impl Into<PointRef>) -> &mut Self {
        self.push(Command::LineTo(to.into()))
    }

    /// Appends a quadratic or cubic curve. Accepts two or three point-likes,
    /// or a flat list of four or six coordinates; anything else is an
    /// arity error and nothing is appended.
    pub fn curve_to<C>(&mut self, args: C) -> Result<&mut Self>
    where
        C: TryInto<CurveArgs>,
        anyhow::Error: From<C::Error>,
    {
        let CurveArgs(curve) = args.try_into()?;
        Ok(self.push(Command::Curve(curve)))
    }

    /// Appends an arc. Accepts a bare circle-like (a full clockwise turn),
    /// a `(circle, angle-range, acw)` triple, or six flat values with a
    /// truthy direction flag.
    pub fn arc<A>(&mut self, args: A) -> Result<&mut Self>
    where
        A: TryInto<ArcArgs>,
        anyhow::Error: From<A::Error>,
    {
        let ArcArgs(arc) = args.try_into()?;
        Ok(self.push(Command::Arc(arc)))
    }

    pub fn push(&mut self, command: Command) -> &mut Self {
        let mut state = self.state.borrow_mut();
        trace!("push {}", command.letter());
        state.changed = true;
        state.parts.push(command);
        drop(state);
        self
    }

    pub fn push_front(&mut self, command: Command) -> &mut Self {
        let mut state = self.state.borrow_mut();
        trace!("push_front {}", command.letter());
        state.changed = true;
        state.parts.insert(0, command);
        drop(state);
        self
    }

    /// Drops the last command. Fails on an empty sequence, which is left
    /// untouched (the dirty flag included).
    pub fn pop_back(&mut self) -> Result<&mut Self> {
        let mut state = self.state.borrow_mut();
        if state.parts.pop().is_none() {
            return Err(PathError::EmptySequence.into());
        }
        state.changed = true;
        drop(state);
        Ok(self)
    }

    /// Drops the first command; same empty-sequence policy as
    /// [`PathBuilder::pop_back`].
    pub fn pop_front(&mut self) -> Result<&mut Self> {
        let mut state = self.state.borrow_mut();
        if state.parts.is_empty() {
            return Err(PathError::EmptySequence.into());
        }
        state.parts.remove(0);
        state.changed = true;
        drop(state);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.state.borrow().parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().parts.is_empty()
    }

    /// Snapshot of the sequence. Commands clone cheaply and their point
    /// cells stay shared with the builder.
    pub fn commands(&self) -> Vec<Command> {
        self.state.borrow().parts.clone()
    }

    /// Whether the hit-test surface is out of sync with the sequence.
    pub fn changed(&self) -> bool {
        self.state.borrow().changed
    }

    pub(crate) fn take_changed(&self) -> bool {
        std::mem::replace(&mut self.state.borrow_mut().changed, false)
    }

    pub(crate) fn mark_changed(&self) {
        self.state.borrow_mut().changed = true;
    }

    /// Attaches a [`Path`] to this builder, or returns the one already
    /// attached. Repeated calls hand back the same instance for as long as
    /// any clone of it is alive.
    pub fn build(&mut self) -> Path {
        if let Some(existing) = self.attached() {
            return existing;
        }
        Path::attach(self.clone())
    }

    /// Replaces the command sequence by parsing `text`, then builds.
    pub fn build_from(&mut self, text: &str) -> Result<Path> {
        {
            let mut state = self.state.borrow_mut();
            state.parts.clear();
            state.changed = true;
        }
        self.parse(text)?;
        Ok(self.build())
    }

    fn attached(&self) -> Option<Path> {
        self.state
            .borrow()
            .path
            .as_ref()
            .and_then(Weak::upgrade)
            .map(Path::from_core)
    }
}
