//! The canonical text encoding: one letter per command, whitespace-
//! delimited arguments, coordinates fixed to two decimals.
//!
//! ```text
//! M <x> <y>
//! L <x> <y>
//! C <x1> <y1> <x2> <y2> [<x3> <y3>]
//! A <cx> <cy> <r> <angleStart> <angleEnd> <acw:0|1>
//! ```

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use nom::combinator::all_consuming;
use nom::number::complete::float;
use tracing::trace;

use crate::builder::PathBuilder;
use crate::command::Command;
use crate::error::PathError;

impl PathBuilder {
    /// Renders the command sequence in the canonical text form.
    /// Deterministic: equal sequences produce equal strings.
    pub fn stringify(&self) -> String {
        let state = self.state.borrow();
        state
            .parts
            .iter()
            .map(render)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Parses `text` and appends the commands it encodes, replaying each
    /// one through the public entry points so every normalization rule
    /// applies.
    ///
    /// Lenient where the encoding has historically been lenient: numeric
    /// tokens before any command letter and tokens that are neither
    /// commands nor well-formed numbers are dropped. A letter outside
    /// {M, L, C, A} is an error.
    pub fn parse(&mut self, text: &str) -> Result<&mut Self> {
        let mut pending: Option<(char, Vec<f32>)> = None;
        for token in text.split_whitespace() {
            if let Some(value) = numeric(token) {
                match pending.as_mut() {
                    Some((_, args)) => args.push(value),
                    None => trace!("ignoring stray numeric token {:?}", token),
                }
            } else if token.chars().next().map_or(false, |c| c.is_ascii_alphabetic()) {
                if let Some(command) = pending.take() {
                    self.dispatch(command)?;
                }
                pending = Some((command_letter(token)?, vec![]));
            } else {
                trace!("ignoring malformed token {:?}", token);
            }
        }
        if let Some(command) = pending.take() {
            self.dispatch(command)?;
        }
        Ok(self)
    }

    fn dispatch(&mut self, (letter, args): (char, Vec<f32>)) -> Result<()> {
        match letter {
            'M' => {
                let (x, y) = point_args("move", &args)?;
                self.move_to((x, y));
            }
            'L' => {
                let (x, y) = point_args("line", &args)?;
                self.line_to((x, y));
            }
            'C' => {
                self.curve_to(args)?;
            }
            'A' => {
                self.arc(args.as_slice())?;
            }
            _ => unreachable!(),
        }
        Ok(())
    }
}

impl fmt::Display for PathBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stringify())
    }
}

impl FromStr for PathBuilder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut builder = PathBuilder::new();
        builder.parse(s)?;
        Ok(builder)
    }
}

/// A token is numeric only when the whole of it parses as one float.
fn numeric(token: &str) -> Option<f32> {
    all_consuming(float::<_, nom::error::Error<&str>>)(token)
        .ok()
        .map(|(_, value)| value)
}

fn command_letter(token: &str) -> Result<char, PathError> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) if "MLCA".contains(letter) => Ok(letter),
        _ => Err(PathError::UnknownCommand(token.to_string())),
    }
}

// The first two numbers make the point; surplus values are ignored the way
// the encoding has always ignored them.
fn point_args(what: &'static str, args: &[f32]) -> Result<(f32, f32), PathError> {
    match *args {
        [x, y, ..] => Ok((x, y)),
        _ => Err(PathError::InvalidArity {
            what,
            got: args.len(),
        }),
    }
}

fn num(v: f32) -> String {
    format!("{:.2}", v)
}

fn render(command: &Command) -> String {
    match command {
        Command::MoveTo(p) => {
            let p = p.get();
            format!("M {} {}", num(p.x), num(p.y))
        }
        Command::LineTo(p) => {
            let p = p.get();
            format!("L {} {}", num(p.x), num(p.y))
        }
        Command::Curve(curve) => {
            let mut out = String::from("C");
            for point in curve.points() {
                let p = point.get();
                out.push(' ');
                out.push_str(&num(p.x));
                out.push(' ');
                out.push_str(&num(p.y));
            }
            out
        }
        Command::Arc(arc) => {
            let center = arc.circle.center.get();
            format!(
                "A {} {} {} {} {} {}",
                num(center.x),
                num(center.y),
                num(*arc.circle.radius),
                num(arc.angle.start),
                num(arc.angle.end),
                if arc.acw { 1 } else { 0 },
            )
        }
    }
}

#[cfg(test)]
mod test {
    use crate::builder::PathBuilder;
    use crate::error::PathError;
    use geom::Circle;

    #[test]
    fn stringifies_moves_and_lines() {
        let mut builder = PathBuilder::new();
        builder
            .move_to((0.0, 0.0))
            .line_to((10.0, 0.0))
            .line_to((10.0, 10.0));
        assert_eq!(builder.stringify(), "M 0.00 0.00 L 10.00 0.00 L 10.00 10.00");
    }

    #[test]
    fn stringifies_arcs_with_a_binary_direction_flag() {
        let mut builder = PathBuilder::new();
        builder
            .arc((Circle::from((5.0, 5.0, 3.0)), [0.0, 3.14], true))
            .unwrap();
        assert_eq!(builder.stringify(), "A 5.00 5.00 3.00 0.00 3.14 1");
    }

    #[test]
    fn stringifies_both_curve_arities() {
        let mut builder = PathBuilder::new();
        builder.curve_to([1.0, 2.0, 3.0, 4.0]).unwrap();
        builder.curve_to([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(
            builder.stringify(),
            "C 1.00 2.00 3.00 4.00 C 1.00 2.00 3.00 4.00 5.00 6.00"
        );
    }

    #[test]
    fn round_trips_through_the_encoding() {
        let mut builder = PathBuilder::new();
        builder.move_to((0.0, 0.0)).line_to((10.5, -3.25));
        builder.curve_to([10.5, -3.25, 4.0, 4.0, 0.0, 8.0]).unwrap();
        builder
            .arc((Circle::from((5.0, 5.0, 3.0)), [0.25, 3.14], true))
            .unwrap();

        let text = builder.stringify();
        let reparsed: PathBuilder = text.parse().unwrap();
        assert_eq!(reparsed.stringify(), text);
    }

    #[test]
    fn parse_appends_to_the_existing_sequence() {
        let mut builder = PathBuilder::new();
        builder.move_to((0.0, 0.0));
        builder.parse("L 1 2").unwrap();
        assert_eq!(builder.stringify(), "M 0.00 0.00 L 1.00 2.00");
    }

    #[test]
    fn stray_leading_numbers_are_ignored() {
        let mut builder = PathBuilder::new();
        builder.parse("1.00 2.00 M 3 4").unwrap();
        assert_eq!(builder.stringify(), "M 3.00 4.00");
    }

    #[test]
    fn malformed_numbers_are_dropped_mid_command() {
        let mut builder = PathBuilder::new();
        builder.parse("M 1 2 1.2.3 L 4 5").unwrap();
        assert_eq!(builder.stringify(), "M 1.00 2.00 L 4.00 5.00");
    }

    #[test]
    fn unknown_letters_are_an_error() {
        let mut builder = PathBuilder::new();
        let err = builder.parse("Q 1 2").unwrap_err();
        assert_eq!(
            err.downcast_ref::<PathError>(),
            Some(&PathError::UnknownCommand("Q".to_string()))
        );
    }

    #[test]
    fn short_point_commands_are_an_error() {
        let mut builder = PathBuilder::new();
        let err = builder.parse("M 1").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PathError>(),
            Some(PathError::InvalidArity { what: "move", got: 1 })
        ));
    }

    #[test]
    fn build_from_replaces_the_sequence() {
        let mut builder = PathBuilder::new();
        builder.move_to((9.0, 9.0));
        let path = builder.build_from("M 0 0 L 1 0").unwrap();
        assert_eq!(builder.stringify(), "M 0.00 0.00 L 1.00 0.00");
        assert!(path.same_instance(&builder.build()));
    }

    #[test]
    fn parsed_arcs_apply_arc_normalization() {
        let mut builder = PathBuilder::new();
        builder.parse("A 5 5 3 0 3.14 1").unwrap();
        assert_eq!(builder.stringify(), "A 5.00 5.00 3.00 0.00 3.14 1");
    }

    #[test]
    fn display_matches_stringify() {
        let mut builder = PathBuilder::new();
        builder.move_to((1.0, 2.0));
        assert_eq!(format!("{}", builder), builder.stringify());
    }
}
