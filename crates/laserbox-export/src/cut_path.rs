//! Path serializer
//!
//! Maps an outline 1:1 onto drawing commands: the first point is a move, every
//! following point a line, then one close. The text form is SVG path data
//! (`M x,y L x,y ... Z`) written with shortest round-trip float formatting,
//! so parsing it back is lossless.

use crate::error::{ExportError, ExportResult};
use laserbox_core::{GeometryError, GeometryResult, Outline, Point};
use std::fmt;
use std::str::FromStr;

/// One drawing command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    Close,
}

/// A closed cut path
#[derive(Debug, Clone, PartialEq)]
pub struct CutPath {
    commands: Vec<PathCommand>,
}

/// Serialize an outline, translated by `(offset_x, offset_y)`.
pub fn to_cut_path(outline: &Outline, offset_x: f64, offset_y: f64) -> GeometryResult<CutPath> {
    let points = outline.points();
    let (first, rest) = points.split_first().ok_or(GeometryError::EmptyOutline)?;

    let mut commands = Vec::with_capacity(points.len() + 1);
    commands.push(PathCommand::MoveTo(Point::new(
        first.x + offset_x,
        first.y + offset_y,
    )));
    commands.extend(
        rest.iter()
            .map(|p| PathCommand::LineTo(Point::new(p.x + offset_x, p.y + offset_y))),
    );
    commands.push(PathCommand::Close);

    Ok(CutPath { commands })
}

impl CutPath {
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Rebuild the point sequence the commands trace.
    pub fn replay(&self) -> Vec<Point> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => Some(*p),
                PathCommand::Close => None,
            })
            .collect()
    }

    /// SVG path data for the `d` attribute
    pub fn to_path_data(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CutPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cmd) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match cmd {
                PathCommand::MoveTo(p) => write!(f, "M{},{}", p.x, p.y)?,
                PathCommand::LineTo(p) => write!(f, "L{},{}", p.x, p.y)?,
                PathCommand::Close => f.write_str("Z")?,
            }
        }
        Ok(())
    }
}

impl FromStr for CutPath {
    type Err = ExportError;

    fn from_str(s: &str) -> ExportResult<Self> {
        let mut commands = Vec::new();
        let mut closed = false;

        for token in s.split_whitespace() {
            if closed {
                return Err(ExportError::MalformedPathData(format!(
                    "command after close: {}",
                    token
                )));
            }

            let mut chars = token.chars();
            let op = chars.next();
            let args = chars.as_str();
            let cmd = match op {
                Some('M') if commands.is_empty() => PathCommand::MoveTo(parse_point(args)?),
                Some('L') if !commands.is_empty() => PathCommand::LineTo(parse_point(args)?),
                Some('Z') if !commands.is_empty() && args.is_empty() => {
                    closed = true;
                    PathCommand::Close
                }
                _ => {
                    return Err(ExportError::MalformedPathData(format!(
                        "unexpected token: {}",
                        token
                    )))
                }
            };
            commands.push(cmd);
        }

        if !closed {
            return Err(ExportError::MalformedPathData(
                "path is not closed".to_string(),
            ));
        }

        Ok(Self { commands })
    }
}

fn parse_point(args: &str) -> ExportResult<Point> {
    let (x, y) = args
        .split_once(',')
        .ok_or_else(|| ExportError::MalformedPathData(format!("expected x,y: {}", args)))?;
    let parse = |v: &str| {
        v.parse::<f64>()
            .map_err(|e| ExportError::MalformedPathData(format!("{}: {}", v, e)))
    };
    Ok(Point::new(parse(x)?, parse(y)?))
}
