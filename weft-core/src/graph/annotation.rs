//! Dependency Annotations
//!
//! A field declares what it needs from the rest of the state with short
//! strings of the form `"<directive> <name>"`:
//!
//! - `@prev <field>`: the field's value before the current step
//! - `@next <field>`: the field's value as recomputed earlier in this step
//! - `@both <field>`: shorthand for `@prev <field>` followed by `@next <field>`
//! - `@arg <index-or-name>`: an extra argument supplied at call time

use smallvec::{smallvec, SmallVec};

use super::error::{GraphError, GraphResult};

/// Where a dependency value is read from at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Value from the state passed into the call.
    Prev,
    /// Value produced earlier in the same call.
    Next,
    /// Extra call-time argument.
    Arg,
}

/// One parsed `(direction, target)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    direction: Direction,
    target: String,
}

/// Parsed form of a single annotation string. `@both` yields two entries.
pub type Annotations = SmallVec<[Annotation; 2]>;

impl Annotation {
    pub fn new(direction: Direction, target: impl Into<String>) -> Self {
        Self {
            direction,
            target: target.into(),
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Parse one annotation string.
    ///
    /// The string must split on whitespace into exactly a directive and a
    /// target. The result preserves expansion order, so `@both x` becomes
    /// `[(Prev, x), (Next, x)]`.
    pub fn parse(source: &str) -> GraphResult<Annotations> {
        let mut tokens = source.split_whitespace();
        let (directive, target) = match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(directive), Some(target), None) => (directive, target),
            _ => {
                return Err(GraphError::syntax(
                    source,
                    "expected exactly two tokens: a directive and a target",
                ))
            }
        };

        let parsed = match directive {
            "@prev" => smallvec![Self::new(Direction::Prev, target)],
            "@next" => smallvec![Self::new(Direction::Next, target)],
            "@both" => smallvec![
                Self::new(Direction::Prev, target),
                Self::new(Direction::Next, target),
            ],
            "@arg" => smallvec![Self::new(Direction::Arg, target)],
            other => {
                return Err(GraphError::syntax(
                    source,
                    format!("unknown directive '{other}'"),
                ))
            }
        };

        Ok(parsed)
    }
}
