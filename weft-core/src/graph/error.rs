//! Error types for graph construction
//!
//! Every error here is raised while a combined reducer is being built. Once
//! construction succeeds the graph is immutable and cannot fail again.

use std::fmt;

use thiserror::Error;

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

/// What an annotation target was expected to name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// Another field of the combined state.
    Field,
    /// A call-time argument slot.
    Argument,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field => f.write_str("field"),
            Self::Argument => f.write_str("argument"),
        }
    }
}

/// Errors that can occur while building a combined reducer
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GraphError {
    /// The configuration itself is malformed (duplicate or blank names).
    #[error("Invalid configuration: {reason}")]
    ConfigurationShape {
        /// What is wrong with the configuration
        reason: String,
    },

    /// An annotation string could not be parsed
    #[error("Invalid dependency annotation '{annotation}': {reason}")]
    AnnotationSyntax {
        /// The annotation as written
        annotation: String,
        /// Why it was rejected
        reason: String,
    },

    /// An annotation names a field or argument slot that does not exist
    #[error("Field '{field}' depends on unknown {kind} '{target}'")]
    UnknownDependencyTarget {
        /// The field that declared the annotation
        field: String,
        /// The name that could not be resolved
        target: String,
        /// Whether a field or an argument slot was expected
        kind: TargetKind,
    },

    /// A chain of `@next` dependencies loops back onto itself
    #[error("Circular dependency detected: {}", .path.join(" -> "))]
    CircularDependency {
        /// Fields along the cycle, first and last entries are the same field
        path: Vec<String>,
    },
}

impl GraphError {
    /// Creates a configuration shape error
    pub fn shape(reason: impl Into<String>) -> Self {
        Self::ConfigurationShape {
            reason: reason.into(),
        }
    }

    /// Creates an annotation syntax error
    pub fn syntax(annotation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::AnnotationSyntax {
            annotation: annotation.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unknown target error
    pub fn unknown_target(
        field: impl Into<String>,
        target: impl Into<String>,
        kind: TargetKind,
    ) -> Self {
        Self::UnknownDependencyTarget {
            field: field.into(),
            target: target.into(),
            kind,
        }
    }

    /// Creates a circular dependency error from the offending path
    pub fn cycle<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::CircularDependency {
            path: path.into_iter().map(Into::into).collect(),
        }
    }
}
