//! Field entries: one configured reducer per field.

use std::fmt;

use super::deps::Deps;

/// A reducer that only sees its own previous value and the event.
pub type PlainFn<V, E, X> = dyn Fn(Option<&V>, &E) -> Result<V, X> + Send + Sync;

/// A reducer that also receives its resolved dependencies.
pub type AnnotatedFn<V, E, X> = dyn Fn(Option<&V>, &E, &Deps<'_, V>) -> Result<V, X> + Send + Sync;

/// How one field computes its next value.
///
/// The variant is fixed when the field is configured and is never
/// re-inspected to decide how to fetch dependencies; that is driven by the
/// graph node alone.
pub enum FieldEntry<V, E, X> {
    /// No dependencies.
    Plain(Box<PlainFn<V, E, X>>),

    /// A reducer plus its dependency annotations, in declaration order.
    Annotated {
        reducer: Box<AnnotatedFn<V, E, X>>,
        annotations: Vec<String>,
    },
}

impl<V, E, X> FieldEntry<V, E, X> {
    pub fn plain<F>(reducer: F) -> Self
    where
        F: Fn(Option<&V>, &E) -> Result<V, X> + Send + Sync + 'static,
    {
        Self::Plain(Box::new(reducer))
    }

    pub fn annotated<F>(annotations: Vec<String>, reducer: F) -> Self
    where
        F: Fn(Option<&V>, &E, &Deps<'_, V>) -> Result<V, X> + Send + Sync + 'static,
    {
        Self::Annotated {
            reducer: Box::new(reducer),
            annotations,
        }
    }

    /// The raw annotation strings; empty for plain fields.
    pub fn annotations(&self) -> &[String] {
        match self {
            Self::Plain(_) => &[],
            Self::Annotated { annotations, .. } => annotations,
        }
    }

    pub(crate) fn invoke(&self, previous: Option<&V>, event: &E, deps: &Deps<'_, V>) -> Result<V, X> {
        match self {
            Self::Plain(reducer) => reducer(previous, event),
            Self::Annotated { reducer, .. } => reducer(previous, event, deps),
        }
    }
}

impl<V, E, X> fmt::Debug for FieldEntry<V, E, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(_) => f.write_str("Plain"),
            Self::Annotated { annotations, .. } => f
                .debug_struct("Annotated")
                .field("annotations", annotations)
                .finish(),
        }
    }
}
