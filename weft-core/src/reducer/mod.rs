//! Combined Reducers
//!
//! This module composes per-field reducers into one reducer over a
//! [`State`] holding every field.
//!
//! # Concepts
//!
//! ## Fields
//!
//! Each field has a reducer `(previous value, event) -> next value`. A field
//! may also declare dependencies with annotations, in which case its reducer
//! gets a third argument: a [`Deps`] list with the requested values.
//!
//! ## Prev and Next
//!
//! `@prev x` reads `x` as it was in the state passed into the call.
//! `@next x` reads the value `x` was just given in the same call, which
//! forces `x` to run first. `@both x` reads the two, in that order.
//!
//! ## Arguments
//!
//! `@arg 0` or `@arg <name>` reads a call-time argument passed to
//! [`CombinedReducer::reduce_with_args`]. Arguments are not stored in the
//! state.
//!
//! ## Identity
//!
//! When every field returns a value equal to its previous one, the call
//! returns the incoming [`State`] itself rather than a copy.

mod combined;
mod deps;
mod field;
mod options;
mod state;

pub use combined::{CombinedReducer, ReducerBuilder};
pub use deps::Deps;
pub use field::{AnnotatedFn, FieldEntry, PlainFn};
pub use options::ReducerOptions;
pub use state::State;
