//! Weft Core
//!
//! This crate composes independently written per-field reducers into one
//! reducer over the combined state. A field's reducer may depend on other
//! fields within the same step, either on the value they held before the
//! step or on the value they were just recomputed to.
//!
//! It implements:
//!
//! - Dependency annotations (`@prev`, `@next`, `@both`, `@arg`)
//! - Graph construction, validation and cycle detection
//! - A precomputed evaluation order replayed on every call
//! - An identity fast path when nothing changed
//!
//! # Architecture
//!
//! The crate is organized into two modules:
//!
//! - `graph`: annotation parsing, the per-field dependency graph, validation
//!   and the evaluation scheduler
//! - `reducer`: field entries, state, options and the combined reducer
//!
//! # Example
//!
//! ```rust,ignore
//! use weft_core::reducer::CombinedReducer;
//!
//! enum Event { New }
//!
//! let reducer = CombinedReducer::<i64, Event>::builder()
//!     .field("id", |id, Event::New| Ok(id.copied().unwrap_or(0) + 1))
//!     // Sees the id produced in this same step
//!     .annotated("last_seen", ["@next id"], |_, _, deps| {
//!         Ok(deps.get(0).copied().unwrap_or(0))
//!     })
//!     .build()?;
//!
//! let state = reducer.reduce(None, &Event::New)?;
//! assert_eq!(state.get("last_seen"), Some(&1));
//! ```

pub mod graph;
pub mod reducer;

pub use graph::{GraphError, GraphResult};
pub use reducer::{CombinedReducer, Deps, ReducerBuilder, ReducerOptions, State};
