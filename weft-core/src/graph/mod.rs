//! Dependency Graph
//!
//! This module turns a field configuration into the immutable structure a
//! combined reducer replays on every call.
//!
//! # Overview
//!
//! The graph has one node per field. Each node carries:
//!
//! - an access list: every value the field reads, in annotation order
//! - a forward list: the fields whose fresh (`@next`) value it reads
//!
//! Only forward edges constrain the evaluation order, and only forward edges
//! can form an illegal cycle. `@prev` edges may point anywhere, including
//! back at the field itself.
//!
//! # Construction Pipeline
//!
//! 1. [`Validator`] rejects malformed configurations (optional)
//! 2. [`GraphBuilder`] parses annotations and resolves their targets
//! 3. [`EvaluationScheduler`] orders the fields and detects cycles
//!
//! All three run once. Nothing in this module is touched per call.

mod annotation;
mod builder;
mod error;
mod node;
mod scheduler;
mod validator;

pub use annotation::{Annotation, Annotations, Direction};
pub use builder::{ArgumentSlots, FieldSpec, GraphBuilder};
pub use error::{GraphError, GraphResult, TargetKind};
pub use node::{Access, FieldId, FieldNode};
pub use scheduler::EvaluationScheduler;
pub use validator::Validator;
