//! Graph Nodes
//!
//! This module defines the per-field nodes that live in the dependency graph.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

/// Identifier for a field in the dependency graph.
///
/// Ids are positions in configuration declaration order, so they double as
/// indexes into per-field buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(usize);

impl FieldId {
    /// Get the raw index.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for FieldId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// One value to fetch when a field runs.
///
/// A field's access list is resolved front to back at call time and the
/// results are handed to its reducer in the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// The field's value in the incoming state.
    Prev(FieldId),

    /// The field's value computed earlier in the current call.
    Next(FieldId),

    /// A call-time argument by position.
    Arg(usize),

    /// A target that could not be resolved at construction. Only produced
    /// when validation is disabled; always resolves to nothing.
    Unbound,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prev(id) => write!(f, "prev #{}", id.index()),
            Self::Next(id) => write!(f, "next #{}", id.index()),
            Self::Arg(index) => write!(f, "arg {index}"),
            Self::Unbound => f.write_str("unbound"),
        }
    }
}

/// A field in the dependency graph.
#[derive(Debug, Clone)]
pub struct FieldNode {
    /// Position of this field in declaration order.
    id: FieldId,

    /// The field's name, shared with every state built from this graph.
    name: Arc<str>,

    /// Fields whose fresh value this field reads (`@next` targets).
    /// These are the only edges that constrain evaluation order.
    forward: SmallVec<[FieldId; 4]>,

    /// Everything this field reads, in annotation order.
    access: SmallVec<[Access; 4]>,
}

impl FieldNode {
    /// Create a node with no dependencies.
    pub fn new(id: FieldId, name: Arc<str>) -> Self {
        Self {
            id,
            name,
            forward: SmallVec::new(),
            access: SmallVec::new(),
        }
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn shared_name(&self) -> &Arc<str> {
        &self.name
    }

    /// Record one resolved access. `Next` accesses also add a forward edge.
    pub fn push_access(&mut self, access: Access) {
        if let Access::Next(target) = access {
            self.forward.push(target);
        }
        self.access.push(access);
    }

    /// Forward (`@next`) targets, in declaration order, duplicates kept.
    pub fn forward(&self) -> &[FieldId] {
        &self.forward
    }

    /// Accesses in declaration order.
    pub fn access(&self) -> &[Access] {
        &self.access
    }

    /// Whether this field must wait for another field in the same step.
    pub fn has_forward_dependencies(&self) -> bool {
        !self.forward.is_empty()
    }
}
