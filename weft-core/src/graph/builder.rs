//! Graph Builder
//!
//! Turns the field configuration into one [`FieldNode`] per field. Each field
//! is processed on its own: its annotations are parsed, every target is
//! resolved to a field id or argument slot, and the resulting access list is
//! stored in declaration order.
//!
//! Target resolution never fails here. Checking that targets exist is the
//! validator's job; with validation disabled an unknown target simply becomes
//! [`Access::Unbound`].

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexSet;

use super::annotation::{Annotation, Direction};
use super::error::GraphResult;
use super::node::{Access, FieldId, FieldNode};

/// The graph-relevant part of one configured field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec<'a> {
    pub name: &'a Arc<str>,
    pub annotations: &'a [String],
}

/// The call-time argument slots that `@arg` annotations may address.
///
/// Without names, slots are purely positional and any index is accepted.
/// With names, `@arg <name>` resolves to that name's position and numeric
/// indexes must fall inside the declared slots.
#[derive(Debug, Clone, Default)]
pub struct ArgumentSlots {
    names: IndexSet<String>,
}

impl ArgumentSlots {
    pub fn positional() -> Self {
        Self::default()
    }

    pub fn named<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_named(&self) -> bool {
        !self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Resolve an `@arg` target to a positional index.
    pub fn resolve(&self, target: &str) -> Option<usize> {
        match target.parse::<usize>() {
            Ok(index) if !self.is_named() || index < self.names.len() => Some(index),
            Ok(_) => None,
            Err(_) => self.names.get_index_of(target),
        }
    }
}

/// Builds the per-field dependency structure.
pub struct GraphBuilder<'a> {
    fields: &'a [FieldSpec<'a>],
    slots: &'a ArgumentSlots,
    /// Field name to id. The first declaration wins.
    ids: HashMap<&'a str, FieldId>,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(fields: &'a [FieldSpec<'a>], slots: &'a ArgumentSlots) -> Self {
        let mut ids = HashMap::with_capacity(fields.len());
        for (index, spec) in fields.iter().enumerate() {
            ids.entry(&**spec.name).or_insert(FieldId::from(index));
        }
        Self { fields, slots, ids }
    }

    /// Build one node per field, in declaration order.
    ///
    /// Only a malformed annotation string can fail here, since there is no
    /// access descriptor to build from it.
    pub fn build(&self) -> GraphResult<Vec<FieldNode>> {
        self.fields
            .iter()
            .enumerate()
            .map(|(index, spec)| self.build_node(FieldId::from(index), spec))
            .collect()
    }

    fn build_node(&self, id: FieldId, spec: &FieldSpec<'_>) -> GraphResult<FieldNode> {
        let mut node = FieldNode::new(id, Arc::clone(spec.name));
        for source in spec.annotations {
            for annotation in Annotation::parse(source)? {
                node.push_access(self.resolve(&annotation));
            }
        }
        Ok(node)
    }

    fn resolve(&self, annotation: &Annotation) -> Access {
        let field = || self.ids.get(annotation.target()).copied();
        let access = match annotation.direction() {
            Direction::Prev => field().map(Access::Prev),
            Direction::Next => field().map(Access::Next),
            Direction::Arg => self.slots.resolve(annotation.target()).map(Access::Arg),
        };
        access.unwrap_or(Access::Unbound)
    }
}
