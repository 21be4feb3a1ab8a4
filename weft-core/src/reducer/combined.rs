//! Combined Reducer
//!
//! A [`CombinedReducer`] owns one reducer per field plus the graph computed
//! from their annotations. Construction does all of the analysis; a call
//! only replays the precomputed order.
//!
//! # How a Call Works
//!
//! 1. A fresh buffer with one slot per field is allocated.
//!
//! 2. Fields run in evaluation order. Each field's access list is resolved
//!    against the incoming state (`@prev`), the buffer (`@next`) and the
//!    call-time arguments (`@arg`), then its reducer runs once.
//!
//! 3. Each new value is compared with the field's previous value.
//!
//! 4. If anything changed, the buffer becomes a new [`State`]. Otherwise the
//!    incoming state is handed back as-is.
//!
//! # Thread Safety
//!
//! The reducer is immutable after construction. It is `Send + Sync`
//! whenever its field reducers are, which the builder requires, so one
//! instance can serve concurrent calls with independent states.

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::graph::{
    Access, EvaluationScheduler, FieldId, FieldNode, FieldSpec, GraphBuilder, GraphResult,
    Validator,
};

use super::deps::Deps;
use super::field::FieldEntry;
use super::options::ReducerOptions;
use super::state::State;

/// Several field reducers composed into one.
///
/// # Type Parameters
///
/// - `V`: the value type shared by every field and call-time argument.
/// - `E`: the event type passed to every field reducer.
/// - `X`: the error type field reducers may return. Errors are passed
///   through to the caller untouched.
pub struct CombinedReducer<V, E, X = Infallible> {
    /// Graph nodes, indexed by [`FieldId`].
    nodes: Vec<FieldNode>,

    /// Field reducers, parallel to `nodes`.
    entries: Vec<FieldEntry<V, E, X>>,

    /// The order fields run in on every call.
    order: Vec<FieldId>,
}

impl<V, E, X> CombinedReducer<V, E, X>
where
    V: PartialEq,
{
    /// Start configuring a combined reducer with default options.
    pub fn builder() -> ReducerBuilder<V, E, X> {
        ReducerBuilder::new()
    }

    /// Run one step with no call-time arguments.
    ///
    /// `previous` of `None` behaves like a state with no fields, so every
    /// field reducer sees `None` and supplies its own initial value.
    pub fn reduce(&self, previous: Option<&State<V>>, event: &E) -> Result<State<V>, X> {
        self.reduce_with_args(previous, event, &[])
    }

    /// Run one step, making `args` available to `@arg` annotations.
    pub fn reduce_with_args(
        &self,
        previous: Option<&State<V>>,
        event: &E,
        args: &[V],
    ) -> Result<State<V>, X> {
        let mut next: Vec<Option<V>> = self.nodes.iter().map(|_| None).collect();
        let mut changed = false;

        for &id in &self.order {
            let node = &self.nodes[id.index()];
            let previous_value = previous.and_then(|state| state.get(node.name()));

            let value = {
                let deps = self.resolve(node, previous, &next, args);
                self.entries[id.index()].invoke(previous_value, event, &deps)?
            };

            changed |= previous_value != Some(&value);
            next[id.index()] = Some(value);
        }

        if let Some(previous) = previous.filter(|_| !changed) {
            trace!("no field changed, returning previous state");
            return Ok(previous.clone());
        }

        let values: IndexMap<Arc<str>, V> = self
            .nodes
            .iter()
            .zip(next)
            .filter_map(|(node, value)| Some((Arc::clone(node.shared_name()), value?)))
            .collect();
        trace!(fields = values.len(), "built new state");
        Ok(State::from_map(values))
    }

    /// Fetch every value `node` declared, in declaration order.
    fn resolve<'a>(
        &self,
        node: &FieldNode,
        previous: Option<&'a State<V>>,
        next: &'a [Option<V>],
        args: &'a [V],
    ) -> Deps<'a, V> {
        node.access()
            .iter()
            .map(|access| match *access {
                Access::Prev(id) => {
                    previous.and_then(|state| state.get(self.nodes[id.index()].name()))
                }
                Access::Next(id) => next[id.index()].as_ref(),
                Access::Arg(index) => args.get(index),
                Access::Unbound => None,
            })
            .collect()
    }
}

impl<V, E, X> CombinedReducer<V, E, X> {
    /// Field names in the order their reducers run.
    pub fn evaluation_order(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|id| self.nodes[id.index()].name())
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(FieldNode::name)
    }

    /// The resolved access list of a field, or `None` for an unknown name.
    pub fn dependencies(&self, field: &str) -> Option<&[Access]> {
        self.nodes
            .iter()
            .find(|node| node.name() == field)
            .map(FieldNode::access)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<V, E, X> fmt::Debug for CombinedReducer<V, E, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombinedReducer")
            .field("fields", &self.field_names().collect::<Vec<_>>())
            .field("order", &self.evaluation_order().collect::<Vec<_>>())
            .finish()
    }
}

/// Collects field reducers and options, then builds a [`CombinedReducer`].
///
/// Fields keep the order they are added in; that order breaks ties in the
/// evaluation order. Adding a field under a name that is already taken
/// replaces the earlier entry in place, and the validator reports it.
pub struct ReducerBuilder<V, E, X = Infallible> {
    options: ReducerOptions,
    fields: IndexMap<Arc<str>, FieldEntry<V, E, X>>,
    duplicates: Vec<String>,
}

impl<V, E, X> ReducerBuilder<V, E, X> {
    pub fn new() -> Self {
        Self::with_options(ReducerOptions::default())
    }

    pub fn with_options(options: ReducerOptions) -> Self {
        Self {
            options,
            fields: IndexMap::new(),
            duplicates: Vec::new(),
        }
    }

    /// Add a field whose reducer only sees its previous value and the event.
    pub fn field<F>(self, name: impl Into<Arc<str>>, reducer: F) -> Self
    where
        F: Fn(Option<&V>, &E) -> Result<V, X> + Send + Sync + 'static,
    {
        self.entry(name.into(), FieldEntry::plain(reducer))
    }

    /// Add a field with dependency annotations such as `"@next id"`.
    ///
    /// The reducer receives the resolved values as its third argument, in
    /// the order the annotations are listed.
    pub fn annotated<I, S, F>(self, name: impl Into<Arc<str>>, annotations: I, reducer: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(Option<&V>, &E, &Deps<'_, V>) -> Result<V, X> + Send + Sync + 'static,
    {
        let annotations = annotations.into_iter().map(Into::into).collect();
        self.entry(name.into(), FieldEntry::annotated(annotations, reducer))
    }

    /// Name the call-time argument slots so `@arg <name>` can address them.
    pub fn argument_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.argument_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable configuration checks.
    pub fn validate(mut self, enabled: bool) -> Self {
        self.options.validate = enabled;
        self
    }

    fn entry(mut self, name: Arc<str>, entry: FieldEntry<V, E, X>) -> Self {
        if let Some(_replaced) = self.fields.insert(Arc::clone(&name), entry) {
            self.duplicates.push(name.to_string());
        }
        self
    }

    /// Validate the configuration, build the graph and compute the
    /// evaluation order.
    pub fn build(self) -> GraphResult<CombinedReducer<V, E, X>> {
        let slots = self.options.argument_slots();
        let specs: Vec<FieldSpec<'_>> = self
            .fields
            .iter()
            .map(|(name, entry)| FieldSpec {
                name,
                annotations: entry.annotations(),
            })
            .collect();

        if self.options.validate {
            Validator::new(
                &specs,
                &self.duplicates,
                &self.options.argument_names,
                &slots,
            )
            .check()?;
        } else {
            debug!("configuration validation disabled");
        }

        let nodes = GraphBuilder::new(&specs, &slots).build()?;
        let order = EvaluationScheduler::new(&nodes).evaluation_order()?;
        drop(specs);

        let reducer = CombinedReducer {
            nodes,
            entries: self.fields.into_values().collect(),
            order,
        };
        debug!(
            fields = reducer.len(),
            order = ?reducer.evaluation_order().collect::<Vec<_>>(),
            "built combined reducer"
        );
        Ok(reducer)
    }
}

impl<V, E, X> Default for ReducerBuilder<V, E, X> {
    fn default() -> Self {
        Self::new()
    }
}
