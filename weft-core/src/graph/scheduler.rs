//! Evaluation Scheduler
//!
//! The scheduler determines the order in which field reducers run on every
//! call. It ensures that a field reading another field's fresh (`@next`)
//! value always runs after that field.
//!
//! # Algorithm
//!
//! Fields without forward dependencies go first, in declaration order.
//! Nothing constrains them and nothing can observe their fresh value before
//! it exists.
//!
//! The rest are ordered with an explicit depth-first walk:
//!
//! 1. Seed the stack with the first remaining field
//! 2. Look at the top of the stack. If any of its forward targets is on the
//!    stack, the walk has looped back onto its own active path: fail
//! 3. If all its forward targets are finalized, pop it, append it to the
//!    order and, when the stack empties, seed it again
//! 4. Otherwise push its first unfinalized target and continue
//!
//! The cycle check looks at the active path only. A finalized field has left
//! the stack, so a diamond that reaches the same field twice is not a cycle.
//!
//! `@prev` edges never appear here; they read last step's value, which is
//! always available.

use indexmap::IndexSet;

use super::error::{GraphError, GraphResult};
use super::node::{FieldId, FieldNode};

/// Computes the evaluation order for a built graph.
pub struct EvaluationScheduler<'a> {
    /// All nodes, indexed by [`FieldId`].
    nodes: &'a [FieldNode],
}

impl<'a> EvaluationScheduler<'a> {
    pub fn new(nodes: &'a [FieldNode]) -> Self {
        Self { nodes }
    }

    fn node(&self, id: FieldId) -> &'a FieldNode {
        &self.nodes[id.index()]
    }

    /// Compute the full evaluation order.
    ///
    /// Returns every field exactly once, or `CircularDependency` if the
    /// forward edges contain a cycle (including a field naming itself).
    pub fn evaluation_order(&self) -> GraphResult<Vec<FieldId>> {
        let (independent, dependent): (Vec<&FieldNode>, Vec<&FieldNode>) = self
            .nodes
            .iter()
            .partition(|node| !node.has_forward_dependencies());

        let mut order: Vec<FieldId> = Vec::with_capacity(self.nodes.len());
        order.extend(independent.iter().map(|node| node.id()));
        order.extend(self.sequence(dependent.iter().map(|node| node.id()))?);
        Ok(order)
    }

    /// Order the fields that have forward dependencies.
    fn sequence(&self, fields: impl IntoIterator<Item = FieldId>) -> GraphResult<Vec<FieldId>> {
        let mut remaining: IndexSet<FieldId> = fields.into_iter().collect();
        let mut result = Vec::with_capacity(remaining.len());
        let mut on_path = vec![false; self.nodes.len()];
        let mut stack: Vec<FieldId> = Vec::new();

        if let Some(&first) = remaining.first() {
            stack.push(first);
            on_path[first.index()] = true;
        }

        while let Some(&current) = stack.last() {
            let forward = self.node(current).forward();

            if let Some(&target) = forward.iter().find(|target| on_path[target.index()]) {
                return Err(self.cycle_error(&stack, target));
            }

            match forward.iter().copied().find(|target| remaining.contains(target)) {
                Some(target) => {
                    stack.push(target);
                    on_path[target.index()] = true;
                }
                None => {
                    stack.pop();
                    on_path[current.index()] = false;
                    remaining.shift_remove(&current);
                    result.push(current);

                    if stack.is_empty() {
                        if let Some(&next) = remaining.first() {
                            stack.push(next);
                            on_path[next.index()] = true;
                        }
                    }
                }
            }
        }

        Ok(result)
    }

    /// Build the error for a cycle closed by `target`, which is on `stack`.
    fn cycle_error(&self, stack: &[FieldId], target: FieldId) -> GraphError {
        let start = stack.iter().position(|&id| id == target).unwrap_or(0);
        let path = stack[start..]
            .iter()
            .chain(std::iter::once(&target))
            .map(|&id| self.node(id).name());
        GraphError::cycle(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::node::Access;
    use std::sync::Arc;

    /// Build nodes from `(name, next-targets)` pairs.
    fn graph(fields: &[(&str, Vec<usize>)]) -> Vec<FieldNode> {
        fields
            .iter()
            .enumerate()
            .map(|(index, (name, next))| {
                let mut node = FieldNode::new(FieldId::from(index), Arc::from(*name));
                for &target in next {
                    node.push_access(Access::Next(FieldId::from(target)));
                }
                node
            })
            .collect()
    }

    fn names(nodes: &[FieldNode], order: &[FieldId]) -> Vec<String> {
        order
            .iter()
            .map(|id| nodes[id.index()].name().to_string())
            .collect()
    }

    #[test]
    fn independent_fields_come_first_in_declaration_order() {
        let nodes = graph(&[("history", vec![1]), ("id", vec![]), ("count", vec![])]);
        let order = EvaluationScheduler::new(&nodes).evaluation_order().unwrap();
        assert_eq!(names(&nodes, &order), ["id", "count", "history"]);
    }

    #[test]
    fn chain_is_ordered_dependencies_first() {
        // e -> d -> c -> b -> a, declared dependents first
        let nodes = graph(&[
            ("e", vec![1]),
            ("d", vec![2]),
            ("c", vec![3]),
            ("b", vec![4]),
            ("a", vec![]),
        ]);
        let order = EvaluationScheduler::new(&nodes).evaluation_order().unwrap();
        assert_eq!(names(&nodes, &order), ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn diamond_is_not_a_cycle() {
        // top reads left and right, both read base
        let nodes = graph(&[
            ("top", vec![1, 2]),
            ("left", vec![3]),
            ("right", vec![3]),
            ("base", vec![4]),
            ("root", vec![]),
        ]);
        let order = EvaluationScheduler::new(&nodes).evaluation_order().unwrap();
        assert_eq!(names(&nodes, &order), ["root", "base", "left", "right", "top"]);
    }

    #[test]
    fn disconnected_groups_are_all_sequenced() {
        let nodes = graph(&[
            ("x", vec![1]),
            ("y", vec![4]),
            ("p", vec![3]),
            ("q", vec![4]),
            ("z", vec![]),
        ]);
        let order = EvaluationScheduler::new(&nodes).evaluation_order().unwrap();
        assert_eq!(names(&nodes, &order), ["z", "y", "x", "q", "p"]);
    }

    #[test]
    fn two_cycle_is_rejected_with_path() {
        let nodes = graph(&[("a", vec![1]), ("b", vec![0])]);
        let err = EvaluationScheduler::new(&nodes)
            .evaluation_order()
            .unwrap_err();
        assert_eq!(err, GraphError::cycle(["a", "b", "a"]));
    }

    #[test]
    fn self_reference_is_a_cycle() {
        let nodes = graph(&[("a", vec![0])]);
        let err = EvaluationScheduler::new(&nodes)
            .evaluation_order()
            .unwrap_err();
        assert_eq!(err, GraphError::cycle(["a", "a"]));
    }

    #[test]
    fn cycle_behind_a_tail_reports_only_the_loop() {
        let nodes = graph(&[("entry", vec![1]), ("a", vec![2]), ("b", vec![1])]);
        let err = EvaluationScheduler::new(&nodes)
            .evaluation_order()
            .unwrap_err();
        assert_eq!(err, GraphError::cycle(["a", "b", "a"]));
    }

    #[test]
    fn empty_graph_has_empty_order() {
        let order = EvaluationScheduler::new(&[]).evaluation_order().unwrap();
        assert!(order.is_empty());
    }
}
