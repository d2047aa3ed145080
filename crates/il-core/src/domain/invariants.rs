//! Domain invariants for conversion
//!
//! Post-conditions a `Sequence` must satisfy relative to the command it was
//! converted from. Checked in debug builds by the converter and in tests.

use super::entities::{ComplexCommand, DependencyGraph, Sequence};
use super::value_objects::Identifier;
use std::collections::HashSet;

/// INVARIANT-1: Dependency Order
/// Every referenced identifier is bound by an earlier action.
pub fn invariant_dependency_order(sequence: &Sequence) -> bool {
    let mut bound: HashSet<&Identifier> = HashSet::new();

    for action in sequence.actions() {
        if action.references().any(|id| !bound.contains(id)) {
            return false;
        }
        bound.insert(action.result());
    }

    sequence
        .returns()
        .map(|source| source.references().into_iter().all(|id| bound.contains(id)))
        .unwrap_or(true)
}

/// INVARIANT-2: Completeness
/// Every action of the command appears in the sequence exactly once.
pub fn invariant_completeness(sequence: &Sequence, command: &ComplexCommand) -> bool {
    if sequence.len() != command.len() {
        return false;
    }

    let mut seen: HashSet<&Identifier> = HashSet::new();
    for action in sequence.actions() {
        if !seen.insert(action.result()) {
            return false;
        }
    }

    command.actions().all(|a| sequence.actions().contains(a))
}

/// INVARIANT-3: No Cycles
/// DFS over the dependency graph finds no back edge.
pub fn invariant_no_cycles(graph: &DependencyGraph) -> bool {
    #[derive(Copy, Clone, PartialEq, Eq)]
    enum Mark {
        Unvisited,
        InStack,
        Done,
    }

    fn visit(node: usize, graph: &DependencyGraph, marks: &mut [Mark]) -> bool {
        match marks[node] {
            Mark::InStack => return false,
            Mark::Done => return true,
            Mark::Unvisited => {}
        }

        marks[node] = Mark::InStack;
        for &next in &graph.dependents[node] {
            if !visit(next, graph, marks) {
                return false;
            }
        }
        marks[node] = Mark::Done;
        true
    }

    let mut marks = vec![Mark::Unvisited; graph.node_count()];
    (0..graph.node_count()).all(|node| visit(node, graph, &mut marks))
}
