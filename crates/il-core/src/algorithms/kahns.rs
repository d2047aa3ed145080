//! Kahn's Topological Sort Algorithm
//!
//! O((V + E) log V): a min-heap of ready positions makes the earliest
//! declared action win every tie, so output is deterministic and keeps the
//! author's insertion order wherever dependencies allow.

use crate::domain::entities::{ComplexCommand, DependencyGraph};
use crate::domain::errors::ConversionError;
use crate::domain::value_objects::Identifier;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use tracing::{debug, warn};

/// Order action positions so every dependency precedes its dependents.
///
/// Returns insertion indices in execution order, or `DependencyCycle` if
/// some actions can never become ready. A graph built from a different
/// command is rejected with `EmptyOrInvalidCommand`.
pub fn kahns_topological_sort(
    command: &ComplexCommand,
    graph: &DependencyGraph,
) -> Result<Vec<usize>, ConversionError> {
    if !graph.describes(command) {
        warn!(
            graph_nodes = graph.node_count(),
            command_len = command.len(),
            "Dependency graph does not match command"
        );
        return Err(ConversionError::invalid(
            "dependency graph was not built from this command",
        ));
    }

    let node_count = graph.node_count();

    // 1. Copy in-degrees (we'll modify them)
    let mut in_degree = graph.in_degree.clone();

    // 2. Seed with every action that has no dependency
    let mut ready: BinaryHeap<Reverse<usize>> = graph
        .zero_degree_nodes()
        .into_iter()
        .map(Reverse)
        .collect();

    // 3. Always emit the smallest ready insertion index
    let mut order: Vec<usize> = Vec::with_capacity(node_count);
    while let Some(Reverse(pos)) = ready.pop() {
        order.push(pos);

        for &dependent in &graph.dependents[pos] {
            let degree = &mut in_degree[dependent];
            *degree = degree.saturating_sub(1);
            if *degree == 0 {
                ready.push(Reverse(dependent));
            }
        }
    }

    // 4. Cycle detection: if not all actions were placed, there's a cycle
    if order.len() < node_count {
        let cycle = find_cycle(command, graph, &in_degree);
        warn!(
            placed = order.len(),
            total = node_count,
            cycle_len = cycle.len(),
            "Dependency cycle detected"
        );
        let identifier = cycle
            .first()
            .cloned()
            .ok_or_else(|| ConversionError::invalid("cycle detected but not located"))?;
        return Err(ConversionError::DependencyCycle { identifier, cycle });
    }

    let moved = order.iter().enumerate().filter(|&(i, &pos)| i != pos).count();
    debug!(placed = order.len(), moved, "Topological order computed");

    Ok(order)
}

/// Extract one concrete cycle among the unplaced actions.
///
/// Every unplaced action has at least one unplaced dependency, so walking
/// dependencies from any unplaced action must revisit a node.
fn find_cycle(
    command: &ComplexCommand,
    graph: &DependencyGraph,
    remaining: &[usize],
) -> Vec<Identifier> {
    let Some(start) = remaining.iter().position(|&degree| degree > 0) else {
        return Vec::new();
    };

    let mut step_of: Vec<Option<usize>> = vec![None; graph.node_count()];
    let mut walk: Vec<usize> = Vec::new();
    let mut current = start;

    while step_of[current].is_none() {
        step_of[current] = Some(walk.len());
        walk.push(current);

        match graph.dependencies[current]
            .iter()
            .copied()
            .find(|&dep| remaining[dep] > 0)
        {
            Some(next) => current = next,
            None => return Vec::new(),
        }
    }

    let cycle_start = step_of[current].unwrap_or(0);
    let commands = command.commands();

    // Walk followed dependency edges backwards; reverse into dependency order
    let mut cycle: Vec<Identifier> = walk[cycle_start..]
        .iter()
        .rev()
        .map(|&pos| commands[pos].action().result().clone())
        .collect();

    // Start from the earliest-declared member for a stable report
    if let Some(min_at) = walk[cycle_start..]
        .iter()
        .rev()
        .enumerate()
        .min_by_key(|(_, pos)| **pos)
        .map(|(i, _)| i)
    {
        cycle.rotate_left(min_at);
    }

    cycle
}
