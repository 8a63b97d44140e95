//! FILENAME: engine/src/recalc.rs
//! PURPOSE: Computes the order in which cells must be recomputed.
//! CONTEXT: When a cell changes, it and every cell that transitively depends
//! on it must be re-evaluated, each one after all of its inputs. This module
//! walks the dependency graph from the changed cell and returns that order,
//! or the cycle it ran into.
//!
//! ALGORITHM: depth-first search over `dependents`, emitting cells in reverse
//! post-order. The walk uses an explicit stack so arbitrarily long formula
//! chains cannot overflow the call stack. Children are visited in sorted order
//! so the result is deterministic. A child that is still on the current path
//! closes a cycle and aborts the walk.

use crate::dependency_graph::DependencyGraph;
use std::collections::HashSet;
use thiserror::Error;

/// Error type for cycle detection.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Circular reference detected: {}", .cycle_path.join(" -> "))]
pub struct CycleError {
    /// The cells involved in the cycle, in order, ending where it started.
    pub cycle_path: Vec<String>,
}

/// One cell being visited: its sorted dependents and how many were handled.
struct Frame {
    name: String,
    children: Vec<String>,
    next: usize,
}

impl Frame {
    fn new(graph: &DependencyGraph, name: &str) -> Self {
        let mut children: Vec<String> = graph.dependents(name).map(str::to_string).collect();
        children.sort_unstable();
        Frame {
            name: name.to_string(),
            children,
            next: 0,
        }
    }
}

/// Returns `start` followed by every cell that transitively depends on it,
/// each listed after all of the cells it depends on.
///
/// # Returns
/// - `Ok(Vec<String>)` - The cells to recalculate, `start` first.
/// - `Err(CycleError)` - If `start` reaches a cycle.
pub fn recalc_order(graph: &DependencyGraph, start: &str) -> Result<Vec<String>, CycleError> {
    let mut visited: HashSet<String> = HashSet::new();
    let mut on_path: HashSet<String> = HashSet::new();
    let mut finished: Vec<String> = Vec::new();

    visited.insert(start.to_string());
    on_path.insert(start.to_string());
    let mut stack = vec![Frame::new(graph, start)];

    while let Some(frame) = stack.last_mut() {
        let Some(child) = frame.children.get(frame.next).cloned() else {
            if let Some(done) = stack.pop() {
                on_path.remove(&done.name);
                finished.push(done.name);
            }
            continue;
        };
        frame.next += 1;

        if on_path.contains(&child) {
            let from = stack.iter().position(|f| f.name == child).unwrap_or(0);
            let mut cycle_path: Vec<String> = stack[from..].iter().map(|f| f.name.clone()).collect();
            cycle_path.push(child);
            return Err(CycleError { cycle_path });
        }

        if visited.insert(child.clone()) {
            on_path.insert(child.clone());
            stack.push(Frame::new(graph, &child));
        }
    }

    finished.reverse();
    Ok(finished)
}
