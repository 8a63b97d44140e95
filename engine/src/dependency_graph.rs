//! FILENAME: engine/src/dependency_graph.rs
//! PURPOSE: A bidirectional many-to-many relation between cell names.
//! CONTEXT: The graph is a set of ordered pairs (s, t) meaning "t depends on
//! s": t must be recomputed after s. It knows nothing about formulas or cells;
//! the spreadsheet keeps it in step with the formulas it stores.
//!
//! TERMINOLOGY:
//! - Dependents of s: every t with (s, t) in the graph.
//!   If A3 = A1 + A2, then A3 is a dependent of A1 and of A2.
//! - Dependees of t: every s with (s, t) in the graph.
//!   If A3 = A1 + A2, then A1 and A2 are the dependees of A3.
//!
//! Both directions are indexed so either query is a single map lookup.
//! Inner sets that become empty are removed, so a node that lost its last
//! edge is indistinguishable from one that never had any.

use std::collections::{HashMap, HashSet};

/// The Dependency Graph tracks relationships between named cells.
#[derive(Debug, Default, Clone)]
pub struct DependencyGraph {
    /// dependents[s] = { t | (s, t) }.
    dependents: HashMap<String, HashSet<String>>,

    /// dependees[t] = { s | (s, t) }.
    dependees: HashMap<String, HashSet<String>>,

    /// Number of ordered pairs.
    size: usize,
}

impl DependencyGraph {
    /// Creates a new, empty dependency graph.
    pub fn new() -> Self {
        DependencyGraph::default()
    }

    /// The number of ordered pairs in the graph.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The number of dependees of `t`.
    pub fn num_dependees(&self, t: &str) -> usize {
        self.dependees.get(t).map_or(0, HashSet::len)
    }

    pub fn has_dependents(&self, s: &str) -> bool {
        self.dependents.contains_key(s)
    }

    pub fn has_dependees(&self, t: &str) -> bool {
        self.dependees.contains_key(t)
    }

    /// Cells that depend directly on `s`. Unknown names have none.
    pub fn dependents(&self, s: &str) -> impl Iterator<Item = &str> + '_ {
        self.dependents
            .get(s)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Cells that `t` depends on directly. Unknown names have none.
    pub fn dependees(&self, t: &str) -> impl Iterator<Item = &str> + '_ {
        self.dependees
            .get(t)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Adds (s, t). Does nothing if the pair is already present.
    pub fn add_dependency(&mut self, s: &str, t: &str) {
        let inserted = self
            .dependents
            .entry(s.to_string())
            .or_default()
            .insert(t.to_string());
        if inserted {
            self.dependees
                .entry(t.to_string())
                .or_default()
                .insert(s.to_string());
            self.size += 1;
        }
    }

    /// Removes (s, t). Does nothing if the pair is absent.
    pub fn remove_dependency(&mut self, s: &str, t: &str) {
        if unlink(&mut self.dependents, s, t) {
            unlink(&mut self.dependees, t, s);
            self.size -= 1;
        }
    }

    /// Replaces every (s, _) pair with (s, t) for each t in `new_dependents`.
    ///
    /// The new set is swapped into the forward index in one step, then the
    /// reverse index is patched for exactly the names that were added or lost.
    pub fn replace_dependents<I, S>(&mut self, s: &str, new_dependents: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let new_set: HashSet<String> = new_dependents.into_iter().map(Into::into).collect();
        let old_set = swap_set(&mut self.dependents, s, new_set);
        self.relink(s, &old_set, Direction::Dependents);
    }

    /// Replaces every (_, t) pair with (s, t) for each s in `new_dependees`.
    pub fn replace_dependees<I, S>(&mut self, t: &str, new_dependees: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let new_set: HashSet<String> = new_dependees.into_iter().map(Into::into).collect();
        let old_set = swap_set(&mut self.dependees, t, new_set);
        self.relink(t, &old_set, Direction::Dependees);
    }

    /// Clears the entire dependency graph.
    pub fn clear(&mut self) {
        self.dependents.clear();
        self.dependees.clear();
        self.size = 0;
    }

    /// After `node`'s set in the `changed` index was swapped from `old_set`
    /// to its current contents, brings the opposite index back in line.
    fn relink(&mut self, node: &str, old_set: &HashSet<String>, changed: Direction) {
        let (forward, reverse) = match changed {
            Direction::Dependents => (&self.dependents, &mut self.dependees),
            Direction::Dependees => (&self.dependees, &mut self.dependents),
        };
        let empty = HashSet::new();
        let new_set = forward.get(node).unwrap_or(&empty);

        for lost in old_set.difference(new_set) {
            unlink(reverse, lost, node);
        }
        for gained in new_set.difference(old_set) {
            reverse
                .entry(gained.clone())
                .or_default()
                .insert(node.to_string());
        }

        self.size = self.size - old_set.len() + new_set.len();
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Dependents,
    Dependees,
}

/// Removes `value` from `index[key]`, dropping the entry if it empties.
/// Returns whether `value` was present.
fn unlink(index: &mut HashMap<String, HashSet<String>>, key: &str, value: &str) -> bool {
    let Some(set) = index.get_mut(key) else {
        return false;
    };
    let removed = set.remove(value);
    if set.is_empty() {
        index.remove(key);
    }
    removed
}

/// Installs `new_set` as `index[key]` and returns the previous set.
fn swap_set(
    index: &mut HashMap<String, HashSet<String>>,
    key: &str,
    new_set: HashSet<String>,
) -> HashSet<String> {
    if new_set.is_empty() {
        index.remove(key).unwrap_or_default()
    } else {
        index.insert(key.to_string(), new_set).unwrap_or_default()
    }
}
