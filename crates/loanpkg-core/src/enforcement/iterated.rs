//! Per-element validation over sequences.
//!
//! Each element is validated on its own scoped accumulator. Violations with
//! the same text are then grouped across elements and tagged with the
//! 0-based positions that produced them, e.g. `"Missing URI [Iteration 0, 3]"`.
//! Positions beyond the environment's iteration limit are summarised as
//! `"(N more omitted)"`.

use std::collections::HashMap;

use super::accumulator::Accumulator;
use super::violations::Violation;

struct Group {
    violation: Violation,
    indices: Vec<usize>,
    count: usize,
}

impl Accumulator {
    /// Validates every element of `items` with `body`, then records grouped,
    /// position-tagged violations on this accumulator.
    pub fn require_each<I, F>(&mut self, items: I, mut body: F)
    where
        I: IntoIterator,
        F: FnMut(&mut Self, I::Item),
    {
        let mut groups: Vec<Group> = Vec::new();
        let mut slots: HashMap<Violation, usize> = HashMap::new();

        for (index, item) in items.into_iter().enumerate() {
            let mut scoped = Self::new(*self.env());
            body(&mut scoped, item);
            for (violation, count) in scoped.into_violations().into_entries() {
                if let Some(&slot) = slots.get(&violation) {
                    groups[slot].indices.push(index);
                    groups[slot].count += count;
                } else {
                    slots.insert(violation.clone(), groups.len());
                    groups.push(Group {
                        violation,
                        indices: vec![index],
                        count,
                    });
                }
            }
        }

        let limit = self.env().iteration_limit;
        for group in groups {
            self.add(
                tag_iterations(&group.violation, &group.indices, limit),
                group.count,
            );
        }
    }
}

/// Appends the iteration tag for `indices` to `violation`.
#[must_use]
pub fn tag_iterations(violation: &str, indices: &[usize], limit: usize) -> String {
    let limit = limit.max(1);
    let listed = indices
        .iter()
        .take(limit)
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let omitted = indices.len().saturating_sub(limit);
    if omitted > 0 {
        format!("{violation} [Iteration {listed}] ({omitted} more omitted)")
    } else {
        format!("{violation} [Iteration {listed}]")
    }
}
