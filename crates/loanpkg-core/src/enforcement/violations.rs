//! Violations, enforcements and the ordered violation map.

use std::collections::HashMap;

/// Separator placed between distinct violations in a summary.
pub const SUMMARY_SEPARATOR: &str = "; ";

/// A human-readable description of one failed rule.
///
/// Equal strings are the same violation for counting purposes.
pub type Violation = String;

/// A rule outcome paired with the violation to report when it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enforcement {
    /// Whether the rule held.
    pub rule: bool,
    /// Reported when `rule` is false.
    pub violation: Violation,
}

impl Enforcement {
    /// Creates an enforcement from a rule outcome and its violation.
    #[must_use]
    pub fn new(rule: bool, violation: impl Into<Violation>) -> Self {
        Self {
            rule,
            violation: violation.into(),
        }
    }
}

/// Builds enforcements inline at the call site.
///
/// ```rust
/// use loanpkg_core::enforcement::OrError;
///
/// let check = "".is_empty().or_error("value must be empty");
/// assert!(check.rule);
/// ```
pub trait OrError {
    /// Pairs this rule outcome with the violation to report on failure.
    fn or_error(self, violation: impl Into<Violation>) -> Enforcement;
}

impl OrError for bool {
    fn or_error(self, violation: impl Into<Violation>) -> Enforcement {
        Enforcement::new(self, violation)
    }
}

/// Insertion-ordered map from violation to occurrence count.
///
/// Every stored count is at least one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViolationMap {
    entries: Vec<(Violation, usize)>,
    positions: HashMap<Violation, usize>,
}

impl ViolationMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence of `violation`.
    pub fn record(&mut self, violation: impl Into<Violation>) {
        self.add(violation, 1);
    }

    /// Adds `count` occurrences of `violation`. A zero count is ignored.
    pub fn add(&mut self, violation: impl Into<Violation>, count: usize) {
        if count == 0 {
            return;
        }
        let violation = violation.into();
        if let Some(&slot) = self.positions.get(&violation) {
            self.entries[slot].1 += count;
        } else {
            self.positions.insert(violation.clone(), self.entries.len());
            self.entries.push((violation, count));
        }
    }

    /// Folds every entry of `other` into this map, keeping this map's order
    /// for messages already present.
    pub fn merge(&mut self, other: Self) {
        for (violation, count) in other.entries {
            self.add(violation, count);
        }
    }

    /// Returns true when no violation was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Sum of all occurrence counts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Occurrence count for `violation`, if it was recorded.
    #[must_use]
    pub fn count(&self, violation: &str) -> Option<usize> {
        self.positions.get(violation).map(|&slot| self.entries[slot].1)
    }

    /// Iterates entries in the order they were first recorded.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries
            .iter()
            .map(|(violation, count)| (violation.as_str(), *count))
    }

    /// Consumes the map, yielding entries in recording order.
    #[must_use]
    pub fn into_entries(self) -> Vec<(Violation, usize)> {
        self.entries
    }

    /// Joins distinct violations for an error report.
    ///
    /// Repeated violations carry an `(N occurrences)` suffix.
    #[must_use]
    pub fn summary(&self) -> String {
        self.entries
            .iter()
            .map(|(violation, count)| {
                if *count > 1 {
                    format!("{violation} ({count} occurrences)")
                } else {
                    violation.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(SUMMARY_SEPARATOR)
    }
}

impl FromIterator<Violation> for ViolationMap {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        let mut map = Self::new();
        for violation in iter {
            map.record(violation);
        }
        map
    }
}
