//! The per-pass violation accumulator and its evaluation environment.

use chrono::{DateTime, Utc};

use super::violations::{Enforcement, Violation, ViolationMap};

/// Default number of iteration indices listed before the rest are
/// summarised as omitted.
pub const DEFAULT_ITERATION_LIMIT: usize = 10;

/// Inputs every validation pass shares: the evaluation clock and the
/// iteration tag threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationEnv {
    /// Time against which "not in the future" rules are checked.
    pub now: DateTime<Utc>,
    /// Maximum number of indices listed in an iteration tag.
    pub iteration_limit: usize,
}

impl ValidationEnv {
    /// Creates an environment evaluating at `now` with the default
    /// iteration limit.
    #[must_use]
    pub const fn at(now: DateTime<Utc>) -> Self {
        Self {
            now,
            iteration_limit: DEFAULT_ITERATION_LIMIT,
        }
    }

    /// Returns a copy with a different iteration limit (clamped to >= 1).
    #[must_use]
    pub fn with_iteration_limit(self, iteration_limit: usize) -> Self {
        Self {
            iteration_limit: iteration_limit.max(1),
            ..self
        }
    }
}

impl Default for ValidationEnv {
    fn default() -> Self {
        Self::at(Utc::now())
    }
}

/// Collects every violation raised during one validation pass.
///
/// Recording never fails. The owning evaluator decides what to do with the
/// collected violations once the pass is over.
#[derive(Debug, Clone)]
pub struct Accumulator {
    env: ValidationEnv,
    violations: ViolationMap,
}

impl Accumulator {
    /// Creates an empty accumulator for one pass.
    #[must_use]
    pub fn new(env: ValidationEnv) -> Self {
        Self {
            env,
            violations: ViolationMap::new(),
        }
    }

    /// The environment this pass evaluates under.
    #[must_use]
    pub const fn env(&self) -> &ValidationEnv {
        &self.env
    }

    /// Shorthand for `self.env().now`.
    #[must_use]
    pub const fn now(&self) -> DateTime<Utc> {
        self.env.now
    }

    /// Records the violation of `enforcement` if its rule failed.
    pub fn require(&mut self, enforcement: Enforcement) {
        if !enforcement.rule {
            self.violations.record(enforcement.violation);
        }
    }

    /// Records every failed enforcement in order.
    pub fn require_all(&mut self, enforcements: impl IntoIterator<Item = Enforcement>) {
        for enforcement in enforcements {
            self.require(enforcement);
        }
    }

    /// Records `violation` unconditionally.
    pub fn violation(&mut self, violation: impl Into<Violation>) {
        self.violations.record(violation);
    }

    /// Adds `count` occurrences of an already-formed violation.
    pub(crate) fn add(&mut self, violation: impl Into<Violation>, count: usize) {
        self.violations.add(violation, count);
    }

    /// Total occurrences recorded so far.
    ///
    /// Recording only ever grows this number, so comparing it before and
    /// after a block tells whether that block failed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.violations.total()
    }

    /// True when nothing has been recorded yet.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// The violations recorded so far.
    #[must_use]
    pub const fn violations(&self) -> &ViolationMap {
        &self.violations
    }

    /// Consumes the accumulator, returning its violations.
    #[must_use]
    pub fn into_violations(self) -> ViolationMap {
        self.violations
    }
}
