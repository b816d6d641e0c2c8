//! Guarded rules and rule chains.
//!
//! A [`GuardedRule`] pairs a specification with an action that only runs when
//! the specification is satisfied. Rules combine into a [`CombinedRule`]: an
//! ordered chain where every member must pass, whose result is the result of
//! the last member.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::{GuardError, GuardResult};
use crate::specification::{BoxedSpec, Specification};

/// Action invoked by a rule once its specification is satisfied.
pub type Action<T, R> = Arc<dyn Fn(&T) -> anyhow::Result<R> + Send + Sync>;

/// A boxed rule for dynamic dispatch.
pub type BoxedRule<T, R> = Arc<dyn Rule<T, R>>;

/// A specification-guarded action, composable into ordered chains.
pub trait Rule<T, R>: Send + Sync {
    /// Apply the rule to one target.
    fn apply(&self, target: &T) -> GuardResult<R>;

    /// Build a new chain running `self` followed by `others`, in order.
    ///
    /// The receiver is never modified.
    fn combine(&self, others: Vec<BoxedRule<T, R>>) -> CombinedRule<T, R>;

    /// Apply the rule to every target independently, in input order.
    fn batch_apply(&self, targets: &[T]) -> BatchReport<R> {
        let outcomes = targets
            .iter()
            .enumerate()
            .map(|(index, target)| BatchOutcome {
                index,
                result: self.apply(target),
            })
            .collect();
        BatchReport { outcomes }
    }
}

/// A single rule: specification plus action.
pub struct GuardedRule<T, R> {
    specification: BoxedSpec<T>,
    action: Action<T, R>,
}

impl<T, R> GuardedRule<T, R> {
    pub fn new<F>(specification: BoxedSpec<T>, action: F) -> Self
    where
        F: Fn(&T) -> anyhow::Result<R> + Send + Sync + 'static,
    {
        Self {
            specification,
            action: Arc::new(action),
        }
    }

    /// Build a rule around an already shared action.
    pub fn with_action(specification: BoxedSpec<T>, action: Action<T, R>) -> Self {
        Self {
            specification,
            action,
        }
    }

    pub fn specification(&self) -> &BoxedSpec<T> {
        &self.specification
    }
}

impl<T, R> Clone for GuardedRule<T, R> {
    fn clone(&self) -> Self {
        Self {
            specification: Arc::clone(&self.specification),
            action: Arc::clone(&self.action),
        }
    }
}

impl<T, R> Rule<T, R> for GuardedRule<T, R>
where
    T: fmt::Debug + 'static,
    R: 'static,
{
    fn apply(&self, target: &T) -> GuardResult<R> {
        if !self.specification.is_satisfied_by(target) {
            debug!(candidate = ?target, "Specification not satisfied, action skipped");
            return Err(GuardError::not_satisfied(target));
        }

        (self.action)(target).map_err(|err| {
            debug!(candidate = ?target, error = %err, "Rule action failed");
            GuardError::ActionFailed(err)
        })
    }

    fn combine(&self, others: Vec<BoxedRule<T, R>>) -> CombinedRule<T, R> {
        let mut rules: Vec<BoxedRule<T, R>> = Vec::with_capacity(others.len() + 1);
        rules.push(Arc::new(self.clone()));
        rules.extend(others);
        CombinedRule { rules }
    }
}

/// An ordered chain of rules evaluated as one unit.
///
/// Members run in sequence; the first failure stops the chain and is
/// returned as is. On full success the result of the last member is
/// returned and earlier results are discarded.
pub struct CombinedRule<T, R> {
    rules: Vec<BoxedRule<T, R>>,
}

impl<T, R> CombinedRule<T, R> {
    pub fn new(rules: Vec<BoxedRule<T, R>>) -> Self {
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<T, R> Clone for CombinedRule<T, R> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
        }
    }
}

impl<T, R> Rule<T, R> for CombinedRule<T, R>
where
    T: 'static,
    R: 'static,
{
    /// An empty chain has no member to produce a result and is reported as
    /// [`GuardError::NoRulesRegistered`].
    fn apply(&self, target: &T) -> GuardResult<R> {
        let mut last = Err(GuardError::NoRulesRegistered);
        for (position, rule) in self.rules.iter().enumerate() {
            match rule.apply(target) {
                Ok(result) => last = Ok(result),
                Err(err) => {
                    debug!(position, code = err.error_code(), "Rule chain stopped");
                    return Err(err);
                }
            }
        }
        last
    }

    fn combine(&self, others: Vec<BoxedRule<T, R>>) -> CombinedRule<T, R> {
        let mut rules = Vec::with_capacity(self.rules.len() + others.len());
        rules.extend(self.rules.iter().cloned());
        rules.extend(others);
        CombinedRule { rules }
    }
}

/// Outcome of applying a rule to one target of a batch.
#[derive(Debug)]
pub struct BatchOutcome<R> {
    /// Position of the target in the input slice.
    pub index: usize,
    pub result: GuardResult<R>,
}

impl<R> BatchOutcome<R> {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// One outcome per target, in input order.
#[derive(Debug)]
pub struct BatchReport<R> {
    outcomes: Vec<BatchOutcome<R>>,
}

impl<R> BatchReport<R> {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn outcomes(&self) -> &[BatchOutcome<R>] {
        &self.outcomes
    }

    pub fn get(&self, index: usize) -> Option<&BatchOutcome<R>> {
        self.outcomes.get(index)
    }

    /// Successful results with the index of their originating target.
    pub fn successes(&self) -> impl Iterator<Item = (usize, &R)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(|r| (o.index, r)))
    }

    /// Failures with the index of their originating target.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &GuardError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.index, e)))
    }

    pub fn success_count(&self) -> usize {
        self.successes().count()
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }
}

impl<R> IntoIterator for BatchReport<R> {
    type Item = BatchOutcome<R>;
    type IntoIter = std::vec::IntoIter<BatchOutcome<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.into_iter()
    }
}
