//! Ordered rule registries folded into one chain per application.

use std::sync::Arc;

use tracing::debug;

use crate::error::{GuardError, GuardResult};
use crate::rule::{BatchReport, BoxedRule, CombinedRule, Rule};

/// A mutable, ordered registry of rules.
///
/// Every `apply_rules`/`batch_apply_rules` call folds the rules registered at
/// that moment into a single [`CombinedRule`] and discards it afterwards.
/// A policy is not meant to be mutated while it is being applied from another
/// thread; take a [`Policy::snapshot`] and share that instead.
pub struct Policy<T, R> {
    rules: Vec<BoxedRule<T, R>>,
}

impl<T: 'static, R: 'static> Default for Policy<T, R> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: 'static, R: 'static> Policy<T, R> {
    pub fn new(rules: Vec<BoxedRule<T, R>>) -> Self {
        Self { rules }
    }

    /// Append a rule; application order is registration order.
    pub fn add_rule(&mut self, rule: BoxedRule<T, R>) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Fold the current rules left to right into one chain.
    pub fn snapshot(&self) -> GuardResult<CombinedRule<T, R>> {
        let (first, rest) = self
            .rules
            .split_first()
            .ok_or(GuardError::NoRulesRegistered)?;

        let combined = rest
            .iter()
            .fold(first.combine(Vec::new()), |chain, rule| {
                chain.combine(vec![Arc::clone(rule)])
            });
        Ok(combined)
    }

    /// Apply every registered rule to `target`; the result is the last rule's.
    pub fn apply_rules(&self, target: &T) -> GuardResult<R> {
        let combined = self.snapshot()?;
        debug!(rules = combined.len(), "Applying policy");
        combined.apply(target)
    }

    /// Apply every registered rule to each target independently.
    ///
    /// An empty policy fails the whole call rather than every target.
    pub fn batch_apply_rules(&self, targets: &[T]) -> GuardResult<BatchReport<R>> {
        let combined = self.snapshot()?;
        debug!(
            rules = combined.len(),
            targets = targets.len(),
            "Applying policy to batch"
        );
        Ok(combined.batch_apply(targets))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::GuardedRule;
    use crate::specification::{boxed, AlwaysTrue};

    fn constant(value: &'static str) -> BoxedRule<i32, String> {
        Arc::new(GuardedRule::<i32, String>::new(Arc::new(AlwaysTrue), move |_: &i32| {
            Ok(value.to_string())
        }))
    }

    fn positive_guard() -> BoxedRule<i32, String> {
        Arc::new(GuardedRule::new(boxed(|n: &i32| *n > 0), |_: &i32| {
            Ok("positive".to_string())
        }))
    }

    #[test]
    fn test_apply_rules_empty() {
        let policy: Policy<i32, String> = Policy::default();
        assert!(matches!(policy.apply_rules(&1), Err(GuardError::NoRulesRegistered)));
    }

    #[test]
    fn test_batch_apply_rules_empty() {
        let policy: Policy<i32, String> = Policy::new(vec![]);
        let err = policy.batch_apply_rules(&[1, 2, 3]).err().unwrap();
        assert!(matches!(err, GuardError::NoRulesRegistered));
    }

    #[test]
    fn test_single_rule() {
        let policy = Policy::new(vec![constant("only")]);
        assert_eq!(policy.apply_rules(&0).unwrap(), "only");
    }

    #[test]
    fn test_apply_rules_returns_last_result() {
        let mut policy = Policy::new(vec![positive_guard()]);
        policy.add_rule(constant("r2"));
        policy.add_rule(constant("r3"));

        assert_eq!(policy.len(), 3);
        assert_eq!(policy.apply_rules(&4).unwrap(), "r3");
        assert!(matches!(
            policy.apply_rules(&-4),
            Err(GuardError::SpecificationNotSatisfied { .. })
        ));
    }

    #[test]
    fn test_apply_rules_is_repeatable() {
        let policy = Policy::new(vec![constant("r1"), constant("r2")]);
        let first = policy.apply_rules(&9).unwrap();
        let second = policy.apply_rules(&9).unwrap();
        assert_eq!(first, second);
        assert_eq!(policy.len(), 2);
    }

    #[test]
    fn test_rules_added_after_apply_are_used() {
        let mut policy = Policy::new(vec![constant("r1")]);
        assert_eq!(policy.apply_rules(&0).unwrap(), "r1");

        policy.add_rule(constant("r2"));
        assert_eq!(policy.apply_rules(&0).unwrap(), "r2");
    }

    #[test]
    fn test_batch_apply_rules() {
        let policy = Policy::new(vec![positive_guard(), constant("done")]);
        let report = policy.batch_apply_rules(&[3, -1, 0, 8]).unwrap();

        assert_eq!(report.len(), 4);
        let indexes: Vec<usize> = report.successes().map(|(i, _)| i).collect();
        assert_eq!(indexes, vec![0, 3]);
        let indexes: Vec<usize> = report.failures().map(|(i, _)| i).collect();
        assert_eq!(indexes, vec![1, 2]);
    }

    #[test]
    fn test_rule_shared_between_policies() {
        let shared = constant("shared");
        let first = Policy::new(vec![Arc::clone(&shared)]);
        let second = Policy::new(vec![positive_guard(), Arc::clone(&shared)]);

        assert_eq!(first.apply_rules(&-1).unwrap(), "shared");
        assert!(second.apply_rules(&-1).is_err());
        assert_eq!(second.apply_rules(&1).unwrap(), "shared");
    }

    #[test]
    fn test_snapshot_used_across_threads() {
        let policy = Policy::new(vec![positive_guard(), constant("ok")]);
        let snapshot = Arc::new(policy.snapshot().unwrap());

        let handles: Vec<_> = (1..=4)
            .map(|n| {
                let chain = Arc::clone(&snapshot);
                std::thread::spawn(move || chain.apply(&n).unwrap())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), "ok");
        }
    }
}
