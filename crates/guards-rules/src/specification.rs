//! Core Specification trait and combinators.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Core specification trait for composable predicates.
///
/// A specification is a pure, synchronous predicate over a candidate value.
/// It has no error channel: a predicate that cannot decide must answer `false`.
pub trait Specification<T>: Send + Sync {
    /// Check if the specification is satisfied by the given candidate.
    fn is_satisfied_by(&self, candidate: &T) -> bool;

    /// Combine this specification with another using AND logic.
    fn and<S: Specification<T>>(self, other: S) -> And<Self, S>
    where
        Self: Sized,
    {
        And(self, other)
    }

    /// Combine this specification with another using OR logic.
    fn or<S: Specification<T>>(self, other: S) -> Or<Self, S>
    where
        Self: Sized,
    {
        Or(self, other)
    }

    /// Negate this specification.
    fn not(self) -> Not<Self>
    where
        Self: Sized,
    {
        Not(self)
    }
}

/// AND combinator for specifications.
#[derive(Clone)]
pub struct And<A, B>(pub A, pub B);

impl<T, A, B> Specification<T> for And<A, B>
where
    A: Specification<T>,
    B: Specification<T>,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.0.is_satisfied_by(candidate) && self.1.is_satisfied_by(candidate)
    }
}

/// OR combinator for specifications.
#[derive(Clone)]
pub struct Or<A, B>(pub A, pub B);

impl<T, A, B> Specification<T> for Or<A, B>
where
    A: Specification<T>,
    B: Specification<T>,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.0.is_satisfied_by(candidate) || self.1.is_satisfied_by(candidate)
    }
}

/// NOT combinator for specifications.
#[derive(Clone)]
pub struct Not<A>(pub A);

impl<T, A> Specification<T> for Not<A>
where
    A: Specification<T>,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        !self.0.is_satisfied_by(candidate)
    }
}

/// A specification that always returns true.
#[derive(Clone, Copy, Debug)]
pub struct AlwaysTrue;

impl<T> Specification<T> for AlwaysTrue {
    fn is_satisfied_by(&self, _candidate: &T) -> bool {
        true
    }
}

/// A specification that always returns false.
#[derive(Clone, Copy, Debug)]
pub struct AlwaysFalse;

impl<T> Specification<T> for AlwaysFalse {
    fn is_satisfied_by(&self, _candidate: &T) -> bool {
        false
    }
}

/// A boxed specification for dynamic dispatch.
pub type BoxedSpec<T> = Arc<dyn Specification<T>>;

impl<T> Specification<T> for BoxedSpec<T> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.as_ref().is_satisfied_by(candidate)
    }
}

/// Leaf specification backed by a caller-supplied closure.
pub struct Predicate<T, F> {
    callable: F,
    _phantom: PhantomData<fn(&T)>,
}

impl<T, F> Predicate<T, F>
where
    F: Fn(&T) -> bool + Send + Sync,
{
    pub fn new(callable: F) -> Self {
        Predicate {
            callable,
            _phantom: PhantomData,
        }
    }
}

impl<T, F> Specification<T> for Predicate<T, F>
where
    F: Fn(&T) -> bool + Send + Sync,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        (self.callable)(candidate)
    }
}

impl<T, F> fmt::Debug for Predicate<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate")
    }
}

/// Wrap a closure as a specification.
pub fn predicate<T, F>(callable: F) -> Predicate<T, F>
where
    F: Fn(&T) -> bool + Send + Sync,
{
    Predicate::new(callable)
}

/// Wrap a closure as a boxed specification.
pub fn boxed<T, F>(callable: F) -> BoxedSpec<T>
where
    T: 'static,
    F: Fn(&T) -> bool + Send + Sync + 'static,
{
    Arc::new(Predicate::new(callable))
}

/// Every member must be satisfied, checked left to right.
///
/// An empty conjunction is vacuously satisfied.
pub struct AndSpecification<T> {
    specs: Vec<BoxedSpec<T>>,
}

impl<T> Clone for AndSpecification<T> {
    fn clone(&self) -> Self {
        AndSpecification {
            specs: self.specs.clone(),
        }
    }
}

impl<T> AndSpecification<T> {
    pub fn new(specs: Vec<BoxedSpec<T>>) -> Self {
        AndSpecification { specs }
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl<T> Specification<T> for AndSpecification<T> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        for spec in &self.specs {
            if !spec.is_satisfied_by(candidate) {
                return false;
            }
        }
        true
    }
}

/// At least one member must be satisfied, checked left to right.
///
/// An empty disjunction is never satisfied.
pub struct OrSpecification<T> {
    specs: Vec<BoxedSpec<T>>,
}

impl<T> Clone for OrSpecification<T> {
    fn clone(&self) -> Self {
        OrSpecification {
            specs: self.specs.clone(),
        }
    }
}

impl<T> OrSpecification<T> {
    pub fn new(specs: Vec<BoxedSpec<T>>) -> Self {
        OrSpecification { specs }
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl<T> Specification<T> for OrSpecification<T> {
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        for spec in &self.specs {
            if spec.is_satisfied_by(candidate) {
                return true;
            }
        }
        false
    }
}

/// Negation of exactly one boxed specification.
pub type NotSpecification<T> = Not<BoxedSpec<T>>;

impl<T> NotSpecification<T> {
    pub fn new(spec: BoxedSpec<T>) -> Self {
        Not(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn spy(answer: bool, calls: &Arc<AtomicUsize>) -> BoxedSpec<i32> {
        let calls = Arc::clone(calls);
        boxed(move |_: &i32| {
            calls.fetch_add(1, Ordering::SeqCst);
            answer
        })
    }

    #[test]
    fn test_and_specification() {
        let spec = AndSpecification::new(vec![boxed(|n: &i32| *n > 0), boxed(|n: &i32| n % 2 == 0)]);
        assert!(spec.is_satisfied_by(&4));
        assert!(!spec.is_satisfied_by(&3));
        assert!(!spec.is_satisfied_by(&-2));
    }

    #[test]
    fn test_and_short_circuits_on_first_false() {
        let calls = Arc::new(AtomicUsize::new(0));
        let tail = Arc::new(AtomicUsize::new(0));
        let spec = AndSpecification::new(vec![
            spy(true, &calls),
            spy(false, &calls),
            spy(true, &tail),
        ]);

        assert!(!spec.is_satisfied_by(&0));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(tail.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_or_short_circuits_on_first_true() {
        let calls = Arc::new(AtomicUsize::new(0));
        let tail = Arc::new(AtomicUsize::new(0));
        let spec = OrSpecification::new(vec![
            spy(false, &calls),
            spy(true, &calls),
            spy(false, &tail),
        ]);

        assert!(spec.is_satisfied_by(&0));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(tail.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_empty_composites() {
        assert!(AndSpecification::<i32>::new(vec![]).is_satisfied_by(&1));
        assert!(!OrSpecification::<i32>::new(vec![]).is_satisfied_by(&1));
    }

    #[test]
    fn test_not_specification() {
        let spec = NotSpecification::<()>::new(Arc::new(AlwaysFalse));
        assert!(spec.is_satisfied_by(&()));

        let spec = NotSpecification::<()>::new(Arc::new(AlwaysTrue));
        assert!(!spec.is_satisfied_by(&()));
    }

    #[test]
    fn test_trait_combinators() {
        let positive = predicate(|n: &i32| *n > 0);
        let even = predicate(|n: &i32| n % 2 == 0);
        let spec = positive.and(even.not());
        assert!(spec.is_satisfied_by(&3));
        assert!(!spec.is_satisfied_by(&4));

        let spec = AlwaysFalse.or(predicate(|s: &&str| s.is_empty()));
        assert!(spec.is_satisfied_by(&""));
        assert!(!spec.is_satisfied_by(&"x"));
    }

    #[test]
    fn test_boxed_spec_is_shareable() {
        let spec: BoxedSpec<i32> = boxed(|n: &i32| *n > 10);
        let shared = Arc::clone(&spec);
        let handle = std::thread::spawn(move || shared.is_satisfied_by(&11));
        assert!(handle.join().unwrap());
        assert!(!spec.is_satisfied_by(&10));
    }
}
