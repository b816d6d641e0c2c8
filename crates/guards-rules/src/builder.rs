//! Fluent accumulator that composes one root specification.

use std::sync::Arc;

use crate::error::{GuardError, GuardResult};
use crate::specification::{AndSpecification, BoxedSpec, NotSpecification, OrSpecification};

/// Incrementally composes a single root specification.
///
/// Every combinator re-wraps the current root in a new composite; existing
/// composites are never mutated. The builder is single-owner state: `build`
/// hands out the current root without resetting it, so later calls keep
/// accumulating on top of what was built.
///
/// Composing before a root exists is reported by `build` as
/// [`GuardError::MissingRoot`], and building with nothing set as
/// [`GuardError::EmptySpecification`].
pub struct SpecificationBuilder<T> {
    root: Root<T>,
}

enum Root<T> {
    Empty,
    Missing(&'static str),
    Set(BoxedSpec<T>),
}

impl<T: 'static> Default for SpecificationBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> SpecificationBuilder<T> {
    pub fn new() -> Self {
        Self { root: Root::Empty }
    }

    /// Replace the root unconditionally, discarding whatever came before.
    pub fn with_specification(&mut self, spec: BoxedSpec<T>) -> &mut Self {
        self.root = Root::Set(spec);
        self
    }

    /// root = root AND spec
    pub fn and(&mut self, spec: BoxedSpec<T>) -> &mut Self {
        self.wrap("and", |root| Arc::new(AndSpecification::new(vec![root, spec])))
    }

    /// root = root OR spec
    pub fn or(&mut self, spec: BoxedSpec<T>) -> &mut Self {
        self.wrap("or", |root| Arc::new(OrSpecification::new(vec![root, spec])))
    }

    /// root = NOT root
    pub fn not(&mut self) -> &mut Self {
        self.wrap("not", |root| Arc::new(NotSpecification::new(root)))
    }

    /// Return the current root.
    pub fn build(&self) -> GuardResult<BoxedSpec<T>> {
        match &self.root {
            Root::Set(spec) => Ok(Arc::clone(spec)),
            Root::Missing(operation) => Err(GuardError::MissingRoot {
                operation: *operation,
            }),
            Root::Empty => Err(GuardError::EmptySpecification),
        }
    }

    fn wrap<F>(&mut self, operation: &'static str, compose: F) -> &mut Self
    where
        F: FnOnce(BoxedSpec<T>) -> BoxedSpec<T>,
    {
        self.root = match std::mem::replace(&mut self.root, Root::Empty) {
            Root::Set(root) => Root::Set(compose(root)),
            Root::Empty => Root::Missing(operation),
            // keep the first offending operation
            missing @ Root::Missing(_) => missing,
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specification::{boxed, AlwaysFalse, AlwaysTrue, Specification};

    fn positive() -> BoxedSpec<i32> {
        boxed(|n: &i32| *n > 0)
    }

    fn even() -> BoxedSpec<i32> {
        boxed(|n: &i32| n % 2 == 0)
    }

    #[test]
    fn test_with_specification() {
        let spec = SpecificationBuilder::new()
            .with_specification(positive())
            .build()
            .unwrap();
        assert!(spec.is_satisfied_by(&1));
        assert!(!spec.is_satisfied_by(&-1));
    }

    #[test]
    fn test_with_specification_discards_prior_root() {
        let mut builder = SpecificationBuilder::new();
        builder.with_specification(positive()).and(even());
        builder.with_specification(Arc::new(AlwaysFalse));

        let spec = builder.build().unwrap();
        assert!(!spec.is_satisfied_by(&2));
    }

    #[test]
    fn test_and_matches_and_specification() {
        let built = SpecificationBuilder::new()
            .with_specification(positive())
            .and(even())
            .build()
            .unwrap();
        let direct = AndSpecification::new(vec![positive(), even()]);

        for n in -4..=4 {
            assert_eq!(built.is_satisfied_by(&n), direct.is_satisfied_by(&n), "n = {}", n);
        }
    }

    #[test]
    fn test_or() {
        let spec = SpecificationBuilder::new()
            .with_specification(positive())
            .or(even())
            .build()
            .unwrap();
        assert!(spec.is_satisfied_by(&-2));
        assert!(spec.is_satisfied_by(&3));
        assert!(!spec.is_satisfied_by(&-3));
    }

    #[test]
    fn test_not_wraps_whole_root() {
        // NOT (positive AND even)
        let spec = SpecificationBuilder::new()
            .with_specification(positive())
            .and(even())
            .not()
            .build()
            .unwrap();
        assert!(!spec.is_satisfied_by(&2));
        assert!(spec.is_satisfied_by(&3));
        assert!(spec.is_satisfied_by(&-2));
    }

    #[test]
    fn test_left_nested_composition() {
        // ((positive AND even) OR negative)
        let spec = SpecificationBuilder::new()
            .with_specification(positive())
            .and(even())
            .or(boxed(|n: &i32| *n < 0))
            .build()
            .unwrap();
        assert!(spec.is_satisfied_by(&4));
        assert!(spec.is_satisfied_by(&-3));
        assert!(!spec.is_satisfied_by(&3));
        assert!(!spec.is_satisfied_by(&0));
    }

    #[test]
    fn test_build_keeps_accumulating() {
        let mut builder = SpecificationBuilder::<i32>::new();
        builder.with_specification(Arc::new(AlwaysTrue));
        let first = builder.build().unwrap();

        builder.not();
        let second = builder.build().unwrap();

        assert!(first.is_satisfied_by(&0));
        assert!(!second.is_satisfied_by(&0));
    }

    #[test]
    fn test_build_empty() {
        let err = SpecificationBuilder::<i32>::new().build().err().unwrap();
        assert!(matches!(err, GuardError::EmptySpecification));
    }

    #[test]
    fn test_combinator_before_root() {
        let err = SpecificationBuilder::new()
            .and(positive())
            .or(even())
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, GuardError::MissingRoot { operation: "and" }));
    }

    #[test]
    fn test_with_specification_recovers_missing_root() {
        let mut builder = SpecificationBuilder::new();
        builder.not();
        assert!(builder.build().is_err());

        builder.with_specification(positive());
        assert!(builder.build().unwrap().is_satisfied_by(&5));
    }
}
