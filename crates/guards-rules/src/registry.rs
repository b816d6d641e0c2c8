//! SpecRegistry for building specifications from configuration.

use crate::config::RuleConfig;
use crate::error::{GuardError, GuardResult};
use crate::specification::{AndSpecification, BoxedSpec, NotSpecification, OrSpecification};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Factory function type for creating specifications from parameters.
pub type SpecFactory<T> = Arc<dyn Fn(&HashMap<String, Value>) -> Option<BoxedSpec<T>> + Send + Sync>;

/// Registry for dynamically building specifications from configuration.
///
/// The registry maps specification names to factory functions that create
/// instances from optional parameters. It is populated once, up front;
/// registering a name twice is an error.
///
/// # Example
///
/// ```
/// use guards_rules::prelude::*;
///
/// let mut registry = SpecRegistry::<i32>::new();
/// registry
///     .register("Above", |params| {
///         let limit = params.get("limit")?.as_i64()?;
///         Some(boxed(move |n: &i32| i64::from(*n) > limit))
///     })
///     .unwrap();
/// registry.register("Even", |_| Some(boxed(|n: &i32| n % 2 == 0))).unwrap();
///
/// let config = RuleConfig::from_json(
///     r#"{"type": "and", "rules": [
///         {"type": "spec", "name": "Above", "params": {"limit": 10}},
///         {"type": "spec", "name": "Even"}
///     ]}"#,
/// )
/// .unwrap();
/// let spec = registry.build(&config).unwrap();
/// assert!(spec.is_satisfied_by(&12));
/// assert!(!spec.is_satisfied_by(&11));
/// ```
pub struct SpecRegistry<T: 'static> {
    factories: HashMap<String, SpecFactory<T>>,
}

impl<T: 'static> Default for SpecRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> SpecRegistry<T> {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a specification factory.
    ///
    /// The factory returns `None` when the parameters are invalid.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> GuardResult<()>
    where
        F: Fn(&HashMap<String, Value>) -> Option<BoxedSpec<T>> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.factories.contains_key(&name) {
            return Err(GuardError::DuplicateSpecification(name));
        }
        self.factories.insert(name, Arc::new(factory));
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// List all registered specification names, sorted.
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Create a specification by name with parameters.
    pub fn create(&self, name: &str, params: &HashMap<String, Value>) -> GuardResult<BoxedSpec<T>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| GuardError::UnknownSpecification(name.to_string()))?;
        factory(params).ok_or_else(|| GuardError::InvalidParameters(name.to_string()))
    }

    /// Build a specification tree from a RuleConfig.
    ///
    /// Empty AND/OR lists are rejected even though they have a defined
    /// meaning, since in configuration they are almost always a mistake.
    pub fn build(&self, config: &RuleConfig) -> GuardResult<BoxedSpec<T>> {
        match config {
            RuleConfig::Spec { name, params } => self.create(name, params),
            RuleConfig::And { rules } => {
                let specs = self.build_all(rules, "and")?;
                Ok(Arc::new(AndSpecification::new(specs)))
            }
            RuleConfig::Or { rules } => {
                let specs = self.build_all(rules, "or")?;
                Ok(Arc::new(OrSpecification::new(specs)))
            }
            RuleConfig::Not { rule } => {
                let inner = self.build(rule)?;
                Ok(Arc::new(NotSpecification::new(inner)))
            }
        }
    }

    fn build_all(&self, rules: &[RuleConfig], kind: &'static str) -> GuardResult<Vec<BoxedSpec<T>>> {
        if rules.is_empty() {
            return Err(GuardError::EmptyComposite(kind));
        }
        rules.iter().map(|r| self.build(r)).collect()
    }

    /// Validate a RuleConfig without building it.
    ///
    /// Returns every problem found, not just the first.
    pub fn validate(&self, config: &RuleConfig) -> Vec<GuardError> {
        let mut errors = Vec::new();
        self.validate_recursive(config, &mut errors);
        errors
    }

    fn validate_recursive(&self, config: &RuleConfig, errors: &mut Vec<GuardError>) {
        match config {
            RuleConfig::Spec { name, params } => {
                if let Err(err) = self.create(name, params) {
                    errors.push(err);
                }
            }
            RuleConfig::And { rules } | RuleConfig::Or { rules } => {
                if rules.is_empty() {
                    let kind = if matches!(config, RuleConfig::And { .. }) { "and" } else { "or" };
                    errors.push(GuardError::EmptyComposite(kind));
                }
                for rule in rules {
                    self.validate_recursive(rule, errors);
                }
            }
            RuleConfig::Not { rule } => {
                self.validate_recursive(rule, errors);
            }
        }
    }
}
