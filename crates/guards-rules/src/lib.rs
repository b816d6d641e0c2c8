//! Specification pattern, guarded rules and rule policies.
//!
//! This crate composes boolean predicates ("specifications") over any
//! candidate type, guards actions behind them ("rules"), chains rules into
//! ordered pipelines and applies them to one or many candidates ("policies").
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use guards_rules::prelude::*;
//!
//! let eligible = SpecificationBuilder::new()
//!     .with_specification(boxed(|n: &i32| *n > 0))
//!     .and(boxed(|n: &i32| n % 2 == 0))
//!     .build()
//!     .unwrap();
//!
//! let rule = GuardedRule::new(eligible, |n: &i32| Ok(format!("accepted {}", n)));
//! let policy = Policy::new(vec![Arc::new(rule) as BoxedRule<i32, String>]);
//!
//! assert_eq!(policy.apply_rules(&4).unwrap(), "accepted 4");
//! assert!(policy.apply_rules(&3).is_err());
//!
//! let report = policy.batch_apply_rules(&[1, 2, 3]).unwrap();
//! assert_eq!(report.len(), 3);
//! assert_eq!(report.success_count(), 1);
//! ```
//!
//! Everything here is synchronous and evaluates on the caller's thread.
//! Built specifications, rules and chains are immutable and can be shared
//! across threads; `SpecificationBuilder` and `Policy` are single-owner.

pub mod builder;
pub mod config;
pub mod error;
pub mod policy;
pub mod registry;
pub mod rule;
pub mod specification;

pub use error::{GuardError, GuardResult};

/// Prelude module - import everything you need with `use guards_rules::prelude::*`
pub mod prelude {
    pub use crate::builder::SpecificationBuilder;
    pub use crate::config::{NamedRuleConfig, RuleConfig};
    pub use crate::error::{GuardError, GuardResult};
    pub use crate::policy::Policy;
    pub use crate::registry::SpecRegistry;
    pub use crate::rule::{
        Action, BatchOutcome, BatchReport, BoxedRule, CombinedRule, GuardedRule, Rule,
    };
    pub use crate::specification::{
        boxed, predicate, AlwaysFalse, AlwaysTrue, And, AndSpecification, BoxedSpec, Not,
        NotSpecification, Or, OrSpecification, Predicate, Specification,
    };
}
