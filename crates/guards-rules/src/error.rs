//! Error types for specification, rule and policy evaluation.

use thiserror::Error;

/// Failure raised while building or applying specifications, rules and policies.
#[derive(Error, Debug)]
pub enum GuardError {
    /// The rule's guard rejected the candidate; the action was not invoked.
    #[error("specification not satisfied by {candidate}")]
    SpecificationNotSatisfied { candidate: String },

    /// The guard passed but the action itself failed.
    #[error("action failed: {0}")]
    ActionFailed(#[source] anyhow::Error),

    /// A policy was applied while holding no rules.
    #[error("no rules to apply")]
    NoRulesRegistered,

    /// `build` was called on a builder that never received a specification.
    #[error("specification builder has no root specification")]
    EmptySpecification,

    /// A combinator was applied to the builder before `with_specification`.
    #[error("`{operation}` applied before a root specification was set")]
    MissingRoot { operation: &'static str },

    // Registry errors
    #[error("unknown specification: {0}")]
    UnknownSpecification(String),

    #[error("invalid parameters for specification '{0}'")]
    InvalidParameters(String),

    #[error("empty {0} rule list")]
    EmptyComposite(&'static str),

    #[error("specification '{0}' is already registered")]
    DuplicateSpecification(String),
}

impl GuardError {
    /// Build a `SpecificationNotSatisfied` from any debuggable candidate.
    pub fn not_satisfied<T: std::fmt::Debug + ?Sized>(candidate: &T) -> Self {
        GuardError::SpecificationNotSatisfied {
            candidate: format!("{:?}", candidate),
        }
    }

    /// Returns the error code string for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            GuardError::SpecificationNotSatisfied { .. } => "SPECIFICATION_NOT_SATISFIED",
            GuardError::ActionFailed(_) => "ACTION_FAILED",
            GuardError::NoRulesRegistered => "NO_RULES_REGISTERED",
            GuardError::EmptySpecification => "EMPTY_SPECIFICATION",
            GuardError::MissingRoot { .. } => "MISSING_ROOT",
            GuardError::UnknownSpecification(_) => "UNKNOWN_SPECIFICATION",
            GuardError::InvalidParameters(_) => "INVALID_PARAMETERS",
            GuardError::EmptyComposite(_) => "EMPTY_COMPOSITE",
            GuardError::DuplicateSpecification(_) => "DUPLICATE_SPECIFICATION",
        }
    }
}

/// Result type alias using GuardError
pub type GuardResult<T> = Result<T, GuardError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_not_satisfied_renders_candidate() {
        let err = GuardError::not_satisfied(&42);
        assert_eq!(err.to_string(), "specification not satisfied by 42");
        assert_eq!(err.error_code(), "SPECIFICATION_NOT_SATISFIED");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_action_failed_keeps_source() {
        let err = GuardError::ActionFailed(anyhow::anyhow!("disk full"));
        assert_eq!(err.to_string(), "action failed: disk full");
        assert!(err.source().is_some());
    }
}
