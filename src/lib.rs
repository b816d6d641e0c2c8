//! Guards - applicant screening built on composable specifications
//!
//! This library wires the `guards-rules` engine into a small screening
//! service: applicants are checked against an eligibility specification and
//! run through a hiring policy that produces an offer for each one accepted.
//!
//! # Architecture
//!
//! - **Specs**: applicant leaf specifications and the rule-file registry
//! - **Services**: loading eligibility and applicants, running the policy
//! - **Middleware**: logging decorator for rule actions
//! - **Models**: domain models

pub mod config;
pub mod constants;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod specs;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
