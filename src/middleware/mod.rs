//! Cross-cutting concerns wrapped around rule actions

pub mod fields;
pub mod logging;

pub use fields::{FieldError, FieldRegistry};
pub use logging::{host_name, logged, ActionLogger};
