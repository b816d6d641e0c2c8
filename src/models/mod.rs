//! Domain models

pub mod applicant;

pub use applicant::*;
