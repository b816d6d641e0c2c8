//! Business logic services

pub mod screening_service;

pub use screening_service::{ScreeningReport, ScreeningService};
