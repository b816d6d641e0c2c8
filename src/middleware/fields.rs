//! Candidate fields attached to decorated action logs.
//!
//! A [`FieldRegistry`] maps a log key to an extractor reading that value
//! from the candidate. It is filled in once during start-up and then shared
//! read-only with the loggers that need it.

use std::fmt::Write as _;
use std::sync::Arc;

/// Reads one log value from a candidate; `None` omits the field.
pub type FieldExtractor<T> = Arc<dyn Fn(&T) -> Option<String> + Send + Sync>;

/// Log field registration errors
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    #[error("log field '{0}' is already registered")]
    Duplicate(String),
}

/// Ordered map from log key to extractor.
pub struct FieldRegistry<T> {
    fields: Vec<(String, FieldExtractor<T>)>,
}

impl<T> Default for FieldRegistry<T> {
    fn default() -> Self {
        Self { fields: Vec::new() }
    }
}

impl<T> FieldRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an extractor under `key`. Keys must be unique.
    pub fn register<F>(&mut self, key: impl Into<String>, extractor: F) -> Result<(), FieldError>
    where
        F: Fn(&T) -> Option<String> + Send + Sync + 'static,
    {
        let key = key.into();
        if self.fields.iter().any(|(existing, _)| *existing == key) {
            return Err(FieldError::Duplicate(key));
        }
        self.fields.push((key, Arc::new(extractor)));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Extract every registered field present on the candidate, in registration order.
    pub fn extract(&self, candidate: &T) -> Vec<(&str, String)> {
        self.fields
            .iter()
            .filter_map(|(key, extractor)| extractor(candidate).map(|value| (key.as_str(), value)))
            .collect()
    }

    /// Render the extracted fields as `key=value` pairs separated by spaces.
    pub fn render(&self, candidate: &T) -> String {
        let mut rendered = String::new();
        for (key, value) in self.extract(candidate) {
            if !rendered.is_empty() {
                rendered.push(' ');
            }
            let _ = write!(rendered, "{}={}", key, value);
        }
        rendered
    }
}
