//! Logging decorator for rule actions

use std::fmt::Debug;
use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use super::fields::FieldRegistry;

/// Wraps rule actions so each invocation logs its candidate, outcome and duration.
pub struct ActionLogger<T> {
    name: String,
    fields: Option<Arc<FieldRegistry<T>>>,
    host: Option<String>,
}

impl<T> Clone for ActionLogger<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            fields: self.fields.clone(),
            host: self.host.clone(),
        }
    }
}

impl<T> ActionLogger<T>
where
    T: Debug + 'static,
{
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: None,
            host: None,
        }
    }

    /// Enrich every log line with the candidate fields in `fields`.
    pub fn with_fields(mut self, fields: Arc<FieldRegistry<T>>) -> Self {
        self.fields = Some(fields);
        self
    }

    /// Attach the host name to every log line.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Same logger under a different action name.
    pub fn named(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// Decorate `action`; the returned closure has the same signature.
    pub fn wrap<R, F>(&self, action: F) -> impl Fn(&T) -> anyhow::Result<R> + Send + Sync + use<T, R, F>
    where
        R: Debug,
        F: Fn(&T) -> anyhow::Result<R> + Send + Sync + 'static,
    {
        let logger = self.clone();
        move |candidate: &T| {
            let fields = logger
                .fields
                .as_ref()
                .map(|registry| registry.render(candidate))
                .filter(|rendered| !rendered.is_empty());
            let fields = fields.as_deref();
            let host = logger.host.as_deref();

            info!(
                action = %logger.name,
                candidate = ?candidate,
                fields = fields,
                host = host,
                "Action started"
            );

            let start = Instant::now();
            let result = action(candidate);
            let duration_ms = start.elapsed().as_secs_f64() * 1000.0;

            match &result {
                Ok(value) => info!(
                    action = %logger.name,
                    fields = fields,
                    host = host,
                    result = ?value,
                    duration_ms = %format!("{:.2}", duration_ms),
                    "Action completed"
                ),
                Err(err) => warn!(
                    action = %logger.name,
                    fields = fields,
                    host = host,
                    error = %err,
                    duration_ms = %format!("{:.2}", duration_ms),
                    "Action failed"
                ),
            }

            result
        }
    }
}

/// Decorate `action` with a logger that has no extra fields.
pub fn logged<T, R, F>(name: &str, action: F) -> impl Fn(&T) -> anyhow::Result<R> + Send + Sync + use<T, R, F>
where
    T: Debug + 'static,
    R: Debug,
    F: Fn(&T) -> anyhow::Result<R> + Send + Sync + 'static,
{
    ActionLogger::new(name).wrap(action)
}

/// Name of the machine, attached to action logs when monitoring is enabled.
pub fn host_name() -> std::io::Result<String> {
    Ok(hostname::get()?.to_string_lossy().into_owned())
}
