//! Guards - Application Entry Point
//!
//! Screens applicants against the configured eligibility and logs the outcome.

use std::sync::Arc;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use guards::{
    config::{LogFormat, CONFIG},
    middleware::{host_name, ActionLogger},
    services::ScreeningService,
};

fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Starting applicant screening...");

    let screening = &CONFIG.screening;
    let eligibility = ScreeningService::load_eligibility(screening)?;

    let applicants = match &screening.applicants_file {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading applicants...");
            ScreeningService::load_applicants(path)?
        }
        None => ScreeningService::sample_applicants(),
    };

    let mut logger = ActionLogger::new("screening")
        .with_fields(Arc::new(ScreeningService::log_fields()?));
    if CONFIG.logging.monitoring {
        logger = logger.with_host(host_name()?);
    }

    let policy = ScreeningService::hiring_policy(eligibility, &logger);
    let report = ScreeningService::screen(&policy, &applicants)?;

    tracing::info!(
        total = report.outcomes.len(),
        accepted = report.accepted_count(),
        rejected = report.rejected_count(),
        "Screening finished"
    );

    Ok(())
}

fn init_tracing() {
    let (pretty, json) = match CONFIG.logging.format {
        LogFormat::Pretty => (Some(fmt::layer()), None),
        LogFormat::Json => (None, Some(fmt::layer().json())),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| CONFIG.logging.rust_log.clone().into()),
        )
        .with(pretty)
        .with(json)
        .init();
}
