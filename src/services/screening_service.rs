//! Screening service

use std::fs;
use std::path::Path;
use std::sync::Arc;

use guards_rules::prelude::*;
use serde::Serialize;
use tracing::info;
use validator::Validate;

use crate::{
    config::ScreeningConfig,
    error::{AppError, AppResult},
    middleware::{ActionLogger, FieldError, FieldRegistry},
    models::Applicant,
    specs::{default_eligibility, spec_registry},
};

/// Outcome of screening a single applicant
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningOutcome {
    pub name: String,
    pub accepted: bool,
    /// Offer text when accepted, rejection reason otherwise
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

/// Screening results, in applicant order
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScreeningReport {
    pub outcomes: Vec<ScreeningOutcome>,
}

impl ScreeningReport {
    pub fn accepted(&self) -> impl Iterator<Item = &ScreeningOutcome> {
        self.outcomes.iter().filter(|o| o.accepted)
    }

    pub fn accepted_count(&self) -> usize {
        self.accepted().count()
    }

    pub fn rejected_count(&self) -> usize {
        self.outcomes.len() - self.accepted_count()
    }
}

/// Screening service for business logic
pub struct ScreeningService;

impl ScreeningService {
    /// Build the eligibility specification.
    ///
    /// Uses the rule file from the configuration when one is set, otherwise
    /// the default eligibility composed from the configured thresholds.
    pub fn load_eligibility(config: &ScreeningConfig) -> AppResult<BoxedSpec<Applicant>> {
        let Some(path) = &config.rule_file else {
            return Ok(default_eligibility(config)?);
        };

        let contents = read_file(path)?;
        let named = NamedRuleConfig::from_json(&contents)?;
        if !named.enabled {
            info!(rule = %named.name, "Rule file disabled, using default eligibility");
            return Ok(default_eligibility(config)?);
        }

        let registry = spec_registry(config)?;
        let problems = registry.validate(&named.rule);
        if !problems.is_empty() {
            let messages: Vec<String> = problems.iter().map(ToString::to_string).collect();
            return Err(AppError::InvalidRule(messages.join("; ")));
        }

        info!(
            path = %path.display(),
            rule = %named.name,
            version = %named.version,
            "Loaded eligibility rule file"
        );
        Ok(registry.build(&named.rule)?)
    }

    /// Hiring policy: an eligibility check followed by the offer.
    ///
    /// The chain yields the offer text; an ineligible applicant stops at the
    /// first rule and never reaches the offer.
    pub fn hiring_policy(
        eligibility: BoxedSpec<Applicant>,
        logger: &ActionLogger<Applicant>,
    ) -> Policy<Applicant, String> {
        let eligibility_rule = GuardedRule::<Applicant, String>::new(
            eligibility,
            logger
                .named("eligibility")
                .wrap(|applicant: &Applicant| Ok(format!("{} is eligible", applicant.name))),
        );
        let offer_rule = GuardedRule::<Applicant, String>::new(
            Arc::new(AlwaysTrue),
            logger
                .named("offer")
                .wrap(|applicant: &Applicant| Ok(format!("offer extended to {}", applicant.name))),
        );

        Policy::new(vec![
            Arc::new(eligibility_rule) as BoxedRule<Applicant, String>,
            Arc::new(offer_rule) as BoxedRule<Applicant, String>,
        ])
    }

    /// Run the policy over every applicant.
    pub fn screen(
        policy: &Policy<Applicant, String>,
        applicants: &[Applicant],
    ) -> AppResult<ScreeningReport> {
        let report = policy.batch_apply_rules(applicants)?;

        let outcomes = report
            .into_iter()
            .map(|outcome| {
                let name = applicants[outcome.index].name.clone();
                match outcome.result {
                    Ok(offer) => {
                        info!(applicant = %name, "Applicant meets the criteria");
                        ScreeningOutcome {
                            name,
                            accepted: true,
                            detail: offer,
                            code: None,
                        }
                    }
                    Err(err) => {
                        info!(applicant = %name, code = err.error_code(), "Applicant does not meet the criteria");
                        ScreeningOutcome {
                            name,
                            accepted: false,
                            detail: err.to_string(),
                            code: Some(err.error_code()),
                        }
                    }
                }
            })
            .collect();

        Ok(ScreeningReport { outcomes })
    }

    /// Load and validate applicants from a JSON array.
    pub fn load_applicants(path: &Path) -> AppResult<Vec<Applicant>> {
        let contents = read_file(path)?;
        let applicants: Vec<Applicant> = serde_json::from_str(&contents)?;
        for applicant in &applicants {
            applicant.validate()?;
        }
        Ok(applicants)
    }

    /// Built-in applicants used when no applicants file is configured.
    pub fn sample_applicants() -> Vec<Applicant> {
        vec![
            Applicant::new("Candidate 1")
                .graduated()
                .with_experience(4)
                .with_skills(["Go", "Python", "SQL"]),
            Applicant::new("Candidate 2")
                .with_experience(2)
                .with_skills(["Java", "C++"])
                .available(),
            Applicant::new("Candidate 3")
                .graduated()
                .with_experience(5)
                .with_skills(["Go", "Java"])
                .available(),
        ]
    }

    /// Applicant fields attached to every decorated action log.
    pub fn log_fields() -> Result<FieldRegistry<Applicant>, FieldError> {
        let mut fields = FieldRegistry::new();
        fields.register("applicant", |a: &Applicant| Some(a.name.clone()))?;
        fields.register("experience_years", |a: &Applicant| {
            Some(a.experience_years.to_string())
        })?;
        fields.register("skills", |a: &Applicant| {
            (!a.skills.is_empty()).then(|| a.skills.join(","))
        })?;
        Ok(fields)
    }
}

fn read_file(path: &Path) -> AppResult<String> {
    fs::read_to_string(path)
        .map_err(|e| AppError::File(format!("Failed to read {}: {}", path.display(), e)))
}
