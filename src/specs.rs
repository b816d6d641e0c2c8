//! Applicant screening specifications

use std::sync::Arc;

use guards_rules::prelude::*;
use serde_json::Value;

use crate::config::ScreeningConfig;
use crate::constants::REQUIRED_SKILLS;
use crate::models::Applicant;

// ============================================================================
// Leaf Specifications
// ============================================================================

/// Specification that matches graduated applicants
#[derive(Debug, Clone, Copy)]
pub struct HasGraduated;

impl Specification<Applicant> for HasGraduated {
    fn is_satisfied_by(&self, applicant: &Applicant) -> bool {
        applicant.graduated
    }
}

/// Specification that matches applicants with strictly more than `years` of experience
#[derive(Debug, Clone, Copy)]
pub struct ExperienceAbove(pub u32);

impl Specification<Applicant> for ExperienceAbove {
    fn is_satisfied_by(&self, applicant: &Applicant) -> bool {
        applicant.experience_years > self.0
    }
}

/// Specification that matches applicants listing at least `minimum` of `skills`
#[derive(Debug, Clone)]
pub struct HasRequiredSkills {
    pub skills: Vec<String>,
    pub minimum: usize,
}

impl HasRequiredSkills {
    pub fn new<I, S>(skills: I, minimum: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            skills: skills.into_iter().map(Into::into).collect(),
            minimum,
        }
    }
}

impl Specification<Applicant> for HasRequiredSkills {
    fn is_satisfied_by(&self, applicant: &Applicant) -> bool {
        applicant.matching_skills(&self.skills) >= self.minimum
    }
}

/// Specification that matches applicants available to start
#[derive(Debug, Clone, Copy)]
pub struct IsAvailable;

impl Specification<Applicant> for IsAvailable {
    fn is_satisfied_by(&self, applicant: &Applicant) -> bool {
        applicant.available
    }
}

// ============================================================================
// Composition
// ============================================================================

/// Default eligibility: `graduated AND skills OR experience AND available`,
/// composed left to right so it reads `((graduated AND skills) OR experience) AND available`.
pub fn default_eligibility(config: &ScreeningConfig) -> GuardResult<BoxedSpec<Applicant>> {
    SpecificationBuilder::<Applicant>::new()
        .with_specification(Arc::new(HasGraduated))
        .and(Arc::new(HasRequiredSkills::new(
            REQUIRED_SKILLS.iter().copied(),
            config.min_matching_skills,
        )))
        .or(Arc::new(ExperienceAbove(config.min_experience_years)))
        .and(Arc::new(IsAvailable))
        .build()
}

/// Registry of the applicant leaf specifications for rule files.
///
/// Parameters fall back to the screening configuration when omitted:
/// - `HasGraduated`, `IsAvailable`: none
/// - `ExperienceAbove`: `years`
/// - `HasRequiredSkills`: `skills` (list of strings), `minimum`
pub fn spec_registry(config: &ScreeningConfig) -> GuardResult<SpecRegistry<Applicant>> {
    let mut registry = SpecRegistry::new();

    registry.register("HasGraduated", |_| Some(Arc::new(HasGraduated) as BoxedSpec<Applicant>))?;
    registry.register("IsAvailable", |_| Some(Arc::new(IsAvailable) as BoxedSpec<Applicant>))?;

    let default_years = config.min_experience_years;
    registry.register("ExperienceAbove", move |params| {
        let years = match params.get("years") {
            Some(value) => u32::try_from(value.as_u64()?).ok()?,
            None => default_years,
        };
        Some(Arc::new(ExperienceAbove(years)) as BoxedSpec<Applicant>)
    })?;

    let default_minimum = config.min_matching_skills;
    registry.register("HasRequiredSkills", move |params| {
        let skills = match params.get("skills") {
            Some(value) => string_list(value)?,
            None => REQUIRED_SKILLS.iter().map(|s| s.to_string()).collect(),
        };
        let minimum = match params.get("minimum") {
            Some(value) => usize::try_from(value.as_u64()?).ok()?,
            None => default_minimum,
        };
        Some(Arc::new(HasRequiredSkills::new(skills, minimum)) as BoxedSpec<Applicant>)
    })?;

    Ok(registry)
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn params(value: Value) -> HashMap<String, Value> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_experience_is_strictly_above() {
        let spec = ExperienceAbove(3);
        assert!(!spec.is_satisfied_by(&Applicant::new("a").with_experience(3)));
        assert!(spec.is_satisfied_by(&Applicant::new("b").with_experience(4)));
    }

    #[test]
    fn test_required_skills_minimum() {
        let spec = HasRequiredSkills::new(["Go", "SQL", "Java"], 2);
        assert!(!spec.is_satisfied_by(&Applicant::new("a").with_skills(["Go", "Rust"])));
        assert!(spec.is_satisfied_by(&Applicant::new("b").with_skills(["Go", "Java"])));
    }

    #[test]
    fn test_required_skills_are_case_sensitive() {
        let spec = HasRequiredSkills::new(["Go", "SQL"], 2);
        assert!(!spec.is_satisfied_by(&Applicant::new("a").with_skills(["go", "sql"])));
        assert!(spec.is_satisfied_by(&Applicant::new("b").with_skills(["Go", "Go"])));
    }

    #[test]
    fn test_default_eligibility_groups_left_to_right() {
        let spec = default_eligibility(&ScreeningConfig::default()).unwrap();

        // Experience alone is enough when available.
        let veteran = Applicant::new("v").with_experience(10).available();
        assert!(spec.is_satisfied_by(&veteran));

        // Availability is required on every branch.
        let busy = Applicant::new("b")
            .graduated()
            .with_skills(["Go", "Python"])
            .with_experience(10);
        assert!(!spec.is_satisfied_by(&busy));

        let graduate = Applicant::new("g")
            .graduated()
            .with_skills(["Go", "Python"])
            .available();
        assert!(spec.is_satisfied_by(&graduate));
    }

    #[test]
    fn test_registry_lists_leaf_specs() {
        let registry = spec_registry(&ScreeningConfig::default()).unwrap();
        assert_eq!(
            registry.list(),
            vec!["ExperienceAbove", "HasGraduated", "HasRequiredSkills", "IsAvailable"]
        );
    }

    #[test]
    fn test_registry_parameters() {
        let registry = spec_registry(&ScreeningConfig::default()).unwrap();

        let spec = registry
            .create("ExperienceAbove", &params(json!({"years": 8})))
            .unwrap();
        assert!(!spec.is_satisfied_by(&Applicant::new("a").with_experience(5)));

        let spec = registry
            .create("HasRequiredSkills", &params(json!({"skills": ["Rust"], "minimum": 1})))
            .unwrap();
        assert!(spec.is_satisfied_by(&Applicant::new("a").with_skills(["Rust"])));
        assert!(!spec.is_satisfied_by(&Applicant::new("b").with_skills(["rust"])));

        let err = registry
            .create("ExperienceAbove", &params(json!({"years": "many"})))
            .err()
            .unwrap();
        assert_eq!(err.error_code(), "INVALID_PARAMETERS");
    }
}
