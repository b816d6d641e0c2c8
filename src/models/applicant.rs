//! Applicant model

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{MAX_APPLICANT_NAME_LENGTH, MAX_EXPERIENCE_YEARS, MAX_SKILLS};

/// Job applicant screened by the hiring policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Applicant {
    #[validate(length(min = 1, max = MAX_APPLICANT_NAME_LENGTH))]
    pub name: String,
    #[serde(default)]
    pub graduated: bool,
    #[validate(range(max = MAX_EXPERIENCE_YEARS))]
    #[serde(default)]
    pub experience_years: u32,
    #[validate(length(max = MAX_SKILLS))]
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub available: bool,
}

impl Applicant {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            graduated: false,
            experience_years: 0,
            skills: Vec::new(),
            available: false,
        }
    }

    pub fn graduated(mut self) -> Self {
        self.graduated = true;
        self
    }

    pub fn with_experience(mut self, years: u32) -> Self {
        self.experience_years = years;
        self
    }

    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    pub fn available(mut self) -> Self {
        self.available = true;
        self
    }

    /// Count the listed skills that appear in `required`.
    ///
    /// Comparison is exact, and a skill listed twice counts twice.
    pub fn matching_skills(&self, required: &[String]) -> usize {
        self.skills
            .iter()
            .filter(|skill| required.contains(*skill))
            .count()
    }
}
