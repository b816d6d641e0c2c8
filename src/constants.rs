//! Application-wide constants
//!
//! Constants are grouped by their purpose.

// =============================================================================
// LOGGING DEFAULTS
// =============================================================================

/// Default tracing filter when RUST_LOG is not set
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log output format
pub const DEFAULT_LOG_FORMAT: &str = "pretty";

// =============================================================================
// SCREENING DEFAULTS
// =============================================================================

/// Years of experience an applicant must exceed
pub const DEFAULT_MIN_EXPERIENCE_YEARS: u32 = 3;

/// Number of required skills an applicant must have
pub const DEFAULT_MIN_MATCHING_SKILLS: usize = 2;

/// Skills the screening policy looks for
pub const REQUIRED_SKILLS: &[&str] = &["Go", "Python", "SQL", "Java", "C++"];

// =============================================================================
// VALIDATION LIMITS
// =============================================================================

/// Applicant name maximum length
pub const MAX_APPLICANT_NAME_LENGTH: u64 = 100;

/// Upper bound for declared years of experience
pub const MAX_EXPERIENCE_YEARS: u32 = 60;

/// Maximum number of skills an applicant may list
pub const MAX_SKILLS: u64 = 50;
