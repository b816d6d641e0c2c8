//! JSON configuration for dynamic specification building.
//!
//! A `RuleConfig` is a serialized specification tree whose leaves name
//! specifications registered in a [`SpecRegistry`](crate::registry::SpecRegistry).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// JSON representation of a specification tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleConfig {
    /// A single specification by name
    Spec {
        name: String,
        #[serde(default)]
        params: HashMap<String, serde_json::Value>,
    },
    /// AND combination of rules
    And { rules: Vec<RuleConfig> },
    /// OR combination of rules
    Or { rules: Vec<RuleConfig> },
    /// Negation of a rule
    Not { rule: Box<RuleConfig> },
}

impl RuleConfig {
    pub fn spec(name: impl Into<String>) -> Self {
        RuleConfig::Spec {
            name: name.into(),
            params: HashMap::new(),
        }
    }

    pub fn spec_with_params(
        name: impl Into<String>,
        params: HashMap<String, serde_json::Value>,
    ) -> Self {
        RuleConfig::Spec {
            name: name.into(),
            params,
        }
    }

    pub fn and(rules: Vec<RuleConfig>) -> Self {
        RuleConfig::And { rules }
    }

    pub fn or(rules: Vec<RuleConfig>) -> Self {
        RuleConfig::Or { rules }
    }

    pub fn not(rule: RuleConfig) -> Self {
        RuleConfig::Not {
            rule: Box::new(rule),
        }
    }

    /// Parse a configuration from its JSON text.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// A named, versioned specification tree for storage alongside other configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedRuleConfig {
    pub name: String,
    pub description: Option<String>,
    pub rule: RuleConfig,
    pub version: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl NamedRuleConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

fn default_enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_config_serialization() {
        let rule = RuleConfig::and(vec![
            RuleConfig::spec("HasGraduated"),
            RuleConfig::or(vec![
                RuleConfig::not(RuleConfig::spec("IsAvailable")),
                RuleConfig::spec_with_params(
                    "ExperienceAbove",
                    [("years".to_string(), serde_json::json!(3))]
                        .into_iter()
                        .collect(),
                ),
            ]),
        ]);

        let json = serde_json::to_string_pretty(&rule).unwrap();
        let parsed = RuleConfig::from_json(&json).unwrap();
        assert_eq!(parsed, rule);
    }

    #[test]
    fn test_params_default_to_empty() {
        let parsed = RuleConfig::from_json(r#"{"type": "spec", "name": "IsAvailable"}"#).unwrap();
        assert_eq!(parsed, RuleConfig::spec("IsAvailable"));
    }

    #[test]
    fn test_unknown_node_type_is_rejected() {
        assert!(RuleConfig::from_json(r#"{"type": "xor", "rules": []}"#).is_err());
    }

    #[test]
    fn test_named_rule_config_defaults_enabled() {
        let json = r#"{
            "name": "eligibility",
            "description": null,
            "version": "1",
            "rule": {"type": "not", "rule": {"type": "spec", "name": "IsAvailable"}}
        }"#;
        let named: NamedRuleConfig = serde_json::from_str(json).unwrap();
        assert!(named.enabled);
        assert!(matches!(named.rule, RuleConfig::Not { .. }));
    }
}
