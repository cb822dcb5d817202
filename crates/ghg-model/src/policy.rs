//! Extraction policy for deriving `(entity, unit)` column labels.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Where the text describing a column's unit (and entity) comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationSource {
    /// Use the existing column headers.
    Header,
    /// Use the cells of a zero-based body row; the row is dropped afterwards.
    Row(usize),
}

impl AnnotationSource {
    pub fn row(self) -> Option<usize> {
        match self {
            Self::Header => None,
            Self::Row(idx) => Some(idx),
        }
    }
}

impl fmt::Display for AnnotationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => f.write_str("header"),
            Self::Row(idx) => write!(f, "row {idx}"),
        }
    }
}

/// Rules for turning annotation text into an entity and a unit.
///
/// Override maps are keyed by the exact cell text and start out empty; the
/// policy is never modified while annotating.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractionPolicy {
    /// Pattern with one capture group extracting the entity.
    #[serde(rename = "regexp_entity", default)]
    pub entity_pattern: String,

    /// Pattern with one capture group extracting the unit.
    #[serde(
        rename = "regexp_unit",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub unit_pattern: Option<String>,

    /// Cell text -> unit.
    #[serde(rename = "manual_repl_unit", default)]
    pub unit_overrides: BTreeMap<String, String>,

    /// Cell text -> entity.
    #[serde(rename = "manual_repl_entity", default)]
    pub entity_overrides: BTreeMap<String, String>,

    /// Unit used when neither an override nor the pattern yields one.
    #[serde(default)]
    pub default_unit: String,
}

impl ExtractionPolicy {
    pub fn new(entity_pattern: impl Into<String>, default_unit: impl Into<String>) -> Self {
        Self {
            entity_pattern: entity_pattern.into(),
            default_unit: default_unit.into(),
            ..Self::default()
        }
    }

    /// Parse a policy document using the `regexp_entity`, `regexp_unit`,
    /// `manual_repl_unit`, `manual_repl_entity` and `default_unit` keys.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let policy: Self = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    #[must_use]
    pub fn with_unit_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.unit_pattern = Some(pattern.into());
        self
    }

    #[must_use]
    pub fn with_unit_override(mut self, text: impl Into<String>, unit: impl Into<String>) -> Self {
        self.unit_overrides.insert(text.into(), unit.into());
        self
    }

    #[must_use]
    pub fn with_entity_override(
        mut self,
        text: impl Into<String>,
        entity: impl Into<String>,
    ) -> Self {
        self.entity_overrides.insert(text.into(), entity.into());
        self
    }

    /// Check that the required options are present.
    ///
    /// Pattern syntax is checked when the policy is compiled.
    pub fn validate(&self) -> Result<()> {
        if self.entity_pattern.is_empty() {
            return Err(ConfigError::MissingField {
                field: "regexp_entity",
            });
        }
        if self.default_unit.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "default_unit",
            });
        }
        for (field, overrides) in [
            ("manual_repl_unit", &self.unit_overrides),
            ("manual_repl_entity", &self.entity_overrides),
        ] {
            if let Some((key, _)) = overrides.iter().find(|(_, value)| value.trim().is_empty()) {
                return Err(ConfigError::BlankOverride {
                    field,
                    key: key.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_policy() {
        let policy = ExtractionPolicy::from_json_str(
            r#"{
                "regexp_entity": "^(\\w+)",
                "regexp_unit": "\\((\\w+)\\)",
                "manual_repl_unit": {"CO2 (Gg)": "kt"},
                "manual_repl_entity": {"GWP total": "KYOTOGHG"},
                "default_unit": "Gg"
            }"#,
        )
        .unwrap();
        assert_eq!(policy.entity_pattern, r"^(\w+)");
        assert_eq!(policy.unit_pattern.as_deref(), Some(r"\((\w+)\)"));
        assert_eq!(policy.unit_overrides["CO2 (Gg)"], "kt");
        assert_eq!(policy.entity_overrides["GWP total"], "KYOTOGHG");
        assert_eq!(policy.default_unit, "Gg");
    }

    #[test]
    fn override_maps_default_to_empty() {
        let policy =
            ExtractionPolicy::from_json_str(r#"{"regexp_entity": "(.*)", "default_unit": "Gg"}"#)
                .unwrap();
        assert!(policy.unit_overrides.is_empty());
        assert!(policy.entity_overrides.is_empty());
        assert!(policy.unit_pattern.is_none());
    }

    #[test]
    fn missing_entity_pattern_is_config_error() {
        let result = ExtractionPolicy::from_json_str(r#"{"default_unit": "Gg"}"#);
        assert!(matches!(
            result,
            Err(ConfigError::MissingField {
                field: "regexp_entity"
            })
        ));
    }

    #[test]
    fn missing_default_unit_is_config_error() {
        let result = ExtractionPolicy::from_json_str(r#"{"regexp_entity": "(.*)"}"#);
        assert!(matches!(
            result,
            Err(ConfigError::MissingField {
                field: "default_unit"
            })
        ));
    }

    #[test]
    fn blank_override_value_is_config_error() {
        let result = ExtractionPolicy::from_json_str(
            r#"{"regexp_entity": "(.*)", "default_unit": "Gg", "manual_repl_unit": {"CO2 (Gg)": " "}}"#,
        );
        assert!(matches!(
            result,
            Err(ConfigError::BlankOverride {
                field: "manual_repl_unit",
                ref key,
            }) if key == "CO2 (Gg)"
        ));

        let policy = ExtractionPolicy::new("(.*)", "Gg").with_entity_override("Total", "");
        assert!(matches!(
            policy.validate(),
            Err(ConfigError::BlankOverride {
                field: "manual_repl_entity",
                ..
            })
        ));
    }

    #[test]
    fn unknown_option_is_rejected() {
        let result = ExtractionPolicy::from_json_str(
            r#"{"regexp_entity": "(.*)", "default_unit": "Gg", "regexp_units": "x"}"#,
        );
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn annotation_source_display() {
        assert_eq!(AnnotationSource::Header.to_string(), "header");
        assert_eq!(AnnotationSource::Row(2).to_string(), "row 2");
    }
}
