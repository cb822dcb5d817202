//! Compiled extraction policy and the label fallback chain.

use ghg_model::{ConfigError, ExtractionPolicy, Resolution};
use regex::Regex;

/// An [`ExtractionPolicy`] with its patterns compiled and checked.
#[derive(Debug, Clone)]
pub struct CompiledPolicy<'a> {
    policy: &'a ExtractionPolicy,
    entity: Regex,
    unit: Option<Regex>,
}

impl<'a> CompiledPolicy<'a> {
    /// Validate the policy and compile its patterns.
    ///
    /// Each pattern must have exactly one capture group.
    pub fn compile(policy: &'a ExtractionPolicy) -> Result<Self, ConfigError> {
        policy.validate()?;
        let entity = compile_pattern("regexp_entity", &policy.entity_pattern)?;
        let unit = policy
            .unit_pattern
            .as_deref()
            .map(|pattern| compile_pattern("regexp_unit", pattern))
            .transpose()?;
        Ok(Self {
            policy,
            entity,
            unit,
        })
    }

    pub fn policy(&self) -> &ExtractionPolicy {
        self.policy
    }

    /// Resolve a unit: override, then pattern, then the default unit.
    pub fn resolve_unit(&self, text: &str) -> (String, Resolution) {
        if let Some(unit) = self.policy.unit_overrides.get(text) {
            return (unit.clone(), Resolution::Override);
        }
        if let Some(unit) = self.unit.as_ref().and_then(|re| first_capture(re, text)) {
            return (unit.to_string(), Resolution::Pattern);
        }
        (self.policy.default_unit.clone(), Resolution::Default)
    }

    /// Resolve an entity: override, then pattern, then the text itself.
    pub fn resolve_entity(&self, text: &str) -> (String, Resolution) {
        if let Some(entity) = self.policy.entity_overrides.get(text) {
            return (entity.clone(), Resolution::Override);
        }
        if let Some(entity) = first_capture(&self.entity, text) {
            return (entity.to_string(), Resolution::Pattern);
        }
        (text.to_string(), Resolution::Raw)
    }
}

fn compile_pattern(field: &'static str, pattern: &str) -> Result<Regex, ConfigError> {
    let regex = Regex::new(pattern).map_err(|err| ConfigError::InvalidPattern {
        field,
        pattern: pattern.to_string(),
        message: err.to_string(),
    })?;
    // captures_len counts the implicit whole-match group
    let groups = regex.captures_len() - 1;
    if groups != 1 {
        return Err(ConfigError::CaptureGroups {
            field,
            pattern: pattern.to_string(),
            found: groups,
        });
    }
    Ok(regex)
}

/// First capture of the leftmost match; a blank capture counts as no match.
fn first_capture<'t>(regex: &Regex, text: &'t str) -> Option<&'t str> {
    regex
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|matched| matched.as_str())
        .filter(|value| !value.trim().is_empty())
}
