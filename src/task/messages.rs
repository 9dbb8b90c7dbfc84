//! Log line templates for the three task events.
//!
//! Placeholders:
//! - `{name}` and `{duration}` in every template
//! - `{delay}` in the `aborting` template only
//!
//! Rendering is plain substitution; there is no escaping.

use serde::{Deserialize, Serialize};

const NAME: &str = "{name}";
const DURATION: &str = "{duration}";
const DELAY: &str = "{delay}";

/// Built-in wording presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessagePreset {
    /// `Task created: X` / `Executing task: X` / `Aborting task: X`
    #[default]
    Standard,
    /// `Task created: X` / `Executing: X` / `Aborting: X`
    Terse,
    /// `name: X, duration: N` / `Executing task: X` / `Task X aborted`
    Descriptive,
}

impl MessagePreset {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "standard" | "default" => Some(Self::Standard),
            "terse" => Some(Self::Terse),
            "descriptive" => Some(Self::Descriptive),
            _ => None,
        }
    }

    pub fn messages(self) -> TaskMessages {
        match self {
            MessagePreset::Standard => TaskMessages::standard(),
            MessagePreset::Terse => TaskMessages::terse(),
            MessagePreset::Descriptive => TaskMessages::descriptive(),
        }
    }
}

/// Templates for the creation, execution and abort lines of a task.
///
/// Missing fields fall back to the [`MessagePreset::Standard`] wording when
/// deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskMessages {
    pub created: String,
    pub executing: String,
    pub aborting: String,
}

impl Default for TaskMessages {
    fn default() -> Self {
        Self::standard()
    }
}

impl TaskMessages {
    pub fn standard() -> Self {
        Self {
            created: "Task created: {name}".to_string(),
            executing: "Executing task: {name}".to_string(),
            aborting: "Aborting task: {name}".to_string(),
        }
    }

    pub fn terse() -> Self {
        Self {
            created: "Task created: {name}".to_string(),
            executing: "Executing: {name}".to_string(),
            aborting: "Aborting: {name}".to_string(),
        }
    }

    pub fn descriptive() -> Self {
        Self {
            created: "name: {name}, duration: {duration}".to_string(),
            executing: "Executing task: {name}".to_string(),
            aborting: "Task {name} aborted".to_string(),
        }
    }

    /// Build templates from user input, rejecting unknown placeholders.
    pub fn new(
        created: impl Into<String>,
        executing: impl Into<String>,
        aborting: impl Into<String>,
    ) -> Result<Self, TemplateError> {
        let messages = Self {
            created: created.into(),
            executing: executing.into(),
            aborting: aborting.into(),
        };
        messages.validate()?;
        Ok(messages)
    }

    /// Check every template for placeholders it cannot fill.
    pub fn validate(&self) -> Result<(), TemplateError> {
        check_placeholders(&self.created, &[NAME, DURATION])?;
        check_placeholders(&self.executing, &[NAME, DURATION])?;
        check_placeholders(&self.aborting, &[NAME, DURATION, DELAY])?;
        Ok(())
    }

    pub fn render_created(&self, name: &str, duration: i64) -> String {
        render(&self.created, name, duration, None)
    }

    pub fn render_executing(&self, name: &str, duration: i64) -> String {
        render(&self.executing, name, duration, None)
    }

    pub fn render_aborting(&self, name: &str, duration: i64, delay: f64) -> String {
        render(&self.aborting, name, duration, Some(delay))
    }
}

// `{name}` goes last so a name that looks like a placeholder stays literal.
fn render(template: &str, name: &str, duration: i64, delay: Option<f64>) -> String {
    let mut out = template.replace(DURATION, &duration.to_string());
    if let Some(delay) = delay {
        out = out.replace(DELAY, &delay.to_string());
    }
    out.replace(NAME, name)
}

// Only `{identifier}` tokens count as placeholders; other braces are literal.
fn check_placeholders(template: &str, allowed: &[&str]) -> Result<(), TemplateError> {
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            break;
        };
        let inner = &after[..end];
        let is_identifier =
            !inner.is_empty() && inner.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if is_identifier {
            let token = &rest[start..start + end + 2];
            if !allowed.contains(&token) {
                return Err(TemplateError::UnknownPlaceholder {
                    template: template.to_string(),
                    placeholder: token.to_string(),
                });
            }
            rest = &after[end + 1..];
        } else {
            rest = after;
        }
    }
    Ok(())
}

/// Errors from user-supplied templates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("Unknown placeholder {placeholder} in template \"{template}\"")]
    UnknownPlaceholder {
        template: String,
        placeholder: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_wording() {
        let messages = TaskMessages::default();
        assert_eq!(messages.render_created("Test", 0), "Task created: Test");
        assert_eq!(messages.render_executing("Test", 0), "Executing task: Test");
        assert_eq!(messages.render_aborting("Test", 5, 1.5), "Aborting task: Test");
    }

    #[test]
    fn test_descriptive_includes_duration() {
        let messages = MessagePreset::Descriptive.messages();
        assert_eq!(
            messages.render_created("Test", -3),
            "name: Test, duration: -3"
        );
        assert_eq!(messages.render_aborting("Test", 0, 2.0), "Task Test aborted");
    }

    #[test]
    fn test_custom_template_with_delay() {
        let messages = TaskMessages::new(
            "{name} ({duration}s)",
            "run {name}",
            "stop {name} in {delay}s",
        )
        .unwrap();
        assert_eq!(messages.render_created("build", 30), "build (30s)");
        assert_eq!(messages.render_aborting("build", 30, 1.5), "stop build in 1.5s");
    }

    #[test]
    fn test_name_containing_placeholder_is_not_reexpanded() {
        let messages = TaskMessages::descriptive();
        assert_eq!(
            messages.render_created("{duration}", 7),
            "name: {duration}, duration: 7"
        );
    }

    #[test]
    fn test_rejects_unknown_placeholder() {
        let err = TaskMessages::new("{name}", "{task}", "{name}").unwrap_err();
        assert_eq!(
            err,
            TemplateError::UnknownPlaceholder {
                template: "{task}".to_string(),
                placeholder: "{task}".to_string(),
            }
        );
    }

    #[test]
    fn test_rejects_delay_outside_abort() {
        assert!(TaskMessages::new("{delay}", "{name}", "{name}").is_err());
        assert!(TaskMessages::new("{name}", "{name}", "{delay}").is_ok());
    }

    #[test]
    fn test_literal_braces_allowed() {
        assert!(TaskMessages::new("{ name }", "{}", "{name} {").is_ok());
    }

    #[test]
    fn test_partial_deserialize_falls_back_to_standard() {
        let messages: TaskMessages =
            serde_json::from_str(r#"{"executing": "go {name}"}"#).unwrap();
        assert_eq!(messages.executing, "go {name}");
        assert_eq!(messages.created, TaskMessages::standard().created);
    }

    #[test]
    fn test_preset_parse() {
        assert_eq!(MessagePreset::parse("TERSE"), Some(MessagePreset::Terse));
        assert_eq!(MessagePreset::parse("default"), Some(MessagePreset::Standard));
        assert_eq!(MessagePreset::parse("loud"), None);
    }
}
