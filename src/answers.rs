//! Collection of the answers describing the generated site.
//! Answers can be preloaded (JSON or YAML on stdin); everything that is not
//! preloaded, or fails validation, is asked interactively.

use crate::constants::{DEFAULT_THEME, DEFAULT_VERSION, PERMALINK_STYLES};
use crate::context::{custom_hostname, with_scheme};
use crate::defaults::Defaults;
use crate::error::{Error, Result};
use crate::github;
use crate::prompt::Prompter;
use cruet::Inflector;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// Raw answers as given by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Answers {
    pub name: String,
    pub slug: String,
    pub description: String,
    /// Comma-separated keyword list
    pub keywords: String,
    pub version: String,
    /// Public URL of the site
    pub url: String,
    /// Author as `Name <email>`
    pub author: String,
    /// GitHub repository as `owner/repo` or URL
    pub github: String,
    pub theme: String,
    pub permalink: String,
    pub timezone: String,
    /// Token used by deployment scripts
    pub token: String,
}

type Validator = fn(&str) -> std::result::Result<(), String>;

fn accept_any(_: &str) -> std::result::Result<(), String> {
    Ok(())
}

/// Rejects empty answers.
pub fn validate_required(value: &str) -> std::result::Result<(), String> {
    if value.trim().is_empty() {
        Err("a value is required".to_string())
    } else {
        Ok(())
    }
}

/// Rejects slugs that are empty or contain whitespace or path separators.
pub fn validate_slug(value: &str) -> std::result::Result<(), String> {
    validate_required(value)?;
    if value.trim().chars().any(|c| c.is_whitespace() || c == '/' || c == '\\') {
        return Err(format!("'{}' is not a valid slug", value.trim()));
    }
    Ok(())
}

/// Accepts an empty value or anything with a host, with or without scheme.
pub fn validate_url(value: &str) -> std::result::Result<(), String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }
    match url::Url::parse(&with_scheme(value)) {
        Ok(parsed) if parsed.host_str().is_some() => Ok(()),
        _ => Err(format!("'{value}' is not a valid URL")),
    }
}

/// Accepts an empty value or a GitHub `owner/repo` identifier.
pub fn validate_github(value: &str) -> std::result::Result<(), String> {
    if value.trim().is_empty() || github::parse(value).is_some() {
        Ok(())
    } else {
        Err(format!("'{}' is not a GitHub repository (expected owner/repo)", value.trim()))
    }
}

/// Parses preloaded answers, trying JSON first and YAML second.
///
/// Empty input yields `Null`.
pub fn parse_preloaded(content: &str) -> Result<serde_json::Value> {
    let content = content.trim();
    if content.is_empty() {
        return Ok(serde_json::Value::Null);
    }
    match serde_json::from_str(content) {
        Ok(value) => Ok(value),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ValidationError(format!("invalid preloaded answers: {e}"))),
    }
}

pub fn load_from_stdin() -> Result<serde_json::Value> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    parse_preloaded(&buffer)
}

/// Returns the preloaded answers, `Null` when none were requested.
pub fn get_answers_from(take_from_stdin: bool) -> Result<serde_json::Value> {
    if take_from_stdin {
        load_from_stdin()
    } else {
        Ok(serde_json::Value::Null)
    }
}

struct Collector<'a> {
    prompt: &'a dyn Prompter,
    preloaded: &'a serde_json::Value,
}

impl Collector<'_> {
    fn preloaded(&self, key: &str) -> Option<String> {
        match self.preloaded.get(key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::Bool(b) => Some(b.to_string()),
            serde_json::Value::Array(items) => Some(
                items.iter().filter_map(|i| i.as_str()).collect::<Vec<_>>().join(", "),
            ),
            _ => None,
        }
    }

    fn text(&self, key: &str, prompt: &str, default: &str, validate: Validator) -> Result<String> {
        if let Some(value) = self.preloaded(key) {
            match validate(&value) {
                Ok(()) => {
                    debug!("Using preloaded answer for '{}'", key);
                    return Ok(value.trim().to_string());
                }
                Err(msg) => warn!("Ignoring preloaded answer for '{}': {}", key, msg),
            }
        }

        loop {
            let value = self.prompt.input(prompt, default)?;
            let value = if value.trim().is_empty() { default.to_string() } else { value };
            match validate(&value) {
                Ok(()) => return Ok(value.trim().to_string()),
                Err(msg) => eprintln!("{}", Error::ValidationError(msg)),
            }
        }
    }

    fn choice(&self, key: &str, prompt: &str, choices: &[&str], default: &str) -> Result<String> {
        if let Some(value) = self.preloaded(key) {
            if choices.contains(&value.as_str()) {
                return Ok(value);
            }
            warn!("Ignoring preloaded answer for '{}': '{}' is not one of {:?}", key, value, choices);
        }
        let default_idx = choices.iter().position(|c| *c == default).unwrap_or(0);
        let idx = self.prompt.select(prompt, choices, default_idx)?;
        choices
            .get(idx)
            .map(|c| c.to_string())
            .ok_or_else(|| Error::PromptError(format!("selection {idx} out of range")))
    }
}

/// Asks every question in order, using `defaults` and `preloaded` answers.
///
/// # Arguments
/// * `prompt` - Prompter used for questions without a valid preloaded answer
/// * `defaults` - Environment-derived default values
/// * `preloaded` - JSON object of answers keyed by field name, or `Null`
///
/// # Errors
/// * `Error::PromptError` if the terminal interaction fails
pub fn get_answers(
    prompt: &dyn Prompter,
    defaults: &Defaults,
    preloaded: &serde_json::Value,
) -> Result<Answers> {
    let c = Collector { prompt, preloaded };

    let name = c.text(
        "name",
        "Site name",
        defaults.manifest_str("name").unwrap_or_default(),
        validate_required,
    )?;
    let slug = c.text("slug", "Site slug", &name.to_kebab_case(), validate_slug)?;
    let description = c.text(
        "description",
        "Short description",
        defaults.manifest_str("description").unwrap_or_default(),
        accept_any,
    )?;
    let keywords = c.text(
        "keywords",
        "Keywords (comma separated)",
        &defaults.manifest_keywords().unwrap_or_default(),
        accept_any,
    )?;
    let version = c.text(
        "version",
        "Version",
        defaults.manifest_str("version").unwrap_or(DEFAULT_VERSION),
        validate_required,
    )?;
    let url = c.text("url", "Site URL", "", validate_url)?;
    if let Some(hostname) = custom_hostname(&url) {
        debug!("Site uses the custom domain '{}'", hostname);
    }
    let author = c.text("author", "Author (Name <email>)", &defaults.author(), accept_any)?;
    let github = c.text("github", "GitHub repository (owner/repo)", "", validate_github)?;
    let theme = c.text("theme", "Theme", DEFAULT_THEME, accept_any)?;
    let permalink = c.choice("permalink", "Permalink style", &PERMALINK_STYLES, "date")?;
    let timezone = c.text("timezone", "Timezone", &defaults.timezone, validate_required)?;
    let token = c.text("token", "Deploy token (optional)", "", accept_any)?;

    Ok(Answers {
        name,
        slug,
        description,
        keywords,
        version,
        url,
        author,
        github,
        theme,
        permalink,
        timezone,
        token,
    })
}
