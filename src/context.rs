//! Derivation of the template context from the collected answers.
//! The context is built once and only read afterwards by the renderer,
//! the pipeline and the manifest merger.

use chrono::Datelike;
use indexmap::IndexMap;
use log::debug;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use url::Url;

use crate::answers::Answers;
use crate::github;

/// Fully resolved key/value data used to render the template tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Context {
    values: IndexMap<String, serde_json::Value>,
}

impl Context {
    /// Builds a context from a JSON object. Non-object values yield an empty context.
    pub fn from_value(value: serde_json::Value) -> Self {
        let values = match value {
            serde_json::Value::Object(map) => map.into_iter().collect(),
            _ => IndexMap::new(),
        };
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.values.get(key)
    }

    /// Returns a string value, treating missing and non-string values as `None`.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(|v| v.as_str())
    }

    /// Custom domain of the site, if one was configured.
    ///
    /// Absent, `null` and empty values all mean "no custom domain".
    pub fn hostname(&self) -> Option<&str> {
        self.get_str("hostname").map(str::trim).filter(|h| !h.is_empty())
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.values.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &serde_json::Value)> {
        self.values.iter()
    }

    /// Expands raw answers into the complete template context.
    pub fn derive(answers: &Answers) -> Self {
        let mut values = IndexMap::new();
        let mut set = |key: &str, value: serde_json::Value| {
            values.insert(key.to_string(), value);
        };

        set("name", answers.name.trim().into());
        set("slug", answers.slug.trim().into());
        set("description", answers.description.trim().into());
        set("keywords", answers.keywords.trim().into());
        set("keyword_list", split_keywords(&answers.keywords).into());
        set("version", answers.version.trim().into());
        set("url", answers.url.trim().trim_end_matches('/').into());
        if let Some(hostname) = custom_hostname(&answers.url) {
            set("hostname", hostname.into());
        }

        let (author_name, author_email) = split_author(&answers.author);
        set("author", answers.author.trim().into());
        set("author_name", author_name.into());
        set("author_email", author_email.into());

        set("timezone", answers.timezone.trim().into());
        set("permalink", answers.permalink.trim().into());
        set("theme", answers.theme.trim().into());
        set("token", answers.token.trim().into());

        set("github", answers.github.trim().into());
        let repo = github::parse(&answers.github);
        if repo.is_none() && !answers.github.trim().is_empty() {
            debug!("'{}' is not a GitHub repository, leaving derived fields empty", answers.github);
        }
        let repo = repo.unwrap_or_default();
        set("github_author", repo.author.into());
        set("github_author_url", repo.author_url.into());
        set("github_repo", repo.repo.into());
        set("github_url", repo.url.into());

        set("generator_version", env!("CARGO_PKG_VERSION").into());
        set("year", chrono::Local::now().year().into());

        Self { values }
    }
}

fn author_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*([^<]*?)\s*<([^>]*)>\s*$").expect("author pattern is valid")
    })
}

/// Splits `Name <email>` into its name and email parts.
///
/// Without the angle bracket segment the whole string is the name and the
/// email is empty.
pub fn split_author(author: &str) -> (String, String) {
    match author_pattern().captures(author) {
        Some(captures) => (
            captures.get(1).map_or("", |m| m.as_str()).to_string(),
            captures.get(2).map_or("", |m| m.as_str()).trim().to_string(),
        ),
        None => (author.trim().to_string(), String::new()),
    }
}

/// Prefixes `https://` when `site_url` carries no scheme.
///
/// `host:port` would otherwise parse with the host as its scheme.
pub fn with_scheme(site_url: &str) -> String {
    if site_url.contains("://") {
        site_url.to_string()
    } else {
        format!("https://{site_url}")
    }
}

/// Returns the host of `site_url` when it points at a custom domain.
///
/// Empty or unparsable URLs and GitHub Pages hosts have no custom domain.
pub fn custom_hostname(site_url: &str) -> Option<String> {
    let site_url = site_url.trim();
    if site_url.is_empty() {
        return None;
    }
    let parsed = Url::parse(&with_scheme(site_url)).ok()?;
    let host = parsed.host_str()?.to_lowercase();
    if host == "github.io" || host.ends_with(".github.io") {
        None
    } else {
        Some(host)
    }
}

/// Splits a comma-separated keyword string, dropping empty entries.
pub fn split_keywords(keywords: &str) -> Vec<String> {
    keywords
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_author_trims_parts() {
        assert_eq!(
            split_author("  Jane Doe   < jane@example.com > "),
            ("Jane Doe".to_string(), "jane@example.com".to_string())
        );
    }

    #[test]
    fn test_custom_hostname_without_scheme() {
        assert_eq!(custom_hostname("blog.example.org"), Some("blog.example.org".to_string()));
    }

    #[test]
    fn test_split_keywords() {
        assert_eq!(split_keywords("jekyll, blog,,  site "), vec!["jekyll", "blog", "site"]);
        assert!(split_keywords("").is_empty());
    }
}
