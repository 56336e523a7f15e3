//! Environment-derived default answers.
//! Loaded once at startup and passed by value to the answer collector.

use crate::constants::{DEFAULT_TIMEZONE, MANIFEST_FILE};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Default values gathered from the user's environment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Defaults {
    /// Home directory of the current user
    pub home_dir: Option<PathBuf>,
    /// `user.name` from the git configuration
    pub git_name: Option<String>,
    /// `user.email` from the git configuration
    pub git_email: Option<String>,
    /// Best guess of the local IANA timezone
    pub timezone: String,
    /// Manifest already present in the destination directory
    pub manifest: Option<serde_json::Value>,
}

impl Defaults {
    /// Gathers defaults for a run writing into `output_root`.
    pub fn load<P: AsRef<Path>>(output_root: P) -> Self {
        let home_dir = dirs::home_dir();
        let (git_name, git_email) = git_identity(home_dir.as_deref());
        Self {
            home_dir,
            git_name,
            git_email,
            timezone: guess_timezone(),
            manifest: read_manifest(output_root.as_ref()),
        }
    }

    /// Git identity formatted as `Name <email>`, or as much of it as is known.
    pub fn author(&self) -> String {
        match (&self.git_name, &self.git_email) {
            (Some(name), Some(email)) => format!("{name} <{email}>"),
            (Some(name), None) => name.clone(),
            (None, Some(email)) => format!("<{email}>"),
            (None, None) => String::new(),
        }
    }

    /// String field of the existing manifest, if any.
    pub fn manifest_str(&self, key: &str) -> Option<&str> {
        self.manifest.as_ref()?.get(key)?.as_str()
    }

    /// Keywords of the existing manifest joined with commas.
    pub fn manifest_keywords(&self) -> Option<String> {
        let keywords = self.manifest.as_ref()?.get("keywords")?.as_array()?;
        let keywords: Vec<&str> = keywords.iter().filter_map(|k| k.as_str()).collect();
        (!keywords.is_empty()).then(|| keywords.join(", "))
    }
}

fn git_identity(home_dir: Option<&Path>) -> (Option<String>, Option<String>) {
    let config = match git2::Config::open_default() {
        Ok(config) => Some(config),
        Err(e) => {
            debug!("Default git configuration unavailable: {}", e);
            home_dir
                .map(|home| home.join(".gitconfig"))
                .filter(|path| path.exists())
                .and_then(|path| match git2::Config::open(&path) {
                    Ok(config) => Some(config),
                    Err(e) => {
                        warn!("Failed to read {}: {}", path.display(), e);
                        None
                    }
                })
        }
    };

    // String lookups need a snapshot rather than the live configuration.
    match config.and_then(|mut config| config.snapshot().ok()) {
        Some(config) => (
            config.get_string("user.name").ok().filter(|v| !v.trim().is_empty()),
            config.get_string("user.email").ok().filter(|v| !v.trim().is_empty()),
        ),
        None => (None, None),
    }
}

/// Guesses the local IANA timezone from `TZ`, `/etc/timezone` or the
/// `/etc/localtime` link, falling back to UTC.
pub fn guess_timezone() -> String {
    if let Ok(tz) = std::env::var("TZ") {
        let tz = tz.trim().trim_start_matches(':');
        if tz.contains('/') {
            return tz.to_string();
        }
    }
    if let Ok(contents) = fs::read_to_string("/etc/timezone") {
        let tz = contents.trim();
        if !tz.is_empty() {
            return tz.to_string();
        }
    }
    if let Ok(target) = fs::read_link("/etc/localtime") {
        if let Some(tz) = timezone_from_zoneinfo_path(&target) {
            return tz;
        }
    }
    DEFAULT_TIMEZONE.to_string()
}

/// Extracts `Area/City` from a path such as `/usr/share/zoneinfo/Area/City`.
pub fn timezone_from_zoneinfo_path(path: &Path) -> Option<String> {
    let path = path.to_str()?;
    let (_, tz) = path.split_once("zoneinfo/")?;
    (!tz.is_empty()).then(|| tz.to_string())
}

fn read_manifest(output_root: &Path) -> Option<serde_json::Value> {
    let path = output_root.join(MANIFEST_FILE);
    let content = fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring unparsable {}: {}", path.display(), e);
            None
        }
    }
}
