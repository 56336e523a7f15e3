//! Manifest handling: the generated `package.json` is merged into an
//! existing one rather than replacing it, then dependencies are installed.

use crate::conflict::{ConflictResolver, Resolution};
use crate::constants::MANIFEST_FILE;
use crate::error::{Error, Result};
use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, Stdio};

/// Recursively merges `overlay` into `base`.
///
/// Objects are merged key by key; arrays and scalars in `overlay` replace
/// the value in `base` wholesale. Keys only present in `overlay` are appended.
pub fn deep_merge(base: &mut serde_json::Value, overlay: serde_json::Value) {
    match (base, overlay) {
        (serde_json::Value::Object(base_map), serde_json::Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Parses a manifest, naming its origin in the error.
pub fn parse_manifest(content: &str, origin: &str) -> Result<serde_json::Value> {
    serde_json::from_str(content)
        .map_err(|e| Error::ManifestError(format!("{origin} is not valid JSON: {e}")))
}

/// Computes the manifest content to write into `output_root`.
///
/// Without an existing manifest the rendered text is returned as-is;
/// otherwise the rendered manifest is deep-merged over the existing one.
pub fn merged_manifest(output_root: &Path, rendered: &str) -> Result<String> {
    let existing_path = output_root.join(MANIFEST_FILE);
    let existing = match fs::read_to_string(&existing_path) {
        Ok(existing) => existing,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No existing {}, writing the generated one", MANIFEST_FILE);
            return Ok(rendered.to_string());
        }
        Err(e) => return Err(Error::IoError(e)),
    };

    let mut merged = parse_manifest(&existing, &existing_path.display().to_string())?;
    let generated = parse_manifest(rendered, &format!("generated {MANIFEST_FILE}"))?;
    debug!("Merging generated {} into {}", MANIFEST_FILE, existing_path.display());
    deep_merge(&mut merged, generated);

    let mut content = serde_json::to_string_pretty(&merged)?;
    content.push('\n');
    Ok(content)
}

/// Writes the merged manifest through `resolver`, then runs `installer`.
pub fn place_manifest(
    resolver: &ConflictResolver,
    installer: &dyn Installer,
    output_root: &Path,
    rendered: &str,
) -> Result<Resolution> {
    let content = merged_manifest(output_root, rendered)?;
    let resolution = resolver.write(&output_root.join(MANIFEST_FILE), content.as_bytes())?;
    installer.install(output_root)?;
    Ok(resolution)
}

/// Trait for the dependency installation step.
pub trait Installer {
    /// Installs the dependencies declared by the manifest in `dir`.
    fn install(&self, dir: &Path) -> Result<()>;
}

/// Installer running `<client> install` in the destination directory.
#[derive(Debug, Clone)]
pub struct CommandInstaller {
    client: String,
}

impl CommandInstaller {
    pub fn new<S: Into<String>>(client: S) -> Self {
        Self { client: client.into() }
    }
}

impl Installer for CommandInstaller {
    fn install(&self, dir: &Path) -> Result<()> {
        println!("Running '{} install' in {}", self.client, dir.display());
        let status = Command::new(&self.client)
            .arg("install")
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| Error::InstallError(format!("failed to run '{}': {}", self.client, e)))?;

        if !status.success() {
            return Err(Error::InstallError(format!(
                "'{} install' failed with status: {}",
                self.client, status
            )));
        }
        Ok(())
    }
}

/// Installer used with `--skip-install`.
#[derive(Debug, Default)]
pub struct SkipInstaller;

impl Installer for SkipInstaller {
    fn install(&self, dir: &Path) -> Result<()> {
        println!("Skipping dependency installation in {}", dir.display());
        Ok(())
    }
}
