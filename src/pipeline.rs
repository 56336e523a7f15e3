//! Core template processing orchestration.
//! Runs the file stages strictly in order; the first failing stage stops the
//! run and files written by earlier stages stay on disk.

use crate::conflict::ConflictResolver;
use crate::constants::{CUSTOM_DOMAIN_FILE, IGNORE_TARGET, IGNORE_TEMPLATE, MANIFEST_FILE};
use crate::context::Context;
use crate::error::Result;
use crate::ignore::{select_files, FileKind};
use crate::manifest::{place_manifest, Installer};
use crate::renderer::TemplateRenderer;
use globset::GlobSet;
use log::debug;
use rayon::prelude::*;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Stages of a generation run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Render and place every text file
    TextFiles,
    /// Copy every binary file
    BinaryFiles,
    /// Render the ignore-file template and place it as a dotfile
    Dotfile,
    /// Write the custom domain file when a hostname is configured
    CustomDomain,
    /// Merge the manifest and install dependencies
    Manifest,
}

impl Stage {
    pub const ALL: [Stage; 5] =
        [Stage::TextFiles, Stage::BinaryFiles, Stage::Dotfile, Stage::CustomDomain, Stage::Manifest];
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::TextFiles => "text files",
            Stage::BinaryFiles => "binary files",
            Stage::Dotfile => "dotfile",
            Stage::CustomDomain => "custom domain",
            Stage::Manifest => "manifest",
        };
        write!(f, "{name}")
    }
}

/// Generation pipeline over one template tree and one destination.
pub struct Pipeline<'a> {
    renderer: &'a dyn TemplateRenderer,
    resolver: &'a ConflictResolver<'a>,
    installer: &'a dyn Installer,
    template_root: &'a Path,
    output_root: &'a Path,
    context: &'a Context,
    ignored: &'a GlobSet,
}

impl<'a> Pipeline<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        renderer: &'a dyn TemplateRenderer,
        resolver: &'a ConflictResolver<'a>,
        installer: &'a dyn Installer,
        template_root: &'a Path,
        output_root: &'a Path,
        context: &'a Context,
        ignored: &'a GlobSet,
    ) -> Self {
        Self { renderer, resolver, installer, template_root, output_root, context, ignored }
    }

    /// Runs every stage in order, stopping at the first error.
    ///
    /// Returns the stages that completed.
    pub fn run(&self) -> Result<Vec<Stage>> {
        let context = self.context.to_json();
        let mut completed = Vec::with_capacity(Stage::ALL.len());

        for stage in Stage::ALL {
            debug!("Starting stage: {}", stage);
            self.run_stage(stage, &context)?;
            debug!("Finished stage: {}", stage);
            completed.push(stage);
        }
        Ok(completed)
    }

    fn run_stage(&self, stage: Stage, context: &serde_json::Value) -> Result<()> {
        match stage {
            Stage::TextFiles => self.place_text_files(context),
            Stage::BinaryFiles => self.place_binary_files(),
            Stage::Dotfile => self.place_dotfile(context),
            Stage::CustomDomain => self.place_custom_domain(),
            Stage::Manifest => self.place_manifest(context),
        }
    }

    fn render_file(&self, relative: &Path, context: &serde_json::Value) -> Result<String> {
        render_file(self.renderer, self.template_root, relative, context)
    }

    /// Places already prepared candidates one after another.
    ///
    /// Candidates are prepared before the first write, so a file that fails to
    /// read or render stops the stage before it touches the destination.
    fn place_all(&self, candidates: Vec<(PathBuf, Vec<u8>)>) -> Result<()> {
        for (relative, content) in candidates {
            self.resolver.write(&self.output_root.join(relative), &content)?;
        }
        Ok(())
    }

    fn place_text_files(&self, context: &serde_json::Value) -> Result<()> {
        let files = select_files(self.template_root, self.ignored, FileKind::Text)?;
        debug!("Rendering {} text files", files.len());
        // The resolver prompts, so only the renderer is shared with the pool.
        let (renderer, template_root) = (self.renderer, self.template_root);
        let candidates = files
            .into_par_iter()
            .map(|relative| -> Result<(PathBuf, Vec<u8>)> {
                let rendered = render_file(renderer, template_root, &relative, context)?;
                Ok((relative, rendered.into_bytes()))
            })
            .collect::<Result<Vec<_>>>()?;
        self.place_all(candidates)
    }

    fn place_binary_files(&self) -> Result<()> {
        let files = select_files(self.template_root, self.ignored, FileKind::Binary)?;
        debug!("Copying {} binary files", files.len());
        let template_root = self.template_root;
        let candidates = files
            .into_par_iter()
            .map(|relative| -> Result<(PathBuf, Vec<u8>)> {
                let bytes = fs::read(template_root.join(&relative))?;
                Ok((relative, bytes))
            })
            .collect::<Result<Vec<_>>>()?;
        self.place_all(candidates)
    }

    fn place_dotfile(&self, context: &serde_json::Value) -> Result<()> {
        let source = Path::new(IGNORE_TEMPLATE);
        if !self.template_root.join(source).is_file() {
            debug!("Template has no {}, skipping", IGNORE_TEMPLATE);
            return Ok(());
        }
        let rendered = self.render_file(source, context)?;
        self.resolver.write(&self.output_root.join(IGNORE_TARGET), rendered.as_bytes())?;
        Ok(())
    }

    fn place_custom_domain(&self) -> Result<()> {
        match self.context.hostname() {
            Some(hostname) => {
                self.resolver.write(&self.output_root.join(CUSTOM_DOMAIN_FILE), hostname.as_bytes())?;
            }
            None => debug!("No custom domain configured, skipping {}", CUSTOM_DOMAIN_FILE),
        }
        Ok(())
    }

    fn place_manifest(&self, context: &serde_json::Value) -> Result<()> {
        let rendered = self.render_file(Path::new(MANIFEST_FILE), context)?;
        place_manifest(self.resolver, self.installer, self.output_root, &rendered)?;
        Ok(())
    }
}

fn render_file(
    renderer: &dyn TemplateRenderer,
    template_root: &Path,
    relative: &Path,
    context: &serde_json::Value,
) -> Result<String> {
    let content = fs::read_to_string(template_root.join(relative))?;
    renderer.render(&content, context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order() {
        assert_eq!(Stage::ALL.first(), Some(&Stage::TextFiles));
        assert_eq!(Stage::ALL.last(), Some(&Stage::Manifest));
        assert_eq!(Stage::CustomDomain.to_string(), "custom domain");
    }
}
