//! Conflict resolution for files written into the destination tree.
//! [`ConflictResolver::write`] is the only function that writes there: it
//! compares the candidate with what already exists at the target path and
//! asks the user when they differ.

use crate::error::{Error, Result};
use crate::prompt::Prompter;
use log::debug;
use similar::TextDiff;
use std::cell::Cell;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Choices offered when a file already exists with different content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictChoice {
    Overwrite,
    Skip,
    OverwriteAll,
    Diff,
    Abort,
}

impl ConflictChoice {
    /// All choices in the order they are presented.
    pub const ALL: [ConflictChoice; 5] = [
        ConflictChoice::Overwrite,
        ConflictChoice::Skip,
        ConflictChoice::OverwriteAll,
        ConflictChoice::Diff,
        ConflictChoice::Abort,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ConflictChoice::Overwrite => "Overwrite",
            ConflictChoice::Skip => "Skip",
            ConflictChoice::OverwriteAll => "Overwrite this and all remaining files",
            ConflictChoice::Diff => "Show the differences",
            ConflictChoice::Abort => "Abort",
        }
    }

    /// Position of the choice in [`ConflictChoice::ALL`].
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }
}

/// What happened to a candidate file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Nothing existed at the path; the file was written
    Create,
    /// The existing file already had the same content
    Identical,
    /// The existing file was replaced
    Force,
    /// The existing file was kept
    Skip,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self {
            Resolution::Create => "create",
            Resolution::Identical => "identical",
            Resolution::Force => "force",
            Resolution::Skip => "skip",
        };
        write!(f, "{action}")
    }
}

/// Resolves conflicts between generated files and the destination tree.
pub struct ConflictResolver<'a> {
    prompt: &'a dyn Prompter,
    overwrite_all: Cell<bool>,
}

impl<'a> ConflictResolver<'a> {
    /// Creates a resolver; with `force` every conflict is overwritten without asking.
    pub fn new(prompt: &'a dyn Prompter, force: bool) -> Self {
        Self { prompt, overwrite_all: Cell::new(force) }
    }

    /// Decides what to do with `candidate` at `dest` without writing anything.
    ///
    /// # Errors
    /// * `Error::Aborted` if the user aborts
    /// * `Error::IoError` if the existing file cannot be read
    pub fn resolve(&self, dest: &Path, candidate: &[u8]) -> Result<Resolution> {
        let existing = match fs::read(dest) {
            Ok(existing) => existing,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Resolution::Create),
            Err(e) => return Err(Error::IoError(e)),
        };

        if existing == candidate {
            return Ok(Resolution::Identical);
        }
        if self.overwrite_all.get() {
            return Ok(Resolution::Force);
        }

        println!("conflict: '{}'", dest.display());
        let labels: Vec<&str> = ConflictChoice::ALL.iter().map(|c| c.label()).collect();
        loop {
            let prompt = format!("Overwrite '{}'?", dest.display());
            let idx = self.prompt.select(&prompt, &labels, ConflictChoice::Overwrite.index())?;
            let choice = ConflictChoice::ALL.get(idx).copied().ok_or_else(|| {
                Error::PromptError(format!("selection {idx} out of range"))
            })?;
            debug!("Conflict choice for {}: {:?}", dest.display(), choice);

            match choice {
                ConflictChoice::Overwrite => return Ok(Resolution::Force),
                ConflictChoice::Skip => return Ok(Resolution::Skip),
                ConflictChoice::OverwriteAll => {
                    self.overwrite_all.set(true);
                    return Ok(Resolution::Force);
                }
                ConflictChoice::Diff => println!("{}", render_diff(dest, &existing, candidate)),
                ConflictChoice::Abort => {
                    return Err(Error::Aborted { path: dest.display().to_string() })
                }
            }
        }
    }

    /// Writes `candidate` to `dest` unless the resolution says otherwise.
    ///
    /// Parent directories are created as needed. The outcome is reported as
    /// `<action>: '<path>'`.
    pub fn write(&self, dest: &Path, candidate: &[u8]) -> Result<Resolution> {
        let resolution = self.resolve(dest, candidate)?;
        if matches!(resolution, Resolution::Create | Resolution::Force) {
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(dest, candidate)?;
        }
        println!("{}: '{}'", resolution, dest.display());
        Ok(resolution)
    }
}

/// Unified line diff between the existing file and the candidate.
///
/// Binary content is summarized in one line.
pub fn render_diff(dest: &Path, existing: &[u8], candidate: &[u8]) -> String {
    match (std::str::from_utf8(existing), std::str::from_utf8(candidate)) {
        (Ok(old), Ok(new)) => {
            let diff = TextDiff::from_lines(old, new);
            let old_header = format!("{} (existing)", dest.display());
            let new_header = format!("{} (new)", dest.display());
            let mut unified = diff.unified_diff();
            unified.context_radius(3).header(&old_header, &new_header);
            unified.to_string()
        }
        _ => format!(
            "Binary files differ: '{}' ({} bytes existing, {} bytes new)",
            dest.display(),
            existing.len(),
            candidate.len()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_index_round_trips() {
        for (idx, choice) in ConflictChoice::ALL.iter().enumerate() {
            assert_eq!(choice.index(), idx);
        }
    }

    #[test]
    fn test_render_diff_text() {
        let diff = render_diff(Path::new("a.txt"), b"one\ntwo\n", b"one\nthree\n");
        assert!(diff.contains("-two"));
        assert!(diff.contains("+three"));
        assert!(diff.contains("a.txt (existing)"));
    }

    #[test]
    fn test_render_diff_binary() {
        let diff = render_diff(Path::new("a.png"), &[0xff, 0x00], &[0xfe]);
        assert!(diff.starts_with("Binary files differ"));
    }
}
