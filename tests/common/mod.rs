#![allow(dead_code)]

use sitebaker::error::{Error, Result};
use sitebaker::manifest::Installer;
use sitebaker::prompt::Prompter;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

/// Scripted reply for one prompt.
#[derive(Debug, Clone)]
pub enum Reply {
    Input(String),
    Select(usize),
    Confirm(bool),
}

/// Prompter answering from a script and counting every call.
#[derive(Default)]
pub struct ScriptedPrompter {
    replies: RefCell<VecDeque<Reply>>,
    calls: Cell<usize>,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self { replies: RefCell::new(replies.into()), ..Default::default() }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }

    fn next(&self, prompt: &str) -> Result<Reply> {
        self.calls.set(self.calls.get() + 1);
        self.prompts.borrow_mut().push(prompt.to_string());
        self.replies
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| Error::PromptError(format!("unexpected prompt: {prompt}")))
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, prompt: &str, default: &str) -> Result<String> {
        match self.next(prompt)? {
            Reply::Input(value) if value.is_empty() => Ok(default.to_string()),
            Reply::Input(value) => Ok(value),
            other => Err(Error::PromptError(format!("expected input for '{prompt}', got {other:?}"))),
        }
    }

    fn select(&self, prompt: &str, items: &[&str], _default: usize) -> Result<usize> {
        match self.next(prompt)? {
            Reply::Select(idx) if idx < items.len() => Ok(idx),
            other => Err(Error::PromptError(format!("expected select for '{prompt}', got {other:?}"))),
        }
    }

    fn confirm(&self, prompt: &str, _default: bool) -> Result<bool> {
        match self.next(prompt)? {
            Reply::Confirm(value) => Ok(value),
            other => Err(Error::PromptError(format!("expected confirm for '{prompt}', got {other:?}"))),
        }
    }
}

/// Installer recording the directories it was asked to install into.
#[derive(Default)]
pub struct RecordingInstaller {
    pub installs: RefCell<Vec<PathBuf>>,
}

impl RecordingInstaller {
    pub fn count(&self) -> usize {
        self.installs.borrow().len()
    }
}

impl Installer for RecordingInstaller {
    fn install(&self, dir: &Path) -> Result<()> {
        self.installs.borrow_mut().push(dir.to_path_buf());
        Ok(())
    }
}

/// Writes `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: impl AsRef<[u8]>) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

pub const PNG_BYTES: [u8; 12] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0xff, 0x7b, 0x7d];

/// Small template tree with every kind of file the pipeline handles.
pub fn make_template(root: &Path) {
    write_file(root, "README.md", "# %{= name }\n");
    write_file(root, "index.html", "<h1>%{- name }</h1>\n{{ site.title }}\n");
    write_file(root, "_posts/hello.md", "static content\n");
    write_file(root, "assets/logo.png", PNG_BYTES);
    write_file(root, "gitignore", "_site/\n");
    write_file(root, ".DS_Store", "junk");
    write_file(
        root,
        "package.json",
        "{\n  \"name\": %{= slug | tojson },\n  \"private\": true\n}\n",
    );
}
