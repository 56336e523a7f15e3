mod common;

use common::{make_template, write_file};
use sitebaker::constants::TEMPLATE_IGNORE_FILE;
use sitebaker::error::Error;
use sitebaker::ignore::{parse_ignore_file, select_files, FileKind};
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_parse_ignore_file() {
    let temp_dir = TempDir::new().unwrap();

    // Test without .sitebakerignore
    let glob_set = parse_ignore_file(temp_dir.path()).unwrap();
    assert!(glob_set.is_match(".DS_Store"));
    assert!(glob_set.is_match("nested/dir/.DS_Store"));
    assert!(glob_set.is_match("package.json"));
    assert!(glob_set.is_match("gitignore"));
    assert!(!glob_set.is_match("index.md"));

    // Test with .sitebakerignore
    write_file(temp_dir.path(), TEMPLATE_IGNORE_FILE, "# drafts\n\n_drafts/**\n*.bak\n");
    let glob_set = parse_ignore_file(temp_dir.path()).unwrap();
    assert!(glob_set.is_match("_drafts/post.md"));
    assert!(glob_set.is_match("notes.bak"));
    assert!(glob_set.is_match("Thumbs.db")); // Default pattern still works
}

#[test]
fn test_invalid_pattern() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), TEMPLATE_IGNORE_FILE, "a[\n");

    assert!(matches!(parse_ignore_file(temp_dir.path()), Err(Error::IgnoreError(_))));
}

#[test]
fn test_text_and_binary_selections_are_disjoint() {
    let temp_dir = TempDir::new().unwrap();
    make_template(temp_dir.path());
    let ignored = parse_ignore_file(temp_dir.path()).unwrap();

    let text = select_files(temp_dir.path(), &ignored, FileKind::Text).unwrap();
    let binary = select_files(temp_dir.path(), &ignored, FileKind::Binary).unwrap();

    assert_eq!(
        text,
        vec![
            PathBuf::from("README.md"),
            PathBuf::from("_posts/hello.md"),
            PathBuf::from("index.html"),
        ]
    );
    assert_eq!(binary, vec![PathBuf::from("assets/logo.png")]);
}
