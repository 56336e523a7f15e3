//! Normalization of GitHub repository identifiers.

use regex::Regex;
use std::sync::OnceLock;

/// Owner and repository of a GitHub project, with their canonical URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GithubRepo {
    /// Account or organization owning the repository
    pub author: String,
    /// Profile URL of the owner, `https://github.com/<owner>`
    pub author_url: String,
    /// Repository name without any `.git` suffix
    pub repo: String,
    /// Repository URL, `https://github.com/<owner>/<repo>`
    pub url: String,
}

fn github_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^(?:(?:https?://|git://)?(?:www\.)?github\.com/|git@github\.com:)?([A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)/([A-Za-z0-9._-]+?)(?:\.git)?/?$",
        )
        .expect("github pattern is valid")
    })
}

/// Parses `owner/repo`, a GitHub web URL or a clone URL into a [`GithubRepo`].
///
/// Returns `None` when the input does not have the `owner/repo` shape.
///
/// # Example
/// ```
/// use sitebaker::github::parse;
///
/// let short = parse("octocat/hello-world").unwrap();
/// let long = parse("https://github.com/octocat/hello-world.git").unwrap();
/// assert_eq!(short, long);
/// assert_eq!(short.url, "https://github.com/octocat/hello-world");
/// ```
pub fn parse(value: &str) -> Option<GithubRepo> {
    let captures = github_pattern().captures(value.trim())?;
    let author = captures.get(1)?.as_str().to_string();
    let repo = captures.get(2)?.as_str().to_string();
    if repo.is_empty() || repo == "." || repo == ".." {
        return None;
    }

    let author_url = format!("https://github.com/{author}");
    let url = format!("{author_url}/{repo}");
    Some(GithubRepo { author, author_url, repo, url })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ssh_url() {
        let parsed = parse("git@github.com:octocat/hello.git").unwrap();
        assert_eq!(parsed.author, "octocat");
        assert_eq!(parsed.repo, "hello");
    }

    #[test]
    fn test_dotted_repo_name() {
        let parsed = parse("octocat/octocat.github.io").unwrap();
        assert_eq!(parsed.repo, "octocat.github.io");
        assert_eq!(parsed.url, "https://github.com/octocat/octocat.github.io");
    }

    #[test]
    fn test_rejects_extra_segments() {
        assert!(parse("https://github.com/octocat/hello/tree/main").is_none());
        assert!(parse("https://gitlab.com/octocat/hello").is_none());
    }
}
