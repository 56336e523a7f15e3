use serde_json::json;
use sitebaker::answers::Answers;
use sitebaker::answers::validate_url;
use sitebaker::context::{custom_hostname, split_author, Context};

fn answers() -> Answers {
    Answers {
        name: "My Site".into(),
        slug: "my-site".into(),
        description: "A site".into(),
        keywords: "blog, jekyll".into(),
        version: "1.0.0".into(),
        url: "https://www.example.com/".into(),
        author: "Jane Doe <jane@example.com>".into(),
        github: "https://github.com/jane/my-site.git".into(),
        theme: "minima".into(),
        permalink: "pretty".into(),
        timezone: "Europe/Berlin".into(),
        token: String::new(),
    }
}

#[test]
fn test_split_author() {
    assert_eq!(
        split_author("Jane Doe <jane@example.com>"),
        ("Jane Doe".to_string(), "jane@example.com".to_string())
    );
    assert_eq!(split_author("Jane Doe"), ("Jane Doe".to_string(), String::new()));
    assert_eq!(split_author(""), (String::new(), String::new()));
}

#[test]
fn test_derive_full_context() {
    let context = Context::derive(&answers());

    assert_eq!(context.get_str("author_name"), Some("Jane Doe"));
    assert_eq!(context.get_str("author_email"), Some("jane@example.com"));
    assert_eq!(context.get_str("github_author"), Some("jane"));
    assert_eq!(context.get_str("github_author_url"), Some("https://github.com/jane"));
    assert_eq!(context.get_str("github_repo"), Some("my-site"));
    assert_eq!(context.get_str("github_url"), Some("https://github.com/jane/my-site"));
    assert_eq!(context.get_str("url"), Some("https://www.example.com"));
    assert_eq!(context.hostname(), Some("www.example.com"));
    assert_eq!(context.get("keyword_list"), Some(&json!(["blog", "jekyll"])));
    assert_eq!(context.get_str("generator_version"), Some(env!("CARGO_PKG_VERSION")));
    assert!(context.get("year").and_then(|y| y.as_i64()).unwrap() >= 2024);
}

#[test]
fn test_github_pages_url_has_no_hostname() {
    let mut answers = answers();
    answers.url = "https://jane.github.io".into();
    let context = Context::derive(&answers);

    assert_eq!(context.hostname(), None);
    assert!(context.get("hostname").is_none());
}

#[test]
fn test_empty_url_has_no_hostname() {
    let mut answers = answers();
    answers.url = String::new();
    assert!(Context::derive(&answers).get("hostname").is_none());
}

#[test]
fn test_malformed_github_yields_empty_fields() {
    let mut answers = answers();
    answers.github = "not a repository".into();
    let context = Context::derive(&answers);

    assert_eq!(context.get_str("github_author"), Some(""));
    assert_eq!(context.get_str("github_repo"), Some(""));
    assert_eq!(context.get_str("github_url"), Some(""));
    assert_eq!(context.get_str("github"), Some("not a repository"));
}

#[test]
fn test_hostname_from_value() {
    assert_eq!(Context::from_value(json!({"hostname": null})).hostname(), None);
    assert_eq!(Context::from_value(json!({"hostname": ""})).hostname(), None);
    assert_eq!(Context::from_value(json!({"hostname": "foo.com"})).hostname(), Some("foo.com"));
    assert!(Context::from_value(json!("scalar")).is_empty());
}

#[test]
fn test_host_and_port_without_scheme_is_a_custom_domain() {
    assert!(validate_url("blog.example.org:8080").is_ok());
    assert_eq!(custom_hostname("blog.example.org:8080"), Some("blog.example.org".to_string()));

    let mut answers = answers();
    answers.url = "blog.example.org:8080".into();
    assert_eq!(Context::derive(&answers).hostname(), Some("blog.example.org"));
}

#[test]
fn test_only_github_io_subdomains_are_github_pages() {
    assert_eq!(custom_hostname("https://jane.github.io"), None);
    assert_eq!(custom_hostname("github.io"), None);
    assert_eq!(custom_hostname("https://mygithub.io"), Some("mygithub.io".to_string()));
}
