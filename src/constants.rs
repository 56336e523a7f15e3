//! Common constants used throughout the sitebaker application.

/// Opening token of the template markers: `%{ }`, `%{= }` and `%{- }`.
pub const MARKER: &str = "%";

/// Manifest file name, merged instead of overwritten
pub const MANIFEST_FILE: &str = "package.json";

/// Name of the ignore-file template inside the template tree
pub const IGNORE_TEMPLATE: &str = "gitignore";

/// Name the ignore-file template is placed under in the destination
pub const IGNORE_TARGET: &str = ".gitignore";

/// File holding the custom domain of the site
pub const CUSTOM_DOMAIN_FILE: &str = "CNAME";

/// Template-level file listing additional paths to leave out
pub const TEMPLATE_IGNORE_FILE: &str = ".sitebakerignore";

/// Paths never copied from the template tree by the text and binary stages
pub const DEFAULT_IGNORE_PATTERNS: [&str; 7] = [
    IGNORE_TEMPLATE,
    MANIFEST_FILE,
    TEMPLATE_IGNORE_FILE,
    "**/.DS_Store",
    "**/Thumbs.db",
    "**/desktop.ini",
    ".git/**",
];

/// Extensions of files copied byte-for-byte without rendering
pub const BINARY_EXTENSIONS: [&str; 17] = [
    "png", "jpg", "jpeg", "gif", "ico", "webp", "bmp", "tiff", "woff", "woff2", "ttf",
    "otf", "eot", "pdf", "zip", "gz", "mp4",
];

/// Permalink styles understood by the site generator
pub const PERMALINK_STYLES: [&str; 4] = ["date", "pretty", "ordinal", "none"];

pub const DEFAULT_THEME: &str = "minima";

pub const DEFAULT_VERSION: &str = "0.0.0";

pub const DEFAULT_TIMEZONE: &str = "UTC";

pub const DEFAULT_NPM_CLIENT: &str = "npm";
