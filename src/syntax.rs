//! Lexer for the template marker syntax.
//!
//! A template is plain text interleaved with three kinds of markers, all
//! opened by the same token (`%` by default):
//! - `%{ ... }` a logic block (statement),
//! - `%{= ... }` a raw interpolation,
//! - `%{- ... }` an HTML-escaped interpolation.

use crate::constants::MARKER;
use crate::error::{Error, Result};

/// One piece of a tokenized template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text emitted verbatim
    Text(&'a str),
    /// Statement such as `if hostname` or `endfor`
    Logic(&'a str),
    /// Expression inserted as-is
    Raw(&'a str),
    /// Expression inserted with HTML escaping
    Escaped(&'a str),
}

/// Opening token of the markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    open: String,
}

impl Markers {
    pub fn new<S: Into<String>>(token: S) -> Self {
        let token: String = token.into();
        Self { open: format!("{token}{{") }
    }

    /// Full opening sequence, e.g. `%{`.
    pub fn open(&self) -> &str {
        &self.open
    }

    /// Returns true if `content` holds at least one opening sequence.
    pub fn has_markers(&self, content: &str) -> bool {
        content.contains(&self.open)
    }

    /// Splits `content` into text and marker segments.
    ///
    /// # Errors
    /// * `Error::TemplateError` if a marker is never closed
    pub fn tokenize<'a>(&self, content: &'a str) -> Result<Vec<Segment<'a>>> {
        let mut segments = Vec::new();
        let mut rest = content;
        let mut offset = 0;

        while let Some(start) = rest.find(&self.open) {
            if start > 0 {
                segments.push(Segment::Text(&rest[..start]));
            }
            let body_start = start + self.open.len();
            let body_len = closing_brace(&rest[body_start..]).ok_or_else(|| {
                Error::TemplateError(format!(
                    "unterminated marker '{}' at byte {}",
                    self.open,
                    offset + start
                ))
            })?;
            let body = &rest[body_start..body_start + body_len];
            segments.push(classify(body));

            let consumed = body_start + body_len + 1;
            offset += consumed;
            rest = &rest[consumed..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Text(rest));
        }
        Ok(segments)
    }
}

impl Default for Markers {
    fn default() -> Self {
        Markers::new(MARKER)
    }
}

fn classify(body: &str) -> Segment<'_> {
    if let Some(expr) = body.strip_prefix('=') {
        Segment::Raw(expr.trim())
    } else if let Some(expr) = body.strip_prefix('-') {
        Segment::Escaped(expr.trim())
    } else {
        Segment::Logic(body.trim())
    }
}

/// Byte index of the brace closing a marker body, skipping nested braces and
/// quoted strings.
fn closing_brace(body: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (idx, ch) in body.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' => quote = Some(ch),
            '{' => depth += 1,
            '}' if depth == 0 => return Some(idx),
            '}' => depth -= 1,
            _ => {}
        }
    }
    None
}
