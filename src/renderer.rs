//! Template renderer and rendering functionality for sitebaker.
//! Translates the marker syntax into a MiniJinja template and renders it
//! against the context. Text between markers never reaches the engine's
//! lexer, so Liquid markup in site templates passes through untouched.
use crate::error::Result;
use crate::syntax::{Markers, Segment};
use minijinja::{Environment, Value};

/// Context key carrying the verbatim text segments of a template.
const TEXT_SEGMENTS_KEY: &str = "__sb_text";

/// Trait for template rendering engines.
pub trait TemplateRenderer: Send + Sync {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
    markers: Markers,
}

impl MiniJinjaRenderer {
    /// Creates a new renderer using the default `%` marker token.
    pub fn new() -> Self {
        Self::with_markers(Markers::default())
    }

    pub fn with_markers(markers: Markers) -> Self {
        let mut env = Environment::new();
        env.add_filter("sb_raw", raw_filter);
        env.add_filter("sb_escape", escape_filter);
        Self { env, markers }
    }

    /// Builds the MiniJinja source for `segments` and collects their text parts.
    fn translate<'a>(segments: &[Segment<'a>]) -> (String, Vec<&'a str>) {
        let mut source = String::new();
        let mut texts = Vec::new();
        for segment in segments {
            let piece = match segment {
                Segment::Text(text) => {
                    texts.push(*text);
                    format!("{{{{ {}[{}] }}}}", TEXT_SEGMENTS_KEY, texts.len() - 1)
                }
                Segment::Logic(stmt) => format!("{{% {stmt} %}}"),
                Segment::Raw(expr) => format!("{{{{ ({expr}) | sb_raw }}}}"),
                Segment::Escaped(expr) => format!("{{{{ ({expr}) | sb_escape }}}}"),
            };
            source.push_str(&piece);
        }
        (source, texts)
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders a template string using MiniJinja.
    ///
    /// Content without any marker is returned unchanged.
    ///
    /// # Errors
    /// * `Error::TemplateError` if a marker is not terminated
    /// * `Error::MinijinjaError` if the translated template fails to parse or render
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        if !self.markers.has_markers(template) {
            return Ok(template.to_string());
        }

        let segments = self.markers.tokenize(template)?;
        let (source, texts) = Self::translate(&segments);

        let mut render_context = match context {
            serde_json::Value::Object(map) => map.clone(),
            _ => serde_json::Map::new(),
        };
        render_context.insert(TEXT_SEGMENTS_KEY.to_string(), texts.into());

        Ok(self.env.render_str(&source, serde_json::Value::Object(render_context))?)
    }
}

fn display(value: &Value) -> String {
    if value.is_undefined() || value.is_none() {
        String::new()
    } else {
        value.to_string()
    }
}

fn raw_filter(value: Value) -> String {
    display(&value)
}

fn escape_filter(value: Value) -> String {
    escape_html(&display(&value))
}

/// Escapes `& < > " '` for safe inclusion in HTML.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
