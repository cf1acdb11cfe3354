//! Generic rendering engine for cluster resources
//!
//! One template abstraction drives all three output modes: a `Format` is
//! resolved from the user's mode selector, bound against a resource
//! variant's ordered column registry, and rendered row by row. Headers come
//! from the registry entries the template actually touches, so the header
//! row always matches the rendered columns.

use std::collections::HashMap;
use std::io::Write;

use thiserror::Error;

pub mod humanize;
pub mod node;
pub mod pool;

pub use node::node_format;
pub use pool::pool_format;

/// Mode selector for the default multi-column table output.
pub const TABLE_FORMAT_KEY: &str = "table";
/// Mode selector for line-oriented `field: value` output.
pub const RAW_FORMAT_KEY: &str = "raw";
/// Mode selector for one JSON record per resource.
pub const JSON_FORMAT_KEY: &str = "json";

pub(crate) const LABELS_HEADER: &str = "LABELS";

/// Errors raised while resolving or applying a template
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("template references unknown column '{0}'")]
    UnknownColumn(String),

    #[error("invalid template: {0}")]
    Syntax(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A resolved output format, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Format {
    /// Header row followed by one aligned body row per resource
    Table(String),
    /// Template expanded once per resource, no header row
    Plain(String),
    /// One JSON object per resource over the full column registry
    Json,
}

impl Format {
    /// Classify a template string: a `table ` prefix requests a header row,
    /// anything else renders plain. No validation happens here; bad
    /// placeholders surface when the template is applied.
    pub fn from_template(source: &str) -> Format {
        match source.strip_prefix("table ") {
            Some(rest) => Format::Table(rest.to_string()),
            None => Format::Plain(source.to_string()),
        }
    }
}

/// One displayable column of a resource variant.
///
/// `tag` is the placeholder name used in templates, `header` the label shown
/// in table output and used as the JSON field name.
pub struct Column<R: 'static> {
    pub tag: &'static str,
    pub header: &'static str,
    pub value: fn(&R) -> String,
}

/// A resource variant that can be rendered by [`render`].
pub trait Renderable {
    /// Ordered column registry for this variant.
    fn columns() -> &'static [Column<Self>]
    where
        Self: Sized;

    /// Raw value of a single label, empty when absent.
    fn label(&self, key: &str) -> String;
}

/// Ordered, append-once collection of header labels accumulated over one
/// render invocation.
#[derive(Debug, Default)]
pub struct HeaderAccumulator {
    headers: Vec<String>,
}

impl HeaderAccumulator {
    pub fn push(&mut self, header: &str) {
        if !self.headers.iter().any(|h| h == header) {
            self.headers.push(header.to_string());
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

/// Header label for a single-key label lookup: the final `.`/`/`-separated
/// segment of the key, with `-` and `_` normalized to spaces.
pub fn label_header(key: &str) -> String {
    let last = key.rsplit(['.', '/']).next().unwrap_or(key);
    last.replace(['-', '_'], " ")
}

/// Join a label map into `k=v` pairs separated by commas. Map order is not
/// guaranteed.
pub(crate) fn join_labels(labels: &HashMap<String, String>) -> String {
    labels
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(",")
}

/// Render a sequence of resources with the given format.
///
/// Input order is preserved. Output is buffered in full before anything is
/// written, so a template error never leaves partial output in the sink.
pub fn render<R: Renderable + 'static, W: Write>(
    resources: &[R],
    format: &Format,
    out: &mut W,
) -> Result<(), FormatError> {
    let rendered = match format {
        Format::Table(template) => render_table(resources, template)?,
        Format::Plain(template) => render_plain(resources, template)?,
        Format::Json => render_json(resources)?,
    };
    out.write_all(rendered.as_bytes())?;
    Ok(())
}

fn render_table<R: Renderable + 'static>(
    resources: &[R],
    template: &str,
) -> Result<String, FormatError> {
    let segments = bind::<R>(parse_template(template)?)?;

    let mut headers = HeaderAccumulator::default();
    for segment in &segments {
        match segment {
            BoundSegment::Column(col) => headers.push(col.header),
            BoundSegment::Label { header, .. } => headers.push(header),
            BoundSegment::Literal(_) => {}
        }
    }

    let mut lines = Vec::with_capacity(resources.len() + 1);
    lines.push(headers.headers().join("\t"));
    for resource in resources {
        lines.push(expand_row(resource, &segments));
    }
    Ok(align_columns(&lines))
}

fn render_plain<R: Renderable + 'static>(
    resources: &[R],
    template: &str,
) -> Result<String, FormatError> {
    let segments = bind::<R>(parse_template(template)?)?;

    let mut output = String::new();
    for resource in resources {
        let row = expand_row(resource, &segments);
        output.push_str(&row);
        if !row.ends_with('\n') {
            output.push('\n');
        }
    }
    Ok(output)
}

fn render_json<R: Renderable + 'static>(resources: &[R]) -> Result<String, FormatError> {
    let mut output = String::new();
    for resource in resources {
        let mut record = serde_json::Map::new();
        for col in R::columns() {
            record.insert(
                col.header.to_string(),
                serde_json::Value::String((col.value)(resource)),
            );
        }
        output.push_str(&serde_json::to_string(&serde_json::Value::Object(record))?);
        output.push('\n');
    }
    Ok(output)
}

/// A parsed template piece before column lookup.
#[derive(Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Column(String),
    Label(String),
}

/// A template piece bound to a variant's registry.
enum BoundSegment<R: 'static> {
    Literal(String),
    Column(&'static Column<R>),
    Label { key: String, header: String },
}

/// Expand `\t` and `\n` escapes so shell-supplied templates can carry tabs
/// and newlines.
fn expand_escapes(template: &str) -> String {
    template.replace("\\t", "\t").replace("\\n", "\n")
}

fn parse_template(template: &str) -> Result<Vec<Segment>, FormatError> {
    let template = expand_escapes(template);
    let mut segments = Vec::new();
    let mut rest = template.as_str();

    while let Some(start) = rest.find("{{") {
        if start > 0 {
            segments.push(Segment::Literal(rest[..start].to_string()));
        }
        let after = &rest[start + 2..];
        let end = after
            .find("}}")
            .ok_or_else(|| FormatError::Syntax("unterminated placeholder".to_string()))?;
        segments.push(parse_placeholder(after[..end].trim())?);
        rest = &after[end + 2..];
    }
    if !rest.is_empty() {
        segments.push(Segment::Literal(rest.to_string()));
    }
    Ok(segments)
}

fn parse_placeholder(inner: &str) -> Result<Segment, FormatError> {
    let body = inner
        .strip_prefix('.')
        .ok_or_else(|| FormatError::Syntax(format!("expected leading '.' in '{}'", inner)))?;

    match body.split_once(char::is_whitespace) {
        None => Ok(Segment::Column(body.to_string())),
        Some(("Label", arg)) => {
            let key = arg
                .trim()
                .strip_prefix('"')
                .and_then(|k| k.strip_suffix('"'))
                .ok_or_else(|| {
                    FormatError::Syntax(format!("Label key must be double-quoted: {}", arg))
                })?;
            Ok(Segment::Label(key.to_string()))
        }
        Some((name, _)) => Err(FormatError::Syntax(format!(
            "column '{}' takes no argument",
            name
        ))),
    }
}

fn bind<R: Renderable + 'static>(
    segments: Vec<Segment>,
) -> Result<Vec<BoundSegment<R>>, FormatError> {
    segments
        .into_iter()
        .map(|segment| match segment {
            Segment::Literal(text) => Ok(BoundSegment::Literal(text)),
            Segment::Column(tag) => match R::columns().iter().find(|c| c.tag == tag) {
                Some(col) => Ok(BoundSegment::Column(col)),
                None => Err(FormatError::UnknownColumn(tag)),
            },
            Segment::Label(key) => {
                let header = label_header(&key);
                Ok(BoundSegment::Label { key, header })
            }
        })
        .collect()
}

fn expand_row<R: Renderable + 'static>(resource: &R, segments: &[BoundSegment<R>]) -> String {
    let mut row = String::new();
    for segment in segments {
        match segment {
            BoundSegment::Literal(text) => row.push_str(text),
            BoundSegment::Column(col) => row.push_str(&(col.value)(resource)),
            BoundSegment::Label { key, .. } => row.push_str(&resource.label(key)),
        }
    }
    row
}

/// Pad tab-separated cells to their column widths with a 3-space gutter.
/// The last cell of each row is left unpadded.
fn align_columns(lines: &[String]) -> String {
    let rows: Vec<Vec<&str>> = lines.iter().map(|l| l.split('\t').collect()).collect();

    let mut widths: Vec<usize> = Vec::new();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if i >= widths.len() {
                widths.push(cell.len());
            } else {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    let mut output = String::new();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                output.push_str("   ");
            }
            if i + 1 < row.len() {
                output.push_str(&format!("{:width$}", cell, width = widths[i]));
            } else {
                output.push_str(cell);
            }
        }
        output.push('\n');
    }
    output
}
