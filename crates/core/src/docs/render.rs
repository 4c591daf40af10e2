//! Line-oriented renderer for documentation bodies.
//!
//! Rendering is a two-state machine (`Normal`, `InCodeBlock`) fed one line at a
//! time. [`classify_line`] decides what a line is given the current state, and
//! the state decides which [`Block`], if any, that line produces. The
//! [`Renderer`] iterator is lazy and never revisits a line.

use std::iter::FusedIterator;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::search::{highlight, RenderableResult};

/// Marker opening and closing a code block.
pub const FENCE: &str = "```";

/// Language attached to fences that don't name one.
pub const DEFAULT_LANGUAGE: &str = "text";

static ORDERED_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)\. ").unwrap());
static BOLD_SPAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());

/// A run of inline text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum Span {
    Text(String),
    /// Produced by `**bold**` markup and by search highlighting.
    Emphasis(String),
}

impl Span {
    pub fn as_str(&self) -> &str {
        match self {
            Span::Text(text) | Span::Emphasis(text) => text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListStyle {
    Unordered,
    /// Carries the number written in the source.
    Ordered(u32),
}

/// A typed unit of rendered output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading { spans: Vec<Span> },
    Subheading { spans: Vec<Span> },
    ListItem { style: ListStyle, spans: Vec<Span> },
    Paragraph { spans: Vec<Span> },
    Code { text: String, language: String },
}

impl Block {
    pub fn heading(text: &str) -> Self {
        Block::Heading {
            spans: parse_inline(text),
        }
    }

    pub fn subheading(text: &str) -> Self {
        Block::Subheading {
            spans: parse_inline(text),
        }
    }

    pub fn list_item(style: ListStyle, text: &str) -> Self {
        Block::ListItem {
            style,
            spans: parse_inline(text),
        }
    }

    pub fn paragraph(text: &str) -> Self {
        Block::Paragraph {
            spans: parse_inline(text),
        }
    }

    pub fn code(text: impl Into<String>, language: impl Into<String>) -> Self {
        Block::Code {
            text: text.into(),
            language: language.into(),
        }
    }

    /// The block's text with emphasis markers dropped.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { spans }
            | Block::Subheading { spans }
            | Block::ListItem { spans, .. }
            | Block::Paragraph { spans } => spans.iter().map(Span::as_str).collect(),
            Block::Code { text, .. } => text.clone(),
        }
    }
}

/// Split a line into plain and emphasized runs at `**text**` markers.
///
/// Unbalanced markers are left as literal text.
pub fn parse_inline(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in BOLD_SPAN.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        if whole.start() > last {
            spans.push(Span::Text(text[last..whole.start()].to_string()));
        }
        spans.push(Span::Emphasis(inner.as_str().to_string()));
        last = whole.end();
    }

    if last < text.len() {
        spans.push(Span::Text(text[last..].to_string()));
    }

    spans
}

/// What a single body line is, given whether a code block is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Opening or closing fence; `info` is whatever follows the backticks.
    Fence { info: &'a str },
    /// Any line inside an open code block, verbatim.
    Code(&'a str),
    Subheading(&'a str),
    Heading(&'a str),
    UnorderedItem(&'a str),
    OrderedItem { number: u32, text: &'a str },
    Paragraph(&'a str),
    Blank,
}

/// Classify one line. Forms are tested in priority order: fence, code content,
/// `## `, `# `, `- `, `N. `, blank, paragraph.
pub fn classify_line(line: &str, in_code_block: bool) -> LineKind<'_> {
    if let Some(info) = line.strip_prefix(FENCE) {
        return LineKind::Fence { info: info.trim() };
    }

    if in_code_block {
        return LineKind::Code(line);
    }

    if let Some(text) = line.strip_prefix("## ") {
        return LineKind::Subheading(text.trim());
    }

    if let Some(text) = line.strip_prefix("# ") {
        return LineKind::Heading(text.trim());
    }

    if let Some(text) = line.strip_prefix("- ") {
        return LineKind::UnorderedItem(text.trim());
    }

    if let Some(caps) = ORDERED_ITEM.captures(line) {
        if let (Some(prefix), Some(digits)) = (caps.get(0), caps.get(1)) {
            return LineKind::OrderedItem {
                number: digits.as_str().parse().unwrap_or(0),
                text: line[prefix.end()..].trim(),
            };
        }
    }

    if line.trim().is_empty() {
        return LineKind::Blank;
    }

    LineKind::Paragraph(line.trim())
}

/// Byte length of the block marker (`# `, `## `, `- `, `N. `) opening a
/// prose line. Zero for paragraphs and for lines that carry no prose.
pub(crate) fn marker_len(kind: &LineKind<'_>, line: &str) -> usize {
    match kind {
        LineKind::Subheading(_) => "## ".len(),
        LineKind::Heading(_) => "# ".len(),
        LineKind::UnorderedItem(_) => "- ".len(),
        LineKind::OrderedItem { .. } => ORDERED_ITEM.find(line).map_or(0, |m| m.end()),
        _ => 0,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum RenderState {
    Normal,
    InCodeBlock { language: String, lines: Vec<String> },
}

impl RenderState {
    fn in_code_block(&self) -> bool {
        matches!(self, RenderState::InCodeBlock { .. })
    }

    fn feed(&mut self, line: &str) -> Option<Block> {
        match classify_line(line, self.in_code_block()) {
            LineKind::Fence { info } => self.toggle_fence(info),
            LineKind::Code(text) => {
                if let RenderState::InCodeBlock { lines, .. } = self {
                    lines.push(text.to_string());
                }
                None
            }
            LineKind::Subheading(text) => Some(Block::subheading(text)),
            LineKind::Heading(text) => Some(Block::heading(text)),
            LineKind::UnorderedItem(text) => Some(Block::list_item(ListStyle::Unordered, text)),
            LineKind::OrderedItem { number, text } => {
                Some(Block::list_item(ListStyle::Ordered(number), text))
            }
            LineKind::Paragraph(text) => Some(Block::paragraph(text)),
            LineKind::Blank => None,
        }
    }

    fn toggle_fence(&mut self, info: &str) -> Option<Block> {
        match std::mem::replace(self, RenderState::Normal) {
            RenderState::Normal => {
                let language = if info.is_empty() { DEFAULT_LANGUAGE } else { info };
                *self = RenderState::InCodeBlock {
                    language: language.to_string(),
                    lines: Vec::new(),
                };
                None
            }
            RenderState::InCodeBlock { language, lines } => Some(Block::Code {
                text: lines.join("\n"),
                language,
            }),
        }
    }

    /// Flush a fence that was opened but never closed.
    fn finish(&mut self) -> Option<Block> {
        match std::mem::replace(self, RenderState::Normal) {
            RenderState::InCodeBlock { language, lines } => Some(Block::Code {
                text: lines.join("\n"),
                language,
            }),
            RenderState::Normal => None,
        }
    }
}

/// Lazy iterator of [`Block`]s over a body.
///
/// An unterminated fence is emitted as a final code block holding everything
/// after the opening fence.
#[derive(Debug, Clone)]
pub struct Renderer<'a> {
    lines: std::str::Lines<'a>,
    state: RenderState,
}

impl<'a> Renderer<'a> {
    pub fn new(body: &'a str) -> Self {
        Self {
            lines: body.lines(),
            state: RenderState::Normal,
        }
    }

    pub fn in_code_block(&self) -> bool {
        self.state.in_code_block()
    }
}

impl Iterator for Renderer<'_> {
    type Item = Block;

    fn next(&mut self) -> Option<Block> {
        for line in self.lines.by_ref() {
            if let Some(block) = self.state.feed(line) {
                return Some(block);
            }
        }

        self.state.finish()
    }
}

impl FusedIterator for Renderer<'_> {}

/// Render a body into blocks, in line order.
pub fn render(body: &str) -> Renderer<'_> {
    Renderer::new(body)
}

/// Render a search result, emphasizing the active query when there is one.
///
/// Emphasis only lands in prose; code blocks and their language tags come out
/// exactly as written.
pub fn render_result(result: &RenderableResult) -> Vec<Block> {
    match result.highlight.as_deref() {
        Some(query) => render(&highlight(&result.body, query)).collect(),
        None => render(&result.body).collect(),
    }
}

/// A heading entry in a section's table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineEntry {
    pub level: u8,
    pub text: String,
}

/// List the headings of a body, skipping anything inside code blocks.
pub fn outline(body: &str) -> Vec<OutlineEntry> {
    render(body)
        .filter_map(|block| match &block {
            Block::Heading { .. } => Some(OutlineEntry {
                level: 1,
                text: block.plain_text(),
            }),
            Block::Subheading { .. } => Some(OutlineEntry {
                level: 2,
                text: block.plain_text(),
            }),
            _ => None,
        })
        .collect()
}
