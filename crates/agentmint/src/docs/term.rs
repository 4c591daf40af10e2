//! Terminal presentation of rendered documentation blocks.
//!
//! Headings are underlined, list items get a hanging indent, emphasis is bold
//! yellow and code is printed verbatim under its language tag. Prose is
//! word-wrapped to the terminal width; code never is.

use agentmint_core::docs::{Block, ListStyle, Span};
use colored::Colorize;
use terminal_size::{terminal_size, Width};

const DEFAULT_WIDTH: usize = 80;
const MIN_WIDTH: usize = 40;
const MAX_WIDTH: usize = 100;

/// Width to wrap prose at, from the attached terminal when there is one.
pub fn terminal_width() -> usize {
    terminal_size()
        .map(|(Width(w), _)| w as usize)
        .unwrap_or(DEFAULT_WIDTH)
        .clamp(MIN_WIDTH, MAX_WIDTH)
}

/// Style each word of an emphasis run on its own, so a wrapped line never
/// starts inside an escape sequence opened on the line before.
fn emphasize(text: &str) -> String {
    let mut out = String::new();
    let mut word = String::new();

    for ch in text.chars() {
        if ch.is_whitespace() {
            if !word.is_empty() {
                out.push_str(&word.bold().yellow().to_string());
                word.clear();
            }
            out.push(ch);
        } else {
            word.push(ch);
        }
    }
    if !word.is_empty() {
        out.push_str(&word.bold().yellow().to_string());
    }

    out
}

/// Styled text of the spans with runs of whitespace collapsed to one space.
fn styled_text(spans: &[Span]) -> String {
    let joined: String = spans
        .iter()
        .map(|span| match span {
            Span::Emphasis(text) => emphasize(text),
            Span::Text(text) => text.clone(),
        })
        .collect();

    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Wrap styled prose. Words are never split; one wider than the line gets a
/// line of its own.
fn wrap_styled(spans: &[Span], options: textwrap::Options) -> Vec<String> {
    let options = options
        .break_words(false)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
        .wrap_algorithm(textwrap::WrapAlgorithm::FirstFit);

    textwrap::wrap(&styled_text(spans), options)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

fn plain_width(spans: &[Span]) -> usize {
    let text: String = spans.iter().map(Span::as_str).collect();
    textwrap::core::display_width(&text)
}

fn format_block(block: &Block, width: usize) -> String {
    let mut out = String::new();

    match block {
        Block::Heading { spans } => {
            let text: String = spans.iter().map(Span::as_str).collect();
            out.push_str(&format!("\n{}\n", text.bright_cyan().bold()));
            out.push_str(&format!("{}\n", "=".repeat(plain_width(spans).min(width)).bright_cyan()));
        }
        Block::Subheading { spans } => {
            let text: String = spans.iter().map(Span::as_str).collect();
            out.push_str(&format!("\n{}\n", text.bright_white().bold()));
            out.push_str(&format!("{}\n", "-".repeat(plain_width(spans).min(width)).bright_black()));
        }
        Block::ListItem { style, spans } => {
            let marker = match style {
                ListStyle::Unordered => "•".to_string(),
                ListStyle::Ordered(n) => format!("{n}."),
            };
            let first = format!("  {} ", marker.green());
            let rest = " ".repeat(2 + textwrap::core::display_width(&marker) + 1);
            let options = textwrap::Options::new(width)
                .initial_indent(&first)
                .subsequent_indent(&rest);
            for line in wrap_styled(spans, options) {
                out.push_str(&line);
                out.push('\n');
            }
        }
        Block::Paragraph { spans } => {
            out.push('\n');
            for line in wrap_styled(spans, textwrap::Options::new(width)) {
                out.push_str(&line);
                out.push('\n');
            }
        }
        Block::Code { text, language } => {
            out.push_str(&format!("\n  {}\n", format!("[{language}]").bright_black()));
            for line in text.lines() {
                out.push_str(&format!("    {}\n", line.green()));
            }
        }
    }

    out
}

/// Format blocks for the terminal, wrapping prose at `width` columns.
pub fn format_blocks(blocks: &[Block], width: usize) -> String {
    let mut out = String::new();
    for block in blocks {
        out.push_str(&format_block(block, width));
    }
    out
}
