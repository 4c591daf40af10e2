use crate::prelude::{eprintln, println, *};
use agentmint_core::docs::{outline, search, OutlineEntry, ResultKind, DEFAULT_SECTION};
use colored::Colorize;
use serde::Serialize;

use super::{load_library, term, LibraryOptions, RenderedDoc};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ShowOptions {
    /// Section id (see `agentmint docs list`)
    #[arg(value_name = "ID", default_value = DEFAULT_SECTION)]
    pub id: String,

    #[clap(flatten)]
    pub library: LibraryOptions,

    /// Output the result and its rendered blocks as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct TocOptions {
    /// Section id (see `agentmint docs list`)
    #[arg(value_name = "ID")]
    pub id: String,

    #[clap(flatten)]
    pub library: LibraryOptions,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct TocOutput {
    pub id: String,
    pub title: String,
    pub headings: Vec<OutlineEntry>,
}

pub fn run_show(options: ShowOptions, global: crate::Global) -> Result<()> {
    let library = load_library(options.library.path.as_deref())?;
    let doc = RenderedDoc::from(search("", &options.id, &library));

    if doc.result.kind == ResultKind::ComingSoon {
        log::warn!("No docs section with id '{}'", options.id);
    }
    if global.verbose {
        eprintln!("{} blocks rendered", doc.blocks.len());
    }

    if options.json {
        let json = to_pretty_json(&doc)?;
        println!("{}", json);
    } else {
        print!("{}", format_doc_text(&doc, term::terminal_width()));
    }

    Ok(())
}

pub fn run_toc(options: TocOptions, _global: crate::Global) -> Result<()> {
    let library = load_library(options.library.path.as_deref())?;
    let section = library
        .get(&options.id)
        .ok_or_else(|| Error::SectionNotFound(options.id.clone()))?;

    let output = TocOutput {
        id: section.id.clone(),
        title: section.title.clone(),
        headings: outline(&section.body),
    };

    if options.json {
        let json = to_pretty_json(&output)?;
        println!("{}", json);
    } else {
        print!("{}", format_toc_text(&output));
    }

    Ok(())
}

/// Title banner followed by the rendered blocks
pub fn format_doc_text(doc: &RenderedDoc, width: usize) -> String {
    let mut result = String::new();

    result.push_str(&f!("\n{}\n", "=".repeat(width).bright_cyan()));
    result.push_str(&f!("{}\n", doc.result.title.to_uppercase().bright_cyan().bold()));
    result.push_str(&f!("{}\n", "=".repeat(width).bright_cyan()));

    result.push_str(&term::format_blocks(&doc.blocks, width));
    result.push('\n');
    result
}

fn format_toc_text(output: &TocOutput) -> String {
    let mut result = String::new();

    result.push_str(&f!(
        "\n{} {}\n\n",
        output.title.bright_cyan().bold(),
        f!("({})", output.id).bright_black()
    ));

    if output.headings.is_empty() {
        result.push_str(&f!("  {}\n", "(no headings)".bright_black()));
    }
    for entry in &output.headings {
        let indent = "  ".repeat(entry.level as usize);
        result.push_str(&f!("{indent}{}\n", entry.text));
    }

    result.push('\n');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentmint_core::docs::builtin_library;

    #[test]
    fn test_format_doc_text_section() {
        let doc = RenderedDoc::from(search("", "minting", builtin_library()));

        let formatted = format_doc_text(&doc, 80);

        assert!(formatted.contains("MINTING AGENTS"));
        assert!(formatted.contains("Mint flow"));
        assert!(formatted.contains("[http]"));
        assert!(formatted.contains("GET /api/mint/status?tx=0xabc123"));
    }

    #[test]
    fn test_format_doc_text_unknown_section_is_coming_soon() {
        let doc = RenderedDoc::from(search("", "roadmap", builtin_library()));

        let formatted = format_doc_text(&doc, 80);

        assert_eq!(doc.result.kind, ResultKind::ComingSoon);
        assert!(formatted.contains("COMING SOON"));
        assert!(formatted.contains("roadmap"));
    }

    #[test]
    fn test_format_toc_text_indents_by_level() {
        let output = TocOutput {
            id: "faq".to_string(),
            title: "FAQ".to_string(),
            headings: vec![
                OutlineEntry {
                    level: 1,
                    text: "Questions".to_string(),
                },
                OutlineEntry {
                    level: 2,
                    text: "Is minting free?".to_string(),
                },
            ],
        };

        let formatted = format_toc_text(&output);

        assert!(formatted.contains("\n  Questions\n"));
        assert!(formatted.contains("\n    Is minting free?\n"));
    }

    #[test]
    fn test_run_toc_unknown_id() {
        let options = TocOptions {
            id: "nope".to_string(),
            library: LibraryOptions::default(),
            json: true,
        };
        let global = crate::Global {
            api_url: crate::config::DEFAULT_API_URL.to_string(),
            timeout: 30,
            verbose: false,
        };

        let err = run_toc(options, global).unwrap_err();

        assert!(err.to_string().contains("No docs section with id 'nope'"));
    }
}
