use crate::prelude::{eprintln, println, *};
use agentmint_core::docs::{search, ResultKind, SearchMatch, DEFAULT_SECTION};
use colored::Colorize;

use super::show::format_doc_text;
use super::{load_library, term, LibraryOptions, RenderedDoc};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct SearchOptions {
    /// Text to look for in section titles and bodies (case-insensitive, literal)
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Section shown when the query is blank
    #[arg(long, value_name = "ID", default_value = DEFAULT_SECTION)]
    pub section: String,

    #[clap(flatten)]
    pub library: LibraryOptions,

    /// Output the result and its rendered blocks as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(options: SearchOptions, global: crate::Global) -> Result<()> {
    let library = load_library(options.library.path.as_deref())?;
    let doc = RenderedDoc::from(search(&options.query, &options.section, &library));

    log::debug!(
        "Query '{}' matched {} of {} sections",
        options.query.trim(),
        doc.result.matches.len(),
        library.len()
    );
    if global.verbose {
        eprintln!("Searching {} sections for '{}'", library.len(), options.query.trim());
    }

    if options.json {
        let json = to_pretty_json(&doc)?;
        println!("{}", json);
    } else {
        print!("{}", format_search_text(&doc, term::terminal_width()));
    }

    Ok(())
}

fn format_ranking(matches: &[SearchMatch]) -> String {
    let mut table = new_table();
    table.set_titles(prettytable::row!["Score", "Id", "Title", "Matched in"]);

    for m in matches {
        let matched_in = match (m.title_match, m.body_match) {
            (true, true) => "title, body",
            (true, false) => "title",
            _ => "body",
        };
        table.add_row(prettytable::row![m.score, m.id, m.title, matched_in]);
    }

    table.to_string()
}

fn format_search_text(doc: &RenderedDoc, width: usize) -> String {
    let mut result = format_doc_text(doc, width);

    if doc.result.kind == ResultKind::MultipleMatches {
        result.push_str(&f!("{}\n", "RANKING".bright_yellow().bold()));
        result.push_str(&format_ranking(&doc.result.matches));
        result.push_str(&f!("\n{}:\n", "To read a result".bright_white().bold()));
        if let Some(best) = doc.result.matches.first() {
            result.push_str(&f!(
                "  {}\n\n",
                f!("agentmint docs show {}", best.id).cyan()
            ));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentmint_core::docs::search::NO_RESULTS_TITLE;
    use agentmint_core::docs::{builtin_library, DocLibrary, DocSection};

    fn library() -> DocLibrary {
        DocLibrary::new(vec![
            DocSection::new("id1", "Intro", "About wallets"),
            DocSection::new("id2", "Wallet Setup", "Connect your wallet"),
        ])
        .unwrap()
    }

    #[test]
    fn test_format_search_text_multiple_matches() {
        let doc = RenderedDoc::from(search("wallet", "id1", &library()));

        let formatted = format_search_text(&doc, 80);

        assert!(formatted.contains("SEARCH RESULTS FOR \"WALLET\""));
        assert!(formatted.contains("RANKING"));
        assert!(formatted.contains("title, body"));
        assert!(formatted.contains("agentmint docs show id2"));
    }

    #[test]
    fn test_format_search_text_no_results() {
        let doc = RenderedDoc::from(search("zzz", "id1", &library()));

        let formatted = format_search_text(&doc, 80);

        assert!(formatted.contains(&NO_RESULTS_TITLE.to_uppercase()));
        assert!(!formatted.contains("RANKING"));
    }

    #[test]
    fn test_search_builtin_ranks_title_match_first() {
        let doc = RenderedDoc::from(search("deploy wizard", "faq", builtin_library()));

        assert_eq!(doc.result.kind, ResultKind::MultipleMatches);
        assert_eq!(doc.result.matches[0].id, "deploy-wizard");
    }

    #[test]
    fn test_format_ranking_columns() {
        let doc = RenderedDoc::from(search("wallet", "id1", &library()));

        let ranking = format_ranking(&doc.result.matches);

        assert!(ranking.contains("Score"));
        assert!(ranking.contains("11"));
        assert!(ranking.contains("Wallet Setup"));
    }
}
