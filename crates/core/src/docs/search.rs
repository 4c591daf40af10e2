//! Relevance-ranked search over a [`DocLibrary`].

use std::sync::LazyLock;

use regex::RegexBuilder;
use serde::Serialize;

use super::render::{classify_line, marker_len, LineKind};
use super::{DocLibrary, DocSection};

pub const TITLE_MATCH_SCORE: u32 = 10;
pub const BODY_MATCH_SCORE: u32 = 1;

/// Maximum snippet length, in characters, in a multi-result summary.
pub const SNIPPET_LENGTH: usize = 200;

pub const NO_RESULTS_TITLE: &str = "No Results Found";
pub const COMING_SOON_TITLE: &str = "Coming Soon";

static FENCED_CODE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?s)```.*?```").unwrap());
static STRAY_FENCE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?m)^```.*$").unwrap());
static HEADING_MARKER: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"(?m)^#{1,6}\s+").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    /// No query: the selected section passed through unchanged
    Section,
    /// Query matched exactly one section
    SingleMatch,
    /// Query matched several sections; the body is a synthesized summary
    MultipleMatches,
    NoResults,
    /// No query and the selected section does not exist
    ComingSoon,
}

/// A section that qualified for a query, with its relevance score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchMatch {
    pub id: String,
    pub title: String,
    pub score: u32,
    pub title_match: bool,
    pub body_match: bool,
}

/// What the docs pane should show for the current section and query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderableResult {
    pub kind: ResultKind,
    pub title: String,
    pub body: String,
    /// Qualifying sections in ranked order; empty without a query.
    pub matches: Vec<SearchMatch>,
    /// The query to emphasize when rendering, if one was active.
    pub highlight: Option<String>,
}

impl RenderableResult {
    fn from_section(kind: ResultKind, section: &DocSection, highlight: Option<String>) -> Self {
        Self {
            kind,
            title: section.title.clone(),
            body: section.body.clone(),
            matches: Vec::new(),
            highlight,
        }
    }
}

/// Score one section against an already lowercased needle.
fn score_section(section: &DocSection, needle: &str) -> Option<SearchMatch> {
    let title_match = section.title.to_lowercase().contains(needle);
    let body_match = section.body.to_lowercase().contains(needle);

    if !title_match && !body_match {
        return None;
    }

    let mut score = 0;
    if title_match {
        score += TITLE_MATCH_SCORE;
    }
    if body_match {
        score += BODY_MATCH_SCORE;
    }

    Some(SearchMatch {
        id: section.id.clone(),
        title: section.title.clone(),
        score,
        title_match,
        body_match,
    })
}

/// Every section matching `query`, highest score first.
///
/// Ties keep library order. A blank query matches nothing.
pub fn rank_sections(query: &str, library: &DocLibrary) -> Vec<SearchMatch> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<SearchMatch> = library
        .iter()
        .filter_map(|section| score_section(section, &needle))
        .collect();

    // sort_by is stable
    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches
}

/// Plain-text preview of a body for multi-result summaries.
///
/// Fenced code and heading markers are removed, then the text is cut to
/// [`SNIPPET_LENGTH`] characters. The caller appends the ellipsis.
pub fn snippet(body: &str) -> String {
    let without_code = FENCED_CODE.replace_all(body, "");
    let without_fences = STRAY_FENCE.replace_all(&without_code, "");
    let without_headings = HEADING_MARKER.replace_all(&without_fences, "");

    without_headings
        .trim()
        .chars()
        .take(SNIPPET_LENGTH)
        .collect::<String>()
        .trim_end()
        .to_string()
}

fn summarize(matches: &[SearchMatch], library: &DocLibrary) -> String {
    let mut body = String::new();

    for m in matches {
        let preview = library
            .get(&m.id)
            .map(|section| snippet(&section.body))
            .unwrap_or_default();

        body.push_str(&format!("## {}\n{}...\n\n", m.title, preview));
    }

    body.trim_end().to_string()
}

fn coming_soon(selected_id: &str) -> RenderableResult {
    RenderableResult {
        kind: ResultKind::ComingSoon,
        title: COMING_SOON_TITLE.to_string(),
        body: format!(
            "The \"{selected_id}\" page is still being written. Check back soon, or use the search box to find related topics."
        ),
        matches: Vec::new(),
        highlight: None,
    }
}

fn no_results(query: &str) -> RenderableResult {
    RenderableResult {
        kind: ResultKind::NoResults,
        title: NO_RESULTS_TITLE.to_string(),
        body: format!(
            "Your search for \"{query}\" did not match any documentation.\n\n## Suggestions\n- Check the spelling of your search term\n- Try a shorter or more general keyword\n- Browse the sections in the sidebar"
        ),
        matches: Vec::new(),
        highlight: None,
    }
}

/// Resolve what the docs pane shows for `selected_id` and `query`.
///
/// - blank query: the selected section unchanged, or a "Coming Soon"
///   placeholder when the id is unknown
/// - no qualifying section: a "No Results Found" placeholder
/// - one qualifying section: that section, highlighted
/// - several: a `Search Results for "<query>"` summary, highest score first
pub fn search(query: &str, selected_id: &str, library: &DocLibrary) -> RenderableResult {
    let query = query.trim();

    if query.is_empty() {
        return match library.get(selected_id) {
            Some(section) => RenderableResult::from_section(ResultKind::Section, section, None),
            None => coming_soon(selected_id),
        };
    }

    let matches = rank_sections(query, library);

    match matches.len() {
        0 => no_results(query),
        1 => match library.get(&matches[0].id) {
            Some(section) => RenderableResult {
                matches: matches.clone(),
                ..RenderableResult::from_section(
                    ResultKind::SingleMatch,
                    section,
                    Some(query.to_string()),
                )
            },
            None => no_results(query),
        },
        _ => RenderableResult {
            kind: ResultKind::MultipleMatches,
            title: format!("Search Results for \"{query}\""),
            body: summarize(&matches, library),
            matches,
            highlight: Some(query.to_string()),
        },
    }
}

/// Wrap every case-insensitive occurrence of `query` in `**` markers.
///
/// The query is raw user input and is matched literally; characters such as
/// `.` or `*` carry no pattern meaning. Only prose is touched: fence lines,
/// code inside fences and the `#`, `- ` or `N. ` marker opening a line are
/// kept as written, so highlighting never changes how a body renders. A blank
/// query returns the body as is.
pub fn highlight(body: &str, query: &str) -> String {
    let query = query.trim();
    if query.is_empty() {
        return body.to_string();
    }

    let pattern = regex::escape(query);
    let Ok(re) = RegexBuilder::new(&pattern).case_insensitive(true).build() else {
        // Only reachable for queries exceeding the regex size limit
        return body.to_string();
    };

    let mut in_code_block = false;
    let lines: Vec<String> = body
        .split('\n')
        .map(|line| {
            let kind = classify_line(line, in_code_block);
            match kind {
                LineKind::Fence { .. } => {
                    in_code_block = !in_code_block;
                    line.to_string()
                }
                LineKind::Code(_) | LineKind::Blank => line.to_string(),
                _ => {
                    let (marker, prose) = line.split_at(marker_len(&kind, line));
                    let prose =
                        re.replace_all(prose, |caps: &regex::Captures| format!("**{}**", &caps[0]));
                    format!("{marker}{prose}")
                }
            }
        })
        .collect();

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallet_library() -> DocLibrary {
        DocLibrary::new(vec![
            DocSection::new("id1", "Setup", "install wallet"),
            DocSection::new("id2", "Wallet Connection", "setup your wallet"),
        ])
        .unwrap()
    }

    fn marketplace_library() -> DocLibrary {
        DocLibrary::new(vec![
            DocSection::new(
                "getting-started",
                "Getting Started",
                "# Getting Started\nBrowse agents in the store.\n```bash\nnpm install\n```\nThen connect.",
            ),
            DocSection::new(
                "minting",
                "Minting Agents",
                "## Mint flow\n1. Pick an agent\n2. Approve the transaction",
            ),
            DocSection::new("faq", "FAQ", "- Is minting free? Gas fees apply."),
        ])
        .unwrap()
    }

    // ============================================================================
    // search tests
    // ============================================================================

    #[test]
    fn test_search_blank_query_passes_selected_section_through() {
        let library = wallet_library();
        let result = search("   ", "id2", &library);

        assert_eq!(result.kind, ResultKind::Section);
        assert_eq!(result.title, "Wallet Connection");
        assert_eq!(result.body, "setup your wallet");
        assert!(result.highlight.is_none());
        assert!(result.matches.is_empty());
    }

    #[test]
    fn test_search_blank_query_unknown_section_is_coming_soon() {
        let result = search("", "deploy-wizard", &wallet_library());
        assert_eq!(result.kind, ResultKind::ComingSoon);
        assert_eq!(result.title, "Coming Soon");
        assert!(result.body.contains("deploy-wizard"));
    }

    #[test]
    fn test_search_title_match_outranks_body_match() {
        let result = search("wallet", "id1", &wallet_library());

        assert_eq!(result.kind, ResultKind::MultipleMatches);
        let ranked: Vec<(&str, u32)> = result
            .matches
            .iter()
            .map(|m| (m.id.as_str(), m.score))
            .collect();
        assert_eq!(ranked, vec![("id2", 11), ("id1", 1)]);
    }

    #[test]
    fn test_search_no_match_placeholder() {
        let result = search("zzzznotfound", "id1", &wallet_library());
        assert_eq!(result.kind, ResultKind::NoResults);
        assert_eq!(result.title, "No Results Found");
        assert!(result.body.contains("zzzznotfound"));
        assert!(result.matches.is_empty());
    }

    #[test]
    fn test_search_no_match_on_empty_library() {
        let result = search("anything", "x", &DocLibrary::default());
        assert_eq!(result.title, NO_RESULTS_TITLE);
    }

    #[test]
    fn test_search_single_match_returns_full_section() {
        let result = search("gas fees", "getting-started", &marketplace_library());

        assert_eq!(result.kind, ResultKind::SingleMatch);
        assert_eq!(result.title, "FAQ");
        assert_eq!(result.body, "- Is minting free? Gas fees apply.");
        assert_eq!(result.highlight.as_deref(), Some("gas fees"));
        assert_eq!(result.matches.len(), 1);
    }

    #[test]
    fn test_search_multiple_matches_summary() {
        let result = search("mint", "faq", &marketplace_library());

        assert_eq!(result.kind, ResultKind::MultipleMatches);
        assert_eq!(result.title, "Search Results for \"mint\"");
        assert_eq!(
            result.body,
            "## Minting Agents\nMint flow\n1. Pick an agent\n2. Approve the transaction...\n\n## FAQ\n- Is minting free? Gas fees apply...."
        );
    }

    #[test]
    fn test_search_ties_keep_library_order() {
        let library = DocLibrary::new(vec![
            DocSection::new("b", "Beta", "token"),
            DocSection::new("a", "Alpha", "token"),
            DocSection::new("c", "Token Gamma", ""),
        ])
        .unwrap();

        let ids: Vec<String> = rank_sections("token", &library)
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_search_query_is_trimmed() {
        let result = search("  faq  ", "minting", &marketplace_library());
        assert_eq!(result.kind, ResultKind::SingleMatch);
        assert_eq!(result.title, "FAQ");
    }

    #[test]
    fn test_search_regex_metacharacters_are_literal() {
        let library = DocLibrary::new(vec![
            DocSection::new("a", "Patterns", "use a.b*c to match"),
            DocSection::new("b", "Other", "aXbbbc"),
        ])
        .unwrap();

        let result = search("a.b*c", "a", &library);
        assert_eq!(result.kind, ResultKind::SingleMatch);
        assert_eq!(result.title, "Patterns");
    }

    // ============================================================================
    // snippet tests
    // ============================================================================

    #[test]
    fn test_snippet_strips_code_and_headings() {
        let body = "# Title\nIntro line\n```rust\nfn main() {}\n```\n## Next\nMore";
        assert_eq!(snippet(body), "Title\nIntro line\n\nNext\nMore");
    }

    #[test]
    fn test_snippet_truncates_to_limit() {
        let body = "x".repeat(500);
        assert_eq!(snippet(&body).chars().count(), SNIPPET_LENGTH);
    }

    #[test]
    fn test_snippet_truncates_on_char_boundary() {
        let body = "é".repeat(300);
        let preview = snippet(&body);
        assert_eq!(preview.chars().count(), SNIPPET_LENGTH);
    }

    #[test]
    fn test_snippet_drops_unclosed_fence_marker() {
        let body = "Start\n```js\nconsole.log(1)";
        let preview = snippet(body);
        assert!(!preview.contains("```"));
        assert!(preview.starts_with("Start"));
    }

    // ============================================================================
    // highlight tests
    // ============================================================================

    #[test]
    fn test_highlight_is_case_insensitive() {
        assert_eq!(
            highlight("Wallet and wallet and WALLET", "wallet"),
            "**Wallet** and **wallet** and **WALLET**"
        );
    }

    #[test]
    fn test_highlight_escapes_metacharacters() {
        assert_eq!(
            highlight("try a.b*c but not aXbbbc", "a.b*c"),
            "try **a.b*c** but not aXbbbc"
        );
    }

    #[test]
    fn test_highlight_with_brackets_and_anchors() {
        assert_eq!(highlight("cost: $5 (approx)", "$5 (approx)"), "cost: **$5 (approx)**");
        assert_eq!(highlight("[x]", "[x]"), "**[x]**");
    }

    #[test]
    fn test_highlight_blank_query_is_identity() {
        assert_eq!(highlight("body", "  "), "body");
    }

    #[test]
    fn test_highlight_skips_fence_language_and_code() {
        let body = "Run it with js:\n```js\nconst js = 1;\n```";

        assert_eq!(
            highlight(body, "js"),
            "Run it with **js**:\n```js\nconst js = 1;\n```"
        );
    }

    #[test]
    fn test_highlight_keeps_block_markers() {
        let body = "# Gas guide\n## gas\n- gas limits\n12. gas price";

        assert_eq!(
            highlight(body, "gas"),
            "# **Gas** guide\n## **gas**\n- **gas** limits\n12. **gas** price"
        );
    }

    #[test]
    fn test_highlight_query_with_backtick_leaves_fences_alone() {
        let body = "Use `npm`:\n```sh\nnpm i\n```\nDone";

        assert_eq!(
            highlight(body, "`"),
            "Use **`**npm**`**:\n```sh\nnpm i\n```\nDone"
        );
    }

    #[test]
    fn test_highlight_query_with_hash_keeps_heading() {
        assert_eq!(highlight("# Tag #1\ntext", "#"), "# Tag **#**1\ntext");
    }

    #[test]
    fn test_highlight_preserves_line_endings() {
        assert_eq!(highlight("a wallet\n\nwallet\n", "wallet"), "a **wallet**\n\n**wallet**\n");
    }

    #[test]
    fn test_highlight_no_occurrence() {
        assert_eq!(highlight("nothing here", "wallet"), "nothing here");
    }
}
