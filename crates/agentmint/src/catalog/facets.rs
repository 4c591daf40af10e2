use crate::prelude::{eprintln, println, *};
use agentmint_core::catalog::{facets, Facets};
use colored::Colorize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::{load_catalog, KindArg};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct FacetsOptions {
    /// Catalog to summarize: agents, tools, mcp or all
    #[arg(value_name = "KIND", value_enum, default_value = "agents")]
    pub kind: KindArg,

    /// Read the catalog from a saved JSON payload instead of the backend
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct FacetsOutput {
    pub kind: KindArg,
    #[serde(flatten)]
    pub facets: Facets,
}

pub async fn run(options: FacetsOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Counting {} catalog facets...", options.kind);
    }

    let items = load_catalog(options.kind, options.file.as_deref(), &global).await?;
    let output = FacetsOutput {
        kind: options.kind,
        facets: facets(&items),
    };

    if options.json {
        let json = to_pretty_json(&output)?;
        println!("{}", json);
    } else {
        print!("{}", format_facets_text(&output));
    }

    Ok(())
}

/// Category rows in menu order, zero counts included, followed by any
/// categories the backend sent that the menu does not list.
fn category_rows(kind: KindArg, counts: &BTreeMap<String, usize>) -> Vec<(String, usize)> {
    let mut rows: Vec<(String, usize)> = Vec::new();

    for catalog in kind.kinds() {
        for category in catalog.categories() {
            if rows.iter().any(|(name, _)| name == category) {
                continue;
            }
            rows.push((category.to_string(), counts.get(*category).copied().unwrap_or(0)));
        }
    }

    for (name, count) in counts {
        if !rows.iter().any(|(known, _)| known == name) {
            rows.push((name.clone(), *count));
        }
    }

    rows
}

fn push_section<'a>(
    result: &mut String,
    title: &str,
    rows: impl IntoIterator<Item = (&'a str, usize)>,
) {
    let mut table = new_table();
    table.set_titles(prettytable::row![title, "Count"]);
    let mut empty = true;

    for (value, count) in rows {
        table.add_row(prettytable::row![value, count]);
        empty = false;
    }

    result.push_str(&f!("\n{}\n", title.to_uppercase().bright_white().bold()));
    if empty {
        result.push_str(&f!("  {}\n", "(none)".bright_black()));
    } else {
        result.push_str(&table.to_string());
    }
}

fn format_facets_text(output: &FacetsOutput) -> String {
    let mut result = String::new();
    let facets = &output.facets;

    result.push_str(&f!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&f!(
        "{}\n",
        f!(
            "AGENTMINT {} FACETS ({} items)",
            output.kind.as_str().to_uppercase(),
            facets.total
        )
        .bright_cyan()
        .bold()
    ));
    result.push_str(&f!("{}\n", "=".repeat(80).bright_cyan()));

    result.push_str(&f!(
        "\n{}: {} | {}: {}\n",
        "Free".green(),
        facets.free.to_string().bright_yellow(),
        "Verified".green(),
        facets.verified.to_string().bright_yellow()
    ));

    let categories = category_rows(output.kind, &facets.categories);
    push_section(
        &mut result,
        "Category",
        categories.iter().map(|(name, count)| (name.as_str(), *count)),
    );
    push_section(
        &mut result,
        "Chain",
        facets.chains.iter().map(|(k, v)| (k.as_str(), *v)),
    );
    push_section(
        &mut result,
        "Feature",
        facets.tags.iter().map(|(k, v)| (k.as_str(), *v)),
    );
    push_section(
        &mut result,
        "Mode",
        facets.integration_modes.iter().map(|(k, v)| (k.as_str(), *v)),
    );

    result.push_str(&f!(
        "\n{}:\n  {}\n\n",
        "To filter on a value".bright_white().bold(),
        f!(
            "agentmint catalog list {} --category <name> --chain <name>",
            output.kind
        )
        .cyan()
    ));

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures;

    fn output() -> FacetsOutput {
        FacetsOutput {
            kind: KindArg::Agents,
            facets: facets(&fixtures::agents()),
        }
    }

    #[test]
    fn test_category_rows_include_zero_counts_in_menu_order() {
        let output = output();

        let rows = category_rows(KindArg::Agents, &output.facets.categories);

        assert_eq!(rows[0], ("DeFi".to_string(), 1));
        assert_eq!(rows[1], ("Trading".to_string(), 1));
        assert_eq!(rows[2], ("Social".to_string(), 0));
        assert_eq!(rows.len(), 8);
    }

    #[test]
    fn test_category_rows_append_unknown_categories() {
        let mut counts = BTreeMap::new();
        counts.insert("Memes".to_string(), 2);

        let rows = category_rows(KindArg::Tools, &counts);

        assert_eq!(rows.last(), Some(&("Memes".to_string(), 2)));
    }

    #[test]
    fn test_category_rows_all_deduplicates_shared_categories() {
        let rows = category_rows(KindArg::All, &BTreeMap::new());

        let analytics = rows.iter().filter(|(name, _)| name == "Analytics").count();
        assert_eq!(analytics, 1);
    }

    #[test]
    fn test_facets_json_is_flat() {
        let json = serde_json::to_value(output()).unwrap();

        assert_eq!(json["kind"], "agents");
        assert_eq!(json["total"], 3);
        assert_eq!(json["chains"]["Multi-chain"], 1);
        assert_eq!(json["verified"], 2);
    }

    #[test]
    fn test_format_facets_text() {
        let formatted = format_facets_text(&output());

        assert!(formatted.contains("AGENTMINT AGENTS FACETS (3 items)"));
        assert!(formatted.contains("Solana"));
        assert!(formatted.contains("lending"));
        assert!(formatted.contains("(none)"));
    }
}
