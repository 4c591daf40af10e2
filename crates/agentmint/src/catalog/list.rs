use crate::prelude::{eprintln, println, *};
use agentmint_core::catalog::{
    filter, paginate, sort_items, CatalogItem, CatalogPaginationInfo, FilterCriteria, SortOrder,
};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use super::{load_catalog, resolve_categories, KindArg, SortArg};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ListOptions {
    /// Catalog to list: agents, tools, mcp or all
    #[arg(value_name = "KIND", value_enum, default_value = "agents")]
    pub kind: KindArg,

    /// Case-insensitive text matched against name, description and category
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only show these categories (repeatable)
    #[arg(short, long = "category", value_name = "CATEGORY")]
    pub categories: Vec<String>,

    /// Only show items on these chains (repeatable); Multi-chain items always match
    #[arg(long = "chain", value_name = "CHAIN")]
    pub chains: Vec<String>,

    /// Only show items tagged with one of these features (repeatable)
    #[arg(long = "feature", value_name = "FEATURE")]
    pub features: Vec<String>,

    /// Only show items offering one of these integration modes (repeatable)
    #[arg(long = "mode", value_name = "MODE")]
    pub modes: Vec<String>,

    /// Hide paid items
    #[arg(long)]
    pub free: bool,

    /// Hide unverified items
    #[arg(long)]
    pub verified: bool,

    /// Result ordering
    #[arg(long, value_enum, default_value = "featured")]
    pub sort: SortArg,

    /// Page number (1-indexed)
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Number of items per page
    #[arg(short, long, env = "AGENTMINT_LIMIT", default_value = "20")]
    pub limit: usize,

    /// Read the catalog from a saved JSON payload instead of the backend
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListOptions {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::default()
            .with_search(self.search.as_deref().unwrap_or_default())
            .with_categories(resolve_categories(self.kind, &self.categories))
            .with_chains(self.chains.iter().map(|c| c.trim()))
            .with_features(self.features.iter().map(|f| f.trim()))
            .with_integration_modes(self.modes.iter().map(|m| m.trim()))
            .free_only(self.free)
            .verified_only(self.verified)
    }
}

#[derive(Debug, Serialize)]
pub struct ListOutput {
    pub kind: KindArg,
    pub criteria: FilterCriteria,
    pub sort: SortOrder,
    pub items: Vec<CatalogItem>,
    pub pagination: CatalogPaginationInfo,
}

pub async fn run(options: ListOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Loading {} catalog...", options.kind);
    }

    let items = load_catalog(options.kind, options.file.as_deref(), &global).await?;
    let list_output = list_catalog_data(&items, &options);

    log::info!(
        "{} of {} {} items match",
        list_output.pagination.total_items,
        items.len(),
        options.kind
    );

    if options.json {
        output_json(&list_output)?;
    } else {
        output_formatted(&list_output, &options)?;
    }

    Ok(())
}

/// Filter, order and page an already-loaded catalog
pub fn list_catalog_data(items: &[CatalogItem], options: &ListOptions) -> ListOutput {
    let criteria = options.criteria();
    let sort = SortOrder::from(options.sort);

    let visible = filter(items, &criteria);
    let ordered = sort_items(&visible, sort);
    let page = paginate(&ordered, options.page, options.limit);

    ListOutput {
        kind: options.kind,
        criteria,
        sort,
        items: page.items,
        pagination: page.pagination,
    }
}

fn format_price(item: &CatalogItem) -> String {
    if item.is_free() {
        "Free".to_string()
    } else {
        f!("{:.2}", item.price)
    }
}

fn format_status(item: &CatalogItem) -> String {
    let mut flags = Vec::new();
    if item.is_verified {
        flags.push("verified");
    }
    if item.is_premium {
        flags.push("premium");
    }
    if item.is_owned {
        flags.push("owned");
    } else if item.is_minted {
        flags.push("minted");
    }
    flags.join(", ")
}

fn join_set<'a>(values: impl IntoIterator<Item = &'a String>) -> String {
    values
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Human-readable summary of the active filters, one entry per criterion
fn describe_criteria(criteria: &FilterCriteria) -> Vec<String> {
    let mut parts = Vec::new();

    if !criteria.search.trim().is_empty() {
        parts.push(f!("search \"{}\"", criteria.search.trim()));
    }
    if !criteria.categories.is_empty() {
        parts.push(f!("category: {}", join_set(&criteria.categories)));
    }
    if !criteria.chains.is_empty() {
        parts.push(f!("chain: {}", join_set(&criteria.chains)));
    }
    if !criteria.features.is_empty() {
        parts.push(f!("feature: {}", join_set(&criteria.features)));
    }
    if !criteria.integration_modes.is_empty() {
        parts.push(f!("mode: {}", join_set(&criteria.integration_modes)));
    }
    if criteria.show_free_only {
        parts.push("free only".to_string());
    }
    if criteria.show_verified_only {
        parts.push("verified only".to_string());
    }

    parts
}

fn format_list_json(output: &ListOutput) -> Result<String> {
    to_pretty_json(output)
}

fn format_list_text(output: &ListOutput, options: &ListOptions) -> String {
    let mut result = String::new();
    let pagination = &output.pagination;
    let kind = options.kind;

    // Header
    result.push_str(&f!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&f!(
        "{}\n",
        f!(
            "AGENTMINT {} CATALOG (Page {} of {})",
            kind.as_str().to_uppercase(),
            pagination.current_page,
            pagination.total_pages
        )
        .bright_cyan()
        .bold()
    ));
    result.push_str(&f!("{}\n", "=".repeat(80).bright_cyan()));

    let filters = describe_criteria(&output.criteria);
    if !filters.is_empty() {
        result.push_str(&f!(
            "\n{}: {}\n",
            "Filters".green(),
            filters.join(" | ").bright_white()
        ));
    }

    if output.items.is_empty() {
        result.push_str(&f!("\n{}\n", "No items match the current filters.".yellow()));
    } else {
        let mut table = new_table();
        let offset = pagination
            .current_page
            .saturating_sub(1)
            .saturating_mul(pagination.limit);

        if kind == KindArg::All {
            table.set_titles(prettytable::row![
                "#", "Kind", "Name", "Category", "Chains", "Price", "Status"
            ]);
        } else {
            table.set_titles(prettytable::row![
                "#", "Name", "Category", "Chains", "Price", "Status"
            ]);
        }

        for (idx, item) in output.items.iter().enumerate() {
            let number = offset.saturating_add(idx + 1);
            if kind == KindArg::All {
                table.add_row(prettytable::row![
                    number,
                    item.kind,
                    item.name,
                    item.category,
                    join_set(&item.chains),
                    format_price(item),
                    format_status(item)
                ]);
            } else {
                table.add_row(prettytable::row![
                    number,
                    item.name,
                    item.category,
                    join_set(&item.chains),
                    format_price(item),
                    format_status(item)
                ]);
            }
        }

        result.push('\n');
        result.push_str(&table.to_string());
    }

    // Navigation section
    result.push_str(&f!("\n{}\n", "=".repeat(80).bright_yellow()));
    result.push_str(&f!("{}\n", "NAVIGATION".bright_yellow().bold()));
    result.push_str(&f!("{}\n", "=".repeat(80).bright_yellow()));

    result.push_str(&f!(
        "\n{} {} {} {} ({} {})\n",
        "Showing page".bright_white(),
        pagination.current_page.to_string().bright_cyan().bold(),
        "of".bright_white(),
        pagination.total_pages.to_string().bright_cyan().bold(),
        pagination.total_items.to_string().bright_cyan().bold(),
        "matching items".bright_white()
    ));

    result.push_str(&f!("\n{}:\n", "To navigate".bright_white().bold()));
    if pagination.has_more {
        result.push_str(&f!(
            "  {}: {}\n",
            "Next page".green(),
            f!(
                "agentmint catalog list {} --page {}",
                kind,
                pagination.current_page + 1
            )
            .cyan()
        ));
    }
    if pagination.current_page > 1 {
        result.push_str(&f!(
            "  {}: {}\n",
            "Previous page".green(),
            f!(
                "agentmint catalog list {} --page {}",
                kind,
                pagination.current_page - 1
            )
            .cyan()
        ));
    }

    result.push_str(&f!(
        "\n{}:\n",
        "To change page size".bright_white().bold()
    ));
    result.push_str(&f!(
        "  {}\n",
        f!("agentmint catalog list {} --limit <number>", kind).cyan()
    ));

    result.push_str(&f!("\n{}:\n", "To see filter values".bright_white().bold()));
    result.push_str(&f!(
        "  {}\n",
        f!("agentmint catalog facets {}", kind).cyan()
    ));

    result.push_str(&f!(
        "\n{}:\n",
        "To get JSON output".bright_white().bold()
    ));
    result.push_str(&f!(
        "  {}\n",
        f!("agentmint catalog list {} --json", kind).cyan()
    ));

    result.push('\n');
    result
}

fn output_json(output: &ListOutput) -> Result<()> {
    let json = format_list_json(output)?;
    println!("{}", json);
    Ok(())
}

fn output_formatted(output: &ListOutput, options: &ListOptions) -> Result<()> {
    let formatted = format_list_text(output, options);
    print!("{}", formatted);
    Ok(())
}
