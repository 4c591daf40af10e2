//! Catalog filtering
//!
//! Pure functions that derive the visible subset of a marketplace catalog
//! (agents, tools or MCP services) from the current filter state. The three
//! catalogs share one [`CatalogItem`] shape; backend payloads are mapped onto it
//! by the [`adapters`] before any filtering happens.
//!
//! Filtering never mutates its input and never re-orders it: the result keeps
//! the relative order of the source list. Sorting is a separate, opt-in step
//! (see [`view::sort_items`]).

pub mod adapters;
pub mod view;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub use adapters::{
    items_from_value, parse_catalog, AgentRecord, CatalogError, McpServiceRecord, ToolRecord,
};
pub use view::{facets, paginate, sort_items, CatalogPage, CatalogPaginationInfo, Facets, SortOrder};

/// Chain label that satisfies any chain filter.
pub const MULTI_CHAIN: &str = "Multi-chain";

/// Which catalog an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    Agent,
    Tool,
    Mcp,
}

const AGENT_CATEGORIES: &[&str] = &[
    "DeFi",
    "Trading",
    "Social",
    "Analytics",
    "Gaming",
    "NFT",
    "Infrastructure",
    "Security",
];

const TOOL_CATEGORIES: &[&str] = &[
    "Data",
    "Automation",
    "Development",
    "Analytics",
    "Communication",
    "Security",
];

const MCP_CATEGORIES: &[&str] = &[
    "Blockchain",
    "Data",
    "AI",
    "Storage",
    "Communication",
    "Development",
    "Finance",
    "Utilities",
];

impl CatalogKind {
    pub const ALL: [CatalogKind; 3] = [CatalogKind::Agent, CatalogKind::Tool, CatalogKind::Mcp];

    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogKind::Agent => "agent",
            CatalogKind::Tool => "tool",
            CatalogKind::Mcp => "mcp",
        }
    }

    /// Backend path segment serving this catalog
    pub fn endpoint(&self) -> &'static str {
        match self {
            CatalogKind::Agent => "agents",
            CatalogKind::Tool => "tools",
            CatalogKind::Mcp => "mcp-services",
        }
    }

    /// The fixed category set offered by this catalog's filter menu
    pub fn categories(&self) -> &'static [&'static str] {
        match self {
            CatalogKind::Agent => AGENT_CATEGORIES,
            CatalogKind::Tool => TOOL_CATEGORIES,
            CatalogKind::Mcp => MCP_CATEGORIES,
        }
    }

    /// Resolve a user-typed category label to its canonical spelling.
    ///
    /// Matching is case-insensitive ("defi" resolves to "DeFi"). Returns `None`
    /// when the label is not part of this catalog's category set.
    pub fn parse_category(&self, label: &str) -> Option<&'static str> {
        let label = label.trim();
        self.categories()
            .iter()
            .copied()
            .find(|c| c.eq_ignore_ascii_case(label))
    }
}

impl std::fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single listable entity shown in a filterable grid.
///
/// Set-valued fields are ordered sets; the order a backend sent them in is not
/// meaningful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub kind: CatalogKind,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub chains: BTreeSet<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub integration_modes: BTreeSet<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub is_minted: bool,
    #[serde(default)]
    pub is_owned: bool,
}

impl CatalogItem {
    pub fn is_free(&self) -> bool {
        self.price == 0.0
    }

    /// Owned items and items minted by the current user are both unlocked.
    pub fn is_unlocked(&self) -> bool {
        self.is_owned || self.is_minted
    }

    pub fn is_multi_chain(&self) -> bool {
        self.chains
            .iter()
            .any(|chain| chain.eq_ignore_ascii_case(MULTI_CHAIN))
    }
}

/// The user-selected filter values narrowing a catalog view.
///
/// Every criterion is combined with logical AND. Within a multi-value
/// criterion, membership is logical OR, and an empty set places no
/// restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub categories: BTreeSet<String>,
    #[serde(default)]
    pub chains: BTreeSet<String>,
    #[serde(default)]
    pub features: BTreeSet<String>,
    #[serde(default)]
    pub integration_modes: BTreeSet<String>,
    #[serde(default)]
    pub show_free_only: bool,
    #[serde(default)]
    pub show_verified_only: bool,
}

fn collect_set<I, S>(values: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(Into::into).collect()
}

impl FilterCriteria {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = collect_set(categories);
        self
    }

    pub fn with_chains<I, S>(mut self, chains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.chains = collect_set(chains);
        self
    }

    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = collect_set(features);
        self
    }

    pub fn with_integration_modes<I, S>(mut self, modes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.integration_modes = collect_set(modes);
        self
    }

    pub fn free_only(mut self, enabled: bool) -> Self {
        self.show_free_only = enabled;
        self
    }

    pub fn verified_only(mut self, enabled: bool) -> Self {
        self.show_verified_only = enabled;
        self
    }

    /// True when no criterion restricts anything.
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty()
            && self.categories.is_empty()
            && self.chains.is_empty()
            && self.features.is_empty()
            && self.integration_modes.is_empty()
            && !self.show_free_only
            && !self.show_verified_only
    }

    /// Apply every criterion to one item, in narrowing order.
    pub fn matches(&self, item: &CatalogItem) -> bool {
        let needle = self.search.trim().to_lowercase();

        self.matches_category(item)
            && self.matches_chain(item)
            && intersects(&self.features, &item.tags)
            && intersects(&self.integration_modes, &item.integration_modes)
            && matches_search(&needle, item)
            && (!self.show_free_only || item.is_free())
            && (!self.show_verified_only || item.is_verified)
    }

    fn matches_category(&self, item: &CatalogItem) -> bool {
        self.categories.is_empty() || self.categories.contains(&item.category)
    }

    fn matches_chain(&self, item: &CatalogItem) -> bool {
        self.chains.is_empty() || item.is_multi_chain() || !self.chains.is_disjoint(&item.chains)
    }
}

/// Empty selection matches everything; otherwise at least one value must be shared.
fn intersects(selected: &BTreeSet<String>, values: &BTreeSet<String>) -> bool {
    selected.is_empty() || !selected.is_disjoint(values)
}

/// `needle` must already be trimmed and lowercased.
fn matches_search(needle: &str, item: &CatalogItem) -> bool {
    needle.is_empty()
        || item.name.to_lowercase().contains(needle)
        || item.description.to_lowercase().contains(needle)
        || item.category.to_lowercase().contains(needle)
}

/// Derive the visible subset of `items` for `criteria`.
///
/// The result preserves the input order, is empty (never absent) when nothing
/// matches, and filtering an already filtered list with the same criteria
/// returns it unchanged.
pub fn filter(items: &[CatalogItem], criteria: &FilterCriteria) -> Vec<CatalogItem> {
    items
        .iter()
        .filter(|item| criteria.matches(item))
        .cloned()
        .collect()
}


#[cfg(test)]
mod tests {
    use super::fixtures::{ids, item, sample_catalog};
    use super::*;

    #[test]
    fn test_filter_empty_criteria_is_identity() {
        let items = sample_catalog();
        let result = filter(&items, &FilterCriteria::default());
        assert_eq!(result, items);
    }

    #[test]
    fn test_filter_empty_items() {
        let criteria = FilterCriteria::default()
            .with_search("anything")
            .free_only(true);
        assert!(filter(&[], &criteria).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let items = sample_catalog();
        let criteria = FilterCriteria::default()
            .with_chains(["Solana"])
            .with_search("a");
        let once = filter(&items, &criteria);
        let twice = filter(&once, &criteria);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_preserves_order() {
        let items = vec![
            item("a", "DeFi", &[], 0.0),
            item("b", "Trading", &[], 0.0),
            item("c", "DeFi", &[], 0.0),
        ];
        let result = filter(&items, &FilterCriteria::default().with_categories(["DeFi"]));
        assert_eq!(ids(&result), vec!["a", "c"]);
    }

    #[test]
    fn test_filter_does_not_mutate_source() {
        let items = sample_catalog();
        let before = items.clone();
        let _ = filter(&items, &FilterCriteria::default().free_only(true));
        assert_eq!(items, before);
    }

    #[test]
    fn test_filter_categories_is_any_of() {
        let items = sample_catalog();
        let criteria = FilterCriteria::default().with_categories(["DeFi", "Social"]);
        assert_eq!(ids(&filter(&items, &criteria)), vec!["yield-bot", "social-pulse"]);
    }

    #[test]
    fn test_filter_chain_intersection() {
        let items = sample_catalog();
        let criteria = FilterCriteria::default().with_chains(["Arbitrum", "Base"]);
        // bridge-watch is Multi-chain and satisfies any chain filter
        assert_eq!(
            ids(&filter(&items, &criteria)),
            vec!["yield-bot", "bridge-watch", "social-pulse"]
        );
    }

    #[test]
    fn test_filter_multi_chain_matches_any_chain() {
        let items = vec![item("omni", "DeFi", &[MULTI_CHAIN], 0.0)];
        let criteria = FilterCriteria::default().with_chains(["Solana"]);
        assert_eq!(ids(&filter(&items, &criteria)), vec!["omni"]);
    }

    #[test]
    fn test_filter_item_without_chains_fails_chain_filter() {
        let items = vec![item("offchain", "DeFi", &[], 0.0)];
        let criteria = FilterCriteria::default().with_chains(["Ethereum"]);
        assert!(filter(&items, &criteria).is_empty());
    }

    #[test]
    fn test_filter_features_match_tags() {
        let items = sample_catalog();
        let criteria = FilterCriteria::default().with_features(["alerts", "sentiment"]);
        assert_eq!(ids(&filter(&items, &criteria)), vec!["bridge-watch", "social-pulse"]);
    }

    #[test]
    fn test_filter_integration_modes() {
        let items = sample_catalog();
        let criteria = FilterCriteria::default().with_integration_modes(["sdk"]);
        assert_eq!(ids(&filter(&items, &criteria)), vec!["bridge-watch"]);

        let criteria = FilterCriteria::default().with_integration_modes(["api"]);
        assert_eq!(ids(&filter(&items, &criteria)), vec!["sniper", "bridge-watch"]);
    }

    #[test]
    fn test_filter_search_is_case_insensitive_and_trimmed() {
        let items = sample_catalog();
        let criteria = FilterCriteria::default().with_search("  LAUNCH  ");
        assert_eq!(ids(&filter(&items, &criteria)), vec!["sniper"]);
    }

    #[test]
    fn test_filter_search_matches_description_and_category() {
        let items = sample_catalog();
        let by_description = FilterCriteria::default().with_search("farcaster");
        assert_eq!(ids(&filter(&items, &by_description)), vec!["social-pulse"]);

        let by_category = FilterCriteria::default().with_search("secur");
        assert_eq!(ids(&filter(&items, &by_category)), vec!["bridge-watch"]);
    }

    #[test]
    fn test_filter_search_is_literal() {
        let mut odd = item("odd", "DeFi", &[], 0.0);
        odd.name = "a.b*c helper".to_string();
        let items = vec![odd, item("plain", "DeFi", &[], 0.0)];

        let criteria = FilterCriteria::default().with_search("a.b*c");
        assert_eq!(ids(&filter(&items, &criteria)), vec!["odd"]);

        let criteria = FilterCriteria::default().with_search(".*");
        assert!(filter(&items, &criteria).is_empty());
    }

    #[test]
    fn test_filter_whitespace_search_is_no_restriction() {
        let items = sample_catalog();
        let criteria = FilterCriteria::default().with_search("   ");
        assert_eq!(filter(&items, &criteria).len(), items.len());
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_filter_free_only() {
        let items = sample_catalog();
        let result = filter(&items, &FilterCriteria::default().free_only(true));
        assert!(result.iter().all(|i| i.price == 0.0));
        assert_eq!(ids(&result), vec!["yield-bot", "bridge-watch"]);
    }

    #[test]
    fn test_filter_verified_only() {
        let items = sample_catalog();
        let result = filter(&items, &FilterCriteria::default().verified_only(true));
        assert_eq!(ids(&result), vec!["yield-bot", "bridge-watch"]);
    }

    #[test]
    fn test_filter_criteria_are_anded() {
        let items = sample_catalog();
        let criteria = FilterCriteria::default()
            .with_categories(["Security", "Trading"])
            .free_only(true);
        assert_eq!(ids(&filter(&items, &criteria)), vec!["bridge-watch"]);
    }

    #[test]
    fn test_filter_adding_criteria_only_narrows() {
        let items = sample_catalog();
        let base = FilterCriteria::default().with_search("e");
        let narrower = base.clone().with_chains(["Solana"]).verified_only(true);

        let wide = filter(&items, &base);
        let narrow = filter(&items, &narrower);
        assert!(narrow.iter().all(|i| wide.contains(i)));
        assert!(narrow.len() <= wide.len());
    }

    #[test]
    fn test_is_unlocked() {
        let mut owned = item("o", "DeFi", &[], 0.0);
        owned.is_owned = true;
        let mut minted = item("m", "DeFi", &[], 0.0);
        minted.is_minted = true;
        let locked = item("l", "DeFi", &[], 0.0);

        assert!(owned.is_unlocked());
        assert!(minted.is_unlocked());
        assert!(!locked.is_unlocked());
    }

    #[test]
    fn test_parse_category_is_case_insensitive() {
        assert_eq!(CatalogKind::Agent.parse_category("defi"), Some("DeFi"));
        assert_eq!(CatalogKind::Mcp.parse_category(" ai "), Some("AI"));
        assert_eq!(CatalogKind::Tool.parse_category("Gaming"), None);
    }

    #[test]
    fn test_criteria_deserialize_with_missing_fields() {
        let criteria: FilterCriteria =
            serde_json::from_str(r#"{"chains": ["Solana"], "show_free_only": true}"#).unwrap();
        assert!(criteria.search.is_empty());
        assert!(criteria.categories.is_empty());
        assert!(criteria.chains.contains("Solana"));
        assert!(criteria.show_free_only);
    }
}
