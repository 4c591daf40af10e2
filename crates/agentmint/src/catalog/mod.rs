use crate::config::{create_client, ApiConfig};
use crate::prelude::{eprintln, *};
use agentmint_core::catalog::{items_from_value, parse_catalog, CatalogItem, CatalogKind, SortOrder};
use futures::future::try_join_all;
use std::path::Path;

pub mod facets;
pub mod list;

#[derive(Debug, clap::Parser)]
#[command(name = "catalog")]
#[command(about = "Agent store, tools and MCP service catalogs")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List catalog items matching the given filters
    #[clap(name = "list")]
    List(list::ListOptions),

    /// Count categories, chains, tags and integration modes in a catalog
    #[clap(name = "facets")]
    Facets(facets::FacetsOptions),
}

/// Catalog selector as typed on the command line
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum KindArg {
    Agents,
    Tools,
    Mcp,
    All,
}

impl KindArg {
    pub fn kinds(self) -> &'static [CatalogKind] {
        match self {
            KindArg::Agents => &[CatalogKind::Agent],
            KindArg::Tools => &[CatalogKind::Tool],
            KindArg::Mcp => &[CatalogKind::Mcp],
            KindArg::All => &CatalogKind::ALL,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            KindArg::Agents => "agents",
            KindArg::Tools => "tools",
            KindArg::Mcp => "mcp",
            KindArg::All => "all",
        }
    }
}

impl std::fmt::Display for KindArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<CatalogKind> for KindArg {
    fn from(kind: CatalogKind) -> Self {
        match kind {
            CatalogKind::Agent => KindArg::Agents,
            CatalogKind::Tool => KindArg::Tools,
            CatalogKind::Mcp => KindArg::Mcp,
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum SortArg {
    #[default]
    Featured,
    PriceAsc,
    PriceDesc,
    Name,
}

impl From<SortArg> for SortOrder {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Featured => SortOrder::Featured,
            SortArg::PriceAsc => SortOrder::PriceLowToHigh,
            SortArg::PriceDesc => SortOrder::PriceHighToLow,
            SortArg::Name => SortOrder::Name,
        }
    }
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Marketplace API: {}", global.api_url);
        eprintln!();
    }

    match app.command {
        Commands::List(options) => list::run(options, global).await,
        Commands::Facets(options) => facets::run(options, global).await,
    }
}

/// Map user-typed category labels to the canonical spelling of the selected catalog(s).
///
/// Labels no catalog knows are kept as typed, so a backend category that is
/// missing from the fixed menus can still be filtered on.
pub fn resolve_categories(kind: KindArg, labels: &[String]) -> Vec<String> {
    labels
        .iter()
        .map(|label| {
            kind.kinds()
                .iter()
                .find_map(|k| k.parse_category(label))
                .map(str::to_string)
                .unwrap_or_else(|| {
                    log::warn!("Unknown {kind} category '{}', matching it verbatim", label.trim());
                    label.trim().to_string()
                })
        })
        .collect()
}

/// Load the selected catalog(s) from a local payload file or the backend.
pub async fn load_catalog(
    kind: KindArg,
    file: Option<&Path>,
    global: &crate::Global,
) -> Result<Vec<CatalogItem>> {
    match file {
        Some(path) => {
            let [single] = kind.kinds() else {
                return Err(eyre!(
                    "--file reads a single catalog; pick agents, tools or mcp instead of '{}'",
                    kind
                ));
            };
            if global.verbose {
                eprintln!("Reading {} catalog from {}", single, path.display());
            }
            load_catalog_file(path, *single)
        }
        None => {
            let config = ApiConfig::from_global(global)?;
            let client = create_client(&config)?;
            fetch_catalogs(&client, &config, kind.kinds(), global.verbose).await
        }
    }
}

/// Fetch several catalogs concurrently and concatenate them in `kinds` order.
pub async fn fetch_catalogs(
    client: &reqwest::Client,
    config: &ApiConfig,
    kinds: &[CatalogKind],
    verbose: bool,
) -> Result<Vec<CatalogItem>> {
    if verbose {
        let names: Vec<&str> = kinds.iter().map(|k| k.endpoint()).collect();
        eprintln!("Fetching {} from {}...", names.join(", "), config.base_url);
    }

    let fetches = kinds
        .iter()
        .map(|kind| fetch_catalog(client, config, *kind));
    let catalogs = try_join_all(fetches).await?;

    Ok(catalogs.into_iter().flatten().collect())
}

pub async fn fetch_catalog(
    client: &reqwest::Client,
    config: &ApiConfig,
    kind: CatalogKind,
) -> Result<Vec<CatalogItem>> {
    let url = config.endpoint(kind);
    log::debug!("GET {url}");

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| Error::Network(f!("Failed to fetch {kind} catalog from {url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::UnexpectedStatus {
            url,
            status: status.as_u16(),
        }
        .into());
    }

    let payload: serde_json::Value = response.json().await.map_err(|e| Error::InvalidCatalog {
        kind: kind.to_string(),
        message: e.to_string(),
    })?;

    let items = items_from_value(kind, payload).map_err(|e| Error::InvalidCatalog {
        kind: kind.to_string(),
        message: e.to_string(),
    })?;

    log::debug!("Fetched {} {kind} items", items.len());
    Ok(items)
}

/// Read a catalog payload saved from the backend (array or envelope).
pub fn load_catalog_file(path: &Path, kind: CatalogKind) -> Result<Vec<CatalogItem>> {
    let json = std::fs::read_to_string(path)
        .wrap_err_with(|| f!("Failed to read catalog file {}", path.display()))?;

    let items = parse_catalog(kind, &json).map_err(|e| Error::InvalidCatalog {
        kind: kind.to_string(),
        message: e.to_string(),
    })?;

    log::debug!("Loaded {} {kind} items from {}", items.len(), path.display());
    Ok(items)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use agentmint_core::catalog::{parse_catalog, CatalogItem, CatalogKind};

    pub const AGENTS_JSON: &str = r#"{
        "agents": [
            {
                "id": "yield-bot",
                "name": "Yield Bot",
                "description": "Moves stablecoins to the best lending rate",
                "category": "DeFi",
                "chains": ["Ethereum", "Arbitrum"],
                "tags": ["yield", "lending"],
                "price": 0,
                "isVerified": true
            },
            {
                "id": "sniper",
                "name": "Sniper",
                "description": "Buys new token listings within a block",
                "category": "Trading",
                "chains": ["Solana"],
                "price": 25,
                "isPremium": true
            },
            {
                "id": "bridge-watch",
                "name": "Bridge Watch",
                "description": "Alerts on suspicious bridge withdrawals",
                "category": "Security",
                "chains": ["Multi-chain"],
                "isVerified": true,
                "isOwned": true
            }
        ]
    }"#;

    pub fn agents() -> Vec<CatalogItem> {
        parse_catalog(CatalogKind::Agent, AGENTS_JSON).unwrap()
    }
}
