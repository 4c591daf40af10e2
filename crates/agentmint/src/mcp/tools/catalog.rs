use crate::catalog::facets::FacetsOutput;
use crate::catalog::list::{list_catalog_data, ListOptions};
use crate::catalog::{load_catalog, KindArg, SortArg};
use crate::prelude::{eprintln, *};
use agentmint_core::catalog::{facets, items_from_value, CatalogItem};
use serde::Deserialize;

use super::{parse_arguments, text_result, JsonRpcError, INTERNAL_ERROR, INVALID_PARAMS};

const DEFAULT_LIMIT: usize = 20;

fn default_catalog() -> KindArg {
    KindArg::Agents
}

#[derive(Debug, Deserialize)]
struct CatalogFilterArgs {
    #[serde(default = "default_catalog")]
    catalog: KindArg,
    #[serde(default)]
    search: Option<String>,
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    chains: Vec<String>,
    #[serde(default)]
    features: Vec<String>,
    #[serde(default)]
    integration_modes: Vec<String>,
    #[serde(default)]
    free_only: bool,
    #[serde(default)]
    verified_only: bool,
    #[serde(default)]
    sort: SortArg,
    page: Option<usize>,
    limit: Option<usize>,
    items: Option<serde_json::Value>,
}

impl CatalogFilterArgs {
    fn into_parts(self) -> (ListOptions, Option<serde_json::Value>) {
        let options = ListOptions {
            kind: self.catalog,
            search: self.search,
            categories: self.categories,
            chains: self.chains,
            features: self.features,
            modes: self.integration_modes,
            free: self.free_only,
            verified: self.verified_only,
            sort: self.sort,
            page: self.page.unwrap_or(1),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT),
            file: None,
            json: true,
        };
        (options, self.items)
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFacetsArgs {
    #[serde(default = "default_catalog")]
    catalog: KindArg,
    items: Option<serde_json::Value>,
}

/// Use the inline payload when one was passed, otherwise fetch from the backend.
async fn load_items(
    kind: KindArg,
    inline: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<Vec<CatalogItem>, JsonRpcError> {
    match inline {
        Some(payload) => {
            let [single] = kind.kinds() else {
                return Err(JsonRpcError::new(
                    INVALID_PARAMS,
                    "Inline items need a single catalog: agents, tools or mcp",
                ));
            };
            items_from_value(*single, payload)
                .map_err(|e| JsonRpcError::new(INVALID_PARAMS, f!("Invalid items: {e}")))
        }
        None => load_catalog(kind, None, global)
            .await
            .map_err(|e| JsonRpcError::new(INTERNAL_ERROR, f!("Tool execution error: {e}"))),
    }
}

pub async fn handle_catalog_filter(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let args: CatalogFilterArgs = parse_arguments(arguments)?;
    let (options, inline) = args.into_parts();

    if global.verbose {
        eprintln!(
            "Calling catalog_filter: catalog={}, page={}, limit={}, inline={}",
            options.kind,
            options.page,
            options.limit,
            inline.is_some()
        );
    }

    let items = load_items(options.kind, inline, global).await?;
    let list_output = list_catalog_data(&items, &options);

    text_result(&list_output)
}

pub async fn handle_catalog_facets(
    arguments: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let args: CatalogFacetsArgs = parse_arguments(arguments)?;

    if global.verbose {
        eprintln!("Calling catalog_facets: catalog={}", args.catalog);
    }

    let items = load_items(args.catalog, args.items, global).await?;
    let output = FacetsOutput {
        kind: args.catalog,
        facets: facets(&items),
    };

    text_result(&output)
}
