mod catalog;
mod docs;

use serde::{Deserialize, Serialize};

// Re-export types needed by tool handlers
pub use super::{JsonRpcError, Tool, INTERNAL_ERROR, INVALID_PARAMS};

// MCP Protocol types for tools
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
pub struct ToolsCapability {}

#[derive(Debug, Serialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

/// Decode a tool's `arguments` object; a missing object decodes as `{}`.
pub fn parse_arguments<T: serde::de::DeserializeOwned>(
    arguments: Option<serde_json::Value>,
) -> Result<T, JsonRpcError> {
    let arguments = arguments.unwrap_or_else(|| serde_json::json!({}));
    serde_json::from_value(arguments)
        .map_err(|e| JsonRpcError::new(INVALID_PARAMS, format!("Invalid arguments: {e}")))
}

/// Serialize `data` as pretty JSON text content.
pub fn text_result<T: Serialize>(data: &T) -> Result<serde_json::Value, JsonRpcError> {
    let json_string = serde_json::to_string_pretty(data)
        .map_err(|e| JsonRpcError::new(INTERNAL_ERROR, format!("Serialization error: {e}")))?;

    let result = CallToolResult {
        content: vec![Content::Text { text: json_string }],
        is_error: None,
    };

    serde_json::to_value(result)
        .map_err(|e| JsonRpcError::new(INTERNAL_ERROR, format!("Internal error: {e}")))
}

pub fn handle_initialize() -> Result<serde_json::Value, JsonRpcError> {
    let result = InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {}),
        },
        server_info: ServerInfo {
            name: "agentmint".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    serde_json::to_value(result)
        .map_err(|e| JsonRpcError::new(INTERNAL_ERROR, format!("Internal error: {e}")))
}

pub fn handle_tools_list() -> Result<serde_json::Value, JsonRpcError> {
    let catalog_property = serde_json::json!({
        "type": "string",
        "description": "Catalog to use: agents, tools, mcp or all (default: agents)",
        "enum": ["agents", "tools", "mcp", "all"]
    });
    let items_property = serde_json::json!({
        "description": "Optional catalog payload (array or {\"items\": [...]}) to use instead of fetching from the backend. Requires a single catalog."
    });
    let docs_property = serde_json::json!({
        "type": "string",
        "description": "Path to a JSON docs library ([{\"id\", \"title\", \"body\"}]) to use instead of AGENTMINT_DOCS or the built-in docs"
    });

    let tools = vec![
        Tool {
            name: "catalog_filter".to_string(),
            description: "Filter the AgentMint agent store, tools or MCP services catalog. Every criterion is combined with AND; values inside one criterion are combined with OR. Items listing the 'Multi-chain' chain match any chain filter. Returns the matching page in catalog order (or the requested sort) with pagination info.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "catalog": catalog_property.clone(),
                    "search": {
                        "type": "string",
                        "description": "Case-insensitive text matched against name, description and category"
                    },
                    "categories": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Categories to include (e.g. ['DeFi', 'Trading'])"
                    },
                    "chains": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Chains to include (e.g. ['Ethereum', 'Solana'])"
                    },
                    "features": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Feature tags; items need at least one"
                    },
                    "integration_modes": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Integration modes such as stdio, sse or api"
                    },
                    "free_only": {
                        "type": "boolean",
                        "description": "Only items with a price of zero (default: false)"
                    },
                    "verified_only": {
                        "type": "boolean",
                        "description": "Only verified items (default: false)"
                    },
                    "sort": {
                        "type": "string",
                        "description": "Ordering (default: featured)",
                        "enum": ["featured", "price-asc", "price-desc", "name"]
                    },
                    "page": {
                        "type": "number",
                        "description": "Page number, 1-indexed (default: 1)"
                    },
                    "limit": {
                        "type": "number",
                        "description": "Items per page (default: 20)"
                    },
                    "items": items_property.clone()
                },
                "required": []
            }),
        },
        Tool {
            name: "catalog_facets".to_string(),
            description: "Count how many catalog items carry each category, chain, feature tag and integration mode, plus free and verified totals. Useful for building filter values before calling catalog_filter.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "catalog": catalog_property,
                    "items": items_property
                },
                "required": []
            }),
        },
        Tool {
            name: "docs_search".to_string(),
            description: "Search the AgentMint documentation. A title match scores 10 and a body match scores 1; results are ordered by score. One match returns that section, several return a summary, none returns a 'No Results Found' page. A blank query returns the selected section. The response includes the rendered blocks with the query emphasized.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Literal, case-insensitive search text"
                    },
                    "section": {
                        "type": "string",
                        "description": "Section shown when the query is blank (default: getting-started)"
                    },
                    "docs": docs_property.clone()
                },
                "required": ["query"]
            }),
        },
        Tool {
            name: "docs_render".to_string(),
            description: "Render a documentation section, or an arbitrary markdown body, into typed blocks (heading, subheading, list_item, paragraph, code). Unknown section ids return a 'Coming Soon' page.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "id": {
                        "type": "string",
                        "description": "Section id to render (default: getting-started)"
                    },
                    "body": {
                        "type": "string",
                        "description": "Markdown to render instead of a section"
                    },
                    "docs": docs_property
                },
                "required": []
            }),
        },
    ];

    let result = ToolsList { tools };

    serde_json::to_value(result)
        .map_err(|e| JsonRpcError::new(INTERNAL_ERROR, format!("Internal error: {e}")))
}

pub async fn handle_tools_call(
    params: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: CallToolParams = serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError::new(INVALID_PARAMS, format!("Invalid params: {e}")))?;

    match params.name.as_str() {
        "catalog_filter" => catalog::handle_catalog_filter(params.arguments, global).await,
        "catalog_facets" => catalog::handle_catalog_facets(params.arguments, global).await,
        "docs_search" => docs::handle_docs_search(params.arguments, global),
        "docs_render" => docs::handle_docs_render(params.arguments, global),
        _ => Err(JsonRpcError::new(
            INVALID_PARAMS,
            format!("Unknown tool: {}", params.name),
        )),
    }
}
