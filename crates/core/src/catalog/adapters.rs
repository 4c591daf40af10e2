//! Backend payload adapters
//!
//! The marketplace backend serves agents, tools and MCP services as three
//! independently shaped JSON documents. Each shape gets its own record type
//! here, and every record maps onto [`CatalogItem`] so the filter only ever sees
//! one item type. Absent, null or wrongly typed optional fields deserialize to
//! empty sets, `false` or `0` instead of failing the whole payload.

use std::collections::BTreeSet;

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

use super::{CatalogItem, CatalogKind};

/// Error type for catalog payload parsing
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Invalid catalog JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Unexpected catalog payload shape: {0}")]
    UnexpectedShape(String),
}

/// Agent as served by `GET /agents`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRecord {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient")]
    pub category: String,
    #[serde(default, alias = "supportedChains", deserialize_with = "string_list")]
    pub chains: Vec<String>,
    #[serde(default, alias = "features", deserialize_with = "string_list")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_verified: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub is_premium: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub is_minted: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub is_owned: bool,
}

/// Tool as served by `GET /tools`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolRecord {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient")]
    pub category: String,
    #[serde(default, deserialize_with = "string_list")]
    pub chains: Vec<String>,
    #[serde(default, alias = "features", deserialize_with = "string_list")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub integration_modes: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_verified: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub is_premium: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub is_owned: bool,
}

/// MCP service as served by `GET /mcp-services`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct McpServiceRecord {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient")]
    pub category: String,
    #[serde(default, alias = "chains", deserialize_with = "string_list")]
    pub supported_chains: Vec<String>,
    #[serde(default, alias = "tags", deserialize_with = "string_list")]
    pub features: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub integration_modes: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub is_verified: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub is_premium: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub is_owned: bool,
}

/// Null or a value of the wrong type reads as the field's default.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// String entries of an array; anything else reads as an empty list.
fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = match Value::deserialize(deserializer)? {
        Value::Array(values) => values,
        _ => return Ok(Vec::new()),
    };

    Ok(values
        .into_iter()
        .filter_map(|value| match value {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect())
}

/// Negative and NaN prices collapse to free.
fn normalize_price(price: Option<f64>) -> f64 {
    price.unwrap_or(0.0).max(0.0)
}

fn to_set(values: Vec<String>) -> BTreeSet<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

impl From<AgentRecord> for CatalogItem {
    fn from(record: AgentRecord) -> Self {
        CatalogItem {
            id: record.id,
            kind: CatalogKind::Agent,
            name: record.name,
            description: record.description,
            category: record.category,
            chains: to_set(record.chains),
            tags: to_set(record.tags),
            integration_modes: BTreeSet::new(),
            price: normalize_price(record.price),
            is_verified: record.is_verified,
            is_premium: record.is_premium,
            is_minted: record.is_minted,
            is_owned: record.is_owned,
        }
    }
}

impl From<ToolRecord> for CatalogItem {
    fn from(record: ToolRecord) -> Self {
        CatalogItem {
            id: record.id,
            kind: CatalogKind::Tool,
            name: record.name,
            description: record.description,
            category: record.category,
            chains: to_set(record.chains),
            tags: to_set(record.tags),
            integration_modes: to_set(record.integration_modes),
            price: normalize_price(record.price),
            is_verified: record.is_verified,
            is_premium: record.is_premium,
            is_minted: false,
            is_owned: record.is_owned,
        }
    }
}

impl From<McpServiceRecord> for CatalogItem {
    fn from(record: McpServiceRecord) -> Self {
        CatalogItem {
            id: record.id,
            kind: CatalogKind::Mcp,
            name: record.name,
            description: record.description,
            category: record.category,
            chains: to_set(record.supported_chains),
            tags: to_set(record.features),
            integration_modes: to_set(record.integration_modes),
            price: normalize_price(record.price),
            is_verified: record.is_verified,
            is_premium: record.is_premium,
            is_minted: false,
            is_owned: record.is_owned,
        }
    }
}

/// Locate the item array inside a payload.
///
/// Accepts a bare array, or an object wrapping it under `items`, `data` or the
/// catalog's own endpoint name (`agents`, `tools`, `services`).
fn unwrap_envelope(kind: CatalogKind, payload: Value) -> Result<Vec<Value>, CatalogError> {
    match payload {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => {
            let own_key = match kind {
                CatalogKind::Agent => "agents",
                CatalogKind::Tool => "tools",
                CatalogKind::Mcp => "services",
            };

            for key in ["items", "data", own_key] {
                if let Some(Value::Array(items)) = map.remove(key) {
                    return Ok(items);
                }
            }

            Err(CatalogError::UnexpectedShape(format!(
                "object without an 'items', 'data' or '{own_key}' array"
            )))
        }
        other => Err(CatalogError::UnexpectedShape(format!(
            "expected an array or object, found {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn convert<R>(items: Vec<Value>) -> Result<Vec<CatalogItem>, CatalogError>
where
    R: DeserializeOwned + Into<CatalogItem>,
{
    items
        .into_iter()
        .map(|value| Ok(serde_json::from_value::<R>(value)?.into()))
        .collect()
}

/// Parse an already-decoded backend payload into catalog items
pub fn items_from_value(kind: CatalogKind, payload: Value) -> Result<Vec<CatalogItem>, CatalogError> {
    let items = unwrap_envelope(kind, payload)?;

    match kind {
        CatalogKind::Agent => convert::<AgentRecord>(items),
        CatalogKind::Tool => convert::<ToolRecord>(items),
        CatalogKind::Mcp => convert::<McpServiceRecord>(items),
    }
}

/// Parse a raw backend JSON document into catalog items
pub fn parse_catalog(kind: CatalogKind, json: &str) -> Result<Vec<CatalogItem>, CatalogError> {
    let payload: Value = serde_json::from_str(json)?;
    items_from_value(kind, payload)
}
