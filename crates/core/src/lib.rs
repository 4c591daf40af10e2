//! Core library for agentmint
//!
//! This crate is the **Functional Core** of agentmint: pure transformation
//! functions with no I/O. The `agentmint` binary is the Imperative Shell that
//! fetches catalogs from the marketplace backend, reads files, prints to the
//! terminal and serves MCP.
//!
//! ## Functional Core Principles
//!
//! - **Pure functions**: same input, same output
//! - **No side effects**: no network, no filesystem, no logging
//! - **Total where possible**: filtering, searching and rendering never fail;
//!   only payload parsing returns errors
//!
//! # Module Organization
//!
//! - [`catalog`]: filtering, facets, sorting and paging for the agent store,
//!   tools page and MCP store, plus adapters from backend payloads
//! - [`docs`]: documentation library, relevance search, query highlighting and
//!   the line-based markdown renderer
//!
//! # Example Usage
//!
//! ```rust
//! use agentmint_core::catalog::{filter, parse_catalog, CatalogKind, FilterCriteria};
//!
//! let json = r#"[
//!     { "id": "a", "name": "Arb Scout", "category": "Trading", "chains": ["Arbitrum"] },
//!     { "id": "b", "name": "Omni Guard", "category": "Security", "chains": ["Multi-chain"] }
//! ]"#;
//! let items = parse_catalog(CatalogKind::Agent, json).unwrap();
//!
//! let criteria = FilterCriteria::default().with_chains(["Solana"]);
//! let visible = filter(&items, &criteria);
//!
//! assert_eq!(visible.len(), 1);
//! assert_eq!(visible[0].id, "b");
//! ```

pub mod catalog;
pub mod docs;
