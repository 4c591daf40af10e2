//! Derived catalog views: facet counts, ordering and paging.
//!
//! These run after [`super::filter`] and, like it, never touch their input.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::CatalogItem;

/// Value counts used to build filter menus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub total: usize,
    pub categories: BTreeMap<String, usize>,
    pub chains: BTreeMap<String, usize>,
    pub tags: BTreeMap<String, usize>,
    pub integration_modes: BTreeMap<String, usize>,
    pub free: usize,
    pub verified: usize,
}

fn bump(counts: &mut BTreeMap<String, usize>, key: &str) {
    *counts.entry(key.to_string()).or_insert(0) += 1;
}

/// Count how many items carry each category, chain, tag and integration mode.
pub fn facets(items: &[CatalogItem]) -> Facets {
    let mut facets = Facets {
        total: items.len(),
        ..Facets::default()
    };

    for item in items {
        if !item.category.is_empty() {
            bump(&mut facets.categories, &item.category);
        }
        for chain in &item.chains {
            bump(&mut facets.chains, chain);
        }
        for tag in &item.tags {
            bump(&mut facets.tags, tag);
        }
        for mode in &item.integration_modes {
            bump(&mut facets.integration_modes, mode);
        }
        if item.is_free() {
            facets.free += 1;
        }
        if item.is_verified {
            facets.verified += 1;
        }
    }

    facets
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Keep the backend's order
    #[default]
    Featured,
    PriceLowToHigh,
    PriceHighToLow,
    Name,
}

/// Return a re-ordered copy of `items`. Equal keys keep their input order.
pub fn sort_items(items: &[CatalogItem], order: SortOrder) -> Vec<CatalogItem> {
    let mut sorted = items.to_vec();

    match order {
        SortOrder::Featured => {}
        SortOrder::PriceLowToHigh => {
            sorted.sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal))
        }
        SortOrder::PriceHighToLow => {
            sorted.sort_by(|a, b| b.price.partial_cmp(&a.price).unwrap_or(Ordering::Equal))
        }
        SortOrder::Name => sorted.sort_by_cached_key(|item| item.name.to_lowercase()),
    }

    sorted
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogPaginationInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub limit: usize,
    pub has_more: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogPage {
    pub items: Vec<CatalogItem>,
    pub pagination: CatalogPaginationInfo,
}

/// Slice one 1-indexed page out of `items`.
///
/// A zero page or limit is treated as 1. Pages past the end are empty rather
/// than an error, so an over-eager "next page" click just shows nothing.
pub fn paginate(items: &[CatalogItem], page: usize, limit: usize) -> CatalogPage {
    let page = page.max(1);
    let limit = limit.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(limit).max(1);

    let start = (page - 1).saturating_mul(limit).min(total_items);
    let end = start.saturating_add(limit).min(total_items);

    CatalogPage {
        items: items[start..end].to_vec(),
        pagination: CatalogPaginationInfo {
            current_page: page,
            total_pages,
            total_items,
            limit,
            has_more: page < total_pages,
        },
    }
}
