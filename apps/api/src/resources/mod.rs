//! Learning resources: search plus category and level pickers.

pub mod handlers;

use serde::Deserialize;

use crate::models::{Resource, ResourceCategory, ResourceLevel};
use crate::query::Pick;

const FEATURED_COUNT: usize = 3;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceFilter {
    /// Matches title, description, or any tag.
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category: Pick<ResourceCategory>,
    #[serde(default)]
    pub level: Pick<ResourceLevel>,
}

impl ResourceFilter {
    pub fn matches(&self, resource: &Resource) -> bool {
        let search_hit = match self.search.as_deref().filter(|s| !s.is_empty()) {
            None => true,
            Some(term) => {
                let term = term.to_lowercase();
                resource.title.to_lowercase().contains(&term)
                    || resource.description.to_lowercase().contains(&term)
                    || resource.tags.iter().any(|t| t.to_lowercase().contains(&term))
            }
        };
        search_hit && self.category.admits(&resource.category) && self.level.admits(&resource.level)
    }
}

pub fn filter_resources<'a>(resources: &'a [Resource], filter: &ResourceFilter) -> Vec<&'a Resource> {
    resources.iter().filter(|r| filter.matches(r)).collect()
}

/// The first few resources, regardless of any filter.
pub fn featured(resources: &[Resource]) -> &[Resource] {
    &resources[..resources.len().min(FEATURED_COUNT)]
}
