use crate::models::{FilterCriteria, Resource};

/// Narrows `all` to the resources matching every supplied criterion.
///
/// Output keeps the input order. With no criteria set, `all` comes back
/// unchanged.
pub fn filter_resources(all: Vec<Resource>, criteria: &FilterCriteria) -> Vec<Resource> {
    if criteria.is_unconstrained() {
        return all;
    }

    let search = criteria.search.as_deref().map(str::to_lowercase);

    all.into_iter()
        .filter(|r| search.as_deref().map_or(true, |term| matches_search(r, term)))
        .filter(|r| criteria.resource_type.map_or(true, |t| r.resource_type == t))
        .filter(|r| criteria.difficulty.map_or(true, |d| r.difficulty == d))
        .filter(|r| criteria.tags.iter().all(|tag| r.has_tag(tag)))
        .collect()
}

/// `term` must already be lower-cased
fn matches_search(resource: &Resource, term: &str) -> bool {
    resource.title.to_lowercase().contains(term)
        || resource.description.to_lowercase().contains(term)
}
