use std::cmp::Ordering;

use crate::{
    error::AppResult,
    models::{Show, ShowId},
    services::catalog::{CandidateFilter, Catalog},
};

/// Catalog held entirely in memory
///
/// Backs integration tests and local experiments. Queries follow the same
/// ordering rules as the PostgreSQL catalog.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    shows: Vec<Show>,
}

impl InMemoryCatalog {
    pub fn new(shows: Vec<Show>) -> Self {
        Self { shows }
    }

    pub fn len(&self) -> usize {
        self.shows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shows.is_empty()
    }
}

/// Weight descending, missing weights last, then id ascending
fn popularity_order(a: &Show, b: &Show) -> Ordering {
    match (a.weight, b.weight) {
        (Some(wa), Some(wb)) => wb.total_cmp(&wa),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then(a.id.cmp(&b.id))
}

#[async_trait::async_trait]
impl Catalog for InMemoryCatalog {
    async fn fetch_shows_by_ids(&self, ids: &[ShowId]) -> AppResult<Vec<Show>> {
        let mut shows: Vec<Show> = self
            .shows
            .iter()
            .filter(|show| ids.contains(&show.id))
            .cloned()
            .collect();
        shows.sort_by_key(|show| show.id);
        Ok(shows)
    }

    async fn fetch_candidates(&self, filter: &CandidateFilter) -> AppResult<Vec<Show>> {
        if !filter.has_criteria() {
            return Ok(Vec::new());
        }

        let mut candidates: Vec<Show> = self
            .shows
            .iter()
            .filter(|show| filter.matches(show))
            .cloned()
            .collect();
        candidates.sort_by(popularity_order);
        candidates.truncate(filter.pool_size);
        Ok(candidates)
    }

    async fn search_by_name(&self, query: &str, limit: usize) -> AppResult<Vec<Show>> {
        let needle = query.to_lowercase();
        let mut shows: Vec<Show> = self
            .shows
            .iter()
            .filter(|show| show.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        shows.sort_by(|a, b| a.name.cmp(&b.name));
        shows.truncate(limit);
        Ok(shows)
    }
}
