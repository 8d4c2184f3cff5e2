use std::sync::Arc;
use std::time::Instant;

use tracing::instrument;

use crate::{
    error::{AppError, AppResult},
    models::{RecommendedShow, ScoredCandidate, ShowId},
    services::catalog::Catalog,
};

pub mod ranking;
pub mod scoring;
pub mod selection;

pub use ranking::rank;
pub use scoring::SeedProfile;
pub use selection::{SeedSelection, CANDIDATE_POOL_SIZE};

/// Default number of recommendations returned per call
pub const DEFAULT_LIMIT: usize = 10;

/// Recommends shows similar to a set of seed shows
///
/// Based on the seeds' genres and cast/crew, pulls a bounded candidate pool
/// from the catalog, scores every candidate against the seeds and returns one
/// page of the ranking with per-criterion scores and reasons.
///
/// Every call works on its own catalog snapshot; nothing is cached or stored.
#[derive(Clone)]
pub struct Recommender {
    catalog: Arc<dyn Catalog>,
}

impl Recommender {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self { catalog }
    }

    /// First page of recommendations with the default page size
    pub async fn recommend(&self, seed_ids: &[ShowId]) -> AppResult<Vec<RecommendedShow>> {
        self.execute(seed_ids, DEFAULT_LIMIT, 0).await
    }

    /// Returns recommendations `offset..offset + limit` of the full ranking
    ///
    /// An empty seed list, unknown seeds, seeds without genres or people, and an
    /// empty candidate pool all yield an empty list. Catalog failures are
    /// returned as-is.
    #[instrument(skip(self, seed_ids), fields(seed_count = seed_ids.len()))]
    pub async fn execute(
        &self,
        seed_ids: &[ShowId],
        limit: usize,
        offset: usize,
    ) -> AppResult<Vec<RecommendedShow>> {
        if limit == 0 {
            return Err(AppError::InvalidInput(
                "limit must be a positive integer".to_string(),
            ));
        }
        if let Some(id) = seed_ids.iter().find(|id| **id <= 0) {
            return Err(AppError::InvalidInput(format!("Invalid show id: {}", id)));
        }
        if seed_ids.is_empty() {
            tracing::debug!("No seed shows supplied");
            return Ok(Vec::new());
        }

        let start = Instant::now();

        let seeds = self.catalog.fetch_shows_by_ids(seed_ids).await?;
        if seeds.is_empty() {
            tracing::debug!("None of the seed shows exist in the catalog");
            return Ok(Vec::new());
        }

        let Some(selection) = SeedSelection::from_seeds(&seeds) else {
            tracing::debug!("Seed shows have no genres or people");
            return Ok(Vec::new());
        };

        let candidates = self
            .catalog
            .fetch_candidates(&selection.candidate_filter(seed_ids))
            .await?;
        if candidates.is_empty() {
            tracing::debug!(
                genres = selection.genre_ids.len(),
                people = selection.person_ids.len(),
                "No candidates share a genre or person with the seeds"
            );
            return Ok(Vec::new());
        }

        let pool_size = candidates.len();
        let profile = SeedProfile::new(&seeds, &selection);
        let scored: Vec<ScoredCandidate> = candidates
            .into_iter()
            .map(|candidate| profile.score(candidate))
            .collect();

        let recommendations = rank(scored, limit, offset);

        tracing::info!(
            seeds = seeds.len(),
            pool_size,
            returned = recommendations.len(),
            offset,
            processing_time_ms = start.elapsed().as_millis(),
            "Recommendations computed"
        );

        Ok(recommendations)
    }
}
