use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

use super::show::{Show, ShowId, ShowView};

/// Default page size of the recommendations endpoint
pub const DEFAULT_PAGE_LIMIT: u32 = 6;
/// Largest page size a client may request
pub const MAX_PAGE_LIMIT: u32 = 24;

/// Rounded per-criterion sub-scores; every key is always present
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriteriaScores {
    pub genre: u32,
    pub cast: u32,
    pub release_year: u32,
    pub rating: u32,
    #[serde(rename = "type")]
    pub show_type: u32,
    pub language: u32,
    pub popularity: u32,
    pub runtime: u32,
    pub status: u32,
}

/// A candidate scored against the seed set. Lives for a single request.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub show: Show,
    /// Unrounded sum of all criteria
    pub score: f64,
    /// `min(100, round(score))`
    pub display_score: u32,
    pub reasons: Vec<String>,
    pub criteria_scores: CriteriaScores,
}

/// A ranked recommendation: the catalog show plus its explanation
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendedShow {
    pub show: Show,
    pub score: f64,
    pub match_score: u32,
    pub recommendation_reasons: Vec<String>,
    pub criteria_scores: CriteriaScores,
}

impl From<ScoredCandidate> for RecommendedShow {
    fn from(candidate: ScoredCandidate) -> Self {
        Self {
            show: candidate.show,
            score: candidate.score,
            match_score: candidate.display_score,
            recommendation_reasons: candidate.reasons,
            criteria_scores: candidate.criteria_scores,
        }
    }
}

/// Wire rendering of a recommendation
#[derive(Debug, Clone, Serialize)]
pub struct RecommendedShowView {
    #[serde(flatten)]
    pub show: ShowView,
    pub recommendation_reasons: Vec<String>,
    pub match_score: u32,
    pub criteria_scores: CriteriaScores,
}

impl From<&RecommendedShow> for RecommendedShowView {
    fn from(recommendation: &RecommendedShow) -> Self {
        Self {
            show: ShowView::from(&recommendation.show),
            recommendation_reasons: recommendation.recommendation_reasons.clone(),
            match_score: recommendation.match_score,
            criteria_scores: recommendation.criteria_scores,
        }
    }
}

/// Body of `POST /api/v1/shows/recommendations`
#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub shows: Vec<ShowId>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl RecommendationRequest {
    /// Validates the request and resolves `(page, limit, offset)`
    pub fn pagination(&self) -> AppResult<(u32, u32, u32)> {
        if self.shows.is_empty() {
            return Err(AppError::InvalidInput(
                "At least one show must be selected".to_string(),
            ));
        }
        if let Some(id) = self.shows.iter().find(|id| **id <= 0) {
            return Err(AppError::InvalidInput(format!("Invalid show id: {}", id)));
        }

        let page = self.page.unwrap_or(1);
        if page < 1 {
            return Err(AppError::InvalidInput("page must be at least 1".to_string()));
        }

        let limit = self.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
            return Err(AppError::InvalidInput(format!(
                "limit must be between 1 and {}",
                MAX_PAGE_LIMIT
            )));
        }

        let offset = (page - 1).checked_mul(limit).ok_or_else(|| {
            AppError::InvalidInput("page is out of range".to_string())
        })?;

        Ok((page, limit, offset))
    }
}

/// One page of recommendations
#[derive(Debug, Serialize)]
pub struct RecommendationPage {
    pub shows: Vec<RecommendedShowView>,
    #[serde(rename = "hasMore")]
    pub has_more: bool,
    pub page: u32,
}
