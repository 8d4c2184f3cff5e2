/// Catalog access abstraction
///
/// The recommendation core reads shows through [`Catalog`] and never talks to a
/// concrete store. The importer writes through [`CatalogWriter`]. Implementations
/// live under `crate::db`.
use crate::{
    error::AppResult,
    models::{GenreId, PersonId, PersonRecord, RoleRecord, Show, ShowId, ShowRecord},
};

/// Filter for the candidate pool query
///
/// A show matches when it shares at least one genre in `genre_ids` OR at least
/// one person in `person_ids`, and its id is not in `exclude_ids`. An empty set
/// simply contributes no clause; when both sets are empty nothing matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFilter {
    pub exclude_ids: Vec<ShowId>,
    pub genre_ids: Vec<GenreId>,
    pub person_ids: Vec<PersonId>,
    pub pool_size: usize,
}

impl CandidateFilter {
    /// Whether the filter has at least one genre or person clause
    pub fn has_criteria(&self) -> bool {
        !self.genre_ids.is_empty() || !self.person_ids.is_empty()
    }

    /// Evaluates the filter against a fully loaded show
    pub fn matches(&self, show: &Show) -> bool {
        if self.exclude_ids.contains(&show.id) {
            return false;
        }

        let genre_match = show
            .genres
            .iter()
            .any(|genre| self.genre_ids.contains(&genre.id));
        let person_match = show
            .people
            .iter()
            .any(|role| self.person_ids.contains(&role.person_id));

        genre_match || person_match
    }
}

/// Read-side catalog queries
///
/// Every returned [`Show`] has its genres and person roles populated, so callers
/// never need further I/O per show.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Catalog: Send + Sync {
    /// Fetch shows by id, ordered by ascending id. Unknown ids are skipped.
    async fn fetch_shows_by_ids(&self, ids: &[ShowId]) -> AppResult<Vec<Show>>;

    /// Fetch the candidate pool: matching shows by descending popularity weight
    /// (shows without a weight last, ties by id), truncated to `pool_size`.
    /// Returns an empty list when the filter has no genre or person clause.
    async fn fetch_candidates(&self, filter: &CandidateFilter) -> AppResult<Vec<Show>>;

    /// Case-insensitive name substring search ordered by name
    async fn search_by_name(&self, query: &str, limit: usize) -> AppResult<Vec<Show>>;
}

/// Write-side operations used by the catalog importer
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogWriter: Send + Sync {
    /// Create or update a show keyed by its source id, returning the catalog id
    async fn upsert_show(&self, record: &ShowRecord) -> AppResult<ShowId>;

    /// Replace the show's genres with the given genre names, creating genres as needed
    async fn sync_genres(&self, show_id: ShowId, genre_names: &[String]) -> AppResult<()>;

    /// Create or update a person keyed by source id, returning the catalog id
    async fn upsert_person(&self, record: &PersonRecord) -> AppResult<PersonId>;

    /// Replace the show's person roles, preserving the given order
    async fn replace_roles(&self, show_id: ShowId, roles: &[RoleRecord]) -> AppResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Genre, PersonRole};

    fn show(id: ShowId, genres: &[GenreId], people: &[PersonId]) -> Show {
        Show {
            id,
            genres: genres
                .iter()
                .map(|g| Genre {
                    id: *g,
                    name: format!("genre-{}", g),
                })
                .collect(),
            people: people
                .iter()
                .map(|p| PersonRole {
                    person_id: *p,
                    name: format!("person-{}", p),
                    role: "cast".to_string(),
                    character_name: None,
                    main_cast: false,
                    image_medium: None,
                })
                .collect(),
            ..Default::default()
        }
    }

    fn filter(exclude: &[ShowId], genres: &[GenreId], people: &[PersonId]) -> CandidateFilter {
        CandidateFilter {
            exclude_ids: exclude.to_vec(),
            genre_ids: genres.to_vec(),
            person_ids: people.to_vec(),
            pool_size: 1000,
        }
    }

    #[test]
    fn test_matches_on_genre_or_person() {
        let f = filter(&[], &[1], &[10]);
        assert!(f.matches(&show(2, &[1], &[])));
        assert!(f.matches(&show(3, &[], &[10])));
        assert!(!f.matches(&show(4, &[2], &[11])));
    }

    #[test]
    fn test_excluded_show_never_matches() {
        let f = filter(&[2], &[1], &[]);
        assert!(!f.matches(&show(2, &[1], &[])));
    }

    #[test]
    fn test_has_criteria() {
        assert!(!filter(&[1], &[], &[]).has_criteria());
        assert!(filter(&[1], &[], &[5]).has_criteria());
        assert!(!filter(&[], &[], &[]).matches(&show(9, &[1], &[1])));
    }
}
