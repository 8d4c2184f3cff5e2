use std::collections::BTreeSet;

use crate::{
    models::{GenreId, PersonId, Show, ShowId},
    services::catalog::CandidateFilter,
};

/// Upper bound on candidates scored per request
pub const CANDIDATE_POOL_SIZE: usize = 1000;

/// Genres and people gathered from the seed shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSelection {
    pub genre_ids: BTreeSet<GenreId>,
    pub person_ids: BTreeSet<PersonId>,
}

impl SeedSelection {
    /// Unions the genre and person ids of every seed
    ///
    /// Returns `None` when there are no seeds or the seeds carry neither genres
    /// nor people, in which case there is nothing to look candidates up by.
    pub fn from_seeds(seeds: &[Show]) -> Option<Self> {
        let selection = Self {
            genre_ids: seeds
                .iter()
                .flat_map(|show| show.genres.iter().map(|genre| genre.id))
                .collect(),
            person_ids: seeds
                .iter()
                .flat_map(|show| show.people.iter().map(|role| role.person_id))
                .collect(),
        };

        if selection.genre_ids.is_empty() && selection.person_ids.is_empty() {
            return None;
        }

        Some(selection)
    }

    /// Candidate pool filter excluding the requested seed ids
    pub fn candidate_filter(&self, exclude_ids: &[ShowId]) -> CandidateFilter {
        let mut exclude: Vec<ShowId> = exclude_ids.to_vec();
        exclude.sort_unstable();
        exclude.dedup();

        CandidateFilter {
            exclude_ids: exclude,
            genre_ids: self.genre_ids.iter().copied().collect(),
            person_ids: self.person_ids.iter().copied().collect(),
            pool_size: CANDIDATE_POOL_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Genre, PersonRole};

    fn seed(id: ShowId, genres: &[GenreId], people: &[PersonId]) -> Show {
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
                    main_cast: true,
                    image_medium: None,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_unions_and_deduplicates_ids() {
        let seeds = vec![seed(1, &[1, 2], &[10]), seed(2, &[2, 3], &[10, 11])];
        let selection = SeedSelection::from_seeds(&seeds).unwrap();

        assert_eq!(selection.genre_ids, BTreeSet::from([1, 2, 3]));
        assert_eq!(selection.person_ids, BTreeSet::from([10, 11]));
    }

    #[test]
    fn test_no_seeds_yields_none() {
        assert_eq!(SeedSelection::from_seeds(&[]), None);
    }

    #[test]
    fn test_seeds_without_genres_or_people_yield_none() {
        assert_eq!(SeedSelection::from_seeds(&[seed(1, &[], &[])]), None);
    }

    #[test]
    fn test_person_only_selection_is_kept() {
        let selection = SeedSelection::from_seeds(&[seed(1, &[], &[7])]).unwrap();
        assert!(selection.genre_ids.is_empty());
        assert_eq!(selection.person_ids.len(), 1);
    }

    #[test]
    fn test_candidate_filter() {
        let selection = SeedSelection::from_seeds(&[seed(1, &[2], &[9])]).unwrap();
        let filter = selection.candidate_filter(&[5, 1, 5]);

        assert_eq!(filter.exclude_ids, vec![1, 5]);
        assert_eq!(filter.genre_ids, vec![2]);
        assert_eq!(filter.person_ids, vec![9]);
        assert_eq!(filter.pool_size, CANDIDATE_POOL_SIZE);
    }
}
