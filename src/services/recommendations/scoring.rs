//! Weighted multi-criteria similarity between a candidate and the seed shows.
//!
//! Nine additive criteria, each capped:
//!
//! | criterion    | cap |
//! |--------------|-----|
//! | genre        | 25  |
//! | cast         | 25  |
//! | release year | 10  |
//! | rating       | 10  |
//! | type         | 8   |
//! | language     | 8   |
//! | popularity   | 5   |
//! | runtime      | 5   |
//! | status       | 4   |
//!
//! The raw score is the unrounded sum; the display score is `min(100, round(sum))`.

use std::collections::{BTreeSet, HashSet};

use crate::models::{CriteriaScores, GenreId, PersonId, ScoredCandidate, Show};

use super::selection::SeedSelection;

const GENRE_WEIGHT: f64 = 25.0;
const CAST_WEIGHT: f64 = 25.0;
const CAST_BASE: f64 = 10.0;
const CAST_PER_MATCH: f64 = 5.0;
const RELEASE_YEAR_WEIGHT: f64 = 10.0;
const RELEASE_YEAR_WINDOW: i32 = 3;
const RATING_WEIGHT: f64 = 10.0;
const RATING_FALLOFF: f64 = 2.0;
const TYPE_WEIGHT: f64 = 8.0;
const LANGUAGE_WEIGHT: f64 = 8.0;
const POPULARITY_WEIGHT: f64 = 5.0;
const POPULARITY_FALLOFF: f64 = 20.0;
const RUNTIME_WEIGHT: f64 = 5.0;
const RUNTIME_FALLOFF: f64 = 10.0;
const STATUS_WEIGHT: f64 = 4.0;
const MAX_DISPLAY_SCORE: f64 = 100.0;
/// Names listed in the cast reason
const FEATURED_PEOPLE: usize = 2;

/// Mean of the values, `None` when there are none
fn average(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Zero ratings, weights and runtimes mean "unknown" in the catalog
fn known(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

/// Most frequent value; ties go to the value seen first.
/// A missing value can win, in which case there is no dominant value.
fn dominant<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Option<String> {
    let mut tally: Vec<(Option<&str>, usize)> = Vec::new();
    for value in values {
        match tally.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, count)) => *count += 1,
            None => tally.push((value, 1)),
        }
    }

    let mut best: Option<(Option<&str>, usize)> = None;
    for (value, count) in tally {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }

    best.and_then(|(value, _)| value)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn same_value(candidate: Option<&str>, dominant: Option<&str>) -> bool {
    matches!((candidate, dominant), (Some(c), Some(d)) if c == d)
}

fn rounded(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

/// Aggregates over the seed set, computed once per request and shared by
/// every candidate score.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedProfile {
    genre_ids: BTreeSet<GenreId>,
    person_ids: BTreeSet<PersonId>,
    premiere_years: Vec<i32>,
    avg_rating: Option<f64>,
    avg_weight: Option<f64>,
    avg_runtime: Option<f64>,
    dominant_type: Option<String>,
    dominant_language: Option<String>,
    dominant_status: Option<String>,
}

impl SeedProfile {
    pub fn new(seeds: &[Show], selection: &SeedSelection) -> Self {
        Self {
            genre_ids: selection.genre_ids.clone(),
            person_ids: selection.person_ids.clone(),
            premiere_years: seeds.iter().filter_map(Show::premiere_year).collect(),
            avg_rating: known(average(seeds.iter().filter_map(|s| s.rating))),
            avg_weight: known(average(seeds.iter().filter_map(|s| s.weight))),
            avg_runtime: known(average(
                seeds.iter().filter_map(|s| s.runtime).map(f64::from),
            )),
            dominant_type: dominant(seeds.iter().map(|s| s.show_type.as_deref())),
            dominant_language: dominant(seeds.iter().map(|s| s.language.as_deref())),
            dominant_status: dominant(seeds.iter().map(|s| s.status.as_deref())),
        }
    }

    /// Scores one candidate and explains the match
    pub fn score(&self, candidate: Show) -> ScoredCandidate {
        let mut reasons = Vec::new();

        let genre = self.genre_score(&candidate, &mut reasons);
        let cast = self.cast_score(&candidate, &mut reasons);
        let release_year = self.release_year_score(&candidate, &mut reasons);
        let rating = self.rating_score(&candidate, &mut reasons);

        let show_type = if same_value(candidate.show_type.as_deref(), self.dominant_type.as_deref()) {
            reasons.push("Matches the type of shows you prefer".to_string());
            TYPE_WEIGHT
        } else {
            0.0
        };

        let language = if same_value(
            candidate.language.as_deref(),
            self.dominant_language.as_deref(),
        ) {
            reasons.push("In your preferred language".to_string());
            LANGUAGE_WEIGHT
        } else {
            0.0
        };

        let popularity = match (known(candidate.weight), self.avg_weight) {
            (Some(weight), Some(avg)) => {
                (POPULARITY_WEIGHT - (weight - avg).abs() / POPULARITY_FALLOFF).max(0.0)
            }
            _ => 0.0,
        };

        let runtime = match (known(candidate.runtime.map(f64::from)), self.avg_runtime) {
            (Some(runtime), Some(avg)) => {
                (RUNTIME_WEIGHT - (runtime - avg).abs() / RUNTIME_FALLOFF).max(0.0)
            }
            _ => 0.0,
        };

        let status = if same_value(candidate.status.as_deref(), self.dominant_status.as_deref()) {
            STATUS_WEIGHT
        } else {
            0.0
        };

        let criteria_scores = CriteriaScores {
            genre: rounded(genre),
            cast: rounded(cast),
            release_year: rounded(release_year),
            rating: rounded(rating),
            show_type: rounded(show_type),
            language: rounded(language),
            popularity: rounded(popularity),
            runtime: rounded(runtime),
            status: rounded(status),
        };

        let score = genre
            + cast
            + release_year
            + rating
            + show_type
            + language
            + popularity
            + runtime
            + status;

        ScoredCandidate {
            show: candidate,
            score,
            display_score: rounded(score.min(MAX_DISPLAY_SCORE)),
            reasons,
            criteria_scores,
        }
    }

    fn genre_score(&self, candidate: &Show, reasons: &mut Vec<String>) -> f64 {
        let candidate_genres: HashSet<GenreId> = candidate.genre_ids();
        let matches = candidate_genres
            .iter()
            .filter(|id| self.genre_ids.contains(*id))
            .count();

        if matches == 0 {
            return 0.0;
        }

        reasons.push(format!(
            "Matches {} {} with your selections",
            matches,
            if matches > 1 { "genres" } else { "genre" }
        ));

        let denominator = candidate_genres.len().max(self.genre_ids.len());
        matches as f64 / denominator as f64 * GENRE_WEIGHT
    }

    fn cast_score(&self, candidate: &Show, reasons: &mut Vec<String>) -> f64 {
        if candidate.people.is_empty() {
            tracing::debug!(show_id = candidate.id, "Candidate has no people");
            return 0.0;
        }

        // Distinct matched people in catalog order; a person counts as a lead
        // when any of their roles is main cast.
        let mut matched: Vec<(PersonId, &str, bool)> = Vec::new();
        for role in &candidate.people {
            if !self.person_ids.contains(&role.person_id) {
                continue;
            }
            match matched.iter_mut().find(|(id, _, _)| *id == role.person_id) {
                Some(entry) => entry.2 |= role.main_cast,
                None => matched.push((role.person_id, role.name.as_str(), role.main_cast)),
            }
        }

        if matched.is_empty() {
            return 0.0;
        }

        let mut featured = matched.clone();
        featured.sort_by_key(|(_, _, lead)| !*lead);
        let names: Vec<&str> = featured
            .iter()
            .take(FEATURED_PEOPLE)
            .map(|(_, name, _)| *name)
            .collect();

        reasons.push(format!(
            "Features {} {}",
            if names.len() > 1 { "actors" } else { "actor" },
            names.join(" and ")
        ));

        (matched.len() as f64 * CAST_PER_MATCH + CAST_BASE).min(CAST_WEIGHT)
    }

    fn release_year_score(&self, candidate: &Show, reasons: &mut Vec<String>) -> f64 {
        let Some(year) = candidate.premiere_year() else {
            return 0.0;
        };
        if self.premiere_years.is_empty() {
            return 0.0;
        }

        let matches = self
            .premiere_years
            .iter()
            .filter(|seed_year| (*seed_year - year).abs() <= RELEASE_YEAR_WINDOW)
            .count();
        if matches == 0 {
            return 0.0;
        }

        let ratio = matches as f64 / self.premiere_years.len() as f64;
        if ratio >= 0.5 {
            reasons.push("Released within 3 years of shows you like".to_string());
        }

        ratio * RELEASE_YEAR_WEIGHT
    }

    fn rating_score(&self, candidate: &Show, reasons: &mut Vec<String>) -> f64 {
        let (Some(rating), Some(avg)) = (known(candidate.rating), self.avg_rating) else {
            return 0.0;
        };

        let diff = (rating - avg).abs();
        if diff < 1.0 {
            reasons.push("Has a similar rating to shows you like".to_string());
        }

        (RATING_WEIGHT - diff * RATING_FALLOFF).max(0.0)
    }
}
