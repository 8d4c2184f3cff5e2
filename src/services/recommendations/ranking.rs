use crate::models::{RecommendedShow, ScoredCandidate};

/// Orders scored candidates by descending raw score and returns one page
///
/// The sort is stable, so equal scores keep the candidate pool order
/// (popularity), which keeps results identical between calls.
pub fn rank(mut scored: Vec<ScoredCandidate>, limit: usize, offset: usize) -> Vec<RecommendedShow> {
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    scored
        .into_iter()
        .skip(offset)
        .take(limit)
        .map(RecommendedShow::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CriteriaScores, Show};

    fn scored(id: i64, score: f64) -> ScoredCandidate {
        ScoredCandidate {
            show: Show {
                id,
                ..Default::default()
            },
            score,
            display_score: score.round() as u32,
            reasons: vec![format!("reason-{}", id)],
            criteria_scores: CriteriaScores::default(),
        }
    }

    fn ids(ranked: &[RecommendedShow]) -> Vec<i64> {
        ranked.iter().map(|r| r.show.id).collect()
    }

    #[test]
    fn test_sorts_descending_by_raw_score() {
        let ranked = rank(
            vec![scored(1, 10.0), scored(2, 40.4), scored(3, 40.6)],
            10,
            0,
        );
        assert_eq!(ids(&ranked), vec![3, 2, 1]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranked = rank(
            vec![scored(5, 20.0), scored(1, 30.0), scored(9, 20.0), scored(2, 20.0)],
            10,
            0,
        );
        assert_eq!(ids(&ranked), vec![1, 5, 9, 2]);
    }

    #[test]
    fn test_offset_and_limit() {
        let pool = || (1..=6).map(|i| scored(i, 100.0 - i as f64)).collect::<Vec<_>>();
        assert_eq!(ids(&rank(pool(), 2, 1)), vec![2, 3]);
        assert_eq!(ids(&rank(pool(), 10, 5)), vec![6]);
        assert!(rank(pool(), 3, 6).is_empty());
    }

    #[test]
    fn test_carries_explanation() {
        let ranked = rank(vec![scored(7, 42.0)], 1, 0);
        assert_eq!(ranked[0].match_score, 42);
        assert_eq!(ranked[0].score, 42.0);
        assert_eq!(ranked[0].recommendation_reasons, vec!["reason-7"]);
    }
}
