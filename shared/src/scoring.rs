//! Score aggregation
//!
//! The raw total is the plain sum of selected scores. It is normalized to a
//! percentage against the catalog's maximum achievable total.

use crate::answers::AnswerSet;
use crate::catalog::Catalog;
use crate::errors::{AssessmentError, AssessmentResult};
use crate::storage::HEALTH_SCORE_KEY;
use serde::{Deserialize, Serialize};

/// Sum of all recorded scores. An empty set totals 0.
pub fn raw_total(answers: &AnswerSet) -> u32 {
    answers.scores().sum()
}

/// Reject a raw total the catalog cannot produce, e.g. a stale stored score
pub fn check_raw_total(raw_total: u32, max_possible: u32) -> AssessmentResult<u32> {
    if raw_total > max_possible {
        return Err(AssessmentError::invalid(
            HEALTH_SCORE_KEY,
            format!("{} exceeds the maximum of {}", raw_total, max_possible),
        ));
    }
    Ok(raw_total)
}

/// `round(raw / max * 100)`, clamped to `0..=100`.
///
/// A catalog whose maximum is 0 normalizes everything to 0.
pub fn normalized_percentage(raw_total: u32, max_possible: u32) -> u32 {
    if max_possible == 0 {
        return 0;
    }
    let pct = (f64::from(raw_total) / f64::from(max_possible) * 100.0).round();
    pct.clamp(0.0, 100.0) as u32
}

/// Health score band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategory {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ScoreCategory::Excellent => "Excellent",
            ScoreCategory::Good => "Good",
            ScoreCategory::Fair => "Fair",
            ScoreCategory::Poor => "Poor",
        }
    }

    /// Chart color for this band
    pub fn color(&self) -> &'static str {
        match self {
            ScoreCategory::Excellent => "#10B981",
            ScoreCategory::Good => "#3B82F6",
            ScoreCategory::Fair => "#F59E0B",
            ScoreCategory::Poor => "#EF4444",
        }
    }
}

/// Classify a normalized percentage
pub fn classify_score(percentage: u32) -> ScoreCategory {
    if percentage >= 80 {
        ScoreCategory::Excellent
    } else if percentage >= 60 {
        ScoreCategory::Good
    } else if percentage >= 40 {
        ScoreCategory::Fair
    } else {
        ScoreCategory::Poor
    }
}

/// Derived score summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub raw_total: u32,
    pub max_possible: u32,
    pub percentage: u32,
    pub category: ScoreCategory,
}

impl ScoreResult {
    pub fn compute(raw_total: u32, max_possible: u32) -> Self {
        let percentage = normalized_percentage(raw_total, max_possible);
        Self {
            raw_total,
            max_possible,
            percentage,
            category: classify_score(percentage),
        }
    }

    pub fn for_answers(answers: &AnswerSet, catalog: &Catalog) -> Self {
        Self::compute(raw_total(answers), catalog.max_score())
    }
}

/// How much of the catalog has been answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub answered: usize,
    pub total: usize,
}

impl Completion {
    pub fn of(answers: &AnswerSet, catalog: &Catalog) -> Self {
        Self {
            answered: answers.len(),
            total: catalog.question_count(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.answered >= self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogRegistry, QuestionKey};
    use crate::profile::Gender;
    use proptest::prelude::*;
    use rstest::rstest;

    fn catalog() -> Catalog {
        CatalogRegistry::builtin()
            .unwrap()
            .select(Gender::Female)
            .unwrap()
            .clone()
    }

    #[test]
    fn test_empty_answers_total_zero() {
        let answers = AnswerSet::new();
        assert_eq!(raw_total(&answers), 0);

        let result = ScoreResult::for_answers(&answers, &catalog());
        assert_eq!(result.percentage, 0);
        assert_eq!(result.category, ScoreCategory::Poor);
    }

    #[test]
    fn test_raw_total_above_max_rejected() {
        assert_eq!(check_raw_total(150, 150).unwrap(), 150);
        assert_eq!(check_raw_total(0, 150).unwrap(), 0);

        let err = check_raw_total(151, 150).unwrap_err();
        assert_eq!(err.code(), "INVALID_INPUT");
        assert_eq!(err.field(), Some("healthScore"));
        assert_eq!(err.user_message(), "Health Score: 151 exceeds the maximum of 150");
    }

    #[test]
    fn test_reference_scenario_120_of_150() {
        let result = ScoreResult::compute(120, 150);
        assert_eq!(result.percentage, 80);
        assert_eq!(result.category, ScoreCategory::Excellent);
    }

    #[test]
    fn test_total_of_recorded_answers() {
        let catalog = catalog();
        let mut answers = AnswerSet::new();
        answers
            .record_answer(&catalog, &QuestionKey::new("Lifestyle", 0), 10)
            .unwrap();
        answers
            .record_answer(&catalog, &QuestionKey::new("Lifestyle", 1), 5)
            .unwrap();
        answers
            .record_answer(&catalog, &QuestionKey::new("Lifestyle", 2), 0)
            .unwrap();
        assert_eq!(raw_total(&answers), 15);
        assert_eq!(
            Completion::of(&answers, &catalog),
            Completion {
                answered: 3,
                total: 15
            }
        );
    }

    #[test]
    fn test_zero_max_guarded() {
        assert_eq!(normalized_percentage(0, 0), 0);
        assert_eq!(normalized_percentage(40, 0), 0);
    }

    #[test]
    fn test_rounding_and_clamping() {
        // 5/150 = 3.33%
        assert_eq!(normalized_percentage(5, 150), 3);
        // 1/8 = 12.5% rounds half up
        assert_eq!(normalized_percentage(1, 8), 13);
        assert_eq!(normalized_percentage(200, 150), 100);
    }

    #[rstest]
    #[case(0, ScoreCategory::Poor)]
    #[case(39, ScoreCategory::Poor)]
    #[case(40, ScoreCategory::Fair)]
    #[case(59, ScoreCategory::Fair)]
    #[case(60, ScoreCategory::Good)]
    #[case(79, ScoreCategory::Good)]
    #[case(80, ScoreCategory::Excellent)]
    #[case(100, ScoreCategory::Excellent)]
    fn test_score_category_boundaries(#[case] pct: u32, #[case] expected: ScoreCategory) {
        assert_eq!(classify_score(pct), expected);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_percentage_endpoints(max in 1u32..10_000) {
            prop_assert_eq!(normalized_percentage(0, max), 0);
            prop_assert_eq!(normalized_percentage(max, max), 100);
        }

        #[test]
        fn prop_percentage_bounded(raw in 0u32..100_000, max in 0u32..10_000) {
            prop_assert!(normalized_percentage(raw, max) <= 100);
        }

        /// Adding answers never lowers the raw total
        #[test]
        fn prop_raw_total_monotone(
            picks in prop::collection::vec((0usize..15, 0usize..3), 0..15)
        ) {
            let catalog = catalog();
            let keys: Vec<QuestionKey> = catalog.keys().collect();
            let mut answers = AnswerSet::new();
            let mut previous = 0;
            let mut seen = std::collections::HashSet::new();
            for (q, option) in picks {
                // Only first-time answers: overwrites may legitimately lower the total
                if !seen.insert(q) {
                    continue;
                }
                answers.select_option(&catalog, &keys[q], option).unwrap();
                let total = raw_total(&answers);
                prop_assert!(total >= previous);
                previous = total;
            }
        }
    }
}
