//! Dinamizar score sheet calculator.
//!
//! An evaluator distributes [`TOTAL_CREDITS`] credits (weights) across the
//! competencies of an evaluation and rates each one from [`MIN_RATING`] to
//! [`MAX_RATING`]. The weighted value of an entry is `weight / 100 * rating`
//! and the total score is the sum of the weighted values. All arithmetic is
//! done on [`Decimal`] so two computations over the same entries are always
//! identical.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

pub const TOTAL_CREDITS: i32 = 100;
pub const MIN_WEIGHT: i32 = 0;
pub const MAX_WEIGHT: i32 = 100;
pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("weight {weight} for competency {competency_id} is outside 0..=100")]
    WeightOutOfRange { competency_id: Uuid, weight: i32 },

    #[error("rating {rating} for competency {competency_id} is outside 1..=5")]
    RatingOutOfRange { competency_id: Uuid, rating: i32 },

    #[error("competency {0} appears more than once in the score sheet")]
    DuplicateCompetency(Uuid),

    #[error("weights sum to {total_weight}, {missing} credits still to distribute")]
    Shortfall { total_weight: i32, missing: i32 },

    #[error("weights sum to {total_weight}, {excess} credits over the limit of 100")]
    Excess { total_weight: i32, excess: i32 },
}

/// One line of a score sheet as supplied by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ScoreEntry {
    pub competency_id: Uuid,
    pub weight: i32,
    pub rating: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct WeightedEntry {
    pub competency_id: Uuid,
    pub weight: i32,
    pub rating: i32,
    pub weighted_score: Decimal,
}

/// Where the credit distribution of a sheet stands relative to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditBalance {
    Exact,
    Shortfall(i32),
    Excess(i32),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ScoreSheet {
    pub entries: Vec<WeightedEntry>,
    pub total_weight: i32,
    pub total_score: Decimal,
}

/// `weight / 100 * rating`, exact to two decimal places.
pub fn weighted_score(weight: i32, rating: i32) -> Decimal {
    Decimal::new(i64::from(weight) * i64::from(rating), 2)
}

impl ScoreSheet {
    /// Validates every entry and computes the weighted values and the total.
    ///
    /// An incomplete distribution is not an error here: drafts may be saved
    /// with fewer than 100 credits. Use [`ScoreSheet::ensure_complete`] before
    /// a submit.
    pub fn compute(entries: &[ScoreEntry]) -> Result<Self, ScoringError> {
        let mut seen = HashSet::with_capacity(entries.len());
        let mut weighted = Vec::with_capacity(entries.len());
        let mut total_weight = 0;
        let mut total_score = Decimal::ZERO;

        for entry in entries {
            if !(MIN_WEIGHT..=MAX_WEIGHT).contains(&entry.weight) {
                return Err(ScoringError::WeightOutOfRange {
                    competency_id: entry.competency_id,
                    weight: entry.weight,
                });
            }
            if !(MIN_RATING..=MAX_RATING).contains(&entry.rating) {
                return Err(ScoringError::RatingOutOfRange {
                    competency_id: entry.competency_id,
                    rating: entry.rating,
                });
            }
            if !seen.insert(entry.competency_id) {
                return Err(ScoringError::DuplicateCompetency(entry.competency_id));
            }

            let value = weighted_score(entry.weight, entry.rating);
            total_weight += entry.weight;
            total_score += value;
            weighted.push(WeightedEntry {
                competency_id: entry.competency_id,
                weight: entry.weight,
                rating: entry.rating,
                weighted_score: value,
            });
        }

        Ok(Self {
            entries: weighted,
            total_weight,
            total_score: total_score.round_dp(2),
        })
    }

    pub fn credit_balance(&self) -> CreditBalance {
        match self.total_weight.cmp(&TOTAL_CREDITS) {
            std::cmp::Ordering::Equal => CreditBalance::Exact,
            std::cmp::Ordering::Less => CreditBalance::Shortfall(TOTAL_CREDITS - self.total_weight),
            std::cmp::Ordering::Greater => CreditBalance::Excess(self.total_weight - TOTAL_CREDITS),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.credit_balance() == CreditBalance::Exact
    }

    pub fn ensure_complete(&self) -> Result<(), ScoringError> {
        match self.credit_balance() {
            CreditBalance::Exact => Ok(()),
            CreditBalance::Shortfall(missing) => Err(ScoringError::Shortfall {
                total_weight: self.total_weight,
                missing,
            }),
            CreditBalance::Excess(excess) => Err(ScoringError::Excess {
                total_weight: self.total_weight,
                excess,
            }),
        }
    }

    /// Human readable reason the sheet cannot be submitted yet.
    pub fn validation_message(&self) -> Option<String> {
        self.ensure_complete().err().map(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn entry(weight: i32, rating: i32) -> ScoreEntry {
        ScoreEntry {
            competency_id: Uuid::new_v4(),
            weight,
            rating,
        }
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn four_equal_weights_score_three_and_a_half() {
        let entries = [entry(25, 5), entry(25, 4), entry(25, 3), entry(25, 2)];
        let sheet = ScoreSheet::compute(&entries).unwrap();

        let values: Vec<Decimal> = sheet.entries.iter().map(|e| e.weighted_score).collect();
        assert_eq!(values, vec![dec("1.25"), dec("1.00"), dec("0.75"), dec("0.50")]);
        assert_eq!(sheet.total_score, dec("3.50"));
        assert_eq!(sheet.total_score.to_string(), "3.50");
        assert_eq!(sheet.total_weight, 100);
        assert!(sheet.is_complete());
        assert!(sheet.ensure_complete().is_ok());
    }

    #[test]
    fn partial_distribution_is_rejected_as_shortfall() {
        let sheet = ScoreSheet::compute(&[entry(20, 4)]).unwrap();

        assert_eq!(sheet.total_weight, 20);
        assert_eq!(sheet.total_score, dec("0.80"));
        assert_eq!(
            sheet.ensure_complete(),
            Err(ScoringError::Shortfall {
                total_weight: 20,
                missing: 80
            })
        );
        assert!(sheet.validation_message().unwrap().contains("80 credits"));
    }

    #[test]
    fn over_distribution_is_rejected_as_excess() {
        let sheet = ScoreSheet::compute(&[entry(60, 3), entry(50, 3)]).unwrap();
        assert_eq!(sheet.credit_balance(), CreditBalance::Excess(10));
        assert!(matches!(
            sheet.ensure_complete(),
            Err(ScoringError::Excess { excess: 10, .. })
        ));
    }

    #[test]
    fn empty_sheet_scores_zero_and_is_incomplete() {
        let sheet = ScoreSheet::compute(&[]).unwrap();
        assert_eq!(sheet.total_score, Decimal::ZERO);
        assert_eq!(sheet.total_weight, 0);
        assert_eq!(sheet.credit_balance(), CreditBalance::Shortfall(100));
        assert!(sheet.ensure_complete().is_err());
    }

    #[test]
    fn single_full_weight_entry_scores_its_rating() {
        for rating in MIN_RATING..=MAX_RATING {
            let sheet = ScoreSheet::compute(&[entry(100, rating)]).unwrap();
            assert_eq!(sheet.total_score, Decimal::from(rating));
            assert!(sheet.is_complete());
        }
    }

    #[test]
    fn zero_weight_entry_contributes_nothing() {
        let sheet = ScoreSheet::compute(&[entry(0, 5), entry(100, 2)]).unwrap();
        assert_eq!(sheet.entries[0].weighted_score, Decimal::ZERO);
        assert_eq!(sheet.total_score, dec("2.00"));
        assert!(sheet.is_complete());
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let bad_rating = entry(50, 6);
        assert_eq!(
            ScoreSheet::compute(&[bad_rating]),
            Err(ScoringError::RatingOutOfRange {
                competency_id: bad_rating.competency_id,
                rating: 6
            })
        );

        assert!(matches!(
            ScoreSheet::compute(&[entry(50, 0)]),
            Err(ScoringError::RatingOutOfRange { rating: 0, .. })
        ));
        assert!(matches!(
            ScoreSheet::compute(&[entry(-5, 3)]),
            Err(ScoringError::WeightOutOfRange { weight: -5, .. })
        ));
        assert!(matches!(
            ScoreSheet::compute(&[entry(101, 3)]),
            Err(ScoringError::WeightOutOfRange { weight: 101, .. })
        ));
    }

    #[test]
    fn repeated_competency_is_rejected() {
        let first = entry(50, 3);
        let second = ScoreEntry {
            weight: 50,
            ..first
        };
        assert_eq!(
            ScoreSheet::compute(&[first, second]),
            Err(ScoringError::DuplicateCompetency(first.competency_id))
        );
    }

    #[test]
    fn recomputing_is_idempotent() {
        let entries = [entry(20, 4), entry(15, 3), entry(25, 5), entry(15, 4), entry(20, 5), entry(5, 4)];
        let first = ScoreSheet::compute(&entries).unwrap();
        let second = ScoreSheet::compute(&entries).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.total_score, dec("4.30"));
    }

    #[test]
    fn complete_sheets_stay_within_rating_bounds() {
        // every split of 100 credits into three multiples of 5, every rating combination
        for a in (0..=100).step_by(5) {
            for b in (0..=(100 - a)).step_by(5) {
                let c = 100 - a - b;
                for ra in MIN_RATING..=MAX_RATING {
                    for rb in MIN_RATING..=MAX_RATING {
                        for rc in [MIN_RATING, 3, MAX_RATING] {
                            let sheet =
                                ScoreSheet::compute(&[entry(a, ra), entry(b, rb), entry(c, rc)])
                                    .unwrap();
                            let expected = weighted_score(a, ra)
                                + weighted_score(b, rb)
                                + weighted_score(c, rc);
                            assert_eq!(sheet.total_score, expected);
                            assert!(sheet.total_score >= Decimal::ONE);
                            assert!(sheet.total_score <= Decimal::from(5));
                            assert!(sheet.is_complete());
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn incomplete_sheets_are_rejected_regardless_of_ratings() {
        for weight in [0, 1, 45, 99, 101, 150, 200] {
            for rating in MIN_RATING..=MAX_RATING {
                let entries = if weight > MAX_WEIGHT {
                    vec![entry(MAX_WEIGHT, rating), entry(weight - MAX_WEIGHT, rating)]
                } else {
                    vec![entry(weight, rating)]
                };
                let sheet = ScoreSheet::compute(&entries).unwrap();
                assert!(sheet.ensure_complete().is_err(), "weight {weight} accepted");
            }
        }
    }
}
