//! Coefficient-table point scorer.
//!
//! Scores a qualified result as `total * 100 / (a - b * e^(-c * bodyweight))`
//! with `(a, b, c)` chosen by sex, equipment and event type. The federation
//! publishes the coefficients; they come from config and none are built in.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use barra_core::domain::{Equipment, EventType, Sex};
use barra_core::scoring::{PointScorer, ScoreError, ScoreInput};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointCoefficients {
    pub sex: Sex,
    pub equipment: Equipment,
    pub event: EventType,
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl PointCoefficients {
    fn denominator(&self, bodyweight: f64) -> f64 {
        self.a - self.b * (-self.c * bodyweight).exp()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CoefficientScorer {
    table: HashMap<(Sex, Equipment, EventType), PointCoefficients>,
}

impl CoefficientScorer {
    /// Later rows win over earlier ones with the same key.
    pub fn new(rows: &[PointCoefficients]) -> Self {
        let table = rows
            .iter()
            .map(|row| ((row.sex, row.equipment, row.event), *row))
            .collect();
        Self { table }
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }
}

impl PointScorer for CoefficientScorer {
    fn score(&self, input: &ScoreInput<'_>) -> Result<f64, ScoreError> {
        let event = input.event_type();
        let coefficients = self
            .table
            .get(&(input.sex, input.equipment, event))
            .ok_or(ScoreError::MissingCoefficients {
                sex: input.sex,
                equipment: input.equipment,
                event,
            })?;

        let denominator = coefficients.denominator(input.bodyweight);
        if !(denominator.is_finite() && denominator > 0.0) || input.bodyweight <= 0.0 {
            return Err(ScoreError::OutOfDomain { bodyweight: input.bodyweight });
        }
        Ok(input.total() * 100.0 / denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barra_core::domain::{Modality, Movement};
    use std::collections::BTreeMap;

    fn coefficients(event: EventType) -> PointCoefficients {
        PointCoefficients {
            sex: Sex::Male,
            equipment: Equipment::Raw,
            event,
            a: 1199.72839,
            b: 1025.18162,
            c: 0.00921,
        }
    }

    fn lifts(pairs: &[(Movement, f64)]) -> BTreeMap<Movement, f64> {
        pairs.iter().copied().collect()
    }

    fn full_power(squat: f64) -> BTreeMap<Movement, f64> {
        lifts(&[(Movement::Squat, squat), (Movement::Bench, 80.0), (Movement::Deadlift, 135.0)])
    }

    fn input(lifts: &BTreeMap<Movement, f64>, bw: f64, modality: Modality) -> ScoreInput<'_> {
        ScoreInput {
            lifts,
            bodyweight: bw,
            sex: Sex::Male,
            equipment: Equipment::Raw,
            modality,
        }
    }

    #[test]
    fn scores_with_formula() {
        let scorer = CoefficientScorer::new(&[coefficients(EventType::FullPower)]);
        let l = full_power(110.0);
        let score = scorer.score(&input(&l, 90.0, Modality::AST)).unwrap();
        let expected = 325.0 * 100.0 / (1199.72839 - 1025.18162 * (-0.00921_f64 * 90.0).exp());
        assert!((score - expected).abs() < 1e-9);
    }

    #[test]
    fn monotonic_in_total() {
        let scorer = CoefficientScorer::new(&[coefficients(EventType::FullPower)]);
        let light = full_power(100.0);
        let heavy = full_power(110.0);
        let a = scorer.score(&input(&light, 90.0, Modality::AST)).unwrap();
        let b = scorer.score(&input(&heavy, 90.0, Modality::AST)).unwrap();
        assert!(b > a);
    }

    #[test]
    fn event_type_selects_row() {
        let scorer = CoefficientScorer::new(&[coefficients(EventType::FullPower)]);
        let l = lifts(&[(Movement::Bench, 80.0)]);
        let err = scorer.score(&input(&l, 90.0, Modality::S)).unwrap_err();
        assert_eq!(
            err,
            ScoreError::MissingCoefficients {
                sex: Sex::Male,
                equipment: Equipment::Raw,
                event: EventType::SingleLift,
            }
        );
    }

    #[test]
    fn non_positive_denominator_is_out_of_domain() {
        let mut row = coefficients(EventType::FullPower);
        row.a = 10.0;
        row.b = 100.0;
        let scorer = CoefficientScorer::new(&[row]);
        let l = full_power(100.0);
        let err = scorer.score(&input(&l, 60.0, Modality::AST)).unwrap_err();
        assert!(matches!(err, ScoreError::OutOfDomain { .. }));
    }
}
