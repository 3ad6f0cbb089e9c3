use serde::Serialize;

use super::results::{Competency, CompetencyOutcome, MAX_SCORE};
use crate::types::AnnotationSet;

/// Points awarded per conjunction token.
pub const POINTS_PER_CONNECTIVE: u32 = 20;

/// Outcome of competency 2, cohesion and coherence.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CohesionScore {
    /// Score in `[0, 200]`.
    pub score:       u32,
    /// Polarity reported by the sentiment estimator.
    pub polarity:    f64,
    /// Surface text of every conjunction token, in essay order.
    pub connectives: Vec<String>,
}

impl CompetencyOutcome for CohesionScore {
    const COMPETENCY: Competency = Competency::Cohesion;

    fn score(&self) -> u32 {
        self.score
    }

    fn details(&self) -> String {
        format!("polaridade {:.2}, {} conectivos", self.polarity, self.connectives.len())
    }
}

/// Scores competency 2 from conjunction tokens and the essay's polarity.
///
/// `base = round((polarity + 1) * 100)` and
/// `connective = min(200, count * 20)`; only their sum is clamped to 200, so
/// it may exceed 200 before the final `min`.
pub fn evaluate_cohesion(annotations: &AnnotationSet, polarity: f64) -> CohesionScore {
    let connectives: Vec<String> = annotations
        .tokens
        .iter()
        .filter(|token| token.part_of_speech.is_conjunction())
        .map(|token| token.text.clone())
        .collect();

    let base = ((polarity.clamp(-1.0, 1.0) + 1.0) * 100.0).round_ties_even() as u32;
    let connective_score = (connectives.len() as u64 * u64::from(POINTS_PER_CONNECTIVE))
        .min(u64::from(MAX_SCORE)) as u32;
    let score = (base + connective_score).min(MAX_SCORE);

    CohesionScore {
        score,
        polarity,
        connectives,
    }
}
