use serde::Serialize;

use super::results::{Competency, CompetencyOutcome, MAX_SCORE};
use crate::types::AnnotationSet;

/// Multi-word connective phrases looked for in each sentence.
pub const CONNECTIVE_PHRASES: [&str; 5] =
    ["além disso", "dessa forma", "por outro lado", "assim como", "por conseguinte"];

/// Points awarded per (sentence, phrase) match.
pub const POINTS_PER_PHRASE: u32 = 25;

/// Outcome of competency 4, advanced cohesion mechanisms.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AdvancedCohesionScore {
    /// Score in `[0, 200]`.
    pub score:   u32,
    /// Number of (sentence, phrase) pairs where the phrase occurs.
    pub matches: usize,
}

impl CompetencyOutcome for AdvancedCohesionScore {
    const COMPETENCY: Competency = Competency::AdvancedCohesion;

    fn score(&self) -> u32 {
        self.score
    }

    fn details(&self) -> String {
        format!("{} conectivos avançados", self.matches)
    }
}

/// Scores competency 4.
///
/// A phrase counts once per sentence containing it, however many times it
/// occurs inside that sentence.
pub fn evaluate_advanced_cohesion(annotations: &AnnotationSet) -> AdvancedCohesionScore {
    let matches: usize = annotations
        .sentences
        .iter()
        .map(|sentence| {
            let sentence = sentence.text.to_lowercase();
            CONNECTIVE_PHRASES
                .iter()
                .filter(|phrase| sentence.contains(*phrase))
                .count()
        })
        .sum();

    let score = (matches as u64 * u64::from(POINTS_PER_PHRASE)).min(u64::from(MAX_SCORE)) as u32;

    AdvancedCohesionScore { score, matches }
}
