use serde::Serialize;

use super::results::{Competency, CompetencyOutcome, MAX_SCORE};
use crate::types::AnnotationSet;

/// Argumentative markers matched against single tokens.
///
/// "de acordo" spans two tokens and therefore never matches a single one; it
/// stays in the list so the lexicon mirrors the rubric's.
pub const ARGUMENT_MARKERS: [&str; 6] =
    ["porque", "portanto", "assim", "logo", "de acordo", "conforme"];

/// Points awarded per marker token.
pub const POINTS_PER_MARKER: u32 = 30;

/// Outcome of competency 3, argumentation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ArgumentationScore {
    /// Score in `[0, 200]`.
    pub score:   u32,
    /// Number of marker tokens.
    pub matches: usize,
}

impl CompetencyOutcome for ArgumentationScore {
    const COMPETENCY: Competency = Competency::Argumentation;

    fn score(&self) -> u32 {
        self.score
    }

    fn details(&self) -> String {
        format!("{} marcadores argumentativos", self.matches)
    }
}

/// Scores competency 3 by counting tokens equal to an argumentative marker.
pub fn evaluate_argumentation(annotations: &AnnotationSet) -> ArgumentationScore {
    let matches = annotations
        .tokens
        .iter()
        .filter(|token| ARGUMENT_MARKERS.contains(&token.text.to_lowercase().as_str()))
        .count();

    let score = (matches as u64 * u64::from(POINTS_PER_MARKER)).min(u64::from(MAX_SCORE)) as u32;

    ArgumentationScore { score, matches }
}
