use serde::Serialize;

use super::results::{Competency, CompetencyOutcome, MAX_SCORE};

/// Stems an intervention proposal is expected to mention.
pub const PROPOSAL_ELEMENTS: [&str; 5] = ["ação", "agente", "meio", "detalhamento", "finalidade"];

/// Score for a proposal missing at least one element.
pub const PARTIAL_PROPOSAL_SCORE: u32 = 100;

/// Outcome of competency 5, intervention proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InterventionScore {
    /// Either 200 or 100.
    pub score:       u32,
    /// Whether every element occurs somewhere in the essay.
    pub all_present: bool,
}

impl CompetencyOutcome for InterventionScore {
    const COMPETENCY: Competency = Competency::Intervention;

    fn score(&self) -> u32 {
        self.score
    }

    fn details(&self) -> String {
        if self.all_present {
            "proposta completa".to_string()
        } else {
            "proposta incompleta".to_string()
        }
    }
}

/// Scores competency 5 on the raw text.
///
/// Matching is by substring over the lower-cased essay, not by token, and
/// there is no partial credit.
pub fn evaluate_intervention(text: &str) -> InterventionScore {
    let text = text.to_lowercase();
    let all_present = PROPOSAL_ELEMENTS
        .iter()
        .all(|element| text.contains(element));

    InterventionScore {
        score: if all_present {
            MAX_SCORE
        } else {
            PARTIAL_PROPOSAL_SCORE
        },
        all_present,
    }
}
