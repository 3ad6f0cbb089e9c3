#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Competency 3: argumentative markers.
pub mod argumentation;
/// Competency 2: conjunctions and polarity.
pub mod cohesion;
/// Competency 4: multi-word connective phrases.
pub mod connectives;
/// Feedback report generation.
pub mod feedback;
/// Competency 5: intervention proposal elements.
pub mod intervention;
/// Competency 1: grammar issues and severity policy.
pub mod norm;
/// Shared result types and aggregation.
pub mod results;

pub use argumentation::{ArgumentationScore, evaluate_argumentation};
pub use cohesion::{CohesionScore, evaluate_cohesion};
pub use connectives::{AdvancedCohesionScore, evaluate_advanced_cohesion};
pub use feedback::{FeedbackReport, generate_feedback};
pub use intervention::{InterventionScore, evaluate_intervention};
pub use norm::{NormScore, Severity, SeverityPolicy, evaluate_norm};
pub use results::{
    Competency, CompetencyOutcome, CompetencyRow, MAX_SCORE, MAX_TOTAL, ScoreRecord,
};

use crate::types::{AnnotationSet, GrammarIssue};

/// Runs the five evaluators over one essay's adapter outputs and aggregates
/// them. Pure; identical inputs give identical records.
pub fn score_essay(
    text: &str,
    annotations: &AnnotationSet,
    issues: &[GrammarIssue],
    polarity: f64,
    policy: &SeverityPolicy,
) -> ScoreRecord {
    let record = ScoreRecord::aggregate(
        evaluate_norm(issues, policy),
        evaluate_cohesion(annotations, polarity),
        evaluate_argumentation(annotations),
        evaluate_advanced_cohesion(annotations),
        evaluate_intervention(text),
    );

    for (competency, score) in record.scores() {
        tracing::debug!(competency = competency.number(), score, "competency scored");
    }

    record
}
