#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::results::{Competency, CompetencyOutcome, MAX_SCORE};
use crate::types::GrammarIssue;

/// Points lost per severe issue.
pub const SEVERE_PENALTY: u32 = 15;
/// Points lost per minor issue.
pub const MINOR_PENALTY: u32 = 5;

/// Category fragments treated as severe when no policy is configured:
/// agreement (concordância) and punctuation (pontuação) problems.
pub const DEFAULT_SEVERE_MARKERS: [&str; 4] = ["concord", "agreement", "pontua", "punctuation"];

/// How much a grammar issue weighs against the essay.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Agreement, punctuation and anything else the policy flags.
    Severe,
    /// Everything else.
    Minor,
}

impl Severity {
    /// Points deducted for one issue of this severity.
    pub fn penalty(self) -> u32 {
        match self {
            Severity::Severe => SEVERE_PENALTY,
            Severity::Minor => MINOR_PENALTY,
        }
    }
}

/// Maps grammar checker categories onto [`Severity`].
///
/// An issue is severe when its category or rule id contains any of the
/// policy's markers, compared case-insensitively. Checker taxonomies differ, so the markers are
/// injectable rather than fixed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityPolicy {
    /// Lower-cased category fragments that make an issue severe.
    severe_markers: Vec<String>,
}

impl Default for SeverityPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_SEVERE_MARKERS)
    }
}

impl SeverityPolicy {
    /// Builds a policy from category fragments. Blank and repeated fragments
    /// are dropped.
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let severe_markers = markers
            .into_iter()
            .map(|m| m.as_ref().trim().to_lowercase())
            .filter(|m| !m.is_empty())
            .unique()
            .collect();
        Self { severe_markers }
    }

    /// Returns the lower-cased markers.
    pub fn markers(&self) -> &[String] {
        &self.severe_markers
    }

    /// Classifies a single issue by its category and, when present, its rule
    /// id. Checkers such as LanguageTool file agreement rules under a broad
    /// `GRAMMAR` category and only name them in the rule id.
    pub fn classify(&self, issue: &GrammarIssue) -> Severity {
        let labels = std::iter::once(issue.category.as_str())
            .chain(issue.rule_id.as_deref())
            .map(str::to_lowercase)
            .collect::<Vec<_>>();
        if self.severe_markers.iter().any(|marker| {
            labels
                .iter()
                .any(|label| label.contains(marker.as_str()))
        }) {
            Severity::Severe
        } else {
            Severity::Minor
        }
    }
}

/// Outcome of competency 1, mastery of the standard written language.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NormScore {
    /// Score in `[0, 200]`.
    pub score:         u32,
    /// Every issue the checker reported.
    pub total_issues:  usize,
    /// Issues the policy classified as severe.
    pub severe_issues: usize,
}

impl CompetencyOutcome for NormScore {
    const COMPETENCY: Competency = Competency::Norm;

    fn score(&self) -> u32 {
        self.score
    }

    fn details(&self) -> String {
        format!("{} desvios ({} graves)", self.total_issues, self.severe_issues)
    }
}

/// Scores competency 1 from the grammar checker's issues.
///
/// Each severe issue costs 15 points, each minor one 5, floored at 0.
pub fn evaluate_norm(issues: &[GrammarIssue], policy: &SeverityPolicy) -> NormScore {
    let severe_issues = issues
        .iter()
        .filter(|issue| policy.classify(issue) == Severity::Severe)
        .count();
    let minor_issues = issues.len() - severe_issues;

    let penalty = (severe_issues as u64) * u64::from(SEVERE_PENALTY)
        + (minor_issues as u64) * u64::from(MINOR_PENALTY);
    let score = u64::from(MAX_SCORE).saturating_sub(penalty) as u32;

    NormScore {
        score,
        total_issues: issues.len(),
        severe_issues,
    }
}
