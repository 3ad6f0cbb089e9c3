#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt::{self, Display};

use serde::Serialize;

use super::results::{Competency, MAX_SCORE, MAX_TOTAL, ScoreRecord};

/// Closing words appended to the total line.
pub const ENCOURAGEMENT: &str = "Continue praticando e revisando seus textos!";

/// Canned remark shown when a competency falls short of the maximum.
pub fn remark(competency: Competency) -> &'static str {
    match competency {
        Competency::Norm => {
            "Competência 1: revise a norma padrão; há desvios gramaticais e de pontuação a \
             corrigir."
        }
        Competency::Cohesion => {
            "Competência 2: fortaleça a coesão e a coerência, encadeando as orações com mais \
             conectivos."
        }
        Competency::Argumentation => {
            "Competência 3: desenvolva a argumentação, explicitando relações de causa e \
             consequência."
        }
        Competency::AdvancedCohesion => {
            "Competência 4: diversifique os mecanismos de coesão, com expressões como \"além \
             disso\" e \"por outro lado\"."
        }
        Competency::Intervention => {
            "Competência 5: detalhe a proposta de intervenção, indicando ação, agente, meio, \
             detalhamento e finalidade."
        }
    }
}

/// Remarks for every competency below the maximum, then a total line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FeedbackReport {
    /// Zero to five remarks, in rubric order.
    remarks:    Vec<String>,
    /// `Total: <total> / 1000. <encouragement>`
    total_line: String,
}

impl FeedbackReport {
    /// Remarks without the total line.
    pub fn remarks(&self) -> &[String] {
        &self.remarks
    }

    /// The trailing total line.
    pub fn total_line(&self) -> &str {
        &self.total_line
    }

    /// All lines in output order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.remarks
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.total_line.as_str()))
    }
}

impl Display for FeedbackReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for remark in &self.remarks {
            writeln!(f, "{remark}")?;
        }
        write!(f, "{}", self.total_line)
    }
}

/// Builds the feedback report for a score record.
pub fn generate_feedback(record: &ScoreRecord) -> FeedbackReport {
    let remarks = record
        .scores()
        .into_iter()
        .filter(|(_, score)| *score < MAX_SCORE)
        .map(|(competency, _)| remark(competency).to_string())
        .collect();

    FeedbackReport {
        remarks,
        total_line: format!("Total: {} / {}. {}", record.total(), MAX_TOTAL, ENCOURAGEMENT),
    }
}
