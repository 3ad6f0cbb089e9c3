#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt::{self, Display};

use serde::Serialize;
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Panel, Style, Width, object::Rows},
};

use super::{
    argumentation::ArgumentationScore, cohesion::CohesionScore,
    connectives::AdvancedCohesionScore, intervention::InterventionScore, norm::NormScore,
};

/// Highest score a single competency can reach.
pub const MAX_SCORE: u32 = 200;
/// Highest total an essay can reach.
pub const MAX_TOTAL: u32 = MAX_SCORE * 5;

/// The five grading dimensions of the essay rubric.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "u8")]
pub enum Competency {
    /// 1: mastery of the standard written language.
    Norm,
    /// 2: cohesion and coherence.
    Cohesion,
    /// 3: argumentation.
    Argumentation,
    /// 4: advanced cohesion mechanisms.
    AdvancedCohesion,
    /// 5: intervention proposal.
    Intervention,
}

impl Competency {
    /// All competencies in rubric order.
    pub const ALL: [Competency; 5] = [
        Competency::Norm,
        Competency::Cohesion,
        Competency::Argumentation,
        Competency::AdvancedCohesion,
        Competency::Intervention,
    ];

    /// Rubric number, 1 through 5.
    pub fn number(self) -> u8 {
        match self {
            Competency::Norm => 1,
            Competency::Cohesion => 2,
            Competency::Argumentation => 3,
            Competency::AdvancedCohesion => 4,
            Competency::Intervention => 5,
        }
    }

    /// Looks a competency up by its rubric number.
    pub fn from_number(number: u8) -> Option<Self> {
        Competency::ALL.into_iter().find(|c| c.number() == number)
    }

    /// Short Portuguese title used in tables.
    pub fn title(self) -> &'static str {
        match self {
            Competency::Norm => "Domínio da norma padrão",
            Competency::Cohesion => "Coesão e coerência",
            Competency::Argumentation => "Argumentação",
            Competency::AdvancedCohesion => "Mecanismos de coesão",
            Competency::Intervention => "Proposta de intervenção",
        }
    }
}

impl From<Competency> for u8 {
    fn from(value: Competency) -> Self {
        value.number()
    }
}

impl Display for Competency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.title())
    }
}

/// Common view over the five per-competency outcomes.
pub trait CompetencyOutcome {
    /// Competency this outcome belongs to.
    const COMPETENCY: Competency;

    /// Score in `[0, 200]`.
    fn score(&self) -> u32;

    /// One-line summary of the diagnostic metrics.
    fn details(&self) -> String;

    /// Table row for this outcome.
    fn row(&self) -> CompetencyRow {
        CompetencyRow {
            competency: Self::COMPETENCY.to_string(),
            score:      format!("{}/{}", self.score(), MAX_SCORE),
            details:    self.details(),
        }
    }
}

#[derive(Tabled, Clone, Debug)]
/// A rendered line of the results table.
pub struct CompetencyRow {
    #[tabled(rename = "Competência")]
    /// * `competency`: number and title
    competency: String,
    #[tabled(rename = "Nota")]
    /// * `score`: score out of 200
    score:      String,
    #[tabled(rename = "Detalhes")]
    /// * `details`: diagnostic metrics
    details:    String,
}

/// Per-competency outcomes of one essay plus their total.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScoreRecord {
    /// Competency 1.
    pub norm:              NormScore,
    /// Competency 2.
    pub cohesion:          CohesionScore,
    /// Competency 3.
    pub argumentation:     ArgumentationScore,
    /// Competency 4.
    pub advanced_cohesion: AdvancedCohesionScore,
    /// Competency 5.
    pub intervention:      InterventionScore,
    /// Exact sum of the five scores.
    total:                 u32,
}

impl ScoreRecord {
    /// Collects the five outcomes and sums their scores.
    pub fn aggregate(
        norm: NormScore,
        cohesion: CohesionScore,
        argumentation: ArgumentationScore,
        advanced_cohesion: AdvancedCohesionScore,
        intervention: InterventionScore,
    ) -> Self {
        let total = norm.score()
            + cohesion.score()
            + argumentation.score()
            + advanced_cohesion.score()
            + intervention.score();

        Self {
            norm,
            cohesion,
            argumentation,
            advanced_cohesion,
            intervention,
            total,
        }
    }

    /// Sum of the five scores, in `[0, 1000]`.
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Score of a single competency.
    pub fn score(&self, competency: Competency) -> u32 {
        match competency {
            Competency::Norm => self.norm.score(),
            Competency::Cohesion => self.cohesion.score(),
            Competency::Argumentation => self.argumentation.score(),
            Competency::AdvancedCohesion => self.advanced_cohesion.score(),
            Competency::Intervention => self.intervention.score(),
        }
    }

    /// Scores in rubric order.
    pub fn scores(&self) -> [(Competency, u32); 5] {
        Competency::ALL.map(|c| (c, self.score(c)))
    }

    /// Table rows in rubric order.
    pub fn rows(&self) -> Vec<CompetencyRow> {
        vec![
            self.norm.row(),
            self.cohesion.row(),
            self.argumentation.row(),
            self.advanced_cohesion.row(),
            self.intervention.row(),
        ]
    }

    /// Renders the record as a bordered table with the total as footer.
    pub fn render_table(&self) -> String {
        Table::new(self.rows())
            .with(Panel::header("Resultado da Redação"))
            .with(Panel::footer(format!("Total: {}/{}", self.total, MAX_TOTAL)))
            .with(Modify::new(Rows::new(1..)).with(Width::wrap(32).keep_words(true)))
            .with(
                Modify::new(Rows::first())
                    .with(Alignment::center())
                    .with(Alignment::center_vertical()),
            )
            .with(
                Modify::new(Rows::last())
                    .with(Alignment::center())
                    .with(Alignment::center_vertical()),
            )
            .with(Style::modern())
            .to_string()
    }
}
