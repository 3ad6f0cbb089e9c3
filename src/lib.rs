//! # redacao
//!
//! Heuristic scorer for Portuguese argumentative essays. Scores the five
//! competencies of the ENEM writing rubric from linguistic annotations,
//! grammar issues and polarity, then renders a feedback report.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Seams to the annotator, grammar checker and sentiment estimator
pub mod adapters;
/// Environment-driven configuration
pub mod config;
/// The five competency evaluators, aggregation and feedback
pub mod grade;
/// Essay evaluation pipeline
pub mod pipeline;
/// Annotation and grammar-issue value types
pub mod types;

pub use adapters::{AdapterError, AdapterKind, Annotator, GrammarChecker, SentimentEstimator};
pub use config::{EvaluatorConfig, RetryPolicy};
pub use grade::{Competency, FeedbackReport, ScoreRecord, SeverityPolicy};
pub use pipeline::{EssayEvaluator, EssayText, Evaluation, EvaluationError};
pub use types::{AnnotationSet, GrammarIssue, PartOfSpeech, Sentence, Token};
