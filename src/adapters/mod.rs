#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Seams to the external linguistic services the scorer depends on.

/// In-memory adapters returning canned responses.
pub mod fixed;
/// HTTP-backed adapters.
pub mod http;

use std::{fmt, time::Duration};

use async_trait::async_trait;
use serde::Serialize;

pub use fixed::{FixedAnnotator, FixedGrammarChecker, FixedSentiment, UnavailableAdapter};
pub use http::{HttpAnnotator, HttpSentimentEstimator, LanguageToolChecker};

use crate::types::{AnnotationSet, GrammarIssue};

/// Identifies which external collaborator an adapter stands in for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterKind {
    /// Tokenizer, part-of-speech tagger and sentence splitter.
    Annotator,
    /// Grammar and punctuation checker.
    GrammarChecker,
    /// Polarity estimator.
    SentimentEstimator,
}

impl AdapterKind {
    /// Returns a human-readable name for the adapter.
    pub fn as_str(self) -> &'static str {
        match self {
            AdapterKind::Annotator => "annotator",
            AdapterKind::GrammarChecker => "grammar checker",
            AdapterKind::SentimentEstimator => "sentiment estimator",
        }
    }
}

impl fmt::Display for AdapterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons an adapter call can fail.
#[derive(thiserror::Error, Debug)]
pub enum AdapterError {
    /// The service could not be reached or answered with an error status.
    #[error("service could not be reached: {0}")]
    Transport(String),
    /// The call did not finish within the configured limit.
    #[error("call timed out after {0:?}")]
    Timeout(Duration),
    /// The service answered, but not with something we can use.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for AdapterError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AdapterError::Malformed(err.to_string())
        } else {
            AdapterError::Transport(err.to_string())
        }
    }
}

/// Segments text into sentences and part-of-speech tagged tokens.
#[async_trait]
pub trait Annotator: Send + Sync {
    /// Annotates the essay.
    async fn annotate(&self, text: &str) -> Result<AnnotationSet, AdapterError>;
}

/// Reports grammar and punctuation problems.
#[async_trait]
pub trait GrammarChecker: Send + Sync {
    /// Returns every issue found in the essay.
    async fn check_grammar(&self, text: &str) -> Result<Vec<GrammarIssue>, AdapterError>;
}

/// Estimates the overall polarity of a text.
#[async_trait]
pub trait SentimentEstimator: Send + Sync {
    /// Returns a polarity that should lie in `[-1, 1]`.
    async fn estimate_polarity(&self, text: &str) -> Result<f64, AdapterError>;
}
