use async_trait::async_trait;

use super::{AdapterError, Annotator, GrammarChecker, SentimentEstimator};
use crate::types::{AnnotationSet, GrammarIssue};

/// Annotator that hands back the same annotations for every text.
#[derive(Clone, Debug, Default)]
pub struct FixedAnnotator(pub AnnotationSet);

#[async_trait]
impl Annotator for FixedAnnotator {
    async fn annotate(&self, _text: &str) -> Result<AnnotationSet, AdapterError> {
        Ok(self.0.clone())
    }
}

/// Grammar checker that reports the same issues for every text.
#[derive(Clone, Debug, Default)]
pub struct FixedGrammarChecker(pub Vec<GrammarIssue>);

#[async_trait]
impl GrammarChecker for FixedGrammarChecker {
    async fn check_grammar(&self, _text: &str) -> Result<Vec<GrammarIssue>, AdapterError> {
        Ok(self.0.clone())
    }
}

/// Sentiment estimator that always returns the same polarity.
#[derive(Copy, Clone, Debug, Default)]
pub struct FixedSentiment(pub f64);

#[async_trait]
impl SentimentEstimator for FixedSentiment {
    async fn estimate_polarity(&self, _text: &str) -> Result<f64, AdapterError> {
        Ok(self.0)
    }
}

/// Stand-in for a service that cannot be reached. Every call fails.
#[derive(Clone, Debug)]
pub struct UnavailableAdapter {
    /// Reported as the transport failure.
    reason: String,
}

impl UnavailableAdapter {
    /// Creates an adapter whose calls fail with `reason`.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Builds the error every call returns.
    fn fail(&self) -> AdapterError {
        AdapterError::Transport(self.reason.clone())
    }
}

impl Default for UnavailableAdapter {
    fn default() -> Self {
        Self::new("service unavailable")
    }
}

#[async_trait]
impl Annotator for UnavailableAdapter {
    async fn annotate(&self, _text: &str) -> Result<AnnotationSet, AdapterError> {
        Err(self.fail())
    }
}

#[async_trait]
impl GrammarChecker for UnavailableAdapter {
    async fn check_grammar(&self, _text: &str) -> Result<Vec<GrammarIssue>, AdapterError> {
        Err(self.fail())
    }
}

#[async_trait]
impl SentimentEstimator for UnavailableAdapter {
    async fn estimate_polarity(&self, _text: &str) -> Result<f64, AdapterError> {
        Err(self.fail())
    }
}
