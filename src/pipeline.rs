#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{future::Future, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use futures::{
    StreamExt,
    future::{AbortRegistration, Abortable, Aborted},
    stream,
};
use serde::Serialize;
use tokio::time::{sleep, timeout};
use typed_builder::TypedBuilder;

use crate::{
    adapters::{
        AdapterError, AdapterKind, Annotator, GrammarChecker, HttpAnnotator,
        HttpSentimentEstimator, LanguageToolChecker, SentimentEstimator,
    },
    config::{EvaluatorConfig, RetryPolicy},
    grade::{FeedbackReport, ScoreRecord, SeverityPolicy, generate_feedback, score_essay},
};

/// Ways a single essay evaluation can fail.
#[derive(thiserror::Error, Debug)]
pub enum EvaluationError {
    /// The essay was rejected before any adapter was called.
    #[error("invalid essay: {0}")]
    InvalidInput(String),
    /// An adapter failed, timed out, or answered with something unusable.
    #[error("{adapter} unavailable: {source}")]
    AdapterUnavailable {
        /// Adapter that failed.
        adapter: AdapterKind,
        /// Underlying cause.
        #[source]
        source:  AdapterError,
    },
}

/// Essay text that passed input validation.
#[derive(Copy, Clone, Debug)]
pub struct EssayText<'a>(&'a str);

impl<'a> EssayText<'a> {
    /// Validates `text`, rejecting empty or whitespace-only input.
    pub fn new(text: &'a str) -> Result<Self, EvaluationError> {
        if text.trim().is_empty() {
            return Err(EvaluationError::InvalidInput(
                "essay text is empty or whitespace only".to_string(),
            ));
        }
        Ok(Self(text))
    }

    /// Returns the underlying text.
    pub fn as_str(&self) -> &'a str {
        self.0
    }
}

/// Score record and feedback report of one essay.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Evaluation {
    /// Per-competency outcomes and total.
    pub record:   ScoreRecord,
    /// Feedback derived from `record`.
    pub feedback: FeedbackReport,
}

/// Scores essays using injected, shared adapter handles.
///
/// Each evaluation calls the annotator, grammar checker and sentiment
/// estimator exactly once, concurrently, then runs the five evaluators over
/// their outputs.
#[derive(Clone, TypedBuilder)]
pub struct EssayEvaluator {
    /// Tokenizer/tagger/sentence splitter.
    annotator:         Arc<dyn Annotator>,
    /// Grammar and punctuation checker.
    grammar_checker:   Arc<dyn GrammarChecker>,
    /// Polarity estimator.
    sentiment:         Arc<dyn SentimentEstimator>,
    /// Severity policy for competency 1.
    #[builder(default)]
    policy:            SeverityPolicy,
    /// Upper bound on each adapter call.
    #[builder(default = Duration::from_secs(30))]
    adapter_timeout:   Duration,
    /// Retry behaviour around adapter calls.
    #[builder(default)]
    retry:             RetryPolicy,
    /// Essays scored at once by `evaluate_batch`.
    #[builder(default = 4)]
    batch_concurrency: usize,
}

impl EssayEvaluator {
    /// Wires the given adapters with the policy, timeout, retry and batch
    /// settings of `config`.
    pub fn with_config(
        config: &EvaluatorConfig,
        annotator: Arc<dyn Annotator>,
        grammar_checker: Arc<dyn GrammarChecker>,
        sentiment: Arc<dyn SentimentEstimator>,
    ) -> Self {
        Self {
            annotator,
            grammar_checker,
            sentiment,
            policy: config.severity_policy(),
            adapter_timeout: config.adapter_timeout(),
            retry: config.retry(),
            batch_concurrency: config.batch_concurrency(),
        }
    }

    /// Builds an evaluator backed by the HTTP adapters described by `config`.
    pub fn from_config(config: &EvaluatorConfig) -> Result<Self> {
        let client = config.http_client()?;
        let annotator_url = config
            .annotator_url()
            .context("REDACAO_ANNOTATOR_URL must be set to annotate essays.")?;
        let sentiment_url = config
            .sentiment_url()
            .context("REDACAO_SENTIMENT_URL must be set to estimate polarity.")?;

        Ok(Self::with_config(
            config,
            Arc::new(HttpAnnotator::new(client.clone(), annotator_url)),
            Arc::new(LanguageToolChecker::new(
                client.clone(),
                config.languagetool_url(),
                config.languagetool_language(),
            )),
            Arc::new(HttpSentimentEstimator::new(client, sentiment_url)),
        ))
    }

    /// Returns the active severity policy.
    pub fn policy(&self) -> &SeverityPolicy {
        &self.policy
    }

    /// Scores one essay and renders its feedback.
    ///
    /// Any adapter failure aborts the evaluation; no partial record is
    /// produced.
    pub async fn evaluate(&self, text: &str) -> Result<Evaluation, EvaluationError> {
        let essay = EssayText::new(text)?;
        let text = essay.as_str();

        let (annotations, issues, polarity) = tokio::try_join!(
            self.call(AdapterKind::Annotator, || self.annotator.annotate(text)),
            self.call(AdapterKind::GrammarChecker, || self.grammar_checker.check_grammar(text)),
            self.call(AdapterKind::SentimentEstimator, || async move {
                checked_polarity(self.sentiment.estimate_polarity(text).await?)
            }),
        )?;

        let record = score_essay(text, &annotations, &issues, polarity, &self.policy);
        let feedback = generate_feedback(&record);
        tracing::info!(
            total = record.total(),
            issues = issues.len(),
            tokens = annotations.tokens.len(),
            "essay evaluated"
        );

        Ok(Evaluation { record, feedback })
    }

    /// Scores several essays, at most `batch_concurrency` at a time, keeping
    /// input order.
    ///
    /// Triggering the `AbortHandle` paired with `registration` drops all
    /// in-flight evaluations and yields `Err(Aborted)`.
    pub async fn evaluate_batch<I, S>(
        &self,
        essays: I,
        registration: AbortRegistration,
    ) -> Result<Vec<Result<Evaluation, EvaluationError>>, Aborted>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let essays: Vec<S> = essays.into_iter().collect();
        let work = stream::iter(essays.iter())
            .map(|essay| self.evaluate(essay.as_ref()))
            .buffered(self.batch_concurrency.max(1))
            .collect::<Vec<_>>();

        let outcome = Abortable::new(work, registration).await;
        if outcome.is_err() {
            tracing::warn!(essays = essays.len(), "batch evaluation aborted");
        }
        outcome
    }

    /// Runs one adapter call under the timeout, retrying per the policy.
    async fn call<T, F, Fut>(&self, adapter: AdapterKind, mut op: F) -> Result<T, EvaluationError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, AdapterError>>,
    {
        let mut attempt = 0;
        let mut backoff = self.retry.backoff();

        loop {
            let outcome = match timeout(self.adapter_timeout, op()).await {
                Ok(result) => result,
                Err(_) => Err(AdapterError::Timeout(self.adapter_timeout)),
            };

            match outcome {
                Ok(value) => return Ok(value),
                Err(err) if attempt < self.retry.retries() => {
                    attempt += 1;
                    tracing::warn!(%adapter, attempt, error = %err, "adapter call failed, retrying");
                    sleep(backoff).await;
                    backoff = backoff.saturating_mul(2);
                }
                Err(source) => {
                    tracing::warn!(%adapter, error = %source, "adapter unavailable");
                    return Err(EvaluationError::AdapterUnavailable { adapter, source });
                }
            }
        }
    }
}

/// Rejects polarities outside `[-1, 1]` (including NaN) as malformed.
fn checked_polarity(polarity: f64) -> Result<f64, AdapterError> {
    if (-1.0..=1.0).contains(&polarity) {
        Ok(polarity)
    } else {
        Err(AdapterError::Malformed(format!("polarity {polarity} is outside [-1, 1]")))
    }
}
