#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{AdapterError, Annotator, GrammarChecker, SentimentEstimator};
use crate::types::{AnnotationSet, GrammarIssue};

/// Request body shared by the JSON adapters.
#[derive(Serialize)]
struct TextPayload<'a> {
    /// Essay text.
    text: &'a str,
}

/// Posts `text` as JSON to `endpoint` and decodes the JSON answer.
async fn post_text<T>(client: &Client, endpoint: &str, text: &str) -> Result<T, AdapterError>
where
    T: for<'de> Deserialize<'de>,
{
    let response = client
        .post(endpoint)
        .json(&TextPayload { text })
        .send()
        .await?
        .error_for_status()?;

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| AdapterError::Malformed(e.to_string()))
}

/// Annotator backed by a JSON service.
///
/// The service receives `{"text": ...}` and answers with
/// `{"tokens": [{"text", "partOfSpeech"}], "sentences": [{"text"}]}`.
#[derive(Clone, Debug)]
pub struct HttpAnnotator {
    /// Shared HTTP client.
    client:   Client,
    /// Annotation endpoint.
    endpoint: String,
}

impl HttpAnnotator {
    /// Creates an annotator posting to `endpoint`.
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Annotator for HttpAnnotator {
    async fn annotate(&self, text: &str) -> Result<AnnotationSet, AdapterError> {
        post_text(&self.client, &self.endpoint, text).await
    }
}

/// Body returned by the polarity service.
#[derive(Deserialize)]
struct PolarityResponse {
    /// Polarity in `[-1, 1]`.
    polarity: f64,
}

/// Sentiment estimator backed by a JSON service answering `{"polarity": f64}`.
#[derive(Clone, Debug)]
pub struct HttpSentimentEstimator {
    /// Shared HTTP client.
    client:   Client,
    /// Polarity endpoint.
    endpoint: String,
}

impl HttpSentimentEstimator {
    /// Creates an estimator posting to `endpoint`.
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl SentimentEstimator for HttpSentimentEstimator {
    async fn estimate_polarity(&self, text: &str) -> Result<f64, AdapterError> {
        let response: PolarityResponse = post_text(&self.client, &self.endpoint, text).await?;
        Ok(response.polarity)
    }
}

/// Subset of a LanguageTool `/v2/check` answer.
#[derive(Deserialize)]
struct CheckResponse {
    /// Every rule match in the text.
    matches: Vec<CheckMatch>,
}

/// A single LanguageTool rule match.
#[derive(Deserialize)]
struct CheckMatch {
    /// Explanation shown to the writer.
    #[serde(default)]
    message: Option<String>,
    /// Rule that produced the match.
    rule:    CheckRule,
}

/// Rule metadata of a match.
#[derive(Deserialize)]
struct CheckRule {
    /// Rule identifier, e.g. `CONCORDANCIA_VERBAL`.
    id:       String,
    /// Category the rule belongs to.
    category: CheckCategory,
}

/// Category metadata of a rule.
#[derive(Deserialize)]
struct CheckCategory {
    /// Category identifier, e.g. `PUNCTUATION`.
    id: String,
}

/// Parses a LanguageTool `/v2/check` body into grammar issues.
pub fn parse_languagetool(body: &str) -> Result<Vec<GrammarIssue>, AdapterError> {
    let response: CheckResponse =
        serde_json::from_str(body).map_err(|e| AdapterError::Malformed(e.to_string()))?;

    Ok(response
        .matches
        .into_iter()
        .map(|m| GrammarIssue {
            category: m.rule.category.id,
            rule_id:  Some(m.rule.id),
            message:  m.message,
        })
        .collect())
}

/// Grammar checker talking to a LanguageTool server.
#[derive(Clone, Debug)]
pub struct LanguageToolChecker {
    /// Shared HTTP client.
    client:   Client,
    /// Full URL of the `/v2/check` endpoint.
    endpoint: String,
    /// Language code sent with each request.
    language: String,
}

impl LanguageToolChecker {
    /// Creates a checker for `language` posting to `endpoint`.
    pub fn new(client: Client, endpoint: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            language: language.into(),
        }
    }
}

#[async_trait]
impl GrammarChecker for LanguageToolChecker {
    async fn check_grammar(&self, text: &str) -> Result<Vec<GrammarIssue>, AdapterError> {
        let body = self
            .client
            .post(&self.endpoint)
            .form(&[("text", text), ("language", self.language.as_str())])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let issues = parse_languagetool(&body)?;
        tracing::debug!(count = issues.len(), "languagetool reported issues");
        Ok(issues)
    }
}
