#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{str::FromStr, time::Duration};

use anyhow::{Context, Result};
use reqwest::Client;

use crate::grade::SeverityPolicy;

/// Default public LanguageTool endpoint.
pub const DEFAULT_LANGUAGETOOL_URL: &str = "https://api.languagetool.org/v2/check";

/// Bounded retry applied around each adapter call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first failure; 0 means fail fast.
    retries: u32,
    /// Delay before the first retry, doubled after every retry.
    backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 0,
            backoff: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    /// Creates a retry policy.
    pub fn new(retries: u32, backoff: Duration) -> Self {
        Self { retries, backoff }
    }

    /// Returns the number of extra attempts.
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Returns the initial backoff.
    pub fn backoff(&self) -> Duration {
        self.backoff
    }
}

/// Runtime configuration for the scorer and its HTTP adapters.
#[derive(Clone, Debug)]
pub struct EvaluatorConfig {
    /// Upper bound on each adapter call.
    adapter_timeout:       Duration,
    /// Retry behaviour around adapter calls.
    retry:                 RetryPolicy,
    /// Endpoint of the JSON annotation service.
    annotator_url:         Option<String>,
    /// Endpoint of the JSON polarity service.
    sentiment_url:         Option<String>,
    /// LanguageTool `/v2/check` endpoint.
    languagetool_url:      String,
    /// Language code sent to LanguageTool.
    languagetool_language: String,
    /// Category markers overriding the default severity policy.
    severe_categories:     Option<Vec<String>>,
    /// Essays scored at once in batch mode.
    batch_concurrency:     usize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            adapter_timeout:       Duration::from_secs(30),
            retry:                 RetryPolicy::default(),
            annotator_url:         None,
            sentiment_url:         None,
            languagetool_url:      DEFAULT_LANGUAGETOOL_URL.to_string(),
            languagetool_language: "pt-BR".to_string(),
            severe_categories:     None,
            batch_concurrency:     4,
        }
    }
}

impl EvaluatorConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, falling back to defaults for
    /// missing or unparsable values.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let adapter_timeout = parse_or(&lookup, "REDACAO_ADAPTER_TIMEOUT_SECS", None)
            .map(Duration::from_secs)
            .unwrap_or(defaults.adapter_timeout);
        let retry = RetryPolicy::new(
            parse_or(&lookup, "REDACAO_ADAPTER_RETRIES", Some(defaults.retry.retries))
                .unwrap_or_default(),
            parse_or(&lookup, "REDACAO_RETRY_BACKOFF_MS", None)
                .map(Duration::from_millis)
                .unwrap_or(defaults.retry.backoff),
        );
        let severe_categories = text("REDACAO_SEVERE_CATEGORIES").map(|value| {
            value
                .split(',')
                .map(|marker| marker.trim().to_owned())
                .filter(|marker| !marker.is_empty())
                .collect()
        });
        let batch_concurrency: usize =
            parse_or(&lookup, "REDACAO_BATCH_CONCURRENCY", Some(defaults.batch_concurrency))
                .unwrap_or(defaults.batch_concurrency)
                .max(1);

        Self {
            adapter_timeout,
            retry,
            annotator_url: text("REDACAO_ANNOTATOR_URL"),
            sentiment_url: text("REDACAO_SENTIMENT_URL"),
            languagetool_url: text("REDACAO_LANGUAGETOOL_URL")
                .unwrap_or(defaults.languagetool_url),
            languagetool_language: text("REDACAO_LANGUAGETOOL_LANG")
                .unwrap_or(defaults.languagetool_language),
            severe_categories,
            batch_concurrency,
        }
    }

    /// Returns the per-call adapter timeout.
    pub fn adapter_timeout(&self) -> Duration {
        self.adapter_timeout
    }

    /// Returns a config with a different adapter timeout.
    pub fn with_adapter_timeout(mut self, timeout: Duration) -> Self {
        self.adapter_timeout = timeout;
        self
    }

    /// Returns the retry policy.
    pub fn retry(&self) -> RetryPolicy {
        self.retry
    }

    /// Returns a config with a different retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Returns the annotation endpoint, if configured.
    pub fn annotator_url(&self) -> Option<&str> {
        self.annotator_url.as_deref()
    }

    /// Returns the polarity endpoint, if configured.
    pub fn sentiment_url(&self) -> Option<&str> {
        self.sentiment_url.as_deref()
    }

    /// Returns the LanguageTool endpoint.
    pub fn languagetool_url(&self) -> &str {
        &self.languagetool_url
    }

    /// Returns the LanguageTool language code.
    pub fn languagetool_language(&self) -> &str {
        &self.languagetool_language
    }

    /// Returns the batch concurrency.
    pub fn batch_concurrency(&self) -> usize {
        self.batch_concurrency
    }

    /// Returns the severity policy, honouring `REDACAO_SEVERE_CATEGORIES`.
    pub fn severity_policy(&self) -> SeverityPolicy {
        match &self.severe_categories {
            Some(markers) => SeverityPolicy::new(markers),
            None => SeverityPolicy::default(),
        }
    }

    /// Builds the HTTP client shared by every HTTP adapter.
    pub fn http_client(&self) -> Result<Client> {
        Client::builder()
            .timeout(self.adapter_timeout)
            .build()
            .context("Failed to construct shared HTTP client")
    }
}

/// Parses `key` through `lookup`, returning `default` when the variable is
/// missing or does not parse.
fn parse_or<F, T>(lookup: &F, key: &str, default: Option<T>) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .and_then(|value| value.trim().parse::<T>().ok())
        .or(default)
}
