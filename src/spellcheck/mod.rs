//! Best-effort spelling suggestions from an external HTTP speller.
//!
//! The speller is queried with `GET <url>?text=<url-escaped text>` and answers
//! with a JSON array of suggestion objects. An empty array means the text is
//! spelled correctly; any transport failure, timeout, non-2xx status or
//! unreadable body is reported as a [`SpellcheckError`] so callers can tell
//! "no suggestions" apart from "service unavailable".

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::config::SpellcheckConfig;

/// One misspelling reported by the speller, in the speller's wire names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellcheckSuggestion {
    #[serde(rename = "code")]
    pub error_code: i32,
    /// Offset of the word in the submitted text.
    #[serde(rename = "pos")]
    pub position: i32,
    pub row: i32,
    #[serde(rename = "col")]
    pub column: i32,
    #[serde(rename = "len")]
    pub length: i32,
    pub word: String,
    /// Replacement candidates, best first.
    #[serde(rename = "s")]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Error)]
pub enum SpellcheckError {
    #[error("spellcheck timed out after {0:?}")]
    Timeout(Duration),

    #[error("spellcheck request failed: {0}")]
    Transport(String),

    #[error("error, status code: {0}")]
    Status(u16),

    #[error("spellcheck response could not be decoded: {0}")]
    Decode(String),
}

#[async_trait]
pub trait Spellchecker: Send + Sync {
    /// Check `text`, giving up after `timeout`. Called exactly once per note write.
    async fn check(
        &self,
        text: &str,
        timeout: Duration,
    ) -> Result<Vec<SpellcheckSuggestion>, SpellcheckError>;
}

/// Spellchecker backed by an HTTP speller service.
#[derive(Debug, Clone)]
pub struct HttpSpellchecker {
    client: reqwest::Client,
    url: String,
}

impl HttpSpellchecker {
    pub fn new(config: &SpellcheckConfig) -> Self {
        Self::with_url(config.url.clone())
    }

    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl Spellchecker for HttpSpellchecker {
    async fn check(
        &self,
        text: &str,
        timeout: Duration,
    ) -> Result<Vec<SpellcheckSuggestion>, SpellcheckError> {
        let classify = |e: reqwest::Error| {
            if e.is_timeout() {
                SpellcheckError::Timeout(timeout)
            } else {
                SpellcheckError::Transport(e.to_string())
            }
        };

        let response = self
            .client
            .get(&self.url)
            .query(&[("text", text)])
            .timeout(timeout)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SpellcheckError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(classify)?;
        serde_json::from_slice(&body).map_err(|e| SpellcheckError::Decode(e.to_string()))
    }
}

/// What a note write reports about spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpellingStatus {
    Correct,
    Suggestions(Vec<SpellcheckSuggestion>),
    Unavailable(String),
}

impl SpellingStatus {
    pub fn from_result(result: Result<Vec<SpellcheckSuggestion>, SpellcheckError>) -> Self {
        match result {
            Ok(suggestions) if suggestions.is_empty() => SpellingStatus::Correct,
            Ok(suggestions) => SpellingStatus::Suggestions(suggestions),
            Err(e) => SpellingStatus::Unavailable(e.to_string()),
        }
    }

    /// Human-readable value of the `spelling` response field.
    pub fn label(&self) -> &str {
        match self {
            SpellingStatus::Correct => "correct",
            SpellingStatus::Suggestions(_) => "suggestions",
            SpellingStatus::Unavailable(reason) => reason,
        }
    }

    pub fn into_suggestions(self) -> Option<Vec<SpellcheckSuggestion>> {
        match self {
            SpellingStatus::Suggestions(suggestions) => Some(suggestions),
            _ => None,
        }
    }
}

/// Run the speller once and fold any failure into a status string.
pub async fn enrich(checker: &dyn Spellchecker, text: &str, timeout: Duration) -> SpellingStatus {
    let result = checker.check(text, timeout).await;
    if let Err(e) = &result {
        tracing::warn!("Spellcheck unavailable: {}", e);
    }
    SpellingStatus::from_result(result)
}
