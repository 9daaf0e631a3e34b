//! Text-based detector adapter.
//!
//! Wraps a remote text-emotion classification service into the
//! [`MoodSample`] contract. The service contract: given text and a bearer
//! credential, return a JSON array of `{label, score}` candidates sorted by
//! descending score. The adapter takes the top candidate, applies the same
//! confidence floor as the face adapter, and fails closed to the neutral
//! sentinel on every failure: missing credential, empty input, timeout,
//! non-2xx status, malformed payload.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::mood::{normalize_label, Mood, MoodSample};

use super::DetectorOptions;

/// Default inference endpoint for the hosted classification model.
pub const DEFAULT_TEXT_API_URL: &str =
    "https://api-inference.huggingface.co/models/j-hartmann/emotion-english-distilroberta-base";

/// Fixed budget for the single classification request. No internal retry:
/// one failed call resolves to the fallback, retry policy is the caller's.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors internal to text analysis. Visible on [`TextMoodAnalyzer::try_analyze`];
/// never escape [`TextMoodAnalyzer::analyze`].
#[derive(Debug, Error)]
pub enum TextAnalyzeError {
    #[error("no access credential configured")]
    MissingToken,

    #[error("input text is empty after trimming")]
    EmptyInput,

    #[error("classification request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("classification service returned status {0}")]
    Status(u16),

    #[error("unexpected response shape: {0}")]
    MalformedResponse(String),

    #[error("classification service returned no candidates")]
    EmptyResponse,

    #[error("top candidate '{label}' below confidence floor ({score:.2} < {floor:.2})")]
    LowConfidence { label: String, score: f32, floor: f32 },
}

/// One label/score candidate from the classification service.
#[derive(Debug, Clone, Deserialize)]
pub struct EmotionCandidate {
    pub label: String,
    pub score: f32,
}

/// Black-box remote text classification capability.
///
/// The trait seam exists so the precondition short-circuit is testable with
/// a call-counting double, without any network involvement.
#[async_trait]
pub trait TextClassifier: Send + Sync {
    /// Classify `text`, returning candidates sorted by descending score.
    async fn classify(
        &self,
        text: &str,
        token: &str,
    ) -> Result<Vec<EmotionCandidate>, TextAnalyzeError>;
}

/// `reqwest`-backed classifier for a hosted inference endpoint.
pub struct HfTextClassifier {
    client: reqwest::Client,
    api_url: String,
}

impl HfTextClassifier {
    pub fn new(api_url: impl Into<String>) -> Result<Self, TextAnalyzeError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }
}

/// The service replies with either a flat candidate array or an array
/// wrapping one candidate array per input; both collapse to the single
/// candidate list here.
fn parse_candidates(body: &serde_json::Value) -> Result<Vec<EmotionCandidate>, TextAnalyzeError> {
    let outer = body
        .as_array()
        .ok_or_else(|| TextAnalyzeError::MalformedResponse("expected a JSON array".into()))?;
    let first = outer.first().ok_or(TextAnalyzeError::EmptyResponse)?;

    let list = if first.is_array() { first } else { body };
    serde_json::from_value(list.clone())
        .map_err(|e| TextAnalyzeError::MalformedResponse(e.to_string()))
}

#[async_trait]
impl TextClassifier for HfTextClassifier {
    async fn classify(
        &self,
        text: &str,
        token: &str,
    ) -> Result<Vec<EmotionCandidate>, TextAnalyzeError> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(token)
            .json(&serde_json::json!({ "inputs": text }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TextAnalyzeError::Status(status.as_u16()));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TextAnalyzeError::MalformedResponse(e.to_string()))?;
        parse_candidates(&body)
    }
}

/// Adapter from a [`TextClassifier`] to the [`MoodSample`] contract.
pub struct TextMoodAnalyzer<C> {
    classifier: C,
    token: Option<String>,
    options: DetectorOptions,
}

impl<C: TextClassifier> TextMoodAnalyzer<C> {
    pub fn new(classifier: C, token: Option<String>) -> Self {
        Self::with_options(classifier, token, DetectorOptions::default())
    }

    pub fn with_options(classifier: C, token: Option<String>, options: DetectorOptions) -> Self {
        Self {
            classifier,
            token,
            options,
        }
    }

    /// Analyze free-form text. Never fails; worst case is the neutral
    /// sentinel.
    pub async fn analyze(&self, text: &str) -> MoodSample {
        match self.try_analyze(text).await {
            Ok(sample) => sample,
            Err(e) => {
                warn!("text analysis failed closed to neutral: {}", e);
                MoodSample::no_signal()
            }
        }
    }

    /// Fallible inner analysis. Preconditions (credential present, text
    /// non-empty after trimming) are checked before any classifier call.
    pub async fn try_analyze(&self, text: &str) -> Result<MoodSample, TextAnalyzeError> {
        let token = self
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(TextAnalyzeError::MissingToken)?;

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TextAnalyzeError::EmptyInput);
        }

        let candidates = self.classifier.classify(trimmed, token).await?;
        // Candidates arrive sorted by descending score; the top one decides.
        let top = candidates.first().ok_or(TextAnalyzeError::EmptyResponse)?;

        if top.score < self.options.confidence_floor {
            return Err(TextAnalyzeError::LowConfidence {
                label: top.label.clone(),
                score: top.score,
                floor: self.options.confidence_floor,
            });
        }

        let mood = Mood::from_normalized(&normalize_label(Some(top.label.as_str())));
        debug!("text analysis: {} ({:.0}%)", mood, top.score * 100.0);
        Ok(MoodSample::new(mood, top.score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Double that counts calls and returns a scripted candidate list.
    struct CountingClassifier {
        calls: Arc<AtomicUsize>,
        candidates: Vec<EmotionCandidate>,
    }

    #[async_trait]
    impl TextClassifier for CountingClassifier {
        async fn classify(
            &self,
            _text: &str,
            _token: &str,
        ) -> Result<Vec<EmotionCandidate>, TextAnalyzeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.candidates.clone())
        }
    }

    struct FailingClassifier;

    #[async_trait]
    impl TextClassifier for FailingClassifier {
        async fn classify(
            &self,
            _text: &str,
            _token: &str,
        ) -> Result<Vec<EmotionCandidate>, TextAnalyzeError> {
            Err(TextAnalyzeError::Status(503))
        }
    }

    fn candidates(list: &[(&str, f32)]) -> Vec<EmotionCandidate> {
        list.iter()
            .map(|(l, s)| EmotionCandidate {
                label: l.to_string(),
                score: *s,
            })
            .collect()
    }

    fn analyzer(
        scripted: &[(&str, f32)],
        calls: Arc<AtomicUsize>,
    ) -> TextMoodAnalyzer<CountingClassifier> {
        TextMoodAnalyzer::new(
            CountingClassifier {
                calls,
                candidates: candidates(scripted),
            },
            Some("token".to_string()),
        )
    }

    #[tokio::test]
    async fn top_candidate_decides_the_mood() {
        let calls = Arc::new(AtomicUsize::new(0));
        let a = analyzer(&[("fear", 0.78), ("sadness", 0.15)], calls.clone());
        let sample = a.analyze("I'm worried about tomorrow").await;
        assert_eq!(sample.mood, Mood::Fear);
        assert!((sample.confidence - 0.78).abs() < 1e-6);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn vendor_label_in_response_is_normalized() {
        let calls = Arc::new(AtomicUsize::new(0));
        let a = analyzer(&[("happy", 0.9)], calls);
        let sample = a.analyze("what a day").await;
        assert_eq!(sample.mood, Mood::Joy);
    }

    #[tokio::test]
    async fn empty_input_short_circuits_without_a_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let a = analyzer(&[("joy", 0.9)], calls.clone());

        for input in ["", "   ", "\n\t "] {
            let sample = a.analyze(input).await;
            assert_eq!(sample.mood, Mood::Neutral);
            assert_eq!(sample.confidence, 0.0);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_token_short_circuits_without_a_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let a = TextMoodAnalyzer::new(
            CountingClassifier {
                calls: calls.clone(),
                candidates: candidates(&[("joy", 0.9)]),
            },
            None,
        );
        let sample = a.analyze("plenty of text").await;
        assert!(!sample.is_signal());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let err = a.try_analyze("plenty of text").await.unwrap_err();
        assert!(matches!(err, TextAnalyzeError::MissingToken));
    }

    #[tokio::test]
    async fn blank_token_counts_as_missing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let a = TextMoodAnalyzer::new(
            CountingClassifier {
                calls: calls.clone(),
                candidates: candidates(&[("joy", 0.9)]),
            },
            Some("   ".to_string()),
        );
        assert!(!a.analyze("some text").await.is_signal());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn below_floor_top_candidate_fails_closed() {
        let calls = Arc::new(AtomicUsize::new(0));
        let a = analyzer(&[("anger", 0.05)], calls);
        let sample = a.analyze("hm").await;
        assert_eq!(sample.mood, Mood::Neutral);
        assert_eq!(sample.confidence, 0.0);
    }

    #[tokio::test]
    async fn service_failure_resolves_to_sentinel() {
        let a = TextMoodAnalyzer::new(FailingClassifier, Some("token".to_string()));
        let sample = a.analyze("some text").await;
        assert!(!sample.is_signal());
    }

    #[tokio::test]
    async fn empty_candidate_list_fails_closed() {
        let calls = Arc::new(AtomicUsize::new(0));
        let a = analyzer(&[], calls);
        assert!(!a.analyze("some text").await.is_signal());
        assert!(matches!(
            a.try_analyze("some text").await,
            Err(TextAnalyzeError::EmptyResponse)
        ));
    }

    #[test]
    fn parse_handles_flat_and_nested_shapes() {
        let flat = serde_json::json!([
            {"label": "joy", "score": 0.9},
            {"label": "fear", "score": 0.1}
        ]);
        let parsed = parse_candidates(&flat).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].label, "joy");

        let nested = serde_json::json!([[
            {"label": "sadness", "score": 0.8}
        ]]);
        let parsed = parse_candidates(&nested).unwrap();
        assert_eq!(parsed[0].label, "sadness");
    }

    #[test]
    fn parse_rejects_non_array_payloads() {
        let body = serde_json::json!({"error": "model loading"});
        assert!(matches!(
            parse_candidates(&body),
            Err(TextAnalyzeError::MalformedResponse(_))
        ));
    }

    #[test]
    fn parse_flags_empty_array() {
        let body = serde_json::json!([]);
        assert!(matches!(
            parse_candidates(&body),
            Err(TextAnalyzeError::EmptyResponse)
        ));
    }
}
