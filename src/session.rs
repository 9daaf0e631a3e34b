//! Caller-owned mood state.
//!
//! The detectors and the aggregator only ever *produce* values; the single
//! authoritative current mood lives in a [`MoodContext`] owned by the
//! session/UI layer and passed explicitly to whatever needs it. Nothing in
//! the core reads or retains it, which is what lets the detector side stay
//! lock-free.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::chat::ChatMessage;
use crate::mood::{Mood, MoodSample};

/// Per-session context: the current `(mood, confidence)` pair, the user's
/// free-text description, and the running chat history. Absent at session
/// start; set once per detection action; reset by "detect again".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodContext {
    session_id: String,
    mood: Option<Mood>,
    confidence: Option<f32>,
    detected_at: Option<DateTime<Utc>>,
    user_input: String,
    chat_history: Vec<ChatMessage>,
}

/// Snapshot of the context for a frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodStatus {
    pub session_id: String,
    pub mood: Option<Mood>,
    pub confidence: Option<f32>,
    pub detected: bool,
}

impl MoodContext {
    pub fn new() -> Self {
        let session_id = Uuid::new_v4().to_string();
        info!("mood session started: {}", session_id);
        Self {
            session_id,
            mood: None,
            confidence: None,
            detected_at: None,
            user_input: String::new(),
            chat_history: Vec::new(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn mood(&self) -> Option<Mood> {
        self.mood
    }

    pub fn confidence(&self) -> Option<f32> {
        self.confidence
    }

    pub fn detected_at(&self) -> Option<DateTime<Utc>> {
        self.detected_at
    }

    pub fn is_detected(&self) -> bool {
        self.mood.is_some()
    }

    /// Install a detection result as the authoritative current mood,
    /// overwriting any previous one.
    pub fn apply(&mut self, sample: &MoodSample) {
        self.mood = Some(sample.mood);
        self.confidence = Some(sample.confidence);
        self.detected_at = Some(sample.captured_at);
        info!(
            "session {}: mood set to {} ({:.0}%)",
            self.session_id,
            sample.mood,
            sample.confidence * 100.0
        );
    }

    /// "Detect again": clear the current mood, keep the session identity.
    pub fn reset(&mut self) {
        self.mood = None;
        self.confidence = None;
        self.detected_at = None;
    }

    pub fn user_input(&self) -> &str {
        &self.user_input
    }

    pub fn set_user_input(&mut self, text: impl Into<String>) {
        self.user_input = text.into();
    }

    pub fn chat_history(&self) -> &[ChatMessage] {
        &self.chat_history
    }

    pub fn push_message(&mut self, role: impl Into<String>, content: impl Into<String>) {
        self.chat_history.push(ChatMessage {
            role: role.into(),
            content: content.into(),
        });
    }

    pub fn clear_history(&mut self) {
        self.chat_history.clear();
    }

    pub fn status(&self) -> MoodStatus {
        MoodStatus {
            session_id: self.session_id.clone(),
            mood: self.mood,
            confidence: self.confidence,
            detected: self.is_detected(),
        }
    }
}

impl Default for MoodContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_without_a_mood() {
        let ctx = MoodContext::new();
        assert!(!ctx.is_detected());
        assert!(ctx.mood().is_none());
        assert!(ctx.confidence().is_none());
    }

    #[test]
    fn apply_installs_the_sample() {
        let mut ctx = MoodContext::new();
        ctx.apply(&MoodSample::new(Mood::Joy, 0.85));
        assert!(ctx.is_detected());
        assert_eq!(ctx.mood(), Some(Mood::Joy));
        assert!((ctx.confidence().unwrap() - 0.85).abs() < 1e-6);
        assert!(ctx.detected_at().is_some());
    }

    #[test]
    fn new_detection_overwrites_the_old() {
        let mut ctx = MoodContext::new();
        ctx.apply(&MoodSample::new(Mood::Joy, 0.85));
        ctx.apply(&MoodSample::new(Mood::Fear, 0.6));
        assert_eq!(ctx.mood(), Some(Mood::Fear));
    }

    #[test]
    fn reset_clears_mood_but_keeps_session() {
        let mut ctx = MoodContext::new();
        let id = ctx.session_id().to_string();
        ctx.apply(&MoodSample::new(Mood::Anger, 0.7));
        ctx.reset();
        assert!(!ctx.is_detected());
        assert_eq!(ctx.session_id(), id);
    }

    #[test]
    fn history_accumulates_in_order() {
        let mut ctx = MoodContext::new();
        ctx.push_message("user", "hi");
        ctx.push_message("assistant", "hello");
        let history = ctx.chat_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, "user");
        assert_eq!(history[1].content, "hello");
        ctx.clear_history();
        assert!(ctx.chat_history().is_empty());
    }

    #[test]
    fn status_reflects_detection_state() {
        let mut ctx = MoodContext::new();
        assert!(!ctx.status().detected);
        ctx.apply(&MoodSample::new(Mood::Surprise, 0.9));
        let status = ctx.status();
        assert!(status.detected);
        assert_eq!(status.mood, Some(Mood::Surprise));
    }
}
