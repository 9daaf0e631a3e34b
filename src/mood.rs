//! Canonical mood taxonomy and emotion label normalization.
//!
//! Every detector, whatever its vendor vocabulary, resolves to one of the
//! seven canonical moods below before a result leaves this crate. The
//! normalization step is a pure string mapping so that new vendor labels
//! pass through untouched instead of being silently discarded; the typed
//! narrowing into [`Mood`] happens separately at the adapter boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The canonical mood set used uniformly across the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Joy,
    Sadness,
    Anger,
    Fear,
    Disgust,
    Surprise,
    Neutral,
}

impl Mood {
    /// All canonical moods, in display order.
    pub const ALL: [Mood; 7] = [
        Mood::Joy,
        Mood::Sadness,
        Mood::Anger,
        Mood::Fear,
        Mood::Disgust,
        Mood::Surprise,
        Mood::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Joy => "joy",
            Mood::Sadness => "sadness",
            Mood::Anger => "anger",
            Mood::Fear => "fear",
            Mood::Disgust => "disgust",
            Mood::Surprise => "surprise",
            Mood::Neutral => "neutral",
        }
    }

    /// Friendly one-line description shown alongside a detected mood.
    pub fn description(&self) -> &'static str {
        match self {
            Mood::Joy => "You're feeling happy and positive!",
            Mood::Sadness => "You're experiencing sadness. It's okay to feel this way.",
            Mood::Anger => "You're feeling angry or frustrated. Let's work through this.",
            Mood::Fear => "You're feeling anxious or worried. You're not alone.",
            Mood::Disgust => "You're feeling uncomfortable or displeased.",
            Mood::Surprise => "You're feeling surprised or astonished!",
            Mood::Neutral => "You're feeling calm and balanced.",
        }
    }

    /// Narrow an already-normalized label into the canonical set.
    ///
    /// [`normalize_label`] deliberately lets unknown vendor labels pass
    /// through; anything still outside the canonical set at this point
    /// degrades to `Neutral`, matching the conservative default used for
    /// absent input.
    pub fn from_normalized(label: &str) -> Mood {
        label.parse().unwrap_or_else(|_| {
            tracing::debug!("non-canonical label '{}' narrowed to neutral", label);
            Mood::Neutral
        })
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown mood label: {0}")]
pub struct ParseMoodError(String);

impl FromStr for Mood {
    type Err = ParseMoodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "joy" => Ok(Mood::Joy),
            "sadness" => Ok(Mood::Sadness),
            "anger" => Ok(Mood::Anger),
            "fear" => Ok(Mood::Fear),
            "disgust" => Ok(Mood::Disgust),
            "surprise" => Ok(Mood::Surprise),
            "neutral" => Ok(Mood::Neutral),
            other => Err(ParseMoodError(other.to_string())),
        }
    }
}

/// Normalize a vendor emotion label onto the canonical vocabulary.
///
/// The mapping is fixed and case-insensitive. Labels outside the mapping
/// that are not already canonical pass through lowercased — the taxonomy is
/// open, so a new vendor label is preserved rather than discarded. Absent or
/// empty input resolves to `"neutral"`: no detected emotion is treated as
/// neutrality, not as an error.
pub fn normalize_label(label: Option<&str>) -> String {
    let Some(raw) = label else {
        return Mood::Neutral.as_str().to_string();
    };
    let lowered = raw.trim().to_lowercase();
    if lowered.is_empty() {
        return Mood::Neutral.as_str().to_string();
    }
    match lowered.as_str() {
        "happy" => "joy".to_string(),
        "sad" => "sadness".to_string(),
        "angry" => "anger".to_string(),
        "fear" => "fear".to_string(),
        "disgust" => "disgust".to_string(),
        "surprise" => "surprise".to_string(),
        "neutral" => "neutral".to_string(),
        _ => lowered,
    }
}

/// The atomic unit produced by any detector: one canonical mood with a
/// confidence in `[0.0, 1.0]`.
///
/// A confidence of `0.0` paired with `Neutral` is the "no usable signal"
/// sentinel, not a genuine zero-probability reading; [`MoodSample::is_signal`]
/// distinguishes the two.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodSample {
    pub mood: Mood,
    pub confidence: f32,
    pub captured_at: DateTime<Utc>,
}

impl MoodSample {
    pub fn new(mood: Mood, confidence: f32) -> Self {
        Self {
            mood,
            confidence: confidence.clamp(0.0, 1.0),
            captured_at: Utc::now(),
        }
    }

    /// The `{neutral, 0.0}` sentinel every failure path resolves to.
    pub fn no_signal() -> Self {
        Self::new(Mood::Neutral, 0.0)
    }

    /// Whether this sample carries a usable reading (anything other than the
    /// neutral/zero-confidence sentinel).
    pub fn is_signal(&self) -> bool {
        self.mood != Mood::Neutral || self.confidence > 0.0
    }
}
