//! Detector adapters mapping raw emotion signals onto the [`MoodSample`]
//! contract.
//!
//! Three modalities are supported: facial expression ([`face`]), free-text
//! description ([`text`]), and direct self-report ([`manual`]). The first two
//! wrap black-box classification capabilities behind trait seams and share
//! the same fail-closed policy: every internal failure resolves to the
//! neutral/zero-confidence sentinel, never to an error surfaced at the
//! public entry point.
//!
//! [`MoodSample`]: crate::mood::MoodSample

mod face;
mod manual;
mod text;

pub use face::{BoundingBox, DetectedFace, FaceClassifier, FaceDetectError, FaceMoodDetector};
pub use manual::manual_entry;
pub use text::{
    EmotionCandidate, HfTextClassifier, TextAnalyzeError, TextClassifier, TextMoodAnalyzer,
    DEFAULT_TEXT_API_URL,
};

/// Default minimum score a dominant emotion must reach to count as a real
/// reading. Below this, the adapter reports the no-signal sentinel instead
/// of low-confidence noise.
pub const DEFAULT_CONFIDENCE_FLOOR: f32 = 0.1;

/// Tunables shared by the face and text adapters.
///
/// The floor is configurable rather than a hardcoded constant; the default
/// follows the more defensive of the source's divergent values.
#[derive(Debug, Clone, Copy)]
pub struct DetectorOptions {
    pub confidence_floor: f32,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            confidence_floor: DEFAULT_CONFIDENCE_FLOOR,
        }
    }
}
