//! Manual-entry adapter.

use crate::mood::{Mood, MoodSample};

/// Build a sample from a direct user-asserted mood.
///
/// The label is canonical by construction (the UI offers a closed selection),
/// so no normalization applies. Self-report is trusted at full confidence
/// unless the user dials the intensity down; out-of-range intensities are
/// clamped. This adapter cannot fail.
pub fn manual_entry(mood: Mood, intensity: Option<f32>) -> MoodSample {
    MoodSample::new(mood, intensity.unwrap_or(1.0))
}
