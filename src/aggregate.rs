//! Temporal aggregation of multi-sample capture windows.
//!
//! Camera mode collects up to five samples over its recording window; this
//! module reduces them to the single authoritative `(mood, confidence)`
//! pair via majority-vote-then-average. The vote discounts transient
//! low-frequency signals (one surprised frame amid four neutral ones) while
//! the averaged confidence reflects only the corroborating evidence for the
//! winning mood, undiluted by outlier samples.

use thiserror::Error;

use crate::mood::{Mood, MoodSample};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AggregateError {
    /// The window produced zero usable samples. This is the one failure not
    /// resolved to a default: fabricating a mood from no evidence would be
    /// misleading, so the caller must treat it as "detection inconclusive"
    /// and ask the user to retry.
    #[error("no usable samples in capture window")]
    NoSamples,
}

/// Reduce an ordered sample sequence to one authoritative result.
///
/// The modal mood wins; ties break to whichever mood appeared first in the
/// sequence (stable, not random or alphabetical). The reported confidence is
/// the arithmetic mean over the samples that voted for the winner.
pub fn aggregate(samples: &[MoodSample]) -> Result<MoodSample, AggregateError> {
    if samples.is_empty() {
        return Err(AggregateError::NoSamples);
    }

    // Counts keyed in first-seen order so the strictly-greater comparison
    // below yields a stable tie-break.
    let mut counts: Vec<(Mood, usize)> = Vec::new();
    for sample in samples {
        match counts.iter_mut().find(|(mood, _)| *mood == sample.mood) {
            Some((_, n)) => *n += 1,
            None => counts.push((sample.mood, 1)),
        }
    }

    let mut modal = counts[0].0;
    let mut best = counts[0].1;
    for &(mood, n) in &counts[1..] {
        if n > best {
            modal = mood;
            best = n;
        }
    }

    let matching: Vec<f32> = samples
        .iter()
        .filter(|s| s.mood == modal)
        .map(|s| s.confidence)
        .collect();
    let confidence = matching.iter().sum::<f32>() / matching.len() as f32;

    Ok(MoodSample::new(modal, confidence))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(mood: Mood, confidence: f32) -> MoodSample {
        MoodSample::new(mood, confidence)
    }

    #[test]
    fn majority_wins_and_confidence_averages_the_winners_only() {
        let samples = vec![
            sample(Mood::Joy, 0.9),
            sample(Mood::Joy, 0.7),
            sample(Mood::Neutral, 0.99),
            sample(Mood::Joy, 0.6),
            sample(Mood::Sadness, 0.95),
        ];
        let result = aggregate(&samples).unwrap();
        assert_eq!(result.mood, Mood::Joy);
        // (0.9 + 0.7 + 0.6) / 3 — the neutral and sadness outliers do not
        // dilute the reported confidence.
        assert!((result.confidence - 0.733_333_3).abs() < 1e-6);
    }

    #[test]
    fn two_way_tie_breaks_to_first_in_sequence() {
        let samples = vec![sample(Mood::Joy, 0.5), sample(Mood::Sadness, 0.5)];
        assert_eq!(aggregate(&samples).unwrap().mood, Mood::Joy);

        let reversed = vec![sample(Mood::Sadness, 0.5), sample(Mood::Joy, 0.5)];
        assert_eq!(aggregate(&reversed).unwrap().mood, Mood::Sadness);
    }

    #[test]
    fn three_way_tie_is_stable_too() {
        let samples = vec![
            sample(Mood::Fear, 0.3),
            sample(Mood::Anger, 0.9),
            sample(Mood::Surprise, 0.6),
        ];
        assert_eq!(aggregate(&samples).unwrap().mood, Mood::Fear);
    }

    #[test]
    fn empty_window_is_inconclusive() {
        assert_eq!(aggregate(&[]).unwrap_err(), AggregateError::NoSamples);
    }

    #[test]
    fn single_sample_passes_through() {
        let result = aggregate(&[sample(Mood::Disgust, 0.42)]).unwrap();
        assert_eq!(result.mood, Mood::Disgust);
        assert!((result.confidence - 0.42).abs() < 1e-6);
    }

    #[test]
    fn later_majority_overtakes_earlier_mood() {
        let samples = vec![
            sample(Mood::Surprise, 0.9),
            sample(Mood::Neutral, 0.5),
            sample(Mood::Neutral, 0.7),
        ];
        let result = aggregate(&samples).unwrap();
        assert_eq!(result.mood, Mood::Neutral);
        assert!((result.confidence - 0.6).abs() < 1e-6);
    }
}
