//! Face-based detector adapter.
//!
//! Wraps a facial-emotion classification capability (any [`FaceClassifier`])
//! into the [`MoodSample`] contract: decode the frame, pick the most
//! prominent face, take its dominant emotion, apply the confidence floor,
//! normalize the label. Every failure path fails closed to the neutral
//! sentinel so a caller never needs a defensive error branch around a
//! detector call.

use image::RgbImage;
use thiserror::Error;
use tracing::{debug, warn};

use crate::mood::{normalize_label, Mood, MoodSample};

use super::DetectorOptions;

/// Errors internal to face detection. These never escape [`FaceMoodDetector::detect`];
/// they exist so the fail-closed policy is a visible return-type contract on
/// [`FaceMoodDetector::try_detect`] rather than hidden exception handling.
#[derive(Debug, Error)]
pub enum FaceDetectError {
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("no face detected in frame")]
    NoFace,

    #[error("classifier error: {0}")]
    Classifier(String),

    #[error("detected face has an empty emotion distribution")]
    EmptyDistribution,

    #[error("dominant emotion '{label}' below confidence floor ({score:.2} < {floor:.2})")]
    LowConfidence { label: String, score: f32, floor: f32 },
}

/// Face bounding box in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// One detected face: its bounding box plus the full per-emotion score
/// distribution, in the order the classifier reported it.
#[derive(Debug, Clone)]
pub struct DetectedFace {
    pub bounding_box: BoundingBox,
    pub emotions: Vec<(String, f32)>,
}

/// Black-box facial-emotion classification capability.
///
/// Implementations return zero or more detected faces, each with a bounding
/// box and a full emotion score distribution. Labels may use any vendor
/// vocabulary; the adapter normalizes them.
pub trait FaceClassifier {
    fn classify(&self, image: &RgbImage) -> Result<Vec<DetectedFace>, FaceDetectError>;
}

/// Adapter from a [`FaceClassifier`] to the [`MoodSample`] contract.
pub struct FaceMoodDetector<C> {
    classifier: C,
    options: DetectorOptions,
}

impl<C: FaceClassifier> FaceMoodDetector<C> {
    pub fn new(classifier: C) -> Self {
        Self::with_options(classifier, DetectorOptions::default())
    }

    pub fn with_options(classifier: C, options: DetectorOptions) -> Self {
        Self { classifier, options }
    }

    /// Detect the dominant mood in an encoded image frame.
    ///
    /// Never fails: an undecodable frame, a frame with no faces, a classifier
    /// error, or a below-floor reading all resolve to the neutral sentinel.
    pub fn detect(&self, image_bytes: &[u8]) -> MoodSample {
        match self.try_detect(image_bytes) {
            Ok(sample) => sample,
            Err(e) => {
                warn!("face detection failed closed to neutral: {}", e);
                MoodSample::no_signal()
            }
        }
    }

    /// Fallible inner detection. Callers who need to distinguish failure
    /// modes (tests, diagnostics) use this; UI paths use [`Self::detect`].
    pub fn try_detect(&self, image_bytes: &[u8]) -> Result<MoodSample, FaceDetectError> {
        let decoded = image::load_from_memory(image_bytes)?;
        let rgb = decoded.to_rgb8();

        let faces = self.classifier.classify(&rgb)?;
        debug!("classifier reported {} face(s)", faces.len());

        // Most prominent face wins; first-encountered on equal areas.
        let face = faces
            .iter()
            .fold(None::<&DetectedFace>, |best, candidate| match best {
                Some(b) if candidate.bounding_box.area() <= b.bounding_box.area() => best,
                _ => Some(candidate),
            })
            .ok_or(FaceDetectError::NoFace)?;

        // Dominant emotion: highest score, first-encountered on exact ties.
        let (label, score) = face
            .emotions
            .iter()
            .fold(None::<(&str, f32)>, |best, (label, score)| match best {
                Some((_, top)) if *score <= top => best,
                _ => Some((label.as_str(), *score)),
            })
            .ok_or(FaceDetectError::EmptyDistribution)?;

        if score < self.options.confidence_floor {
            return Err(FaceDetectError::LowConfidence {
                label: label.to_string(),
                score,
                floor: self.options.confidence_floor,
            });
        }

        let mood = Mood::from_normalized(&normalize_label(Some(label)));
        debug!("face detection: {} ({:.0}%)", mood, score * 100.0);
        Ok(MoodSample::new(mood, score))
    }
}
