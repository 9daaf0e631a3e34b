//! Camera capture window: a bounded, cooperative polling loop.
//!
//! One capture session grabs frames from a [`FrameSource`] for a hard
//! wall-clock window (5 seconds by default), runs face detection at a ~1 Hz
//! cadence, and gathers at most five usable samples. The loop is
//! single-threaded and cooperative: each grabbed frame is handed to an
//! observer callback so a UI can repaint its live preview between
//! classifications. Cancellation via [`CaptureHandle::stop`] takes effect at
//! the top of the next iteration; an in-flight classification is allowed to
//! finish. The frame source is owned by the loop and dropped on every exit
//! path, so device release is deterministic.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::emotion::{FaceClassifier, FaceMoodDetector};
use crate::mood::MoodSample;

/// Timing parameters for one capture session. All configurable; the defaults
/// match the 5-second, 1-sample-per-second, 5-sample window.
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Hard wall-clock cap on the whole session.
    pub window: Duration,
    /// Minimum spacing between classification attempts.
    pub sample_interval: Duration,
    /// Cap on gathered samples regardless of loop speed.
    pub max_samples: usize,
    /// Pause between loop iterations so the preview refresh stays smooth.
    pub frame_delay: Duration,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(5),
            sample_interval: Duration::from_secs(1),
            max_samples: 5,
            frame_delay: Duration::from_millis(10),
        }
    }
}

/// Cancellation handle for a running capture session.
///
/// Clone it before starting the loop and call [`CaptureHandle::stop`] from
/// the UI ("stop recording"); the loop observes the flag at the top of its
/// next iteration.
#[derive(Debug, Clone, Default)]
pub struct CaptureHandle {
    stop: Arc<AtomicBool>,
}

impl CaptureHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }
}

/// Exclusive camera access for the duration of one capture session.
///
/// Implementations acquire the device on construction and release it in
/// `Drop`; [`run_capture`] takes ownership and drops the source on every
/// exit path. `grab_frame` returns one encoded frame (JPEG/PNG bytes).
pub trait FrameSource {
    fn grab_frame(&mut self) -> anyhow::Result<Vec<u8>>;
}

/// Ephemeral ordered sample sequence gathered during one recording window.
/// Consumed once by the aggregator, then discarded; never persisted.
#[derive(Debug, Clone)]
pub struct CapturedSession {
    samples: Vec<MoodSample>,
    started_at: DateTime<Utc>,
}

impl CapturedSession {
    fn new() -> Self {
        Self {
            samples: Vec::new(),
            started_at: Utc::now(),
        }
    }

    pub fn samples(&self) -> &[MoodSample] {
        &self.samples
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Reduce the session to the single authoritative result.
    pub fn aggregate(self) -> Result<MoodSample, crate::aggregate::AggregateError> {
        crate::aggregate::aggregate(&self.samples)
    }
}

/// Run one capture session to completion.
///
/// The loop ends when the window elapses, the sample cap is reached,
/// cancellation is requested, or the source stops producing frames. Sentinel
/// (no-signal) readings are not appended, so a session over a frame stream
/// with no visible face comes back empty and aggregation reports it as
/// inconclusive rather than fabricating a neutral mood.
pub fn run_capture<S, C, F>(
    mut source: S,
    detector: &FaceMoodDetector<C>,
    config: &CaptureConfig,
    handle: &CaptureHandle,
    mut on_frame: F,
) -> CapturedSession
where
    S: FrameSource,
    C: FaceClassifier,
    F: FnMut(&[u8]),
{
    let mut session = CapturedSession::new();
    let started = Instant::now();
    let mut last_capture: Option<Instant> = None;

    info!(
        "capture session started (window {:?}, cadence {:?}, cap {})",
        config.window, config.sample_interval, config.max_samples
    );

    while started.elapsed() < config.window {
        if handle.is_stopped() {
            info!("capture cancelled after {} sample(s)", session.len());
            break;
        }

        let frame = match source.grab_frame() {
            Ok(frame) => frame,
            Err(e) => {
                warn!("frame grab failed, ending capture: {}", e);
                break;
            }
        };

        // Cooperative yield: let the UI repaint its live preview.
        on_frame(&frame);

        let due = last_capture.map_or(true, |t| t.elapsed() >= config.sample_interval);
        if due {
            let sample = detector.detect(&frame);
            if sample.is_signal() {
                debug!(
                    "captured {}/{}: {} ({:.0}%)",
                    session.len() + 1,
                    config.max_samples,
                    sample.mood,
                    sample.confidence * 100.0
                );
                session.samples.push(sample);
                if session.len() >= config.max_samples {
                    debug!("sample cap reached, ending capture");
                    break;
                }
            }
            last_capture = Some(Instant::now());
        }

        std::thread::sleep(config.frame_delay);
    }

    // Dropping the source here releases the device; this also happens on
    // every early exit above and during unwinding.
    drop(source);

    info!("capture session ended with {} sample(s)", session.len());
    session
}
