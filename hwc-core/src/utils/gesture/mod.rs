//! Gesture recognition for wheel-style steering.
//!
//! - `classifier`: motion and steering decisions for one frame
//! - `calibration`: wheel-center averaging for calibrated steering

pub mod calibration;
pub mod classifier;

use core::fmt;

pub use calibration::{calibrate, CenterCalibrator, WheelCenter};
pub use classifier::{
    classify_motion, classify_steering_calibrated, classify_steering_simple, ClassifierConfig,
    ClassifierMode, FrameDecision, FrameOutcome, GestureClassifier, MotionDecision,
    SteeringResult,
};

/// Errors reported while classifying frames or calibrating.
///
/// All of them are local to one frame or one calibration pass; callers skip
/// the frame or calibrate again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifyError {
    /// The frame tracked fewer than two hands.
    MissingHand { found: usize },
    /// Calibration finished without a single usable sample.
    EmptyCalibration,
    /// Calibration was finished on a classifier that was not calibrating.
    WrongMode,
}

impl fmt::Display for ClassifyError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            ClassifyError::MissingHand { found } => {
                write!(f, "insufficient hands: expected 2, found {}", found)
            }
            ClassifyError::EmptyCalibration => f.write_str("no calibration samples collected"),
            ClassifyError::WrongMode => f.write_str("classifier is not in calibration mode"),
        }
    }
}

impl core::error::Error for ClassifyError {}
