//! Per-frame gesture classification.
//!
//! Motion comes from which thumbs are extended; steering comes from the tilt
//! of the palms in the x-z plane. Steering has two strategies, picked once per
//! session:
//!
//! - simple: the tilt of the line joining the two palms
//! - calibrated: the tilt of the lines from each palm to a calibrated wheel
//!   center, reported only while both lines agree
//!
//! # Example
//! ```rust
//! use hwc_core::utils::gesture::{classify_motion, MotionDecision};
//! use hwc_core::utils::tracking::{HandPose, PalmPosition};
//! let left = HandPose::new(PalmPosition::new(-80.0, 200.0, 0.0), true);
//! let right = HandPose::new(PalmPosition::new(80.0, 200.0, 0.0), false);
//! assert_eq!(classify_motion(&left, &right), MotionDecision::Forward);
//! ```

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{
    calibration::{CenterCalibrator, WheelCenter},
    ClassifyError,
};
use crate::utils::{
    math::steering::{angle_between_lines, line_angle, mean_line_angle},
    tracking::{Frame, HandPose},
};

/// Default steering dead zone (degrees).
pub const DEFAULT_DEAD_ZONE: f32 = 10.0;
/// Default maximum angle between the hand-to-center lines (degrees).
pub const DEFAULT_LINE_TOLERANCE: f32 = 15.0;

/// Drive direction chosen from the thumbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionDecision {
    Forward,
    Backward,
    NoMove,
}

impl fmt::Display for MotionDecision {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(match self {
            MotionDecision::Forward => "Fd",
            MotionDecision::Backward => "Bd",
            MotionDecision::NoMove => "No move",
        })
    }
}

/// Steering signal for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SteeringResult {
    /// Signed steering angle (degrees) outside the dead zone.
    Angle(f32),
    /// Wheel held level.
    Centered,
}

impl SteeringResult {
    pub fn angle(&self) -> Option<f32> {
        match self {
            SteeringResult::Angle(a) => Some(*a),
            SteeringResult::Centered => None,
        }
    }
}

impl fmt::Display for SteeringResult {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            SteeringResult::Angle(a) => write!(f, "{}", a),
            SteeringResult::Centered => f.write_str("Mid"),
        }
    }
}

/// Thresholds shared by both steering strategies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierConfig {
    /// Simple mode: tilts with magnitude at or below this are centered.
    pub dead_zone: f32,
    /// Calibrated mode: the two hand-to-center lines must be closer than
    /// this to produce an angle.
    pub line_tolerance: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            dead_zone: DEFAULT_DEAD_ZONE,
            line_tolerance: DEFAULT_LINE_TOLERANCE,
        }
    }
}

impl ClassifierConfig {
    pub fn new(
        dead_zone: Option<f32>,
        line_tolerance: Option<f32>,
    ) -> Self {
        Self {
            dead_zone: dead_zone.unwrap_or(DEFAULT_DEAD_ZONE),
            line_tolerance: line_tolerance.unwrap_or(DEFAULT_LINE_TOLERANCE),
        }
    }
}

/// Decide motion from the thumb-extension pattern.
///
/// Exactly one extended thumb moves the car: left for forward, right for
/// backward. Both or neither means stand still.
pub fn classify_motion(
    left: &HandPose,
    right: &HandPose,
) -> MotionDecision {
    match (left.thumb_extended(), right.thumb_extended()) {
        (true, false) => MotionDecision::Forward,
        (false, true) => MotionDecision::Backward,
        _ => MotionDecision::NoMove,
    }
}

/// Steer from the tilt of the line joining the two palms.
pub fn classify_steering_simple(
    left: &HandPose,
    right: &HandPose,
    dead_zone: f32,
) -> SteeringResult {
    let angle = line_angle(
        left.palm.x - right.palm.x,
        left.palm.z - right.palm.z,
    );
    if libm::fabsf(angle) > dead_zone {
        SteeringResult::Angle(angle)
    } else {
        SteeringResult::Centered
    }
}

/// Steer from the lines joining each palm to the wheel center.
///
/// When the two lines are within `line_tolerance` of each other, the mean of
/// their angles is reported (taken across the ±90° seam, so two nearly
/// vertical lines average to a vertical line rather than to 0°); otherwise the hands disagree and the wheel is
/// treated as centered.
pub fn classify_steering_calibrated(
    left: &HandPose,
    right: &HandPose,
    center: &WheelCenter,
    line_tolerance: f32,
) -> SteeringResult {
    let left_angle = line_angle(center.x - left.palm.x, center.z - left.palm.z);
    let right_angle = line_angle(center.x - right.palm.x, center.z - right.palm.z);
    let between = angle_between_lines(left_angle, right_angle);

    if between < line_tolerance {
        tracing::debug!(left_angle, right_angle, between, "hand lines agree");
        SteeringResult::Angle(mean_line_angle(left_angle, right_angle))
    } else {
        SteeringResult::Centered
    }
}

/// Steering strategy of a classifier, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClassifierMode {
    Simple,
    Calibrated(WheelCenter),
    /// Collect palm midpoints for the wheel center instead of classifying.
    Init,
}

/// Motion and steering for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameDecision {
    pub motion: MotionDecision,
    pub steering: SteeringResult,
}

/// Result of feeding one frame to a [`GestureClassifier`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    Decision(FrameDecision),
    /// Init mode: number of calibration samples collected so far.
    Calibrating { samples: usize },
}

/// Frame classifier with a single, fixed steering strategy.
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    mode: ClassifierMode,
    config: ClassifierConfig,
    calibrator: CenterCalibrator,
}

impl GestureClassifier {
    pub fn new(
        mode: ClassifierMode,
        config: ClassifierConfig,
    ) -> Self {
        Self {
            mode,
            config,
            calibrator: CenterCalibrator::new(),
        }
    }

    pub fn simple(config: ClassifierConfig) -> Self {
        Self::new(ClassifierMode::Simple, config)
    }

    pub fn calibrated(
        center: WheelCenter,
        config: ClassifierConfig,
    ) -> Self {
        Self::new(ClassifierMode::Calibrated(center), config)
    }

    pub fn init(config: ClassifierConfig) -> Self {
        Self::new(ClassifierMode::Init, config)
    }

    pub fn mode(&self) -> ClassifierMode {
        self.mode
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify one frame.
    ///
    /// In init mode the frame is recorded as a calibration sample; frames
    /// missing a hand are skipped rather than rejected.
    pub fn classify(
        &mut self,
        frame: &Frame,
    ) -> Result<FrameOutcome, ClassifyError> {
        let (left, right, steering) = match self.mode {
            ClassifierMode::Init => {
                let mut palms = frame.hands.iter().map(|h| h.palm);
                self.calibrator.add_hands_pos(palms.next(), palms.next());
                return Ok(FrameOutcome::Calibrating {
                    samples: self.calibrator.samples(),
                });
            }
            ClassifierMode::Simple => {
                let (left, right) = frame.hand_pair()?;
                let steering = classify_steering_simple(left, right, self.config.dead_zone);
                (left, right, steering)
            }
            ClassifierMode::Calibrated(center) => {
                let (left, right) = frame.hand_pair()?;
                let steering =
                    classify_steering_calibrated(left, right, &center, self.config.line_tolerance);
                (left, right, steering)
            }
        };
        let motion = classify_motion(left, right);
        tracing::trace!(frame = frame.id, ?motion, ?steering, "frame classified");

        Ok(FrameOutcome::Decision(FrameDecision { motion, steering }))
    }

    /// End the init phase and return a calibrated classifier with the same
    /// thresholds.
    pub fn finish_calibration(self) -> Result<GestureClassifier, ClassifyError> {
        match self.mode {
            ClassifierMode::Init => {
                let center = self.calibrator.flat_center()?;
                Ok(GestureClassifier::calibrated(center, self.config))
            }
            _ => Err(ClassifyError::WrongMode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::tracking::PalmPosition;
    use alloc::{string::ToString, vec};

    fn hand(
        x: f32,
        z: f32,
        thumb: bool,
    ) -> HandPose {
        HandPose::new(PalmPosition::new(x, 200.0, z), thumb)
    }

    #[test]
    fn test_motion_truth_table() {
        let cases = [
            (true, true, MotionDecision::NoMove),
            (false, false, MotionDecision::NoMove),
            (true, false, MotionDecision::Forward),
            (false, true, MotionDecision::Backward),
        ];
        for (l, r, expected) in cases {
            assert_eq!(
                classify_motion(&hand(-80.0, 0.0, l), &hand(80.0, 0.0, r)),
                expected,
                "left={} right={}",
                l,
                r
            );
        }
    }

    #[test]
    fn test_level_hands_are_centered() {
        let got = classify_steering_simple(&hand(-80.0, 12.0, false), &hand(80.0, 12.0, false), 10.0);
        assert_eq!(got, SteeringResult::Centered);
    }

    #[test]
    fn test_tilt_outside_dead_zone() {
        // Left hand pulled toward the user: slope -0.5, about -26.57°.
        let got = classify_steering_simple(&hand(-80.0, 40.0, false), &hand(80.0, -40.0, false), 10.0);
        let angle = got.angle().unwrap();
        assert!((angle + 26.565).abs() < 1e-2, "angle {}", angle);
    }

    #[test]
    fn test_dead_zone_is_configurable() {
        let left = hand(-80.0, 10.0, false);
        let right = hand(80.0, -10.0, false);
        // About 7.1°: centered at the default, an angle with a tighter zone.
        assert_eq!(
            classify_steering_simple(&left, &right, DEFAULT_DEAD_ZONE),
            SteeringResult::Centered
        );
        assert!(classify_steering_simple(&left, &right, 5.0).angle().is_some());
    }

    #[test]
    fn test_equal_x_is_vertical_not_nan() {
        let got = classify_steering_simple(&hand(30.0, -50.0, false), &hand(30.0, 50.0, false), 10.0);
        assert_eq!(got, SteeringResult::Angle(-90.0));
    }

    #[test]
    fn test_calibrated_hands_in_line_report_mid_angle() {
        let center = WheelCenter::new(0.0, 0.0);
        // Both palms on the same 20° line through the center.
        let t = libm::tanf(20.0 * core::f32::consts::PI / 180.0);
        let left = hand(-100.0, -100.0 * t, false);
        let right = hand(100.0, 100.0 * t, false);
        let got = classify_steering_calibrated(&left, &right, &center, DEFAULT_LINE_TOLERANCE);
        let angle = got.angle().unwrap();
        assert!((angle - 20.0).abs() < 1e-2, "angle {}", angle);
    }

    #[test]
    fn test_calibrated_hands_disagreeing_are_centered() {
        let center = WheelCenter::new(0.0, 0.0);
        // Lines at +45° and -45°: 90° apart.
        let got = classify_steering_calibrated(
            &hand(-50.0, -50.0, false),
            &hand(50.0, -50.0, false),
            &center,
            DEFAULT_LINE_TOLERANCE,
        );
        assert_eq!(got, SteeringResult::Centered);
    }

    #[test]
    fn test_calibrated_uses_center_offset() {
        let center = WheelCenter::new(20.0, 30.0);
        let got = classify_steering_calibrated(
            &hand(-80.0, 30.0, false),
            &hand(120.0, 30.0, false),
            &center,
            DEFAULT_LINE_TOLERANCE,
        );
        assert_eq!(got, SteeringResult::Angle(0.0));
    }

    #[test]
    fn test_calibrated_hands_straight_ahead_steer_vertical() {
        // Palms just either side of the line straight out from the center:
        // lines at about -89.4° and +89.4°, about 1.15° apart.
        let center = WheelCenter::new(0.0, 0.0);
        let got = classify_steering_calibrated(
            &hand(-1.0, 100.0, false),
            &hand(1.0, 100.0, false),
            &center,
            DEFAULT_LINE_TOLERANCE,
        );
        let angle = got.angle().unwrap();
        assert!(angle.abs() > 89.9, "angle {}", angle);
    }

    #[test]
    fn test_classify_missing_hand() {
        let mut c = GestureClassifier::simple(ClassifierConfig::default());
        let frame = Frame::new(vec![hand(0.0, 0.0, true)]);
        assert_eq!(
            c.classify(&frame),
            Err(ClassifyError::MissingHand { found: 1 })
        );
    }

    #[test]
    fn test_classify_simple_frame() {
        let mut c = GestureClassifier::simple(ClassifierConfig::default());
        let frame = Frame::new(vec![hand(-80.0, 0.0, false), hand(80.0, 0.0, true)]);
        assert_eq!(
            c.classify(&frame).unwrap(),
            FrameOutcome::Decision(FrameDecision {
                motion: MotionDecision::Backward,
                steering: SteeringResult::Centered,
            })
        );
    }

    #[test]
    fn test_each_mode_uses_its_own_steering() {
        // Level palms left of the center: level for simple, tilted for calibrated.
        let frame = Frame::new(vec![hand(-100.0, 0.0, false), hand(-60.0, 0.0, false)]);
        let config = ClassifierConfig::default();

        let mut simple = GestureClassifier::simple(config);
        let mut calibrated = GestureClassifier::calibrated(WheelCenter::new(0.0, 40.0), config);
        let mut init = GestureClassifier::init(config);

        let steering = |outcome| match outcome {
            FrameOutcome::Decision(d) => d.steering,
            other => panic!("expected a decision, got {:?}", other),
        };
        assert_eq!(steering(simple.classify(&frame).unwrap()), SteeringResult::Centered);
        // Lines to the center at ~21.8° and ~33.7°.
        let angle = steering(calibrated.classify(&frame).unwrap()).angle().unwrap();
        assert!((angle - 27.76).abs() < 0.1, "angle {}", angle);
        assert_eq!(
            init.classify(&Frame::new(vec![])),
            Ok(FrameOutcome::Calibrating { samples: 0 })
        );
    }

    #[test]
    fn test_init_then_calibrated() {
        let mut c = GestureClassifier::init(ClassifierConfig::new(None, Some(5.0)));
        let frames = [
            Frame::new(vec![hand(-90.0, 10.0, false), hand(110.0, 10.0, false)]),
            Frame::new(vec![hand(0.0, 0.0, false)]),
            Frame::new(vec![hand(-110.0, -10.0, false), hand(90.0, -10.0, false)]),
        ];
        let mut last = None;
        for f in &frames {
            last = Some(c.classify(f).unwrap());
        }
        assert_eq!(last, Some(FrameOutcome::Calibrating { samples: 2 }));

        let c = c.finish_calibration().unwrap();
        assert_eq!(c.mode(), ClassifierMode::Calibrated(WheelCenter::new(0.0, 0.0)));
        assert_eq!(c.config().line_tolerance, 5.0);
    }

    #[test]
    fn test_finish_calibration_errors() {
        let empty = GestureClassifier::init(ClassifierConfig::default());
        assert_eq!(
            empty.finish_calibration().unwrap_err(),
            ClassifyError::EmptyCalibration
        );
        let simple = GestureClassifier::simple(ClassifierConfig::default());
        assert_eq!(
            simple.finish_calibration().unwrap_err(),
            ClassifyError::WrongMode
        );
    }

    #[test]
    fn test_display_matches_console_lines() {
        assert_eq!(MotionDecision::Forward.to_string(), "Fd");
        assert_eq!(MotionDecision::Backward.to_string(), "Bd");
        assert_eq!(MotionDecision::NoMove.to_string(), "No move");
        assert_eq!(SteeringResult::Centered.to_string(), "Mid");
        assert_eq!(SteeringResult::Angle(-12.5).to_string(), "-12.5");
    }
}
