//! Drive command output for the Hand-Wheel Controller.
//!
//! Decisions leave the controller through `DRIVE_CHANNEL`. A single consumer
//! drains it, so console (or actuator) writes never interleave.

use alloc::string::String;
use core::fmt;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use serde::{Deserialize, Serialize};

use crate::utils::gesture::{FrameDecision, MotionDecision, SteeringResult, WheelCenter};

/// Channel carrying drive commands (`DriveCommand` messages) to the output sink.
pub static DRIVE_CHANNEL: embassy_sync::channel::Channel<
    CriticalSectionRawMutex,
    DriveCommand,
    16,
> = embassy_sync::channel::Channel::new();

/// Commands emitted by the controller.
///
/// Serialized as JSON with tag `"dc"`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(tag = "dc", rename_all = "snake_case")]
pub enum DriveCommand {
    /// Motion and steering for one frame.
    D { m: MotionDecision, s: SteeringResult },
    /// Frame skipped; fewer than two hands were tracked.
    Skip { hands: usize },
    /// Calibration finished with this wheel center.
    Center { x: f32, z: f32 },
    /// No two-hand frame in the last `frames` frames; calibration restarts.
    CalibrationFailed { frames: usize },
    /// The sensor session ended.
    Exit,
}

impl DriveCommand {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<FrameDecision> for DriveCommand {
    fn from(d: FrameDecision) -> Self {
        DriveCommand::D {
            m: d.motion,
            s: d.steering,
        }
    }
}

impl From<WheelCenter> for DriveCommand {
    fn from(c: WheelCenter) -> Self {
        DriveCommand::Center { x: c.x, z: c.z }
    }
}

/// Console rendering: one line per value, a decision spans two lines.
impl fmt::Display for DriveCommand {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            DriveCommand::D { m, s } => write!(f, "{}\n{}", m, s),
            DriveCommand::Skip { hands } => write!(f, "Insufficient hands ({})", hands),
            DriveCommand::Center { x, z } => write!(f, "Center:{} {}", x, z),
            DriveCommand::CalibrationFailed { frames } => {
                write!(f, "Calibration failed: no hands in {} frames", frames)
            }
            DriveCommand::Exit => f.write_str("WheelListener Exited"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_decision_json_shape() {
        let cmd = DriveCommand::D {
            m: MotionDecision::Forward,
            s: SteeringResult::Angle(-20.5),
        };
        assert_eq!(
            cmd.to_json().unwrap(),
            r#"{"dc":"d","m":"forward","s":{"angle":-20.5}}"#
        );
        let centered = DriveCommand::D {
            m: MotionDecision::NoMove,
            s: SteeringResult::Centered,
        };
        assert_eq!(
            centered.to_json().unwrap(),
            r#"{"dc":"d","m":"no_move","s":"centered"}"#
        );
    }

    #[test]
    fn test_console_lines() {
        let cmd = DriveCommand::D {
            m: MotionDecision::Backward,
            s: SteeringResult::Centered,
        };
        assert_eq!(cmd.to_string(), "Bd\nMid");
        assert_eq!(DriveCommand::Skip { hands: 1 }.to_string(), "Insufficient hands (1)");
        assert_eq!(
            DriveCommand::from(WheelCenter::new(1.5, -2.0)).to_string(),
            "Center:1.5 -2"
        );
    }

    #[test]
    fn test_calibration_failure_is_not_a_center() {
        let failed = DriveCommand::CalibrationFailed { frames: 50 };
        assert_eq!(failed.to_string(), "Calibration failed: no hands in 50 frames");
        assert_eq!(
            failed.to_json().unwrap(),
            r#"{"dc":"calibration_failed","frames":50}"#
        );
        assert_ne!(failed, DriveCommand::from(WheelCenter::default()));
    }
}
