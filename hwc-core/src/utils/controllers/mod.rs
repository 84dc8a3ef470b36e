//! Module Exports
//!
//! This file exports the channels and the session controller that connect the
//! sensor to the drive output.
//!
//! - `sensor`: sensor events received from the tracking device.
//! - `drive`: drive commands sent to the output sink.

pub mod drive;
pub mod sensor;

pub use drive::{DriveCommand, DRIVE_CHANNEL};
pub use sensor::{SensorEvent, SENSOR_CHANNEL};

use crate::utils::gesture::{
    ClassifierConfig, ClassifierMode, ClassifyError, FrameOutcome, GestureClassifier,
    WheelCenter,
};

/// How a session steers, chosen once when the controller is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionPlan {
    /// Tilt of the line between the palms.
    Simple,
    /// Tilt relative to a known wheel center.
    Calibrated { center: WheelCenter },
    /// Average the two-hand frames among the first `frames` frames into a
    /// wheel center, then steer calibrated. A window with no two-hand frame
    /// is reported and repeated.
    CalibrateThenWheel { frames: usize },
}

pub struct WheelController {
    classifier: GestureClassifier,
    /// Length of the calibration window in frames.
    calibration_frames: usize,
    /// Frames left in the current calibration window.
    calibration_left: usize,
}

impl WheelController {
    pub fn new(
        plan: SessionPlan,
        config: ClassifierConfig,
    ) -> Self {
        let (classifier, calibration_left) = match plan {
            SessionPlan::Simple => (GestureClassifier::simple(config), 0),
            SessionPlan::Calibrated { center } => {
                (GestureClassifier::calibrated(center, config), 0)
            }
            SessionPlan::CalibrateThenWheel { frames } => {
                (GestureClassifier::init(config), frames.max(1))
            }
        };
        tracing::info!(mode = ?classifier.mode(), "WheelController initialized");
        WheelController {
            classifier,
            calibration_frames: calibration_left,
            calibration_left,
        }
    }

    pub fn mode(&self) -> ClassifierMode {
        self.classifier.mode()
    }

    /// Process one sensor event, returning the command to emit, if any.
    pub fn handle_event(
        &mut self,
        event: SensorEvent,
    ) -> Option<DriveCommand> {
        match event {
            SensorEvent::Connect => {
                tracing::info!("Device Connected");
                None
            }
            SensorEvent::Disconnect => {
                tracing::warn!("Device Disconnected");
                None
            }
            SensorEvent::Exit => {
                tracing::info!("sensor session ended");
                Some(DriveCommand::Exit)
            }
            SensorEvent::Frame(frame) => match self.classifier.classify(&frame) {
                Ok(FrameOutcome::Decision(decision)) => Some(decision.into()),
                Ok(FrameOutcome::Calibrating { samples }) => {
                    self.calibration_left = self.calibration_left.saturating_sub(1);
                    tracing::debug!(samples, left = self.calibration_left, "calibrating");
                    if self.calibration_left == 0 {
                        Some(self.finish_calibration())
                    } else {
                        None
                    }
                }
                Err(ClassifyError::MissingHand { found }) => {
                    tracing::debug!(frame = frame.id, found, "frame skipped");
                    Some(DriveCommand::Skip { hands: found })
                }
                Err(e) => {
                    tracing::error!("frame {} not classified: {}", frame.id, e);
                    None
                }
            },
        }
    }

    /// Switch from calibration to calibrated steering.
    ///
    /// A window without a single two-hand frame reports the failure and
    /// starts a new window instead.
    fn finish_calibration(&mut self) -> DriveCommand {
        let config = *self.classifier.config();
        let init = core::mem::replace(&mut self.classifier, GestureClassifier::init(config));
        match init.finish_calibration() {
            Ok(classifier) => {
                let cmd = match classifier.mode() {
                    ClassifierMode::Calibrated(center) => DriveCommand::from(center),
                    mode => {
                        tracing::error!(?mode, "calibration produced no center");
                        DriveCommand::CalibrationFailed {
                            frames: self.calibration_frames,
                        }
                    }
                };
                self.classifier = classifier;
                cmd
            }
            Err(e) => {
                tracing::error!("calibration failed ({}), restarting window", e);
                self.calibration_left = self.calibration_frames;
                DriveCommand::CalibrationFailed {
                    frames: self.calibration_frames,
                }
            }
        }
    }

    /// Receive sensor events forever and forward the resulting commands.
    pub async fn sensor_ch(&mut self) -> ! {
        loop {
            let event = SENSOR_CHANNEL.receiver().receive().await;
            if let Some(cmd) = self.handle_event(event) {
                DRIVE_CHANNEL.send(cmd).await;
            }
        }
    }
}
