//! Wheel-center calibration.
//!
//! While the user holds and turns an imaginary wheel, the midpoint between the
//! two palms sweeps around the wheel's hub. Averaging those midpoints over the
//! calibration window gives the center used by calibrated steering.

use serde::{Deserialize, Serialize};

use super::ClassifyError;
use crate::utils::tracking::PalmPosition;

/// Calibrated wheel hub in the sensor's x-z plane (mm).
///
/// The default is the sensor origin.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelCenter {
    pub x: f32,
    pub z: f32,
}

impl WheelCenter {
    pub const fn new(
        x: f32,
        z: f32,
    ) -> Self {
        Self { x, z }
    }
}

/// Running mean of palm midpoints.
///
/// Append-only; keeps sums rather than samples so it never allocates.
#[derive(Debug, Default, Clone)]
pub struct CenterCalibrator {
    sum_x: f32,
    sum_z: f32,
    count: usize,
}

impl CenterCalibrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one pair of palm positions.
    ///
    /// Pairs with an absent hand are ignored. Returns whether the sample was
    /// kept.
    pub fn add_hands_pos(
        &mut self,
        left: Option<PalmPosition>,
        right: Option<PalmPosition>,
    ) -> bool {
        let (Some(left), Some(right)) = (left, right) else {
            tracing::debug!("calibration sample dropped, hand missing");
            return false;
        };
        self.sum_x += left.x / 2.0 + right.x / 2.0;
        self.sum_z += left.z / 2.0 + right.z / 2.0;
        self.count += 1;
        true
    }

    /// Number of samples kept so far.
    pub fn samples(&self) -> usize {
        self.count
    }

    /// Mean palm midpoint over all kept samples.
    pub fn flat_center(&self) -> Result<WheelCenter, ClassifyError> {
        if self.count == 0 {
            return Err(ClassifyError::EmptyCalibration);
        }
        let n = self.count as f32;
        let center = WheelCenter::new(self.sum_x / n, self.sum_z / n);
        tracing::info!(x = center.x, z = center.z, samples = self.count, "wheel center");
        Ok(center)
    }
}

/// Compute the wheel center from a batch of `(left, right)` palm samples.
pub fn calibrate<I>(samples: I) -> Result<WheelCenter, ClassifyError>
where
    I: IntoIterator<Item = (Option<PalmPosition>, Option<PalmPosition>)>,
{
    let mut calibrator = CenterCalibrator::new();
    for (left, right) in samples {
        calibrator.add_hands_pos(left, right);
    }
    calibrator.flat_center()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn palm(
        x: f32,
        z: f32,
    ) -> Option<PalmPosition> {
        Some(PalmPosition::new(x, 180.0, z))
    }

    #[test]
    fn test_empty_calibration_fails() {
        let none: Vec<(Option<PalmPosition>, Option<PalmPosition>)> = Vec::new();
        assert_eq!(calibrate(none), Err(ClassifyError::EmptyCalibration));
    }

    #[test]
    fn test_single_sample_midpoint() {
        let center = calibrate([(palm(0.0, 0.0), palm(2.0, 0.0))]).unwrap();
        assert_eq!(center, WheelCenter::new(1.0, 0.0));
    }

    #[test]
    fn test_mean_over_samples() {
        let center = calibrate([
            (palm(-100.0, 10.0), palm(100.0, 30.0)),
            (palm(-80.0, -20.0), palm(120.0, 0.0)),
        ])
        .unwrap();
        assert!((center.x - 10.0).abs() < 1e-4);
        assert!((center.z - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_samples_with_missing_hand_are_skipped() {
        let mut cal = CenterCalibrator::new();
        assert!(!cal.add_hands_pos(palm(5.0, 5.0), None));
        assert!(!cal.add_hands_pos(None, None));
        assert_eq!(cal.flat_center(), Err(ClassifyError::EmptyCalibration));
        assert!(cal.add_hands_pos(palm(-4.0, 2.0), palm(4.0, 6.0)));
        assert_eq!(cal.samples(), 1);
        assert_eq!(cal.flat_center().unwrap(), WheelCenter::new(0.0, 4.0));
    }
}
