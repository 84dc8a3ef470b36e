//! Frame snapshots delivered by the hand-tracking sensor.

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use super::hand::HandPose;
use crate::utils::gesture::ClassifyError;

/// One sensor frame.
///
/// Hands appear in the order the sensor reports them; the first is treated
/// as the left hand and the second as the right. There is no identity
/// tracking across frames.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    #[serde(default)]
    pub id: i64,
    /// Sensor timestamp (µs).
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub hands: Vec<HandPose>,
}

impl Frame {
    pub fn new(hands: Vec<HandPose>) -> Self {
        Self {
            hands,
            ..Default::default()
        }
    }

    /// Return the `(left, right)` hands of this frame.
    ///
    /// Fails with [`ClassifyError::MissingHand`] when fewer than two hands were
    /// tracked. Extra hands beyond the first two are ignored.
    pub fn hand_pair(&self) -> Result<(&HandPose, &HandPose), ClassifyError> {
        match self.hands.as_slice() {
            [left, right, ..] => Ok((left, right)),
            _ => Err(ClassifyError::MissingHand {
                found: self.hands.len(),
            }),
        }
    }
}
