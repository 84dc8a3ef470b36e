//! Per-hand tracking data: palm position and extended fingers.

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

/// Palm center in sensor space (mm).
///
/// X grows to the right of the sensor, Y upward, Z toward the user.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PalmPosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl PalmPosition {
    pub const fn new(
        x: f32,
        y: f32,
        z: f32,
    ) -> Self {
        Self { x, y, z }
    }
}

/// Anatomical finger type as reported by the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FingerType {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl FingerType {
    const ALL: [FingerType; 5] = [
        FingerType::Thumb,
        FingerType::Index,
        FingerType::Middle,
        FingerType::Ring,
        FingerType::Pinky,
    ];

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Set of fingers the sensor classified as extended.
///
/// Serialized as a JSON list of finger names, e.g. `["thumb", "index"]`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<FingerType>", into = "Vec<FingerType>")]
pub struct FingerSet(u8);

impl FingerSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn with(
        self,
        finger: FingerType,
    ) -> Self {
        Self(self.0 | finger.bit())
    }

    pub const fn contains(
        &self,
        finger: FingerType,
    ) -> bool {
        self.0 & finger.bit() != 0
    }

    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterate the contained fingers from thumb to pinky.
    pub fn iter(&self) -> impl Iterator<Item = FingerType> + '_ {
        FingerType::ALL.into_iter().filter(|f| self.contains(*f))
    }
}

impl From<Vec<FingerType>> for FingerSet {
    fn from(fingers: Vec<FingerType>) -> Self {
        fingers.into_iter().collect()
    }
}

impl From<FingerSet> for Vec<FingerType> {
    fn from(set: FingerSet) -> Self {
        set.iter().collect()
    }
}

impl FromIterator<FingerType> for FingerSet {
    fn from_iter<I: IntoIterator<Item = FingerType>>(iter: I) -> Self {
        iter.into_iter().fold(FingerSet::empty(), FingerSet::with)
    }
}

/// One tracked hand in one frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandPose {
    pub palm: PalmPosition,
    #[serde(default)]
    pub extended: FingerSet,
}

impl HandPose {
    /// Build a pose that only records whether the thumb is extended.
    pub fn new(
        palm: PalmPosition,
        thumb_extended: bool,
    ) -> Self {
        let extended = if thumb_extended {
            FingerSet::empty().with(FingerType::Thumb)
        } else {
            FingerSet::empty()
        };
        Self { palm, extended }
    }

    pub fn thumb_extended(&self) -> bool {
        self.extended.contains(FingerType::Thumb)
    }
}
