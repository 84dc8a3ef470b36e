//! Hand-tracking data model.
//!
//! - `hand`: palm position and extended-finger set of one tracked hand
//! - `frame`: the per-frame snapshot of all tracked hands

pub mod frame;
pub mod hand;

pub use frame::Frame;
pub use hand::{FingerSet, FingerType, HandPose, PalmPosition};
