//! Utility re-exports for the Hand-Wheel Controller.
//!
//! This module re-exports the tracking data model, gesture classification,
//! geometry, and the controller channels:
//!
//! - `controllers`: sensor intake, drive output and the session controller
//! - `gesture`: per-frame motion/steering classification and calibration
//! - `math`: line-angle geometry in the x-z plane
//! - `tracking`: hands and frames as reported by the sensor

pub mod controllers;
pub mod gesture;
pub mod math;
pub mod tracking;

pub use controllers::{SessionPlan, WheelController};
pub use gesture::{ClassifierConfig, GestureClassifier};
