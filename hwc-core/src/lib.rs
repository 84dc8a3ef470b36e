//! Gesture classification core for the Hand-Wheel Controller on no-std platforms.
//!
//! Frames from a hand-tracking sensor go in through `SENSOR_CHANNEL`, drive
//! commands come out through `DRIVE_CHANNEL`. For a runnable replay, see the
//! `mock-leap` app.
#![no_std]

extern crate alloc;

pub mod utils;
