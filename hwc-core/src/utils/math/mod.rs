//! Math utilities for the Hand-Wheel Controller.
//!
//! This module provides the planar line-angle geometry behind steering decisions.

pub mod steering;
