//! Line-angle geometry in the sensor's horizontal (x-z) plane.
//!
//! Steering is read from the tilt of a line through two palm positions, like
//! the rim of a wheel held in both hands. Angles are in degrees and follow the
//! range convention of `atan`: a raw angle at or above 90° is shifted down by
//! 180°, so every line maps into `[-90, 90)`.
//!
//! # Example
//! ```rust
//! use hwc_core::utils::math::steering::line_angle;
//! let tilt = line_angle(100.0, 100.0);
//! assert!((tilt - 45.0).abs() < 1e-4);
//! ```
//!
use core::f32::consts::PI;
use libm;

const RAD_TO_DEG: f32 = 180.0 / PI;

/// Map a raw line angle (degrees) into `[-90, 90)`.
pub fn normalize_line_angle(angle: f32) -> f32 {
    if angle < 90.0 {
        angle
    } else {
        angle - 180.0
    }
}

/// Angle (degrees) of the line with run `dx` and rise `dz`.
///
/// A vertical line (`dx == 0`) reports -90°, the normalized form of ±90°.
/// Coincident endpoints carry no direction and report 0°.
pub fn line_angle(
    dx: f32,
    dz: f32,
) -> f32 {
    if dx == 0.0 {
        if dz == 0.0 {
            tracing::debug!("coincident points, treating line as level");
            return 0.0;
        }
        tracing::debug!(dz, "vertical line");
        return normalize_line_angle(90.0);
    }
    let slope = dz / dx;
    normalize_line_angle(libm::atanf(slope) * RAD_TO_DEG)
}

/// Acute angle (degrees, `[0, 90]`) between two lines given by their angles.
///
/// For finite slopes `m1 = tan(a)`, `m2 = tan(b)` this equals
/// `atan(|(m2 - m1) / (1 + m1 * m2)|)`, but it stays defined when a line is
/// vertical or the lines are perpendicular.
pub fn angle_between_lines(
    a: f32,
    b: f32,
) -> f32 {
    let d = libm::fmodf(libm::fabsf(a - b), 180.0);
    if d > 90.0 {
        180.0 - d
    } else {
        d
    }
}

/// Mean direction (degrees, `[-90, 90)`) of two lines given by their angles.
///
/// Lines near ±90° are averaged across the seam: 89° and -89° are 2° apart
/// and average to the vertical, not to 0°.
pub fn mean_line_angle(
    a: f32,
    b: f32,
) -> f32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let lo = if hi - lo > 90.0 { lo + 180.0 } else { lo };
    normalize_line_angle((lo + hi) / 2.0)
}
