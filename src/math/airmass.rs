//! Plane-parallel airmass.
//!
//! `secz = 1 / cos(z)` with zenith angle `z = 90° - elevation`.
//! Near the horizon this diverges; at zenith it is exactly 1.

/// Zenith angle in radians for an elevation in degrees.
pub fn zenith_angle(elevation_deg: f64) -> f64 {
    (90.0 - elevation_deg).to_radians()
}

/// Airmass for an elevation in degrees.
pub fn secz(elevation_deg: f64) -> f64 {
    1.0 / zenith_angle(elevation_deg).cos()
}
