//! Analytic daylight sky models.
//!
//! All angles are in radians.  `theta` is the angle between the view
//! direction and the zenith, and `gamma` is the angle between the view
//! direction and the sun.

pub mod color;
mod preetham;

pub use preetham::Preetham;

use std::f64::consts::FRAC_PI_2;

/// Component of the CIE 1931 XYZ tristimulus values.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Channel {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::X, Channel::Y, Channel::Z];
}

pub trait SkyModel: Sync {
    /// Sky radiance seen in the given direction, for one channel.
    fn radiance(&self, theta: f64, gamma: f64, channel: Channel) -> f64;

    /// Whether the ground albedo passed in `SkyParams` affects the result.
    fn uses_albedo(&self) -> bool {
        true
    }

    /// Sky radiance seen in the given direction, as XYZ.
    fn tristimulus(&self, theta: f64, gamma: f64) -> [f64; 3] {
        [
            self.radiance(theta, gamma, Channel::X),
            self.radiance(theta, gamma, Channel::Y),
            self.radiance(theta, gamma, Channel::Z),
        ]
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SkyParams {
    /// Haziness of the atmosphere.  Must be in `[2, 10]`.
    pub turbidity: f64,

    /// Ground albedo.  Must be in `[0, 1]`.
    pub albedo: f64,

    /// Angle of the sun above the horizon.  Must be in `[0, π/2]`.
    pub solar_elevation: f64,
}

impl SkyParams {
    pub const TURBIDITY_RANGE: (f64, f64) = (2.0, 10.0);

    pub fn validate(&self) -> Result<(), ParamError> {
        let (t_min, t_max) = Self::TURBIDITY_RANGE;
        if !(self.turbidity >= t_min && self.turbidity <= t_max) {
            return Err(ParamError::TurbidityOutOfRange(self.turbidity));
        }
        if !(self.albedo >= 0.0 && self.albedo <= 1.0) {
            return Err(ParamError::AlbedoOutOfRange(self.albedo));
        }
        if !(self.solar_elevation >= 0.0 && self.solar_elevation <= FRAC_PI_2) {
            return Err(ParamError::ElevationOutOfRange(self.solar_elevation));
        }
        Ok(())
    }
}

impl Default for SkyParams {
    fn default() -> SkyParams {
        SkyParams {
            turbidity: 3.0,
            albedo: 0.1,
            solar_elevation: 0.5,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ParamError {
    TurbidityOutOfRange(f64),
    AlbedoOutOfRange(f64),
    ElevationOutOfRange(f64),
}

impl std::error::Error for ParamError {}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamError::TurbidityOutOfRange(t) => write!(
                f,
                "turbidity must be between {} and {}, but got {}.",
                SkyParams::TURBIDITY_RANGE.0,
                SkyParams::TURBIDITY_RANGE.1,
                t
            ),
            ParamError::AlbedoOutOfRange(a) => {
                write!(f, "albedo must be between 0 and 1, but got {}.", a)
            }
            ParamError::ElevationOutOfRange(e) => write!(
                f,
                "solar elevation must be between 0 and π/2 radians, but got {}.",
                e
            ),
        }
    }
}
