//! Maps skydome image pixels to view angles.
//!
//! The image is an angular fisheye of the upper hemisphere: the zenith is at
//! the image center and the horizon is a circle touching the left and right
//! image edges.  The sun lies in the direction of increasing `x`.

use std::f64::consts::FRAC_PI_2;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SkyAngles {
    /// Angle between the view direction and the zenith.
    pub theta: f64,

    /// Angle between the view direction and the sun.
    pub gamma: f64,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FisheyeProjection {
    pub width: usize,
    pub height: usize,
    pub solar_elevation: f64,
}

impl FisheyeProjection {
    pub fn new(width: usize, height: usize, solar_elevation: f64) -> FisheyeProjection {
        FisheyeProjection {
            width,
            height,
            solar_elevation,
        }
    }

    /// View angles for the pixel at `(x, y)`, or `None` if the pixel is
    /// outside of the horizon circle.
    pub fn angles(&self, x: usize, y: usize) -> Option<SkyAngles> {
        let rx = x as f64 - (self.width / 2) as f64;
        let ry = y as f64 - (self.height / 2) as f64;

        let nr = (rx * rx + ry * ry).sqrt() / (self.width as f64 / 2.0);
        if nr > 1.0 {
            return None;
        }

        let theta = nr * FRAC_PI_2;
        let phi = rx.atan2(ry);
        let (sin_s, cos_s) = self.solar_elevation.sin_cos();
        let cos_gamma = cos_s * theta.sin() * phi.sin() + sin_s * theta.cos();

        Some(SkyAngles {
            theta,
            gamma: cos_gamma.max(-1.0).min(1.0).acos(),
        })
    }
}
