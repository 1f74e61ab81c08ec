//! "A Practical Analytic Model for Daylight", Preetham, Shirley & Smits 1999.
//!
//! Computes sky luminance (in kcd/m²) and chromaticity from the Perez
//! distribution function, and returns it as XYZ.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::{Channel, ParamError, SkyModel, SkyParams};

// Indices into the per-component tables.
const LUMINANCE: usize = 0;
const CHROMA_X: usize = 1;
const CHROMA_Y: usize = 2;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Preetham {
    params: SkyParams,

    /// Y, x and y at the zenith.
    zenith: [f64; 3],

    /// Perez coefficients A to E, for Y, x and y.
    perez: [[f64; 5]; 3],

    /// The Perez function evaluated at the zenith, for Y, x and y.
    perez_zenith: [f64; 3],
}

impl Preetham {
    pub fn new(params: &SkyParams) -> Result<Preetham, ParamError> {
        params.validate()?;

        let t = params.turbidity;
        let theta_s = FRAC_PI_2 - params.solar_elevation;

        let perez = [
            [
                0.1787 * t - 1.4630,
                -0.3554 * t + 0.4275,
                -0.0227 * t + 5.3251,
                0.1206 * t - 2.5771,
                -0.0670 * t + 0.3703,
            ],
            [
                -0.0193 * t - 0.2592,
                -0.0665 * t + 0.0008,
                -0.0004 * t + 0.2125,
                -0.0641 * t - 0.8989,
                -0.0033 * t + 0.0452,
            ],
            [
                -0.0167 * t - 0.2608,
                -0.0950 * t + 0.0092,
                -0.0079 * t + 0.2102,
                -0.0441 * t - 1.6537,
                -0.0109 * t + 0.0529,
            ],
        ];

        let zenith = [
            zenith_luminance(t, theta_s),
            zenith_chroma_x(t, theta_s),
            zenith_chroma_y(t, theta_s),
        ];

        let perez_zenith = [
            perez_fn(0.0, theta_s, &perez[LUMINANCE]),
            perez_fn(0.0, theta_s, &perez[CHROMA_X]),
            perez_fn(0.0, theta_s, &perez[CHROMA_Y]),
        ];

        Ok(Preetham {
            params: *params,
            zenith,
            perez,
            perez_zenith,
        })
    }

    pub fn params(&self) -> &SkyParams {
        &self.params
    }

    /// Luminance and chromaticity (Y, x, y) seen in the given direction.
    pub fn luminance_chroma(&self, theta: f64, gamma: f64) -> [f64; 3] {
        [
            self.component(LUMINANCE, theta, gamma),
            self.component(CHROMA_X, theta, gamma),
            self.component(CHROMA_Y, theta, gamma),
        ]
    }

    /// One of Y, x or y seen in the given direction.
    fn component(&self, i: usize, theta: f64, gamma: f64) -> f64 {
        let ratio = perez_fn(theta, gamma, &self.perez[i]) / self.perez_zenith[i];
        if ratio.is_finite() {
            self.zenith[i] * ratio
        } else {
            0.0
        }
    }
}

impl SkyModel for Preetham {
    /// Ground albedo isn't part of this model.
    fn uses_albedo(&self) -> bool {
        false
    }

    /// `Channel::Y` only evaluates the luminance.  `X` and `Z` depend on the
    /// luminance and both chromaticities, so they cost as much as a full
    /// `tristimulus()` call.
    fn radiance(&self, theta: f64, gamma: f64, channel: Channel) -> f64 {
        match channel {
            Channel::Y => self.component(LUMINANCE, theta, gamma).max(0.0),
            _ => self.tristimulus(theta, gamma)[channel as usize],
        }
    }

    fn tristimulus(&self, theta: f64, gamma: f64) -> [f64; 3] {
        let [lum, x, y] = self.luminance_chroma(theta, gamma);
        if lum <= 0.0 {
            return [0.0, 0.0, 0.0];
        }
        if y <= 0.0 {
            return [0.0, lum, 0.0];
        }
        [x * lum / y, lum, ((1.0 - x - y) * lum / y).max(0.0)]
    }
}

/// The Perez sky luminance distribution function.
fn perez_fn(theta: f64, gamma: f64, [a, b, c, d, e]: &[f64; 5]) -> f64 {
    let cos_gamma = gamma.cos();
    let res = (1.0 + a * (b / theta.cos()).exp())
        * (1.0 + c * (d * gamma).exp() + e * cos_gamma * cos_gamma);
    if res.is_finite() {
        res
    } else {
        0.0
    }
}

fn zenith_luminance(t: f64, theta_s: f64) -> f64 {
    let chi = (4.0 / 9.0 - t / 120.0) * (PI - 2.0 * theta_s);
    (4.0453 * t - 4.9710) * chi.tan() - 0.2155 * t + 2.4192
}

fn zenith_chroma_x(t: f64, theta_s: f64) -> f64 {
    let theta2 = theta_s * theta_s;
    let theta3 = theta2 * theta_s;
    (0.00165 * theta3 - 0.00375 * theta2 + 0.00209 * theta_s) * t * t
        + (-0.02903 * theta3 + 0.06377 * theta2 - 0.03202 * theta_s + 0.00394) * t
        + (0.11693 * theta3 - 0.21196 * theta2 + 0.06052 * theta_s + 0.25886)
}

fn zenith_chroma_y(t: f64, theta_s: f64) -> f64 {
    let theta2 = theta_s * theta_s;
    let theta3 = theta2 * theta_s;
    (0.00275 * theta3 - 0.00610 * theta2 + 0.00317 * theta_s) * t * t
        + (-0.04214 * theta3 + 0.08970 * theta2 - 0.04153 * theta_s + 0.00516) * t
        + (0.15346 * theta3 - 0.26756 * theta2 + 0.06670 * theta_s + 0.26688)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(turbidity: f64, solar_elevation: f64) -> Preetham {
        Preetham::new(&SkyParams {
            turbidity,
            albedo: 0.2,
            solar_elevation,
        })
        .unwrap()
    }

    #[test]
    fn rejects_invalid_params() {
        let r = Preetham::new(&SkyParams {
            turbidity: 12.0,
            ..SkyParams::default()
        });
        assert_eq!(r, Err(ParamError::TurbidityOutOfRange(12.0)));
    }

    #[test]
    fn zenith_matches_zenith_values() {
        let sky = model(3.0, 0.6);
        let theta_s = FRAC_PI_2 - 0.6;
        let yxy = sky.luminance_chroma(0.0, theta_s);
        assert!((yxy[0] - zenith_luminance(3.0, theta_s)).abs() < 1.0e-9);
        assert!((yxy[1] - zenith_chroma_x(3.0, theta_s)).abs() < 1.0e-9);
        assert!((yxy[2] - zenith_chroma_y(3.0, theta_s)).abs() < 1.0e-9);
    }

    #[test]
    fn plausible_zenith_chromaticity() {
        let [_, x, y] = model(2.5, 1.0).luminance_chroma(0.0, FRAC_PI_2 - 1.0);
        assert!(x > 0.2 && x < 0.35, "x = {}", x);
        assert!(y > 0.2 && y < 0.35, "y = {}", y);
    }

    #[test]
    fn finite_and_non_negative() {
        for &t in &[2.0, 5.0, 10.0] {
            for &elevation in &[0.0, 0.3, 1.0, FRAC_PI_2] {
                let sky = model(t, elevation);
                for i in 0..=16 {
                    let theta = FRAC_PI_2 * i as f64 / 16.0;
                    for j in 0..=16 {
                        let gamma = PI * j as f64 / 16.0;
                        let xyz = sky.tristimulus(theta, gamma);
                        for c in xyz.iter() {
                            assert!(c.is_finite() && *c >= 0.0, "{:?}", xyz);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn brighter_towards_the_sun() {
        let sky = model(3.0, 0.4);
        let near = sky.radiance(1.0, 0.1, Channel::Y);
        let far = sky.radiance(1.0, 2.5, Channel::Y);
        assert!(near > far, "{} <= {}", near, far);
    }

    #[test]
    fn radiance_matches_tristimulus() {
        for &(t, elevation) in &[(4.0, 0.8), (2.0, 0.0), (10.0, FRAC_PI_2)] {
            let sky = model(t, elevation);
            for &(theta, gamma) in &[(0.7, 1.2), (0.0, 0.1), (FRAC_PI_2, PI), (1.5, 0.0)] {
                let xyz = sky.tristimulus(theta, gamma);
                for &channel in Channel::ALL.iter() {
                    assert_eq!(sky.radiance(theta, gamma, channel), xyz[channel as usize]);
                }
            }
        }
    }

    #[test]
    fn ignores_albedo() {
        let a = model(3.0, 0.5);
        let b = Preetham::new(&SkyParams {
            albedo: 0.9,
            ..*a.params()
        })
        .unwrap();
        assert!(!a.uses_albedo());
        assert_eq!(a.tristimulus(0.4, 0.9), b.tristimulus(0.4, 0.9));
    }
}
