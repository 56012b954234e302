use rand::{Rng, RngCore};
use std::ops::Range;

pub const TEMPERATURE_RANGE: Range<f64> = 30.0..50.0;
pub const PH_RANGE: Range<f64> = 6.0..8.0;
pub const CONCENTRATION_RANGE: Range<f64> = 0.5..1.5;

/// One draw of prebiotic conditions. Temperature is in °C, concentration in arbitrary units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentSample {
    pub temperature: f64,
    pub ph: f64,
    pub concentration: f64,
}

pub trait EnvironmentSampler {
    fn sample(&self, rng: &mut dyn RngCore) -> EnvironmentSample;
}

/// Draws each variable independently and uniformly from its half-open sampling range,
/// in the order temperature, pH, concentration.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformEnvironmentSampler;

impl EnvironmentSampler for UniformEnvironmentSampler {
    fn sample(&self, rng: &mut dyn RngCore) -> EnvironmentSample {
        let temperature = rng.gen_range(TEMPERATURE_RANGE);
        let ph = rng.gen_range(PH_RANGE);
        let concentration = rng.gen_range(CONCENTRATION_RANGE);
        EnvironmentSample {
            temperature,
            ph,
            concentration,
        }
    }
}
