// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use rand::Rng;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimulationConfigBuildError {
    #[error("Missing containers")]
    MissingContainers,
    #[error("Pickup ratio {0} is outside [0, 1]")]
    InvalidPickupRatio(f64),
    #[error("place_attempts must be at least 1")]
    ZeroPlaceAttempts,
}

/// Parameters of one gate simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    containers: usize,
    pickup_ratio: f64,
    place_attempts: u32,
    seed: u64,
}

impl SimulationConfig {
    /// Containers arriving in the first wave.
    #[inline]
    pub fn containers(&self) -> usize {
        self.containers
    }

    /// Share of placed containers picked up before the second wave.
    #[inline]
    pub fn pickup_ratio(&self) -> f64 {
        self.pickup_ratio
    }

    /// How often a gate client re-suggests after losing its cell to another
    /// client.
    #[inline]
    pub fn place_attempts(&self) -> u32 {
        self.place_attempts
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// Builder for `SimulationConfig`.
#[derive(Debug, Clone)]
pub struct SimulationConfigBuilder {
    // Required
    containers: Option<usize>,

    // Optional
    pickup_ratio: f64,
    place_attempts: u32,
    seed: u64,
}

impl Default for SimulationConfigBuilder {
    fn default() -> Self {
        Self {
            containers: None,
            pickup_ratio: 0.3,
            place_attempts: 8,
            seed: 42,
        }
    }
}

impl SimulationConfigBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn containers(mut self, v: usize) -> Self {
        self.containers = Some(v);
        self
    }

    #[inline]
    pub fn pickup_ratio(mut self, v: f64) -> Self {
        self.pickup_ratio = v;
        self
    }

    #[inline]
    pub fn place_attempts(mut self, v: u32) -> Self {
        self.place_attempts = v;
        self
    }

    pub fn random_seed(mut self) -> Self {
        self.seed = rand::rng().random();
        self
    }

    #[inline]
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    pub fn build(self) -> Result<SimulationConfig, SimulationConfigBuildError> {
        use SimulationConfigBuildError::*;
        let containers = self.containers.ok_or(MissingContainers)?;
        if !(0.0..=1.0).contains(&self.pickup_ratio) {
            return Err(InvalidPickupRatio(self.pickup_ratio));
        }
        if self.place_attempts == 0 {
            return Err(ZeroPlaceAttempts);
        }
        Ok(SimulationConfig {
            containers,
            pickup_ratio: self.pickup_ratio,
            place_attempts: self.place_attempts,
            seed: self.seed,
        })
    }
}
