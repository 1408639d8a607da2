//! Weather process for energy harvesting
//!
//! Each round the sky is sunny, cloudy or rainy. The condition scales the
//! base charge rate of every harvesting node by a fixed factor. A single draw
//! is made per round and shared by the whole field.

pub mod source;

pub use source::{build_source, ConstantHarvest, DayNightCycle, HarvestSource};

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;

/// Tolerance used when checking that the weather probabilities sum to one
pub const PROBABILITY_EPSILON: f64 = 1e-9;

/// Multiplier applied to the base charge rate for one round
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarvestFactor {
    None,
    Half,
    Full,
}

impl HarvestFactor {
    pub fn multiplier(&self) -> f64 {
        match self {
            Self::Full => 1.0,
            Self::Half => 0.5,
            Self::None => 0.0,
        }
    }
}

/// Sky condition for a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    Sunny,
    Cloudy,
    Rainy,
}

impl Weather {
    pub fn harvest_factor(&self) -> HarvestFactor {
        match self {
            Self::Sunny => HarvestFactor::Full,
            Self::Cloudy => HarvestFactor::Half,
            Self::Rainy => HarvestFactor::None,
        }
    }
}

/// Categorical distribution over [`Weather`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherProbabilities {
    pub sunny: f64,
    pub cloudy: f64,
    pub rainy: f64,
}

impl Default for WeatherProbabilities {
    fn default() -> Self {
        Self {
            sunny: 0.6,
            cloudy: 0.3,
            rainy: 0.1,
        }
    }
}

impl WeatherProbabilities {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("sunny", self.sunny),
            ("cloudy", self.cloudy),
            ("rainy", self.rainy),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { name, value });
            }
        }

        let sum = self.sunny + self.cloudy + self.rainy;
        if (sum - 1.0).abs() > PROBABILITY_EPSILON {
            return Err(ConfigError::ProbabilitySum(sum));
        }
        Ok(())
    }

    /// Map a uniform value in `[0, 1)` onto a weather condition.
    ///
    /// The rainy probability is implied: anything at or above the cumulative
    /// sunny + cloudy threshold is rain.
    pub fn classify(&self, u: f64) -> Weather {
        if u < self.sunny {
            Weather::Sunny
        } else if u < self.sunny + self.cloudy {
            Weather::Cloudy
        } else {
            Weather::Rainy
        }
    }

    /// Mean harvest multiplier under this distribution
    pub fn expected_factor(&self) -> f64 {
        self.sunny * HarvestFactor::Full.multiplier()
            + self.cloudy * HarvestFactor::Half.multiplier()
            + self.rainy * HarvestFactor::None.multiplier()
    }

    /// Lowest factor with non-zero probability
    pub fn worst_factor(&self) -> HarvestFactor {
        if self.rainy > 0.0 {
            HarvestFactor::None
        } else if self.cloudy > 0.0 {
            HarvestFactor::Half
        } else {
            HarvestFactor::Full
        }
    }
}

/// Stochastic weather generator with an injected random source
#[derive(Debug, Clone)]
pub struct WeatherProcess<R = ChaCha8Rng> {
    probabilities: WeatherProbabilities,
    rng: R,
}

impl<R: Rng> WeatherProcess<R> {
    pub fn new(probabilities: WeatherProbabilities, rng: R) -> Result<Self, ConfigError> {
        probabilities.validate()?;
        Ok(Self { probabilities, rng })
    }

    pub fn probabilities(&self) -> &WeatherProbabilities {
        &self.probabilities
    }

    /// Draw one uniform value and classify it
    pub fn draw_weather(&mut self) -> Weather {
        let u: f64 = self.rng.gen();
        self.probabilities.classify(u)
    }

    /// Draw the harvest factor for one round
    pub fn draw(&mut self) -> HarvestFactor {
        self.draw_weather().harvest_factor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_factor_multipliers() {
        assert_eq!(HarvestFactor::Full.multiplier(), 1.0);
        assert_eq!(HarvestFactor::Half.multiplier(), 0.5);
        assert_eq!(HarvestFactor::None.multiplier(), 0.0);
        assert!(HarvestFactor::None < HarvestFactor::Half);
        assert!(HarvestFactor::Half < HarvestFactor::Full);
    }

    #[test]
    fn test_classify_thresholds() {
        let p = WeatherProbabilities::default();
        assert_eq!(p.classify(0.0), Weather::Sunny);
        assert_eq!(p.classify(0.59), Weather::Sunny);
        assert_eq!(p.classify(0.6), Weather::Cloudy);
        assert_eq!(p.classify(0.89), Weather::Cloudy);
        assert_eq!(p.classify(0.9), Weather::Rainy);
        assert_eq!(p.classify(0.999), Weather::Rainy);
    }

    #[test]
    fn test_classify_sequence_is_reproducible() {
        let p = WeatherProbabilities::default();
        let uniforms = [0.1, 0.95, 0.7, 0.6, 0.3, 0.91];
        let first: Vec<_> = uniforms.iter().map(|&u| p.classify(u).harvest_factor()).collect();
        let second: Vec<_> = uniforms.iter().map(|&u| p.classify(u).harvest_factor()).collect();
        assert_eq!(first, second);
        assert_eq!(
            first,
            vec![
                HarvestFactor::Full,
                HarvestFactor::None,
                HarvestFactor::Half,
                HarvestFactor::Half,
                HarvestFactor::Full,
                HarvestFactor::None,
            ]
        );
    }

    #[test]
    fn test_validate() {
        assert!(WeatherProbabilities::default().validate().is_ok());

        let bad_sum = WeatherProbabilities {
            sunny: 0.6,
            cloudy: 0.3,
            rainy: 0.05,
        };
        assert!(matches!(bad_sum.validate(), Err(ConfigError::ProbabilitySum(_))));

        let negative = WeatherProbabilities {
            sunny: 1.2,
            cloudy: -0.2,
            rainy: 0.0,
        };
        assert!(matches!(
            negative.validate(),
            Err(ConfigError::ProbabilityOutOfRange { .. })
        ));

        let always_sunny = WeatherProbabilities {
            sunny: 1.0,
            cloudy: 0.0,
            rainy: 0.0,
        };
        assert!(always_sunny.validate().is_ok());
    }

    #[test]
    fn test_expected_and_worst_factor() {
        let p = WeatherProbabilities::default();
        assert!((p.expected_factor() - 0.75).abs() < 1e-12);
        assert_eq!(p.worst_factor(), HarvestFactor::None);

        let no_rain = WeatherProbabilities {
            sunny: 0.5,
            cloudy: 0.5,
            rainy: 0.0,
        };
        assert_eq!(no_rain.worst_factor(), HarvestFactor::Half);
    }

    #[test]
    fn test_seeded_process_is_deterministic() {
        let p = WeatherProbabilities::default();
        let mut a = WeatherProcess::new(p, ChaCha8Rng::seed_from_u64(9)).unwrap();
        let mut b = WeatherProcess::new(p, ChaCha8Rng::seed_from_u64(9)).unwrap();
        let draws_a: Vec<_> = (0..200).map(|_| a.draw()).collect();
        let draws_b: Vec<_> = (0..200).map(|_| b.draw()).collect();
        assert_eq!(draws_a, draws_b);
    }

    #[test]
    fn test_draw_frequencies() {
        let p = WeatherProbabilities::default();
        let mut process = WeatherProcess::new(p, ChaCha8Rng::seed_from_u64(1234)).unwrap();
        let n = 20_000;
        let sunny = (0..n)
            .filter(|_| process.draw_weather() == Weather::Sunny)
            .count();
        let ratio = sunny as f64 / n as f64;
        assert!((ratio - 0.6).abs() < 0.02, "sunny ratio {}", ratio);
    }

    #[test]
    fn test_process_rejects_bad_probabilities() {
        let p = WeatherProbabilities {
            sunny: 0.5,
            cloudy: 0.3,
            rainy: 0.15,
        };
        assert!(WeatherProcess::new(p, ChaCha8Rng::seed_from_u64(0)).is_err());
    }
}
