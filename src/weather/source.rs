//! Harvest sources: anything that yields one harvest factor per round

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{HarvestFactor, WeatherProbabilities, WeatherProcess};
use crate::core::config::HarvestConfig;
use crate::core::error::ConfigError;
use crate::core::types::Round;

/// Offset between the deployment seed and the weather seed
pub const WEATHER_SEED_OFFSET: u64 = 1;

/// Produces the harvest factor shared by every harvesting node in a round.
///
/// The engine calls `factor_for` exactly once per round, in round order.
pub trait HarvestSource: Send {
    fn factor_for(&mut self, round: Round) -> HarvestFactor;

    /// Lowest factor this source can ever yield
    fn worst_case(&self) -> HarvestFactor;
}

impl<R: Rng + Send> HarvestSource for WeatherProcess<R> {
    fn factor_for(&mut self, _round: Round) -> HarvestFactor {
        self.draw()
    }

    fn worst_case(&self) -> HarvestFactor {
        self.probabilities().worst_factor()
    }
}

/// Deterministic daylight cycle: full charge for the first `daylight`
/// rounds of each `period`, nothing for the rest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayNightCycle {
    period: u32,
    daylight: u32,
}

impl DayNightCycle {
    pub fn new(period: u32, daylight: u32) -> Result<Self, ConfigError> {
        if period == 0 || daylight > period {
            return Err(ConfigError::InvalidDayNightCycle { period, daylight });
        }
        Ok(Self { period, daylight })
    }

    pub fn is_daytime(&self, round: Round) -> bool {
        round % self.period < self.daylight
    }
}

impl HarvestSource for DayNightCycle {
    fn factor_for(&mut self, round: Round) -> HarvestFactor {
        if self.is_daytime(round) {
            HarvestFactor::Full
        } else {
            HarvestFactor::None
        }
    }

    fn worst_case(&self) -> HarvestFactor {
        if self.daylight == self.period {
            HarvestFactor::Full
        } else {
            HarvestFactor::None
        }
    }
}

/// Same factor every round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantHarvest(pub HarvestFactor);

impl HarvestSource for ConstantHarvest {
    fn factor_for(&mut self, _round: Round) -> HarvestFactor {
        self.0
    }

    fn worst_case(&self) -> HarvestFactor {
        self.0
    }
}

/// Build the configured harvest source, seeding stochastic weather from `seed`
pub fn build_source(
    harvest: &HarvestConfig,
    probabilities: WeatherProbabilities,
    seed: u64,
) -> Result<Box<dyn HarvestSource>, ConfigError> {
    let source: Box<dyn HarvestSource> = match *harvest {
        HarvestConfig::Stochastic => {
            let rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(WEATHER_SEED_OFFSET));
            Box::new(WeatherProcess::new(probabilities, rng)?)
        }
        HarvestConfig::DayNight { period, daylight } => {
            Box::new(DayNightCycle::new(period, daylight)?)
        }
        HarvestConfig::Constant { factor } => Box::new(ConstantHarvest(factor)),
    };
    Ok(source)
}
