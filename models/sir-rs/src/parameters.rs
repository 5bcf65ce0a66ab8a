use serde::{Deserialize, Serialize};

use crate::error::SirError;
use crate::scenario::Scenario;

/// Reproduction numbers outside this range are simulated, but are unusual enough to warn about.
pub const ADVISORY_REPRODUCTION_NUMBER: (f64, f64) = (0.1, 3.0);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationParameters {
    pub reproduction_number: f64,
    pub population: u64,
    pub initial_infected: u64,
    /// Steps simulated after day 0.
    pub days: usize,
    /// Fraction of the infected compartment recovering each day.
    pub recovery_rate: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            reproduction_number: 0.8,
            population: 50_000_000,
            initial_infected: 1_000,
            days: 365,
            recovery_rate: 0.1,
        }
    }
}

impl SimulationParameters {
    /// Daily transmission rate.
    pub fn beta(&self) -> f64 {
        self.reproduction_number * self.recovery_rate
    }

    pub fn validate(&self) -> Result<(), SirError> {
        if self.population == 0 {
            return Err(SirError::InvalidParameter(
                "population must be positive".to_string(),
            ));
        }
        if self.initial_infected > self.population {
            return Err(SirError::InvalidParameter(format!(
                "initial_infected ({}) exceeds population ({})",
                self.initial_infected, self.population
            )));
        }
        if self.days.checked_add(1).is_none() {
            return Err(SirError::InvalidParameter(format!(
                "days ({}) leaves no room for day 0",
                self.days
            )));
        }
        // Written as negations so that NaN is rejected too.
        if !(self.reproduction_number > 0.0 && self.reproduction_number.is_finite()) {
            return Err(SirError::InvalidParameter(format!(
                "reproduction_number must be positive and finite, got {}",
                self.reproduction_number
            )));
        }
        if !(self.recovery_rate > 0.0 && self.recovery_rate.is_finite()) {
            return Err(SirError::InvalidParameter(format!(
                "recovery_rate must be positive and finite, got {}",
                self.recovery_rate
            )));
        }
        Ok(())
    }

    pub fn in_advisory_range(&self) -> bool {
        let (low, high) = ADVISORY_REPRODUCTION_NUMBER;
        (low..=high).contains(&self.reproduction_number)
    }
}

/// Model input section of a run document. Every field is optional: unset fields fall
/// back to the scenario preset, then to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelInput {
    pub scenario: Option<Scenario>,
    pub reproduction_number: Option<f64>,
    pub population: Option<u64>,
    pub initial_infected: Option<u64>,
    pub days: Option<usize>,
    pub recovery_rate: Option<f64>,
}

impl ModelInput {
    pub fn resolve(&self) -> SimulationParameters {
        let mut parameters = SimulationParameters::default();
        if let Some(scenario) = self.scenario {
            let preset = scenario.preset();
            parameters.reproduction_number = preset.reproduction_number;
            parameters.population = preset.population;
            parameters.initial_infected = preset.initial_infected;
        }
        if let Some(reproduction_number) = self.reproduction_number {
            parameters.reproduction_number = reproduction_number;
        }
        if let Some(population) = self.population {
            parameters.population = population;
        }
        if let Some(initial_infected) = self.initial_infected {
            parameters.initial_infected = initial_infected;
        }
        if let Some(days) = self.days {
            parameters.days = days;
        }
        if let Some(recovery_rate) = self.recovery_rate {
            parameters.recovery_rate = recovery_rate;
        }
        parameters
    }
}
