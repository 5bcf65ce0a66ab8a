use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Named parameter presets for a country of 50 million people.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    /// Typical observed Korean trend, R around 0.8.
    KoreaTrend,
    Spreading,
    Extreme,
    FullControl,
}

/// The fields a scenario overrides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub reproduction_number: f64,
    pub population: u64,
    pub initial_infected: u64,
}

const PRESET_POPULATION: u64 = 50_000_000;

impl Scenario {
    pub fn preset(self) -> Preset {
        let (reproduction_number, initial_infected) = match self {
            Scenario::KoreaTrend => (0.8, 1_000),
            Scenario::Spreading => (1.3, 5_000),
            Scenario::Extreme => (2.0, 10_000),
            Scenario::FullControl => (0.5, 500),
        };
        Preset {
            reproduction_number,
            population: PRESET_POPULATION,
            initial_infected,
        }
    }
}
