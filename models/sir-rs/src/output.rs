use serde::Serialize;
use sha2::{Digest, Sha256};

/// Lower bound of [`SimulationResult::axis_ceiling`], so small epidemics keep a readable scale.
pub const MIN_AXIS_CEILING: f64 = 100.0;

/// Number of trailing days considered by the axis ceiling.
pub const DEFAULT_AXIS_WINDOW: usize = 30;

/// Day-indexed compartment sizes, `days + 1` entries per series.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    population: u64,
    susceptible: Vec<f64>,
    infected: Vec<f64>,
    recovered: Vec<f64>,
    cumulative_cases: Vec<f64>,
}

/// One day of a [`SimulationResult`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DaySnapshot {
    pub day: usize,
    pub susceptible: f64,
    pub infected: f64,
    pub recovered: f64,
    pub cumulative_cases: f64,
    pub attack_rate_percent: f64,
}

impl SimulationResult {
    pub(crate) fn with_capacity(population: u64, len: usize) -> SimulationResult {
        SimulationResult {
            population,
            susceptible: Vec::with_capacity(len),
            infected: Vec::with_capacity(len),
            recovered: Vec::with_capacity(len),
            cumulative_cases: Vec::with_capacity(len),
        }
    }

    pub(crate) fn push(&mut self, susceptible: f64, infected: f64, recovered: f64) {
        self.susceptible.push(susceptible);
        self.infected.push(infected);
        self.recovered.push(recovered);
        self.cumulative_cases.push(infected + recovered);
    }

    pub fn population(&self) -> u64 {
        self.population
    }

    /// Index of the last simulated day.
    pub fn days(&self) -> usize {
        self.susceptible.len() - 1
    }

    pub fn susceptible(&self) -> &[f64] {
        &self.susceptible
    }

    pub fn infected(&self) -> &[f64] {
        &self.infected
    }

    pub fn recovered(&self) -> &[f64] {
        &self.recovered
    }

    pub fn cumulative_cases(&self) -> &[f64] {
        &self.cumulative_cases
    }

    /// Cumulative cases on `day` as a percentage of the population.
    ///
    /// # Panics
    /// If `day` is past the last simulated day.
    pub fn attack_rate_percent(&self, day: usize) -> f64 {
        self.cumulative_cases[day] / self.population as f64 * 100.0
    }

    pub fn attack_rate_series(&self) -> Vec<f64> {
        (0..=self.days())
            .map(|day| self.attack_rate_percent(day))
            .collect()
    }

    pub fn snapshot(&self, day: usize) -> Option<DaySnapshot> {
        (day <= self.days()).then(|| self.snapshot_at(day))
    }

    pub fn final_snapshot(&self) -> DaySnapshot {
        self.snapshot_at(self.days())
    }

    fn snapshot_at(&self, day: usize) -> DaySnapshot {
        DaySnapshot {
            day,
            susceptible: self.susceptible[day],
            infected: self.infected[day],
            recovered: self.recovered[day],
            cumulative_cases: self.cumulative_cases[day],
            attack_rate_percent: self.attack_rate_percent(day),
        }
    }

    /// Largest infected, recovered or cumulative count over the `window` days ending at `day`,
    /// never below [`MIN_AXIS_CEILING`].
    ///
    /// `day` is clamped to the last simulated day and a zero `window` counts as one day.
    pub fn axis_ceiling(&self, day: usize, window: usize) -> f64 {
        let end = day.min(self.days());
        let start = end.saturating_sub(window.max(1) - 1);
        [
            &self.infected[start..=end],
            &self.recovered[start..=end],
            &self.cumulative_cases[start..=end],
        ]
        .into_iter()
        .flatten()
        .fold(MIN_AXIS_CEILING, |ceiling, &value| ceiling.max(value))
    }

    /// Hex SHA-256 over the bit patterns of every series. Equal digests mean bitwise equal results.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.population.to_le_bytes());
        for series in [
            &self.susceptible,
            &self.infected,
            &self.recovered,
            &self.cumulative_cases,
        ] {
            for value in series {
                hasher.update(value.to_le_bytes());
            }
        }
        hex::encode(hasher.finalize())
    }
}
