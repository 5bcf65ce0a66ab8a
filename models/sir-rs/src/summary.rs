use serde::Serialize;

use crate::{
    output::{DaySnapshot, SimulationResult},
    parameters::SimulationParameters,
};

/// Direction of the epidemic implied by the reproduction number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Spreading,
    Declining,
    Stable,
}

impl Trend {
    pub fn from_reproduction_number(reproduction_number: f64) -> Trend {
        if reproduction_number > 1.0 {
            Trend::Spreading
        } else if reproduction_number < 1.0 {
            Trend::Declining
        } else {
            Trend::Stable
        }
    }
}

/// Headline statistics of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub parameters: SimulationParameters,
    pub trend: Trend,
    pub peak_infected: f64,
    pub peak_infected_day: usize,
    pub peak_cumulative_cases: f64,
    pub peak_attack_rate_percent: f64,
    pub final_day: DaySnapshot,
    pub input_fingerprint: String,
    pub result_digest: String,
}

/// Maximum of `series` and the first day it is reached.
fn peak(series: &[f64]) -> (usize, f64) {
    series
        .iter()
        .enumerate()
        .fold((0, series[0]), |(best_day, best), (day, &value)| {
            if value > best {
                (day, value)
            } else {
                (best_day, best)
            }
        })
}

impl Summary {
    pub fn new(
        parameters: &SimulationParameters,
        result: &SimulationResult,
        input_fingerprint: String,
    ) -> Summary {
        let (peak_infected_day, peak_infected) = peak(result.infected());
        let (_, peak_cumulative_cases) = peak(result.cumulative_cases());
        let (_, peak_attack_rate_percent) = peak(&result.attack_rate_series());
        let final_day = result.final_snapshot();

        Summary {
            parameters: parameters.clone(),
            trend: Trend::from_reproduction_number(parameters.reproduction_number),
            peak_infected,
            peak_infected_day,
            peak_cumulative_cases,
            peak_attack_rate_percent,
            final_day,
            input_fingerprint,
            result_digest: result.digest(),
        }
    }
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::sir::SirModel;

    fn summarize(reproduction_number: f64) -> Summary {
        let parameters = SimulationParameters {
            reproduction_number,
            population: 10_000,
            initial_infected: 10,
            days: 365,
            recovery_rate: 0.1,
        };
        let result = SirModel::simulate(&parameters).unwrap();
        Summary::new(&parameters, &result, "fingerprint".to_string())
    }

    #[test]
    fn test_trend() {
        assert_eq!(Trend::from_reproduction_number(1.3), Trend::Spreading);
        assert_eq!(Trend::from_reproduction_number(0.8), Trend::Declining);
        assert_eq!(Trend::from_reproduction_number(1.0), Trend::Stable);
    }

    #[test]
    fn test_peak_first_occurrence() {
        assert_eq!(peak(&[1.0, 3.0, 2.0, 3.0]), (1, 3.0));
        assert_eq!(peak(&[5.0]), (0, 5.0));
    }

    #[test]
    fn test_spreading_summary() {
        let summary = summarize(2.0);
        assert_eq!(summary.trend, Trend::Spreading);
        assert!(summary.peak_infected_day > 0);
        assert!(summary.peak_infected > 1000.0);
        assert_eq!(summary.peak_cumulative_cases, summary.final_day.cumulative_cases);
        assert_abs_diff_eq!(
            summary.peak_attack_rate_percent,
            summary.peak_cumulative_cases / 100.0,
            epsilon = 1e-9
        );
        assert_eq!(summary.final_day.day, 365);
        assert_eq!(summary.input_fingerprint, "fingerprint");
    }

    #[test]
    fn test_declining_summary() {
        let summary = summarize(0.5);
        assert_eq!(summary.trend, Trend::Declining);
        assert_eq!(summary.peak_infected_day, 0);
        assert_eq!(summary.peak_infected, 10.0);
    }

    #[test]
    fn test_digest_matches_result() {
        let parameters = SimulationParameters::default();
        let result = SirModel::simulate(&parameters).unwrap();
        let summary = Summary::new(&parameters, &result, String::new());
        assert_eq!(summary.result_digest, result.digest());
    }

    #[test]
    fn test_serialize() {
        let value = serde_json::to_value(summarize(1.0)).unwrap();
        assert_eq!(value["trend"], "stable");
        assert_eq!(value["parameters"]["population"], 10_000);
        assert_eq!(value["final_day"]["day"], 365);
    }
}
