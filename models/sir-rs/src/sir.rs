use log::debug;

use crate::{error::SirError, output::SimulationResult, parameters::SimulationParameters};

pub struct SirModel {}

impl SirModel {
    /// Steps the SIR equations forward one day at a time (explicit Euler).
    ///
    /// Compartments are not clamped: coarse steps with a large `beta` can drive the
    /// infected count below zero, and the result reproduces that.
    pub fn simulate(parameters: &SimulationParameters) -> Result<SimulationResult, SirError> {
        parameters.validate()?;

        let population = parameters.population as f64;
        let beta = parameters.beta();
        let gamma = parameters.recovery_rate;

        let mut output =
            SimulationResult::with_capacity(parameters.population, parameters.days + 1);
        let mut susceptible = (parameters.population - parameters.initial_infected) as f64;
        let mut infected = parameters.initial_infected as f64;
        let mut recovered = 0.0;
        output.push(susceptible, infected, recovered);

        for _ in 1..=parameters.days {
            let new_infections = beta * susceptible * infected / population;
            let new_recoveries = gamma * infected;
            // Keep this operation order; results are compared bit for bit.
            susceptible -= new_infections;
            infected = infected + new_infections - new_recoveries;
            recovered += new_recoveries;
            output.push(susceptible, infected, recovered);
        }

        debug!(
            "simulated {} days with beta {beta}, gamma {gamma}",
            parameters.days
        );
        Ok(output)
    }
}
