//! Deterministic SIR epidemic curves for a chosen reproduction number.
//!
//! [`SirModel::simulate`] turns [`SimulationParameters`] into an immutable
//! [`SimulationResult`]; [`Playback`] walks it day by day and [`Summary`] reports its
//! peaks. Nothing here draws or animates anything.

pub mod error;
pub mod output;
pub mod parameters;
pub mod playback;
pub mod scenario;
pub mod sir;
pub mod summary;

pub use error::SirError;
pub use output::{DEFAULT_AXIS_WINDOW, DaySnapshot, SimulationResult};
pub use parameters::{ModelInput, SimulationParameters};
pub use playback::Playback;
pub use scenario::Scenario;
pub use sir::SirModel;
pub use summary::{Summary, Trend};
