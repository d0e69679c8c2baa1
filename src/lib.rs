//! Gym-like trading simulation for a single equity's daily history.
//!
//! The crate is built around one loop: [`gym::Env::reset`] seeds an episode
//! with a fixed amount of capital, [`gym::Env::step`] applies a discrete
//! buy/hold/sell action, and the environment walks the aligned history one
//! session per step until it reaches the most recent day.
//!
//! Market data enters through the [`feed`] boundary, gets turned into an
//! aligned record/indicator table by [`sim::data::SimulationData`], and is
//! then shared read-only with the environment.

mod macros;

pub mod agent;
pub mod data;
pub mod error;
pub mod feed;
pub mod gym;
pub mod math;
pub mod prelude;
pub mod report;
pub mod sim;

pub use error::{StockGymError, StockGymResult};
pub use gym::trading::env::Environment;
