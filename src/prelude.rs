// 1. Traits
pub use crate::agent::Agent;
pub use crate::feed::PriceFeed;
pub use crate::gym::Env;
pub use crate::math::indicator::StreamingIndicator;

// 2. The Core "Loop" Types
pub use crate::gym::trading::{action::Action, env::Environment, ledger::Ledger};
pub use crate::gym::{EnvStatus, Reward, Step, StepOutcome};
pub use crate::report::EpisodeReport;

// 3. Financial Domain Types
pub use crate::data::domain::{Cash, Price, Quantity, Symbol, Volume};
pub use crate::data::record::DailyRecord;

// 4. Data Configurations
pub use crate::data::indicator::{
    Band, BollingerWindow, IndicatorConfig, IndicatorRow, MacdValue, MacdWindows, RsiWindow,
};
pub use crate::sim::data::SimulationData;

// 5. Errors
pub use crate::error::{
    AgentError, DataError, EnvError, FeedError, StockGymError, StockGymResult, SystemError,
};

// 6. Reference Implementations
pub use crate::agent::{macd_cross::MacdCross, noise::NoiseTrader};
pub use crate::feed::memory::InMemoryFeed;
