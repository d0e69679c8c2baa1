use thiserror::Error;

pub type StockGymResult<T> = Result<T, StockGymError>;

#[derive(Debug, Error)]
pub enum StockGymError {
    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Env(#[from] EnvError),

    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error(transparent)]
    System(#[from] SystemError),
}

/// Errors occurring within agent logic or execution.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Invalid input to agent: {0}")]
    InvalidInput(String),
}

/// Errors related to market data, alignment, and domain types.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Aligned history too short: {rows} rows, need at least {min} to step once")]
    InsufficientHistory { rows: usize, min: usize },

    #[error("Record/indicator misalignment: {records} records vs {indicators} indicator rows")]
    MisalignedHistory { records: usize, indicators: usize },

    #[error("Corrupt closing price {0}: NAV must be strictly positive")]
    CorruptClosePrice(f64),

    #[error("Invalid symbol string: '{0}'")]
    InvalidSymbol(String),
}

/// Errors related to the gym environment lifecycle and its inputs.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("Invalid environment state: {0}")]
    InvalidState(String),

    #[error("Invalid action code {0}: expected -1 (sell), 0 (hold) or 1 (buy)")]
    InvalidAction(i8),

    #[error("Invalid episode capital {0}: must be strictly positive")]
    InvalidCapital(f64),
}

/// Errors surfaced by a price feed before the episode begins.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Feed returned no records for '{symbol}' in the requested range")]
    EmptyFetch { symbol: String },

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: String, end: String },

    #[error("Unknown symbol '{0}' for this feed")]
    UnknownSymbol(String),

    #[error("Provider failure: {0}")]
    Provider(String),
}

/// Errors related to internal invariants. Seeing one of these is a bug.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(String),
}
