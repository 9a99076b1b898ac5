use thiserror::Error;

#[derive(Debug, Error)]
pub enum InflowError {
    #[error("demand profile has no intervals")]
    EmptyProfile,

    #[error("{ticks} steps cannot be split into {intervals} equal demand intervals")]
    UnevenIntervals { ticks: u64, intervals: usize },

    #[error("demand in interval {interval} is zero; the fixed policy needs at least 1")]
    ZeroDemand { interval: usize },

    #[error(
        "interval {interval} has {interval_ticks} steps, not a multiple of its demand {demand}"
    )]
    UnevenDemand { interval: usize, demand: u32, interval_ticks: u64 },

    #[error("demand parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type InflowResult<T> = Result<T, InflowError>;
