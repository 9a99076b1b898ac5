use bl_behavior::BehaviorError;
use bl_core::BlError;
use bl_inflow::InflowError;
use bl_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] BlError),

    #[error("inflow error: {0}")]
    Inflow(#[from] InflowError),

    #[error("spatial index error: {0}")]
    Spatial(#[from] SpatialError),

    #[error("decision error: {0}")]
    Behavior(#[from] BehaviorError),
}

pub type SimResult<T> = Result<T, SimError>;
