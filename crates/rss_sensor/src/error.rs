//! RSS Sensor error types

use contracts::ContractError;
use thiserror::Error;

/// RSS Sensor specific error
#[derive(Debug, Error)]
pub enum RssSensorError {
    /// Listen called on a sensor without a parent vehicle
    #[error("sensor '{sensor_id}' is not attached to a vehicle")]
    NotAttached { sensor_id: String },

    /// Dynamics accessor called while the sensor is unarmed
    #[error("sensor '{sensor_id}' is not listening; no safety checker is armed")]
    NotListening { sensor_id: String },

    /// Ego vehicle could not be resolved in the world at evaluation time
    #[error("sensor '{sensor_id}': ego vehicle not found in world")]
    EgoVehicleMissing { sensor_id: String },

    /// Wrapped ContractError (checker evaluation, translation)
    #[error(transparent)]
    Contract(#[from] ContractError),
}

/// Result alias
pub type Result<T> = std::result::Result<T, RssSensorError>;
