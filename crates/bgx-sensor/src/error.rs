use thiserror::Error;

#[derive(Debug, Error)]
pub enum SensorError {
    #[error("sensor configuration error: {0}")]
    Config(String),
}

pub type SensorResult<T> = Result<T, SensorError>;
