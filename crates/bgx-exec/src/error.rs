use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    /// An executor cannot start with nowhere to go.  Detected at
    /// construction; every later configuration fault deactivates instead.
    #[error("phase table is empty")]
    EmptyPhaseTable,
}

pub type ExecResult<T> = Result<T, ExecError>;
