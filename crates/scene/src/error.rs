use thiserror::Error;

/// Any errors that can be returned from this crate.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Error from shading contract: {0}")]
    ContractError(#[from] shading_contract::ContractError),

    /// The slot's previous submission has not been retired by the GPU yet.
    #[error("Frame slot {0} is still in flight")]
    FrameInFlight(usize),

    #[error("Frame slot {slot} is {state}, expected {expected}")]
    FrameState {
        slot: usize,
        state: &'static str,
        expected: &'static str,
    },

    #[error("Frame slot {0} does not exist")]
    UnknownFrame(usize),
}

pub type Result<T> = std::result::Result<T, SceneError>;
