use bytemuck::checked::CheckedCastError;
use thiserror::Error;

/// Any errors that can be returned from this crate.
#[derive(Error, Debug)]
pub enum ContractError {
    /// A light type tag outside `0..=4`.
    #[error("Unknown light type tag: {0}")]
    UnknownLightType(u32),

    /// Bytes that do not form a valid record, e.g. a bad light type tag.
    #[error("Invalid bit pattern for {record}: {error:?}")]
    InvalidBitPattern {
        record: &'static str,
        error: CheckedCastError,
    },

    /// Byte buffer length is not a whole number of records.
    #[error("{len} bytes is not a multiple of the {record} stride ({stride})")]
    LengthMismatch {
        record: &'static str,
        stride: usize,
        len: usize,
    },

    /// Buffer ends before the records it is said to hold.
    #[error("{record} buffer of {len} bytes is too short, {needed} bytes needed")]
    BufferTooShort {
        record: &'static str,
        needed: usize,
        len: usize,
    },

    /// More lights than the shader-side array can hold.
    #[error("{count} lights exceed the light array capacity of {capacity}")]
    TooManyLights { count: usize, capacity: usize },

    /// A material description could not be built.
    #[error("Material description error: {0}")]
    MaterialDesc(#[from] crate::material::MaterialDescBuilderError),
}

pub type Result<T, E = ContractError> = std::result::Result<T, E>;
