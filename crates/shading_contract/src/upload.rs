//! Conversion between records and the raw bytes the GPU sees.

use std::mem::size_of;

use bytemuck::{CheckedBitPattern, NoUninit};

use crate::error::{ContractError, Result};
use crate::layout::GpuRecord;
use crate::{FragmentUniforms, Light};

pub fn record_bytes<T: GpuRecord + NoUninit>(record: &T) -> &[u8] {
    bytemuck::bytes_of(record)
}

pub fn slice_bytes<T: GpuRecord + NoUninit>(records: &[T]) -> &[u8] {
    bytemuck::cast_slice(records)
}

/// Reads one record back. `bytes` does not need to be aligned.
pub fn read_record<T: GpuRecord + CheckedBitPattern>(bytes: &[u8]) -> Result<T> {
    if bytes.len() != size_of::<T>() {
        return Err(ContractError::LengthMismatch {
            record: T::NAME,
            stride: size_of::<T>(),
            len: bytes.len(),
        });
    }
    bytemuck::checked::try_pod_read_unaligned(bytes).map_err(|error| {
        ContractError::InvalidBitPattern {
            record: T::NAME,
            error,
        }
    })
}

/// Reads a tightly packed array of records back.
pub fn read_records<T: GpuRecord + CheckedBitPattern>(bytes: &[u8]) -> Result<Vec<T>> {
    let stride = size_of::<T>();
    if bytes.len() % stride != 0 {
        return Err(ContractError::LengthMismatch {
            record: T::NAME,
            stride,
            len: bytes.len(),
        });
    }
    bytes.chunks_exact(stride).map(read_record::<T>).collect()
}

/// Reads the lights a shader would see: the first `light_count` entries of the array.
pub fn read_active_lights(bytes: &[u8], uniforms: &FragmentUniforms) -> Result<Vec<Light>> {
    let count = uniforms.light_count as usize;
    let needed = count * size_of::<Light>();
    if bytes.len() < needed {
        return Err(ContractError::BufferTooShort {
            record: Light::NAME,
            needed,
            len: bytes.len(),
        });
    }
    read_records(&bytes[..needed])
}
