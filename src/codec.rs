//! Fixed-width float vector encoding.
//!
//! A vector of `L` components is stored as `4 * L` bytes of little-endian
//! IEEE-754 single precision values, with no length prefix. This is the blob
//! layout `vec0` expects for a `float[L]` column, so the dimension always has
//! to be known out of band to decode.

use crate::error::{Result, StoreError};

/// Bytes per encoded component
pub const F32_WIDTH: usize = std::mem::size_of::<f32>();

/// Encode a vector into its raw blob form.
pub fn encode(vector: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(vector.len() * F32_WIDTH);
    for value in vector {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

/// Decode a blob of `len` components.
///
/// A `len` whose byte size does not fit in `usize` never matches and is
/// reported with `expected_bytes == usize::MAX`.
pub fn decode(bytes: &[u8], len: usize) -> Result<Vec<f32>> {
    let expected_bytes = len.checked_mul(F32_WIDTH);
    if expected_bytes != Some(bytes.len()) {
        return Err(StoreError::MalformedVector {
            expected_bytes: expected_bytes.unwrap_or(usize::MAX),
            actual_bytes: bytes.len(),
        });
    }

    Ok(bytes
        .chunks_exact(F32_WIDTH)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}

/// Codec bound to a store's embedding dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorCodec {
    dim: usize,
}

impl VectorCodec {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Size in bytes of one encoded vector, `None` if it overflows `usize`
    pub fn blob_len(&self) -> Option<usize> {
        self.dim.checked_mul(F32_WIDTH)
    }

    /// Encode `vector`, rejecting any length other than `dim`.
    ///
    /// `node_id` only labels the error.
    pub fn encode(&self, node_id: &str, vector: &[f32]) -> Result<Vec<u8>> {
        if vector.len() != self.dim {
            return Err(StoreError::encoding(node_id, self.dim, vector.len()));
        }
        Ok(encode(vector))
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<Vec<f32>> {
        decode(bytes, self.dim)
    }
}
