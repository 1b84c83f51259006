use crate::error::{ProtocolError, Result};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{Read, Write};

/// Largest uncompressed body a peer may declare (8 MiB).
pub const MAX_UNCOMPRESSED_SIZE: usize = 8 * 1024 * 1024;

/// Compresses `data` into a zlib stream.
///
/// # Errors
/// Returns `ProtocolError::CompressionFailure` if the encoder fails
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(data.len() / 2), Compression::default());
    encoder
        .write_all(data)
        .map_err(|_| ProtocolError::CompressionFailure)?;
    encoder.finish().map_err(|_| ProtocolError::CompressionFailure)
}

/// Inflates a zlib stream that must expand to exactly `expected_size` bytes.
///
/// The output is capped at `MAX_UNCOMPRESSED_SIZE` and at `expected_size + 1`
/// so a lying peer cannot make us allocate more than it declared.
///
/// # Errors
/// Returns `ProtocolError::DecompressionFailure` if:
/// - the stream is corrupt
/// - the declared size exceeds `MAX_UNCOMPRESSED_SIZE`
/// - the inflated size differs from `expected_size`
pub fn decompress_exact(data: &[u8], expected_size: usize) -> Result<Vec<u8>> {
    if expected_size > MAX_UNCOMPRESSED_SIZE {
        return Err(ProtocolError::DecompressionFailure);
    }

    let mut out = Vec::with_capacity(expected_size);
    ZlibDecoder::new(data)
        .take(expected_size as u64 + 1)
        .read_to_end(&mut out)
        .map_err(|_| ProtocolError::DecompressionFailure)?;

    if out.len() != expected_size {
        return Err(ProtocolError::DecompressionFailure);
    }
    Ok(out)
}

/// Compress `data` when it is at least `threshold` bytes long.
/// Returns the output bytes and a flag indicating whether compression was applied.
pub fn maybe_compress(data: &[u8], threshold: usize) -> Result<(Vec<u8>, bool)> {
    if data.len() >= threshold {
        Ok((compress(data)?, true))
    } else {
        Ok((data.to_vec(), false))
    }
}
