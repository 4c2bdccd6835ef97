// Copyright 2025 Monotype Imaging Inc.
//
//  Licensed under the Apache License, Version 2.0 (the "License");
//  you may not use this file except in compliance with the License.
//  You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.

//! Compression support for fonts, via zlib (the flate2 library).
//!
//! WOFF 1.0 compresses each table, and the metadata block, as an
//! independent zlib stream; there is no streaming interface here because
//! inputs are bounded by the (small) file size.
//!
//! ```rust
//! use woff_font_handler::compression::{
//!     compress, decompress, CompressionLevel,
//! };
//!
//! let data = b"Hello, world! Hello, world! Hello, world!";
//! let compressed = compress(data, CompressionLevel::default()).unwrap();
//! let original = decompress(&compressed).unwrap();
//! assert_eq!(data.as_slice(), original.as_slice());
//! ```

use std::io::Write;

/// Errors related to compression.
#[derive(Debug, thiserror::Error)]
pub enum CompressionError {
    /// The requested compression level is outside the valid range.
    #[error("Invalid zlib compression level ({0}); must be between 1 and 9")]
    InvalidLevel(u32),
    /// The input is not a valid zlib stream.
    #[error("The data is not a valid zlib stream")]
    MalformedStream,
    /// An error occurred while reading or writing data.
    #[error(transparent)]
    StdIoError(#[from] std::io::Error),
}

/// A zlib compression level, restricted to the 1..=9 range the WOFF
/// specification allows. The default is 9, the highest compression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompressionLevel(u32);

impl CompressionLevel {
    /// Creates a new compression level, failing if the value is outside
    /// 1..=9.
    pub fn new(level: u32) -> Result<Self, CompressionError> {
        if (1..=9).contains(&level) {
            Ok(Self(level))
        } else {
            Err(CompressionError::InvalidLevel(level))
        }
    }

    /// Returns the numeric level.
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        Self(9)
    }
}

/// Compresses the given data as a zlib stream at the given level.
pub fn compress(
    data: &[u8],
    level: CompressionLevel,
) -> Result<Vec<u8>, CompressionError> {
    let mut encoder = flate2::write::ZlibEncoder::new(
        Vec::new(),
        flate2::Compression::new(level.value()),
    );
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Decompresses the given zlib stream.
///
/// A corrupt or truncated stream fails with
/// [`CompressionError::MalformedStream`], which callers distinguish from
/// plain I/O failures.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, CompressionError> {
    let mut decoder = flate2::write::ZlibDecoder::new(Vec::new());
    decoder
        .write_all(data)
        .map_err(|_| CompressionError::MalformedStream)?;
    decoder
        .finish()
        .map_err(|_| CompressionError::MalformedStream)
}

#[cfg(test)]
#[path = "compression_test.rs"]
mod tests;
