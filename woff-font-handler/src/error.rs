// Copyright 2024-2025 Monotype Imaging Inc.
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

//! Errors related to font I/O.

use super::tag::FontTag;

/// Errors related to font I/O.
#[derive(Debug, thiserror::Error)]
pub enum FontIoError {
    /// A table's recorded checksum does not match its data.
    #[error("Bad checksum for the '{tag}' table; expected {expected:#010x}, got {got:#010x}")]
    ChecksumMismatch {
        /// The table whose checksum failed.
        tag: FontTag,
        /// The checksum recorded in the directory entry.
        expected: u32,
        /// The checksum computed from the table data.
        got: u32,
    },
    /// An error occurred while compressing/decompressing the font data.
    #[error(transparent)]
    CompressionError(#[from] crate::compression::CompressionError),
    /// A zlib-compressed block could not be decompressed.
    #[error("The {0} data can not be decompressed with zlib")]
    DecompressionFailed(String),
    /// Failed to write the font data.
    #[error("Failed to write font data")]
    FailedToWriteFontData(std::io::Error),
    /// Failed to write the font table data.
    #[error("Failed to write font table data")]
    FailedToWriteTableData(std::io::Error),
    /// An error occurred while reading or writing the font data.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    /// The specified size for reading a table directory entry record is
    /// invalid.
    #[error("Invalid size for a table directory entry record, expected {expected} bytes, got {got}")]
    InvalidSizeForDirectoryEntry {
        /// Expected size
        expected: usize,
        /// The actual size specified
        got: usize,
    },
    /// The specified size for reading a directory is not a whole number of
    /// entry records.
    #[error("Invalid size for a table directory, expected a multiple of the entry size, got {0}")]
    InvalidSizeForDirectory(usize),
    /// The specified size for reading a header is invalid.
    #[error("Invalid size for a header, got {0}")]
    InvalidSizeForHeader(usize),
    /// The specified size for reading a tag is invalid.
    #[error("Invalid size for a tag, expected 4 bytes, got {0}")]
    InvalidSizeForTAG(usize),
    /// A block's recorded uncompressed length does not match its data.
    #[error("Length mismatch; expected {expected} bytes, got {got}")]
    LengthMismatch {
        /// The length recorded in the file.
        expected: u32,
        /// The actual length of the decompressed data.
        got: u32,
    },
    /// The file's table directory could not be read.
    #[error("The table directory is not properly structured")]
    MalformedDirectory,
    /// The file is too short to contain a WOFF header.
    #[error("Not a properly formatted WOFF file: the header is truncated")]
    MalformedHeader,
    /// The metadata block is not well-formed XML.
    #[error("The metadata is not well-formed XML: {0}")]
    MalformedMetadata(String),
    /// The file's signature is not 'wOFF'.
    #[error("Not a properly formatted WOFF file: bad signature {0:#010x}")]
    BadSignature(u32),
    /// Save errors.
    #[error("Error saving the font: {0}")]
    SaveError(#[from] FontSaveError),
    /// A requested table does not exist in the font.
    #[error("The font does not contain a '{0}' table")]
    TableNotFound(FontTag),
    /// When determining the type of font, the magic number was not recognized.
    #[error("An unknown magic number was encountered: {0}")]
    UnknownMagic(u32),
}

/// Errors related to saving a font
#[derive(Debug, thiserror::Error)]
pub enum FontSaveError {
    /// A staged directory entry disagrees with the table data it describes.
    #[error("The '{tag}' table entry is not conformant: {reason}")]
    ConformanceFailure {
        /// The offending table.
        tag: FontTag,
        /// What was found to disagree.
        reason: String,
    },
    /// A 'DSIG' table forbids reordering and checksum recomputation, and
    /// requires a complete caller-supplied table order.
    #[error("A font with a 'DSIG' table must be saved with a complete table order, no reordering, and no 'head' checksum recalculation")]
    DsigRequiresFixedLayout,
    /// The number of staged tables does not match the declared count.
    #[error("Wrong number of tables; expected {expected}, found {found}")]
    WrongTableCount {
        /// The count declared when the writer was constructed.
        expected: u16,
        /// The number of tables actually supplied.
        found: usize,
    },
}
