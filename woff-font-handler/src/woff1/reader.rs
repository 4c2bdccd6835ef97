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

//! WOFF1 reader.
//!
//! Loads the header and directory up front; table data, metadata, and
//! private data are fetched from the underlying stream only when asked
//! for, decompressing as needed.

use std::io::{Read, Seek, SeekFrom};

use tracing::{debug, warn};

use super::{
    directory::{Woff1Directory, Woff1DirectoryEntry},
    header::Woff1Header,
};
use crate::{
    compression::decompress,
    error::FontIoError,
    magic::Magic,
    tag::FontTag,
    utils::table_checksum,
    FontDataRead, FontDirectory, FontDirectoryEntry, FontHeader,
};

/// What to do when a table's recorded checksum does not match its
/// decompressed data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChecksumPolicy {
    /// Do not verify checksums.
    Ignore,
    /// Verify, and log a warning on mismatch.
    #[default]
    Report,
    /// Verify, and fail with [`FontIoError::ChecksumMismatch`] on mismatch.
    Enforce,
}

/// Reads the logical components of a WOFF 1.0 file from a seekable byte
/// source. The reader takes ownership of the source and releases it on
/// [`close`](Woff1Reader::close).
#[derive(Debug)]
pub struct Woff1Reader<T: Read + Seek> {
    stream: T,
    header: Woff1Header,
    directory: Woff1Directory,
    policy: ChecksumPolicy,
}

impl<T: Read + Seek> Woff1Reader<T> {
    /// Creates a reader over the given stream, loading and checking the
    /// header and the table directory.
    pub fn new(stream: T, policy: ChecksumPolicy) -> Result<Self, FontIoError> {
        let mut stream = stream;
        stream.seek(SeekFrom::Start(0))?;
        let header = match Woff1Header::from_reader(&mut stream) {
            Ok(header) => header,
            Err(FontIoError::IoError(err))
                if err.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                return Err(FontIoError::MalformedHeader)
            }
            Err(err) => return Err(err),
        };
        if header.signature != Magic::Woff as u32 {
            return Err(FontIoError::BadSignature(header.signature));
        }
        let directory = match Woff1Directory::from_reader_with_count(
            &mut stream,
            header.num_tables() as usize,
        ) {
            Ok(directory) => directory,
            Err(FontIoError::IoError(err))
                if err.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                return Err(FontIoError::MalformedDirectory)
            }
            Err(err) => return Err(err),
        };
        Ok(Self {
            stream,
            header,
            directory,
            policy,
        })
    }

    /// Returns the flavor tag of the wrapped sfnt.
    pub fn flavor(&self) -> u32 {
        self.header.flavor
    }

    /// Returns the WOFF file's major version.
    pub fn major_version(&self) -> u16 {
        self.header.majorVersion
    }

    /// Returns the WOFF file's minor version.
    pub fn minor_version(&self) -> u16 {
        self.header.minorVersion
    }

    /// Returns the WOFF header.
    pub fn header(&self) -> &Woff1Header {
        &self.header
    }

    /// Returns the table directory.
    pub fn directory(&self) -> &Woff1Directory {
        &self.directory
    }

    /// Checks if the file contains a specific table.
    pub fn contains_table(&self, tag: &FontTag) -> bool {
        self.directory.entry(tag).is_some()
    }

    /// Returns all table tags, sorted in ascending order of each table's
    /// data offset, which is the order the table data occupies the file.
    pub fn tags(&self) -> Vec<FontTag> {
        self.directory
            .physical_order()
            .iter()
            .map(|entry| entry.tag())
            .collect()
    }

    /// Fetches the uncompressed data for the named table, reading it from
    /// the stream and inflating if stored compressed.
    ///
    /// Checksum verification follows the reader's [`ChecksumPolicy`].
    pub fn table_data(&mut self, tag: &FontTag) -> Result<Vec<u8>, FontIoError> {
        let entry = *self
            .directory
            .entry(tag)
            .ok_or(FontIoError::TableNotFound(*tag))?;
        debug!("reading '{}' table from disk", tag);
        let stored = self.read_block(entry.offset, entry.compLength)?;
        let data = if entry.is_compressed() {
            decompress(&stored).map_err(|_| {
                FontIoError::DecompressionFailed(format!("'{tag}' table"))
            })?
        } else {
            let mut data = stored;
            data.truncate(entry.origLength as usize);
            data
        };
        if self.policy != ChecksumPolicy::Ignore {
            let computed = table_checksum(tag, &data).0;
            if computed != entry.origChecksum {
                match self.policy {
                    ChecksumPolicy::Report => {
                        warn!("bad checksum for '{}' table", tag);
                    }
                    ChecksumPolicy::Enforce => {
                        return Err(FontIoError::ChecksumMismatch {
                            tag: *tag,
                            expected: entry.origChecksum,
                            got: computed,
                        });
                    }
                    ChecksumPolicy::Ignore => {}
                }
            }
        }
        Ok(data)
    }

    /// Fetches the still-compressed data for the named table, together with
    /// its directory entry. The bytes are exactly as stored in the file; no
    /// decompression or checksum verification is performed.
    pub fn compressed_table(
        &mut self,
        tag: &FontTag,
    ) -> Result<(Woff1DirectoryEntry, Vec<u8>), FontIoError> {
        let entry = *self
            .directory
            .entry(tag)
            .ok_or(FontIoError::TableNotFound(*tag))?;
        let data = self.read_block(entry.offset, entry.compLength)?;
        Ok((entry, data))
    }

    /// Fetches the decompressed metadata XML bytes, if the file has a
    /// metadata block. The inflated length is checked against the header's
    /// `metaOrigLength`.
    pub fn metadata(&mut self) -> Result<Option<Vec<u8>>, FontIoError> {
        if self.header.metaLength == 0 {
            return Ok(None);
        }
        let compressed =
            self.read_block(self.header.metaOffset, self.header.metaLength)?;
        let data = decompress(&compressed).map_err(|_| {
            FontIoError::DecompressionFailed("metadata".to_string())
        })?;
        if data.len() as u32 != self.header.metaOrigLength {
            return Err(FontIoError::LengthMismatch {
                expected: self.header.metaOrigLength,
                got: data.len() as u32,
            });
        }
        Ok(Some(data))
    }

    /// Fetches the metadata block exactly as stored (still compressed),
    /// along with the header's `metaOrigLength` and `metaLength` values.
    pub fn compressed_metadata(
        &mut self,
    ) -> Result<Option<(Vec<u8>, u32, u32)>, FontIoError> {
        if self.header.metaLength == 0 {
            return Ok(None);
        }
        let data =
            self.read_block(self.header.metaOffset, self.header.metaLength)?;
        Ok(Some((
            data,
            self.header.metaOrigLength,
            self.header.metaLength,
        )))
    }

    /// Fetches the private data block, if the file has one.
    pub fn private_data(&mut self) -> Result<Option<Vec<u8>>, FontIoError> {
        if self.header.privLength == 0 {
            return Ok(None);
        }
        let data =
            self.read_block(self.header.privOffset, self.header.privLength)?;
        Ok(Some(data))
    }

    /// Consumes the reader, releasing the underlying stream.
    pub fn close(self) -> T {
        self.stream
    }

    fn read_block(
        &mut self,
        offset: u32,
        length: u32,
    ) -> Result<Vec<u8>, FontIoError> {
        self.stream.seek(SeekFrom::Start(offset as u64))?;
        let mut data = vec![0; length as usize];
        self.stream.read_exact(&mut data)?;
        Ok(data)
    }
}

#[cfg(test)]
#[path = "reader_test.rs"]
mod tests;
