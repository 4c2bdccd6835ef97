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

//! WOFF1 writer.
//!
//! Tables, metadata, and private data are staged in memory; nothing
//! reaches the byte sink until [`close`](Woff1Writer::close), once every
//! offset and the derived header fields are known. The sink itself is
//! returned to the caller, never closed here.

use std::io::Write;

use tracing::debug;

use super::{
    directory::{Woff1Directory, Woff1DirectoryEntry},
    header::Woff1Header,
    metadata::XmlElement,
    order::recommended_table_order,
};
use crate::{
    compression::{compress, decompress, CompressionLevel},
    error::{FontIoError, FontSaveError},
    magic::Magic,
    sfnt::checksum::{checksum_adjustment, SfntTableRecord},
    sfnt::directory::SfntDirectoryEntry,
    sfnt::header::SfntHeader,
    tag::FontTag,
    utils::{align_to_four, table_checksum},
    FontDataWrite,
};

/// The XML declaration every serialized metadata block must begin with.
const XML_DECLARATION: &[u8] = b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>";

/// Construction options for a [`Woff1Writer`].
#[derive(Clone, Copy, Debug)]
pub struct Woff1WriterOptions {
    /// The flavor tag of the wrapped sfnt.
    pub flavor: u32,
    /// Major version of the WOFF file.
    pub major_version: u16,
    /// Minor version of the WOFF file.
    pub minor_version: u16,
    /// The zlib level used for tables and metadata.
    pub compression_level: CompressionLevel,
    /// Whether to recompute the 'head' table's checkSumAdjustment for the
    /// equivalent sfnt before writing. Must be disabled for fonts carrying
    /// a 'DSIG' table.
    pub recalculate_head_checksum: bool,
    /// Whether to arrange table data in the OTF/OFF suggested optimal
    /// order instead of the order the tables were supplied in. Must be
    /// disabled for fonts carrying a 'DSIG' table.
    pub reorder_tables: bool,
}

impl Default for Woff1WriterOptions {
    fn default() -> Self {
        Self {
            flavor: Magic::TrueType as u32,
            major_version: 0,
            minor_version: 0,
            compression_level: CompressionLevel::default(),
            recalculate_head_checksum: true,
            reorder_tables: true,
        }
    }
}

/// One staged table: its directory entry (offset unresolved until close)
/// and the bytes that will be stored for it.
struct StagedTable {
    entry: Woff1DirectoryEntry,
    data: Vec<u8>,
    /// Raw uncompressed 'head' data, held back so checkSumAdjustment can
    /// be patched in before compression.
    deferred_head: Option<Vec<u8>>,
}

struct StagedMetadata {
    data: Vec<u8>,
    meta_orig_length: u32,
}

/// Emits a WOFF 1.0 file into a byte sink.
pub struct Woff1Writer<W: Write> {
    dest: W,
    num_tables: u16,
    options: Woff1WriterOptions,
    tables: Vec<StagedTable>,
    metadata: Option<StagedMetadata>,
    private_data: Option<Vec<u8>>,
}

impl<W: Write> Woff1Writer<W> {
    /// Creates a writer that will emit a font with exactly `num_tables`
    /// tables into `dest`.
    pub fn new(dest: W, num_tables: u16, options: Woff1WriterOptions) -> Self {
        Self {
            dest,
            num_tables,
            options,
            tables: Vec::with_capacity(num_tables as usize),
            metadata: None,
            private_data: None,
        }
    }

    /// Stages a table from its uncompressed data. The data is compressed at
    /// the writer's level; if compression does not shrink it, the raw bytes
    /// are stored instead. Staging a tag twice replaces the earlier table.
    pub fn set_table(
        &mut self,
        tag: FontTag,
        data: Vec<u8>,
    ) -> Result<(), FontIoError> {
        let staged = if self.defers_head(&tag) {
            Self::stage_deferred_head(data)
        } else {
            self.stage_compressed(tag, data)?
        };
        self.replace_or_push(staged);
        Ok(())
    }

    /// Stages a table from an already-compressed form, keeping the supplied
    /// directory-entry fields intact. `data` is stored byte-for-byte; its
    /// length becomes `compLength`. The fields are verified against the
    /// data during [`close`](Woff1Writer::close).
    pub fn set_table_precompressed(
        &mut self,
        tag: FontTag,
        data: Vec<u8>,
        orig_length: u32,
        orig_checksum: u32,
    ) -> Result<(), FontIoError> {
        let comp_length = data.len() as u32;
        let staged = if self.defers_head(&tag) {
            let raw = if comp_length < orig_length {
                decompress(&data).map_err(|_| {
                    FontIoError::DecompressionFailed("'head' table".to_string())
                })?
            } else {
                data
            };
            Self::stage_deferred_head(raw)
        } else {
            StagedTable {
                entry: Woff1DirectoryEntry {
                    tag,
                    offset: 0,
                    compLength: comp_length,
                    origLength: orig_length,
                    origChecksum: orig_checksum,
                },
                data,
                deferred_head: None,
            }
        };
        self.replace_or_push(staged);
        Ok(())
    }

    /// Stages the metadata block from serialized XML. The XML declaration
    /// is prepended if missing, then the result is compressed at the
    /// writer's level. Empty input is ignored.
    pub fn set_metadata(&mut self, data: Vec<u8>) -> Result<(), FontIoError> {
        if data.is_empty() {
            return Ok(());
        }
        let mut data = data;
        if !data.starts_with(b"<?xml") {
            let mut declared =
                Vec::with_capacity(XML_DECLARATION.len() + 1 + data.len());
            declared.extend_from_slice(XML_DECLARATION);
            declared.push(b'\n');
            declared.extend_from_slice(&data);
            data = declared;
        }
        debug!("compressing metadata");
        let meta_orig_length = data.len() as u32;
        let compressed = compress(&data, self.options.compression_level)?;
        self.metadata = Some(StagedMetadata {
            data: compressed,
            meta_orig_length,
        });
        Ok(())
    }

    /// Stages the metadata block from an element tree.
    pub fn set_metadata_tree(
        &mut self,
        tree: &XmlElement,
    ) -> Result<(), FontIoError> {
        self.set_metadata(tree.serialize()?)
    }

    /// Stages the metadata block from its already-compressed form, keeping
    /// the supplied `metaOrigLength` intact.
    pub fn set_metadata_precompressed(
        &mut self,
        data: Vec<u8>,
        meta_orig_length: u32,
    ) {
        if data.is_empty() {
            return;
        }
        self.metadata = Some(StagedMetadata {
            data,
            meta_orig_length,
        });
    }

    /// Stages the private data block. Empty input is ignored.
    pub fn set_private_data(&mut self, data: Vec<u8>) {
        if data.is_empty() {
            return;
        }
        self.private_data = Some(data);
    }

    /// Lays the file out, verifies conformance of every staged entry, and
    /// writes the whole WOFF to the sink, returning the sink.
    pub fn close(mut self) -> Result<W, FontIoError> {
        if self.num_tables == 0 || self.tables.len() != self.num_tables as usize
        {
            return Err(FontSaveError::WrongTableCount {
                expected: self.num_tables,
                found: self.tables.len(),
            }
            .into());
        }
        let have_dsig = self
            .tables
            .iter()
            .any(|staged| staged.entry.tag == FontTag::DSIG);
        if have_dsig
            && (self.options.reorder_tables
                || self.options.recalculate_head_checksum)
        {
            return Err(FontSaveError::DsigRequiresFixedLayout.into());
        }
        if self.options.reorder_tables {
            self.reorder_staged_tables();
        }
        self.resolve_deferred_head()?;
        for staged in &self.tables {
            self.check_table_conformance(staged)?;
        }

        // Body offsets, in physical order, each table padded to four bytes.
        let mut offset = Woff1Header::SIZE as u32
            + Woff1DirectoryEntry::SIZE as u32 * self.num_tables as u32;
        for staged in &mut self.tables {
            staged.entry.offset = offset;
            offset += align_to_four(staged.entry.compLength);
        }
        let table_data_end = offset;

        let mut header = Woff1Header {
            flavor: self.options.flavor,
            numTables: self.num_tables,
            majorVersion: self.options.major_version,
            minorVersion: self.options.minor_version,
            totalSfntSize: SfntHeader::SIZE as u32
                + SfntDirectoryEntry::SIZE as u32 * self.num_tables as u32
                + self.tables.iter().fold(0_u32, |sum, staged| {
                    sum + align_to_four(staged.entry.origLength)
                }),
            ..Woff1Header::default()
        };
        let mut length = table_data_end;
        if let Some(metadata) = &self.metadata {
            header.metaOffset = table_data_end;
            header.metaLength = metadata.data.len() as u32;
            header.metaOrigLength = metadata.meta_orig_length;
            length += header.metaLength;
            if self.private_data.is_some() {
                // Metadata is padded to four bytes only when private data
                // follows it; as the final section it ends the file exactly.
                length += align_to_four(header.metaLength) - header.metaLength;
            }
        }
        if let Some(private_data) = &self.private_data {
            header.privOffset = length;
            header.privLength = private_data.len() as u32;
            length += header.privLength;
        }
        header.length = length;

        // Emission: header, tag-sorted directory, bodies in physical order
        // with zero gap bytes, then metadata and private data.
        header.write(&mut self.dest)?;
        let mut directory = Woff1Directory::new();
        for staged in &self.tables {
            directory.add_entry(staged.entry);
        }
        directory.sort_entries(|entry| entry.tag);
        directory.write(&mut self.dest)?;
        for staged in &self.tables {
            debug!("writing '{}' table", staged.entry.tag);
            self.dest
                .write_all(&staged.data)
                .map_err(FontIoError::FailedToWriteTableData)?;
            let padding = align_to_four(staged.entry.compLength)
                - staged.entry.compLength;
            if padding > 0 {
                self.dest
                    .write_all(&vec![0; padding as usize])
                    .map_err(FontIoError::FailedToWriteTableData)?;
            }
        }
        if let Some(metadata) = &self.metadata {
            debug!("writing metadata");
            self.dest
                .write_all(&metadata.data)
                .map_err(FontIoError::FailedToWriteFontData)?;
            if self.private_data.is_some() {
                let padding = align_to_four(header.metaLength)
                    - header.metaLength;
                if padding > 0 {
                    self.dest
                        .write_all(&vec![0; padding as usize])
                        .map_err(FontIoError::FailedToWriteFontData)?;
                }
            }
        }
        if let Some(private_data) = &self.private_data {
            debug!("writing private data");
            self.dest
                .write_all(private_data)
                .map_err(FontIoError::FailedToWriteFontData)?;
        }
        Ok(self.dest)
    }

    fn defers_head(&self, tag: &FontTag) -> bool {
        self.options.recalculate_head_checksum && *tag == FontTag::HEAD
    }

    fn stage_deferred_head(data: Vec<u8>) -> StagedTable {
        StagedTable {
            entry: Woff1DirectoryEntry {
                tag: FontTag::HEAD,
                offset: 0,
                compLength: 0,
                origLength: data.len() as u32,
                origChecksum: table_checksum(&FontTag::HEAD, &data).0,
            },
            data: Vec::new(),
            deferred_head: Some(data),
        }
    }

    fn stage_compressed(
        &self,
        tag: FontTag,
        data: Vec<u8>,
    ) -> Result<StagedTable, FontIoError> {
        debug!("compressing '{}' table", tag);
        let orig_length = data.len() as u32;
        let orig_checksum = table_checksum(&tag, &data).0;
        let compressed = compress(&data, self.options.compression_level)?;
        let (comp_length, stored) = if compressed.len() >= data.len() {
            (orig_length, data)
        } else {
            (compressed.len() as u32, compressed)
        };
        Ok(StagedTable {
            entry: Woff1DirectoryEntry {
                tag,
                offset: 0,
                compLength: comp_length,
                origLength: orig_length,
                origChecksum: orig_checksum,
            },
            data: stored,
            deferred_head: None,
        })
    }

    fn replace_or_push(&mut self, staged: StagedTable) {
        if let Some(existing) = self
            .tables
            .iter_mut()
            .find(|existing| existing.entry.tag == staged.entry.tag)
        {
            *existing = staged;
        } else {
            self.tables.push(staged);
        }
    }

    fn reorder_staged_tables(&mut self) {
        let tags = self
            .tables
            .iter()
            .map(|staged| staged.entry.tag)
            .collect::<Vec<_>>();
        let order = recommended_table_order(&tags);
        self.tables.sort_by_key(|staged| {
            order
                .iter()
                .position(|tag| *tag == staged.entry.tag)
                .unwrap_or(usize::MAX)
        });
    }

    /// With all other entries known, derives checkSumAdjustment for the
    /// equivalent sfnt, patches it into the held-back 'head' data, and
    /// compresses the table.
    fn resolve_deferred_head(&mut self) -> Result<(), FontIoError> {
        let Some(index) = self
            .tables
            .iter()
            .position(|staged| staged.deferred_head.is_some())
        else {
            return Ok(());
        };
        debug!("updating head checkSumAdjustment");
        let records = self
            .tables
            .iter()
            .map(|staged| SfntTableRecord {
                tag: staged.entry.tag,
                orig_length: staged.entry.origLength,
                orig_checksum: staged.entry.origChecksum,
            })
            .collect::<Vec<_>>();
        let adjustment =
            checksum_adjustment(self.options.flavor, &records);
        let mut data = match self.tables[index].deferred_head.take() {
            Some(data) => data,
            None => return Ok(()),
        };
        if data.len() < 12 {
            return Err(FontSaveError::ConformanceFailure {
                tag: FontTag::HEAD,
                reason: "the table is too short to hold checkSumAdjustment"
                    .to_string(),
            }
            .into());
        }
        data[8..12].copy_from_slice(&adjustment.to_be_bytes());
        let staged = self.stage_compressed(FontTag::HEAD, data)?;
        self.tables[index] = staged;
        Ok(())
    }

    /// Directory entries staged from a precompressed form carry
    /// caller-supplied lengths and checksums; every entry is re-verified
    /// against its actual data before anything is written.
    fn check_table_conformance(
        &self,
        staged: &StagedTable,
    ) -> Result<(), FontIoError> {
        let entry = &staged.entry;
        debug!("checking conformance of '{}' table", entry.tag);
        if entry.compLength > entry.origLength {
            return Err(FontSaveError::ConformanceFailure {
                tag: entry.tag,
                reason: format!(
                    "compLength ({}) is larger than origLength ({})",
                    entry.compLength, entry.origLength
                ),
            }
            .into());
        }
        let orig_data = if entry.is_compressed() {
            decompress(&staged.data).map_err(|_| {
                FontSaveError::ConformanceFailure {
                    tag: entry.tag,
                    reason: "the table data can not be decompressed"
                        .to_string(),
                }
            })?
        } else {
            staged.data.clone()
        };
        if orig_data.len() as u32 != entry.origLength {
            return Err(FontSaveError::ConformanceFailure {
                tag: entry.tag,
                reason: format!(
                    "origLength ({}) does not match the actual length of the data ({})",
                    entry.origLength,
                    orig_data.len()
                ),
            }
            .into());
        }
        let computed = table_checksum(&entry.tag, &orig_data).0;
        if computed != entry.origChecksum {
            return Err(FontSaveError::ConformanceFailure {
                tag: entry.tag,
                reason: format!(
                    "origChecksum ({:#010x}) does not match the checksum of the data ({computed:#010x})",
                    entry.origChecksum
                ),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "writer_test.rs"]
mod tests;
