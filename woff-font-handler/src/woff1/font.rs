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

//! WOFF1 font model.
//!
//! An in-memory representation of a WOFF font: flavor, version, ordered
//! tables, the metadata tree, and private data. The model mediates between
//! the reader and the writer; a font is built empty or from an existing
//! file, mutated through its accessors, and handed to
//! [`save`](Woff1Font::save) to produce bytes.

use std::io::{Read, Seek, Write};

use super::{
    metadata::XmlElement,
    order::{apply_table_order, recommended_table_order},
    reader::{ChecksumPolicy, Woff1Reader},
    writer::{Woff1Writer, Woff1WriterOptions},
};
use crate::{
    compression::CompressionLevel,
    data::Data,
    error::{FontIoError, FontSaveError},
    magic::Magic,
    tag::FontTag,
    FontDirectoryEntry, FontTable,
};

/// The compressed form a table arrived with, kept so an unmodified table
/// can be written back without recompressing. Invalidated whenever the
/// table's bytes change.
#[derive(Clone, Debug)]
struct CompressedForm {
    data: Vec<u8>,
    orig_length: u32,
    orig_checksum: u32,
}

/// One table held by the font: its uncompressed bytes, plus the cached
/// compressed form when the table came from a reader.
#[derive(Clone, Debug, Default)]
struct FontTableData {
    data: Data,
    cached: Option<CompressedForm>,
}

/// Options controlling [`Woff1Font::save`].
#[derive(Clone, Copy, Debug)]
pub struct SaveOptions {
    /// The zlib level used for tables and metadata.
    pub compression_level: CompressionLevel,
    /// When `true`, tables that arrived compressed from a reader are
    /// decompressed and recompressed at `compression_level`; when `false`
    /// their stored bytes are reused untouched.
    pub recompress_tables: bool,
    /// Whether to arrange table data in the OTF/OFF suggested optimal
    /// order.
    pub reorder_tables: bool,
    /// Whether to recompute the 'head' table's checkSumAdjustment for the
    /// equivalent sfnt.
    pub recalculate_head_checksum: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            compression_level: CompressionLevel::default(),
            recompress_tables: false,
            reorder_tables: true,
            recalculate_head_checksum: true,
        }
    }
}

/// An in-memory WOFF 1.0 font.
pub struct Woff1Font {
    flavor: u32,
    major_version: u16,
    minor_version: u16,
    /// Tables in insertion (or file) order; write order is derived in
    /// [`tags`](Woff1Font::tags).
    tables: Vec<(FontTag, FontTableData)>,
    table_order: Option<Vec<FontTag>>,
    metadata: Option<XmlElement>,
    private_data: Option<Vec<u8>>,
}

impl Woff1Font {
    /// Creates an empty font with the given flavor and version 0.0.
    pub fn new(flavor: Magic) -> Self {
        Self {
            flavor: flavor as u32,
            major_version: 0,
            minor_version: 0,
            tables: Vec::new(),
            table_order: None,
            metadata: None,
            private_data: None,
        }
    }

    /// Builds a font from an existing WOFF stream. Every table is loaded
    /// and decompressed; the compressed form of each is cached so an
    /// unmodified table round-trips byte-for-byte through
    /// [`save`](Woff1Font::save).
    pub fn from_reader<T: Read + Seek>(
        stream: &mut T,
    ) -> Result<Self, FontIoError> {
        let mut reader = Woff1Reader::new(stream, ChecksumPolicy::Report)?;
        let mut tables = Vec::new();
        for tag in reader.tags() {
            let (entry, stored) = reader.compressed_table(&tag)?;
            let data = if entry.is_compressed() {
                crate::compression::decompress(&stored).map_err(|_| {
                    FontIoError::DecompressionFailed(format!("'{tag}' table"))
                })?
            } else {
                let mut data = stored.clone();
                data.truncate(entry.orig_length() as usize);
                data
            };
            tables.push((
                tag,
                FontTableData {
                    data: Data::new(data),
                    cached: Some(CompressedForm {
                        data: stored,
                        orig_length: entry.orig_length(),
                        orig_checksum: entry.data_checksum(),
                    }),
                },
            ));
        }
        let metadata = match reader.metadata()? {
            Some(bytes) => Some(XmlElement::parse(&bytes)?),
            None => None,
        };
        let private_data = reader.private_data()?;
        let file_order = reader.tags();
        Ok(Self {
            flavor: reader.flavor(),
            major_version: reader.major_version(),
            minor_version: reader.minor_version(),
            tables,
            table_order: Some(file_order),
            metadata,
            private_data,
        })
    }

    /// Returns the flavor tag of the wrapped sfnt.
    pub fn flavor(&self) -> u32 {
        self.flavor
    }

    /// Returns the WOFF file's major version.
    pub fn major_version(&self) -> u16 {
        self.major_version
    }

    /// Returns the WOFF file's minor version.
    pub fn minor_version(&self) -> u16 {
        self.minor_version
    }

    /// Sets the WOFF file's major and minor version.
    pub fn set_version(&mut self, major: u16, minor: u16) {
        self.major_version = major;
        self.minor_version = minor;
    }

    /// Returns all table tags in write order: tags named by a set table
    /// order come first, the rest follow in the OTF/OFF suggested order.
    /// The ordering is stable across calls while the font is unchanged.
    pub fn tags(&self) -> Vec<FontTag> {
        let mut tags = self
            .tables
            .iter()
            .map(|(tag, _)| *tag)
            .collect::<Vec<_>>();
        tags.sort();
        match &self.table_order {
            Some(order) => apply_table_order(tags, order),
            None => recommended_table_order(&tags),
        }
    }

    /// Sets the order in which table data should be written into the font.
    /// A complete order is required if a 'DSIG' table is in the font.
    pub fn set_table_order(&mut self, order: Vec<FontTag>) {
        self.table_order = Some(order);
    }

    /// Checks if the font contains a specific table.
    pub fn contains_table(&self, tag: &FontTag) -> bool {
        self.tables.iter().any(|(existing, _)| existing == tag)
    }

    /// Returns the uncompressed bytes of the named table.
    pub fn table_bytes(&self, tag: &FontTag) -> Option<&[u8]> {
        self.tables
            .iter()
            .find(|(existing, _)| existing == tag)
            .map(|(_, table)| table.data.data())
    }

    /// Adds or replaces a table. Replacing a table discards any cached
    /// compressed form it arrived with.
    pub fn set_table_bytes(&mut self, tag: FontTag, data: Vec<u8>) {
        let table = FontTableData {
            data: Data::new(data),
            cached: None,
        };
        if let Some(existing) = self
            .tables
            .iter_mut()
            .find(|(existing, _)| *existing == tag)
        {
            existing.1 = table;
        } else {
            self.tables.push((tag, table));
        }
    }

    /// Removes a table, returning whether it was present.
    pub fn remove_table(&mut self, tag: &FontTag) -> bool {
        let before = self.tables.len();
        self.tables.retain(|(existing, _)| existing != tag);
        self.tables.len() != before
    }

    /// Returns the metadata tree, if the font has one.
    pub fn metadata(&self) -> Option<&XmlElement> {
        self.metadata.as_ref()
    }

    /// Sets the metadata tree.
    pub fn set_metadata(&mut self, metadata: XmlElement) {
        self.metadata = Some(metadata);
    }

    /// Removes the metadata tree.
    pub fn clear_metadata(&mut self) {
        self.metadata = None;
    }

    /// Returns the private data block, if the font has one.
    pub fn private_data(&self) -> Option<&[u8]> {
        self.private_data.as_deref()
    }

    /// Sets the private data block.
    pub fn set_private_data(&mut self, data: Vec<u8>) {
        self.private_data = Some(data);
    }

    /// Writes the font as a WOFF file into the given sink.
    ///
    /// A font carrying a 'DSIG' table can only be saved with a complete
    /// caller-supplied table order, `reorder_tables` disabled, and
    /// `recalculate_head_checksum` disabled; the signature would otherwise
    /// be invalidated by the relayout.
    pub fn save<W: Write>(
        &self,
        dest: W,
        options: &SaveOptions,
    ) -> Result<W, FontIoError> {
        let tags = self.tags();
        if self.contains_table(&FontTag::DSIG) {
            let complete = self.table_order.as_ref().is_some_and(|order| {
                let mut ordered = order.clone();
                let mut present = tags.clone();
                ordered.sort();
                ordered.dedup();
                present.sort();
                ordered == present
            });
            if !complete
                || options.reorder_tables
                || options.recalculate_head_checksum
            {
                return Err(FontSaveError::DsigRequiresFixedLayout.into());
            }
        }
        let mut writer = Woff1Writer::new(
            dest,
            tags.len() as u16,
            Woff1WriterOptions {
                flavor: self.flavor,
                major_version: self.major_version,
                minor_version: self.minor_version,
                compression_level: options.compression_level,
                recalculate_head_checksum: options.recalculate_head_checksum,
                reorder_tables: options.reorder_tables,
            },
        );
        for tag in &tags {
            let table = &self
                .tables
                .iter()
                .find(|(existing, _)| existing == tag)
                .ok_or(FontIoError::TableNotFound(*tag))?
                .1;
            match (&table.cached, options.recompress_tables) {
                (Some(cached), false) => writer.set_table_precompressed(
                    *tag,
                    cached.data.clone(),
                    cached.orig_length,
                    cached.orig_checksum,
                )?,
                _ => writer
                    .set_table(*tag, table.data.data().to_vec())?,
            }
        }
        if let Some(metadata) = &self.metadata {
            writer.set_metadata_tree(metadata)?;
        }
        if let Some(private_data) = &self.private_data {
            writer.set_private_data(private_data.clone());
        }
        writer.close()
    }
}

#[cfg(test)]
#[path = "font_test.rs"]
mod tests;
