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

//! Raw-slice unpacking helpers shared by the validation tests.
//!
//! Every test in the pipeline works from the original byte slice; nothing
//! here materializes a font model. Helpers return `None` when the slice is
//! too short, letting each test decide how to report the condition.

use std::io::Cursor;

use crate::{
    compression::decompress,
    tag::FontTag,
    woff1::{
        directory::{Woff1Directory, Woff1DirectoryEntry},
        header::Woff1Header,
    },
    FontDataRead, FontDirectory, FontDirectoryEntry,
};

/// Unpacks the 44-byte WOFF header from the start of the slice.
pub(crate) fn unpack_header(data: &[u8]) -> Option<Woff1Header> {
    Woff1Header::from_reader(&mut Cursor::new(data)).ok()
}

/// Unpacks the table directory declared by the header.
pub(crate) fn unpack_directory(
    data: &[u8],
) -> Option<Vec<Woff1DirectoryEntry>> {
    let header = unpack_header(data)?;
    let mut cursor = Cursor::new(data.get(Woff1Header::SIZE..)?);
    Woff1Directory::from_reader_with_count(
        &mut cursor,
        header.numTables as usize,
    )
    .ok()
    .map(|directory| directory.entries().to_vec())
}

/// Returns the raw stored bytes for the given directory entry, or `None`
/// when the entry points outside the slice.
pub(crate) fn stored_table_bytes<'a>(
    data: &'a [u8],
    entry: &Woff1DirectoryEntry,
) -> Option<&'a [u8]> {
    let start = entry.offset() as usize;
    let end = start.checked_add(entry.comp_length() as usize)?;
    data.get(start..end)
}

/// Unpacks every table's uncompressed data, keyed by tag. A table whose
/// stored form cannot be read or inflated maps to `None`; the
/// decompression tests own reporting those.
pub(crate) fn unpack_table_data(
    data: &[u8],
) -> Vec<(FontTag, Option<Vec<u8>>)> {
    let Some(directory) = unpack_directory(data) else {
        return Vec::new();
    };
    directory
        .iter()
        .map(|entry| {
            let unpacked = stored_table_bytes(data, entry).and_then(|stored| {
                if entry.is_compressed() {
                    decompress(stored).ok()
                } else {
                    Some(
                        stored
                            .get(..entry.orig_length() as usize)
                            .unwrap_or(stored)
                            .to_vec(),
                    )
                }
            });
            (entry.tag(), unpacked)
        })
        .collect()
}

/// Looks up one table's uncompressed data from an
/// [`unpack_table_data`] result.
pub(crate) fn find_table<'a>(
    tables: &'a [(FontTag, Option<Vec<u8>>)],
    tag: &FontTag,
) -> Option<&'a Option<Vec<u8>>> {
    tables
        .iter()
        .find(|(existing, _)| existing == tag)
        .map(|(_, data)| data)
}

/// Returns the stored (still compressed) metadata block, or `None` when
/// the header declares none or it lies outside the slice.
pub(crate) fn unpack_compressed_metadata(data: &[u8]) -> Option<&[u8]> {
    let header = unpack_header(data)?;
    if header.metaOffset == 0 || header.metaLength == 0 {
        return None;
    }
    let start = header.metaOffset as usize;
    let end = start.checked_add(header.metaLength as usize)?;
    data.get(start..end)
}

/// Returns the inflated metadata bytes, or `None` when absent or
/// undecompressable.
pub(crate) fn unpack_metadata(data: &[u8]) -> Option<Vec<u8>> {
    decompress(unpack_compressed_metadata(data)?).ok()
}
