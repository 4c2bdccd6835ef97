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

//! Derivation of the 'head' table checkSumAdjustment for the sfnt file
//! equivalent to a WOFF.

use std::num::Wrapping;

use super::{
    directory::{SfntDirectory, SfntDirectoryEntry},
    header::SfntHeader,
};
use crate::{tag::FontTag, utils::align_to_four, FontDataChecksum};

/// The 'head' table's checkSumAdjustment value should be such that the
/// whole-font checksum comes out to this value.
pub(crate) const SFNT_EXPECTED_CHECKSUM: u32 = 0xb1b0afba;

/// One table's contribution to the synthesized sfnt directory: its tag,
/// uncompressed length, and the checksum of its uncompressed data (with the
/// 'head' adjustment field treated as zero).
///
/// Records are supplied in the order the table data would occupy the sfnt
/// file; offsets are assigned from that order, each table padded to a
/// 4-byte boundary.
#[derive(Clone, Copy, Debug)]
pub struct SfntTableRecord {
    /// The table tag.
    pub tag: FontTag,
    /// The uncompressed length of the table data.
    pub orig_length: u32,
    /// The checksum of the uncompressed table data.
    pub orig_checksum: u32,
}

/// Computes the value the 'head' table's checkSumAdjustment field must hold
/// so that the equivalent sfnt file's whole-font checksum comes out to
/// 0xB1B0AFBA.
///
/// The equivalent sfnt is the freshly synthesized header and tag-sorted
/// directory, followed by the uncompressed tables in the given order, each
/// padded to a 4-byte boundary. The adjustment is 0xB1B0AFBA minus the sum
/// of every table's checksum plus the checksum of the header and directory
/// block.
pub fn checksum_adjustment(flavor: u32, tables: &[SfntTableRecord]) -> u32 {
    let num_tables = tables.len() as u16;
    let header = SfntHeader::synthesized(flavor, num_tables);
    let mut directory = SfntDirectory::new();
    let mut offset = SfntHeader::SIZE as u32
        + SfntDirectoryEntry::SIZE as u32 * num_tables as u32;
    for record in tables {
        directory.add_entry(SfntDirectoryEntry {
            tag: record.tag,
            checkSum: record.orig_checksum,
            offset,
            length: record.orig_length,
        });
        offset += align_to_four(record.orig_length);
    }
    // The directory itself is stored sorted by tag; the offsets above keep
    // the supplied physical order.
    directory.sort_entries(|entry| entry.tag);

    let font_cksum = header.checksum()
        + directory.checksum()
        + tables
            .iter()
            .fold(Wrapping(0_u32), |tables_cksum, record| {
                tables_cksum + Wrapping(record.orig_checksum)
            });
    (Wrapping(SFNT_EXPECTED_CHECKSUM) - font_cksum).0
}

#[cfg(test)]
#[path = "checksum_test.rs"]
mod tests;
