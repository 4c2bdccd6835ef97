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

//! Tests for the checkSumAdjustment kernel

use super::*;
use crate::{
    magic::Magic,
    utils::{checksum, table_checksum},
    FontDataWrite,
};

/// Builds the equivalent sfnt byte stream for the given records and table
/// data, with `adjustment` patched into the 'head' table.
fn build_equivalent_sfnt(
    flavor: u32,
    tables: &[(FontTag, Vec<u8>)],
    adjustment: u32,
) -> Vec<u8> {
    let header =
        SfntHeader::synthesized(flavor, tables.len() as u16);
    let mut directory = SfntDirectory::new();
    let mut offset = SfntHeader::SIZE as u32
        + SfntDirectoryEntry::SIZE as u32 * tables.len() as u32;
    for (tag, data) in tables {
        directory.add_entry(SfntDirectoryEntry {
            tag: *tag,
            checkSum: table_checksum(tag, data).0,
            offset,
            length: data.len() as u32,
        });
        offset += align_to_four(data.len() as u32);
    }
    directory.sort_entries(|entry| entry.tag);
    let mut dest = std::io::Cursor::new(Vec::new());
    header.write(&mut dest).unwrap();
    directory.write(&mut dest).unwrap();
    let mut bytes = dest.into_inner();
    for (tag, data) in tables {
        let mut data = data.clone();
        if *tag == FontTag::HEAD {
            data[8..12].copy_from_slice(&adjustment.to_be_bytes());
        }
        let padded = align_to_four(data.len() as u32) as usize;
        data.resize(padded, 0);
        bytes.extend_from_slice(&data);
    }
    bytes
}

fn records_for(tables: &[(FontTag, Vec<u8>)]) -> Vec<SfntTableRecord> {
    tables
        .iter()
        .map(|(tag, data)| SfntTableRecord {
            tag: *tag,
            orig_length: data.len() as u32,
            orig_checksum: table_checksum(tag, data).0,
        })
        .collect()
}

#[test]
fn test_adjustment_satisfies_whole_font_checksum_law() {
    // 'head' plus two ordinary tables, one of them unpadded.
    let mut head = vec![0_u8; 54];
    head[12..16].copy_from_slice(&0x5f0f_3cf5_u32.to_be_bytes());
    let tables = vec![
        (FontTag::HEAD, head),
        (FontTag::new(*b"cmap"), vec![1, 2, 3, 4, 5, 6]),
        (FontTag::new(*b"glyf"), vec![9; 16]),
    ];
    let flavor = Magic::TrueType as u32;
    let adjustment = checksum_adjustment(flavor, &records_for(&tables));
    let sfnt = build_equivalent_sfnt(flavor, &tables, adjustment);
    // With the adjustment in place, the whole-font checksum must come out
    // to the magic constant (the adjustment field counts as zero in the
    // per-table checksum, but its in-file bytes do count here).
    assert_eq!(checksum(&sfnt).0, SFNT_EXPECTED_CHECKSUM);
}

#[test]
fn test_adjustment_single_head_table() {
    let head = vec![0_u8; 54];
    let tables = vec![(FontTag::HEAD, head)];
    let flavor = Magic::TrueType as u32;
    let adjustment = checksum_adjustment(flavor, &records_for(&tables));
    let sfnt = build_equivalent_sfnt(flavor, &tables, adjustment);
    assert_eq!(checksum(&sfnt).0, SFNT_EXPECTED_CHECKSUM);
}

#[test]
fn test_adjustment_depends_on_physical_order() {
    // Swapping the physical order moves the synthesized offsets, so the
    // directory block checksum, and with it the adjustment, changes.
    let tables_a = vec![
        (FontTag::new(*b"aaaa"), vec![1; 5]),
        (FontTag::new(*b"bbbb"), vec![2; 11]),
    ];
    let tables_b = vec![
        (FontTag::new(*b"bbbb"), vec![2; 11]),
        (FontTag::new(*b"aaaa"), vec![1; 5]),
    ];
    let flavor = Magic::TrueType as u32;
    let adjustment_a = checksum_adjustment(flavor, &records_for(&tables_a));
    let adjustment_b = checksum_adjustment(flavor, &records_for(&tables_b));
    assert_ne!(adjustment_a, adjustment_b);
}

#[test]
fn test_adjustment_ignores_stored_adjustment_value() {
    // The head record's checksum is computed with the field zeroed, so
    // whatever was stored there must not leak into the derivation.
    let mut head_a = vec![0_u8; 54];
    let mut head_b = vec![0_u8; 54];
    head_a[8..12].copy_from_slice(&0x1234_5678_u32.to_be_bytes());
    head_b[8..12].copy_from_slice(&0x8765_4321_u32.to_be_bytes());
    let flavor = Magic::OpenType as u32;
    let records_a = records_for(&[(FontTag::HEAD, head_a)]);
    let records_b = records_for(&[(FontTag::HEAD, head_b)]);
    assert_eq!(
        checksum_adjustment(flavor, &records_a),
        checksum_adjustment(flavor, &records_b)
    );
}
