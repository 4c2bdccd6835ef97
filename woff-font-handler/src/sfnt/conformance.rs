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

//! Conformance checking for plain SFNT streams.
//!
//! The WOFF specification recommends that the sfnt data inside a WOFF be
//! packed a particular way before wrapping: directory in ascending tag
//! order, correct binary-search fields, tables padded to 4-byte boundaries
//! with null pad bytes, no gaps beyond padding, correct checksums. This
//! checker examines a plain sfnt byte stream against those
//! recommendations. Table contents are not examined.

use std::{io::Cursor, num::Wrapping};

use super::{
    directory::{SfntDirectory, SfntDirectoryEntry},
    header::SfntHeader,
};
use crate::{
    sfnt::checksum::SFNT_EXPECTED_CHECKSUM,
    utils::{align_to_four, table_checksum},
    FontDataChecksum, FontDataRead, FontDirectory,
};

/// Checks an sfnt byte stream against the WOFF specification's packing
/// recommendations, returning a message for each problem found. An empty
/// result means the stream is conformant.
pub fn check_sfnt_conformance(data: &[u8]) -> Vec<String> {
    let mut errors = Vec::new();
    let mut cursor = Cursor::new(data);
    let header = match SfntHeader::from_reader(&mut cursor) {
        Ok(header) => header,
        Err(_) => {
            errors.push("The sfnt header is truncated.".to_string());
            return errors;
        }
    };
    let directory = match SfntDirectory::from_reader_with_count(
        &mut cursor,
        header.numTables as usize,
    ) {
        Ok(directory) => directory,
        Err(_) => {
            errors.push("The sfnt table directory is truncated.".to_string());
            return errors;
        }
    };
    let entries = directory.entries();

    // Boundary sanity first; when an offset or length points outside the
    // file, the remaining checks would be reading garbage.
    errors.extend(check_offset_boundaries(data.len(), entries));
    errors.extend(check_length_boundaries(data.len(), entries));
    if !errors.is_empty() {
        return errors;
    }
    errors.extend(check_search_fields(&header));
    errors.extend(check_directory_order(entries));
    errors.extend(check_overlaps(entries));
    errors.extend(check_offset_alignment(entries));
    errors.extend(check_final_table_padding(data.len(), &directory));
    errors.extend(check_gaps(&directory));
    errors.extend(check_gap_after_final_table(data.len(), &directory));
    errors.extend(check_padding_values(data, &directory));
    errors.extend(check_checksums(data, entries));
    errors.extend(check_head_checksum(data, &header, entries));
    errors
}

fn directory_end(num_tables: usize) -> u32 {
    (SfntHeader::SIZE + SfntDirectoryEntry::SIZE * num_tables) as u32
}

fn check_offset_boundaries(
    data_length: usize,
    entries: &[SfntDirectoryEntry],
) -> Vec<String> {
    let min_offset = directory_end(entries.len());
    let mut errors = Vec::new();
    for entry in entries {
        if entry.offset < min_offset || entry.offset as usize > data_length {
            errors.push(format!(
                "The offset to the {} table is not valid.",
                entry.tag
            ));
        }
    }
    errors
}

fn check_length_boundaries(
    data_length: usize,
    entries: &[SfntDirectoryEntry],
) -> Vec<String> {
    let mut errors = Vec::new();
    for entry in entries {
        let end = entry.offset as u64 + entry.length as u64;
        if end > data_length as u64 {
            errors.push(format!(
                "The length of the {} table is not valid.",
                entry.tag
            ));
        }
    }
    errors
}

fn check_search_fields(header: &SfntHeader) -> Vec<String> {
    let (search_range, entry_selector, range_shift) =
        crate::utils::search_range(header.numTables);
    let mut errors = Vec::new();
    if header.searchRange != search_range {
        errors.push("The searchRange value is incorrect.".to_string());
    }
    if header.entrySelector != entry_selector {
        errors.push("The entrySelector value is incorrect.".to_string());
    }
    if header.rangeShift != range_shift {
        errors.push("The rangeShift value is incorrect.".to_string());
    }
    errors
}

fn check_directory_order(entries: &[SfntDirectoryEntry]) -> Vec<String> {
    if entries.windows(2).any(|pair| pair[0].tag > pair[1].tag) {
        vec!["The table directory is not in ascending order.".to_string()]
    } else {
        Vec::new()
    }
}

fn check_overlaps(entries: &[SfntDirectoryEntry]) -> Vec<String> {
    let mut overlaps = Vec::new();
    for entry in entries {
        let start = entry.offset as u64;
        let end = start + entry.length as u64;
        for other in entries {
            if entry.tag == other.tag {
                continue;
            }
            let other_start = other.offset as u64;
            let other_end = other_start + other.length as u64;
            if (start >= other_start && start < other_end)
                || (end > other_start && end <= other_end)
            {
                let mut pair = [entry.tag, other.tag];
                pair.sort();
                if !overlaps.contains(&pair) {
                    overlaps.push(pair);
                }
            }
        }
    }
    overlaps.sort();
    overlaps
        .iter()
        .map(|[first, second]| {
            format!("The tables {first} and {second} overlap.")
        })
        .collect()
}

fn check_offset_alignment(entries: &[SfntDirectoryEntry]) -> Vec<String> {
    let mut errors = Vec::new();
    for entry in entries {
        if entry.offset % 4 != 0 {
            errors.push(format!(
                "The {} table does not begin on a 4-byte boundary.",
                entry.tag
            ));
        }
    }
    errors
}

fn check_final_table_padding(
    data_length: usize,
    directory: &SfntDirectory,
) -> Vec<String> {
    let Some(last) = directory.physical_order().last().copied() else {
        return Vec::new();
    };
    let table_data_length =
        data_length as u64 - directory_end(directory.entries().len()) as u64;
    if table_data_length % 4 != 0 {
        vec![format!(
            "The final table ({}) is not properly padded.",
            last.tag
        )]
    } else {
        Vec::new()
    }
}

fn check_gaps(directory: &SfntDirectory) -> Vec<String> {
    let mut errors = Vec::new();
    let mut previous: Option<(&SfntDirectoryEntry, u64)> = None;
    for entry in directory.physical_order() {
        let padded_end =
            entry.offset as u64 + align_to_four(entry.length) as u64;
        if let Some((previous_entry, previous_end)) = previous {
            if entry.offset as u64 != previous_end {
                errors.push(format!(
                    "Improper padding between the {} and {} tables.",
                    previous_entry.tag, entry.tag
                ));
            }
        }
        previous = Some((entry, padded_end));
    }
    errors
}

fn check_gap_after_final_table(
    data_length: usize,
    directory: &SfntDirectory,
) -> Vec<String> {
    let Some(last) = directory.physical_order().last().copied() else {
        return Vec::new();
    };
    let padded_end = last.offset as u64 + align_to_four(last.length) as u64;
    if data_length as u64 > padded_end {
        vec!["Improper padding at the end of the file.".to_string()]
    } else {
        Vec::new()
    }
}

fn check_padding_values(
    data: &[u8],
    directory: &SfntDirectory,
) -> Vec<String> {
    let mut errors = Vec::new();
    let mut previous_name = "table directory".to_string();
    let mut previous_end = directory_end(directory.entries().len()) as usize;
    for entry in directory.physical_order() {
        let offset = entry.offset as usize;
        if offset > previous_end
            && data[previous_end..offset].iter().any(|byte| *byte != 0)
        {
            errors.push(format!(
                "Bytes between {} and {} are not null.",
                previous_name, entry.tag
            ));
        }
        previous_name = entry.tag.to_string();
        previous_end = offset + entry.length as usize;
    }
    if let Some(last) = directory.physical_order().last() {
        let end = last.offset as usize + last.length as usize;
        if data[end..].iter().any(|byte| *byte != 0) {
            errors.push(format!(
                "Bytes after final table ({}) are not null.",
                last.tag
            ));
        }
    }
    errors
}

fn check_checksums(
    data: &[u8],
    entries: &[SfntDirectoryEntry],
) -> Vec<String> {
    let mut errors = Vec::new();
    for entry in entries {
        let start = entry.offset as usize;
        let end = start + entry.length as usize;
        let computed = table_checksum(&entry.tag, &data[start..end]);
        if computed.0 != entry.checkSum {
            errors
                .push(format!("Invalid checksum for the {} table.", entry.tag));
        }
    }
    errors
}

fn check_head_checksum(
    data: &[u8],
    header: &SfntHeader,
    entries: &[SfntDirectoryEntry],
) -> Vec<String> {
    let Some(head) = entries
        .iter()
        .find(|entry| entry.tag == crate::tag::FontTag::HEAD)
    else {
        return Vec::new();
    };
    let start = head.offset as usize;
    if head.length < 12 {
        return vec!["The head table is not properly structured.".to_string()];
    }
    let mut field = [0_u8; 4];
    field.copy_from_slice(&data[start + 8..start + 12]);
    let stored = u32::from_be_bytes(field);
    // Rebuild the header and directory exactly as a conformant packer
    // would have emitted them, but keep the file's actual offsets.
    let synthesized =
        SfntHeader::synthesized(header.sfntVersion, entries.len() as u16);
    let mut directory = SfntDirectory::new();
    for entry in entries {
        directory.add_entry(*entry);
    }
    directory.sort_entries(|entry| entry.tag);
    let font_cksum = synthesized.checksum()
        + directory.checksum()
        + entries.iter().fold(Wrapping(0_u32), |cksum, entry| {
            cksum + Wrapping(entry.checkSum)
        });
    let expected = (Wrapping(SFNT_EXPECTED_CHECKSUM) - font_cksum).0;
    if stored != expected {
        vec!["The head checkSumAdjustment value is incorrect.".to_string()]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
#[path = "conformance_test.rs"]
mod tests;
