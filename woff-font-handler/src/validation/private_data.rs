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

//! Validation test for the WOFF private data block.

use super::{
    report::Reporter,
    support::{unpack_directory, unpack_header},
    TestOutcome,
};
use crate::{
    woff1::{directory::Woff1DirectoryEntry, header::Woff1Header},
    FontDirectoryEntry,
};

/// p-offsetlength: privOffset/privLength are both zero or both set; when
/// set, the block begins on a four-byte boundary immediately after the
/// metadata (or the last table) and lies entirely within the file.
pub(crate) fn test_private_data_offset_and_length(
    data: &[u8],
    reporter: &mut Reporter,
) -> TestOutcome {
    let Some(header) = unpack_header(data) else {
        return TestOutcome::Continue;
    };
    let priv_offset = header.privOffset;
    let priv_length = header.privLength;
    if priv_offset == 0 || priv_length == 0 {
        if priv_offset == 0 && priv_length == 0 {
            reporter.log_pass(
                "The length and offset are appropriately set for empty private data.",
            );
        } else {
            reporter.log_error(format!(
                "The private data offset ({priv_offset}) and private data length ({priv_length}) are not properly set. If one is 0, they both must be 0.",
            ));
        }
        return TestOutcome::Continue;
    }
    if priv_offset % 4 != 0 {
        reporter.log_error(
            "The private data does not begin on a four-byte boundary.",
        );
        return TestOutcome::Continue;
    }
    let Some(directory) = unpack_directory(data) else {
        return TestOutcome::Continue;
    };
    let total_length = header.length as u64;
    let directory_end = Woff1Header::SIZE as u64
        + Woff1DirectoryEntry::SIZE as u64 * header.numTables as u64;
    let mut section_end = directory
        .iter()
        .map(|entry| entry.offset() as u64 + entry.comp_length() as u64)
        .fold(directory_end, u64::max);
    if header.metaOffset != 0 {
        section_end = section_end
            .max(header.metaOffset as u64 + header.metaLength as u64);
    }
    // Widened arithmetic; a hostile directory can push section ends past
    // the u32 range.
    let min_offset = (section_end + 3) & !3_u64;
    let max_length = total_length.saturating_sub(min_offset);
    let offset_error =
        format!("The private data has an invalid offset ({priv_offset}).");
    let length_error =
        format!("The private data has an invalid length ({priv_length}).");
    let priv_offset = priv_offset as u64;
    let priv_length = priv_length as u64;
    if priv_offset < min_offset || priv_offset > total_length {
        reporter.log_error(offset_error);
    } else if priv_offset + priv_length > total_length
        || priv_length > max_length
    {
        reporter.log_error(length_error);
    } else if priv_offset != min_offset {
        reporter.log_error(offset_error);
    } else {
        reporter
            .log_pass("The private data has properly set offset and length.");
    }
    TestOutcome::Continue
}
