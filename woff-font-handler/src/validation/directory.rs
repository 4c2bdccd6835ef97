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

//! Validation tests for the WOFF table directory.

use super::{
    report::Reporter,
    support::{find_table, unpack_directory, unpack_header, unpack_table_data},
    TestOutcome,
};
use crate::{
    utils::table_checksum,
    woff1::{directory::Woff1DirectoryEntry, header::Woff1Header},
    FontDirectoryEntry,
};

/// d-order: directory entries are stored in ascending order of tag.
pub(crate) fn test_directory_table_order(
    data: &[u8],
    reporter: &mut Reporter,
) -> TestOutcome {
    let Some(directory) = unpack_directory(data) else {
        return TestOutcome::Continue;
    };
    let stored_order =
        directory.iter().map(|entry| entry.tag()).collect::<Vec<_>>();
    let mut sorted_order = stored_order.clone();
    sorted_order.sort();
    if stored_order != sorted_order {
        reporter.log_error(
            "The table directory entries are not stored in alphabetical order.",
        );
    } else {
        reporter.log_pass(
            "The table directory entries are stored in the proper order.",
        );
    }
    TestOutcome::Continue
}

/// d-borders: every entry's offset and length stay between the end of the
/// directory and the end of the file.
pub(crate) fn test_directory_borders(
    data: &[u8],
    reporter: &mut Reporter,
) -> TestOutcome {
    let Some(header) = unpack_header(data) else {
        return TestOutcome::Continue;
    };
    let Some(directory) = unpack_directory(data) else {
        return TestOutcome::Continue;
    };
    let total_length = header.length as u64;
    let min_offset = Woff1Header::SIZE as u64
        + Woff1DirectoryEntry::SIZE as u64 * header.numTables as u64;
    let max_length = total_length.saturating_sub(min_offset);
    let mut should_stop = false;
    for entry in &directory {
        let tag = entry.tag();
        let offset = entry.offset() as u64;
        let length = entry.comp_length() as u64;
        let mut have_error = false;
        if offset < min_offset || offset > total_length {
            reporter.log_error(format!(
                "The \"{tag}\" table directory entry has an invalid offset ({offset}).",
            ));
            have_error = true;
        } else if offset + length > total_length || length > max_length {
            reporter.log_error(format!(
                "The \"{tag}\" table directory entry has an invalid length ({length}).",
            ));
            have_error = true;
        }
        if have_error {
            should_stop = true;
        } else {
            reporter.log_pass(format!(
                "The \"{tag}\" table directory entry has a valid offset and length.",
            ));
        }
    }
    if should_stop {
        TestOutcome::Stop
    } else {
        TestOutcome::Continue
    }
}

/// d-complength: no entry's compressed length exceeds its original length.
pub(crate) fn test_directory_compressed_length(
    data: &[u8],
    reporter: &mut Reporter,
) -> TestOutcome {
    let Some(directory) = unpack_directory(data) else {
        return TestOutcome::Continue;
    };
    for entry in &directory {
        let tag = entry.tag();
        if entry.comp_length() > entry.orig_length() {
            reporter.log_error(format!(
                "The \"{tag}\" table directory entry has a compressed length ({}) larger than the original length ({}).",
                entry.comp_length(),
                entry.orig_length()
            ));
        } else {
            reporter.log_pass(format!(
                "The \"{tag}\" table directory entry has proper compLength and origLength values.",
            ));
        }
    }
    TestOutcome::Continue
}

/// d-checksum: every entry's recorded checksum matches one recomputed from
/// its decompressed data. Tables whose stored form does not decompress are
/// left to the decompression test.
pub(crate) fn test_directory_checksums(
    data: &[u8],
    reporter: &mut Reporter,
) -> TestOutcome {
    let Some(directory) = unpack_directory(data) else {
        return TestOutcome::Continue;
    };
    let tables = unpack_table_data(data);
    for entry in &directory {
        let tag = entry.tag();
        let Some(Some(table_data)) = find_table(&tables, &tag) else {
            continue;
        };
        let stored = entry.data_checksum();
        let computed = table_checksum(&tag, table_data).0;
        if computed != stored {
            reporter.log_error(format!(
                "The \"{tag}\" table directory entry original checksum ({stored:#x}) does not match the checksum ({computed:#x}) calculated from the data.",
            ));
        } else {
            reporter.log_pass(format!(
                "The \"{tag}\" table directory entry original checksum is correct.",
            ));
        }
    }
    TestOutcome::Continue
}
