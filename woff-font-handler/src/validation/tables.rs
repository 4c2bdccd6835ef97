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

//! Validation tests for the WOFF table data.

use super::{
    report::Reporter,
    support::{
        find_table, stored_table_bytes, unpack_directory, unpack_header,
        unpack_table_data,
    },
    TestOutcome,
};
use crate::{
    compression::decompress,
    sfnt::checksum::{checksum_adjustment, SfntTableRecord},
    tag::FontTag,
    woff1::{directory::Woff1DirectoryEntry, header::Woff1Header},
    FontDirectoryEntry,
};

/// t-start: table data starts immediately after the directory.
pub(crate) fn test_table_data_start(
    data: &[u8],
    reporter: &mut Reporter,
) -> TestOutcome {
    let Some(header) = unpack_header(data) else {
        return TestOutcome::Continue;
    };
    let Some(directory) = unpack_directory(data) else {
        return TestOutcome::Continue;
    };
    let required_start = Woff1Header::SIZE as u32
        + Woff1DirectoryEntry::SIZE as u32 * header.numTables as u32;
    let Some(start) =
        directory.iter().map(|entry| entry.offset()).min()
    else {
        return TestOutcome::Continue;
    };
    if start != required_start {
        reporter.log_error(format!(
            "The table data does not start ({start}) in the required position ({required_start}).",
        ));
    } else {
        reporter.log_pass("The table data begins in the proper position.");
    }
    TestOutcome::Continue
}

/// t-padding: every table begins on a four-byte boundary, and the sfnt
/// section ends on one; when metadata is the final section, nothing may
/// follow it.
pub(crate) fn test_table_padding(
    data: &[u8],
    reporter: &mut Reporter,
) -> TestOutcome {
    let Some(header) = unpack_header(data) else {
        return TestOutcome::Continue;
    };
    let Some(directory) = unpack_directory(data) else {
        return TestOutcome::Continue;
    };
    for entry in &directory {
        let tag = entry.tag();
        if entry.offset() % 4 != 0 {
            reporter.log_error(format!(
                "The \"{tag}\" table does not begin on a 4-byte boundary.",
            ));
        } else {
            reporter.log_pass(format!(
                "The \"{tag}\" table begins on a proper 4-byte boundary.",
            ));
        }
    }
    // The sfnt section ends at the metadata, the private data, or the end
    // of the file, whichever comes first.
    let sfnt_end = if header.metaOffset != 0 {
        header.metaOffset
    } else if header.privOffset != 0 {
        header.privOffset
    } else {
        header.length
    };
    if sfnt_end % 4 != 0 {
        reporter.log_error("The sfnt data does not end with proper padding.");
    } else {
        reporter.log_pass("The sfnt data ends with proper padding.");
    }
    // Metadata closing the file is written without tail padding; the
    // declared length must land exactly on its end.
    if header.metaOffset != 0
        && header.privOffset == 0
        && header.length != header.metaOffset + header.metaLength
    {
        reporter.log_error(
            "The metadata is the final block but the file does not end immediately after it.",
        );
    }
    TestOutcome::Continue
}

/// t-decompression: every compressed table inflates without error.
pub(crate) fn test_table_decompression(
    data: &[u8],
    reporter: &mut Reporter,
) -> TestOutcome {
    let Some(directory) = unpack_directory(data) else {
        return TestOutcome::Continue;
    };
    let mut should_stop = false;
    for entry in &directory {
        if !entry.is_compressed() {
            continue;
        }
        let tag = entry.tag();
        let inflates = stored_table_bytes(data, entry)
            .map(|stored| decompress(stored).is_ok())
            .unwrap_or(false);
        if inflates {
            reporter.log_pass(format!(
                "The \"{tag}\" table data can be decompressed with zlib.",
            ));
        } else {
            should_stop = true;
            reporter.log_error(format!(
                "The \"{tag}\" table data can not be decompressed with zlib.",
            ));
        }
    }
    if should_stop {
        TestOutcome::Stop
    } else {
        TestOutcome::Continue
    }
}

/// t-origlength: every compressed table inflates to exactly its recorded
/// original length.
pub(crate) fn test_table_original_length(
    data: &[u8],
    reporter: &mut Reporter,
) -> TestOutcome {
    let Some(directory) = unpack_directory(data) else {
        return TestOutcome::Continue;
    };
    let tables = unpack_table_data(data);
    for entry in &directory {
        if !entry.is_compressed() {
            continue;
        }
        let tag = entry.tag();
        let Some(Some(table_data)) = find_table(&tables, &tag) else {
            continue;
        };
        if table_data.len() as u32 != entry.orig_length() {
            reporter.log_error(format!(
                "The \"{tag}\" table directory entry has an original length ({}) that does not match the actual length of the decompressed data ({}).",
                entry.orig_length(),
                table_data.len()
            ));
        } else {
            reporter.log_pass(format!(
                "The \"{tag}\" table directory entry has a proper original length compared to the actual decompressed data.",
            ));
        }
    }
    TestOutcome::Continue
}

/// t-headchecksum: the 'head' table's checkSumAdjustment matches the value
/// derived for the equivalent sfnt file.
pub(crate) fn test_head_checksum_adjustment(
    data: &[u8],
    reporter: &mut Reporter,
) -> TestOutcome {
    let Some(header) = unpack_header(data) else {
        return TestOutcome::Continue;
    };
    let Some(directory) = unpack_directory(data) else {
        return TestOutcome::Continue;
    };
    if !directory.iter().any(|entry| entry.tag() == FontTag::HEAD) {
        reporter.log_warning("The font does not contain a \"head\" table.");
        return TestOutcome::Continue;
    }
    let tables = unpack_table_data(data);
    let head_data = match find_table(&tables, &FontTag::HEAD) {
        Some(Some(head_data)) if head_data.len() >= 12 => head_data,
        _ => {
            reporter
                .log_error("The \"head\" table is not properly structured.");
            return TestOutcome::Continue;
        }
    };
    // The synthesized sfnt keeps the physical order of the WOFF bodies.
    let mut physical = directory.iter().collect::<Vec<_>>();
    physical.sort_by_key(|entry| entry.offset());
    let records = physical
        .iter()
        .map(|entry| SfntTableRecord {
            tag: entry.tag(),
            orig_length: entry.orig_length(),
            orig_checksum: entry.data_checksum(),
        })
        .collect::<Vec<_>>();
    let expected = checksum_adjustment(header.flavor, &records);
    let mut field = [0_u8; 4];
    field.copy_from_slice(&head_data[8..12]);
    let stored = u32::from_be_bytes(field);
    if stored != expected {
        reporter.log_error(format!(
            "The \"head\" table checkSumAdjustment ({stored:#x}) does not match the calculated checkSumAdjustment ({expected:#x}).",
        ));
    } else {
        reporter.log_pass("The \"head\" table checkSumAdjustment is valid.");
    }
    TestOutcome::Continue
}

/// t-dsig: the presence of a 'DSIG' table is worth a warning; signatures
/// can not be verified here.
pub(crate) fn test_dsig(data: &[u8], reporter: &mut Reporter) -> TestOutcome {
    let Some(directory) = unpack_directory(data) else {
        return TestOutcome::Continue;
    };
    if directory.iter().any(|entry| entry.tag() == FontTag::DSIG) {
        reporter.log_warning_info(
            "The font contains a \"DSIG\" table. This can not be validated by this tool.",
            "The signature will be invalidated by any repackaging of the font.",
        );
    } else {
        reporter.log_note("The font does not contain a \"DSIG\" table.");
    }
    TestOutcome::Continue
}
