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

//! Validation tests for the WOFF header.

use std::io::Cursor;

use super::{
    report::Reporter,
    support::{unpack_directory, unpack_header},
    TestOutcome,
};
use crate::{
    magic::Magic,
    sfnt::{directory::SfntDirectoryEntry, header::SfntHeader},
    tag::FontTag,
    utils::align_to_four,
    woff1::{
        directory::Woff1DirectoryEntry, header::Woff1Header,
    },
    FontDataRead, FontDirectoryEntry,
};

fn directory_end(num_tables: u16) -> u32 {
    Woff1Header::SIZE as u32
        + Woff1DirectoryEntry::SIZE as u32 * num_tables as u32
}

/// h-size: the file is long enough to contain a header at all.
pub(crate) fn test_header_size(
    data: &[u8],
    reporter: &mut Reporter,
) -> TestOutcome {
    if data.len() < Woff1Header::SIZE {
        reporter.log_error("The header is not the proper length.");
        TestOutcome::Stop
    } else {
        reporter.log_pass("The header length is correct.");
        TestOutcome::Continue
    }
}

/// h-structure: the header unpacks.
pub(crate) fn test_header_structure(
    data: &[u8],
    reporter: &mut Reporter,
) -> TestOutcome {
    match Woff1Header::from_reader(&mut Cursor::new(data)) {
        Ok(_) => {
            reporter.log_pass("The header structure is correct.");
            TestOutcome::Continue
        }
        Err(_) => {
            reporter.log_error("The header is not properly structured.");
            TestOutcome::Stop
        }
    }
}

/// h-signature: the signature is 'wOFF'.
pub(crate) fn test_header_signature(
    data: &[u8],
    reporter: &mut Reporter,
) -> TestOutcome {
    let Some(header) = unpack_header(data) else {
        return TestOutcome::Continue;
    };
    if header.signature != Magic::Woff as u32 {
        reporter.log_error(format!(
            "Invalid signature: {}.",
            String::from_utf8_lossy(&header.signature.to_be_bytes())
        ));
        TestOutcome::Stop
    } else {
        reporter.log_pass("The signature is correct.");
        TestOutcome::Continue
    }
}

/// h-flavor: the flavor is a known sfnt type, and its CFF implication
/// holds: an 'OTTO' font must have a 'CFF ' table, any other flavor must
/// not.
pub(crate) fn test_header_flavor(
    data: &[u8],
    reporter: &mut Reporter,
) -> TestOutcome {
    let Some(header) = unpack_header(data) else {
        return TestOutcome::Continue;
    };
    if !Magic::is_sfnt_flavor(header.flavor) {
        reporter.log_warning(format!(
            "Unknown flavor: {}.",
            String::from_utf8_lossy(&header.flavor.to_be_bytes())
        ));
        return TestOutcome::Continue;
    }
    match unpack_directory(data) {
        Some(directory) => {
            let have_cff =
                directory.iter().any(|entry| entry.tag() == FontTag::CFF);
            let is_otto = header.flavor == Magic::OpenType as u32;
            if have_cff && !is_otto {
                reporter.log_error(
                    "A \"CFF\" table is defined in the font and the flavor is not set to \"OTTO\".",
                );
            } else if !have_cff && is_otto {
                reporter.log_error(
                    "The flavor is set to \"OTTO\" but no \"CFF\" table is defined.",
                );
            } else {
                reporter.log_pass("The flavor is a correct value.");
            }
        }
        None => {
            reporter.log_warning("Could not validate the flavor.");
        }
    }
    TestOutcome::Continue
}

/// h-length: the declared length matches the data, and is at least what
/// the header, directory, padded tables, metadata, and private data
/// require.
pub(crate) fn test_header_length(
    data: &[u8],
    reporter: &mut Reporter,
) -> TestOutcome {
    let Some(header) = unpack_header(data) else {
        return TestOutcome::Continue;
    };
    let length = header.length;
    if length as usize != data.len() {
        reporter.log_error(format!(
            "Defined length ({}) does not match actual length of the data ({}).",
            length,
            data.len()
        ));
        return TestOutcome::Stop;
    }
    let mut min_length = directory_end(header.numTables) as u64;
    if (length as u64) < min_length {
        reporter.log_error(format!(
            "Invalid length defined ({length}) for number of tables defined.",
        ));
        return TestOutcome::Stop;
    }
    let Some(directory) = unpack_directory(data) else {
        return TestOutcome::Continue;
    };
    for entry in &directory {
        min_length += align_to_four(entry.comp_length()) as u64;
    }
    let meta_length = if header.privLength != 0 {
        align_to_four(header.metaLength)
    } else {
        header.metaLength
    };
    min_length += meta_length as u64 + header.privLength as u64;
    if (length as u64) < min_length {
        reporter.log_error(format!(
            "Defined length ({length}) does not match the required length of the data ({min_length}).",
        ));
        return TestOutcome::Stop;
    }
    reporter.log_pass("The length defined in the header is correct.");
    TestOutcome::Continue
}

/// h-reserved: the reserved field is zero.
pub(crate) fn test_header_reserved(
    data: &[u8],
    reporter: &mut Reporter,
) -> TestOutcome {
    let Some(header) = unpack_header(data) else {
        return TestOutcome::Continue;
    };
    if header.reserved != 0 {
        reporter.log_error(format!(
            "Invalid value in reserved field ({}).",
            header.reserved
        ));
        TestOutcome::Stop
    } else {
        reporter.log_pass("The value in the reserved field is correct.");
        TestOutcome::Continue
    }
}

/// h-sfntsize: totalSfntSize equals the size of the equivalent sfnt file.
pub(crate) fn test_header_total_sfnt_size(
    data: &[u8],
    reporter: &mut Reporter,
) -> TestOutcome {
    let Some(header) = unpack_header(data) else {
        return TestOutcome::Continue;
    };
    let Some(directory) = unpack_directory(data) else {
        return TestOutcome::Continue;
    };
    let mut required_size = SfntHeader::SIZE as u32
        + SfntDirectoryEntry::SIZE as u32 * header.numTables as u32;
    for entry in &directory {
        required_size += align_to_four(entry.orig_length());
    }
    if header.totalSfntSize != required_size {
        reporter.log_error(format!(
            "The total sfnt size ({}) does not match the required sfnt size ({required_size}).",
            header.totalSfntSize
        ));
    } else {
        reporter.log_pass("The total sfnt size is valid.");
    }
    TestOutcome::Continue
}

/// h-version: the major and minor versions make a version of at least 1.0.
pub(crate) fn test_header_version(
    data: &[u8],
    reporter: &mut Reporter,
) -> TestOutcome {
    let Some(header) = unpack_header(data) else {
        return TestOutcome::Continue;
    };
    if header.majorVersion < 1 {
        reporter.log_warning(format!(
            "The major version ({}) and minor version ({}) create a version ({}.{}) less than 1.0.",
            header.majorVersion,
            header.minorVersion,
            header.majorVersion,
            header.minorVersion
        ));
    } else {
        reporter
            .log_pass("The major version and minor version are valid numbers.");
    }
    TestOutcome::Continue
}

/// h-numtables: at least one table is declared, and the declared number of
/// directory entries actually unpacks.
pub(crate) fn test_header_num_tables(
    data: &[u8],
    reporter: &mut Reporter,
) -> TestOutcome {
    let Some(header) = unpack_header(data) else {
        return TestOutcome::Continue;
    };
    let num_tables = header.numTables;
    if num_tables < 1 {
        reporter.log_error(format!(
            "Invalid number of tables defined in header structure ({num_tables}).",
        ));
        return TestOutcome::Stop;
    }
    let mut cursor = Cursor::new(&data[Woff1Header::SIZE.min(data.len())..]);
    for index in 0..num_tables {
        if Woff1DirectoryEntry::from_reader(&mut cursor).is_err() {
            reporter.log_error(format!(
                "The defined number of tables in the header ({num_tables}) does not match the actual number of tables ({index}).",
            ));
            return TestOutcome::Stop;
        }
    }
    reporter.log_pass("The number of tables defined in the header is valid.");
    TestOutcome::Continue
}
