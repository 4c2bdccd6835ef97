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

//! Structural validation of WOFF 1.0 byte streams.
//!
//! [`validate`] runs a fixed, ordered sequence of tests over the raw
//! bytes, each logging categorized findings into a [`Report`]. A test that
//! discovers a condition making further tests meaningless (bad signature,
//! inconsistent length, unreadable directory) stops the pipeline, and the
//! report is flagged with a read error. No font model is ever built; every
//! test re-reads what it needs from the slice.

mod directory;
mod header;
mod metadata;
mod private_data;
mod report;
mod support;
mod tables;

pub use report::{Finding, FindingKind, Report, TestResultGroup};
pub(crate) use report::Reporter;
use tracing::debug;

/// Whether the pipeline should carry on after a test.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TestOutcome {
    /// Subsequent tests can still produce meaningful findings.
    Continue,
    /// The stream can not be meaningfully examined any further.
    Stop,
}

type TestFn = fn(&[u8], &mut Reporter) -> TestOutcome;

/// The validation pipeline. The identifiers and their order are stable;
/// reports produced from the same input always group findings the same
/// way.
const TESTS: &[(&str, &str, TestFn)] = &[
    ("Header - Size", "h-size", header::test_header_size),
    ("Header - Structure", "h-structure", header::test_header_structure),
    ("Header - Signature", "h-signature", header::test_header_signature),
    ("Header - Flavor", "h-flavor", header::test_header_flavor),
    ("Header - Length", "h-length", header::test_header_length),
    ("Header - Reserved", "h-reserved", header::test_header_reserved),
    (
        "Header - Total sfnt Size",
        "h-sfntsize",
        header::test_header_total_sfnt_size,
    ),
    ("Header - Version", "h-version", header::test_header_version),
    (
        "Header - Number of Tables",
        "h-numtables",
        header::test_header_num_tables,
    ),
    (
        "Directory - Table Order",
        "d-order",
        directory::test_directory_table_order,
    ),
    (
        "Directory - Table Borders",
        "d-borders",
        directory::test_directory_borders,
    ),
    (
        "Directory - Compressed Length",
        "d-complength",
        directory::test_directory_compressed_length,
    ),
    (
        "Directory - Table Checksums",
        "d-checksum",
        directory::test_directory_checksums,
    ),
    ("Tables - Start Position", "t-start", tables::test_table_data_start),
    ("Tables - Padding", "t-padding", tables::test_table_padding),
    (
        "Tables - Decompression",
        "t-decompression",
        tables::test_table_decompression,
    ),
    (
        "Tables - Original Length",
        "t-origlength",
        tables::test_table_original_length,
    ),
    (
        "Tables - checkSumAdjustment",
        "t-headchecksum",
        tables::test_head_checksum_adjustment,
    ),
    ("Tables - DSIG", "t-dsig", tables::test_dsig),
    (
        "Metadata - Offset and Length",
        "m-offsetlength",
        metadata::test_metadata_offset_and_length,
    ),
    (
        "Metadata - Decompression",
        "m-decompression",
        metadata::test_metadata_decompression,
    ),
    (
        "Metadata - Original Length",
        "m-metaOrigLength",
        metadata::test_metadata_decompressed_length,
    ),
    ("Metadata - Parse", "m-parse", metadata::test_metadata_parse),
    (
        "Metadata - Structure",
        "m-structure",
        metadata::test_metadata_structure,
    ),
    (
        "Private Data - Offset and Length",
        "p-offsetlength",
        private_data::test_private_data_offset_and_length,
    ),
];

/// Validates a WOFF 1.0 byte stream against the structural requirements of
/// the specification, producing a categorized report.
pub fn validate(data: &[u8]) -> Report {
    let mut reporter = Reporter::default();
    for (title, identifier, test) in TESTS {
        debug!("running validation test '{}'", identifier);
        reporter.log_test_title(title, identifier);
        let outcome = std::panic::catch_unwind(
            std::panic::AssertUnwindSafe(|| test(data, &mut reporter)),
        );
        match outcome {
            Ok(TestOutcome::Continue) => {}
            Ok(TestOutcome::Stop) => {
                reporter.set_read_error();
                break;
            }
            Err(payload) => {
                // A test blew up instead of reporting; record the panic
                // as a traceback finding and stop, as the stream state is
                // unknown from here on.
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|message| message.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unexpected panic".to_string());
                reporter.log_traceback(message);
                reporter.set_read_error();
                break;
            }
        }
    }
    reporter.into_report()
}

#[cfg(test)]
#[path = "validation/validation_test.rs"]
mod tests;
