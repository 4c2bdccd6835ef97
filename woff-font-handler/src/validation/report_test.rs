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

//! Tests for the report module

use super::*;

#[test]
fn test_reporter_groups_findings_by_test() {
    let mut reporter = Reporter::default();
    reporter.log_test_title("Header - Size", "h-size");
    reporter.log_pass("The header length is correct.");
    reporter.log_test_title("Header - Signature", "h-signature");
    reporter.log_error("Invalid signature: XXXX.");
    reporter.log_warning_info("Something odd.", "More detail.");
    let report = reporter.into_report();

    assert_eq!(report.groups().len(), 2);
    let first = &report.groups()[0];
    assert_eq!(first.title, "Header - Size");
    assert_eq!(first.identifier, "h-size");
    assert!(first.have_pass());
    assert!(!first.have_error());
    let second = &report.groups()[1];
    assert!(second.have_error());
    assert!(second.have_warning());
    assert_eq!(
        second.findings[1].information.as_deref(),
        Some("More detail.")
    );
    assert!(report.have_error());
}

#[test]
fn test_report_read_error_flag() {
    let mut reporter = Reporter::default();
    reporter.log_test_title("Header - Size", "h-size");
    reporter.log_error("The header is not the proper length.");
    reporter.set_read_error();
    let report = reporter.into_report();
    assert!(report.have_read_error());
}

#[test]
fn test_report_finding_kinds() {
    let mut reporter = Reporter::default();
    reporter.log_test_title("Tables - DSIG", "t-dsig");
    reporter.log_note("The font does not contain a \"DSIG\" table.");
    reporter.log_traceback("a traceback");
    let report = reporter.into_report();
    let group = &report.groups()[0];
    assert!(group.have_note());
    assert!(group.have_traceback());
    assert_eq!(group.findings[0].kind, FindingKind::Note);
    assert_eq!(group.findings[1].kind, FindingKind::Traceback);
}

#[test]
fn test_report_serializes_to_json() {
    let mut reporter = Reporter::default();
    reporter.log_test_title("Header - Size", "h-size");
    reporter.log_pass("The header length is correct.");
    let report = reporter.into_report();
    let json = report.to_json().unwrap();
    assert!(json.contains("\"type\": \"PASS\""));
    assert!(json.contains("\"identifier\": \"h-size\""));
    assert!(json.contains("\"have_read_error\": false"));
    // Absent information fields are omitted entirely.
    assert!(!json.contains("\"information\""));
}
