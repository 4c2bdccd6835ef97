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

//! Validation findings and the report they are collected into.

use serde::Serialize;

/// The severity of a single validation finding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FindingKind {
    /// The checked requirement holds.
    Pass,
    /// An observation with no bearing on validity.
    Note,
    /// Something is questionable but not invalid.
    Warning,
    /// A structural requirement is violated.
    Error,
    /// A test could not run to completion.
    Traceback,
}

/// A single validator observation.
#[derive(Clone, Debug, Serialize)]
pub struct Finding {
    /// The severity of the finding.
    #[serde(rename = "type")]
    pub kind: FindingKind,
    /// What was observed.
    pub message: String,
    /// Optional additional information.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub information: Option<String>,
}

/// The findings produced by one test in the pipeline.
#[derive(Debug, Serialize)]
pub struct TestResultGroup {
    /// The test's human-readable title.
    pub title: String,
    /// The test's stable identifier (e.g. `h-size`).
    pub identifier: String,
    /// The findings, in the order they were logged.
    pub findings: Vec<Finding>,
}

impl TestResultGroup {
    fn have_kind(&self, kind: FindingKind) -> bool {
        self.findings.iter().any(|finding| finding.kind == kind)
    }

    /// Whether this group contains at least one PASS finding.
    pub fn have_pass(&self) -> bool {
        self.have_kind(FindingKind::Pass)
    }

    /// Whether this group contains at least one NOTE finding.
    pub fn have_note(&self) -> bool {
        self.have_kind(FindingKind::Note)
    }

    /// Whether this group contains at least one WARNING finding.
    pub fn have_warning(&self) -> bool {
        self.have_kind(FindingKind::Warning)
    }

    /// Whether this group contains at least one ERROR finding.
    pub fn have_error(&self) -> bool {
        self.have_kind(FindingKind::Error)
    }

    /// Whether this group contains at least one TRACEBACK finding.
    pub fn have_traceback(&self) -> bool {
        self.have_kind(FindingKind::Traceback)
    }
}

/// The complete result of validating one byte stream: the test groups in
/// pipeline order, and whether validation stopped early because the stream
/// could not be read any further.
#[derive(Debug, Default, Serialize)]
pub struct Report {
    groups: Vec<TestResultGroup>,
    have_read_error: bool,
}

impl Report {
    /// Returns the test groups, in the order the tests ran.
    pub fn groups(&self) -> &[TestResultGroup] {
        &self.groups
    }

    /// Whether the pipeline stopped early on a condition that made further
    /// tests meaningless.
    pub fn have_read_error(&self) -> bool {
        self.have_read_error
    }

    /// Whether any test produced an ERROR finding.
    pub fn have_error(&self) -> bool {
        self.groups.iter().any(|group| group.have_error())
    }

    /// Serializes the report to JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Collects findings as the pipeline runs. Each test logs into the group
/// opened for it by the pipeline.
#[derive(Debug, Default)]
pub(crate) struct Reporter {
    groups: Vec<TestResultGroup>,
    have_read_error: bool,
}

impl Reporter {
    /// Opens a new result group for the named test.
    pub(crate) fn log_test_title(&mut self, title: &str, identifier: &str) {
        self.groups.push(TestResultGroup {
            title: title.to_string(),
            identifier: identifier.to_string(),
            findings: Vec::new(),
        });
    }

    fn log(
        &mut self,
        kind: FindingKind,
        message: String,
        information: Option<String>,
    ) {
        if let Some(group) = self.groups.last_mut() {
            group.findings.push(Finding {
                kind,
                message,
                information,
            });
        }
    }

    pub(crate) fn log_pass(&mut self, message: impl Into<String>) {
        self.log(FindingKind::Pass, message.into(), None);
    }

    pub(crate) fn log_note(&mut self, message: impl Into<String>) {
        self.log(FindingKind::Note, message.into(), None);
    }

    pub(crate) fn log_warning(&mut self, message: impl Into<String>) {
        self.log(FindingKind::Warning, message.into(), None);
    }

    pub(crate) fn log_warning_info(
        &mut self,
        message: impl Into<String>,
        information: impl Into<String>,
    ) {
        self.log(
            FindingKind::Warning,
            message.into(),
            Some(information.into()),
        );
    }

    pub(crate) fn log_error(&mut self, message: impl Into<String>) {
        self.log(FindingKind::Error, message.into(), None);
    }

    pub(crate) fn log_traceback(&mut self, message: impl Into<String>) {
        self.log(FindingKind::Traceback, message.into(), None);
    }

    pub(crate) fn set_read_error(&mut self) {
        self.have_read_error = true;
    }

    pub(crate) fn into_report(self) -> Report {
        Report {
            groups: self.groups,
            have_read_error: self.have_read_error,
        }
    }
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
