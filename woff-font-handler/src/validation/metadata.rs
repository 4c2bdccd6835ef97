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

//! Validation tests for the WOFF metadata block: its placement and
//! compression, and the per-element rules of the WOFF 1.0 metadata XML
//! vocabulary.

use super::{
    report::{FindingKind, Reporter},
    support::{
        unpack_compressed_metadata, unpack_directory, unpack_header,
        unpack_metadata,
    },
    TestOutcome,
};
use crate::{
    compression::decompress,
    woff1::{
        directory::Woff1DirectoryEntry, header::Woff1Header,
        metadata::XmlElement,
    },
    FontDirectoryEntry,
};

/// The child elements the `metadata` root may carry.
const KNOWN_CHILDREN: &[&str] = &[
    "uniqueid",
    "vendor",
    "credits",
    "description",
    "license",
    "copyright",
    "trademark",
    "licensee",
];

/// Logs a note and returns `true` when there is no metadata to test.
fn should_skip_metadata(data: &[u8], reporter: &mut Reporter) -> bool {
    let Some(header) = unpack_header(data) else {
        return true;
    };
    if header.metaOffset == 0 || header.metaLength == 0 {
        reporter.log_note("No metadata to test.");
        return true;
    }
    false
}

/// m-offsetlength: metaOffset/metaLength are both zero or both set; when
/// set, the block begins on a four-byte boundary immediately after the
/// last table and lies entirely within the file.
pub(crate) fn test_metadata_offset_and_length(
    data: &[u8],
    reporter: &mut Reporter,
) -> TestOutcome {
    let Some(header) = unpack_header(data) else {
        return TestOutcome::Continue;
    };
    let meta_offset = header.metaOffset;
    let meta_length = header.metaLength;
    if meta_offset == 0 || meta_length == 0 {
        if meta_offset == 0 && meta_length == 0 {
            reporter.log_pass(
                "The length and offset are appropriately set for empty metadata.",
            );
        } else {
            reporter.log_error(format!(
                "The metadata offset ({meta_offset}) and metadata length ({meta_length}) are not properly set. If one is 0, they both must be 0.",
            ));
        }
        return TestOutcome::Continue;
    }
    if meta_offset % 4 != 0 {
        reporter
            .log_error("The metadata does not begin on a four-byte boundary.");
        return TestOutcome::Continue;
    }
    let Some(directory) = unpack_directory(data) else {
        return TestOutcome::Continue;
    };
    let total_length = header.length as u64;
    let directory_end = Woff1Header::SIZE as u64
        + Woff1DirectoryEntry::SIZE as u64 * header.numTables as u64;
    let table_end = directory
        .iter()
        .map(|entry| entry.offset() as u64 + entry.comp_length() as u64)
        .fold(directory_end, u64::max);
    // Widened arithmetic; a hostile directory can push table ends past
    // the u32 range.
    let min_offset = (table_end + 3) & !3_u64;
    let max_length = total_length.saturating_sub(min_offset);
    let offset_error =
        format!("The metadata has an invalid offset ({meta_offset}).");
    let length_error =
        format!("The metadata has an invalid length ({meta_length}).");
    let meta_offset = meta_offset as u64;
    let meta_length = meta_length as u64;
    if meta_offset < min_offset || meta_offset > total_length {
        reporter.log_error(offset_error);
    } else if meta_offset + meta_length > total_length
        || meta_length > max_length
    {
        reporter.log_error(length_error);
    } else if meta_offset != min_offset {
        reporter.log_error(offset_error);
    } else {
        reporter.log_pass("The metadata has properly set offset and length.");
    }
    TestOutcome::Continue
}

/// m-decompression: the metadata block inflates without error.
pub(crate) fn test_metadata_decompression(
    data: &[u8],
    reporter: &mut Reporter,
) -> TestOutcome {
    if should_skip_metadata(data, reporter) {
        return TestOutcome::Continue;
    }
    let inflates = unpack_compressed_metadata(data)
        .map(|compressed| decompress(compressed).is_ok())
        .unwrap_or(false);
    if !inflates {
        reporter.log_error("The metadata can not be decompressed with zlib.");
        return TestOutcome::Stop;
    }
    reporter.log_pass("The metadata can be decompressed with zlib.");
    TestOutcome::Continue
}

/// m-metaOrigLength: the inflated metadata length matches the header's
/// metaOrigLength.
pub(crate) fn test_metadata_decompressed_length(
    data: &[u8],
    reporter: &mut Reporter,
) -> TestOutcome {
    if should_skip_metadata(data, reporter) {
        return TestOutcome::Continue;
    }
    let Some(header) = unpack_header(data) else {
        return TestOutcome::Continue;
    };
    let Some(metadata) = unpack_metadata(data) else {
        return TestOutcome::Continue;
    };
    let decompressed_length = metadata.len() as u32;
    if header.metaOrigLength != decompressed_length {
        reporter.log_error(format!(
            "The decompressed metadata length ({decompressed_length}) does not match the original metadata length ({}) in the header.",
            header.metaOrigLength
        ));
    } else {
        reporter.log_pass(
            "The decompressed metadata length matches the original metadata length in the header.",
        );
    }
    TestOutcome::Continue
}

/// m-parse: the inflated metadata parses as XML.
pub(crate) fn test_metadata_parse(
    data: &[u8],
    reporter: &mut Reporter,
) -> TestOutcome {
    if should_skip_metadata(data, reporter) {
        return TestOutcome::Continue;
    }
    let Some(metadata) = unpack_metadata(data) else {
        return TestOutcome::Continue;
    };
    match XmlElement::parse(&metadata) {
        Ok(_) => {
            reporter.log_pass("The metadata can be parsed.");
            TestOutcome::Continue
        }
        Err(_) => {
            reporter.log_error("The metadata can not be parsed.");
            TestOutcome::Stop
        }
    }
}

/// m-structure: the parsed metadata tree follows the WOFF 1.0 metadata
/// vocabulary.
pub(crate) fn test_metadata_structure(
    data: &[u8],
    reporter: &mut Reporter,
) -> TestOutcome {
    if should_skip_metadata(data, reporter) {
        return TestOutcome::Continue;
    }
    let Some(metadata) = unpack_metadata(data) else {
        return TestOutcome::Continue;
    };
    let Ok(tree) = XmlElement::parse(&metadata) else {
        return TestOutcome::Continue;
    };
    check_top_element(&tree, reporter);
    check_child_elements(&tree, reporter);
    TestOutcome::Continue
}

/// The root must be a `metadata` element whose only attribute is
/// `version="1.0"`, with no text of its own.
fn check_top_element(tree: &XmlElement, reporter: &mut Reporter) {
    let mut have_error = false;
    if tree.tag() != "metadata" {
        reporter.log_error("The top element is not \"metadata\".");
        have_error = true;
    }
    let mut keys = tree
        .attributes()
        .iter()
        .map(|(key, _)| key.as_str())
        .collect::<Vec<_>>();
    keys.sort_unstable();
    for key in keys {
        if key != "version" {
            reporter.log_error(format!(
                "Unknown \"{key}\" attribute in \"metadata\" element.",
            ));
            have_error = true;
        }
    }
    match tree.attribute("version") {
        None => {
            reporter.log_error(
                "The \"version\" attribute is not defined in \"metadata\" element.",
            );
            have_error = true;
        }
        Some(version) if version != "1.0" => {
            reporter.log_error(format!(
                "Invalid value ({version}) for \"version\" attribute in \"metadata\" element.",
            ));
            have_error = true;
        }
        Some(_) => {}
    }
    if has_text(tree) {
        reporter.log_error("Text defined in \"metadata\" element.");
        have_error = true;
    }
    if !have_error {
        reporter.log_pass("The \"metadata\" element is properly formatted.");
    }
}

/// Reports missing and duplicated known children, then hands each child to
/// its element-specific rules.
fn check_child_elements(tree: &XmlElement, reporter: &mut Reporter) {
    check_element_existence(tree, reporter);
    check_duplicate_elements(tree, reporter);
    for element in tree.children() {
        match element.tag() {
            "uniqueid" => check_uniqueid(element, reporter),
            "vendor" => check_vendor(element, reporter),
            "credits" => check_credits(element, reporter),
            "description" => {
                check_text_carrier(element, reporter, "description")
            }
            "license" => check_license(element, reporter),
            "copyright" => check_text_carrier(element, reporter, "copyright"),
            "trademark" => check_text_carrier(element, reporter, "trademark"),
            "licensee" => check_licensee(element, reporter),
            unknown => reporter.log_warning_info(
                format!("Unknown \"{unknown}\" element."),
                "This element will be unknown to user agents.",
            ),
        }
    }
}

/// A missing `uniqueid` is a warning; any other absent child only rates a
/// note.
fn check_element_existence(tree: &XmlElement, reporter: &mut Reporter) {
    let count = |tag: &str| {
        tree.children()
            .iter()
            .filter(|child| child.tag() == tag)
            .count()
    };
    if count("uniqueid") == 0 {
        reporter.log_warning(
            "No \"uniqueid\" child is in the \"metadata\" element.",
        );
    }
    let mut others = KNOWN_CHILDREN
        .iter()
        .filter(|tag| **tag != "uniqueid")
        .collect::<Vec<_>>();
    others.sort_unstable();
    for tag in others {
        if count(tag) == 0 {
            reporter.log_note(format!(
                "No \"{tag}\" child is in the \"metadata\" element.",
            ));
        }
    }
}

fn check_duplicate_elements(tree: &XmlElement, reporter: &mut Reporter) {
    let mut sorted = KNOWN_CHILDREN.to_vec();
    sorted.sort_unstable();
    for tag in sorted {
        let count = tree
            .children()
            .iter()
            .filter(|child| child.tag() == tag)
            .count();
        if count > 1 {
            reporter.log_warning(format!(
                "The \"{tag}\" tag is used more than once in the \"metadata\" element.",
            ));
        }
    }
}

fn check_uniqueid(element: &XmlElement, reporter: &mut Reporter) {
    let rules = AbstractElementRules {
        tag: "uniqueid",
        required_attributes: &["id"],
        ..AbstractElementRules::default()
    };
    if !check_abstract_element(element, reporter, &rules) {
        reporter.log_pass("The \"uniqueid\" element is properly formatted.");
    }
}

fn check_vendor(element: &XmlElement, reporter: &mut Reporter) {
    let rules = AbstractElementRules {
        tag: "vendor",
        required_attributes: &["name"],
        optional_attributes: &["url"],
        ..AbstractElementRules::default()
    };
    if !check_abstract_element(element, reporter, &rules) {
        reporter.log_pass("The \"vendor\" element is properly formatted.");
    }
}

fn check_credits(element: &XmlElement, reporter: &mut Reporter) {
    let rules = AbstractElementRules {
        tag: "credits",
        known_child_elements: &["credit"],
        ..AbstractElementRules::default()
    };
    if !check_abstract_element(element, reporter, &rules) {
        reporter.log_pass("The \"credits\" element is properly formatted.");
    }
    for child in element.children() {
        if child.tag() == "credit" {
            check_credit(child, reporter);
        }
    }
}

fn check_credit(element: &XmlElement, reporter: &mut Reporter) {
    let rules = AbstractElementRules {
        tag: "credit",
        required_attributes: &["name"],
        optional_attributes: &["url", "role"],
        ..AbstractElementRules::default()
    };
    if !check_abstract_element(element, reporter, &rules) {
        reporter.log_pass("The \"credit\" element is properly formatted.");
    }
}

/// Shared rules for `description`, `copyright`, and `trademark`: no
/// attributes, no text of their own, one or more `text` children with
/// unique languages.
fn check_text_carrier(
    element: &XmlElement,
    reporter: &mut Reporter,
    tag: &'static str,
) {
    let rules = AbstractElementRules {
        tag,
        known_child_elements: &["text"],
        missing_child_elements_level: FindingKind::Warning,
        ..AbstractElementRules::default()
    };
    let mut have_error = check_abstract_element(element, reporter, &rules);
    if check_text_elements(element, reporter) {
        have_error = true;
    }
    if check_text_element_languages(element, reporter, tag) {
        have_error = true;
    }
    if !have_error {
        reporter.log_pass(format!(
            "The \"{tag}\" element is properly formatted.",
        ));
    }
}

fn check_license(element: &XmlElement, reporter: &mut Reporter) {
    let rules = AbstractElementRules {
        tag: "license",
        optional_attributes: &["url", "id"],
        known_child_elements: &["text"],
        missing_child_elements_level: FindingKind::Warning,
        ..AbstractElementRules::default()
    };
    let mut have_error = check_abstract_element(element, reporter, &rules);
    if check_text_elements(element, reporter) {
        have_error = true;
    }
    if check_text_element_languages(element, reporter, "license") {
        have_error = true;
    }
    if !have_error {
        reporter.log_pass("The \"license\" element is properly formatted.");
    }
}

fn check_licensee(element: &XmlElement, reporter: &mut Reporter) {
    let rules = AbstractElementRules {
        tag: "licensee",
        required_attributes: &["name"],
        ..AbstractElementRules::default()
    };
    if !check_abstract_element(element, reporter, &rules) {
        reporter.log_pass("The \"licensee\" element is properly formatted.");
    }
}

/// The per-element contract every metadata element is checked against:
/// which attributes must or may appear, whether text is required or
/// forbidden, and which child elements are known.
struct AbstractElementRules {
    tag: &'static str,
    required_attributes: &'static [&'static str],
    optional_attributes: &'static [&'static str],
    note_missing_optional_attributes: bool,
    known_child_elements: &'static [&'static str],
    missing_child_elements_level: FindingKind,
    require_text: bool,
}

impl Default for AbstractElementRules {
    fn default() -> Self {
        Self {
            tag: "",
            required_attributes: &[],
            optional_attributes: &[],
            note_missing_optional_attributes: true,
            known_child_elements: &[],
            missing_child_elements_level: FindingKind::Error,
            require_text: false,
        }
    }
}

/// Applies the abstract element contract, returning whether any error was
/// logged.
fn check_abstract_element(
    element: &XmlElement,
    reporter: &mut Reporter,
    rules: &AbstractElementRules,
) -> bool {
    let mut have_error = false;
    if check_required_attributes(element, reporter, rules) {
        have_error = true;
    }
    check_optional_attributes(element, reporter, rules);
    if check_unknown_attributes(element, reporter, rules) {
        have_error = true;
    }
    if check_empty_attribute_values(element, reporter, rules) {
        have_error = true;
    }
    if rules.require_text {
        if !has_text(element) {
            reporter.log_error(format!(
                "Text not defined in \"{}\" element.",
                rules.tag
            ));
            have_error = true;
        }
    } else if has_text(element) {
        reporter
            .log_error(format!("Text defined in \"{}\" element.", rules.tag));
        have_error = true;
    }
    if rules.known_child_elements.is_empty() {
        if !element.children().is_empty() {
            reporter.log_error(format!(
                "Child elements defined in \"{}\" element.",
                rules.tag
            ));
            have_error = true;
        }
    } else if check_known_child_elements(element, reporter, rules) {
        have_error = true;
    }
    have_error
}

fn check_required_attributes(
    element: &XmlElement,
    reporter: &mut Reporter,
    rules: &AbstractElementRules,
) -> bool {
    let mut have_error = false;
    let mut required = rules.required_attributes.to_vec();
    required.sort_unstable();
    for attribute in required {
        if element.attribute(attribute).is_none() {
            reporter.log_error(format!(
                "Required attribute \"{attribute}\" is not defined in the \"{}\" element.",
                rules.tag
            ));
            have_error = true;
        }
    }
    have_error
}

fn check_optional_attributes(
    element: &XmlElement,
    reporter: &mut Reporter,
    rules: &AbstractElementRules,
) {
    if !rules.note_missing_optional_attributes {
        return;
    }
    let mut optional = rules.optional_attributes.to_vec();
    optional.sort_unstable();
    for attribute in optional {
        if element.attribute(attribute).is_none() {
            reporter.log_note(format!(
                "Optional attribute \"{attribute}\" is not defined in the \"{}\" element.",
                rules.tag
            ));
        }
    }
}

fn check_unknown_attributes(
    element: &XmlElement,
    reporter: &mut Reporter,
    rules: &AbstractElementRules,
) -> bool {
    let mut have_error = false;
    let mut keys = element
        .attributes()
        .iter()
        .map(|(key, _)| key.as_str())
        .collect::<Vec<_>>();
    keys.sort_unstable();
    for key in keys {
        if !rules.required_attributes.contains(&key)
            && !rules.optional_attributes.contains(&key)
        {
            reporter.log_warning_info(
                format!(
                    "Unknown \"{key}\" attribute of \"{}\" element.",
                    rules.tag
                ),
                "This attribute will be unknown to user agents.",
            );
            have_error = true;
        }
    }
    have_error
}

fn check_empty_attribute_values(
    element: &XmlElement,
    reporter: &mut Reporter,
    rules: &AbstractElementRules,
) -> bool {
    let mut have_error = false;
    let mut attributes = element.attributes().to_vec();
    attributes.sort();
    for (key, value) in &attributes {
        let key = key.as_str();
        if !rules.required_attributes.contains(&key)
            && !rules.optional_attributes.contains(&key)
        {
            continue;
        }
        if value.trim().is_empty() {
            reporter.log_error(format!(
                "The value for the \"{key}\" attribute in the \"{}\" element is an empty string.",
                rules.tag
            ));
            have_error = true;
        }
    }
    have_error
}

fn check_known_child_elements(
    element: &XmlElement,
    reporter: &mut Reporter,
    rules: &AbstractElementRules,
) -> bool {
    let mut found = Vec::new();
    for child in element.children() {
        if rules.known_child_elements.contains(&child.tag()) {
            if !found.contains(&child.tag()) {
                found.push(child.tag());
            }
        } else {
            reporter.log_warning_info(
                format!(
                    "Unknown \"{}\" child element in \"{}\" element.",
                    child.tag(),
                    rules.tag
                ),
                "This element will be unknown to user agents.",
            );
        }
    }
    let mut have_error = false;
    let mut known = rules.known_child_elements.to_vec();
    known.sort_unstable();
    for child_tag in known {
        if !found.contains(&child_tag) {
            let message = format!(
                "Child element \"{child_tag}\" is not defined in the \"{}\" element.",
                rules.tag
            );
            match rules.missing_child_elements_level {
                FindingKind::Warning => reporter.log_warning(message),
                FindingKind::Note => reporter.log_note(message),
                _ => reporter.log_error(message),
            }
            have_error = true;
        }
    }
    have_error
}

/// Checks every `text` child: an optional `lang` attribute, required text
/// content, no children of its own.
fn check_text_elements(element: &XmlElement, reporter: &mut Reporter) -> bool {
    let rules = AbstractElementRules {
        tag: "text",
        optional_attributes: &["lang"],
        note_missing_optional_attributes: false,
        require_text: true,
        ..AbstractElementRules::default()
    };
    let mut have_error = false;
    for child in element.children() {
        if child.tag() != "text" {
            continue;
        }
        if check_abstract_element(child, reporter, &rules) {
            have_error = true;
        }
    }
    have_error
}

/// Within one parent, every `text` child must carry a distinct language;
/// an undefined `lang` is its own bucket.
fn check_text_element_languages(
    element: &XmlElement,
    reporter: &mut Reporter,
    tag: &str,
) -> bool {
    let mut languages: Vec<(&str, usize)> = Vec::new();
    for child in element.children() {
        if child.tag() != "text" {
            continue;
        }
        let lang = child.attribute("lang").unwrap_or("undefined");
        if let Some(entry) =
            languages.iter_mut().find(|(existing, _)| *existing == lang)
        {
            entry.1 += 1;
        } else {
            languages.push((lang, 1));
        }
    }
    languages.sort();
    let mut have_error = false;
    for (lang, count) in languages {
        if count > 1 {
            have_error = true;
            reporter.log_error(format!(
                "More than one instance of language \"{lang}\" in the \"{tag}\" element.",
            ));
        }
    }
    have_error
}

fn has_text(element: &XmlElement) -> bool {
    element
        .text()
        .map(|text| !text.trim().is_empty())
        .unwrap_or(false)
}
