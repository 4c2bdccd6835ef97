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

//! Tests for WOFF1 metadata module

use super::*;

const SAMPLE: &[u8] = b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
<metadata version=\"1.0\"><uniqueid id=\"com.ex.f.1\"/></metadata>";

#[test]
fn test_parse_sample_metadata() {
    let tree = XmlElement::parse(SAMPLE).unwrap();
    assert_eq!(tree.tag(), "metadata");
    assert_eq!(tree.attribute("version"), Some("1.0"));
    assert_eq!(tree.children().len(), 1);
    let child = &tree.children()[0];
    assert_eq!(child.tag(), "uniqueid");
    assert_eq!(child.attribute("id"), Some("com.ex.f.1"));
    assert!(child.children().is_empty());
}

#[test]
fn test_parse_nested_text() {
    let data = b"<metadata version=\"1.0\">\
<description><text lang=\"en\">A font.</text></description></metadata>";
    let tree = XmlElement::parse(data).unwrap();
    let description = &tree.children()[0];
    let text = &description.children()[0];
    assert_eq!(text.tag(), "text");
    assert_eq!(text.attribute("lang"), Some("en"));
    assert_eq!(text.text(), Some("A font."));
}

#[test]
fn test_parse_unescapes_entities() {
    let data = b"<vendor name=\"Foo &amp; Bar\"/>";
    let tree = XmlElement::parse(data).unwrap();
    assert_eq!(tree.attribute("name"), Some("Foo & Bar"));
}

#[test]
fn test_parse_rejects_mismatched_tags() {
    let result = XmlElement::parse(b"<metadata><uniqueid></metadata>");
    assert!(matches!(
        result.unwrap_err(),
        FontIoError::MalformedMetadata(_)
    ));
}

#[test]
fn test_parse_rejects_non_xml() {
    let result = XmlElement::parse(b"this is not xml at all");
    assert!(matches!(
        result.unwrap_err(),
        FontIoError::MalformedMetadata(_)
    ));
}

#[test]
fn test_serialize_starts_with_declaration() {
    let mut tree = XmlElement::new("metadata");
    tree.set_attribute("version", "1.0");
    let serialized = tree.serialize().unwrap();
    assert!(serialized
        .starts_with(b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
}

#[test]
fn test_serialize_parse_round_trip() {
    let mut tree = XmlElement::new("metadata");
    tree.set_attribute("version", "1.0");
    let mut vendor = XmlElement::new("vendor");
    vendor.set_attribute("name", "Example & Co");
    vendor.set_attribute("url", "https://example.com");
    tree.push_child(vendor);
    let mut description = XmlElement::new("description");
    let mut text = XmlElement::new("text");
    text.set_attribute("lang", "en");
    text.set_text("A \"quoted\" description <here>.");
    description.push_child(text);
    tree.push_child(description);

    let serialized = tree.serialize().unwrap();
    let read_back = XmlElement::parse(&serialized).unwrap();
    assert_eq!(read_back, tree);
}

#[test]
fn test_set_attribute_replaces_existing_value() {
    let mut element = XmlElement::new("vendor");
    element.set_attribute("name", "first");
    element.set_attribute("name", "second");
    assert_eq!(element.attributes().len(), 1);
    assert_eq!(element.attribute("name"), Some("second"));
}

#[test]
fn test_empty_element_serializes_self_closed() {
    let mut element = XmlElement::new("uniqueid");
    element.set_attribute("id", "org.example.font");
    let serialized = element.serialize().unwrap();
    let text = String::from_utf8(serialized).unwrap();
    assert!(text.ends_with("<uniqueid id=\"org.example.font\"/>"));
}
