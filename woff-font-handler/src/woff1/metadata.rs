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

//! WOFF 1.0 extension metadata support.
//!
//! The metadata block is a zlib-compressed UTF-8 XML document whose root is
//! a `metadata` element with a `version="1.0"` attribute. It is kept in
//! memory as a plain element tree; the schema rules for the WOFF metadata
//! vocabulary are enforced by the validator, not here.

use quick_xml::events::{
    BytesDecl, BytesEnd, BytesStart, BytesText, Event,
};

use crate::error::FontIoError;

/// A single element in the metadata XML tree: a tag name, attributes in
/// document order, the element's direct text content, and child elements.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct XmlElement {
    tag: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<XmlElement>,
}

impl XmlElement {
    /// Creates a new element with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Returns the element's tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the element's attributes, in document order.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Returns the value of the named attribute, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Sets an attribute, replacing any existing value for the same name.
    pub fn set_attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) {
        let name = name.into();
        let value = value.into();
        if let Some(existing) =
            self.attributes.iter_mut().find(|(key, _)| *key == name)
        {
            existing.1 = value;
        } else {
            self.attributes.push((name, value));
        }
    }

    /// Returns the element's direct text content, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Sets the element's text content.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    /// Returns the element's children, in document order.
    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    /// Appends a child element.
    pub fn push_child(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    /// Parses a UTF-8 XML document into an element tree.
    pub fn parse(data: &[u8]) -> Result<Self, FontIoError> {
        let mut reader = quick_xml::Reader::from_reader(data);
        let mut buffer = Vec::new();
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;
        loop {
            let event = reader
                .read_event_into(&mut buffer)
                .map_err(|err| FontIoError::MalformedMetadata(err.to_string()))?;
            match event {
                Event::Start(start) => {
                    if root.is_some() && stack.is_empty() {
                        return Err(FontIoError::MalformedMetadata(
                            "content after the document element".to_string(),
                        ));
                    }
                    stack.push(Self::from_start(&start)?);
                }
                Event::Empty(start) => {
                    let element = Self::from_start(&start)?;
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(element);
                    } else if root.is_none() {
                        root = Some(element);
                    } else {
                        return Err(FontIoError::MalformedMetadata(
                            "content after the document element".to_string(),
                        ));
                    }
                }
                Event::End(_) => {
                    // quick-xml has already checked the tag nesting.
                    let element = match stack.pop() {
                        Some(element) => element,
                        None => {
                            return Err(FontIoError::MalformedMetadata(
                                "unexpected closing tag".to_string(),
                            ))
                        }
                    };
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(element);
                    } else {
                        root = Some(element);
                    }
                }
                Event::Text(text) => {
                    let content = text.unescape().map_err(|err| {
                        FontIoError::MalformedMetadata(err.to_string())
                    })?;
                    if let Some(current) = stack.last_mut() {
                        current
                            .text
                            .get_or_insert_with(String::new)
                            .push_str(&content);
                    }
                }
                Event::CData(cdata) => {
                    if let Some(current) = stack.last_mut() {
                        current
                            .text
                            .get_or_insert_with(String::new)
                            .push_str(&String::from_utf8_lossy(&cdata));
                    }
                }
                Event::Decl(_)
                | Event::Comment(_)
                | Event::PI(_)
                | Event::DocType(_) => {}
                Event::Eof => break,
            }
            buffer.clear();
        }
        root.ok_or_else(|| {
            FontIoError::MalformedMetadata(
                "no document element".to_string(),
            )
        })
    }

    /// Serializes the element tree to UTF-8 XML, always beginning with the
    /// `<?xml version="1.0" encoding="UTF-8"?>` declaration.
    pub fn serialize(&self) -> Result<Vec<u8>, FontIoError> {
        let mut writer = quick_xml::Writer::new(Vec::new());
        writer
            .write_event(Event::Decl(BytesDecl::new(
                "1.0",
                Some("UTF-8"),
                None,
            )))
            .map_err(|err| FontIoError::MalformedMetadata(err.to_string()))?;
        self.serialize_into(&mut writer)?;
        Ok(writer.into_inner())
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, FontIoError> {
        let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut element = XmlElement::new(tag);
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|err| {
                FontIoError::MalformedMetadata(err.to_string())
            })?;
            let key = String::from_utf8_lossy(attribute.key.as_ref())
                .into_owned();
            let value = attribute.unescape_value().map_err(|err| {
                FontIoError::MalformedMetadata(err.to_string())
            })?;
            element.attributes.push((key, value.into_owned()));
        }
        Ok(element)
    }

    fn serialize_into(
        &self,
        writer: &mut quick_xml::Writer<Vec<u8>>,
    ) -> Result<(), FontIoError> {
        let mut start = BytesStart::new(self.tag.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }
        let is_empty =
            self.children.is_empty() && self.text.as_deref().is_none();
        if is_empty {
            writer
                .write_event(Event::Empty(start))
                .map_err(|err| FontIoError::MalformedMetadata(err.to_string()))?;
            return Ok(());
        }
        writer
            .write_event(Event::Start(start))
            .map_err(|err| FontIoError::MalformedMetadata(err.to_string()))?;
        if let Some(text) = &self.text {
            writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(|err| FontIoError::MalformedMetadata(err.to_string()))?;
        }
        for child in &self.children {
            child.serialize_into(writer)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(self.tag.as_str())))
            .map_err(|err| FontIoError::MalformedMetadata(err.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "metadata_test.rs"]
mod tests;
