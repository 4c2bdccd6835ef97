// Copyright 2024 Monotype Imaging Inc.
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

//! Tests for the tag module

use super::*;

#[test]
fn test_tag_from_reader() {
    let mut reader = std::io::Cursor::new(b"head".to_vec());
    let tag = FontTag::from_reader(&mut reader).unwrap();
    assert_eq!(tag, FontTag::HEAD);
}

#[test]
fn test_tag_from_reader_exact_bad_size() {
    let mut reader = std::io::Cursor::new(b"head".to_vec());
    let result = FontTag::from_reader_exact(&mut reader, 0, 3);
    assert!(matches!(
        result.unwrap_err(),
        FontIoError::InvalidSizeForTAG(3)
    ));
}

#[test]
fn test_tag_from_reader_truncated() {
    let mut reader = std::io::Cursor::new(b"he".to_vec());
    let result = FontTag::from_reader(&mut reader);
    assert!(matches!(result.unwrap_err(), FontIoError::IoError(_)));
}

#[test]
fn test_tag_write() {
    let mut dest = std::io::Cursor::new(Vec::new());
    FontTag::new(*b"cmap").write(&mut dest).unwrap();
    assert_eq!(dest.into_inner(), b"cmap".to_vec());
}

#[test]
fn test_tag_ordering_is_lexicographic() {
    let mut tags = vec![
        FontTag::new(*b"head"),
        FontTag::new(*b"CFF "),
        FontTag::new(*b"cmap"),
        FontTag::new(*b"DSIG"),
    ];
    tags.sort();
    assert_eq!(
        tags,
        vec![
            FontTag::new(*b"CFF "),
            FontTag::new(*b"DSIG"),
            FontTag::new(*b"cmap"),
            FontTag::new(*b"head"),
        ]
    );
}

#[test]
fn test_tag_display_and_debug() {
    let tag = FontTag::new(*b"glyf");
    assert_eq!(format!("{tag}"), "glyf");
    assert_eq!(format!("{tag:?}"), "FontTag(glyf)");
}
