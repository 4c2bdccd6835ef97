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

//! Tests for WOFF1 directory module

use super::*;

fn sample_entry(tag: &[u8; 4], offset: u32) -> Woff1DirectoryEntry {
    Woff1DirectoryEntry {
        tag: FontTag::new(*tag),
        offset,
        compLength: 0x20,
        origLength: 0x36,
        origChecksum: 0xaabb_ccdd,
    }
}

#[test]
fn test_woff1_entry_round_trip() {
    let entry = sample_entry(b"head", 0x40);
    let mut dest = std::io::Cursor::new(Vec::new());
    entry.write(&mut dest).unwrap();
    let written = dest.into_inner();
    assert_eq!(written.len(), Woff1DirectoryEntry::SIZE);

    let mut reader = std::io::Cursor::new(written);
    let read_back = Woff1DirectoryEntry::from_reader(&mut reader).unwrap();
    assert_eq!(read_back.tag, FontTag::new(*b"head"));
    assert_eq!(read_back.offset, 0x40);
    assert_eq!(read_back.compLength, 0x20);
    assert_eq!(read_back.origLength, 0x36);
    assert_eq!(read_back.origChecksum, 0xaabb_ccdd);
}

#[test]
fn test_woff1_entry_is_compressed() {
    let mut entry = sample_entry(b"head", 0x40);
    assert!(entry.is_compressed());
    entry.compLength = entry.origLength;
    assert!(!entry.is_compressed());
}

#[test]
fn test_woff1_entry_read_exact_bad_size() {
    let mut reader =
        std::io::Cursor::new(vec![0_u8; Woff1DirectoryEntry::SIZE]);
    let result = Woff1DirectoryEntry::from_reader_exact(&mut reader, 0, 19);
    assert!(matches!(
        result.unwrap_err(),
        FontIoError::InvalidSizeForDirectoryEntry {
            expected: 20,
            got: 19,
        }
    ));
}

#[test]
fn test_woff1_entry_checksum() {
    let entry = sample_entry(b"head", 0x40);
    let expected = Wrapping(u32::from_be_bytes(*b"head"))
        + Wrapping(0x40)
        + Wrapping(0x20)
        + Wrapping(0x36)
        + Wrapping(0xaabb_ccdd);
    assert_eq!(entry.checksum(), expected);
}

#[test]
fn test_woff1_directory_lookup_and_physical_order() {
    let mut directory = Woff1Directory::new();
    directory.add_entry(sample_entry(b"glyf", 0x100));
    directory.add_entry(sample_entry(b"cmap", 0x40));
    directory.add_entry(sample_entry(b"head", 0x200));
    assert!(directory.entry(&FontTag::new(*b"cmap")).is_some());
    assert!(directory.entry(&FontTag::new(*b"loca")).is_none());
    let physical = directory
        .physical_order()
        .iter()
        .map(|entry| entry.tag)
        .collect::<Vec<_>>();
    assert_eq!(
        physical,
        vec![
            FontTag::new(*b"cmap"),
            FontTag::new(*b"glyf"),
            FontTag::new(*b"head"),
        ]
    );
}

#[test]
fn test_woff1_directory_from_reader_with_count() {
    let mut dest = std::io::Cursor::new(Vec::new());
    sample_entry(b"cmap", 0x40).write(&mut dest).unwrap();
    sample_entry(b"head", 0x80).write(&mut dest).unwrap();
    let mut reader = std::io::Cursor::new(dest.into_inner());
    let directory =
        Woff1Directory::from_reader_with_count(&mut reader, 2).unwrap();
    assert_eq!(directory.entries().len(), 2);
    assert_eq!(directory.entries()[1].tag, FontTag::new(*b"head"));
}

#[test]
fn test_woff1_directory_from_reader_with_count_truncated() {
    let mut dest = std::io::Cursor::new(Vec::new());
    sample_entry(b"cmap", 0x40).write(&mut dest).unwrap();
    let mut reader = std::io::Cursor::new(dest.into_inner());
    let result = Woff1Directory::from_reader_with_count(&mut reader, 2);
    assert!(matches!(result.unwrap_err(), FontIoError::IoError(_)));
}
