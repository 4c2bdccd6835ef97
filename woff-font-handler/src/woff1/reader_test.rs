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

//! Tests for WOFF1 reader module

use std::io::Cursor;

use super::*;
use crate::woff1::writer::{Woff1Writer, Woff1WriterOptions};

const CMAP: FontTag = FontTag::new(*b"cmap");
const GLYF: FontTag = FontTag::new(*b"glyf");

fn compressible_data(len: usize) -> Vec<u8> {
    b"abcdefgh".iter().copied().cycle().take(len).collect()
}

/// A short incompressible block; zlib output is larger, so the writer
/// stores it raw.
fn raw_data() -> Vec<u8> {
    vec![0x01, 0x02, 0x03, 0x04]
}

fn build_woff(
    metadata: Option<&[u8]>,
    private_data: Option<&[u8]>,
) -> Vec<u8> {
    let mut writer = Woff1Writer::new(
        Cursor::new(Vec::new()),
        3,
        Woff1WriterOptions {
            major_version: 1,
            ..Woff1WriterOptions::default()
        },
    );
    writer.set_table(FontTag::HEAD, vec![0_u8; 54]).unwrap();
    writer.set_table(CMAP, compressible_data(64)).unwrap();
    writer.set_table(GLYF, raw_data()).unwrap();
    if let Some(metadata) = metadata {
        writer.set_metadata(metadata.to_vec()).unwrap();
    }
    if let Some(private_data) = private_data {
        writer.set_private_data(private_data.to_vec());
    }
    writer.close().unwrap().into_inner()
}

#[test]
fn test_reader_rejects_truncated_header() {
    let result =
        Woff1Reader::new(Cursor::new(vec![0_u8; 10]), ChecksumPolicy::Report);
    assert!(matches!(result.unwrap_err(), FontIoError::MalformedHeader));
}

#[test]
fn test_reader_rejects_bad_signature() {
    let mut data = build_woff(None, None);
    data[0..4].copy_from_slice(b"XXXX");
    let result = Woff1Reader::new(Cursor::new(data), ChecksumPolicy::Report);
    assert!(matches!(result.unwrap_err(), FontIoError::BadSignature(_)));
}

#[test]
fn test_reader_rejects_truncated_directory() {
    let data = build_woff(None, None);
    // Keep the header (declaring 3 tables) and half an entry.
    let truncated = data[..Woff1Header::SIZE + 10].to_vec();
    let result =
        Woff1Reader::new(Cursor::new(truncated), ChecksumPolicy::Report);
    assert!(matches!(
        result.unwrap_err(),
        FontIoError::MalformedDirectory
    ));
}

#[test]
fn test_reader_header_queries() {
    let data = build_woff(None, None);
    let reader =
        Woff1Reader::new(Cursor::new(data), ChecksumPolicy::Report).unwrap();
    assert_eq!(reader.flavor(), Magic::TrueType as u32);
    assert_eq!(reader.major_version(), 1);
    assert_eq!(reader.minor_version(), 0);
    assert_eq!(reader.header().numTables, 3);
    assert!(reader.contains_table(&FontTag::HEAD));
    assert!(!reader.contains_table(&FontTag::new(*b"loca")));
}

#[test]
fn test_reader_tags_are_in_offset_order() {
    let data = build_woff(None, None);
    let reader =
        Woff1Reader::new(Cursor::new(data), ChecksumPolicy::Report).unwrap();
    // The writer laid the bodies out in the suggested optimal order.
    assert_eq!(reader.tags(), vec![FontTag::HEAD, CMAP, GLYF]);
}

#[test]
fn test_reader_table_data_round_trips() {
    let data = build_woff(None, None);
    let mut reader =
        Woff1Reader::new(Cursor::new(data), ChecksumPolicy::Enforce).unwrap();
    assert_eq!(reader.table_data(&FontTag::HEAD).unwrap(), vec![0_u8; 54]);
    assert_eq!(reader.table_data(&CMAP).unwrap(), compressible_data(64));
    assert_eq!(reader.table_data(&GLYF).unwrap(), raw_data());
}

#[test]
fn test_reader_table_data_unknown_tag() {
    let data = build_woff(None, None);
    let mut reader =
        Woff1Reader::new(Cursor::new(data), ChecksumPolicy::Report).unwrap();
    let result = reader.table_data(&FontTag::new(*b"loca"));
    assert!(matches!(result.unwrap_err(), FontIoError::TableNotFound(_)));
}

#[test]
fn test_reader_compressed_table_passthrough() {
    let data = build_woff(None, None);
    let mut reader =
        Woff1Reader::new(Cursor::new(data), ChecksumPolicy::Report).unwrap();
    let (entry, stored) = reader.compressed_table(&CMAP).unwrap();
    assert!(entry.is_compressed());
    assert_eq!(stored.len() as u32, entry.comp_length());
    assert_eq!(
        crate::compression::decompress(&stored).unwrap(),
        compressible_data(64)
    );
    // A stored-raw table comes back exactly as supplied.
    let (entry, stored) = reader.compressed_table(&GLYF).unwrap();
    assert!(!entry.is_compressed());
    assert_eq!(stored, raw_data());
}

#[test]
fn test_reader_checksum_enforcement() {
    let mut data = build_woff(None, None);
    let offset = {
        let reader =
            Woff1Reader::new(Cursor::new(data.clone()), ChecksumPolicy::Report)
                .unwrap();
        reader.directory().entry(&GLYF).unwrap().offset as usize
    };
    // Corrupt the raw 'glyf' data in place.
    data[offset] ^= 0xff;
    let mut reader =
        Woff1Reader::new(Cursor::new(data.clone()), ChecksumPolicy::Enforce)
            .unwrap();
    let result = reader.table_data(&GLYF);
    assert!(matches!(
        result.unwrap_err(),
        FontIoError::ChecksumMismatch { .. }
    ));
    // The same font read with the reporting policy yields the data anyway.
    let mut reader =
        Woff1Reader::new(Cursor::new(data), ChecksumPolicy::Report).unwrap();
    assert!(reader.table_data(&GLYF).is_ok());
}

#[test]
fn test_reader_metadata_and_private_data() {
    let metadata = b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
<metadata version=\"1.0\"><uniqueid id=\"com.ex.f.1\"/></metadata>";
    let private_data = [0xde, 0xad, 0xbe, 0xef];
    let data = build_woff(Some(metadata), Some(&private_data));
    let mut reader =
        Woff1Reader::new(Cursor::new(data), ChecksumPolicy::Report).unwrap();
    assert_eq!(reader.metadata().unwrap().unwrap(), metadata.to_vec());
    let (compressed, orig_length, length) =
        reader.compressed_metadata().unwrap().unwrap();
    assert_eq!(orig_length as usize, metadata.len());
    assert_eq!(compressed.len() as u32, length);
    assert_eq!(reader.private_data().unwrap().unwrap(), private_data.to_vec());
}

#[test]
fn test_reader_without_metadata_or_private_data() {
    let data = build_woff(None, None);
    let mut reader =
        Woff1Reader::new(Cursor::new(data), ChecksumPolicy::Report).unwrap();
    assert!(reader.metadata().unwrap().is_none());
    assert!(reader.compressed_metadata().unwrap().is_none());
    assert!(reader.private_data().unwrap().is_none());
}

#[test]
fn test_reader_metadata_length_mismatch() {
    let metadata = b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
<metadata version=\"1.0\"/>";
    let mut data = build_woff(Some(metadata), None);
    // Lower the declared metaOrigLength (header bytes 32..36).
    data[32..36].copy_from_slice(&1_u32.to_be_bytes());
    let mut reader =
        Woff1Reader::new(Cursor::new(data), ChecksumPolicy::Report).unwrap();
    let result = reader.metadata();
    assert!(matches!(
        result.unwrap_err(),
        FontIoError::LengthMismatch { expected: 1, .. }
    ));
}

#[test]
#[tracing_test::traced_test]
fn test_reader_reports_bad_checksum_in_log() {
    let mut data = build_woff(None, None);
    let offset = {
        let reader =
            Woff1Reader::new(Cursor::new(data.clone()), ChecksumPolicy::Report)
                .unwrap();
        reader.directory().entry(&GLYF).unwrap().offset as usize
    };
    data[offset] ^= 0xff;
    let mut reader =
        Woff1Reader::new(Cursor::new(data), ChecksumPolicy::Report).unwrap();
    reader.table_data(&GLYF).unwrap();
    assert!(logs_contain("bad checksum for 'glyf' table"));
}

#[test]
fn test_reader_close_releases_stream() {
    let data = build_woff(None, None);
    let reader =
        Woff1Reader::new(Cursor::new(data.clone()), ChecksumPolicy::Report)
            .unwrap();
    let stream = reader.close();
    assert_eq!(stream.into_inner(), data);
}
