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

//! Tests for WOFF1 font module

use std::io::Cursor;

use super::*;

const CMAP: FontTag = FontTag::new(*b"cmap");
const GLYF: FontTag = FontTag::new(*b"glyf");

fn compressible_data(len: usize) -> Vec<u8> {
    b"abcdefgh".iter().copied().cycle().take(len).collect()
}

fn sample_metadata() -> XmlElement {
    let mut tree = XmlElement::new("metadata");
    tree.set_attribute("version", "1.0");
    let mut uniqueid = XmlElement::new("uniqueid");
    uniqueid.set_attribute("id", "com.ex.f.1");
    tree.push_child(uniqueid);
    tree
}

fn sample_font() -> Woff1Font {
    let mut font = Woff1Font::new(Magic::TrueType);
    font.set_version(1, 0);
    font.set_table_bytes(FontTag::HEAD, vec![0_u8; 54]);
    font.set_table_bytes(CMAP, compressible_data(80));
    font.set_table_bytes(GLYF, vec![9, 8, 7, 6]);
    font.set_metadata(sample_metadata());
    font.set_private_data(vec![0xaa, 0xbb]);
    font
}

fn save_to_bytes(font: &Woff1Font, options: &SaveOptions) -> Vec<u8> {
    font.save(Cursor::new(Vec::new()), options)
        .unwrap()
        .into_inner()
}

#[test]
fn test_empty_font_save_fails_wrong_table_count() {
    let font = Woff1Font::new(Magic::OpenType);
    let result = font.save(Cursor::new(Vec::new()), &SaveOptions::default());
    assert!(matches!(
        result.unwrap_err(),
        FontIoError::SaveError(FontSaveError::WrongTableCount {
            expected: 0,
            found: 0,
        })
    ));
}

#[test]
fn test_font_accessors() {
    let mut font = sample_font();
    assert_eq!(font.flavor(), Magic::TrueType as u32);
    assert_eq!(font.major_version(), 1);
    assert_eq!(font.minor_version(), 0);
    assert!(font.contains_table(&FontTag::HEAD));
    assert_eq!(font.table_bytes(&GLYF), Some([9, 8, 7, 6].as_slice()));
    assert_eq!(font.metadata().unwrap().tag(), "metadata");
    assert_eq!(font.private_data(), Some([0xaa, 0xbb].as_slice()));
    assert!(font.remove_table(&GLYF));
    assert!(!font.remove_table(&GLYF));
    font.clear_metadata();
    assert!(font.metadata().is_none());
}

#[test]
fn test_font_tags_follow_recommended_order() {
    let font = sample_font();
    assert_eq!(font.tags(), vec![FontTag::HEAD, CMAP, GLYF]);
    // Stable across calls while unchanged.
    assert_eq!(font.tags(), font.tags());
}

#[test]
fn test_font_explicit_table_order() {
    let mut font = sample_font();
    font.set_table_order(vec![GLYF, FontTag::HEAD]);
    // Named tags lead, the rest follow in tag order.
    assert_eq!(font.tags(), vec![GLYF, FontTag::HEAD, CMAP]);
}

#[test]
fn test_font_save_and_reread() {
    let font = sample_font();
    let data = save_to_bytes(&font, &SaveOptions::default());
    let read_back = Woff1Font::from_reader(&mut Cursor::new(data)).unwrap();
    assert_eq!(read_back.flavor(), font.flavor());
    assert_eq!(read_back.major_version(), 1);
    assert_eq!(read_back.table_bytes(&FontTag::HEAD).unwrap().len(), 54);
    assert_eq!(
        read_back.table_bytes(&CMAP).unwrap(),
        compressible_data(80).as_slice()
    );
    assert_eq!(read_back.table_bytes(&GLYF).unwrap(), &[9, 8, 7, 6]);
    let metadata = read_back.metadata().unwrap();
    assert_eq!(metadata.tag(), "metadata");
    assert_eq!(metadata.children()[0].attribute("id"), Some("com.ex.f.1"));
    assert_eq!(read_back.private_data(), Some([0xaa, 0xbb].as_slice()));
}

#[test]
fn test_font_round_trip_is_byte_identical() {
    // A font read from disk and saved without recompression reuses the
    // stored compressed forms, reproducing the file bit for bit.
    let data = save_to_bytes(&sample_font(), &SaveOptions::default());
    let font = Woff1Font::from_reader(&mut Cursor::new(data.clone())).unwrap();
    let rewritten = save_to_bytes(&font, &SaveOptions::default());
    assert_eq!(rewritten, data);
}

#[test]
fn test_font_recompression_still_round_trips() {
    let data = save_to_bytes(&sample_font(), &SaveOptions::default());
    let font = Woff1Font::from_reader(&mut Cursor::new(data)).unwrap();
    let options = SaveOptions {
        recompress_tables: true,
        ..SaveOptions::default()
    };
    let rewritten = save_to_bytes(&font, &options);
    let read_back =
        Woff1Font::from_reader(&mut Cursor::new(rewritten)).unwrap();
    assert_eq!(
        read_back.table_bytes(&CMAP).unwrap(),
        compressible_data(80).as_slice()
    );
}

#[test]
fn test_font_mutation_invalidates_cached_compressed_form() {
    let data = save_to_bytes(&sample_font(), &SaveOptions::default());
    let mut font = Woff1Font::from_reader(&mut Cursor::new(data)).unwrap();
    font.set_table_bytes(CMAP, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    let rewritten = save_to_bytes(&font, &SaveOptions::default());
    let read_back =
        Woff1Font::from_reader(&mut Cursor::new(rewritten)).unwrap();
    assert_eq!(
        read_back.table_bytes(&CMAP).unwrap(),
        &[1, 2, 3, 4, 5, 6, 7, 8]
    );
}

#[test]
fn test_font_with_dsig_requires_fixed_layout() {
    let mut font = sample_font();
    font.set_table_bytes(FontTag::DSIG, vec![0_u8; 8]);
    // Default options reorder and recalculate; both are forbidden.
    let result = font.save(Cursor::new(Vec::new()), &SaveOptions::default());
    assert!(matches!(
        result.unwrap_err(),
        FontIoError::SaveError(FontSaveError::DsigRequiresFixedLayout)
    ));
    // A fixed layout alone is not enough without a complete order.
    let fixed = SaveOptions {
        reorder_tables: false,
        recalculate_head_checksum: false,
        ..SaveOptions::default()
    };
    let result = font.save(Cursor::new(Vec::new()), &fixed);
    assert!(matches!(
        result.unwrap_err(),
        FontIoError::SaveError(FontSaveError::DsigRequiresFixedLayout)
    ));
    // With a complete caller-supplied order the save goes through.
    font.set_table_order(vec![FontTag::HEAD, CMAP, GLYF, FontTag::DSIG]);
    let data = save_to_bytes(&font, &fixed);
    let read_back = Woff1Font::from_reader(&mut Cursor::new(data)).unwrap();
    assert!(read_back.contains_table(&FontTag::DSIG));
}
