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

//! Tests for the data module

use super::*;

#[test]
fn test_data_read_exact() {
    let mut reader = std::io::Cursor::new(b"0123456789".to_vec());
    let data = Data::from_reader_exact(&mut reader, 2, 4).unwrap();
    assert_eq!(data.data(), b"2345");
    assert_eq!(data.len(), 4);
}

#[test]
fn test_data_read_exact_past_end() {
    let mut reader = std::io::Cursor::new(b"0123".to_vec());
    let result = Data::from_reader_exact(&mut reader, 2, 4);
    assert!(matches!(result.unwrap_err(), FontIoError::IoError(_)));
}

#[test]
fn test_data_write_pads_to_four_bytes() {
    let data = Data::new(b"12345".to_vec());
    let mut dest = std::io::Cursor::new(Vec::new());
    data.write(&mut dest).unwrap();
    assert_eq!(dest.into_inner(), b"12345\0\0\0".to_vec());
}

#[test]
fn test_data_write_aligned_needs_no_padding() {
    let data = Data::new(b"1234".to_vec());
    let mut dest = std::io::Cursor::new(Vec::new());
    data.write(&mut dest).unwrap();
    assert_eq!(dest.into_inner(), b"1234".to_vec());
}

#[test]
fn test_data_checksum() {
    let data = Data::new(vec![0x00, 0x00, 0x00, 0x2a]);
    assert_eq!(data.checksum(), Wrapping(42));
}

#[test]
fn test_data_set_data() {
    let mut data = Data::default();
    assert!(data.is_empty());
    data.set_data(vec![1, 2, 3]);
    assert_eq!(data.data(), &[1, 2, 3]);
    assert!(!data.is_empty());
}
