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

//! Tests for the magic module

use super::*;

#[test]
fn test_magic_from_u32() {
    assert_eq!(Magic::try_from(0x4f54544f_u32).unwrap(), Magic::OpenType);
    assert_eq!(Magic::try_from(0x00010000_u32).unwrap(), Magic::TrueType);
    assert_eq!(Magic::try_from(0x74727565_u32).unwrap(), Magic::AppleTrue);
    assert_eq!(Magic::try_from(0x774f4646_u32).unwrap(), Magic::Woff);
}

#[test]
fn test_magic_from_u32_unknown() {
    let result = Magic::try_from(0xdeadbeef_u32);
    assert!(matches!(
        result.unwrap_err(),
        FontIoError::UnknownMagic(0xdeadbeef)
    ));
}

#[test]
fn test_sfnt_flavors() {
    assert!(Magic::is_sfnt_flavor(Magic::OpenType as u32));
    assert!(Magic::is_sfnt_flavor(Magic::TrueType as u32));
    assert!(Magic::is_sfnt_flavor(Magic::AppleTrue as u32));
    // The WOFF signature is not itself a flavor.
    assert!(!Magic::is_sfnt_flavor(Magic::Woff as u32));
    assert!(!Magic::is_sfnt_flavor(0x12345678));
}
