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

//! Various font Magic bytes.

use super::error::FontIoError;

/// 32-bit font-format identification magic number.
///
/// For WOFF 1.0 the first three values are the permitted `flavor` tags,
/// identifying the kind of sfnt the container wraps; `Woff` is the container
/// signature itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Magic {
    /// 'OTTO' - OpenType with CFF outlines
    OpenType = 0x4f54544f,
    /// FIXED 1.0 - TrueType
    TrueType = 0x00010000,
    /// 'true' - TrueType fonts for OS X / iOS
    AppleTrue = 0x74727565,
    /// 'wOFF' - WOFF 1.0
    Woff = 0x774f4646,
}

impl Magic {
    /// Whether this magic number is a valid WOFF 1.0 `flavor` value, i.e.
    /// identifies an sfnt type that can be wrapped.
    pub fn is_sfnt_flavor(value: u32) -> bool {
        matches!(
            Magic::try_from(value),
            Ok(Magic::OpenType | Magic::TrueType | Magic::AppleTrue)
        )
    }
}

/// Used to attempt conversion from u32 to a Magic value.
impl TryFrom<u32> for Magic {
    type Error = FontIoError;

    /// Try to match the given u32 value to a known font-format magic number.
    fn try_from(v: u32) -> core::result::Result<Self, Self::Error> {
        match v {
            ot if ot == Magic::OpenType as u32 => Ok(Magic::OpenType),
            tt if tt == Magic::TrueType as u32 => Ok(Magic::TrueType),
            at if at == Magic::AppleTrue as u32 => Ok(Magic::AppleTrue),
            w1 if w1 == Magic::Woff as u32 => Ok(Magic::Woff),
            _unknown => Err(FontIoError::UnknownMagic(v)),
        }
    }
}

#[cfg(test)]
#[path = "magic_test.rs"]
mod tests;
