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

//! SFNT font file header.

use std::{
    io::{Read, Seek, Write},
    num::Wrapping,
};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::{
    error::FontIoError, utils::u32_from_u16_pair, FontDataChecksum,
    FontDataExactRead, FontDataRead, FontDataWrite, FontHeader,
};

/// SFNT header, from the OpenType spec.
///
/// The version field is kept as a raw u32 rather than a [`crate::magic::Magic`]
/// value so that streams with an unrecognized sfnt version can still be
/// examined by the conformance checker.
#[derive(Copy, Clone, Debug)]
#[allow(non_snake_case)] // As defined by the OpenType spec.
pub struct SfntHeader {
    /// The SFNT version (the WOFF `flavor`).
    pub sfntVersion: u32,
    /// The number of tables in the font.
    pub numTables: u16,
    /// The search range.
    pub searchRange: u16,
    /// The entry selector.
    pub entrySelector: u16,
    /// The range shift.
    pub rangeShift: u16,
}

impl SfntHeader {
    /// The size of an SFNT header.
    pub(crate) const SIZE: usize = 12;

    /// Builds the header for the equivalent sfnt file of a WOFF with the
    /// given flavor and table count, deriving the binary-search fields.
    pub fn synthesized(flavor: u32, num_tables: u16) -> Self {
        let (search_range, entry_selector, range_shift) =
            crate::utils::search_range(num_tables);
        Self {
            sfntVersion: flavor,
            numTables: num_tables,
            searchRange: search_range,
            entrySelector: entry_selector,
            rangeShift: range_shift,
        }
    }
}

impl FontDataRead for SfntHeader {
    type Error = FontIoError;

    fn from_reader<T: Read + Seek + ?Sized>(
        reader: &mut T,
    ) -> Result<Self, Self::Error> {
        Ok(Self {
            sfntVersion: reader.read_u32::<BigEndian>()?,
            numTables: reader.read_u16::<BigEndian>()?,
            searchRange: reader.read_u16::<BigEndian>()?,
            entrySelector: reader.read_u16::<BigEndian>()?,
            rangeShift: reader.read_u16::<BigEndian>()?,
        })
    }
}

impl FontDataExactRead for SfntHeader {
    type Error = FontIoError;

    fn from_reader_exact<T: Read + Seek + ?Sized>(
        reader: &mut T,
        offset: u64,
        size: usize,
    ) -> Result<Self, Self::Error> {
        if size != Self::SIZE {
            return Err(FontIoError::InvalidSizeForHeader(size));
        }
        reader.seek(std::io::SeekFrom::Start(offset))?;
        Self::from_reader(reader)
    }
}

impl FontDataWrite for SfntHeader {
    type Error = FontIoError;

    fn write<TDest: Write + ?Sized>(
        &self,
        dest: &mut TDest,
    ) -> Result<(), Self::Error> {
        dest.write_u32::<BigEndian>(self.sfntVersion)?;
        dest.write_u16::<BigEndian>(self.numTables)?;
        dest.write_u16::<BigEndian>(self.searchRange)?;
        dest.write_u16::<BigEndian>(self.entrySelector)?;
        dest.write_u16::<BigEndian>(self.rangeShift)?;
        Ok(())
    }
}

impl FontDataChecksum for SfntHeader {
    fn checksum(&self) -> Wrapping<u32> {
        // 0x00
        Wrapping(self.sfntVersion)
            // 0x04
            + u32_from_u16_pair(self.numTables, self.searchRange)
            // 0x08
            + u32_from_u16_pair(self.entrySelector, self.rangeShift)
    }
}

impl FontHeader for SfntHeader {
    fn num_tables(&self) -> u16 {
        self.numTables
    }
}

#[cfg(test)]
#[path = "header_test.rs"]
mod tests;
