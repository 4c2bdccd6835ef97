// Copyright 2024-2025 Monotype Imaging Inc.
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

//! Reader, writer, and structural validator for the WOFF 1.0 web-font
//! container format.
//!
//! A WOFF file wraps an sfnt-style font (TrueType/OpenType) by packaging
//! its tables individually with optional per-table zlib compression, plus
//! an optional compressed XML metadata block and an optional opaque
//! private-data block. This crate can take such a file apart
//! ([`woff1::reader::Woff1Reader`]), put one back together bit-exactly
//! ([`woff1::writer::Woff1Writer`], [`woff1::font::Woff1Font`]), and check
//! an arbitrary byte stream against every structural requirement the WOFF
//! 1.0 specification imposes ([`validation::validate`]).
//!
//! # Example
//! ```no_run
//! use std::io::Cursor;
//! use woff_font_handler::error::FontIoError;
//! use woff_font_handler::woff1::font::{SaveOptions, Woff1Font};
//!
//! fn main() -> Result<(), FontIoError> {
//!     let woff_data = std::fs::read("font.woff").unwrap();
//!     let mut reader = Cursor::new(woff_data);
//!     let font = Woff1Font::from_reader(&mut reader)?;
//!
//!     // Repack at maximum compression, recomputing the 'head'
//!     // checkSumAdjustment for the equivalent sfnt.
//!     let mut dest = Cursor::new(Vec::new());
//!     font.save(&mut dest, &SaveOptions::default())?;
//!     Ok(())
//! }
//! ```

use std::{
    io::{Read, Seek, Write},
    num::Wrapping,
};

use tag::FontTag;

pub mod compression;
pub mod data;
pub mod error;
pub mod magic;
pub mod sfnt;
pub mod tag;
pub(crate) mod utils;
pub mod validation;
pub mod woff1;

/// Trait for computing a checksum on font data.
pub trait FontDataChecksum {
    /// Computes the checksum for the font data.
    fn checksum(&self) -> Wrapping<u32>;
}

/// Trait for reading font data from a reader.
pub trait FontDataRead
where
    Self: Sized,
{
    /// The error type for reading the data.
    type Error;
    /// Reads the font data from a reader.
    fn from_reader<T: Read + Seek + ?Sized>(
        reader: &mut T,
    ) -> Result<Self, Self::Error>;
}

/// Trait for reading font data from a reader, with exact size information.
pub trait FontDataExactRead
where
    Self: Sized,
{
    /// The error type for reading the data.
    type Error;

    /// Reads the font data from a reader, starting at a specific offset and
    /// reading a specific length.
    fn from_reader_exact<T: Read + Seek + ?Sized>(
        reader: &mut T,
        offset: u64,
        size: usize,
    ) -> Result<Self, Self::Error>;
}

/// Trait for writing font data to a writer.
pub trait FontDataWrite {
    /// The error type for writing the data.
    type Error;
    /// Writes the font data to a writer.
    fn write<TDest: Write + ?Sized>(
        &self,
        dest: &mut TDest,
    ) -> Result<(), Self::Error>;
}

/// Trait for writing font data to a writer, with the ability to modify the
/// object.
pub trait MutFontDataWrite {
    /// The error type for writing the data.
    type Error;
    /// Writes the font data to a writer.
    fn write<TDest: Write + ?Sized>(
        &mut self,
        dest: &mut TDest,
    ) -> Result<(), Self::Error>;
}

/// A font header.
pub trait FontHeader: FontDataRead + FontDataChecksum + FontDataWrite {
    /// Returns the number of tables in the font.
    fn num_tables(&self) -> u16;
}

/// A directory entry in a font directory.
pub trait FontDirectoryEntry:
    FontDataRead + FontDataChecksum + FontDataWrite
{
    /// Returns the tag naming the table this entry describes.
    fn tag(&self) -> FontTag;
    /// Returns the checksum recorded for the table data.
    fn data_checksum(&self) -> u32;
    /// Returns the offset to the table data.
    fn offset(&self) -> u32;
    /// Returns the stored length of the table data.
    fn length(&self) -> u32;
}

/// A directory in a font.
pub trait FontDirectory:
    FontDataExactRead + FontDataChecksum + FontDataWrite
{
    /// The type of entry in the directory.
    type Entry: FontDirectoryEntry;
    /// Reads the font directory from a reader, with a specified number of
    /// entries.
    fn from_reader_with_count<T: Read + Seek + ?Sized>(
        reader: &mut T,
        entry_count: usize,
    ) -> Result<Self, <Self as FontDataExactRead>::Error>;
    /// Returns a reference to the entries in this directory.
    fn entries(&self) -> &[Self::Entry];
    /// Returns the directory's entries arranged in increasing order of their
    /// `offset` field, which is the order the table data occupies the file.
    fn physical_order(&self) -> Vec<&Self::Entry>;
}

/// A table in a font.
#[allow(clippy::len_without_is_empty)] // is_empty has a default impl below.
pub trait FontTable: FontDataChecksum + FontDataWrite {
    /// Returns the raw bytes of the table.
    fn data(&self) -> &[u8];
    /// Returns the length of the table.
    fn len(&self) -> u32;
    /// Returns whether the table is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
