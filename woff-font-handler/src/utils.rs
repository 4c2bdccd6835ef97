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

//! Various utilities for working with fonts.

use std::{mem::size_of, num::Wrapping};

use byteorder::{BigEndian, ByteOrder};

use crate::tag::FontTag;

/// Round the given value up to the next multiple of four (4).
pub fn align_to_four(size: u32) -> u32 {
    (size + 3) & (!3)
}

/// Computes a 32-bit big-endian OpenType-style checksum on the given byte
/// array, which is presumed to start on a 4-byte boundary.
///
/// # Remarks
/// Trailing bytes past the last whole fullword are summed as if the data
/// were zero-padded to a 4-byte multiple; the pad bytes themselves cannot
/// change the total.
pub(crate) fn checksum(bytes: &[u8]) -> Wrapping<u32> {
    let mut words = bytes.chunks_exact(size_of::<u32>());
    let mut cksum = words
        .by_ref()
        .fold(Wrapping(0_u32), |running_cksum, exact_chunk| {
            running_cksum + Wrapping(BigEndian::read_u32(exact_chunk))
        });
    let remainder = words.remainder();
    if !remainder.is_empty() {
        let mut tail = [0_u8; size_of::<u32>()];
        tail[..remainder.len()].copy_from_slice(remainder);
        cksum += Wrapping(BigEndian::read_u32(&tail));
    }
    cksum
}

/// Computes the checksum for a named table's uncompressed data.
///
/// The 'head' table's checkSumAdjustment field (bytes 8..12) is treated as
/// zero during the sum, per the sfnt specification.
pub(crate) fn table_checksum(tag: &FontTag, data: &[u8]) -> Wrapping<u32> {
    let mut cksum = checksum(data);
    if *tag == FontTag::HEAD && data.len() >= 12 {
        // The field is fullword-aligned, so it contributes exactly one
        // addend which can be backed out.
        cksum -= Wrapping(BigEndian::read_u32(&data[8..12]));
    }
    cksum
}

/// Assembles two u16 values (with `hi` being the more-significant u16
/// halfword, and `lo` being the less-significant u16 halfword) into a u32,
/// returning a u32 fullword composed of the given halfwords, with `hi` in
/// the more-significant position.
pub(crate) fn u32_from_u16_pair(hi: u16, lo: u16) -> Wrapping<u32> {
    Wrapping((hi as u32 * 65536) + lo as u32)
}

/// Derives the sfnt header's binary-search fields from the table count:
/// with k = floor(log2(n)), searchRange is 2^k * 16, entrySelector is k,
/// and rangeShift is n * 16 - searchRange.
///
/// Returns `(searchRange, entrySelector, rangeShift)`.
pub(crate) fn search_range(num_tables: u16) -> (u16, u16, u16) {
    if num_tables == 0 {
        return (0, 0, 0);
    }
    let entry_selector = num_tables.ilog2() as u16;
    let search_range = 2_u16.pow(entry_selector as u32) * 16;
    let range_shift = num_tables * 16 - search_range;
    (search_range, entry_selector, range_shift)
}

#[cfg(test)]
#[path = "utils_test.rs"]
mod tests;
