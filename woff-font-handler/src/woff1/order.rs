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

//! Suggested table ordering from the OpenType / Open Font Format
//! specification, used when writing with table reordering enabled.

use crate::tag::FontTag;

/// The suggested physical order for tables in a TrueType-flavored font.
const TRUE_TYPE_ORDER: &[[u8; 4]] = &[
    *b"head", *b"hhea", *b"maxp", *b"OS/2", *b"hmtx", *b"LTSH", *b"VDMX",
    *b"hdmx", *b"cmap", *b"fpgm", *b"prep", *b"cvt ", *b"loca", *b"glyf",
    *b"kern", *b"name", *b"post", *b"gasp", *b"PCLT",
];

/// The suggested physical order for tables in a CFF-flavored font.
const CFF_ORDER: &[[u8; 4]] = &[
    *b"head", *b"hhea", *b"maxp", *b"OS/2", *b"name", *b"cmap", *b"post",
    *b"CFF ",
];

/// Arranges the given tags into the OTF/OFF suggested optimal physical
/// order: tables named in the preferred list (chosen by whether a 'CFF '
/// table is present) come first, in list order; all remaining tables follow
/// in ascending tag order, with 'DSIG' forced to the very end.
pub(crate) fn recommended_table_order(tags: &[FontTag]) -> Vec<FontTag> {
    let mut remaining: Vec<FontTag> = tags.to_vec();
    remaining.sort();
    if let Some(position) =
        remaining.iter().position(|tag| *tag == FontTag::DSIG)
    {
        let dsig = remaining.remove(position);
        remaining.push(dsig);
    }
    let preferred = if remaining.contains(&FontTag::CFF) {
        CFF_ORDER
    } else {
        TRUE_TYPE_ORDER
    };
    apply_table_order(
        remaining,
        &preferred
            .iter()
            .map(|data| FontTag::new(*data))
            .collect::<Vec<_>>(),
    )
}

/// Pulls the tags named in `order` to the front (in `order`'s order),
/// leaving every other tag behind in its current relative order.
pub(crate) fn apply_table_order(
    tags: Vec<FontTag>,
    order: &[FontTag],
) -> Vec<FontTag> {
    let mut ordered = Vec::with_capacity(tags.len());
    let mut remaining = tags;
    for tag in order {
        if let Some(position) =
            remaining.iter().position(|candidate| candidate == tag)
        {
            ordered.push(remaining.remove(position));
        }
    }
    ordered.extend(remaining);
    ordered
}

#[cfg(test)]
#[path = "order_test.rs"]
mod tests;
