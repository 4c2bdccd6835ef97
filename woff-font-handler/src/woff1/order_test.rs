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

//! Tests for the table ordering module

use super::*;

fn tags(names: &[&[u8; 4]]) -> Vec<FontTag> {
    names.iter().map(|name| FontTag::new(**name)).collect()
}

#[test]
fn test_recommended_order_truetype() {
    let order = recommended_table_order(&tags(&[
        b"glyf", b"cmap", b"head", b"loca", b"hmtx",
    ]));
    assert_eq!(order, tags(&[b"head", b"hmtx", b"cmap", b"loca", b"glyf"]));
}

#[test]
fn test_recommended_order_cff() {
    let order =
        recommended_table_order(&tags(&[b"CFF ", b"name", b"head", b"cmap"]));
    assert_eq!(order, tags(&[b"head", b"name", b"cmap", b"CFF "]));
}

#[test]
fn test_recommended_order_unknown_tags_sorted_after() {
    let order =
        recommended_table_order(&tags(&[b"zzzz", b"head", b"aaaa", b"cmap"]));
    assert_eq!(order, tags(&[b"head", b"cmap", b"aaaa", b"zzzz"]));
}

#[test]
fn test_recommended_order_dsig_last() {
    let order =
        recommended_table_order(&tags(&[b"DSIG", b"head", b"aaaa", b"cmap"]));
    assert_eq!(order, tags(&[b"head", b"cmap", b"aaaa", b"DSIG"]));
}

#[test]
fn test_apply_table_order() {
    let ordered = apply_table_order(
        tags(&[b"aaaa", b"bbbb", b"cccc"]),
        &tags(&[b"cccc", b"aaaa"]),
    );
    assert_eq!(ordered, tags(&[b"cccc", b"aaaa", b"bbbb"]));
}

#[test]
fn test_apply_table_order_ignores_absent_tags() {
    let ordered = apply_table_order(
        tags(&[b"aaaa", b"bbbb"]),
        &tags(&[b"zzzz", b"bbbb"]),
    );
    assert_eq!(ordered, tags(&[b"bbbb", b"aaaa"]));
}
