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

//! SFNT font format support.
//!
//! A WOFF file never stores an sfnt header or directory; they are
//! synthesized here, both when deriving the 'head' checkSumAdjustment for
//! the equivalent sfnt file and when checking a plain sfnt stream for
//! repackaging conformance.

pub mod checksum;
pub mod conformance;
pub mod directory;
pub mod header;
