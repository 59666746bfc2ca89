// Dweve readconf - Streaming key/value configuration reader
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Parsed configuration entries.

use std::fmt;

/// Bytes written by value copy-out for a line that had no `=`.
///
/// A newline can never occur inside a parsed value, so this cannot collide
/// with real content.
pub const KEYLESS_VALUE: &[u8] = b"\n";

/// Value of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryValue {
    /// The line had no `=` separator (for example `[Section1]`).
    Keyless,
    /// The trimmed text after the first `=`. May be empty.
    Text(Vec<u8>),
}

impl EntryValue {
    /// Returns true for a line without `=`.
    #[inline]
    pub fn is_keyless(&self) -> bool {
        matches!(self, Self::Keyless)
    }

    /// The value text, or `None` for a keyless line.
    #[inline]
    pub fn text(&self) -> Option<&[u8]> {
        match self {
            Self::Keyless => None,
            Self::Text(text) => Some(text),
        }
    }

    /// The value text as UTF-8, or `None` for a keyless line or invalid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        self.text().and_then(|t| std::str::from_utf8(t).ok())
    }

    /// Bytes produced by value copy-out: the text, or [`KEYLESS_VALUE`].
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Keyless => KEYLESS_VALUE,
            Self::Text(text) => text,
        }
    }
}

/// One parsed line: a non-empty name and its value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry {
    name: Vec<u8>,
    value: EntryValue,
}

impl Entry {
    pub(crate) fn new(name: Vec<u8>, value: EntryValue) -> Self {
        debug_assert!(!name.is_empty());
        Self { name, value }
    }

    /// The trimmed key, or the whole trimmed line for a keyless entry.
    #[inline]
    pub fn name(&self) -> &[u8] {
        &self.name
    }

    /// The name as UTF-8, if valid.
    pub fn name_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.name).ok()
    }

    #[inline]
    pub fn value(&self) -> &EntryValue {
        &self.value
    }

    #[inline]
    pub fn is_keyless(&self) -> bool {
        self.value.is_keyless()
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = String::from_utf8_lossy(&self.name);
        match &self.value {
            EntryValue::Keyless => write!(f, "{}", name),
            EntryValue::Text(text) => write!(f, "{} = {}", name, String::from_utf8_lossy(text)),
        }
    }
}
