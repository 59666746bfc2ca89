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

//! Bounded copy-out into caller buffers.
//!
//! Copies are zero-terminated: a destination of capacity `n` holds at most
//! `n - 1` bytes of text followed by a `0` byte. Nothing is ever written
//! past `n`.

use crate::entry::Entry;
use crate::error::{ConfError, ConfResult};

/// Maximum name copy-out capacity in bytes, terminator included.
///
/// Name copy-out uses `min(dest.len(), MAX_KEY_LEN)` regardless of the
/// buffer the caller passes, so names longer than `MAX_KEY_LEN - 1` bytes
/// are cut short and reported as [`CopyStatus::Truncated`].
pub const MAX_KEY_LEN: usize = 64;

/// Outcome of a copy-out accessor.
///
/// # Examples
///
/// ```rust
/// use readconf::{ConfReader, CopyStatus};
/// use std::io::Cursor;
///
/// let mut reader = ConfReader::from_reader(Cursor::new("greeting = hello world\n")).unwrap();
/// reader.read().unwrap();
///
/// let mut value = [0u8; 6];
/// let status = reader.search_into("greeting", &mut value).unwrap();
/// assert_eq!(status, CopyStatus::Truncated { overflow: 6 });
/// assert_eq!(&value, b"hello\0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyStatus {
    /// Everything fit; `len` value bytes precede the terminator.
    Complete { len: usize },
    /// The name or the value was cut short. `overflow` is the larger of the
    /// two counts of bytes that did not fit.
    Truncated { overflow: usize },
    /// No entry matched. Destination buffers hold an empty string.
    NotFound,
}

impl CopyStatus {
    /// Returns true unless the lookup found nothing.
    #[inline]
    pub fn is_found(&self) -> bool {
        !matches!(self, Self::NotFound)
    }

    #[inline]
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::Truncated { .. })
    }

    /// Number of bytes that did not fit, zero when nothing was truncated.
    #[inline]
    pub fn overflow(&self) -> usize {
        match self {
            Self::Truncated { overflow } => *overflow,
            _ => 0,
        }
    }
}

/// Reject destinations that cannot even hold a terminator.
pub(crate) fn require_capacity(dest: &[u8], what: &str) -> ConfResult<()> {
    if dest.is_empty() {
        return Err(ConfError::invalid(format!("{} buffer has zero capacity", what)));
    }
    Ok(())
}

/// Copy `src` into `dest` with a trailing zero byte.
pub(crate) fn copy_terminated(src: &[u8], dest: &mut [u8]) -> CopyStatus {
    let Some(room) = dest.len().checked_sub(1) else {
        return CopyStatus::Truncated {
            overflow: src.len(),
        };
    };

    if src.len() <= room {
        dest[..src.len()].copy_from_slice(src);
        dest[src.len()] = 0;
        CopyStatus::Complete { len: src.len() }
    } else {
        dest[..room].copy_from_slice(&src[..room]);
        dest[room] = 0;
        CopyStatus::Truncated {
            overflow: src.len() - room,
        }
    }
}

/// Copy a name, bounded by [`MAX_KEY_LEN`] as well as the buffer.
pub(crate) fn copy_name(name: &[u8], dest: &mut [u8]) -> CopyStatus {
    let cap = dest.len().min(MAX_KEY_LEN);
    copy_terminated(name, &mut dest[..cap])
}

/// Copy an entry's name and value, reporting truncation of either.
pub(crate) fn copy_entry(entry: &Entry, name: &mut [u8], value: &mut [u8]) -> CopyStatus {
    let name_status = copy_name(entry.name(), name);
    let value_status = copy_terminated(entry.value().as_bytes(), value);

    match name_status.overflow().max(value_status.overflow()) {
        0 => value_status,
        overflow => CopyStatus::Truncated { overflow },
    }
}

/// Leave an empty string in `dest`.
#[inline]
pub(crate) fn clear(dest: &mut [u8]) {
    if let Some(first) = dest.first_mut() {
        *first = 0;
    }
}
