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

//! Insertion-ordered entry store.

use crate::entry::Entry;
use crate::error::{ConfError, ConfResult};

/// Append-only sequence of entries in file order.
///
/// Positions are plain indices, so a cursor is never invalidated by growth.
#[derive(Debug, Default)]
pub(crate) struct EntryStore {
    entries: Vec<Entry>,
}

impl EntryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append at the tail, returning the new entry's position.
    pub(crate) fn push(&mut self, entry: Entry) -> ConfResult<usize> {
        self.entries
            .try_reserve(1)
            .map_err(|_| ConfError::oom("appending to the entry store"))?;
        self.entries.push(entry);
        Ok(self.entries.len() - 1)
    }

    /// Entry at `index`, or `None` past the end.
    #[inline]
    pub(crate) fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// Remove the entry at `index` and everything after it.
    pub(crate) fn truncate_from(&mut self, index: usize) {
        self.entries.truncate(index);
    }

    /// Position of the first entry named `name` at or after `from`.
    pub(crate) fn find_from(&self, from: usize, name: &[u8]) -> Option<usize> {
        self.entries
            .get(from..)?
            .iter()
            .position(|entry| entry.name() == name)
            .map(|offset| from + offset)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }
}
