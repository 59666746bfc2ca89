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

//! Cursor traversal and accessors.
//!
//! Each lookup comes in two forms:
//!
//! - **Reference** (`next_entry`, `search`, `index`): borrows the stored
//!   entry or value directly, with no length limit.
//! - **Copy-out** (`next_into`, `search_into`, `index_into`): copies into
//!   caller buffers with a zero terminator and reports a [`CopyStatus`].
//!   Names are additionally bounded by [`MAX_KEY_LEN`](crate::MAX_KEY_LEN).
//!   Truncation of either the name or the value is reported.
//!
//! Searches are exact, case-sensitive and start at the cursor. They never
//! wrap around; call [`rewind`](ConfReader::rewind) first to search the
//! whole file.

use crate::copy::{clear, copy_entry, copy_terminated, require_capacity, CopyStatus};
use crate::entry::{Entry, EntryValue};
use crate::error::{ConfError, ConfResult};
use crate::guard::SignalGuard;
use crate::reader::ConfReader;
use crate::source::ChunkSource;

impl<S: ChunkSource> ConfReader<S> {
    /// Return the entry at the cursor and advance past it.
    ///
    /// Returns `None`, without moving, once the cursor is at the end.
    pub fn next_entry(&mut self) -> ConfResult<Option<&Entry>> {
        let _guard = SignalGuard::acquire()?;
        self.ensure_read()?;

        let entry = self.store.get(self.cursor);
        if entry.is_some() {
            self.cursor += 1;
        }
        Ok(entry)
    }

    /// Copy the entry at the cursor into `name` and `value`, then advance.
    pub fn next_into(&mut self, name: &mut [u8], value: &mut [u8]) -> ConfResult<CopyStatus> {
        let _guard = SignalGuard::acquire()?;
        require_capacity(name, "name")?;
        require_capacity(value, "value")?;
        self.ensure_read()?;

        match self.store.get(self.cursor) {
            Some(entry) => {
                let status = copy_entry(entry, name, value);
                self.cursor += 1;
                Ok(status)
            }
            None => {
                clear(name);
                clear(value);
                Ok(CopyStatus::NotFound)
            }
        }
    }

    /// Find the next entry named exactly `name`, starting at the cursor.
    ///
    /// On a match the cursor moves just past it. Otherwise the cursor is left
    /// at the end and `None` is returned.
    pub fn search(&mut self, name: impl AsRef<[u8]>) -> ConfResult<Option<&EntryValue>> {
        let _guard = SignalGuard::acquire()?;
        self.ensure_read()?;

        Ok(self.seek(name.as_ref()).map(|entry| entry.value()))
    }

    /// Copy-out form of [`search`](Self::search).
    pub fn search_into(&mut self, name: impl AsRef<[u8]>, value: &mut [u8]) -> ConfResult<CopyStatus> {
        let _guard = SignalGuard::acquire()?;
        require_capacity(value, "value")?;
        self.ensure_read()?;

        match self.seek(name.as_ref()) {
            Some(entry) => Ok(copy_terminated(entry.value().as_bytes(), value)),
            None => {
                clear(value);
                Ok(CopyStatus::NotFound)
            }
        }
    }

    /// The `index`-th entry from the start (zero-based). Leaves the cursor alone.
    pub fn index(&self, index: usize) -> ConfResult<Option<&Entry>> {
        let _guard = SignalGuard::acquire()?;
        self.ensure_read()?;

        Ok(self.store.get(index))
    }

    /// Copy-out form of [`index`](Self::index).
    pub fn index_into(&self, index: usize, name: &mut [u8], value: &mut [u8]) -> ConfResult<CopyStatus> {
        let _guard = SignalGuard::acquire()?;
        require_capacity(name, "name")?;
        require_capacity(value, "value")?;
        self.ensure_read()?;

        match self.store.get(index) {
            Some(entry) => Ok(copy_entry(entry, name, value)),
            None => {
                clear(name);
                clear(value);
                Ok(CopyStatus::NotFound)
            }
        }
    }

    /// Move the cursor back to the first entry.
    ///
    /// # Errors
    ///
    /// - `ConfError::InvalidArgument`: not read yet, or there are no entries
    pub fn rewind(&mut self) -> ConfResult<()> {
        let _guard = SignalGuard::acquire()?;
        self.ensure_read()?;

        if self.store.is_empty() {
            return Err(ConfError::invalid("no entries to rewind to"));
        }
        self.cursor = 0;
        Ok(())
    }

    /// Zero-based cursor position; equals [`len`](Self::len) at the end.
    #[inline]
    pub fn position(&self) -> usize {
        self.cursor
    }

    fn seek(&mut self, name: &[u8]) -> Option<&Entry> {
        match self.store.find_from(self.cursor, name) {
            Some(found) => {
                self.cursor = found + 1;
                self.store.get(found)
            }
            None => {
                self.cursor = self.store.len();
                None
            }
        }
    }
}
