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

//! Configuration reader sessions.
//!
//! A [`ConfReader`] binds one byte source to its chunk buffer, its parsed
//! entries and a shared traversal cursor. Its lifecycle is:
//!
//! 1. **Construct** with [`open`](ConfReader::open),
//!    [`from_reader`](ConfReader::from_reader) or
//!    [`from_source`](ConfReader::from_source)
//! 2. **Read** once with [`read`](ConfReader::read), which drives the
//!    chunk buffer, tokenizer and splitter to the end of input
//! 3. **Traverse** any number of times with the cursor accessors
//! 4. **Drop**, or [`rebind`](ConfReader::rebind) to a new source

use crate::chunk::ChunkBuffer;
use crate::config::ConfReaderConfig;
use crate::entry::Entry;
use crate::error::{ConfError, ConfResult};
use crate::guard::SignalGuard;
use crate::source::{ChunkSource, ReaderSource};
use crate::split::split_line;
use crate::store::EntryStore;
use crate::tokenizer::{Scan, Tokenizer};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, trace, warn};

/// Progress of the one-shot read pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReadState {
    Unread,
    Complete,
    Failed,
}

/// Streaming reader for one `key = value` configuration source.
///
/// Entries are kept in file order. All traversal operations share a single
/// cursor: [`next_entry`](Self::next_entry) and [`search`](Self::search)
/// advance it, [`rewind`](Self::rewind) resets it, and
/// [`index`](Self::index) ignores it.
#[derive(Debug)]
pub struct ConfReader<S: ChunkSource> {
    pub(crate) source: S,
    pub(crate) config: ConfReaderConfig,
    pub(crate) block_size: usize,
    pub(crate) chunk: Option<ChunkBuffer>,
    pub(crate) store: EntryStore,
    pub(crate) cursor: usize,
    pub(crate) state: ReadState,
}

/// Counters reported when a read pass completes.
#[derive(Debug, Default)]
struct ReadStats {
    chunks: usize,
    bytes: usize,
    dropped: usize,
}

impl ConfReader<File> {
    /// Open the file at `path` with default configuration.
    ///
    /// # Errors
    ///
    /// - `ConfError::SourceUnavailable`: the file cannot be opened or stat'ed
    pub fn open(path: impl AsRef<Path>) -> ConfResult<Self> {
        Self::open_with_config(path, ConfReaderConfig::default())
    }

    /// Open the file at `path` with a custom configuration.
    pub fn open_with_config(path: impl AsRef<Path>, config: ConfReaderConfig) -> ConfResult<Self> {
        let _guard = SignalGuard::acquire()?;
        let file = File::open(path.as_ref())?;
        Self::bind(file, config)
    }

    /// Take ownership of an already open file descriptor.
    #[cfg(unix)]
    pub fn from_fd(fd: std::os::fd::OwnedFd) -> ConfResult<Self> {
        Self::from_source(File::from(fd))
    }
}

impl<R: Read> ConfReader<ReaderSource<R>> {
    /// Read from any [`Read`] implementation, which reports no block size.
    pub fn from_reader(reader: R) -> ConfResult<Self> {
        Self::from_source(ReaderSource::new(reader))
    }
}

impl<S: ChunkSource> ConfReader<S> {
    /// Bind `source` with default configuration.
    pub fn from_source(source: S) -> ConfResult<Self> {
        Self::with_config(source, ConfReaderConfig::default())
    }

    /// Bind `source` with a custom configuration.
    ///
    /// # Errors
    ///
    /// - `ConfError::InvalidArgument`: the configuration fails validation
    /// - `ConfError::SourceUnavailable`: the source's block size query failed
    pub fn with_config(source: S, config: ConfReaderConfig) -> ConfResult<Self> {
        let _guard = SignalGuard::acquire()?;
        Self::bind(source, config)
    }

    fn bind(source: S, config: ConfReaderConfig) -> ConfResult<Self> {
        config.validate()?;
        let hint = source.preferred_block_size()?;
        let block_size = config.block_size_for(hint);
        debug!(block_size, ?hint, "bound configuration source");

        Ok(Self {
            source,
            config,
            block_size,
            chunk: None,
            store: EntryStore::new(),
            cursor: 0,
            state: ReadState::Unread,
        })
    }

    /// Discard this session and bind a new source with the same configuration.
    ///
    /// Behaves exactly like dropping the reader and constructing a new one.
    pub fn rebind<T: ChunkSource>(self, source: T) -> ConfResult<ConfReader<T>> {
        let _guard = SignalGuard::acquire()?;
        let config = self.config.clone();
        debug!(entries = self.store.len(), "releasing session for rebind");
        drop(self);
        ConfReader::bind(source, config)
    }

    /// Discard this session and open the file at `path` in its place.
    pub fn reopen(self, path: impl AsRef<Path>) -> ConfResult<ConfReader<File>> {
        let _guard = SignalGuard::acquire()?;
        let config = self.config.clone();
        drop(self);
        let file = File::open(path.as_ref())?;
        ConfReader::bind(file, config)
    }

    /// Release the session and hand back the source.
    pub fn into_source(self) -> S {
        self.source
    }

    /// Chunk size used for reads from the source.
    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Configuration this reader was built with.
    #[inline]
    pub fn config(&self) -> &ConfReaderConfig {
        &self.config
    }

    /// Parse the whole source into entries.
    ///
    /// On success the cursor is at the first entry. On failure every
    /// partially parsed entry and the chunk buffer are discarded, and the
    /// session can no longer be traversed; drop or rebind it.
    ///
    /// # Errors
    ///
    /// - `ConfError::InvalidArgument`: the session was already read
    /// - `ConfError::SourceUnavailable`: reading the source failed
    /// - `ConfError::OutOfMemory`: a token or the store could not grow
    /// - `ConfError::LineTooLong`: a line exceeded `max_line_length`
    pub fn read(&mut self) -> ConfResult<()> {
        let _guard = SignalGuard::acquire()?;

        match self.state {
            ReadState::Unread => {}
            ReadState::Complete => return Err(ConfError::invalid("configuration has already been read")),
            ReadState::Failed => {
                return Err(ConfError::invalid(
                    "a previous read failed; rebind the reader to a fresh source",
                ))
            }
        }

        match self.read_entries() {
            Ok(stats) => {
                self.state = ReadState::Complete;
                self.cursor = 0;
                debug!(
                    entries = self.store.len(),
                    chunks = stats.chunks,
                    bytes = stats.bytes,
                    dropped = stats.dropped,
                    "configuration read complete"
                );
                Ok(())
            }
            Err(e) => {
                self.store.truncate_from(0);
                self.chunk = None;
                self.cursor = 0;
                self.state = ReadState::Failed;
                warn!(error = %e, "configuration read failed; discarded partial entries");
                Err(e)
            }
        }
    }

    fn read_entries(&mut self) -> ConfResult<ReadStats> {
        let mut stats = ReadStats::default();
        let mut tokenizer = Tokenizer::new(self.config.max_line_length);
        let chunk = self.chunk.insert(ChunkBuffer::new(self.block_size)?);

        loop {
            let read = chunk.refill(&mut self.source)?;
            if read == 0 {
                break;
            }
            stats.chunks += 1;
            stats.bytes += read;

            while let Scan::Line(raw) = tokenizer.scan(chunk)? {
                let line = tokenizer.line_number() - 1;
                commit(&mut self.store, &raw, line, &mut stats)?;
            }
        }

        trace!(
            state = ?tokenizer.state(),
            block_size = chunk.capacity(),
            "reached end of input"
        );
        if let Some(raw) = tokenizer.finish() {
            let line = tokenizer.line_number() - 1;
            commit(&mut self.store, &raw, line, &mut stats)?;
        }

        Ok(stats)
    }

    /// Reject traversal unless a read pass completed.
    pub(crate) fn ensure_read(&self) -> ConfResult<()> {
        match self.state {
            ReadState::Complete => Ok(()),
            ReadState::Unread => Err(ConfError::invalid("configuration has not been read")),
            ReadState::Failed => Err(ConfError::invalid(
                "configuration has not been read successfully",
            )),
        }
    }

    /// Number of parsed entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Iterate over all entries in file order, independent of the cursor.
    pub fn entries(&self) -> ConfResult<impl Iterator<Item = &Entry> + '_> {
        let _guard = SignalGuard::acquire()?;
        self.ensure_read()?;
        Ok(self.store.iter())
    }
}

fn commit(store: &mut EntryStore, raw: &[u8], line: usize, stats: &mut ReadStats) -> ConfResult<()> {
    match split_line(raw)? {
        Some(entry) => {
            store.push(entry)?;
        }
        None => {
            stats.dropped += 1;
            warn!(line, "dropping line with an empty key");
        }
    }
    Ok(())
}
