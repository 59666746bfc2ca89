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

//! Fixed-size chunk buffer refilled from a [`ChunkSource`].
//!
//! Each refill replaces the previous block and resets the scan position to
//! the start of the new block. Zero bytes are rewritten to spaces on the way
//! in, so nothing downstream ever sees one.

use crate::error::{ConfError, ConfResult};
use crate::source::ChunkSource;
use std::io::ErrorKind;
use tracing::trace;

/// One block of input plus the scan position within it.
#[derive(Debug)]
pub(crate) struct ChunkBuffer {
    data: Vec<u8>,
    len: usize,
    pos: usize,
}

impl ChunkBuffer {
    /// Allocate a buffer holding at most `block_size` bytes.
    pub(crate) fn new(block_size: usize) -> ConfResult<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(block_size)
            .map_err(|_| ConfError::oom("allocating the chunk buffer"))?;
        data.resize(block_size, 0);
        Ok(Self {
            data,
            len: 0,
            pos: 0,
        })
    }

    /// Replace the buffered block with the next one from `source`.
    ///
    /// Returns the number of valid bytes; zero means end of input.
    pub(crate) fn refill<S: ChunkSource + ?Sized>(&mut self, source: &mut S) -> ConfResult<usize> {
        let read = loop {
            match source.read_chunk(&mut self.data) {
                Ok(n) => break n.min(self.data.len()),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.len = 0;
                    self.pos = 0;
                    return Err(e.into());
                }
            }
        };

        let filled = &mut self.data[..read];
        let mut from = 0;
        while let Some(offset) = memchr::memchr(0, &filled[from..]) {
            filled[from + offset] = b' ';
            from += offset + 1;
        }

        self.len = read;
        self.pos = 0;
        trace!(bytes = read, "refilled chunk buffer");
        Ok(read)
    }

    /// Unscanned bytes of the current block.
    #[inline]
    pub(crate) fn remaining(&self) -> &[u8] {
        &self.data[self.pos..self.len]
    }

    /// Mark `n` more bytes as scanned.
    #[inline]
    pub(crate) fn advance(&mut self, n: usize) {
        debug_assert!(self.pos + n <= self.len);
        self.pos += n;
    }

    #[inline]
    pub(crate) fn is_exhausted(&self) -> bool {
        self.pos >= self.len
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.data.len()
    }
}
