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

//! Byte sources feeding the chunk buffer.
//!
//! A [`ChunkSource`] supplies up to N bytes per call and may report the read
//! granularity it prefers. Files report their filesystem block size; any
//! other [`Read`] implementation can be wrapped in a [`ReaderSource`].

use std::fs::File;
use std::io::{self, Read};

/// A byte stream the configuration is read from.
pub trait ChunkSource {
    /// Read up to `buf.len()` bytes, returning how many were read.
    ///
    /// Returning `Ok(0)` signals end of input.
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Preferred read size in bytes, if the source has one.
    ///
    /// Only used as a hint; the reader caps it.
    fn preferred_block_size(&self) -> io::Result<Option<usize>> {
        Ok(None)
    }
}

impl ChunkSource for File {
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.read(buf)
    }

    #[cfg(unix)]
    fn preferred_block_size(&self) -> io::Result<Option<usize>> {
        use std::os::unix::fs::MetadataExt;
        let blksize = self.metadata()?.blksize();
        Ok(usize::try_from(blksize).ok())
    }

    #[cfg(not(unix))]
    fn preferred_block_size(&self) -> io::Result<Option<usize>> {
        // Still surfaces a stat failure on handles that cannot be queried.
        self.metadata()?;
        Ok(None)
    }
}

impl<S: ChunkSource + ?Sized> ChunkSource for Box<S> {
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read_chunk(buf)
    }

    fn preferred_block_size(&self) -> io::Result<Option<usize>> {
        (**self).preferred_block_size()
    }
}

/// Adapter turning any [`Read`] into a [`ChunkSource`].
///
/// # Examples
///
/// ```rust
/// use readconf::{ChunkSource, ReaderSource};
/// use std::io::Cursor;
///
/// let mut source = ReaderSource::with_block_hint(Cursor::new("k=v\n"), 2);
/// assert_eq!(source.preferred_block_size().unwrap(), Some(2));
///
/// let mut buf = [0u8; 2];
/// assert_eq!(source.read_chunk(&mut buf).unwrap(), 2);
/// assert_eq!(&buf, b"k=");
/// ```
#[derive(Debug)]
pub struct ReaderSource<R> {
    inner: R,
    block_hint: Option<usize>,
}

impl<R: Read> ReaderSource<R> {
    /// Wrap a reader that has no preferred block size.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            block_hint: None,
        }
    }

    /// Wrap a reader and report `block_hint` as its preferred block size.
    pub fn with_block_hint(inner: R, block_hint: usize) -> Self {
        Self {
            inner,
            block_hint: Some(block_hint),
        }
    }

    /// Get a reference to the wrapped reader.
    #[inline]
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Unwrap the reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ChunkSource for ReaderSource<R> {
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }

    fn preferred_block_size(&self) -> io::Result<Option<usize>> {
        Ok(self.block_hint)
    }
}
