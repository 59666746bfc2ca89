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

//! Incremental line tokenizer.
//!
//! Scans a [`ChunkBuffer`] and yields one raw line token per completed line:
//! leading and trailing whitespace removed, comments dropped, blank lines
//! skipped. All scanning state lives in [`Tokenizer`], so a line split across
//! any number of chunk refills produces exactly the token it would have
//! produced inside a single chunk.
//!
//! ```text
//!              non-ws                 '\n'
//! AtLineStart ───────▶ InToken ─────────────▶ AtLineStart (emit)
//!      │                  │
//!      │ '#'              │ '#'
//!      ▼                  ▼
//!   InComment ◀───────────┘
//!      │ '\n'
//!      └────────────────────────────────────▶ AtLineStart (emit if any)
//! ```

use crate::chunk::ChunkBuffer;
use crate::error::{ConfError, ConfResult};

/// Where the scanner is within the current logical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScanState {
    /// No content seen on this line yet; whitespace is skipped.
    AtLineStart,
    /// Content has started; whitespace is held until more content follows.
    InToken,
    /// Inside a comment; everything up to the line end is discarded.
    InComment,
}

/// Outcome of one [`Tokenizer::scan`] call.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Scan {
    /// A line ended and produced this non-empty token.
    Line(Vec<u8>),
    /// The chunk ran out first. Any partial token is kept for the next chunk.
    Exhausted,
}

#[inline]
pub(crate) fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r')
}

#[derive(Debug)]
pub(crate) struct Tokenizer {
    state: ScanState,
    token: Vec<u8>,
    /// Whitespace seen after the last content byte. Becomes part of the token
    /// only if more content follows on the same line.
    held: Vec<u8>,
    /// 1-based number of the line being scanned.
    line: usize,
    max_line_length: Option<usize>,
}

impl Tokenizer {
    pub(crate) fn new(max_line_length: Option<usize>) -> Self {
        Self {
            state: ScanState::AtLineStart,
            token: Vec::new(),
            held: Vec::new(),
            line: 1,
            max_line_length,
        }
    }

    #[inline]
    pub(crate) fn state(&self) -> ScanState {
        self.state
    }

    /// Number of the line currently being scanned.
    #[inline]
    pub(crate) fn line_number(&self) -> usize {
        self.line
    }

    /// Scan from the chunk's current position until a line completes or the
    /// chunk is exhausted.
    pub(crate) fn scan(&mut self, chunk: &mut ChunkBuffer) -> ConfResult<Scan> {
        while !chunk.is_exhausted() {
            let bytes = chunk.remaining();

            if self.state == ScanState::InComment {
                match memchr::memchr(b'\n', bytes) {
                    Some(newline) => {
                        chunk.advance(newline + 1);
                        if let Some(token) = self.end_line() {
                            return Ok(Scan::Line(token));
                        }
                    }
                    None => {
                        let len = bytes.len();
                        chunk.advance(len);
                    }
                }
                continue;
            }

            let stop = memchr::memchr2(b'\n', b'#', bytes);
            let span_len = stop.unwrap_or(bytes.len());
            let delimiter = stop.map(|i| bytes[i]);
            self.absorb(&bytes[..span_len])?;

            match delimiter {
                Some(b'\n') => {
                    chunk.advance(span_len + 1);
                    if let Some(token) = self.end_line() {
                        return Ok(Scan::Line(token));
                    }
                }
                Some(_) => {
                    chunk.advance(span_len + 1);
                    // Whitespace before a comment is trailing whitespace.
                    self.held.clear();
                    self.state = ScanState::InComment;
                }
                None => chunk.advance(span_len),
            }
        }

        Ok(Scan::Exhausted)
    }

    /// Flush the final line at end of input.
    pub(crate) fn finish(&mut self) -> Option<Vec<u8>> {
        self.end_line()
    }

    /// Take in a span that contains no line end and no comment marker.
    fn absorb(&mut self, span: &[u8]) -> ConfResult<()> {
        let span = if self.state == ScanState::AtLineStart {
            match span.iter().position(|&b| !is_whitespace(b)) {
                Some(start) => &span[start..],
                None => return Ok(()),
            }
        } else {
            span
        };

        if span.is_empty() {
            return Ok(());
        }

        match span.iter().rposition(|&b| !is_whitespace(b)) {
            Some(last) => {
                let (content, trailing) = span.split_at(last + 1);
                self.token
                    .try_reserve(self.held.len() + content.len())
                    .map_err(|_| ConfError::oom("growing a line token"))?;
                self.token.append(&mut self.held);
                self.token.extend_from_slice(content);
                self.hold(trailing)?;
            }
            None => self.hold(span)?,
        }

        self.state = ScanState::InToken;
        self.check_length()
    }

    fn hold(&mut self, whitespace: &[u8]) -> ConfResult<()> {
        self.held
            .try_reserve(whitespace.len())
            .map_err(|_| ConfError::oom("growing a line token"))?;
        self.held.extend_from_slice(whitespace);
        Ok(())
    }

    fn check_length(&self) -> ConfResult<()> {
        match self.max_line_length {
            Some(limit) if self.token.len() > limit => {
                Err(ConfError::LineTooLong {
                    line: self.line,
                    limit,
                })
            }
            _ => Ok(()),
        }
    }

    fn end_line(&mut self) -> Option<Vec<u8>> {
        self.state = ScanState::AtLineStart;
        self.held.clear();
        self.line += 1;

        if self.token.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.token))
        }
    }
}
