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

//! Reader configuration.

use crate::error::{ConfError, ConfResult};

/// Chunk size used when the source does not report a preferred block size.
pub const DEFAULT_BLOCK_SIZE: usize = 512;

/// Configuration options for [`ConfReader`](crate::ConfReader).
///
/// # Examples
///
/// ## Default Configuration
///
/// ```rust
/// use readconf::ConfReaderConfig;
///
/// let config = ConfReaderConfig::default();
/// assert_eq!(config.max_block_size, Some(512));
/// assert_eq!(config.max_line_length, None);
/// ```
///
/// ## Untrusted Input
///
/// ```rust
/// use readconf::ConfReaderConfig;
///
/// let config = ConfReaderConfig {
///     max_line_length: Some(4096),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfReaderConfig {
    /// Upper bound on the chunk size read from the source.
    ///
    /// Sources such as files report a preferred block size; some report very
    /// large ones. The chunk size is the smaller of that hint and this cap.
    /// Set to `None` to trust the source hint unconditionally.
    ///
    /// Default: `Some(512)`
    pub max_block_size: Option<usize>,

    /// Maximum length of one logical line in bytes, counting only the text
    /// between its first and last non-whitespace byte before any comment.
    ///
    /// Lines exceeding this length fail the read with
    /// [`ConfError::LineTooLong`].
    ///
    /// Default: `None` (unbounded)
    pub max_line_length: Option<usize>,
}

impl Default for ConfReaderConfig {
    fn default() -> Self {
        Self {
            max_block_size: Some(DEFAULT_BLOCK_SIZE),
            max_line_length: None,
        }
    }
}

impl ConfReaderConfig {
    /// Check that every configured limit is usable.
    pub fn validate(&self) -> ConfResult<()> {
        if self.max_block_size == Some(0) {
            return Err(ConfError::invalid("max_block_size must be non-zero"));
        }
        if self.max_line_length == Some(0) {
            return Err(ConfError::invalid("max_line_length must be non-zero"));
        }
        Ok(())
    }

    /// Resolve the chunk size for a source reporting `hint`.
    ///
    /// A missing or zero hint falls back to [`DEFAULT_BLOCK_SIZE`] before the
    /// cap is applied.
    pub fn block_size_for(&self, hint: Option<usize>) -> usize {
        let preferred = hint.filter(|&n| n > 0).unwrap_or(DEFAULT_BLOCK_SIZE);
        match self.max_block_size {
            Some(cap) => preferred.min(cap),
            None => preferred,
        }
    }
}
