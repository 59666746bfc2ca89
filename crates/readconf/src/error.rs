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

//! Error types for the configuration reader.
//!
//! Only genuine failures are errors. A copy-out destination that is too small
//! and a search that runs off the end of the store are ordinary outcomes and
//! are reported through [`CopyStatus`](crate::CopyStatus) or `Option` instead.
//!
//! # Error Categories
//!
//! - **Argument Errors**: Unusable buffers, configuration or session state
//! - **Source Errors**: The underlying byte source failed to open, stat or read
//! - **Resource Errors**: Allocation failure or a configured limit was exceeded
//! - **Signal Errors**: The hangup signal could not be blocked
//!
//! Failing to *restore* the signal mask is not represented here: the process
//! is aborted because its signal disposition can no longer be trusted.
//!
//! # Example
//!
//! ```rust
//! use readconf::{ConfError, ConfReader};
//! use std::io::Cursor;
//!
//! let mut reader = ConfReader::from_reader(Cursor::new("a = 1\n")).unwrap();
//!
//! // Traversal before `read` is rejected.
//! match reader.next_entry() {
//!     Err(ConfError::InvalidArgument { message }) => {
//!         assert!(message.contains("not been read"));
//!     }
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

use thiserror::Error;

/// Errors that can occur while reading or traversing a configuration.
#[derive(Error, Debug)]
pub enum ConfError {
    /// A required argument was unusable, or the session is in the wrong state.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The byte source failed.
    #[error("Source unavailable: {0}")]
    SourceUnavailable(#[from] std::io::Error),

    /// Growing a token or the entry store failed to allocate.
    #[error("Out of memory while {context}")]
    OutOfMemory { context: &'static str },

    /// A logical line exceeded the configured maximum length.
    #[error("Line {line} exceeds maximum length of {limit} bytes")]
    LineTooLong { line: usize, limit: usize },

    /// The hangup signal could not be blocked.
    #[error("Failed to block signals: {0}")]
    SignalMask(std::io::Error),
}

impl ConfError {
    /// Create an invalid argument error.
    #[inline]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an out of memory error.
    #[inline]
    pub(crate) fn oom(context: &'static str) -> Self {
        Self::OutOfMemory { context }
    }

    /// Get the line number if available.
    #[inline]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::LineTooLong { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Result type for configuration operations.
pub type ConfResult<T> = Result<T, ConfError>;
