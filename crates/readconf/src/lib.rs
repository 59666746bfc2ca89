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

//! Streaming `key = value` Configuration Reader
//!
//! This crate reads flat, line-oriented configuration files from any byte
//! stream in small fixed-size chunks, without holding the whole file in
//! memory, and exposes the parsed entries through a forward cursor.
//!
//! # Features
//!
//! - **Chunked**: Input is read in blocks of at most 512 bytes by default;
//!   lines may span any number of blocks
//! - **Ordered**: Entries keep file order and can be walked, searched or
//!   indexed
//! - **Bounded copy-out**: Accessors can copy into fixed-size caller buffers
//!   and report exactly how many bytes did not fit
//! - **Signal safe**: Every operation runs with `SIGHUP` blocked on the
//!   calling thread
//!
//! # Format
//!
//! ```text
//! Global1 = hello      # key/value, whitespace around key and value trimmed
//! [Section1]           # no '=': keyless entry, name is the whole line
//! Item1=foo
//! Item4=               # '=' with nothing after it: empty value
//!                      # blank and comment-only lines produce nothing
//! ```
//!
//! Sections have no structural meaning; they are ordinary keyless entries
//! that a search can jump to.
//!
//! # Usage
//!
//! ```rust
//! use readconf::{ConfReader, CopyStatus};
//! use std::io::Cursor;
//!
//! let input = "\
//! Global1 = hello
//! [Section1]
//! Item1=foo
//! Item2 = bar
//! # comment
//! Item3
//! ";
//!
//! let mut reader = ConfReader::from_reader(Cursor::new(input)).unwrap();
//! reader.read().unwrap();
//!
//! // Jump to the section, then find the item after it.
//! reader.search("[Section1]").unwrap();
//! let mut value = [0u8; 32];
//! assert_eq!(
//!     reader.search_into("Item1", &mut value).unwrap(),
//!     CopyStatus::Complete { len: 3 }
//! );
//! assert_eq!(&value[..4], b"foo\0");
//!
//! // Only one Item1 exists past the cursor.
//! assert!(reader.search("Item1").unwrap().is_none());
//!
//! // Keyless lines are distinct from empty values.
//! assert!(reader.index(4).unwrap().unwrap().is_keyless());
//! ```
//!
//! ## Reading a File
//!
//! ```rust,no_run
//! use readconf::ConfReader;
//!
//! # fn example() -> Result<(), readconf::ConfError> {
//! let mut reader = ConfReader::open("/etc/app.conf")?;
//! reader.read()?;
//!
//! while let Some(entry) = reader.next_entry()? {
//!     println!("{}", entry);
//! }
//! # Ok(())
//! # }
//! ```

mod chunk;
mod config;
mod copy;
mod cursor;
mod entry;
mod error;
mod guard;
mod reader;
mod source;
mod split;
mod store;
mod tokenizer;

pub use config::{ConfReaderConfig, DEFAULT_BLOCK_SIZE};
pub use copy::{CopyStatus, MAX_KEY_LEN};
pub use entry::{Entry, EntryValue, KEYLESS_VALUE};
pub use error::{ConfError, ConfResult};
pub use reader::ConfReader;
pub use source::{ChunkSource, ReaderSource};
