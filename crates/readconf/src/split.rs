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

//! Key/value splitting of completed line tokens.

use crate::entry::{Entry, EntryValue};
use crate::error::{ConfError, ConfResult};
use crate::tokenizer::is_whitespace;

/// Trim spaces, tabs and carriage returns from both ends.
pub(crate) fn trim(bytes: &[u8]) -> &[u8] {
    let start = match bytes.iter().position(|&b| !is_whitespace(b)) {
        Some(start) => start,
        None => return &[],
    };
    // A non-whitespace byte exists, so rposition succeeds.
    let end = bytes.iter().rposition(|&b| !is_whitespace(b)).unwrap_or(start);
    &bytes[start..=end]
}

/// Split one raw line at its first `=`.
///
/// - `key = value` gives `Text(value)`
/// - `key =` gives `Text("")`
/// - `key` gives `Keyless`, with the whole line as the name
///
/// Returns `Ok(None)` when the name trims to nothing (`= value`).
pub(crate) fn split_line(raw: &[u8]) -> ConfResult<Option<Entry>> {
    let (name, value) = match memchr::memchr(b'=', raw) {
        Some(eq) => (trim(&raw[..eq]), Some(trim(&raw[eq + 1..]))),
        None => (trim(raw), None),
    };

    if name.is_empty() {
        return Ok(None);
    }

    let value = match value {
        Some(text) => EntryValue::Text(owned(text, "storing an entry value")?),
        None => EntryValue::Keyless,
    };
    Ok(Some(Entry::new(owned(name, "storing an entry name")?, value)))
}

fn owned(bytes: &[u8], context: &'static str) -> ConfResult<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(bytes.len())
        .map_err(|_| ConfError::oom(context))?;
    buf.extend_from_slice(bytes);
    Ok(buf)
}
