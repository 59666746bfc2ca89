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

//! Integration tests for readconf

use readconf::{
    ConfError, ConfReader, ConfReaderConfig, CopyStatus, EntryValue, ReaderSource, KEYLESS_VALUE,
};
use std::io::Cursor;

const TAGGED: &str = "\
Global1 = hello
[Section1]
Item1=foo
Item2 = bar
# comment
Item3
";

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn read(input: &str) -> ConfReader<ReaderSource<Cursor<Vec<u8>>>> {
    init_tracing();
    let mut reader = ConfReader::from_reader(Cursor::new(input.as_bytes().to_vec())).unwrap();
    reader.read().unwrap();
    reader
}

fn pairs<S: readconf::ChunkSource>(reader: &ConfReader<S>) -> Vec<(String, Option<String>)> {
    reader
        .entries()
        .unwrap()
        .map(|e| {
            (
                e.name_str().unwrap().to_string(),
                e.value().as_str().map(str::to_string),
            )
        })
        .collect()
}

// ==================== End-to-end ====================

#[test]
fn test_tagged_example_entries() {
    let reader = read(TAGGED);
    assert_eq!(
        pairs(&reader),
        vec![
            ("Global1".to_string(), Some("hello".to_string())),
            ("[Section1]".to_string(), None),
            ("Item1".to_string(), Some("foo".to_string())),
            ("Item2".to_string(), Some("bar".to_string())),
            ("Item3".to_string(), None),
        ]
    );
}

#[test]
fn test_tagged_example_search() {
    let mut reader = read(TAGGED);
    assert_eq!(reader.search("[Section1]").unwrap(), Some(&EntryValue::Keyless));
    assert_eq!(reader.search("Item1").unwrap().unwrap().as_str(), Some("foo"));
    assert!(reader.search("Item1").unwrap().is_none());
}

#[test]
fn test_sections_scope_searches() {
    let input = "\
Global1 = one
Global2 = two
[Section1]
Item1 = s1-item1
Item2 = s1-item2
[Section2]
Item1 = s2-item1
Item4 = s2-item4
";
    let mut reader = read(input);
    let mut value = [0u8; 64];

    assert!(reader.search_into("[Section1]", &mut value).unwrap().is_found());
    assert_eq!(reader.search("Item2").unwrap().unwrap().as_str(), Some("s1-item2"));
    reader.search("[Section2]").unwrap().unwrap();
    assert_eq!(reader.search("Item1").unwrap().unwrap().as_str(), Some("s2-item1"));
    assert_eq!(reader.search("Item4").unwrap().unwrap().as_str(), Some("s2-item4"));

    // Globals are behind the cursor until a rewind.
    assert!(reader.search("Global2").unwrap().is_none());
    reader.rewind().unwrap();
    assert_eq!(reader.search("Global2").unwrap().unwrap().as_str(), Some("two"));
}

#[test]
fn test_repeated_search_finds_later_occurrence() {
    let mut reader = read("Item1 = first\nother = x\nItem1 = second\n");
    assert_eq!(reader.search("Item1").unwrap().unwrap().as_str(), Some("first"));
    assert_eq!(reader.search("Item1").unwrap().unwrap().as_str(), Some("second"));
    assert!(reader.search("Item1").unwrap().is_none());
    reader.rewind().unwrap();
    assert_eq!(reader.search("Item1").unwrap().unwrap().as_str(), Some("first"));
}

// ==================== Ordering and indexing ====================

#[test]
fn test_index_matches_file_order() {
    let input: String = (0..50).map(|i| format!("key{} = value{}\n", i, i)).collect();
    let reader = read(&input);

    for i in 0..50 {
        let entry = reader.index(i).unwrap().unwrap();
        assert_eq!(entry.name_str(), Some(format!("key{}", i).as_str()));
        assert_eq!(entry.value().as_str(), Some(format!("value{}", i).as_str()));
    }
    assert!(reader.index(50).unwrap().is_none());
}

// ==================== Empty lines and comments ====================

#[test]
fn test_comment_and_blank_lines_yield_nothing() {
    assert!(read("# only a comment\n").is_empty());
    assert!(read("   \t  \n").is_empty());
    assert!(read("").is_empty());
    assert!(read("\n\n# a\n   # b\n\r\n").is_empty());
}

#[test]
fn test_keyless_distinct_from_empty_value() {
    let reader = read("Item3\nItem4=\n");
    let keyless = reader.index(0).unwrap().unwrap();
    let empty = reader.index(1).unwrap().unwrap();

    assert!(keyless.is_keyless());
    assert_eq!(keyless.value(), &EntryValue::Keyless);
    assert!(!empty.is_keyless());
    assert_eq!(empty.value(), &EntryValue::Text(Vec::new()));

    let mut name = [0u8; 16];
    let mut value = [0u8; 16];
    reader.index_into(0, &mut name, &mut value).unwrap();
    assert_eq!(&value[..2], &[KEYLESS_VALUE[0], 0]);
    reader.index_into(1, &mut name, &mut value).unwrap();
    assert_eq!(value[0], 0);
}

#[test]
fn test_inline_comments_and_whitespace() {
    let reader = read("  path =  /usr/local bin  # install dir\n\tflag\t=\ton # why\n");
    assert_eq!(
        pairs(&reader),
        vec![
            ("path".to_string(), Some("/usr/local bin".to_string())),
            ("flag".to_string(), Some("on".to_string())),
        ]
    );
}

#[test]
fn test_zero_bytes_sanitized() {
    init_tracing();
    let mut reader = ConfReader::from_reader(Cursor::new(b"ke\0y = va\0lue\n".to_vec())).unwrap();
    reader.read().unwrap();
    let entry = reader.index(0).unwrap().unwrap();
    assert_eq!(entry.name(), b"ke y");
    assert_eq!(entry.value().text(), Some(&b"va lue"[..]));
}

#[test]
fn test_non_utf8_bytes_preserved() {
    init_tracing();
    let mut reader = ConfReader::from_reader(Cursor::new(b"k = \xff\xfe\n".to_vec())).unwrap();
    reader.read().unwrap();
    let entry = reader.index(0).unwrap().unwrap();
    assert_eq!(entry.value().text(), Some(&b"\xff\xfe"[..]));
    assert_eq!(entry.value().as_str(), None);
}

// ==================== Copy-out ====================

#[test]
fn test_copy_out_overflow_counts() {
    let value_text = "abcdefghijklmnopqrstuvwxyz";
    let mut reader = read(&format!("k = {}\n", value_text));

    for capacity in 1..=value_text.len() + 2 {
        reader.rewind().unwrap();
        let mut buf = vec![0xEEu8; capacity + 4];
        let status = reader.search_into("k", &mut buf[..capacity]).unwrap();

        if value_text.len() < capacity {
            assert_eq!(status, CopyStatus::Complete { len: value_text.len() });
        } else {
            assert_eq!(
                status,
                CopyStatus::Truncated {
                    overflow: value_text.len() - (capacity - 1)
                }
            );
        }
        assert_eq!(buf[capacity - 1], 0);
        assert!(buf[capacity..].iter().all(|&b| b == 0xEE), "wrote past capacity {}", capacity);
    }
}

#[test]
fn test_copy_out_next_walk() {
    let mut reader = read(TAGGED);
    let mut name = [0u8; readconf::MAX_KEY_LEN];
    let mut value = [0u8; 64];
    let mut count = 0;

    while reader.next_into(&mut name, &mut value).unwrap().is_found() {
        count += 1;
    }
    assert_eq!(count, 5);
    assert_eq!(reader.next_into(&mut name, &mut value).unwrap(), CopyStatus::NotFound);
}

#[test]
fn test_short_name_buffer_reports_truncation() {
    let reader = read("Global1 = hi\n");
    let mut name = [0u8; 4];
    let mut value = [0u8; 16];

    let status = reader.index_into(0, &mut name, &mut value).unwrap();
    assert_eq!(status, CopyStatus::Truncated { overflow: 4 });
    assert!(status.is_found());
    assert_eq!(&name, b"Glo\0");
    assert_eq!(&value[..3], b"hi\0");
}

// ==================== Error handling ====================

#[test]
fn test_traversal_before_read() {
    let mut reader = ConfReader::from_reader(Cursor::new("a = 1")).unwrap();
    match reader.next_entry() {
        Err(ConfError::InvalidArgument { message }) => assert!(message.contains("not been read")),
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn test_line_limit_discards_everything() {
    let config = ConfReaderConfig {
        max_line_length: Some(16),
        ..Default::default()
    };
    let input = format!("a = 1\nb = {}\nc = 3\n", "x".repeat(64));
    let mut reader = ConfReader::with_config(ReaderSource::new(Cursor::new(input)), config).unwrap();

    let err = reader.read().unwrap_err();
    assert!(matches!(err, ConfError::LineTooLong { line: 2, limit: 16 }));
    assert!(reader.is_empty());
    assert!(reader.index(0).is_err());
}

#[test]
fn test_line_limit_ignores_padding_before_comment() {
    let config = ConfReaderConfig {
        max_line_length: Some(8),
        ..Default::default()
    };
    let input = format!("a=1{}# note\nb=2{}\n", " ".repeat(20), "\t".repeat(20));
    let mut reader = ConfReader::with_config(ReaderSource::new(Cursor::new(input)), config).unwrap();

    reader.read().unwrap();
    assert_eq!(reader.len(), 2);
    assert_eq!(reader.index(0).unwrap().unwrap().value().as_str(), Some("1"));
}

#[test]
fn test_boxed_dyn_source() {
    init_tracing();
    let source: Box<dyn readconf::ChunkSource> =
        Box::new(ReaderSource::with_block_hint(Cursor::new(TAGGED), 4));
    let mut reader = ConfReader::from_source(source).unwrap();
    assert_eq!(reader.block_size(), 4);
    reader.read().unwrap();
    assert_eq!(reader.len(), 5);
}
