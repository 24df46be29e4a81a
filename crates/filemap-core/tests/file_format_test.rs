//! End-to-end tests of the file format through the public API.

use filemap_core::{CacheConfig, FileMap};
use std::io::Write;
use tempfile::NamedTempFile;

fn map_from(content: &str) -> (NamedTempFile, FileMap) {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    let map = FileMap::open(file.path()).unwrap();
    (file, map)
}

#[test]
fn test_well_formed_lines_round_trip() {
    let (_file, map) = map_from("alpha: one\nbeta:two\n  gamma :  three  \n\tdelta:\tfour\n");

    assert_eq!(map.get("alpha").as_deref(), Some("one"));
    assert_eq!(map.get("beta").as_deref(), Some("two"));
    assert_eq!(map.get("gamma ").as_deref(), Some("three  "));
    assert_eq!(map.get("gamma"), None);
    assert_eq!(map.get("delta").as_deref(), Some("four"));
}

#[test]
fn test_comments_and_blank_lines_produce_nothing() {
    let (_file, map) = map_from("\n\n# a: b\n   #c: d\n\r\n");
    assert!(map.is_empty());
    assert_eq!(map.get("# a"), None);
    assert_eq!(map.get("a"), None);
}

#[test]
fn test_crlf_line_endings() {
    let (_file, map) = map_from("win: dows\r\nunix: like\n");
    assert_eq!(map.get("win").as_deref(), Some("dows"));
    assert_eq!(map.get("unix").as_deref(), Some("like"));
}

#[test]
fn test_empty_file_opens_empty_map() {
    let (_file, map) = map_from("");
    assert!(map.is_empty());
    assert_eq!(map.get("anything"), None);
}

#[test]
fn test_configured_line_bound() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "short: ok").unwrap();
    writeln!(file, "long: {}", "x".repeat(64)).unwrap();
    writeln!(file, "after: fine").unwrap();
    file.flush().unwrap();

    let config = CacheConfig::new(file.path()).with_max_line_bytes(16);
    let map = FileMap::open_with(config).unwrap();

    assert_eq!(map.get("short").as_deref(), Some("ok"));
    assert_eq!(map.get("long").as_deref(), Some("xxxxxxxxxx"));
    assert_eq!(map.get("after").as_deref(), Some("fine"));
}

#[test]
fn test_default_line_bound_is_4095_bytes() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "big: {}", "y".repeat(5000)).unwrap();
    file.flush().unwrap();

    let map = FileMap::open(file.path()).unwrap();
    let value = map.get("big").unwrap();
    assert_eq!(value.len(), 4095 - "big: ".len());
}
