//! Line parser for the `key: value` file format.
//!
//! The format is deliberately small:
//! - one record per line, `key: value`
//! - blank lines and lines whose first non-whitespace character is `#` are ignored
//! - no quoting or escaping
//!
//! Malformed lines are skipped silently, never reported as errors.

use crate::snapshot::Snapshot;
use std::io::{self, BufRead};
use tracing::debug;

/// A key/value pair borrowed from a single input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry<'a> {
    /// Everything before the first colon, after leading whitespace.
    pub key: &'a str,
    /// Everything after the first colon, minus leading whitespace.
    pub value: &'a str,
}

/// Matches the C locale `isspace` set, which includes vertical tab.
fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

/// Parse one line into an entry.
///
/// Returns `None` for blank lines, comments, lines without a colon, and lines
/// whose key or value is empty. Whitespace between the key and the colon is
/// kept as part of the key, and trailing whitespace in the value is kept too.
pub fn parse_line(line: &str) -> Option<Entry<'_>> {
    let line = line.trim_end_matches(['\r', '\n']);
    let line = line.trim_start_matches(is_space);

    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (key, rest) = line.split_once(':')?;
    if key.is_empty() {
        return None;
    }

    let value = rest.trim_start_matches(is_space);
    if value.is_empty() {
        return None;
    }

    Some(Entry { key, value })
}

/// Read one physical line, keeping at most `max_bytes` of it.
///
/// Bytes past the bound are consumed from `reader` and discarded up to the
/// next `\n`, so `buf` never grows beyond `max_bytes`.
///
/// Returns `Ok(false)` at end of input.
fn read_bounded_line<R: BufRead>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    max_bytes: usize,
) -> io::Result<bool> {
    buf.clear();
    let mut read_any = false;
    let mut dropped = 0usize;

    loop {
        let available = match reader.fill_buf() {
            Ok(available) => available,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if available.is_empty() {
            break;
        }
        read_any = true;

        let (chunk, end_of_line) = match available.iter().position(|&b| b == b'\n') {
            Some(newline) => (&available[..=newline], true),
            None => (available, false),
        };

        let keep = max_bytes.saturating_sub(buf.len()).min(chunk.len());
        buf.extend_from_slice(&chunk[..keep]);
        dropped += chunk.len() - keep;

        let used = chunk.len();
        reader.consume(used);
        if end_of_line {
            break;
        }
    }

    if dropped > 0 {
        debug!(dropped, max_bytes, "Truncated overlong line");
    }

    Ok(read_any)
}

/// Build a snapshot from `reader`.
///
/// Lines longer than `max_bytes` are cut at that length and the remainder of
/// the physical line is lost. Invalid UTF-8 is replaced lossily.
///
/// # Errors
/// Returns the underlying I/O error if reading fails; the partially built
/// snapshot is dropped.
pub fn parse_reader<R: BufRead>(mut reader: R, max_bytes: usize) -> io::Result<Snapshot> {
    let mut snapshot = Snapshot::new();
    let mut buf = Vec::with_capacity(max_bytes.min(8192));
    let mut line_no = 0usize;

    while read_bounded_line(&mut reader, &mut buf, max_bytes)? {
        line_no += 1;
        let line = String::from_utf8_lossy(&buf);

        let Some(entry) = parse_line(&line) else {
            continue;
        };

        if snapshot.insert_first(entry.key, entry.value) {
            debug!(line = line_no, key = %entry.key, value = %entry.value, "Parsed entry");
        } else {
            debug!(line = line_no, key = %entry.key, "Ignoring duplicate key");
        }
    }

    Ok(snapshot)
}
