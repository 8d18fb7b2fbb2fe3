//! Path-addressable JSON patching
//!
//! Writes a single value into a JSON document by splicing bytes: the document
//! is validated once, then scanned only along the target path. Every byte
//! outside the written value (whitespace, key order, number formatting of
//! untouched fields) is preserved.
//!
//! Paths are dot-separated (`notificationGroup.webhooks.0.integration`), with
//! `[n]` accepted as an alternative spelling for array indices. A numeric
//! segment indexes into an array, or names a key when the current value is an
//! object. Missing members along the path are created, and a `null` along the
//! way is replaced by the structure the remaining path needs.

use std::ops::Range;

use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    #[error("Invalid JSON document: {0}")]
    InvalidDocument(String),

    #[error("Empty path")]
    EmptyPath,

    #[error("Cannot address '{path}': value is not an object or array")]
    NotAContainer { path: String },

    #[error("Cannot address '{path}': '{segment}' is not an array index")]
    InvalidIndex { path: String, segment: String },

    #[error("Failed to encode value: {0}")]
    Value(String),
}

/// Set `value` at `path` inside `doc`, returning the patched document
pub fn set_bytes<T>(doc: &[u8], path: &str, value: &T) -> Result<Vec<u8>, PatchError>
where
    T: Serialize + ?Sized,
{
    serde_json::from_slice::<serde::de::IgnoredAny>(doc)
        .map_err(|e| PatchError::InvalidDocument(e.to_string()))?;

    let segments = parse_path(path);
    if segments.is_empty() {
        return Err(PatchError::EmptyPath);
    }

    let encoded = serde_json::to_string(value).map_err(|e| PatchError::Value(e.to_string()))?;

    set_at(doc, skip_ws(doc, 0), &segments, 0, &encoded)
}

/// Split a path into its segments
pub fn parse_path(path: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '.' => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
            '[' => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
                let index: String = chars.by_ref().take_while(|c| *c != ']').collect();
                if !index.is_empty() {
                    segments.push(index);
                }
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// Where the next path segment lives inside a container
enum Slot {
    /// The segment exists; span of its value
    Existing(Range<usize>),
    /// The segment is absent and must be inserted at `at`
    Missing {
        at: usize,
        leading_comma: bool,
        /// `null` elements needed before an array index past the end
        padding: usize,
    },
}

fn set_at(
    doc: &[u8],
    pos: usize,
    segments: &[String],
    depth: usize,
    encoded: &str,
) -> Result<Vec<u8>, PatchError> {
    let segment = &segments[depth];
    let rest = &segments[depth + 1..];

    let slot = match doc[pos] {
        b'{' => find_member(doc, pos, segment),
        b'[' => {
            let index = segment
                .parse::<usize>()
                .map_err(|_| PatchError::InvalidIndex {
                    path: display_path(&segments[..depth]),
                    segment: segment.clone(),
                })?;
            find_element(doc, pos, index)
        }
        b'n' => {
            let end = skip_value(doc, pos);
            return Ok(splice(doc, pos..end, &build_value(&segments[depth..], encoded)));
        }
        _ => {
            return Err(PatchError::NotAContainer {
                path: display_path(&segments[..depth]),
            })
        }
    };

    match slot {
        Slot::Existing(span) if rest.is_empty() => Ok(splice(doc, span, encoded)),
        Slot::Existing(span) => set_at(doc, span.start, segments, depth + 1, encoded),
        Slot::Missing {
            at,
            leading_comma,
            padding,
        } => {
            let mut fragment = String::new();
            if leading_comma {
                fragment.push(',');
            }
            if doc[pos] == b'{' {
                fragment.push_str(&encode_key(segment));
                fragment.push(':');
            } else {
                fragment.push_str(&"null,".repeat(padding));
            }
            fragment.push_str(&build_value(rest, encoded));
            Ok(splice(doc, at..at, &fragment))
        }
    }
}

/// Locate `key` in the object starting at `pos`. Duplicate keys resolve to
/// the last occurrence, as serde_json and most decoders do.
fn find_member(doc: &[u8], pos: usize, key: &str) -> Slot {
    let mut cursor = skip_ws(doc, pos + 1);
    if doc[cursor] == b'}' {
        return Slot::Missing {
            at: pos + 1,
            leading_comma: false,
            padding: 0,
        };
    }

    let mut found = None;
    let mut last_end;
    loop {
        let key_end = skip_string(doc, cursor);
        let name = serde_json::from_slice::<String>(&doc[cursor..key_end]).ok();

        let colon = skip_ws(doc, key_end);
        let value_start = skip_ws(doc, colon + 1);
        let value_end = skip_value(doc, value_start);

        if name.as_deref() == Some(key) {
            found = Some(value_start..value_end);
        }
        last_end = value_end;

        cursor = skip_ws(doc, value_end);
        if doc[cursor] != b',' {
            break;
        }
        cursor = skip_ws(doc, cursor + 1);
    }

    match found {
        Some(span) => Slot::Existing(span),
        None => Slot::Missing {
            at: last_end,
            leading_comma: true,
            padding: 0,
        },
    }
}

/// Locate element `index` in the array starting at `pos`
fn find_element(doc: &[u8], pos: usize, index: usize) -> Slot {
    let mut cursor = skip_ws(doc, pos + 1);
    if doc[cursor] == b']' {
        return Slot::Missing {
            at: pos + 1,
            leading_comma: false,
            padding: index,
        };
    }

    let mut count = 0;
    loop {
        let end = skip_value(doc, cursor);
        if count == index {
            return Slot::Existing(cursor..end);
        }
        count += 1;

        cursor = skip_ws(doc, end);
        if doc[cursor] != b',' {
            return Slot::Missing {
                at: end,
                leading_comma: true,
                padding: index - count,
            };
        }
        cursor = skip_ws(doc, cursor + 1);
    }
}

fn skip_ws(doc: &[u8], mut pos: usize) -> usize {
    while pos < doc.len() && matches!(doc[pos], b' ' | b'\t' | b'\n' | b'\r') {
        pos += 1;
    }
    pos
}

/// End (exclusive) of the value starting at `pos`
fn skip_value(doc: &[u8], pos: usize) -> usize {
    match doc[pos] {
        b'"' => skip_string(doc, pos),
        b'{' | b'[' => skip_container(doc, pos),
        _ => {
            let mut end = pos;
            while end < doc.len()
                && !matches!(doc[end], b',' | b'}' | b']' | b' ' | b'\t' | b'\n' | b'\r')
            {
                end += 1;
            }
            end
        }
    }
}

fn skip_string(doc: &[u8], pos: usize) -> usize {
    let mut i = pos + 1;
    while i < doc.len() {
        match doc[i] {
            b'\\' => i += 2,
            b'"' => return i + 1,
            _ => i += 1,
        }
    }
    doc.len()
}

fn skip_container(doc: &[u8], pos: usize) -> usize {
    let mut depth = 0usize;
    let mut i = pos;
    while i < doc.len() {
        match doc[i] {
            b'"' => {
                i = skip_string(doc, i);
                continue;
            }
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    doc.len()
}

/// JSON text for `encoded` nested under the remaining path segments
fn build_value(segments: &[String], encoded: &str) -> String {
    segments
        .iter()
        .rev()
        .fold(encoded.to_string(), |inner, segment| match segment.parse::<usize>() {
            Ok(index) => format!("[{}{}]", "null,".repeat(index), inner),
            Err(_) => format!("{{{}:{}}}", encode_key(segment), inner),
        })
}

fn encode_key(key: &str) -> String {
    serde_json::Value::String(key.to_string()).to_string()
}

fn splice(doc: &[u8], range: Range<usize>, insert: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(doc.len() + insert.len());
    out.extend_from_slice(&doc[..range.start]);
    out.extend_from_slice(insert.as_bytes());
    out.extend_from_slice(&doc[range.end..]);
    out
}

fn display_path(segments: &[String]) -> String {
    if segments.is_empty() {
        "<root>".to_string()
    } else {
        segments.join(".")
    }
}
