//! Deletion paths for stripping nested fields.

use std::fmt;

use serde_yaml::{Mapping, Value};

/// Path identifies a nested field by its sequence of mapping keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// Parses a comma-delimited path spec such as `"metadata,uid"`.
    ///
    /// Segments are comma-delimited rather than dot-delimited because a
    /// single key may itself contain dots, e.g. the label key
    /// `paas.redhat.com/appcode`.
    pub fn parse(spec: &str) -> Self {
        Path {
            segments: spec.split(',').map(str::to_string).collect(),
        }
    }

    /// Creates a path from pre-split segments.
    pub fn from_segments(segments: Vec<String>) -> Self {
        Path { segments }
    }

    /// Returns the key segments in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// Removes every occurrence of `path` anywhere in the document.
///
/// At each mapping node the path may begin matching; mappings inside
/// sequences and below partially matched prefixes are searched too, with the
/// path restarted from its first segment. Returns the number of keys
/// removed. An absent or partially absent path is a no-op, never an error.
pub fn delete_all(value: &mut Value, path: &Path) -> usize {
    if path.is_empty() {
        return 0;
    }
    walk_delete(value, path.segments())
}

fn walk_delete(value: &mut Value, segments: &[String]) -> usize {
    match value {
        Value::Mapping(map) => {
            let mut removed = delete_at(map, segments);
            for child in map.values_mut() {
                removed += walk_delete(child, segments);
            }
            removed
        }
        Value::Sequence(seq) => seq
            .iter_mut()
            .map(|item| walk_delete(item, segments))
            .sum(),
        _ => 0,
    }
}

/// Follows `segments` through successive mapping lookups starting at `map`
/// and removes the terminal key when the whole prefix resolves.
fn delete_at(map: &mut Mapping, segments: &[String]) -> usize {
    let Some((terminal, prefix)) = segments.split_last() else {
        return 0;
    };

    let mut cursor = map;
    for segment in prefix {
        match cursor.get_mut(segment.as_str()) {
            Some(Value::Mapping(next)) => cursor = next,
            _ => return 0,
        }
    }

    usize::from(cursor.remove(terminal.as_str()).is_some())
}
