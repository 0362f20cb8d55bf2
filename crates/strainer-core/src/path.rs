//! Context paths for locating sub-values inside nested structures
//!
//! Every error recorded by a filter carries the path to the offending
//! sub-value: an ordered list of mapping keys and sequence indices. Paths
//! render as dotted keys (`items.0.price`), with the root rendering as the
//! empty string, which is the shape error payloads are grouped by.

use serde::{Serialize, Serializer};
use std::fmt;

/// One step into a compound value: a mapping key or a sequence index.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathSegment {
    /// A key in a mapping-shaped value.
    Key(String),
    /// A position in a sequence-shaped value.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_owned())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Ordered sequence of path segments identifying where in a compound input
/// a filter is operating.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContextPath {
    segments: Vec<PathSegment>,
}

impl ContextPath {
    /// The empty path, addressing the input value itself.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns a copy of this path with one more segment appended.
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    pub(crate) fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    pub(crate) fn pop(&mut self) {
        self.segments.pop();
    }
}

impl fmt::Display for ContextPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.segments.iter().enumerate() {
            if position > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl Serialize for ContextPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for ContextPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_renders_empty() {
        assert_eq!(ContextPath::root().to_string(), "");
        assert!(ContextPath::root().is_root());
    }

    #[test]
    fn test_dotted_rendering() {
        let path: ContextPath = ["items"]
            .into_iter()
            .map(PathSegment::from)
            .chain([PathSegment::Index(0)])
            .collect();
        assert_eq!(path.to_string(), "items.0");
    }

    #[test]
    fn test_child_does_not_mutate_parent() {
        let parent = ContextPath::root().child("data");
        let child = parent.child(2usize);
        assert_eq!(parent.to_string(), "data");
        assert_eq!(child.to_string(), "data.2");
    }

    #[test]
    fn test_serializes_as_string() {
        let path = ContextPath::root().child("a").child(1usize);
        let json = serde_json::to_value(&path).unwrap();
        assert_eq!(json, serde_json::json!("a.1"));
    }
}
