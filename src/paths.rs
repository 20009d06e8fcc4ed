//! Facilities for working with paths within schemas or validated instances.
use std::{fmt, fmt::Write};

/// JSON Pointer as a wrapper around individual path components.
///
/// The empty pointer addresses the document root and renders as an empty
/// string; non-empty pointers render as `/`-separated segments.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct JSONPointer(Vec<PathChunk>);

impl JSONPointer {
    /// True for the pointer addressing the document root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// JSON pointer as a vector of strings. Each component is casted to `String`. Consumes `JSONPointer`.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.0
            .into_iter()
            .map(|chunk| match chunk {
                PathChunk::Name(value) => value,
                PathChunk::Index(idx) => idx.to_string(),
            })
            .collect()
    }

    /// A copy of this pointer with one more component appended.
    pub(crate) fn extended(&self, chunk: impl Into<PathChunk>) -> JSONPointer {
        let mut chunks = Vec::with_capacity(self.0.len() + 1);
        chunks.extend(self.0.iter().cloned());
        chunks.push(chunk.into());
        JSONPointer(chunks)
    }
}

impl fmt::Display for JSONPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in &self.0 {
            f.write_char('/')?;
            match chunk {
                PathChunk::Name(value) => f.write_str(value)?,
                PathChunk::Index(idx) => f.write_str(itoa::Buffer::new().format(*idx))?,
            }
        }
        Ok(())
    }
}

impl From<&str> for JSONPointer {
    /// Parses a pointer-ish string, stripping any leading `#`.
    fn from(path: &str) -> Self {
        let path = path.strip_prefix('#').unwrap_or(path);
        JSONPointer(
            path.split('/')
                .filter(|segment| !segment.is_empty())
                .map(|segment| PathChunk::Name(segment.to_string()))
                .collect(),
        )
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum PathChunk {
    Name(String),
    Index(usize),
}

impl From<String> for PathChunk {
    #[inline]
    fn from(value: String) -> Self {
        PathChunk::Name(value)
    }
}
impl From<&str> for PathChunk {
    #[inline]
    fn from(value: &str) -> Self {
        PathChunk::Name(value.to_string())
    }
}
impl From<usize> for PathChunk {
    #[inline]
    fn from(value: usize) -> Self {
        PathChunk::Index(value)
    }
}

/// Parent-linked path of the instance node currently being validated.
/// Cloning happens only when an error materializes the full pointer.
#[derive(Debug)]
pub(crate) struct InstancePath<'a> {
    chunk: Option<PathChunk>,
    parent: Option<&'a InstancePath<'a>>,
}

impl<'a> InstancePath<'a> {
    pub(crate) const fn new() -> Self {
        InstancePath {
            chunk: None,
            parent: None,
        }
    }

    pub(crate) fn push(&'a self, chunk: impl Into<PathChunk>) -> Self {
        InstancePath {
            chunk: Some(chunk.into()),
            parent: Some(self),
        }
    }

    fn to_vec(&self) -> Vec<PathChunk> {
        // The average validated document is shallow
        let mut result = Vec::with_capacity(6);
        let mut current = self;
        if let Some(chunk) = &current.chunk {
            result.push(chunk.clone());
        }
        while let Some(next) = current.parent {
            current = next;
            if let Some(chunk) = &current.chunk {
                result.push(chunk.clone());
            }
        }
        result.reverse();
        result
    }
}

impl<'a> From<&'a InstancePath<'a>> for JSONPointer {
    #[inline]
    fn from(path: &'a InstancePath<'a>) -> Self {
        JSONPointer(path.to_vec())
    }
}
