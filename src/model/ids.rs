// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Ramify-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Ramify and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// A stable identifier, unique for a node's lifetime within one outline.
///
/// This is intentionally std-only and does not enforce a UUID format; it only
/// enforces that the id is a non-empty *path segment* (i.e. contains no `/`),
/// because ids appear inside sidecar keys and title paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        validate_id_segment(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T> Borrow<str> for Id<T> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_owned())
    }
}

impl<T> TryFrom<String> for Id<T> {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    Empty,
    ContainsSlash,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("id must not be empty"),
            Self::ContainsSlash => f.write_str("id must not contain '/'"),
        }
    }
}

impl std::error::Error for IdError {}

fn validate_id_segment(value: &str) -> Result<(), IdError> {
    if value.is_empty() {
        return Err(IdError::Empty);
    }
    if value.contains('/') {
        return Err(IdError::ContainsSlash);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeIdTag {}
pub type NodeId = Id<NodeIdTag>;

/// Issues `n:0001`-style node ids, unique within one generator's lifetime.
///
/// Outlines built by the parser or by `ops` inserts draw from a single
/// generator, which is what keeps id uniqueness an invariant rather than a
/// runtime check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeIdGen {
    next: u64,
}

impl NodeIdGen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes numbering above any id already present in existing content.
    pub fn resuming_after(max_seen: u64) -> Self {
        Self { next: max_seen }
    }

    pub fn next_id(&mut self) -> NodeId {
        self.next += 1;
        NodeId::new(format!("n:{:04}", self.next)).expect("generated node id")
    }

    /// The numeric suffix of `id`, if it follows the generated `n:NNNN` form.
    pub fn sequence_of(id: &NodeId) -> Option<u64> {
        id.as_str().strip_prefix("n:")?.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::{Id, IdError, NodeIdGen};

    #[test]
    fn id_rejects_empty() {
        let result: Result<Id<()>, _> = Id::new("");
        assert_eq!(result, Err(IdError::Empty));
    }

    #[test]
    fn id_rejects_slash() {
        let result: Result<Id<()>, _> = Id::new("a/b");
        assert_eq!(result, Err(IdError::ContainsSlash));
    }

    #[test]
    fn id_gen_is_monotonic_and_parseable() {
        let mut id_gen = NodeIdGen::new();
        let first = id_gen.next_id();
        let second = id_gen.next_id();
        assert_eq!(first.as_str(), "n:0001");
        assert_eq!(second.as_str(), "n:0002");
        assert_eq!(NodeIdGen::sequence_of(&second), Some(2));
    }

    #[test]
    fn id_gen_resumes_after_existing_ids() {
        let mut id_gen = NodeIdGen::resuming_after(41);
        assert_eq!(id_gen.next_id().as_str(), "n:0042");
    }
}
