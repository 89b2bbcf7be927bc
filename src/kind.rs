use serde::Deserialize;
use std::fmt;

/// Category tag of a node.
///
/// A node's kind never changes after creation. It selects the visual style
/// and decides which connections are allowed. The set of kinds is open: the
/// two built-in ones are [`NodeKind::emitter`] and [`NodeKind::receiver`].
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct NodeKind(String);

impl NodeKind {
    pub const EMITTER: &'static str = "emitter";
    pub const RECEIVER: &'static str = "receiver";

    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Kind whose nodes only have an output handle.
    pub fn emitter() -> Self {
        Self::new(Self::EMITTER)
    }

    /// Kind whose nodes only have an input handle.
    pub fn receiver() -> Self {
        Self::new(Self::RECEIVER)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeKind {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for NodeKind {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}
