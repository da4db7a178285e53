use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle to a node in the host UI runtime's retained tree.
///
/// The runtime allocates these; folio only stores and compares them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "node#{}", self.0)
	}
}

/// Catalog identifier of a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BookId(pub u64);

impl fmt::Display for BookId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "book#{}", self.0)
	}
}

/// Opaque identity of one overlay panel.
///
/// Generated ids combine the overlay kind tag with a monotonic sequence
/// (`detail-3`), but callers may also supply their own string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OverlayId(String);

impl OverlayId {
	/// Wraps an arbitrary caller-chosen identity.
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	/// Builds the canonical `{tag}-{seq}` identity.
	pub fn sequenced(tag: &str, seq: u64) -> Self {
		Self(format!("{tag}-{seq}"))
	}

	/// Returns the raw identity string.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for OverlayId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for OverlayId {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

impl From<String> for OverlayId {
	fn from(value: String) -> Self {
		Self(value)
	}
}
