use serde::{Deserialize, Serialize};

/// Direction of travel through an ordered collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavDirection {
	/// Toward index 0.
	Prev,
	/// Toward the last index.
	Next,
}

impl NavDirection {
	pub const ALL: [Self; 2] = [Self::Prev, Self::Next];

	/// Signed unit step for this direction.
	pub const fn sign(self) -> f32 {
		match self {
			Self::Prev => -1.0,
			Self::Next => 1.0,
		}
	}

	pub const fn opposite(self) -> Self {
		match self {
			Self::Prev => Self::Next,
			Self::Next => Self::Prev,
		}
	}

	/// Returns the neighbouring index of `index` within `len` items, if any.
	pub const fn step(self, index: usize, len: usize) -> Option<usize> {
		match self {
			Self::Prev if index > 0 && index < len => Some(index - 1),
			Self::Next if index + 1 < len => Some(index + 1),
			_ => None,
		}
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Prev => "prev",
			Self::Next => "next",
		}
	}
}
