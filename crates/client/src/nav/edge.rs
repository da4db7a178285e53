use folio_primitives::NavDirection;

use super::NavigationContext;

/// Which edge zones and arrow controls are live.
///
/// A direction is armed only when a neighbour exists in it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EdgeArming {
	pub prev: bool,
	pub next: bool,
}

impl EdgeArming {
	pub const NONE: Self = Self { prev: false, next: false };

	pub fn for_context<T>(ctx: &NavigationContext<T>) -> Self {
		Self {
			prev: ctx.has_neighbor(NavDirection::Prev),
			next: ctx.has_neighbor(NavDirection::Next),
		}
	}

	pub const fn is_armed(self, direction: NavDirection) -> bool {
		match direction {
			NavDirection::Prev => self.prev,
			NavDirection::Next => self.next,
		}
	}

	pub const fn any(self) -> bool {
		self.prev || self.next
	}
}
