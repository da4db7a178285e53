use folio_primitives::NavDirection;

/// A fixed collection and the index of the item on display.
///
/// Only exists for collections of two or more items; a single item has
/// nowhere to navigate and gets no context at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationContext<T> {
	items: Vec<T>,
	current: usize,
}

impl<T> NavigationContext<T> {
	/// Returns `None` for collections with fewer than two items.
	///
	/// An out-of-range `current` is clamped to the last item.
	pub fn new(items: Vec<T>, current: usize) -> Option<Self> {
		if items.len() <= 1 {
			return None;
		}
		let last = items.len() - 1;
		if current > last {
			tracing::debug!(current, len = items.len(), "nav.context: start index clamped");
		}
		Some(Self {
			current: current.min(last),
			items,
		})
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Always false; kept for symmetry with `len`.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn items(&self) -> &[T] {
		&self.items
	}

	pub fn current_index(&self) -> usize {
		self.current
	}

	pub fn current(&self) -> &T {
		&self.items[self.current]
	}

	pub fn neighbor_index(&self, direction: NavDirection) -> Option<usize> {
		direction.step(self.current, self.items.len())
	}

	pub fn neighbor(&self, direction: NavDirection) -> Option<&T> {
		self.neighbor_index(direction).map(|index| &self.items[index])
	}

	pub fn has_neighbor(&self, direction: NavDirection) -> bool {
		self.neighbor_index(direction).is_some()
	}

	/// Moves one step in `direction`; returns the new index.
	pub(crate) fn advance(&mut self, direction: NavDirection) -> Option<usize> {
		let next = self.neighbor_index(direction)?;
		self.current = next;
		Some(next)
	}
}
