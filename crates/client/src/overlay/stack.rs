use folio_primitives::OverlayId;

/// Z-order of open overlays. The tail is the input focus target.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OverlayStack {
	ids: Vec<OverlayId>,
}

impl OverlayStack {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&mut self, id: OverlayId) {
		self.ids.push(id);
	}

	pub fn top(&self) -> Option<&OverlayId> {
		self.ids.last()
	}

	pub fn is_top(&self, id: &OverlayId) -> bool {
		self.top() == Some(id)
	}

	pub fn position(&self, id: &OverlayId) -> Option<usize> {
		self.ids.iter().position(|entry| entry == id)
	}

	pub fn contains(&self, id: &OverlayId) -> bool {
		self.position(id).is_some()
	}

	/// Removes `id`, popping from the tail when it is the top.
	///
	/// Returns false when `id` was not on the stack.
	pub fn remove(&mut self, id: &OverlayId) -> bool {
		if self.is_top(id) {
			self.ids.pop();
			return true;
		}
		match self.position(id) {
			Some(index) => {
				self.ids.remove(index);
				true
			}
			None => false,
		}
	}

	/// Returns the ids stacked above `id`, topmost first.
	pub fn above(&self, id: &OverlayId) -> Vec<OverlayId> {
		let Some(index) = self.position(id) else {
			return Vec::new();
		};
		self.ids[index + 1..].iter().rev().cloned().collect()
	}

	/// Returns every id, topmost first.
	pub fn top_down(&self) -> Vec<OverlayId> {
		self.ids.iter().rev().cloned().collect()
	}

	pub fn as_slice(&self) -> &[OverlayId] {
		&self.ids
	}

	pub fn len(&self) -> usize {
		self.ids.len()
	}

	pub fn is_empty(&self) -> bool {
		self.ids.is_empty()
	}

	pub fn clear(&mut self) {
		self.ids.clear();
	}
}
