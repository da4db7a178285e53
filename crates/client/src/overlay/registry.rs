use folio_primitives::{NodeId, OverlayId};
use rustc_hash::FxHashMap;

use super::Overlay;

/// Identity-to-record map of overlays, independent of the surface tree.
#[derive(Debug, Default)]
pub struct OverlayRegistry {
	records: FxHashMap<OverlayId, Overlay>,
}

impl OverlayRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts a record, returning the one it replaced.
	pub fn insert(&mut self, overlay: Overlay) -> Option<Overlay> {
		self.records.insert(overlay.id.clone(), overlay)
	}

	pub fn get(&self, id: &OverlayId) -> Option<&Overlay> {
		self.records.get(id)
	}

	pub fn get_mut(&mut self, id: &OverlayId) -> Option<&mut Overlay> {
		self.records.get_mut(id)
	}

	pub fn remove(&mut self, id: &OverlayId) -> Option<Overlay> {
		self.records.remove(id)
	}

	pub fn contains(&self, id: &OverlayId) -> bool {
		self.records.contains_key(id)
	}

	/// Finds the record owning `node`.
	pub fn owner_of(&self, node: NodeId) -> Option<&Overlay> {
		self.records.values().find(|record| record.node == node)
	}

	/// Returns the number of records, visible or not.
	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Returns the number of records still marked visible.
	pub fn live_count(&self) -> usize {
		self.records.values().filter(|record| record.visible).count()
	}

	/// Returns every registered identity in no particular order.
	pub fn ids(&self) -> Vec<OverlayId> {
		self.records.keys().cloned().collect()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Overlay> {
		self.records.values()
	}

	pub fn clear(&mut self) {
		self.records.clear();
	}

	/// Removes and returns every record.
	pub fn drain(&mut self) -> Vec<Overlay> {
		self.records.drain().map(|(_, record)| record).collect()
	}
}
