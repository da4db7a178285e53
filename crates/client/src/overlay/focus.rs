use std::panic::{AssertUnwindSafe, catch_unwind};

use folio_primitives::OverlayId;

use super::{OverlayRegistry, OverlayStack};
use crate::surface::Surface;

/// What [`FocusRelay::restore`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusOutcome {
	/// The top of the stack did not change since the last relay.
	Unchanged,
	/// The stack is empty; input falls back to the base surface.
	Base,
	/// Focus moved to this overlay and its refresh hook ran.
	Restored(OverlayId),
}

/// Re-establishes input routing after the overlay stack changes.
///
/// Remembers which overlay last held focus so repeated calls without a
/// change of top are no-ops, and so a refresh hook fires only when its
/// overlay actually becomes top again.
#[derive(Debug, Default)]
pub struct FocusRelay {
	focused: Option<OverlayId>,
}

impl FocusRelay {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the overlay the relay last routed focus to.
	pub fn focused(&self) -> Option<&OverlayId> {
		self.focused.as_ref()
	}

	/// Records focus taken directly by a freshly pushed overlay.
	pub(crate) fn note_pushed(&mut self, id: OverlayId) {
		self.focused = Some(id);
	}

	pub(crate) fn reset(&mut self) {
		self.focused = None;
	}

	/// Focuses the new tail and runs its refresh hook, if the tail changed.
	pub(crate) fn restore<S: Surface>(&mut self, stack: &OverlayStack, registry: &mut OverlayRegistry, surface: &mut S) -> FocusOutcome {
		let top = stack.top().cloned();
		if top == self.focused {
			return FocusOutcome::Unchanged;
		}
		self.focused = top.clone();

		let Some(id) = top else {
			tracing::trace!("overlay.focus.base");
			return FocusOutcome::Base;
		};
		let Some(record) = registry.get_mut(&id) else {
			tracing::warn!(overlay = %id, "overlay.focus: stack top has no registry entry");
			return FocusOutcome::Unchanged;
		};

		surface.request_focus(record.node);
		if let Some(hook) = record.on_refocus.as_mut()
			&& let Err(payload) = catch_unwind(AssertUnwindSafe(|| hook()))
		{
			let message = folio_worker::panic_payload_message(payload.as_ref());
			tracing::warn!(overlay = %id, %message, "overlay.focus: refresh hook panicked");
		}
		tracing::trace!(overlay = %id, node = %record.node, "overlay.focus.restored");
		FocusOutcome::Restored(id)
	}
}
