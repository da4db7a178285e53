use std::panic::{AssertUnwindSafe, catch_unwind};

use chrono::{DateTime, Utc};
use folio_primitives::{NodeId, OverlayId};

use super::focus::{FocusOutcome, FocusRelay};
use super::integrity::{IntegrityFault, IntegrityReport};
use super::{CloseCallback, Overlay, OverlayError, OverlayKind, OverlayRegistry, OverlayStack, RefreshHook};
use crate::surface::Surface;

/// Diagnostic row for one registered overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlaySummary {
	pub id: OverlayId,
	pub kind: OverlayKind,
	pub node: NodeId,
	pub visible: bool,
	/// Position in the stack (0 = bottom), `None` when unstacked.
	pub depth: Option<usize>,
	pub created_at: DateTime<Utc>,
}

/// Owner of the overlay registry, stack and the shared surface.
///
/// Construct once, bind a surface with [`Self::initialize`], and pass by
/// reference to every UI handler that opens or closes panels. The type holds
/// non-`Send` callbacks and is meant to live on the UI mutation context;
/// background work reaches it through [`crate::msg::ClientMsg::Overlay`].
///
/// Every fault is logged and absorbed. Returned errors are diagnostics for
/// the caller, never a reason to abort an event handler.
pub struct OverlayCoordinator<S> {
	surface: Option<S>,
	registry: OverlayRegistry,
	stack: OverlayStack,
	relay: FocusRelay,
	next_seq: u64,
}

impl<S> Default for OverlayCoordinator<S> {
	fn default() -> Self {
		Self {
			surface: None,
			registry: OverlayRegistry::new(),
			stack: OverlayStack::new(),
			relay: FocusRelay::new(),
			next_seq: 0,
		}
	}
}

impl<S: Surface> OverlayCoordinator<S> {
	/// Creates an unbound coordinator.
	pub fn new() -> Self {
		Self::default()
	}

	/// Binds the shared surface. Re-binding is allowed but suspicious.
	pub fn initialize(&mut self, surface: S) {
		if self.surface.is_some() {
			tracing::warn!(
				registry = self.registry.len(),
				stack = self.stack.len(),
				"overlay.initialize: surface re-bound while already initialized"
			);
		}
		tracing::debug!(children = surface.children().len(), "overlay.initialize");
		self.surface = Some(surface);
	}

	/// Closes every overlay and unbinds the surface.
	pub fn dispose(&mut self) {
		if self.surface.is_none() {
			return;
		}
		let _ = self.close_all();
		self.surface = None;
		tracing::debug!("overlay.dispose");
	}

	pub fn is_initialized(&self) -> bool {
		self.surface.is_some()
	}

	/// Returns the bound surface.
	pub fn surface(&self) -> Option<&S> {
		self.surface.as_ref()
	}

	/// Generates a fresh `{kind}-{seq}` identity.
	pub fn next_id(&mut self, kind: OverlayKind) -> OverlayId {
		self.next_seq = self.next_seq.wrapping_add(1);
		OverlayId::sequenced(kind.tag(), self.next_seq)
	}

	/// Registers an overlay, stacks it on top and gives it focus.
	///
	/// An existing overlay with the same id is closed first.
	pub fn push(&mut self, id: OverlayId, kind: OverlayKind, node: NodeId, on_close: CloseCallback) -> Result<(), OverlayError> {
		if self.surface.is_none() {
			tracing::warn!(overlay = %id, "overlay.push rejected: not initialized");
			return Err(OverlayError::NotInitialized { op: "push" });
		}

		if self.registry.contains(&id) {
			tracing::debug!(overlay = %id, "overlay.push: replacing existing overlay");
			self.close_for_replace(&id);
		}

		let Some(surface) = self.surface.as_mut() else {
			return Err(OverlayError::NotInitialized { op: "push" });
		};
		self.registry.insert(Overlay::new(id.clone(), kind, node, on_close));
		self.stack.push(id.clone());
		surface.attach(node);
		surface.request_focus(node);
		self.relay.note_pushed(id.clone());

		tracing::trace!(overlay = %id, %kind, %node, depth = self.stack.len(), "overlay.push");
		Ok(())
	}

	/// Closes `id` and everything stacked above it.
	///
	/// Overlays above `id` close topmost first, each callback exactly once,
	/// so the stack never holds an overlay above a closed one. Focus is
	/// relayed once, after the whole cascade.
	pub fn close(&mut self, id: &OverlayId) -> Result<(), OverlayError> {
		if self.surface.is_none() {
			tracing::warn!(overlay = %id, "overlay.close rejected: not initialized");
			return Err(OverlayError::NotInitialized { op: "close" });
		}
		if !self.registry.contains(id) {
			tracing::warn!(overlay = %id, "overlay.close: unknown id");
			return Err(OverlayError::UnknownId(id.clone()));
		}

		let above = self.stack.above(id);
		if !above.is_empty() {
			tracing::debug!(overlay = %id, cascade = above.len(), "overlay.close: closing overlays stacked above");
		}
		for upper in &above {
			if let Err(err) = self.close_one(upper) {
				tracing::warn!(overlay = %upper, error = %err, "overlay.close: cascade fault");
			}
		}

		let result = self.close_one(id);
		self.relay_focus();
		result
	}

	/// Closes the top of the stack; no-op when empty.
	pub fn close_top(&mut self) -> Result<(), OverlayError> {
		let Some(top) = self.stack.top().cloned() else {
			tracing::trace!("overlay.close_top: stack empty");
			return Ok(());
		};
		self.close(&top)
	}

	/// Closes every registered overlay, then clears all state unconditionally.
	///
	/// Returns how many overlays were closed. Callback faults are logged and
	/// do not stop the remaining closes.
	pub fn close_all(&mut self) -> Result<usize, OverlayError> {
		if self.surface.is_none() {
			tracing::warn!("overlay.close_all rejected: not initialized");
			return Err(OverlayError::NotInitialized { op: "close_all" });
		}

		let mut ids = self.stack.top_down();
		ids.extend(self.registry.ids().into_iter().filter(|id| !self.stack.contains(id)));

		let mut closed = 0;
		for id in &ids {
			match self.close_one(id) {
				Ok(()) => closed += 1,
				Err(OverlayError::UnknownId(_)) => {}
				Err(err) => {
					closed += 1;
					tracing::warn!(overlay = %id, error = %err, "overlay.close_all: fault while closing");
				}
			}
		}

		self.registry.clear();
		self.stack.clear();
		self.relay_focus();
		tracing::debug!(closed, "overlay.close_all");
		Ok(closed)
	}

	/// Returns true when any overlay is open.
	pub fn has_active(&self) -> bool {
		!self.stack.is_empty()
	}

	/// Returns the number of live overlays.
	pub fn count(&self) -> usize {
		self.registry.live_count()
	}

	/// Returns the overlay currently eligible for input.
	pub fn top(&self) -> Option<&OverlayId> {
		self.stack.top()
	}

	pub fn contains(&self, id: &OverlayId) -> bool {
		self.registry.contains(id)
	}

	pub fn kind_of(&self, id: &OverlayId) -> Option<OverlayKind> {
		self.registry.get(id).map(|record| record.kind)
	}

	pub fn node_of(&self, id: &OverlayId) -> Option<NodeId> {
		self.registry.get(id).map(|record| record.node)
	}

	/// Returns the stacked ids, bottom first.
	pub fn stack(&self) -> &[OverlayId] {
		self.stack.as_slice()
	}

	/// Registers the hook run when `id` becomes top again after a close.
	pub fn set_refresh_hook(&mut self, id: &OverlayId, hook: RefreshHook) -> Result<(), OverlayError> {
		let Some(record) = self.registry.get_mut(id) else {
			tracing::warn!(overlay = %id, "overlay.set_refresh_hook: unknown id");
			return Err(OverlayError::UnknownId(id.clone()));
		};
		record.on_refocus = Some(hook);
		Ok(())
	}

	/// Compares registry, stack and surface state without correcting it.
	pub fn integrity_check(&self) -> Result<IntegrityReport, OverlayError> {
		let Some(surface) = self.surface.as_ref() else {
			tracing::warn!("overlay.integrity_check rejected: not initialized");
			return Err(OverlayError::NotInitialized { op: "integrity_check" });
		};

		let children = surface.children();
		let overlay_children = children.get(1..).unwrap_or_default();
		let mut report = IntegrityReport {
			registry: self.registry.len(),
			stack: self.stack.len(),
			surface_children: children.len(),
			faults: Vec::new(),
		};

		if children.is_empty() {
			report.faults.push(IntegrityFault::MissingBase);
		}
		let live = self.registry.live_count();
		if live != self.registry.len() || live != self.stack.len() || overlay_children.len() != self.registry.len() {
			report.faults.push(IntegrityFault::CountMismatch {
				registry: live,
				stack: self.stack.len(),
				surface_overlays: overlay_children.len(),
			});
		}

		let mut records: Vec<&Overlay> = self.registry.iter().collect();
		records.sort_by(|a, b| a.id.cmp(&b.id));
		for record in records {
			if !overlay_children.contains(&record.node) {
				report.faults.push(IntegrityFault::OrphanRecord {
					id: record.id.clone(),
					node: record.node,
				});
			}
			if !self.stack.contains(&record.id) {
				report.faults.push(IntegrityFault::Unstacked(record.id.clone()));
			}
		}
		for id in self.stack.as_slice() {
			if !self.registry.contains(id) {
				report.faults.push(IntegrityFault::Unregistered(id.clone()));
			}
		}
		for node in overlay_children {
			if self.registry.owner_of(*node).is_none() {
				report.faults.push(IntegrityFault::StrayNode(*node));
			}
		}

		if report.is_clean() {
			tracing::trace!(%report, "overlay.integrity_check");
		} else {
			tracing::warn!(%report, "overlay.integrity_check: faults detected");
		}
		Ok(report)
	}

	/// Drops all overlay state and truncates the surface back to its base child.
	///
	/// Close callbacks are not run: after a fault the records cannot be
	/// trusted to describe what is actually on screen.
	pub fn emergency_reset(&mut self) {
		tracing::error!(
			registry = self.registry.len(),
			stack = self.stack.len(),
			"overlay.emergency_reset"
		);
		for record in self.registry.drain() {
			tracing::warn!(overlay = %record.id, node = %record.node, "overlay.emergency_reset: dropping overlay");
		}
		self.stack.clear();
		self.relay.reset();

		match self.surface.as_mut() {
			Some(surface) => surface.truncate_children(1),
			None => tracing::warn!("overlay.emergency_reset: no surface bound"),
		}
	}

	/// Returns one diagnostic row per registered overlay, bottom of stack first.
	pub fn snapshot(&self) -> Vec<OverlaySummary> {
		let mut rows: Vec<OverlaySummary> = self
			.registry
			.iter()
			.map(|record| OverlaySummary {
				id: record.id.clone(),
				kind: record.kind,
				node: record.node,
				visible: record.visible,
				depth: self.stack.position(&record.id),
				created_at: record.created_at,
			})
			.collect();
		rows.sort_by_key(|row| (row.depth.unwrap_or(usize::MAX), row.id.clone()));
		rows
	}

	/// Tears down one overlay without cascading or relaying focus.
	fn close_one(&mut self, id: &OverlayId) -> Result<(), OverlayError> {
		let Some(record) = self.registry.get_mut(id) else {
			return Err(OverlayError::UnknownId(id.clone()));
		};

		if let Some(surface) = self.surface.as_mut()
			&& surface.contains(record.node)
		{
			surface.detach(record.node);
		}
		record.visible = false;
		let callback = record.on_close.take();
		self.stack.remove(id);

		let outcome = match callback {
			Some(callback) => run_close_callback(id, callback),
			None => Ok(()),
		};

		self.registry.remove(id);
		tracing::trace!(overlay = %id, depth = self.stack.len(), "overlay.close");
		outcome
	}

	/// Closes `id` and everything above it without relaying focus.
	///
	/// The replacement goes straight back on top, so no overlay underneath
	/// is refocused or refreshed in between.
	fn close_for_replace(&mut self, id: &OverlayId) {
		let above = self.stack.above(id);
		for upper in above.iter().chain(std::iter::once(id)) {
			if let Err(err) = self.close_one(upper) {
				tracing::warn!(overlay = %upper, error = %err, "overlay.push: replaced overlay closed with fault");
			}
		}
	}

	fn relay_focus(&mut self) -> FocusOutcome {
		match self.surface.as_mut() {
			Some(surface) => self.relay.restore(&self.stack, &mut self.registry, surface),
			None => FocusOutcome::Unchanged,
		}
	}
}

fn run_close_callback(id: &OverlayId, callback: CloseCallback) -> Result<(), OverlayError> {
	catch_unwind(AssertUnwindSafe(callback)).map_err(|payload| {
		let message = folio_worker::panic_payload_message(payload.as_ref());
		tracing::warn!(overlay = %id, %message, "overlay.close: close callback panicked");
		OverlayError::CallbackPanicked { id: id.clone(), message }
	})
}
