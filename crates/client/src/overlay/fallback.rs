//! Compatibility path for callers that cannot reach the coordinator's surface.
//!
//! Some hosts close a panel from deep inside its own view tree where neither
//! the coordinator nor the surface reference is at hand. They hand whatever
//! they could locate to [`dismiss_detached`], which degrades one step at a
//! time instead of failing outright.

use std::panic::{AssertUnwindSafe, catch_unwind};

use folio_primitives::NodeId;

use super::CloseCallback;
use crate::surface::{NodeParent, Surface};

/// Which strategy ended up removing the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissPath {
	/// Detached from the located surface.
	Surface,
	/// Detached through the node's parent.
	Parent,
	/// Nothing could detach the node; the close callback ran directly.
	CallbackOnly,
}

/// Removes `node` using the best available handle, then runs `on_close` once.
///
/// A surface that was located but does not hold the node counts as a failed
/// lookup and falls through to the parent.
pub fn dismiss_detached(node: NodeId, surface: Option<&mut dyn Surface>, parent: Option<&mut dyn NodeParent>, on_close: CloseCallback) -> DismissPath {
	let path = if surface.is_some_and(|surface| surface.detach(node)) {
		DismissPath::Surface
	} else if parent.is_some_and(|parent| parent.remove_from_parent(node)) {
		tracing::debug!(%node, "overlay.dismiss: surface not found, detached via parent");
		DismissPath::Parent
	} else {
		tracing::warn!(%node, "overlay.dismiss: no detach path, running close callback only");
		DismissPath::CallbackOnly
	};

	if let Err(payload) = catch_unwind(AssertUnwindSafe(on_close)) {
		let message = folio_worker::panic_payload_message(payload.as_ref());
		tracing::warn!(%node, %message, "overlay.dismiss: close callback panicked");
	}
	path
}
