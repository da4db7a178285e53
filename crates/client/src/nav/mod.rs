//! Sequential navigation inside a detail panel.
//!
//! A [`NavigationContext`] pins the collection and the current index. The
//! [`TransitionEngine`] drives the `Idle → Previewing → Transitioning`
//! machine on top of it and mutates views only through a [`ViewDeck`], the
//! host's view factory for one panel.
//!
//! Everything is clocked by the caller: hover debounce and animation
//! progress advance only when [`TransitionEngine::tick`] is given a newer
//! instant.

mod context;
mod edge;
mod engine;
mod transition;

pub use context::NavigationContext;
pub use edge::EdgeArming;
pub use engine::{NavEvent, NavPhase, TransitionEngine, TriggerRejection};
pub use transition::Transition;

#[cfg(test)]
mod invariants;

use folio_primitives::NodeId;

use crate::animation::ViewPose;

/// View factory and mutator for one panel's navigable content.
///
/// `host` is the panel node the views live in. The engine owns the lifetime
/// of every node it receives from the deck and hands each one back through
/// [`Self::discard`] exactly once.
pub trait ViewDeck<T> {
	/// Builds the full view for the displayed item.
	fn build_view(&mut self, host: NodeId, item: &T) -> NodeId;

	/// Builds a lightweight off-screen preview of a neighbour.
	fn build_preview(&mut self, host: NodeId, item: &T) -> NodeId;

	/// Turns a preview into the incoming view of a transition.
	///
	/// Previews are full-fidelity by default and are promoted as-is.
	fn promote(&mut self, host: NodeId, preview: NodeId, item: &T) -> NodeId {
		let _ = (host, item);
		preview
	}

	fn discard(&mut self, node: NodeId);

	fn place(&mut self, node: NodeId, pose: ViewPose);

	/// Shows or hides edge zones and arrow controls.
	fn arm_edges(&mut self, host: NodeId, arming: EdgeArming);
}
