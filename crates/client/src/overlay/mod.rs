//! Modal overlay stack layered above the shared surface.
//!
//! Three structures track overlays and must agree at all times:
//!
//! * [`OverlayRegistry`] maps identity to [`Overlay`] records and is the
//!   source of truth for what exists.
//! * [`OverlayStack`] orders identities by z-order; its tail receives input.
//! * The [`Surface`] child list holds the actual nodes.
//!
//! [`OverlayCoordinator`] is the only writer of all three. When they drift
//! apart (a fault mid-close, a host bug), [`OverlayCoordinator::integrity_check`]
//! reports it and [`OverlayCoordinator::emergency_reset`] restores baseline.
//!
//! [`Surface`]: crate::surface::Surface

use std::fmt;

use chrono::{DateTime, Utc};
use folio_primitives::{NodeId, OverlayId};

mod coordinator;
mod error;
pub mod fallback;
mod focus;
mod integrity;
mod registry;
mod stack;

pub use coordinator::{OverlayCoordinator, OverlaySummary};
pub use error::OverlayError;
pub use focus::{FocusOutcome, FocusRelay};
pub use integrity::{IntegrityFault, IntegrityReport};
pub use registry::OverlayRegistry;
pub use stack::OverlayStack;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod tests;

/// Action run exactly once when an overlay finishes closing.
pub type CloseCallback = Box<dyn FnOnce()>;

/// Action run each time an overlay becomes top-of-stack again after the
/// overlay above it closed.
pub type RefreshHook = Box<dyn FnMut()>;

/// Purpose of an overlay panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKind {
	/// Book detail opened from a list or search result.
	PlainDetail,
	/// Book detail opened from another panel's recommendations.
	RecommendationDetail,
	/// Caller-built panel with a short tag used in generated ids.
	Custom(&'static str),
}

impl OverlayKind {
	/// Tag used as the prefix of generated overlay ids.
	pub const fn tag(self) -> &'static str {
		match self {
			Self::PlainDetail => "detail",
			Self::RecommendationDetail => "recommendation",
			Self::Custom(tag) => tag,
		}
	}

	/// Returns true for kinds that host a navigable detail panel.
	pub const fn is_detail(self) -> bool {
		matches!(self, Self::PlainDetail | Self::RecommendationDetail)
	}
}

impl fmt::Display for OverlayKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.tag())
	}
}

/// One active overlay panel.
pub struct Overlay {
	pub id: OverlayId,
	pub kind: OverlayKind,
	/// Root node of the panel; owned by exactly one overlay.
	pub node: NodeId,
	/// True from push until close completes.
	pub visible: bool,
	pub created_at: DateTime<Utc>,
	pub(crate) on_close: Option<CloseCallback>,
	pub(crate) on_refocus: Option<RefreshHook>,
}

impl Overlay {
	pub(crate) fn new(id: OverlayId, kind: OverlayKind, node: NodeId, on_close: CloseCallback) -> Self {
		Self {
			id,
			kind,
			node,
			visible: true,
			created_at: Utc::now(),
			on_close: Some(on_close),
			on_refocus: None,
		}
	}
}

impl fmt::Debug for Overlay {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Overlay")
			.field("id", &self.id)
			.field("kind", &self.kind)
			.field("node", &self.node)
			.field("visible", &self.visible)
			.field("created_at", &self.created_at)
			.field("has_close_callback", &self.on_close.is_some())
			.field("has_refresh_hook", &self.on_refocus.is_some())
			.finish()
	}
}
