use folio_primitives::{NavDirection, OverlayId};

use crate::detail::Section;

/// Keys the client reacts to while an overlay is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
	Escape,
	Left,
	Right,
}

impl NavKey {
	/// Direction of a navigation key, `None` for keys that do not navigate.
	pub const fn direction(self) -> Option<NavDirection> {
		match self {
			Self::Left => Some(NavDirection::Prev),
			Self::Right => Some(NavDirection::Next),
			Self::Escape => None,
		}
	}
}

/// UI input routed by [`crate::Client::handle_event`].
///
/// Events that carry no overlay id target the top of the stack; the top is
/// the only overlay eligible for input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
	Key(NavKey),
	/// Pointer press outside the top overlay's panel.
	ClickOutside,
	/// The panel's own close button.
	CloseRequested(OverlayId),
	/// Pointer entered (`entered = true`) or left an edge zone.
	EdgeHover { direction: NavDirection, entered: bool },
	EdgeClick(NavDirection),
	ArrowClick(NavDirection),
	/// Inline retry affordance of a failed section.
	Retry(Section),
	AddToLibrary,
}
