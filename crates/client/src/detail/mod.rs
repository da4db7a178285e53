//! Book detail panels.
//!
//! A [`DetailPanel`] is the content of one detail overlay: the panel frame,
//! the navigable views of its collection and the per-item [`DetailDisplay`]
//! hydrated by background fetches. Fetches are issued only for the item on
//! display, after a transition has committed, and their completions are
//! checked against the panel's current [`FetchToken`] before they touch the
//! display.

mod hydrate;
mod panel;
mod service;
mod state;

pub use hydrate::{FetchPayload, FetchToken, Hydrator};
pub use panel::DetailPanel;
pub use service::{BookService, FetchError, RatingStats};
pub use state::{DetailDisplay, LoadState, Section};


use folio_primitives::{Book, NodeId};

use crate::nav::ViewDeck;
use crate::overlay::OverlayKind;

/// Host view factory for detail panels.
pub trait DetailViews: ViewDeck<Book> {
	/// Builds the panel frame that hosts the navigable views.
	fn build_panel(&mut self, book: &Book, collection: &[Book], kind: OverlayKind) -> NodeId;

	/// Renders the hydration state of the displayed book.
	fn show_display(&mut self, panel: NodeId, book: &Book, display: &DetailDisplay);

	/// Called once after the panel's overlay has closed.
	fn release_panel(&mut self, panel: NodeId);
}
