//! Message bus carrying off-context completions back onto the UI context.
//!
//! Fetch tasks and other off-context callers never touch the coordinator or
//! a detail panel directly. They send a [`ClientMsg`]; the host loop calls
//! [`crate::Client::drain_messages`], which applies each message in arrival
//! order and folds the resulting [`Dirty`] flags into one redraw decision.
//!
//! ```text
//! fetch task ───┐
//!               ├──► ClientMsg ──► Client::drain_messages ──► panel / coordinator
//! refresh hook ─┘
//! ```

mod dirty;

pub use dirty::Dirty;
use folio_primitives::OverlayId;
use tokio::sync::mpsc;

use crate::Client;
use crate::detail::{DetailViews, FetchPayload, FetchToken, Section};
use crate::surface::Surface;

pub type MsgSender = mpsc::UnboundedSender<ClientMsg>;
pub type MsgReceiver = mpsc::UnboundedReceiver<ClientMsg>;

/// Creates a new message channel pair.
pub fn channel() -> (MsgSender, MsgReceiver) {
	mpsc::unbounded_channel()
}

/// Top-level message dispatched on the UI context.
#[derive(Debug)]
pub enum ClientMsg {
	Detail(DetailMsg),
	/// A detail overlay became top again and should re-issue its fetches.
	Refresh(OverlayId),
	/// Coordinator request from code that cannot hold the coordinator.
	Overlay(OverlayCmd),
}

/// Completion of one detail-panel fetch.
#[derive(Debug)]
pub enum DetailMsg {
	Loaded { token: FetchToken, payload: FetchPayload },
	/// The fetch task panicked before producing a result.
	Crashed { token: FetchToken, section: Section, message: String },
}

/// Marshalled coordinator operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayCmd {
	Close(OverlayId),
	CloseTop,
	CloseAll,
	EmergencyReset,
}

impl From<DetailMsg> for ClientMsg {
	fn from(msg: DetailMsg) -> Self {
		Self::Detail(msg)
	}
}

impl From<OverlayCmd> for ClientMsg {
	fn from(cmd: OverlayCmd) -> Self {
		Self::Overlay(cmd)
	}
}

impl ClientMsg {
	/// Applies this message on the UI context, returning dirty flags.
	pub fn apply<S: Surface, V: DetailViews>(self, client: &mut Client<S, V>) -> Dirty {
		match self {
			Self::Detail(DetailMsg::Loaded { token, payload }) => client.apply_fetch(&token, payload),
			Self::Detail(DetailMsg::Crashed { token, section, message }) => client.apply_crash(&token, section, message),
			Self::Refresh(id) => client.refresh(&id),
			Self::Overlay(cmd) => client.run_command(cmd),
		}
	}
}
