use std::time::Instant;

use folio_primitives::{NavDirection, NodeId};
use thiserror::Error;

use super::{EdgeArming, NavigationContext, Transition, ViewDeck};
use crate::animation::ViewPose;
use crate::config::MotionConfig;

/// Externally visible state of a [`TransitionEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavPhase {
	Idle,
	/// The neighbour preview in this direction is peeking in.
	Previewing(NavDirection),
	/// A committed transition toward this direction is animating.
	Transitioning(NavDirection),
}

/// State changes reported by the engine to its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
	PreviewShown(NavDirection),
	PreviewHidden(NavDirection),
	Started(NavDirection),
	/// The index moved; per-item data for `index` may now be requested.
	Committed { index: usize, direction: NavDirection },
}

/// Why a trigger did not start a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TriggerRejection {
	#[error("a transition is already in flight")]
	Transitioning,
	#[error("no neighbour in that direction")]
	NoNeighbor,
}

#[derive(Debug, Clone, Copy)]
struct PendingHover {
	direction: NavDirection,
	due: Instant,
}

/// Preview and transition state machine for one panel.
///
/// At most one transition is in flight, and the index changes only when it
/// completes. Triggers arriving mid-transition are dropped, not queued.
#[derive(Debug)]
pub struct TransitionEngine<T> {
	ctx: NavigationContext<T>,
	host: NodeId,
	motion: MotionConfig,
	current_view: NodeId,
	preview_prev: Option<NodeId>,
	preview_next: Option<NodeId>,
	phase: NavPhase,
	pending_hover: Option<PendingHover>,
	transition: Option<Transition>,
}

impl<T> TransitionEngine<T> {
	/// Builds the current view and neighbour previews inside `host` and arms
	/// the edges that have a neighbour.
	pub fn mount<D: ViewDeck<T>>(ctx: NavigationContext<T>, host: NodeId, deck: &mut D, motion: MotionConfig) -> Self {
		let current_view = deck.build_view(host, ctx.current());
		deck.place(current_view, ViewPose::REST);

		let mut engine = Self {
			ctx,
			host,
			motion,
			current_view,
			preview_prev: None,
			preview_next: None,
			phase: NavPhase::Idle,
			pending_hover: None,
			transition: None,
		};
		engine.rebuild_previews(deck);
		deck.arm_edges(host, EdgeArming::for_context(&engine.ctx));
		tracing::trace!(%host, index = engine.ctx.current_index(), len = engine.ctx.len(), "nav.mount");
		engine
	}

	pub fn context(&self) -> &NavigationContext<T> {
		&self.ctx
	}

	pub fn current(&self) -> &T {
		self.ctx.current()
	}

	pub fn current_index(&self) -> usize {
		self.ctx.current_index()
	}

	pub fn current_view(&self) -> NodeId {
		self.current_view
	}

	pub fn phase(&self) -> NavPhase {
		self.phase
	}

	pub fn is_transitioning(&self) -> bool {
		self.transition.is_some()
	}

	/// Returns the built preview for `direction`, if any.
	pub fn preview(&self, direction: NavDirection) -> Option<NodeId> {
		match direction {
			NavDirection::Prev => self.preview_prev,
			NavDirection::Next => self.preview_next,
		}
	}

	/// Returns true while the host must keep ticking at frame rate.
	pub fn is_animating(&self) -> bool {
		self.transition.is_some()
	}

	/// Earliest instant at which [`Self::tick`] has work to do.
	pub fn next_deadline(&self) -> Option<Instant> {
		match (&self.transition, self.pending_hover) {
			(Some(transition), _) => Some(transition.ends_at()),
			(None, Some(pending)) => Some(pending.due),
			(None, None) => None,
		}
	}

	/// Starts the preview debounce for `direction`.
	///
	/// Entering one edge cancels a pending or shown preview on the other.
	pub fn hover_enter<D: ViewDeck<T>>(&mut self, direction: NavDirection, now: Instant, deck: &mut D) -> Option<NavEvent> {
		if self.transition.is_some() {
			tracing::trace!(direction = direction.as_str(), "nav.hover ignored: transitioning");
			return None;
		}
		if !self.ctx.has_neighbor(direction) {
			return None;
		}
		if self.phase == NavPhase::Previewing(direction) {
			return None;
		}

		let hidden = match self.phase {
			NavPhase::Previewing(shown) => self.hide_preview(shown, deck),
			_ => None,
		};
		self.pending_hover = Some(PendingHover {
			direction,
			due: now + self.motion.preview_debounce(),
		});
		hidden
	}

	/// Cancels the debounce or hides the preview for `direction`.
	pub fn hover_exit<D: ViewDeck<T>>(&mut self, direction: NavDirection, deck: &mut D) -> Option<NavEvent> {
		if self.pending_hover.is_some_and(|pending| pending.direction == direction) {
			self.pending_hover = None;
			tracing::trace!(direction = direction.as_str(), "nav.hover.cancelled");
			return None;
		}
		if self.phase == NavPhase::Previewing(direction) {
			return self.hide_preview(direction, deck);
		}
		None
	}

	/// Commits to a transition toward `direction`.
	///
	/// Works from `Idle` and from `Previewing` in either direction. The
	/// neighbour's preview, when built, becomes the incoming view.
	pub fn trigger<D: ViewDeck<T>>(&mut self, direction: NavDirection, now: Instant, deck: &mut D) -> Result<NavEvent, TriggerRejection> {
		if let Some(active) = &self.transition {
			tracing::debug!(
				direction = direction.as_str(),
				active = active.direction.as_str(),
				"nav.trigger dropped: transition in flight"
			);
			return Err(TriggerRejection::Transitioning);
		}
		let Some(target) = self.ctx.neighbor_index(direction) else {
			tracing::debug!(direction = direction.as_str(), index = self.ctx.current_index(), "nav.trigger dropped: no neighbour");
			return Err(TriggerRejection::NoNeighbor);
		};

		let peeking = self.phase == NavPhase::Previewing(direction);
		if let NavPhase::Previewing(shown) = self.phase
			&& shown != direction
		{
			self.hide_preview(shown, deck);
		}
		self.phase = NavPhase::Transitioning(direction);
		self.pending_hover = None;
		deck.arm_edges(self.host, EdgeArming::NONE);

		let preview = self.take_preview(direction);
		let item = &self.ctx.items()[target];
		let incoming = match preview {
			Some(preview) => deck.promote(self.host, preview, item),
			None => deck.build_view(self.host, item),
		};
		let mut transition = Transition::new(direction, self.current_view, incoming, &self.motion, now);
		if peeking && preview.is_some() {
			transition = transition.with_incoming_start(self.motion.peek_pose(direction.sign()));
		}
		let (outgoing_pose, incoming_pose) = transition.poses_at(now);
		deck.place(self.current_view, outgoing_pose);
		deck.place(incoming, incoming_pose);
		self.transition = Some(transition);

		tracing::trace!(direction = direction.as_str(), from = self.ctx.current_index(), to = target, "nav.transition.start");
		Ok(NavEvent::Started(direction))
	}

	/// Advances the debounce timer and the running animation to `now`.
	pub fn tick<D: ViewDeck<T>>(&mut self, now: Instant, deck: &mut D) -> Option<NavEvent> {
		if let Some(transition) = &self.transition {
			if transition.is_complete_at(now) {
				let transition = self.transition.take()?;
				return Some(self.commit(transition, deck));
			}
			let (outgoing_pose, incoming_pose) = transition.poses_at(now);
			deck.place(transition.outgoing, outgoing_pose);
			deck.place(transition.incoming, incoming_pose);
			return None;
		}

		let pending = self.pending_hover?;
		if now < pending.due {
			return None;
		}
		self.pending_hover = None;
		let preview = self.preview(pending.direction)?;
		deck.place(preview, self.motion.peek_pose(pending.direction.sign()));
		self.phase = NavPhase::Previewing(pending.direction);
		tracing::trace!(direction = pending.direction.as_str(), "nav.preview.shown");
		Some(NavEvent::PreviewShown(pending.direction))
	}

	/// Discards every view the engine owns and disarms the edges.
	///
	/// An in-flight transition is abandoned without committing.
	pub fn teardown<D: ViewDeck<T>>(&mut self, deck: &mut D) {
		if let Some(transition) = self.transition.take() {
			deck.discard(transition.incoming);
		}
		for preview in [self.preview_prev.take(), self.preview_next.take()].into_iter().flatten() {
			deck.discard(preview);
		}
		deck.discard(self.current_view);
		deck.arm_edges(self.host, EdgeArming::NONE);
		self.pending_hover = None;
		self.phase = NavPhase::Idle;
		tracing::trace!(host = %self.host, "nav.teardown");
	}

	fn commit<D: ViewDeck<T>>(&mut self, transition: Transition, deck: &mut D) -> NavEvent {
		let direction = transition.direction;
		let index = self.ctx.advance(direction).unwrap_or_else(|| self.ctx.current_index());

		deck.discard(transition.outgoing);
		self.current_view = transition.incoming;
		deck.place(self.current_view, ViewPose::REST);

		for stale in [self.preview_prev.take(), self.preview_next.take()].into_iter().flatten() {
			deck.discard(stale);
		}
		self.rebuild_previews(deck);
		deck.arm_edges(self.host, EdgeArming::for_context(&self.ctx));
		self.phase = NavPhase::Idle;

		tracing::trace!(direction = direction.as_str(), index, "nav.transition.commit");
		NavEvent::Committed { index, direction }
	}

	fn rebuild_previews<D: ViewDeck<T>>(&mut self, deck: &mut D) {
		for direction in NavDirection::ALL {
			let preview = self.ctx.neighbor(direction).map(|item| {
				let node = deck.build_preview(self.host, item);
				deck.place(node, self.motion.offstage_pose(direction.sign()));
				node
			});
			match direction {
				NavDirection::Prev => self.preview_prev = preview,
				NavDirection::Next => self.preview_next = preview,
			}
		}
	}

	fn take_preview(&mut self, direction: NavDirection) -> Option<NodeId> {
		match direction {
			NavDirection::Prev => self.preview_prev.take(),
			NavDirection::Next => self.preview_next.take(),
		}
	}

	fn hide_preview<D: ViewDeck<T>>(&mut self, direction: NavDirection, deck: &mut D) -> Option<NavEvent> {
		self.phase = NavPhase::Idle;
		let preview = self.preview(direction)?;
		deck.place(preview, self.motion.offstage_pose(direction.sign()));
		tracing::trace!(direction = direction.as_str(), "nav.preview.hidden");
		Some(NavEvent::PreviewHidden(direction))
	}
}
