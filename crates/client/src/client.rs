use std::sync::Arc;
use std::time::Instant;

use folio_primitives::{Book, NavDirection, NodeId, OverlayId};
use folio_worker::GenerationClock;
use rustc_hash::FxHashMap;

use crate::config::ClientConfig;
use crate::detail::{BookService, DetailPanel, DetailViews, FetchPayload, FetchToken, Hydrator, Section};
use crate::input::{NavKey, UiEvent};
use crate::msg::{self, ClientMsg, Dirty, MsgReceiver, MsgSender, OverlayCmd};
use crate::nav::NavEvent;
use crate::overlay::{CloseCallback, IntegrityReport, OverlayCoordinator, OverlayError, OverlayKind, RefreshHook};
use crate::surface::Surface;


/// The UI-context facade: overlay stack, detail panels and fetch hydration.
///
/// Owns the [`OverlayCoordinator`] and one [`DetailPanel`] per open detail
/// overlay. Every operation that can close overlays also tears down the
/// panels whose overlay is gone, so panel and overlay lifetimes match.
///
/// The host loop feeds input through [`Self::handle_event`], advances time
/// with [`Self::tick`], and applies background completions with
/// [`Self::drain_messages`]; each returns [`Dirty`] flags.
pub struct Client<S, V> {
	overlays: OverlayCoordinator<S>,
	panels: FxHashMap<OverlayId, DetailPanel>,
	views: V,
	hydrator: Hydrator,
	clock: GenerationClock,
	tx: MsgSender,
	rx: MsgReceiver,
	config: ClientConfig,
}

impl<S: Surface, V: DetailViews> Client<S, V> {
	pub fn new(views: V, service: Arc<dyn BookService>, config: ClientConfig) -> Self {
		let (tx, rx) = msg::channel();
		Self {
			overlays: OverlayCoordinator::new(),
			panels: FxHashMap::default(),
			views,
			hydrator: Hydrator::new(service, tx.clone()),
			clock: GenerationClock::new(),
			tx,
			rx,
			config,
		}
	}

	/// Binds the shared surface overlays are layered onto.
	pub fn initialize(&mut self, surface: S) {
		self.overlays.initialize(surface);
	}

	/// Closes every overlay, tears down all panels and unbinds the surface.
	pub fn dispose(&mut self) {
		self.overlays.dispose();
		self.reap_panels();
	}

	pub fn overlays(&self) -> &OverlayCoordinator<S> {
		&self.overlays
	}

	pub fn views(&self) -> &V {
		&self.views
	}

	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	pub fn panel(&self, id: &OverlayId) -> Option<&DetailPanel> {
		self.panels.get(id)
	}

	/// Panel of the top overlay, if the top overlay is a detail panel.
	pub fn top_panel(&self) -> Option<&DetailPanel> {
		self.overlays.top().and_then(|id| self.panels.get(id))
	}

	/// Sender for off-context callers that need to reach the client.
	pub fn msg_tx(&self) -> MsgSender {
		self.tx.clone()
	}

	/// Opens a detail overlay for `book` navigable within `collection`.
	pub fn show(&mut self, book: Book, collection: Vec<Book>) -> Result<OverlayId, OverlayError> {
		self.show_with(OverlayKind::PlainDetail, book, collection, Box::new(|| {}))
	}

	/// Opens a detail overlay reached from another panel's recommendations.
	pub fn show_variant(&mut self, book: Book, collection: Vec<Book>) -> Result<OverlayId, OverlayError> {
		self.show_with(OverlayKind::RecommendationDetail, book, collection, Box::new(|| {}))
	}

	/// Builds a detail panel, pushes it and starts hydrating its first item.
	///
	/// The panel re-hydrates whenever it becomes top again after an overlay
	/// above it closes.
	pub fn show_with(&mut self, kind: OverlayKind, book: Book, collection: Vec<Book>, on_close: CloseCallback) -> Result<OverlayId, OverlayError> {
		if !self.overlays.is_initialized() {
			tracing::warn!(book = %book.id, "client.show rejected: not initialized");
			return Err(OverlayError::NotInitialized { op: "show" });
		}

		let id = self.overlays.next_id(kind);
		let mut panel = DetailPanel::open(id.clone(), kind, book, collection, &mut self.views, &self.config.motion);
		if let Err(err) = self.overlays.push(id.clone(), kind, panel.node(), on_close) {
			panel.teardown(&mut self.views);
			return Err(err);
		}

		let tx = self.tx.clone();
		let refresh_id = id.clone();
		self.overlays.set_refresh_hook(
			&id,
			Box::new(move || {
				if tx.send(ClientMsg::Refresh(refresh_id.clone())).is_err() {
					tracing::trace!(overlay = %refresh_id, "client.refresh: receiver gone");
				}
			}),
		)?;

		panel.request_hydration(&self.clock, &self.hydrator, &mut self.views);
		self.panels.insert(id.clone(), panel);
		Ok(id)
	}

	/// Pushes a caller-built overlay under a generated id.
	pub fn push_custom(&mut self, tag: &'static str, node: NodeId, on_close: CloseCallback) -> Result<OverlayId, OverlayError> {
		let kind = OverlayKind::Custom(tag);
		let id = self.overlays.next_id(kind);
		self.overlays.push(id.clone(), kind, node, on_close)?;
		Ok(id)
	}

	/// Pushes a caller-built overlay under a caller-chosen id, replacing any
	/// overlay already registered under it.
	///
	/// A detail panel shown under `id` is torn down with the overlay it replaces.
	pub fn push(&mut self, id: OverlayId, kind: OverlayKind, node: NodeId, on_close: CloseCallback) -> Result<(), OverlayError> {
		let result = self.overlays.push(id, kind, node, on_close);
		self.reap_panels();
		result
	}

	pub fn set_refresh_hook(&mut self, id: &OverlayId, hook: RefreshHook) -> Result<(), OverlayError> {
		self.overlays.set_refresh_hook(id, hook)
	}

	pub fn close(&mut self, id: &OverlayId) -> Result<(), OverlayError> {
		let result = self.overlays.close(id);
		self.reap_panels();
		result
	}

	pub fn close_top(&mut self) -> Result<(), OverlayError> {
		let result = self.overlays.close_top();
		self.reap_panels();
		result
	}

	pub fn close_all(&mut self) -> Result<usize, OverlayError> {
		let result = self.overlays.close_all();
		self.reap_panels();
		result
	}

	pub fn has_active(&self) -> bool {
		self.overlays.has_active()
	}

	pub fn count(&self) -> usize {
		self.overlays.count()
	}

	pub fn integrity_check(&self) -> Result<IntegrityReport, OverlayError> {
		self.overlays.integrity_check()
	}

	pub fn emergency_reset(&mut self) {
		self.overlays.emergency_reset();
		self.reap_panels();
	}

	/// Runs an integrity check and, when configured, resets on any fault.
	pub fn audit(&mut self) -> Result<IntegrityReport, OverlayError> {
		let report = self.overlays.integrity_check()?;
		if !report.is_clean() && self.config.reset_on_integrity_fault {
			self.emergency_reset();
		}
		Ok(report)
	}

	/// Routes one input event to the top overlay.
	pub fn handle_event(&mut self, event: UiEvent, now: Instant) -> Dirty {
		match event {
			UiEvent::Key(NavKey::Escape) | UiEvent::ClickOutside => {
				if !self.overlays.has_active() {
					return Dirty::empty();
				}
				closed_dirty(self.close_top())
			}
			UiEvent::Key(key) => match key.direction() {
				Some(direction) => self.navigate(direction, now),
				None => Dirty::empty(),
			},
			UiEvent::CloseRequested(id) => closed_dirty(self.close(&id)),
			UiEvent::EdgeHover { direction, entered } => {
				let Some(id) = self.overlays.top().cloned() else {
					return Dirty::empty();
				};
				let Some(panel) = self.panels.get_mut(&id) else {
					return Dirty::empty();
				};
				let event = panel.hover(direction, entered, now, &mut self.views);
				self.after_nav(&id, event)
			}
			UiEvent::EdgeClick(direction) | UiEvent::ArrowClick(direction) => self.navigate(direction, now),
			UiEvent::Retry(section) => self.with_top_panel(|panel, views, hydrator| panel.retry(section, hydrator, views)),
			UiEvent::AddToLibrary => self.with_top_panel(|panel, views, hydrator| panel.add_to_library(hydrator, views)),
		}
	}

	/// Advances debounce timers and animations of every panel to `now`.
	pub fn tick(&mut self, now: Instant) -> Dirty {
		let ids: Vec<OverlayId> = self.panels.keys().cloned().collect();
		let mut dirty = Dirty::empty();
		for id in ids {
			let Some(panel) = self.panels.get_mut(&id) else {
				continue;
			};
			if panel.is_animating() {
				dirty |= Dirty::REDRAW;
			}
			let event = panel.tick(now, &mut self.views);
			dirty |= self.after_nav(&id, event);
		}
		dirty
	}

	/// Earliest instant at which [`Self::tick`] has work to do.
	pub fn next_deadline(&self) -> Option<Instant> {
		self.panels.values().filter_map(DetailPanel::next_deadline).min()
	}

	/// Returns true while any panel is mid-transition.
	pub fn is_animating(&self) -> bool {
		self.panels.values().any(DetailPanel::is_animating)
	}

	/// Applies every queued message without waiting.
	pub fn drain_messages(&mut self) -> Dirty {
		let mut dirty = Dirty::empty();
		while let Ok(msg) = self.rx.try_recv() {
			dirty |= msg.apply(self);
		}
		dirty
	}

	/// Waits for at least one message, then drains the queue.
	pub async fn wait_and_drain(&mut self) -> Dirty {
		let Some(first) = self.rx.recv().await else {
			return Dirty::empty();
		};
		first.apply(self) | self.drain_messages()
	}

	pub(crate) fn apply_fetch(&mut self, token: &FetchToken, payload: FetchPayload) -> Dirty {
		let Some(panel) = self.panels.get_mut(&token.overlay) else {
			tracing::debug!(overlay = %token.overlay, book = %token.book, "client.fetch: panel closed, result discarded");
			return Dirty::empty();
		};
		if panel.apply(token, payload, &mut self.views) {
			Dirty::REDRAW
		} else {
			Dirty::empty()
		}
	}

	pub(crate) fn apply_crash(&mut self, token: &FetchToken, section: Section, message: String) -> Dirty {
		let Some(panel) = self.panels.get_mut(&token.overlay) else {
			return Dirty::empty();
		};
		if panel.apply_crash(token, section, message, &mut self.views) {
			Dirty::REDRAW
		} else {
			Dirty::empty()
		}
	}

	pub(crate) fn refresh(&mut self, id: &OverlayId) -> Dirty {
		let Some(panel) = self.panels.get_mut(id) else {
			tracing::trace!(overlay = %id, "client.refresh: no detail panel");
			return Dirty::empty();
		};
		panel.request_hydration(&self.clock, &self.hydrator, &mut self.views);
		Dirty::REDRAW
	}

	pub(crate) fn run_command(&mut self, cmd: OverlayCmd) -> Dirty {
		let before = self.overlays.count();
		match cmd {
			OverlayCmd::Close(id) => {
				let _ = self.close(&id);
			}
			OverlayCmd::CloseTop => {
				let _ = self.close_top();
			}
			OverlayCmd::CloseAll => {
				let _ = self.close_all();
			}
			OverlayCmd::EmergencyReset => self.emergency_reset(),
		}
		if before == self.overlays.count() { Dirty::empty() } else { Dirty::FULL }
	}

	fn navigate(&mut self, direction: NavDirection, now: Instant) -> Dirty {
		let Some(id) = self.overlays.top().cloned() else {
			return Dirty::empty();
		};
		let Some(panel) = self.panels.get_mut(&id) else {
			tracing::trace!(overlay = %id, "client.navigate ignored: top overlay is not a detail panel");
			return Dirty::empty();
		};
		let event = panel.trigger(direction, now, &mut self.views);
		self.after_nav(&id, event)
	}

	/// Hydrates the new item once a transition has committed.
	fn after_nav(&mut self, id: &OverlayId, event: Option<NavEvent>) -> Dirty {
		let Some(event) = event else {
			return Dirty::empty();
		};
		if let NavEvent::Committed { .. } = event
			&& let Some(panel) = self.panels.get_mut(id)
		{
			panel.request_hydration(&self.clock, &self.hydrator, &mut self.views);
		}
		Dirty::REDRAW
	}

	fn with_top_panel(&mut self, action: impl FnOnce(&mut DetailPanel, &mut V, &Hydrator) -> bool) -> Dirty {
		let Some(panel) = self.overlays.top().and_then(|id| self.panels.get_mut(id)) else {
			return Dirty::empty();
		};
		if action(panel, &mut self.views, &self.hydrator) { Dirty::REDRAW } else { Dirty::empty() }
	}

	/// Tears down panels whose overlay no longer exists or now carries another node.
	fn reap_panels(&mut self) {
		let gone: Vec<OverlayId> = self
			.panels
			.iter()
			.filter(|(id, panel)| self.overlays.node_of(id) != Some(panel.node()))
			.map(|(id, _)| id.clone())
			.collect();
		for id in gone {
			if let Some(mut panel) = self.panels.remove(&id) {
				panel.teardown(&mut self.views);
			}
		}
	}
}

/// A close whose callback faulted still removed the overlay.
fn closed_dirty(result: Result<(), OverlayError>) -> Dirty {
	match result {
		Ok(()) | Err(OverlayError::CallbackPanicked { .. }) => Dirty::FULL,
		Err(_) => Dirty::empty(),
	}
}
