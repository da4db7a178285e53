use std::time::Instant;

use folio_primitives::{Book, NavDirection, NodeId, OverlayId};
use folio_worker::GenerationClock;

use super::{DetailDisplay, DetailViews, FetchError, FetchPayload, FetchToken, Hydrator, LoadState, Section};
use crate::animation::ViewPose;
use crate::config::MotionConfig;
use crate::nav::{NavEvent, NavigationContext, TransitionEngine};
use crate::overlay::OverlayKind;

enum Navigator {
	/// Nothing to navigate: no edge zones, arrows or previews exist.
	Single { book: Book, view: NodeId },
	Navigable(TransitionEngine<Book>),
}

/// Content of one detail overlay.
pub struct DetailPanel {
	overlay: OverlayId,
	kind: OverlayKind,
	node: NodeId,
	navigator: Navigator,
	display: DetailDisplay,
	epoch: u64,
}

impl DetailPanel {
	/// Builds the panel frame and its views for `book` within `collection`.
	///
	/// A collection of one item, or one that does not contain `book`, yields
	/// a plain single-item panel. Nothing is fetched until
	/// [`Self::request_hydration`].
	pub fn open<V: DetailViews>(overlay: OverlayId, kind: OverlayKind, book: Book, collection: Vec<Book>, views: &mut V, motion: &MotionConfig) -> Self {
		let node = views.build_panel(&book, &collection, kind);
		let start = collection.iter().position(|item| item.id == book.id);

		let navigator = match start.and_then(|index| NavigationContext::new(collection, index)) {
			Some(ctx) => Navigator::Navigable(TransitionEngine::mount(ctx, node, views, motion.clone())),
			None => {
				let view = views.build_view(node, &book);
				views.place(view, ViewPose::REST);
				Navigator::Single { book, view }
			}
		};

		tracing::trace!(%overlay, %kind, %node, navigable = matches!(navigator, Navigator::Navigable(_)), "detail.open");
		Self {
			overlay,
			kind,
			node,
			navigator,
			display: DetailDisplay::default(),
			epoch: 0,
		}
	}

	pub fn overlay(&self) -> &OverlayId {
		&self.overlay
	}

	pub fn kind(&self) -> OverlayKind {
		self.kind
	}

	/// Root node of the panel, pushed as the overlay's node.
	pub fn node(&self) -> NodeId {
		self.node
	}

	pub fn current_book(&self) -> &Book {
		match &self.navigator {
			Navigator::Single { book, .. } => book,
			Navigator::Navigable(engine) => engine.current(),
		}
	}

	/// Index within the collection; `None` for single-item panels.
	pub fn current_index(&self) -> Option<usize> {
		self.engine().map(TransitionEngine::current_index)
	}

	pub fn engine(&self) -> Option<&TransitionEngine<Book>> {
		match &self.navigator {
			Navigator::Single { .. } => None,
			Navigator::Navigable(engine) => Some(engine),
		}
	}

	pub fn is_navigable(&self) -> bool {
		self.engine().is_some()
	}

	pub fn display(&self) -> &DetailDisplay {
		&self.display
	}

	/// Token a fetch issued now would carry.
	pub fn token(&self) -> FetchToken {
		FetchToken {
			overlay: self.overlay.clone(),
			book: self.current_book().id,
			epoch: self.epoch,
		}
	}

	/// Starts a new fetch epoch for the displayed book and issues every section fetch.
	///
	/// Results still in flight from earlier epochs become stale.
	pub fn request_hydration<V: DetailViews>(&mut self, clock: &GenerationClock, hydrator: &Hydrator, views: &mut V) {
		self.epoch = clock.next();
		self.display = DetailDisplay::loading();
		views.show_display(self.node, self.current_book(), &self.display);

		let token = self.token();
		tracing::trace!(overlay = %self.overlay, book = %token.book, epoch = self.epoch, "detail.hydrate");
		for section in Section::ALL {
			hydrator.fetch(token.clone(), section);
		}
	}

	/// Returns true if `token` still describes what the panel displays.
	pub fn is_current(&self, token: &FetchToken) -> bool {
		token.overlay == self.overlay && token.epoch == self.epoch && token.book == self.current_book().id
	}

	/// Applies a fetch completion; stale completions are discarded.
	///
	/// Returns true when the display changed.
	pub fn apply<V: DetailViews>(&mut self, token: &FetchToken, payload: FetchPayload, views: &mut V) -> bool {
		if !self.is_current(token) {
			tracing::debug!(
				overlay = %self.overlay,
				book = %token.book,
				epoch = token.epoch,
				current_book = %self.current_book().id,
				current_epoch = self.epoch,
				section = payload.section().as_str(),
				"detail.fetch: stale result discarded"
			);
			return false;
		}

		tracing::trace!(book = %token.book, section = payload.section().as_str(), ok = payload.is_ok(), "detail.fetch.apply");
		match payload {
			FetchPayload::Rating(result) => self.display.rating = LoadState::from_result(result),
			FetchPayload::UserRating(result) => self.display.user_rating = LoadState::from_result(result),
			FetchPayload::Recommendations(result) => self.display.recommendations = LoadState::from_result(result),
			FetchPayload::Library(result) => self.display.library = LoadState::from_result(result),
			FetchPayload::LibraryAdded(result) => self.display.library = LoadState::from_result(result.map(|()| true)),
		}
		views.show_display(self.node, self.current_book(), &self.display);
		true
	}

	/// Marks `section` failed after its fetch task crashed.
	pub fn apply_crash<V: DetailViews>(&mut self, token: &FetchToken, section: Section, message: String, views: &mut V) -> bool {
		if !self.is_current(token) {
			tracing::debug!(overlay = %self.overlay, book = %token.book, section = section.as_str(), "detail.fetch: stale crash report discarded");
			return false;
		}
		self.display.mark_failed(section, FetchError::Panicked(message));
		views.show_display(self.node, self.current_book(), &self.display);
		true
	}

	/// Re-issues a failed section's fetch under the current epoch.
	///
	/// Returns false when the section has not failed.
	pub fn retry<V: DetailViews>(&mut self, section: Section, hydrator: &Hydrator, views: &mut V) -> bool {
		if !self.display.is_failed(section) {
			tracing::debug!(overlay = %self.overlay, section = section.as_str(), "detail.retry ignored: section not failed");
			return false;
		}
		self.display.mark_loading(section);
		views.show_display(self.node, self.current_book(), &self.display);
		hydrator.fetch(self.token(), section);
		true
	}

	/// Adds the displayed book to the user's library.
	///
	/// Ignored while a library request is already pending or the book is
	/// already in the library.
	pub fn add_to_library<V: DetailViews>(&mut self, hydrator: &Hydrator, views: &mut V) -> bool {
		if self.display.library.is_loading() || self.display.library.ready() == Some(&true) {
			return false;
		}
		self.display.mark_loading(Section::Library);
		views.show_display(self.node, self.current_book(), &self.display);
		hydrator.add_to_library(self.token());
		true
	}

	pub fn hover<V: DetailViews>(&mut self, direction: NavDirection, entered: bool, now: Instant, views: &mut V) -> Option<NavEvent> {
		let Navigator::Navigable(engine) = &mut self.navigator else {
			return None;
		};
		if entered {
			engine.hover_enter(direction, now, views)
		} else {
			engine.hover_exit(direction, views)
		}
	}

	/// Starts a transition; rejected triggers are logged and dropped.
	pub fn trigger<V: DetailViews>(&mut self, direction: NavDirection, now: Instant, views: &mut V) -> Option<NavEvent> {
		let Navigator::Navigable(engine) = &mut self.navigator else {
			tracing::trace!(overlay = %self.overlay, "detail.trigger ignored: single item");
			return None;
		};
		engine.trigger(direction, now, views).ok()
	}

	pub fn tick<V: DetailViews>(&mut self, now: Instant, views: &mut V) -> Option<NavEvent> {
		match &mut self.navigator {
			Navigator::Navigable(engine) => engine.tick(now, views),
			Navigator::Single { .. } => None,
		}
	}

	pub fn next_deadline(&self) -> Option<Instant> {
		self.engine().and_then(TransitionEngine::next_deadline)
	}

	pub fn is_animating(&self) -> bool {
		self.engine().is_some_and(TransitionEngine::is_animating)
	}

	/// Discards every view and releases the panel frame.
	pub fn teardown<V: DetailViews>(&mut self, views: &mut V) {
		match &mut self.navigator {
			Navigator::Navigable(engine) => engine.teardown(views),
			Navigator::Single { view, .. } => views.discard(*view),
		}
		views.release_panel(self.node);
		tracing::trace!(overlay = %self.overlay, "detail.teardown");
	}
}
