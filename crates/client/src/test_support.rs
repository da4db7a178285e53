//! Fakes shared by unit tests: a recording view factory and an in-memory book service.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use folio_primitives::{Book, BookId, NodeId};
use rustc_hash::{FxHashMap, FxHashSet};
use tokio::sync::Semaphore;

use crate::animation::ViewPose;
use crate::detail::{BookService, DetailDisplay, DetailViews, FetchError, RatingStats, Section};
use crate::nav::{EdgeArming, ViewDeck};
use crate::overlay::OverlayKind;

pub(crate) fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().with_max_level(tracing::Level::TRACE).try_init();
}

pub(crate) fn shelf(len: u64) -> Vec<Book> {
	(1..=len).map(|id| Book::new(id, format!("Book {id}")).with_author("A. Writer")).collect()
}

/// What a recorded node was built as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Built {
	Panel(BookId),
	View(BookId),
	Preview(BookId),
}

/// View factory that allocates node ids and records every call.
#[derive(Debug, Default)]
pub(crate) struct RecordingViews {
	next: u64,
	pub built: Vec<(NodeId, Built)>,
	pub promoted: Vec<NodeId>,
	pub discarded: Vec<NodeId>,
	pub released: Vec<NodeId>,
	pub poses: FxHashMap<NodeId, ViewPose>,
	pub arming: Vec<(NodeId, EdgeArming)>,
	pub displays: Vec<(NodeId, BookId, DetailDisplay)>,
}

impl RecordingViews {
	fn alloc(&mut self, built: Built) -> NodeId {
		self.next += 1;
		let node = NodeId(1_000 + self.next);
		self.built.push((node, built));
		node
	}

	pub fn previews(&self) -> Vec<BookId> {
		self.built
			.iter()
			.filter_map(|(_, built)| match built {
				Built::Preview(book) => Some(*book),
				_ => None,
			})
			.collect()
	}

	/// Nodes built and not yet discarded, panels excluded.
	pub fn live_views(&self) -> Vec<NodeId> {
		self.built
			.iter()
			.filter(|(node, built)| !matches!(built, Built::Panel(_)) && !self.discarded.contains(node))
			.map(|(node, _)| *node)
			.collect()
	}

	pub fn book_of(&self, node: NodeId) -> Option<BookId> {
		self.built.iter().find(|(built_node, _)| *built_node == node).map(|(_, built)| match built {
			Built::Panel(book) | Built::View(book) | Built::Preview(book) => *book,
		})
	}

	pub fn last_arming(&self) -> Option<EdgeArming> {
		self.arming.last().map(|(_, arming)| *arming)
	}

	pub fn last_display(&self) -> Option<&(NodeId, BookId, DetailDisplay)> {
		self.displays.last()
	}
}

impl ViewDeck<Book> for RecordingViews {
	fn build_view(&mut self, _host: NodeId, item: &Book) -> NodeId {
		self.alloc(Built::View(item.id))
	}

	fn build_preview(&mut self, _host: NodeId, item: &Book) -> NodeId {
		self.alloc(Built::Preview(item.id))
	}

	fn promote(&mut self, _host: NodeId, preview: NodeId, _item: &Book) -> NodeId {
		self.promoted.push(preview);
		preview
	}

	fn discard(&mut self, node: NodeId) {
		assert!(!self.discarded.contains(&node), "{node} discarded twice");
		self.discarded.push(node);
		self.poses.remove(&node);
	}

	fn place(&mut self, node: NodeId, pose: ViewPose) {
		self.poses.insert(node, pose);
	}

	fn arm_edges(&mut self, host: NodeId, arming: EdgeArming) {
		self.arming.push((host, arming));
	}
}

impl DetailViews for RecordingViews {
	fn build_panel(&mut self, book: &Book, _collection: &[Book], _kind: OverlayKind) -> NodeId {
		self.alloc(Built::Panel(book.id))
	}

	fn show_display(&mut self, panel: NodeId, book: &Book, display: &DetailDisplay) {
		self.displays.push((panel, book.id, display.clone()));
	}

	fn release_panel(&mut self, panel: NodeId) {
		self.released.push(panel);
	}
}

/// In-memory catalog whose answers derive from the book id.
///
/// Books can be held (their fetches park until released), made to fail, or
/// made to panic.
#[derive(Debug, Default)]
pub(crate) struct FakeShelf {
	calls: Mutex<Vec<(BookId, Section)>>,
	adds: Mutex<Vec<BookId>>,
	held: Mutex<FxHashMap<BookId, Arc<Semaphore>>>,
	failing: Mutex<FxHashSet<BookId>>,
	panicking: Mutex<FxHashSet<BookId>>,
}

impl FakeShelf {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	/// Parks every fetch for `book` until [`Self::release`].
	pub fn hold(&self, book: BookId) {
		self.held.lock().unwrap().insert(book, Arc::new(Semaphore::new(0)));
	}

	pub fn release(&self, book: BookId) {
		if let Some(gate) = self.held.lock().unwrap().remove(&book) {
			gate.close();
		}
	}

	pub fn fail(&self, book: BookId) {
		self.failing.lock().unwrap().insert(book);
	}

	pub fn heal(&self, book: BookId) {
		self.failing.lock().unwrap().remove(&book);
	}

	pub fn panic_on(&self, book: BookId) {
		self.panicking.lock().unwrap().insert(book);
	}

	pub fn calls(&self) -> Vec<(BookId, Section)> {
		self.calls.lock().unwrap().clone()
	}

	pub fn fetched_books(&self) -> FxHashSet<BookId> {
		self.calls().into_iter().map(|(book, _)| book).collect()
	}

	pub fn adds(&self) -> Vec<BookId> {
		self.adds.lock().unwrap().clone()
	}

	async fn enter(&self, book: BookId, section: Section) -> Result<(), FetchError> {
		self.calls.lock().unwrap().push((book, section));
		let gate = self.held.lock().unwrap().get(&book).cloned();
		if let Some(gate) = gate {
			let _ = gate.acquire().await;
		}
		if self.panicking.lock().unwrap().contains(&book) {
			panic!("catalog exploded for {book}");
		}
		if self.failing.lock().unwrap().contains(&book) {
			return Err(FetchError::Transport(format!("timeout fetching {}", section.as_str())));
		}
		Ok(())
	}
}

#[async_trait]
impl BookService for FakeShelf {
	async fn rating_stats(&self, book: BookId) -> Result<RatingStats, FetchError> {
		self.enter(book, Section::Rating).await?;
		Ok(RatingStats {
			average: book.0 as f32,
			count: book.0 as u32 * 10,
		})
	}

	async fn user_rating(&self, book: BookId) -> Result<Option<u8>, FetchError> {
		self.enter(book, Section::UserRating).await?;
		Ok((book.0 % 2 == 1).then_some((book.0 % 5) as u8 + 1))
	}

	async fn recommendations(&self, book: BookId) -> Result<Vec<Book>, FetchError> {
		self.enter(book, Section::Recommendations).await?;
		Ok(vec![Book::new(book.0 + 100, format!("Like book {}", book.0))])
	}

	async fn library_membership(&self, book: BookId) -> Result<bool, FetchError> {
		self.enter(book, Section::Library).await?;
		Ok(false)
	}

	async fn add_to_library(&self, book: BookId) -> Result<(), FetchError> {
		self.adds.lock().unwrap().push(book);
		self.enter(book, Section::Library).await
	}
}
