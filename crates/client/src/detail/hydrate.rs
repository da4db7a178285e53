use std::future::Future;
use std::sync::Arc;

use folio_primitives::{Book, BookId, OverlayId};
use folio_worker::TaskClass;

use super::{BookService, FetchError, RatingStats, Section};
use crate::msg::{ClientMsg, DetailMsg, MsgSender};

/// Relevance token captured when a fetch is issued.
///
/// A completion is applied only if the panel still shows `book` under the
/// same `epoch`; anything else is a stale result for a view the user has
/// already left.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchToken {
	pub overlay: OverlayId,
	pub book: BookId,
	pub epoch: u64,
}

/// Result of one fetch, tagged by what was fetched.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchPayload {
	Rating(Result<RatingStats, FetchError>),
	UserRating(Result<Option<u8>, FetchError>),
	Recommendations(Result<Vec<Book>, FetchError>),
	Library(Result<bool, FetchError>),
	LibraryAdded(Result<(), FetchError>),
}

impl FetchPayload {
	/// Display section this payload updates.
	pub fn section(&self) -> Section {
		match self {
			Self::Rating(_) => Section::Rating,
			Self::UserRating(_) => Section::UserRating,
			Self::Recommendations(_) => Section::Recommendations,
			Self::Library(_) | Self::LibraryAdded(_) => Section::Library,
		}
	}

	pub fn is_ok(&self) -> bool {
		match self {
			Self::Rating(result) => result.is_ok(),
			Self::UserRating(result) => result.is_ok(),
			Self::Recommendations(result) => result.is_ok(),
			Self::Library(result) => result.is_ok(),
			Self::LibraryAdded(result) => result.is_ok(),
		}
	}
}

/// Issues fetches off the UI context and posts completions to the message bus.
///
/// No fetch is ever cancelled. A task that panics is reported as
/// [`DetailMsg::Crashed`] so its section does not stay loading forever.
#[derive(Clone)]
pub struct Hydrator {
	service: Arc<dyn BookService>,
	tx: MsgSender,
}

impl Hydrator {
	pub fn new(service: Arc<dyn BookService>, tx: MsgSender) -> Self {
		Self { service, tx }
	}

	/// Fetches one display section for `token.book`.
	pub fn fetch(&self, token: FetchToken, section: Section) {
		let service = self.service.clone();
		let book = token.book;
		self.dispatch(TaskClass::Background, token, section, async move {
			match section {
				Section::Rating => FetchPayload::Rating(service.rating_stats(book).await),
				Section::UserRating => FetchPayload::UserRating(service.user_rating(book).await),
				Section::Recommendations => FetchPayload::Recommendations(service.recommendations(book).await),
				Section::Library => FetchPayload::Library(service.library_membership(book).await),
			}
		});
	}

	pub fn add_to_library(&self, token: FetchToken) {
		let service = self.service.clone();
		let book = token.book;
		self.dispatch(TaskClass::Interactive, token, Section::Library, async move {
			FetchPayload::LibraryAdded(service.add_to_library(book).await)
		});
	}

	fn dispatch<F>(&self, class: TaskClass, token: FetchToken, section: Section, fetch: F)
	where
		F: Future<Output = FetchPayload> + Send + 'static,
	{
		tracing::trace!(overlay = %token.overlay, book = %token.book, epoch = token.epoch, section = section.as_str(), "detail.fetch.issue");

		let tx = self.tx.clone();
		let loaded_token = token.clone();
		let task = folio_worker::spawn(class, async move {
			let payload = fetch.await;
			if tx.send(DetailMsg::Loaded { token: loaded_token, payload }.into()).is_err() {
				tracing::trace!("detail.fetch: client gone, completion dropped");
			}
		});

		let tx = self.tx.clone();
		folio_worker::spawn(class, async move {
			let Err(err) = task.await else {
				return;
			};
			let Some(message) = folio_worker::join_error_panic_message(err) else {
				return;
			};
			tracing::warn!(book = %token.book, section = section.as_str(), %message, "detail.fetch: task panicked");
			let _ = tx.send(ClientMsg::Detail(DetailMsg::Crashed { token, section, message }));
		});
	}
}
