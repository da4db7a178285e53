use async_trait::async_trait;
use folio_primitives::{Book, BookId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of one fetch, shown inline with a retry affordance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
	#[error("network error: {0}")]
	Transport(String),
	#[error("{0} not found")]
	NotFound(BookId),
	#[error("request rejected: {0}")]
	Rejected(String),
	/// The fetch task panicked; produced locally, never by a service.
	#[error("fetch task panicked: {0}")]
	Panicked(String),
}

/// Aggregate community rating of a book.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingStats {
	pub average: f32,
	pub count: u32,
}

/// Data-fetch capability backing detail panels.
///
/// Every call resolves exactly once. Calls run off the UI context; results
/// travel back through the client's message channel.
#[async_trait]
pub trait BookService: Send + Sync + 'static {
	async fn rating_stats(&self, book: BookId) -> Result<RatingStats, FetchError>;

	/// The signed-in user's rating, `None` when they have not rated the book.
	async fn user_rating(&self, book: BookId) -> Result<Option<u8>, FetchError>;

	/// Recommended books with details already resolved.
	async fn recommendations(&self, book: BookId) -> Result<Vec<Book>, FetchError>;

	async fn library_membership(&self, book: BookId) -> Result<bool, FetchError>;

	/// Adds the book to the user's library, creating the library on first use.
	async fn add_to_library(&self, book: BookId) -> Result<(), FetchError>;
}
