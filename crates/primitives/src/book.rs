use serde::{Deserialize, Serialize};

use crate::BookId;

/// A book as shown in detail panels and recommendation lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
	pub id: BookId,
	pub title: String,
	#[serde(default)]
	pub authors: Vec<String>,
	#[serde(default)]
	pub published_year: Option<u16>,
	#[serde(default)]
	pub cover_url: Option<String>,
}

impl Book {
	/// Creates a book with only identity and title populated.
	pub fn new(id: u64, title: impl Into<String>) -> Self {
		Self {
			id: BookId(id),
			title: title.into(),
			authors: Vec::new(),
			published_year: None,
			cover_url: None,
		}
	}

	/// Adds an author (builder pattern).
	#[must_use]
	pub fn with_author(mut self, author: impl Into<String>) -> Self {
		self.authors.push(author.into());
		self
	}

	/// Returns the authors joined for a one-line byline.
	pub fn byline(&self) -> String {
		self.authors.join(", ")
	}
}
