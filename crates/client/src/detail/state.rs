use folio_primitives::Book;

use super::{FetchError, RatingStats};

/// One independently fetched part of a detail panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
	Rating,
	UserRating,
	Recommendations,
	Library,
}

impl Section {
	pub const ALL: [Self; 4] = [Self::Rating, Self::UserRating, Self::Recommendations, Self::Library];

	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Rating => "rating",
			Self::UserRating => "user_rating",
			Self::Recommendations => "recommendations",
			Self::Library => "library",
		}
	}
}

/// Lifecycle of one fetched value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState<T> {
	#[default]
	Idle,
	Loading,
	Ready(T),
	/// Rendered as an inline error placeholder with a retry affordance.
	Failed { message: String },
}

impl<T> LoadState<T> {
	pub fn from_result(result: Result<T, FetchError>) -> Self {
		match result {
			Ok(value) => Self::Ready(value),
			Err(err) => Self::Failed { message: err.to_string() },
		}
	}

	pub fn ready(&self) -> Option<&T> {
		match self {
			Self::Ready(value) => Some(value),
			_ => None,
		}
	}

	pub fn is_loading(&self) -> bool {
		matches!(self, Self::Loading)
	}

	pub fn is_failed(&self) -> bool {
		matches!(self, Self::Failed { .. })
	}
}

/// Everything a detail panel shows about the displayed book beyond the book itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailDisplay {
	pub rating: LoadState<RatingStats>,
	pub user_rating: LoadState<Option<u8>>,
	pub recommendations: LoadState<Vec<Book>>,
	pub library: LoadState<bool>,
}

impl DetailDisplay {
	/// Every section waiting on its first result.
	pub fn loading() -> Self {
		Self {
			rating: LoadState::Loading,
			user_rating: LoadState::Loading,
			recommendations: LoadState::Loading,
			library: LoadState::Loading,
		}
	}

	pub fn is_failed(&self, section: Section) -> bool {
		match section {
			Section::Rating => self.rating.is_failed(),
			Section::UserRating => self.user_rating.is_failed(),
			Section::Recommendations => self.recommendations.is_failed(),
			Section::Library => self.library.is_failed(),
		}
	}

	pub fn is_loading(&self, section: Section) -> bool {
		match section {
			Section::Rating => self.rating.is_loading(),
			Section::UserRating => self.user_rating.is_loading(),
			Section::Recommendations => self.recommendations.is_loading(),
			Section::Library => self.library.is_loading(),
		}
	}

	pub fn failed_sections(&self) -> Vec<Section> {
		Section::ALL.into_iter().filter(|section| self.is_failed(*section)).collect()
	}

	pub(crate) fn mark_loading(&mut self, section: Section) {
		match section {
			Section::Rating => self.rating = LoadState::Loading,
			Section::UserRating => self.user_rating = LoadState::Loading,
			Section::Recommendations => self.recommendations = LoadState::Loading,
			Section::Library => self.library = LoadState::Loading,
		}
	}

	pub(crate) fn mark_failed(&mut self, section: Section, error: FetchError) {
		match section {
			Section::Rating => self.rating = LoadState::from_result(Err(error)),
			Section::UserRating => self.user_rating = LoadState::from_result(Err(error)),
			Section::Recommendations => self.recommendations = LoadState::from_result(Err(error)),
			Section::Library => self.library = LoadState::from_result(Err(error)),
		}
	}
}
