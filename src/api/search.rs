//! Combined movie + series search.

// self
use crate::{
	_prelude::*,
	client::{ApiClient, ApiRequest},
	model::{ContentSummary, Page},
	obs::RequestGroup,
};

/// Query for the combined search endpoint.
#[derive(Clone, Debug)]
pub struct SearchQuery {
	/// Free-text search term; the endpoint rejects empty terms.
	pub term: String,
	/// Page size.
	pub limit: Option<u32>,
	/// Page offset.
	pub offset: Option<u32>,
}
impl SearchQuery {
	/// Creates a query for the provided term.
	pub fn new(term: impl Into<String>) -> Self {
		Self { term: term.into(), limit: None, offset: None }
	}

	/// Sets the page size.
	pub fn limit(mut self, limit: u32) -> Self {
		self.limit = Some(limit);

		self
	}

	/// Sets the page offset.
	pub fn offset(mut self, offset: u32) -> Self {
		self.offset = Some(offset);

		self
	}
}

impl ApiClient {
	/// Searches movies and series together, returning mixed summaries tagged
	/// with their content kind.
	pub async fn search(&self, query: &SearchQuery) -> Result<Page<ContentSummary>> {
		self.fetch_json(
			ApiRequest::get("film/search/combined/")
				.query("search", &query.term)
				.query_opt("limit", query.limit)
				.query_opt("offset", query.offset)
				.group(RequestGroup::Search),
		)
		.await
	}
}
