//! Similar-title recommendation endpoints.

// self
use crate::{
	_prelude::*,
	client::{ApiClient, ApiRequest},
	model::{MovieSummary, SeriesSummary},
	obs::RequestGroup,
};

impl ApiClient {
	/// Lists movies similar to the provided one, ranked by shared genres,
	/// studio, and popularity.
	pub async fn similar_movies(
		&self,
		movie_id: u64,
		limit: Option<u32>,
	) -> Result<Vec<MovieSummary>> {
		self.fetch_json(
			ApiRequest::get("film/movies/similar/")
				.query("movie_id", movie_id)
				.query_opt("limit", limit)
				.group(RequestGroup::Recommend),
		)
		.await
	}

	/// Lists series similar to the provided one.
	pub async fn similar_series(
		&self,
		series_id: u64,
		limit: Option<u32>,
	) -> Result<Vec<SeriesSummary>> {
		self.fetch_json(
			ApiRequest::get("film/series/similar/")
				.query("series_id", series_id)
				.query_opt("limit", limit)
				.group(RequestGroup::Recommend),
		)
		.await
	}
}
