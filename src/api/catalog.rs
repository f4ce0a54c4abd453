//! Catalog endpoints: combined content listings, movies, series, seasons,
//! episodes, and video sources.

// self
use crate::{
	_prelude::*,
	client::{ApiClient, ApiRequest},
	model::{
		ContentDetail, ContentKind, ContentStatus, ContentSummary, Episode, EpisodeDraft,
		GenreShelf, MovieDetail, MovieDraft, MovieRecord, MovieSummary, Page, Season,
		SeasonDraft, SeriesDetail, SeriesSummary, VideoSource,
	},
	obs::RequestGroup,
};

/// Filters accepted by the content and movie listing endpoints.
#[derive(Clone, Debug, Default)]
pub struct ContentQuery {
	/// Restricts results to one content kind.
	pub kind: Option<ContentKind>,
	/// Restricts results to one publication status.
	pub status: Option<ContentStatus>,
	/// Restricts results to one genre identifier.
	pub genre: Option<u64>,
	/// Sort expression, e.g. `-views` or `-created_at`.
	pub ordering: Option<String>,
	/// Page size.
	pub limit: Option<u32>,
	/// Page offset.
	pub offset: Option<u32>,
}
impl ContentQuery {
	/// Restricts results to one content kind.
	pub fn kind(mut self, kind: ContentKind) -> Self {
		self.kind = Some(kind);

		self
	}

	/// Restricts results to one publication status.
	pub fn status(mut self, status: ContentStatus) -> Self {
		self.status = Some(status);

		self
	}

	/// Restricts results to one genre.
	pub fn genre(mut self, genre: u64) -> Self {
		self.genre = Some(genre);

		self
	}

	/// Sets the sort expression.
	pub fn ordering(mut self, ordering: impl Into<String>) -> Self {
		self.ordering = Some(ordering.into());

		self
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

	fn apply(&self, request: ApiRequest) -> ApiRequest {
		request
			.query_opt("content_type", self.kind)
			.query_opt("status", self.status)
			.query_opt("genre", self.genre)
			.query_opt("ordering", self.ordering.clone())
			.query_opt("limit", self.limit)
			.query_opt("offset", self.offset)
	}
}

impl ApiClient {
	/// Lists movies and series together as flat content cards.
	pub async fn contents(&self, query: &ContentQuery) -> Result<Vec<ContentSummary>> {
		self.fetch_json(
			query.apply(ApiRequest::get("film/contents/")).group(RequestGroup::Catalog),
		)
		.await
	}

	/// Fetches one title by slug, movie or series alike.
	pub async fn content_detail(&self, slug: &str) -> Result<ContentDetail> {
		self.fetch_json(
			ApiRequest::get(format!("film/contents/{slug}/")).group(RequestGroup::Catalog),
		)
		.await
	}

	/// Lists movies inside the platform's `{count, results}` envelope.
	pub async fn movies(&self, query: &ContentQuery) -> Result<Page<MovieSummary>> {
		self.fetch_json(query.apply(ApiRequest::get("film/movies/")).group(RequestGroup::Catalog))
			.await
	}

	/// Creates a movie (admin only); the echo carries related records as
	/// identifiers.
	pub async fn create_movie(&self, draft: &MovieDraft) -> Result<MovieRecord> {
		self.fetch_json(
			ApiRequest::post("film/movies/").group(RequestGroup::Catalog).json(draft)?,
		)
		.await
	}

	/// Fetches one movie by slug.
	pub async fn movie_detail(&self, slug: &str) -> Result<MovieDetail> {
		self.fetch_json(
			ApiRequest::get(format!("film/movies/{slug}/")).group(RequestGroup::Catalog),
		)
		.await
	}

	/// Partially updates one movie (admin only).
	pub async fn update_movie(&self, slug: &str, draft: &MovieDraft) -> Result<MovieDetail> {
		self.fetch_json(
			ApiRequest::patch(format!("film/movies/{slug}/"))
				.group(RequestGroup::Catalog)
				.json(draft)?,
		)
		.await
	}

	/// Lists movies whose content changed most recently.
	pub async fn recently_updated_movies(&self, limit: Option<u32>) -> Result<Vec<MovieSummary>> {
		self.fetch_json(
			ApiRequest::get("film/movies/recently-updated/")
				.query_opt("limit", limit)
				.group(RequestGroup::Catalog),
		)
		.await
	}

	/// Lists genre shelves, each carrying its movies; restricts to one genre
	/// when an identifier is provided.
	pub async fn browse_movies_by_genre(
		&self,
		genre_id: Option<u64>,
	) -> Result<Vec<GenreShelf>> {
		self.fetch_json(
			ApiRequest::get("film/movies/browse/genre/")
				.query_opt("genre_id", genre_id)
				.group(RequestGroup::Catalog),
		)
		.await
	}

	/// Lists series.
	pub async fn series(&self, query: &ContentQuery) -> Result<Vec<SeriesSummary>> {
		self.fetch_json(query.apply(ApiRequest::get("film/series/")).group(RequestGroup::Catalog))
			.await
	}

	/// Fetches one series with its seasons.
	pub async fn series_detail(&self, id: u64) -> Result<SeriesDetail> {
		self.fetch_json(ApiRequest::get(format!("film/series/{id}/")).group(RequestGroup::Catalog))
			.await
	}

	/// Creates a season (admin only).
	pub async fn create_season(&self, draft: &SeasonDraft) -> Result<Season> {
		self.fetch_json(
			ApiRequest::post("film/seasons/").group(RequestGroup::Catalog).json(draft)?,
		)
		.await
	}

	/// Fetches one season with its episodes.
	pub async fn season_detail(&self, id: u64) -> Result<Season> {
		self.fetch_json(
			ApiRequest::get(format!("film/seasons/{id}/")).group(RequestGroup::Catalog),
		)
		.await
	}

	/// Partially updates one season (admin only).
	pub async fn update_season(&self, id: u64, draft: &SeasonDraft) -> Result<Season> {
		self.fetch_json(
			ApiRequest::patch(format!("film/seasons/{id}/"))
				.group(RequestGroup::Catalog)
				.json(draft)?,
		)
		.await
	}

	/// Creates an episode (admin only).
	pub async fn create_episode(&self, draft: &EpisodeDraft) -> Result<Episode> {
		self.fetch_json(
			ApiRequest::post("film/episodes/").group(RequestGroup::Catalog).json(draft)?,
		)
		.await
	}

	/// Fetches one episode.
	pub async fn episode_detail(&self, id: u64) -> Result<Episode> {
		self.fetch_json(
			ApiRequest::get(format!("film/episodes/{id}/")).group(RequestGroup::Catalog),
		)
		.await
	}

	/// Partially updates one episode (admin only).
	pub async fn update_episode(&self, id: u64, draft: &EpisodeDraft) -> Result<Episode> {
		self.fetch_json(
			ApiRequest::patch(format!("film/episodes/{id}/"))
				.group(RequestGroup::Catalog)
				.json(draft)?,
		)
		.await
	}

	/// Fetches the playable sources for a movie.
	pub async fn movie_video(&self, movie_id: u64) -> Result<VideoSource> {
		self.fetch_json(
			ApiRequest::get(format!("film/movies/{movie_id}/video/"))
				.group(RequestGroup::Catalog),
		)
		.await
	}

	/// Fetches the playable sources for an episode addressed by series,
	/// season number, and episode number.
	pub async fn episode_video(
		&self,
		series_id: u64,
		season_number: u32,
		episode_number: u32,
	) -> Result<VideoSource> {
		self.fetch_json(
			ApiRequest::get(format!(
				"film/series/{series_id}/seasons/{season_number}/episodes/{episode_number}/video/"
			))
			.group(RequestGroup::Catalog),
		)
		.await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::client::ClientConfig;

	#[test]
	fn content_query_renders_every_filter() {
		let config = ClientConfig::builder("http://127.0.0.1:8000/api/v1")
			.build()
			.expect("Base URL fixture should build.");
		let query = ContentQuery::default()
			.kind(ContentKind::Movie)
			.status(ContentStatus::OnGoing)
			.ordering("-views")
			.limit(24)
			.offset(48);
		let url = query
			.apply(ApiRequest::get("film/contents/"))
			.endpoint(&config)
			.expect("Query URL should resolve.");

		assert_eq!(
			url.as_str(),
			"http://127.0.0.1:8000/api/v1/film/contents/?content_type=movie&status=on_going&ordering=-views&limit=24&offset=48",
		);
	}
}
