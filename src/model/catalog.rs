//! Content, movie, series, season, and episode payloads.

// self
use crate::{
	_prelude::*,
	model::{Genre, Nation, Person, Tag},
};

/// Discriminator carried by combined content listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
	/// Standalone feature with a single video.
	Movie,
	/// Multi-season series with per-episode videos.
	Series,
}
impl ContentKind {
	/// Returns the query-parameter form of the discriminator.
	pub const fn as_str(self) -> &'static str {
		match self {
			ContentKind::Movie => "movie",
			ContentKind::Series => "series",
		}
	}
}
impl Display for ContentKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Publication status of a title.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
	/// Still receiving new episodes or updates.
	OnGoing,
	/// Finished airing.
	Completed,
}
impl ContentStatus {
	/// Returns the query-parameter form of the status.
	pub const fn as_str(self) -> &'static str {
		match self {
			ContentStatus::OnGoing => "on_going",
			ContentStatus::Completed => "completed",
		}
	}
}
impl Display for ContentStatus {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Listing card shared by content, movie, series, and search results.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContentSummary {
	/// Content identifier.
	pub id: u64,
	/// Display title.
	pub title: String,
	/// Title in the original language, when it differs.
	#[serde(default)]
	pub original_title: Option<String>,
	/// Movie/series discriminator.
	#[serde(default)]
	pub content_type: Option<ContentKind>,
	/// URL-safe identifier used by detail endpoints.
	#[serde(default)]
	pub slug: Option<String>,
	/// Release date in `YYYY-MM-DD` form, opaque to the client.
	#[serde(default)]
	pub release_date: Option<String>,
	/// Synopsis.
	#[serde(default)]
	pub description: Option<String>,
	/// Poster artwork URL.
	#[serde(default)]
	pub poster_img_url: Option<String>,
	/// Banner artwork URL.
	#[serde(default)]
	pub banner_img_url: Option<String>,
	/// Accumulated view count.
	#[serde(default)]
	pub views: Option<u64>,
	/// Aggregate rating.
	#[serde(default)]
	pub rating: Option<f64>,
	/// Publication status.
	#[serde(default)]
	pub status: Option<ContentStatus>,
	/// Age rating label.
	#[serde(default)]
	pub age_rank: Option<String>,
}

/// Full detail payload for a content page.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContentDetail {
	/// Listing fields, carried on the same object on the wire.
	#[serde(flatten)]
	pub summary: ContentSummary,
	/// Genres attached to the title.
	#[serde(default)]
	pub genres: Vec<Genre>,
	/// Tags attached to the title.
	#[serde(default)]
	pub tags: Vec<Tag>,
	/// Production nations.
	#[serde(default)]
	pub nations: Vec<Nation>,
	/// Cast and crew credits, ordered by billing.
	#[serde(default)]
	pub cast_crew: Vec<CastCredit>,
	/// Movie-specific facts, present when the title is a movie.
	#[serde(default)]
	pub movie_details: Option<MovieFacts>,
	/// Series-specific facts, present when the title is a series.
	#[serde(default)]
	pub series_details: Option<SeriesFacts>,
}

/// One cast or crew credit on a title.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CastCredit {
	/// Credited person.
	pub person: Person,
	/// Credited role (actor, director, ...).
	#[serde(default)]
	pub role: Option<String>,
	/// Character name for acting credits.
	#[serde(default)]
	pub character_name: Option<String>,
	/// Billing position.
	#[serde(default)]
	pub order: Option<u32>,
}

/// Movie facts nested under a content detail.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MovieFacts {
	/// Runtime in minutes.
	#[serde(default)]
	pub duration: Option<u64>,
	/// Length of the skippable intro, in seconds.
	#[serde(default)]
	pub intro_duration: Option<f64>,
	/// Offset where the intro starts, in seconds.
	#[serde(default)]
	pub start_intro_time: Option<f64>,
	/// Identifier of the bound video, when one exists.
	#[serde(default)]
	pub video_id: Option<u64>,
}

/// Series facts nested under a content detail.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeriesFacts {
	/// Number of seasons published so far.
	#[serde(default)]
	pub total_seasons: Option<u32>,
	/// Number of episodes published so far.
	#[serde(default)]
	pub total_episodes: Option<u32>,
}

/// Movie detail payload: movie fields at the top level, the content record
/// nested under `content`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MovieDetail {
	/// Nested content record.
	pub content: ContentDetail,
	/// Runtime in minutes.
	#[serde(default)]
	pub duration: Option<u64>,
	/// Length of the skippable intro, in seconds.
	#[serde(default)]
	pub intro_duration: Option<f64>,
	/// Offset where the intro starts, in seconds.
	#[serde(default)]
	pub start_intro_time: Option<f64>,
	/// Identifier of the bound video, when one exists.
	#[serde(default)]
	pub video: Option<u64>,
}

/// Series detail payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeriesDetail {
	/// Nested content record.
	pub content: ContentDetail,
	/// Number of seasons published so far.
	#[serde(default)]
	pub total_seasons: Option<u32>,
	/// Number of episodes published so far.
	#[serde(default)]
	pub total_episodes: Option<u32>,
	/// Seasons, when the endpoint inlines them.
	#[serde(default)]
	pub seasons: Vec<Season>,
}

/// One season of a series.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Season {
	/// Season identifier.
	pub id: u64,
	/// Position within the series, starting at 1.
	#[serde(default)]
	pub order: Option<u32>,
	/// Display name.
	#[serde(default)]
	pub season_name: Option<String>,
	/// Release date in `YYYY-MM-DD` form.
	#[serde(default)]
	pub release_date: Option<String>,
	/// Synopsis.
	#[serde(default)]
	pub description: Option<String>,
	/// Banner artwork URL.
	#[serde(default)]
	pub banner_img_url: Option<String>,
	/// Number of episodes in the season.
	#[serde(default)]
	pub num_episodes: Option<u32>,
	/// Publication status.
	#[serde(default)]
	pub status: Option<ContentStatus>,
	/// Episodes, when the endpoint inlines them.
	#[serde(default)]
	pub episodes: Vec<Episode>,
}

/// One episode of a season.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Episode {
	/// Episode identifier.
	pub id: u64,
	/// Position within the season, starting at 1.
	#[serde(default)]
	pub order: Option<u32>,
	/// Display title.
	#[serde(default)]
	pub title: Option<String>,
	/// Synopsis.
	#[serde(default)]
	pub description: Option<String>,
	/// Banner artwork URL.
	#[serde(default)]
	pub banner_img_url: Option<String>,
	/// Accumulated view count.
	#[serde(default)]
	pub views: Option<u64>,
	/// Runtime in minutes.
	#[serde(default)]
	pub duration: Option<u64>,
	/// Length of the skippable intro, in seconds.
	#[serde(default)]
	pub intro_duration: Option<f64>,
	/// Offset where the intro starts, in seconds.
	#[serde(default)]
	pub start_intro_time: Option<f64>,
}

/// Movie listing entry: the content card plus the runtime.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MovieSummary {
	/// Nested content card.
	pub content: ContentSummary,
	/// Runtime in minutes.
	#[serde(default)]
	pub duration: Option<u64>,
}

/// Series listing entry: the content card plus season/episode counts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeriesSummary {
	/// Nested content card.
	pub content: ContentSummary,
	/// Number of seasons published so far.
	#[serde(default)]
	pub total_seasons: Option<u32>,
	/// Number of episodes published so far.
	#[serde(default)]
	pub total_episodes: Option<u32>,
}

/// One genre shelf from the browse-by-genre endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenreShelf {
	/// Genre heading the shelf belongs to.
	pub genre: Genre,
	/// Movies filed under the genre.
	#[serde(default)]
	pub movies: Vec<MovieSummary>,
}

/// Raw movie record echoed by the create endpoint; related records appear as
/// identifiers, not objects.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MovieRecord {
	/// Content identifier the movie row hangs off.
	pub content: u64,
	/// Runtime in minutes.
	#[serde(default)]
	pub duration: Option<u64>,
	/// Length of the skippable intro, in seconds.
	#[serde(default)]
	pub intro_duration: Option<f64>,
	/// Offset where the intro starts, in seconds.
	#[serde(default)]
	pub start_intro_time: Option<f64>,
	/// Identifier of the bound video, when one exists.
	#[serde(default)]
	pub video: Option<u64>,
}

/// Fields accepted by the movie create/update endpoints.
#[derive(Clone, Debug, Default, Serialize)]
pub struct MovieDraft {
	/// Display title.
	pub title: String,
	/// Synopsis.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Release date in `YYYY-MM-DD` form.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub release_date: Option<String>,
	/// Runtime in minutes.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub duration: Option<u64>,
	/// Publication status.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub status: Option<ContentStatus>,
	/// Age rating label.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub age_rank: Option<String>,
	/// Genre identifiers to attach.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub genres: Vec<u64>,
	/// Tag identifiers to attach.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub tags: Vec<u64>,
	/// Nation identifiers to attach.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub nations: Vec<u64>,
	/// Identifier of an uploaded video to bind.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub video: Option<u64>,
}

/// Fields accepted by the season create/update endpoints.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SeasonDraft {
	/// Owning series content identifier.
	pub series: u64,
	/// Position within the series.
	pub order: u32,
	/// Display name.
	pub season_name: String,
	/// Release date in `YYYY-MM-DD` form.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub release_date: Option<String>,
	/// Synopsis.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

/// Fields accepted by the episode create/update endpoints.
#[derive(Clone, Debug, Default, Serialize)]
pub struct EpisodeDraft {
	/// Owning season identifier.
	pub season: u64,
	/// Position within the season.
	pub order: u32,
	/// Display title.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	/// Synopsis.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Runtime in minutes.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub duration: Option<u64>,
	/// Identifier of an uploaded video to bind.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub video: Option<u64>,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn summary_decodes_a_listing_card() {
		let payload = r#"{
			"id": 42,
			"title": "Spirited Journey",
			"content_type": "movie",
			"slug": "spirited-journey",
			"release_date": "2021-07-16",
			"views": 12034,
			"rating": 8.6,
			"status": "completed",
			"unknown_field": {"future": true}
		}"#;
		let summary: ContentSummary =
			serde_json::from_str(payload).expect("Listing card should deserialize.");

		assert_eq!(summary.id, 42);
		assert_eq!(summary.content_type, Some(ContentKind::Movie));
		assert_eq!(summary.status, Some(ContentStatus::Completed));
		assert_eq!(summary.slug.as_deref(), Some("spirited-journey"));
	}

	#[test]
	fn draft_omits_unset_fields() {
		let draft = MovieDraft { title: "New Title".into(), ..Default::default() };
		let payload =
			serde_json::to_string(&draft).expect("Movie draft should serialize to JSON.");

		assert_eq!(payload, "{\"title\":\"New Title\"}");
	}

	#[test]
	fn status_labels_match_the_wire_form() {
		assert_eq!(ContentStatus::OnGoing.as_str(), "on_going");
		assert_eq!(ContentKind::Series.to_string(), "series");
	}
}
