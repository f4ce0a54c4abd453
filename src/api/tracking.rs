//! View-duration tracking endpoints.
//!
//! The platform counts a view once a session crosses its watch-time
//! threshold; reports are idempotent per `session_id` and best-effort by
//! design — a lost report costs nothing but a view count.

// self
use crate::{
	_prelude::*,
	client::{ApiClient, ApiRequest},
	model::ViewReceipt,
	obs::RequestGroup,
};

/// What a watch-session report is about: a movie's content record or a
/// standalone episode record. The endpoint rejects reports naming both.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewTarget {
	/// Movie (or series-level) content identifier.
	Content(u64),
	/// Episode identifier.
	Episode(u64),
}

/// Watch-session progress report.
#[derive(Clone, Debug)]
pub struct ViewProgress {
	/// Stable identifier for the playback session.
	pub session_id: String,
	/// Seconds watched so far.
	pub duration_seconds: u64,
	/// Record the session is watching.
	pub target: ViewTarget,
}
impl ViewProgress {
	/// Creates a report for the provided session and target.
	pub fn new(session_id: impl Into<String>, duration_seconds: u64, target: ViewTarget) -> Self {
		Self { session_id: session_id.into(), duration_seconds, target }
	}
}
impl Serialize for ViewProgress {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		#[derive(Serialize)]
		struct Wire<'a> {
			session_id: &'a str,
			duration_seconds: u64,
			#[serde(skip_serializing_if = "Option::is_none")]
			content_id: Option<u64>,
			#[serde(skip_serializing_if = "Option::is_none")]
			episode_id: Option<u64>,
		}

		let (content_id, episode_id) = match self.target {
			ViewTarget::Content(id) => (Some(id), None),
			ViewTarget::Episode(id) => (None, Some(id)),
		};

		Wire {
			session_id: &self.session_id,
			duration_seconds: self.duration_seconds,
			content_id,
			episode_id,
		}
		.serialize(serializer)
	}
}

/// Watch-session progress report for an episode addressed through its series.
#[derive(Clone, Debug, Serialize)]
pub struct EpisodeViewProgress {
	/// Stable identifier for the playback session.
	pub session_id: String,
	/// Seconds watched so far.
	pub duration_seconds: u64,
	/// Series content identifier.
	pub content_id: u64,
	/// Season number within the series.
	pub season_number: u32,
	/// Episode number within the season.
	pub episode_number: u32,
}

impl ApiClient {
	/// Reports watch progress for a movie or a standalone episode.
	pub async fn track_view(&self, progress: &ViewProgress) -> Result<ViewReceipt> {
		self.fetch_json(
			ApiRequest::post("film/track-view/").group(RequestGroup::Tracking).json(progress)?,
		)
		.await
	}

	/// Reports watch progress for an episode addressed by series, season
	/// number, and episode number; counts toward both the episode and the
	/// series.
	pub async fn track_episode_view(&self, progress: &EpisodeViewProgress) -> Result<ViewReceipt> {
		self.fetch_json(
			ApiRequest::post("film/track-episode-view/")
				.group(RequestGroup::Tracking)
				.json(progress)?,
		)
		.await
	}
}
