//! Dropdown metadata endpoints: genres, tags, nations, careers.

// self
use crate::{
	_prelude::*,
	client::{ApiClient, ApiRequest},
	model::{Genre, MetadataDraft, Nation, Person, Tag},
	obs::RequestGroup,
};

impl ApiClient {
	/// Lists every genre.
	pub async fn genres(&self) -> Result<Vec<Genre>> {
		self.fetch_json(ApiRequest::get("film/genres/").group(RequestGroup::Metadata)).await
	}

	/// Creates a genre (admin only).
	pub async fn create_genre(&self, draft: &MetadataDraft) -> Result<Genre> {
		self.fetch_json(
			ApiRequest::post("film/genres/").group(RequestGroup::Metadata).json(draft)?,
		)
		.await
	}

	/// Lists every tag.
	pub async fn tags(&self) -> Result<Vec<Tag>> {
		self.fetch_json(ApiRequest::get("film/tags/").group(RequestGroup::Metadata)).await
	}

	/// Creates a tag (admin only).
	pub async fn create_tag(&self, draft: &MetadataDraft) -> Result<Tag> {
		self.fetch_json(ApiRequest::post("film/tags/").group(RequestGroup::Metadata).json(draft)?)
			.await
	}

	/// Lists every nation.
	pub async fn nations(&self) -> Result<Vec<Nation>> {
		self.fetch_json(ApiRequest::get("film/nations/").group(RequestGroup::Metadata)).await
	}

	/// Creates a nation (admin only).
	pub async fn create_nation(&self, draft: &MetadataDraft) -> Result<Nation> {
		self.fetch_json(
			ApiRequest::post("film/nations/").group(RequestGroup::Metadata).json(draft)?,
		)
		.await
	}

	/// Lists people with their career roles.
	pub async fn careers(&self) -> Result<Vec<Person>> {
		self.fetch_json(ApiRequest::get("film/careers/").group(RequestGroup::Metadata)).await
	}
}
