//! Dropdown metadata payloads: genres, tags, nations, people.

// self
use crate::_prelude::*;

/// Genre record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
	/// Genre identifier.
	pub id: u64,
	/// Display name.
	pub name: String,
	/// URL-safe identifier.
	#[serde(default)]
	pub slug: Option<String>,
}

/// Tag record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
	/// Tag identifier.
	pub id: u64,
	/// Display name.
	pub name: String,
	/// URL-safe identifier.
	#[serde(default)]
	pub slug: Option<String>,
}

/// Production nation record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nation {
	/// Nation identifier.
	pub id: u64,
	/// Display name.
	pub name: String,
	/// URL-safe identifier.
	#[serde(default)]
	pub slug: Option<String>,
}

/// Cast or crew member; credit-specific fields live on the credit record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Person {
	/// Person identifier.
	pub id: u64,
	/// Display name.
	pub name: String,
	/// Portrait URL.
	#[serde(default)]
	pub photo_url: Option<String>,
	/// Nationality, when the serializer inlines it.
	#[serde(default)]
	pub nationality: Option<Nation>,
}

/// Name-only draft shared by the metadata create endpoints; the platform
/// derives slugs server-side.
#[derive(Clone, Debug, Serialize)]
pub struct MetadataDraft {
	/// Display name for the new record.
	pub name: String,
}
impl MetadataDraft {
	/// Creates a draft for the provided name.
	pub fn new(name: impl Into<String>) -> Self {
		Self { name: name.into() }
	}
}
