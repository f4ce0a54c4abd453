//! Video delivery and upload payloads.

// self
use crate::_prelude::*;

/// Playable sources for one title, as returned by the video endpoints.
///
/// Both URLs are produced by the external media pipeline and are opaque here:
/// `hls_url` points at the HLS manifest, `original_url` at the MP4 fallback.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VideoSource {
	/// HLS manifest URL.
	#[serde(default)]
	pub hls_url: Option<String>,
	/// MP4 fallback URL.
	#[serde(default)]
	pub original_url: Option<String>,
	/// Display title for the player chrome.
	#[serde(default)]
	pub title: Option<String>,
	/// Runtime in seconds.
	#[serde(default)]
	pub duration: Option<u64>,
}
impl VideoSource {
	/// Returns the preferred playback URL: the HLS manifest when present,
	/// otherwise the MP4 fallback.
	pub fn preferred_url(&self) -> Option<&str> {
		self.hls_url.as_deref().or_else(|| self.original_url.as_deref())
	}
}

/// Stored video record created by an upload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VideoRecord {
	/// Video identifier.
	pub id: u64,
	/// Path of the original upload.
	#[serde(default)]
	pub original_video_path: Option<String>,
	/// Path of the generated HLS manifest.
	#[serde(default)]
	pub hls_path: Option<String>,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn preferred_url_falls_back_to_mp4() {
		let both = VideoSource {
			hls_url: Some("/media/hls/index.m3u8".into()),
			original_url: Some("/media/demo.mp4".into()),
			title: None,
			duration: None,
		};

		assert_eq!(both.preferred_url(), Some("/media/hls/index.m3u8"));

		let mp4_only = VideoSource {
			hls_url: None,
			original_url: Some("/media/demo.mp4".into()),
			title: None,
			duration: None,
		};

		assert_eq!(mp4_only.preferred_url(), Some("/media/demo.mp4"));
	}
}
