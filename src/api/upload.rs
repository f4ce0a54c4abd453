//! Video upload endpoint.

// self
use crate::{
	_prelude::*,
	client::{ApiClient, ApiRequest},
	http::MultipartPart,
	model::VideoRecord,
	obs::RequestGroup,
};

/// Form field name the platform expects the file under.
const VIDEO_FIELD: &str = "video_file";

/// Local video payload staged for upload.
#[derive(Clone)]
pub struct VideoUpload {
	/// File name advertised to the platform.
	pub file_name: String,
	/// MIME type of the payload.
	pub mime: String,
	/// Raw file contents.
	pub data: Vec<u8>,
}
impl VideoUpload {
	/// Stages an MP4 payload, the only container the transcoder accepts.
	pub fn mp4(file_name: impl Into<String>, data: Vec<u8>) -> Self {
		Self { file_name: file_name.into(), mime: "video/mp4".into(), data }
	}
}
impl Debug for VideoUpload {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("VideoUpload")
			.field("file_name", &self.file_name)
			.field("mime", &self.mime)
			.field("data", &format_args!("{} bytes", self.data.len()))
			.finish()
	}
}

impl ApiClient {
	/// Uploads a video for HLS conversion; resolves with the stored record
	/// once the platform has accepted the file.
	pub async fn upload_video(&self, upload: VideoUpload) -> Result<VideoRecord> {
		let part = MultipartPart {
			name: VIDEO_FIELD.to_owned(),
			file_name: Some(upload.file_name),
			mime: Some(upload.mime),
			data: upload.data,
		};

		self.fetch_json(
			ApiRequest::post("video/upload/").group(RequestGroup::Upload).multipart(vec![part]),
		)
		.await
	}
}
