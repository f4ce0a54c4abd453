//! Request descriptions flowing through the authenticated dispatch path.

// crates.io
use http::Method;
// self
use crate::{
	_prelude::*,
	client::ClientConfig,
	error::ConfigError,
	http::{MultipartPart, RequestBody},
	obs::RequestGroup,
};

/// One platform API call before credential attachment.
///
/// The description is immutable once dispatched; the retry path re-dispatches
/// the same description with a different credential rather than mutating it.
#[derive(Clone, Debug)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: Method,
	/// Path relative to the configured API root.
	pub path: String,
	/// Query parameters appended in insertion order.
	pub query: Vec<(String, String)>,
	/// Body payload.
	pub body: RequestBody,
	pub(crate) group: RequestGroup,
}
impl ApiRequest {
	/// Creates a request for the provided method and relative path.
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self {
			method,
			path: path.into(),
			query: Vec::new(),
			body: RequestBody::Empty,
			group: RequestGroup::Catalog,
		}
	}

	/// Shorthand for a GET request.
	pub fn get(path: impl Into<String>) -> Self {
		Self::new(Method::GET, path)
	}

	/// Shorthand for a POST request.
	pub fn post(path: impl Into<String>) -> Self {
		Self::new(Method::POST, path)
	}

	/// Shorthand for a PATCH request.
	pub fn patch(path: impl Into<String>) -> Self {
		Self::new(Method::PATCH, path)
	}

	/// Appends one query parameter.
	pub fn query(mut self, key: &str, value: impl ToString) -> Self {
		self.query.push((key.to_owned(), value.to_string()));

		self
	}

	/// Appends one query parameter when a value is present.
	pub fn query_opt(self, key: &str, value: Option<impl ToString>) -> Self {
		match value {
			Some(value) => self.query(key, value),
			None => self,
		}
	}

	/// Attaches a JSON body.
	pub fn json<T>(mut self, payload: &T) -> Result<Self>
	where
		T: Serialize + ?Sized,
	{
		let bytes =
			serde_json::to_vec(payload).map_err(|source| ConfigError::SerializeBody { source })?;

		self.body = RequestBody::Json(bytes);

		Ok(self)
	}

	/// Attaches a multipart body.
	pub fn multipart(mut self, parts: Vec<MultipartPart>) -> Self {
		self.body = RequestBody::Multipart(parts);

		self
	}

	/// Labels the request for spans and counters.
	pub(crate) fn group(mut self, group: RequestGroup) -> Self {
		self.group = group;

		self
	}

	/// Resolves the absolute URL for this request against the configured root.
	pub(crate) fn endpoint(&self, config: &ClientConfig) -> Result<Url, ConfigError> {
		let mut url = config.endpoint(&self.path)?;

		if !self.query.is_empty() {
			let mut pairs = url.query_pairs_mut();

			for (key, value) in &self.query {
				pairs.append_pair(key, value);
			}
		}

		Ok(url)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn config() -> ClientConfig {
		ClientConfig::builder("http://127.0.0.1:8000/api/v1")
			.build()
			.expect("Base URL fixture should build.")
	}

	#[test]
	fn query_parameters_append_in_order() {
		let url = ApiRequest::get("film/movies/")
			.query("ordering", "-views")
			.query("limit", 12)
			.query_opt("genre", None::<u64>)
			.endpoint(&config())
			.expect("Request URL should resolve.");

		assert_eq!(
			url.as_str(),
			"http://127.0.0.1:8000/api/v1/film/movies/?ordering=-views&limit=12"
		);
	}

	#[test]
	fn json_body_serializes_the_payload() {
		#[derive(Serialize)]
		struct Draft {
			name: &'static str,
		}

		let request = ApiRequest::post("film/genres/")
			.json(&Draft { name: "isekai" })
			.expect("JSON body should serialize.");

		match &request.body {
			RequestBody::Json(bytes) => assert_eq!(bytes, b"{\"name\":\"isekai\"}"),
			other => panic!("Expected a JSON body, got: {other:?}."),
		}
	}
}
