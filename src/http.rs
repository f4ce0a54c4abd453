//! Transport seam between the client and an HTTP stack.
//!
//! [`ApiTransport`] is the client's only dependency on an HTTP implementation.
//! Transports receive a fully built [`HttpRequest`] (method, absolute URL,
//! headers, body) and resolve with the raw [`HttpResponse`]; everything above
//! this seam — credential attachment, the 401 retry path, decoding — is
//! transport-agnostic. The default [`ReqwestTransport`] lives behind the
//! `reqwest` feature.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
use http::{
	HeaderMap, Method, StatusCode,
	header::{RETRY_AFTER, SET_COOKIE},
};
use time::format_description::well_known::Rfc2822;
// self
use crate::{_prelude::*, auth::SetCookie, error::TransportError};
#[cfg(feature = "reqwest")]
use crate::{client::ClientConfig, error::ConfigError};

/// Boxed future returned by [`ApiTransport::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of carrying platform API calls.
///
/// Implementations map their native failures into [`TransportError`] before
/// resolving, and must be `Send + Sync + 'static` so one transport handle can
/// be shared by every endpoint group behind `Arc<dyn ApiTransport>`.
pub trait ApiTransport
where
	Self: 'static + Send + Sync,
{
	/// Executes one request, resolving with the raw response.
	///
	/// A non-success HTTP status is NOT a transport error; it resolves `Ok`
	/// with the status intact so the client's retry and taxonomy layers can
	/// classify it.
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_>;
}

/// Request description handed to a transport.
#[derive(Clone, Debug)]
pub struct HttpRequest {
	/// HTTP method.
	pub method: Method,
	/// Absolute request URL, query included.
	pub url: Url,
	/// Headers to send verbatim.
	pub headers: HeaderMap,
	/// Body payload.
	pub body: RequestBody,
}

/// Body payload variants supported by the platform API.
#[derive(Clone, Debug, Default)]
pub enum RequestBody {
	/// No body.
	#[default]
	Empty,
	/// UTF-8 JSON payload; the transport sets `Content-Type: application/json`.
	Json(Vec<u8>),
	/// Multipart form payload used by file uploads.
	Multipart(Vec<MultipartPart>),
}

/// One part of a multipart upload.
#[derive(Clone)]
pub struct MultipartPart {
	/// Form field name.
	pub name: String,
	/// File name advertised for the part, when it represents a file.
	pub file_name: Option<String>,
	/// MIME type advertised for the part.
	pub mime: Option<String>,
	/// Raw part contents.
	pub data: Vec<u8>,
}
impl Debug for MultipartPart {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("MultipartPart")
			.field("name", &self.name)
			.field("file_name", &self.file_name)
			.field("mime", &self.mime)
			.field("data", &format_args!("{} bytes", self.data.len()))
			.finish()
	}
}

/// Raw response surfaced by a transport.
#[derive(Clone, Debug)]
pub struct HttpResponse {
	/// HTTP status code.
	pub status: StatusCode,
	/// Response headers.
	pub headers: HeaderMap,
	/// Raw body bytes.
	pub body: Vec<u8>,
}
impl HttpResponse {
	/// Parses every `Set-Cookie` header into name/value pairs.
	pub fn set_cookies(&self) -> Vec<SetCookie> {
		self.headers
			.get_all(SET_COOKIE)
			.iter()
			.filter_map(|value| value.to_str().ok())
			.filter_map(SetCookie::parse)
			.collect()
	}

	/// Returns the `Retry-After` hint, accepting integer seconds or an
	/// RFC 2822 instant.
	pub fn retry_after(&self) -> Option<Duration> {
		parse_retry_after(&self.headers)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one
/// place. The platform returns results directly rather than delegating through
/// redirects, so the transport does not need redirect handling beyond the
/// reqwest defaults.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Builds a transport honoring the config's timeout and user-agent.
	pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
		let timeout = std::time::Duration::try_from(config.timeout)
			.unwrap_or(std::time::Duration::from_secs(10));
		let client = ReqwestClient::builder()
			.timeout(timeout)
			.user_agent(config.user_agent.clone())
			.build()?;

		Ok(Self(client))
	}

	/// Wraps an existing [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ApiTransport for ReqwestTransport {
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let mut builder =
				client.request(request.method, request.url.as_str()).headers(request.headers);

			builder = match request.body {
				RequestBody::Empty => builder,
				RequestBody::Json(bytes) => builder
					.header(http::header::CONTENT_TYPE, "application/json")
					.body(bytes),
				RequestBody::Multipart(parts) => {
					let mut form = reqwest::multipart::Form::new();

					for part in parts {
						let mut piece = reqwest::multipart::Part::bytes(part.data);

						if let Some(file_name) = part.file_name {
							piece = piece.file_name(file_name);
						}
						if let Some(mime) = part.mime {
							piece = piece.mime_str(&mime).map_err(TransportError::network)?;
						}

						form = form.part(part.name, piece);
					}

					builder.multipart(form)
				},
			};

			let response = builder.send().await.map_err(TransportError::from)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let body = response.bytes().await.map_err(TransportError::from)?.to_vec();

			Ok(HttpResponse { status, headers, body })
		})
	}
}

fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
	let value = headers.get(RETRY_AFTER)?;
	let raw = value.to_str().ok()?.trim();

	if let Ok(secs) = raw.parse::<u64>() {
		return Some(Duration::seconds(secs as i64));
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return Some(delta);
		}
	}

	None
}

#[cfg(test)]
mod tests {
	// crates.io
	use http::HeaderValue;
	// self
	use super::*;

	fn response_with_headers(pairs: &[(&str, &str)]) -> HttpResponse {
		let mut headers = HeaderMap::new();

		for (name, value) in pairs {
			headers.append(
				http::header::HeaderName::from_str(name).expect("Header fixture should parse."),
				HeaderValue::from_str(value).expect("Header value fixture should parse."),
			);
		}

		HttpResponse { status: StatusCode::OK, headers, body: Vec::new() }
	}

	#[test]
	fn set_cookies_collects_every_header() {
		let response = response_with_headers(&[
			("set-cookie", "access_token=a1; Path=/"),
			("set-cookie", "refresh_token=r1; HttpOnly"),
		]);
		let cookies = response.set_cookies();

		assert_eq!(cookies.len(), 2);
		assert_eq!(cookies[0].name, "access_token");
		assert_eq!(cookies[1].value, "r1");
	}

	#[test]
	fn retry_after_accepts_integer_seconds() {
		let response = response_with_headers(&[("retry-after", "30")]);

		assert_eq!(response.retry_after(), Some(Duration::seconds(30)));
	}

	#[test]
	fn retry_after_ignores_garbage() {
		let response = response_with_headers(&[("retry-after", "not-a-date")]);

		assert_eq!(response.retry_after(), None);
	}
}
