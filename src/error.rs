//! Client-wide error types shared across transport, credentials, and endpoint groups.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
///
/// The taxonomy mirrors how failures are recovered from: only [`Error::Unauthorized`]
/// participates in the 401 refresh/replay path, and only once per request. Everything
/// else surfaces to the caller unchanged.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Credential-store failure.
	#[error("{0}")]
	Store(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Non-success HTTP status other than 401.
	#[error(transparent)]
	Status(#[from] StatusError),
	/// Well-formed HTTP response with a body the client could not decode.
	#[error(transparent)]
	Decode(#[from] DecodeError),

	/// The platform rejected the request as unauthorized after the single
	/// permitted retry.
	#[error("Platform rejected the request as unauthorized: {reason}.")]
	Unauthorized {
		/// Server-supplied reason string, when one was present.
		reason: String,
	},
	/// The token refresh call itself failed. Every caller queued on the
	/// in-flight refresh observes this same failure.
	#[error("Token refresh was rejected: {reason}.")]
	RefreshRejected {
		/// HTTP status returned by the refresh endpoint, when one was received.
		status: Option<u16>,
		/// Server- or client-supplied reason string.
		reason: String,
	},
	/// A refresh was required but no usable refresh token is stored.
	#[error("No refresh token is available for this session.")]
	NotAuthenticated,
}

/// Configuration and validation failures raised before a request leaves the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Base URL cannot be parsed.
	#[error("Base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// An endpoint path produced an unusable URL against the base.
	#[error("Endpoint path `{path}` produced an invalid URL.")]
	InvalidEndpoint {
		/// Offending relative path.
		path: String,
	},
	/// A header value contained bytes HTTP forbids.
	#[error("Header value is invalid.")]
	InvalidHeader {
		/// Underlying validation failure.
		#[source]
		source: http::header::InvalidHeaderValue,
	},
	/// A request body failed to serialize.
	#[error("Request body could not be serialized.")]
	SerializeBody {
		/// Underlying serialization failure.
		#[source]
		source: serde_json::Error,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the platform API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the platform API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Non-success HTTP status reported by the platform, with the best-effort
/// server message (the platform uses `detail`, `message`, and `error` keys
/// interchangeably) and any `Retry-After` hint.
#[derive(Debug, ThisError)]
#[error("Platform returned HTTP {status}: {message}.")]
pub struct StatusError {
	/// HTTP status code.
	pub status: u16,
	/// Best-effort server message extracted from the body.
	pub message: String,
	/// Retry-After hint expressed as a relative duration, when present.
	pub retry_after: Option<Duration>,
}

/// Malformed JSON in an otherwise well-formed HTTP response.
#[derive(Debug, ThisError)]
#[error("Response body could not be decoded at `{path}`.")]
pub struct DecodeError {
	/// Dotted path of the field that failed to decode.
	pub path: String,
	/// Structured parsing failure.
	#[source]
	pub source: serde_path_to_error::Error<serde_json::Error>,
	/// HTTP status the body arrived with.
	pub status: u16,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::store::StoreError;

	#[test]
	fn store_error_converts_with_source() {
		let store_error = StoreError::Backend { message: "disk unavailable".into() };
		let error: Error = store_error.clone().into();

		assert!(matches!(error, Error::Store(_)));
		assert!(error.to_string().contains("disk unavailable"));

		let source = StdError::source(&error)
			.expect("Client error should expose the original store error as its source.");

		assert_eq!(source.to_string(), store_error.to_string());
	}

	#[test]
	fn status_error_renders_status_and_message() {
		let error: Error = StatusError {
			status: 503,
			message: "Service Unavailable".into(),
			retry_after: Some(Duration::seconds(30)),
		}
		.into();

		assert!(error.to_string().contains("503"));
		assert!(error.to_string().contains("Service Unavailable"));
	}
}
